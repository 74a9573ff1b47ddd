//! MCP request handling
//!
//! Every handler is a pure function of the server state and the request,
//! so the protocol can be exercised without stdio.

use gauge_core::GaugeError;
use gauge_units::{Category, ConversionEngine};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, info};

use crate::config::{ServerConfig, PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION};

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

const NO_UNITS_MESSAGE: &str = "No valid units found for this conversion type.";

// MCP Protocol types
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

impl McpRequest {
    /// Notifications carry no id and must not be answered
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

impl McpResponse {
    pub fn success(id: Option<JsonValue>, result: JsonValue) -> Self {
        Self { jsonrpc: "2.0".to_string(), id, result: Some(result), error: None }
    }

    pub fn failure(id: Option<JsonValue>, error: McpError) -> Self {
        Self { jsonrpc: "2.0".to_string(), id, result: None, error: Some(error) }
    }
}

#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl McpError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), data: None }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }

    pub fn with_data(mut self, data: JsonValue) -> Self {
        self.data = Some(data);
        self
    }
}

impl From<GaugeError> for McpError {
    fn from(err: GaugeError) -> Self {
        let data = serde_json::to_value(&err).ok();
        McpError { code: INVALID_PARAMS, message: err.message, data }
    }
}

/// Conversion server state: configuration plus an engine over a shared registry
pub struct Server<'r> {
    config: ServerConfig,
    engine: ConversionEngine<'r>,
}

impl<'r> Server<'r> {
    pub fn new(config: ServerConfig, engine: ConversionEngine<'r>) -> Self {
        Self { config, engine }
    }

    pub fn handle_request(&self, request: &McpRequest) -> McpResponse {
        debug!(method = %request.method, "handling request");

        let result = match request.method.as_str() {
            // Lifecycle
            "initialize" => handle_initialize(&request.params),
            "initialized" | "notifications/initialized" => Ok(json!({})),
            "ping" => Ok(json!({})),

            // Tools
            "tools/list" => handle_tools_list(),
            "tools/call" => self.handle_tool_call(&request.params),

            // Prompts
            "prompts/list" => handle_prompts_list(),
            "prompts/get" => handle_prompts_get(&request.params),

            _ => Err(McpError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            )),
        };

        match result {
            Ok(r) => McpResponse::success(request.id.clone(), r),
            Err(e) => McpResponse::failure(request.id.clone(), e),
        }
    }

    fn handle_tool_call(&self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;

        let name = params.get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

        let args = params.get("arguments").cloned().unwrap_or(json!({}));

        match name {
            "list_categories" => self.tool_list_categories(),
            "list_units" => self.tool_list_units(&args),
            "convert" => self.tool_convert(&args),
            _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
        }
    }

    fn tool_list_categories(&self) -> Result<JsonValue, McpError> {
        let names: Vec<&str> = self.engine.registry().categories().iter().map(Category::name).collect();
        Ok(json!({
            "content": [{ "type": "text", "text": names.join(", ") }],
            "categories": names
        }))
    }

    fn tool_list_units(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let category = text_arg(args, "list_units", "category")?;
        let units = self.engine.registry().units_for(category);

        let text = if units.is_empty() {
            NO_UNITS_MESSAGE.to_string()
        } else {
            units.join(", ")
        };

        Ok(json!({
            "content": [{ "type": "text", "text": text }],
            "category": category,
            "units": units
        }))
    }

    fn tool_convert(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let category = text_arg(args, "convert", "category")?;
        let value = number_arg(args, "convert", "value")?;
        let from = text_arg(args, "convert", "from_unit")?;
        let to = text_arg(args, "convert", "to_unit")?;

        match self.engine.convert(category, value, from, to) {
            Ok(conversion) => {
                let decimals = self.config.display_decimals;
                let text = format!(
                    "{}\n\nConversion Formula:\n{}",
                    conversion.headline(decimals),
                    conversion.formula
                );
                Ok(json!({
                    "content": [{ "type": "text", "text": text }],
                    "value": conversion.value,
                    "display": conversion.display_value(decimals),
                    "formula": conversion.formula,
                    "isError": false
                }))
            }
            Err(e) => {
                info!(%category, %from, %to, error = %e, "conversion rejected");
                let err = GaugeError::from(e);
                Ok(json!({
                    "content": [{ "type": "text", "text": err.message }],
                    "error": err,
                    "isError": true
                }))
            }
        }
    }
}

fn text_arg<'a>(args: &'a JsonValue, tool: &str, name: &str) -> Result<&'a str, McpError> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Err(GaugeError::arg_missing(tool, name).into()),
        Some(v) => v.as_str().ok_or_else(|| GaugeError::arg_type(tool, name, "a string").into()),
    }
}

/// Numbers may arrive as JSON numbers or numeric strings; both must be finite
fn number_arg(args: &JsonValue, tool: &str, name: &str) -> Result<f64, McpError> {
    let parsed = match args.get(name) {
        None | Some(JsonValue::Null) => return Err(GaugeError::arg_missing(tool, name).into()),
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| GaugeError::arg_type(tool, name, "a finite number").into())
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Unit converter with formula provenance"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            },
            "prompts": {
                "listChanged": false
            }
        },
        "instructions": "Gauge converts values between units of one category. Call list_categories, then list_units for the chosen category, then convert. Always show the user the converted value together with its formula."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    let categories: Vec<&str> = Category::ALL.iter().map(Category::name).collect();
    Ok(json!({
        "tools": [
            {
                "name": "list_categories",
                "description": "List the conversion categories.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "list_units",
                "description": "List the units of a category, in display order.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Category name",
                            "enum": categories
                        }
                    },
                    "required": ["category"]
                }
            },
            {
                "name": "convert",
                "description": "Convert a value between two units of one category. Returns the value and the formula used.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Category name",
                            "enum": categories
                        },
                        "value": {
                            "type": "number",
                            "description": "Value to convert"
                        },
                        "from_unit": {
                            "type": "string",
                            "description": "Source unit name (e.g., \"Kilometers\")"
                        },
                        "to_unit": {
                            "type": "string",
                            "description": "Target unit name (e.g., \"Meters\")"
                        }
                    },
                    "required": ["category", "value", "from_unit", "to_unit"]
                }
            }
        ]
    }))
}

fn handle_prompts_list() -> Result<JsonValue, McpError> {
    Ok(json!({
        "prompts": [
            {
                "name": "convert_units",
                "description": "Convert a value and explain the formula",
                "arguments": [
                    {"name": "category", "description": "Category name (e.g., Length)", "required": true},
                    {"name": "value", "description": "Value to convert", "required": true},
                    {"name": "from_unit", "description": "Source unit", "required": true},
                    {"name": "to_unit", "description": "Target unit", "required": true}
                ]
            }
        ]
    }))
}

fn handle_prompts_get(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|n| n.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing name parameter"))?;

    if name != "convert_units" {
        return Err(McpError::invalid_params(format!("Unknown prompt: {}", name))
            .with_data(json!({ "available_prompts": ["convert_units"] })));
    }

    let arg = |key: &str| -> String {
        params.get("arguments")
            .and_then(|a| a.get(key))
            .map(|v| match v {
                JsonValue::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| format!("<{}>", key))
    };

    let prompt_text = format!(
        "Use the convert tool to convert {} {} to {} in the {} category. \
         Show the converted value rounded to two decimals, then the conversion formula exactly as returned.",
        arg("value"),
        arg("from_unit"),
        arg("to_unit"),
        arg("category")
    );

    Ok(json!({
        "description": "Gauge prompt: convert_units",
        "messages": [{
            "role": "user",
            "content": {
                "type": "text",
                "text": prompt_text
            }
        }]
    }))
}
