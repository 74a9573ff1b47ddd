//! Gauge MCP Server
//!
//! MCP Server for protocol revision 2025-11-25 over line-delimited stdio.
//!
//! Tools:
//! - list_categories: List conversion categories
//! - list_units: List the units of a category
//! - convert: Convert a value and return the formula used
//!
//! Prompts:
//! - convert_units: Ask for a conversion with its derivation

mod config;
mod server;

use std::io::{self, BufRead, IsTerminal, Write};

use gauge_units::ConversionEngine;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{ServerConfig, PROTOCOL_VERSION, SERVER_VERSION};
use crate::server::{McpError, McpRequest, McpResponse, Server, PARSE_ERROR};

/// Logs go to stderr; stdout carries the protocol
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn write_response(out: &mut impl Write, response: &McpResponse) -> io::Result<()> {
    serde_json::to_writer(&mut *out, response)?;
    out.write_all(b"\n")?;
    out.flush()
}

fn main() {
    init_logging();

    let config = ServerConfig::from_env();
    let server = Server::new(config.clone(), ConversionEngine::default());

    info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "Gauge MCP server started");
    info!(display_decimals = config.display_decimals, "configuration loaded");
    debug!(
        stdin_terminal = io::stdin().is_terminal(),
        stdout_terminal = io::stdout().is_terminal(),
        "stdio"
    );

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());
    let mut line = String::new();

    info!("Server ready, waiting for requests...");

    loop {
        line.clear();
        let read = match reader.read_line(&mut line) {
            Ok(n) => n,
            Err(e) => {
                error!(error = %e, "error reading input");
                break;
            }
        };
        if read == 0 {
            info!("client disconnected (EOF)");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        debug!(bytes = trimmed.len(), "received");

        let request: McpRequest = match serde_json::from_str(trimmed) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "error parsing request");
                let response = McpResponse::failure(
                    None,
                    McpError::new(PARSE_ERROR, format!("Parse error: {}", e)),
                );
                if let Err(e) = write_response(&mut io::stdout().lock(), &response) {
                    error!(error = %e, "error writing response");
                    break;
                }
                continue;
            }
        };

        let response = server.handle_request(&request);

        // Notifications (no id) should NOT receive a response
        if request.is_notification() {
            debug!(method = %request.method, "notification processed (no response)");
            continue;
        }

        if let Err(e) = write_response(&mut io::stdout().lock(), &response) {
            error!(error = %e, "error writing response");
            break;
        }
        debug!(method = %request.method, "sent response");
    }

    info!("Server shutting down");
}
