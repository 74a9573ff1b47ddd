//! Conversion engine
//!
//! Validates a request against the registry, then dispatches to the
//! temperature rule table or to the multiplicative reference-unit rule.
//! Pure: no logging, no I/O, no shared mutable state.

use serde::Serialize;
use gauge_core::{Category, ConversionError};
use crate::format::{format_fixed, format_float, format_operand};
use crate::temperature;
use crate::units::{UnitRegistry, UNITS};

/// Decimal places used for headline values
pub const DEFAULT_DISPLAY_DECIMALS: usize = 2;

/// Successful conversion: the converted value and how it was derived
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub category: Category,
    /// Input value, as given
    pub input: f64,
    pub from: String,
    pub to: String,
    /// Converted value at full precision
    pub value: f64,
    pub formula: String,
}

impl Conversion {
    /// Converted value rounded for display
    pub fn display_value(&self, decimals: usize) -> String {
        format_fixed(self.value, decimals)
    }

    /// One-line summary, e.g. "5 Kilometers = 5000.00 Meters"
    pub fn headline(&self, decimals: usize) -> String {
        format!(
            "{} {} = {} {}",
            format_operand(self.input),
            self.from,
            self.display_value(decimals),
            self.to
        )
    }
}

/// Converts values between units of one category
#[derive(Debug, Clone, Copy)]
pub struct ConversionEngine<'r> {
    registry: &'r UnitRegistry,
}

impl Default for ConversionEngine<'static> {
    fn default() -> Self {
        ConversionEngine::new(&UNITS)
    }
}

impl<'r> ConversionEngine<'r> {
    pub fn new(registry: &'r UnitRegistry) -> Self {
        ConversionEngine { registry }
    }

    pub fn registry(&self) -> &'r UnitRegistry {
        self.registry
    }

    /// Convert `value` from `from` to `to` within the named category
    pub fn convert(
        &self,
        category: &str,
        value: f64,
        from: &str,
        to: &str,
    ) -> Result<Conversion, ConversionError> {
        let category = Category::parse(category)
            .ok_or_else(|| ConversionError::unknown_category(category))?;
        self.convert_in(category, value, from, to)
    }

    /// Convert within a typed category
    pub fn convert_in(
        &self,
        category: Category,
        value: f64,
        from: &str,
        to: &str,
    ) -> Result<Conversion, ConversionError> {
        self.validate(category, from, to)?;

        if from == to {
            return Ok(identity(category, value, from));
        }

        let (converted, formula) = match category {
            Category::Temperature => self.convert_temperature(category, value, from, to)?,
            Category::Length
            | Category::Weight
            | Category::Speed
            | Category::Volume
            | Category::Area
            | Category::Time
            | Category::Energy
            | Category::Data => self.convert_scaled(category, value, from, to)?,
        };

        Ok(Conversion {
            category,
            input: value,
            from: from.to_string(),
            to: to.to_string(),
            value: converted,
            formula,
        })
    }

    fn validate(&self, category: Category, from: &str, to: &str) -> Result<(), ConversionError> {
        if self.registry.units(category).is_empty() {
            return Err(ConversionError::unknown_category(category.name()));
        }
        for unit in [from, to] {
            if !self.registry.contains(category, unit) {
                return Err(ConversionError::unknown_unit(category.name(), unit));
            }
        }
        Ok(())
    }

    fn convert_temperature(
        &self,
        category: Category,
        value: f64,
        from: &str,
        to: &str,
    ) -> Result<(f64, String), ConversionError> {
        let unsupported = || ConversionError::unsupported_temperature_pair(from, to);
        let from_scale = self.registry.scale(category, from).ok_or_else(unsupported)?;
        let to_scale = self.registry.scale(category, to).ok_or_else(unsupported)?;
        let rule = temperature::rule(from_scale, to_scale).ok_or_else(unsupported)?;

        Ok((rule.apply(value), rule.formula.to_string()))
    }

    fn convert_scaled(
        &self,
        category: Category,
        value: f64,
        from: &str,
        to: &str,
    ) -> Result<(f64, String), ConversionError> {
        let from_factor = self.registry.factor(category, from)
            .ok_or_else(|| ConversionError::unknown_unit(category.name(), from))?;
        let to_factor = self.registry.factor(category, to)
            .ok_or_else(|| ConversionError::unknown_unit(category.name(), to))?;

        // value / from_factor reaches the reference unit, * to_factor leaves it
        let converted = value * (to_factor / from_factor);
        let formula = format!(
            "{} {} × ({} / {}) = {} {}",
            format_operand(value),
            from,
            format_operand(to_factor),
            format_operand(from_factor),
            format_float(converted),
            to
        );
        Ok((converted, formula))
    }
}

fn identity(category: Category, value: f64, unit: &str) -> Conversion {
    Conversion {
        category,
        input: value,
        from: unit.to_string(),
        to: unit.to_string(),
        value,
        formula: format!("{} {} = {} {}", format_operand(value), unit, format_float(value), unit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUES: [f64; 6] = [0.0, 1.0, -3.5, 42.0, 1234.5678, 1e-3];

    fn engine() -> ConversionEngine<'static> {
        ConversionEngine::default()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    fn scaled_categories() -> impl Iterator<Item = Category> {
        Category::ALL.into_iter().filter(|c| !c.is_temperature())
    }

    #[test]
    fn test_identity_is_exact() {
        let e = engine();
        for category in Category::ALL {
            for unit in UNITS.units(category) {
                for v in VALUES.iter().copied().chain([0.1 + 0.2, 1.0 / 3.0]) {
                    let c = e.convert_in(category, v, unit.name, unit.name).unwrap();
                    assert_eq!(c.value.to_bits(), v.to_bits(), "{} {}", category, unit.name);
                }
            }
        }
    }

    #[test]
    fn test_identity_formula() {
        let c = engine().convert("Length", 5.0, "Meters", "Meters").unwrap();
        assert_eq!(c.formula, "5 Meters = 5.0 Meters");

        let c = engine().convert("Temperature", -12.5, "Kelvin", "Kelvin").unwrap();
        assert_eq!(c.value, -12.5);
        assert_eq!(c.formula, "-12.5 Kelvin = -12.5 Kelvin");
    }

    #[test]
    fn test_round_trip() {
        let e = engine();
        for category in scaled_categories() {
            for a in UNITS.units(category) {
                for b in UNITS.units(category) {
                    for v in VALUES {
                        let there = e.convert_in(category, v, a.name, b.name).unwrap();
                        let back = e.convert_in(category, there.value, b.name, a.name).unwrap();
                        assert!(close(back.value, v), "{}: {} -> {} -> {} gave {}", category, v, a, b, back.value);
                    }
                }
            }
        }
    }

    #[test]
    fn test_composability() {
        let e = engine();
        for category in scaled_categories() {
            let units = UNITS.units(category);
            for a in units {
                for b in units {
                    for c in units {
                        let v = 17.25;
                        let step = e.convert_in(category, v, a.name, b.name).unwrap();
                        let chained = e.convert_in(category, step.value, b.name, c.name).unwrap();
                        let direct = e.convert_in(category, v, a.name, c.name).unwrap();
                        assert!(close(chained.value, direct.value), "{}: {} -> {} -> {}", category, a, b, c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_temperature_boundaries() {
        let e = engine();
        let t = |v, from, to| e.convert("Temperature", v, from, to).unwrap().value;
        assert_eq!(t(0.0, "Celsius", "Fahrenheit"), 32.0);
        assert_eq!(t(0.0, "Celsius", "Kelvin"), 273.15);
        assert_eq!(t(100.0, "Celsius", "Fahrenheit"), 212.0);
        assert_eq!(t(100.0, "Celsius", "Kelvin"), 373.15);
        assert_eq!(t(32.0, "Fahrenheit", "Celsius"), 0.0);
        assert_eq!(t(-40.0, "Celsius", "Fahrenheit"), -40.0);
    }

    #[test]
    fn test_temperature_formula() {
        let c = engine().convert("Temperature", 0.0, "Celsius", "Fahrenheit").unwrap();
        assert_eq!(c.value, 32.0);
        assert_eq!(c.formula, "(°C × 9/5) + 32");

        let c = engine().convert("Temperature", 300.0, "Kelvin", "Fahrenheit").unwrap();
        assert_eq!(c.formula, "(K - 273.15) × 9/5 + 32");
    }

    #[test]
    fn test_unknown_unit() {
        let err = engine().convert("Length", 1.0, "Meters", "Furlongs").unwrap_err();
        assert!(matches!(err, ConversionError::InvalidSelection { .. }));

        let err = engine().convert("Length", 1.0, "Celsius", "Meters").unwrap_err();
        assert!(matches!(err, ConversionError::InvalidSelection { .. }));
    }

    #[test]
    fn test_unknown_category() {
        let err = engine().convert("Unknown", 1.0, "a", "b").unwrap_err();
        assert_eq!(err, ConversionError::unknown_category("Unknown"));
    }

    #[test]
    fn test_unknown_unit_rejected_even_when_equal() {
        let err = engine().convert("Weight", 1.0, "Stones", "Stones").unwrap_err();
        assert!(matches!(err, ConversionError::InvalidSelection { .. }));
    }

    #[test]
    fn test_kilometers_to_meters() {
        let c = engine().convert("Length", 5.0, "Kilometers", "Meters").unwrap();
        assert_eq!(c.value, 5000.0);
        assert_eq!(c.display_value(2), "5000.00");
        assert_eq!(c.formula, "5 Kilometers × (1 / 0.001) = 5000.0 Meters");
        assert_eq!(c.headline(2), "5 Kilometers = 5000.00 Meters");
    }

    #[test]
    fn test_kilograms_to_pounds() {
        let c = engine().convert("Weight", 10.0, "Kilograms", "Pounds").unwrap();
        assert!(close(c.value, 22.0462));
        assert_eq!(c.display_value(2), "22.05");
        assert_eq!(c.formula, "10 Kilograms × (2.20462 / 1) = 22.0462 Pounds");
    }

    #[test]
    fn test_megabytes_to_kilobytes() {
        let c = engine().convert("Data", 1.0, "Megabytes", "Kilobytes").unwrap();
        assert_eq!(c.value, 1024.0);
        assert_eq!(c.display_value(2), "1024.00");
        assert_eq!(
            c.formula,
            "1 Megabytes × (0.0009765625 / 9.5367431640625e-07) = 1024.0 Kilobytes"
        );
    }

    #[test]
    fn test_seconds_to_hours() {
        let c = engine().convert("Time", 3600.0, "Seconds", "Hours").unwrap();
        assert!(close(c.value, 1.0));
        assert_eq!(c.display_value(DEFAULT_DISPLAY_DECIMALS), "1.00");
    }

    #[test]
    fn test_engine_over_owned_registry() {
        let registry = UnitRegistry::new();
        let e = ConversionEngine::new(&registry);
        let c = e.convert_in(Category::Speed, 36.0, "Kilometers per hour", "Meters per second").unwrap();
        assert!(close(c.value, 10.0));
        assert_eq!(e.registry().units(Category::Speed).len(), 4);
    }

    #[test]
    fn test_conversion_serializes() {
        let c = engine().convert("Volume", 2.0, "Liters", "Milliliters").unwrap();
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["category"], "Volume");
        assert_eq!(json["value"], 2000.0);
        assert_eq!(json["to"], "Milliliters");
    }
}
