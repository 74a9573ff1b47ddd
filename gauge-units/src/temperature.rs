//! Temperature conversion rules
//!
//! Temperature scales are affine, so they cannot share a reference-unit
//! factor. Every (from, to) scale pair has its own rule with a fixed
//! formula string.

use crate::TemperatureScale;
use crate::unit::TemperatureScale::{Celsius, Fahrenheit, Kelvin};

const KELVIN_OFFSET: f64 = 273.15;
const FAHRENHEIT_OFFSET: f64 = 32.0;

/// One entry of the temperature rule table
#[derive(Debug, Clone, Copy)]
pub struct TemperatureRule {
    pub from: TemperatureScale,
    pub to: TemperatureScale,
    /// Human-readable formula, in terms of the source scale
    pub formula: &'static str,
    apply: fn(f64) -> f64,
}

impl TemperatureRule {
    /// Apply the rule to a value on the source scale
    pub fn apply(&self, value: f64) -> f64 {
        (self.apply)(value)
    }

    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }
}

static RULES: [TemperatureRule; 9] = [
    TemperatureRule { from: Celsius, to: Celsius, formula: "°C", apply: |v| v },
    TemperatureRule { from: Fahrenheit, to: Fahrenheit, formula: "°F", apply: |v| v },
    TemperatureRule { from: Kelvin, to: Kelvin, formula: "K", apply: |v| v },
    TemperatureRule {
        from: Celsius,
        to: Fahrenheit,
        formula: "(°C × 9/5) + 32",
        apply: |v| v * 9.0 / 5.0 + FAHRENHEIT_OFFSET,
    },
    TemperatureRule {
        from: Celsius,
        to: Kelvin,
        formula: "°C + 273.15",
        apply: |v| v + KELVIN_OFFSET,
    },
    TemperatureRule {
        from: Fahrenheit,
        to: Celsius,
        formula: "(°F - 32) × 5/9",
        apply: |v| (v - FAHRENHEIT_OFFSET) * 5.0 / 9.0,
    },
    TemperatureRule {
        from: Fahrenheit,
        to: Kelvin,
        formula: "(°F - 32) × 5/9 + 273.15",
        apply: |v| (v - FAHRENHEIT_OFFSET) * 5.0 / 9.0 + KELVIN_OFFSET,
    },
    TemperatureRule {
        from: Kelvin,
        to: Celsius,
        formula: "K - 273.15",
        apply: |v| v - KELVIN_OFFSET,
    },
    TemperatureRule {
        from: Kelvin,
        to: Fahrenheit,
        formula: "(K - 273.15) × 9/5 + 32",
        apply: |v| (v - KELVIN_OFFSET) * 9.0 / 5.0 + FAHRENHEIT_OFFSET,
    },
];

/// All rules, identity entries first
pub fn rules() -> &'static [TemperatureRule] {
    &RULES
}

/// Find the rule for a scale pair
pub fn rule(from: TemperatureScale, to: TemperatureScale) -> Option<&'static TemperatureRule> {
    RULES.iter().find(|r| r.from == from && r.to == to)
}
