//! Unit representation with conversion factors

use std::fmt;
use serde::{Serialize, Deserialize};

/// Temperature scale identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureScale {
    /// Short scale symbol ("C", "F", "K")
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "C",
            TemperatureScale::Fahrenheit => "F",
            TemperatureScale::Kelvin => "K",
        }
    }
}

impl fmt::Display for TemperatureScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// How a unit relates to its category's reference unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    /// How many of this unit equal one reference unit
    Factor(f64),
    /// Affine temperature scale, converted through the rule table
    Scale(TemperatureScale),
}

/// A named unit inside one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitDefinition {
    /// Display name, unique within the category (e.g., "Kilometers")
    pub name: &'static str,
    pub measure: Measure,
}

impl UnitDefinition {
    /// Create a unit with a multiplicative factor
    pub const fn factor(name: &'static str, factor: f64) -> Self {
        UnitDefinition { name, measure: Measure::Factor(factor) }
    }

    /// Create a temperature unit
    pub const fn scale(name: &'static str, scale: TemperatureScale) -> Self {
        UnitDefinition { name, measure: Measure::Scale(scale) }
    }

    /// Conversion factor, absent for temperature units
    pub fn as_factor(&self) -> Option<f64> {
        match self.measure {
            Measure::Factor(f) => Some(f),
            Measure::Scale(_) => None,
        }
    }

    /// Temperature scale, absent for multiplicative units
    pub fn as_scale(&self) -> Option<TemperatureScale> {
        match self.measure {
            Measure::Scale(s) => Some(s),
            Measure::Factor(_) => None,
        }
    }

    /// Check if this is the reference unit of its category
    pub fn is_reference(&self) -> bool {
        self.as_factor() == Some(1.0)
    }
}

impl fmt::Display for UnitDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_unit() {
        let km = UnitDefinition::factor("Kilometers", 0.001);
        assert_eq!(km.as_factor(), Some(0.001));
        assert_eq!(km.as_scale(), None);
        assert!(!km.is_reference());
    }

    #[test]
    fn test_reference_unit() {
        assert!(UnitDefinition::factor("Meters", 1.0).is_reference());
    }

    #[test]
    fn test_scale_unit() {
        let k = UnitDefinition::scale("Kelvin", TemperatureScale::Kelvin);
        assert_eq!(k.as_factor(), None);
        assert_eq!(k.as_scale(), Some(TemperatureScale::Kelvin));
        assert!(!k.is_reference());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", UnitDefinition::factor("Feet", 3.28084)), "Feet");
        assert_eq!(format!("{}", TemperatureScale::Fahrenheit), "F");
    }
}
