//! Gauge Units - category unit conversion
//!
//! Each category converts through a reference unit whose factor is 1.
//! Temperature is the exception and goes through a scale-pair rule table.
//!
//! Categories:
//! - Length (Meters, Kilometers, Feet, ...)
//! - Weight (Kilograms, Pounds, ...)
//! - Temperature (Celsius, Fahrenheit, Kelvin)
//! - Speed, Volume, Area, Time, Energy
//! - Data (Bytes through Terabytes, binary prefixes)

mod unit;
mod units;
mod temperature;
mod convert;
pub mod format;

pub use gauge_core::{Category, ConversionError};
pub use unit::{Measure, TemperatureScale, UnitDefinition};
pub use units::{UnitRegistry, UNITS};
pub use temperature::{rule as temperature_rule, rules as temperature_rules, TemperatureRule};
pub use convert::{Conversion, ConversionEngine, DEFAULT_DISPLAY_DECIMALS};

/// The fixed category list, in display order
pub fn list_categories() -> Vec<Category> {
    UNITS.categories()
}

/// Unit names of a category; empty when the category is unknown
pub fn list_units(category: &str) -> Vec<&'static str> {
    UNITS.units_for(category)
}

/// Convert using the global registry
pub fn convert(category: &str, value: f64, from: &str, to: &str) -> Result<Conversion, ConversionError> {
    ConversionEngine::default().convert(category, value, from, to)
}
