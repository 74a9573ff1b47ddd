//! Unit definitions - per-category tables around a reference unit

use std::collections::HashMap;
use std::sync::LazyLock;
use gauge_core::Category;
use crate::{TemperatureScale, UnitDefinition};

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Registry of all known units, keyed by category.
///
/// Built once and read-only afterwards. Each table keeps insertion order,
/// which is the order hosts present units in.
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    tables: HashMap<Category, Vec<UnitDefinition>>,
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            tables: HashMap::new(),
        };
        registry.register_all_units();
        registry
    }

    /// All categories in display order
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL.to_vec()
    }

    /// Unit table of a category
    pub fn units(&self, category: Category) -> &[UnitDefinition] {
        self.tables.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Unit names of a category by name; empty when the category is unknown
    pub fn units_for(&self, category: &str) -> Vec<&'static str> {
        match Category::parse(category) {
            Some(c) => self.units(c).iter().map(|u| u.name).collect(),
            None => Vec::new(),
        }
    }

    /// Get a unit by exact name
    pub fn definition(&self, category: Category, unit: &str) -> Option<&UnitDefinition> {
        self.units(category).iter().find(|u| u.name == unit)
    }

    /// Check if a unit belongs to a category
    pub fn contains(&self, category: Category, unit: &str) -> bool {
        self.definition(category, unit).is_some()
    }

    /// Conversion factor of a multiplicative unit
    pub fn factor(&self, category: Category, unit: &str) -> Option<f64> {
        self.definition(category, unit).and_then(UnitDefinition::as_factor)
    }

    /// Conversion factor by category name; absent for unknown inputs and temperature units
    pub fn factor_for(&self, category: &str, unit: &str) -> Option<f64> {
        Category::parse(category).and_then(|c| self.factor(c, unit))
    }

    /// Temperature scale of a unit
    pub fn scale(&self, category: Category, unit: &str) -> Option<TemperatureScale> {
        self.definition(category, unit).and_then(UnitDefinition::as_scale)
    }

    /// Check by name whether a category uses the temperature rules
    pub fn is_temperature(&self, category: &str) -> bool {
        Category::parse(category).is_some_and(|c| c.is_temperature())
    }

    fn register(&mut self, category: Category, unit: UnitDefinition) {
        let table = self.tables.entry(category).or_default();
        debug_assert!(
            table.iter().all(|u| u.name != unit.name),
            "duplicate unit {} in {}", unit.name, category
        );
        table.push(unit);
    }

    fn register_all_units(&mut self) {
        for category in Category::ALL {
            match category {
                Category::Length => self.register_length_units(),
                Category::Weight => self.register_weight_units(),
                Category::Temperature => self.register_temperature_units(),
                Category::Speed => self.register_speed_units(),
                Category::Volume => self.register_volume_units(),
                Category::Area => self.register_area_units(),
                Category::Time => self.register_time_units(),
                Category::Energy => self.register_energy_units(),
                Category::Data => self.register_data_units(),
            }
        }
    }

    // Reference: meter
    fn register_length_units(&mut self) {
        let c = Category::Length;
        self.register(c, UnitDefinition::factor("Meters", 1.0));
        self.register(c, UnitDefinition::factor("Kilometers", 0.001));
        self.register(c, UnitDefinition::factor("Centimeters", 100.0));
        self.register(c, UnitDefinition::factor("Yards", 1.09361));
        self.register(c, UnitDefinition::factor("Feet", 3.28084));
        self.register(c, UnitDefinition::factor("Millimeters", 1000.0));
    }

    // Reference: kilogram
    fn register_weight_units(&mut self) {
        let c = Category::Weight;
        self.register(c, UnitDefinition::factor("Kilograms", 1.0));
        self.register(c, UnitDefinition::factor("Grams", 1000.0));
        self.register(c, UnitDefinition::factor("Pounds", 2.20462));
        self.register(c, UnitDefinition::factor("Ounces", 35.274));
        self.register(c, UnitDefinition::factor("Tonnes", 0.001));
    }

    fn register_temperature_units(&mut self) {
        let c = Category::Temperature;
        self.register(c, UnitDefinition::scale("Celsius", TemperatureScale::Celsius));
        self.register(c, UnitDefinition::scale("Fahrenheit", TemperatureScale::Fahrenheit));
        self.register(c, UnitDefinition::scale("Kelvin", TemperatureScale::Kelvin));
    }

    // Reference: meter per second
    fn register_speed_units(&mut self) {
        let c = Category::Speed;
        self.register(c, UnitDefinition::factor("Meters per second", 1.0));
        self.register(c, UnitDefinition::factor("Kilometers per hour", 3.6));
        self.register(c, UnitDefinition::factor("Miles per hour", 2.23694));
        self.register(c, UnitDefinition::factor("Feet per second", 3.28084));
    }

    // Reference: liter
    fn register_volume_units(&mut self) {
        let c = Category::Volume;
        self.register(c, UnitDefinition::factor("Liters", 1.0));
        self.register(c, UnitDefinition::factor("Milliliters", 1000.0));
        self.register(c, UnitDefinition::factor("Gallons", 0.264172));
        self.register(c, UnitDefinition::factor("Cubic Meters", 0.001));
        self.register(c, UnitDefinition::factor("Cups", 4.22675));
    }

    // Reference: square meter
    fn register_area_units(&mut self) {
        let c = Category::Area;
        self.register(c, UnitDefinition::factor("Square Meters", 1.0));
        self.register(c, UnitDefinition::factor("Square Feet", 10.7639));
        self.register(c, UnitDefinition::factor("Square Kilometers", 1e-6));
        self.register(c, UnitDefinition::factor("Square Centimeters", 10000.0));
        self.register(c, UnitDefinition::factor("Acres", 0.000247105));
    }

    // Reference: second
    fn register_time_units(&mut self) {
        let c = Category::Time;
        self.register(c, UnitDefinition::factor("Seconds", 1.0));
        self.register(c, UnitDefinition::factor("Minutes", 1.0 / 60.0));
        self.register(c, UnitDefinition::factor("Hours", 1.0 / 3600.0));
        self.register(c, UnitDefinition::factor("Days", 1.0 / 86400.0));
        self.register(c, UnitDefinition::factor("Weeks", 1.0 / 604800.0));
    }

    // Reference: joule
    fn register_energy_units(&mut self) {
        let c = Category::Energy;
        self.register(c, UnitDefinition::factor("Joules", 1.0));
        self.register(c, UnitDefinition::factor("Calories", 0.239006));
        self.register(c, UnitDefinition::factor("Kilowatt-hours", 1.0 / 3_600_000.0));
        self.register(c, UnitDefinition::factor("BTU", 1.0 / 1055.06));
        self.register(c, UnitDefinition::factor("Foot-pounds", 0.737562));
    }

    // Reference: byte, binary prefixes
    fn register_data_units(&mut self) {
        const KIB: f64 = 1024.0;
        let c = Category::Data;
        self.register(c, UnitDefinition::factor("Bytes", 1.0));
        self.register(c, UnitDefinition::factor("Kilobytes", 1.0 / KIB));
        self.register(c, UnitDefinition::factor("Megabytes", 1.0 / (KIB * KIB)));
        self.register(c, UnitDefinition::factor("Gigabytes", 1.0 / (KIB * KIB * KIB)));
        self.register(c, UnitDefinition::factor("Terabytes", 1.0 / (KIB * KIB * KIB * KIB)));
    }
}
