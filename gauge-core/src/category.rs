//! Conversion categories

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::ConversionError;

/// A domain of mutually convertible units.
///
/// The set is closed: every category is known at compile time and each one
/// owns exactly one unit table in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Length,
    Weight,
    Temperature,
    Speed,
    Volume,
    Area,
    Time,
    Energy,
    Data,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 9] = [
        Category::Length,
        Category::Weight,
        Category::Temperature,
        Category::Speed,
        Category::Volume,
        Category::Area,
        Category::Time,
        Category::Energy,
        Category::Data,
    ];

    /// Display name, also the accepted input spelling
    pub fn name(&self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Weight => "Weight",
            Category::Temperature => "Temperature",
            Category::Speed => "Speed",
            Category::Volume => "Volume",
            Category::Area => "Area",
            Category::Time => "Time",
            Category::Energy => "Energy",
            Category::Data => "Data",
        }
    }

    /// Look up a category by its display name. Unknown names are `None`.
    pub fn parse(name: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// Temperature is affine, every other category is purely multiplicative
    pub fn is_temperature(&self) -> bool {
        matches!(self, Category::Temperature)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::parse(s).ok_or_else(|| ConversionError::unknown_category(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_name() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.name()), Some(category));
        }
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(Category::parse("length"), None);
        assert_eq!(Category::parse("Unknown"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "Furlongs".parse::<Category>().unwrap_err();
        assert!(matches!(err, ConversionError::InvalidSelection { .. }));
    }

    #[test]
    fn test_only_temperature_is_affine() {
        let affine: Vec<_> = Category::ALL.iter().filter(|c| c.is_temperature()).collect();
        assert_eq!(affine, vec![&Category::Temperature]);
    }

    #[test]
    fn test_serde_uses_variant_name() {
        let json = serde_json::to_string(&Category::Data).unwrap();
        assert_eq!(json, "\"Data\"");
        let back: Category = serde_json::from_str("\"Energy\"").unwrap();
        assert_eq!(back, Category::Energy);
    }
}
