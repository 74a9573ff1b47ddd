//! Gauge Core - Fundamental types
//!
//! This crate provides the types shared by the engine and its hosts:
//! - `Category`: the closed set of conversion categories
//! - `ConversionError`: typed failures of a conversion request
//! - `GaugeError`: structured errors for host consumption

mod category;
mod error;

pub use category::Category;
pub use error::{ConversionError, GaugeError, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Category, ConversionError, GaugeError};
    pub use crate::error::codes;
}
