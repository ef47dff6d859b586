//! Error types for yield and economics calculations

use thiserror::Error;

/// Errors raised while evaluating a plant, crop entry, or farm
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FarmError {
    /// The plant reacts to `factor` but has no percentage for `level`
    #[error("plant '{plant}' has no level '{level}' for factor '{factor}'")]
    UnknownLevel {
        plant: String,
        factor: String,
        level: String,
    },

    #[error("plant '{plant}' has no sale price")]
    MissingSalePrice { plant: String },

    #[error("plant '{plant}' has invalid base yield {value}")]
    InvalidYield { plant: String, value: f64 },

    #[error("plant '{plant}' has invalid sale price {value}")]
    InvalidSalePrice { plant: String, value: f64 },

    #[error("yield of plant '{plant}' exceeds the representable range")]
    YieldOverflow { plant: String },

    #[error("revenue of plant '{plant}' exceeds the representable range")]
    RevenueOverflow { plant: String },

    /// A farm-wide sum left the finite range
    #[error("farm total {quantity} exceeds the representable range")]
    TotalOverflow { quantity: &'static str },
}

pub type Result<T> = std::result::Result<T, FarmError>;
