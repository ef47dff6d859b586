//! Utility modules shared by the yield and economics calculations

pub mod rounding;

pub use rounding::round_to_decimals;
