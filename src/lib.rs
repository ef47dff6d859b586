//! Farm Yield Calculator
//!
//! Yield, cost, revenue and profit figures for crops grown under variable
//! environmental conditions. Every operation is a pure function of its inputs.
//!
//! - `types`: plants, environment snapshots, crop entries and farms
//! - `yields`: plant, crop and total yield
//! - `economics`: crop cost, revenue, profit and total profit
//! - `calculator`: configurable coordinator and farm reports
//! - `utils/`: rounding helpers
//!
//! ```
//! use farm_yield::{crop_profit, CropEntry, EnvironmentFactors, Plant};
//! use std::sync::Arc;
//!
//! let corn = Arc::new(
//!     Plant::new("corn", 3.0)
//!         .with_sale_price(5.0)
//!         .with_factor("sun", [("low", -50), ("medium", 0), ("high", 50)]),
//! );
//! let entry = CropEntry::new(corn, 10)
//!     .with_environment(EnvironmentFactors::new().with("sun", "high"));
//!
//! assert_eq!(crop_profit(&entry).unwrap(), 215.0);
//! ```

pub mod calculator;
pub mod config;
pub mod economics;
pub mod error;
pub mod types;
pub mod utils;
pub mod yields;

// Re-export commonly used types
pub use calculator::{CropReport, FarmCalculator, FarmReport};
pub use config::CalculatorConfig;
pub use economics::{crop_cost, crop_profit, crop_revenue, total_profit};
pub use error::{FarmError, Result};
pub use types::{CropEntry, EnvironmentFactors, FactorTable, Farm, LevelTable, Plant};
pub use yields::{crop_yield, plant_yield, total_yield};
