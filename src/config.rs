//! Calculator Configuration
//!
//! Tunables for [`FarmCalculator`](crate::FarmCalculator). The defaults
//! reproduce the free functions exactly: one currency unit per plant and
//! crop yields rounded to 2 decimals.

use crate::economics::COST_PER_PLANT;
use crate::yields::YIELD_DECIMALS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Upper bound on rounding precision; beyond this `10^d` scaling loses meaning
pub const MAX_YIELD_DECIMALS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalculatorConfig {
    /// Currency units spent per plant grown
    pub cost_per_plant: f64,

    /// Decimal places kept when rounding crop yields
    pub yield_decimals: u32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            cost_per_plant: COST_PER_PLANT,
            yield_decimals: YIELD_DECIMALS,
        }
    }
}

impl CalculatorConfig {
    /// Parse and validate a JSON config; missing fields take their defaults
    ///
    /// ```
    /// use farm_yield::CalculatorConfig;
    ///
    /// let config = CalculatorConfig::from_json_str(r#"{"costPerPlant": 0.5}"#).unwrap();
    /// assert_eq!(config.cost_per_plant, 0.5);
    /// assert_eq!(config.yield_decimals, 2);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: CalculatorConfig = serde_json::from_str(json)
            .with_context(|| "Failed to parse calculator config JSON")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.cost_per_plant.is_finite() || self.cost_per_plant < 0.0 {
            anyhow::bail!("costPerPlant must be a non-negative number, got {}", self.cost_per_plant);
        }
        if self.yield_decimals > MAX_YIELD_DECIMALS {
            anyhow::bail!(
                "yieldDecimals must be at most {}, got {}",
                MAX_YIELD_DECIMALS, self.yield_decimals
            );
        }
        Ok(())
    }
}
