//! Farm Calculator - coordinator for yield and economics figures
//!
//! Wraps the free functions in [`yields`](crate::yields) and
//! [`economics`](crate::economics) behind a [`CalculatorConfig`], and builds
//! per-crop and whole-farm reports.

use crate::config::CalculatorConfig;
use crate::economics::{crop_cost_at, crop_profit_at, crop_revenue_at, total_profit_at};
use crate::error::{FarmError, Result};
use crate::types::{CropEntry, EnvironmentFactors, Farm, Plant};
use crate::yields::{crop_yield_at, plant_yield, total_yield_at};
use serde::Serialize;
use tracing::debug;

/// Main farm calculator
#[derive(Debug, Clone, Default)]
pub struct FarmCalculator {
    config: CalculatorConfig,
}

/// Figures for one crop entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropReport {
    pub plant: String,
    pub num_crops: u32,
    pub yield_kg: f64,
    pub cost: f64,
    pub revenue: f64,
    pub profit: f64,
}

/// Figures for a whole farm, with totals summed in entry order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmReport {
    pub crops: Vec<CropReport>,
    pub total_yield: f64,
    pub total_cost: f64,
    pub total_revenue: f64,
    pub total_profit: f64,
}

impl FarmCalculator {
    /// Create a calculator, validating the config first
    pub fn new(config: CalculatorConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn plant_yield(&self, plant: &Plant, environment: Option<&EnvironmentFactors>) -> Result<f64> {
        plant_yield(plant, environment)
    }

    pub fn crop_yield(&self, entry: &CropEntry) -> Result<f64> {
        crop_yield_at(entry, self.config.yield_decimals)
    }

    pub fn total_yield(&self, farm: &Farm) -> Result<f64> {
        total_yield_at(farm, self.config.yield_decimals)
    }

    pub fn crop_cost(&self, entry: &CropEntry) -> f64 {
        crop_cost_at(entry, self.config.cost_per_plant)
    }

    pub fn crop_revenue(&self, entry: &CropEntry) -> Result<f64> {
        crop_revenue_at(entry, self.config.yield_decimals)
    }

    pub fn crop_profit(&self, entry: &CropEntry) -> Result<f64> {
        crop_profit_at(entry, self.config.yield_decimals, self.config.cost_per_plant)
    }

    pub fn total_profit(&self, farm: &Farm) -> Result<f64> {
        total_profit_at(farm, self.config.yield_decimals, self.config.cost_per_plant)
    }

    /// Yield, cost, revenue and profit for one entry
    ///
    /// Requires the plant to have a sale price.
    pub fn crop_report(&self, entry: &CropEntry) -> Result<CropReport> {
        let yield_kg = self.crop_yield(entry)?;
        let cost = self.crop_cost(entry);
        let revenue = self.crop_revenue(entry)?;

        Ok(CropReport {
            plant: entry.crop.name.clone(),
            num_crops: entry.num_crops,
            yield_kg,
            cost,
            revenue,
            profit: revenue - cost,
        })
    }

    /// Per-crop reports plus farm totals
    ///
    /// Fails on the first entry that cannot be evaluated.
    pub fn farm_report(&self, farm: &Farm) -> Result<FarmReport> {
        let crops = farm
            .iter()
            .map(|entry| self.crop_report(entry))
            .collect::<Result<Vec<_>>>()?;

        let mut report = FarmReport {
            crops,
            total_yield: 0.0,
            total_cost: 0.0,
            total_revenue: 0.0,
            total_profit: 0.0,
        };

        for crop in &report.crops {
            report.total_yield += crop.yield_kg;
            report.total_cost += crop.cost;
            report.total_revenue += crop.revenue;
            report.total_profit += crop.profit;
        }

        let totals = [
            ("yield", report.total_yield),
            ("cost", report.total_cost),
            ("revenue", report.total_revenue),
            ("profit", report.total_profit),
        ];
        if let Some((quantity, _)) = totals.iter().find(|(_, value)| !value.is_finite()) {
            return Err(FarmError::TotalOverflow { quantity: *quantity });
        }

        debug!(
            crops = report.crops.len(),
            total_yield = report.total_yield,
            total_profit = report.total_profit,
            "built farm report"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn farm() -> Farm {
        let corn = Arc::new(
            Plant::new("corn", 3.0)
                .with_sale_price(5.0)
                .with_factor("sun", [("low", -50), ("medium", 0), ("high", 50)]),
        );
        let pumpkin = Arc::new(Plant::new("pumpkin", 4.0).with_sale_price(2.5));

        Farm::new(vec![
            CropEntry::new(corn.clone(), 10),
            CropEntry::new(pumpkin, 4),
            CropEntry::new(corn, 2).with_environment(EnvironmentFactors::new().with("sun", "high")),
        ])
    }

    #[test]
    fn test_default_matches_free_functions() {
        let calc = FarmCalculator::default();
        let farm = farm();

        assert_eq!(calc.total_yield(&farm).unwrap(), crate::total_yield(&farm).unwrap());
        assert_eq!(calc.total_profit(&farm).unwrap(), crate::total_profit(&farm).unwrap());
        for entry in &farm {
            assert_eq!(calc.crop_cost(entry), crate::crop_cost(entry));
            assert_eq!(calc.crop_revenue(entry).unwrap(), crate::crop_revenue(entry).unwrap());
        }
    }

    #[test]
    fn test_farm_report_totals() {
        let report = FarmCalculator::default().farm_report(&farm()).unwrap();

        assert_eq!(report.crops.len(), 3);
        assert_eq!(report.crops[2].plant, "corn");
        // 30 + 16 + 9
        assert_relative_eq!(report.total_yield, 55.0, epsilon = 1e-9);
        assert_relative_eq!(report.total_cost, 16.0, epsilon = 1e-9);
        // 150 + 40 + 45
        assert_relative_eq!(report.total_revenue, 235.0, epsilon = 1e-9);
        assert_relative_eq!(report.total_profit, 219.0, epsilon = 1e-9);
    }

    #[test]
    fn test_custom_cost_per_plant() {
        let config = CalculatorConfig { cost_per_plant: 2.5, ..Default::default() };
        let calc = FarmCalculator::new(config).unwrap();
        let farm = farm();

        assert_eq!(calc.crop_cost(&farm.crops[0]), 25.0);
        assert_relative_eq!(calc.crop_profit(&farm.crops[0]).unwrap(), 125.0, epsilon = 1e-9);
    }

    #[test]
    fn test_custom_precision() {
        let plant = Arc::new(Plant::new("bean", 1.0 / 3.0));
        let entry = CropEntry::new(plant, 1);
        let config = CalculatorConfig { yield_decimals: 0, ..Default::default() };

        assert_eq!(FarmCalculator::new(config).unwrap().crop_yield(&entry).unwrap(), 0.0);
        assert_eq!(FarmCalculator::default().crop_yield(&entry).unwrap(), 0.33);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CalculatorConfig { cost_per_plant: f64::NAN, ..Default::default() };
        assert!(FarmCalculator::new(config).is_err());
    }

    #[test]
    fn test_report_needs_sale_price() {
        let farm = Farm::new(vec![CropEntry::new(Arc::new(Plant::new("gourd", 2.0)), 3)]);
        let err = FarmCalculator::default().farm_report(&farm).unwrap_err();

        assert!(matches!(err, FarmError::MissingSalePrice { .. }));
    }

    #[test]
    fn test_report_total_overflow_is_an_error() {
        let giant = Arc::new(Plant::new("giant", 1e308).with_sale_price(1.0));
        let farm = Farm::new(vec![CropEntry::new(giant.clone(), 1), CropEntry::new(giant, 1)]);
        let err = FarmCalculator::default().farm_report(&farm).unwrap_err();

        assert_eq!(err, FarmError::TotalOverflow { quantity: "yield" });
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = FarmCalculator::default().farm_report(&farm()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["crops"][0]["numCrops"], 10);
        assert!(json["totalProfit"].is_number());
    }
}
