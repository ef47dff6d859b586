//! Crop Economics
//!
//! Cost, revenue and profit per crop entry, and profit across a farm.
//!
//! Cost is one currency unit per plant. Revenue is the sale price per kilo
//! times the rounded crop yield, so environmental factors flow through to
//! revenue and profit.

use crate::error::{FarmError, Result};
use crate::types::{CropEntry, Farm, Plant};
use crate::yields::{crop_yield_at, YIELD_DECIMALS};

/// Cost of growing one plant
pub const COST_PER_PLANT: f64 = 1.0;

/// Cost of a crop entry: one unit per plant, independent of species and environment
pub fn crop_cost(entry: &CropEntry) -> f64 {
    crop_cost_at(entry, COST_PER_PLANT)
}

/// Revenue of a crop entry: sale price × crop yield
///
/// Fails with [`FarmError::MissingSalePrice`] when the plant has no price.
pub fn crop_revenue(entry: &CropEntry) -> Result<f64> {
    crop_revenue_at(entry, YIELD_DECIMALS)
}

/// Profit of a crop entry: revenue − cost
pub fn crop_profit(entry: &CropEntry) -> Result<f64> {
    crop_profit_at(entry, YIELD_DECIMALS, COST_PER_PLANT)
}

/// Sum of crop profits over the farm; an empty farm yields 0
pub fn total_profit(farm: &Farm) -> Result<f64> {
    total_profit_at(farm, YIELD_DECIMALS, COST_PER_PLANT)
}

pub(crate) fn crop_cost_at(entry: &CropEntry, cost_per_plant: f64) -> f64 {
    f64::from(entry.num_crops) * cost_per_plant
}

pub(crate) fn crop_revenue_at(entry: &CropEntry, decimals: u32) -> Result<f64> {
    let sale_price = checked_sale_price(&entry.crop)?;
    let revenue = sale_price * crop_yield_at(entry, decimals)?;
    if !revenue.is_finite() {
        return Err(FarmError::RevenueOverflow {
            plant: entry.crop.name.clone(),
        });
    }
    Ok(revenue)
}

pub(crate) fn crop_profit_at(entry: &CropEntry, decimals: u32, cost_per_plant: f64) -> Result<f64> {
    Ok(crop_revenue_at(entry, decimals)? - crop_cost_at(entry, cost_per_plant))
}

pub(crate) fn total_profit_at(farm: &Farm, decimals: u32, cost_per_plant: f64) -> Result<f64> {
    let total = farm
        .iter()
        .try_fold(0.0, |total, entry| -> Result<f64> {
            Ok(total + crop_profit_at(entry, decimals, cost_per_plant)?)
        })?;

    if !total.is_finite() {
        return Err(FarmError::TotalOverflow { quantity: "profit" });
    }
    Ok(total)
}

fn checked_sale_price(plant: &Plant) -> Result<f64> {
    let value = plant.sale_price.ok_or_else(|| FarmError::MissingSalePrice {
        plant: plant.name.clone(),
    })?;

    if !value.is_finite() || value < 0.0 {
        return Err(FarmError::InvalidSalePrice {
            plant: plant.name.clone(),
            value,
        });
    }
    Ok(value)
}
