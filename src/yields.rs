//! Yield Calculations
//!
//! Per-plant yield under an environment snapshot, per-crop yield and total
//! yield over a farm.
//!
//! Environmental adjustments compound: each recognised factor changes the
//! running yield by its percentage, so two +50% factors on a base of 3 give
//! `3 × 1.5 × 1.5 = 6.75`. Factors the plant does not define are skipped.
//!
//! Rounding happens once, in [`crop_yield`]. Plant and total yields are left
//! unrounded.

use crate::error::{FarmError, Result};
use crate::types::{CropEntry, EnvironmentFactors, Farm, Plant};
use crate::utils::round_to_decimals;
use tracing::{debug, trace};

/// Decimal places kept in crop yields
pub const YIELD_DECIMALS: u32 = 2;

/// Yield in kilos of a single plant, adjusted for the environment if given
///
/// Fails with [`FarmError::UnknownLevel`] when the plant defines a factor but
/// not the level supplied for it, and with [`FarmError::YieldOverflow`] when
/// the adjusted yield leaves the finite range.
pub fn plant_yield(plant: &Plant, environment: Option<&EnvironmentFactors>) -> Result<f64> {
    let base = checked_base_yield(plant)?;

    let Some(environment) = environment else {
        return Ok(base);
    };

    let mut running = base;
    for (factor, level) in environment.iter() {
        let Some(levels) = plant.factors.get(factor) else {
            debug!(plant = %plant.name, factor, "factor not defined for plant, skipping");
            continue;
        };

        let percentage = levels
            .get(level)
            .copied()
            .ok_or_else(|| FarmError::UnknownLevel {
                plant: plant.name.clone(),
                factor: factor.to_string(),
                level: level.to_string(),
            })?;

        running += (f64::from(percentage) / 100.0) * running;
        if !running.is_finite() {
            return Err(yield_overflow(plant));
        }
        trace!(plant = %plant.name, factor, level_name = level, percentage, running, "applied factor");
    }

    Ok(running)
}

/// Yield in kilos of a whole crop entry, rounded to [`YIELD_DECIMALS`]
pub fn crop_yield(entry: &CropEntry) -> Result<f64> {
    crop_yield_at(entry, YIELD_DECIMALS)
}

/// Sum of crop yields over the farm; an empty farm yields 0
pub fn total_yield(farm: &Farm) -> Result<f64> {
    total_yield_at(farm, YIELD_DECIMALS)
}

pub(crate) fn crop_yield_at(entry: &CropEntry, decimals: u32) -> Result<f64> {
    let per_plant = plant_yield(&entry.crop, entry.environment_factors.as_ref())?;
    let raw = per_plant * f64::from(entry.num_crops);
    if !raw.is_finite() {
        return Err(yield_overflow(&entry.crop));
    }
    Ok(round_to_decimals(raw, decimals))
}

pub(crate) fn total_yield_at(farm: &Farm, decimals: u32) -> Result<f64> {
    let total = farm
        .iter()
        .try_fold(0.0, |total, entry| -> Result<f64> {
            Ok(total + crop_yield_at(entry, decimals)?)
        })?;

    if !total.is_finite() {
        return Err(FarmError::TotalOverflow { quantity: "yield" });
    }
    Ok(total)
}

fn checked_base_yield(plant: &Plant) -> Result<f64> {
    let value = plant.base_yield;
    if !value.is_finite() || value < 0.0 {
        return Err(FarmError::InvalidYield {
            plant: plant.name.clone(),
            value,
        });
    }
    Ok(value)
}

fn yield_overflow(plant: &Plant) -> FarmError {
    FarmError::YieldOverflow {
        plant: plant.name.clone(),
    }
}
