//! Rounding reconciliation: snap allocations to the 0.1 MW grid and
//! restore exact load balance.
//!
//! The acceptance band and step-continuation threshold are empirically
//! chosen policy values, kept as named constants rather than derived.

use crate::dispatch::types::{DispatchError, DispatchRecord};

/// Output grid step (MW).
pub const GRID_STEP: f64 = 0.1;

/// Imbalance below this (half a grid step) is accepted as negligible.
pub const ACCEPT_BAND: f64 = 0.05;

/// The correction walk keeps stepping while the residual is at least this.
pub const STEP_CONTINUE: f64 = 0.0999;

/// Tolerance on pmin/pmax bound checks during correction.
const BOUND_EPS: f64 = 1e-12;

/// Rounds to the nearest 0.1 grid point, half away from zero.
pub fn round_to_grid(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Snaps every allocation to the 0.1 grid and corrects the resulting
/// imbalance in 0.1 steps.
///
/// An imbalance inside the acceptance band is tolerated as-is. Otherwise
/// the walk visits records in ascending cost order when adding power and
/// descending cost order when removing it, respecting each record's
/// effective bounds, and tracks the residual with grid-aware rounding to
/// avoid floating drift.
///
/// # Errors
///
/// Returns [`DispatchError::RoundingInfeasible`] when the corrected sum
/// still differs from the rounded load.
pub fn reconcile(records: &mut [DispatchRecord], load: f64) -> Result<(), DispatchError> {
    for record in records.iter_mut() {
        record.p = round_to_grid(record.p);
    }

    let total: f64 = records.iter().map(|r| r.p).sum();
    let imbalance = round_to_grid(load - total);
    if imbalance.abs() < ACCEPT_BAND {
        return Ok(());
    }

    let step = if imbalance > 0.0 { GRID_STEP } else { -GRID_STEP };
    let mut residual = imbalance.abs();

    let mut order: Vec<usize> = (0..records.len()).collect();
    if step > 0.0 {
        // Adding power: cheapest first.
        order.sort_by(|&a, &b| records[a].cost.total_cmp(&records[b].cost));
    } else {
        // Removing power: most expensive first.
        order.sort_by(|&a, &b| records[b].cost.total_cmp(&records[a].cost));
    }

    'walk: for &i in &order {
        let record = &mut records[i];
        while residual >= STEP_CONTINUE {
            let candidate = record.p + step;
            let within = if step > 0.0 {
                candidate <= record.pmax + BOUND_EPS
            } else {
                candidate >= record.pmin - BOUND_EPS
            };
            if !within {
                continue 'walk;
            }
            record.p = round_to_grid(candidate);
            residual = round_to_grid(residual - GRID_STEP);
        }
        break;
    }

    let achieved: f64 = records.iter().map(|r| r.p).sum();
    if round_to_grid(achieved) != round_to_grid(load) {
        return Err(DispatchError::RoundingInfeasible {
            target: round_to_grid(load),
            achieved: round_to_grid(achieved),
        });
    }
    Ok(())
}
