//! Aggregate-capacity feasibility check, run before any allocation.

use crate::dispatch::capability::effective_bounds;
use crate::dispatch::types::{DispatchError, DispatchRequest};

/// Tolerance for the capacity comparison: a load exactly equal to the
/// total capacity is feasible.
pub const CAPACITY_EPS: f64 = 1e-9;

/// Verifies that total effective capacity covers the requested load.
///
/// Sums effective pmax over all units and fails with
/// [`DispatchError::CapacityExceeded`] if `load > total + CAPACITY_EPS`,
/// carrying the computed total for diagnostics. Produces no partial state.
///
/// # Errors
///
/// Returns `CapacityExceeded` when the load cannot be covered even with
/// every unit at its effective maximum.
pub fn check_capacity(request: &DispatchRequest) -> Result<(), DispatchError> {
    let total_capacity: f64 = request
        .units
        .iter()
        .map(|u| effective_bounds(u, &request.fuels).1)
        .sum();

    if request.load > total_capacity + CAPACITY_EPS {
        return Err(DispatchError::CapacityExceeded {
            load: request.load,
            total_capacity,
        });
    }
    Ok(())
}
