//! Dispatch orchestration: feasibility, merit order, allocation, rounding.

use crate::dispatch::allocator::allocate;
use crate::dispatch::feasibility::check_capacity;
use crate::dispatch::merit::plan_merit_order;
use crate::dispatch::rounding::reconcile;
use crate::dispatch::types::{DispatchError, DispatchPlan, DispatchRequest, UnitDispatch};

/// Computes a dispatch plan for a validated request.
///
/// Runs the pipeline stages in order and returns the final rounded
/// allocation per unit, in the original request order, together with the
/// total fuel cost of the plan. A fresh record set is built per call; the
/// computation is deterministic and shares no state across requests.
///
/// # Errors
///
/// Any stage failure aborts the whole computation with a
/// [`DispatchError`]; no partial plan is ever returned.
pub fn plan(request: &DispatchRequest) -> Result<DispatchPlan, DispatchError> {
    check_capacity(request)?;

    let mut records = plan_merit_order(request);
    allocate(&mut records, request.load)?;
    reconcile(&mut records, request.load)?;

    // Map back from merit order to the caller's unit order.
    let mut powers = vec![0.0; request.units.len()];
    let mut total_cost = 0.0;
    for record in &records {
        powers[record.unit_idx] = record.p;
        total_cost += record.p * record.cost;
    }

    let items = request
        .units
        .iter()
        .zip(powers)
        .map(|(unit, p)| UnitDispatch {
            name: unit.name.clone(),
            p,
        })
        .collect();

    Ok(DispatchPlan { items, total_cost })
}
