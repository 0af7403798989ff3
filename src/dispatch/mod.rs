//! Economic dispatch core.
//!
//! Given a load, fuel prices, and a set of generating units, computes how
//! much each unit must produce to cover the load at minimum fuel cost while
//! respecting must-run floors and capacity ceilings. The entry point is
//! [`plan`]; everything runs synchronously on a per-request record set.

/// Greedy allocation with must-run enforcement and back-adjustment.
pub mod allocator;
/// Effective bounds and marginal cost per unit.
pub mod capability;
/// Aggregate-capacity pre-check.
pub mod feasibility;
/// Record construction and merit-order sorting.
pub mod merit;
/// Grid snapping and load-balance restoration.
pub mod rounding;
mod service;
pub mod types;

// Re-export the main types for convenience
pub use service::plan;
pub use types::{
    DispatchError, DispatchPlan, DispatchRequest, FuelPrices, RequestError, Unit, UnitDispatch,
    UnitKind,
};
