//! Merit-order economic dispatch planner.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
/// Dispatch core: capability model, feasibility check, merit order, allocation, rounding.
pub mod dispatch;
pub mod io;
