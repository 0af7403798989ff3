/// CSV export for dispatch plans.
pub mod export;
