//! Per-unit capability derivation: effective output bounds and marginal cost.

use crate::dispatch::types::{FuelPrices, Unit, UnitKind};

/// Derives the effective (min, max) output bounds for a unit.
///
/// Wind units have no floor and a ceiling scaled by the availability
/// percentage; thermal units keep their nameplate bounds. Both bounds are
/// clamped to >= 0.
///
/// Pure function of its inputs; no side effects.
pub fn effective_bounds(unit: &Unit, fuels: &FuelPrices) -> (f64, f64) {
    match unit.kind {
        UnitKind::Wind => (
            0.0,
            (unit.pmax * fuels.wind_availability_pct / 100.0).max(0.0),
        ),
        _ => (unit.pmin.max(0.0), unit.pmax.max(0.0)),
    }
}

/// Derives the marginal cost of one MWh produced by a unit.
///
/// Wind is free; thermal units pay their fuel price divided by efficiency.
/// The CO2 price is deliberately not part of the formula.
pub fn marginal_cost(unit: &Unit, fuels: &FuelPrices) -> f64 {
    match unit.kind {
        UnitKind::Wind => 0.0,
        UnitKind::GasThermal => fuels.gas_price_per_mwh / unit.efficiency,
        UnitKind::KeroseneThermal => fuels.kerosene_price_per_mwh / unit.efficiency,
    }
}
