//! Merit-order planning: build working records and sort them by cost.

use crate::dispatch::capability::{effective_bounds, marginal_cost};
use crate::dispatch::types::{DispatchRecord, DispatchRequest};

/// Builds one working record per unit with derived bounds and cost.
///
/// Records keep the index of their source unit so results can be mapped
/// back to the original request order after allocation.
pub fn build_records(request: &DispatchRequest) -> Vec<DispatchRecord> {
    request
        .units
        .iter()
        .enumerate()
        .map(|(unit_idx, unit)| {
            let (pmin, pmax) = effective_bounds(unit, &request.fuels);
            DispatchRecord {
                unit_idx,
                kind: unit.kind,
                efficiency: unit.efficiency,
                pmin,
                pmax,
                cost: marginal_cost(unit, &request.fuels),
                p: 0.0,
            }
        })
        .collect()
}

/// Sorts records into merit order: ascending marginal cost, then descending
/// efficiency, then ascending effective pmin.
///
/// The sort is stable, so units tied on all three keys keep their original
/// relative order. This ordering governs dispatch priority throughout the
/// allocation and rounding passes.
pub fn sort_merit_order(records: &mut [DispatchRecord]) {
    records.sort_by(|a, b| {
        a.cost
            .total_cmp(&b.cost)
            .then(b.efficiency.total_cmp(&a.efficiency))
            .then(a.pmin.total_cmp(&b.pmin))
    });
}

/// Builds records and sorts them into merit order in one step.
pub fn plan_merit_order(request: &DispatchRequest) -> Vec<DispatchRecord> {
    let mut records = build_records(request);
    sort_merit_order(&mut records);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::types::{FuelPrices, Unit, UnitKind};

    fn fuels() -> FuelPrices {
        FuelPrices {
            gas_price_per_mwh: 13.4,
            kerosene_price_per_mwh: 50.8,
            co2_price_per_ton: 20.0,
            wind_availability_pct: 60.0,
        }
    }

    fn unit(name: &str, kind: UnitKind, efficiency: f64, pmin: f64, pmax: f64) -> Unit {
        Unit {
            name: name.into(),
            kind,
            efficiency,
            pmin,
            pmax,
        }
    }

    #[test]
    fn records_carry_source_index_and_start_at_zero() {
        let req = DispatchRequest {
            load: 100.0,
            fuels: fuels(),
            units: vec![
                unit("a", UnitKind::GasThermal, 0.5, 10.0, 100.0),
                unit("b", UnitKind::Wind, 1.0, 0.0, 50.0),
            ],
        };
        let records = build_records(&req);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].unit_idx, 0);
        assert_eq!(records[1].unit_idx, 1);
        assert!(records.iter().all(|r| r.p == 0.0));
        // Wind ceiling already scaled by availability.
        assert!((records[1].pmax - 30.0).abs() < 1e-12);
    }

    #[test]
    fn cheapest_sorts_first() {
        let req = DispatchRequest {
            load: 100.0,
            fuels: fuels(),
            units: vec![
                unit("kero", UnitKind::KeroseneThermal, 0.3, 0.0, 16.0),
                unit("gas", UnitKind::GasThermal, 0.53, 100.0, 460.0),
                unit("wind", UnitKind::Wind, 1.0, 0.0, 150.0),
            ],
        };
        let records = plan_merit_order(&req);
        assert_eq!(records[0].kind, UnitKind::Wind);
        assert_eq!(records[1].kind, UnitKind::GasThermal);
        assert_eq!(records[2].kind, UnitKind::KeroseneThermal);
    }

    #[test]
    fn cost_tie_broken_by_higher_efficiency() {
        let mut f = fuels();
        f.gas_price_per_mwh = 5.0;
        f.kerosene_price_per_mwh = 10.0;
        // gas at 0.25 eff → 20.0/MWh; kero at 0.5 eff → 20.0/MWh. Same
        // cost, kero is more efficient and must come first.
        let req = DispatchRequest {
            load: 100.0,
            fuels: f,
            units: vec![
                unit("gas", UnitKind::GasThermal, 0.25, 0.0, 100.0),
                unit("kero", UnitKind::KeroseneThermal, 0.5, 0.0, 100.0),
            ],
        };
        let records = plan_merit_order(&req);
        assert_eq!(records[0].kind, UnitKind::KeroseneThermal);
    }

    #[test]
    fn full_tie_broken_by_lower_pmin() {
        let req = DispatchRequest {
            load: 100.0,
            fuels: fuels(),
            units: vec![
                unit("high_floor", UnitKind::GasThermal, 0.5, 50.0, 100.0),
                unit("low_floor", UnitKind::GasThermal, 0.5, 10.0, 100.0),
            ],
        };
        let records = plan_merit_order(&req);
        assert_eq!(records[0].pmin, 10.0);
    }

    #[test]
    fn exact_ties_keep_input_order() {
        let req = DispatchRequest {
            load: 100.0,
            fuels: fuels(),
            units: vec![
                unit("first", UnitKind::GasThermal, 0.53, 100.0, 460.0),
                unit("second", UnitKind::GasThermal, 0.53, 100.0, 460.0),
            ],
        };
        let records = plan_merit_order(&req);
        assert_eq!(records[0].unit_idx, 0);
        assert_eq!(records[1].unit_idx, 1);
    }
}
