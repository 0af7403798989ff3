//! Greedy allocation over merit-ordered records.
//!
//! Three phases, with `remaining` starting at the requested load:
//!
//! 1. Wind records absorb load for free, capped by their effective ceiling.
//! 2. Thermal records commit in merit order. A record whose floor exceeds
//!    the remaining load is still force-committed at its floor (must-run);
//!    the overshoot is absorbed by reducing already-committed records,
//!    most expensive first, each down to its own floor.
//! 3. Any residual is spread across remaining headroom in merit order.

use crate::dispatch::types::{DispatchError, DispatchRecord, UnitKind};

/// Remaining load below this is treated as fully covered.
const COMMIT_EPS: f64 = 1e-9;

/// Tolerance for back-adjustment headroom and completion checks.
const REDUCE_EPS: f64 = 1e-12;

/// Largest residual tolerated after the final spread phase.
const RESIDUAL_TOL: f64 = 1e-6;

/// Allocates the load across merit-ordered records.
///
/// Records must be in merit order (see [`crate::dispatch::merit`]) with all
/// `p` at zero. On success every record satisfies `0 <= p <= pmax` and, for
/// thermal records, `p == 0` or `p >= pmin`, and the allocations sum to
/// `load` within tolerance.
///
/// # Errors
///
/// * [`DispatchError::PminInfeasible`] when a forced must-run commitment
///   overproduces more than earlier commitments can give back.
/// * [`DispatchError::ResidualCapacityInsufficient`] when load remains
///   uncovered after all phases (internal guard; unreachable when the
///   feasibility check passed).
pub fn allocate(records: &mut [DispatchRecord], load: f64) -> Result<(), DispatchError> {
    let mut remaining = load;

    // Phase A: free wind resources, in merit order.
    for record in records.iter_mut() {
        if record.kind == UnitKind::Wind && remaining > 0.0 {
            let take = remaining.min(record.pmax);
            record.p = take;
            remaining -= take;
        }
    }

    // Phase B: thermal commitment with must-run enforcement.
    let thermal: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.kind.is_thermal())
        .map(|(i, _)| i)
        .collect();

    for (pos, &i) in thermal.iter().enumerate() {
        if remaining <= COMMIT_EPS {
            break;
        }
        if remaining >= records[i].pmin {
            let take = records[i].pmax.min(remaining);
            records[i].p = records[i].pmin.max(take);
            remaining -= records[i].p;
        } else {
            // Starting this unit at its floor overshoots the load. Commit it
            // anyway and claw the excess back from cheaper units already on.
            records[i].p = records[i].pmin;
            let excess = records[i].p - remaining;

            let mut earlier: Vec<usize> = thermal[..pos].to_vec();
            earlier.sort_by(|&a, &b| records[b].cost.total_cmp(&records[a].cost));

            let reduced = back_adjust(records, &earlier, excess);
            if reduced + REDUCE_EPS < excess {
                return Err(DispatchError::PminInfeasible {
                    excess,
                    reducible: reduced,
                });
            }
            remaining = 0.0;
        }
    }

    // Phase C: spread any residual across remaining headroom.
    if remaining > COMMIT_EPS {
        for record in records.iter_mut() {
            if record.p < record.pmax - REDUCE_EPS {
                let add = (record.pmax - record.p).min(remaining);
                record.p += add;
                remaining -= add;
                if remaining <= COMMIT_EPS {
                    break;
                }
            }
        }
    }

    if remaining > RESIDUAL_TOL {
        return Err(DispatchError::ResidualCapacityInsufficient {
            residual: remaining,
        });
    }
    Ok(())
}

/// Reduces committed records toward their floors until `excess` is absorbed.
///
/// `order` holds record indices sorted by descending cost, so the relatively
/// most expensive of the already-committed units gives power back first.
/// Returns the total reduction achieved, which may fall short of `excess`.
fn back_adjust(records: &mut [DispatchRecord], order: &[usize], excess: f64) -> f64 {
    let mut reduced = 0.0;
    for &i in order {
        let record = &mut records[i];
        let room = record.p - record.pmin;
        if room <= REDUCE_EPS {
            continue;
        }
        let take = room.min(excess - reduced);
        if take > 0.0 {
            record.p -= take;
            reduced += take;
            if (reduced - excess).abs() <= REDUCE_EPS {
                break;
            }
        }
    }
    reduced
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: UnitKind, cost: f64, pmin: f64, pmax: f64) -> DispatchRecord {
        DispatchRecord {
            unit_idx: 0,
            kind,
            efficiency: 0.5,
            pmin,
            pmax,
            cost,
            p: 0.0,
        }
    }

    fn total(records: &[DispatchRecord]) -> f64 {
        records.iter().map(|r| r.p).sum()
    }

    #[test]
    fn wind_dispatched_first_up_to_ceiling() {
        let mut records = vec![
            record(UnitKind::Wind, 0.0, 0.0, 90.0),
            record(UnitKind::GasThermal, 25.0, 100.0, 460.0),
        ];
        allocate(&mut records, 480.0).expect("feasible");
        assert_eq!(records[0].p, 90.0);
        assert_eq!(records[1].p, 390.0);
    }

    #[test]
    fn wind_capped_by_remaining_load() {
        let mut records = vec![record(UnitKind::Wind, 0.0, 0.0, 90.0)];
        allocate(&mut records, 50.0).expect("feasible");
        assert_eq!(records[0].p, 50.0);
    }

    #[test]
    fn thermal_commits_within_band() {
        let mut records = vec![
            record(UnitKind::GasThermal, 25.0, 100.0, 460.0),
            record(UnitKind::GasThermal, 30.0, 100.0, 460.0),
        ];
        allocate(&mut records, 700.0).expect("feasible");
        assert_eq!(records[0].p, 460.0);
        assert_eq!(records[1].p, 240.0);
        assert!((total(&records) - 700.0).abs() < 1e-9);
    }

    #[test]
    fn uncommitted_thermal_stays_at_zero() {
        let mut records = vec![
            record(UnitKind::GasThermal, 25.0, 100.0, 460.0),
            record(UnitKind::KeroseneThermal, 170.0, 0.0, 16.0),
        ];
        allocate(&mut records, 300.0).expect("feasible");
        assert_eq!(records[0].p, 300.0);
        assert_eq!(records[1].p, 0.0);
    }

    #[test]
    fn back_adjustment_absorbs_forced_floor() {
        // 480 total: the cheaper unit fills to 460, leaving 20 — below the
        // second unit's 100 MW floor. Forcing it on overshoots by 80, which
        // the first unit gives back.
        let mut records = vec![
            record(UnitKind::GasThermal, 25.0, 100.0, 460.0),
            record(UnitKind::GasThermal, 26.0, 100.0, 460.0),
        ];
        allocate(&mut records, 480.0).expect("feasible");
        assert_eq!(records[0].p, 380.0);
        assert_eq!(records[1].p, 100.0);
        assert!((total(&records) - 480.0).abs() < 1e-9);
    }

    #[test]
    fn back_adjustment_reduces_most_expensive_first() {
        // Three committed units, then a floor-forced one. The reduction must
        // come from the most expensive committed unit (idx 2) first.
        let mut records = vec![
            record(UnitKind::GasThermal, 20.0, 0.0, 100.0),
            record(UnitKind::GasThermal, 22.0, 0.0, 100.0),
            record(UnitKind::GasThermal, 24.0, 0.0, 100.0),
            record(UnitKind::GasThermal, 30.0, 50.0, 100.0),
        ];
        // Load 310: first three fill to 100 each, remaining 10 < 50 floor.
        // Forced commit at 50 overshoots by 40, taken from idx 2.
        allocate(&mut records, 310.0).expect("feasible");
        assert_eq!(records[0].p, 100.0);
        assert_eq!(records[1].p, 100.0);
        assert_eq!(records[2].p, 60.0);
        assert_eq!(records[3].p, 50.0);
    }

    #[test]
    fn back_adjustment_never_breaks_own_floor() {
        let mut records = vec![
            record(UnitKind::GasThermal, 20.0, 80.0, 100.0),
            record(UnitKind::GasThermal, 22.0, 80.0, 100.0),
            record(UnitKind::GasThermal, 30.0, 60.0, 100.0),
        ];
        // Load 230: first two take 100 + 100, remaining 30 < 60. Forced
        // commit overshoots by 30; each earlier unit can give back 20.
        allocate(&mut records, 230.0).expect("feasible");
        assert!(records[0].p >= 80.0);
        assert!(records[1].p >= 80.0);
        assert_eq!(records[2].p, 60.0);
        assert!((total(&records) - 230.0).abs() < 1e-9);
    }

    #[test]
    fn pmin_infeasible_when_no_headroom() {
        // Two inflexible units: pmin == pmax == 100, load 150.
        let mut records = vec![
            record(UnitKind::GasThermal, 25.0, 100.0, 100.0),
            record(UnitKind::GasThermal, 25.0, 100.0, 100.0),
        ];
        let err = allocate(&mut records, 150.0).unwrap_err();
        match err {
            DispatchError::PminInfeasible { excess, reducible } => {
                assert!((excess - 50.0).abs() < 1e-9);
                assert_eq!(reducible, 0.0);
            }
            other => panic!("expected PminInfeasible, got {other:?}"),
        }
    }

    #[test]
    fn zero_wind_all_thermal() {
        let mut records = vec![
            record(UnitKind::Wind, 0.0, 0.0, 0.0),
            record(UnitKind::GasThermal, 25.0, 100.0, 460.0),
        ];
        allocate(&mut records, 200.0).expect("feasible");
        assert_eq!(records[0].p, 0.0);
        assert_eq!(records[1].p, 200.0);
    }

    #[test]
    fn allocation_sums_to_load() {
        let mut records = vec![
            record(UnitKind::Wind, 0.0, 0.0, 21.6),
            record(UnitKind::Wind, 0.0, 0.0, 90.0),
            record(UnitKind::GasThermal, 25.3, 100.0, 460.0),
            record(UnitKind::GasThermal, 25.3, 100.0, 460.0),
            record(UnitKind::GasThermal, 36.2, 40.0, 210.0),
            record(UnitKind::KeroseneThermal, 169.3, 0.0, 16.0),
        ];
        allocate(&mut records, 910.0).expect("feasible");
        assert!((total(&records) - 910.0).abs() < 1e-6);
        for r in &records {
            assert!(r.p >= 0.0 && r.p <= r.pmax + 1e-9);
            if r.kind.is_thermal() {
                assert!(r.p == 0.0 || r.p >= r.pmin - 1e-9);
            }
        }
    }
}
