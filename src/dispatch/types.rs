//! Core dispatch types: unit and price inputs, working records, plan output, and errors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of generating unit.
///
/// Serialized in kebab-case (`gas-thermal`, `kerosene-thermal`, `wind`) for
/// scenario TOML files; the wire API uses its own aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitKind {
    /// Gas-fired thermal unit; fuel cost follows the gas price.
    GasThermal,
    /// Kerosene-fired thermal unit (e.g. turbojet peaker).
    KeroseneThermal,
    /// Wind turbine; zero fuel cost, availability-limited output.
    Wind,
}

impl UnitKind {
    /// Whether this kind carries a must-run floor once committed.
    pub fn is_thermal(self) -> bool {
        !matches!(self, UnitKind::Wind)
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnitKind::GasThermal => "gas-thermal",
            UnitKind::KeroseneThermal => "kerosene-thermal",
            UnitKind::Wind => "wind",
        };
        f.write_str(s)
    }
}

/// A generating unit as described by the request. Immutable for the
/// duration of a dispatch computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Unit {
    /// Unit name, unique within a request and non-empty.
    pub name: String,
    /// Unit kind, selecting the cost and availability model.
    pub kind: UnitKind,
    /// Conversion efficiency (fuel energy to electrical energy), > 0.
    pub efficiency: f64,
    /// Minimum stable output when committed (MW, >= 0).
    pub pmin: f64,
    /// Nameplate maximum output (MW, >= pmin).
    pub pmax: f64,
}

/// Fuel and wind price inputs, immutable per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FuelPrices {
    /// Gas price per MWh of fuel energy.
    pub gas_price_per_mwh: f64,
    /// Kerosene price per MWh of fuel energy.
    pub kerosene_price_per_mwh: f64,
    /// CO2 price per ton. Accepted and carried but never read by the
    /// cost model.
    pub co2_price_per_ton: f64,
    /// Wind availability as a percentage of nameplate capacity, in [0, 100].
    pub wind_availability_pct: f64,
}

/// A fully-shaped dispatch request: the load to cover plus the inputs it
/// is served from. Callers validate with [`DispatchRequest::validate`]
/// before handing it to the planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DispatchRequest {
    /// Requested load (MW, > 0).
    pub load: f64,
    /// Fuel and wind prices.
    pub fuels: FuelPrices,
    /// Generating units, in caller order. Results come back in this order.
    pub units: Vec<Unit>,
}

/// Request validation error with field path and constraint description.
#[derive(Debug)]
pub struct RequestError {
    /// Dotted field path (e.g., `"units[2].pmax"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid request: {} — {}", self.field, self.message)
    }
}

impl DispatchRequest {
    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the request is well-formed. The dispatch
    /// core assumes a validated request; the boundary (CLI, API) must call
    /// this first.
    pub fn validate(&self) -> Vec<RequestError> {
        let mut errors = Vec::new();

        if !(self.load > 0.0 && self.load.is_finite()) {
            errors.push(RequestError {
                field: "load".into(),
                message: format!("must be a positive finite number, got {}", self.load),
            });
        }
        if !(0.0..=100.0).contains(&self.fuels.wind_availability_pct) {
            errors.push(RequestError {
                field: "fuels.wind_availability_pct".into(),
                message: "must be in [0, 100]".into(),
            });
        }

        for (i, unit) in self.units.iter().enumerate() {
            if unit.name.is_empty() {
                errors.push(RequestError {
                    field: format!("units[{i}].name"),
                    message: "must be non-empty".into(),
                });
            }
            if unit.efficiency <= 0.0 {
                errors.push(RequestError {
                    field: format!("units[{i}].efficiency"),
                    message: "must be > 0".into(),
                });
            }
            if unit.pmin < 0.0 {
                errors.push(RequestError {
                    field: format!("units[{i}].pmin"),
                    message: "must be >= 0".into(),
                });
            }
            if unit.pmax < unit.pmin {
                errors.push(RequestError {
                    field: format!("units[{i}].pmax"),
                    message: "must be >= pmin".into(),
                });
            }
            if self.units[..i].iter().any(|u| u.name == unit.name) {
                errors.push(RequestError {
                    field: format!("units[{i}].name"),
                    message: format!("duplicate name \"{}\"", unit.name),
                });
            }
        }

        errors
    }
}

/// Transient per-unit working record, owned exclusively by the dispatch
/// pipeline and discarded after the response is built.
///
/// Bounds are the *effective* bounds (wind availability already applied),
/// not the unit's nameplate values. `p` starts at zero and is mutated only
/// by the allocator and the rounding reconciler.
#[derive(Debug, Clone)]
pub struct DispatchRecord {
    /// Index of the source unit in the request's unit list.
    pub unit_idx: usize,
    /// Kind of the source unit.
    pub kind: UnitKind,
    /// Efficiency of the source unit (merit-order tie break).
    pub efficiency: f64,
    /// Effective minimum output (MW).
    pub pmin: f64,
    /// Effective maximum output (MW).
    pub pmax: f64,
    /// Marginal cost per MWh produced.
    pub cost: f64,
    /// Allocated power (MW).
    pub p: f64,
}

/// Final allocation for one unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitDispatch {
    /// Unit name, as given in the request.
    pub name: String,
    /// Allocated power (MW), a multiple of the 0.1 grid step.
    pub p: f64,
}

/// A complete dispatch plan, one entry per unit in original request order.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchPlan {
    /// Per-unit allocations in request order.
    pub items: Vec<UnitDispatch>,
    /// Total fuel cost of the plan (sum of p × marginal cost). Diagnostic
    /// only; the allocation never reads it.
    pub total_cost: f64,
}

impl fmt::Display for DispatchPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            writeln!(f, "{:<28} {:>8.1} MW", item.name, item.p)?;
        }
        write!(f, "total fuel cost: {:.2}", self.total_cost)
    }
}

/// Terminal dispatch failure. No partial allocation is ever returned.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// Total effective capacity is below the requested load.
    CapacityExceeded {
        /// Requested load (MW).
        load: f64,
        /// Sum of effective pmax over all units (MW).
        total_capacity: f64,
    },
    /// A must-run commitment's excess cannot be absorbed by reducing
    /// already-committed cheaper units down to their own floors.
    PminInfeasible {
        /// Overproduction caused by the forced commitment (MW).
        excess: f64,
        /// Maximum reduction available from earlier commitments (MW).
        reducible: f64,
    },
    /// Load left uncovered after all allocation phases. Internal-invariant
    /// guard; unreachable when the feasibility check passed.
    ResidualCapacityInsufficient {
        /// Uncovered remainder (MW).
        residual: f64,
    },
    /// Post-rounding correction could not restore exact load balance.
    RoundingInfeasible {
        /// Rounded target load (MW).
        target: f64,
        /// Rounded sum actually achieved (MW).
        achieved: f64,
    },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::CapacityExceeded {
                load,
                total_capacity,
            } => write!(
                f,
                "load ({load}) exceeds total effective capacity ({total_capacity:.1})"
            ),
            DispatchError::PminInfeasible { excess, reducible } => write!(
                f,
                "must-run floor infeasible: excess {excess:.3} MW exceeds \
                 reducible headroom {reducible:.3} MW"
            ),
            DispatchError::ResidualCapacityInsufficient { residual } => write!(
                f,
                "residual load {residual:.6} MW left uncovered after allocation"
            ),
            DispatchError::RoundingInfeasible { target, achieved } => write!(
                f,
                "could not match load after rounding: target {target:.1}, achieved {achieved:.1}"
            ),
        }
    }
}
