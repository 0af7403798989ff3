//! Wire request and response types for the production-plan endpoint.
//!
//! Field names follow the public wire contract, including the bracketed
//! fuel-price keys (`gas(euro/MWh)` and friends) and the historical plant
//! type names (`gasfired`, `turbojet`, `windturbine`).

use serde::{Deserialize, Serialize};

use crate::dispatch::{DispatchRequest, FuelPrices, Unit, UnitDispatch, UnitKind};

/// Incoming production-plan request.
#[derive(Debug, Deserialize)]
pub struct ProductionPlanRequest {
    /// Requested load (MW).
    pub load: f64,
    /// Fuel and wind prices, bracketed wire keys.
    pub fuels: WireFuels,
    /// Plant list, in response order.
    pub powerplants: Vec<WirePlant>,
}

/// Fuel prices as they appear on the wire.
#[derive(Debug, Deserialize)]
pub struct WireFuels {
    /// Gas price per MWh.
    #[serde(rename = "gas(euro/MWh)")]
    pub gas_eur_per_mwh: f64,
    /// Kerosene price per MWh.
    #[serde(rename = "kerosine(euro/MWh)")]
    pub kerosine_eur_per_mwh: f64,
    /// CO2 price per ton. Carried through; never priced in.
    #[serde(rename = "co2(euro/ton)")]
    pub co2_eur_per_ton: f64,
    /// Wind availability percentage.
    #[serde(rename = "wind(%)")]
    pub wind_pct: f64,
}

/// A plant entry as it appears on the wire.
#[derive(Debug, Deserialize)]
pub struct WirePlant {
    /// Plant name.
    pub name: String,
    /// Plant type (`type` on the wire).
    #[serde(rename = "type")]
    pub kind: WirePlantType,
    /// Conversion efficiency.
    pub efficiency: f64,
    /// Minimum stable output (MW).
    pub pmin: f64,
    /// Maximum output (MW).
    pub pmax: f64,
}

/// Historical plant type names used by the wire contract.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WirePlantType {
    /// Gas-fired thermal plant.
    Gasfired,
    /// Kerosene turbojet peaker.
    Turbojet,
    /// Wind turbine.
    Windturbine,
}

impl From<WirePlantType> for UnitKind {
    fn from(t: WirePlantType) -> Self {
        match t {
            WirePlantType::Gasfired => UnitKind::GasThermal,
            WirePlantType::Turbojet => UnitKind::KeroseneThermal,
            WirePlantType::Windturbine => UnitKind::Wind,
        }
    }
}

impl From<ProductionPlanRequest> for DispatchRequest {
    fn from(wire: ProductionPlanRequest) -> Self {
        DispatchRequest {
            load: wire.load,
            fuels: FuelPrices {
                gas_price_per_mwh: wire.fuels.gas_eur_per_mwh,
                kerosene_price_per_mwh: wire.fuels.kerosine_eur_per_mwh,
                co2_price_per_ton: wire.fuels.co2_eur_per_ton,
                wind_availability_pct: wire.fuels.wind_pct,
            },
            units: wire
                .powerplants
                .into_iter()
                .map(|p| Unit {
                    name: p.name,
                    kind: p.kind.into(),
                    efficiency: p.efficiency,
                    pmin: p.pmin,
                    pmax: p.pmax,
                })
                .collect(),
        }
    }
}

/// One response entry: plant name and its allocated power.
#[derive(Debug, Serialize)]
pub struct ProductionItem {
    /// Plant name, as given in the request.
    pub name: String,
    /// Allocated power (MW), a multiple of 0.1.
    pub p: f64,
}

impl From<UnitDispatch> for ProductionItem {
    fn from(item: UnitDispatch) -> Self {
        Self {
            name: item.name,
            p: item.p,
        }
    }
}

/// Error response body for 4xx-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
