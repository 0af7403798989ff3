//! TOML-based dispatch scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::dispatch::{DispatchRequest, FuelPrices, Unit, UnitKind};

/// A dispatch case parsed from TOML: the load to cover, fuel prices, and
/// the unit fleet.
///
/// Load from TOML with [`ScenarioConfig::from_toml_file`] or use one of the
/// built-in presets. Convert to a request with
/// [`ScenarioConfig::to_request`] and validate that before planning.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Requested load (MW).
    pub load: f64,
    /// Fuel and wind prices.
    pub fuels: FuelPrices,
    /// Generating units, in dispatch-result order.
    pub units: Vec<Unit>,
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"scenario"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: one gas unit, one turbojet peaker,
    /// one wind park, load 480 MW at 60% wind.
    pub fn baseline() -> Self {
        Self {
            load: 480.0,
            fuels: FuelPrices {
                gas_price_per_mwh: 13.4,
                kerosene_price_per_mwh: 50.8,
                co2_price_per_ton: 20.0,
                wind_availability_pct: 60.0,
            },
            units: vec![
                Unit {
                    name: "gasfiredbig1".to_string(),
                    kind: UnitKind::GasThermal,
                    efficiency: 0.53,
                    pmin: 100.0,
                    pmax: 460.0,
                },
                Unit {
                    name: "tj1".to_string(),
                    kind: UnitKind::KeroseneThermal,
                    efficiency: 0.3,
                    pmin: 0.0,
                    pmax: 16.0,
                },
                Unit {
                    name: "windpark1".to_string(),
                    kind: UnitKind::Wind,
                    efficiency: 1.0,
                    pmin: 0.0,
                    pmax: 150.0,
                },
            ],
        }
    }

    /// Returns the full-fleet preset: two big gas units, a smaller one, a
    /// turbojet, and two wind parks, load 910 MW.
    pub fn full_fleet() -> Self {
        let fuels = FuelPrices {
            gas_price_per_mwh: 13.4,
            kerosene_price_per_mwh: 50.8,
            co2_price_per_ton: 20.0,
            wind_availability_pct: 60.0,
        };
        Self {
            load: 910.0,
            fuels,
            units: vec![
                Unit {
                    name: "gasfiredbig1".to_string(),
                    kind: UnitKind::GasThermal,
                    efficiency: 0.53,
                    pmin: 100.0,
                    pmax: 460.0,
                },
                Unit {
                    name: "gasfiredbig2".to_string(),
                    kind: UnitKind::GasThermal,
                    efficiency: 0.53,
                    pmin: 100.0,
                    pmax: 460.0,
                },
                Unit {
                    name: "gasfiredsomewhatsmaller".to_string(),
                    kind: UnitKind::GasThermal,
                    efficiency: 0.37,
                    pmin: 40.0,
                    pmax: 210.0,
                },
                Unit {
                    name: "tj1".to_string(),
                    kind: UnitKind::KeroseneThermal,
                    efficiency: 0.3,
                    pmin: 0.0,
                    pmax: 16.0,
                },
                Unit {
                    name: "windpark1".to_string(),
                    kind: UnitKind::Wind,
                    efficiency: 1.0,
                    pmin: 0.0,
                    pmax: 150.0,
                },
                Unit {
                    name: "windpark2".to_string(),
                    kind: UnitKind::Wind,
                    efficiency: 1.0,
                    pmin: 0.0,
                    pmax: 36.0,
                },
            ],
        }
    }

    /// Returns the calm-wind preset: the full fleet at 0% wind
    /// availability, load 480 MW. Exercises the back-adjustment path.
    pub fn calm_wind() -> Self {
        let mut cfg = Self::full_fleet();
        cfg.load = 480.0;
        cfg.fuels.wind_availability_pct = 0.0;
        cfg
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "full_fleet", "calm_wind"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "full_fleet" => Ok(Self::full_fleet()),
            "calm_wind" => Ok(Self::calm_wind()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Converts the scenario into a dispatch request.
    ///
    /// Semantic validation lives on the request
    /// ([`DispatchRequest::validate`]); call it before planning.
    pub fn to_request(&self) -> DispatchRequest {
        DispatchRequest {
            load: self.load,
            fuels: self.fuels.clone(),
            units: self.units.clone(),
        }
    }
}
