use serde::{Deserialize, Serialize};
use uom::si::{
    electric_current::ampere,
    electric_potential::volt,
    f64::{
        ElectricCurrent, ElectricPotential, HeatTransfer, Length, ThermodynamicTemperature, Time,
    },
    heat_transfer::watt_per_square_meter_kelvin,
    length::micrometer,
    thermodynamic_temperature::degree_celsius,
    time::second,
};
use voltaic_core::constraint::{OpenUnitInterval, StrictlyPositive};

use crate::{CellConfig, ChargeCurrent, Chemistry, ConfigError, ParameterSet, SolveWindow};

/// Cell parameters in display units, as written in a deck file.
///
/// Missing keys fall back to the dashboard defaults: an NMC cell with 100 µm
/// electrodes and 5 µm particles at 75 % active material, charged at 7.5 A
/// with 10 W/m²K cooling in 25 °C ambient.
///
/// ```toml
/// chemistry = "LFP"
/// anode_thickness_um = 120.0
/// charge_current = { c_rate = 2.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParameterDeck {
    pub chemistry: Chemistry,
    pub anode_thickness_um: f64,
    pub cathode_thickness_um: f64,
    pub particle_radius_um: f64,
    pub active_material_fraction: f64,
    /// Total heat transfer coefficient in W/m²K.
    pub cooling_coefficient: f64,
    pub ambient_temperature_c: f64,
    pub charge_current: ChargeCurrentDeck,
}

/// Charge current as written in a deck: `{ amperes = .. }` or `{ c_rate = .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeCurrentDeck {
    Amperes(f64),
    CRate(f64),
}

impl Default for ParameterDeck {
    fn default() -> Self {
        Self {
            chemistry: Chemistry::Nmc,
            anode_thickness_um: 100.0,
            cathode_thickness_um: 100.0,
            particle_radius_um: 5.0,
            active_material_fraction: 0.75,
            cooling_coefficient: 10.0,
            ambient_temperature_c: 25.0,
            charge_current: ChargeCurrentDeck::Amperes(7.5),
        }
    }
}

impl ParameterDeck {
    /// Parses a deck from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML, unknown keys, or
    /// values of the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Converts display units to SI quantities without validating ranges.
    #[must_use]
    pub fn to_config(&self) -> CellConfig {
        CellConfig {
            chemistry: self.chemistry,
            anode_thickness: Length::new::<micrometer>(self.anode_thickness_um),
            cathode_thickness: Length::new::<micrometer>(self.cathode_thickness_um),
            particle_radius: Length::new::<micrometer>(self.particle_radius_um),
            active_material_fraction: self.active_material_fraction,
            cooling_coefficient: HeatTransfer::new::<watt_per_square_meter_kelvin>(
                self.cooling_coefficient,
            ),
            ambient_temperature: ThermodynamicTemperature::new::<degree_celsius>(
                self.ambient_temperature_c,
            ),
            charge_current: match self.charge_current {
                ChargeCurrentDeck::Amperes(amps) => {
                    ChargeCurrent::Amperes(ElectricCurrent::new::<ampere>(amps))
                }
                ChargeCurrentDeck::CRate(rate) => ChargeCurrent::CRate(rate),
            },
        }
    }

    /// Validates the deck into an immutable [`ParameterSet`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first out-of-range field.
    pub fn to_parameters(&self) -> Result<ParameterSet, ConfigError> {
        ParameterSet::new(self.to_config())
    }
}

/// Simulation window settings as written in a deck's `[simulation]` table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowDeck {
    pub duration_s: f64,
    pub step_s: f64,
    pub voltage_cutoff_v: f64,
    /// State of charge at the start of the charge, in `(0, 1)`.
    pub initial_soc: f64,
}

impl Default for WindowDeck {
    fn default() -> Self {
        Self {
            duration_s: 900.0,
            step_s: 1.0,
            voltage_cutoff_v: 5.0,
            initial_soc: 0.1,
        }
    }
}

impl WindowDeck {
    /// Validates the window settings.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the duration, step, or cut-off is not a
    /// positive finite number, if the step exceeds the duration, if the window
    /// needs more than [`SolveWindow::MAX_STEPS`] steps, or if the initial
    /// state of charge is outside `(0, 1)`.
    pub fn to_window(&self) -> Result<SolveWindow, ConfigError> {
        for (field, value) in [
            ("duration_s", self.duration_s),
            ("step_s", self.step_s),
            ("voltage_cutoff_v", self.voltage_cutoff_v),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
            StrictlyPositive::new(value).map_err(ConfigError::out_of_range(field))?;
        }
        if self.step_s > self.duration_s {
            return Err(ConfigError::Invalid {
                field: "step_s",
                reason: "must not exceed duration_s",
            });
        }
        if (self.duration_s / self.step_s).round() > SolveWindow::MAX_STEPS as f64 {
            return Err(ConfigError::Invalid {
                field: "duration_s",
                reason: "needs more than 1000000 steps at this step_s",
            });
        }
        let initial_soc = OpenUnitInterval::new(self.initial_soc)
            .map_err(ConfigError::out_of_range("initial_soc"))?;

        Ok(SolveWindow {
            duration: Time::new::<second>(self.duration_s),
            step: Time::new::<second>(self.step_s),
            voltage_cutoff: ElectricPotential::new::<volt>(self.voltage_cutoff_v),
            initial_soc: initial_soc.into_inner(),
        })
    }
}
