use serde::{Deserialize, Serialize};
use uom::si::{
    electric_potential::{millivolt, volt},
    f64::{ElectricPotential, TemperatureInterval, ThermodynamicTemperature},
    temperature_interval,
    thermodynamic_temperature::{degree_celsius, kelvin},
};
use voltaic_cell::{Chemistry, ConfigError};
use voltaic_core::constraint::{NonNegative, StrictlyPositive};

/// Limits the three rules are judged against.
///
/// Each limit has a warning margin; an extreme that comes within the margin
/// without crossing the limit is reported as an advisory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Anode surface potential below which lithium plating is flagged.
    pub plating_floor: ElectricPotential,
    pub plating_margin: ElectricPotential,
    /// Cell temperature above which thermal runaway is flagged.
    pub thermal_ceiling: ThermodynamicTemperature,
    pub thermal_margin: TemperatureInterval,
    /// Terminal voltage above which overcharge is flagged.
    pub overcharge_ceiling: ElectricPotential,
    pub overcharge_margin: ElectricPotential,
}

impl Default for Thresholds {
    /// The dashboard BMS limits: 5 mV, 50 °C and 5.0 V.
    fn default() -> Self {
        Self {
            plating_floor: ElectricPotential::new::<millivolt>(5.0),
            plating_margin: ElectricPotential::new::<millivolt>(20.0),
            thermal_ceiling: ThermodynamicTemperature::new::<degree_celsius>(50.0),
            thermal_margin: TemperatureInterval::new::<temperature_interval::kelvin>(5.0),
            overcharge_ceiling: ElectricPotential::new::<volt>(5.0),
            overcharge_margin: ElectricPotential::new::<volt>(0.1),
        }
    }
}

impl Thresholds {
    /// Returns a copy with the given overrides applied.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if an overridden value is not finite, a
    /// ceiling is not positive (in volts or kelvin), or a margin is negative.
    pub fn with_overrides(&self, overrides: &ThresholdOverrides) -> Result<Self, ConfigError> {
        let mut next = *self;

        if let Some(mv) = overrides.plating_floor_mv {
            let mv = finite(mv, "plating_floor_mv")?;
            next.plating_floor = ElectricPotential::new::<millivolt>(mv);
        }
        if let Some(mv) = overrides.plating_margin_mv {
            let mv = margin(mv, "plating_margin_mv")?;
            next.plating_margin = ElectricPotential::new::<millivolt>(mv);
        }
        if let Some(celsius) = overrides.thermal_ceiling_c {
            let celsius = finite(celsius, "thermal_ceiling_c")?;
            let ceiling = ThermodynamicTemperature::new::<degree_celsius>(celsius);
            StrictlyPositive::new(ceiling.get::<kelvin>())
                .map_err(ConfigError::out_of_range("thermal_ceiling_c"))?;
            next.thermal_ceiling = ceiling;
        }
        if let Some(k) = overrides.thermal_margin_k {
            let k = margin(k, "thermal_margin_k")?;
            next.thermal_margin = TemperatureInterval::new::<temperature_interval::kelvin>(k);
        }
        if let Some(v) = overrides.overcharge_ceiling_v {
            let v = StrictlyPositive::new(finite(v, "overcharge_ceiling_v")?)
                .map_err(ConfigError::out_of_range("overcharge_ceiling_v"))?;
            next.overcharge_ceiling = ElectricPotential::new::<volt>(v.into_inner());
        }
        if let Some(v) = overrides.overcharge_margin_v {
            let v = margin(v, "overcharge_margin_v")?;
            next.overcharge_margin = ElectricPotential::new::<volt>(v);
        }

        Ok(next)
    }
}

fn finite(value: f64, field: &'static str) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be finite",
        })
    }
}

fn margin(value: f64, field: &'static str) -> Result<f64, ConfigError> {
    let value = finite(value, field)?;
    NonNegative::new(value)
        .map(|m| m.into_inner())
        .map_err(ConfigError::out_of_range(field))
}

/// Threshold values in display units; any key left out keeps its current
/// value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdOverrides {
    pub plating_floor_mv: Option<f64>,
    pub plating_margin_mv: Option<f64>,
    pub thermal_ceiling_c: Option<f64>,
    pub thermal_margin_k: Option<f64>,
    pub overcharge_ceiling_v: Option<f64>,
    pub overcharge_margin_v: Option<f64>,
}

/// The `[thresholds]` table of a deck.
///
/// `all` applies to every chemistry; a per-chemistry table is applied on
/// top of it.
///
/// ```toml
/// [thresholds.all]
/// thermal_ceiling_c = 45.0
///
/// [thresholds.lco]
/// overcharge_ceiling_v = 4.4
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdDeck {
    pub all: ThresholdOverrides,
    #[serde(alias = "NMC")]
    pub nmc: ThresholdOverrides,
    #[serde(alias = "LFP")]
    pub lfp: ThresholdOverrides,
    #[serde(alias = "LCO")]
    pub lco: ThresholdOverrides,
}

impl ThresholdDeck {
    #[must_use]
    pub fn for_chemistry(&self, chemistry: Chemistry) -> &ThresholdOverrides {
        match chemistry {
            Chemistry::Nmc => &self.nmc,
            Chemistry::Lfp => &self.lfp,
            Chemistry::Lco => &self.lco,
        }
    }
}

/// One set of [`Thresholds`] per chemistry.
///
/// The default table uses the same limits for every chemistry.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThresholdTable {
    nmc: Thresholds,
    lfp: Thresholds,
    lco: Thresholds,
}

impl ThresholdTable {
    /// Builds the default table with a deck's overrides applied.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for the first invalid override.
    pub fn from_deck(deck: &ThresholdDeck) -> Result<Self, ConfigError> {
        Self::default().with_deck(deck)
    }

    /// Applies a deck's overrides to this table.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for the first invalid override.
    pub fn with_deck(mut self, deck: &ThresholdDeck) -> Result<Self, ConfigError> {
        for chemistry in Chemistry::ALL {
            let slot = self.slot_mut(chemistry);
            *slot = slot
                .with_overrides(&deck.all)?
                .with_overrides(deck.for_chemistry(chemistry))?;
        }
        Ok(self)
    }

    #[must_use]
    pub fn get(&self, chemistry: Chemistry) -> &Thresholds {
        match chemistry {
            Chemistry::Nmc => &self.nmc,
            Chemistry::Lfp => &self.lfp,
            Chemistry::Lco => &self.lco,
        }
    }

    /// Replaces the thresholds for one chemistry.
    #[must_use]
    pub fn with(mut self, chemistry: Chemistry, thresholds: Thresholds) -> Self {
        *self.slot_mut(chemistry) = thresholds;
        self
    }

    fn slot_mut(&mut self, chemistry: Chemistry) -> &mut Thresholds {
        match chemistry {
            Chemistry::Nmc => &mut self.nmc,
            Chemistry::Lfp => &mut self.lfp,
            Chemistry::Lco => &mut self.lco,
        }
    }
}
