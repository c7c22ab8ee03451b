use uom::si::{
    electric_current::ampere,
    f64::{ElectricCurrent, HeatTransfer, Length, ThermodynamicTemperature},
    thermodynamic_temperature::kelvin,
};
use voltaic_core::constraint::{Constrained, NonNegative, OpenUnitInterval, StrictlyPositive};

use crate::{Chemistry, ConfigError};

/// Charge current, either absolute or relative to the nominal capacity.
///
/// Only the magnitude matters: a run is always a charge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChargeCurrent {
    Amperes(ElectricCurrent),
    CRate(f64),
}

impl ChargeCurrent {
    /// Resolves the current magnitude for the given chemistry.
    #[must_use]
    pub fn resolve(self, chemistry: Chemistry) -> ElectricCurrent {
        match self {
            ChargeCurrent::Amperes(current) => current.abs(),
            ChargeCurrent::CRate(rate) => {
                ElectricCurrent::new::<ampere>(rate.abs() * chemistry.profile().nominal_capacity_ah)
            }
        }
    }

    fn magnitude(self) -> f64 {
        match self {
            ChargeCurrent::Amperes(current) => current.get::<ampere>(),
            ChargeCurrent::CRate(rate) => rate,
        }
    }
}

/// Unvalidated cell parameters in SI quantities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellConfig {
    pub chemistry: Chemistry,
    pub anode_thickness: Length,
    pub cathode_thickness: Length,
    pub particle_radius: Length,
    pub active_material_fraction: f64,
    pub cooling_coefficient: HeatTransfer,
    pub ambient_temperature: ThermodynamicTemperature,
    pub charge_current: ChargeCurrent,
}

/// A validated, immutable set of cell parameters for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSet {
    chemistry: Chemistry,
    anode_thickness: Constrained<Length, StrictlyPositive>,
    cathode_thickness: Constrained<Length, StrictlyPositive>,
    particle_radius: Constrained<Length, StrictlyPositive>,
    active_material_fraction: Constrained<f64, OpenUnitInterval>,
    cooling_coefficient: Constrained<HeatTransfer, NonNegative>,
    ambient_temperature: ThermodynamicTemperature,
    requested_current: ChargeCurrent,
    charge_current: Constrained<ElectricCurrent, StrictlyPositive>,
}

impl ParameterSet {
    /// Validates a [`CellConfig`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the deck key of the first field that is
    /// out of range:
    /// non-positive lengths, an active fraction outside `(0, 1)`, a negative
    /// cooling coefficient, an ambient temperature at or below absolute zero,
    /// or a zero or non-finite charge current.
    pub fn new(config: CellConfig) -> Result<Self, ConfigError> {
        let CellConfig {
            chemistry,
            anode_thickness,
            cathode_thickness,
            particle_radius,
            active_material_fraction,
            cooling_coefficient,
            ambient_temperature,
            charge_current,
        } = config;

        let anode_thickness = finite_positive(anode_thickness, "anode_thickness_um")?;
        let cathode_thickness = finite_positive(cathode_thickness, "cathode_thickness_um")?;
        let particle_radius = finite_positive(particle_radius, "particle_radius_um")?;
        let active_material_fraction = OpenUnitInterval::new(active_material_fraction)
            .map_err(ConfigError::out_of_range("active_material_fraction"))?;

        if !cooling_coefficient.value.is_finite() {
            return Err(ConfigError::Invalid {
                field: "cooling_coefficient",
                reason: "must be finite",
            });
        }
        let cooling_coefficient = NonNegative::new(cooling_coefficient)
            .map_err(ConfigError::out_of_range("cooling_coefficient"))?;

        let ambient_k = ambient_temperature.get::<kelvin>();
        if !ambient_k.is_finite() || ambient_k <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "ambient_temperature_c",
                reason: "must be finite and above absolute zero",
            });
        }

        if !charge_current.magnitude().is_finite() {
            return Err(ConfigError::Invalid {
                field: "charge_current",
                reason: "must be finite",
            });
        }
        let resolved = StrictlyPositive::new(charge_current.resolve(chemistry))
            .map_err(ConfigError::out_of_range("charge_current"))?;

        Ok(Self {
            chemistry,
            anode_thickness,
            cathode_thickness,
            particle_radius,
            active_material_fraction,
            cooling_coefficient,
            ambient_temperature,
            requested_current: charge_current,
            charge_current: resolved,
        })
    }

    #[must_use]
    pub fn chemistry(&self) -> Chemistry {
        self.chemistry
    }

    #[must_use]
    pub fn anode_thickness(&self) -> Length {
        self.anode_thickness.get()
    }

    #[must_use]
    pub fn cathode_thickness(&self) -> Length {
        self.cathode_thickness.get()
    }

    /// Radius of the negative electrode particles.
    #[must_use]
    pub fn particle_radius(&self) -> Length {
        self.particle_radius.get()
    }

    /// Active material volume fraction of the negative electrode.
    #[must_use]
    pub fn active_material_fraction(&self) -> f64 {
        self.active_material_fraction.get()
    }

    /// Total heat transfer coefficient to ambient.
    #[must_use]
    pub fn cooling_coefficient(&self) -> HeatTransfer {
        self.cooling_coefficient.get()
    }

    #[must_use]
    pub fn ambient_temperature(&self) -> ThermodynamicTemperature {
        self.ambient_temperature
    }

    /// Charge current magnitude in amperes.
    #[must_use]
    pub fn charge_current(&self) -> ElectricCurrent {
        self.charge_current.get()
    }

    /// The current as it was requested (amperes or C-rate).
    #[must_use]
    pub fn requested_current(&self) -> ChargeCurrent {
        self.requested_current
    }

    /// Charge current relative to the chemistry's nominal capacity.
    #[must_use]
    pub fn c_rate(&self) -> f64 {
        self.charge_current().get::<ampere>() / self.chemistry.profile().nominal_capacity_ah
    }
}

fn finite_positive(
    length: Length,
    field: &'static str,
) -> Result<Constrained<Length, StrictlyPositive>, ConfigError> {
    if length.value.is_infinite() {
        return Err(ConfigError::Invalid {
            field,
            reason: "must be finite",
        });
    }
    StrictlyPositive::new(length).map_err(ConfigError::out_of_range(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        heat_transfer::watt_per_square_meter_kelvin, length::micrometer,
        thermodynamic_temperature::degree_celsius,
    };
    use voltaic_core::constraint::ConstraintError;

    fn config() -> CellConfig {
        CellConfig {
            chemistry: Chemistry::Nmc,
            anode_thickness: Length::new::<micrometer>(100.0),
            cathode_thickness: Length::new::<micrometer>(100.0),
            particle_radius: Length::new::<micrometer>(5.0),
            active_material_fraction: 0.75,
            cooling_coefficient: HeatTransfer::new::<watt_per_square_meter_kelvin>(10.0),
            ambient_temperature: ThermodynamicTemperature::new::<degree_celsius>(25.0),
            charge_current: ChargeCurrent::Amperes(ElectricCurrent::new::<ampere>(7.5)),
        }
    }

    #[test]
    fn accepts_dashboard_defaults() {
        let params = ParameterSet::new(config()).expect("defaults are valid");

        assert_eq!(params.chemistry(), Chemistry::Nmc);
        assert_relative_eq!(params.anode_thickness().get::<micrometer>(), 100.0, epsilon = 1e-9);
        assert_relative_eq!(params.charge_current().get::<ampere>(), 7.5);
        assert_relative_eq!(params.c_rate(), 1.5);
    }

    #[test]
    fn current_sign_is_ignored() {
        let mut cfg = config();
        cfg.charge_current = ChargeCurrent::Amperes(ElectricCurrent::new::<ampere>(-3.0));

        let params = ParameterSet::new(cfg).unwrap();
        assert_relative_eq!(params.charge_current().get::<ampere>(), 3.0);
    }

    #[test]
    fn c_rate_resolves_through_nominal_capacity() {
        let mut cfg = config();
        cfg.chemistry = Chemistry::Lfp;
        cfg.charge_current = ChargeCurrent::CRate(2.0);

        let params = ParameterSet::new(cfg).unwrap();
        assert_relative_eq!(params.charge_current().get::<ampere>(), 4.6);
        assert_relative_eq!(params.c_rate(), 2.0);
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let mut cfg = config();
        cfg.anode_thickness = Length::new::<micrometer>(0.0);
        let err = ParameterSet::new(cfg).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "anode_thickness_um",
                source: ConstraintError::Zero
            }
        ));

        let mut cfg = config();
        cfg.active_material_fraction = 1.0;
        assert_eq!(
            ParameterSet::new(cfg).unwrap_err().field(),
            Some("active_material_fraction")
        );

        let mut cfg = config();
        cfg.cooling_coefficient = HeatTransfer::new::<watt_per_square_meter_kelvin>(-1.0);
        assert_eq!(
            ParameterSet::new(cfg).unwrap_err().field(),
            Some("cooling_coefficient")
        );

        let mut cfg = config();
        cfg.charge_current = ChargeCurrent::CRate(0.0);
        assert_eq!(
            ParameterSet::new(cfg).unwrap_err().field(),
            Some("charge_current")
        );

        let mut cfg = config();
        cfg.ambient_temperature = ThermodynamicTemperature::new::<kelvin>(0.0);
        assert_eq!(
            ParameterSet::new(cfg).unwrap_err().field(),
            Some("ambient_temperature_c")
        );
    }

    #[test]
    fn zero_cooling_is_adiabatic_not_invalid() {
        let mut cfg = config();
        cfg.cooling_coefficient = HeatTransfer::new::<watt_per_square_meter_kelvin>(0.0);
        assert!(ParameterSet::new(cfg).is_ok());
    }
}
