use uom::si::{
    f64::{ThermodynamicTemperature, Time},
    thermodynamic_temperature::kelvin,
    time::second,
};
use voltaic_core::StepIntegrable;

/// Integrated state of the lumped cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellState {
    /// Average lithium stoichiometry of the negative particles.
    pub anode_stoichiometry: f64,
    /// Average lithium stoichiometry of the positive particles.
    pub cathode_stoichiometry: f64,
    /// Electrolyte concentration drop from the cell average to the
    /// anode/separator interface, in mol/m³.
    pub electrolyte_polarisation: f64,
    pub temperature: ThermodynamicTemperature,
}

/// Time derivative of [`CellState`], per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStateRate {
    pub anode_stoichiometry: f64,
    pub cathode_stoichiometry: f64,
    pub electrolyte_polarisation: f64,
    /// Kelvin per second.
    pub temperature: f64,
}

impl CellState {
    pub(crate) fn is_finite(&self) -> bool {
        self.anode_stoichiometry.is_finite()
            && self.cathode_stoichiometry.is_finite()
            && self.electrolyte_polarisation.is_finite()
            && self.temperature.value.is_finite()
    }
}

impl StepIntegrable<Time> for CellState {
    type Derivative = CellStateRate;

    fn step(&self, rate: CellStateRate, dt: Time) -> Self {
        let dt = dt.get::<second>();
        CellState {
            anode_stoichiometry: self.anode_stoichiometry + rate.anode_stoichiometry * dt,
            cathode_stoichiometry: self.cathode_stoichiometry + rate.cathode_stoichiometry * dt,
            electrolyte_polarisation: self.electrolyte_polarisation
                + rate.electrolyte_polarisation * dt,
            temperature: ThermodynamicTemperature::new::<kelvin>(
                self.temperature.get::<kelvin>() + rate.temperature * dt,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn steps_every_field() {
        let state = CellState {
            anode_stoichiometry: 0.2,
            cathode_stoichiometry: 0.8,
            electrolyte_polarisation: 0.0,
            temperature: ThermodynamicTemperature::new::<kelvin>(300.0),
        };
        let rate = CellStateRate {
            anode_stoichiometry: 1e-4,
            cathode_stoichiometry: -2e-4,
            electrolyte_polarisation: 5.0,
            temperature: 0.01,
        };

        let next = state.step(rate, Time::new::<second>(10.0));

        assert_relative_eq!(next.anode_stoichiometry, 0.201);
        assert_relative_eq!(next.cathode_stoichiometry, 0.798);
        assert_relative_eq!(next.electrolyte_polarisation, 50.0);
        assert_relative_eq!(next.temperature.get::<kelvin>(), 300.1, epsilon = 1e-9);
    }
}
