use thiserror::Error;
use uom::si::{
    electric_current::ampere,
    electric_potential::volt,
    f64::{ElectricPotential, Power, ThermodynamicTemperature, Time},
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    power::watt,
    thermodynamic_temperature::{degree_celsius, kelvin},
    time::second,
};
use voltaic_core::{DerivativeOf, Model, OdeProblem};

use super::state::{CellState, CellStateRate};
use crate::{CathodeKind, Electrode, ParameterSet, SolverError, chemistry::graphite_ocp};

const FARADAY: f64 = 96_485.332_12;
const GAS_CONSTANT: f64 = 8.314_462_618;
const REFERENCE_TEMPERATURE_K: f64 = 298.15;

/// Smallest usable electrode capacity, relative to the nominal capacity.
const MIN_CAPACITY_FRACTION: f64 = 0.05;
const MAX_C_RATE: f64 = 10.0;
const AMBIENT_RANGE_C: [f64; 2] = [-40.0, 80.0];

/// A physical limit the lumped cell ran into while charging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CellFault {
    #[error("{0} saturated")]
    Saturated(Electrode),

    #[error("cell state became non-finite")]
    Diverged,
}

/// Model input: elapsed time and the integrated state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellInput {
    pub time: Time,
    pub state: CellState,
}

/// Everything the lumped cell reports for one state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellOutput {
    pub terminal_voltage: ElectricPotential,
    /// Solid minus electrolyte potential at the anode/separator interface.
    pub anode_surface_potential: ElectricPotential,
    pub cathode_potential: ElectricPotential,
    /// Average electrolyte concentration in the negative electrode, mol/m³.
    pub electrolyte_concentration: f64,
    /// Negative electrode interfacial current density, A/m², negative on charge.
    pub interfacial_current_density: f64,
    /// mol/m³
    pub anode_surface_concentration: f64,
    /// mol/m³
    pub cathode_surface_concentration: f64,
    /// Irreversible heat generation.
    pub heat: Power,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Porous {
    /// Charge stored per unit stoichiometry, in coulombs.
    capacity_c: f64,
    /// Total active particle surface, m².
    active_area_m2: f64,
    particle_radius_m: f64,
    max_concentration: f64,
    rate_constant: f64,
}

impl Porous {
    fn new(
        area_m2: f64,
        thickness_m: f64,
        active_fraction: f64,
        particle_radius_m: f64,
        max_concentration: f64,
        rate_constant: f64,
    ) -> Self {
        let volume = area_m2 * thickness_m * active_fraction;
        Self {
            capacity_c: FARADAY * volume * max_concentration,
            active_area_m2: 3.0 * volume / particle_radius_m,
            particle_radius_m,
            max_concentration,
            rate_constant,
        }
    }

    /// Butler-Volmer overpotential magnitude for a symmetric reaction.
    fn overpotential(
        &self,
        flux: f64,
        surface: f64,
        electrolyte: f64,
        arrhenius: f64,
        temperature_k: f64,
    ) -> f64 {
        let exchange = self.rate_constant
            * arrhenius
            * (electrolyte * surface * (self.max_concentration - surface)).sqrt();
        2.0 * GAS_CONSTANT * temperature_k / FARADAY * (flux / (2.0 * exchange)).asinh()
    }
}

/// Reduced-order single-particle cell with a lumped thermal mass.
///
/// Anode particles carry a quadratic concentration profile, so the surface
/// concentration leads the average by the flux times `R / 5D`. Positive
/// particles equilibrate instantly. The electrolyte relaxes towards its
/// steady polarisation with the sandwich diffusion time constant, and all
/// irreversible heat goes into a single thermal mass cooled to ambient.
///
/// The cell is both the [`Model`] and the [`OdeProblem`] handed to the Euler
/// solver.
#[derive(Debug, Clone, PartialEq)]
pub struct LumpedCell {
    current_a: f64,
    cathode_kind: CathodeKind,
    anode: Porous,
    cathode: Porous,
    anode_diffusivity_m2_s: f64,
    anode_stoichiometry: [f64; 2],
    cathode_stoichiometry: [f64; 2],
    cathode_floor: f64,
    activation_energy: f64,
    electrolyte_concentration: f64,
    transference_number: f64,
    steady_polarisation: f64,
    electrolyte_time_constant_s: f64,
    resistance_ohm: f64,
    heat_capacity_j_k: f64,
    cooling_w_k: f64,
    ambient_k: f64,
}

impl LumpedCell {
    /// Builds the cell for a parameter set.
    ///
    /// `contact_resistance` is in Ω·m² and is spread over the electrode area.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::ParameterOutOfRange`] for a charge rate or
    /// ambient temperature the reduced model does not cover, and
    /// [`SolverError::InvalidGeometry`] if the particles do not fit in the
    /// anode or either electrode holds too little charge to be usable.
    pub fn new(params: &ParameterSet, contact_resistance: f64) -> Result<Self, SolverError> {
        let chemistry = params.chemistry();
        let profile = chemistry.profile();

        let c_rate = params.c_rate();
        if c_rate > MAX_C_RATE {
            return Err(SolverError::ParameterOutOfRange(format!(
                "{c_rate:.1}C charge exceeds the {MAX_C_RATE}C limit"
            )));
        }
        let ambient_c = params.ambient_temperature().get::<degree_celsius>();
        let [cold, hot] = AMBIENT_RANGE_C;
        if !(cold..=hot).contains(&ambient_c) {
            return Err(SolverError::ParameterOutOfRange(format!(
                "ambient {ambient_c:.1}°C outside [{cold}, {hot}]°C"
            )));
        }

        let anode_thickness = params.anode_thickness().get::<meter>();
        let cathode_thickness = params.cathode_thickness().get::<meter>();
        let particle_radius = params.particle_radius().get::<meter>();
        if 2.0 * particle_radius > anode_thickness {
            return Err(SolverError::InvalidGeometry(
                "anode particles are thicker than the electrode".to_owned(),
            ));
        }

        let area = profile.electrode_area_m2;
        let anode = Porous::new(
            area,
            anode_thickness,
            params.active_material_fraction(),
            particle_radius,
            profile.anode_max_concentration,
            profile.anode_rate_constant,
        );
        let cathode = Porous::new(
            area,
            cathode_thickness,
            profile.cathode_active_fraction,
            profile.cathode_particle_radius_m,
            profile.cathode_max_concentration,
            profile.cathode_rate_constant,
        );

        let [x0, x1] = profile.anode_stoichiometry;
        let [y0, y1] = profile.cathode_stoichiometry;
        let minimum_ah = MIN_CAPACITY_FRACTION * profile.nominal_capacity_ah;
        for (electrode, usable_c) in [
            ("anode", anode.capacity_c * (x1 - x0).abs()),
            ("cathode", cathode.capacity_c * (y1 - y0).abs()),
        ] {
            let usable_ah = usable_c / 3600.0;
            if usable_ah < minimum_ah {
                return Err(SolverError::InvalidGeometry(format!(
                    "{electrode} holds {usable_ah:.3} Ah, below the usable minimum of {minimum_ah:.3} Ah"
                )));
            }
        }

        let current_a = params.charge_current().get::<ampere>();
        let sandwich = anode_thickness + profile.separator_thickness_m + cathode_thickness;
        let reference_sandwich = profile.anode_thickness_m
            + profile.separator_thickness_m
            + profile.cathode_thickness_m;
        let diffusivity = profile.electrolyte_diffusivity_m2_s;

        Ok(Self {
            current_a,
            cathode_kind: profile.cathode,
            anode,
            cathode,
            anode_diffusivity_m2_s: profile.anode_diffusivity_m2_s,
            anode_stoichiometry: profile.anode_stoichiometry,
            cathode_stoichiometry: profile.cathode_stoichiometry,
            cathode_floor: profile.cathode_stoichiometry_floor,
            activation_energy: profile.kinetic_activation_energy,
            electrolyte_concentration: profile.electrolyte_concentration,
            transference_number: profile.transference_number,
            steady_polarisation: current_a / area * (1.0 - profile.transference_number) * sandwich
                / (2.0 * FARADAY * diffusivity),
            electrolyte_time_constant_s: sandwich * sandwich / diffusivity,
            resistance_ohm: profile.ohmic_resistance_ohm * sandwich / reference_sandwich
                + contact_resistance / area,
            heat_capacity_j_k: profile.cell_mass_kg * profile.specific_heat_j_kg_k,
            cooling_w_k: params.cooling_coefficient().get::<watt_per_square_meter_kelvin>()
                * profile.cooling_area_m2,
            ambient_k: params.ambient_temperature().get::<kelvin>(),
        })
    }

    /// The input at `soc` on the chemistry's stoichiometry window, at ambient
    /// temperature with a relaxed electrolyte.
    #[must_use]
    pub fn initial_input(&self, soc: f64) -> CellInput {
        let [x0, x1] = self.anode_stoichiometry;
        let [y0, y1] = self.cathode_stoichiometry;
        CellInput {
            time: Time::new::<second>(0.0),
            state: CellState {
                anode_stoichiometry: x0 + soc * (x1 - x0),
                cathode_stoichiometry: y0 + soc * (y1 - y0),
                electrolyte_polarisation: 0.0,
                temperature: ThermodynamicTemperature::new::<kelvin>(self.ambient_k),
            },
        }
    }

    /// Lumped series resistance, including contact resistance.
    #[must_use]
    pub fn resistance_ohm(&self) -> f64 {
        self.resistance_ohm
    }
}

impl Model for LumpedCell {
    type Input = CellInput;
    type Output = CellOutput;
    type Error = CellFault;

    fn call(&self, input: &CellInput) -> Result<CellOutput, CellFault> {
        let state = &input.state;
        let temperature_k = state.temperature.get::<kelvin>();
        if !state.is_finite() || temperature_k <= 0.0 {
            return Err(CellFault::Diverged);
        }
        let arrhenius = (self.activation_energy / GAS_CONSTANT
            * (1.0 / REFERENCE_TEMPERATURE_K - 1.0 / temperature_k))
            .exp();

        let x = state.anode_stoichiometry;
        let y = state.cathode_stoichiometry;
        if y <= self.cathode_floor || y >= 1.0 {
            return Err(CellFault::Saturated(Electrode::Cathode));
        }

        let anode_flux = self.current_a / self.anode.active_area_m2;
        let anode_surface = x * self.anode.max_concentration
            + anode_flux * self.anode.particle_radius_m
                / (5.0 * FARADAY * self.anode_diffusivity_m2_s * arrhenius);
        let x_surface = anode_surface / self.anode.max_concentration;
        if x <= 0.0 || x_surface >= 1.0 {
            return Err(CellFault::Saturated(Electrode::Anode));
        }
        let cathode_surface = y * self.cathode.max_concentration;

        let polarisation = state.electrolyte_polarisation;
        let electrolyte_anode = self.electrolyte_concentration - polarisation;
        let electrolyte_cathode = self.electrolyte_concentration + polarisation;
        if electrolyte_anode <= 0.0 {
            return Err(CellFault::Saturated(Electrode::Electrolyte));
        }

        let cathode_flux = self.current_a / self.cathode.active_area_m2;
        let eta_anode = self.anode.overpotential(
            anode_flux,
            anode_surface,
            electrolyte_anode,
            arrhenius,
            temperature_k,
        );
        let eta_cathode = self.cathode.overpotential(
            cathode_flux,
            cathode_surface,
            electrolyte_cathode,
            arrhenius,
            temperature_k,
        );
        let eta_electrolyte = 2.0 * GAS_CONSTANT * temperature_k * (1.0 - self.transference_number)
            / FARADAY
            * (electrolyte_cathode / electrolyte_anode).ln();

        let anode_potential = graphite_ocp(x_surface) - eta_anode;
        let cathode_potential = self.cathode_kind.ocp(y) + eta_cathode;
        let terminal = cathode_potential - anode_potential
            + eta_electrolyte
            + self.current_a * self.resistance_ohm;
        let open_circuit = self.cathode_kind.ocp(y) - graphite_ocp(x);
        let heat = self.current_a * (terminal - open_circuit);

        if !(terminal.is_finite() && anode_potential.is_finite() && heat.is_finite()) {
            return Err(CellFault::Diverged);
        }

        Ok(CellOutput {
            terminal_voltage: ElectricPotential::new::<volt>(terminal),
            anode_surface_potential: ElectricPotential::new::<volt>(anode_potential),
            cathode_potential: ElectricPotential::new::<volt>(cathode_potential),
            electrolyte_concentration: self.electrolyte_concentration - 0.5 * polarisation,
            interfacial_current_density: -anode_flux,
            anode_surface_concentration: anode_surface,
            cathode_surface_concentration: cathode_surface,
            heat: Power::new::<watt>(heat),
        })
    }
}

impl OdeProblem for LumpedCell {
    type Input = CellInput;
    type Output = CellOutput;
    type Delta = Time;
    type State = CellState;
    type Error = CellFault;

    fn state(&self, input: &CellInput) -> Result<CellState, CellFault> {
        Ok(input.state)
    }

    fn derivative(
        &self,
        input: &CellInput,
        output: &CellOutput,
    ) -> Result<DerivativeOf<CellState, Time>, CellFault> {
        let temperature_k = input.state.temperature.get::<kelvin>();
        let cooling = self.cooling_w_k * (temperature_k - self.ambient_k);

        Ok(CellStateRate {
            anode_stoichiometry: self.current_a / self.anode.capacity_c,
            cathode_stoichiometry: -self.current_a / self.cathode.capacity_c,
            electrolyte_polarisation: (self.steady_polarisation
                - input.state.electrolyte_polarisation)
                / self.electrolyte_time_constant_s,
            temperature: (output.heat.get::<watt>() - cooling) / self.heat_capacity_j_k,
        })
    }

    fn build_input(
        &self,
        base: &CellInput,
        state: &CellState,
        dt: &Time,
    ) -> Result<CellInput, CellFault> {
        if !state.is_finite() {
            return Err(CellFault::Diverged);
        }
        Ok(CellInput {
            time: base.time + *dt,
            state: *state,
        })
    }
}
