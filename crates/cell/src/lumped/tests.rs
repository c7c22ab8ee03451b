use super::*;

use approx::assert_relative_eq;
use uom::si::{
    electric_current::ampere,
    f64::{ElectricCurrent, Length, Time},
    length::micrometer,
    thermodynamic_temperature::degree_celsius,
};
use voltaic_core::Model;

use crate::{Chemistry, ChargeCurrent, Electrode, ParameterDeck};

fn params(deck: ParameterDeck) -> ParameterSet {
    deck.to_parameters().expect("valid deck")
}

fn nmc() -> ParameterSet {
    params(ParameterDeck::default())
}

#[test]
fn default_charge_runs_the_whole_window() {
    let series = LumpedSolver::new()
        .solve(&nmc(), &SolveWindow::default())
        .unwrap();

    assert_eq!(series.len(), 901);
    assert_relative_eq!(series.time()[0], 0.0);
    assert_relative_eq!(*series.time().last().unwrap(), 900.0, epsilon = 1e-6);
    for variable in Variable::ALL {
        assert!(series.channel(variable).is_some(), "missing {variable}");
    }
    assert!(series.validate().is_ok());
}

#[test]
fn charging_raises_voltage_and_temperature() {
    let series = LumpedSolver::new()
        .solve(&nmc(), &SolveWindow::default())
        .unwrap();

    let voltage = series.channel(Variable::TerminalVoltage).unwrap();
    assert!(voltage[0] > 3.4 && voltage[0] < 3.7, "{}", voltage[0]);
    assert!(voltage[900] > voltage[0]);

    let temperature = series.last(Variable::CellTemperature).unwrap().value;
    let ambient = nmc().ambient_temperature().get::<kelvin>();
    assert!(temperature > ambient + 5.0 && temperature < ambient + 25.0);

    // Charging pushes lithium into the anode.
    let current = series.channel(Variable::InterfacialCurrentDensity).unwrap();
    assert!(current.iter().all(|&j| j < 0.0));
    let anode = series.channel(Variable::AnodeSurfaceConcentration).unwrap();
    assert!(anode[900] > anode[0]);
}

#[test]
fn stops_at_voltage_cutoff() {
    let window = SolveWindow {
        voltage_cutoff: ElectricPotential::new::<volt>(4.3),
        initial_soc: 0.7,
        ..SolveWindow::default()
    };
    let series = LumpedSolver::new().solve(&nmc(), &window).unwrap();

    assert!(series.len() > 100 && series.len() < 901, "{}", series.len());
    let last = series.last(Variable::TerminalVoltage).unwrap().value;
    assert!(last >= 4.3);
    let voltage = series.channel(Variable::TerminalVoltage).unwrap();
    assert!(voltage[..voltage.len() - 1].iter().all(|&v| v < 4.3));
}

#[test]
fn deep_charge_saturates_the_anode() {
    let window = SolveWindow {
        initial_soc: 0.8,
        ..SolveWindow::default()
    };
    let err = LumpedSolver::new().solve(&nmc(), &window).unwrap_err();

    match err {
        SolverError::Saturated { time_s, electrode } => {
            assert_eq!(electrode, Electrode::Anode);
            assert!(time_s > 600.0 && time_s < 900.0, "{time_s}");
        }
        other => panic!("expected saturation, got {other:?}"),
    }
}

#[test]
fn rejects_unusable_geometry() {
    let thick_particles = params(ParameterDeck {
        anode_thickness_um: 8.0,
        ..ParameterDeck::default()
    });
    assert!(matches!(
        LumpedCell::new(&thick_particles, 0.0),
        Err(SolverError::InvalidGeometry(_))
    ));

    let thin_anode = params(ParameterDeck {
        anode_thickness_um: 2.0,
        particle_radius_um: 0.5,
        ..ParameterDeck::default()
    });
    assert!(matches!(
        LumpedCell::new(&thin_anode, 0.0),
        Err(SolverError::InvalidGeometry(msg)) if msg.starts_with("anode")
    ));
}

#[test]
fn rejects_conditions_outside_model_range() {
    let fast = params(ParameterDeck {
        charge_current: crate::ChargeCurrentDeck::CRate(12.0),
        ..ParameterDeck::default()
    });
    assert!(matches!(
        LumpedCell::new(&fast, 0.0),
        Err(SolverError::ParameterOutOfRange(_))
    ));

    let frozen = params(ParameterDeck {
        ambient_temperature_c: -50.0,
        ..ParameterDeck::default()
    });
    assert!(matches!(
        LumpedSolver::new().solve(&frozen, &SolveWindow::default()),
        Err(SolverError::ParameterOutOfRange(_))
    ));
}

#[test]
fn rejects_windows_longer_than_the_step_cap() {
    let window = SolveWindow {
        duration: Time::new::<second>(1e20),
        ..SolveWindow::default()
    };
    assert!(matches!(
        LumpedSolver::new().solve(&nmc(), &window),
        Err(SolverError::ParameterOutOfRange(_))
    ));
}

#[test]
fn initial_state_follows_stoichiometry_window() {
    let cell = LumpedCell::new(&nmc(), 0.0).unwrap();
    let [x0, x1] = Chemistry::Nmc.profile().anode_stoichiometry;

    let input = cell.initial_input(0.5);
    assert_relative_eq!(input.state.anode_stoichiometry, 0.5 * (x0 + x1), epsilon = 1e-12);
    assert_relative_eq!(input.state.electrolyte_polarisation, 0.0);
    assert_relative_eq!(
        input.state.temperature.get::<degree_celsius>(),
        25.0,
        epsilon = 1e-9
    );
}

#[test]
fn overpotentials_order_the_potentials() {
    let cell = LumpedCell::new(&nmc(), 0.0).unwrap();
    let input = cell.initial_input(0.1);
    let output = cell.call(&input).unwrap();

    let anode = output.anode_surface_potential.get::<volt>();
    let cathode = output.cathode_potential.get::<volt>();
    let terminal = output.terminal_voltage.get::<volt>();

    assert!(anode > 0.0 && anode < 0.4, "{anode}");
    assert!(terminal > cathode - anode, "ohmic drop adds to the charge voltage");
    assert!(output.heat.get::<uom::si::power::watt>() > 0.0);
}

#[test]
fn contact_resistance_raises_terminal_voltage() {
    let params = nmc();
    let base = LumpedCell::new(&params, 0.0).unwrap();
    let resistive = LumpedCell::new(&params, 1e-3).unwrap();
    let input = base.initial_input(0.3);

    let dv = resistive.call(&input).unwrap().terminal_voltage
        - base.call(&input).unwrap().terminal_voltage;
    let current = params.charge_current().get::<ampere>();
    let area = Chemistry::Nmc.profile().electrode_area_m2;

    assert_relative_eq!(dv.get::<volt>(), current * 1e-3 / area, epsilon = 1e-9);
    assert_relative_eq!(
        resistive.resistance_ohm() - base.resistance_ohm(),
        1e-3 / area,
        epsilon = 1e-12
    );
}

#[test]
fn exhausted_cathode_is_a_fault() {
    let cell = LumpedCell::new(&nmc(), 0.0).unwrap();
    let mut input = cell.initial_input(0.5);
    input.state.cathode_stoichiometry = 0.01;

    assert_eq!(
        cell.call(&input),
        Err(CellFault::Saturated(Electrode::Cathode))
    );

    input.state.cathode_stoichiometry = f64::NAN;
    assert_eq!(cell.call(&input), Err(CellFault::Diverged));
}

#[test]
fn every_chemistry_charges_at_defaults() {
    for chemistry in Chemistry::ALL {
        let params = params(ParameterDeck {
            chemistry,
            ..ParameterDeck::default()
        });
        let series = LumpedSolver::new()
            .solve(&params, &SolveWindow::default())
            .unwrap_or_else(|err| panic!("{chemistry}: {err}"));

        assert_eq!(series.len(), 901, "{chemistry}");
        let min_anode = series
            .channel(Variable::AnodeSurfacePotential)
            .unwrap()
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        assert!(min_anode > 0.05, "{chemistry}: {min_anode}");
    }
}

#[test]
fn shorter_steps_keep_the_window() {
    let window = SolveWindow {
        duration: Time::new::<second>(60.0),
        step: Time::new::<second>(0.5),
        ..SolveWindow::default()
    };
    let params = ParameterSet::new(crate::CellConfig {
        charge_current: ChargeCurrent::Amperes(ElectricCurrent::new::<ampere>(5.0)),
        particle_radius: Length::new::<micrometer>(4.0),
        ..nmc_config()
    })
    .unwrap();

    let series = LumpedSolver::new().solve(&params, &window).unwrap();
    assert_eq!(series.len(), 121);
    assert_relative_eq!(series.time()[1], 0.5);
}

fn nmc_config() -> crate::CellConfig {
    ParameterDeck::default().to_config()
}
