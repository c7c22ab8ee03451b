use voltaic_cell::{
    Chemistry, LumpedSolver, ParameterDeck, Simulation, SolveWindow, Variable, WindowDeck,
};

const DECK: &str = r#"
chemistry = "LFP"
anode_thickness_um = 80.0
cathode_thickness_um = 90.0
particle_radius_um = 4.0
active_material_fraction = 0.7
cooling_coefficient = 25.0
ambient_temperature_c = 15.0
charge_current = { c_rate = 1.0 }
"#;

#[test]
fn nominal_runs_have_a_clean_time_axis() {
    for chemistry in Chemistry::ALL {
        let params = ParameterDeck {
            chemistry,
            ..ParameterDeck::default()
        }
        .to_parameters()
        .unwrap();

        let series = Simulation::new(LumpedSolver::new(), SolveWindow::default())
            .run(&params)
            .unwrap();

        let time = series.time();
        assert_eq!(time[0], 0.0, "{chemistry}");
        assert!(time.windows(2).all(|w| w[1] > w[0]), "{chemistry}");
        assert_eq!(series.variables().count(), Variable::ALL.len());
    }
}

#[test]
fn deck_to_series() {
    let params = ParameterDeck::from_toml_str(DECK)
        .and_then(|deck| deck.to_parameters())
        .unwrap();
    let window = WindowDeck {
        duration_s: 600.0,
        step_s: 2.0,
        ..WindowDeck::default()
    }
    .to_window()
    .unwrap();

    let series = Simulation::new(LumpedSolver::new(), window)
        .run(&params)
        .unwrap();

    assert_eq!(series.len(), 301);
    assert_eq!(series.time_minutes().last().copied(), Some(10.0));

    let temperature = series.channel(Variable::CellTemperature).unwrap();
    assert!(temperature.iter().all(|&t| t > 288.0 && t < 300.0));
}

#[test]
fn runs_are_deterministic() {
    let params = ParameterDeck::default().to_parameters().unwrap();
    let sim = Simulation::new(LumpedSolver::new(), SolveWindow::default());

    assert_eq!(sim.run(&params).unwrap(), sim.run(&params).unwrap());
}
