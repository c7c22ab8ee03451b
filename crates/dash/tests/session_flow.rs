use voltaic_cell::{Chemistry, LumpedSolver, SolverError};
use voltaic_dash::{Dashboard, DeckFile, Session, SubmitError};
use voltaic_safety::Overall;

fn session() -> Session<LumpedSolver> {
    Session::new(LumpedSolver::new())
}

#[test]
fn default_deck_renders_a_safe_dashboard() {
    let mut session = session();
    let run = session.submit(&DeckFile::default()).unwrap();
    let dashboard = Dashboard::build(run);

    assert_eq!(dashboard.safety.overall, Overall::Safe);
    assert_eq!(dashboard.time_minutes.len(), 901);
    assert!(dashboard.panels.iter().all(|p| p.values.len() == 901));

    let text = dashboard.render_text();
    assert!(text.starts_with("Electrode Geometry & Battery Charging Stability Simulation\n"));
    assert!(text.contains("NMC (Chen2020) | lumped-spm | 901 samples over 15.0 min"));
    assert!(text.contains("SAFE TO CHARGE: Parameters are within safe operation boundaries."));
}

#[test]
fn hot_lco_deck_is_unsafe_with_thermal_reason_first() {
    let deck = DeckFile::from_toml_str("[cell]\nchemistry = \"LCO\"").unwrap();
    let mut session = session();
    let dashboard = Dashboard::build(session.submit(&deck).unwrap());

    assert_eq!(dashboard.safety.overall, Overall::Unsafe);
    assert!(dashboard.safety.reasons[0].starts_with("Thermal Violation: "));
    assert!(dashboard.render_text().contains("CHARGING UNSAFE: The BMS detected safety violations:"));
}

#[test]
fn saturating_deck_clears_the_previous_run() {
    let mut session = session();
    session.submit(&DeckFile::default()).unwrap();

    let deck = DeckFile::from_toml_str("[simulation]\ninitial_soc = 0.8").unwrap();
    let err = session.submit(&deck).unwrap_err();

    assert!(matches!(err, SubmitError::Solver(SolverError::Saturated { .. })));
    assert!(err.is_solver_crash());
    assert!(session.current().is_none());
}

#[test]
fn rejected_deck_keeps_the_previous_run() {
    let mut session = session();
    session.submit(&DeckFile::default()).unwrap();

    let deck = DeckFile::from_toml_str("[cell]\nparticle_radius_um = -2.0").unwrap();
    assert!(matches!(session.submit(&deck), Err(SubmitError::Config(_))));

    let run = session.current().unwrap();
    assert_eq!(run.params().chemistry(), Chemistry::Nmc);
    assert_eq!(run.report().overall(), Overall::Safe);
}

#[test]
fn cold_ambient_is_flagged_before_plating() {
    let deck = DeckFile::from_toml_str("[cell]\nambient_temperature_c = -10.0").unwrap();
    let mut session = session();
    let dashboard = Dashboard::build(session.submit(&deck).unwrap());

    assert_eq!(dashboard.safety.overall, Overall::Unsafe);
    assert_eq!(
        dashboard.safety.reasons[0],
        "Sub-zero hazard: High risk of lithium plating."
    );
}
