use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use uom::si::{
    electric_current::ampere, electric_potential::volt, length::micrometer,
    thermodynamic_temperature::degree_celsius, time::second,
};
use voltaic_dash::DeckFile;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// TOML deck file to validate
    #[arg(short, long)]
    pub deck: PathBuf,
}

pub fn execute(args: &CheckArgs) -> Result<()> {
    let deck = DeckFile::load(&args.deck)
        .with_context(|| format!("cannot read deck {}", args.deck.display()))?;
    let submission = deck.validate().context("deck is invalid")?;
    deck.solver.to_solver().context("invalid [solver] settings")?;

    let params = &submission.params;
    let window = &submission.window;
    println!("{}: ok", args.deck.display());
    println!(
        "  cell        {} ({}), anode {:.1} µm, cathode {:.1} µm, radius {:.2} µm, fraction {:.2}",
        params.chemistry(),
        params.chemistry().profile().parameter_set,
        params.anode_thickness().get::<micrometer>(),
        params.cathode_thickness().get::<micrometer>(),
        params.particle_radius().get::<micrometer>(),
        params.active_material_fraction(),
    );
    let profile = params.chemistry().profile();
    println!(
        "  reactions   {}{}",
        profile.side_reaction_summary(),
        if profile.side_reactions { " (ignored by the lumped solver)" } else { "" },
    );
    println!(
        "  charge      {:.2} A ({:.2}C) at {:.1} °C ambient",
        params.charge_current().get::<ampere>(),
        params.c_rate(),
        params.ambient_temperature().get::<degree_celsius>(),
    );
    println!(
        "  simulation  {} steps of {} s, cut-off {:.2} V, from {:.0} % SOC",
        window.steps(),
        window.step.get::<second>(),
        window.voltage_cutoff.get::<volt>(),
        window.initial_soc * 100.0,
    );
    Ok(())
}
