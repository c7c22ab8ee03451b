use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;
use voltaic_cell::{ChargeCurrentDeck, Chemistry};
use voltaic_dash::{Dashboard, DeckFile, Session, render_failure};

/// Flags override the matching deck keys.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// TOML deck file; defaults apply without one
    #[arg(short, long)]
    pub deck: Option<PathBuf>,

    /// Cell chemistry (NMC, LFP, LCO)
    #[arg(long)]
    pub chemistry: Option<Chemistry>,

    /// Negative electrode thickness [µm]
    #[arg(long)]
    pub anode_thickness_um: Option<f64>,

    /// Positive electrode thickness [µm]
    #[arg(long)]
    pub cathode_thickness_um: Option<f64>,

    /// Negative particle radius [µm]
    #[arg(long)]
    pub particle_radius_um: Option<f64>,

    /// Negative electrode active material fraction
    #[arg(long)]
    pub active_material_fraction: Option<f64>,

    /// Total heat transfer coefficient [W/m²K]
    #[arg(long)]
    pub cooling_coefficient: Option<f64>,

    /// Ambient temperature [°C]
    #[arg(long, allow_negative_numbers = true)]
    pub ambient_temperature_c: Option<f64>,

    /// Charge current [A]
    #[arg(long, conflicts_with = "c_rate")]
    pub current_a: Option<f64>,

    /// Charge current as a C-rate
    #[arg(long)]
    pub c_rate: Option<f64>,

    /// Charge duration [s]
    #[arg(long)]
    pub duration_s: Option<f64>,

    /// Integration step [s]
    #[arg(long)]
    pub step_s: Option<f64>,

    /// Upper voltage cut-off [V]
    #[arg(long)]
    pub voltage_cutoff_v: Option<f64>,

    /// State of charge at the start of the charge
    #[arg(long)]
    pub initial_soc: Option<f64>,

    /// Electrode contact resistance [Ω·m²]
    #[arg(long)]
    pub contact_resistance_ohm_m2: Option<f64>,

    /// Print the dashboard as JSON
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    /// Writes every given flag into `deck`.
    pub fn apply(&self, deck: &mut DeckFile) {
        let cell = &mut deck.cell;
        set(&mut cell.chemistry, self.chemistry);
        set(&mut cell.anode_thickness_um, self.anode_thickness_um);
        set(&mut cell.cathode_thickness_um, self.cathode_thickness_um);
        set(&mut cell.particle_radius_um, self.particle_radius_um);
        set(&mut cell.active_material_fraction, self.active_material_fraction);
        set(&mut cell.cooling_coefficient, self.cooling_coefficient);
        set(&mut cell.ambient_temperature_c, self.ambient_temperature_c);
        set(
            &mut cell.charge_current,
            self.current_a.map(ChargeCurrentDeck::Amperes),
        );
        set(&mut cell.charge_current, self.c_rate.map(ChargeCurrentDeck::CRate));

        let window = &mut deck.simulation;
        set(&mut window.duration_s, self.duration_s);
        set(&mut window.step_s, self.step_s);
        set(&mut window.voltage_cutoff_v, self.voltage_cutoff_v);
        set(&mut window.initial_soc, self.initial_soc);

        set(
            &mut deck.solver.contact_resistance_ohm_m2,
            self.contact_resistance_ohm_m2,
        );
    }
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

pub fn execute(args: &RunArgs) -> Result<()> {
    let mut deck = super::load_deck(args.deck.as_deref())?;
    args.apply(&mut deck);

    let solver = deck.solver.to_solver().context("invalid [solver] settings")?;
    let mut session = Session::new(solver);

    let run = match session.submit(&deck) {
        Ok(run) => run,
        Err(err) => {
            if err.is_solver_crash() {
                eprint!("{}", render_failure(&err));
            }
            return Err(err).context("charge run failed");
        }
    };
    info!(samples = run.series().len(), "rendering dashboard");

    let dashboard = Dashboard::build(run);
    if args.json {
        println!("{}", dashboard.to_json()?);
    } else {
        print!("{}", dashboard.render_text());
    }
    Ok(())
}
