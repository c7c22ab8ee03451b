use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use uom::si::{
    electric_potential::{millivolt, volt},
    temperature_interval, thermodynamic_temperature::degree_celsius,
};
use voltaic_cell::Chemistry;
use voltaic_safety::{ThresholdTable, Thresholds};

#[derive(Debug, Args)]
pub struct ThresholdsArgs {
    /// Only show this chemistry
    #[arg(long)]
    pub chemistry: Option<Chemistry>,

    /// Deck file supplying threshold overrides
    #[arg(short, long)]
    pub deck: Option<PathBuf>,
}

pub fn execute(args: &ThresholdsArgs) -> Result<()> {
    let deck = super::load_deck(args.deck.as_deref())?;
    let table = ThresholdTable::from_deck(&deck.thresholds).context("invalid [thresholds]")?;

    let chemistries = match args.chemistry {
        Some(chemistry) => vec![chemistry],
        None => Chemistry::ALL.to_vec(),
    };
    for chemistry in chemistries {
        print!("{}", describe(chemistry, table.get(chemistry)));
    }
    Ok(())
}

fn describe(chemistry: Chemistry, t: &Thresholds) -> String {
    format!(
        "{chemistry}\n  \
         plating floor       {:>8.1} mV  (warn within {:.1} mV)\n  \
         thermal ceiling     {:>8.1} °C  (warn within {:.1} K)\n  \
         overcharge ceiling  {:>8.2} V   (warn within {:.2} V)\n",
        t.plating_floor.get::<millivolt>(),
        t.plating_margin.get::<millivolt>(),
        t.thermal_ceiling.get::<degree_celsius>(),
        t.thermal_margin.get::<temperature_interval::kelvin>(),
        t.overcharge_ceiling.get::<volt>(),
        t.overcharge_margin.get::<volt>(),
    )
}
