use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;
use voltaic_cell::{Chemistry, TimeSeries};
use voltaic_dash::SafetyPanel;
use voltaic_safety::{SafetyEngine, SafetyReport, SafetyVerdict, ThresholdTable, Thresholds};

#[derive(Debug, Args)]
pub struct AssessArgs {
    /// JSON time series to assess
    #[arg(short, long)]
    pub series: PathBuf,

    /// Chemistry whose thresholds apply [default: the deck's, or NMC]
    #[arg(long)]
    pub chemistry: Option<Chemistry>,

    /// Deck file supplying threshold overrides
    #[arg(short, long)]
    pub deck: Option<PathBuf>,

    /// Print the safety panel as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: &AssessArgs) -> Result<()> {
    let deck = super::load_deck(args.deck.as_deref())?;
    let chemistry = args.chemistry.unwrap_or(deck.cell.chemistry);
    let table = ThresholdTable::from_deck(&deck.thresholds).context("invalid [thresholds]")?;

    let text = fs::read_to_string(&args.series)
        .with_context(|| format!("cannot read series {}", args.series.display()))?;
    debug!(%chemistry, "assessing external series");
    let verdict = assess_series(&text, *table.get(chemistry))?;
    let panel = SafetyPanel::from_report(&SafetyReport {
        verdict,
        advisories: Vec::new(),
    });

    if args.json {
        println!("{}", serde_json::to_string_pretty(&panel)?);
    } else {
        print!("{panel}");
    }
    Ok(())
}

/// Parses and assesses a JSON series.
///
/// The engine runs first so ragged or unordered rule channels surface as a
/// `DataError`; the remaining series checks (zero start, channels no rule
/// reads) follow.
fn assess_series(json: &str, thresholds: Thresholds) -> Result<SafetyVerdict> {
    let series: TimeSeries = serde_json::from_str(json).context("series is not valid JSON")?;
    let verdict = SafetyEngine::new(thresholds)
        .assess(&series)
        .context("series cannot be assessed")?;
    series.validate().context("series is malformed")?;
    debug!(samples = series.len(), "external series assessed");
    Ok(verdict)
}
