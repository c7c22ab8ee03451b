use serde::Serialize;
use tracing::warn;
use uom::si::thermodynamic_temperature::degree_celsius;
use voltaic_cell::{ParameterSet, TimeSeries};

use crate::{DataError, Overall, SafetyEngine, SafetyVerdict, ThresholdTable};

/// A hazard read from the operating conditions rather than the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Advisory {
    /// Charging below 0 °C ambient.
    SubZeroAmbient { ambient_c: f64 },
}

impl Advisory {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Advisory::SubZeroAmbient { .. } => "Sub-zero hazard: High risk of lithium plating.",
        }
    }
}

/// The verdict for a run together with its advisories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetyReport {
    pub verdict: SafetyVerdict,
    pub advisories: Vec<Advisory>,
}

impl SafetyReport {
    /// Like [`SafetyVerdict::overall`], except that any advisory makes the
    /// run unsafe.
    #[must_use]
    pub fn overall(&self) -> Overall {
        if self.advisories.is_empty() {
            self.verdict.overall()
        } else {
            Overall::Unsafe
        }
    }

    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.overall() == Overall::Safe
    }

    /// Violation messages: thermal first, then advisories, then plating and
    /// overcharge.
    #[must_use]
    pub fn reasons(&self) -> Vec<String> {
        let mut reasons = Vec::new();
        reasons.extend(self.verdict.thermal.reason());
        reasons.extend(self.advisories.iter().map(|a| a.message().to_owned()));
        reasons.extend(self.verdict.plating.reason());
        reasons.extend(self.verdict.overcharge.reason());
        reasons
    }
}

/// Advisories raised by the operating conditions alone.
#[must_use]
pub fn advisories(params: &ParameterSet) -> Vec<Advisory> {
    let ambient_c = params.ambient_temperature().get::<degree_celsius>();
    if ambient_c < 0.0 {
        vec![Advisory::SubZeroAmbient { ambient_c }]
    } else {
        Vec::new()
    }
}

/// Assesses a run's series with the thresholds for its chemistry.
///
/// # Errors
///
/// Returns a [`DataError`] if the series cannot be assessed.
pub fn assess_run(
    table: &ThresholdTable,
    params: &ParameterSet,
    series: &TimeSeries,
) -> Result<SafetyReport, DataError> {
    let engine = SafetyEngine::new(*table.get(params.chemistry()));
    let verdict = engine.assess(series)?;
    let advisories = advisories(params);
    for advisory in &advisories {
        warn!(?advisory, "{}", advisory.message());
    }

    Ok(SafetyReport {
        verdict,
        advisories,
    })
}
