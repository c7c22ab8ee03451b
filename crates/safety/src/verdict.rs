use std::fmt;

use serde::Serialize;
use voltaic_cell::Variable;

/// One of the three charging safety rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Plating,
    ThermalRunaway,
    Overcharge,
}

impl RuleKind {
    pub const ALL: [RuleKind; 3] = [
        RuleKind::Plating,
        RuleKind::ThermalRunaway,
        RuleKind::Overcharge,
    ];

    /// The series channel the rule scans.
    #[must_use]
    pub fn variable(self) -> Variable {
        match self {
            RuleKind::Plating => Variable::AnodeSurfacePotential,
            RuleKind::ThermalRunaway => Variable::CellTemperature,
            RuleKind::Overcharge => Variable::TerminalVoltage,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RuleKind::Plating => "Lithium plating",
            RuleKind::ThermalRunaway => "Thermal runaway",
            RuleKind::Overcharge => "Overcharge",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    Triggered,
    NotTriggered,
    /// The series held no samples to judge.
    Indeterminate,
}

/// How close a rule came to its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Nominal,
    /// Within the warning margin but not across the threshold.
    Advisory,
    Critical,
}

/// A sample picked out of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub index: usize,
    /// Seconds since the start of the run.
    pub time: f64,
    pub value: f64,
}

/// Outcome of one rule over one series.
///
/// `threshold` and point values are in the units of the scanned channel
/// (volts, or kelvin for the thermal rule).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RuleVerdict {
    pub rule: RuleKind,
    pub status: RuleStatus,
    pub threshold: f64,
    /// The extreme sample for plating and thermal runaway, the first
    /// violating sample for a triggered overcharge.
    pub reported: Option<Point>,
    /// The first sample across the threshold.
    pub onset: Option<Point>,
    pub severity: Severity,
}

impl RuleVerdict {
    pub(crate) fn indeterminate(rule: RuleKind, threshold: f64) -> Self {
        Self {
            rule,
            status: RuleStatus::Indeterminate,
            threshold,
            reported: None,
            onset: None,
            severity: Severity::Nominal,
        }
    }

    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.status == RuleStatus::Triggered
    }

    /// Violation message for a triggered rule.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        if !self.is_triggered() {
            return None;
        }
        let value = self.reported?.value;
        Some(match self.rule {
            RuleKind::ThermalRunaway => format!(
                "Thermal Violation: {:.1}°C (Limit: {}°C).",
                value - KELVIN_OFFSET,
                compact(self.threshold - KELVIN_OFFSET)
            ),
            RuleKind::Plating => {
                format!("Plating Risk: Anode Potential at {:.1} mV.", value * 1000.0)
            }
            RuleKind::Overcharge => format!(
                "Overvoltage: {value:.2}V (Limit: {:.1}V).",
                self.threshold
            ),
        })
    }
}

const KELVIN_OFFSET: f64 = 273.15;

/// Formats whole numbers without a fractional part.
fn compact(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Summary of a verdict or report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Overall {
    Safe,
    Unsafe,
    Indeterminate,
}

/// Verdicts of all three rules over one time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SafetyVerdict {
    pub plating: RuleVerdict,
    pub thermal: RuleVerdict,
    pub overcharge: RuleVerdict,
}

impl SafetyVerdict {
    /// Rule verdicts in reporting order: thermal, plating, overcharge.
    pub fn rules(&self) -> impl Iterator<Item = &RuleVerdict> {
        [&self.thermal, &self.plating, &self.overcharge].into_iter()
    }

    #[must_use]
    pub fn rule(&self, kind: RuleKind) -> &RuleVerdict {
        match kind {
            RuleKind::Plating => &self.plating,
            RuleKind::ThermalRunaway => &self.thermal,
            RuleKind::Overcharge => &self.overcharge,
        }
    }

    /// `Unsafe` if any rule triggered, otherwise `Indeterminate` if any rule
    /// could not be judged, otherwise `Safe`.
    #[must_use]
    pub fn overall(&self) -> Overall {
        if self.rules().any(RuleVerdict::is_triggered) {
            Overall::Unsafe
        } else if self
            .rules()
            .any(|rule| rule.status == RuleStatus::Indeterminate)
        {
            Overall::Indeterminate
        } else {
            Overall::Safe
        }
    }

    /// One message per triggered rule.
    #[must_use]
    pub fn reasons(&self) -> Vec<String> {
        self.rules().filter_map(RuleVerdict::reason).collect()
    }

    /// The most severe rule outcome.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.rules()
            .map(|rule| rule.severity)
            .max()
            .unwrap_or(Severity::Nominal)
    }
}
