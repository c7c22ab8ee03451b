//! Plain-text rendering for terminals.

use std::fmt::{self, Write as _};

use voltaic_cell::Variable;
use voltaic_safety::{RuleKind, RuleStatus, RuleVerdict};

use crate::{Dashboard, SafetyPanel, SubmitError};

pub const CRASH_HEADLINE: &str = "Physics Divergence";
pub const CRASH_MESSAGE: &str =
    "SOLVER CRASH: Physical limits exceeded (Mass transport or Stoichiometric saturation).";

impl Dashboard {
    /// Renders the dashboard as a terminal summary.
    #[must_use]
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        let duration = self.time_minutes.last().copied().unwrap_or_default();
        writeln!(
            f,
            "{} ({}) | {} | {} samples over {duration:.1} min",
            self.chemistry,
            self.parameter_set,
            self.solver,
            self.time_minutes.len(),
        )?;
        writeln!(f)?;

        for card in &self.metrics {
            writeln!(f, "  {:<18}{}", card.label, card.display)?;
        }
        writeln!(f)?;

        writeln!(f, "Internal Electrochemical State Analysis")?;
        for panel in &self.panels {
            let first = panel.values.first();
            let last = panel.values.last();
            match (first, last) {
                (Some(first), Some(last)) => {
                    let (min, max) = panel
                        .values
                        .iter()
                        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                            (lo.min(v), hi.max(v))
                        });
                    let precision = precision(panel.variable);
                    writeln!(
                        f,
                        "  {:<20}{:<16}{first:>12.precision$} -> {last:<12.precision$} \
                         [{min:.precision$}, {max:.precision$}]",
                        panel.title, panel.y_label,
                    )?;
                }
                _ => writeln!(f, "  {:<20}{:<16}{:>12}", panel.title, panel.y_label, "n/a")?,
            }
        }
        writeln!(f)?;

        writeln!(f, "BMS Safety Assessment")?;
        write!(f, "{}", self.safety)
    }
}

impl fmt::Display for SafetyPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.headline)?;
        for reason in &self.reasons {
            writeln!(f, "  - {reason}")?;
        }
        for rule in &self.rules {
            writeln!(f, "  {}", rule_line(rule))?;
        }
        Ok(())
    }
}

fn precision(variable: Variable) -> usize {
    match variable {
        Variable::TerminalVoltage | Variable::AnodeSurfacePotential | Variable::CathodePotential => 4,
        Variable::CellTemperature | Variable::InterfacialCurrentDensity => 2,
        Variable::ElectrolyteConcentration
        | Variable::AnodeSurfaceConcentration
        | Variable::CathodeSurfaceConcentration => 1,
    }
}

fn rule_line(rule: &RuleVerdict) -> String {
    let status = match rule.status {
        RuleStatus::Triggered => "TRIGGERED",
        RuleStatus::NotTriggered => "ok",
        RuleStatus::Indeterminate => "no data",
    };
    let extreme = match rule.rule {
        RuleKind::Plating => "min",
        RuleKind::ThermalRunaway | RuleKind::Overcharge => "max",
    };
    let unit = rule.rule.variable().unit();

    let mut line = format!("{:<16}{status:<10}", rule.rule.label());
    if let Some(point) = rule.reported {
        let label = if rule.is_triggered() && rule.rule == RuleKind::Overcharge {
            "first"
        } else {
            extreme
        };
        let _ = write!(
            line,
            "{label} {:.4} {unit} at {:.1} min, ",
            point.value,
            point.time / 60.0
        );
    }
    let _ = write!(
        line,
        "limit {:.4} {unit}, severity {:?}",
        rule.threshold, rule.severity
    );
    line
}

/// Renders a failed submission; solver breakdowns get the crash banner.
#[must_use]
pub fn render_failure(err: &SubmitError) -> String {
    if err.is_solver_crash() {
        format!("{CRASH_HEADLINE}\n{CRASH_MESSAGE}\n  {err}\n")
    } else {
        format!("{err}\n")
    }
}
