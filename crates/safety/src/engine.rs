use tracing::{debug, info};
use uom::si::{electric_potential::volt, temperature_interval, thermodynamic_temperature::kelvin};
use voltaic_cell::{TimeSeries, Variable};
use voltaic_core::Model;

use crate::{
    DataError, Overall, RuleKind, RuleVerdict, SafetyVerdict, Thresholds,
    rules::{self, Limit},
};

/// Assesses a time series against one set of [`Thresholds`].
///
/// Assessment is a pure function of the series: the engine holds no state
/// between calls, and evaluating the same series twice yields identical
/// verdicts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SafetyEngine {
    thresholds: Thresholds,
}

impl SafetyEngine {
    #[must_use]
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    #[must_use]
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Runs all three rules over `series`.
    ///
    /// A series with no samples is indeterminate for every rule, whatever
    /// channels it carries.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] if a rule's channel is missing, ragged, or
    /// holds a non-finite value, or if the time axis is not finite and
    /// strictly increasing.
    pub fn assess(&self, series: &TimeSeries) -> Result<SafetyVerdict, DataError> {
        let time = series.time();
        if !time.is_empty() {
            check_time(time)?;
        }

        let verdict = SafetyVerdict {
            plating: self.rule(RuleKind::Plating, series)?,
            thermal: self.rule(RuleKind::ThermalRunaway, series)?,
            overcharge: self.rule(RuleKind::Overcharge, series)?,
        };

        for rule in verdict.rules() {
            debug!(
                rule = %rule.rule,
                status = ?rule.status,
                severity = ?rule.severity,
                value = rule.reported.map(|p| p.value),
                threshold = rule.threshold,
                "rule evaluated"
            );
        }
        let overall = verdict.overall();
        if overall == Overall::Safe {
            debug!(samples = series.len(), "series assessed safe");
        } else {
            info!(samples = series.len(), ?overall, "series assessed");
        }

        Ok(verdict)
    }

    fn limit(&self, rule: RuleKind) -> Limit {
        let t = &self.thresholds;
        match rule {
            RuleKind::Plating => Limit {
                threshold: t.plating_floor.get::<volt>(),
                margin: t.plating_margin.get::<volt>(),
            },
            RuleKind::ThermalRunaway => Limit {
                threshold: t.thermal_ceiling.get::<kelvin>(),
                margin: t.thermal_margin.get::<temperature_interval::kelvin>(),
            },
            RuleKind::Overcharge => Limit {
                threshold: t.overcharge_ceiling.get::<volt>(),
                margin: t.overcharge_margin.get::<volt>(),
            },
        }
    }

    fn rule(&self, rule: RuleKind, series: &TimeSeries) -> Result<RuleVerdict, DataError> {
        let time = series.time();
        let values: &[f64] = if time.is_empty() {
            &[]
        } else {
            channel(series, rule.variable())?
        };
        Ok(rules::evaluate(rule, time, values, self.limit(rule)))
    }
}

impl Model for SafetyEngine {
    type Input = TimeSeries;
    type Output = SafetyVerdict;
    type Error = DataError;

    fn call(&self, series: &TimeSeries) -> Result<SafetyVerdict, DataError> {
        self.assess(series)
    }
}

fn check_time(time: &[f64]) -> Result<(), DataError> {
    if let Some(index) = time.iter().position(|t| !t.is_finite()) {
        return Err(DataError::NonFiniteTime { index });
    }
    if let Some(index) = time.windows(2).position(|pair| pair[1] <= pair[0]) {
        return Err(DataError::NonMonotonicTime { index: index + 1 });
    }
    Ok(())
}

fn channel(series: &TimeSeries, variable: Variable) -> Result<&[f64], DataError> {
    let values = series
        .channel(variable)
        .ok_or(DataError::MissingVariable(variable))?;
    if values.len() != series.len() {
        return Err(DataError::LengthMismatch {
            variable,
            expected: series.len(),
            found: values.len(),
        });
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(DataError::NonFinite { variable, index });
    }
    Ok(values)
}
