//! The three rules, each a single pass over one channel.

use crate::{Point, RuleKind, RuleStatus, RuleVerdict, Severity};

/// A threshold and its warning margin, in channel units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Limit {
    pub threshold: f64,
    pub margin: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    /// Values below the threshold violate it.
    Below,
    /// Values above the threshold violate it.
    Above,
}

#[derive(Debug, Default)]
struct Scan {
    /// Earliest most extreme sample.
    extreme: Option<Point>,
    /// First sample strictly across the threshold.
    onset: Option<Point>,
}

fn scan(times: &[f64], values: &[f64], threshold: f64, side: Side) -> Scan {
    let beyond = |a: f64, b: f64| match side {
        Side::Below => a < b,
        Side::Above => a > b,
    };

    let mut found = Scan::default();
    for (index, (&time, &value)) in times.iter().zip(values).enumerate() {
        let point = Point { index, time, value };
        if found.extreme.is_none_or(|extreme| beyond(value, extreme.value)) {
            found.extreme = Some(point);
        }
        if found.onset.is_none() && beyond(value, threshold) {
            found.onset = Some(point);
        }
    }
    found
}

/// Evaluates `rule` over a channel and its time axis.
///
/// Callers guarantee both slices have the same length and hold finite
/// values. An empty channel yields an indeterminate verdict.
pub(crate) fn evaluate(rule: RuleKind, time: &[f64], values: &[f64], limit: Limit) -> RuleVerdict {
    let side = match rule {
        RuleKind::Plating => Side::Below,
        RuleKind::ThermalRunaway | RuleKind::Overcharge => Side::Above,
    };

    let Scan { extreme, onset } = scan(time, values, limit.threshold, side);
    let Some(extreme) = extreme else {
        return RuleVerdict::indeterminate(rule, limit.threshold);
    };

    let triggered = onset.is_some();
    let reported = match (rule, onset) {
        (RuleKind::Overcharge, Some(first)) => first,
        _ => extreme,
    };
    let headroom = match side {
        Side::Below => extreme.value - limit.threshold,
        Side::Above => limit.threshold - extreme.value,
    };
    let severity = if triggered {
        Severity::Critical
    } else if headroom <= limit.margin {
        Severity::Advisory
    } else {
        Severity::Nominal
    };

    RuleVerdict {
        rule,
        status: if triggered {
            RuleStatus::Triggered
        } else {
            RuleStatus::NotTriggered
        },
        threshold: limit.threshold,
        reported: Some(reported),
        onset,
        severity,
    }
}
