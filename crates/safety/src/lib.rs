//! Rule-based charging safety assessment.
//!
//! A [`SafetyEngine`] scans a [`TimeSeries`](voltaic_cell::TimeSeries) for
//! three hazards, each in a single linear pass:
//!
//! - lithium plating: the anode surface potential drops below a floor
//! - thermal runaway: the cell temperature rises above a ceiling
//! - overcharge: the terminal voltage rises above a ceiling
//!
//! The engine is a [`Model`](voltaic_core::Model) from series to
//! [`SafetyVerdict`], so assessing the same series twice always agrees.
//! [`assess_run`] adds the advisories that depend on operating conditions
//! rather than the series itself.

mod engine;
mod error;
mod report;
mod rules;
mod thresholds;
mod verdict;

pub use engine::SafetyEngine;
pub use error::DataError;
pub use report::{Advisory, SafetyReport, advisories, assess_run};
pub use thresholds::{ThresholdDeck, ThresholdOverrides, ThresholdTable, Thresholds};
pub use verdict::{Overall, Point, RuleKind, RuleStatus, RuleVerdict, SafetyVerdict, Severity};
