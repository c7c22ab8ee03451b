//! Runs, sessions, and the dashboard layout.
//!
//! A [`DeckFile`] describes a run. [`Session::submit`] validates it,
//! simulates it, and assesses the result, keeping the latest successful
//! [`Run`]. [`Dashboard::build`] turns a run into layout data (metric cards,
//! eight plot panels, and the safety panel) that serializes to JSON or
//! renders as text.

mod dashboard;
mod deck;
mod render;
mod run;
mod session;

pub use dashboard::{Dashboard, MetricCard, Panel, SafetyPanel, TIME_AXIS_LABEL, TITLE};
pub use deck::{DeckFile, SolverDeck, Submission};
pub use render::{CRASH_HEADLINE, CRASH_MESSAGE, render_failure};
pub use run::{Run, SubmitError};
pub use session::Session;
