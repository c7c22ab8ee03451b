//! Transient solvers for the Voltaic cell-safety toolkit.
//!
//! Solvers in this crate integrate any [`Model`] paired with an [`OdeProblem`]
//! and report every accepted step to an [`Observer`], which may stop the run
//! early (for example at a voltage cut-off).
//!
//! [`Model`]: voltaic_core::Model
//! [`OdeProblem`]: voltaic_core::OdeProblem
//! [`Observer`]: voltaic_core::Observer

pub mod transient;
