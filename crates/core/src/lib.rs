//! Core traits and types for the Voltaic cell-safety toolkit.
//!
//! This crate defines the shared abstractions that the transient solver, the
//! cell adapters, and the safety engine build on:
//!
//! - [`Model`]: a deterministic callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`OdeProblem`]: adapts a model to a time integrator by extracting a
//!   [`StepIntegrable`] state and its derivative
//! - [`constraint`]: numeric invariants enforced at construction time

pub mod constraint;
mod model;
mod observer;
mod problems;
mod step;

pub use observer::Observer;
pub use problems::OdeProblem;
pub use step::{DerivativeOf, StepIntegrable};
pub use {model::Model, model::Snapshot};
