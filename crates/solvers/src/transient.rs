//! Time integrators for ODE problems.
//!
//! - [`euler`]: explicit forward Euler with observer-driven early stopping

pub mod euler;
