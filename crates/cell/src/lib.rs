//! Cell parameters, simulation output, and the simulation adapter.
//!
//! A run starts from a [`ParameterDeck`] in display units (µm, °C, W/m²K),
//! which validates into an immutable [`ParameterSet`]. A [`Simulation`] hands
//! the parameter set to a [`CellSolver`] and checks that the returned
//! [`TimeSeries`] honours the output contract before passing it on.
//!
//! The electrochemical solve itself sits behind [`CellSolver`]. [`LumpedSolver`]
//! is a built-in reduced-order backend (single particle, lumped thermal) that
//! lets the rest of the toolkit run without an external physics engine.

mod chemistry;
mod deck;
mod error;
mod lumped;
mod params;
mod series;
mod solver;

pub use chemistry::{CathodeKind, Chemistry, ChemistryProfile, graphite_ocp};
pub use deck::{ChargeCurrentDeck, ParameterDeck, WindowDeck};
pub use error::{ConfigError, Electrode, SeriesError, SolverError};
pub use lumped::{
    CellFault, CellInput, CellOutput, CellState, CellStateRate, LumpedCell, LumpedSolver,
};
pub use params::{CellConfig, ChargeCurrent, ParameterSet};
pub use series::{Sample, TimeSeries, Variable};
pub use solver::{CellSolver, Simulation, SolveWindow};
