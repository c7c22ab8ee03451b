use tracing::{debug, info, warn};
use uom::si::{
    electric_current::ampere,
    electric_potential::volt,
    f64::{ElectricPotential, Time},
    time::second,
};

use crate::{ParameterSet, SolverError, TimeSeries};

/// Time window and stop conditions for one charge simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveWindow {
    pub duration: Time,
    pub step: Time,
    /// Upper voltage cut-off; the charge stops once it is reached.
    pub voltage_cutoff: ElectricPotential,
    /// State of charge at the start of the charge.
    pub initial_soc: f64,
}

impl SolveWindow {
    /// Largest number of steps a window may ask for; one million one-second
    /// steps is roughly eleven and a half days of charging.
    pub const MAX_STEPS: usize = 1_000_000;

    /// Number of integration steps needed to cover the window.
    ///
    /// Ratios too large for `usize` saturate; decks reject anything above
    /// [`Self::MAX_STEPS`] before it gets here.
    #[must_use]
    pub fn steps(&self) -> usize {
        let ratio = (self.duration.get::<second>() / self.step.get::<second>()).round();
        if ratio.is_finite() && ratio > 0.0 {
            ratio as usize
        } else {
            0
        }
    }
}

impl Default for SolveWindow {
    /// A 15 minute charge sampled every second, cut off at 5.0 V from 10 % SOC.
    fn default() -> Self {
        Self {
            duration: Time::new::<second>(900.0),
            step: Time::new::<second>(1.0),
            voltage_cutoff: ElectricPotential::new::<volt>(5.0),
            initial_soc: 0.1,
        }
    }
}

/// A physics backend that turns cell parameters into sampled output.
///
/// Implementations wrap an electrochemical solver (a full DFN model, or the
/// built-in [`LumpedSolver`](crate::LumpedSolver)) and are treated as black
/// boxes by the rest of the toolkit. A solver must be deterministic for a
/// given parameter set and window.
pub trait CellSolver {
    /// Short name used in logs and reports.
    fn name(&self) -> &str;

    /// Runs a charge simulation.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the solver rejects the parameters or fails
    /// to converge.
    fn solve(&self, params: &ParameterSet, window: &SolveWindow) -> Result<TimeSeries, SolverError>;
}

impl<S: CellSolver + ?Sized> CellSolver for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(&self, params: &ParameterSet, window: &SolveWindow) -> Result<TimeSeries, SolverError> {
        (**self).solve(params, window)
    }
}

/// The simulation adapter: binds a solver to a window and checks its output.
///
/// Every call to [`run`](Simulation::run) invokes the solver once; failures
/// are surfaced directly, without retries.
#[derive(Debug, Clone)]
pub struct Simulation<S> {
    solver: S,
    window: SolveWindow,
}

impl<S: CellSolver> Simulation<S> {
    /// Creates an adapter for `solver` over `window`.
    pub fn new(solver: S, window: SolveWindow) -> Self {
        Self { solver, window }
    }

    #[must_use]
    pub fn window(&self) -> &SolveWindow {
        &self.window
    }

    #[must_use]
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Runs the solver for `params` and returns its time series.
    ///
    /// # Errors
    ///
    /// Returns the solver's [`SolverError`] unchanged, or
    /// [`SolverError::MalformedOutput`] if the series does not start at zero,
    /// is not strictly increasing in time, or has ragged channels.
    pub fn run(&self, params: &ParameterSet) -> Result<TimeSeries, SolverError> {
        info!(
            solver = self.solver.name(),
            chemistry = %params.chemistry(),
            current_a = params.charge_current().get::<ampere>(),
            duration_s = self.window.duration.get::<second>(),
            "starting charge simulation"
        );

        let series = self
            .solver
            .solve(params, &self.window)
            .inspect_err(|err| warn!(solver = self.solver.name(), %err, "solver failed"))?;

        series.validate()?;

        debug!(
            samples = series.len(),
            end_s = series.time().last().copied().unwrap_or_default(),
            "simulation finished"
        );
        Ok(series)
    }
}
