use thiserror::Error;
use tracing::info;
use voltaic_cell::{
    CellSolver, ConfigError, ParameterSet, Simulation, SolveWindow, SolverError, TimeSeries,
};
use voltaic_safety::{DataError, SafetyReport, ThresholdTable, assess_run};

/// Why a submission produced no run.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("invalid deck: {0}")]
    Config(#[from] ConfigError),

    #[error("simulation failed: {0}")]
    Solver(#[from] SolverError),

    #[error("assessment failed: {0}")]
    Data(#[from] DataError),
}

impl SubmitError {
    /// Returns `true` if the physics solve itself broke down, as opposed to
    /// rejecting its inputs or producing unusable output.
    #[must_use]
    pub fn is_solver_crash(&self) -> bool {
        matches!(
            self,
            SubmitError::Solver(SolverError::Diverged { .. } | SolverError::Saturated { .. })
        )
    }
}

/// One parameter set, the series simulated from it, and its safety report.
///
/// A run can only be built by [`Run::execute`], so its report always
/// describes its own series.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    solver: String,
    params: ParameterSet,
    window: SolveWindow,
    series: TimeSeries,
    report: SafetyReport,
}

impl Run {
    /// Simulates `params` and assesses the resulting series.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Solver`] if the simulation fails and
    /// [`SubmitError::Data`] if its output cannot be assessed.
    pub fn execute<S: CellSolver>(
        simulation: &Simulation<S>,
        thresholds: &ThresholdTable,
        params: ParameterSet,
    ) -> Result<Self, SubmitError> {
        let series = simulation.run(&params)?;
        let report = assess_run(thresholds, &params, &series)?;

        info!(
            chemistry = %params.chemistry(),
            samples = series.len(),
            overall = ?report.overall(),
            "run complete"
        );

        Ok(Self {
            solver: simulation.solver().name().to_owned(),
            params,
            window: *simulation.window(),
            series,
            report,
        })
    }

    /// Name of the solver that produced the series.
    #[must_use]
    pub fn solver(&self) -> &str {
        &self.solver
    }

    #[must_use]
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    #[must_use]
    pub fn window(&self) -> &SolveWindow {
        &self.window
    }

    #[must_use]
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    #[must_use]
    pub fn report(&self) -> &SafetyReport {
        &self.report
    }
}
