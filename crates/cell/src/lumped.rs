//! Built-in reduced-order solver.
//!
//! [`LumpedCell`] is integrated with the forward Euler solver from
//! `voltaic-solvers`, stopping early once the terminal voltage reaches the
//! window's cut-off. Each accepted step becomes one sample of the returned
//! [`TimeSeries`].

mod model;
mod state;

#[cfg(test)]
mod tests;

pub use model::{CellFault, CellInput, CellOutput, LumpedCell};
pub use state::{CellState, CellStateRate};

use tracing::debug;
use uom::si::{
    electric_potential::volt, f64::ElectricPotential, thermodynamic_temperature::kelvin,
    time::second,
};
use voltaic_core::Snapshot;
use voltaic_solvers::transient::euler;

use crate::{CellSolver, ParameterSet, SolveWindow, SolverError, TimeSeries, Variable};

/// [`CellSolver`] backed by [`LumpedCell`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LumpedSolver {
    contact_resistance: f64,
}

impl LumpedSolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a contact resistance in Ω·m² (zero by default).
    #[must_use]
    pub fn with_contact_resistance(mut self, ohm_square_meter: f64) -> Self {
        self.contact_resistance = ohm_square_meter;
        self
    }
}

impl CellSolver for LumpedSolver {
    fn name(&self) -> &str {
        "lumped-spm"
    }

    fn solve(&self, params: &ParameterSet, window: &SolveWindow) -> Result<TimeSeries, SolverError> {
        let steps = window.steps();
        if steps > SolveWindow::MAX_STEPS {
            return Err(SolverError::ParameterOutOfRange(format!(
                "window needs {steps} steps, more than the {} supported",
                SolveWindow::MAX_STEPS
            )));
        }
        let cell = LumpedCell::new(params, self.contact_resistance)?;
        let initial = cell.initial_input(window.initial_soc);
        let cutoff = window.voltage_cutoff;

        let solution = euler::solve(
            &cell,
            &cell,
            initial,
            window.step,
            steps,
            |event: &euler::Event<CellInput, CellOutput>| {
                (event.snapshot.output.terminal_voltage >= cutoff)
                    .then_some(euler::Action::StopEarly)
            },
        )
        .map_err(|err| solver_error(&err, window))?;

        debug!(
            status = ?solution.status,
            steps = solution.steps,
            cutoff_v = cutoff.get::<volt>(),
            "lumped integration finished"
        );

        into_series(&solution.history)
    }
}

fn solver_error(err: &euler::Error, window: &SolveWindow) -> SolverError {
    #[allow(clippy::cast_precision_loss)]
    let time_s = err.step() as f64 * window.step.get::<second>();
    match err.downcast_ref::<CellFault>() {
        Some(CellFault::Saturated(electrode)) => SolverError::Saturated {
            time_s,
            electrode: *electrode,
        },
        Some(CellFault::Diverged) => SolverError::Diverged { time_s },
        None => SolverError::Backend(err.to_string()),
    }
}

fn into_series(history: &[Snapshot<CellInput, CellOutput>]) -> Result<TimeSeries, SolverError> {
    let volts = |f: fn(&CellOutput) -> ElectricPotential| -> Vec<f64> {
        history.iter().map(|s| f(&s.output).get::<volt>()).collect()
    };
    let values = |f: fn(&CellOutput) -> f64| -> Vec<f64> {
        history.iter().map(|s| f(&s.output)).collect()
    };

    let time = history
        .iter()
        .map(|s| s.input.time.get::<second>())
        .collect();
    let temperature = history
        .iter()
        .map(|s| s.input.state.temperature.get::<kelvin>())
        .collect();

    let series = TimeSeries::new(time)?
        .with_channel(Variable::TerminalVoltage, volts(|o| o.terminal_voltage))?
        .with_channel(Variable::CellTemperature, temperature)?
        .with_channel(
            Variable::ElectrolyteConcentration,
            values(|o| o.electrolyte_concentration),
        )?
        .with_channel(
            Variable::InterfacialCurrentDensity,
            values(|o| o.interfacial_current_density),
        )?
        .with_channel(
            Variable::AnodeSurfacePotential,
            volts(|o| o.anode_surface_potential),
        )?
        .with_channel(Variable::CathodePotential, volts(|o| o.cathode_potential))?
        .with_channel(
            Variable::AnodeSurfaceConcentration,
            values(|o| o.anode_surface_concentration),
        )?
        .with_channel(
            Variable::CathodeSurfaceConcentration,
            values(|o| o.cathode_surface_concentration),
        )?;

    Ok(series)
}
