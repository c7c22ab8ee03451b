//! Forward Euler solver for ODE problems.
//!
//! Steps a model forward in time using explicit Euler:
//!
//! ```text
//! state_{n+1} = state_n + derivative_n * dt
//! ```
//!
//! Every accepted snapshot is kept in the returned [`Solution`], so the history
//! doubles as the sampled time series of the run.
//!
//! # Example
//!
//! ```ignore
//! use voltaic_solvers::transient::euler;
//!
//! let solution = euler::solve(&cell, &cell, initial, dt, steps, |event: &euler::Event<_, _>| {
//!     (event.snapshot.output.terminal_voltage >= cutoff).then_some(euler::Action::StopEarly)
//! })?;
//! ```

mod control;
mod error;
mod solution;

pub use control::{Action, Event};
pub use error::Error;
pub use solution::{Solution, Status};

use voltaic_core::{Model, Observer, OdeProblem, Snapshot, StepIntegrable};

/// History slots reserved up front; longer runs grow the buffer as they go.
const PREALLOCATED_STEPS: usize = 4096;

/// Integrates an ODE problem using forward Euler.
///
/// The initial input is evaluated and observed as step 0. Each later step
/// advances the state by `derivative * dt`, rebuilds and finalizes the input,
/// evaluates the model, and hands the new snapshot to `observer`. Returning
/// [`Action::StopEarly`] ends the run with that snapshot kept.
///
/// # Errors
///
/// Returns an error if the model or problem fails at any step. The error
/// carries the step number so callers can map it back to simulation time.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    let output = model.call(&initial).map_err(|err| Error::model(0, err))?;
    let mut current = Snapshot::new(initial, output);
    let mut history = Vec::with_capacity(steps.saturating_add(1).min(PREALLOCATED_STEPS));

    for step in 0..=steps {
        if step > 0 {
            current = advance(model, problem, &current, &dt, step)?;
        }

        let event = Event {
            step,
            snapshot: current,
        };
        let action = observer.observe(&event);
        current = event.snapshot;
        history.push(current.clone());

        if action == Some(Action::StopEarly) {
            return Ok(Solution::new(Status::Stopped, history));
        }
    }

    Ok(Solution::new(Status::Finished, history))
}

/// Takes one explicit step from `current`.
fn advance<M, P>(
    model: &M,
    problem: &P,
    current: &Snapshot<M::Input, M::Output>,
    dt: &P::Delta,
    step: usize,
) -> Result<Snapshot<M::Input, M::Output>, Error>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
{
    let fail = |err| Error::problem(step, err);

    let state = problem.state(&current.input).map_err(fail)?;
    let derivative = problem
        .derivative(&current.input, &current.output)
        .map_err(fail)?;
    let stepped = state.step(derivative, dt.clone());

    let input = problem
        .build_input(&current.input, &stepped, dt)
        .and_then(|input| problem.finalize_step(input, &current.input, &current.output, dt))
        .map_err(fail)?;
    let output = model.call(&input).map_err(|err| Error::model(step, err))?;

    Ok(Snapshot::new(input, output))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use thiserror::Error;
    use voltaic_core::DerivativeOf;

    // --- Test fixtures ---

    /// State: charge throughput in ampere-hours.
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Charge(f64);

    /// Derivative: current in ampere-hours per second.
    #[derive(Debug, Clone, Copy)]
    struct Current(f64);

    impl StepIntegrable<f64> for Charge {
        type Derivative = Current;

        fn step(&self, derivative: Current, dt: f64) -> Self {
            Charge(self.0 + derivative.0 * dt)
        }
    }

    #[derive(Debug, Clone)]
    struct Input {
        charge: Charge,
        time: f64,
    }

    #[derive(Debug, Clone)]
    struct Output {
        voltage: f64,
    }

    /// A coulomb-counting cell whose voltage rises linearly with charge.
    struct LinearCell {
        capacity_ah: f64,
        current_a: f64,
    }

    #[derive(Debug, Error)]
    #[error("cell overfilled")]
    struct Overfilled;

    impl Model for LinearCell {
        type Input = Input;
        type Output = Output;
        type Error = Overfilled;

        fn call(&self, input: &Input) -> Result<Output, Overfilled> {
            let soc = input.charge.0 / self.capacity_ah;
            if soc > 1.0 {
                return Err(Overfilled);
            }
            Ok(Output {
                voltage: 3.0 + 1.2 * soc,
            })
        }
    }

    impl OdeProblem for LinearCell {
        type Input = Input;
        type Output = Output;
        type Delta = f64;
        type State = Charge;
        type Error = Overfilled;

        fn state(&self, input: &Input) -> Result<Charge, Overfilled> {
            Ok(input.charge)
        }

        fn derivative(
            &self,
            _input: &Input,
            _output: &Output,
        ) -> Result<DerivativeOf<Charge, f64>, Overfilled> {
            Ok(Current(self.current_a / 3600.0))
        }

        fn build_input(&self, base: &Input, state: &Charge, dt: &f64) -> Result<Input, Overfilled> {
            Ok(Input {
                charge: *state,
                time: base.time + dt,
            })
        }
    }

    fn empty_cell() -> Input {
        Input {
            charge: Charge(0.0),
            time: 0.0,
        }
    }

    // --- Tests ---

    #[test]
    fn constant_current_charge() {
        let cell = LinearCell {
            capacity_ah: 1.0,
            current_a: 1.0,
        };

        let solution = solve(&cell, &cell, empty_cell(), 36.0, 10, ()).expect("should solve");

        assert_eq!(solution.status, Status::Finished);
        assert_eq!(solution.steps, 10);
        assert_eq!(solution.history.len(), 11);

        // 1 A for 360 s is 0.1 Ah.
        let last = solution.last().unwrap();
        assert_relative_eq!(last.input.charge.0, 0.1, epsilon = 1e-12);
        assert_relative_eq!(last.input.time, 360.0, epsilon = 1e-9);
        assert_relative_eq!(last.output.voltage, 3.12, epsilon = 1e-12);
    }

    #[test]
    fn observer_stops_at_cutoff() {
        let cell = LinearCell {
            capacity_ah: 1.0,
            current_a: 3.6,
        };
        let cutoff = 3.6;

        // Each 100 s step adds 0.1 Ah, so the cut-off is reached at step 5.
        let solution = solve(
            &cell,
            &cell,
            empty_cell(),
            100.0,
            100,
            |event: &Event<Input, Output>| {
                (event.snapshot.output.voltage >= cutoff - 1e-12).then_some(Action::StopEarly)
            },
        )
        .expect("should stop early");

        assert_eq!(solution.status, Status::Stopped);
        assert!(solution.stopped_early());
        assert_eq!(solution.steps, 5);
        assert_eq!(solution.history.len(), 6);
    }

    #[test]
    fn unbounded_step_count_does_not_reserve_history() {
        let cell = LinearCell {
            capacity_ah: 1.0,
            current_a: 3.6,
        };

        let solution = solve(
            &cell,
            &cell,
            empty_cell(),
            1.0,
            usize::MAX,
            |event: &Event<Input, Output>| (event.step == 3).then_some(Action::StopEarly),
        )
        .expect("should stop early");

        assert_eq!(solution.status, Status::Stopped);
        assert_eq!(solution.history.len(), 4);
    }

    #[test]
    fn zero_steps_returns_initial() {
        let cell = LinearCell {
            capacity_ah: 1.0,
            current_a: 1.0,
        };

        let solution = solve(&cell, &cell, empty_cell(), 1.0, 0, ()).expect("should solve");

        assert_eq!(solution.status, Status::Finished);
        assert_eq!(solution.steps, 0);
        assert_eq!(solution.history.len(), 1);
    }

    #[test]
    fn model_failure_reports_step() {
        let cell = LinearCell {
            capacity_ah: 1.0,
            current_a: 3600.0,
        };

        // One ampere-hour per second: the second step overfills the cell.
        let err = solve(&cell, &cell, empty_cell(), 0.6, 10, ()).unwrap_err();

        assert!(matches!(err, Error::Model { step: 2, .. }));
        assert_eq!(err.step(), 2);
        assert!(err.downcast_ref::<Overfilled>().is_some());
    }

    #[test]
    fn step_numbers_start_at_zero() {
        let cell = LinearCell {
            capacity_ah: 1.0,
            current_a: 1.0,
        };

        let mut seen = Vec::new();
        solve(
            &cell,
            &cell,
            empty_cell(),
            1.0,
            3,
            |event: &Event<Input, Output>| {
                seen.push(event.step);
                None
            },
        )
        .expect("should solve");

        assert_eq!(seen, vec![0, 1, 2, 3]);
    }
}
