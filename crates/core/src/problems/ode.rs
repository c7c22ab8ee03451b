use crate::{DerivativeOf, StepIntegrable};

/// Splits a model's input into an integrable state and everything else.
///
/// A time integrator never looks inside the input: it asks the problem for the
/// state, asks for the state's rate of change given the model output, steps
/// the state itself, and asks the problem to put the stepped state back into
/// an input. For a cell model the state is electrode stoichiometry,
/// electrolyte polarisation and temperature, while the fixed operating
/// conditions ride along in the input untouched.
pub trait OdeProblem {
    type Input;
    type Output;
    type Delta;
    type State: StepIntegrable<Self::Delta>;
    type Error: std::error::Error + Send + Sync + 'static;

    /// # Errors
    ///
    /// Returns [`Self::Error`] if `input` holds no usable state.
    fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error>;

    /// Rate of change of the state at `input`, given the model's `output`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the rate is undefined at this point.
    fn derivative(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error>;

    /// Rebuilds model input around a stepped state; `delta` is the step just
    /// taken, so time-like fields can advance with it.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the stepped state is not a valid input, for
    /// example when a stoichiometry leaves its physical range.
    fn build_input(
        &self,
        base: &Self::Input,
        state: &Self::State,
        delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error>;

    /// Last chance to adjust the next input, e.g. clamping a state or
    /// switching a charge mode, before the model sees it.
    ///
    /// Defaults to returning `next_input` as is.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] to abort the integration at this step.
    fn finalize_step(
        &self,
        next_input: Self::Input,
        _prev_input: &Self::Input,
        _prev_output: &Self::Output,
        _step_delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error> {
        Ok(next_input)
    }
}
