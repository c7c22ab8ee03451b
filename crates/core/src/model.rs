/// A callable model that maps a typed input to a typed output.
///
/// Models must be deterministic, always producing the same result for a given
/// input. Cell surrogates, safety assessment, and any external solver binding
/// all sit behind this trait, which makes repeated evaluation of the same
/// input safe to cache or compare.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Calls the model with the given input.
    ///
    /// # Errors
    ///
    /// Each model defines its own `Error` type to represent domain-specific failures.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// A captured input/output pair from a model call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    /// Creates a new snapshot from input and output values.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    /// Open-circuit voltage of an idealised linear cell.
    struct LinearOcv {
        empty: f64,
        full: f64,
    }

    impl Model for LinearOcv {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, soc: &f64) -> Result<f64, Self::Error> {
            Ok(self.empty + (self.full - self.empty) * soc)
        }
    }

    #[test]
    fn repeated_calls_agree() {
        let model = LinearOcv {
            empty: 3.0,
            full: 4.2,
        };

        let first = model.call(&0.5).unwrap();
        let second = model.call(&0.5).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn snapshot_keeps_both_sides() {
        let model = LinearOcv {
            empty: 3.0,
            full: 4.0,
        };
        let output = model.call(&0.25).unwrap();
        let snapshot = Snapshot::new(0.25, output);

        assert_eq!(snapshot.input, 0.25);
        assert_eq!(snapshot.output, 3.25);
    }
}
