/// A trait for types that can be stepped using their derivative.
///
/// Implementing this trait lets the generic transient solver advance a state
/// via `derivative * delta`, where the derivative is taken with respect to
/// `Delta`.
///
/// `Delta` can be a plain scalar like `f64` or a dimensioned type like
/// `uom::si::f64::Time` for compile-time unit checking.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// Type alias for the derivative of a `StepIntegrable` type.
///
/// Shorthand for the fully qualified [`StepIntegrable::Derivative`] path.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Time, time::second};

    // Scalar state: state of charge, stepped in plain seconds.
    #[derive(Debug, PartialEq)]
    struct StateOfCharge(f64);
    struct ChargeRate(f64);

    impl StepIntegrable<f64> for StateOfCharge {
        type Derivative = ChargeRate;

        fn step(&self, derivative: ChargeRate, delta: f64) -> Self {
            StateOfCharge(self.0 + derivative.0 * delta)
        }
    }

    // Two-field state stepped with a dimensioned time.
    #[derive(Debug)]
    struct Lumped {
        soc: f64,
        temperature_k: f64,
    }
    struct LumpedRate {
        soc_per_s: f64,
        kelvin_per_s: f64,
    }

    impl StepIntegrable<Time> for Lumped {
        type Derivative = LumpedRate;

        fn step(&self, derivative: LumpedRate, delta: Time) -> Self {
            let dt = delta.get::<second>();
            Lumped {
                soc: self.soc + derivative.soc_per_s * dt,
                temperature_k: self.temperature_k + derivative.kelvin_per_s * dt,
            }
        }
    }

    #[test]
    fn step_scalar_state() {
        // 1C charge for 36 s moves SOC by 1 %.
        let soc = StateOfCharge(0.2);
        let next = soc.step(ChargeRate(1.0 / 3600.0), 36.0);

        assert_relative_eq!(next.0, 0.21);
    }

    #[test]
    fn step_dimensioned_state() {
        let state = Lumped {
            soc: 0.5,
            temperature_k: 298.15,
        };
        let rate = LumpedRate {
            soc_per_s: 1e-4,
            kelvin_per_s: 0.01,
        };

        let next = state.step(rate, Time::new::<second>(10.0));

        assert_relative_eq!(next.soc, 0.501);
        assert_relative_eq!(next.temperature_k, 298.25);
    }
}
