use std::cmp::Ordering;

use num_traits::{One, Zero};
use uom::si::{f64::Ratio, ratio::ratio};

use crate::constraint::{Constrained, Constraint, ConstraintError};

/// Types with well-defined zero and one bounds.
pub trait UnitBounds: PartialOrd + Sized {
    fn zero() -> Self;
    fn one() -> Self;
}

impl UnitBounds for f32 {
    fn zero() -> Self {
        <f32 as Zero>::zero()
    }

    fn one() -> Self {
        <f32 as One>::one()
    }
}

impl UnitBounds for f64 {
    fn zero() -> Self {
        <f64 as Zero>::zero()
    }

    fn one() -> Self {
        <f64 as One>::one()
    }
}

impl UnitBounds for Ratio {
    fn zero() -> Self {
        Ratio::new::<ratio>(0.0)
    }

    fn one() -> Self {
        Ratio::new::<ratio>(1.0)
    }
}

/// Marker type enforcing that a value lies in the open unit interval: `0 < x < 1`.
///
/// Volume fractions of electrode constituents use this constraint: an
/// electrode with no active material, or with nothing but active material, is
/// not a physical configuration.
///
/// # Examples
///
/// ```
/// use voltaic_core::constraint::OpenUnitInterval;
///
/// assert!(OpenUnitInterval::new(0.75).is_ok());
/// assert!(OpenUnitInterval::new(0.0).is_err());
/// assert!(OpenUnitInterval::new(1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OpenUnitInterval;

impl OpenUnitInterval {
    /// Constructs `Constrained<T, OpenUnitInterval>` if `0 < value < 1`.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::BelowMinimum`] if less than or equal to zero.
    /// - [`ConstraintError::AboveMaximum`] if greater than or equal to one.
    /// - [`ConstraintError::NotANumber`] if comparison is undefined (e.g., NaN).
    pub fn new<T: UnitBounds>(
        value: T,
    ) -> Result<Constrained<T, OpenUnitInterval>, ConstraintError> {
        Constrained::new(value)
    }
}

impl<T: UnitBounds> Constraint<T> for OpenUnitInterval {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match (value.partial_cmp(&T::zero()), value.partial_cmp(&T::one())) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(Ordering::Less | Ordering::Equal), _) => Err(ConstraintError::BelowMinimum),
            (_, Some(Ordering::Greater | Ordering::Equal)) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}
