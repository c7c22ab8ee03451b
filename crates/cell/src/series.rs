use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::SeriesError;

/// A tracked simulation output variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    TerminalVoltage,
    CellTemperature,
    ElectrolyteConcentration,
    InterfacialCurrentDensity,
    AnodeSurfacePotential,
    CathodePotential,
    AnodeSurfaceConcentration,
    CathodeSurfaceConcentration,
}

impl Variable {
    /// Every variable a complete run records.
    pub const ALL: [Variable; 8] = [
        Variable::TerminalVoltage,
        Variable::CellTemperature,
        Variable::ElectrolyteConcentration,
        Variable::InterfacialCurrentDensity,
        Variable::AnodeSurfacePotential,
        Variable::CathodePotential,
        Variable::AnodeSurfaceConcentration,
        Variable::CathodeSurfaceConcentration,
    ];

    /// Unit symbol of the stored values.
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Variable::TerminalVoltage
            | Variable::AnodeSurfacePotential
            | Variable::CathodePotential => "V",
            Variable::CellTemperature => "K",
            Variable::ElectrolyteConcentration
            | Variable::AnodeSurfaceConcentration
            | Variable::CathodeSurfaceConcentration => "mol/m³",
            Variable::InterfacialCurrentDensity => "A/m²",
        }
    }

    /// Snake-case identifier used in serialized series.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Variable::TerminalVoltage => "terminal_voltage",
            Variable::CellTemperature => "cell_temperature",
            Variable::ElectrolyteConcentration => "electrolyte_concentration",
            Variable::InterfacialCurrentDensity => "interfacial_current_density",
            Variable::AnodeSurfacePotential => "anode_surface_potential",
            Variable::CathodePotential => "cathode_potential",
            Variable::AnodeSurfaceConcentration => "anode_surface_concentration",
            Variable::CathodeSurfaceConcentration => "cathode_surface_concentration",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single `(time, value)` observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Seconds since the start of the run.
    pub time: f64,
    pub value: f64,
}

/// Sampled output of one simulation run.
///
/// All channels share a single time axis in seconds. Series built through
/// [`TimeSeries::new`] and [`TimeSeries::with_channel`] have a strictly
/// increasing time axis starting at zero and channels of matching length.
/// Deserialized series are not checked; consumers that need the invariants
/// must validate them (see [`TimeSeries::validate`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    time: Vec<f64>,
    channels: BTreeMap<Variable, Vec<f64>>,
}

impl TimeSeries {
    /// Creates a series with the given time axis and no channels.
    ///
    /// # Errors
    ///
    /// Returns a [`SeriesError`] if the axis does not start at zero, contains a
    /// non-finite value, or does not increase strictly.
    pub fn new(time: Vec<f64>) -> Result<Self, SeriesError> {
        check_time_axis(&time)?;
        Ok(Self {
            time,
            channels: BTreeMap::new(),
        })
    }

    /// Creates a series with no samples.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a channel.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::LengthMismatch`] if `values` does not have one
    /// entry per time sample.
    pub fn with_channel(mut self, variable: Variable, values: Vec<f64>) -> Result<Self, SeriesError> {
        if values.len() != self.time.len() {
            return Err(SeriesError::LengthMismatch {
                variable,
                expected: self.time.len(),
                found: values.len(),
            });
        }
        self.channels.insert(variable, values);
        Ok(self)
    }

    /// Checks the structural invariants of a series, e.g. after deserializing.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), SeriesError> {
        check_time_axis(&self.time)?;
        for (&variable, values) in &self.channels {
            if values.len() != self.time.len() {
                return Err(SeriesError::LengthMismatch {
                    variable,
                    expected: self.time.len(),
                    found: values.len(),
                });
            }
        }
        Ok(())
    }

    /// The shared time axis, in seconds.
    #[must_use]
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// The time axis converted to minutes.
    #[must_use]
    pub fn time_minutes(&self) -> Vec<f64> {
        self.time.iter().map(|t| t / 60.0).collect()
    }

    /// Number of time samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Returns `true` if the series holds no time samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Values recorded for `variable`, if the channel exists.
    #[must_use]
    pub fn channel(&self, variable: Variable) -> Option<&[f64]> {
        self.channels.get(&variable).map(Vec::as_slice)
    }

    /// Variables present in this series.
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.channels.keys().copied()
    }

    /// Iterates `(time, value)` samples for `variable`, if the channel exists.
    pub fn samples(&self, variable: Variable) -> Option<impl Iterator<Item = Sample> + '_> {
        let values = self.channels.get(&variable)?;
        Some(
            self.time
                .iter()
                .zip(values)
                .map(|(&time, &value)| Sample { time, value }),
        )
    }

    /// The final sample for `variable`.
    #[must_use]
    pub fn last(&self, variable: Variable) -> Option<Sample> {
        let value = *self.channels.get(&variable)?.last()?;
        let time = *self.time.last()?;
        Some(Sample { time, value })
    }
}

fn check_time_axis(time: &[f64]) -> Result<(), SeriesError> {
    if let Some(index) = time.iter().position(|t| !t.is_finite()) {
        return Err(SeriesError::NonFiniteTime { index });
    }
    if let Some(&first) = time.first() {
        if first != 0.0 {
            return Err(SeriesError::NonZeroStart(first));
        }
    }
    if let Some(index) = time.windows(2).position(|pair| pair[1] <= pair[0]) {
        return Err(SeriesError::NonMonotonicTime { index: index + 1 });
    }
    Ok(())
}
