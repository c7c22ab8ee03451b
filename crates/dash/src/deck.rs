use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use voltaic_cell::{ConfigError, LumpedSolver, ParameterDeck, ParameterSet, SolveWindow, WindowDeck};
use voltaic_core::constraint::NonNegative;
use voltaic_safety::{ThresholdDeck, ThresholdTable};

/// A complete run description as read from a TOML deck file.
///
/// Every table is optional and falls back to the dashboard defaults.
///
/// ```toml
/// [cell]
/// chemistry = "LFP"
/// charge_current = { c_rate = 2.0 }
///
/// [simulation]
/// duration_s = 600.0
///
/// [solver]
/// contact_resistance_ohm_m2 = 0.02
///
/// [thresholds.all]
/// thermal_ceiling_c = 45.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeckFile {
    pub cell: ParameterDeck,
    pub simulation: WindowDeck,
    pub solver: SolverDeck,
    pub thresholds: ThresholdDeck,
}

/// Settings for the built-in lumped solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverDeck {
    /// Electrode contact resistance in Ω·m².
    pub contact_resistance_ohm_m2: f64,
}

impl SolverDeck {
    /// Builds the lumped solver these settings describe.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the contact resistance is negative or not
    /// finite.
    pub fn to_solver(&self) -> Result<LumpedSolver, ConfigError> {
        let field = "contact_resistance_ohm_m2";
        if !self.contact_resistance_ohm_m2.is_finite() {
            return Err(ConfigError::Invalid {
                field,
                reason: "must be finite",
            });
        }
        let resistance = NonNegative::new(self.contact_resistance_ohm_m2)
            .map_err(ConfigError::out_of_range(field))?;
        Ok(LumpedSolver::new().with_contact_resistance(resistance.into_inner()))
    }
}

/// The validated contents of a [`DeckFile`].
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub params: ParameterSet,
    pub window: SolveWindow,
    pub thresholds: ThresholdTable,
}

impl DeckFile {
    /// Reads and parses a deck file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid deck.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses a deck from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Validates every table except `[solver]`, which belongs to whoever
    /// builds the solver.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, checking the cell parameters,
    /// then the window, then the thresholds.
    pub fn validate(&self) -> Result<Submission, ConfigError> {
        Ok(Submission {
            params: self.cell.to_parameters()?,
            window: self.simulation.to_window()?,
            thresholds: ThresholdTable::from_deck(&self.thresholds)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{thermodynamic_temperature::kelvin, time::second};
    use voltaic_cell::Chemistry;

    #[test]
    fn empty_file_is_the_default_run() {
        let deck = DeckFile::from_toml_str("").unwrap();
        assert_eq!(deck, DeckFile::default());

        let submission = deck.validate().unwrap();
        assert_eq!(submission.params.chemistry(), Chemistry::Nmc);
        assert_eq!(submission.window, SolveWindow::default());
        assert_eq!(submission.thresholds, ThresholdTable::default());
    }

    #[test]
    fn reads_every_table() {
        let deck = DeckFile::from_toml_str(
            r#"
            [cell]
            chemistry = "lfp"
            charge_current = { c_rate = 2.0 }

            [simulation]
            duration_s = 600.0
            step_s = 2.0

            [solver]
            contact_resistance_ohm_m2 = 0.02

            [thresholds.lfp]
            thermal_ceiling_c = 45.0
            "#,
        )
        .unwrap();

        let submission = deck.validate().unwrap();
        assert_eq!(submission.params.chemistry(), Chemistry::Lfp);
        assert_eq!(submission.window.steps(), 300);
        assert_relative_eq!(submission.window.duration.get::<second>(), 600.0);
        assert_relative_eq!(
            submission
                .thresholds
                .get(Chemistry::Lfp)
                .thermal_ceiling
                .get::<kelvin>(),
            318.15,
            epsilon = 1e-9
        );
        assert!(deck.solver.to_solver().is_ok());
    }

    #[test]
    fn unknown_tables_are_rejected() {
        assert!(matches!(
            DeckFile::from_toml_str("[plot]\nwidth = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn validation_names_the_first_bad_field() {
        let mut deck = DeckFile::default();
        deck.cell.anode_thickness_um = 0.0;
        deck.simulation.step_s = -1.0;
        assert_eq!(deck.validate().unwrap_err().field(), Some("anode_thickness_um"));

        let mut deck = DeckFile::default();
        deck.simulation.initial_soc = 1.5;
        assert_eq!(deck.validate().unwrap_err().field(), Some("initial_soc"));

        let deck = DeckFile::from_toml_str("[thresholds.all]\nthermal_margin_k = -1.0").unwrap();
        assert_eq!(deck.validate().unwrap_err().field(), Some("thermal_margin_k"));
    }

    #[test]
    fn negative_contact_resistance_is_rejected() {
        let solver = SolverDeck {
            contact_resistance_ohm_m2: -0.1,
        };
        assert_eq!(
            solver.to_solver().unwrap_err().field(),
            Some("contact_resistance_ohm_m2")
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DeckFile::load("/definitely/not/a/deck.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
