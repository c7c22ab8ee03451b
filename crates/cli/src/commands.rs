pub mod assess;
pub mod check;
pub mod run;
pub mod thresholds;

use std::path::Path;

use anyhow::{Context, Result};
use voltaic_dash::DeckFile;

/// Loads `path` if given, otherwise the default deck.
fn load_deck(path: Option<&Path>) -> Result<DeckFile> {
    match path {
        Some(path) => {
            DeckFile::load(path).with_context(|| format!("cannot use deck {}", path.display()))
        }
        None => Ok(DeckFile::default()),
    }
}
