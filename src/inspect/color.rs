//! Terminal colours for rendered entries.
//!
//! Integers are painted red and payloads (text or hex) green. `Plain` leaves
//! strings untouched, for pipes and tests.

use ansi_term::Colour::{Green, Red};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Colored,
    Plain,
}

impl ColorMode {
    pub fn red(self, s: impl Into<String>) -> String {
        match self {
            ColorMode::Colored => Red.paint(s.into()).to_string(),
            ColorMode::Plain => s.into(),
        }
    }

    pub fn green(self, s: impl Into<String>) -> String {
        match self {
            ColorMode::Colored => Green.paint(s.into()).to_string(),
            ColorMode::Plain => s.into(),
        }
    }
}
