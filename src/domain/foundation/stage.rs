//! Stage enum describing how far an idea has progressed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Development stage of an idea.
///
/// Serialized with the exact labels the clients send (`"Concept"`,
/// `"MVP"`, ...), so unknown labels fail deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Stage {
    #[default]
    Concept,
    Prototype,
    #[serde(rename = "MVP")]
    Mvp,
    Beta,
    Production,
}

impl Stage {
    /// All stages in lifecycle order.
    pub const ALL: [Stage; 5] = [
        Stage::Concept,
        Stage::Prototype,
        Stage::Mvp,
        Stage::Beta,
        Stage::Production,
    ];

    /// Returns the wire label for this stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Concept => "Concept",
            Stage::Prototype => "Prototype",
            Stage::Mvp => "MVP",
            Stage::Beta => "Beta",
            Stage::Production => "Production",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Stage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s.trim())
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "stage",
                    format!(
                        "'{}' is not one of Concept, Prototype, MVP, Beta, Production",
                        s
                    ),
                )
            })
    }
}
