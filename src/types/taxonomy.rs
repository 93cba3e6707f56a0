//! Taxonomy identifiers and their fixed decision constants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SemanticError;

/// Minimum cosine similarity for an intent match.
pub const INTENT_THRESHOLD: f32 = 0.60;

/// Minimum cosine similarity for an action match.
///
/// Higher than [`INTENT_THRESHOLD`]: action phrases are short and collide
/// more easily.
pub const ACTION_THRESHOLD: f32 = 0.75;

/// Label returned when no intent clears the threshold.
pub const INTENT_SENTINEL: &str = "unknown";

/// Label returned when no action clears the threshold.
pub const ACTION_SENTINEL: &str = "none";

/// An independent namespace of categories.
///
/// Category names are only unique within one taxonomy; every lookup is
/// scoped by this key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Taxonomy {
    /// What the user wants to do ("create_todo", "summary", ...).
    Intent,
    /// How the user answers a pending dialog turn ("confirm", "cancel", ...).
    Action,
}

impl Taxonomy {
    /// All taxonomies, in a stable order.
    pub const ALL: [Taxonomy; 2] = [Taxonomy::Intent, Taxonomy::Action];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intent => "intent",
            Self::Action => "action",
        }
    }

    /// Reserved label meaning "nothing matched with enough confidence".
    pub fn sentinel(&self) -> &'static str {
        match self {
            Self::Intent => INTENT_SENTINEL,
            Self::Action => ACTION_SENTINEL,
        }
    }

    /// Acceptance threshold used by the taxonomy-specific entry points.
    pub fn threshold(&self) -> f32 {
        match self {
            Self::Intent => INTENT_THRESHOLD,
            Self::Action => ACTION_THRESHOLD,
        }
    }
}

impl fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Taxonomy {
    type Err = SemanticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "intent" | "intents" => Ok(Self::Intent),
            "action" | "actions" | "act" => Ok(Self::Action),
            other => Err(SemanticError::Configuration(format!(
                "unknown taxonomy '{other}' (expected 'intent' or 'action')"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_and_thresholds() {
        assert_eq!(Taxonomy::Intent.sentinel(), "unknown");
        assert_eq!(Taxonomy::Action.sentinel(), "none");
        assert_eq!(Taxonomy::Intent.threshold(), 0.60);
        assert_eq!(Taxonomy::Action.threshold(), 0.75);
    }

    #[test]
    fn parse_taxonomy() {
        assert_eq!("intent".parse::<Taxonomy>().unwrap(), Taxonomy::Intent);
        assert_eq!(" Actions ".parse::<Taxonomy>().unwrap(), Taxonomy::Action);
        assert!("slot".parse::<Taxonomy>().is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Taxonomy::Action).unwrap();
        assert_eq!(json, "\"action\"");
    }
}
