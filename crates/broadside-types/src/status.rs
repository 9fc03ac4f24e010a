//! Match status and shot outcome enumerations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The lifecycle state of a match.
///
/// A single transition exists: `InProgress → Finished`. The transition
/// is monotonic — once finished, a match never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    InProgress,
    Finished,
}

impl MatchStatus {
    /// Returns `true` while the match still accepts play.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "InProgress"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}

/// What a shot resolved to on the targeted grid.
///
/// Serialized lowercase because the durable shot log stores
/// `"hit"` / `"miss"` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotOutcome {
    Hit,
    Miss,
}

impl ShotOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_predicates() {
        assert!(MatchStatus::InProgress.is_in_progress());
        assert!(!MatchStatus::Finished.is_in_progress());
    }

    #[test]
    fn test_shot_outcome_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ShotOutcome::Hit).unwrap(), "\"hit\"");
        assert_eq!(serde_json::to_string(&ShotOutcome::Miss).unwrap(), "\"miss\"");
    }
}
