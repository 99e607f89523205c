//! Choice, task type, and template enums.
//!
//! All enums use `snake_case` serialization and expose `as_str()` plus a
//! `Display` impl matching the wire representation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Choice
// ---------------------------------------------------------------------------

/// Side picked by a participant in a paired-comparison task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    Left,
    Right,
}

impl Choice {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Choice {
    type Err = CoreError;

    /// Accepts the wire names plus the short forms typed in the terminal runner.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "left" | "l" | "1" | "sol" => Ok(Self::Left),
            "right" | "r" | "2" | "sag" | "sağ" => Ok(Self::Right),
            _ => Err(CoreError::InvalidValue {
                field: "choice".into(),
                value: raw.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// TaskType
// ---------------------------------------------------------------------------

/// The task types the console knows how to author.
///
/// Only `PairedComparison` has a structured form and runner support; the other
/// two are stored and edited as raw JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    PairedComparison,
    #[serde(rename = "maxdiff")]
    MaxDiff,
    ForcedChoice,
}

impl TaskType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PairedComparison => "paired_comparison",
            Self::MaxDiff => "maxdiff",
            Self::ForcedChoice => "forced_choice",
        }
    }

    /// Whether the participant runner can present this task type.
    #[must_use]
    pub const fn is_runnable(self) -> bool {
        matches!(self, Self::PairedComparison)
    }
}

impl FromStr for TaskType {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "paired_comparison" => Ok(Self::PairedComparison),
            "maxdiff" => Ok(Self::MaxDiff),
            "forced_choice" => Ok(Self::ForcedChoice),
            _ => Err(CoreError::InvalidValue {
                field: "type".into(),
                value: raw.to_string(),
            }),
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TemplateKind
// ---------------------------------------------------------------------------

/// Template used to seed the spec of a new instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// Five fixed paired-comparison tasks.
    #[default]
    Paired,
    /// One MaxDiff demo task.
    #[serde(rename = "maxdiff")]
    MaxDiff,
    /// One forced-choice demo task.
    Forced,
}

impl TemplateKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paired => "paired",
            Self::MaxDiff => "maxdiff",
            Self::Forced => "forced",
        }
    }

    /// Operator-facing label shown next to the template option.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Paired => "Paired Comparison (çalışır)",
            Self::MaxDiff => "MaxDiff (spec saklanır)",
            Self::Forced => "Forced-Choice (spec saklanır)",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Paired, Self::MaxDiff, Self::Forced]
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Choice::Left).unwrap(), "\"left\"");
        assert_eq!(serde_json::to_string(&Choice::Right).unwrap(), "\"right\"");
    }

    #[test]
    fn choice_parses_short_forms() {
        assert_eq!("L".parse::<Choice>().unwrap(), Choice::Left);
        assert_eq!(" 2 ".parse::<Choice>().unwrap(), Choice::Right);
        assert_eq!("sağ".parse::<Choice>().unwrap(), Choice::Right);
        assert!("middle".parse::<Choice>().is_err());
    }

    #[test]
    fn task_type_wire_names() {
        for task_type in [
            TaskType::PairedComparison,
            TaskType::MaxDiff,
            TaskType::ForcedChoice,
        ] {
            let json = serde_json::to_string(&task_type).unwrap();
            assert_eq!(json, format!("\"{}\"", task_type.as_str()));
        }
    }

    #[test]
    fn only_paired_comparison_is_runnable() {
        assert!(TaskType::PairedComparison.is_runnable());
        assert!(!TaskType::MaxDiff.is_runnable());
        assert!(!TaskType::ForcedChoice.is_runnable());
    }

    #[test]
    fn task_type_parses_wire_names_only() {
        assert_eq!("maxdiff".parse::<TaskType>().unwrap(), TaskType::MaxDiff);
        assert_eq!(
            "paired_comparison".parse::<TaskType>().unwrap(),
            TaskType::PairedComparison
        );
        assert!("Paired".parse::<TaskType>().is_err());
    }

    #[test]
    fn template_kind_roundtrips_through_serde() {
        for kind in TemplateKind::all() {
            let json = serde_json::to_string(kind).unwrap();
            let back: TemplateKind = serde_json::from_str(&json).unwrap();
            assert_eq!(&back, kind);
            assert_eq!(json, format!("\"{kind}\""));
        }
    }
}
