//! Structural checks for spec documents.
//!
//! Errors describe shapes the console cannot edit or run at all (a save is
//! refused). Warnings describe documents that still work but lose something,
//! such as duplicate task ids or blocks after the first.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::task::{Task, TaskEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// One finding, located by a JSON path such as `blocks[0].tasks[2].id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecIssue {
    pub severity: Severity,
    pub path: String,
    pub message: String,
}

impl SpecIssue {
    fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            path: path.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for SpecIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{level}: {}: {}", self.path, self.message)
    }
}

#[must_use]
pub fn has_errors(issues: &[SpecIssue]) -> bool {
    issues.iter().any(SpecIssue::is_error)
}

/// Validate a spec document.
#[must_use]
pub fn validate(spec: &Value) -> Vec<SpecIssue> {
    let mut issues = Vec::new();

    let Some(root) = spec.as_object() else {
        issues.push(SpecIssue::error("$", "spec must be a JSON object"));
        return issues;
    };

    match root.get("version") {
        Some(Value::String(_)) => {}
        Some(_) => issues.push(SpecIssue::warning("version", "version should be a string")),
        None => issues.push(SpecIssue::warning("version", "version is missing")),
    }

    let blocks = match root.get("blocks") {
        None | Some(Value::Null) => {
            issues.push(SpecIssue::warning("blocks", "no blocks; the spec has no tasks"));
            return issues;
        }
        Some(Value::Array(blocks)) => blocks,
        Some(_) => {
            issues.push(SpecIssue::error("blocks", "blocks must be an array"));
            return issues;
        }
    };

    if blocks.len() > 1 {
        issues.push(SpecIssue::warning(
            "blocks",
            format!("{} blocks found; only blocks[0] is edited and run", blocks.len()),
        ));
    }

    let Some(first) = blocks.first() else {
        issues.push(SpecIssue::warning("blocks", "blocks is empty"));
        return issues;
    };
    let Some(first) = first.as_object() else {
        issues.push(SpecIssue::error("blocks[0]", "block must be a JSON object"));
        return issues;
    };

    let tasks = match first.get("tasks") {
        None | Some(Value::Null) => {
            issues.push(SpecIssue::warning("blocks[0].tasks", "tasks is missing"));
            return issues;
        }
        Some(Value::Array(tasks)) => tasks,
        Some(_) => {
            issues.push(SpecIssue::error("blocks[0].tasks", "tasks must be an array"));
            return issues;
        }
    };

    let mut seen = HashSet::new();
    for (index, raw) in tasks.iter().enumerate() {
        let path = format!("blocks[0].tasks[{index}]");
        validate_task(&path, raw, &mut seen, &mut issues);
    }

    issues
}

fn validate_task(
    path: &str,
    raw: &Value,
    seen: &mut HashSet<String>,
    issues: &mut Vec<SpecIssue>,
) {
    if !raw.is_object() {
        issues.push(SpecIssue::error(path, "task must be a JSON object"));
        return;
    }

    match raw.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => {
            if !seen.insert(id.to_string()) {
                issues.push(SpecIssue::warning(
                    format!("{path}.id"),
                    format!("duplicate task id `{id}`"),
                ));
            }
        }
        _ => issues.push(SpecIssue::warning(format!("{path}.id"), "task id is missing")),
    }

    match TaskEntry::from_value(raw) {
        TaskEntry::Known(Task::ForcedChoice(task)) => {
            if let Some(pick) = task.pick {
                let available = task.statements.len();
                if usize::try_from(pick).map_or(true, |pick| pick > available) {
                    issues.push(SpecIssue::warning(
                        format!("{path}.pick"),
                        format!("pick {pick} exceeds {available} statements"),
                    ));
                }
            }
        }
        TaskEntry::Known(_) => {}
        TaskEntry::Unrecognized(task) => {
            let message = match task.task_type.as_deref() {
                None => "task type is missing".to_string(),
                Some(kind @ ("paired_comparison" | "maxdiff" | "forced_choice")) => {
                    format!("task does not match the `{kind}` shape")
                }
                Some(kind) => format!("unknown task type `{kind}`; edit it as raw JSON"),
            };
            issues.push(SpecIssue::warning(format!("{path}.type"), message));
        }
    }
}
