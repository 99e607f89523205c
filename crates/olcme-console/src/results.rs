//! Tabular view of response rows.

use olcme_core::entities::{ResponseId, ResponseRow, SessionId};
use serde::Serialize;

pub const HEADERS: [&str; 4] = ["id", "session_id", "task_id", "payload"];

/// One rendered row. `payload` is the compact JSON text of the stored payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultLine {
    pub id: ResponseId,
    pub session_id: SessionId,
    pub task_id: String,
    pub payload: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultsTable {
    lines: Vec<ResultLine>,
}

impl ResultsTable {
    #[must_use]
    pub fn from_rows(rows: &[ResponseRow]) -> Self {
        let lines = rows
            .iter()
            .map(|row| ResultLine {
                id: row.id,
                session_id: row.session_id,
                task_id: row.task_id.clone(),
                payload: row.payload.to_string(),
            })
            .collect();
        Self { lines }
    }

    #[must_use]
    pub fn lines(&self) -> &[ResultLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Cells in [`HEADERS`] order.
    #[must_use]
    pub fn cells(&self) -> Vec<[String; 4]> {
        self.lines
            .iter()
            .map(|line| {
                [
                    line.id.to_string(),
                    line.session_id.to_string(),
                    line.task_id.clone(),
                    line.payload.clone(),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn payload_is_rendered_raw() {
        let rows = vec![ResponseRow {
            id: 3,
            session_id: 9,
            task_id: "pc_1".into(),
            payload: json!({ "choice": "left", "rt_ms": null }),
            created_at: Some("2026-01-01T00:00:00".into()),
        }];
        let table = ResultsTable::from_rows(&rows);
        assert_eq!(
            table.cells(),
            vec![[
                "3".to_string(),
                "9".to_string(),
                "pc_1".to_string(),
                r#"{"choice":"left","rt_ms":null}"#.to_string(),
            ]]
        );
    }

    #[test]
    fn non_object_payload_is_kept() {
        let rows = vec![ResponseRow {
            id: 1,
            session_id: 1,
            task_id: "x".into(),
            payload: json!("free text"),
            created_at: None,
        }];
        assert_eq!(ResultsTable::from_rows(&rows).lines()[0].payload, r#""free text""#);
    }
}
