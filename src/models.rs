use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Placeholder shown in display tables for empty values
pub const EMPTY_PLACEHOLDER: &str = "—";

/// One record in the form: a free-text input plus a single-choice selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPair {
    /// Unique, stable for the record's lifetime, never reused
    #[serde(default = "fresh_id")]
    pub id: String,
    pub input_value: String,
    pub select_value: String,
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

impl FieldPair {
    /// A new pair with empty values and a freshly generated id
    pub fn empty() -> Self {
        Self {
            id: fresh_id(),
            input_value: String::new(),
            select_value: String::new(),
        }
    }

    pub fn new(input_value: &str, select_value: &str) -> Self {
        Self {
            id: fresh_id(),
            input_value: input_value.to_string(),
            select_value: select_value.to_string(),
        }
    }
}

/// Which of the two fields of a pair is being addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PairField {
    Input,
    Select,
}

impl PairField {
    pub fn as_str(&self) -> &str {
        match self {
            PairField::Input => "input",
            PairField::Select => "select",
        }
    }
}

/// One entry of the fixed option set consumed by the select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Resolve a select value to its display label.
///
/// Empty values map to the placeholder; unrecognized values fall back to the
/// raw value.
pub fn resolve_label<'a>(options: &'a [SelectOption], value: &'a str) -> &'a str {
    if value.is_empty() {
        return EMPTY_PLACEHOLDER;
    }
    options
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.label.as_str())
        .unwrap_or(value)
}

/// One row of the read-only display table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// 1-based ordinal position
    pub ordinal: usize,
    pub input: String,
    pub select_label: String,
}

/// Build display rows for a sequence of pairs, resolving select labels
/// through the configured option set.
pub fn display_rows(pairs: &[FieldPair], options: &[SelectOption]) -> Vec<DisplayRow> {
    pairs
        .iter()
        .enumerate()
        .map(|(i, pair)| DisplayRow {
            ordinal: i + 1,
            input: if pair.input_value.is_empty() {
                EMPTY_PLACEHOLDER.to_string()
            } else {
                pair.input_value.clone()
            },
            select_label: resolve_label(options, &pair.select_value).to_string(),
        })
        .collect()
}

/// Immutable copy of the collection captured at the moment of a successful
/// submission. Replaced wholesale on the next successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedSnapshot {
    pairs: Vec<FieldPair>,
    pub submitted_at: DateTime<Local>,
}

impl SubmittedSnapshot {
    pub fn capture(pairs: &[FieldPair]) -> Self {
        Self {
            pairs: pairs.to_vec(),
            submitted_at: Local::now(),
        }
    }

    pub fn pairs(&self) -> &[FieldPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Write the snapshot as pretty-printed JSON
    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        use anyhow::Context;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<SelectOption> {
        vec![
            SelectOption::new("option1", "Option 1"),
            SelectOption::new("option2", "Option 2"),
        ]
    }

    #[test]
    fn test_empty_pair_has_unique_id() {
        let a = FieldPair::empty();
        let b = FieldPair::empty();
        assert!(a.input_value.is_empty());
        assert!(a.select_value.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_resolve_label() {
        let opts = options();
        assert_eq!(resolve_label(&opts, "option2"), "Option 2");
        assert_eq!(resolve_label(&opts, ""), EMPTY_PLACEHOLDER);
        // Unrecognized values fall back to the raw value
        assert_eq!(resolve_label(&opts, "option9"), "option9");
    }

    #[test]
    fn test_display_rows() {
        let opts = options();
        let pairs = vec![FieldPair::new("alpha", "option1"), FieldPair::new("", "")];
        let rows = display_rows(&pairs, &opts);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].ordinal, 1);
        assert_eq!(rows[0].input, "alpha");
        assert_eq!(rows[0].select_label, "Option 1");
        assert_eq!(rows[1].ordinal, 2);
        assert_eq!(rows[1].input, EMPTY_PLACEHOLDER);
        assert_eq!(rows[1].select_label, EMPTY_PLACEHOLDER);
    }

    #[test]
    fn test_pair_deserializes_without_id() {
        let pair: FieldPair =
            serde_json::from_str(r#"{"input_value":"a","select_value":"option1"}"#).unwrap();
        assert!(!pair.id.is_empty());
        assert_eq!(pair.input_value, "a");
    }

    #[test]
    fn test_snapshot_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let snapshot = SubmittedSnapshot::capture(&[FieldPair::new("alpha", "option1")]);
        snapshot.write_json(&path).unwrap();

        let loaded: SubmittedSnapshot =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.pairs(), snapshot.pairs());
    }
}
