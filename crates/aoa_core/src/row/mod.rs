//! Flat output rows: fixed core columns followed by one five-column group per cited reference.
//!
//! Rows are sparse: two rows with different citation counts have different key sets. Use
//! [`crate::table::project_rows`] to obtain a fixed-width table.

pub mod columns;

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::domain::AnswerRecord;
use crate::normalize::{cited_indexes, flatten_blocks};

pub use columns::{reference_column_key, reference_columns, REFERENCE_FIELDS};

pub const QUERY_LANGUAGE_LOCATION: &str = "Query_language_location";
pub const RAW_HTML_URL: &str = "Raw_HTML_URL";
pub const HAS_AI_OVERVIEW: &str = "Has_AI_Overview";
pub const NUM_REFERENCES_USED: &str = "Num_References_Used";
pub const AI_OVERVIEW_TEXT_BLOCKS: &str = "AI_overview_text_blocks";
pub const AI_OVERVIEW_TYPE: &str = "AI_overview_type_snippet";
pub const AI_OVERVIEW_HIGHLIGHTED: &str = "AI_overview_snippet_highlighted";
pub const REFERENCE_INDEXES: &str = "Reference_indexes";

/// Core columns present on every row, in column order.
pub const CORE_COLUMNS: [&str; 8] = [
    QUERY_LANGUAGE_LOCATION,
    RAW_HTML_URL,
    HAS_AI_OVERVIEW,
    NUM_REFERENCES_USED,
    AI_OVERVIEW_TEXT_BLOCKS,
    AI_OVERVIEW_TYPE,
    AI_OVERVIEW_HIGHLIGHTED,
    REFERENCE_INDEXES,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Flag(bool),
    Int(i64),
    Text(String),
}

/// Tabular rendering: flags as `True`/`False`, integers in decimal.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Flag(true) => f.write_str("True"),
            Cell::Flag(false) => f.write_str("False"),
            Cell::Int(i) => write!(f, "{i}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// Ordered key/value cells. Inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRow {
    cells: Vec<(String, Cell)>,
}

impl OutputRow {
    pub fn get(&self, key: &str) -> Option<&Cell> {
        self.cells.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            Cell::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn cells(&self) -> &[(String, Cell)] {
        &self.cells
    }

    pub fn has_ai_overview(&self) -> bool {
        matches!(self.get(HAS_AI_OVERVIEW), Some(Cell::Flag(true)))
    }

    pub fn num_references_used(&self) -> usize {
        match self.get(NUM_REFERENCES_USED) {
            Some(Cell::Int(n)) => usize::try_from(*n).unwrap_or(0),
            _ => 0,
        }
    }

    /// Number of reference column groups actually present.
    pub fn reference_group_count(&self) -> usize {
        self.keys()
            .filter(|k| columns::is_reference_column(k) && k.ends_with("_index"))
            .count()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Cell) {
        let key = key.into();
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.cells.push((key, value)),
        }
    }

    pub fn extend(&mut self, cells: impl IntoIterator<Item = (String, Cell)>) {
        for (key, value) in cells {
            self.insert(key, value);
        }
    }
}

impl Serialize for OutputRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.cells.iter().map(|(k, v)| (k, v)))
    }
}

/// Build the output row for one unit from its canonical answer.
///
/// `raw_html_url` is passed through opaquely; `None` becomes an empty cell.
pub fn build_row(
    query: &str,
    location: &str,
    language: &str,
    answer: &AnswerRecord,
    raw_html_url: Option<&str>,
) -> OutputRow {
    let cited = cited_indexes(&answer.blocks);
    let cited_count = i64::try_from(cited.len()).unwrap_or(i64::MAX);

    let mut row = OutputRow::default();
    row.insert(
        QUERY_LANGUAGE_LOCATION,
        Cell::Text(format!("{query}_{language}_{location}")),
    );
    row.insert(
        RAW_HTML_URL,
        Cell::Text(raw_html_url.unwrap_or_default().to_string()),
    );
    row.insert(HAS_AI_OVERVIEW, Cell::Flag(answer.has_content()));
    row.insert(NUM_REFERENCES_USED, Cell::Int(cited_count));
    row.insert(
        AI_OVERVIEW_TEXT_BLOCKS,
        Cell::Text(flatten_blocks(&answer.blocks)),
    );
    row.insert(AI_OVERVIEW_TYPE, Cell::Text(answer.answer_type.clone()));
    row.insert(
        AI_OVERVIEW_HIGHLIGHTED,
        Cell::Text(answer.highlighted_terms.join(", ")),
    );
    row.insert(
        REFERENCE_INDEXES,
        Cell::Text(
            cited
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        ),
    );
    row.extend(reference_columns(&answer.references, &cited));
    row
}
