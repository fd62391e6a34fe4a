use serde::{Deserialize, Serialize};

use crate::row::{reference_column_key, OutputRow, CORE_COLUMNS, REFERENCE_FIELDS};

/// Fixed-width projection of sparse output rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Project rows onto one shared header.
///
/// The header is the core columns followed by reference groups `1..=max`, where `max` is the
/// widest row's group count; any other key a row carries is appended in first-seen order.
/// Cells a row lacks render as `""`.
pub fn project_rows(rows: &[OutputRow]) -> Table {
    let max_groups = rows
        .iter()
        .map(OutputRow::reference_group_count)
        .max()
        .unwrap_or(0);

    let mut header: Vec<String> = CORE_COLUMNS.iter().map(|c| c.to_string()).collect();
    for position in 1..=max_groups {
        for field in REFERENCE_FIELDS {
            header.push(reference_column_key(position, field));
        }
    }
    for row in rows {
        for key in row.keys() {
            if !header.iter().any(|h| h == key) {
                header.push(key.to_string());
            }
        }
    }

    let rows = rows
        .iter()
        .map(|row| {
            header
                .iter()
                .map(|key| row.get(key).map(|c| c.to_string()).unwrap_or_default())
                .collect()
        })
        .collect();

    Table { header, rows }
}
