use std::collections::BTreeMap;

use crate::domain::ReferenceEntry;

use super::Cell;

/// Subfields of every reference column group, in column order.
pub const REFERENCE_FIELDS: [&str; 5] = ["title", "link", "snippet", "source", "index"];

const REFERENCE_PREFIX: &str = "Reference entry ";

/// `Reference entry {position}_{field}`; positions are 1-based.
pub fn reference_column_key(position: usize, field: &str) -> String {
    format!("{REFERENCE_PREFIX}{position}_{field}")
}

/// True for keys produced by [`reference_column_key`].
pub fn is_reference_column(key: &str) -> bool {
    key.starts_with(REFERENCE_PREFIX)
}

/// References keyed by their own index. Entries without an index are unreachable; on duplicate
/// indexes the last entry wins.
pub fn index_references(references: &[ReferenceEntry]) -> BTreeMap<i64, &ReferenceEntry> {
    let mut by_index = BTreeMap::new();
    for reference in references {
        if let Some(index) = reference.index {
            by_index.insert(index, reference);
        }
    }
    by_index
}

/// Five cells per cited index, numbered by position in `cited`.
///
/// A cited index with no matching reference still gets its group, with only `_index` populated.
pub fn reference_columns(references: &[ReferenceEntry], cited: &[i64]) -> Vec<(String, Cell)> {
    let by_index = index_references(references);
    let mut cells = Vec::with_capacity(cited.len() * REFERENCE_FIELDS.len());
    for (offset, index) in cited.iter().enumerate() {
        let position = offset + 1;
        let reference = by_index.get(index).copied();
        let text = |f: fn(&ReferenceEntry) -> &str| {
            Cell::Text(reference.map(f).unwrap_or_default().to_string())
        };
        cells.push((reference_column_key(position, "title"), text(|r| r.title.as_str())));
        cells.push((reference_column_key(position, "link"), text(ReferenceEntry::link_or_url)));
        cells.push((reference_column_key(position, "snippet"), text(|r| r.snippet.as_str())));
        cells.push((reference_column_key(position, "source"), text(|r| r.source.as_str())));
        cells.push((reference_column_key(position, "index"), Cell::Int(*index)));
    }
    cells
}
