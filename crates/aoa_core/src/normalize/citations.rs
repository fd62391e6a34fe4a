use std::collections::BTreeSet;

use crate::domain::ContentBlock;

/// Ascending, deduplicated union of every block's citation indexes.
///
/// Column numbering downstream follows this order.
pub fn cited_indexes(blocks: &[ContentBlock]) -> Vec<i64> {
    blocks
        .iter()
        .flat_map(|b| b.reference_indexes.iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
