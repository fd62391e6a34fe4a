use crate::domain::{ContentBlock, LIST_KIND};

/// Flatten content blocks into one newline-joined document.
///
/// List blocks contribute `- {title}` and the item snippet as separate lines; every other block
/// contributes its snippet. Whitespace-only lines are dropped, so empty input yields `""`.
pub fn flatten_blocks(blocks: &[ContentBlock]) -> String {
    let mut lines: Vec<String> = Vec::new();
    for block in blocks {
        if block.kind.trim() == LIST_KIND {
            for item in &block.items {
                let title = item.title.trim();
                if !title.is_empty() {
                    lines.push(format!("- {title}"));
                }
                let snippet = item.snippet.trim();
                if !snippet.is_empty() {
                    lines.push(snippet.to_string());
                }
            }
        } else {
            let snippet = block.snippet.trim();
            if !snippet.is_empty() {
                lines.push(snippet.to_string());
            }
        }
    }
    lines.join("\n")
}
