use serde::{Deserialize, Serialize};

/// Block kind whose content lives in `items` rather than `snippet`.
pub const LIST_KIND: &str = "list";

/// One unit of AI Overview content, in reading order.
///
/// Field names serialize with the search API's vocabulary so archived records read like the raw
/// payload they were normalized from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentBlock {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(rename = "list", default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ListItem>,
    /// Citation indexes in source order; values that were not integers are already dropped.
    #[serde(default)]
    pub reference_indexes: Vec<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
}

/// One citation. `index` is the identifier blocks cite, not a position.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReferenceEntry {
    #[serde(default)]
    pub index: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub source: String,
}

impl ReferenceEntry {
    /// `link`, or the alternate `url` field when `link` is empty.
    pub fn link_or_url(&self) -> &str {
        if self.link.is_empty() {
            &self.url
        } else {
            &self.link
        }
    }
}

/// Normalized AI answer shared by all three extraction paths.
///
/// `Default` is the canonical empty record used when no path produced content.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerRecord {
    #[serde(rename = "text_blocks", default)]
    pub blocks: Vec<ContentBlock>,
    #[serde(default)]
    pub references: Vec<ReferenceEntry>,
    #[serde(rename = "snippet_highlighted_words", default)]
    pub highlighted_terms: Vec<String>,
    #[serde(rename = "type", default)]
    pub answer_type: String,
    #[serde(rename = "page_token", default, skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
}

impl AnswerRecord {
    /// The only "usable answer" signal: references or highlighted terms never count.
    pub fn has_content(&self) -> bool {
        !self.blocks.is_empty()
    }
}

/// Which extraction path supplied the canonical answer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    Primary,
    Detail,
    Embedded,
    #[serde(rename = "none")]
    NoAnswer,
}

impl AnswerSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Detail => "detail",
            Self::Embedded => "embedded",
            Self::NoAnswer => "none",
        }
    }
}

/// One (query, locale, language) combination processed by an audit run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditUnit {
    pub query: String,
    pub locale_label: String,
    pub location: String,
    pub language: String,
}
