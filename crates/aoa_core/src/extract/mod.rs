//! The three places a search response can carry an AI Overview.
//!
//! Every extractor is total: any JSON value, including non-objects, yields a record (or `None`
//! for the embedded path) with missing fields defaulted through [`crate::normalize::coerce`].

use serde_json::Value;

use crate::domain::{AnswerRecord, ContentBlock, ListItem, ReferenceEntry};
use crate::normalize::coerce::{
    int_or_discard, object_or_empty, optional_string, sequence_or_empty, string_list,
    string_or_empty,
};

const AI_OVERVIEW_KEY: &str = "ai_overview";
const RELATED_QUESTIONS_KEY: &str = "related_questions";
const AI_OVERVIEW_TYPE: &str = "ai_overview";

/// Answer inlined in the main search response.
///
/// Carries `page_token` as the continuation token when the full overview lives server-side.
pub fn extract_primary(response: &Value) -> AnswerRecord {
    let overview = object_or_empty(response, AI_OVERVIEW_KEY);
    let mut record = answer_from_object(overview);
    record.continuation_token = optional_string(overview, "page_token");
    record
}

/// Answer from the detail response fetched with a continuation token. No further hop exists.
pub fn extract_detail(response: &Value) -> AnswerRecord {
    answer_from_object(object_or_empty(response, AI_OVERVIEW_KEY))
}

/// First related question tagged as an AI Overview, compared case-insensitively.
pub fn extract_embedded(response: &Value) -> Option<AnswerRecord> {
    sequence_or_empty(response, RELATED_QUESTIONS_KEY)
        .iter()
        .find(|question| string_or_empty(question, "type").to_lowercase() == AI_OVERVIEW_TYPE)
        .map(answer_from_object)
}

/// `search_metadata.raw_html_file`, or `""`.
pub fn archive_locator(response: &Value) -> String {
    string_or_empty(object_or_empty(response, "search_metadata"), "raw_html_file")
}

fn answer_from_object(overview: &Value) -> AnswerRecord {
    AnswerRecord {
        blocks: sequence_or_empty(overview, "text_blocks")
            .iter()
            .map(block_from_value)
            .collect(),
        references: sequence_or_empty(overview, "references")
            .iter()
            .map(reference_from_value)
            .collect(),
        highlighted_terms: string_list(overview, "snippet_highlighted_words"),
        answer_type: string_or_empty(overview, "type"),
        continuation_token: None,
    }
}

fn block_from_value(block: &Value) -> ContentBlock {
    ContentBlock {
        kind: string_or_empty(block, "type"),
        snippet: string_or_empty(block, "snippet"),
        items: sequence_or_empty(block, "list")
            .iter()
            .map(|item| ListItem {
                title: string_or_empty(item, "title"),
                snippet: string_or_empty(item, "snippet"),
            })
            .collect(),
        reference_indexes: sequence_or_empty(block, "reference_indexes")
            .iter()
            .filter_map(int_or_discard)
            .collect(),
    }
}

fn reference_from_value(reference: &Value) -> ReferenceEntry {
    ReferenceEntry {
        index: reference.get("index").and_then(int_or_discard),
        title: string_or_empty(reference, "title"),
        link: string_or_empty(reference, "link"),
        url: string_or_empty(reference, "url"),
        snippet: string_or_empty(reference, "snippet"),
        source: string_or_empty(reference, "source"),
    }
}
