use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{AnswerRecord, AnswerSource, AuditUnit};
use crate::resolve::ResolvedAnswer;

const QUERY_LABEL_MAX_CHARS: usize = 40;

/// Archival JSON for one unit: the canonical answer next to the raw response it came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchiveRecord {
    pub timestamp: String,
    pub query: String,
    pub location: String,
    pub language: String,
    pub answer_source: AnswerSource,
    pub ai_overview: AnswerRecord,
    pub raw_response: Value,
    pub raw_html_url: String,
}

pub fn build_archive_record(
    unit: &AuditUnit,
    resolved: &ResolvedAnswer,
    raw_response: Value,
    raw_html_url: &str,
    timestamp: &str,
) -> ArchiveRecord {
    ArchiveRecord {
        timestamp: timestamp.to_string(),
        query: unit.query.clone(),
        location: unit.location.clone(),
        language: unit.language.clone(),
        answer_source: resolved.source,
        ai_overview: resolved.answer.clone(),
        raw_response,
        raw_html_url: raw_html_url.to_string(),
    }
}

/// `{label}_{language}_{location}_{date_stamp}.json`.
///
/// The label is the query lower-cased with `?` removed and spaces and path separators turned
/// into `_`, cut to 40 characters. The location loses its commas and gets the same `_`
/// substitution. Queries sharing a 40-character prefix map to the same name.
pub fn archive_file_name(query: &str, language: &str, location: &str, date_stamp: &str) -> String {
    let label: String = query
        .to_lowercase()
        .replace('?', "")
        .replace([' ', '/', '\\'], "_")
        .chars()
        .take(QUERY_LABEL_MAX_CHARS)
        .collect();
    let location = location.replace(',', "").replace([' ', '/', '\\'], "_");
    format!("{label}_{language}_{location}_{date_stamp}.json")
}

impl ArchiveRecord {
    pub fn file_name(&self, date_stamp: &str) -> String {
        archive_file_name(&self.query, &self.language, &self.location, date_stamp)
    }
}
