//! Sequential audit run: one unit is fetched, resolved and turned into a row before the next
//! starts. A failing unit is recorded and skipped.

use std::thread;
use std::time::Duration;

use aoa_core::archive::{build_archive_record, ArchiveRecord};
use aoa_core::error::AppError;
use aoa_core::extract::{archive_locator, extract_detail, extract_embedded, extract_primary};
use aoa_core::resolve::resolve_answer;
use aoa_core::row::{build_row, OutputRow};
use aoa_core::AuditUnit;
use serde::{Deserialize, Serialize};

use crate::search::{SearchApi, SearchRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub country: String,
    pub no_cache: bool,
    /// Pause after each successful unit.
    pub pause: Duration,
}

#[derive(Debug, Clone)]
pub struct UnitOutcome {
    pub row: OutputRow,
    pub archive: ArchiveRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnitFailure {
    pub unit: AuditUnit,
    pub error: AppError,
}

#[derive(Debug, Clone, Default)]
pub struct AuditRun {
    pub rows: Vec<OutputRow>,
    pub archives: Vec<ArchiveRecord>,
    pub failures: Vec<UnitFailure>,
}

/// Process one unit end to end.
///
/// Only the primary search can fail the unit. The detail call is made only when the primary
/// response has no inline blocks but carries a continuation token; if it fails the unit goes
/// on without a detail candidate.
pub fn audit_unit(
    api: &dyn SearchApi,
    unit: &AuditUnit,
    options: &RunOptions,
    timestamp: &str,
) -> Result<UnitOutcome, AppError> {
    let response = api.search(&SearchRequest {
        query: unit.query.clone(),
        location: unit.location.clone(),
        country: options.country.clone(),
        language: unit.language.clone(),
        no_cache: options.no_cache,
    })?;

    let primary = extract_primary(&response);
    let raw_html_url = archive_locator(&response);

    let detail = match (&primary.continuation_token, primary.has_content()) {
        (Some(token), false) => match api.ai_overview_detail(token, options.no_cache) {
            Ok(detail_response) => Some(extract_detail(&detail_response)),
            Err(e) => {
                tracing::warn!(query = %unit.query, error = %e, "AI overview detail fetch failed");
                None
            }
        },
        _ => None,
    };

    let embedded = extract_embedded(&response);
    let resolved = resolve_answer(primary, detail, embedded);

    let row = build_row(
        &unit.query,
        &unit.location,
        &unit.language,
        &resolved.answer,
        Some(&raw_html_url),
    );
    let archive = build_archive_record(unit, &resolved, response, &raw_html_url, timestamp);
    Ok(UnitOutcome { row, archive })
}

/// Run every unit in order. `now` supplies the archive timestamp for each unit.
pub fn run_audit(
    api: &dyn SearchApi,
    units: &[AuditUnit],
    options: &RunOptions,
    now: &dyn Fn() -> String,
) -> AuditRun {
    let mut run = AuditRun::default();
    for unit in units {
        match audit_unit(api, unit, options, &now()) {
            Ok(outcome) => {
                tracing::info!(
                    query = %unit.query,
                    language = %unit.language,
                    locale = %unit.locale_label,
                    source = outcome.archive.answer_source.as_str(),
                    references = outcome.row.num_references_used(),
                    "unit done"
                );
                run.rows.push(outcome.row);
                run.archives.push(outcome.archive);
                if !options.pause.is_zero() {
                    thread::sleep(options.pause);
                }
            }
            Err(error) => {
                tracing::error!(
                    query = %unit.query,
                    language = %unit.language,
                    locale = %unit.locale_label,
                    error = %error,
                    "unit failed"
                );
                run.failures.push(UnitFailure {
                    unit: unit.clone(),
                    error,
                });
            }
        }
    }
    run
}
