//! Merge the three extraction candidates into one canonical answer.
//!
//! Priority is the order of [`STRATEGIES`]: the first strategy whose candidate has blocks wins
//! and later candidates are never consulted. When none applies the canonical empty record is
//! returned.

use serde::{Deserialize, Serialize};

use crate::domain::{AnswerRecord, AnswerSource};

/// Candidate records for one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    pub primary: AnswerRecord,
    pub detail: Option<AnswerRecord>,
    pub embedded: Option<AnswerRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedAnswer {
    pub source: AnswerSource,
    pub answer: AnswerRecord,
}

/// One resolution tier: a content predicate over the candidates and the record it yields.
pub struct Strategy {
    pub source: AnswerSource,
    applies: fn(&Candidates) -> bool,
    produce: fn(Candidates) -> AnswerRecord,
}

pub const STRATEGIES: [Strategy; 3] = [
    Strategy {
        source: AnswerSource::Primary,
        applies: |c| c.primary.has_content(),
        produce: |c| c.primary,
    },
    Strategy {
        source: AnswerSource::Detail,
        applies: |c| c.detail.as_ref().is_some_and(AnswerRecord::has_content),
        produce: backfilled_detail,
    },
    Strategy {
        source: AnswerSource::Embedded,
        applies: |c| c.embedded.as_ref().is_some_and(AnswerRecord::has_content),
        produce: |c| c.embedded.unwrap_or_default(),
    },
];

/// Sources in the order they are tried.
pub fn strategy_order() -> Vec<AnswerSource> {
    STRATEGIES.iter().map(|s| s.source).collect()
}

pub fn resolve_candidates(candidates: Candidates) -> ResolvedAnswer {
    for strategy in STRATEGIES.iter() {
        if (strategy.applies)(&candidates) {
            tracing::debug!(source = strategy.source.as_str(), "resolved AI overview");
            return ResolvedAnswer {
                source: strategy.source,
                answer: (strategy.produce)(candidates),
            };
        }
    }
    tracing::debug!("no AI overview in any candidate");
    ResolvedAnswer {
        source: AnswerSource::NoAnswer,
        answer: AnswerRecord::default(),
    }
}

pub fn resolve_answer(
    primary: AnswerRecord,
    detail: Option<AnswerRecord>,
    embedded: Option<AnswerRecord>,
) -> ResolvedAnswer {
    resolve_candidates(Candidates {
        primary,
        detail,
        embedded,
    })
}

/// Detail answers often omit highlight words and type; those come from the primary response.
fn backfilled_detail(candidates: Candidates) -> AnswerRecord {
    let Candidates {
        primary, detail, ..
    } = candidates;
    let mut detail = detail.unwrap_or_default();
    if detail.highlighted_terms.is_empty() {
        detail.highlighted_terms = primary.highlighted_terms;
    }
    if detail.answer_type.is_empty() {
        detail.answer_type = primary.answer_type;
    }
    detail
}
