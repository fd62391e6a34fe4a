use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use aoa_core::extract::{archive_locator, extract_detail, extract_embedded, extract_primary};
use aoa_core::AnswerRecord;

fn fixture(name: &str) -> Value {
    let text = match name {
        "primary_inline" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../fixtures/serp/primary_inline.json"
        )),
        "primary_token" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../fixtures/serp/primary_token.json"
        )),
        "detail" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../fixtures/serp/detail.json"
        )),
        other => panic!("unknown fixture {other}"),
    };
    serde_json::from_str(text).expect("fixture json")
}

#[test]
fn primary_reads_inline_overview() {
    let record = extract_primary(&fixture("primary_inline"));

    assert_eq!(record.blocks.len(), 3);
    assert_eq!(record.blocks[0].kind, "paragraph");
    assert_eq!(record.blocks[0].reference_indexes, vec![0, 2]);
    assert_eq!(record.blocks[1].kind, "list");
    assert_eq!(record.blocks[1].items.len(), 3);
    assert_eq!(record.blocks[1].items[2].title, "Brain fog");
    assert_eq!(record.blocks[1].items[2].snippet, "");
    assert_eq!(record.references.len(), 4);
    assert_eq!(record.references[1].link, "");
    assert_eq!(record.references[1].link_or_url(), "https://www.mayoclinic.org/long-covid");
    assert_eq!(record.highlighted_terms, vec!["Long COVID", "fatigue"]);
    assert_eq!(record.answer_type, "");
    assert_eq!(record.continuation_token, None);
}

#[test]
fn unparseable_reference_indexes_are_discarded_at_extraction() {
    let record = extract_primary(&fixture("primary_inline"));
    // ["1", 2.0, "n/a"]
    assert_eq!(record.blocks[1].reference_indexes, vec![1, 2]);
}

#[test]
fn primary_exposes_continuation_token_when_overview_is_deferred() {
    let record = extract_primary(&fixture("primary_token"));
    assert!(record.blocks.is_empty());
    assert_eq!(
        record.continuation_token.as_deref(),
        Some("KIVu-nictVPLbtswEPwVwpdeREsk9bKAHAo0QHtoLz3lQlDUymYtiQJJ1XGD/HuX")
    );
    assert_eq!(record.answer_type, "organic");
    assert_eq!(record.highlighted_terms, vec!["vitamin D"]);
}

#[test]
fn detail_never_carries_a_continuation_token() {
    let mut response = fixture("detail");
    response["ai_overview"]["page_token"] = json!("should-not-propagate");
    let record = extract_detail(&response);
    assert_eq!(record.blocks.len(), 2);
    assert_eq!(record.references.len(), 4);
    assert_eq!(record.continuation_token, None);
}

#[test]
fn embedded_matches_type_case_insensitively() {
    let record = extract_embedded(&fixture("primary_token")).expect("embedded overview");
    assert_eq!(record.answer_type, "AI_Overview");
    assert_eq!(record.blocks.len(), 1);
    assert_eq!(record.blocks[0].reference_indexes, vec![4]);
    assert_eq!(record.references[0].source, "NIH ODS");
    assert_eq!(record.continuation_token, None);
}

#[test]
fn embedded_returns_first_match_only() {
    let response = json!({
        "related_questions": [
            {"type": "ai_overview", "text_blocks": [{"type": "paragraph", "snippet": "first"}]},
            {"type": "ai_overview", "text_blocks": [{"type": "paragraph", "snippet": "second"}]}
        ]
    });
    let record = extract_embedded(&response).expect("embedded overview");
    assert_eq!(record.blocks[0].snippet, "first");
}

#[test]
fn embedded_signals_not_found() {
    let response = json!({
        "related_questions": [{"type": "featured_snippet"}, "not an object", null]
    });
    assert_eq!(extract_embedded(&response), None);
    assert_eq!(extract_embedded(&json!({})), None);
}

#[test]
fn extractors_are_total_over_malformed_input() {
    for response in [
        json!(null),
        json!([1, 2, 3]),
        json!("text"),
        json!({"ai_overview": null}),
        json!({"ai_overview": "oops"}),
        json!({"ai_overview": {"text_blocks": "nope", "references": {"a": 1}, "type": 7}}),
        json!({"related_questions": {"type": "ai_overview"}}),
    ] {
        assert_eq!(extract_primary(&response), AnswerRecord::default());
        assert_eq!(extract_detail(&response), AnswerRecord::default());
        assert_eq!(extract_embedded(&response), None);
        assert_eq!(archive_locator(&response), "");
    }
}

#[test]
fn malformed_blocks_and_references_default_field_by_field() {
    let response = json!({
        "ai_overview": {
            "text_blocks": [
                null,
                {"type": "list", "list": [null, {"title": 5, "snippet": "kept"}], "reference_indexes": "3"}
            ],
            "references": [{"index": "x", "title": "No index"}, {"index": "6"}]
        }
    });
    let record = extract_primary(&response);
    assert_eq!(record.blocks.len(), 2);
    assert_eq!(record.blocks[0].kind, "");
    assert_eq!(record.blocks[1].items[0].title, "");
    assert_eq!(record.blocks[1].items[1].title, "");
    assert_eq!(record.blocks[1].items[1].snippet, "kept");
    assert!(record.blocks[1].reference_indexes.is_empty());
    assert_eq!(record.references[0].index, None);
    assert_eq!(record.references[1].index, Some(6));
}

#[test]
fn archive_locator_reads_raw_html_file() {
    assert_eq!(
        archive_locator(&fixture("primary_inline")),
        "https://serpapi.com/searches/6720a1f0c3b5e0d1a4f2b001.html"
    );
    assert_eq!(archive_locator(&fixture("detail")), "");
}
