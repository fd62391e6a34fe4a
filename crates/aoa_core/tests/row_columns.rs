use pretty_assertions::assert_eq;
use serde_json::Value;

use aoa_core::extract::{archive_locator, extract_detail, extract_embedded, extract_primary};
use aoa_core::normalize::cited_indexes;
use aoa_core::resolve::resolve_answer;
use aoa_core::row::{build_row, reference_columns, Cell, OutputRow};
use aoa_core::{AnswerRecord, ContentBlock, ReferenceEntry};

fn load(text: &str) -> Value {
    serde_json::from_str(text).expect("fixture json")
}

fn cited_block(refs: &[i64]) -> ContentBlock {
    ContentBlock {
        kind: "paragraph".to_string(),
        snippet: "text".to_string(),
        items: Vec::new(),
        reference_indexes: refs.to_vec(),
    }
}

fn reference(index: i64, title: &str, source: &str) -> ReferenceEntry {
    ReferenceEntry {
        index: Some(index),
        title: title.to_string(),
        link: format!("https://example.org/{index}"),
        url: String::new(),
        snippet: format!("snippet {index}"),
        source: source.to_string(),
    }
}

fn text(row: &OutputRow, key: &str) -> String {
    row.get(key).map(|c| c.to_string()).unwrap_or_default()
}

fn assert_row_invariant(row: &OutputRow, cited: usize) {
    assert_eq!(row.num_references_used(), cited);
    assert_eq!(row.reference_group_count(), cited);
    let reference_keys = row
        .keys()
        .filter(|k| k.starts_with("Reference entry "))
        .count();
    assert_eq!(reference_keys, cited * 5);
}

#[test]
fn columns_are_numbered_by_position_not_index() {
    let refs = vec![reference(2, "Two", "S2"), reference(7, "Seven", "S7")];
    let cells = reference_columns(&refs, &[2, 7]);

    let keys: Vec<&str> = cells.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "Reference entry 1_title",
            "Reference entry 1_link",
            "Reference entry 1_snippet",
            "Reference entry 1_source",
            "Reference entry 1_index",
            "Reference entry 2_title",
            "Reference entry 2_link",
            "Reference entry 2_snippet",
            "Reference entry 2_source",
            "Reference entry 2_index",
        ]
    );
    assert_eq!(cells[0].1, Cell::Text("Two".to_string()));
    assert_eq!(cells[4].1, Cell::Int(2));
    assert_eq!(cells[5].1, Cell::Text("Seven".to_string()));
    assert_eq!(cells[9].1, Cell::Int(7));
}

#[test]
fn dangling_citation_keeps_only_its_index() {
    let refs = vec![reference(1, "One", "S1")];
    let cells = reference_columns(&refs, &[9]);
    assert_eq!(
        cells,
        vec![
            ("Reference entry 1_title".to_string(), Cell::Text(String::new())),
            ("Reference entry 1_link".to_string(), Cell::Text(String::new())),
            ("Reference entry 1_snippet".to_string(), Cell::Text(String::new())),
            ("Reference entry 1_source".to_string(), Cell::Text(String::new())),
            ("Reference entry 1_index".to_string(), Cell::Int(9)),
        ]
    );
}

#[test]
fn duplicate_reference_index_last_seen_wins() {
    let refs = vec![reference(3, "Old", "A"), reference(3, "New", "B")];
    let cells = reference_columns(&refs, &[3]);
    assert_eq!(cells[0].1, Cell::Text("New".to_string()));
    assert_eq!(cells[3].1, Cell::Text("B".to_string()));
}

#[test]
fn link_falls_back_to_url() {
    let mut entry = reference(1, "One", "S1");
    entry.link = String::new();
    entry.url = "https://alt.example.org/1".to_string();
    let cells = reference_columns(&[entry], &[1]);
    assert_eq!(cells[1].1, Cell::Text("https://alt.example.org/1".to_string()));
}

#[test]
fn uncited_references_are_never_emitted() {
    let answer = AnswerRecord {
        blocks: vec![cited_block(&[1])],
        references: vec![reference(1, "One", "S1"), reference(2, "Two", "S2")],
        ..AnswerRecord::default()
    };
    let row = build_row("q", "loc", "en", &answer, None);
    assert_row_invariant(&row, 1);
    assert!(!row.cells().iter().any(|(_, v)| *v == Cell::Text("Two".to_string())));
}

#[test]
fn empty_answer_builds_row_without_reference_columns() {
    let row = build_row("q", "Miami, Florida, United States", "es", &AnswerRecord::default(), None);

    assert_eq!(text(&row, "Query_language_location"), "q_es_Miami, Florida, United States");
    assert_eq!(row.get("Has_AI_Overview"), Some(&Cell::Flag(false)));
    assert_eq!(row.get("Num_References_Used"), Some(&Cell::Int(0)));
    assert_eq!(text(&row, "Raw_HTML_URL"), "");
    assert_eq!(text(&row, "AI_overview_text_blocks"), "");
    assert_eq!(text(&row, "Reference_indexes"), "");
    assert_eq!(row.keys().count(), 8);
    assert_row_invariant(&row, 0);
}

#[test]
fn inline_fixture_row() {
    let response = load(include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../fixtures/serp/primary_inline.json"
    )));
    let primary = extract_primary(&response);
    let resolved = resolve_answer(primary, None, extract_embedded(&response));
    let locator = archive_locator(&response);
    let row = build_row(
        "What are the symptoms of long COVID?",
        "Los Angeles, California, United States",
        "en",
        &resolved.answer,
        Some(&locator),
    );

    assert!(row.has_ai_overview());
    assert_eq!(
        text(&row, "AI_overview_text_blocks"),
        "Long COVID symptoms can last weeks or months after infection.\n\
         - Fatigue\n\
         Extreme tiredness that does not improve with rest.\n\
         Shortness of breath\n\
         - Brain fog"
    );
    assert_eq!(text(&row, "AI_overview_snippet_highlighted"), "Long COVID, fatigue");
    assert_eq!(text(&row, "Reference_indexes"), "0, 1, 2");
    assert_eq!(
        text(&row, "Raw_HTML_URL"),
        "https://serpapi.com/searches/6720a1f0c3b5e0d1a4f2b001.html"
    );
    assert_eq!(text(&row, "Reference entry 1_source"), "CDC");
    assert_eq!(text(&row, "Reference entry 2_link"), "https://www.mayoclinic.org/long-covid");
    assert_eq!(text(&row, "Reference entry 3_index"), "2");
    assert_eq!(row.text("Reference entry 3_title"), Some("Long COVID research"));
    assert_eq!(row.text("Reference entry 3_index"), None);
    assert!(row.get("Reference entry 4_title").is_none());
    assert_row_invariant(&row, 3);
}

#[test]
fn detail_fixture_row_with_backfill_and_dangling_citation() {
    let primary = extract_primary(&load(include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../fixtures/serp/primary_token.json"
    ))));
    let detail = extract_detail(&load(include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../fixtures/serp/detail.json"
    ))));
    let resolved = resolve_answer(primary, Some(detail), None);
    let row = build_row("How much vitamin D should I take daily?", "Houston", "en", &resolved.answer, None);

    assert_eq!(cited_indexes(&resolved.answer.blocks), vec![2, 7, 9]);
    assert_eq!(text(&row, "AI_overview_type_snippet"), "organic");
    assert_eq!(text(&row, "AI_overview_snippet_highlighted"), "vitamin D");
    assert_eq!(text(&row, "Reference_indexes"), "2, 7, 9");
    assert_eq!(text(&row, "Reference entry 1_source"), "NIH");
    assert_eq!(text(&row, "Reference entry 2_title"), "Vitamin D dosing");
    assert_eq!(text(&row, "Reference entry 3_title"), "");
    assert_eq!(text(&row, "Reference entry 3_link"), "");
    assert_eq!(row.get("Reference entry 3_index"), Some(&Cell::Int(9)));
    assert_row_invariant(&row, 3);
}

#[test]
fn row_serializes_as_flat_map() {
    let answer = AnswerRecord {
        blocks: vec![cited_block(&[4])],
        references: vec![reference(4, "Four", "S4")],
        highlighted_terms: vec!["a".to_string(), "b".to_string()],
        answer_type: "organic".to_string(),
        continuation_token: None,
    };
    let row = build_row("q", "loc", "en", &answer, Some("https://raw"));
    let v = serde_json::to_value(&row).expect("serialize");
    assert_eq!(v["Has_AI_Overview"], Value::Bool(true));
    assert_eq!(v["Num_References_Used"], serde_json::json!(1));
    assert_eq!(v["AI_overview_snippet_highlighted"], Value::from("a, b"));
    assert_eq!(v["Reference entry 1_index"], serde_json::json!(4));
}
