//! Integration tests for the chatlens parsing pipeline
//!
//! These tests use fixture files in `tests/fixtures/` to verify the
//! end-to-end flow from raw export file to records and statistics.

use chatlens_core::{parse_chat_path, DateOrder, ImportOptions, TranscriptParser};
use std::path::PathBuf;

/// Get the path to a fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

// ============================================
// Basic Parsing Tests
// ============================================

#[test]
fn test_parse_basic_export() {
    let result = parse_chat_path(&fixture_path("basic.txt"), &ImportOptions::default())
        .expect("parse should succeed");

    // The encryption notice has no sender colon and is ignored
    assert_eq!(result.records.len(), 5);
    assert_eq!(result.stats.total_lines, 8);
    assert_eq!(result.stats.parsed_messages, 6);
    assert_eq!(result.stats.ignored_lines, 1);
    assert_eq!(result.stats.quoted_messages, 0);

    // BOM and direction marks are stripped
    let bob_media = &result.records[3];
    assert_eq!(bob_media.sender, "Bob");
    assert_eq!(bob_media.body, "image omitted");
    assert!(bob_media.is_media("image omitted"));

    // Multiline body joined with newlines
    assert_eq!(result.records[1].body, "hello\nthis spans\ntwo extra lines");
    assert_eq!(result.stats.multiline_messages, 2);
}

#[test]
fn test_year_inheritance_across_days() {
    let result = parse_chat_path(&fixture_path("basic.txt"), &ImportOptions::default()).unwrap();

    // Both short-form records inherit 2023 from the preceding full form
    assert_eq!(result.stats.inferred_dates, 2);
    assert_eq!(
        result.records[2].timestamp.to_string(),
        "2023-11-05 09:15:00"
    );
    assert_eq!(
        result.records[4].timestamp.to_string(),
        "2023-11-06 10:00:00"
    );
}

#[test]
fn test_timestamps_non_decreasing() {
    let result = parse_chat_path(&fixture_path("basic.txt"), &ImportOptions::default()).unwrap();
    let timestamps: Vec<_> = result.records.iter().map(|r| r.timestamp).collect();
    assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
}

// ============================================
// Quoted Reply Tests
// ============================================

#[test]
fn test_quoted_replies_fold_into_anchors() {
    let result = parse_chat_path(&fixture_path("quoted.txt"), &ImportOptions::default()).unwrap();

    // Two quote folds, so only the two anchor records remain
    assert_eq!(result.records.len(), 2);

    let first = &result.records[0];
    assert_eq!(first.sender, "Ann");
    assert!(first.is_quoted);
    assert_eq!(
        first.body,
        "look at this\n[05/11 09:05] Bob: Hi\ncontinuation of Bob line"
    );

    // The second fold appends text but does not set the flag
    let second = &result.records[1];
    assert!(!second.is_quoted);
    assert!(second.body.contains("earlier quote again"));

    // Counters reflect the first fold only
    assert_eq!(result.stats.quoted_messages, 1);
    assert_eq!(result.stats.multiline_messages, 2);
    assert_eq!(result.stats.inferred_dates, 0);
    assert_eq!(result.stats.ignored_lines, 0);
}

#[test]
fn test_quote_fold_grows_anchor_body() {
    let options = ImportOptions::default();
    let parser = TranscriptParser::new(options);

    let without_quote = parser
        .parse_lines(["[05/11/23, 09:05:00] Ann: look at this"])
        .unwrap();
    let with_quote = parser
        .parse_lines([
            "[05/11/23, 09:05:00] Ann: look at this",
            "[05/11 08:00] Bob: Hi",
        ])
        .unwrap();

    // The fold adds no record but strictly grows the anchor's body
    assert_eq!(without_quote.records.len(), with_quote.records.len());
    assert!(with_quote.records[0].body.len() > without_quote.records[0].body.len());
}

// ============================================
// Date Ordering Tests
// ============================================

#[test]
fn test_month_first_export_inferred() {
    let result =
        parse_chat_path(&fixture_path("month-first.txt"), &ImportOptions::default()).unwrap();

    assert_eq!(result.records.len(), 3);
    assert_eq!(
        result.records[0].timestamp.to_string(),
        "2023-03-15 10:00:00"
    );
    // The inferred ordering also applies to the short form
    assert_eq!(
        result.records[2].timestamp.to_string(),
        "2023-03-17 09:00:00"
    );
    assert_eq!(result.stats.inferred_dates, 1);
}

#[test]
fn test_sixty_unambiguous_day_first_blocks() {
    // Day values above 12 are only valid day-first
    let lines: Vec<String> = (0..60)
        .map(|i| {
            format!(
                "[{}/03/23, 10:{:02}:00] Ann: message {}",
                13 + (i % 16),
                i,
                i
            )
        })
        .collect();

    let result = TranscriptParser::new(ImportOptions::default())
        .parse_lines(&lines)
        .unwrap();

    assert_eq!(result.records.len(), 60);
    assert!(result
        .records
        .iter()
        .all(|r| r.timestamp.format("%m").to_string() == "03"));
}

#[test]
fn test_inferred_ordering_stable_beyond_sample_window() {
    // 55 ambiguous full-form blocks, then a short form whose reading
    // depends on the ordering chosen from the first 50.
    let mut lines: Vec<String> = (0..55)
        .map(|i| format!("[05/11/23, 10:{:02}:00] Ann: message {}", i % 60, i))
        .collect();
    lines.push("[06/11 23:00] Ann: tail".to_string());

    let result = TranscriptParser::new(ImportOptions::default())
        .parse_lines(&lines)
        .unwrap();

    // Day-first tie-break applies to every block, including past the window
    let tail = result.records.last().unwrap();
    assert_eq!(tail.timestamp.to_string(), "2023-11-06 23:00:00");
}

#[test]
fn test_pinned_ordering_overrides_inference() {
    let options = ImportOptions {
        date_order: Some(DateOrder::DayFirst),
        ..ImportOptions::default()
    };
    let result = parse_chat_path(&fixture_path("month-first.txt"), &options);

    // 03/15 day-first means month 15: fatal calendar error, not re-inference
    assert!(result.is_err());
}

// ============================================
// Statistics Tests
// ============================================

#[test]
fn test_line_conservation() {
    // Every line is accounted for by exactly one segmentation counter
    for fixture in ["basic.txt", "quoted.txt", "month-first.txt"] {
        let text = std::fs::read_to_string(fixture_path(fixture)).unwrap();
        let (_, stats) = chatlens_core::parse::segment::segment_lines(text.lines());
        assert_eq!(
            stats.total_lines,
            stats.header_lines + stats.continuation_lines + stats.dropped_leading,
            "conservation failed for {}",
            fixture
        );
    }
}

#[test]
fn test_empty_file_yields_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    std::fs::write(&path, "").unwrap();

    let result = parse_chat_path(&path, &ImportOptions::default()).unwrap();
    assert!(result.records.is_empty());
    assert_eq!(result.stats.total_lines, 0);
}
