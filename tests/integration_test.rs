//! Integration tests for the lead prioritizer pipeline
//! Drives the full normalize -> score -> dedupe -> prioritize run over
//! fixture CSVs and checks the written outputs

use lead_prioritizer::config::ScoringRules;
use lead_prioritizer::pipeline::{run, PipelineOptions};
use std::fs;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn options(credits: f64) -> PipelineOptions {
    PipelineOptions {
        credits,
        cost_per_enrich: 1.0,
        dedupe: true,
        mx_check: false,
    }
}

/// Data rows of an output CSV (header stripped)
fn data_rows(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("output CSV should exist")
        .lines()
        .skip(1)
        .map(String::from)
        .collect()
}

fn score_of(row: &str) -> u8 {
    // Column order is name,email,company,job_title,score,status,breakdown
    row.split(',').nth(4).and_then(|s| s.parse().ok()).expect("score column")
}

#[test]
fn test_full_pipeline_dedupes_and_prioritizes() {
    let dir = tempfile::tempdir().unwrap();
    let scored_path = dir.path().join("scored.csv");
    let priority_path = dir.path().join("prioritized.csv");

    let summary = run(
        &fixture("leads.csv"),
        &scored_path,
        &priority_path,
        &ScoringRules::default(),
        &options(2.0),
    )
    .expect("pipeline should succeed");

    assert_eq!(summary.rows_read, 6);
    assert_eq!(summary.rows_skipped, 0);
    // The two alice@acme.com records collapse to one
    assert_eq!(summary.duplicates_removed, 1);
    assert_eq!(summary.scored, 5);
    assert_eq!(summary.selected, 2);

    let scored = data_rows(&scored_path);
    assert_eq!(scored.len(), 5);
    assert!(scored.iter().all(|row| row.contains(",scored,")));

    // The richer duplicate wins the group
    let alice = scored
        .iter()
        .find(|row| row.contains("alice@acme.com"))
        .expect("alice should survive");
    assert!(alice.contains("Chief Revenue Officer"));

    let priority = data_rows(&priority_path);
    assert_eq!(priority.len(), 2);
    assert!(priority.iter().all(|row| row.contains(",enrich,")));
}

#[test]
fn test_priority_output_sorted_descending() {
    let dir = tempfile::tempdir().unwrap();
    let scored_path = dir.path().join("scored.csv");
    let priority_path = dir.path().join("prioritized.csv");

    run(
        &fixture("leads.csv"),
        &scored_path,
        &priority_path,
        &ScoringRules::default(),
        &options(100.0),
    )
    .expect("pipeline should succeed");

    let scores: Vec<u8> = data_rows(&priority_path).iter().map(|r| score_of(r)).collect();
    let mut sorted = scores.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(scores, sorted);

    // High-band lead leads the selection, low-band trails
    assert!(scores[0] >= 80);
    assert!(*scores.last().unwrap() < 50);
}

#[test]
fn test_no_dedupe_keeps_every_row() {
    let dir = tempfile::tempdir().unwrap();
    let scored_path = dir.path().join("scored.csv");
    let priority_path = dir.path().join("prioritized.csv");

    let mut opts = options(10.0);
    opts.dedupe = false;

    let summary = run(
        &fixture("leads.csv"),
        &scored_path,
        &priority_path,
        &ScoringRules::default(),
        &opts,
    )
    .expect("pipeline should succeed");

    assert_eq!(summary.scored, summary.rows_read);
    assert_eq!(data_rows(&scored_path).len(), 6);
}

#[test]
fn test_zero_credits_selects_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let scored_path = dir.path().join("scored.csv");
    let priority_path = dir.path().join("prioritized.csv");

    let summary = run(
        &fixture("leads.csv"),
        &scored_path,
        &priority_path,
        &ScoringRules::default(),
        &options(0.0),
    )
    .expect("pipeline should succeed");

    assert_eq!(summary.selected, 0);
    assert!(data_rows(&priority_path).is_empty());
    // Scored output is unaffected by the budget
    assert_eq!(summary.scored, 5);
}

#[test]
fn test_malformed_row_skipped_without_aborting() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("bad.csv");
    // Second data row carries invalid UTF-8 and cannot parse
    fs::write(
        &input_path,
        b"email,job_title\ngood@acme.com,CEO\n\xff\xfe,broken\nalso@fine.io,Manager\n",
    )
    .unwrap();

    let scored_path = dir.path().join("scored.csv");
    let priority_path = dir.path().join("prioritized.csv");

    let summary = run(
        &input_path,
        &scored_path,
        &priority_path,
        &ScoringRules::default(),
        &options(10.0),
    )
    .expect("one bad row must not abort the batch");

    assert_eq!(summary.rows_skipped, 1);
    assert_eq!(summary.rows_read, 2);
    assert_eq!(data_rows(&scored_path).len(), 2);
}

#[test]
fn test_invalid_cost_rejected_before_processing() {
    let dir = tempfile::tempdir().unwrap();
    let scored_path = dir.path().join("scored.csv");
    let priority_path = dir.path().join("prioritized.csv");

    let mut opts = options(10.0);
    opts.cost_per_enrich = 0.0;

    let result = run(
        &fixture("leads.csv"),
        &scored_path,
        &priority_path,
        &ScoringRules::default(),
        &opts,
    );

    assert!(result.is_err());
    // Rejected before any output was produced
    assert!(!scored_path.exists());
}

#[test]
fn test_unreadable_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let result = run(
        &dir.path().join("does_not_exist.csv"),
        &dir.path().join("scored.csv"),
        &dir.path().join("prioritized.csv"),
        &ScoringRules::default(),
        &options(10.0),
    );
    assert!(result.is_err());
}
