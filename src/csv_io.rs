//! CSV input and output
//!
//! Input rows come back as header->value maps so the normalizer can match
//! recognized columns and pass the rest through. A row that fails to parse
//! is skipped with a warning; it never aborts the batch.

use crate::types::ScoredLead;
use anyhow::{Context, Result};
use csv::{ReaderBuilder, Writer};
use std::collections::BTreeMap;
use std::path::Path;

/// Canonical output column order
const OUTPUT_HEADER: &[&str] = &[
    "name",
    "email",
    "company",
    "job_title",
    "score",
    "status",
    "score_breakdown",
];

pub struct ReadOutcome {
    pub rows: Vec<BTreeMap<String, String>>,
    pub skipped: usize,
}

/// Read all rows from an input CSV. Unreadable files are fatal; malformed
/// rows are counted and skipped.
pub fn read_rows(path: &Path) -> Result<ReadOutcome> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open input CSV {:?}", path))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read CSV header from {:?}", path))?
        .clone();

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for (index, record) in reader.records().enumerate() {
        match record {
            Ok(record) => {
                let mut row = BTreeMap::new();
                for (i, value) in record.iter().enumerate() {
                    if let Some(header) = headers.get(i) {
                        let header = header.trim();
                        if !header.is_empty() {
                            row.insert(header.to_string(), value.to_string());
                        }
                    }
                }
                rows.push(row);
            }
            Err(err) => {
                skipped += 1;
                // +2: one for the header row, one for zero-based index
                eprintln!("Warning: skipping malformed row {}: {}", index + 2, err);
            }
        }
    }

    Ok(ReadOutcome { rows, skipped })
}

/// Write scored leads in the canonical column order, breakdown serialized
/// as a compact JSON object
pub fn write_scored(path: &Path, leads: &[ScoredLead], status: &str) -> Result<()> {
    let mut writer =
        Writer::from_path(path).with_context(|| format!("Failed to create output CSV {:?}", path))?;

    writer
        .write_record(OUTPUT_HEADER)
        .context("Failed to write output header")?;

    for scored in leads {
        let breakdown = serde_json::to_string(&scored.breakdown)
            .context("Failed to serialize score breakdown")?;
        let company = if scored.lead.company_name.is_empty() {
            &scored.lead.company_domain
        } else {
            &scored.lead.company_name
        };
        let score = scored.score.to_string();
        writer
            .write_record([
                scored.lead.full_name.as_str(),
                scored.lead.email.as_str(),
                company.as_str(),
                scored.lead.job_title.as_str(),
                score.as_str(),
                status,
                breakdown.as_str(),
            ])
            .with_context(|| format!("Failed to write row to {:?}", path))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush output CSV {:?}", path))?;
    Ok(())
}
