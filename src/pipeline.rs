//! Pipeline Driver
//!
//! Sequences normalize -> score -> dedupe -> prioritize over the full input
//! batch and writes the two output row sets (all scored leads, prioritized
//! subset). A malformed input row is skipped with a warning and counted; a
//! single bad row never aborts the run.

use crate::config::ScoringRules;
use crate::csv_io;
use crate::dedupe;
use crate::mx_check::MxChecker;
use crate::normalize;
use crate::prioritize;
use crate::score;
use crate::types::ScoredLead;
use anyhow::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub credits: f64,
    pub cost_per_enrich: f64,
    pub dedupe: bool,
    pub mx_check: bool,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub duplicates_removed: usize,
    pub scored: usize,
    pub selected: usize,
}

/// Run the whole pipeline from an input CSV to the two output CSVs
pub fn run(
    input: &Path,
    scored_out: &Path,
    priority_out: &Path,
    rules: &ScoringRules,
    opts: &PipelineOptions,
) -> Result<RunSummary> {
    // Reject a bad budget before touching the input
    prioritize::capacity(opts.credits, opts.cost_per_enrich)?;
    rules.validate()?;

    let outcome = csv_io::read_rows(input)?;
    println!("Read {} rows from {:?}", outcome.rows.len(), input);
    if outcome.skipped > 0 {
        println!("Skipped {} malformed rows", outcome.skipped);
    }

    let mut checker = if opts.mx_check { Some(MxChecker::new()) } else { None };

    let mut scored: Vec<ScoredLead> = Vec::with_capacity(outcome.rows.len());
    for row in &outcome.rows {
        let lead = normalize::normalize_row(row);
        let verdict = match &mut checker {
            Some(checker) if !lead.email_domain.is_empty() => Some(checker.check(&lead.email_domain)),
            _ => None,
        };
        scored.push(score::score_lead(lead, rules, verdict));
    }

    let (survivors, duplicates_removed) = if opts.dedupe {
        let (survivors, stats) = dedupe::dedupe_leads(scored);
        println!("Deduplicated: {} -> {}", stats.total_input, stats.unique_output);
        (survivors, stats.duplicates_removed)
    } else {
        (scored, 0)
    };

    let selected = prioritize::prioritize(&survivors, opts.credits, opts.cost_per_enrich)?;

    csv_io::write_scored(scored_out, &survivors, "scored")?;
    println!("Wrote {} scored leads to {:?}", survivors.len(), scored_out);

    csv_io::write_scored(priority_out, &selected, "enrich")?;
    println!("Wrote {} prioritized leads to {:?}", selected.len(), priority_out);

    Ok(RunSummary {
        rows_read: outcome.rows.len(),
        rows_skipped: outcome.skipped,
        duplicates_removed,
        scored: survivors.len(),
        selected: selected.len(),
    })
}
