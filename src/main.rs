use anyhow::Result;
use clap::Parser;
use lead_prioritizer::config::{self, ScoringRules};
use lead_prioritizer::pipeline::{self, PipelineOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lead-prioritizer")]
#[command(about = "Score scraped B2B leads, deduplicate them and pick which to enrich within a credit budget")]
#[command(version)]
struct Cli {
    /// Input CSV of raw leads
    #[arg(long)]
    input: PathBuf,
    /// Output CSV for all scored, deduplicated leads
    #[arg(long, default_value = "scored.csv")]
    scored: PathBuf,
    /// Output CSV for the prioritized subset
    #[arg(long, default_value = "prioritized.csv")]
    priority: PathBuf,
    /// Enrichment credits available
    #[arg(long)]
    credits: f64,
    /// Credits spent per enriched lead
    #[arg(long, default_value_t = 1.0)]
    cost_per_enrich: f64,
    /// Check MX records for email domains (network access required)
    #[arg(long)]
    mx_check: bool,
    /// Disable deduplication
    #[arg(long)]
    no_dedupe: bool,
    /// Optional YAML file overriding the built-in scoring rules
    #[arg(long)]
    rules: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let rules = match &cli.rules {
        Some(path) => config::load_rules(path)?,
        None => ScoringRules::default(),
    };

    let opts = PipelineOptions {
        credits: cli.credits,
        cost_per_enrich: cli.cost_per_enrich,
        dedupe: !cli.no_dedupe,
        mx_check: cli.mx_check,
    };

    let summary = pipeline::run(&cli.input, &cli.scored, &cli.priority, &rules, &opts)?;

    println!(
        "Done: {} scored, {} selected for enrichment ({} duplicates removed, {} malformed rows skipped)",
        summary.scored, summary.selected, summary.duplicates_removed, summary.rows_skipped
    );
    Ok(())
}
