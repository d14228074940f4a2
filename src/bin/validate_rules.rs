//! Scoring Rules Validation Binary
//!
//! Validates a scoring rules YAML before a pipeline run:
//! - Sub-score weights must sum to 1.0
//! - Title keyword tiers and the personal-provider list must be non-empty
//! - Company-signal revenue cap must be positive

use anyhow::{Context, Result};
use lead_prioritizer::config;
use std::path::PathBuf;

fn main() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "rules.yaml".to_string());

    println!("=== Scoring Rules Validator ===");

    let rules = config::load_rules(&PathBuf::from(&path))
        .with_context(|| format!("Rules file {} failed validation", path))?;

    println!(
        "Weights: completeness={} seniority={} email_validity={} domain_match={} company_signal={} (sum {})",
        rules.weights.completeness,
        rules.weights.seniority,
        rules.weights.email_validity,
        rules.weights.domain_match,
        rules.weights.company_signal,
        rules.weights.sum(),
    );
    println!("Top-tier title keywords: {}", rules.title_tiers.top.len());
    println!("Mid-tier title keywords: {}", rules.title_tiers.mid.len());
    println!("Personal email providers: {}", rules.personal_email_domains.len());
    println!(
        "Company signal: domain_base={} name_only_base={} revenue_bonus={} (cap {})",
        rules.company_signal.domain_base,
        rules.company_signal.name_only_base,
        rules.company_signal.revenue_bonus,
        rules.company_signal.revenue_cap,
    );

    println!("OK: {} is valid", path);
    Ok(())
}
