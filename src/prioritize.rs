//! Enrichment Prioritization
//!
//! Greedy selection of the highest-scored leads within a credit budget.
//! Sort is stable, so equal scores keep their first-seen order.

use crate::types::ScoredLead;
use anyhow::{bail, Result};

/// Number of leads the budget can pay for
pub fn capacity(credits: f64, cost_per_enrich: f64) -> Result<usize> {
    if cost_per_enrich <= 0.0 {
        bail!("cost per enrichment must be positive, got {}", cost_per_enrich);
    }
    if credits < 0.0 {
        bail!("credit budget must be non-negative, got {}", credits);
    }
    Ok((credits / cost_per_enrich).floor() as usize)
}

/// Select the leads worth enriching, best score first, within the budget
pub fn prioritize(leads: &[ScoredLead], credits: f64, cost_per_enrich: f64) -> Result<Vec<ScoredLead>> {
    let cap = capacity(credits, cost_per_enrich)?;

    let mut sorted: Vec<ScoredLead> = leads.to_vec();
    sorted.sort_by(|a, b| b.score.cmp(&a.score));
    sorted.truncate(cap);
    Ok(sorted)
}
