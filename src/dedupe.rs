//! Deduplication Module
//!
//! Collapses leads sharing an identity key into one surviving record:
//! - Key is the lower-cased email when present and syntactically valid,
//!   else lower-cased full name + company domain
//! - Highest score wins; ties keep the first-seen record
//! - Survivors keep their original relative order

use crate::normalize::{email_syntax_valid, normalize_text};
use crate::types::{Lead, ScoredLead};
use std::collections::{HashMap, HashSet};

/// Derive the dedup grouping key for a lead. Stable across runs on
/// identical input.
pub fn identity_key(lead: &Lead) -> String {
    if !lead.email.is_empty() && email_syntax_valid(&lead.email) {
        // Normalizer already lower-cased the address
        return lead.email.clone();
    }
    format!("{}|{}", normalize_text(&lead.full_name), lead.company_domain)
}

#[derive(Debug, Default)]
pub struct DedupStats {
    pub total_input: usize,
    pub unique_output: usize,
    pub duplicates_removed: usize,
}

/// Keep one representative per identity key
pub fn dedupe_leads(leads: Vec<ScoredLead>) -> (Vec<ScoredLead>, DedupStats) {
    let total_input = leads.len();

    // First pass: best index per key (strictly higher score replaces,
    // equal score keeps the earlier record)
    let mut best: HashMap<String, usize> = HashMap::new();
    for (idx, lead) in leads.iter().enumerate() {
        match best.get(&lead.identity_key) {
            Some(&kept) if leads[kept].score >= lead.score => {}
            _ => {
                best.insert(lead.identity_key.clone(), idx);
            }
        }
    }

    let keep: HashSet<usize> = best.into_values().collect();
    let survivors: Vec<ScoredLead> = leads
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| keep.contains(idx))
        .map(|(_, lead)| lead)
        .collect();

    let stats = DedupStats {
        total_input,
        unique_output: survivors.len(),
        duplicates_removed: total_input - survivors.len(),
    };
    (survivors, stats)
}
