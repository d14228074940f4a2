//! Score Calculator
//!
//! Computes five independent [0,1] sub-scores per lead and combines them
//! into a weighted 0-100 total with a per-sub-score breakdown.
//!
//! A sub-score whose input is entirely absent is omitted from both the
//! numerator and the denominator of the weighted average, so leads with
//! sparse data are judged only on what is known rather than penalized to
//! zero. A lead with no computable sub-score at all scores 0 with an empty
//! breakdown. Scoring never fails.

use crate::config::ScoringRules;
use crate::dedupe;
use crate::mx_check::MxVerdict;
use crate::normalize::{email_syntax_valid, normalize_text, registered_domain};
use crate::types::{Lead, ScoreBreakdown, ScoredLead};

/// Sub-score for a syntactically valid address on a personal provider
const PERSONAL_PROVIDER_SCORE: f64 = 0.3;

/// Seniority tier values
const TOP_TIER_SCORE: f64 = 1.0;
const MID_TIER_SCORE: f64 = 0.5;

/// Fields counted by the completeness sub-score
const COMPLETENESS_FIELD_COUNT: f64 = 5.0;

/// Score a normalized lead. The MX verdict, when the check ran for this
/// lead's domain, feeds into email_validity; Unknown behaves exactly as if
/// the check had not been requested.
pub fn score_lead(lead: Lead, rules: &ScoringRules, mx: Option<MxVerdict>) -> ScoredLead {
    let breakdown = ScoreBreakdown {
        completeness: completeness_score(&lead),
        seniority: seniority_score(&lead.job_title, rules),
        email_validity: email_validity_score(&lead, rules, mx),
        domain_match: domain_match_score(&lead),
        company_signal: company_signal_score(&lead, rules),
    };

    let score = weighted_total(&breakdown, rules);
    let identity_key = dedupe::identity_key(&lead);

    ScoredLead {
        lead,
        score,
        breakdown,
        identity_key,
    }
}

/// Fraction of {email, phone, linkedin, company, job title} present, in
/// steps of 1/5. Omitted when none of the five is present.
fn completeness_score(lead: &Lead) -> Option<f64> {
    let has_company = !lead.company_name.is_empty() || !lead.company_domain.is_empty();
    let present = [
        !lead.email.is_empty(),
        !lead.phone.is_empty(),
        !lead.linkedin_url.is_empty(),
        has_company,
        !lead.job_title.is_empty(),
    ]
    .iter()
    .filter(|p| **p)
    .count();

    if present == 0 {
        return None;
    }
    Some(round3(present as f64 / COMPLETENESS_FIELD_COUNT))
}

/// 1.0 for a top-tier title keyword, 0.5 for mid-tier, 0.0 otherwise.
/// Omitted when the title is absent.
fn seniority_score(job_title: &str, rules: &ScoringRules) -> Option<f64> {
    if job_title.is_empty() {
        return None;
    }
    let title = normalize_text(job_title);
    if contains_any(&title, &rules.title_tiers.top) {
        Some(TOP_TIER_SCORE)
    } else if contains_any(&title, &rules.title_tiers.mid) {
        Some(MID_TIER_SCORE)
    } else {
        Some(0.0)
    }
}

/// 1.0 valid syntax on a corporate domain, 0.3 valid on a personal
/// provider, 0.0 invalid syntax. Omitted when the email is absent. A
/// DoesNotExist MX verdict forces 0.0; Unknown leaves the syntax result.
fn email_validity_score(lead: &Lead, rules: &ScoringRules, mx: Option<MxVerdict>) -> Option<f64> {
    if lead.email.is_empty() {
        return None;
    }

    let syntactic = if !email_syntax_valid(&lead.email) {
        0.0
    } else if rules.is_personal_domain(&lead.email_domain) {
        PERSONAL_PROVIDER_SCORE
    } else {
        1.0
    };

    match mx {
        Some(MxVerdict::DoesNotExist) => Some(0.0),
        Some(MxVerdict::Exists) | Some(MxVerdict::Unknown) | None => Some(syntactic),
    }
}

/// 1.0 when the registered email domain equals the registered company
/// domain, 0.0 when both are present but differ. Omitted unless both are
/// present.
fn domain_match_score(lead: &Lead) -> Option<f64> {
    if lead.email_domain.is_empty() || lead.company_domain.is_empty() {
        return None;
    }
    let matches = registered_domain(&lead.email_domain) == registered_domain(&lead.company_domain);
    Some(if matches { 1.0 } else { 0.0 })
}

/// Corporate company domain scores the domain base, a bare company name a
/// reduced base, and estimated revenue adds a bonus scaled against the cap.
/// A personal-provider company domain scores 0.0. Omitted when no
/// company-identifying field is present at all.
fn company_signal_score(lead: &Lead, rules: &ScoringRules) -> Option<f64> {
    let cfg = &rules.company_signal;

    let base = if !lead.company_domain.is_empty() {
        if rules.is_personal_domain(&lead.company_domain) {
            0.0
        } else {
            cfg.domain_base
        }
    } else if !lead.company_name.is_empty() {
        cfg.name_only_base
    } else {
        return None;
    };

    let bonus = parse_revenue(&lead.estimated_revenue)
        .map(|v| cfg.revenue_bonus * (v.min(cfg.revenue_cap) / cfg.revenue_cap))
        .unwrap_or(0.0);

    Some(round3((base + bonus).min(1.0)))
}

/// Weighted average over the present sub-scores only, scaled to 0-100 and
/// rounded. No present sub-score yields 0.
fn weighted_total(breakdown: &ScoreBreakdown, rules: &ScoringRules) -> u8 {
    let parts = [
        (breakdown.completeness, rules.weights.completeness),
        (breakdown.seniority, rules.weights.seniority),
        (breakdown.email_validity, rules.weights.email_validity),
        (breakdown.domain_match, rules.weights.domain_match),
        (breakdown.company_signal, rules.weights.company_signal),
    ];

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (sub, weight) in parts {
        if let Some(value) = sub {
            numerator += value * weight;
            denominator += weight;
        }
    }

    if denominator <= 0.0 {
        return 0;
    }
    (100.0 * numerator / denominator).round().clamp(0.0, 100.0) as u8
}

/// Parse an estimated-revenue string, tolerating currency symbols and
/// thousands separators. None when nothing numeric remains.
fn parse_revenue(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse::<f64>().ok()
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| text.contains(k.as_str()))
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
