//! Scoring Rules Configuration
//!
//! Weights, title keyword tiers, the personal-provider list and the
//! company-signal scaling all live in data so they can be tuned or swapped
//! in tests without touching the calculator. Built-in defaults apply when
//! no rules file is given.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tolerance when checking that weights sum to 1.0
const WEIGHT_SUM_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoringRules {
    #[serde(default)]
    pub weights: Weights,
    #[serde(default)]
    pub title_tiers: TitleTiers,
    #[serde(default = "default_personal_email_domains")]
    pub personal_email_domains: Vec<String>,
    #[serde(default)]
    pub company_signal: CompanySignalRules,
}

impl Default for ScoringRules {
    fn default() -> Self {
        ScoringRules {
            weights: Weights::default(),
            title_tiers: TitleTiers::default(),
            personal_email_domains: default_personal_email_domains(),
            company_signal: CompanySignalRules::default(),
        }
    }
}

/// Fixed sub-score weights. Must sum to 1 over the full set; leads missing
/// a sub-score are renormalized over the weights that remain.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Weights {
    pub completeness: f64,
    pub seniority: f64,
    pub email_validity: f64,
    pub domain_match: f64,
    pub company_signal: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            completeness: 0.25,
            seniority: 0.25,
            email_validity: 0.20,
            domain_match: 0.15,
            company_signal: 0.15,
        }
    }
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.completeness + self.seniority + self.email_validity + self.domain_match + self.company_signal
    }
}

/// Job-title keywords mapped to seniority tiers
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TitleTiers {
    pub top: Vec<String>,
    pub mid: Vec<String>,
}

impl Default for TitleTiers {
    fn default() -> Self {
        TitleTiers {
            top: vec![
                "ceo", "cto", "cfo", "coo", "chief", "founder", "co-founder", "owner",
                "president", "vp", "vice president", "director",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            mid: vec!["manager", "head", "lead", "principal"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Scaling for the company_signal sub-score
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompanySignalRules {
    /// Base value for a corporate (non personal-provider) company domain
    pub domain_base: f64,
    /// Base value when only a company name is known
    pub name_only_base: f64,
    /// Revenue at or above this caps the bonus
    pub revenue_cap: f64,
    /// Maximum bonus from estimated revenue
    pub revenue_bonus: f64,
}

impl Default for CompanySignalRules {
    fn default() -> Self {
        CompanySignalRules {
            domain_base: 0.8,
            name_only_base: 0.4,
            revenue_cap: 10_000_000.0,
            revenue_bonus: 0.2,
        }
    }
}

fn default_personal_email_domains() -> Vec<String> {
    vec![
        "gmail.com", "yahoo.com", "hotmail.com", "outlook.com", "aol.com",
        "icloud.com", "me.com", "protonmail.com", "ymail.com", "gmx.com",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl ScoringRules {
    pub fn validate(&self) -> Result<()> {
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            bail!("sub-score weights must sum to 1.0, got {}", sum);
        }
        if self.title_tiers.top.is_empty() || self.title_tiers.mid.is_empty() {
            bail!("title keyword tiers must not be empty");
        }
        if self.personal_email_domains.is_empty() {
            bail!("personal email domain list must not be empty");
        }
        if self.company_signal.revenue_cap <= 0.0 {
            bail!(
                "company_signal revenue_cap must be positive, got {}",
                self.company_signal.revenue_cap
            );
        }
        Ok(())
    }

    pub fn is_personal_domain(&self, domain: &str) -> bool {
        let domain = domain.to_lowercase();
        self.personal_email_domains.iter().any(|d| d == &domain)
    }
}

/// Load scoring rules from a YAML file and validate them
pub fn load_rules(path: &Path) -> Result<ScoringRules> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scoring rules from {:?}", path))?;

    let rules: ScoringRules = serde_yaml::from_str(&content)
        .with_context(|| "Failed to parse scoring rules YAML")?;

    rules.validate()?;
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!((ScoringRules::default().weights.sum() - 1.0).abs() < WEIGHT_SUM_EPSILON);
        assert!(ScoringRules::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_weight_sum() {
        let mut rules = ScoringRules::default();
        rules.weights.completeness = 0.9;
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_tiers() {
        let mut rules = ScoringRules::default();
        rules.title_tiers.top.clear();
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_yaml_overrides_merge_with_defaults() {
        let yaml = r#"
weights:
  completeness: 0.2
  seniority: 0.2
  email_validity: 0.2
  domain_match: 0.2
  company_signal: 0.2
"#;
        let rules: ScoringRules = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rules.weights.seniority, 0.2);
        // Untouched sections fall back to defaults
        assert!(!rules.personal_email_domains.is_empty());
        assert!(rules.title_tiers.top.contains(&"vp".to_string()));
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_is_personal_domain_case_insensitive() {
        let rules = ScoringRules::default();
        assert!(rules.is_personal_domain("Gmail.com"));
        assert!(!rules.is_personal_domain("acme.com"));
    }
}
