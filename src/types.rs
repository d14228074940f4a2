use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Lead {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub email_domain: String,
    pub phone: String,
    pub linkedin_url: String,
    pub job_title: String,
    pub company_name: String,
    pub company_domain: String,
    pub estimated_revenue: String,
    /// Unrecognized input columns, carried through untouched
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

/// A lead after scoring. Produced once, never mutated; later stages only
/// filter and reorder.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredLead {
    pub lead: Lead,
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub identity_key: String,
}

/// Per-sub-score values in [0,1]. A sub-score whose input was entirely
/// absent is None and stays out of the serialized breakdown.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ScoreBreakdown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completeness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seniority: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_validity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_match: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_signal: Option<f64>,
}

impl ScoreBreakdown {
    pub fn is_empty(&self) -> bool {
        self.completeness.is_none()
            && self.seniority.is_none()
            && self.email_validity.is_none()
            && self.domain_match.is_none()
            && self.company_signal.is_none()
    }
}
