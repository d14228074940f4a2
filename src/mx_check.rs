//! MX Domain Check Module
//!
//! Optional network validation that an email domain can receive mail.
//! Rides DNS-over-HTTPS so the check uses the same HTTP stack as the rest
//! of the tool. Every transport or decode failure degrades to Unknown for
//! that lead only; the check never fails a run.

use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const DOH_ENDPOINT: &str = "https://dns.google/resolve";
const REQUEST_TIMEOUT_SECS: u64 = 5;

/// DNS RCODE NXDOMAIN
const RCODE_NXDOMAIN: u32 = 3;
const RCODE_NOERROR: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MxVerdict {
    /// Domain has at least one MX record
    Exists,
    /// Domain resolves to no MX records, or does not exist
    DoesNotExist,
    /// Check failed or timed out; treat as if it was never requested
    Unknown,
}

#[derive(Debug, Deserialize)]
struct DohResponse {
    #[serde(rename = "Status")]
    status: u32,
    #[serde(rename = "Answer", default)]
    answer: Vec<DohAnswer>,
}

#[derive(Debug, Deserialize)]
struct DohAnswer {
    #[serde(rename = "type")]
    record_type: u32,
}

/// MX record type in DNS answers
const TYPE_MX: u32 = 15;

pub struct MxChecker {
    client: reqwest::blocking::Client,
    cache: HashMap<String, MxVerdict>,
}

impl MxChecker {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        MxChecker {
            client,
            cache: HashMap::new(),
        }
    }

    /// Check one domain. Results are cached for the life of the run so
    /// duplicate domains are queried once.
    pub fn check(&mut self, domain: &str) -> MxVerdict {
        if domain.is_empty() {
            return MxVerdict::Unknown;
        }
        if let Some(verdict) = self.cache.get(domain) {
            return *verdict;
        }
        let verdict = self.lookup(domain);
        self.cache.insert(domain.to_string(), verdict);
        verdict
    }

    fn lookup(&self, domain: &str) -> MxVerdict {
        let response = self
            .client
            .get(DOH_ENDPOINT)
            .query(&[("name", domain), ("type", "MX")])
            .send();

        match response {
            Ok(resp) => match resp.json::<DohResponse>() {
                Ok(body) => classify(&body),
                Err(_) => MxVerdict::Unknown,
            },
            Err(_) => MxVerdict::Unknown,
        }
    }
}

impl Default for MxChecker {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(body: &DohResponse) -> MxVerdict {
    match body.status {
        RCODE_NOERROR => {
            if body.answer.iter().any(|a| a.record_type == TYPE_MX) {
                MxVerdict::Exists
            } else {
                MxVerdict::DoesNotExist
            }
        }
        RCODE_NXDOMAIN => MxVerdict::DoesNotExist,
        _ => MxVerdict::Unknown,
    }
}
