//! Field Normalization Module
//!
//! Maps raw CSV rows onto the recognized lead fields:
//! - Case-insensitive header matching with aliases (website -> company_domain)
//! - Full name derived from first + last when not provided
//! - Lower-cased trimmed email with the domain extracted after '@'
//! - Company domains stripped of scheme, www prefix and path
//!
//! Absent or malformed fields degrade to empty strings; normalization never
//! fails a row.

use crate::types::Lead;
use regex::Regex;
use std::collections::BTreeMap;

/// Recognized canonical fields and the input headers that feed them.
/// When several headers feed the same field, the first non-empty value
/// encountered wins.
const FIELD_ALIASES: &[(&str, &[&str])] = &[
    ("first_name", &["first_name", "first name", "firstname"]),
    ("last_name", &["last_name", "last name", "lastname", "surname"]),
    ("full_name", &["full_name", "full name", "name"]),
    ("email", &["email", "email_address", "e-mail"]),
    ("phone", &["phone", "phone_number", "mobile"]),
    ("linkedin_url", &["linkedin_url", "linkedin", "linkedin url"]),
    ("job_title", &["job_title", "job title", "title"]),
    ("company_name", &["company_name", "company name", "company"]),
    ("company_domain", &["company_domain", "company domain", "website", "domain"]),
    ("estimated_revenue", &["estimated_revenue", "estimated revenue", "revenue"]),
];

/// Practical address syntax gate; not a full RFC parser
const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

/// Build a normalized lead from a raw header->value row
pub fn normalize_row(row: &BTreeMap<String, String>) -> Lead {
    let mut lead = Lead::default();

    for (header, value) in row {
        let value = value.trim();
        match canonical_field(header) {
            Some("first_name") => set_if_empty(&mut lead.first_name, value),
            Some("last_name") => set_if_empty(&mut lead.last_name, value),
            Some("full_name") => set_if_empty(&mut lead.full_name, value),
            Some("email") => set_if_empty(&mut lead.email, &value.to_lowercase()),
            Some("phone") => set_if_empty(&mut lead.phone, value),
            Some("linkedin_url") => set_if_empty(&mut lead.linkedin_url, value),
            Some("job_title") => set_if_empty(&mut lead.job_title, value),
            Some("company_name") => set_if_empty(&mut lead.company_name, value),
            Some("company_domain") => {
                let domain = normalize_domain(value);
                set_if_empty(&mut lead.company_domain, &domain);
            }
            Some("estimated_revenue") => set_if_empty(&mut lead.estimated_revenue, value),
            _ => {
                if !value.is_empty() {
                    lead.extra.insert(header.clone(), value.to_string());
                }
            }
        }
    }

    if lead.full_name.is_empty() {
        lead.full_name = format!("{} {}", lead.first_name, lead.last_name)
            .trim()
            .to_string();
    }

    lead.email_domain = extract_email_domain(&lead.email);
    lead
}

/// Resolve an input header to its canonical field name
fn canonical_field(header: &str) -> Option<&'static str> {
    let header = header.trim().to_lowercase();
    for (field, aliases) in FIELD_ALIASES {
        if aliases.iter().any(|a| *a == header) {
            return Some(field);
        }
    }
    None
}

fn set_if_empty(slot: &mut String, value: &str) {
    if slot.is_empty() && !value.is_empty() {
        *slot = value.to_string();
    }
}

/// Extract the domain after '@'. Empty for absent or malformed addresses.
pub fn extract_email_domain(email: &str) -> String {
    let email = email.trim().to_lowercase();
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => {
            domain.to_string()
        }
        _ => String::new(),
    }
}

/// Check whether an address passes the practical syntax gate
pub fn email_syntax_valid(email: &str) -> bool {
    if email.is_empty() {
        return false;
    }
    match Regex::new(EMAIL_PATTERN) {
        Ok(re) => re.is_match(email.trim()),
        Err(_) => false,
    }
}

/// Normalize a company domain for comparison: lowercase, strip scheme,
/// leading www. and any path or query suffix
pub fn normalize_domain(raw: &str) -> String {
    let mut domain = raw.trim().to_lowercase();

    if let Some(pos) = domain.find("://") {
        domain = domain[pos + 3..].to_string();
    }
    if let Some(pos) = domain.find(|c| c == '/' || c == '?' || c == '#') {
        domain = domain[..pos].to_string();
    }
    if let Some(stripped) = domain.strip_prefix("www.") {
        domain = stripped.to_string();
    }

    domain
}

/// Last two labels of a domain, for registered-domain comparison.
/// "mail.acme.com" and "acme.com" both reduce to "acme.com".
pub fn registered_domain(domain: &str) -> String {
    let labels: Vec<&str> = domain.split('.').filter(|l| !l.is_empty()).collect();
    if labels.len() >= 2 {
        labels[labels.len() - 2..].join(".")
    } else {
        domain.to_string()
    }
}

/// Normalize text for comparison (lowercase, collapse whitespace)
pub fn normalize_text(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_header_matching_is_case_insensitive() {
        let lead = normalize_row(&row(&[("Email", "Alice@Acme.COM"), ("Job Title", "VP Sales")]));
        assert_eq!(lead.email, "alice@acme.com");
        assert_eq!(lead.job_title, "VP Sales");
    }

    #[test]
    fn test_website_alias_feeds_company_domain() {
        let lead = normalize_row(&row(&[("website", "https://www.Acme.com/about")]));
        assert_eq!(lead.company_domain, "acme.com");
    }

    #[test]
    fn test_full_name_derived_from_first_and_last() {
        let lead = normalize_row(&row(&[("first_name", "Alice"), ("last_name", "Smith")]));
        assert_eq!(lead.full_name, "Alice Smith");
    }

    #[test]
    fn test_provided_full_name_wins() {
        let lead = normalize_row(&row(&[
            ("full_name", "Alice B. Smith"),
            ("first_name", "Alice"),
            ("last_name", "Smith"),
        ]));
        assert_eq!(lead.full_name, "Alice B. Smith");
    }

    #[test]
    fn test_missing_names_degrade_to_empty() {
        let lead = normalize_row(&row(&[("email", "x@y.co")]));
        assert_eq!(lead.full_name, "");
    }

    #[test]
    fn test_unknown_columns_pass_through() {
        let lead = normalize_row(&row(&[("favorite_color", "teal"), ("email", "a@b.io")]));
        assert_eq!(lead.extra.get("favorite_color").map(String::as_str), Some("teal"));
    }

    #[test]
    fn test_extract_email_domain() {
        assert_eq!(extract_email_domain("alice@acme.com"), "acme.com");
        assert_eq!(extract_email_domain("Alice@ACME.com "), "acme.com");
        assert_eq!(extract_email_domain("not-an-email"), "");
        assert_eq!(extract_email_domain("two@at@signs.com"), "");
        assert_eq!(extract_email_domain(""), "");
    }

    #[test]
    fn test_email_syntax() {
        assert!(email_syntax_valid("alice@acme.com"));
        assert!(email_syntax_valid("a.b+tag@sub.acme.io"));
        assert!(!email_syntax_valid("alice@acme"));
        assert!(!email_syntax_valid("@acme.com"));
        assert!(!email_syntax_valid(""));
    }

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("https://www.Acme.com/contact?x=1"), "acme.com");
        assert_eq!(normalize_domain("acme.com"), "acme.com");
        assert_eq!(normalize_domain("WWW.ACME.COM"), "acme.com");
        assert_eq!(normalize_domain(""), "");
    }

    #[test]
    fn test_registered_domain() {
        assert_eq!(registered_domain("mail.acme.com"), "acme.com");
        assert_eq!(registered_domain("acme.com"), "acme.com");
        assert_eq!(registered_domain("acme"), "acme");
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Hello   World  "), "hello world");
    }
}
