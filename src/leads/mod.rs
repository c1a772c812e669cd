//! Contact-form leads: input validation, listing filters and CSV export.

pub mod export;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::database::models::NewLead;
use crate::validation::{bounded_text, optional_email, optional_text, ValidationErrors};

pub use export::{export_filename, leads_to_csv};

pub const DEFAULT_LIST_LIMIT: i64 = 100;
pub const MAX_LIST_LIMIT: i64 = 500;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+()\-\d\s]{7,24}$").expect("valid phone regex"));

/// A public form submission after screening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadSubmission {
    Valid(NewLead),
    /// Honeypot tripped; answered as success without storing anything.
    Ignored,
}

/// Listing filters after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadFilter {
    pub search: Option<String>,
    pub source: Option<String>,
    pub limit: i64,
}

impl LeadFilter {
    pub fn new(search: Option<&str>, source: Option<&str>, limit: Option<i64>) -> Self {
        Self {
            search: optional_text(search),
            source: optional_text(source),
            limit: clamp_limit(limit),
        }
    }
}

pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}

/// Parse a `limit` query value the lenient way: leading integer or nothing.
pub fn parse_limit(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    let end = raw
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(raw.len(), |(i, _)| i);
    raw[..end].parse().ok()
}

/// True when the hidden `website` field was filled in, which only bots do.
pub fn is_honeypot(payload: &Value) -> bool {
    payload
        .get("website")
        .and_then(Value::as_str)
        .is_some_and(|v| !v.trim().is_empty())
}

fn text<'a>(errors: &mut ValidationErrors, payload: &'a Value, key: &str) -> Option<&'a str> {
    match payload.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(_) => {
            errors.add(key, "Se esperaba texto");
            None
        }
    }
}

/// Honeypot check, then validation. Neither step needs the database.
pub fn screen_lead(payload: &Value) -> Result<LeadSubmission, ValidationErrors> {
    if is_honeypot(payload) {
        return Ok(LeadSubmission::Ignored);
    }
    validate_lead(payload).map(LeadSubmission::Valid)
}

/// Validate a public lead submission. All fields are trimmed; blank optionals become `None`.
pub fn validate_lead(payload: &Value) -> Result<NewLead, ValidationErrors> {
    if !payload.is_object() {
        return Err(ValidationErrors::form("Se esperaba un objeto"));
    }

    let mut errors = ValidationErrors::new();

    let name_raw = text(&mut errors, payload, "name");
    let name = bounded_text(&mut errors, "name", name_raw, 2, 120);

    let phone_raw = text(&mut errors, payload, "phone");
    let phone = bounded_text(&mut errors, "phone", phone_raw, 7, 24);
    if !errors.has_field("phone") && !PHONE_RE.is_match(&phone) {
        errors.add("phone", "Teléfono inválido");
    }

    let email_raw = text(&mut errors, payload, "email");
    let email = optional_email(&mut errors, "email", email_raw);

    let message_raw = text(&mut errors, payload, "message");
    let message = bounded_text(&mut errors, "message", message_raw, 8, 1500);

    let source_raw = text(&mut errors, payload, "source");
    let source = optional_text(source_raw);

    errors.into_result(NewLead {
        name,
        phone,
        email,
        message,
        source,
    })
}
