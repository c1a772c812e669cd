//! Structural validation with per-field issue accumulation.
//!
//! Validators never stop at the first problem: every field is checked and
//! the issues are collected under a dotted path (`data.heroSlider.0.title`),
//! so a client can highlight all of them at once.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-']+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)+$")
        .expect("valid email regex")
});

/// Accumulated validation failures, shaped like `{formErrors, fieldErrors}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    pub form_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.form_errors.push(message.into());
        errors
    }

    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.field_errors.entry(path.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }

    pub fn has_field(&self, path: &str) -> bool {
        self.field_errors.contains_key(path)
    }

    /// Finish validation: `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Join a parent path and a child segment with a dot.
pub fn path(parent: &str, child: impl std::fmt::Display) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}.{child}")
    }
}

/// Trimmed text that must not be empty.
pub fn required_text(errors: &mut ValidationErrors, at: &str, value: Option<&str>) -> String {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        errors.add(at, "Campo requerido");
    }
    trimmed.to_string()
}

/// Trimmed text where blank becomes `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Trimmed text with character-count bounds (inclusive).
pub fn bounded_text(
    errors: &mut ValidationErrors,
    at: &str,
    value: Option<&str>,
    min: usize,
    max: usize,
) -> String {
    let trimmed = value.map(str::trim).unwrap_or_default();
    let len = trimmed.chars().count();
    if len < min {
        errors.add(at, format!("Debe tener al menos {min} caracteres"));
    } else if len > max {
        errors.add(at, format!("Debe tener como maximo {max} caracteres"));
    }
    trimmed.to_string()
}

pub fn is_valid_email(value: &str) -> bool {
    value.len() <= 254 && EMAIL_RE.is_match(value)
}

/// Required, trimmed email address.
pub fn required_email(errors: &mut ValidationErrors, at: &str, value: Option<&str>) -> String {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if !is_valid_email(trimmed) {
        errors.add(at, "Correo invalido");
    }
    trimmed.to_string()
}

/// Optional email: blank becomes `None`, anything else must be well formed.
pub fn optional_email(errors: &mut ValidationErrors, at: &str, value: Option<&str>) -> Option<String> {
    let value = optional_text(value)?;
    if !is_valid_email(&value) {
        errors.add(at, "Correo inválido");
    }
    Some(value)
}

/// Optional link: blank becomes `None`; otherwise a local path or an absolute http(s) URL.
pub fn optional_url(errors: &mut ValidationErrors, at: &str, field: &str, value: Option<&str>) -> Option<String> {
    let value = optional_text(value)?;
    if !is_local_or_http_url(&value) {
        errors.add(at, format!("{field} debe ser URL absoluta o ruta local"));
    }
    Some(value)
}

fn is_local_or_http_url(value: &str) -> bool {
    if value.starts_with('/') {
        return true;
    }
    (value.starts_with("http://") || value.starts_with("https://")) && url::Url::parse(value).is_ok()
}
