//! Validation of landing content straight from JSON.
//!
//! Working on `serde_json::Value` instead of deserializing first lets every
//! field problem be reported under its path, and lets stored rows that no
//! longer match the shape fall back to the defaults instead of failing.

use serde_json::{Map, Value};

use super::defaults::{default_landing_data, default_landing_seo};
use super::types::{
    ContactData, FaqItem, FeatureItem, HeaderLink, HeroSlide, LandingData, LandingDraftPayload, LandingHeader,
    LandingSeo,
};
use crate::validation::{optional_text, optional_url, path, required_email, required_text, ValidationErrors};

enum Field<'a> {
    Absent,
    Text(&'a str),
    WrongType,
}

fn field<'a>(errors: &mut ValidationErrors, obj: &'a Map<String, Value>, key: &str, at: &str) -> Field<'a> {
    match obj.get(key) {
        None | Some(Value::Null) => Field::Absent,
        Some(Value::String(s)) => Field::Text(s),
        Some(_) => {
            errors.add(at, "Se esperaba texto");
            Field::WrongType
        }
    }
}

fn required(errors: &mut ValidationErrors, obj: &Map<String, Value>, parent: &str, key: &str) -> String {
    let at = path(parent, key);
    match field(errors, obj, key, &at) {
        Field::Absent => required_text(errors, &at, None),
        Field::Text(s) => required_text(errors, &at, Some(s)),
        Field::WrongType => String::new(),
    }
}

fn optional(errors: &mut ValidationErrors, obj: &Map<String, Value>, parent: &str, key: &str) -> Option<String> {
    let at = path(parent, key);
    match field(errors, obj, key, &at) {
        Field::Text(s) => optional_text(Some(s)),
        Field::Absent | Field::WrongType => None,
    }
}

fn url(errors: &mut ValidationErrors, obj: &Map<String, Value>, parent: &str, key: &str) -> Option<String> {
    let at = path(parent, key);
    match field(errors, obj, key, &at) {
        Field::Text(s) => optional_url(errors, &at, key, Some(s)),
        Field::Absent | Field::WrongType => None,
    }
}

fn object<'a>(errors: &mut ValidationErrors, value: Option<&'a Value>, at: &str) -> Option<&'a Map<String, Value>> {
    match value {
        Some(Value::Object(obj)) => Some(obj),
        Some(Value::Null) | None => {
            errors.add(at, "Campo requerido");
            None
        }
        Some(_) => {
            errors.add(at, "Se esperaba un objeto");
            None
        }
    }
}

fn list<'a>(errors: &mut ValidationErrors, obj: &'a Map<String, Value>, parent: &str, key: &str) -> &'a [Value] {
    match obj.get(key) {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => {
            errors.add(path(parent, key), "Campo requerido");
            &[]
        }
        Some(_) => {
            errors.add(path(parent, key), "Se esperaba una lista");
            &[]
        }
    }
}

fn hero_slide(errors: &mut ValidationErrors, value: &Value, at: &str) -> HeroSlide {
    let empty = Map::new();
    let obj = object(errors, Some(value), at).unwrap_or(&empty);
    HeroSlide {
        title: required(errors, obj, at, "title"),
        subtitle: required(errors, obj, at, "subtitle"),
        cta_text: required(errors, obj, at, "ctaText"),
        cta_href: required(errors, obj, at, "ctaHref"),
        image_url: url(errors, obj, at, "imageUrl"),
    }
}

fn feature(errors: &mut ValidationErrors, value: &Value, at: &str) -> FeatureItem {
    let empty = Map::new();
    let obj = object(errors, Some(value), at).unwrap_or(&empty);
    FeatureItem {
        title: required(errors, obj, at, "title"),
        description: required(errors, obj, at, "description"),
        icon_key: optional(errors, obj, at, "iconKey"),
    }
}

fn faq(errors: &mut ValidationErrors, value: &Value, at: &str) -> FaqItem {
    let empty = Map::new();
    let obj = object(errors, Some(value), at).unwrap_or(&empty);
    FaqItem {
        question: required(errors, obj, at, "question"),
        answer: required(errors, obj, at, "answer"),
    }
}

fn contact(errors: &mut ValidationErrors, value: Option<&Value>, at: &str) -> ContactData {
    let empty = Map::new();
    let obj = object(errors, value, at).unwrap_or(&empty);
    let email_at = path(at, "email");
    let email = match field(errors, obj, "email", &email_at) {
        Field::Text(s) => required_email(errors, &email_at, Some(s)),
        Field::Absent => required_email(errors, &email_at, None),
        Field::WrongType => String::new(),
    };
    ContactData {
        phone: required(errors, obj, at, "phone"),
        whatsapp: required(errors, obj, at, "whatsapp"),
        email,
        address: required(errors, obj, at, "address"),
    }
}

fn header(errors: &mut ValidationErrors, value: Option<&Value>, at: &str) -> Option<LandingHeader> {
    let obj = match value {
        None | Some(Value::Null) => return None,
        Some(other) => object(errors, Some(other), at)?,
    };

    let links = match obj.get("links") {
        None | Some(Value::Null) => Vec::new(),
        Some(_) => list(errors, obj, at, "links")
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let item_at = path(&path(at, "links"), i);
                let empty = Map::new();
                let link = object(errors, Some(item), &item_at).unwrap_or(&empty);
                HeaderLink {
                    label: required(errors, link, &item_at, "label"),
                    href: required(errors, link, &item_at, "href"),
                }
            })
            .collect(),
    };

    Some(LandingHeader {
        logo_url: url(errors, obj, at, "logoUrl"),
        cta_text: optional(errors, obj, at, "ctaText"),
        cta_href: optional(errors, obj, at, "ctaHref"),
        links,
    })
}

/// Validate the `data` document, recording issues under `at`.
pub fn validate_landing_data(errors: &mut ValidationErrors, value: Option<&Value>, at: &str) -> LandingData {
    let empty = Map::new();
    let obj = object(errors, value, at).unwrap_or(&empty);

    let slides_at = path(at, "heroSlider");
    let slides = list(errors, obj, at, "heroSlider");
    if obj.contains_key("heroSlider") && slides.is_empty() && !errors.has_field(&slides_at) {
        errors.add(&slides_at, "Agrega al menos un slide");
    }
    let hero_slider = slides
        .iter()
        .enumerate()
        .map(|(i, v)| hero_slide(errors, v, &path(&slides_at, i)))
        .collect();

    let features_at = path(at, "features");
    let features = list(errors, obj, at, "features")
        .iter()
        .enumerate()
        .map(|(i, v)| feature(errors, v, &path(&features_at, i)))
        .collect();

    let faq_at = path(at, "faq");
    let faq = list(errors, obj, at, "faq")
        .iter()
        .enumerate()
        .map(|(i, v)| faq(errors, v, &path(&faq_at, i)))
        .collect();

    LandingData {
        hero_slider,
        features,
        faq,
        contact: contact(errors, obj.get("contact"), &path(at, "contact")),
        header: header(errors, obj.get("header"), &path(at, "header")),
    }
}

/// Validate the `seo` document, recording issues under `at`.
pub fn validate_landing_seo(errors: &mut ValidationErrors, value: Option<&Value>, at: &str) -> LandingSeo {
    let empty = Map::new();
    let obj = object(errors, value, at).unwrap_or(&empty);
    LandingSeo {
        title: required(errors, obj, at, "title"),
        description: required(errors, obj, at, "description"),
        og_title: required(errors, obj, at, "ogTitle"),
        og_description: required(errors, obj, at, "ogDescription"),
        og_image: url(errors, obj, at, "ogImage"),
    }
}

/// Validate a `{data, seo}` draft body. Values come back trimmed, blank optionals dropped.
pub fn validate_draft_payload(value: &Value) -> Result<LandingDraftPayload, ValidationErrors> {
    let Value::Object(obj) = value else {
        return Err(ValidationErrors::form("Se esperaba un objeto"));
    };

    let mut errors = ValidationErrors::new();
    let data = validate_landing_data(&mut errors, obj.get("data"), "data");
    let seo = validate_landing_seo(&mut errors, obj.get("seo"), "seo");
    errors.into_result(LandingDraftPayload { data, seo })
}

/// Read stored `data`, substituting the default template when it no longer validates.
pub fn parse_landing_data(value: &Value) -> LandingData {
    let mut errors = ValidationErrors::new();
    let data = validate_landing_data(&mut errors, Some(value), "");
    if errors.is_empty() {
        data
    } else {
        tracing::debug!("Stored landing data is invalid, using defaults");
        default_landing_data()
    }
}

/// Read stored `seo`, substituting the default when it no longer validates.
pub fn parse_landing_seo(value: &Value) -> LandingSeo {
    let mut errors = ValidationErrors::new();
    let seo = validate_landing_seo(&mut errors, Some(value), "");
    if errors.is_empty() {
        seo
    } else {
        default_landing_seo()
    }
}
