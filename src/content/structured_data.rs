//! schema.org JSON-LD for the public home page.

use serde_json::{json, Value};

use super::defaults::SITE_CONTACT;
use super::types::{LandingData, LandingSeo};

const ORGANIZATION_NAME: &str = "Corporación Power Amazónica S.A.C.";
const SITE_NAME: &str = "Power Amazónica";
const LANGUAGE: &str = "es-PE";

/// Phone in international form: `+` numbers are kept, Peruvian `51…` gets a `+`,
/// anything else falls back to the site phone.
fn normalize_phone(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.starts_with('+') {
        compact
    } else if compact.starts_with("51") {
        format!("+{compact}")
    } else {
        SITE_CONTACT.phone_intl.to_string()
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed
    }
}

/// Organization, WebSite, WebPage and Service entries, plus FAQPage when the
/// FAQ has at least one complete entry.
pub fn build_home_json_ld(site_url: &str, seo: &LandingSeo, data: &LandingData) -> Vec<Value> {
    let page_url = format!("{site_url}/");
    let phone = normalize_phone(&data.contact.phone);
    let email = or_default(&data.contact.email, SITE_CONTACT.email);
    let address = or_default(&data.contact.address, SITE_CONTACT.address);

    let mut entries = vec![
        json!({
            "@context": "https://schema.org",
            "@type": "Organization",
            "name": ORGANIZATION_NAME,
            "url": site_url,
            "foundingDate": "2018",
            "email": email,
            "telephone": phone,
            "address": {
                "@type": "PostalAddress",
                "streetAddress": address,
                "addressCountry": "PE",
            },
            "areaServed": ["Chanchamayo", "Satipo", "Oxapampa"],
        }),
        json!({
            "@context": "https://schema.org",
            "@type": "WebSite",
            "url": site_url,
            "name": SITE_NAME,
            "inLanguage": LANGUAGE,
        }),
        json!({
            "@context": "https://schema.org",
            "@type": "WebPage",
            "name": seo.title,
            "description": seo.description,
            "url": page_url,
            "isPartOf": {
                "@type": "WebSite",
                "url": site_url,
                "name": SITE_NAME,
            },
            "inLanguage": LANGUAGE,
        }),
        json!({
            "@context": "https://schema.org",
            "@type": "Service",
            "name": "Proyecto Urb. Santa Beatriz",
            "description": "Lotes de 150 m² en Chanchamayo con contrato notarial, papeles en regla y facilidades de pago.",
            "areaServed": "Chanchamayo, Junín, Perú",
            "provider": {
                "@type": "Organization",
                "name": ORGANIZATION_NAME,
                "url": site_url,
            },
            "availableChannel": {
                "@type": "ServiceChannel",
                "servicePhone": phone,
                "serviceUrl": page_url,
            },
        }),
    ];

    let questions: Vec<Value> = data
        .faq
        .iter()
        .filter(|item| !item.question.trim().is_empty() && !item.answer.trim().is_empty())
        .map(|item| {
            json!({
                "@type": "Question",
                "name": item.question,
                "acceptedAnswer": { "@type": "Answer", "text": item.answer },
            })
        })
        .collect();

    if !questions.is_empty() {
        entries.push(json!({
            "@context": "https://schema.org",
            "@type": "FAQPage",
            "mainEntity": questions,
        }));
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{default_landing_data, default_landing_seo};

    #[test]
    fn phone_normalization() {
        assert_eq!(normalize_phone("+51 990 814 630"), "+51990814630");
        assert_eq!(normalize_phone("51990814630"), "+51990814630");
        assert_eq!(normalize_phone("990814630"), SITE_CONTACT.phone_intl);
        assert_eq!(normalize_phone(""), SITE_CONTACT.phone_intl);
    }

    #[test]
    fn includes_faq_page_only_with_entries() {
        let seo = default_landing_seo();
        let mut data = default_landing_data();
        let entries = build_home_json_ld("https://example.com", &seo, &data);
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[4]["@type"], "FAQPage");
        assert_eq!(entries[2]["url"], "https://example.com/");

        for item in &mut data.faq {
            item.answer = "  ".to_string();
        }
        let entries = build_home_json_ld("https://example.com", &seo, &data);
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(|e| e["@type"] != "FAQPage"));
    }

    #[test]
    fn blank_contact_uses_site_defaults() {
        let mut data = default_landing_data();
        data.contact.email = " ".to_string();
        data.contact.address = String::new();
        let entries = build_home_json_ld("https://example.com", &default_landing_seo(), &data);
        assert_eq!(entries[0]["email"], SITE_CONTACT.email);
        assert_eq!(entries[0]["address"]["streetAddress"], SITE_CONTACT.address);
    }
}
