// handlers/public/landing.rs - GET /api/landing handler

use axum::{
    extract::State,
    http::HeaderMap,
    response::Json,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::content::{
    build_home_json_ld, default_landing_data, default_landing_seo, normalize_hero_images, resolve_site_url,
    FALLBACK_CONTENT,
};
use crate::services::host_from_headers;

/// GET /api/landing - Published content for the request's domain
///
/// Never fails: when nothing is published (or the lookup errors) `landing`
/// is `null`, `seo` holds the defaults and `fallback` carries placeholder copy.
///
/// Expected Output:
/// ```json
/// {
///   "domain": "example.pe",
///   "landing": { "id": "...", "status": "PUBLISHED", "data": {...}, "seo": {...}, ... },
///   "seo": { "title": "...", ... },
///   "fallback": null,
///   "structuredData": [ { "@type": "Organization", ... }, ... ]
/// }
/// ```
pub async fn landing_get(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    let host = host_from_headers(&headers);
    let (domain, landing) = state.content.published_for_domain(host).await;

    let landing = landing.map(|mut page| {
        normalize_hero_images(&mut page.data);
        page
    });

    let proto = headers.get("x-forwarded-proto").and_then(|v| v.to_str().ok());
    let site_url = resolve_site_url(host, proto, &state.config.api.site_url);

    let (data, seo) = match &landing {
        Some(page) => (page.data.clone(), page.seo.clone()),
        None => (default_landing_data(), default_landing_seo()),
    };
    let structured_data = build_home_json_ld(&site_url, &seo, &data);
    let fallback = landing.is_none().then_some(FALLBACK_CONTENT);

    Json(json!({
        "domain": domain,
        "landing": landing,
        "seo": seo,
        "fallback": fallback,
        "structuredData": structured_data,
    }))
}
