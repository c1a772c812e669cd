//! Canonical site URL plus the crawler files derived from it.

use chrono::{DateTime, SecondsFormat, Utc};

/// Paths crawlers are asked to skip.
pub const DISALLOWED_PATHS: [&str; 3] = ["/admin", "/admin/*", "/api/admin/*"];

/// Site URL for a request: `<proto>://<host>` when a host is known, else `fallback`.
pub fn resolve_site_url(host: Option<&str>, proto: Option<&str>, fallback: &str) -> String {
    let host = host.map(str::trim).unwrap_or_default();
    if host.is_empty() {
        return fallback.trim_end_matches('/').to_string();
    }

    let proto = proto
        .and_then(|p| p.split(',').next())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or("https");

    format!("{proto}://{host}").trim_end_matches('/').to_string()
}

pub fn robots_txt(site_url: &str) -> String {
    let mut out = String::from("User-Agent: *\nAllow: /\n");
    for path in DISALLOWED_PATHS {
        out.push_str("Disallow: ");
        out.push_str(path);
        out.push('\n');
    }
    out.push_str(&format!("\nHost: {site_url}\nSitemap: {site_url}/sitemap.xml\n"));
    out
}

/// Single-entry sitemap for the home page.
pub fn sitemap_xml(site_url: &str, last_modified: DateTime<Utc>) -> String {
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
            "<url>\n",
            "<loc>{url}/</loc>\n",
            "<lastmod>{lastmod}</lastmod>\n",
            "<changefreq>daily</changefreq>\n",
            "<priority>1</priority>\n",
            "</url>\n",
            "</urlset>\n"
        ),
        url = escape_xml(site_url),
        lastmod = last_modified.to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
