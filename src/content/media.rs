//! Normalization of image references before they reach the public page.

use super::types::LandingData;

/// Turn a stored image reference into something a browser can load.
///
/// Inline `data:`/`blob:` URLs are dropped, protocol-relative URLs are
/// upgraded to https, and bare relative paths are rooted at `/`.
pub fn normalize_image_src(value: Option<&str>) -> String {
    let raw = value.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return String::new();
    }

    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("data:") || lower.starts_with("blob:") {
        return String::new();
    }
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return raw.to_string();
    }
    if raw.starts_with("//") {
        return format!("https:{raw}");
    }
    if raw.starts_with('/') {
        return raw.to_string();
    }

    let relative = raw.strip_prefix('.').unwrap_or(raw).trim_start_matches('/');
    if relative.is_empty() {
        String::new()
    } else {
        format!("/{relative}")
    }
}

/// Normalize every hero slide image; unusable references are removed.
pub fn normalize_hero_images(data: &mut LandingData) {
    for slide in &mut data.hero_slider {
        let src = normalize_image_src(slide.image_url.as_deref());
        slide.image_url = (!src.is_empty()).then_some(src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_image_references() {
        assert_eq!(normalize_image_src(None), "");
        assert_eq!(normalize_image_src(Some("   ")), "");
        assert_eq!(normalize_image_src(Some("data:image/png;base64,AAAA")), "");
        assert_eq!(normalize_image_src(Some("BLOB:https://x/1")), "");
        assert_eq!(normalize_image_src(Some("https://cdn.x.com/a.webp")), "https://cdn.x.com/a.webp");
        assert_eq!(normalize_image_src(Some("//cdn.x.com/a.webp")), "https://cdn.x.com/a.webp");
        assert_eq!(normalize_image_src(Some("/uploads/a.webp")), "/uploads/a.webp");
        assert_eq!(normalize_image_src(Some("./uploads/a.webp")), "/uploads/a.webp");
        assert_eq!(normalize_image_src(Some("uploads/a.webp")), "/uploads/a.webp");
        assert_eq!(normalize_image_src(Some("./")), "");
    }

    #[test]
    fn hero_images_are_normalized_in_place() {
        let mut data = crate::content::default_landing_data();
        data.hero_slider[0].image_url = Some("uploads/a.webp".to_string());
        data.hero_slider.push(data.hero_slider[0].clone());
        data.hero_slider[1].image_url = Some("data:image/png;base64,AAAA".to_string());
        normalize_hero_images(&mut data);
        assert_eq!(data.hero_slider[0].image_url.as_deref(), Some("/uploads/a.webp"));
        assert_eq!(data.hero_slider[1].image_url, None);
    }
}
