//! Lookup of stored uploads for `GET /uploads/*path`.

use std::path::{Component, Path, PathBuf};

use super::UploadError;

pub const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

fn is_unsafe_segment(segment: &str) -> bool {
    segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains('\\')
        || segment.contains('\0')
}

/// Map a request path (`tenant/2025/01/file.webp`) onto a file under `root`.
///
/// Empty, dot, dot-dot or backslash segments are rejected as an invalid file;
/// anything that would not stay a plain relative component is an invalid route.
pub fn resolve_upload_path(root: &Path, request_path: &str) -> Result<PathBuf, UploadError> {
    let segments: Vec<&str> = request_path.split('/').collect();
    if segments.iter().any(|segment| is_unsafe_segment(segment)) {
        return Err(UploadError::Validation("Archivo inválido".to_string()));
    }

    let mut resolved = root.to_path_buf();
    for segment in segments {
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => resolved.push(part),
            _ => return Err(UploadError::Validation("Ruta inválida".to_string())),
        }
    }

    Ok(resolved)
}

pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("webp") => "image/webp",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("avif") => "image/avif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: UploadError) -> String {
        err.to_string()
    }

    #[test]
    fn resolves_nested_files_under_root() {
        let root = Path::new("/srv/uploads");
        let path = resolve_upload_path(root, "site.pe/2025/01/a.webp").unwrap();
        assert_eq!(path, PathBuf::from("/srv/uploads/site.pe/2025/01/a.webp"));
    }

    #[test]
    fn rejects_traversal_and_empty_segments() {
        let root = Path::new("/srv/uploads");
        for bad in ["", "../etc/passwd", "a/../../b", "a//b", "./a", "a\\..\\b", "a/."] {
            assert_eq!(
                message(resolve_upload_path(root, bad).unwrap_err()),
                "Archivo inválido",
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn content_types_by_extension() {
        assert_eq!(content_type_for(Path::new("a.WEBP")), "image/webp");
        assert_eq!(content_type_for(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.bin")), "application/octet-stream");
        assert_eq!(content_type_for(Path::new("noext")), "application/octet-stream");
    }
}
