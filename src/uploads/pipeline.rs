use axum::body::Bytes;
use chrono::{Datelike, Utc};
use image::imageops::FilterType;
use image::{DynamicImage, ImageDecoder, ImageReader};
use serde::Serialize;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::{UploadError, UploadKind, SUPPORTED_IMAGE_MIME_TYPES};
use crate::config::UploadConfig;

const WEBP_CONTENT_TYPE: &str = "image/webp";
const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub tenant_domain: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub bytes: Bytes,
    pub kind: UploadKind,
}

/// Result of a successful upload, as returned to the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredImage {
    pub url: String,
    pub content_type: &'static str,
    pub size_bytes: usize,
    pub width: u32,
    pub height: u32,
}

/// Re-encoded image before it is written out.
#[derive(Debug)]
pub struct OptimizedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct UploadPipeline {
    root: PathBuf,
    max_bytes: u64,
    quality: u8,
}

impl UploadPipeline {
    pub fn new(root: impl Into<PathBuf>, max_bytes: u64, quality: u8) -> Self {
        Self {
            root: root.into(),
            max_bytes,
            quality,
        }
    }

    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(config.storage_dir.clone(), config.max_bytes(), config.image_quality)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Reject unsupported types and sizes before touching the pixels.
    pub fn validate(&self, mime_type: &str, size_bytes: u64) -> Result<(), UploadError> {
        if !SUPPORTED_IMAGE_MIME_TYPES.contains(&mime_type) {
            return Err(UploadError::Validation(
                "Formato no soportado. Usa JPG, PNG, WebP o AVIF.".to_string(),
            ));
        }
        if size_bytes == 0 {
            return Err(UploadError::Validation("Archivo vacío.".to_string()));
        }
        if size_bytes > self.max_bytes {
            let max_mb = (self.max_bytes as f64 / MIB as f64).round();
            return Err(UploadError::Validation(format!(
                "Archivo demasiado grande. Máximo {max_mb:.0} MB."
            )));
        }
        Ok(())
    }

    /// Validate, optimize and persist an image under `<root>/<tenant>/<YYYY>/<MM>/`.
    pub async fn store(&self, request: UploadRequest) -> Result<StoredImage, UploadError> {
        self.validate(&request.mime_type, request.size_bytes)?;

        let kind = request.kind;
        let quality = self.quality;
        let bytes = request.bytes;
        let optimized = tokio::task::spawn_blocking(move || optimize_image(&bytes, kind, quality))
            .await
            .map_err(|e| UploadError::Processing(e.to_string()))??;

        let now = Utc::now();
        let tenant_slug = slugify_domain(&request.tenant_domain);
        let year = format!("{:04}", now.year());
        let month = format!("{:02}", now.month());
        let file_name = format!("{}.webp", Uuid::new_v4().simple());

        let directory = self.root.join(&tenant_slug).join(&year).join(&month);
        tokio::fs::create_dir_all(&directory).await?;
        tokio::fs::write(directory.join(&file_name), &optimized.data).await?;

        tracing::info!(
            "Stored upload {}/{}/{}/{} ({} bytes)",
            tenant_slug,
            year,
            month,
            file_name,
            optimized.data.len()
        );

        Ok(StoredImage {
            url: format!("/uploads/{tenant_slug}/{year}/{month}/{file_name}"),
            content_type: WEBP_CONTENT_TYPE,
            size_bytes: optimized.data.len(),
            width: optimized.width,
            height: optimized.height,
        })
    }
}

/// Decode, apply EXIF orientation, fit inside the kind's box without
/// upscaling, and encode lossy WebP.
pub fn optimize_image(bytes: &[u8], kind: UploadKind, quality: u8) -> Result<OptimizedImage, UploadError> {
    let unreadable = || UploadError::Validation("No se pudo leer la imagen. Usa JPG, PNG, WebP o AVIF.".to_string());

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|_| unreadable())?;
    let mut decoder = reader.into_decoder().map_err(|_| unreadable())?;
    let orientation = decoder.orientation().unwrap_or(image::metadata::Orientation::NoTransforms);
    let mut img = DynamicImage::from_decoder(decoder).map_err(|_| unreadable())?;
    img.apply_orientation(orientation);

    let (max_width, max_height) = kind.bounds();
    if img.width() > max_width || img.height() > max_height {
        img = img.resize(max_width, max_height, FilterType::Lanczos3);
    }

    let (width, height) = (img.width(), img.height());
    let encoded = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), width, height)
            .encode_simple(false, f32::from(quality))
            .map(|memory| memory.to_vec())
    } else {
        let rgb = img.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), width, height)
            .encode_simple(false, f32::from(quality))
            .map(|memory| memory.to_vec())
    };
    let data = encoded.map_err(|e| UploadError::Processing(format!("webp encoding failed: {e:?}")))?;

    Ok(OptimizedImage { data, width, height })
}

/// Directory name for a tenant: lowercase `[a-z0-9.-]`, other runs collapsed to `-`.
pub fn slugify_domain(domain: &str) -> String {
    let mut slug = String::with_capacity(domain.len());
    for ch in domain.trim().to_lowercase().chars() {
        let keep = ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '.' || ch == '-';
        let next = if keep { ch } else { '-' };
        if next == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(next);
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "default".to_string()
    } else {
        slug.to_string()
    }
}
