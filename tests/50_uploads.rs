mod common;

use std::io::Cursor;

use anyhow::Result;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Noisy photo-like JPEG, large enough to need downscaling.
fn noisy_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        let n = x.wrapping_mul(2_654_435_761).wrapping_add(y.wrapping_mul(40_503)) ^ (x * y);
        Rgb([(n & 0xff) as u8, ((n >> 8) & 0xff) as u8, ((n >> 16) & 0xff) as u8])
    });
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, ImageFormat::Jpeg)
        .expect("encode jpeg");
    out.into_inner()
}

fn small_avif() -> Vec<u8> {
    let img = RgbImage::from_fn(120, 80, |x, y| Rgb([(x * 2) as u8, (y * 3) as u8, 64]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, ImageFormat::Avif)
        .expect("encode avif");
    out.into_inner()
}

fn file_form(bytes: Vec<u8>, mime: &str, kind: Option<&str>) -> Result<Form> {
    let part = Part::bytes(bytes).file_name("photo.jpg").mime_str(mime)?;
    let form = Form::new().part("file", part);
    Ok(match kind {
        Some(kind) => form.text("kind", kind.to_string()),
        None => form,
    })
}

#[tokio::test]
async fn serving_rejects_unsafe_and_missing_paths() -> Result<()> {
    let server = common::spawn_offline().await?;

    let res = server.get("/uploads/tenant/2026/01/missing.webp").send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({ "error": "Archivo no encontrado" }));

    let res = server.get("/uploads/tenant%5C..%5Csecret.webp").send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn upload_requires_session() -> Result<()> {
    let server = common::spawn_offline().await?;

    let res = server
        .post("/api/admin/upload")
        .multipart(file_form(vec![1, 2, 3], "image/jpeg", None)?)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn upload_validation_errors() -> Result<()> {
    let Some(mut server) = common::spawn_with_database().await? else {
        return Ok(());
    };
    server.login().await?;

    let too_big = vec![0u8; 9 * 1024 * 1024];
    let res = server
        .post("/api/admin/upload")
        .multipart(file_form(too_big, "image/jpeg", None)?)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await?,
        json!({ "error": "Archivo demasiado grande. Máximo 8 MB." })
    );

    let res = server
        .post("/api/admin/upload")
        .multipart(file_form(vec![1, 2, 3], "image/gif", None)?)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "Formato no soportado. Usa JPG, PNG, WebP o AVIF.");

    let res = server
        .post("/api/admin/upload")
        .multipart(Form::new().text("kind", "hero"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "Adjunta un archivo válido");

    let res = server
        .post("/api/admin/upload")
        .multipart(file_form(b"not an image".to_vec(), "image/png", None)?)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn jpeg_is_stored_as_bounded_webp_and_served() -> Result<()> {
    let Some(mut server) = common::spawn_with_database().await? else {
        return Ok(());
    };
    server.login().await?;

    let res = server
        .post("/api/admin/upload")
        .multipart(file_form(noisy_jpeg(2400, 1800), "image/jpeg", Some("hero"))?)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["ok"], true);
    let file = &body["file"];
    assert_eq!(file["contentType"], "image/webp");
    assert!(file["width"].as_u64().unwrap_or(u64::MAX) <= 1920);
    assert!(file["height"].as_u64().unwrap_or(u64::MAX) <= 1080);
    let url = file["url"].as_str().unwrap_or_default().to_string();
    assert!(url.starts_with(&format!("/uploads/{}/", server.domain)));
    assert!(url.ends_with(".webp"));

    let served = server.get(&url).send().await?;
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(served.headers()["content-type"].to_str()?, "image/webp");
    assert!(served.headers()["cache-control"].to_str()?.contains("immutable"));
    let bytes = served.bytes().await?;
    assert_eq!(bytes.len() as u64, file["sizeBytes"].as_u64().unwrap_or_default());
    assert_eq!(&bytes[8..12], b"WEBP");

    let res = server
        .post("/api/admin/upload")
        .multipart(file_form(noisy_jpeg(2400, 1800), "image/jpeg", Some("generic"))?)
        .send()
        .await?;
    let generic = res.json::<Value>().await?;
    assert_eq!(generic["file"]["width"], 1600);
    assert_eq!(generic["file"]["height"], 1200);
    Ok(())
}

#[tokio::test]
async fn avif_upload_is_converted_to_webp() -> Result<()> {
    let Some(mut server) = common::spawn_with_database().await? else {
        return Ok(());
    };
    server.login().await?;

    let res = server
        .post("/api/admin/upload")
        .multipart(file_form(small_avif(), "image/avif", Some("generic"))?)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let file = res.json::<Value>().await?["file"].clone();
    assert_eq!(file["contentType"], "image/webp");
    assert_eq!(file["width"], 120);
    assert_eq!(file["height"], 80);

    let url = file["url"].as_str().unwrap_or_default().to_string();
    let served = server.get(&url).send().await?;
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(&served.bytes().await?[8..12], b"WEBP");
    Ok(())
}
