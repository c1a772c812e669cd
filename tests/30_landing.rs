mod common;

use anyhow::Result;
use landing_api_rust::database::repository::LandingRepository;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn draft_round_trips_and_publish_promotes_it() -> Result<()> {
    let Some(mut server) = common::spawn_with_database().await? else {
        return Ok(());
    };
    server.login().await?;

    // Nothing published yet: the public page gets the fallback (and caches that)
    let public = server.get("/api/landing").send().await?.json::<Value>().await?;
    assert!(public["landing"].is_null());
    assert!(public["fallback"].is_object());

    let draft = server.get("/api/admin/landing").send().await?.json::<Value>().await?;
    assert_eq!(draft["landing"]["status"], "DRAFT");

    let mut data = draft["landing"]["data"].clone();
    let mut seo = draft["landing"]["seo"].clone();
    data["heroSlider"][0]["title"] = json!("Nuevo titular");
    data["heroSlider"][0]["imageUrl"] = json!("//cdn.example.com/hero.webp");
    seo["title"] = json!("Titulo SEO actualizado");

    let saved = server
        .put("/api/admin/landing")
        .json(&json!({ "data": data, "seo": seo }))
        .send()
        .await?;
    assert_eq!(saved.status(), StatusCode::OK);
    let saved = saved.json::<Value>().await?;
    assert_eq!(saved["ok"], true);
    assert_eq!(saved["landing"]["data"], data);
    assert_eq!(saved["landing"]["updatedBy"]["email"], common::ADMIN_EMAIL);

    let reread = server.get("/api/admin/landing").send().await?.json::<Value>().await?;
    assert_eq!(reread["landing"]["data"], data);
    assert_eq!(reread["landing"]["seo"], seo);

    // An invalid draft is rejected and the stored one is untouched
    let mut broken = data.clone();
    broken["heroSlider"] = json!([]);
    let rejected = server
        .put("/api/admin/landing")
        .json(&json!({ "data": broken, "seo": seo }))
        .send()
        .await?;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
    let rejected = rejected.json::<Value>().await?;
    assert_eq!(rejected["error"], "Payload invalido");
    assert!(rejected["issues"]["fieldErrors"]["data.heroSlider"].is_array());
    let reread = server.get("/api/admin/landing").send().await?.json::<Value>().await?;
    assert_eq!(reread["landing"]["data"], data);

    let published = server.post("/api/admin/publish").send().await?;
    assert_eq!(published.status(), StatusCode::OK);
    let published = published.json::<Value>().await?;
    assert_eq!(published["published"]["status"], "PUBLISHED");
    assert_eq!(published["published"]["data"], data);
    assert_eq!(published["snapshot"]["data"], data);
    assert_eq!(published["snapshot"]["publishedBy"]["email"], common::ADMIN_EMAIL);

    // Publishing invalidated the cached fallback
    let public = server.get("/api/landing").send().await?.json::<Value>().await?;
    assert_eq!(public["seo"]["title"], "Titulo SEO actualizado");
    assert!(public["fallback"].is_null());
    assert_eq!(public["landing"]["data"]["heroSlider"][0]["imageUrl"], "https://cdn.example.com/hero.webp");

    let history = server.get("/api/admin/publishes").send().await?.json::<Value>().await?;
    let history = history["publishes"].as_array().cloned().unwrap_or_default();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["id"], published["snapshot"]["id"]);
    Ok(())
}

#[tokio::test]
async fn failed_publish_leaves_published_state_unchanged() -> Result<()> {
    let Some(mut server) = common::spawn_with_database().await? else {
        return Ok(());
    };
    server.login().await?;

    let first = server.post("/api/admin/publish").send().await?.json::<Value>().await?;
    assert_eq!(first["ok"], true);

    let tenant = server.state.tenants.get_or_create(&server.domain).await?;
    let before = server.state.content.get_published(tenant.id).await?;
    let history_before = server.state.content.list_publishes(tenant.id, Some(50)).await?;

    // Unknown publisher: the foreign key rejects the write inside the transaction
    let repo = LandingRepository::new(server.state.db.pool().clone());
    assert!(repo.publish(tenant.id, uuid::Uuid::new_v4()).await.is_err());

    let after = server.state.content.get_published(tenant.id).await?;
    let history_after = server.state.content.list_publishes(tenant.id, Some(50)).await?;
    assert_eq!(before, after);
    assert_eq!(history_before.len(), history_after.len());
    Ok(())
}
