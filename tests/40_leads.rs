mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

fn lead(name: &str) -> Value {
    json!({
        "name": name,
        "phone": "+51 990 814 630",
        "email": "cliente@example.com",
        "message": "Quisiera agendar una visita",
        "source": "hero-form"
    })
}

async fn list(server: &common::TestServer, query: &str) -> Result<Vec<Value>> {
    let res = server.get(&format!("/api/admin/leads{query}")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    Ok(body["leads"].as_array().cloned().unwrap_or_default())
}

#[tokio::test]
async fn invalid_and_spam_leads_are_answered_without_database() -> Result<()> {
    let server = common::spawn_offline().await?;

    let res = server
        .post("/api/leads")
        .json(&json!({ "name": "A", "phone": "abc", "message": "corto" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Payload inválido");
    assert!(body["issues"]["fieldErrors"]["name"].is_array());

    let mut spam = lead("Spam Bot");
    spam["website"] = json!("http://spam.example");
    let res = server.post("/api/leads").json(&spam).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "ok": true }));

    let res = server.post("/api/leads").json(&lead("Ana Perez")).send().await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json::<Value>().await?["error"], "No se pudo registrar el lead");
    Ok(())
}

#[tokio::test]
async fn public_form_stores_leads() -> Result<()> {
    let Some(mut server) = common::spawn_with_database().await? else {
        return Ok(());
    };

    let res = server.post("/api/leads").json(&lead("Ana Perez")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["ok"], true);
    assert!(body["leadId"].is_string());

    let res = server
        .post("/api/leads")
        .json(&json!({ "name": "A", "phone": "abc", "message": "corto" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Payload inválido");
    assert!(body["issues"]["fieldErrors"]["phone"].is_array());

    server.login().await?;
    let leads = list(&server, "").await?;
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0]["name"], "Ana Perez");
    assert_eq!(leads[0]["source"], "hero-form");
    Ok(())
}

#[tokio::test]
async fn honeypot_submissions_are_swallowed() -> Result<()> {
    let Some(mut server) = common::spawn_with_database().await? else {
        return Ok(());
    };

    let mut spam = lead("Spam Bot");
    spam["website"] = json!("http://spam.example");
    let res = server.post("/api/leads").json(&spam).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "ok": true }));

    server.login().await?;
    assert!(list(&server, "").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn listing_filters_and_clamps() -> Result<()> {
    let Some(mut server) = common::spawn_with_database().await? else {
        return Ok(());
    };

    for name in ["Ana Perez", "Bruno Diaz", "Carla 100%"] {
        let res = server.post("/api/leads").json(&lead(name)).send().await?;
        assert_eq!(res.status(), StatusCode::OK);
    }
    server.login().await?;

    let all = list(&server, "").await?;
    assert_eq!(all.len(), 3);
    assert_eq!(all[0]["name"], "Carla 100%");

    assert_eq!(list(&server, "?q=bruno").await?.len(), 1);
    assert_eq!(list(&server, "?q=%25").await?.len(), 1);
    assert_eq!(list(&server, "?source=HERO").await?.len(), 3);
    assert_eq!(list(&server, "?source=footer").await?.len(), 0);
    assert_eq!(list(&server, "?limit=10000").await?.len(), 3);
    assert_eq!(list(&server, "?limit=0").await?.len(), 1);
    assert_eq!(list(&server, "?limit=-4").await?.len(), 1);
    assert_eq!(list(&server, "?limit=2").await?.len(), 2);
    assert_eq!(list(&server, "?limit=abc").await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn export_returns_csv_attachment() -> Result<()> {
    let Some(mut server) = common::spawn_with_database().await? else {
        return Ok(());
    };

    server.post("/api/leads").json(&lead("Ana \"La\" Perez")).send().await?;
    server.login().await?;

    let res = server.get("/api/admin/leads/export").send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"].to_str()?, "text/csv; charset=utf-8");
    assert_eq!(res.headers()["cache-control"].to_str()?, "no-store");
    let disposition = res.headers()["content-disposition"].to_str()?.to_string();
    assert!(disposition.starts_with("attachment; filename=\"leads_"));
    assert!(disposition.ends_with(".csv\""));

    let csv = res.text().await?;
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("createdAt,name,phone,email,message,source"));
    assert!(lines.next().unwrap_or_default().contains("\"Ana \"\"La\"\" Perez\""));
    Ok(())
}
