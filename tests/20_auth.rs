mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn login_rejects_malformed_payload() -> Result<()> {
    let server = common::spawn_offline().await?;

    let res = server
        .post("/api/admin/login")
        .json(&json!({ "email": "not-an-email", "password": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Payload invalido");
    assert!(body["issues"]["fieldErrors"]["email"].is_array());
    assert!(body["issues"]["fieldErrors"]["password"].is_array());

    let res = server.post("/api/admin/login").body("{").send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_unauthorized() -> Result<()> {
    // Credentials are checked before any database access
    let server = common::spawn_offline().await?;

    let res = server
        .post("/api/admin/login")
        .json(&json!({ "email": common::ADMIN_EMAIL, "password": "wrong" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(common::session_cookie_pair(res.headers()).is_none());
    assert_eq!(res.json::<Value>().await?, json!({ "error": "Credenciales invalidas" }));
    Ok(())
}

#[tokio::test]
async fn admin_routes_require_session_cookie() -> Result<()> {
    let server = common::spawn_offline().await?;

    for path in ["/api/admin/landing", "/api/admin/publishes", "/api/admin/leads", "/api/admin/unknown"] {
        let res = server.get(path).send().await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{path}");
        assert_eq!(res.json::<Value>().await?, json!({ "error": "Unauthorized" }));
    }
    Ok(())
}

#[tokio::test]
async fn logout_clears_cookie() -> Result<()> {
    let server = common::spawn_offline().await?;

    let res = server.post("/api/admin/logout").send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = res.headers()["set-cookie"].to_str()?.to_string();
    assert!(cookie.starts_with("admin_session=;"));
    assert!(cookie.contains("Max-Age=0"));
    assert_eq!(res.json::<Value>().await?, json!({ "ok": true }));
    Ok(())
}

#[tokio::test]
async fn login_sets_session_and_unlocks_backoffice() -> Result<()> {
    let Some(mut server) = common::spawn_with_database().await? else {
        return Ok(());
    };

    let res = server
        .post("/api/admin/login")
        .json(&json!({ "email": "  ADMIN@landing.test ", "password": common::ADMIN_PASSWORD }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = res.headers()["set-cookie"].to_str()?.to_string();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    let body = res.json::<Value>().await?;
    assert_eq!(body["ok"], true);
    assert_eq!(body["user"]["email"], common::ADMIN_EMAIL);
    assert_eq!(body["user"]["role"], "SUPER_ADMIN");

    server.login().await?;
    let res = server.get("/api/admin/landing").send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn tampered_session_is_unauthorized() -> Result<()> {
    let Some(server) = common::spawn_with_database().await? else {
        return Ok(());
    };

    let res = server
        .get("/api/admin/landing")
        .header("cookie", "admin_session=bm90LWEtdG9rZW4.c2ln")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn session_is_bound_to_its_tenant() -> Result<()> {
    let Some(mut server) = common::spawn_with_database().await? else {
        return Ok(());
    };
    server.login().await?;

    let other = format!("other-{}", server.domain);
    let res = server.get_for("/api/admin/landing", &other).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(res.json::<Value>().await?, json!({ "error": "Forbidden" }));
    Ok(())
}
