mod common;

use anyhow::Result;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use finance_client::auth::{ProbeOutcome, SessionCheck, SessionProber};
use serde_json::json;

#[tokio::test]
async fn probe_returns_identity_unchanged() -> Result<()> {
    let router = Router::new().route(
        "/auth/me",
        get(|| async { Json(json!({"id": 1, "email": "a@b.com"})) }),
    );
    let api = common::MockApi::spawn(router).await?;
    let prober = SessionProber::new(api.client()?);

    let session = prober.probe().await.expect("session expected");
    assert_eq!(session.identity(), &json!({"id": 1, "email": "a@b.com"}));
    Ok(())
}

#[tokio::test]
async fn probe_returns_none_on_401() -> Result<()> {
    let router = Router::new().route(
        "/auth/me",
        get(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "invalid_session", "message": "Sessão inválida ou expirada"})),
            )
        }),
    );
    let api = common::MockApi::spawn(router).await?;
    let prober = SessionProber::new(api.client()?);

    assert_eq!(prober.check().await, ProbeOutcome::NoSession);
    assert!(prober.probe().await.is_none());
    Ok(())
}

#[tokio::test]
async fn probe_returns_none_on_connection_error() -> Result<()> {
    let client = common::client_for(&common::unreachable_url()?)?;
    let prober = SessionProber::new(client);

    // Distinct from the 401 path, but still no session
    assert!(matches!(prober.check().await, ProbeOutcome::Unreachable(_)));
    assert!(prober.probe().await.is_none());
    Ok(())
}

#[tokio::test]
async fn probe_returns_none_on_server_error() -> Result<()> {
    let router = Router::new().route(
        "/auth/me",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let api = common::MockApi::spawn(router).await?;
    let prober = SessionProber::new(api.client()?);

    assert!(matches!(prober.check().await, ProbeOutcome::Unreachable(_)));
    assert!(prober.probe().await.is_none());
    Ok(())
}

#[tokio::test]
async fn probe_treats_null_identity_as_no_session() -> Result<()> {
    let router = Router::new().route("/auth/me", get(|| async { Json(serde_json::Value::Null) }));
    let api = common::MockApi::spawn(router).await?;
    let prober = SessionProber::new(api.client()?);

    assert_eq!(prober.check().await, ProbeOutcome::NoSession);
    Ok(())
}

#[tokio::test]
async fn probe_sends_stored_session_cookie() -> Result<()> {
    let router = Router::new().route(
        "/auth/me",
        get(|headers: HeaderMap| async move {
            let cookie = headers
                .get("cookie")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            if cookie.contains("sid=abc123") {
                (StatusCode::OK, Json(json!({"user_id": 7})))
            } else {
                (StatusCode::UNAUTHORIZED, Json(json!({"message": "no session"})))
            }
        }),
    );
    let api = common::MockApi::spawn(router).await?;

    let anonymous = SessionProber::new(api.client()?);
    assert!(anonymous.probe().await.is_none());

    let client = api.client()?.with_session(Some("abc123".to_string()));
    let session = SessionProber::new(client).probe().await.expect("session expected");
    assert_eq!(session.user_id(), Some(7));
    Ok(())
}
