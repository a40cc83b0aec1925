mod common;

use std::collections::HashMap;

use anyhow::Result;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use finance_client::models::{CategoryCreate, CategoryQuery, CategoryType, CategoryUpdate, Page};
use finance_client::services::CategoryService;
use serde_json::{json, Value};

async fn failing() -> StatusCode {
    StatusCode::BAD_GATEWAY
}

#[tokio::test]
async fn list_passes_kind_filter_only_when_given() -> Result<()> {
    let queries = common::QueryLog::default();
    let log = queries.clone();
    let router = Router::new().route(
        "/categories/",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let log = log.clone();
            async move {
                log.push(params);
                Json(json!([{"id": 1, "name": "Salário", "category_type": "INCOME", "color": "#22c55e"}]))
            }
        }),
    );
    let api = common::MockApi::spawn(router).await?;
    let categories = CategoryService::new(api.client()?);

    let listed = categories.list(None).await?;
    assert_eq!(listed[0].category_type, CategoryType::Income);

    categories.list(Some(CategoryQuery::of_kind(CategoryType::Income))).await?;
    categories
        .list(Some(CategoryQuery {
            page: Page::new(30, 15),
            category_type: Some(CategoryType::Expenses),
        }))
        .await?;

    let seen = queries.entries();
    assert_eq!(seen[0].get("offset").map(String::as_str), Some("0"));
    assert_eq!(seen[0].get("limit").map(String::as_str), Some("10"));
    assert!(!seen[0].contains_key("category_type"));

    assert_eq!(seen[1].get("category_type").map(String::as_str), Some("INCOME"));

    assert_eq!(seen[2].get("offset").map(String::as_str), Some("30"));
    assert_eq!(seen[2].get("limit").map(String::as_str), Some("15"));
    assert_eq!(seen[2].get("category_type").map(String::as_str), Some("EXPENSES"));
    Ok(())
}

#[tokio::test]
async fn update_never_sends_category_type() -> Result<()> {
    let bodies = common::Recorder::<Value>::default();
    let log = bodies.clone();
    let router = Router::new().route(
        "/categories/:id",
        axum::routing::patch(move |Path(id): Path<i64>, Json(body): Json<Value>| {
            let log = log.clone();
            async move {
                log.push(body.clone());
                Json(json!({"id": id, "name": body["name"], "category_type": "EXPENSES", "color": "#ef4444"}))
            }
        }),
    );
    let api = common::MockApi::spawn(router).await?;
    let categories = CategoryService::new(api.client()?);

    let update = CategoryUpdate {
        name: Some("Mercado".to_string()),
        color: Some("#ef4444".to_string()),
    };
    let updated = categories.update(4, &update).await?;
    assert_eq!(updated.id, 4);
    assert_eq!(updated.name, "Mercado");

    let sent = bodies.entries();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].get("category_type").is_none());
    assert_eq!(sent[0], json!({"name": "Mercado", "color": "#ef4444"}));
    Ok(())
}

#[tokio::test]
async fn create_surfaces_structured_message() -> Result<()> {
    let router = Router::new().route(
        "/categories/",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "category_already_exists", "message": "Categoria já existe"})),
            )
        }),
    );
    let api = common::MockApi::spawn(router).await?;
    let categories = CategoryService::new(api.client()?);

    let data = CategoryCreate {
        name: "Lazer".to_string(),
        category_type: CategoryType::Expenses,
        color: "#a855f7".to_string(),
    };
    let err = categories.create(&data).await.expect_err("create should fail");
    assert_eq!(err.message(), "Categoria já existe");
    Ok(())
}

#[tokio::test]
async fn every_operation_has_its_fallback_message() -> Result<()> {
    let router = Router::new()
        .route("/categories/", get(failing).post(failing))
        .route("/categories/:id", get(failing).patch(failing).delete(failing));
    let api = common::MockApi::spawn(router).await?;
    let categories = CategoryService::new(api.client()?);

    let data = CategoryCreate {
        name: "Lazer".to_string(),
        category_type: CategoryType::Expenses,
        color: "#a855f7".to_string(),
    };
    assert_eq!(categories.create(&data).await.unwrap_err().message(), "Erro ao cadastrar categoria");
    assert_eq!(categories.get(1).await.unwrap_err().message(), "Erro ao buscar categoria");
    assert_eq!(categories.list(None).await.unwrap_err().message(), "Erro ao listar categorias");
    assert_eq!(
        categories.update(1, &CategoryUpdate::default()).await.unwrap_err().message(),
        "Erro ao atualizar categoria"
    );
    assert_eq!(categories.delete(1).await.unwrap_err().message(), "Erro ao deletar categoria");
    Ok(())
}
