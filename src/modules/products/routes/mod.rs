use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use catalog_http::error::AppError;
use serde_json::json;

use super::models::{Product, ProductDraft};
use super::repository::ProductRepository;

type Repo = State<Arc<ProductRepository>>;

/// Builds the products router over a shared repository.
pub fn router(repository: Arc<ProductRepository>) -> Router {
    tracing::debug!(module = "products", "registering routes");

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/health", get(health_check))
        .route(
            "/{id}",
            get(get_product).put(replace_product).delete(delete_product),
        )
        .with_state(repository)
}

async fn health_check() -> &'static str {
    "products module is healthy"
}

async fn list_products(State(repo): Repo) -> Json<Vec<Product>> {
    Json(repo.list().await)
}

async fn get_product(State(repo): Repo, Path(id): Path<String>) -> Result<Json<Product>, AppError> {
    repo.get(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found("Product not found"))
}

async fn create_product(
    State(repo): Repo,
    payload: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let draft = parse_draft(payload)?;
    require_fields(&draft)?;

    let product = repo.create(draft).await;
    tracing::info!(id = %product.id, name = %product.name, "product created");

    Ok((StatusCode::CREATED, Json(product)))
}

async fn replace_product(
    State(repo): Repo,
    Path(id): Path<String>,
    payload: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<Json<Product>, AppError> {
    let draft = parse_draft(payload)?;

    if !repo.contains(&id).await {
        return Err(AppError::not_found("Product not found"));
    }
    require_fields(&draft)?;

    let product = repo
        .replace(&id, draft)
        .await
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    tracing::info!(id = %product.id, "product replaced");

    Ok(Json(product))
}

async fn delete_product(State(repo): Repo, Path(id): Path<String>) -> Result<StatusCode, AppError> {
    if !repo.delete(&id).await {
        return Err(AppError::not_found("Product not found"));
    }
    tracing::info!(id = %id, "product deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn parse_draft(payload: Result<Json<ProductDraft>, JsonRejection>) -> Result<ProductDraft, AppError> {
    match payload {
        Ok(Json(draft)) => Ok(draft),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "unreadable product payload");
            Err(AppError::bad_request("Invalid request data"))
        }
    }
}

fn require_fields(draft: &ProductDraft) -> Result<(), AppError> {
    let missing = draft.missing_fields();
    if missing.is_empty() {
        return Ok(());
    }

    let details = missing
        .into_iter()
        .map(|field| json!({ "field": field, "error": "required" }))
        .collect();
    Err(AppError::validation(details, "Missing required fields"))
}
