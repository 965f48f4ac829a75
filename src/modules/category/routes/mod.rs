use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use catalog_http::error::AppError;
use serde_json::json;

use super::models::{Category, NewCategory};
use super::repository::{CategoryError, CategoryRepository};

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        let message = err.to_string();
        match err {
            CategoryError::BlankName => AppError::validation(
                vec![json!({ "field": "name", "error": "required" })],
                message,
            ),
            CategoryError::Duplicate(_) => {
                AppError::conflict(vec![json!({ "field": "name", "error": "taken" })], message)
            }
        }
    }
}

pub fn router(repository: Arc<CategoryRepository>) -> Router {
    tracing::debug!(module = "category", "registering routes");

    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/health", get(health_check))
        .with_state(repository)
}

async fn health_check() -> &'static str {
    "category module is healthy"
}

async fn list_categories(State(repo): State<Arc<CategoryRepository>>) -> Json<Vec<Category>> {
    Json(repo.list().await)
}

async fn create_category(
    State(repo): State<Arc<CategoryRepository>>,
    payload: Result<Json<NewCategory>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let Json(new_category) =
        payload.map_err(|_| AppError::bad_request("Invalid request data"))?;

    let category = repo.create(&new_category.name).await?;
    tracing::info!(id = category.id, name = %category.name, "category created");

    Ok((StatusCode::CREATED, Json(category)))
}
