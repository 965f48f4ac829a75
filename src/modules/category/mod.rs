pub mod models;
pub mod repository;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use catalog_kernel::{InitCtx, Module};
use serde_json::json;

use repository::CategoryRepository;

/// Category module: list and create product categories.
pub struct CategoryModule {
    repository: Arc<CategoryRepository>,
}

impl CategoryModule {
    pub fn new() -> Self {
        Self {
            repository: Arc::new(CategoryRepository::seeded()),
        }
    }

    pub fn repository(&self) -> &Arc<CategoryRepository> {
        &self.repository
    }
}

impl Default for CategoryModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for CategoryModule {
    fn name(&self) -> &'static str {
        "category"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "category module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.repository.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List categories",
                        "tags": ["Categories"],
                        "responses": {
                            "200": {
                                "description": "All categories",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Category" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a category",
                        "tags": ["Categories"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/NewCategory" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Created category",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Category" }
                                    }
                                }
                            },
                            "400": {
                                "description": "Blank name or unreadable body",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            },
                            "409": {
                                "description": "A category with this name already exists",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Category health check",
                        "tags": ["Categories"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "text/plain": { "schema": { "type": "string" } }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Category": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "name": { "type": "string" }
                        },
                        "required": ["id", "name"]
                    },
                    "NewCategory": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" }
                        },
                        "required": ["name"]
                    }
                }
            }
        }))
    }
}

/// Create a new instance of the category module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(CategoryModule::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    fn post(body: &str) -> Request<Body> {
        Request::post("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn create_then_list() {
        let module = CategoryModule::new();
        let router = module.routes();

        let response = router
            .clone()
            .oneshot(post(r#"{"name": "Lighting"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = router
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let names: Vec<String> = serde_json::from_slice::<Vec<models::Category>>(&bytes)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Furniture", "Electronics", "Lighting"]);
    }

    #[tokio::test]
    async fn duplicate_name_is_409_with_message() {
        let module = CategoryModule::new();
        let response = module
            .routes()
            .oneshot(post(r#"{"name": "Electronics"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body["error"]["message"],
            "Category 'Electronics' already exists"
        );
        assert_eq!(module.repository().list().await.len(), 2);
    }

    #[tokio::test]
    async fn blank_name_is_400() {
        let response = CategoryModule::new()
            .routes()
            .oneshot(post(r#"{"name": ""}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
