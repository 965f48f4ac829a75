pub mod models;
pub mod repository;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use catalog_kernel::{InitCtx, Module};
use serde_json::json;

use repository::ProductRepository;

/// Products module: the product collection endpoint.
pub struct ProductsModule {
    repository: Arc<ProductRepository>,
}

impl ProductsModule {
    /// Module serving the seeded demo catalog
    pub fn new() -> Self {
        Self::with_repository(Arc::new(ProductRepository::seeded()))
    }

    pub fn with_repository(repository: Arc<ProductRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<ProductRepository> {
        &self.repository
    }
}

impl Default for ProductsModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for ProductsModule {
    fn name(&self) -> &'static str {
        "products"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let products = self.repository.count().await;
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            products,
            "products module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.repository.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error_response = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let product_response = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Product" }
                    }
                }
            })
        };
        let draft_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ProductDraft" }
                }
            }
        });
        let id_param = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "string" }
        }]);

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List products",
                        "tags": ["Products"],
                        "responses": {
                            "200": {
                                "description": "All products",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Product" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a product",
                        "tags": ["Products"],
                        "requestBody": draft_body,
                        "responses": {
                            "201": product_response("Created product with its assigned id"),
                            "400": error_response("Missing required fields or unreadable body")
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a product",
                        "tags": ["Products"],
                        "parameters": id_param,
                        "responses": {
                            "200": product_response("The product"),
                            "404": error_response("Product not found")
                        }
                    },
                    "put": {
                        "summary": "Replace a product",
                        "tags": ["Products"],
                        "parameters": id_param,
                        "requestBody": draft_body,
                        "responses": {
                            "200": product_response("The replaced product"),
                            "400": error_response("Missing required fields or unreadable body"),
                            "404": error_response("Product not found")
                        }
                    },
                    "delete": {
                        "summary": "Delete a product",
                        "tags": ["Products"],
                        "parameters": id_param,
                        "responses": {
                            "204": { "description": "Deleted" },
                            "404": error_response("Product not found")
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Products health check",
                        "tags": ["Products"],
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
                    "Dimensions": {
                        "type": "object",
                        "properties": {
                            "height": { "type": "number" },
                            "width": { "type": "number" },
                            "depth": { "type": "number" }
                        },
                        "required": ["height", "width", "depth"]
                    },
                    "Product": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string", "description": "Server-assigned identifier" },
                            "name": { "type": "string" },
                            "description": { "type": "string" },
                            "price": { "type": "number" },
                            "availability": { "type": "boolean" },
                            "dimensions": { "$ref": "#/components/schemas/Dimensions" },
                            "materials": { "type": "array", "items": { "type": "string" } },
                            "colors": { "type": "array", "items": { "type": "string" } },
                            "imageUrl": { "type": "string" },
                            "category": { "type": "string" }
                        },
                        "required": ["id", "name", "description", "price", "category"]
                    },
                    "ProductDraft": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "description": { "type": "string" },
                            "price": { "type": "number" },
                            "availability": { "type": "boolean" },
                            "dimensions": { "$ref": "#/components/schemas/Dimensions" },
                            "materials": { "type": "array", "items": { "type": "string" } },
                            "colors": { "type": "array", "items": { "type": "string" } },
                            "imageUrl": { "type": "string" },
                            "category": { "type": "string" }
                        },
                        "required": ["name", "description", "price", "category"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "products module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let products = self.repository.count().await;
        tracing::info!(
            module = self.name(),
            products,
            "products module stopped, in-memory catalog discarded"
        );
        Ok(())
    }
}

/// Create a new instance of the products module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(ProductsModule::new())
}
