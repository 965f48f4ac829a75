//! Transport seam between the store and the collection endpoint.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{Category, ClientError, Product, ProductDraft};

/// Remote operations the store depends on.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, ClientError>;
    async fn get_product(&self, id: &str) -> Result<Product, ClientError>;
    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ClientError>;
    async fn update_product(&self, id: &str, draft: &ProductDraft)
        -> Result<Product, ClientError>;
    async fn delete_product(&self, id: &str) -> Result<(), ClientError>;
    async fn list_categories(&self) -> Result<Vec<Category>, ClientError>;
    async fn create_category(&self, name: &str) -> Result<Category, ClientError>;
}

#[derive(Debug, Serialize)]
struct NewCategoryRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Error bodies seen from catalog backends: the structured envelope,
/// a bare `{"error": "..."}`, or a top-level `{"message": "..."}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorPayload {
    Envelope { error: ErrorDetail },
    Plain { error: String },
    Message { message: String },
}

impl ErrorPayload {
    fn into_message(self) -> String {
        match self {
            ErrorPayload::Envelope { error } => error.message,
            ErrorPayload::Plain { error } => error,
            ErrorPayload::Message { message } => message,
        }
    }
}

/// [`CatalogApi`] over HTTP. `base_url` is the API root, e.g.
/// `http://localhost:3001/api`.
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    http: Client,
    base_url: Url,
}

impl HttpCatalogApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ClientError::InvalidBaseUrl(format!("{base_url}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    /// Base URL with `segments` appended, each percent-encoded as a single
    /// path segment. Ids containing `/`, `?`, `#` or dot segments therefore
    /// never address a different resource.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn products_url(&self) -> Url {
        self.endpoint(&["products"])
    }

    fn product_url(&self, id: &str) -> Url {
        self.endpoint(&["products", id])
    }

    fn categories_url(&self) -> Url {
        self.endpoint(&["category"])
    }
}

/// Pass 2xx responses through; turn anything else into a typed error that
/// carries the server's message when it sent one.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let fallback = status
        .canonical_reason()
        .unwrap_or("unexpected status")
        .to_string();
    let message = match response.json::<ErrorPayload>().await {
        Ok(payload) => payload.into_message(),
        Err(_) => fallback,
    };

    Err(match status {
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::BAD_REQUEST => ClientError::Validation(message),
        StatusCode::CONFLICT => ClientError::Conflict(message),
        other => ClientError::Status {
            status: other.as_u16(),
            message,
        },
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    response
        .json()
        .await
        .map_err(|err| ClientError::Decode(err.to_string()))
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let response = self.http.get(self.products_url()).send().await?;
        decode(check(response).await?).await
    }

    async fn get_product(&self, id: &str) -> Result<Product, ClientError> {
        let response = self.http.get(self.product_url(id)).send().await?;
        decode(check(response).await?).await
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ClientError> {
        let response = self
            .http
            .post(self.products_url())
            .json(draft)
            .send()
            .await?;
        decode(check(response).await?).await
    }

    async fn update_product(
        &self,
        id: &str,
        draft: &ProductDraft,
    ) -> Result<Product, ClientError> {
        let response = self
            .http
            .put(self.product_url(id))
            .json(draft)
            .send()
            .await?;
        decode(check(response).await?).await
    }

    async fn delete_product(&self, id: &str) -> Result<(), ClientError> {
        let response = self.http.delete(self.product_url(id)).send().await?;
        check(response).await?;
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        let response = self.http.get(self.categories_url()).send().await?;
        decode(check(response).await?).await
    }

    async fn create_category(&self, name: &str) -> Result<Category, ClientError> {
        let response = self
            .http
            .post(self.categories_url())
            .json(&NewCategoryRequest { name })
            .send()
            .await?;
        decode(check(response).await?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let api = HttpCatalogApi::new("http://localhost:3001/api/").unwrap();
        assert_eq!(api.products_url().as_str(), "http://localhost:3001/api/products");
        assert_eq!(
            api.product_url("7").as_str(),
            "http://localhost:3001/api/products/7"
        );
        assert_eq!(api.categories_url().as_str(), "http://localhost:3001/api/category");
    }

    #[test]
    fn ids_are_encoded_as_one_segment() {
        let api = HttpCatalogApi::new("http://localhost:3001/api").unwrap();
        assert_eq!(
            api.product_url("2?x").as_str(),
            "http://localhost:3001/api/products/2%3Fx"
        );
        assert_eq!(
            api.product_url("9/../3").as_str(),
            "http://localhost:3001/api/products/9%2F..%2F3"
        );
        assert_eq!(
            api.product_url("1#a").as_str(),
            "http://localhost:3001/api/products/1%23a"
        );
    }

    #[test]
    fn unusable_base_url_is_rejected() {
        assert!(matches!(
            HttpCatalogApi::new("localhost:3001/api"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
        assert!(HttpCatalogApi::new("not a url").is_err());
    }

    #[test]
    fn error_payload_shapes() {
        let envelope: ErrorPayload =
            serde_json::from_str(r#"{"error": {"code": "conflict", "message": "taken"}}"#)
                .unwrap();
        assert_eq!(envelope.into_message(), "taken");

        let plain: ErrorPayload =
            serde_json::from_str(r#"{"error": "Product not found"}"#).unwrap();
        assert_eq!(plain.into_message(), "Product not found");

        let message: ErrorPayload =
            serde_json::from_str(r#"{"message": "La categoría ya existe"}"#).unwrap();
        assert_eq!(message.into_message(), "La categoría ya existe");
    }
}
