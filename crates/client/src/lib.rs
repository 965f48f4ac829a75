//! Client-side catalog store.
//!
//! [`CatalogStore`] is the single source of truth for a product list view:
//! it holds the fetched collection, the user's filter and sort criteria, and
//! derives the visible list from them. Mutations go through a [`CatalogApi`]
//! and are followed by a full refetch.

pub mod api;
pub mod error;
pub mod form;
pub mod store;
pub mod view;

pub use api::{CatalogApi, HttpCatalogApi};
pub use catalog_app::modules::category::models::Category;
pub use catalog_app::modules::products::models::{Dimensions, Product, ProductDraft};
pub use error::ClientError;
pub use form::{validate_draft, FieldError};
pub use store::CatalogStore;
pub use view::{derive_view, SortOrder, ViewCriteria};
