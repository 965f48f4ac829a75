use crate::view::{derive_view, SortOrder, ViewCriteria};
use crate::{CatalogApi, Category, ClientError, Product, ProductDraft};

/// Product list state shared by the list, detail and form views.
///
/// Every mutation is one remote call followed by a full [`refresh`]. There
/// is no request de-duplication, retry or cancellation; callers retry by
/// re-invoking the operation.
///
/// [`refresh`]: CatalogStore::refresh
pub struct CatalogStore<A> {
    api: A,
    products: Vec<Product>,
    categories: Vec<String>,
    criteria: ViewCriteria,
    loading: bool,
    error: Option<String>,
}

impl<A: CatalogApi> CatalogStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            products: Vec::new(),
            categories: Vec::new(),
            criteria: ViewCriteria::default(),
            loading: false,
            error: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Raw collection as last fetched
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Category names as last fetched
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the most recent failure, cleared when an operation starts
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Refetch the whole collection. On failure the list is emptied and the
    /// error recorded.
    pub async fn refresh(&mut self) {
        self.begin();

        match self.api.list_products().await {
            Ok(products) => {
                tracing::debug!(count = products.len(), "products refreshed");
                self.products = products;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch products");
                self.error = Some(err.to_string());
                self.products.clear();
            }
        }

        self.loading = false;
    }

    /// Refetch category names. A failure is logged and the previous names kept.
    pub async fn refresh_categories(&mut self) {
        match self.api.list_categories().await {
            Ok(categories) => {
                self.categories = categories.into_iter().map(|c| c.name).collect();
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch categories");
            }
        }
    }

    /// Fetch one record for the detail view
    pub async fn product(&self, id: &str) -> Result<Product, ClientError> {
        self.api.get_product(id).await
    }

    pub async fn add(&mut self, draft: &ProductDraft) -> Result<Product, ClientError> {
        self.begin();
        match self.api.create_product(draft).await {
            Ok(product) => {
                tracing::info!(id = %product.id, "product added");
                self.refresh().await;
                Ok(product)
            }
            Err(err @ ClientError::Decode(_)) => {
                Err(self.settle_unreadable("add product", err).await)
            }
            Err(err) => Err(self.fail("add product", err)),
        }
    }

    pub async fn update(&mut self, id: &str, draft: &ProductDraft) -> Result<Product, ClientError> {
        self.begin();
        match self.api.update_product(id, draft).await {
            Ok(product) => {
                tracing::info!(id = %product.id, "product updated");
                self.refresh().await;
                Ok(product)
            }
            Err(err @ ClientError::Decode(_)) => {
                Err(self.settle_unreadable("update product", err).await)
            }
            Err(err) => Err(self.fail("update product", err)),
        }
    }

    pub async fn remove(&mut self, id: &str) -> Result<(), ClientError> {
        self.begin();
        match self.api.delete_product(id).await {
            Ok(()) => {
                tracing::info!(id = %id, "product removed");
                self.refresh().await;
                Ok(())
            }
            Err(err) => Err(self.fail("remove product", err)),
        }
    }

    /// Create a category, then refetch the names. A duplicate name comes
    /// back as [`ClientError::Conflict`] and the names stay as they were.
    pub async fn add_category(&mut self, name: &str) -> Result<Category, ClientError> {
        let category = self.api.create_category(name).await.map_err(|err| {
            tracing::warn!(error = %err, category = name, "failed to add category");
            err
        })?;
        self.refresh_categories().await;
        Ok(category)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.criteria.category = category.into();
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.criteria.sort_order = order;
    }

    /// Filtered and sorted products, recomputed on every call
    pub fn view(&self) -> Vec<&Product> {
        derive_view(&self.products, &self.criteria)
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// A 2xx reply whose body did not decode: the server applied the change,
    /// so the list is refetched like on success and the error handed back.
    async fn settle_unreadable(
        &mut self,
        operation: &'static str,
        err: ClientError,
    ) -> ClientError {
        tracing::warn!(error = %err, operation, "change accepted but reply unreadable");
        self.refresh().await;
        err
    }

    fn fail(&mut self, operation: &'static str, err: ClientError) -> ClientError {
        tracing::warn!(error = %err, operation, "catalog operation failed");
        self.error = Some(err.to_string());
        self.loading = false;
        err
    }
}
