//! In-memory category list with unique names.

use thiserror::Error;
use tokio::sync::RwLock;

use super::models::Category;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CategoryError {
    #[error("Category name must not be empty")]
    BlankName,
    #[error("Category '{0}' already exists")]
    Duplicate(String),
}

struct Categories {
    entries: Vec<Category>,
    next_id: u64,
}

pub struct CategoryRepository {
    inner: RwLock<Categories>,
}

impl CategoryRepository {
    pub fn new(names: &[&str]) -> Self {
        let entries: Vec<Category> = names
            .iter()
            .zip(1..)
            .map(|(name, id)| Category {
                id,
                name: name.to_string(),
            })
            .collect();
        let next_id = entries.len() as u64 + 1;

        Self {
            inner: RwLock::new(Categories { entries, next_id }),
        }
    }

    /// Categories used by the demo products
    pub fn seeded() -> Self {
        Self::new(&["Furniture", "Electronics"])
    }

    pub async fn list(&self) -> Vec<Category> {
        self.inner.read().await.entries.clone()
    }

    /// Insert a category. Names are trimmed and compared case-insensitively.
    pub async fn create(&self, name: &str) -> Result<Category, CategoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryError::BlankName);
        }

        let mut categories = self.inner.write().await;
        let folded = name.to_lowercase();
        if categories
            .entries
            .iter()
            .any(|existing| existing.name.to_lowercase() == folded)
        {
            return Err(CategoryError::Duplicate(name.to_string()));
        }

        let category = Category {
            id: categories.next_id,
            name: name.to_string(),
        };
        categories.next_id += 1;
        categories.entries.push(category.clone());
        Ok(category)
    }
}

impl Default for CategoryRepository {
    fn default() -> Self {
        Self::seeded()
    }
}
