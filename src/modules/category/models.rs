use serde::{Deserialize, Serialize};

/// A product category. Names are unique within the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

/// Request body for creating a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCategory {
    #[serde(default)]
    pub name: String,
}
