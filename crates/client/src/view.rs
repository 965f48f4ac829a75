//! Filtering and sorting of the product list.

use std::fmt;
use std::str::FromStr;

use crate::Product;

/// Order of the derived view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::NameAsc,
        SortOrder::NameDesc,
        SortOrder::PriceAsc,
        SortOrder::PriceDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::NameAsc => "name-asc",
            SortOrder::NameDesc => "name-desc",
            SortOrder::PriceAsc => "price-asc",
            SortOrder::PriceDesc => "price-desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|order| order.as_str() == value)
            .ok_or_else(|| {
                format!(
                    "unknown sort order '{}'; expected name-asc, name-desc, price-asc or price-desc",
                    value
                )
            })
    }
}

/// The user's current view filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewCriteria {
    pub search_term: String,
    /// Exact category name; empty means every category
    pub category: String,
    pub sort_order: SortOrder,
}

impl ViewCriteria {
    pub fn matches(&self, product: &Product) -> bool {
        let matches_search = product
            .name
            .to_lowercase()
            .contains(&self.search_term.to_lowercase());
        let matches_category = self.category.is_empty() || product.category == self.category;
        matches_search && matches_category
    }
}

/// Products matching `criteria`, in the requested order. The sort is stable
/// so products with equal keys keep their collection order.
pub fn derive_view<'a>(products: &'a [Product], criteria: &ViewCriteria) -> Vec<&'a Product> {
    let mut view: Vec<&Product> = products.iter().filter(|p| criteria.matches(p)).collect();

    match criteria.sort_order {
        SortOrder::NameAsc => view.sort_by(|a, b| a.name.cmp(&b.name)),
        SortOrder::NameDesc => view.sort_by(|a, b| b.name.cmp(&a.name)),
        SortOrder::PriceAsc => view.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortOrder::PriceDesc => view.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }

    view
}
