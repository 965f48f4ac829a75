use serde::{Deserialize, Serialize};

/// Physical size of a product, in centimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: f64,
    pub width: f64,
    pub depth: f64,
}

/// A catalog product as stored and served by the products module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned identifier, unique within the collection
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub availability: bool,
    #[serde(default)]
    pub dimensions: Dimensions,
    /// Ordered list of material names
    #[serde(default)]
    pub materials: Vec<String>,
    /// Ordered list of color strings such as `#000000`
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub image_url: String,
    /// Category name
    pub category: String,
}

/// Request body for creating or replacing a product.
///
/// Every field defaults when absent so that handlers can report exactly
/// which required fields are missing instead of rejecting the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub availability: bool,
    pub dimensions: Dimensions,
    pub materials: Vec<String>,
    pub colors: Vec<String>,
    pub image_url: String,
    pub category: String,
}

impl ProductDraft {
    /// Required fields that are blank (or a zero price).
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.price == 0.0 {
            missing.push("price");
        }
        if self.category.trim().is_empty() {
            missing.push("category");
        }
        missing
    }

    pub fn into_product(self, id: impl Into<String>) -> Product {
        Product {
            id: id.into(),
            name: self.name,
            description: self.description,
            price: self.price,
            availability: self.availability,
            dimensions: self.dimensions,
            materials: self.materials,
            colors: self.colors,
            image_url: self.image_url,
            category: self.category,
        }
    }
}

impl From<Product> for ProductDraft {
    fn from(product: Product) -> Self {
        Self {
            name: product.name,
            description: product.description,
            price: product.price,
            availability: product.availability,
            dimensions: product.dimensions,
            materials: product.materials,
            colors: product.colors,
            image_url: product.image_url,
            category: product.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_uses_camel_case() {
        let product = ProductDraft {
            name: "Lamp".into(),
            image_url: "/lamp.svg".into(),
            ..Default::default()
        }
        .into_product("9");

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["imageUrl"], "/lamp.svg");
        assert_eq!(json["id"], "9");
        assert!(json.get("image_url").is_none());
    }

    #[test]
    fn empty_body_reports_every_required_field() {
        let draft: ProductDraft = serde_json::from_str("{}").unwrap();
        assert_eq!(
            draft.missing_fields(),
            vec!["name", "description", "price", "category"]
        );
    }

    #[test]
    fn negative_price_is_not_missing() {
        let draft = ProductDraft {
            name: "Refund voucher".into(),
            description: "Store credit".into(),
            price: -5.0,
            category: "Gift".into(),
            ..Default::default()
        };
        assert!(draft.missing_fields().is_empty());
    }
}
