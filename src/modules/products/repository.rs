//! In-memory product collection backing the products module.

use tokio::sync::RwLock;

use super::models::{Dimensions, Product, ProductDraft};

struct Inventory {
    products: Vec<Product>,
    next_id: u64,
}

/// Process-local product store; contents reset on restart.
pub struct ProductRepository {
    inner: RwLock<Inventory>,
}

impl ProductRepository {
    /// Build a repository over `products`. New ids continue after the
    /// largest numeric id present and are never reused.
    pub fn new(products: Vec<Product>) -> Self {
        let next_id = products
            .iter()
            .filter_map(|product| product.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            inner: RwLock::new(Inventory { products, next_id }),
        }
    }

    /// Repository preloaded with the demo catalog
    pub fn seeded() -> Self {
        Self::new(seed_products())
    }

    pub async fn list(&self) -> Vec<Product> {
        self.inner.read().await.products.clone()
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.products.len()
    }

    pub async fn get(&self, id: &str) -> Option<Product> {
        self.inner
            .read()
            .await
            .products
            .iter()
            .find(|product| product.id == id)
            .cloned()
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.inner
            .read()
            .await
            .products
            .iter()
            .any(|product| product.id == id)
    }

    /// Append a product under a freshly assigned id
    pub async fn create(&self, draft: ProductDraft) -> Product {
        let mut inventory = self.inner.write().await;
        let id = inventory.next_id.to_string();
        inventory.next_id += 1;

        let product = draft.into_product(id);
        inventory.products.push(product.clone());
        product
    }

    /// Replace the record stored under `id`, keeping its position
    pub async fn replace(&self, id: &str, draft: ProductDraft) -> Option<Product> {
        let mut inventory = self.inner.write().await;
        let slot = inventory
            .products
            .iter_mut()
            .find(|product| product.id == id)?;

        *slot = draft.into_product(id);
        Some(slot.clone())
    }

    /// Remove the record stored under `id`; returns whether it existed
    pub async fn delete(&self, id: &str) -> bool {
        let mut inventory = self.inner.write().await;
        match inventory.products.iter().position(|product| product.id == id) {
            Some(index) => {
                inventory.products.remove(index);
                true
            }
            None => false,
        }
    }
}

impl Default for ProductRepository {
    fn default() -> Self {
        Self::seeded()
    }
}

#[allow(clippy::too_many_arguments)]
fn seed_product(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    availability: bool,
    (height, width, depth): (f64, f64, f64),
    materials: &[&str],
    colors: &[&str],
    category: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        availability,
        dimensions: Dimensions {
            height,
            width,
            depth,
        },
        materials: materials.iter().map(|m| m.to_string()).collect(),
        colors: colors.iter().map(|c| c.to_string()).collect(),
        image_url: "/placeholder.svg?height=500&width=500".to_string(),
        category: category.to_string(),
    }
}

/// The demo catalog served on a fresh start
pub fn seed_products() -> Vec<Product> {
    vec![
        seed_product(
            "1",
            "Modern Desk Chair",
            "Ergonomic office chair with lumbar support and adjustable height.",
            199.99,
            true,
            (120.0, 65.0, 65.0),
            &["Leather", "Aluminum", "Foam"],
            &["#000000", "#FFFFFF", "#964B00"],
            "Furniture",
        ),
        seed_product(
            "2",
            "Minimalist Coffee Table",
            "Sleek coffee table with tempered glass top and wooden legs.",
            149.99,
            true,
            (45.0, 120.0, 60.0),
            &["Glass", "Wood", "Steel"],
            &["#964B00", "#000000"],
            "Furniture",
        ),
        seed_product(
            "3",
            "Wireless Headphones",
            "Premium noise-cancelling headphones with 30-hour battery life.",
            249.99,
            false,
            (20.0, 18.0, 8.0),
            &["Plastic", "Aluminum", "Foam"],
            &["#000000", "#FFFFFF", "#FF0000"],
            "Electronics",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp() -> ProductDraft {
        ProductDraft {
            name: "Desk Lamp".into(),
            description: "LED lamp".into(),
            price: 39.5,
            category: "Lighting".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_next_id_after_seed() {
        let repo = ProductRepository::seeded();
        let created = repo.create(lamp()).await;
        assert_eq!(created.id, "4");
        assert_eq!(repo.count().await, 4);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = ProductRepository::seeded();
        assert!(repo.delete("3").await);
        let created = repo.create(lamp()).await;
        assert_eq!(created.id, "4");

        let ids: Vec<String> = repo.list().await.into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["1", "2", "4"]);
    }

    #[tokio::test]
    async fn replace_keeps_id_and_position() {
        let repo = ProductRepository::seeded();
        let replaced = repo.replace("2", lamp()).await.unwrap();
        assert_eq!(replaced.id, "2");
        assert_eq!(replaced.name, "Desk Lamp");

        let products = repo.list().await;
        assert_eq!(products[1].name, "Desk Lamp");
        assert!(repo.replace("99", lamp()).await.is_none());
    }

    #[tokio::test]
    async fn delete_unknown_id_is_a_miss() {
        let repo = ProductRepository::seeded();
        assert!(!repo.delete("42").await);
        assert_eq!(repo.count().await, 3);
    }

    #[test]
    fn non_numeric_ids_do_not_affect_counter() {
        let mut products = seed_products();
        products[0].id = "legacy-sku".into();
        let repo = ProductRepository::new(products);
        let next = repo.inner.try_read().unwrap().next_id;
        assert_eq!(next, 4);
    }
}
