//! In-memory product store using DashMap

use catalog_types::Product;
use dashmap::DashMap;
use tracing::debug;

/// Keyed product collection shared by all request handlers.
///
/// Each operation holds the lock of a single shard for its duration, so a
/// read-modify-write such as [`ProductStore::update`] is atomic with respect
/// to other writers of the same id.
pub struct ProductStore {
    data: DashMap<String, Product>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }

    /// Create a store holding the startup records
    pub fn seeded() -> Self {
        let store = Self::new();
        store.insert_seed();
        store
    }

    /// Insert (or restore) the startup records
    pub fn insert_seed(&self) {
        for product in Product::seed() {
            debug!("Seeding product {}", product.id);
            self.upsert(product);
        }
    }

    /// Snapshot of every product, ordered by id
    pub fn list(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self
            .data
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        products.sort_by(|a, b| a.id.cmp(&b.id));
        products
    }

    pub fn get(&self, id: &str) -> Option<Product> {
        self.data.get(id).map(|entry| entry.value().clone())
    }

    /// Insert or fully overwrite the product stored under `product.id`
    pub fn upsert(&self, product: Product) -> Option<Product> {
        self.data.insert(product.id.clone(), product)
    }

    /// Apply `patch` to the stored product, returning the updated record
    pub fn update(&self, id: &str, patch: &Product) -> Option<Product> {
        self.data.get_mut(id).map(|mut entry| {
            entry.apply_update(patch);
            entry.value().clone()
        })
    }

    pub fn remove(&self, id: &str) -> Option<Product> {
        self.data.remove(id).map(|(_, product)| product)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_seeded() {
        let store = ProductStore::seeded();

        let products = store.list();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0], Product::new("001", "Samsung Galaxy S1", 10));
        assert_eq!(products[1], Product::new("002", "Samsung Galaxy S2", 15));
    }

    #[test]
    fn test_basic_operations() {
        let store = ProductStore::new();
        assert!(store.is_empty());

        // Insert and get
        assert_eq!(store.upsert(Product::new("a", "Alpha", 1)), None);
        assert_eq!(store.get("a"), Some(Product::new("a", "Alpha", 1)));

        // Non-existent key
        assert_eq!(store.get("missing"), None);

        // Overwrite replaces the whole record
        let replaced = store.upsert(Product::new("a", "Beta", 2));
        assert_eq!(replaced, Some(Product::new("a", "Alpha", 1)));
        assert_eq!(store.get("a"), Some(Product::new("a", "Beta", 2)));
        assert_eq!(store.len(), 1);

        // Remove
        assert_eq!(store.remove("a"), Some(Product::new("a", "Beta", 2)));
        assert_eq!(store.remove("a"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_keeps_stored_id() {
        let store = ProductStore::seeded();

        let updated = store.update("001", &Product::new("other", "Galaxy Note", 4));
        assert_eq!(updated, Some(Product::new("001", "Galaxy Note", 4)));
        assert_eq!(store.get("other"), None);
        assert_eq!(store.len(), 2);

        assert_eq!(store.update("missing", &Product::default()), None);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_insert_seed_restores_records() {
        let store = ProductStore::seeded();
        store.remove("001");
        store.update("002", &Product::new("002", "Changed", 0));

        store.insert_seed();
        assert_eq!(store.list(), Product::seed());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates() {
        let store = Arc::new(ProductStore::seeded());

        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.upsert(Product::new(format!("p{}", i), "Item", i));
                for _ in 0..100 {
                    store.update("001", &Product::new("ignored", format!("v{}", i), i));
                    let seen = store.get("001").unwrap();
                    assert_eq!(seen.name, format!("v{}", seen.quantity));
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len(), 34);
        let last = store.get("001").unwrap();
        assert_eq!(last.id, "001");
        assert!((0..32).contains(&last.quantity));
        assert_eq!(last.name, format!("v{}", last.quantity));
        assert_eq!(store.get("ignored"), None);
    }
}
