//! Product types

use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Serialize;
use std::fmt;

/// A product record, keyed by its caller-supplied `id`
///
/// Decoding is lenient: keys match case-insensitively, the last occurrence of
/// a key wins, `null` (as a field or as the whole document) leaves the zero
/// value, missing fields stay zero and unknown fields are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub quantity: i64,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, quantity: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
        }
    }

    /// Records present at startup
    pub fn seed() -> Vec<Product> {
        vec![
            Product::new("001", "Samsung Galaxy S1", 10),
            Product::new("002", "Samsung Galaxy S2", 15),
        ]
    }

    /// Copy the replaceable fields from `patch`. The id is immutable.
    pub fn apply_update(&mut self, patch: &Product) {
        self.name = patch.name.clone();
        self.quantity = patch.quantity;
    }

    /// Decode the first JSON value in `bytes`, ignoring anything after it.
    pub fn from_json_prefix(bytes: &[u8]) -> serde_json::Result<Product> {
        let mut stream = serde_json::Deserializer::from_slice(bytes).into_iter::<Product>();
        match stream.next() {
            Some(result) => result,
            // Empty or whitespace-only input: let the regular decoder report EOF
            None => serde_json::from_slice(bytes),
        }
    }
}

enum Field {
    Id,
    Name,
    Quantity,
    Other,
}

impl Field {
    fn from_key(key: &str) -> Self {
        if key.eq_ignore_ascii_case("id") {
            Field::Id
        } else if key.eq_ignore_ascii_case("name") {
            Field::Name
        } else if key.eq_ignore_ascii_case("quantity") {
            Field::Quantity
        } else {
            Field::Other
        }
    }
}

struct ProductVisitor;

impl<'de> Visitor<'de> for ProductVisitor {
    type Value = Product;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a product object or null")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Product, E> {
        Ok(Product::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Product, E> {
        Ok(Product::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Product, A::Error> {
        let mut product = Product::default();
        while let Some(key) = map.next_key::<String>()? {
            match Field::from_key(&key) {
                Field::Id => {
                    if let Some(id) = map.next_value::<Option<String>>()? {
                        product.id = id;
                    }
                }
                Field::Name => {
                    if let Some(name) = map.next_value::<Option<String>>()? {
                        product.name = name;
                    }
                }
                Field::Quantity => {
                    if let Some(quantity) = map.next_value::<Option<i64>>()? {
                        product.quantity = quantity;
                    }
                }
                Field::Other => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(product)
    }
}

impl<'de> Deserialize<'de> for Product {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ProductVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let product = Product::new("001", "Samsung Galaxy S1", 10);
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "001", "name": "Samsung Galaxy S1", "quantity": 10})
        );
    }

    #[test]
    fn test_apply_update_keeps_id() {
        let mut stored = Product::new("001", "Samsung Galaxy S1", 10);
        stored.apply_update(&Product::new("999", "Pixel", 3));

        assert_eq!(stored, Product::new("001", "Pixel", 3));
    }

    #[test]
    fn test_decode_missing_and_unknown_fields() {
        let product = Product::from_json_prefix(br#"{"name":"Pixel","color":"black"}"#).unwrap();
        assert_eq!(product, Product::new("", "Pixel", 0));
    }

    #[test]
    fn test_decode_keys_case_insensitive() {
        let product =
            Product::from_json_prefix(br#"{"ID":"005","Name":"Pixel","Quantity":3}"#).unwrap();
        assert_eq!(product, Product::new("005", "Pixel", 3));
    }

    #[test]
    fn test_decode_last_key_wins() {
        let product = Product::from_json_prefix(
            br#"{"id":"006","id":"007","name":"A","Name":"B","quantity":1}"#,
        )
        .unwrap();
        assert_eq!(product, Product::new("007", "B", 1));
    }

    #[test]
    fn test_decode_null_leaves_zero_value() {
        assert_eq!(Product::from_json_prefix(b"null").unwrap(), Product::default());

        let product =
            Product::from_json_prefix(br#"{"id":"008","name":null,"quantity":null}"#).unwrap();
        assert_eq!(product, Product::new("008", "", 0));

        // A later null does not clear an earlier value
        let product = Product::from_json_prefix(br#"{"id":"009","ID":null}"#).unwrap();
        assert_eq!(product.id, "009");
    }

    #[test]
    fn test_decode_ignores_trailing_data() {
        let product =
            Product::from_json_prefix(b" {\"id\":\"7\",\"name\":\"A\",\"quantity\":2} trailing")
                .unwrap();
        assert_eq!(product, Product::new("7", "A", 2));
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        assert!(Product::from_json_prefix(b"").is_err());
        assert!(Product::from_json_prefix(b"   ").is_err());
        assert!(Product::from_json_prefix(b"{\"id\":").is_err());
        assert!(Product::from_json_prefix(br#"{"quantity":"ten"}"#).is_err());
        assert!(Product::from_json_prefix(br#"{"quantity":1.5}"#).is_err());
        assert!(Product::from_json_prefix(br#"{"id":5}"#).is_err());
        assert!(Product::from_json_prefix(br#"["001","x",1]"#).is_err());
        assert!(Product::from_json_prefix(b"\"001\"").is_err());
    }

    #[test]
    fn test_seed() {
        let seed = Product::seed();
        assert_eq!(seed.len(), 2);
        assert_eq!(seed[0].quantity, 10);
        assert_eq!(seed[1].quantity, 15);
    }
}
