//! The session-held shopping cart.
//!
//! The cart lives entirely inside the visitor's session record. Each entry
//! is a snapshot of the product at add-time: editing or deleting the product
//! afterwards leaves existing cart entries untouched, so a visitor keeps the
//! price they saw when they added the item.

use serde::{Deserialize, Serialize};

use mercadinho_core::{Money, ProductId};

use super::product::Product;

/// A snapshot of a product taken when it was added to the cart.
///
/// Deliberately a copy, not a reference: the catalog row may change or
/// disappear while the item sits in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub description: String,
    pub image: String,
}

impl From<&Product> for CartItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            description: product.description.clone(),
            image: product.image.clone(),
        }
    }
}

/// An ordered sequence of cart snapshots.
///
/// Quantity is represented by repetition: adding the same product twice
/// appends two entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Append a snapshot to the cart.
    pub fn add(&mut self, item: CartItem) {
        self.items.push(item);
    }

    /// Remove **all** entries whose snapshot matches the given product id.
    pub fn remove(&mut self, product_id: ProductId) {
        self.items.retain(|item| item.id != product_id);
    }

    /// Sum of the snapshot prices of every entry.
    #[must_use]
    pub fn total(&self) -> Money {
        self.items.iter().map(|item| item.price).sum()
    }

    /// The entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of entries (counting duplicates).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Produto {id}"),
            price: Money::new(Decimal::new(cents, 2)).unwrap(),
            description: "descrição".to_string(),
            image: "https://img.example/p.png".to_string(),
            category: "geral".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::default();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_duplicate_adds_accumulate() {
        // Items priced 10.00 and 25.50, each added twice.
        let a = product(1, 1000);
        let b = product(2, 2550);

        let mut cart = Cart::default();
        cart.add(CartItem::from(&a));
        cart.add(CartItem::from(&b));
        cart.add(CartItem::from(&a));
        cart.add(CartItem::from(&b));

        assert_eq!(cart.len(), 4);
        assert_eq!(cart.total().format_brl(), "R$ 71,00");
    }

    #[test]
    fn test_remove_drops_all_matching_entries() {
        let a = product(1, 1000);
        let b = product(2, 2550);

        let mut cart = Cart::default();
        cart.add(CartItem::from(&a));
        cart.add(CartItem::from(&a));
        cart.add(CartItem::from(&b));

        cart.remove(a.id);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].id, b.id);
        assert_eq!(cart.total(), b.price);
    }

    #[test]
    fn test_remove_absent_product_is_a_noop() {
        let mut cart = Cart::default();
        cart.add(CartItem::from(&product(1, 500)));

        cart.remove(ProductId::new(99));

        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_snapshot_survives_product_edit() {
        let mut p = product(1, 1000);

        let mut cart = Cart::default();
        cart.add(CartItem::from(&p));

        // Catalog edit after the item was added.
        p.price = Money::new(Decimal::new(9999, 2)).unwrap();
        p.name = "Renomeado".to_string();

        let item = &cart.items()[0];
        assert_eq!(item.price.format_brl(), "R$ 10,00");
        assert_eq!(item.name, "Produto 1");
        assert_eq!(cart.total().format_brl(), "R$ 10,00");
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut cart = Cart::default();
        cart.add(CartItem::from(&product(3, 1299)));

        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();

        assert_eq!(back.len(), 1);
        assert_eq!(back.total(), cart.total());
    }
}
