//! Product domain types.

use chrono::{DateTime, Utc};

use mercadinho_core::{Money, ProductId};

/// A catalog product.
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price. Stored numerically; BRL formatting happens at the
    /// template boundary.
    pub price: Money,
    /// Free-form description.
    pub description: String,
    /// Image URL.
    pub image: String,
    /// Category name used by the category filter.
    pub category: String,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The mutable fields of a product.
///
/// Used for both creation and edits; an edit replaces every field
/// unconditionally (last writer wins).
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    pub description: String,
    pub image: String,
    pub category: String,
}
