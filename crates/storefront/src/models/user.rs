//! User domain types.
//!
//! These types represent validated domain objects separate from database row
//! types. The password hash never leaves the repository layer.

use chrono::{DateTime, Utc};

use mercadinho_core::{Email, UserId};

/// A registered account.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email; unique, compared exactly as stored.
    pub email: Email,
    /// Whether this account may mutate the catalog.
    pub is_admin: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
