//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use mercadinho_core::UserId;

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user. The
/// admin flag is cached from the user row at login time; changing the row
/// later does not affect sessions that are already open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// Cached admin flag.
    pub is_admin: bool,
}

/// Session keys.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the cart snapshot list.
    pub const CART: &str = "cart";

    /// Key for one-shot flash messages.
    pub const FLASH: &str = "flash";
}
