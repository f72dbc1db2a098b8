//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. `TraceLayer` (request tracing)
//! 2. Session layer (tower-sessions with `PostgreSQL` store)

pub mod auth;
pub mod flash;
pub mod session;

pub use auth::{
    AccessDenied, RequireAdmin, RequireAuth, authorize, clear_current_user, set_current_user,
};
pub use flash::{push_flash, take_flashes};
pub use session::create_session_layer;
