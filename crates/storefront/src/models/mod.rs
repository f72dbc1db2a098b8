//! Domain models for the storefront.

pub mod cart;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{Cart, CartItem};
pub use product::{NewProduct, Product};
pub use session::{CurrentUser, session_keys};
pub use user::User;
