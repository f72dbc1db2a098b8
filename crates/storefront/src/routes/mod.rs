//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! # Catalog (session required; mutation admin-only)
//! GET  /                        - Product listing
//! GET  /produto/{id}            - Product detail
//! GET  /categoria/{name}        - Products in one category
//! GET  /adicionar               - New-product form        (admin)
//! POST /adicionar               - Create product          (admin)
//! GET  /editar/{id}             - Edit form               (admin)
//! POST /editar/{id}             - Update product          (admin)
//! GET  /remover/{id}            - Delete product          (admin)
//!
//! # Cart (no authentication; anonymous visitors keep a cart too)
//! GET  /carrinho                - Cart page with total
//! GET  /adicionar_carrinho/{id} - Add product snapshot to cart
//! GET  /remover_carrinho/{id}   - Remove all matching snapshots
//! GET  /checkout                - Cart total summary
//!
//! # Auth
//! GET  /login                   - Login page
//! POST /login                   - Login action
//! GET  /register                - Register page
//! POST /register                - Register action
//! GET  /logout                  - Clear auth keys (cart survives)
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/", get(catalog::index))
        .route("/produto/{id}", get(catalog::show))
        .route("/categoria/{name}", get(catalog::by_category))
        .route("/adicionar", get(catalog::new_form).post(catalog::create))
        .route("/editar/{id}", get(catalog::edit_form).post(catalog::update))
        .route("/remover/{id}", get(catalog::remove))
        // Cart
        .route("/carrinho", get(cart::show))
        .route("/adicionar_carrinho/{id}", get(cart::add))
        .route("/remover_carrinho/{id}", get(cart::remove))
        .route("/checkout", get(cart::checkout))
        // Auth
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
}
