//! Cart route handlers.
//!
//! The cart is a list of product snapshots inside the visitor's session.
//! None of these routes require authentication: anonymous visitors carry a
//! cart in their session like everyone else.
//!
//! Mutations are read-modify-write against the session record. Two
//! concurrent requests from the same session (e.g. two tabs) can lose an
//! update; this is an accepted limitation.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tower_sessions::Session;
use tracing::instrument;

use mercadinho_core::{Money, ProductId};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{push_flash, take_flashes};
use crate::models::{Cart, CartItem, session_keys};
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart from the session, if one exists yet.
async fn load_cart(session: &Session) -> Result<Option<Cart>> {
    Ok(session.get::<Cart>(session_keys::CART).await?)
}

/// Write the whole cart back to the session.
async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartTemplate {
    pub itens: Vec<CartItem>,
    pub total: Money,
    pub flashes: Vec<String>,
}

/// Checkout summary template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/checkout.html")]
pub struct CheckoutTemplate {
    pub total: Money,
    pub flashes: Vec<String>,
}

// =============================================================================
// Routes
// =============================================================================

/// Display the cart with its total.
///
/// A first visit lazily initializes (and persists) an empty cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartTemplate> {
    let cart = match load_cart(&session).await? {
        Some(cart) => cart,
        None => {
            let cart = Cart::default();
            save_cart(&session, &cart).await?;
            cart
        }
    };
    let flashes = take_flashes(&session).await;

    Ok(CartTemplate {
        total: cart.total(),
        itens: cart.items().to_vec(),
        flashes,
    })
}

/// Add a product snapshot to the cart.
///
/// Repeated adds of the same product append duplicate entries; quantity is
/// repetition, not a count field. 404 when the product id is unknown.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Redirect> {
    let id = ProductId::new(id);
    let produto = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("produto {id}")))?;

    let mut cart = load_cart(&session).await?.unwrap_or_default();
    cart.add(CartItem::from(&produto));
    save_cart(&session, &cart).await?;

    push_flash(&session, format!("{} adicionado ao carrinho.", produto.name)).await;

    Ok(Redirect::to("/"))
}

/// Remove all snapshots of a product from the cart.
///
/// A session without a cart is left untouched.
#[instrument(skip(session))]
pub async fn remove(session: Session, Path(id): Path<i32>) -> Result<Redirect> {
    if let Some(mut cart) = load_cart(&session).await? {
        cart.remove(ProductId::new(id));
        save_cart(&session, &cart).await?;
    }

    Ok(Redirect::to("/carrinho"))
}

/// Checkout stub: shows the cart total.
///
/// A session without a cart reads as an empty one; there is no payment
/// capture and no order record.
#[instrument(skip(session))]
pub async fn checkout(session: Session) -> Result<CheckoutTemplate> {
    let total = load_cart(&session)
        .await?
        .map_or_else(Money::zero, |cart| cart.total());
    let flashes = take_flashes(&session).await;

    Ok(CheckoutTemplate { total, flashes })
}
