//! Catalog route handlers.
//!
//! Browsing requires a logged-in session; creating, editing, and removing
//! products require the admin role. Prices arrive from the forms as
//! BRL-formatted strings and are parsed into [`Money`] before they touch
//! the repository.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use mercadinho_core::{Money, ProductId};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{RequireAdmin, RequireAuth, push_flash, take_flashes};
use crate::models::{NewProduct, Product};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Product create/edit form data.
///
/// Field names match the form inputs; `preco` is a BRL-formatted string.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub nome: String,
    pub preco: String,
    pub descricao: String,
    pub imagem: String,
    pub categoria: String,
}

impl ProductForm {
    /// Parse the form into a draft, converting the price at the boundary.
    fn into_draft(self) -> std::result::Result<NewProduct, mercadinho_core::MoneyError> {
        let price = Money::parse_brl(&self.preco)?;

        Ok(NewProduct {
            name: self.nome,
            price,
            description: self.descricao,
            image: self.imagem,
            category: self.categoria,
        })
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Product listing page template (also used for category filtering).
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct IndexTemplate {
    pub products: Vec<Product>,
    pub flashes: Vec<String>,
    pub is_admin: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ShowTemplate {
    pub produto: Product,
    pub flashes: Vec<String>,
}

/// New-product form template.
#[derive(Template, WebTemplate)]
#[template(path = "products/new.html")]
pub struct NewTemplate {
    pub flashes: Vec<String>,
}

/// Edit-product form template.
///
/// `preco` is the current price pre-formatted for the form input.
#[derive(Template, WebTemplate)]
#[template(path = "products/edit.html")]
pub struct EditTemplate {
    pub produto: Product,
    pub preco: String,
    pub flashes: Vec<String>,
}

// =============================================================================
// Read Routes
// =============================================================================

/// List every product.
#[instrument(skip(user, state, session))]
pub async fn index(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<IndexTemplate> {
    let products = ProductRepository::new(state.pool()).list().await?;
    let flashes = take_flashes(&session).await;

    Ok(IndexTemplate {
        products,
        flashes,
        is_admin: user.is_admin,
    })
}

/// Product detail; 404 when the id is unknown.
#[instrument(skip(state, session))]
pub async fn show(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<ShowTemplate> {
    let id = ProductId::new(id);
    let produto = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("produto {id}")))?;
    let flashes = take_flashes(&session).await;

    Ok(ShowTemplate { produto, flashes })
}

/// List the products of one category.
#[instrument(skip(user, state, session))]
pub async fn by_category(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Path(name): Path<String>,
) -> Result<IndexTemplate> {
    let products = ProductRepository::new(state.pool())
        .list_by_category(&name)
        .await?;
    let flashes = take_flashes(&session).await;

    Ok(IndexTemplate {
        products,
        flashes,
        is_admin: user.is_admin,
    })
}

// =============================================================================
// Admin Routes
// =============================================================================

/// New-product form.
#[instrument(skip(_admin, session))]
pub async fn new_form(RequireAdmin(_admin): RequireAdmin, session: Session) -> NewTemplate {
    NewTemplate {
        flashes: take_flashes(&session).await,
    }
}

/// Create a product from the submitted form.
#[instrument(skip(_admin, state, session, form))]
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err(e) => {
            tracing::debug!(error = %e, "rejected product form");
            push_flash(&session, "Preço inválido.").await;
            return Ok(Redirect::to("/adicionar"));
        }
    };

    let produto = ProductRepository::new(state.pool()).create(&draft).await?;
    tracing::info!(product_id = %produto.id, "product created");

    Ok(Redirect::to("/"))
}

/// Edit form, price pre-formatted for display.
#[instrument(skip(_admin, state, session))]
pub async fn edit_form(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<EditTemplate> {
    let id = ProductId::new(id);
    let produto = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("produto {id}")))?;
    let flashes = take_flashes(&session).await;

    Ok(EditTemplate {
        preco: produto.price.format_brl(),
        produto,
        flashes,
    })
}

/// Replace every field of a product with the submitted form.
#[instrument(skip(_admin, state, session, form))]
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let id = ProductId::new(id);
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err(e) => {
            tracing::debug!(error = %e, "rejected product form");
            push_flash(&session, "Preço inválido.").await;
            return Ok(Redirect::to(&format!("/editar/{id}")));
        }
    };

    ProductRepository::new(state.pool()).update(id, &draft).await?;
    tracing::info!(product_id = %id, "product updated");

    Ok(Redirect::to("/"))
}

/// Delete a product; 404 when the id is unknown.
#[instrument(skip(_admin, state))]
pub async fn remove(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect> {
    let id = ProductId::new(id);
    let deleted = ProductRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("produto {id}")));
    }
    tracing::info!(product_id = %id, "product removed");

    Ok(Redirect::to("/"))
}
