//! Authentication route handlers.
//!
//! Login, registration, and logout. Failures a visitor can fix (wrong
//! password, taken email) become flash messages; anything else bubbles up
//! as an [`AppError`].

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::{clear_current_user, push_flash, set_current_user, take_flashes};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub senha: String,
}

/// Registration form data.
///
/// `is_admin` is a checkbox (present when checked); `admin_senha` is the
/// admin enrollment passphrase.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub is_admin: Option<String>,
    pub admin_senha: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub flashes: Vec<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub flashes: Vec<String>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(session: Session) -> LoginTemplate {
    LoginTemplate {
        flashes: take_flashes(&session).await,
    }
}

/// Handle login form submission.
///
/// On success the session gains the user id and the cached admin flag; an
/// existing cart is left as-is. Unknown email and wrong password produce
/// the same flash message.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let service = AuthService::new(state.pool(), &state.config().admin_secret);

    match service.login(&form.email, &form.senha).await {
        Ok(user) => {
            set_current_user(
                &session,
                &CurrentUser {
                    id: user.id,
                    is_admin: user.is_admin,
                },
            )
            .await?;
            tracing::info!(user_id = %user.id, "login");

            Ok(Redirect::to("/"))
        }
        // Storage failures are still server errors, not bad credentials
        Err(AuthError::Repository(e)) => Err(AppError::Database(e)),
        Err(e) => {
            tracing::debug!(error = %e, "login rejected");
            push_flash(&session, "Login ou senha incorretos").await;

            Ok(Redirect::to("/login"))
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(session: Session) -> RegisterTemplate {
    RegisterTemplate {
        flashes: take_flashes(&session).await,
    }
}

/// Handle registration form submission.
///
/// Does not log the new account in; the visitor lands on the login page.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect> {
    let service = AuthService::new(state.pool(), &state.config().admin_secret);
    let requested_admin = form.is_admin.is_some();

    match service
        .register(
            &form.nome,
            &form.email,
            &form.senha,
            requested_admin,
            form.admin_senha.as_deref(),
        )
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "account created");

            Ok(Redirect::to("/login"))
        }
        Err(AuthError::DuplicateEmail) => {
            push_flash(&session, "Usuário já cadastrado com esse email").await;

            Ok(Redirect::to("/register"))
        }
        Err(AuthError::InvalidEmail(_)) => {
            push_flash(&session, "Email inválido.").await;

            Ok(Redirect::to("/register"))
        }
        Err(AuthError::WeakPassword(_)) => {
            push_flash(&session, "A senha deve ter pelo menos 8 caracteres.").await;

            Ok(Redirect::to("/register"))
        }
        Err(e) => Err(AppError::Auth(e)),
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Removes only the auth keys from the session; the cart stays, so a
/// visitor who logs back in finds it unchanged.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;

    Ok(Redirect::to("/login"))
}
