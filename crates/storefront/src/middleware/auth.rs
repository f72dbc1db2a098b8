//! Authentication middleware and extractors.
//!
//! The access decision itself is the pure [`authorize`] function; the
//! extractors wrap it for route handlers. Catalog reads use [`RequireAuth`],
//! catalog mutation uses [`RequireAdmin`]. Cart and checkout routes take no
//! extractor at all: anonymous visitors keep a cart too.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::middleware::flash::push_flash;
use crate::models::{CurrentUser, session_keys};

/// Flash shown when a non-admin hits an admin-only route.
const ACCESS_DENIED_FLASH: &str =
    "Acesso negado. Somente administradores podem gerenciar produtos.";

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    /// The session carries no logged-in user.
    NotAuthenticated,
    /// A user is logged in but lacks the admin role.
    InsufficientPrivilege,
}

impl AccessDenied {
    /// Stable reason string, e.g. for log fields.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::NotAuthenticated => "not authenticated",
            Self::InsufficientPrivilege => "insufficient privilege",
        }
    }
}

/// Evaluate session state against a route's requirement.
///
/// Pure read of the session-held identity; no side effects.
///
/// # Errors
///
/// Returns [`AccessDenied::NotAuthenticated`] when no user is present, and
/// [`AccessDenied::InsufficientPrivilege`] when admin is required but the
/// user lacks the role.
pub fn authorize(
    user: Option<CurrentUser>,
    requires_admin: bool,
) -> Result<CurrentUser, AccessDenied> {
    let user = user.ok_or(AccessDenied::NotAuthenticated)?;

    if requires_admin && !user.is_admin {
        return Err(AccessDenied::InsufficientPrivilege);
    }

    Ok(user)
}

/// Read the current user from the session in the request extensions.
async fn current_user(parts: &Parts) -> Option<CurrentUser> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

// =============================================================================
// RequireAuth
// =============================================================================

/// Extractor that requires a logged-in user.
///
/// Anonymous visitors are redirected to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("user #{}", user.id)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Rejection for [`RequireAuth`]: send the visitor to the login form.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts).await;

        authorize(user, false).map(Self).map_err(|_| AuthRejection)
    }
}

// =============================================================================
// RequireAdmin
// =============================================================================

/// Extractor that requires an admin user.
///
/// On denial (anonymous or non-admin alike) the access-denied flash is
/// pushed and the visitor is redirected to the catalog.
pub struct RequireAdmin(pub CurrentUser);

/// Rejection for [`RequireAdmin`]: flash already pushed, back to the catalog.
pub struct AdminRejection;

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        Redirect::to("/").into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts).await;

        match authorize(user, true) {
            Ok(user) => Ok(Self(user)),
            Err(denied) => {
                tracing::debug!(reason = denied.reason(), "admin route denied");
                if let Some(session) = parts.extensions.get::<Session>() {
                    push_flash(session, ACCESS_DENIED_FLASH).await;
                }
                Err(AdminRejection)
            }
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Set the current user in the session (login).
///
/// Only the auth keys are touched; an existing cart survives login.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Clear the current user from the session (logout).
///
/// Only the auth keys are removed; the cart stays in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mercadinho_core::UserId;

    use super::*;

    fn user(is_admin: bool) -> CurrentUser {
        CurrentUser {
            id: UserId::new(1),
            is_admin,
        }
    }

    #[test]
    fn test_anonymous_is_denied() {
        let denied = authorize(None, false).unwrap_err();
        assert_eq!(denied, AccessDenied::NotAuthenticated);
        assert_eq!(denied.reason(), "not authenticated");
    }

    #[test]
    fn test_anonymous_is_denied_for_admin_routes_too() {
        let denied = authorize(None, true).unwrap_err();
        assert_eq!(denied, AccessDenied::NotAuthenticated);
    }

    #[test]
    fn test_regular_user_allowed_for_reads() {
        let allowed = authorize(Some(user(false)), false).expect("should be allowed");
        assert!(!allowed.is_admin);
    }

    #[test]
    fn test_regular_user_denied_for_admin_routes() {
        let denied = authorize(Some(user(false)), true).unwrap_err();
        assert_eq!(denied, AccessDenied::InsufficientPrivilege);
        assert_eq!(denied.reason(), "insufficient privilege");
    }

    #[test]
    fn test_admin_allowed_everywhere() {
        assert!(authorize(Some(user(true)), false).is_ok());
        assert!(authorize(Some(user(true)), true).is_ok());
    }
}
