//! One-shot flash messages stored in the session.
//!
//! A flash message survives exactly until the next page that renders it:
//! pushing appends to a list under the `flash` session key, and taking
//! removes the whole list.

use tower_sessions::Session;

use crate::models::session_keys;

/// Append a flash message to the session.
///
/// Best effort: a session store failure is logged and the message dropped
/// rather than failing the surrounding request.
pub async fn push_flash(session: &Session, message: impl Into<String>) {
    let message = message.into();

    let mut messages: Vec<String> = session
        .get(session_keys::FLASH)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    messages.push(message);

    if let Err(e) = session.insert(session_keys::FLASH, &messages).await {
        tracing::warn!("Failed to store flash message: {e}");
    }
}

/// Take (and clear) all pending flash messages.
pub async fn take_flashes(session: &Session) -> Vec<String> {
    session
        .remove::<Vec<String>>(session_keys::FLASH)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}
