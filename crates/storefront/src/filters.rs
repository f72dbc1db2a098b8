//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use mercadinho_core::Money;

/// Format a [`Money`] value as a Brazilian price string.
///
/// Usage in templates: `{{ produto.price|brl }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn brl(value: &Money, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(value.format_brl())
}
