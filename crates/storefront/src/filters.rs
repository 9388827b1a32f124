//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Formats a mug count, e.g. `3 шт.`
///
/// Usage in templates: `{{ line.quantity|pcs }}`
#[askama::filter_fn]
pub fn pcs(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("{value} шт."))
}

/// Wraps personalization text in quotes, e.g. `«Лучшей маме»`
///
/// Usage in templates: `{{ line.custom_text|quoted }}`
#[askama::filter_fn]
pub fn quoted(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("«{value}»"))
}
