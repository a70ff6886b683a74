//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::borrow::Borrow;
use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Renders a flag state as "On" or "Off".
///
/// Usage in templates: `{{ flag.enabled|on_off }}`
#[askama::filter_fn]
pub fn on_off(
    value: impl Borrow<bool>,
    _env: &dyn askama::Values,
) -> askama::Result<&'static str> {
    Ok(if *value.borrow() { "On" } else { "Off" })
}
