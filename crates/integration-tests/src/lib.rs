//! Integration tests for Kruzhki.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kruzhki-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_properties` - Cart and order rules through the core store
//! - `storefront_session` - Whole sessions replayed through the terminal shell
//!
//! Helpers shared by the test files live here.

use kruzhki_core::Catalog;
use kruzhki_storefront::{Shell, StorefrontConfig};

/// A shell over the built-in catalog with default configuration.
#[must_use]
pub fn builtin_shell() -> Shell {
    Shell::new(&StorefrontConfig::default(), Catalog::builtin())
}

/// Replay `script` (one command per line) and return everything printed.
///
/// # Panics
///
/// Panics if the shell fails or prints invalid UTF-8.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn replay(shell: &mut Shell, script: &str) -> String {
    let mut out = Vec::new();
    shell.run(script.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}
