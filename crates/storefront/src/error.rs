//! Unified error handling.
//!
//! Provides a unified `AppError` type for everything that can stop the
//! storefront: bad configuration, an unusable catalog file, a template that
//! fails to render or a broken terminal. Customer mistakes (a blank form
//! field, a mistyped command) are not errors at this level; they are shown
//! to the customer and the session carries on.

use std::path::PathBuf;

use kruzhki_core::CatalogError;
use thiserror::Error;

use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The catalog is invalid.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The catalog file could not be read.
    #[error("Cannot read catalog {path}: {source}")]
    CatalogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A page template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Reading commands or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_message() {
        let err = AppError::from(CatalogError::Empty);
        assert_eq!(
            err.to_string(),
            "Catalog error: catalog must contain at least one product"
        );
    }

    #[test]
    fn test_catalog_file_message() {
        let err = AppError::CatalogFile {
            path: PathBuf::from("mugs.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "Cannot read catalog mugs.json: not found");
    }
}
