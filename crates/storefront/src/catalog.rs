//! Catalog loading.

use std::path::Path;

use kruzhki_core::Catalog;
use tracing::info;

use crate::error::{AppError, Result};

/// Load the catalog from `path`, or use the built-in mugs when `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold a valid
/// catalog.
pub fn load(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        let catalog = Catalog::builtin();
        info!(products = catalog.len(), "Using built-in catalog");
        return Ok(catalog);
    };

    let json = std::fs::read_to_string(path).map_err(|source| AppError::CatalogFile {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = Catalog::from_json(&json)?;
    info!(path = %path.display(), products = catalog.len(), "Loaded catalog");
    Ok(catalog)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use kruzhki_core::ProductId;

    use super::*;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "kruzhki-{}-{name}",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_builtin_when_unset() {
        assert_eq!(load(None).unwrap(), Catalog::builtin());
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_file(
            "catalog.json",
            r#"[{"id": 7, "name": "Espresso cup", "price": 450, "image": "cup.jpg", "category": "design"}]"#,
        );
        let catalog = load(Some(&path)).unwrap();
        assert!(catalog.find(ProductId::new(7)).is_some());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("kruzhki-does-not-exist.json");
        assert!(matches!(
            load(Some(&path)),
            Err(AppError::CatalogFile { .. })
        ));
    }

    #[test]
    fn test_invalid_catalog_file() {
        let path = temp_file("empty.json", "[]");
        assert!(matches!(load(Some(&path)), Err(AppError::Catalog(_))));
        std::fs::remove_file(path).ok();
    }
}
