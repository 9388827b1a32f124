//! Product catalog.
//!
//! The catalog is static reference data: it is built once at session start
//! (from the built-in mugs or a catalog file) and never mutated afterwards.

use core::fmt;
use core::str::FromStr;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Errors that can occur when building a [`Catalog`].
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    /// The catalog has no products.
    #[error("catalog must contain at least one product")]
    Empty,
    /// Two products share the same id.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    /// A product has an empty name.
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),
    /// A product price is negative or has a fractional part.
    #[error("product {id} has invalid price {price}")]
    InvalidPrice {
        /// Offending product.
        id: ProductId,
        /// The rejected price.
        price: Price,
    },
    /// The catalog JSON could not be parsed.
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Error returned when parsing an unknown [`Category`] name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// Mug design category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Design,
    Cute,
    Text,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 3] = [Self::Design, Self::Cute, Self::Text];

    /// Machine name, as used in catalog files and commands.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Design => "design",
            Self::Cute => "cute",
            Self::Text => "text",
        }
    }

    /// Tab label shown to customers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Design => "Дизайн",
            Self::Cute => "Милые",
            Self::Text => "Текст",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "design" => Ok(Self::Design),
            "cute" => Ok(Self::Cute),
            "text" => Ok(Self::Text),
            other => Err(UnknownCategory(other.to_owned())),
        }
    }
}

/// Which products a catalog tab shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CatalogFilter {
    #[default]
    All,
    Category(Category),
}

impl CatalogFilter {
    /// Catalog tabs in display order.
    pub const TABS: [Self; 4] = [
        Self::All,
        Self::Category(Category::Design),
        Self::Category(Category::Cute),
        Self::Category(Category::Text),
    ];

    /// Tab label shown to customers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "Все",
            Self::Category(category) => category.label(),
        }
    }

    /// Whether `product` is shown under this tab.
    #[must_use]
    pub fn matches(self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => product.category == category,
        }
    }
}

impl FromStr for CatalogFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Category)
        }
    }
}

/// A mug in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Image URI.
    pub image: String,
    pub category: Category,
}

/// The read-only list of products on sale.
///
/// ## Constraints
///
/// - At least one product
/// - Product ids are unique
/// - Names are not blank
/// - Prices are whole, non-negative amounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

const IMAGE_BASE: &str =
    "https://cdn.poehali.dev/projects/0a56f08d-9e72-4952-9258-be467a1bad92/files";

impl Catalog {
    /// Build a catalog, validating its constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, ids repeat, a name is blank or
    /// a price is not a whole non-negative amount.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        if products.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(product.id));
            }
            if !product.price.is_valid() {
                return Err(CatalogError::InvalidPrice {
                    id: product.id,
                    price: product.price,
                });
            }
        }

        Ok(Self { products })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the catalog is invalid.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// The three mugs the shop sells by default.
    #[must_use]
    pub fn builtin() -> Self {
        let mug = |id: i32, name: &str, file: &str, category| Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Price::from_units(890),
            image: format!("{IMAGE_BASE}/{file}.jpg"),
            category,
        };

        Self {
            products: vec![
                mug(
                    1,
                    "Креативная кружка",
                    "c996d5d4-3802-4dc8-9a99-52ef49bf8a5a",
                    Category::Design,
                ),
                mug(
                    2,
                    "Милая иллюстрация",
                    "59326f99-8768-4c82-84c8-4e7f5051ad38",
                    Category::Cute,
                ),
                mug(
                    3,
                    "Мотивация дня",
                    "0d0aa40a-f136-4010-97c9-b4e8af11e7f6",
                    Category::Text,
                ),
            ],
        }
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products shown under a catalog tab, in catalog order.
    pub fn filter(&self, filter: CatalogFilter) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| filter.matches(p))
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Always false for a validated catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
