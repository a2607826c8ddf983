//! The product catalog.
//!
//! The catalog is read once at startup from a JSON document, either a local
//! file or an `http(s)` URL. Products are identified by their position in that
//! document. A failed load yields no catalog at all; a partially parsed
//! catalog is never exposed.

use std::fmt;
use std::path::PathBuf;

use dessert_cart_core::{Price, Product, ProductId, ProductImages};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;
use url::Url;

/// Errors raised while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog request returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog has too many products ({0})")]
    TooLarge(usize),
}

/// Where the catalog document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(Url),
}

impl CatalogSource {
    /// Interpret `value` as an `http(s)` URL, falling back to a file path.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match Url::parse(value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Url(url),
            _ => Self::File(PathBuf::from(value)),
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// One record of the catalog document.
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    image: ProductImages,
    name: String,
    category: String,
    price: Price,
}

/// Immutable, ordered list of products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Parse a catalog document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the document is not an array of
    /// product records.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(raw)?;
        let count = entries.len();

        let products = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let id = ProductId::from_index(index).ok_or(CatalogError::TooLarge(count))?;
                Ok(Product {
                    id,
                    name: entry.name,
                    category: entry.category,
                    price: entry.price,
                    images: entry.image,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Ok(Self { products })
    }

    /// Load the catalog from `source`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the source cannot be read, answers with a
    /// non-success status, or does not parse.
    #[instrument]
    pub async fn load(source: &CatalogSource) -> Result<Self, CatalogError> {
        let raw = match source {
            CatalogSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| CatalogError::Io {
                        path: path.clone(),
                        source,
                    })?
            }
            CatalogSource::Url(url) => fetch(url).await?,
        };

        let catalog = Self::from_json(&raw)?;
        tracing::info!(products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(id.index())
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

async fn fetch(url: &Url) -> Result<String, CatalogError> {
    let response = reqwest::get(url.clone()).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::Status(status));
    }
    Ok(response.text().await?)
}
