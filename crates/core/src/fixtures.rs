//! Fixtures
//!
//! YAML variant catalogs for demos and tests. A catalog pins one currency
//! for every variant in the set, mirroring what a storefront backend would
//! serve for a single region.

use std::{fs, path::PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};
use rusty_money::{Money, iso};
use serde::Deserialize;
use thiserror::Error;

use crate::variants::{Barcode, Variant, VariantId};

/// Fixture parsing errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading catalog files.
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A variant price was negative.
    #[error("Variant {0} has a negative price")]
    NegativePrice(String),

    /// Two variants shared a barcode.
    #[error("Duplicate barcode: {0}")]
    DuplicateBarcode(String),

    /// Two variants shared an id.
    #[error("Duplicate variant id: {0}")]
    DuplicateVariantId(String),

    /// No variant carries the given barcode.
    #[error("Variant not found for barcode: {0}")]
    VariantNotFound(String),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    currency: String,
    variants: Vec<VariantRecord>,
}

#[derive(Debug, Deserialize)]
struct VariantRecord {
    id: String,
    barcode: String,
    name: String,
    price_minor: i64,
    stock: u32,
}

/// A fixture catalog of variants in a single currency.
#[derive(Debug)]
pub struct Catalog {
    currency: &'static iso::Currency,
    variants: Vec<Variant<'static>>,
    barcode_index: FxHashMap<Barcode, usize>,
}

impl Catalog {
    /// Load a catalog set from the default `./fixtures` directory.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read or parsed, or
    /// if the catalog data is inconsistent.
    pub fn from_set(name: &str) -> Result<Self, CatalogError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load a catalog set from a custom base directory.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read or parsed, or
    /// if the catalog data is inconsistent.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, CatalogError> {
        let file_path = base_path.into().join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        Self::from_yaml_str(&contents)
    }

    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the YAML does not parse, the currency
    /// code is unknown, a price is negative, or an id or barcode repeats.
    pub fn from_yaml_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_norway::from_str(contents)?;

        let currency = iso::find(&file.currency)
            .ok_or_else(|| CatalogError::UnknownCurrency(file.currency.clone()))?;

        let mut variants = Vec::with_capacity(file.variants.len());
        let mut barcode_index = FxHashMap::default();
        let mut seen_ids = FxHashSet::default();

        for record in file.variants {
            let variant = Variant::new(
                VariantId::new(record.id.clone()),
                Barcode::new(record.barcode.clone()),
                record.name,
                Money::from_minor(record.price_minor, currency),
                record.stock,
            )
            .map_err(|_err| CatalogError::NegativePrice(record.id.clone()))?;

            if !seen_ids.insert(record.id.clone()) {
                return Err(CatalogError::DuplicateVariantId(record.id));
            }

            if barcode_index
                .insert(Barcode::new(record.barcode.clone()), variants.len())
                .is_some()
            {
                return Err(CatalogError::DuplicateBarcode(record.barcode));
            }

            variants.push(variant);
        }

        Ok(Self {
            currency,
            variants,
            barcode_index,
        })
    }

    /// Look up a variant by barcode.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::VariantNotFound`] if no variant carries
    /// the barcode.
    pub fn variant_by_barcode(&self, barcode: &Barcode) -> Result<&Variant<'static>, CatalogError> {
        self.barcode_index
            .get(barcode)
            .and_then(|&index| self.variants.get(index))
            .ok_or_else(|| CatalogError::VariantNotFound(barcode.to_string()))
    }

    /// All variants in the set.
    #[must_use]
    pub fn variants(&self) -> &[Variant<'static>] {
        &self.variants
    }

    /// The currency every variant is priced in.
    #[must_use]
    pub fn currency(&self) -> &'static iso::Currency {
        self.currency
    }

    /// Number of variants in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
