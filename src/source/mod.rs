//! Item sources.
//!
//! This module turns files into validated [`Item`] lists:
//! - TOML files with an `[[items]]` array of tables
//! - JSON files holding either a bare array or `{"items": [...]}`
//! - A built-in demo set when no file is given
//!
//! Every item is validated at the boundary, so a loaded list is always
//! accepted by the layout.

use crate::model::{ColorHint, InvalidInput, InvalidItemId, Item, ItemId};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors encountered when loading items.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The items file does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("Failed to read {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Extension is neither `.toml` nor `.json`.
    #[error("Unsupported items file format: {path} (expected .toml or .json)")]
    UnsupportedFormat {
        /// Offending path.
        path: PathBuf,
    },

    /// Contents did not match the items schema.
    #[error("Invalid {format} items: {reason}")]
    ParseError {
        /// Format being parsed.
        format: ItemFormat,
        /// Parse error details.
        reason: String,
    },

    /// An entry had an empty `id`.
    #[error("Item #{index}: {source}")]
    InvalidId {
        /// Zero-based position in the file.
        index: usize,
        /// Underlying id error.
        #[source]
        source: InvalidItemId,
    },

    /// Two entries share an `id`.
    #[error("Duplicate item id: {0}")]
    DuplicateId(String),

    /// An entry had a negative or non-finite weight.
    #[error(transparent)]
    InvalidItem(#[from] InvalidInput),
}

/// Supported item file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemFormat {
    /// `[[items]]` tables.
    Toml,
    /// A bare array of records or `{"items": [...]}`.
    Json,
}

impl ItemFormat {
    /// Pick the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl std::fmt::Display for ItemFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Toml => f.write_str("TOML"),
            Self::Json => f.write_str("JSON"),
        }
    }
}

/// One entry as written in an items file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct ItemRecord {
    #[serde(default)]
    id: Option<String>,
    label: String,
    weight: f64,
    #[serde(default)]
    color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ItemsDocument {
    #[serde(default)]
    items: Vec<ItemRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonItems {
    List(Vec<ItemRecord>),
    Document(ItemsDocument),
}

/// Load and validate items from a `.toml` or `.json` file.
///
/// # Errors
///
/// Returns `SourceError` if the file is missing, unreadable, of an unknown
/// format, malformed, or contains an invalid item.
pub fn load_items(path: impl AsRef<Path>) -> Result<Vec<Item>, SourceError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SourceError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let format = ItemFormat::from_path(path).ok_or_else(|| SourceError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let contents = std::fs::read_to_string(path).map_err(|e| SourceError::ReadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let items = parse_items(&contents, format)?;
    debug!(path = %path.display(), count = items.len(), "Loaded items");
    Ok(items)
}

/// Parse and validate items from in-memory contents.
///
/// Entries without an `id` get an anonymous identity.
pub fn parse_items(contents: &str, format: ItemFormat) -> Result<Vec<Item>, SourceError> {
    let parse_error = |reason: String| SourceError::ParseError { format, reason };

    let records = match format {
        ItemFormat::Toml => {
            toml::from_str::<ItemsDocument>(contents)
                .map_err(|e| parse_error(e.to_string()))?
                .items
        }
        ItemFormat::Json => match serde_json::from_str::<JsonItems>(contents)
            .map_err(|e| parse_error(e.to_string()))?
        {
            JsonItems::List(records) => records,
            JsonItems::Document(doc) => doc.items,
        },
    };

    let mut seen = HashSet::new();
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let id = match record.id {
                Some(raw) => {
                    if !seen.insert(raw.clone()) {
                        return Err(SourceError::DuplicateId(raw));
                    }
                    ItemId::new(raw).map_err(|source| SourceError::InvalidId { index, source })?
                }
                None => ItemId::anonymous(),
            };

            let mut item = Item::with_id(id, record.label, record.weight);
            if let Some(color) = record.color {
                item = item.with_color(ColorHint::new(color));
            }
            item.validate()?;
            Ok(item)
        })
        .collect()
}

/// The sample data set shown when no items file is given.
pub fn demo_items() -> Vec<Item> {
    [
        ("BTC", 40.555, "blue"),
        ("ETH", 18.3, "red"),
        ("BNB", 15.7, "yellow"),
        ("XRP", 8.2, "beige"),
        ("ADA", 5.1, "lightyellow"),
    ]
    .into_iter()
    .filter_map(|(label, weight, color)| {
        let id = ItemId::new(label).ok()?;
        Some(Item::with_id(id, label, weight).with_color(ColorHint::new(color)))
    })
    .collect()
}
