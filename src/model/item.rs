//! Weighted treemap items.

use super::error::InvalidInput;
use super::identifiers::ItemId;

/// Opaque colour token carried through the core untouched.
///
/// Only the rendering layer interprets it (see `view::colors`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColorHint(String);

impl ColorHint {
    /// Wrap a colour name or `#rrggbb` string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A labelled, weighted entry in the treemap.
///
/// Identity is carried by [`ItemId`]; two items are "the same item" when their
/// ids are equal, regardless of label or weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    label: String,
    weight: f64,
    color: Option<ColorHint>,
}

impl Item {
    /// Create an item with an anonymous identity.
    pub fn new(label: impl Into<String>, weight: f64) -> Self {
        Self::with_id(ItemId::anonymous(), label, weight)
    }

    /// Create an item with an explicit identity.
    pub fn with_id(id: ItemId, label: impl Into<String>, weight: f64) -> Self {
        Self {
            id,
            label: label.into(),
            weight,
            color: None,
        }
    }

    /// Attach a colour hint.
    #[must_use]
    pub fn with_color(mut self, color: ColorHint) -> Self {
        self.color = Some(color);
        self
    }

    /// Identity used for lookup, selection and reconciliation.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Display text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Relative size. Not validated until [`Item::validate`].
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Colour hint, if one was attached.
    pub fn color(&self) -> Option<&ColorHint> {
        self.color.as_ref()
    }

    /// Check that the weight is finite and non-negative.
    ///
    /// Zero is legal and produces a zero-area placement.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if !self.weight.is_finite() {
            return Err(InvalidInput::NonFiniteWeight {
                id: self.id.clone(),
                weight: self.weight,
            });
        }
        if self.weight < 0.0 {
            return Err(InvalidInput::NegativeWeight {
                id: self.id.clone(),
                weight: self.weight,
            });
        }
        Ok(())
    }

    /// True when `other` has the same identity.
    pub fn same_item(&self, other: &Item) -> bool {
        self.id == other.id
    }
}
