//! Item identity.
//!
//! Items are identified either by an explicit, caller-supplied key or by an
//! anonymous token minted once per item value. Anonymous tokens give items
//! without an explicit key the same "this exact item" identity a reference
//! comparison would: clones share the token, independently built items never do.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ANONYMOUS: AtomicU64 = AtomicU64::new(1);

/// Identifier of a treemap item.
/// NEVER export the variants' raw construction - use the smart constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(IdKind);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum IdKind {
    Named(String),
    Anonymous(u64),
}

impl ItemId {
    /// Smart constructor: validates a non-empty explicit id.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidItemId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidItemId::Empty);
        }
        Ok(Self(IdKind::Named(raw)))
    }

    /// Mint a fresh identity that compares equal only to its own clones.
    pub fn anonymous() -> Self {
        Self(IdKind::Anonymous(
            NEXT_ANONYMOUS.fetch_add(1, Ordering::Relaxed),
        ))
    }

    /// Explicit key, if this id was supplied by the caller.
    pub fn as_str(&self) -> Option<&str> {
        match &self.0 {
            IdKind::Named(s) => Some(s),
            IdKind::Anonymous(_) => None,
        }
    }

    /// True for identities minted by [`ItemId::anonymous`].
    pub fn is_anonymous(&self) -> bool {
        matches!(self.0, IdKind::Anonymous(_))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            IdKind::Named(s) => f.write_str(s),
            IdKind::Anonymous(n) => write!(f, "#{n}"),
        }
    }
}

// ===== Error Types =====

/// Rejected explicit id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidItemId {
    /// The empty string is not an id.
    #[error("Item ID cannot be empty")]
    Empty,
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_accepts_non_empty_string() {
        let id = ItemId::new("btc");
        assert!(id.is_ok(), "Non-empty id should be accepted");
    }

    #[test]
    fn item_id_rejects_empty_string() {
        let id = ItemId::new("");
        assert!(
            matches!(id, Err(InvalidItemId::Empty)),
            "Empty string should return InvalidItemId::Empty"
        );
    }

    #[test]
    fn item_id_as_str_returns_original() {
        let id = ItemId::new("eth").unwrap();
        assert_eq!(id.as_str(), Some("eth"));
        assert_eq!(id.to_string(), "eth");
    }

    #[test]
    fn equal_named_ids_compare_equal() {
        assert_eq!(ItemId::new("a").unwrap(), ItemId::new("a").unwrap());
    }

    #[test]
    fn anonymous_ids_are_distinct() {
        let a = ItemId::anonymous();
        let b = ItemId::anonymous();
        assert_ne!(a, b);
        assert!(a.is_anonymous());
        assert_eq!(a.as_str(), None);
    }

    #[test]
    fn anonymous_id_equals_its_clone() {
        let a = ItemId::anonymous();
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn anonymous_id_display_has_hash_prefix() {
        let a = ItemId::anonymous();
        assert!(a.to_string().starts_with('#'));
    }
}
