//! Goods on sale and their categories.

use serde::{Deserialize, Serialize};

/// Category of tradeable goods.
///
/// Buyer demand is registered per category: a buyer that wants "books" bids
/// in any auction announcing a good of the `books` category, with the
/// concrete valuation computed from the good's attributes.
#[derive(
    Clone,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct ItemCategory(pub String);

impl From<&str> for ItemCategory {
    fn from(category: &str) -> Self {
        Self(category.to_string())
    }
}

/// A good put up for auction.
///
/// The attributes are opaque to the engine; they exist so that host-supplied
/// valuation functions can price the concrete item rather than its category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Good {
    pub category: ItemCategory,
    #[serde(default)]
    pub attributes: serde_json::Value,
}

impl Good {
    pub fn new(category: impl Into<ItemCategory>) -> Self {
        Self {
            category: category.into(),
            attributes: serde_json::Value::Null,
        }
    }

    pub fn with_attributes(mut self, attributes: serde_json::Value) -> Self {
        self.attributes = attributes;
        self
    }
}
