//! Auction specifications and organize-time validation.

use {
    crate::{good::Good, identity::ParticipantId},
    rust_decimal::Decimal,
    serde::{Deserialize, Serialize},
    std::collections::HashSet,
    thiserror::Error,
};

/// The supported auction mechanisms. The set is closed: every variant has a
/// dedicated state machine selected once when the auction is organized.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AuctionKind {
    /// Sealed-bid, one round, generalized second-price payments.
    Vickrey,
    /// Ascending multi-round auction; ends when a round stays silent.
    English,
    /// Descending clock auction; ends when stock or the price floor runs out.
    Dutch,
}

/// Everything needed to organize an auction. Immutable once the auction has
/// started.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuctionSpec {
    pub kind: AuctionKind,
    /// The good on sale.
    pub good: Good,
    /// The participants, known in advance. Nobody joins a running auction.
    pub participants: Vec<ParticipantId>,
    /// Reserve price per unit. Also the floor of the Dutch price clock.
    pub minimal_price: Decimal,
    /// Starting price of the Dutch price clock. Unused by other kinds.
    pub maximal_price: Decimal,
    /// Price drop per Dutch round. Unused by other kinds.
    pub decrement: Decimal,
    /// Number of units on sale.
    pub quantity: u32,
}

impl AuctionSpec {
    /// Checks the spec before any participant is contacted. A malformed spec
    /// never becomes a running auction.
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.quantity == 0 {
            return Err(SpecError::ZeroQuantity);
        }
        if self.participants.is_empty() {
            return Err(SpecError::NoParticipants);
        }
        let mut seen = HashSet::new();
        for participant in &self.participants {
            if !seen.insert(participant) {
                return Err(SpecError::DuplicateParticipant(participant.clone()));
            }
        }
        if self.minimal_price < Decimal::ZERO {
            return Err(SpecError::NegativePrice);
        }
        if self.kind == AuctionKind::Dutch {
            if self.decrement <= Decimal::ZERO {
                return Err(SpecError::NonPositiveDecrement);
            }
            if self.maximal_price < self.minimal_price {
                return Err(SpecError::InvertedPriceClock);
            }
        }
        Ok(())
    }
}

/// Reasons a spec is rejected at organize time.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SpecError {
    #[error("quantity for sale must be positive")]
    ZeroQuantity,
    #[error("an auction needs at least one participant")]
    NoParticipants,
    #[error("participant {0} listed more than once")]
    DuplicateParticipant(ParticipantId),
    #[error("the minimal price must not be negative")]
    NegativePrice,
    #[error("a Dutch auction needs a positive decrement per round")]
    NonPositiveDecrement,
    #[error("a Dutch auction's maximal price must not undercut its minimal price")]
    InvertedPriceClock,
}
