//! Auction announcements and participant responses.

use {
    crate::{
        bid::Bid,
        good::Good,
        identity::ParticipantId,
        spec::AuctionKind,
    },
    rust_decimal::Decimal,
    serde::{Deserialize, Serialize},
};

/// Identifier of a running auction.
///
/// Fresh ids are drawn at organize time and never reused: once an auction is
/// removed from the registry its id is dead, and late responses for it fail.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{_0:016x}")]
pub struct AuctionId(pub u64);

/// Broadcast snapshot of an auction, sent to every participant when the
/// auction starts and again after each non-terminal round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuctionAnnouncement {
    pub auction: AuctionId,
    pub auctioneer: ParticipantId,
    pub kind: AuctionKind,
    pub good: Good,
    /// The current minimal price of a Vickrey or English auction, or the
    /// current clock price of a Dutch auction.
    pub price: Decimal,
    /// Units still on sale.
    pub quantity_available: u32,
    /// Price drop per round of a Dutch auction, zero otherwise.
    pub decrement: Decimal,
}

/// A participant's answer to an announcement: the bids it places this round.
/// An empty bid list is a valid answer and still counts towards the round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticipantResponse {
    pub auction: AuctionId,
    pub bidder: ParticipantId,
    pub bids: Vec<Bid>,
}

impl ParticipantResponse {
    pub fn new(auction: AuctionId, bidder: impl Into<ParticipantId>) -> Self {
        Self {
            auction,
            bidder: bidder.into(),
            bids: Vec::new(),
        }
    }

    /// Adds a bid on behalf of the responding participant.
    pub fn with_bid(mut self, price: Decimal, quantity: u32) -> Self {
        self.bids.push(Bid {
            price,
            quantity,
            bidder: Some(self.bidder.clone()),
        });
        self
    }
}
