//! Domain records for peer-to-peer auctions.
//!
//! This crate defines the data that crosses the boundary between the auction
//! engine and its hosting environment: goods and participant identities,
//! bids with their strict total order, auction specifications, announcements,
//! participant responses and auction results. No transport or scheduling
//! lives here; every record is a plain value the host serializes however it
//! likes.

pub mod announcement;
pub mod bid;
pub mod good;
pub mod identity;
pub mod outcome;
pub mod spec;

pub use {
    announcement::{AuctionAnnouncement, AuctionId, ParticipantResponse},
    bid::{Bid, PriceQuantity},
    good::{Good, ItemCategory},
    identity::ParticipantId,
    outcome::{AuctionEnded, AuctionResult, Award, PersonalOutcome, ResultKind},
    spec::{AuctionKind, AuctionSpec, SpecError},
};
