//! Auctioneer-side auction engine.
//!
//! One [`auction::Auction`] instance runs per organized auction. The three
//! mechanisms (Vickrey, English, Dutch) share a response-handling skeleton
//! and the winner-determination routine in [`allocation`], and differ only
//! in how they validate, store and price bids between rounds. The
//! [`registry::Registry`] maps live auction ids to instances and is the only
//! structure shared across auctions.
//!
//! Every operation is a synchronous, deterministic computation over input
//! the host has already delivered: no timeouts, no retries, no I/O. The host
//! must serialize response handling per auction id; distinct ids are
//! independent.

pub mod allocation;
pub mod auction;
mod dutch;
mod english;
pub mod registry;
mod vickrey;

pub use {
    allocation::{Allocation, Pricing, allocate},
    auction::{Auction, Progress},
    registry::{Error, Registry},
};
