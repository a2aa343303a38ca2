//! Buyer-side demand bookkeeping and bidding strategies.
//!
//! A buyer keeps a wish list of [`demand::Demand`]s per item category and
//! one bidding strategy per auction kind. Announcements are turned into
//! responses by running every matching demand through the strategy for the
//! announced mechanism; end-of-auction notifications reconcile the wish
//! list against what was actually won.

pub mod buyer;
pub mod demand;
pub mod strategy;

pub use {
    buyer::Buyer,
    demand::{Demand, DemandBook, Valuation},
    strategy::{DutchQuote, DutchStrategy, EnglishStrategy, VickreyStrategy},
};
