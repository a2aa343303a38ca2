//! Vickrey (sealed second-price) auctions.

use {
    crate::{
        allocation::{self, Pricing},
        auction::{Finish, RoundOutcome},
    },
    model::{AuctionSpec, Bid, ParticipantResponse},
    rust_decimal::Decimal,
};

/// A Vickrey auction runs a single sealed round: every bid at or above the
/// reserve is collected, then the generalized second-price allocation runs.
pub(crate) struct Vickrey {
    bids: Vec<Bid>,
}

impl Vickrey {
    pub(crate) fn new() -> Self {
        Self { bids: Vec::new() }
    }

    pub(crate) fn store_bids(&mut self, spec: &AuctionSpec, response: &ParticipantResponse) {
        self.bids.extend(
            response
                .bids
                .iter()
                .filter(|bid| bid.price >= spec.minimal_price)
                .cloned(),
        );
    }

    /// One round is all there is. The report's price carries no meaning for
    /// a sealed-bid auction and stays at zero.
    pub(crate) fn close_round(&mut self, spec: &AuctionSpec) -> RoundOutcome {
        RoundOutcome::Finished(Finish {
            price: Decimal::ZERO,
            allocation: allocation::allocate(
                std::mem::take(&mut self.bids),
                spec.quantity,
                Pricing::NextBid,
            ),
        })
    }
}
