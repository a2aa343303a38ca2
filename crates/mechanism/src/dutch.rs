//! Dutch (descending clock) auctions.

use {
    crate::{
        allocation::{self, Pricing, clamped},
        auction::{Finish, RoundOutcome, RoundUpdate},
    },
    model::{
        AuctionSpec, ParticipantResponse,
        bid::{self, Bid},
    },
    rust_decimal::Decimal,
};

/// A Dutch auction drops its clock price by a fixed decrement each round.
/// Accepting the clock price claims units immediately; the auction ends when
/// stock runs out or the clock would fall below the reserve.
pub(crate) struct Dutch {
    current_price: Decimal,
    all_bids: Vec<Bid>,
    round_bids: Vec<Bid>,
    /// Remaining stock. Signed: every acceptance subtracts its full
    /// requested quantity, so the final round can overshoot below zero.
    available: i64,
}

impl Dutch {
    pub(crate) fn new(spec: &AuctionSpec) -> Self {
        Self {
            current_price: spec.maximal_price,
            all_bids: Vec::new(),
            round_bids: Vec::new(),
            available: i64::from(spec.quantity),
        }
    }

    pub(crate) fn current_price(&self) -> Decimal {
        self.current_price
    }

    pub(crate) fn quantity_available(&self) -> u32 {
        clamped(self.available)
    }

    /// Any positive-quantity acceptance is booked at the clock price; a
    /// mismatched declared price is normalized rather than rejected.
    pub(crate) fn store_bids(&mut self, _spec: &AuctionSpec, response: &ParticipantResponse) {
        for bid in &response.bids {
            if bid.quantity == 0 {
                continue;
            }
            let accepted = Bid {
                price: self.current_price,
                ..bid.clone()
            };
            self.available -= i64::from(accepted.quantity);
            self.round_bids.push(accepted.clone());
            self.all_bids.push(accepted);
        }
    }

    /// The auction ends once stock is gone or the next tick would undercut
    /// the reserve.
    pub(crate) fn close_round(&mut self, spec: &AuctionSpec) -> RoundOutcome {
        let exhausted = self.available <= 0
            || self.current_price - spec.decrement < spec.minimal_price;
        if exhausted {
            RoundOutcome::Finished(self.finish(spec))
        } else {
            RoundOutcome::NewRound(self.next_round(spec))
        }
    }

    /// Ticks the clock down and flushes the round ledger.
    fn next_round(&mut self, spec: &AuctionSpec) -> RoundUpdate {
        self.current_price -= spec.decrement;
        let mut bids = std::mem::take(&mut self.round_bids);
        bid::sort_descending(&mut bids);
        RoundUpdate {
            price: self.current_price,
            bids,
            quantity_remaining: self.quantity_available(),
        }
    }

    /// Winners pay their own (clock-normalized) price; the walk restarts
    /// from the full spec quantity to cap the oversold final round.
    fn finish(&mut self, spec: &AuctionSpec) -> Finish {
        Finish {
            price: self.current_price,
            allocation: allocation::allocate(
                std::mem::take(&mut self.all_bids),
                spec.quantity,
                Pricing::OwnPrice,
            ),
        }
    }
}
