//! English (ascending) auctions.

use {
    crate::{
        allocation::{self, Pricing},
        auction::{Finish, RoundOutcome, RoundUpdate, flatten_sorted},
    },
    model::{
        AuctionSpec, ParticipantId, ParticipantResponse,
        bid::{self, Bid},
    },
    rust_decimal::Decimal,
    std::collections::BTreeMap,
};

/// An English auction keeps a current price that bidders push up over
/// rounds. Each bidder owns one bid set; resubmissions must be monotone
/// (total quantity and lowest price never shrink) or they are ignored. The
/// auction ends after the first round in which nothing was accepted.
pub(crate) struct English {
    /// Outbidding this price guarantees at least one unit if the auction
    /// ends next round.
    current_price: Decimal,
    /// Latest accepted bid set per bidder, each kept in ranking order. A
    /// `BTreeMap` keeps flattening deterministic.
    ledger: BTreeMap<ParticipantId, Vec<Bid>>,
    /// Bids accepted in the current round.
    round_bids: Vec<Bid>,
}

impl English {
    pub(crate) fn new(spec: &AuctionSpec) -> Self {
        Self {
            // One increment below the reserve, so a reserve-price bid
            // already counts as an overbid.
            current_price: spec.minimal_price - Decimal::ONE,
            ledger: BTreeMap::new(),
            round_bids: Vec::new(),
        }
    }

    pub(crate) fn current_price(&self) -> Decimal {
        self.current_price
    }

    pub(crate) fn store_bids(&mut self, _spec: &AuctionSpec, response: &ParticipantResponse) {
        match self.ledger.get(&response.bidder) {
            Some(previous) if !previous.is_empty() => {
                let mut submitted = response.bids.clone();
                bid::sort_descending(&mut submitted);
                if let Some(reason) = rejection(previous, &submitted) {
                    // Policy no-op: the prior bid set stands.
                    tracing::debug!(
                        bidder = %response.bidder,
                        reason,
                        "discarding non-monotone resubmission"
                    );
                    return;
                }
                self.round_bids.extend(submitted.iter().cloned());
                self.ledger.insert(response.bidder.clone(), submitted);
            }
            _ => {
                // First submission: only bids strictly above the current
                // price are considered at all.
                let mut accepted: Vec<Bid> = response
                    .bids
                    .iter()
                    .filter(|bid| bid.price > self.current_price)
                    .cloned()
                    .collect();
                bid::sort_descending(&mut accepted);
                self.round_bids.extend(accepted.iter().cloned());
                self.ledger.insert(response.bidder.clone(), accepted);
            }
        }
    }

    /// A silent round means nobody raises anything anymore.
    pub(crate) fn close_round(&mut self, spec: &AuctionSpec) -> RoundOutcome {
        if self.round_bids.is_empty() {
            RoundOutcome::Finished(self.finish(spec))
        } else {
            RoundOutcome::NewRound(self.next_round(spec))
        }
    }

    /// Recomputes the current price and flushes the round ledger.
    ///
    /// The price moves to the marginal clearing bid: walking all bids in
    /// ranking order, the first one at which cumulative demand reaches the
    /// quantity for sale. Outbidding it secures units if nothing else
    /// changes. Undersubscribed rounds leave the price alone.
    fn next_round(&mut self, spec: &AuctionSpec) -> RoundUpdate {
        let ranked = flatten_sorted(self.ledger.values());
        let mut available = i64::from(spec.quantity);
        for bid in &ranked {
            available -= i64::from(bid.quantity);
            if available <= 0 {
                self.current_price = bid.price;
                break;
            }
        }

        let mut bids = std::mem::take(&mut self.round_bids);
        bid::sort_descending(&mut bids);
        RoundUpdate {
            price: self.current_price,
            bids,
            quantity_remaining: spec.quantity,
        }
    }

    fn finish(&mut self, spec: &AuctionSpec) -> Finish {
        Finish {
            price: self.current_price,
            allocation: allocation::allocate(
                flatten_sorted(self.ledger.values()),
                spec.quantity,
                Pricing::NextBid,
            ),
        }
    }
}

/// Why a resubmitted bid set replaces nothing, or `None` if it may. Both
/// sets must be in ranking order.
fn rejection(previous: &[Bid], submitted: &[Bid]) -> Option<&'static str> {
    let total = |bids: &[Bid]| bids.iter().map(|bid| u64::from(bid.quantity)).sum::<u64>();
    if total(submitted) < total(previous) {
        return Some("total quantity shrank");
    }
    let Some(lowest) = previous.last() else {
        return None;
    };
    if submitted.iter().any(|bid| bid.price < lowest.price) {
        return Some("lowest price per unit dropped");
    }
    if submitted == previous {
        return Some("identical to the standing set");
    }
    None
}
