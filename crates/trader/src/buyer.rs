//! Turning announcements into responses and outcomes into updated demand.

use {
    crate::{
        demand::{Demand, DemandBook},
        strategy::{
            self, DutchQuote, DutchStrategy, EnglishStrategy, VickreyStrategy,
        },
    },
    model::{
        AuctionAnnouncement, AuctionEnded, AuctionKind, Bid, ItemCategory, ParticipantId,
        ParticipantResponse, PersonalOutcome,
    },
};

/// The buyer side of the auction protocol: a wish list plus one strategy
/// per auction kind.
pub struct Buyer {
    demands: DemandBook,
    vickrey: VickreyStrategy,
    english: EnglishStrategy,
    dutch: DutchStrategy,
}

impl Default for Buyer {
    fn default() -> Self {
        Self {
            demands: DemandBook::new(),
            vickrey: strategy::truthful_vickrey(),
            english: strategy::truthful_english(),
            dutch: strategy::first_acceptable_dutch(),
        }
    }
}

impl Buyer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers another demand for a category.
    pub fn add_demand(&mut self, category: impl Into<ItemCategory>, demand: Demand) {
        self.demands.push(category, demand);
    }

    pub fn demands(&self) -> &DemandBook {
        &self.demands
    }

    // Strategy overrides. Each kind has exactly one active strategy; setting
    // a new one replaces the previous for all subsequent auctions.
    pub fn set_vickrey_strategy(&mut self, strategy: VickreyStrategy) {
        self.vickrey = strategy;
    }

    pub fn set_english_strategy(&mut self, strategy: EnglishStrategy) {
        self.english = strategy;
    }

    pub fn set_dutch_strategy(&mut self, strategy: DutchStrategy) {
        self.dutch = strategy;
    }

    /// Answers an announcement with the union of the bids every matching
    /// demand produces under the announced mechanism's strategy.
    ///
    /// A buyer without demand on the category answers with an empty bid
    /// list; the auctioneer still counts the response towards the round.
    pub fn register_auction(
        &self,
        announcement: &AuctionAnnouncement,
        me: &ParticipantId,
    ) -> ParticipantResponse {
        let mut bids: Vec<Bid> = Vec::new();
        for demand in self.demands.for_category(&announcement.good.category) {
            let ceiling = demand.ceiling(&announcement.good);
            match announcement.kind {
                AuctionKind::Vickrey => bids.extend(
                    (self.vickrey)(ceiling, demand.quantity())
                        .into_iter()
                        .map(|pair| pair.bid_by(me.clone())),
                ),
                AuctionKind::English => bids.extend(
                    (self.english)(ceiling, announcement.price, demand.quantity())
                        .into_iter()
                        .map(|pair| pair.bid_by(me.clone())),
                ),
                AuctionKind::Dutch => {
                    let accepted = (self.dutch)(&DutchQuote {
                        ceiling,
                        remaining_quantity: announcement.quantity_available,
                        current_price: announcement.price,
                        desired_quantity: demand.quantity(),
                        decrement: announcement.decrement,
                    });
                    if accepted > 0 {
                        bids.push(Bid {
                            price: announcement.price,
                            quantity: accepted,
                            bidder: Some(me.clone()),
                        });
                    }
                }
            }
        }
        ParticipantResponse {
            auction: announcement.auction,
            bidder: me.clone(),
            bids,
        }
    }

    /// Reconciles the wish list against a finished auction. A lost auction
    /// changes nothing; a win covers demands from the highest re-evaluated
    /// valuation down.
    pub fn update_demands(&mut self, ended: &AuctionEnded) {
        let PersonalOutcome::Won(award) = &ended.outcome else {
            return;
        };
        tracing::debug!(
            auction = %ended.auction,
            category = %ended.good.category,
            quantity = award.quantity,
            "reconciling demand after win"
        );
        self.demands.reconcile(&ended.good, award.quantity);
    }
}
