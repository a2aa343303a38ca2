//! The per-auction state machine shared by all mechanisms.

use {
    crate::{allocation::Allocation, dutch::Dutch, english::English, vickrey::Vickrey},
    model::{
        AuctionAnnouncement, AuctionId, AuctionKind, AuctionResult, AuctionSpec,
        ParticipantId, ParticipantResponse, ResultKind,
        bid::{self, Bid},
    },
    rust_decimal::Decimal,
    std::sync::Arc,
};

/// What a processed response did to the auction.
///
/// `Waiting` is a transient signal: state was updated but the round is still
/// open. Only `NewRound` and `Finished` carry a report worth relaying.
#[derive(Clone, Debug, PartialEq)]
pub enum Progress {
    /// Not all participants have responded yet.
    Waiting,
    /// The round closed without ending the auction; the report describes the
    /// state the next round starts from.
    NewRound(AuctionResult),
    /// The auction is over; the report carries the final allocation. The
    /// caller must evict the auction from the registry afterwards.
    Finished(AuctionResult),
}

/// A running auction: an immutable spec, the pending-response counter and
/// the mechanism-specific bid ledgers.
///
/// Not internally synchronized. The registry hands out exclusive access per
/// auction id; the host must not feed responses for one id concurrently.
pub struct Auction {
    id: AuctionId,
    spec: Arc<AuctionSpec>,
    /// Responses received in the current round. Resets to zero exactly when
    /// it reaches the participant count.
    responses: usize,
    variant: Variant,
}

/// The closed set of mechanisms. Selected once at organize time.
enum Variant {
    Vickrey(Vickrey),
    English(English),
    Dutch(Dutch),
}

/// State a non-terminal round transition hands back to the skeleton.
pub(crate) struct RoundUpdate {
    pub price: Decimal,
    /// Bids accepted in the closed round, in ranking order.
    pub bids: Vec<Bid>,
    pub quantity_remaining: u32,
}

/// Terminal state: the allocation plus the mechanism's final price.
pub(crate) struct Finish {
    pub price: Decimal,
    pub allocation: Allocation,
}

/// A mechanism's verdict once every participant has answered: the round
/// either rolls over or the auction is done.
pub(crate) enum RoundOutcome {
    NewRound(RoundUpdate),
    Finished(Finish),
}

impl Auction {
    /// Creates the state machine for an already validated spec.
    pub fn new(id: AuctionId, spec: AuctionSpec) -> Self {
        let spec = Arc::new(spec);
        let variant = match spec.kind {
            AuctionKind::Vickrey => Variant::Vickrey(Vickrey::new()),
            AuctionKind::English => Variant::English(English::new(&spec)),
            AuctionKind::Dutch => Variant::Dutch(Dutch::new(&spec)),
        };
        Self {
            id,
            spec,
            responses: 0,
            variant,
        }
    }

    pub fn id(&self) -> AuctionId {
        self.id
    }

    pub fn spec(&self) -> &AuctionSpec {
        &self.spec
    }

    /// The announcement broadcast to all participants when the auction opens.
    pub fn initial_announcement(&self, auctioneer: ParticipantId) -> AuctionAnnouncement {
        let (price, quantity_available) = match &self.variant {
            Variant::Vickrey(_) => (self.spec.minimal_price, self.spec.quantity),
            Variant::English(state) => (state.current_price(), self.spec.quantity),
            Variant::Dutch(state) => (state.current_price(), state.quantity_available()),
        };
        AuctionAnnouncement {
            auction: self.id,
            auctioneer,
            kind: self.spec.kind,
            good: self.spec.good.clone(),
            price,
            quantity_available,
            decrement: self.spec.decrement,
        }
    }

    /// Processes one participant response.
    ///
    /// Counts the response, lets the mechanism validate and store the bids,
    /// and closes the round once every participant has answered: either the
    /// finish condition holds and the final allocation is computed, or the
    /// round ledger is flushed into a new-round report.
    pub fn handle_response(&mut self, response: &ParticipantResponse) -> Progress {
        self.responses += 1;
        match &mut self.variant {
            Variant::Vickrey(state) => state.store_bids(&self.spec, response),
            Variant::English(state) => state.store_bids(&self.spec, response),
            Variant::Dutch(state) => state.store_bids(&self.spec, response),
        }

        if self.responses < self.spec.participants.len() {
            return Progress::Waiting;
        }
        self.responses = 0;

        let outcome = match &mut self.variant {
            Variant::Vickrey(state) => state.close_round(&self.spec),
            Variant::English(state) => state.close_round(&self.spec),
            Variant::Dutch(state) => state.close_round(&self.spec),
        };
        match outcome {
            RoundOutcome::Finished(finish) => {
                tracing::debug!(
                    auction = %self.id,
                    winners = finish.allocation.awards.len(),
                    remaining = finish.allocation.remaining,
                    "auction finished"
                );
                Progress::Finished(self.report(ResultKind::Finished, finish))
            }
            RoundOutcome::NewRound(update) => {
                tracing::debug!(
                    auction = %self.id,
                    price = %update.price,
                    bids = update.bids.len(),
                    "auction entering new round"
                );
                Progress::NewRound(self.round_report(update))
            }
        }
    }

    fn round_report(&self, update: RoundUpdate) -> AuctionResult {
        AuctionResult {
            auction: self.id,
            kind: ResultKind::NewRound,
            spec: (*self.spec).clone(),
            awards: Vec::new(),
            bids: update.bids,
            price: update.price,
            quantity_remaining: update.quantity_remaining,
            decrement: self.spec.decrement,
        }
    }

    fn report(&self, kind: ResultKind, finish: Finish) -> AuctionResult {
        AuctionResult {
            auction: self.id,
            kind,
            spec: (*self.spec).clone(),
            awards: finish.allocation.awards,
            bids: finish.allocation.bids,
            price: finish.price,
            quantity_remaining: finish.allocation.remaining,
            decrement: self.spec.decrement,
        }
    }
}

/// Flattens and ranks a per-bidder ledger. Iteration order of the source map
/// must be deterministic for reproducible tallies.
pub(crate) fn flatten_sorted<'a>(ledgers: impl Iterator<Item = &'a Vec<Bid>>) -> Vec<Bid> {
    let mut bids: Vec<Bid> = ledgers.flatten().cloned().collect();
    bid::sort_descending(&mut bids);
    bids
}
