//! Auction progress reports and personal outcomes.

use {
    crate::{
        announcement::{AuctionAnnouncement, AuctionId},
        bid::Bid,
        good::Good,
        identity::ParticipantId,
        spec::AuctionSpec,
    },
    rust_decimal::Decimal,
    serde::{Deserialize, Serialize},
};

/// Whether a report closes the auction or opens another round. Rounds that
/// are still waiting for responses produce no report at all.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    NewRound,
    Finished,
}

/// A winning assignment: the original bid, the clearing price per unit and
/// the number of units actually won. The won quantity can undercut the bid's
/// requested quantity when stock runs out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub bid: Bid,
    pub price: Decimal,
    pub quantity: u32,
}

/// What a single participant took home from a finished auction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "outcome")]
pub enum PersonalOutcome {
    Won(Award),
    NotWon,
}

impl PersonalOutcome {
    pub fn is_won(&self) -> bool {
        matches!(self, PersonalOutcome::Won(_))
    }

    /// Units won; zero for a lost auction.
    pub fn quantity(&self) -> u32 {
        match self {
            PersonalOutcome::Won(award) => award.quantity,
            PersonalOutcome::NotWon => 0,
        }
    }
}

/// Report the auctioneer receives whenever a round completes: either the
/// final allocation or the state the next round starts from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuctionResult {
    pub auction: AuctionId,
    pub kind: ResultKind,
    /// Snapshot of the spec the auction was organized with.
    pub spec: AuctionSpec,
    /// Winning assignments. Empty unless the auction finished.
    pub awards: Vec<Award>,
    /// The bids backing this report, in ranking order: the round's accepted
    /// bids for a new round, the full cumulative ledger for a finish.
    pub bids: Vec<Bid>,
    /// Current minimal price (Vickrey/English) or clock price (Dutch).
    pub price: Decimal,
    /// Units still unassigned, clamped to zero.
    pub quantity_remaining: u32,
    /// Price drop per round of a Dutch auction, zero otherwise.
    pub decrement: Decimal,
}

impl AuctionResult {
    /// The announcement for the next round, for the host to broadcast.
    /// `None` once the auction has finished.
    pub fn next_announcement(&self, auctioneer: ParticipantId) -> Option<AuctionAnnouncement> {
        match self.kind {
            ResultKind::Finished => None,
            ResultKind::NewRound => Some(AuctionAnnouncement {
                auction: self.auction,
                auctioneer,
                kind: self.spec.kind,
                good: self.spec.good.clone(),
                price: self.price,
                quantity_available: self.quantity_remaining,
                decrement: self.decrement,
            }),
        }
    }

    /// The outcome for one participant, aggregating all of its winning bids.
    /// Whether and when to notify participants is the host's call.
    pub fn personal_outcome(&self, participant: &ParticipantId) -> PersonalOutcome {
        let mut won: Option<Award> = None;
        for award in &self.awards {
            if award.bid.bidder.as_ref() != Some(participant) {
                continue;
            }
            won = Some(match won {
                None => award.clone(),
                // Several winning bids by the same participant: report the
                // total quantity at the price of its best-ranked bid.
                Some(mut first) => {
                    first.quantity += award.quantity;
                    first
                }
            });
        }
        match won {
            Some(award) => PersonalOutcome::Won(award),
            None => PersonalOutcome::NotWon,
        }
    }

    /// The end-of-auction notification for one participant.
    pub fn ended_for(&self, participant: &ParticipantId) -> AuctionEnded {
        AuctionEnded {
            auction: self.auction,
            good: self.spec.good.clone(),
            outcome: self.personal_outcome(participant),
        }
    }
}

/// Notification sent by the auctioneer to a participant once an auction is
/// over. Feeding it to the buyer module reconciles outstanding demand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuctionEnded {
    pub auction: AuctionId,
    pub good: Good,
    pub outcome: PersonalOutcome,
}
