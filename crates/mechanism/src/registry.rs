//! The table of running auctions.

use {
    crate::auction::{Auction, Progress},
    dashmap::{DashMap, mapref::entry::Entry},
    model::{AuctionAnnouncement, AuctionId, AuctionSpec, ParticipantId, ParticipantResponse, SpecError},
    thiserror::Error,
};

/// Auctioneer-side registry mapping live auction ids to their state
/// machines.
///
/// Creation, lookup and removal may race across ids; response handling for
/// one id takes exclusive access to that entry and must additionally be
/// serialized by the host. Removal is final: a removed id never comes back,
/// and late responses for it fail.
#[derive(Default)]
pub struct Registry {
    auctions: DashMap<AuctionId, Auction>,
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// The response referenced an id that is unknown: never created, already
    /// finished and evicted, or cancelled. Never retried.
    #[error("no running auction with id {0}")]
    UnknownAuction(AuctionId),
    /// The spec failed organize-time validation; no participant was
    /// contacted.
    #[error("malformed auction spec: {0}")]
    Malformed(#[from] SpecError),
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the spec, spins up the matching state machine under a fresh
    /// id and returns the announcement to broadcast.
    pub fn create(
        &self,
        spec: AuctionSpec,
        auctioneer: ParticipantId,
    ) -> Result<(AuctionAnnouncement, AuctionId), Error> {
        spec.validate()?;
        loop {
            let id = AuctionId(rand::random());
            match self.auctions.entry(id) {
                // Unlikely, but ids must never collide with a live auction.
                Entry::Occupied(_) => continue,
                Entry::Vacant(entry) => {
                    let auction = Auction::new(id, spec);
                    let announcement = auction.initial_announcement(auctioneer);
                    tracing::debug!(
                        auction = %id,
                        kind = %auction.spec().kind,
                        participants = auction.spec().participants.len(),
                        "organized auction"
                    );
                    entry.insert(auction);
                    return Ok((announcement, id));
                }
            }
        }
    }

    /// Routes a participant response to its auction.
    pub fn respond(&self, response: &ParticipantResponse) -> Result<Progress, Error> {
        let Some(mut auction) = self.auctions.get_mut(&response.auction) else {
            tracing::warn!(auction = %response.auction, bidder = %response.bidder, "response for unknown auction");
            return Err(Error::UnknownAuction(response.auction));
        };
        Ok(auction.handle_response(response))
    }

    /// Evicts an auction's state. The caller's duty after observing
    /// [`Progress::Finished`], and the only way to abandon a stalled
    /// auction.
    pub fn remove(&self, id: AuctionId) -> Result<(), Error> {
        match self.auctions.remove(&id) {
            Some(_) => Ok(()),
            None => Err(Error::UnknownAuction(id)),
        }
    }

    /// Number of live auctions.
    pub fn len(&self) -> usize {
        self.auctions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.auctions.is_empty()
    }
}
