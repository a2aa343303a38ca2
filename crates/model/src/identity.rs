//! Participant identity.

use serde::{Deserialize, Serialize};

/// Opaque identity of an auction participant or auctioneer.
///
/// The host owns identity management; the engine only requires that
/// identities compare equal reliably and render to a canonical string. The
/// canonical string doubles as the final tie breaker of the bid order, so
/// two distinct participants must never share one.
#[derive(
    Clone,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct ParticipantId(pub String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The canonical string form used for deterministic tie breaking.
    pub fn canonical(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
