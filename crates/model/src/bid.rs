//! Bids and their strict total order.

use {
    crate::identity::ParticipantId,
    rust_decimal::Decimal,
    serde::{Deserialize, Serialize},
    std::cmp::Ordering,
};

/// A bid on a quantity of units at a price per unit.
///
/// The bidder is not necessarily a participant of the auction: a participant
/// may bid on behalf of another party. An absent bidder marks a placeholder
/// bid and ranks after every attributed bid.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Bid {
    /// Price per unit the bidder is willing to pay.
    pub price: Decimal,
    /// Number of units the bidder wants at that price.
    pub quantity: u32,
    /// The party on whose behalf this bid was made.
    pub bidder: Option<ParticipantId>,
}

impl Bid {
    pub fn new(price: Decimal, quantity: u32, bidder: impl Into<ParticipantId>) -> Self {
        Self {
            price,
            quantity,
            bidder: Some(bidder.into()),
        }
    }

    /// Total price of the bid if fully assigned.
    pub fn volume(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The bid order drives both round-transition price computation and final
/// winner ranking, so it must be a strict total order that is reproducible
/// for any fixed bid set.
///
/// A greater bid ranks earlier: first by price per unit, then by quantity
/// (bidders spending more rank first), then by the bidder's canonical string
/// so that runs on different hosts tally identically. Bids without a bidder
/// compare below all attributed bids.
impl Ord for Bid {
    fn cmp(&self, other: &Self) -> Ordering {
        self.price
            .cmp(&other.price)
            .then_with(|| self.quantity.cmp(&other.quantity))
            .then_with(|| self.bidder.cmp(&other.bidder))
    }
}

impl PartialOrd for Bid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sorts bids from highest to lowest rank.
pub fn sort_descending(bids: &mut [Bid]) {
    bids.sort_by(|a, b| b.cmp(a));
}

/// A price per unit paired with a quantity, produced by bidding strategies
/// before being attributed to a bidder.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PriceQuantity {
    pub price: Decimal,
    pub quantity: u32,
}

impl PriceQuantity {
    pub fn new(price: Decimal, quantity: u32) -> Self {
        Self { price, quantity }
    }

    /// Attributes the pair to a bidder.
    pub fn bid_by(self, bidder: ParticipantId) -> Bid {
        Bid {
            price: self.price,
            quantity: self.quantity,
            bidder: Some(bidder),
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, rust_decimal_macros::dec};

    fn bid(price: Decimal, quantity: u32, bidder: &str) -> Bid {
        Bid::new(price, quantity, bidder)
    }

    #[test]
    fn orders_by_price_then_quantity_then_bidder() {
        let mut bids = vec![
            bid(dec!(60), 1, "carol"),
            bid(dec!(100), 1, "alice"),
            bid(dec!(80), 3, "bob"),
            bid(dec!(80), 5, "alice"),
            bid(dec!(80), 3, "dave"),
        ];
        sort_descending(&mut bids);
        assert_eq!(
            bids,
            vec![
                bid(dec!(100), 1, "alice"),
                bid(dec!(80), 5, "alice"),
                // Same price and quantity: higher canonical string first.
                bid(dec!(80), 3, "dave"),
                bid(dec!(80), 3, "bob"),
                bid(dec!(60), 1, "carol"),
            ]
        );
    }

    #[test]
    fn unattributed_bid_ranks_last() {
        let placeholder = Bid {
            price: dec!(100),
            quantity: 10,
            bidder: None,
        };
        let attributed = bid(dec!(100), 10, "alice");
        assert!(attributed > placeholder);
        assert!(placeholder < attributed);
    }

    #[test]
    fn order_is_antisymmetric_and_transitive() {
        let bids = [
            bid(dec!(10), 1, "a"),
            bid(dec!(10), 1, "b"),
            bid(dec!(10), 2, "a"),
            bid(dec!(20), 1, "a"),
            Bid {
                price: dec!(10),
                quantity: 1,
                bidder: None,
            },
        ];
        for a in &bids {
            for b in &bids {
                assert_eq!(a.cmp(b), b.cmp(a).reverse());
                for c in &bids {
                    if a < b && b < c {
                        assert!(a < c);
                    }
                }
            }
        }
    }

    #[test]
    fn distinct_bidders_never_tie() {
        let a = bid(dec!(42), 7, "alice");
        let b = bid(dec!(42), 7, "bob");
        assert_ne!(a.cmp(&b), std::cmp::Ordering::Equal);
    }
}
