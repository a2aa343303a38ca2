//! Winner determination shared by all auction mechanisms.

use model::{Award, Bid, bid};

/// How a winning bid's clearing price is picked.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Pricing {
    /// Generalized second-price rule (Vickrey, English): a winner pays the
    /// price of the next bid in ranking order. The last winner pays its own
    /// price when no bid follows.
    NextBid,
    /// A winner pays exactly what it bid (Dutch, where every stored bid
    /// already carries the clock price).
    OwnPrice,
}

/// The outcome of a winner-determination walk.
#[derive(Clone, Debug, PartialEq)]
pub struct Allocation {
    /// Winning assignments in ranking order.
    pub awards: Vec<Award>,
    /// The full bid ledger, sorted from highest to lowest rank.
    pub bids: Vec<Bid>,
    /// Units left unassigned, clamped to zero.
    pub remaining: u32,
}

/// Sorts the cumulative bid ledger and assigns units from the top.
///
/// Each winning bid is assigned `min(remaining, bid.quantity)` units, but
/// the running remainder drops by the bid's full requested quantity. When
/// tied bids straddle the boundary this deliberately under-allocates rather
/// than selling units twice.
pub fn allocate(mut bids: Vec<Bid>, quantity: u32, pricing: Pricing) -> Allocation {
    bid::sort_descending(&mut bids);

    let mut awards = Vec::new();
    let mut remaining = i64::from(quantity);
    for (index, bid) in bids.iter().enumerate() {
        if remaining <= 0 {
            break;
        }
        let price = match pricing {
            Pricing::OwnPrice => bid.price,
            Pricing::NextBid => match bids.get(index + 1) {
                Some(next) => next.price,
                None => bid.price,
            },
        };
        awards.push(Award {
            bid: bid.clone(),
            price,
            quantity: bid.quantity.min(clamped(remaining)),
        });
        remaining -= i64::from(bid.quantity);
    }

    Allocation {
        awards,
        bids,
        remaining: clamped(remaining),
    }
}

/// A signed unit count clamped into `u32`. Counts in this module never
/// exceed the spec quantity, so only the negative side ever clamps.
pub(crate) fn clamped(units: i64) -> u32 {
    u32::try_from(units.max(0)).unwrap_or(u32::MAX)
}

/// Total units assigned across all awards.
pub fn assigned_quantity(awards: &[Award]) -> u64 {
    awards.iter().map(|award| u64::from(award.quantity)).sum()
}

#[cfg(test)]
mod tests {
    use {super::*, rust_decimal::Decimal, rust_decimal_macros::dec};

    fn bid(price: Decimal, quantity: u32, bidder: &str) -> Bid {
        Bid::new(price, quantity, bidder)
    }

    #[test]
    fn second_price_example() {
        // Winners pay the next bid's price; A and B clear two units.
        let bids = vec![
            bid(dec!(100), 1, "a"),
            bid(dec!(80), 2, "b"),
            bid(dec!(60), 1, "c"),
        ];
        let allocation = allocate(bids, 2, Pricing::NextBid);

        assert_eq!(allocation.awards.len(), 2);
        assert_eq!(allocation.awards[0].bid.bidder, Some("a".into()));
        assert_eq!(allocation.awards[0].price, dec!(80));
        assert_eq!(allocation.awards[0].quantity, 1);
        assert_eq!(allocation.awards[1].bid.bidder, Some("b".into()));
        assert_eq!(allocation.awards[1].price, dec!(60));
        assert_eq!(allocation.awards[1].quantity, 1);
        assert_eq!(allocation.remaining, 0);
    }

    #[test]
    fn last_winner_pays_its_own_price_without_a_next_bid() {
        let allocation = allocate(vec![bid(dec!(100), 1, "a")], 5, Pricing::NextBid);
        assert_eq!(allocation.awards[0].price, dec!(100));
        assert_eq!(allocation.remaining, 4);
    }

    #[test]
    fn own_price_keeps_every_bid_price() {
        let bids = vec![bid(dec!(70), 1, "a"), bid(dec!(70), 2, "b")];
        let allocation = allocate(bids, 3, Pricing::OwnPrice);
        assert!(allocation.awards.iter().all(|award| award.price == dec!(70)));
    }

    #[test]
    fn oversubscribed_boundary_under_allocates() {
        // The second bid only gets the single leftover unit, and the third
        // gets nothing: the remainder drops by requested, not assigned,
        // quantities.
        let bids = vec![
            bid(dec!(90), 2, "a"),
            bid(dec!(80), 4, "b"),
            bid(dec!(80), 4, "c"),
        ];
        let allocation = allocate(bids, 3, Pricing::OwnPrice);
        assert_eq!(allocation.awards.len(), 2);
        assert_eq!(allocation.awards[1].quantity, 1);
        assert_eq!(allocation.remaining, 0);
    }

    #[test]
    fn never_assigns_more_than_the_quantity_for_sale() {
        let bids: Vec<_> = (0..20)
            .map(|i| bid(Decimal::from(100 - i), (i % 5) + 1, &format!("bidder-{i}")))
            .collect();
        for quantity in [1, 3, 7, 50] {
            for pricing in [Pricing::NextBid, Pricing::OwnPrice] {
                let allocation = allocate(bids.clone(), quantity, pricing);
                assert!(assigned_quantity(&allocation.awards) <= u64::from(quantity));
            }
        }
    }

    #[test]
    fn no_bids_leaves_everything_unsold() {
        let allocation = allocate(vec![], 4, Pricing::NextBid);
        assert!(allocation.awards.is_empty());
        assert_eq!(allocation.remaining, 4);
    }
}
