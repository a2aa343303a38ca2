//! Whole-auction flows: organize, bid through buyer strategies, settle and
//! reconcile demand. The host's relay of round updates is an explicit loop
//! over the progress returned by the registry.

use {
    mechanism::{Progress, Registry},
    model::{
        AuctionAnnouncement, AuctionKind, AuctionResult, AuctionSpec, Good, ParticipantId,
        PersonalOutcome,
    },
    rust_decimal_macros::dec,
    trader::{Buyer, Demand},
};

fn spec(kind: AuctionKind, quantity: u32) -> AuctionSpec {
    AuctionSpec {
        kind,
        good: Good::new("books"),
        participants: vec!["alice".into(), "bob".into()],
        minimal_price: dec!(10),
        maximal_price: dec!(120),
        decrement: dec!(10),
        quantity,
    }
}

/// Drives rounds until the auction finishes: every buyer answers each
/// announcement, the closing response yields either the next announcement
/// or the final result.
fn run_auction(
    registry: &Registry,
    mut announcement: AuctionAnnouncement,
    buyers: &[(ParticipantId, &Buyer)],
) -> AuctionResult {
    loop {
        let mut round_result = None;
        for (name, buyer) in buyers {
            let response = buyer.register_auction(&announcement, name);
            match registry.respond(&response).unwrap() {
                Progress::Waiting => {}
                Progress::NewRound(result) => round_result = Some(result),
                Progress::Finished(result) => return result,
            }
        }
        let result = round_result.expect("the round closes with the last response");
        announcement = result
            .next_announcement(announcement.auctioneer.clone())
            .expect("a new-round result carries the next announcement");
    }
}

#[test]
fn english_auction_converges_and_reconciles_demand() {
    let registry = Registry::new();
    let mut alice = Buyer::new();
    alice.add_demand("books", Demand::at_price(1, dec!(100)));
    let mut bob = Buyer::new();
    bob.add_demand("books", Demand::at_price(1, dec!(80)));

    let (announcement, id) = registry
        .create(spec(AuctionKind::English, 1), "seller".into())
        .unwrap();
    assert_eq!(announcement.price, dec!(9));

    let result = run_auction(
        &registry,
        announcement,
        &[("alice".into(), &alice), ("bob".into(), &bob)],
    );
    registry.remove(id).unwrap();

    // Truthful bidders finish in two cycles: one round of bids, one silent
    // round. Alice wins the unit at Bob's price.
    assert_eq!(result.awards.len(), 1);
    assert_eq!(result.awards[0].bid.bidder, Some("alice".into()));
    assert_eq!(result.awards[0].price, dec!(80));
    assert_eq!(result.quantity_remaining, 0);

    alice.update_demands(&result.ended_for(&"alice".into()));
    assert!(alice.demands().is_empty());

    let bob_end = result.ended_for(&"bob".into());
    assert_eq!(bob_end.outcome, PersonalOutcome::NotWon);
    bob.update_demands(&bob_end);
    assert_eq!(bob.demands().desired_quantity(&"books".into()), 1);
}

#[test]
fn dutch_auction_sells_to_the_first_acceptable_clock_price() {
    let registry = Registry::new();
    let mut alice = Buyer::new();
    alice.add_demand("books", Demand::at_price(2, dec!(95)));
    let mut bob = Buyer::new();
    bob.add_demand("books", Demand::at_price(1, dec!(80)));

    let (announcement, id) = registry
        .create(spec(AuctionKind::Dutch, 2), "seller".into())
        .unwrap();
    assert_eq!(announcement.price, dec!(120));

    let result = run_auction(
        &registry,
        announcement,
        &[("alice".into(), &alice), ("bob".into(), &bob)],
    );
    registry.remove(id).unwrap();

    // The clock ticks 120, 110, 100, 90; at 90 Alice's ceiling of 95 is
    // reached, she takes both units and the stock runs out before Bob's
    // ceiling comes up.
    assert_eq!(result.price, dec!(90));
    assert_eq!(result.awards.len(), 1);
    assert_eq!(result.awards[0].bid.bidder, Some("alice".into()));
    assert_eq!(result.awards[0].price, dec!(90));
    assert_eq!(result.awards[0].quantity, 2);

    alice.update_demands(&result.ended_for(&"alice".into()));
    assert!(alice.demands().is_empty());
}

#[test]
fn vickrey_auction_with_truthful_buyers() {
    let registry = Registry::new();
    let mut alice = Buyer::new();
    alice.add_demand("books", Demand::at_price(1, dec!(100)));
    let mut bob = Buyer::new();
    bob.add_demand("books", Demand::at_price(2, dec!(80)));

    let (announcement, id) = registry
        .create(spec(AuctionKind::Vickrey, 2), "seller".into())
        .unwrap();

    let result = run_auction(
        &registry,
        announcement,
        &[("alice".into(), &alice), ("bob".into(), &bob)],
    );
    registry.remove(id).unwrap();

    // Alice pays Bob's price for her unit; Bob pays his own (no next bid)
    // for the one unit left.
    assert_eq!(result.awards.len(), 2);
    assert_eq!(result.awards[0].bid.bidder, Some("alice".into()));
    assert_eq!(result.awards[0].price, dec!(80));
    assert_eq!(result.awards[1].bid.bidder, Some("bob".into()));
    assert_eq!(result.awards[1].price, dec!(80));
    assert_eq!(result.awards[1].quantity, 1);

    // A late response for the evicted id fails loudly and resurrects
    // nothing.
    let stale = model::ParticipantResponse::new(id, "alice").with_bid(dec!(100), 1);
    assert!(matches!(
        registry.respond(&stale),
        Err(mechanism::Error::UnknownAuction(_))
    ));
}
