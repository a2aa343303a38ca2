//! Pluggable bidding strategies, one active per auction kind.
//!
//! Strategies are pure functions from a valuation ceiling and the announced
//! auction state to concrete bids. The defaults mirror the textbook
//! behavior of each mechanism; hosts can swap in their own closures.

use {
    model::PriceQuantity,
    rust_decimal::Decimal,
};

/// Vickrey: `(ceiling, desired quantity)` to bids.
pub type VickreyStrategy = Box<dyn Fn(Decimal, u32) -> Vec<PriceQuantity> + Send + Sync>;

/// English: `(ceiling, current price, desired quantity)` to bids.
pub type EnglishStrategy = Box<dyn Fn(Decimal, Decimal, u32) -> Vec<PriceQuantity> + Send + Sync>;

/// What a Dutch strategy sees each round of the price clock.
#[derive(Clone, Copy, Debug)]
pub struct DutchQuote {
    /// Maximum price per unit the buyer would pay.
    pub ceiling: Decimal,
    /// Units still on sale.
    pub remaining_quantity: u32,
    /// The clock price this round.
    pub current_price: Decimal,
    /// Units the buyer wants.
    pub desired_quantity: u32,
    /// Price drop per round.
    pub decrement: Decimal,
}

/// Dutch: quote to the quantity accepted at the clock price.
pub type DutchStrategy = Box<dyn Fn(&DutchQuote) -> u32 + Send + Sync>;

/// Bids the full ceiling for the full quantity; nothing on a zero ceiling.
/// Under the second-price rule bidding one's true valuation is dominant.
pub fn truthful_vickrey() -> VickreyStrategy {
    Box::new(|ceiling, desired| {
        if ceiling == Decimal::ZERO {
            return Vec::new();
        }
        vec![PriceQuantity::new(ceiling, desired)]
    })
}

/// Bids the ceiling outright, regardless of the current price.
pub fn truthful_english() -> EnglishStrategy {
    Box::new(|ceiling, _current_price, desired| {
        if ceiling == Decimal::ZERO {
            return Vec::new();
        }
        vec![PriceQuantity::new(ceiling, desired)]
    })
}

/// Raises in tenth-of-ceiling steps instead of jumping to the ceiling.
///
/// Two buyers with the same ceiling and this strategy stop at the same
/// increment and settle the tie below their maxima, which is good for them
/// and bad for the auctioneer.
pub fn incremental_english() -> EnglishStrategy {
    Box::new(|ceiling, current_price, desired| {
        if ceiling <= Decimal::ZERO {
            return Vec::new();
        }
        let ratio = current_price / ceiling;
        if ratio > Decimal::ONE {
            return Vec::new();
        }
        let raised = (ratio * Decimal::TEN).ceil() / Decimal::TEN * ceiling;
        vec![PriceQuantity::new(raised, desired)]
    })
}

/// Accepts the full desired quantity in the first round the clock price
/// reaches the ceiling. The decrement guard keeps the strategy from firing
/// again every round after that.
pub fn first_acceptable_dutch() -> DutchStrategy {
    Box::new(|quote| {
        if quote.ceiling == Decimal::ZERO {
            return 0;
        }
        let acceptable = quote.current_price <= quote.ceiling;
        let first_time = quote.current_price + quote.decrement > quote.ceiling;
        if acceptable && first_time {
            quote.desired_quantity
        } else {
            0
        }
    })
}
