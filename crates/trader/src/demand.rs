//! The buyer's wish list.

use {
    itertools::Itertools,
    model::{Good, ItemCategory},
    rust_decimal::Decimal,
    std::{collections::HashMap, sync::Arc},
};

/// Host-supplied valuation: the maximum price per unit the buyer would pay
/// for a concrete good. Treated as a pure function of the good.
pub type Valuation = Arc<dyn Fn(&Good) -> Decimal + Send + Sync>;

/// An outstanding desire for a quantity of some item category.
///
/// Several demands on one category form priority tiers: a buyer that badly
/// wants two units and would also take three more at a lower price registers
/// a high-valuation demand for two and a cheaper one for three.
#[derive(Clone)]
pub struct Demand {
    valuation: Valuation,
    quantity: u32,
}

impl Demand {
    pub fn new(
        quantity: u32,
        valuation: impl Fn(&Good) -> Decimal + Send + Sync + 'static,
    ) -> Self {
        Self {
            valuation: Arc::new(valuation),
            quantity,
        }
    }

    /// A demand that values every good of the category at a fixed price.
    pub fn at_price(quantity: u32, price: Decimal) -> Self {
        Self::new(quantity, move |_| price)
    }

    /// The per-unit ceiling for a concrete good.
    pub fn ceiling(&self, good: &Good) -> Decimal {
        (self.valuation)(good)
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Owned table of demands per item category.
///
/// Insertion order within a category is bidding priority. The table never
/// keeps empty categories around.
#[derive(Clone, Default)]
pub struct DemandBook {
    demands: HashMap<ItemCategory, Vec<Demand>>,
}

impl DemandBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a demand to the category's priority list.
    pub fn push(&mut self, category: impl Into<ItemCategory>, demand: Demand) {
        self.demands.entry(category.into()).or_default().push(demand);
    }

    /// The demands registered for a category, in insertion order.
    pub fn for_category(&self, category: &ItemCategory) -> &[Demand] {
        self.demands.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total desired quantity across all demands of a category.
    pub fn desired_quantity(&self, category: &ItemCategory) -> u64 {
        self.for_category(category)
            .iter()
            .map(|demand| u64::from(demand.quantity))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.demands.is_empty()
    }

    /// Subtracts a won quantity from the demands of the good's category.
    ///
    /// Every demand re-evaluates the good; the won units then cover demands
    /// from the highest valuation down (insertion order breaks ties). Fully
    /// covered demands disappear, the first partially covered one shrinks,
    /// everything below stays untouched.
    pub(crate) fn reconcile(&mut self, good: &Good, won: u32) {
        let Some(demands) = self.demands.get_mut(&good.category) else {
            return;
        };

        let by_valuation_desc: Vec<usize> = (0..demands.len())
            .sorted_by(|&a, &b| demands[b].ceiling(good).cmp(&demands[a].ceiling(good)))
            .collect();

        let mut left = won;
        let mut covered = vec![false; demands.len()];
        for index in by_valuation_desc {
            if left == 0 {
                break;
            }
            let demand = &mut demands[index];
            if demand.quantity <= left {
                left -= demand.quantity;
                covered[index] = true;
            } else {
                demand.quantity -= left;
                left = 0;
            }
        }

        let mut index = 0;
        demands.retain(|_| {
            let keep = !covered[index];
            index += 1;
            keep
        });
        if demands.is_empty() {
            self.demands.remove(&good.category);
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, rust_decimal_macros::dec};

    fn book() -> (DemandBook, Good) {
        let mut book = DemandBook::new();
        book.push("books", Demand::at_price(2, dec!(100)));
        book.push("books", Demand::at_price(3, dec!(50)));
        (book, Good::new("books"))
    }

    #[test]
    fn covers_highest_valuation_first() {
        let (mut book, good) = book();
        book.reconcile(&good, 4);

        // The high-priority demand for two is gone; the cheaper demand for
        // three shrank to one.
        let rest = book.for_category(&good.category);
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].quantity(), 1);
        assert_eq!(rest[0].ceiling(&good), dec!(50));
    }

    #[test]
    fn lower_tiers_stay_untouched() {
        let (mut book, good) = book();
        book.reconcile(&good, 1);

        let rest = book.for_category(&good.category);
        assert_eq!(rest.len(), 2);
        assert_eq!(rest[0].quantity(), 1);
        assert_eq!(rest[1].quantity(), 3);
    }

    #[test]
    fn fully_covered_category_disappears() {
        let (mut book, good) = book();
        book.reconcile(&good, 5);
        assert!(book.is_empty());

        // Winning more than was wanted is fine too.
        let (mut book, good) = self::book();
        book.reconcile(&good, 99);
        assert!(book.is_empty());
    }

    #[test]
    fn equal_valuations_cover_in_insertion_order() {
        let mut book = DemandBook::new();
        book.push("books", Demand::at_price(1, dec!(50)));
        book.push("books", Demand::at_price(4, dec!(50)));
        let good = Good::new("books");
        book.reconcile(&good, 1);

        let rest = book.for_category(&good.category);
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].quantity(), 4);
    }

    #[test]
    fn valuations_see_the_concrete_good() {
        let mut book = DemandBook::new();
        // Values hardcovers double; the auctioned good decides the order in
        // which demands are covered.
        book.push(
            "books",
            Demand::new(1, |good: &Good| {
                if good.attributes["hardcover"] == serde_json::json!(true) {
                    dec!(80)
                } else {
                    dec!(40)
                }
            }),
        );
        book.push("books", Demand::at_price(1, dec!(60)));

        let hardcover =
            Good::new("books").with_attributes(serde_json::json!({"hardcover": true}));
        book.reconcile(&hardcover, 1);

        // The attribute-sensitive demand valued it highest and was covered.
        let rest = book.for_category(&hardcover.category);
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].ceiling(&hardcover), dec!(60));
    }

    #[test]
    fn other_categories_are_unaffected() {
        let (mut book, good) = book();
        book.push("stamps", Demand::at_price(7, dec!(5)));
        book.reconcile(&good, 99);
        assert_eq!(book.desired_quantity(&"stamps".into()), 7);
    }
}
