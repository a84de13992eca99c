//! Category and price-ceiling filtering of the event list.
//!
//! The pipeline keeps the input order. The category filter runs first, the
//! price filter second, and an event must pass both.

use crate::domain::{EventId, EventRecord, EventView};
use crate::marks::MarkSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Literal marking an event as free regardless of any listed prices.
pub const FREE_ADMISSION: &str = "Free admission.";

static PRICE_TOKEN: LazyLock<Option<regex::Regex>> =
    LazyLock::new(|| regex::Regex::new(r"\$(\d+)").ok());

/// Which marked subset of events to show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    /// Every event
    #[default]
    All,
    /// Only events the user liked
    Liked,
    /// Only events the user booked
    Booked,
}

impl CategoryFilter {
    /// Selector options in display order
    pub const OPTIONS: [Self; 3] = [Self::All, Self::Liked, Self::Booked];

    /// Selector label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Events",
            Self::Liked => "Liked Events",
            Self::Booked => "Booked Events",
        }
    }

    /// Whether an event passes this category given the user's marks
    #[must_use]
    pub fn admits(self, id: &EventId, likes: &MarkSet, bookings: &MarkSet) -> bool {
        match self {
            Self::All => true,
            Self::Liked => likes.is_marked(id),
            Self::Booked => bookings.is_marked(id),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Liked => "liked",
            Self::Booked => "booked",
        })
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "liked" => Ok(Self::Liked),
            "booked" => Ok(Self::Booked),
            other => Err(format!("unknown category filter: {other}")),
        }
    }
}

/// Upper bound on an event's cheapest listed price.
///
/// Zero is not a ceiling: it means "no price filter".
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct PriceCeiling(f64);

impl PriceCeiling {
    /// Builds a ceiling; zero and non-finite values yield `None`.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value != 0.0).then_some(Self(value))
    }

    /// Parses the price input box. Empty or unparsable input means no ceiling.
    ///
    /// ```
    /// use eventboard_core::filter::PriceCeiling;
    ///
    /// assert_eq!(PriceCeiling::parse(" 15 ").map(PriceCeiling::value), Some(15.0));
    /// assert_eq!(PriceCeiling::parse(""), None);
    /// assert_eq!(PriceCeiling::parse("0"), None);
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        input.trim().parse::<f64>().ok().and_then(Self::new)
    }

    /// The numeric bound
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Whether a price text fits under this ceiling.
    ///
    /// Free admission always fits. Otherwise the cheapest `$<digits>` token
    /// must not exceed the ceiling; text without tokens never fits.
    #[must_use]
    pub fn admits(self, price: &str) -> bool {
        is_free_admission(price) || min_price(price).is_some_and(|min| min <= self.0)
    }
}

/// Everything the user can narrow the event list by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Marked-subset selector
    pub category: CategoryFilter,
    /// Optional price ceiling
    pub price_ceiling: Option<PriceCeiling>,
}

impl FilterCriteria {
    /// Whether an event passes both filters
    #[must_use]
    pub fn admits<T: Listing + ?Sized>(
        &self,
        event: &T,
        likes: &MarkSet,
        bookings: &MarkSet,
    ) -> bool {
        self.category.admits(event.event_id(), likes, bookings)
            && self
                .price_ceiling
                .is_none_or(|ceiling| ceiling.admits(event.price_text()))
    }
}

/// Anything the pipeline can filter: it needs an identifier and a price text.
pub trait Listing {
    /// Document identifier
    fn event_id(&self) -> &EventId;

    /// Free-text price
    fn price_text(&self) -> &str;
}

impl Listing for EventRecord {
    fn event_id(&self) -> &EventId {
        &self.id
    }

    fn price_text(&self) -> &str {
        &self.price
    }
}

impl Listing for EventView {
    fn event_id(&self) -> &EventId {
        &self.record.id
    }

    fn price_text(&self) -> &str {
        &self.record.price
    }
}

/// Every `$<digits>` amount in a price text, in order of appearance.
///
/// Only whole dollars are read: `"$12.50"` yields `12`.
#[must_use]
pub fn price_tokens(price: &str) -> Vec<f64> {
    let Some(pattern) = PRICE_TOKEN.as_ref() else {
        return Vec::new();
    };
    pattern
        .captures_iter(price)
        .filter_map(|caps| caps.get(1))
        .filter_map(|digits| digits.as_str().parse::<f64>().ok())
        .collect()
}

/// Cheapest listed amount, or `None` when the text carries no tokens.
#[must_use]
pub fn min_price(price: &str) -> Option<f64> {
    price_tokens(price).into_iter().reduce(f64::min)
}

/// Whether the price text contains the free-admission marker
#[must_use]
pub fn is_free_admission(price: &str) -> bool {
    price.contains(FREE_ADMISSION)
}

/// Filter events, keeping the original order.
pub fn apply<'a, T: Listing>(
    events: &'a [T],
    likes: &MarkSet,
    bookings: &MarkSet,
    criteria: &FilterCriteria,
) -> Vec<&'a T> {
    events
        .iter()
        .filter(|event| criteria.admits(*event, likes, bookings))
        .collect()
}

/// Like [`apply`] but returns positions into `events`.
#[must_use]
pub fn apply_indices<T: Listing>(
    events: &[T],
    likes: &MarkSet,
    bookings: &MarkSet,
    criteria: &FilterCriteria,
) -> Vec<usize> {
    events
        .iter()
        .enumerate()
        .filter(|(_, event)| criteria.admits(*event, likes, bookings))
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LocationId;
    use proptest::prelude::*;

    fn event(id: &str, price: &str) -> EventRecord {
        EventRecord::new(EventId::new(id), id, LocationId::new("loc")).with_price(price)
    }

    fn ceiling(value: f64) -> FilterCriteria {
        FilterCriteria {
            category: CategoryFilter::All,
            price_ceiling: PriceCeiling::new(value),
        }
    }

    #[test]
    fn tokens_are_whole_dollar_amounts() {
        assert_eq!(price_tokens("$10 adults, $25 at the door"), vec![10.0, 25.0]);
        assert_eq!(price_tokens("$12.50"), vec![12.0]);
        assert!(price_tokens("HK 30").is_empty());
        assert_eq!(min_price("$40 / $15 / $22"), Some(15.0));
        assert_eq!(min_price("TBA"), None);
    }

    #[test]
    fn minimum_token_is_compared_against_ceiling() {
        let price = "$10, $25";
        assert!(PriceCeiling::new(15.0).is_some_and(|c| c.admits(price)));
        assert!(PriceCeiling::new(10.0).is_some_and(|c| c.admits(price)));
        assert!(!PriceCeiling::new(5.0).is_some_and(|c| c.admits(price)));
    }

    #[test]
    fn free_admission_beats_listed_prices() {
        let price = "Free admission. Donations of $50 welcome";
        assert!(PriceCeiling::new(1.0).is_some_and(|c| c.admits(price)));
    }

    #[test]
    fn tokenless_price_is_excluded() {
        assert!(!PriceCeiling::new(1000.0).is_some_and(|c| c.admits("Tickets at venue")));
        assert!(!PriceCeiling::new(1000.0).is_some_and(|c| c.admits("")));
    }

    #[test]
    fn zero_or_blank_ceiling_is_unset() {
        assert_eq!(PriceCeiling::new(0.0), None);
        assert_eq!(PriceCeiling::new(f64::NAN), None);
        assert_eq!(PriceCeiling::parse("   "), None);
        assert_eq!(PriceCeiling::parse("abc"), None);
    }

    #[test]
    fn unset_ceiling_keeps_tokenless_events() {
        let events = [event("1", "TBA")];
        let kept = apply(&events, &MarkSet::new(), &MarkSet::new(), &FilterCriteria::default());
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn liked_category_keeps_marked_subsequence_in_order() {
        let events = [event("1", ""), event("2", ""), event("3", ""), event("4", "")];
        let mut likes: MarkSet = [EventId::new("4"), EventId::new("2")].into_iter().collect();
        likes.set(EventId::new("3"), false);
        let criteria = FilterCriteria {
            category: CategoryFilter::Liked,
            price_ceiling: None,
        };

        let kept: Vec<&str> = apply(&events, &likes, &MarkSet::new(), &criteria)
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();

        assert_eq!(kept, vec!["2", "4"]);
    }

    #[test]
    fn booked_category_reads_booking_marks() {
        let events = [event("1", ""), event("2", "")];
        let likes: MarkSet = std::iter::once(EventId::new("1")).collect();
        let bookings: MarkSet = std::iter::once(EventId::new("2")).collect();
        let criteria = FilterCriteria {
            category: CategoryFilter::Booked,
            price_ceiling: None,
        };

        assert_eq!(apply_indices(&events, &likes, &bookings, &criteria), vec![1]);
    }

    #[test]
    fn category_and_price_compose() {
        let events = [event("1", "$5"), event("2", "$50"), event("3", "$5")];
        let likes: MarkSet = [EventId::new("1"), EventId::new("2")].into_iter().collect();
        let criteria = FilterCriteria {
            category: CategoryFilter::Liked,
            price_ceiling: PriceCeiling::new(10.0),
        };

        assert_eq!(apply_indices(&events, &likes, &MarkSet::new(), &criteria), vec![0]);
    }

    #[test]
    fn cheap_paid_event_dropped_free_event_kept() {
        let events = [event("1", "$20"), event("2", FREE_ADMISSION)];

        let kept = apply(&events, &MarkSet::new(), &MarkSet::new(), &ceiling(15.0));

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id.as_str(), "2");
    }

    #[test]
    fn category_parses_selector_values() {
        for option in CategoryFilter::OPTIONS {
            assert_eq!(option.to_string().parse::<CategoryFilter>(), Ok(option));
        }
        assert!("popular".parse::<CategoryFilter>().is_err());
    }

    proptest! {
        #[test]
        fn free_admission_passes_any_ceiling(value in 0.01f64..10_000.0, prefix in "[a-zA-Z ]{0,12}") {
            let price = format!("{prefix}{FREE_ADMISSION}");
            let ceiling = PriceCeiling::new(value);
            prop_assert!(ceiling.is_some_and(|c| c.admits(&price)));
        }

        #[test]
        fn filtered_output_is_ordered_subsequence(
            prices in proptest::collection::vec(0u32..100, 0..40),
            bound in 1u32..100,
        ) {
            let events: Vec<EventRecord> = prices
                .iter()
                .enumerate()
                .map(|(i, p)| event(&i.to_string(), &format!("${p}")))
                .collect();

            let kept = apply_indices(&events, &MarkSet::new(), &MarkSet::new(), &ceiling(f64::from(bound)));

            prop_assert!(kept.windows(2).all(|w| w[0] < w[1]));
            for (i, p) in prices.iter().enumerate() {
                prop_assert_eq!(kept.contains(&i), *p <= bound);
            }
        }
    }
}
