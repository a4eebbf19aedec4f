//! Property listing filters, sort orders and market statistics.
//!
//! The listing endpoint pushes the cheap equality filters (status, address
//! substring) down to the store and applies the rest here, in memory, over
//! whatever the store returned. The market summary is always computed over
//! the full unfiltered table.

use std::cmp::Reverse;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CoreError;
use crate::money::format_thousands;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Query value meaning "no bed filter".
pub const ANY_BEDS: &str = "Any";

/// Query value meaning "no status filter".
pub const ALL_STATUSES: &str = "all";

const ONE_MILLION: i64 = 1_000_000;
const TWO_MILLION: i64 = 2_000_000;
const MILLIS_PER_DAY: i64 = 86_400_000;

// ---------------------------------------------------------------------------
// Listing facts
// ---------------------------------------------------------------------------

/// The listing attributes the in-memory filters and statistics read.
///
/// Implemented by the stored property row so this module stays free of any
/// database types.
pub trait ListingFacts {
    fn price(&self) -> i64;
    fn beds(&self) -> Option<i64>;
    fn title(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn lifestyle_narrative(&self) -> Option<&str>;
    fn created_at(&self) -> Timestamp;
    fn last_updated(&self) -> Option<Timestamp>;

    /// Whole days between listing and last update, floored.
    fn days_on_market(&self) -> i64 {
        days_between(self.created_at(), self.last_updated())
    }
}

/// Whole days from `created` to `updated` (or zero when never updated).
pub fn days_between(created: Timestamp, updated: Option<Timestamp>) -> i64 {
    let updated = updated.unwrap_or(created);
    (updated - created)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_DAY)
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Parse the `beds` parameter (`"Any"`, `"3+"`, `"3"`) into a minimum.
pub fn parse_min_beds(raw: Option<&str>) -> Result<Option<i64>, CoreError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if raw.eq_ignore_ascii_case(ANY_BEDS) {
        return Ok(None);
    }

    raw.trim_end_matches('+')
        .parse::<i64>()
        .ok()
        .filter(|n| *n >= 0)
        .map(Some)
        .ok_or_else(|| CoreError::Validation(format!("Invalid beds filter '{raw}'")))
}

/// `status` values that mean "every status".
pub fn status_filter(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty() && *s != ALL_STATUSES)
}

/// Fixed price buckets offered by the listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceRange {
    Under1m,
    OneToTwo,
    Over2,
    #[default]
    Any,
}

impl PriceRange {
    /// Unknown values mean "no price filter".
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("under1m") => Self::Under1m,
            Some("1to2") => Self::OneToTwo,
            Some("over2") => Self::Over2,
            _ => Self::Any,
        }
    }

    /// Inclusive `(min, max)` bounds.
    pub fn bounds(self) -> (i64, i64) {
        match self {
            Self::Under1m => (0, ONE_MILLION),
            Self::OneToTwo => (ONE_MILLION, TWO_MILLION),
            Self::Over2 => (TWO_MILLION, i64::MAX),
            Self::Any => (0, i64::MAX),
        }
    }

    pub fn contains(self, price: i64) -> bool {
        let (min, max) = self.bounds();
        price >= min && price <= max
    }
}

/// Sort orders offered by the listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    PriceDesc,
    PriceAsc,
    Newest,
    /// Ascending by [`ListingFacts::days_on_market`]: whole days between
    /// `created_at` and `last_updated`, the same measure the market summary
    /// averages. It is not the age of the listing; a never-edited listing
    /// scores 0, and equal scores keep store order.
    DaysOnMarket,
}

impl SortOrder {
    /// `None` for absent or unknown values: the store order is kept.
    pub fn from_param(raw: Option<&str>) -> Option<Self> {
        match raw.map(str::trim)? {
            "price-desc" => Some(Self::PriceDesc),
            "price-asc" => Some(Self::PriceAsc),
            "newest" => Some(Self::Newest),
            "dom" => Some(Self::DaysOnMarket),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory filtering and sorting
// ---------------------------------------------------------------------------

/// Filters applied after the store query.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub min_beds: Option<i64>,
    pub price_range: PriceRange,
    /// Lower-cased search term.
    pub keyword: Option<String>,
}

impl ListingFilter {
    pub fn new(min_beds: Option<i64>, price_range: PriceRange, keyword: Option<&str>) -> Self {
        Self {
            min_beds,
            price_range,
            keyword: keyword
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_lowercase),
        }
    }

    pub fn matches<L: ListingFacts>(&self, listing: &L) -> bool {
        if let Some(min) = self.min_beds {
            if !listing.beds().is_some_and(|beds| beds >= min) {
                return false;
            }
        }

        if !self.price_range.contains(listing.price()) {
            return false;
        }

        if let Some(term) = &self.keyword {
            let hit = |text: Option<&str>| text.is_some_and(|t| t.to_lowercase().contains(term));
            if !(hit(Some(listing.title()))
                || hit(listing.description())
                || hit(listing.lifestyle_narrative()))
            {
                return false;
            }
        }

        true
    }

    pub fn apply<L: ListingFacts>(&self, listings: Vec<L>) -> Vec<L> {
        listings.into_iter().filter(|l| self.matches(l)).collect()
    }
}

/// Sort listings in place by one of the fixed orders.
pub fn sort_listings<L: ListingFacts>(listings: &mut [L], order: SortOrder) {
    match order {
        SortOrder::PriceDesc => listings.sort_by_key(|l| Reverse(l.price())),
        SortOrder::PriceAsc => listings.sort_by_key(|l| l.price()),
        SortOrder::Newest => listings.sort_by_key(|l| Reverse(l.created_at())),
        SortOrder::DaysOnMarket => listings.sort_by_key(|l| l.days_on_market()),
    }
}

// ---------------------------------------------------------------------------
// Market summary
// ---------------------------------------------------------------------------

/// Inventory statistics shown above the listing grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub inventory: usize,
    pub average_days_on_market: i64,
    /// `"$1850K"` style, or `"N/A"` when there are no priced listings.
    pub median_price: String,
    pub last_updated: String,
}

/// Summarise the full listing table.
///
/// The median is the element at `len / 2` of the sorted non-zero prices
/// (the upper median for even counts).
pub fn market_summary<L: ListingFacts>(listings: &[L], today: NaiveDate) -> MarketSummary {
    let inventory = listings.len();

    let average_days_on_market = if inventory == 0 {
        0
    } else {
        let total: i64 = listings.iter().map(ListingFacts::days_on_market).sum();
        (total as f64 / inventory as f64).round() as i64
    };

    let mut prices: Vec<i64> = listings
        .iter()
        .map(ListingFacts::price)
        .filter(|p| *p != 0)
        .collect();
    prices.sort_unstable();

    let median_price = prices
        .get(prices.len() / 2)
        .map(|p| format_thousands(*p))
        .unwrap_or_else(|| "N/A".to_string());

    MarketSummary {
        inventory,
        average_days_on_market,
        median_price,
        last_updated: today.format("%b %d, %Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    #[derive(Debug, Clone)]
    struct Listing {
        id: &'static str,
        price: i64,
        beds: Option<i64>,
        title: &'static str,
        description: Option<&'static str>,
        narrative: Option<&'static str>,
        created_at: Timestamp,
        last_updated: Option<Timestamp>,
    }

    impl ListingFacts for Listing {
        fn price(&self) -> i64 {
            self.price
        }
        fn beds(&self) -> Option<i64> {
            self.beds
        }
        fn title(&self) -> &str {
            self.title
        }
        fn description(&self) -> Option<&str> {
            self.description
        }
        fn lifestyle_narrative(&self) -> Option<&str> {
            self.narrative
        }
        fn created_at(&self) -> Timestamp {
            self.created_at
        }
        fn last_updated(&self) -> Option<Timestamp> {
            self.last_updated
        }
    }

    fn base() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 11, 1, 9, 0, 0).unwrap()
    }

    fn listing(id: &'static str, price: i64, beds: Option<i64>, created_days: i64, dom: i64) -> Listing {
        let created_at = base() + Duration::days(created_days);
        Listing {
            id,
            price,
            beds,
            title: "Listing",
            description: None,
            narrative: None,
            created_at,
            last_updated: Some(created_at + Duration::days(dom)),
        }
    }

    fn sample() -> Vec<Listing> {
        vec![
            listing("a", 1_850_000, Some(4), 0, 10),
            listing("b", 725_000, Some(2), 1, 3),
            listing("c", 2_450_000, Some(5), 2, 30),
            listing("d", 1_000_000, Some(3), 3, 0),
            listing("e", 950_000, None, 4, 7),
        ]
    }

    fn ids(listings: &[Listing]) -> Vec<&'static str> {
        listings.iter().map(|l| l.id).collect()
    }

    // -- parameters --

    #[test]
    fn beds_parameter_parsing() {
        assert_eq!(parse_min_beds(None).unwrap(), None);
        assert_eq!(parse_min_beds(Some("Any")).unwrap(), None);
        assert_eq!(parse_min_beds(Some("")).unwrap(), None);
        assert_eq!(parse_min_beds(Some("3+")).unwrap(), Some(3));
        assert_eq!(parse_min_beds(Some("2")).unwrap(), Some(2));
        assert_matches!(parse_min_beds(Some("lots")), Err(CoreError::Validation(_)));
        assert_matches!(parse_min_beds(Some("-1")), Err(CoreError::Validation(_)));
    }

    #[test]
    fn status_all_means_no_filter() {
        assert_eq!(status_filter(Some("all")), None);
        assert_eq!(status_filter(Some("")), None);
        assert_eq!(status_filter(Some("Featured")), Some("Featured"));
    }

    #[test]
    fn price_ranges_are_inclusive() {
        assert!(PriceRange::Under1m.contains(1_000_000));
        assert!(PriceRange::OneToTwo.contains(1_000_000));
        assert!(PriceRange::OneToTwo.contains(2_000_000));
        assert!(!PriceRange::OneToTwo.contains(2_000_001));
        assert!(PriceRange::Over2.contains(i64::MAX));
        assert_eq!(PriceRange::from_param(Some("bogus")), PriceRange::Any);
    }

    #[test]
    fn unknown_sort_is_none() {
        assert_eq!(SortOrder::from_param(Some("dom")), Some(SortOrder::DaysOnMarket));
        assert_eq!(SortOrder::from_param(Some("random")), None);
        assert_eq!(SortOrder::from_param(None), None);
    }

    // -- filtering --

    #[test]
    fn min_beds_keeps_only_rows_at_or_above() {
        let filter = ListingFilter::new(Some(3), PriceRange::Any, None);
        let kept = filter.apply(sample());
        assert_eq!(ids(&kept), vec!["a", "c", "d"]);
        assert!(kept.iter().all(|l| l.beds.unwrap() >= 3));
    }

    #[test]
    fn price_bucket_filter() {
        let filter = ListingFilter::new(None, PriceRange::Under1m, None);
        assert_eq!(ids(&filter.apply(sample())), vec!["b", "d", "e"]);
    }

    #[test]
    fn keyword_matches_any_text_field_case_insensitively() {
        let mut rows = sample();
        rows[0].title = "Modern Riverside Retreat";
        rows[1].description = Some("Steps from the RIVER trail");
        rows[2].narrative = Some("Quiet cul-de-sac");

        let filter = ListingFilter::new(None, PriceRange::Any, Some("  River "));
        assert_eq!(ids(&filter.apply(rows)), vec!["a", "b"]);
    }

    #[test]
    fn filters_combine() {
        let filter = ListingFilter::new(Some(4), PriceRange::OneToTwo, None);
        assert_eq!(ids(&filter.apply(sample())), vec!["a"]);
    }

    // -- sorting --

    #[test]
    fn price_asc_is_non_decreasing() {
        let mut rows = sample();
        sort_listings(&mut rows, SortOrder::PriceAsc);
        assert!(rows.windows(2).all(|w| w[0].price <= w[1].price));
    }

    #[test]
    fn price_desc_is_non_increasing() {
        let mut rows = sample();
        sort_listings(&mut rows, SortOrder::PriceDesc);
        assert!(rows.windows(2).all(|w| w[0].price >= w[1].price));
    }

    #[test]
    fn newest_first() {
        let mut rows = sample();
        sort_listings(&mut rows, SortOrder::Newest);
        assert_eq!(ids(&rows), vec!["e", "d", "c", "b", "a"]);
    }

    #[test]
    fn days_on_market_ascending() {
        let mut rows = sample();
        sort_listings(&mut rows, SortOrder::DaysOnMarket);
        assert_eq!(ids(&rows), vec!["d", "b", "e", "a", "c"]);
    }

    #[test]
    fn days_on_market_ties_keep_store_order() {
        let mut rows = vec![
            listing("old", 1, None, 90, 0),
            listing("edited", 1, None, 5, 2),
            listing("fresh", 1, None, 1, 0),
        ];
        sort_listings(&mut rows, SortOrder::DaysOnMarket);
        assert_eq!(ids(&rows), vec!["old", "fresh", "edited"]);
    }

    // -- market summary --

    #[test]
    fn days_between_floors_partial_days() {
        let created = base();
        assert_eq!(days_between(created, Some(created + Duration::hours(47))), 1);
        assert_eq!(days_between(created, None), 0);
    }

    #[test]
    fn summary_over_sample() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
        let summary = market_summary(&sample(), today);

        assert_eq!(summary.inventory, 5);
        // (10 + 3 + 30 + 0 + 7) / 5 = 10
        assert_eq!(summary.average_days_on_market, 10);
        // sorted: 725k, 950k, 1.0m, 1.85m, 2.45m -> index 2
        assert_eq!(summary.median_price, "$1000K");
        assert_eq!(summary.last_updated, "Nov 03, 2025");
    }

    #[test]
    fn summary_uses_upper_median_for_even_counts() {
        let rows = vec![
            listing("a", 400_000, None, 0, 0),
            listing("b", 600_000, None, 0, 0),
        ];
        let summary = market_summary(&rows, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(summary.median_price, "$600K");
    }

    #[test]
    fn summary_of_empty_table() {
        let rows: Vec<Listing> = Vec::new();
        let summary = market_summary(&rows, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(summary.inventory, 0);
        assert_eq!(summary.average_days_on_market, 0);
        assert_eq!(summary.median_price, "N/A");
    }

    #[test]
    fn summary_ignores_zero_prices_for_median() {
        let rows = vec![listing("a", 0, None, 0, 2), listing("b", 0, None, 0, 4)];
        let summary = market_summary(&rows, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(summary.inventory, 2);
        assert_eq!(summary.average_days_on_market, 3);
        assert_eq!(summary.median_price, "N/A");
    }

    #[test]
    fn summary_serializes_camel_case() {
        let summary = market_summary(&sample(), NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["inventory"], 5);
        assert_eq!(json["averageDaysOnMarket"], 10);
        assert_eq!(json["medianPrice"], "$1000K");
        assert_eq!(json["lastUpdated"], "Nov 03, 2025");
    }
}
