//! Ranking engine and the browse derivation.
//!
//! Every strategy is a stable descending or ascending sort on a single key,
//! so entries with equal keys keep their input order.

use std::borrow::Borrow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::{EntryStore, GiftEntry};
use crate::error::CoreError;
use crate::filter::{filter_entries, FacetSelection};

// ---------------------------------------------------------------------------
// Sort strategy
// ---------------------------------------------------------------------------

/// How many net-score points one comment is worth in the trending score.
pub const TRENDING_COMMENT_WEIGHT: i64 = 2;

/// The display orderings offered by the browse view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortStrategy {
    #[default]
    Newest,
    Popular,
    Trending,
    PriceLow,
    PriceHigh,
}

impl SortStrategy {
    pub const ALL: [SortStrategy; 5] = [
        Self::Newest,
        Self::Popular,
        Self::Trending,
        Self::PriceLow,
        Self::PriceHigh,
    ];

    /// Parse a sort key as sent by clients.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "newest" => Ok(Self::Newest),
            "popular" => Ok(Self::Popular),
            "trending" => Ok(Self::Trending),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            _ => Err(CoreError::Validation(format!(
                "Invalid sort '{s}'. Must be one of: newest, popular, trending, price-low, price-high"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Popular => "popular",
            Self::Trending => "trending",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
        }
    }
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// Net score plus `weight` points per comment. No time decay.
pub fn trending_score_with_weight(entry: &GiftEntry, weight: i64) -> i64 {
    let comments = i64::try_from(entry.comment_count()).unwrap_or(i64::MAX);
    entry.net_score().saturating_add(weight.saturating_mul(comments))
}

pub fn trending_score(entry: &GiftEntry) -> i64 {
    trending_score_with_weight(entry, TRENDING_COMMENT_WEIGHT)
}

/// Price used for ordering. Entries without a price sort as 0.
fn sort_price(entry: &GiftEntry) -> f64 {
    entry.price.as_ref().map_or(0.0, |p| p.amount)
}

fn compare(a: &GiftEntry, b: &GiftEntry, strategy: SortStrategy) -> Ordering {
    match strategy {
        SortStrategy::Newest => b.submitted_at.cmp(&a.submitted_at),
        SortStrategy::Popular => b.net_score().cmp(&a.net_score()),
        SortStrategy::Trending => trending_score(b).cmp(&trending_score(a)),
        SortStrategy::PriceLow => sort_price(a).total_cmp(&sort_price(b)),
        SortStrategy::PriceHigh => sort_price(b).total_cmp(&sort_price(a)),
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Stable in-place sort by `strategy`.
///
/// Works on owned entries or on references, so it composes with
/// [`filter_entries`].
pub fn sort_entries<E: Borrow<GiftEntry>>(entries: &mut [E], strategy: SortStrategy) {
    entries.sort_by(|a, b| compare(a.borrow(), b.borrow(), strategy));
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Filter the store by `selection`, then order the survivors by `strategy`.
pub fn derive_visible<'a>(
    store: &'a EntryStore,
    selection: &FacetSelection,
    strategy: SortStrategy,
) -> Vec<&'a GiftEntry> {
    let mut visible = filter_entries(store.entries(), selection);
    sort_entries(&mut visible, strategy);
    visible
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use crate::catalog::tests::entry;
    use crate::catalog::{Comment, ReferenceCatalog};
    use crate::price::Price;

    fn scored(id: &str, up: u32, down: u32) -> GiftEntry {
        GiftEntry {
            upvotes: up,
            downvotes: down,
            ..entry(id)
        }
    }

    fn with_comments(mut e: GiftEntry, n: usize) -> GiftEntry {
        e.comments = (0..n)
            .map(|i| Comment {
                id: format!("c{i}"),
                author: "2".to_string(),
                content: "Nice".to_string(),
                date: Utc.with_ymd_and_hms(2024, 11, 20, 0, 0, 0).unwrap(),
                upvotes: 0,
                downvotes: 0,
                replies: Vec::new(),
            })
            .collect();
        e
    }

    fn ids(entries: &[&GiftEntry]) -> Vec<String> {
        entries.iter().map(|e| e.id.clone()).collect()
    }

    // -- SortStrategy --

    #[test]
    fn strategy_parse_roundtrip() {
        for strategy in SortStrategy::ALL {
            assert_eq!(SortStrategy::parse(strategy.as_str()).unwrap(), strategy);
        }
    }

    #[test]
    fn strategy_parse_rejects_unknown() {
        assert_matches!(SortStrategy::parse("oldest"), Err(CoreError::Validation(_)));
        assert_matches!(SortStrategy::parse(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn strategy_serde_uses_kebab_keys() {
        assert_eq!(
            serde_json::to_string(&SortStrategy::PriceHigh).unwrap(),
            "\"price-high\""
        );
        assert_eq!(SortStrategy::default(), SortStrategy::Newest);
    }

    // -- popular --

    #[test]
    fn popular_keeps_ties_in_input_order() {
        let entries = [scored("x", 5, 0), scored("y", 0, 1), scored("z", 6, 1)];
        let mut refs: Vec<&GiftEntry> = entries.iter().collect();
        sort_entries(&mut refs, SortStrategy::Popular);
        assert_eq!(ids(&refs), ["x", "z", "y"]);
    }

    // -- newest --

    #[test]
    fn newest_orders_by_timestamp_descending() {
        let mut old = entry("old");
        old.submitted_at = Utc.with_ymd_and_hms(2024, 11, 10, 0, 0, 0).unwrap();
        let mut new = entry("new");
        new.submitted_at = Utc.with_ymd_and_hms(2024, 11, 15, 0, 0, 0).unwrap();
        let mut entries = vec![old, new];
        sort_entries(&mut entries, SortStrategy::Newest);
        assert_eq!(entries[0].id, "new");
    }

    #[test]
    fn newest_keeps_same_timestamp_in_input_order() {
        let entries = [entry("p"), entry("q"), entry("r")];
        let mut refs: Vec<&GiftEntry> = entries.iter().collect();
        sort_entries(&mut refs, SortStrategy::Newest);
        assert_eq!(ids(&refs), ["p", "q", "r"]);
    }

    // -- trending --

    #[test]
    fn trending_keeps_equal_scores_in_input_order() {
        // 4 + 2*1 == 6 + 0 == 2 + 2*2
        let entries = [
            with_comments(scored("one", 4, 0), 1),
            scored("two", 6, 0),
            scored("low", 1, 0),
            with_comments(scored("three", 2, 0), 2),
        ];
        let mut refs: Vec<&GiftEntry> = entries.iter().collect();
        sort_entries(&mut refs, SortStrategy::Trending);
        assert_eq!(ids(&refs), ["one", "two", "three", "low"]);
    }

    #[test]
    fn trending_weights_comments_double() {
        let quiet = scored("quiet", 10, 0);
        let chatty = with_comments(scored("chatty", 5, 0), 3);
        assert_eq!(trending_score(&quiet), 10);
        assert_eq!(trending_score(&chatty), 11);

        let mut entries = vec![quiet, chatty];
        sort_entries(&mut entries, SortStrategy::Trending);
        assert_eq!(entries[0].id, "chatty");
    }

    #[test]
    fn trending_weight_is_tunable() {
        let chatty = with_comments(scored("chatty", 1, 0), 4);
        assert_eq!(trending_score_with_weight(&chatty, 0), 1);
        assert_eq!(trending_score_with_weight(&chatty, 5), 21);
    }

    // -- price --

    #[test]
    fn price_low_treats_missing_price_as_zero() {
        let a = GiftEntry {
            price: Some(Price::new(65.0, "₺")),
            ..entry("a")
        };
        let b = entry("b");
        let c = GiftEntry {
            price: Some(Price::new(12.5, "₺")),
            ..entry("c")
        };
        let mut entries = vec![a, b, c];
        sort_entries(&mut entries, SortStrategy::PriceLow);
        let order: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(order, ["b", "c", "a"]);

        sort_entries(&mut entries, SortStrategy::PriceHigh);
        let order: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(order, ["a", "c", "b"]);
    }

    #[test]
    fn price_sorts_keep_ties_in_input_order() {
        let priced = |id: &str, amount: f64| GiftEntry {
            price: Some(Price::new(amount, "₺")),
            ..entry(id)
        };
        // "none" has no price, so it ties with the explicit zero.
        let entries = [
            priced("zero", 0.0),
            priced("mid-a", 50.0),
            entry("none"),
            priced("mid-b", 50.0),
        ];

        let mut refs: Vec<&GiftEntry> = entries.iter().collect();
        sort_entries(&mut refs, SortStrategy::PriceLow);
        assert_eq!(ids(&refs), ["zero", "none", "mid-a", "mid-b"]);

        let mut refs: Vec<&GiftEntry> = entries.iter().collect();
        sort_entries(&mut refs, SortStrategy::PriceHigh);
        assert_eq!(ids(&refs), ["mid-a", "mid-b", "zero", "none"]);
    }

    // -- properties --

    #[test]
    fn sort_is_a_permutation_for_every_strategy() {
        let entries = vec![
            scored("a", 3, 1),
            with_comments(scored("b", 0, 2), 2),
            GiftEntry {
                price: Some(Price::new(20.0, "₺")),
                ..scored("c", 3, 1)
            },
        ];
        for strategy in SortStrategy::ALL {
            let mut refs: Vec<&GiftEntry> = entries.iter().collect();
            sort_entries(&mut refs, strategy);
            let mut got = ids(&refs);
            got.sort();
            assert_eq!(got, ["a", "b", "c"], "strategy {}", strategy.as_str());
        }
    }

    // -- derive_visible --

    #[test]
    fn derive_filters_then_sorts() {
        let a = GiftEntry {
            category: "handmade".into(),
            ..scored("A", 47, 3)
        };
        let b = GiftEntry {
            category: "tech".into(),
            ..scored("B", 32, 1)
        };
        let c = GiftEntry {
            category: "handmade".into(),
            ..scored("C", 28, 2)
        };
        let store = EntryStore::with_entries(ReferenceCatalog::default(), vec![c, b, a]);
        let selection = FacetSelection {
            categories: vec!["handmade".to_string()],
            ..Default::default()
        };

        let visible = derive_visible(&store, &selection, SortStrategy::Trending);
        assert_eq!(ids(&visible), ["A", "C"]);
    }
}
