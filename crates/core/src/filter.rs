//! Facet filter engine.
//!
//! A [`FacetSelection`] is a conjunction across dimensions and a disjunction
//! within each dimension: an entry passes when, for every dimension with at
//! least one selected id, the entry carries one of those ids. An empty
//! dimension places no constraint. Entries without a price always pass the
//! price window.

use serde::{Deserialize, Serialize};

use crate::catalog::{FacetDimension, GiftEntry};
use crate::price::PriceRange;
use crate::types::FacetId;

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The filter panel's current choice of facet ids and price window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetSelection {
    pub categories: Vec<FacetId>,
    pub occasions: Vec<FacetId>,
    pub recipients: Vec<FacetId>,
    pub interests: Vec<FacetId>,
    pub price_range: Option<PriceRange>,
}

impl FacetSelection {
    pub fn selected(&self, dimension: FacetDimension) -> &[FacetId] {
        match dimension {
            FacetDimension::Category => &self.categories,
            FacetDimension::Occasion => &self.occasions,
            FacetDimension::Recipient => &self.recipients,
            FacetDimension::Interest => &self.interests,
        }
    }

    fn selected_mut(&mut self, dimension: FacetDimension) -> &mut Vec<FacetId> {
        match dimension {
            FacetDimension::Category => &mut self.categories,
            FacetDimension::Occasion => &mut self.occasions,
            FacetDimension::Recipient => &mut self.recipients,
            FacetDimension::Interest => &mut self.interests,
        }
    }

    /// Add `id` to the dimension if absent, remove it if present.
    pub fn toggle(&mut self, dimension: FacetDimension, id: &str) {
        let ids = self.selected_mut(dimension);
        match ids.iter().position(|s| s == id) {
            Some(pos) => {
                ids.remove(pos);
            }
            None => ids.push(id.to_string()),
        }
    }

    /// Drop every facet constraint and the price window.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn has_active_filters(&self) -> bool {
        self.active_filter_count() > 0
    }

    /// Selected ids across all dimensions, plus one for a price window.
    pub fn active_filter_count(&self) -> usize {
        FacetDimension::ALL
            .iter()
            .map(|d| self.selected(*d).len())
            .sum::<usize>()
            + usize::from(self.price_range.is_some())
    }

    /// Whether `entry` satisfies every active constraint.
    pub fn matches(&self, entry: &GiftEntry) -> bool {
        FacetDimension::ALL
            .iter()
            .all(|d| dimension_matches(self.selected(*d), entry.facet_ids(*d)))
            && self.price_matches(entry)
    }

    fn price_matches(&self, entry: &GiftEntry) -> bool {
        match (&self.price_range, &entry.price) {
            (Some(range), Some(price)) => range.contains(price.amount),
            _ => true,
        }
    }
}

fn dimension_matches(selected: &[FacetId], entry_ids: &[FacetId]) -> bool {
    selected.is_empty() || entry_ids.iter().any(|id| selected.contains(id))
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Keep the entries matching `selection`, in their original order.
///
/// Accepts any iterator of entry references, so the output of one call can
/// be fed straight into another.
pub fn filter_entries<'a, I>(entries: I, selection: &FacetSelection) -> Vec<&'a GiftEntry>
where
    I: IntoIterator<Item = &'a GiftEntry>,
{
    entries.into_iter().filter(|e| selection.matches(e)).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::entry;
    use crate::price::Price;

    fn ids(v: &[&str]) -> Vec<FacetId> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn priced(id: &str, amount: f64) -> GiftEntry {
        GiftEntry {
            price: Some(Price::new(amount, "₺")),
            ..entry(id)
        }
    }

    fn sample() -> Vec<GiftEntry> {
        vec![
            GiftEntry {
                category: "handmade".into(),
                occasions: ids(&["birthday", "mothers-day"]),
                recipients: ids(&["mom", "partner"]),
                interests: ids(&["cooking"]),
                ..priced("1", 89.0)
            },
            GiftEntry {
                category: "tech".into(),
                occasions: ids(&["new-job", "housewarming"]),
                recipients: ids(&["friend", "colleague"]),
                interests: ids(&["gardening", "reading"]),
                ..priced("2", 245.0)
            },
            GiftEntry {
                category: "home".into(),
                occasions: ids(&["birthday", "housewarming"]),
                recipients: ids(&["child", "teen"]),
                interests: Vec::new(),
                ..entry("3")
            },
        ]
    }

    fn result_ids(result: &[&GiftEntry]) -> Vec<String> {
        result.iter().map(|e| e.id.clone()).collect()
    }

    // -- identity --

    #[test]
    fn empty_selection_is_identity() {
        let entries = sample();
        let result = filter_entries(&entries, &FacetSelection::default());
        assert_eq!(result_ids(&result), ["1", "2", "3"]);
    }

    // -- per-dimension rules --

    #[test]
    fn category_is_single_valued_membership() {
        let entries = sample();
        let sel = FacetSelection {
            categories: ids(&["tech", "home"]),
            ..Default::default()
        };
        assert_eq!(result_ids(&filter_entries(&entries, &sel)), ["2", "3"]);
    }

    #[test]
    fn list_dimensions_match_on_any_shared_id() {
        let entries = sample();
        let sel = FacetSelection {
            occasions: ids(&["housewarming"]),
            ..Default::default()
        };
        assert_eq!(result_ids(&filter_entries(&entries, &sel)), ["2", "3"]);
    }

    #[test]
    fn dimensions_combine_with_and() {
        let entries = sample();
        let sel = FacetSelection {
            occasions: ids(&["birthday"]),
            recipients: ids(&["teen"]),
            ..Default::default()
        };
        assert_eq!(result_ids(&filter_entries(&entries, &sel)), ["3"]);
    }

    #[test]
    fn empty_interest_list_fails_interest_constraint() {
        let entries = sample();
        let sel = FacetSelection {
            interests: ids(&["cooking", "reading"]),
            ..Default::default()
        };
        assert_eq!(result_ids(&filter_entries(&entries, &sel)), ["1", "2"]);
    }

    #[test]
    fn unmatched_selection_yields_empty() {
        let entries = sample();
        let sel = FacetSelection {
            categories: ids(&["books"]),
            ..Default::default()
        };
        assert!(filter_entries(&entries, &sel).is_empty());
    }

    // -- price --

    #[test]
    fn priceless_entries_always_pass_price_window() {
        let entries = sample();
        let sel = FacetSelection {
            price_range: Some(PriceRange::new(Some(100.0), Some(250.0))),
            ..Default::default()
        };
        assert_eq!(result_ids(&filter_entries(&entries, &sel)), ["2", "3"]);
    }

    #[test]
    fn price_window_defaults_open_bounds() {
        let entries = vec![priced("cheap", 0.0), priced("luxury", 12_000.0)];
        let sel = FacetSelection {
            price_range: Some(PriceRange::default()),
            ..Default::default()
        };
        assert_eq!(result_ids(&filter_entries(&entries, &sel)), ["cheap"]);
    }

    // -- properties --

    #[test]
    fn filter_is_idempotent() {
        let entries = sample();
        let selections = [
            FacetSelection::default(),
            FacetSelection {
                occasions: ids(&["birthday"]),
                price_range: Some(PriceRange::new(None, Some(100.0))),
                ..Default::default()
            },
            FacetSelection {
                categories: ids(&["tech"]),
                interests: ids(&["reading"]),
                ..Default::default()
            },
        ];
        for sel in &selections {
            let once = filter_entries(&entries, sel);
            let twice = filter_entries(once.iter().copied(), sel);
            assert_eq!(once, twice);
        }
    }

    // -- selection editing --

    #[test]
    fn toggle_adds_then_removes() {
        let mut sel = FacetSelection::default();
        sel.toggle(FacetDimension::Occasion, "birthday");
        sel.toggle(FacetDimension::Occasion, "wedding");
        assert_eq!(sel.occasions, ids(&["birthday", "wedding"]));

        sel.toggle(FacetDimension::Occasion, "birthday");
        assert_eq!(sel.occasions, ids(&["wedding"]));
    }

    #[test]
    fn active_filter_count_includes_price_window() {
        let mut sel = FacetSelection::default();
        assert!(!sel.has_active_filters());

        sel.toggle(FacetDimension::Category, "tech");
        sel.toggle(FacetDimension::Interest, "music");
        sel.price_range = Some(PriceRange::new(Some(0.0), Some(50.0)));
        assert_eq!(sel.active_filter_count(), 3);

        sel.clear();
        assert_eq!(sel, FacetSelection::default());
        assert!(!sel.has_active_filters());
    }
}
