//! Query parameter types for the browse endpoint.
//!
//! The filter panel sends each facet dimension as a comma-separated id list
//! (`?category=tech,home&occasion=birthday`). These are turned into a core
//! [`FacetSelection`] and [`SortStrategy`] here so handlers stay thin.

use serde::Deserialize;

use giftreco_core::error::CoreError;
use giftreco_core::filter::FacetSelection;
use giftreco_core::price::PriceRange;
use giftreco_core::ranking::SortStrategy;
use giftreco_core::types::FacetId;

/// `GET /gifts` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct GiftListParams {
    pub category: Option<String>,
    pub occasion: Option<String>,
    pub recipient: Option<String>,
    pub interests: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<String>,
}

impl GiftListParams {
    /// The facet selection these parameters describe.
    ///
    /// A price window is set when either bound is given; the missing bound
    /// falls back to the core defaults.
    pub fn selection(&self) -> FacetSelection {
        let price_range = match (self.min_price, self.max_price) {
            (None, None) => None,
            (min, max) => Some(PriceRange::new(min, max)),
        };

        FacetSelection {
            categories: split_ids(self.category.as_deref()),
            occasions: split_ids(self.occasion.as_deref()),
            recipients: split_ids(self.recipient.as_deref()),
            interests: split_ids(self.interests.as_deref()),
            price_range,
        }
    }

    /// The requested ordering, defaulting to newest first.
    pub fn sort_strategy(&self) -> Result<SortStrategy, CoreError> {
        match self.sort.as_deref().map(str::trim) {
            None | Some("") => Ok(SortStrategy::default()),
            Some(key) => SortStrategy::parse(key),
        }
    }
}

/// Split a comma-separated id list, dropping blanks.
fn split_ids(raw: Option<&str>) -> Vec<FacetId> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
