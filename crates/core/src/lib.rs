//! GiftReco domain core.
//!
//! Pure, synchronous logic for the community gift catalog: the entry store,
//! facet filtering, ranking, vote tallies, and the two-step submission
//! wizard. Nothing in this crate performs I/O, so every operation can be
//! driven directly from tests or from the HTTP adapter in `giftreco-api`.

pub mod catalog;
pub mod error;
pub mod filter;
pub mod price;
pub mod ranking;
pub mod seed;
pub mod submission;
pub mod types;
pub mod voting;
