//! Vote tally mutation.
//!
//! A vote only ever increments one counter on one entry. Repeat votes are
//! not de-duplicated and there is no retraction. A vote on an id the store
//! does not hold is a no-op.

use serde::{Deserialize, Serialize};

use crate::catalog::EntryStore;
use crate::error::CoreError;
use crate::types::GiftId;

/// Which counter a vote increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Upvote,
    Downvote,
}

impl VoteDirection {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "upvote" => Ok(Self::Upvote),
            "downvote" => Ok(Self::Downvote),
            _ => Err(CoreError::Validation(format!(
                "Invalid vote direction '{s}'. Must be one of: upvote, downvote"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upvote => "upvote",
            Self::Downvote => "downvote",
        }
    }
}

/// What happened to a vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VoteOutcome {
    Applied {
        gift_id: GiftId,
        upvotes: u32,
        downvotes: u32,
    },
    UnknownGift {
        gift_id: GiftId,
    },
}

impl VoteOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Apply one vote, returning the updated store and the outcome.
///
/// The input store is never modified. When `gift_id` is unknown the returned
/// store equals the input.
pub fn apply_vote(
    store: &EntryStore,
    gift_id: &str,
    direction: VoteDirection,
) -> (EntryStore, VoteOutcome) {
    let Some(index) = store.entries().iter().position(|e| e.id == gift_id) else {
        return (
            store.clone(),
            VoteOutcome::UnknownGift {
                gift_id: gift_id.to_string(),
            },
        );
    };

    let mut entries = store.entries().to_vec();
    let target = &mut entries[index];
    match direction {
        VoteDirection::Upvote => target.upvotes = target.upvotes.saturating_add(1),
        VoteDirection::Downvote => target.downvotes = target.downvotes.saturating_add(1),
    }
    let outcome = VoteOutcome::Applied {
        gift_id: target.id.clone(),
        upvotes: target.upvotes,
        downvotes: target.downvotes,
    };

    (store.with_replaced_entries(entries), outcome)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
