//! In-memory catalog session shared by all handlers.
//!
//! Holds the single [`EntryStore`] and every open submission wizard. The
//! store is only ever replaced wholesale with the value a core operation
//! returns. When both locks are needed they are taken store first, then
//! wizards.

use std::collections::HashMap;

use tokio::sync::{RwLock, RwLockReadGuard};
use uuid::Uuid;

use giftreco_core::catalog::EntryStore;
use giftreco_core::error::CoreError;
use giftreco_core::submission::{CommitOutcome, SubmissionWizard};
use giftreco_core::types::{GiftId, Timestamp};
use giftreco_core::voting::{apply_vote, VoteDirection, VoteOutcome};

/// Entity name used in not-found errors for wizard sessions.
const SUBMISSION_ENTITY: &str = "Submission";

/// Result of [`CatalogSession::commit_wizard`].
#[derive(Debug, Clone)]
pub struct WizardCommit {
    /// Id of the created gift, or `None` if validation blocked the commit.
    pub gift_id: Option<GiftId>,
    /// The wizard after the attempt. On success this is the reset wizard
    /// and its session has already been closed.
    pub wizard: SubmissionWizard,
}

/// The entry store plus open submission wizards.
///
/// Thread-safe via interior `RwLock`s; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct CatalogSession {
    store: RwLock<EntryStore>,
    wizards: RwLock<HashMap<String, SubmissionWizard>>,
}

impl CatalogSession {
    pub fn new(store: EntryStore) -> Self {
        Self {
            store: RwLock::new(store),
            wizards: RwLock::new(HashMap::new()),
        }
    }

    /// Read access to the current store. Hold it only while deriving.
    pub async fn store(&self) -> RwLockReadGuard<'_, EntryStore> {
        self.store.read().await
    }

    /// Apply one vote and swap in the resulting store.
    pub async fn vote(&self, gift_id: &str, direction: VoteDirection) -> VoteOutcome {
        let mut store = self.store.write().await;
        let (next, outcome) = apply_vote(&store, gift_id, direction);
        *store = next;
        outcome
    }

    // -- Wizards --

    /// Open a fresh wizard on step 1, returning its session id.
    pub async fn open_wizard(&self) -> (String, SubmissionWizard) {
        let id = Uuid::now_v7().to_string();
        let wizard = SubmissionWizard::new();
        self.wizards
            .write()
            .await
            .insert(id.clone(), wizard.clone());
        (id, wizard)
    }

    /// Snapshot of one wizard.
    pub async fn wizard(&self, id: &str) -> Result<SubmissionWizard, CoreError> {
        self.wizards
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| wizard_not_found(id))
    }

    /// Run `f` against one wizard and return its result with the updated
    /// wizard.
    pub async fn update_wizard<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut SubmissionWizard) -> Result<T, CoreError>,
    ) -> Result<(T, SubmissionWizard), CoreError> {
        let mut wizards = self.wizards.write().await;
        let wizard = wizards.get_mut(id).ok_or_else(|| wizard_not_found(id))?;
        let value = f(&mut *wizard)?;
        Ok((value, wizard.clone()))
    }

    /// Commit one wizard's draft into the store.
    ///
    /// A successful commit closes the session. A blocked commit keeps it
    /// open so the caller can correct the recorded errors.
    pub async fn commit_wizard(
        &self,
        id: &str,
        submitter: &str,
        now: Timestamp,
    ) -> Result<WizardCommit, CoreError> {
        let mut store = self.store.write().await;
        let mut wizards = self.wizards.write().await;
        let wizard = wizards.get_mut(id).ok_or_else(|| wizard_not_found(id))?;

        let gift_id = match wizard.commit(&store, submitter, now) {
            CommitOutcome::Committed {
                store: next,
                gift_id,
            } => {
                *store = next;
                Some(gift_id)
            }
            CommitOutcome::Blocked => None,
        };

        let wizard = wizard.clone();
        if gift_id.is_some() {
            wizards.remove(id);
        }

        Ok(WizardCommit { gift_id, wizard })
    }

    /// Discard a wizard and its draft.
    pub async fn close_wizard(&self, id: &str) -> Result<(), CoreError> {
        self.wizards
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| wizard_not_found(id))
    }

    /// Number of open wizards.
    pub async fn wizard_count(&self) -> usize {
        self.wizards.read().await.len()
    }
}

fn wizard_not_found(id: &str) -> CoreError {
    CoreError::NotFound {
        entity: SUBMISSION_ENTITY,
        id: id.to_string(),
    }
}
