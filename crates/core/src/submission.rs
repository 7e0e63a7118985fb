//! Two-step gift submission wizard.
//!
//! Step 1 collects the gift details (title, description, image, price,
//! purchase link, tags); step 2 collects the facets (category, occasions,
//! recipients, interests). Advancing from step 1 and committing from step 2
//! each validate their step's fields and record one message per failing
//! field. Editing a field clears that field's message regardless of the new
//! value. Going back never validates.
//!
//! A successful commit builds a fresh [`GiftEntry`] from the draft, prepends
//! it to a copy of the store, and resets the wizard to an empty step 1.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{EntryStore, FacetDimension, GiftEntry, ReferenceCatalog};
use crate::error::CoreError;
use crate::price::parse_price;
use crate::types::{FacetId, GiftId, Timestamp};

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Wizard steps, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Details,
    Facets,
}

impl WizardStep {
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::Details),
            2 => Ok(Self::Facets),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be 1 or 2"
            ))),
        }
    }

    pub fn to_number(self) -> u8 {
        match self {
            Self::Details => 1,
            Self::Facets => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Details => "Gift details",
            Self::Facets => "Categories & tags",
        }
    }
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// Every editable draft field. Also the key type of [`FieldErrors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Title,
    Description,
    Image,
    Price,
    AffiliateLink,
    Tags,
    Category,
    Occasion,
    Recipient,
    Interests,
}

impl DraftField {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "image" => Ok(Self::Image),
            "price" => Ok(Self::Price),
            "affiliate_link" => Ok(Self::AffiliateLink),
            "tags" => Ok(Self::Tags),
            "category" => Ok(Self::Category),
            "occasion" => Ok(Self::Occasion),
            "recipient" => Ok(Self::Recipient),
            "interests" => Ok(Self::Interests),
            _ => Err(CoreError::Validation(format!("Unknown submission field '{s}'"))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Image => "image",
            Self::Price => "price",
            Self::AffiliateLink => "affiliate_link",
            Self::Tags => "tags",
            Self::Category => "category",
            Self::Occasion => "occasion",
            Self::Recipient => "recipient",
            Self::Interests => "interests",
        }
    }

    /// The step whose form shows this field.
    pub fn step(self) -> WizardStep {
        match self {
            Self::Title
            | Self::Description
            | Self::Image
            | Self::Price
            | Self::AffiliateLink
            | Self::Tags => WizardStep::Details,
            Self::Category | Self::Occasion | Self::Recipient | Self::Interests => {
                WizardStep::Facets
            }
        }
    }

    /// The facet dimension backing a step-2 field.
    fn dimension(self) -> Option<FacetDimension> {
        match self {
            Self::Category => Some(FacetDimension::Category),
            Self::Occasion => Some(FacetDimension::Occasion),
            Self::Recipient => Some(FacetDimension::Recipient),
            Self::Interests => Some(FacetDimension::Interest),
            _ => None,
        }
    }
}

/// A raw value from a form control: a text input or a multi-select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

/// One form edit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEdit {
    pub field: DraftField,
    pub value: FieldValue,
}

/// Most recent validation message per field.
pub type FieldErrors = BTreeMap<DraftField, String>;

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// An uncommitted entry under construction. Facet fields are raw id lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftEntry {
    pub title: String,
    pub description: String,
    pub image: String,
    /// Display price string; empty means "no price".
    pub price: String,
    pub affiliate_link: String,
    pub tags: Vec<String>,
    pub category: Option<FacetId>,
    pub occasions: Vec<FacetId>,
    pub recipients: Vec<FacetId>,
    pub interests: Vec<FacetId>,
}

impl DraftEntry {
    fn list_mut(&mut self, field: DraftField) -> Option<&mut Vec<String>> {
        match field {
            DraftField::Tags => Some(&mut self.tags),
            DraftField::Occasion => Some(&mut self.occasions),
            DraftField::Recipient => Some(&mut self.recipients),
            DraftField::Interests => Some(&mut self.interests),
            _ => None,
        }
    }

    fn text_mut(&mut self, field: DraftField) -> Option<&mut String> {
        match field {
            DraftField::Title => Some(&mut self.title),
            DraftField::Description => Some(&mut self.description),
            DraftField::Image => Some(&mut self.image),
            DraftField::Price => Some(&mut self.price),
            DraftField::AffiliateLink => Some(&mut self.affiliate_link),
            _ => None,
        }
    }

    fn facet_ids(&self, field: DraftField) -> Vec<&str> {
        match field {
            DraftField::Category => self.category.iter().map(String::as_str).collect(),
            DraftField::Occasion => self.occasions.iter().map(String::as_str).collect(),
            DraftField::Recipient => self.recipients.iter().map(String::as_str).collect(),
            DraftField::Interests => self.interests.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Validate the step-1 fields of `draft`.
pub fn validate_details(draft: &DraftEntry) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if is_blank(&draft.title) {
        errors.insert(DraftField::Title, "Gift title is required".to_string());
    }
    if is_blank(&draft.description) {
        errors.insert(DraftField::Description, "Description is required".to_string());
    }
    if is_blank(&draft.image) {
        errors.insert(DraftField::Image, "Image URL is required".to_string());
    }
    if is_blank(&draft.affiliate_link) {
        errors.insert(DraftField::AffiliateLink, "Purchase link is required".to_string());
    }
    if !is_blank(&draft.price) && parse_price(&draft.price).is_err() {
        errors.insert(
            DraftField::Price,
            "Price must be an amount such as '₺89' or '12.50'".to_string(),
        );
    }

    errors
}

/// Validate the step-2 fields of `draft` against the reference tables.
pub fn validate_facets(draft: &DraftEntry, references: &ReferenceCatalog) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if draft.category.as_deref().map_or(true, is_blank) {
        errors.insert(DraftField::Category, "Select a category".to_string());
    }
    if draft.occasions.is_empty() {
        errors.insert(DraftField::Occasion, "Select at least one occasion".to_string());
    }
    if draft.recipients.is_empty() {
        errors.insert(DraftField::Recipient, "Select at least one recipient type".to_string());
    }

    for field in [
        DraftField::Category,
        DraftField::Occasion,
        DraftField::Recipient,
        DraftField::Interests,
    ] {
        if errors.contains_key(&field) {
            continue;
        }
        let Some(dimension) = field.dimension() else {
            continue;
        };
        let unknown = draft
            .facet_ids(field)
            .into_iter()
            .find(|id| !references.contains(dimension, id));
        if let Some(id) = unknown {
            errors.insert(field, format!("Unknown {} '{id}'", dimension.as_str()));
        }
    }

    errors
}

/// Drop repeated ids, keeping first occurrences in order.
fn dedup_ids(ids: &[FacetId]) -> Vec<FacetId> {
    let mut out: Vec<FacetId> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(id) {
            out.push(id.clone());
        }
    }
    out
}

/// Trim each tag and drop blanks and repeats, keeping first occurrences.
fn normalize_tags(items: Vec<String>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let tag = item.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

// ---------------------------------------------------------------------------
// Wizard
// ---------------------------------------------------------------------------

/// Result of [`SubmissionWizard::commit`].
#[derive(Debug)]
#[must_use]
pub enum CommitOutcome {
    /// The entry was created; `store` holds it first. The wizard is reset.
    Committed { store: EntryStore, gift_id: GiftId },
    /// Validation failed; messages are on the wizard and the store is untouched.
    Blocked,
}

/// The submission flow's state: current step, draft, per-field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionWizard {
    step: WizardStep,
    draft: DraftEntry,
    errors: FieldErrors,
}

impl SubmissionWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &DraftEntry {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Apply a form edit and clear the field's recorded error.
    ///
    /// Text fields take [`FieldValue::Text`]; tag and facet-list fields take
    /// [`FieldValue::List`]. `category` accepts text (empty clears it). A tag
    /// list follows the same rules as [`Self::add_tag`].
    pub fn edit(&mut self, edit: FieldEdit) -> Result<(), CoreError> {
        let FieldEdit { field, value } = edit;
        match (field, value) {
            (DraftField::Category, FieldValue::Text(id)) => {
                self.draft.category = if is_blank(&id) { None } else { Some(id) };
            }
            (field, FieldValue::Text(text)) => {
                let slot = self.draft.text_mut(field).ok_or_else(|| {
                    CoreError::Validation(format!(
                        "Field '{}' expects a list of values",
                        field.as_str()
                    ))
                })?;
                *slot = text;
            }
            (DraftField::Tags, FieldValue::List(items)) => {
                self.draft.tags = normalize_tags(items);
            }
            (field, FieldValue::List(items)) => {
                let slot = self.draft.list_mut(field).ok_or_else(|| {
                    CoreError::Validation(format!(
                        "Field '{}' expects a single text value",
                        field.as_str()
                    ))
                })?;
                *slot = items;
            }
        }
        self.errors.remove(&field);
        Ok(())
    }

    /// Add a tag. Surrounding whitespace is trimmed; blank or repeated tags
    /// are ignored. Returns whether the tag was added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.draft.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.draft.tags.push(tag.to_string());
        self.errors.remove(&DraftField::Tags);
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.draft.tags.retain(|t| t != tag);
        self.errors.remove(&DraftField::Tags);
    }

    /// Select `id` in a facet field if absent, deselect it if present.
    ///
    /// For `category` this selects `id` as the single category, or clears
    /// it when `id` is already selected.
    pub fn toggle_selection(&mut self, field: DraftField, id: &str) -> Result<(), CoreError> {
        match field {
            DraftField::Category => {
                self.draft.category = match self.draft.category.as_deref() {
                    Some(current) if current == id => None,
                    _ => Some(id.to_string()),
                };
            }
            DraftField::Occasion | DraftField::Recipient | DraftField::Interests => {
                if let Some(ids) = self.draft.list_mut(field) {
                    match ids.iter().position(|s| s == id) {
                        Some(pos) => {
                            ids.remove(pos);
                        }
                        None => ids.push(id.to_string()),
                    }
                }
            }
            other => {
                return Err(CoreError::Validation(format!(
                    "Field '{}' is not a selectable facet",
                    other.as_str()
                )));
            }
        }
        self.errors.remove(&field);
        Ok(())
    }

    /// Move from step 1 to step 2 if the details validate.
    ///
    /// Replaces the error map with this validation's findings. Returns
    /// whether the wizard moved. Calling this on step 2 does nothing.
    pub fn advance(&mut self) -> bool {
        if self.step != WizardStep::Details {
            return false;
        }
        self.errors = validate_details(&self.draft);
        if self.errors.is_empty() {
            self.step = WizardStep::Facets;
            true
        } else {
            false
        }
    }

    /// Step back to 1 without validating. Recorded errors are kept.
    pub fn retreat(&mut self) {
        self.step = WizardStep::Details;
    }

    /// Discard the draft and start over.
    pub fn cancel(&mut self) {
        *self = Self::new();
    }

    /// Validate step 2 and, if it passes, create the entry.
    ///
    /// Only valid from step 2. If step-1 fields were blanked after
    /// advancing, the wizard returns to step 1 with those errors instead of
    /// committing.
    pub fn commit(&mut self, store: &EntryStore, submitter: &str, now: Timestamp) -> CommitOutcome {
        if self.step != WizardStep::Facets {
            return CommitOutcome::Blocked;
        }

        let detail_errors = validate_details(&self.draft);
        if !detail_errors.is_empty() {
            self.errors = detail_errors;
            self.step = WizardStep::Details;
            return CommitOutcome::Blocked;
        }

        self.errors = validate_facets(&self.draft, store.references());
        if !self.errors.is_empty() {
            return CommitOutcome::Blocked;
        }

        let gift_id = fresh_gift_id(store);
        let entry = self.assemble(gift_id.clone(), submitter, now);
        let store = store.with_prepended(entry);
        self.cancel();

        CommitOutcome::Committed { store, gift_id }
    }

    fn assemble(&self, id: GiftId, submitter: &str, now: Timestamp) -> GiftEntry {
        let draft = &self.draft;
        GiftEntry {
            id,
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            image: draft.image.trim().to_string(),
            // Already validated by `validate_details`.
            price: if is_blank(&draft.price) {
                None
            } else {
                parse_price(&draft.price).ok()
            },
            affiliate_link: draft.affiliate_link.trim().to_string(),
            submitted_by: submitter.to_string(),
            submitted_at: now,
            upvotes: 0,
            downvotes: 0,
            comments: Vec::new(),
            tags: draft.tags.clone(),
            category: draft.category.clone().unwrap_or_default(),
            occasions: dedup_ids(&draft.occasions),
            recipients: dedup_ids(&draft.recipients),
            interests: dedup_ids(&draft.interests),
            verified: false,
            featured: false,
        }
    }
}

/// A UUIDv7 string not already used by an entry in `store`.
fn fresh_gift_id(store: &EntryStore) -> GiftId {
    loop {
        let id = Uuid::now_v7().to_string();
        if !store.contains(&id) {
            return id;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
