//! Entry store and reference collections.
//!
//! [`EntryStore`] is the single owner of every [`GiftEntry`]. Facet fields on
//! an entry hold plain ids; the [`ReferenceCatalog`] passed alongside the
//! entries resolves those ids to display descriptors. There are no global
//! lookup tables.

use serde::{Deserialize, Serialize};

use crate::price::Price;
use crate::types::{FacetId, GiftId, Timestamp, UserId};

// ---------------------------------------------------------------------------
// Facet descriptors
// ---------------------------------------------------------------------------

/// The four filterable facet dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetDimension {
    Category,
    Occasion,
    Recipient,
    Interest,
}

impl FacetDimension {
    pub const ALL: [FacetDimension; 4] = [
        Self::Category,
        Self::Occasion,
        Self::Recipient,
        Self::Interest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Occasion => "occasion",
            Self::Recipient => "recipient",
            Self::Interest => "interest",
        }
    }
}

/// Anything that can be looked up by facet id.
pub trait FacetDescriptor {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: FacetId,
    pub name: String,
    pub icon: String,
    /// Presentation hint (badge colour class) carried through untouched.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occasion {
    pub id: FacetId,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: FacetId,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interest {
    pub id: FacetId,
    pub name: String,
    pub icon: String,
}

macro_rules! impl_facet_descriptor {
    ($($ty:ty),+) => {
        $(impl FacetDescriptor for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })+
    };
}

/// A community achievement shown next to a member's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: FacetId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
}

impl_facet_descriptor!(Category, Occasion, Recipient, Interest, Badge);

/// Find a descriptor by id in an insertion-ordered table.
fn lookup<'a, T: FacetDescriptor>(table: &'a [T], id: &str) -> Option<&'a T> {
    table.iter().find(|d| d.id() == id)
}

// ---------------------------------------------------------------------------
// Users and comments
// ---------------------------------------------------------------------------

/// A community member who submits gifts and comments.
///
/// `badges` holds [`Badge`] ids; the counters are profile statistics carried
/// as-is and are not recomputed from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub join_date: Timestamp,
    pub points: u32,
    #[serde(default)]
    pub badges: Vec<FacetId>,
    #[serde(default)]
    pub submitted_gifts: u32,
    #[serde(default)]
    pub helpful_votes: u32,
}

/// A comment on a gift. Replies nest one comment tree per top-level comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author: UserId,
    pub content: String,
    pub date: Timestamp,
    pub upvotes: u32,
    pub downvotes: u32,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

// ---------------------------------------------------------------------------
// Reference catalog
// ---------------------------------------------------------------------------

/// Lookup tables that resolve facet ids (and submitter ids) to descriptors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCatalog {
    pub categories: Vec<Category>,
    pub occasions: Vec<Occasion>,
    pub recipients: Vec<Recipient>,
    pub interests: Vec<Interest>,
    #[serde(default)]
    pub badges: Vec<Badge>,
    pub users: Vec<User>,
}

impl ReferenceCatalog {
    pub fn category(&self, id: &str) -> Option<&Category> {
        lookup(&self.categories, id)
    }

    pub fn occasion(&self, id: &str) -> Option<&Occasion> {
        lookup(&self.occasions, id)
    }

    pub fn recipient(&self, id: &str) -> Option<&Recipient> {
        lookup(&self.recipients, id)
    }

    pub fn interest(&self, id: &str) -> Option<&Interest> {
        lookup(&self.interests, id)
    }

    pub fn badge(&self, id: &str) -> Option<&Badge> {
        lookup(&self.badges, id)
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// A member with their badge ids resolved. Unknown badge ids are skipped.
    pub fn resolve_user<'a>(&'a self, id: &str) -> Option<ResolvedUser<'a>> {
        let user = self.user(id)?;
        Some(ResolvedUser {
            user,
            badges: user.badges.iter().filter_map(|b| self.badge(b)).collect(),
        })
    }

    /// Whether `id` names a known descriptor in `dimension`.
    pub fn contains(&self, dimension: FacetDimension, id: &str) -> bool {
        match dimension {
            FacetDimension::Category => self.category(id).is_some(),
            FacetDimension::Occasion => self.occasion(id).is_some(),
            FacetDimension::Recipient => self.recipient(id).is_some(),
            FacetDimension::Interest => self.interest(id).is_some(),
        }
    }

    /// Resolve an entry's facet ids to descriptors for display.
    ///
    /// Ids with no matching descriptor are skipped (or `None` for the single
    /// category).
    pub fn resolve<'a>(&'a self, entry: &'a GiftEntry) -> ResolvedGift<'a> {
        ResolvedGift {
            entry,
            net_score: entry.net_score(),
            comment_count: entry.comment_count(),
            submitter: self.resolve_user(&entry.submitted_by),
            category: self.category(&entry.category),
            occasions: entry.occasions.iter().filter_map(|id| self.occasion(id)).collect(),
            recipients: entry.recipients.iter().filter_map(|id| self.recipient(id)).collect(),
            interests: entry.interests.iter().filter_map(|id| self.interest(id)).collect(),
        }
    }
}

/// A member together with their resolved badges.
#[derive(Debug, Serialize)]
pub struct ResolvedUser<'a> {
    #[serde(flatten)]
    pub user: &'a User,
    #[serde(rename = "badge_info")]
    pub badges: Vec<&'a Badge>,
}

/// An entry together with its resolved facet descriptors.
#[derive(Debug, Serialize)]
pub struct ResolvedGift<'a> {
    #[serde(flatten)]
    pub entry: &'a GiftEntry,
    pub net_score: i64,
    pub comment_count: usize,
    pub submitter: Option<ResolvedUser<'a>>,
    #[serde(rename = "category_info")]
    pub category: Option<&'a Category>,
    #[serde(rename = "occasion_info")]
    pub occasions: Vec<&'a Occasion>,
    #[serde(rename = "recipient_info")]
    pub recipients: Vec<&'a Recipient>,
    #[serde(rename = "interest_info")]
    pub interests: Vec<&'a Interest>,
}

// ---------------------------------------------------------------------------
// Gift entry
// ---------------------------------------------------------------------------

/// A community-submitted gift suggestion.
///
/// Only the vote counters change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftEntry {
    pub id: GiftId,
    pub title: String,
    pub description: String,
    pub image: String,
    pub price: Option<Price>,
    pub affiliate_link: String,
    pub submitted_by: UserId,
    pub submitted_at: Timestamp,
    pub upvotes: u32,
    pub downvotes: u32,
    pub comments: Vec<Comment>,
    pub tags: Vec<String>,
    pub category: FacetId,
    pub occasions: Vec<FacetId>,
    pub recipients: Vec<FacetId>,
    pub interests: Vec<FacetId>,
    pub verified: bool,
    pub featured: bool,
}

impl GiftEntry {
    /// Upvotes minus downvotes; may be negative.
    pub fn net_score(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }

    /// Top-level comments only; replies are not counted.
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    /// The entry's ids along `dimension`. The single category is returned as
    /// a one-element slice.
    pub fn facet_ids(&self, dimension: FacetDimension) -> &[FacetId] {
        match dimension {
            FacetDimension::Category => std::slice::from_ref(&self.category),
            FacetDimension::Occasion => &self.occasions,
            FacetDimension::Recipient => &self.recipients,
            FacetDimension::Interest => &self.interests,
        }
    }
}

// ---------------------------------------------------------------------------
// Entry store
// ---------------------------------------------------------------------------

/// The in-memory gift collection plus its reference tables.
///
/// Entries are kept newest-submission-first: commits prepend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryStore {
    entries: Vec<GiftEntry>,
    references: ReferenceCatalog,
}

impl EntryStore {
    /// An empty store over the given reference tables.
    pub fn new(references: ReferenceCatalog) -> Self {
        Self {
            entries: Vec::new(),
            references,
        }
    }

    /// Bootstrap a store with pre-existing entries (seed data).
    pub fn with_entries(references: ReferenceCatalog, entries: Vec<GiftEntry>) -> Self {
        Self {
            entries,
            references,
        }
    }

    pub fn entries(&self) -> &[GiftEntry] {
        &self.entries
    }

    pub fn references(&self) -> &ReferenceCatalog {
        &self.references
    }

    pub fn get(&self, id: &str) -> Option<&GiftEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A copy of this store with `entry` placed first.
    pub(crate) fn with_prepended(&self, entry: GiftEntry) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.push(entry);
        entries.extend(self.entries.iter().cloned());
        Self {
            entries,
            references: self.references.clone(),
        }
    }

    /// A copy of this store with `entries` swapped in for the collection.
    pub(crate) fn with_replaced_entries(&self, entries: Vec<GiftEntry>) -> Self {
        Self {
            entries,
            references: self.references.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Minimal entry for tests; callers override the fields they care about.
    pub(crate) fn entry(id: &str) -> GiftEntry {
        GiftEntry {
            id: id.to_string(),
            title: format!("Gift {id}"),
            description: "A thoughtful present".to_string(),
            image: "https://example.com/gift.jpg".to_string(),
            price: None,
            affiliate_link: "https://example.com/buy".to_string(),
            submitted_by: "1".to_string(),
            submitted_at: chrono::Utc.with_ymd_and_hms(2024, 11, 1, 0, 0, 0).unwrap(),
            upvotes: 0,
            downvotes: 0,
            comments: Vec::new(),
            tags: Vec::new(),
            category: "handmade".to_string(),
            occasions: vec!["birthday".to_string()],
            recipients: vec!["mom".to_string()],
            interests: Vec::new(),
            verified: false,
            featured: false,
        }
    }

    fn occasion(id: &str) -> Occasion {
        Occasion {
            id: id.to_string(),
            name: id.to_uppercase(),
            icon: String::new(),
        }
    }

    #[test]
    fn net_score_can_go_negative() {
        let mut e = entry("a");
        e.upvotes = 1;
        e.downvotes = 4;
        assert_eq!(e.net_score(), -3);
    }

    #[test]
    fn facet_ids_wraps_single_category() {
        let e = entry("a");
        assert_eq!(e.facet_ids(FacetDimension::Category), ["handmade".to_string()]);
        assert_eq!(e.facet_ids(FacetDimension::Occasion), ["birthday".to_string()]);
        assert!(e.facet_ids(FacetDimension::Interest).is_empty());
    }

    #[test]
    fn resolve_skips_unknown_ids() {
        let refs = ReferenceCatalog {
            occasions: vec![occasion("birthday")],
            ..Default::default()
        };
        let mut e = entry("a");
        e.occasions.push("unknown".to_string());

        let resolved = refs.resolve(&e);
        assert_eq!(resolved.occasions.len(), 1);
        assert_eq!(resolved.occasions[0].name, "BIRTHDAY");
        assert!(resolved.category.is_none());
        assert!(resolved.submitter.is_none());
    }

    fn badge(id: &str) -> Badge {
        Badge {
            id: id.to_string(),
            name: format!("Badge {id}"),
            description: String::new(),
            icon: String::new(),
            color: String::new(),
        }
    }

    fn member(id: &str, badges: &[&str]) -> User {
        User {
            id: id.to_string(),
            username: format!("user_{id}"),
            email: format!("user{id}@example.com"),
            avatar: None,
            join_date: chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            points: 0,
            badges: badges.iter().map(|b| b.to_string()).collect(),
            submitted_gifts: 0,
            helpful_votes: 0,
        }
    }

    fn comment(id: &str, replies: Vec<Comment>) -> Comment {
        Comment {
            id: id.to_string(),
            author: "1".to_string(),
            content: "Lovely".to_string(),
            date: chrono::Utc.with_ymd_and_hms(2024, 11, 2, 0, 0, 0).unwrap(),
            upvotes: 0,
            downvotes: 0,
            replies,
        }
    }

    #[test]
    fn resolve_attaches_submitter_badges_in_user_order() {
        let refs = ReferenceCatalog {
            badges: vec![badge("1"), badge("2"), badge("3")],
            users: vec![member("1", &["3", "missing", "1"])],
            ..Default::default()
        };

        let e = entry("a");
        let resolved = refs.resolve(&e);
        let submitter = resolved.submitter.expect("submitter should resolve");
        assert_eq!(submitter.user.username, "user_1");
        let names: Vec<_> = submitter.badges.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Badge 3", "Badge 1"]);
    }

    #[test]
    fn resolved_submitter_serializes_flat_with_badge_info() {
        let refs = ReferenceCatalog {
            badges: vec![badge("2")],
            users: vec![member("1", &["2"])],
            ..Default::default()
        };
        let e = entry("a");

        let json = serde_json::to_value(refs.resolve(&e)).unwrap();
        assert_eq!(json["submitter"]["email"], "user1@example.com");
        assert_eq!(json["submitter"]["badges"], serde_json::json!(["2"]));
        assert_eq!(json["submitter"]["badge_info"][0]["name"], "Badge 2");
    }

    #[test]
    fn comment_count_ignores_replies() {
        let mut e = entry("a");
        e.comments = vec![
            comment("c1", vec![comment("r1", Vec::new()), comment("r2", Vec::new())]),
            comment("c2", Vec::new()),
        ];
        assert_eq!(e.comment_count(), 2);
    }

    #[test]
    fn comment_without_replies_field_deserializes_empty() {
        let json = serde_json::json!({
            "id": "c1",
            "author": "2",
            "content": "Nice",
            "date": "2024-11-20T00:00:00Z",
            "upvotes": 1,
            "downvotes": 0
        });
        let parsed: Comment = serde_json::from_value(json).unwrap();
        assert!(parsed.replies.is_empty());
    }

    #[test]
    fn prepend_leaves_original_untouched() {
        let store = EntryStore::with_entries(ReferenceCatalog::default(), vec![entry("a")]);
        let next = store.with_prepended(entry("b"));

        assert_eq!(store.len(), 1);
        assert_eq!(next.len(), 2);
        assert_eq!(next.entries()[0].id, "b");
        assert_eq!(next.entries()[1].id, "a");
    }

    #[test]
    fn contains_checks_reference_dimension() {
        let refs = ReferenceCatalog {
            occasions: vec![occasion("birthday")],
            ..Default::default()
        };
        assert!(refs.contains(FacetDimension::Occasion, "birthday"));
        assert!(!refs.contains(FacetDimension::Recipient, "birthday"));
    }
}
