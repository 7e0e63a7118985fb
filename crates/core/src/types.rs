/// Gift entry identifiers. Seeded entries use short numeric strings,
/// committed entries use UUIDv7 strings.
pub type GiftId = String;

/// User identifiers.
pub type UserId = String;

/// Identifier of a facet descriptor (category, occasion, recipient, interest).
pub type FacetId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
