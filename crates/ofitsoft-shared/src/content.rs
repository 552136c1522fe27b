//! Building blocks shared by every content domain.
//!
//! A content document is a struct made of *sections* (flat records of
//! scalar fields) and *collections* (ordered `Vec`s of entries with string
//! ids). Sections and collections are addressed through [`SectionLens`] and
//! [`CollectionLens`] constants exported by each domain module, and mutated
//! through the functions in [`crate::ops`].

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Root document for one content domain (footer, about page, ...).
pub trait ContentDocument: Clone + Serialize + DeserializeOwned {
    /// Path segment used by the Content API (`/api/v1/content/{DOMAIN}`).
    const DOMAIN: &'static str;

    /// Key of the durable local cache entry.
    const STORAGE_KEY: &'static str;

    /// The hardcoded document a store starts from and resets to.
    fn defaults() -> Self;

    fn last_updated(&self) -> DateTime<Utc>;

    fn set_last_updated(&mut self, at: DateTime<Utc>);

    /// Stamp `last_updated` with the current time.
    fn touch(&mut self) {
        self.touch_at(Utc::now());
    }

    /// Stamp `last_updated`, never moving it backwards or leaving it equal.
    fn touch_at(&mut self, now: DateTime<Utc>) {
        let previous = self.last_updated();
        let next = if now > previous {
            now
        } else {
            previous + Duration::microseconds(1)
        };
        self.set_last_updated(next);
    }
}

/// A uniquely identified record inside a collection.
pub trait Entry {
    fn id(&self) -> &str;
}

/// Plain string lists (subcategories, feature bullets) use the string as id.
impl Entry for String {
    fn id(&self) -> &str {
        self
    }
}

/// An entry that owns a nested collection.
pub trait Parent: Entry {
    type Child: Entry;

    fn children(&self) -> &[Self::Child];

    fn children_mut(&mut self) -> &mut Vec<Self::Child>;
}

/// Entries carrying an explicit `order` field.
pub trait Ordered {
    fn order(&self) -> i32;
}

/// Partial update of a section: only the fields that are set get merged.
pub trait Patch<T> {
    fn apply(self, target: &mut T);
}

/// Publication status carried by some domains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    Draft,
    Published,
}

impl std::fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentStatus::Draft => f.write_str("draft"),
            ContentStatus::Published => f.write_str("published"),
        }
    }
}

/// Documents with a draft/published status.
pub trait HasStatus {
    fn status(&self) -> ContentStatus;

    fn status_mut(&mut self) -> &mut ContentStatus;
}

/// Named accessor for a section of `D`.
pub struct SectionLens<D, S> {
    pub name: &'static str,
    pub get: fn(&D) -> &S,
    pub get_mut: fn(&mut D) -> &mut S,
}

impl<D, S> Clone for SectionLens<D, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D, S> Copy for SectionLens<D, S> {}

/// Named accessor for a collection of `D`.
pub struct CollectionLens<D, E> {
    pub name: &'static str,
    pub get: fn(&D) -> &Vec<E>,
    pub get_mut: fn(&mut D) -> &mut Vec<E>,
}

impl<D, E> Clone for CollectionLens<D, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D, E> Copy for CollectionLens<D, E> {}

impl<D, E: Entry> CollectionLens<D, E> {
    /// Find an entry by id.
    pub fn find<'a>(&self, doc: &'a D, id: &str) -> Option<&'a E> {
        (self.get)(doc).iter().find(|e| e.id() == id)
    }

    /// A fresh id for a new entry of this collection.
    pub fn fresh_id(&self, doc: &D, prefix: &str) -> String {
        generate_id(prefix, (self.get)(doc))
    }
}

/// Generate `"{prefix}-{unix_millis}"`, bumping the millisecond value until
/// it does not collide with any id in `existing`.
pub fn generate_id<E: Entry>(prefix: &str, existing: &[E]) -> String {
    let mut stamp = Utc::now().timestamp_millis();
    loop {
        let id = format!("{}-{}", prefix, stamp);
        if !existing.iter().any(|e| e.id() == id) {
            return id;
        }
        stamp += 1;
    }
}

/// The `order` value for an entry appended after `existing`.
pub fn next_order<E: Ordered>(existing: &[E]) -> i32 {
    existing.iter().map(Ordered::order).max().map_or(0, |max| max + 1)
}

/// True if two entries in `items` share an id.
pub fn has_duplicate_ids<E: Entry>(items: &[E]) -> bool {
    items
        .iter()
        .enumerate()
        .any(|(i, a)| items[i + 1..].iter().any(|b| b.id() == a.id()))
}

/// Turn a display name into a URL slug ("Mobile Apps" -> "mobile-apps").
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
