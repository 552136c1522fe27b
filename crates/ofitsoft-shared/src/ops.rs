//! Pure mutations over a content document.
//!
//! Every function takes the document by `&mut`, returns `true` when it
//! changed something and `false` when the call was a no-op. Applied
//! mutations stamp `last_updated`; no-ops leave the document untouched.
//! Nothing here returns an error: an unknown id or a duplicate id is
//! simply ignored.

use crate::content::{
    has_duplicate_ids, CollectionLens, ContentDocument, ContentStatus, Entry, HasStatus, Parent,
    Patch, SectionLens,
};

/// Shallow-merge `patch` into one section. Always stamps.
pub fn update_section<D, S, P>(doc: &mut D, lens: SectionLens<D, S>, patch: P) -> bool
where
    D: ContentDocument,
    P: Patch<S>,
{
    patch.apply((lens.get_mut)(doc));
    doc.touch();
    true
}

/// Replace a whole collection. Rejected if `items` repeats an id.
pub fn update_collection<D, E>(doc: &mut D, lens: CollectionLens<D, E>, items: Vec<E>) -> bool
where
    D: ContentDocument,
    E: Entry,
{
    if has_duplicate_ids(&items) {
        return false;
    }
    *(lens.get_mut)(doc) = items;
    doc.touch();
    true
}

/// Append an entry. Rejected if its id is already taken.
pub fn add_entry<D, E>(doc: &mut D, lens: CollectionLens<D, E>, entry: E) -> bool
where
    D: ContentDocument,
    E: Entry,
{
    let items = (lens.get_mut)(doc);
    if items.iter().any(|e| e.id() == entry.id()) {
        return false;
    }
    items.push(entry);
    doc.touch();
    true
}

/// Remove the entry with `id` together with everything nested under it.
pub fn remove_entry<D, E>(doc: &mut D, lens: CollectionLens<D, E>, id: &str) -> bool
where
    D: ContentDocument,
    E: Entry,
{
    let items = (lens.get_mut)(doc);
    let before = items.len();
    items.retain(|e| e.id() != id);
    if items.len() == before {
        return false;
    }
    doc.touch();
    true
}

/// Edit one entry in place. An edit that makes the id collide with a
/// sibling is rolled back.
pub fn update_entry<D, E, F>(doc: &mut D, lens: CollectionLens<D, E>, id: &str, edit: F) -> bool
where
    D: ContentDocument,
    E: Entry + Clone,
    F: FnOnce(&mut E),
{
    let items = (lens.get_mut)(doc);
    let Some(index) = items.iter().position(|e| e.id() == id) else {
        return false;
    };

    let original = items[index].clone();
    edit(&mut items[index]);
    if has_duplicate_ids(items) {
        items[index] = original;
        return false;
    }
    doc.touch();
    true
}

/// Move an entry to `to_index`, clamped to the end of the collection.
pub fn move_entry<D, E>(doc: &mut D, lens: CollectionLens<D, E>, id: &str, to_index: usize) -> bool
where
    D: ContentDocument,
    E: Entry,
{
    let items = (lens.get_mut)(doc);
    let Some(from) = items.iter().position(|e| e.id() == id) else {
        return false;
    };

    let to = to_index.min(items.len() - 1);
    if from == to {
        return false;
    }
    let entry = items.remove(from);
    items.insert(to, entry);
    doc.touch();
    true
}

/// Append a child to the nested collection of one parent entry.
pub fn add_nested_entry<D, P>(
    doc: &mut D,
    lens: CollectionLens<D, P>,
    parent_id: &str,
    child: P::Child,
) -> bool
where
    D: ContentDocument,
    P: Parent,
{
    let Some(parent) = (lens.get_mut)(doc).iter_mut().find(|p| p.id() == parent_id) else {
        return false;
    };
    if parent.children().iter().any(|c| c.id() == child.id()) {
        return false;
    }
    parent.children_mut().push(child);
    doc.touch();
    true
}

/// Remove a child from the nested collection of one parent entry.
pub fn remove_nested_entry<D, P>(
    doc: &mut D,
    lens: CollectionLens<D, P>,
    parent_id: &str,
    child_id: &str,
) -> bool
where
    D: ContentDocument,
    P: Parent,
{
    let Some(parent) = (lens.get_mut)(doc).iter_mut().find(|p| p.id() == parent_id) else {
        return false;
    };
    let children = parent.children_mut();
    let before = children.len();
    children.retain(|c| c.id() != child_id);
    if children.len() == before {
        return false;
    }
    doc.touch();
    true
}

/// Switch between draft and published.
pub fn set_status<D>(doc: &mut D, status: ContentStatus) -> bool
where
    D: ContentDocument + HasStatus,
{
    if doc.status() == status {
        return false;
    }
    *doc.status_mut() = status;
    doc.touch();
    true
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Hero {
        a: String,
        b: String,
        c: String,
    }

    #[derive(Default)]
    struct HeroPatch {
        a: Option<String>,
        b: Option<String>,
        c: Option<String>,
    }

    impl Patch<Hero> for HeroPatch {
        fn apply(self, target: &mut Hero) {
            if let Some(a) = self.a {
                target.a = a;
            }
            if let Some(b) = self.b {
                target.b = b;
            }
            if let Some(c) = self.c {
                target.c = c;
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Group {
        id: String,
        label: String,
        members: Vec<String>,
    }

    impl Entry for Group {
        fn id(&self) -> &str {
            &self.id
        }
    }

    impl Parent for Group {
        type Child = String;

        fn children(&self) -> &[String] {
            &self.members
        }

        fn children_mut(&mut self) -> &mut Vec<String> {
            &mut self.members
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Doc {
        hero: Hero,
        groups: Vec<Group>,
        status: ContentStatus,
        last_updated: DateTime<Utc>,
    }

    impl ContentDocument for Doc {
        const DOMAIN: &'static str = "doc";
        const STORAGE_KEY: &'static str = "doc-storage";

        fn defaults() -> Self {
            Self {
                hero: Hero {
                    a: "a".into(),
                    b: "b".into(),
                    c: "c".into(),
                },
                groups: vec![group("g1", &["x", "y"]), group("g2", &["z"])],
                status: ContentStatus::Draft,
                last_updated: DateTime::<Utc>::default(),
            }
        }

        fn last_updated(&self) -> DateTime<Utc> {
            self.last_updated
        }

        fn set_last_updated(&mut self, at: DateTime<Utc>) {
            self.last_updated = at;
        }
    }

    impl HasStatus for Doc {
        fn status(&self) -> ContentStatus {
            self.status
        }

        fn status_mut(&mut self) -> &mut ContentStatus {
            &mut self.status
        }
    }

    const HERO: SectionLens<Doc, Hero> = SectionLens {
        name: "hero",
        get: |d| &d.hero,
        get_mut: |d| &mut d.hero,
    };

    const GROUPS: CollectionLens<Doc, Group> = CollectionLens {
        name: "groups",
        get: |d| &d.groups,
        get_mut: |d| &mut d.groups,
    };

    fn group(id: &str, members: &[&str]) -> Group {
        Group {
            id: id.to_string(),
            label: id.to_uppercase(),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn test_update_section_only_touches_named_fields() {
        let mut doc = Doc::defaults();
        let before = doc.last_updated;

        let patch = HeroPatch {
            b: Some("x".into()),
            ..Default::default()
        };
        assert!(update_section(&mut doc, HERO, patch));

        assert_eq!(doc.hero.a, "a");
        assert_eq!(doc.hero.b, "x");
        assert_eq!(doc.hero.c, "c");
        assert!(doc.last_updated > before);
    }

    #[test]
    fn test_empty_patch_still_stamps() {
        let mut doc = Doc::defaults();
        let before = doc.last_updated;
        assert!(update_section(&mut doc, HERO, HeroPatch::default()));
        assert_eq!(doc.hero, Doc::defaults().hero);
        assert!(doc.last_updated > before);
    }

    #[test]
    fn test_add_then_remove_restores_collection() {
        let mut doc = Doc::defaults();
        let original = doc.groups.clone();

        assert!(add_entry(&mut doc, GROUPS, group("g3", &[])));
        assert_eq!(doc.groups.len(), 3);
        assert_eq!(doc.groups.last().unwrap().id, "g3");

        assert!(remove_entry(&mut doc, GROUPS, "g3"));
        assert_eq!(doc.groups, original);
    }

    #[test]
    fn test_add_duplicate_id_is_noop() {
        let mut doc = Doc::defaults();
        let before = doc.clone();
        assert!(!add_entry(&mut doc, GROUPS, group("g1", &[])));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_remove_missing_is_idempotent() {
        let mut doc = Doc::defaults();
        let before = doc.clone();

        assert!(!remove_entry(&mut doc, GROUPS, "nope"));
        assert_eq!(doc, before);
        assert!(!remove_entry(&mut doc, GROUPS, "nope"));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_remove_parent_drops_children() {
        let mut doc = Doc::defaults();
        assert!(remove_entry(&mut doc, GROUPS, "g1"));
        assert_eq!(doc.groups.len(), 1);
        assert!(doc.groups.iter().all(|g| !g.members.contains(&"x".to_string())));
    }

    #[test]
    fn test_update_collection_rejects_duplicates() {
        let mut doc = Doc::defaults();
        let before = doc.clone();

        let dup = vec![group("a", &[]), group("a", &[])];
        assert!(!update_collection(&mut doc, GROUPS, dup));
        assert_eq!(doc, before);

        let next = vec![group("g2", &["z"]), group("g1", &["x"])];
        assert!(update_collection(&mut doc, GROUPS, next.clone()));
        assert_eq!(doc.groups, next);
    }

    #[test]
    fn test_nested_mutation_leaves_siblings_alone() {
        let mut doc = Doc::defaults();
        let sibling = doc.groups[1].clone();

        assert!(add_nested_entry(&mut doc, GROUPS, "g1", "w".to_string()));
        assert_eq!(doc.groups[0].members, vec!["x", "y", "w"]);
        assert_eq!(doc.groups[1], sibling);

        assert!(remove_nested_entry(&mut doc, GROUPS, "g1", "x"));
        assert_eq!(doc.groups[0].members, vec!["y", "w"]);
        assert_eq!(doc.groups[1], sibling);
    }

    #[test]
    fn test_nested_noops() {
        let mut doc = Doc::defaults();
        let before = doc.clone();

        assert!(!add_nested_entry(&mut doc, GROUPS, "missing", "w".to_string()));
        assert!(!add_nested_entry(&mut doc, GROUPS, "g1", "x".to_string()));
        assert!(!remove_nested_entry(&mut doc, GROUPS, "g1", "missing"));
        assert!(!remove_nested_entry(&mut doc, GROUPS, "missing", "x"));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_update_entry_rolls_back_id_collision() {
        let mut doc = Doc::defaults();

        assert!(update_entry(&mut doc, GROUPS, "g1", |g| g.label = "First".into()));
        assert_eq!(doc.groups[0].label, "First");

        let before = doc.clone();
        assert!(!update_entry(&mut doc, GROUPS, "g1", |g| g.id = "g2".into()));
        assert_eq!(doc, before);

        assert!(!update_entry(&mut doc, GROUPS, "missing", |g| g.label.clear()));
    }

    #[test]
    fn test_move_entry() {
        let mut doc = Doc::defaults();
        doc.groups.push(group("g3", &[]));

        assert!(move_entry(&mut doc, GROUPS, "g3", 0));
        let ids: Vec<_> = doc.groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["g3", "g1", "g2"]);

        assert!(move_entry(&mut doc, GROUPS, "g3", 99));
        let ids: Vec<_> = doc.groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["g1", "g2", "g3"]);

        assert!(!move_entry(&mut doc, GROUPS, "g3", 2));
        assert!(!move_entry(&mut doc, GROUPS, "missing", 0));
    }

    #[test]
    fn test_set_status() {
        let mut doc = Doc::defaults();
        assert!(!set_status(&mut doc, ContentStatus::Draft));
        assert!(set_status(&mut doc, ContentStatus::Published));
        assert_eq!(doc.status, ContentStatus::Published);
    }

    #[test]
    fn test_lens_find_and_fresh_id() {
        let doc = Doc::defaults();
        assert_eq!(GROUPS.find(&doc, "g2").map(|g| g.label.as_str()), Some("G2"));
        assert!(GROUPS.find(&doc, "g9").is_none());
        assert!(GROUPS.fresh_id(&doc, "group").starts_with("group-"));
        assert_eq!(HERO.name, "hero");
    }
}
