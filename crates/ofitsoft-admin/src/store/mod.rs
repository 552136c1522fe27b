//! The content store: one document per domain, its sync state, and its
//! local persistence.
//!
//! Every mutation goes through [`ContentStore::mutate`], which ignores the
//! call when nothing is loaded, stamps the document, moves the store to
//! [`SyncState::Dirty`] and then persists according to the [`WritePolicy`].

mod cache;
mod remote;

use std::fmt;
use std::str::FromStr;

use ofitsoft_shared::{
    ops, CollectionLens, ContentDocument, ContentStatus, Entry, HasStatus, Parent, Patch,
    SectionLens,
};
use serde::{Deserialize, Serialize};

use crate::api::ApiError;

pub use cache::{FileCache, PersistedState, CACHE_VERSION};
pub use remote::ContentRemote;

/// Where the local document stands relative to the remote copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncState {
    /// Holding defaults (or a cached copy) that never came from the server.
    #[default]
    Uninitialized,
    /// Matches the last document fetched from or pushed to the server.
    Hydrated,
    /// Has local edits the server has not seen.
    Dirty,
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncState::Uninitialized => "uninitialized",
            SyncState::Hydrated => "hydrated",
            SyncState::Dirty => "dirty",
        };
        f.write_str(name)
    }
}

/// When the store writes to its local cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WritePolicy {
    /// After every applied mutation.
    #[default]
    WriteThrough,
    /// Only when [`ContentStore::persist`] is called.
    Manual,
}

impl FromStr for WritePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "write-through" => Ok(WritePolicy::WriteThrough),
            "manual" => Ok(WritePolicy::Manual),
            other => Err(format!("unknown write policy '{}'", other)),
        }
    }
}

pub struct ContentStore<D: ContentDocument> {
    content: Option<D>,
    state: SyncState,
    /// Set once this instance has taken a fetched document. Not persisted.
    hydrated: bool,
    cache: FileCache,
    policy: WritePolicy,
}

impl<D: ContentDocument> ContentStore<D> {
    /// Open the store from its cache entry, falling back to the defaults
    /// when there is no usable cached copy.
    pub fn open(cache: FileCache, policy: WritePolicy) -> Self {
        let (content, state) = match cache.load_state::<D>(D::STORAGE_KEY) {
            Ok(Some(persisted)) if persisted.version == CACHE_VERSION => {
                (persisted.state, persisted.sync_state)
            }
            Ok(Some(persisted)) => {
                tracing::warn!(
                    key = D::STORAGE_KEY,
                    found = persisted.version,
                    expected = CACHE_VERSION,
                    "Discarding cached content with a different version"
                );
                (Some(D::defaults()), SyncState::Uninitialized)
            }
            Ok(None) => (Some(D::defaults()), SyncState::Uninitialized),
            Err(e) => {
                tracing::warn!(key = D::STORAGE_KEY, "Ignoring unreadable cache: {:#}", e);
                (Some(D::defaults()), SyncState::Uninitialized)
            }
        };

        Self {
            content,
            state,
            hydrated: false,
            cache,
            policy,
        }
    }

    /// A store with nothing loaded yet; every mutation is ignored until
    /// content arrives through `hydrate`, `set_content` or a reset.
    pub fn unloaded(cache: FileCache, policy: WritePolicy) -> Self {
        Self {
            content: None,
            state: SyncState::Uninitialized,
            hydrated: false,
            cache,
            policy,
        }
    }

    pub fn content(&self) -> Option<&D> {
        self.content.as_ref()
    }

    pub fn sync_state(&self) -> SyncState {
        self.state
    }

    pub fn cache(&self) -> &FileCache {
        &self.cache
    }

    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    /// Write the current document and sync state to the local cache.
    pub fn persist(&self) -> anyhow::Result<()> {
        self.cache
            .save_state(D::STORAGE_KEY, self.content.as_ref(), self.state)
    }

    fn after_change(&self) {
        if self.policy == WritePolicy::WriteThrough {
            if let Err(e) = self.persist() {
                tracing::warn!(key = D::STORAGE_KEY, "Failed to persist content: {:#}", e);
            }
        }
    }

    /// Replace the whole document, unconditionally.
    ///
    /// This bypasses the hydration guard: a stale fetch routed here
    /// overwrites newer local edits. Use [`ContentStore::hydrate`] for
    /// network responses.
    pub fn set_content(&mut self, doc: D) {
        self.content = Some(doc);
        self.state = SyncState::Dirty;
        self.after_change();
    }

    /// Accept a fetched document at most once per instance, and never over
    /// local edits. A clean copy reopened from the cache can still take a
    /// newer remote version. Returns whether the document was taken.
    pub fn hydrate(&mut self, doc: D) -> bool {
        if self.hydrated || self.state == SyncState::Dirty {
            tracing::debug!(
                domain = D::DOMAIN,
                state = %self.state,
                "Ignoring fetched content, store already hydrated or edited"
            );
            return false;
        }

        self.content = Some(doc);
        self.state = SyncState::Hydrated;
        self.hydrated = true;
        self.after_change();
        true
    }

    /// Run one mutation. Ignored when nothing is loaded.
    pub fn mutate<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut D) -> bool,
    {
        let Some(doc) = self.content.as_mut() else {
            tracing::debug!(domain = D::DOMAIN, "Ignoring mutation, content not loaded");
            return false;
        };

        if !f(doc) {
            return false;
        }

        self.state = SyncState::Dirty;
        self.after_change();
        true
    }

    pub fn update_section<S, P>(&mut self, lens: SectionLens<D, S>, patch: P) -> bool
    where
        P: Patch<S>,
    {
        self.mutate(|doc| ops::update_section(doc, lens, patch))
    }

    pub fn update_collection<E: Entry>(&mut self, lens: CollectionLens<D, E>, items: Vec<E>) -> bool {
        let applied = self.mutate(|doc| ops::update_collection(doc, lens, items));
        if !applied {
            tracing::debug!(collection = lens.name, "Collection update rejected");
        }
        applied
    }

    pub fn add_entry<E: Entry>(&mut self, lens: CollectionLens<D, E>, entry: E) -> bool {
        self.mutate(|doc| ops::add_entry(doc, lens, entry))
    }

    pub fn remove_entry<E: Entry>(&mut self, lens: CollectionLens<D, E>, id: &str) -> bool {
        self.mutate(|doc| ops::remove_entry(doc, lens, id))
    }

    pub fn update_entry<E, F>(&mut self, lens: CollectionLens<D, E>, id: &str, edit: F) -> bool
    where
        E: Entry + Clone,
        F: FnOnce(&mut E),
    {
        self.mutate(|doc| ops::update_entry(doc, lens, id, edit))
    }

    pub fn move_entry<E: Entry>(&mut self, lens: CollectionLens<D, E>, id: &str, to: usize) -> bool {
        self.mutate(|doc| ops::move_entry(doc, lens, id, to))
    }

    pub fn add_nested_entry<P: Parent>(
        &mut self,
        lens: CollectionLens<D, P>,
        parent_id: &str,
        child: P::Child,
    ) -> bool {
        self.mutate(|doc| ops::add_nested_entry(doc, lens, parent_id, child))
    }

    pub fn remove_nested_entry<P: Parent>(
        &mut self,
        lens: CollectionLens<D, P>,
        parent_id: &str,
        child_id: &str,
    ) -> bool {
        self.mutate(|doc| ops::remove_nested_entry(doc, lens, parent_id, child_id))
    }

    /// Drop all local edits in favour of the hardcoded defaults. The remote
    /// copy is untouched until the next push.
    pub fn reset_to_defaults(&mut self) {
        self.content = Some(D::defaults());
        self.state = SyncState::Dirty;
        self.after_change();
    }

    /// Record that the remote copy now matches the local document.
    pub fn mark_saved(&mut self) {
        self.state = SyncState::Hydrated;
        self.after_change();
    }

    /// Fetch the remote copy and hydrate from it if the guard allows.
    pub async fn pull<R: ContentRemote>(&mut self, remote: &mut R) -> Result<bool, ApiError> {
        match remote.fetch::<D>().await? {
            Some(doc) => Ok(self.hydrate(doc)),
            None => {
                tracing::debug!(domain = D::DOMAIN, "No remote copy yet");
                Ok(false)
            }
        }
    }

    /// Fetch the remote copy and take it regardless of local edits.
    pub async fn pull_forced<R: ContentRemote>(&mut self, remote: &mut R) -> Result<bool, ApiError> {
        let Some(doc) = remote.fetch::<D>().await? else {
            return Ok(false);
        };

        self.content = Some(doc);
        self.state = SyncState::Hydrated;
        self.hydrated = true;
        self.after_change();
        Ok(true)
    }

    /// Send the whole current document to the remote. The payload is taken
    /// at call time; on failure the local state is left as it was.
    pub async fn push<R: ContentRemote>(&mut self, remote: &mut R) -> Result<(), ApiError> {
        let doc = self
            .content
            .as_ref()
            .ok_or_else(|| ApiError::Validation("Content not loaded".to_string()))?;

        remote.save(doc).await?;

        tracing::info!(domain = D::DOMAIN, "Content pushed");
        self.mark_saved();
        Ok(())
    }
}

impl<D: ContentDocument + HasStatus> ContentStore<D> {
    pub fn set_status(&mut self, status: ContentStatus) -> bool {
        self.mutate(|doc| ops::set_status(doc, status))
    }
}
