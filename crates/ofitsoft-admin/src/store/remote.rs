use ofitsoft_shared::ContentDocument;

use crate::api::ApiError;

/// The authoritative copy of each content document.
#[allow(async_fn_in_trait)]
pub trait ContentRemote {
    /// Fetch the current document. `Ok(None)` means nothing has been saved yet.
    async fn fetch<D: ContentDocument>(&mut self) -> Result<Option<D>, ApiError>;

    /// Overwrite the remote document with `doc`.
    async fn save<D: ContentDocument>(&mut self, doc: &D) -> Result<(), ApiError>;
}
