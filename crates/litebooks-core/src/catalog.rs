//! Catalog synchronization
//!
//! Reconciles the in-memory collection with the remote store: fetch with
//! seeding-on-empty, sample fallback on error, insert-vs-update save
//! routing, session-local sample dismissal, and a two-phase visibility
//! toggle. The collection held here is always either the full remote
//! result set or the static sample set, never a partial merge.

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Book, BookDraft, NewBook};
use crate::remote::{RemoteError, RemoteStore, Session};
use crate::samples;

/// Errors surfaced to the operator by catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A draft needs both a title and content before it can be saved
    #[error("Title and content are required")]
    IncompleteDraft,

    /// The operation needs a remote store and none is configured
    #[error("Remote store is not configured")]
    NotConfigured,

    /// Built-in samples have no visibility flag to change
    #[error("Built-in samples cannot change visibility")]
    SampleVisibility,

    /// The remote store rejected or failed the operation
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// The synchronized book collection and its remote store, if any.
///
/// `store == None` is local-only mode: the collection is the built-in
/// sample set, browsing works, and every mutation that needs the backend
/// reports [`CatalogError::NotConfigured`].
pub struct Catalog<S> {
    store: Option<S>,
    books: Vec<Book>,
    loading: bool,
}

impl<S: RemoteStore> Catalog<S> {
    pub fn new(store: Option<S>) -> Self {
        Self {
            store,
            books: Vec::new(),
            loading: false,
        }
    }

    /// The current collection, newest first.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether a remote store is attached.
    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    pub fn find(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Fetch the collection from the remote store.
    ///
    /// Unconfigured or failing fetches fall back to the sample set; an
    /// empty remote collection is seeded from the samples and re-fetched.
    /// The loading flag is cleared on every exit path.
    pub async fn refresh(&mut self) {
        self.loading = true;
        self.books = self.load_collection().await;
        self.loading = false;
    }

    async fn load_collection(&mut self) -> Vec<Book> {
        let Some(store) = self.store.as_mut() else {
            return samples::builtin();
        };

        let rows = match store.list_books().await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("catalog fetch failed, showing samples: {e}");
                return samples::builtin();
            }
        };
        if !rows.is_empty() {
            return rows;
        }

        // Empty remote collection: seed it from the samples, then re-fetch
        // so every record carries a remote-issued id.
        debug!("remote collection empty, seeding samples");
        for sample in samples::builtin() {
            if let Err(e) = store.insert_book(&NewBook::from_sample(&sample)).await {
                warn!("seeding failed, showing samples unpersisted: {e}");
                return samples::builtin();
            }
        }
        match store.list_books().await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("re-fetch after seeding failed, showing samples: {e}");
                samples::builtin()
            }
        }
    }

    /// Persist a draft, routed by the editing target.
    ///
    /// An existing remote record is updated in place. Everything else
    /// (a new record, or an edit of a built-in sample) becomes an insert;
    /// sample identifiers are never sent to the store. On success the
    /// collection is re-fetched.
    pub async fn save(
        &mut self,
        draft: &BookDraft,
        target: Option<&Book>,
    ) -> Result<(), CatalogError> {
        if !draft.is_complete() {
            return Err(CatalogError::IncompleteDraft);
        }
        let store = self.store.as_mut().ok_or(CatalogError::NotConfigured)?;

        match target {
            Some(book) if !book.is_local => store.update_book(&book.id, draft).await?,
            _ => {
                store.insert_book(&NewBook::from_draft(draft)).await?;
            }
        }

        self.refresh().await;
        Ok(())
    }

    /// Delete a record.
    ///
    /// A built-in sample is only dismissed from the in-memory collection
    /// for this session; no remote call is made. Remote records are
    /// deleted on the backend and the collection re-fetched.
    pub async fn delete(&mut self, id: &str) -> Result<(), CatalogError> {
        let Some(book) = self.find(id) else {
            return Ok(());
        };

        if book.is_local {
            let id = id.to_string();
            self.books.retain(|b| b.id != id);
            return Ok(());
        }

        let store = self.store.as_mut().ok_or(CatalogError::NotConfigured)?;
        store.delete_book(id).await?;
        self.refresh().await;
        Ok(())
    }

    /// Flip a record's visibility flag.
    ///
    /// Two phases: the flag is applied to the in-memory collection first
    /// so the UI reflects it immediately, then confirmed remotely. If the
    /// remote update fails, a re-fetch restores ground truth and the error
    /// is returned.
    pub async fn toggle_hidden(&mut self, id: &str) -> Result<(), CatalogError> {
        let Some(book) = self.find(id) else {
            return Ok(());
        };
        if book.is_local {
            return Err(CatalogError::SampleVisibility);
        }
        if self.store.is_none() {
            return Err(CatalogError::NotConfigured);
        }
        let hidden = !book.is_hidden;

        for book in &mut self.books {
            if book.id == id {
                book.is_hidden = hidden;
            }
        }

        let store = self.store.as_mut().ok_or(CatalogError::NotConfigured)?;
        if let Err(e) = store.set_hidden(id, hidden).await {
            self.refresh().await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Exchange credentials for a session.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Session, CatalogError> {
        let store = self.store.as_mut().ok_or(CatalogError::NotConfigured)?;
        Ok(store.sign_in(email, password).await?)
    }

    /// End the current session.
    pub async fn sign_out(&mut self) -> Result<(), CatalogError> {
        let store = self.store.as_mut().ok_or(CatalogError::NotConfigured)?;
        Ok(store.sign_out().await?)
    }
}
