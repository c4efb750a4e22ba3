//! Remote store access
//!
//! The hosted backend is an opaque collaborator: row CRUD over a single
//! `books` collection plus email/password auth sessions. [`RemoteStore`] is
//! the seam between the synchronizer and the backend, so tests (and any
//! future transport) can substitute their own implementation.

mod error;
mod rest;

pub use error::{RemoteError, RemoteResult};
pub use rest::RestStore;

use serde::Deserialize;

use crate::models::{Book, BookDraft, NewBook};

/// An authenticated user as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    /// Opaque identity key
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// An auth session. Presence grants the admin affordances: create, edit,
/// delete, visibility toggle, and viewing of hidden records.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: User,
}

impl Session {
    /// Display name for the signed-in user.
    pub fn display_name(&self) -> &str {
        self.user.email.as_deref().unwrap_or("admin")
    }
}

/// Row CRUD and auth against the hosted backend.
///
/// Reads return the collection ordered by creation time descending; the
/// filter layer only subsets and never re-orders.
#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    /// Fetch all rows, newest first.
    async fn list_books(&self) -> RemoteResult<Vec<Book>>;

    /// Insert a row; the returned record carries the remote-issued id.
    async fn insert_book(&mut self, new: &NewBook) -> RemoteResult<Book>;

    /// Update the draft fields of an existing row.
    async fn update_book(&mut self, id: &str, draft: &BookDraft) -> RemoteResult<()>;

    /// Update only the visibility flag of an existing row.
    async fn set_hidden(&mut self, id: &str, hidden: bool) -> RemoteResult<()>;

    /// Delete a row by id.
    async fn delete_book(&mut self, id: &str) -> RemoteResult<()>;

    /// Exchange email+password for a session; the store keeps the access
    /// token for subsequent requests.
    async fn sign_in(&mut self, email: &str, password: &str) -> RemoteResult<Session>;

    /// End the current session and drop the access token.
    async fn sign_out(&mut self) -> RemoteResult<()>;
}
