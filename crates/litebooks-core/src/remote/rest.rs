//! Supabase-compatible REST implementation of the remote store
//!
//! Rows live in a single `books` table exposed through PostgREST under
//! `/rest/v1`; auth is the email/password grant under `/auth/v1`. Every
//! request carries the project key as `apikey`; the bearer token is the
//! user's access token once signed in, the project key otherwise.

use std::time::Duration;

use reqwest::{header, Client, Response};
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{Book, BookDraft, NewBook};
use crate::remote::error::{RemoteError, RemoteResult};
use crate::remote::{RemoteStore, Session};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the hosted book store
#[derive(Debug)]
pub struct RestStore {
    base_url: String,
    api_key: String,
    client: Client,
    access_token: Option<String>,
}

impl RestStore {
    /// Create a client for the given endpoint and access key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> RemoteResult<Self> {
        let api_key = api_key.into();
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let mut headers = header::HeaderMap::new();
        let key_value = header::HeaderValue::from_str(&api_key)
            .map_err(|e| RemoteError::Configuration(format!("access key: {e}")))?;
        headers.insert("apikey", key_value);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(RemoteError::Http)?;

        Ok(Self {
            base_url,
            api_key,
            client,
            access_token: None,
        })
    }

    /// Build a client from configuration.
    ///
    /// Returns `None` when the remote endpoint is unconfigured or the
    /// settings are unusable; the caller degrades to local-only mode.
    pub fn from_config(config: &Config) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        let url = config.remote_url.as_deref()?;
        let key = config.remote_key.as_deref()?;
        match Self::new(url, key) {
            Ok(store) => Some(store),
            Err(e) => {
                warn!("remote store unusable, running local-only: {e}");
                None
            }
        }
    }

    /// Whether a session token is currently held.
    pub fn has_session(&self) -> bool {
        self.access_token.is_some()
    }

    fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.api_key)
    }

    fn rows_url(&self) -> String {
        format!("{}/rest/v1/books", self.base_url)
    }

    async fn check(response: Response) -> RemoteResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Err(RemoteError::Server { status, message })
    }
}

impl RemoteStore for RestStore {
    async fn list_books(&self) -> RemoteResult<Vec<Book>> {
        let url = format!("{}?select=*&order=created_at.desc", self.rows_url());
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.bearer())
            .send()
            .await?;
        let rows: Vec<Book> = Self::check(response).await?.json().await?;
        debug!("fetched {} rows", rows.len());
        Ok(rows)
    }

    async fn insert_book(&mut self, new: &NewBook) -> RemoteResult<Book> {
        let response = self
            .client
            .post(self.rows_url())
            .bearer_auth(self.bearer())
            .header("Prefer", "return=representation")
            .json(new)
            .send()
            .await?;
        // PostgREST returns the created rows as an array
        let mut rows: Vec<Book> = Self::check(response).await?.json().await?;
        rows.pop().ok_or_else(|| RemoteError::Server {
            status: 200,
            message: "insert returned no row".to_string(),
        })
    }

    async fn update_book(&mut self, id: &str, draft: &BookDraft) -> RemoteResult<()> {
        let url = format!("{}?id=eq.{}", self.rows_url(), id);
        let response = self
            .client
            .patch(&url)
            .bearer_auth(self.bearer())
            .json(draft)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn set_hidden(&mut self, id: &str, hidden: bool) -> RemoteResult<()> {
        let url = format!("{}?id=eq.{}", self.rows_url(), id);
        let response = self
            .client
            .patch(&url)
            .bearer_auth(self.bearer())
            .json(&serde_json::json!({ "is_hidden": hidden }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_book(&mut self, id: &str) -> RemoteResult<()> {
        let url = format!("{}?id=eq.{}", self.rows_url(), id);
        let response = self
            .client
            .delete(&url)
            .bearer_auth(self.bearer())
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn sign_in(&mut self, email: &str, password: &str) -> RemoteResult<Session> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Auth(
                auth_error_message(&body)
                    .unwrap_or_else(|| format!("sign-in rejected ({status})")),
            ));
        }

        let session: Session = response.json().await?;
        self.access_token = Some(session.access_token.clone());
        Ok(session)
    }

    async fn sign_out(&mut self) -> RemoteResult<()> {
        // Drop the token first: the local session ends even when the
        // backend call fails.
        let Some(token) = self.access_token.take() else {
            return Ok(());
        };
        let url = format!("{}/auth/v1/logout", self.base_url);
        let response = self.client.post(&url).bearer_auth(&token).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

/// Pull a human-readable message out of an auth error body.
///
/// The auth endpoint reports failures under different keys depending on the
/// error class.
fn auth_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["error_description", "msg", "message", "error"] {
        if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
            if !message.is_empty() {
                return Some(message.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let store = RestStore::new("https://demo.example.co/", "anon-key").unwrap();
        assert_eq!(store.rows_url(), "https://demo.example.co/rest/v1/books");
    }

    #[test]
    fn test_new_rejects_unusable_key() {
        let err = RestStore::new("https://demo.example.co", "bad\nkey").unwrap_err();
        assert!(matches!(err, RemoteError::Configuration(_)));
    }

    #[test]
    fn test_from_config_requires_configuration() {
        let config = Config::default();
        assert!(RestStore::from_config(&config).is_none());

        let config = Config {
            remote_url: Some("https://demo.example.co".to_string()),
            remote_key: Some("anon-key".to_string()),
            ..Config::default()
        };
        let store = RestStore::from_config(&config).unwrap();
        assert!(!store.has_session());
    }

    #[test]
    fn test_bearer_prefers_session_token() {
        let mut store = RestStore::new("https://demo.example.co", "anon-key").unwrap();
        assert_eq!(store.bearer(), "anon-key");
        store.access_token = Some("user-token".to_string());
        assert_eq!(store.bearer(), "user-token");
    }

    #[test]
    fn test_auth_error_message_keys() {
        assert_eq!(
            auth_error_message(r#"{"error_description": "Invalid login credentials"}"#),
            Some("Invalid login credentials".to_string())
        );
        assert_eq!(
            auth_error_message(r#"{"msg": "Email not confirmed"}"#),
            Some("Email not confirmed".to_string())
        );
        assert_eq!(auth_error_message("not json"), None);
        assert_eq!(auth_error_message(r#"{"unrelated": 1}"#), None);
    }
}
