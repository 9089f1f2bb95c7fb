//! Connection state shared by every resource client

use std::sync::{Arc, RwLock};

use reqwest::Client;

use crate::auth::Session;
use crate::config::ClientOptions;
use crate::fetch::{Fetch, FetchBuilder};

/// Base URL, HTTP client and the current session.
///
/// Cloning is cheap; all clones observe the same session.
#[derive(Clone, Debug)]
pub struct Transport {
    base_url: String,
    client: Client,
    client_info: String,
    session: Arc<RwLock<Option<Session>>>,
}

impl Transport {
    pub(crate) fn new(base_url: &str, client: Client, options: &ClientOptions) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            client_info: options.client_info.clone(),
            session: Arc::new(RwLock::new(None)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn client_info(&self) -> &str {
        &self.client_info
    }

    /// Access token of the current session
    pub fn token(&self) -> Option<String> {
        self.session
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|s| s.token.clone()))
    }

    pub fn session(&self) -> Option<Session> {
        self.session.read().ok().and_then(|guard| guard.clone())
    }

    pub(crate) fn set_session(&self, session: Option<Session>) {
        match self.session.write() {
            Ok(mut guard) => *guard = session,
            Err(poisoned) => *poisoned.into_inner() = session,
        }
    }

    fn decorate<'a>(&self, builder: FetchBuilder<'a>) -> FetchBuilder<'a> {
        let builder = builder.header("X-Client-Info", &self.client_info);
        match self.token() {
            Some(token) => builder.bearer_auth(&token),
            None => builder,
        }
    }

    pub(crate) fn get(&self, path: &str) -> FetchBuilder<'_> {
        self.decorate(Fetch::get(&self.client, &self.url(path)))
    }

    pub(crate) fn post(&self, path: &str) -> FetchBuilder<'_> {
        self.decorate(Fetch::post(&self.client, &self.url(path)))
    }

    pub(crate) fn put(&self, path: &str) -> FetchBuilder<'_> {
        self.decorate(Fetch::put(&self.client, &self.url(path)))
    }

    pub(crate) fn delete(&self, path: &str) -> FetchBuilder<'_> {
        self.decorate(Fetch::delete(&self.client, &self.url(path)))
    }
}
