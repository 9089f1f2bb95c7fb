//! Page controllers: the fetch-and-render cycle behind every list view.
//!
//! A page issues a fetch whenever its inputs change, writes the outcome into
//! its slice and turns the slice into a [`ListView`] for the renderer.
//! Mutations go through the API and are followed by a full re-fetch.

mod sources;
mod statistics;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Error, Result};
use crate::notice::{Notice, Notifier};
use crate::store::SharedSlice;

pub use sources::*;
pub use statistics::*;

/// Where a list page gets its rows from
#[async_trait]
pub trait ListSource: Send + Sync {
    type Item: Clone + Send + Sync + 'static;
    type Query: Send + Sync;

    async fn fetch(&self, query: &Self::Query) -> Result<Vec<Self::Item>>;

    /// Remove one row by id. Read-only sources keep the default.
    async fn delete(&self, id: &str) -> Result<()> {
        Err(Error::unsupported(format!("cannot delete {}", id)))
    }
}

/// Fixed strings a page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageText {
    pub empty: &'static str,
    pub load_failed: &'static str,
    pub delete_failed: &'static str,
    pub deleted: &'static str,
}

/// What a list page should display right now
#[derive(Debug, Clone, PartialEq)]
pub enum ListView<T> {
    Loading,
    Failed(String),
    Empty(&'static str),
    Rows(Vec<T>),
}

/// What a single-record page should display right now
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView<T> {
    Loading,
    Failed(String),
    Empty(&'static str),
    Ready(T),
}

/// A list page bound to its source, slice and notifier
pub struct ListPage<S: ListSource> {
    source: S,
    slice: SharedSlice<Vec<S::Item>>,
    notifier: Arc<dyn Notifier>,
    text: PageText,
}

impl<S: ListSource> ListPage<S> {
    pub fn new(
        source: S,
        slice: SharedSlice<Vec<S::Item>>,
        notifier: Arc<dyn Notifier>,
        text: PageText,
    ) -> Self {
        Self {
            source,
            slice,
            notifier,
            text,
        }
    }

    pub fn slice(&self) -> &SharedSlice<Vec<S::Item>> {
        &self.slice
    }

    pub fn text(&self) -> PageText {
        self.text
    }

    /// Fetch with `query` and store the outcome.
    ///
    /// Returns `false` when a newer fetch was issued meanwhile and this
    /// outcome was dropped.
    pub async fn refresh(&self, query: &S::Query) -> bool {
        let token = self.slice.begin().await;
        let outcome = self.source.fetch(query).await;

        let notice = outcome
            .as_ref()
            .err()
            .map(|err| Notice::from_error(err, self.text.load_failed));
        let applied = self
            .slice
            .finish(token, outcome.map_err(|err| err.message_or(self.text.load_failed)))
            .await;

        if !applied {
            debug!(token = token.sequence(), "page refresh superseded");
        } else if let Some(notice) = notice {
            self.notifier.notify(notice);
        }
        applied
    }

    /// Delete `id`, then re-fetch the list once with `query`
    pub async fn delete(&self, id: &str, query: &S::Query) -> Result<()> {
        match self.source.delete(id).await {
            Ok(()) => {
                self.refresh(query).await;
                self.notifier
                    .notify(Notice::success("Deleted!", self.text.deleted));
                Ok(())
            }
            Err(err) => {
                self.notifier
                    .notify(Notice::from_error(&err, self.text.delete_failed));
                Err(err)
            }
        }
    }

    pub async fn view(&self) -> ListView<S::Item> {
        let snapshot = self.slice.snapshot().await;
        if snapshot.loading() {
            return ListView::Loading;
        }
        if let Some(error) = snapshot.error() {
            return ListView::Failed(error.to_string());
        }
        match snapshot.data() {
            Some(items) if !items.is_empty() => ListView::Rows(items.clone()),
            _ => ListView::Empty(self.text.empty),
        }
    }
}
