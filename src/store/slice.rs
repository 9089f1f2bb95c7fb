use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

/// Identifies one fetch issued against a slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// `{data, loading, error}` for one resource.
///
/// Setting data clears the error; setting an error keeps whatever data was
/// there. Each fetch replaces the data wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
    issued: u64,
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            issued: 0,
        }
    }
}

impl<T> Slice<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_data(&mut self, data: T) {
        self.data = Some(data);
        self.error = None;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Start a fetch: mark loading and hand out a fresh token
    pub fn begin(&mut self) -> RequestToken {
        self.issued += 1;
        self.loading = true;
        RequestToken(self.issued)
    }

    /// Whether `token` belongs to the most recently issued fetch
    pub fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }

    /// Apply the outcome of the fetch identified by `token`.
    ///
    /// Outcomes of superseded fetches are dropped and `false` is returned.
    pub fn finish(&mut self, token: RequestToken, outcome: Result<T, String>) -> bool {
        if !self.is_latest(token) {
            debug!(
                token = token.0,
                latest = self.issued,
                "discarding stale response"
            );
            return false;
        }
        match outcome {
            Ok(data) => self.set_data(data),
            Err(message) => self.set_error(message),
        }
        self.loading = false;
        true
    }
}

/// Cloneable handle to a slice shared between a page and its tasks
#[derive(Debug)]
pub struct SharedSlice<T> {
    inner: Arc<Mutex<Slice<T>>>,
}

impl<T> Clone for SharedSlice<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SharedSlice<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Slice::default())),
        }
    }
}

impl<T> SharedSlice<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with exclusive access to the slice
    pub async fn with<R>(&self, f: impl FnOnce(&mut Slice<T>) -> R) -> R {
        let mut guard = self.inner.lock().await;
        f(&mut guard)
    }

    pub async fn begin(&self) -> RequestToken {
        self.with(|slice| slice.begin()).await
    }

    pub async fn finish(&self, token: RequestToken, outcome: Result<T, String>) -> bool {
        self.with(|slice| slice.finish(token, outcome)).await
    }

    pub async fn snapshot(&self) -> Slice<T>
    where
        T: Clone,
    {
        self.inner.lock().await.clone()
    }
}
