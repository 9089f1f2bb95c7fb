//! Configuration options for the estate admin client

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::auth::{FileSessionStore, SessionStore};
use crate::error::{Error, Result};

/// Value sent in the `X-Client-Info` header
pub const DEFAULT_CLIENT_INFO: &str = concat!("estate-admin/", env!("CARGO_PKG_VERSION"));

/// Configuration options for the estate admin client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Value of the `X-Client-Info` header
    pub client_info: String,

    /// Reject logins whose user is not an admin
    pub require_admin: bool,

    /// Where the logged-in session is persisted, if anywhere
    pub session_store: Option<Arc<dyn SessionStore>>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            client_info: DEFAULT_CLIENT_INFO.to_string(),
            require_admin: true,
            session_store: None,
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the `X-Client-Info` header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }

    /// Set whether only admin users may log in
    pub fn with_require_admin(mut self, value: bool) -> Self {
        self.require_admin = value;
        self
    }

    /// Persist sessions in the given store
    pub fn with_session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }
}

/// Connection settings for an admin API deployment
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub url: Url,
    pub options: ClientOptions,
}

impl AdminConfig {
    /// Creates a new configuration, validating the URL.
    pub fn new(url_str: &str) -> Result<Self> {
        let url = Url::parse(url_str)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "unsupported URL scheme: {}",
                url.scheme()
            )));
        }
        Ok(Self {
            url,
            options: ClientOptions::default(),
        })
    }

    /// Replace the client options
    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Reads `ESTATE_API_URL`, and optionally `ESTATE_API_TIMEOUT_SECS` and
    /// `ESTATE_SESSION_FILE`, from the environment.
    pub fn from_env() -> Result<Self> {
        let url_str = std::env::var("ESTATE_API_URL")
            .map_err(|_| Error::config("ESTATE_API_URL environment variable not found"))?;
        let mut config = Self::new(&url_str)?;

        if let Ok(secs) = std::env::var("ESTATE_API_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::config(format!("ESTATE_API_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            config.options.request_timeout = Some(Duration::from_secs(secs));
        }

        if let Ok(path) = std::env::var("ESTATE_SESSION_FILE") {
            config.options.session_store =
                Some(Arc::new(FileSessionStore::new(PathBuf::from(path))));
        }

        Ok(config)
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> String {
        self.url.as_str().trim_end_matches('/').to_string()
    }
}
