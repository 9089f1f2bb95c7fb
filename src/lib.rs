//! Estate Admin Client Library
//!
//! A Rust client for the real-estate admin API: authentication, users,
//! projects, properties, appointments, statistics and image uploads, plus
//! the page and form controllers of the admin dashboard built on top.

pub mod appointments;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod forms;
pub mod notice;
pub mod pages;
pub mod projects;
pub mod properties;
pub mod statistics;
pub mod storage;
pub mod store;
pub mod transport;
pub mod users;

use std::sync::Arc;

use reqwest::Client;

use crate::appointments::AppointmentsClient;
use crate::auth::{AuthClient, Session};
use crate::config::{AdminConfig, ClientOptions};
use crate::notice::Notifier;
use crate::pages::{
    AppointmentsPage, BrokersPage, BuyersPage, ProjectsPage, PropertiesPage, StatisticsPage,
};
use crate::projects::ProjectsClient;
use crate::properties::PropertiesClient;
use crate::statistics::StatisticsClient;
use crate::storage::StorageClient;
use crate::store::Store;
use crate::transport::Transport;
use crate::users::UsersClient;

pub use crate::error::{Error, Result};

/// The main entry point for the estate admin client
#[derive(Debug, Clone)]
pub struct EstateAdmin {
    /// Connection settings this client was built from
    pub config: AdminConfig,
    transport: Transport,
    auth: AuthClient,
    store: Store,
}

impl EstateAdmin {
    /// Create a new client
    ///
    /// # Example
    ///
    /// ```
    /// use estate_admin::EstateAdmin;
    ///
    /// let admin = EstateAdmin::new("https://admin.example.com").unwrap();
    /// assert_eq!(admin.base_url(), "https://admin.example.com");
    /// ```
    pub fn new(url: &str) -> Result<Self> {
        Self::from_config(AdminConfig::new(url)?)
    }

    /// Create a new client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use estate_admin::{EstateAdmin, config::ClientOptions};
    ///
    /// let options = ClientOptions::default().with_request_timeout(Some(Duration::from_secs(5)));
    /// let admin = EstateAdmin::new_with_options("https://admin.example.com", options).unwrap();
    /// ```
    pub fn new_with_options(url: &str, options: ClientOptions) -> Result<Self> {
        Self::from_config(AdminConfig::new(url)?.with_options(options))
    }

    /// Create a client from an already validated configuration
    pub fn from_config(config: AdminConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let transport = Transport::new(&config.base_url(), http_client, &config.options);
        let auth = AuthClient::new(transport.clone(), config.options.clone());

        Ok(Self {
            config,
            transport,
            auth,
            store: Store::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Get a reference to the auth client
    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// The view state shared by the pages built from this client
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn users(&self) -> UsersClient {
        UsersClient::new(self.transport.clone())
    }

    pub fn projects(&self) -> ProjectsClient {
        ProjectsClient::new(self.transport.clone())
    }

    pub fn properties(&self) -> PropertiesClient {
        PropertiesClient::new(self.transport.clone())
    }

    pub fn appointments(&self) -> AppointmentsClient {
        AppointmentsClient::new(self.transport.clone())
    }

    pub fn statistics(&self) -> StatisticsClient {
        StatisticsClient::new(self.transport.clone())
    }

    /// Image upload client
    pub fn storage(&self) -> StorageClient {
        StorageClient::new(self.transport.clone())
    }

    /// Pick up a persisted session, if one is stored and still valid
    pub async fn restore_session(&self) -> Result<Option<Session>> {
        let restored = self.auth.restore().await?;
        if let Some(session) = &restored {
            let session = session.clone();
            self.store.auth.with(|slice| slice.set_data(session)).await;
        }
        Ok(restored)
    }

    /// Sign out and reset the view state
    pub async fn logout(&self) -> Result<()> {
        self.auth.logout().await?;
        self.store.auth.with(|slice| *slice = Default::default()).await;
        Ok(())
    }

    pub fn brokers_page(&self, notifier: Arc<dyn Notifier>) -> BrokersPage {
        BrokersPage::brokers(self.users(), &self.store, notifier)
    }

    pub fn buyers_page(&self, notifier: Arc<dyn Notifier>) -> BuyersPage {
        BuyersPage::buyers(self.users(), &self.store, notifier)
    }

    pub fn projects_page(&self, notifier: Arc<dyn Notifier>) -> ProjectsPage {
        ProjectsPage::projects(self.projects(), &self.store, notifier)
    }

    pub fn properties_page(&self, notifier: Arc<dyn Notifier>) -> PropertiesPage {
        PropertiesPage::properties(self.properties(), &self.store, notifier)
    }

    pub fn appointments_page(&self, notifier: Arc<dyn Notifier>) -> AppointmentsPage {
        AppointmentsPage::appointments(self.appointments(), &self.store, notifier)
    }

    pub fn statistics_page(&self) -> StatisticsPage {
        StatisticsPage::new(self.statistics(), &self.store)
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::catalog::{
        AppointmentStatus, AppointmentType, AreaRange, CatalogEntry, Coded, PriceRange,
        ProjectFeature, PropertyStatus, PropertyType, Role,
    };
    pub use crate::config::{AdminConfig, ClientOptions};
    pub use crate::error::{Error, Result};
    pub use crate::forms::{BrokerForm, LoginForm, PasswordReset, ProjectForm, PropertyForm};
    pub use crate::notice::{Notice, NoticeLog, Notifier, TracingNotifier};
    pub use crate::pages::{DetailView, ListView};
    pub use crate::EstateAdmin;
}
