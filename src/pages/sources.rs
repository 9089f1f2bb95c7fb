use std::sync::Arc;

use async_trait::async_trait;

use super::{ListPage, ListSource, PageText};
use crate::appointments::{Appointment, AppointmentsClient};
use crate::auth::User;
use crate::error::Result;
use crate::notice::Notifier;
use crate::projects::{Project, ProjectsClient};
use crate::properties::{PropertiesClient, Property, PropertyFilter};
use crate::store::Store;
use crate::users::UsersClient;

pub type BrokersPage = ListPage<BrokerSource>;
pub type BuyersPage = ListPage<BuyerSource>;
pub type ProjectsPage = ListPage<ProjectSource>;
pub type PropertiesPage = ListPage<PropertySource>;
pub type AppointmentsPage = ListPage<AppointmentSource>;

pub const BROKERS_TEXT: PageText = PageText {
    empty: "No brokers available",
    load_failed: "Failed to load brokers",
    delete_failed: "Failed to delete broker",
    deleted: "The broker has been removed.",
};

pub const BUYERS_TEXT: PageText = PageText {
    empty: "No buyers available",
    load_failed: "Failed to load buyers",
    delete_failed: "Failed to delete buyer",
    deleted: "The buyer has been removed.",
};

pub const PROJECTS_TEXT: PageText = PageText {
    empty: "No projects available",
    load_failed: "Failed to load projects",
    delete_failed: "Failed to delete project",
    deleted: "Project has been deleted successfully.",
};

pub const PROPERTIES_TEXT: PageText = PageText {
    empty: "No properties available",
    load_failed: "Failed to load properties",
    delete_failed: "Failed to delete property",
    deleted: "Property has been deleted successfully.",
};

pub const APPOINTMENTS_TEXT: PageText = PageText {
    empty: "No appointments available",
    load_failed: "Failed to load appointments",
    delete_failed: "Appointments cannot be deleted",
    deleted: "",
};

/// Users with the broker role
#[derive(Clone, Debug)]
pub struct BrokerSource(pub UsersClient);

#[async_trait]
impl ListSource for BrokerSource {
    type Item = User;
    type Query = ();

    async fn fetch(&self, _query: &()) -> Result<Vec<User>> {
        self.0.brokers().await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.0.delete(id).await
    }
}

/// Users with the buyer role
#[derive(Clone, Debug)]
pub struct BuyerSource(pub UsersClient);

#[async_trait]
impl ListSource for BuyerSource {
    type Item = User;
    type Query = ();

    async fn fetch(&self, _query: &()) -> Result<Vec<User>> {
        self.0.buyers().await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.0.delete(id).await
    }
}

/// Projects matching the search box text
#[derive(Clone, Debug)]
pub struct ProjectSource(pub ProjectsClient);

#[async_trait]
impl ListSource for ProjectSource {
    type Item = Project;
    type Query = String;

    async fn fetch(&self, query: &String) -> Result<Vec<Project>> {
        self.0.list(query).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.0.delete(id).await
    }
}

/// Properties matching the search text and dropdowns
#[derive(Clone, Debug)]
pub struct PropertySource(pub PropertiesClient);

#[async_trait]
impl ListSource for PropertySource {
    type Item = Property;
    type Query = PropertyFilter;

    async fn fetch(&self, query: &PropertyFilter) -> Result<Vec<Property>> {
        self.0.search(query).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.0.delete(id).await
    }
}

#[derive(Clone, Debug)]
pub struct AppointmentSource(pub AppointmentsClient);

#[async_trait]
impl ListSource for AppointmentSource {
    type Item = Appointment;
    type Query = ();

    async fn fetch(&self, _query: &()) -> Result<Vec<Appointment>> {
        self.0.list().await
    }
}

impl BrokersPage {
    pub fn brokers(users: UsersClient, store: &Store, notifier: Arc<dyn Notifier>) -> Self {
        ListPage::new(BrokerSource(users), store.brokers.clone(), notifier, BROKERS_TEXT)
    }
}

impl BuyersPage {
    pub fn buyers(users: UsersClient, store: &Store, notifier: Arc<dyn Notifier>) -> Self {
        ListPage::new(BuyerSource(users), store.buyers.clone(), notifier, BUYERS_TEXT)
    }
}

impl ProjectsPage {
    pub fn projects(projects: ProjectsClient, store: &Store, notifier: Arc<dyn Notifier>) -> Self {
        ListPage::new(ProjectSource(projects), store.projects.clone(), notifier, PROJECTS_TEXT)
    }
}

impl PropertiesPage {
    pub fn properties(
        properties: PropertiesClient,
        store: &Store,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        ListPage::new(
            PropertySource(properties),
            store.properties.clone(),
            notifier,
            PROPERTIES_TEXT,
        )
    }
}

impl AppointmentsPage {
    pub fn appointments(
        appointments: AppointmentsClient,
        store: &Store,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        ListPage::new(
            AppointmentSource(appointments),
            store.appointments.clone(),
            notifier,
            APPOINTMENTS_TEXT,
        )
    }
}
