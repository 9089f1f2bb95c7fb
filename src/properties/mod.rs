//! Property listing, lookup and mutation

mod types;

use tracing::info;

use crate::error::Result;
use crate::transport::Transport;

pub use types::*;

/// Client for properties, both project-scoped and standalone
#[derive(Clone, Debug)]
pub struct PropertiesClient {
    transport: Transport,
}

impl PropertiesClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Search properties across all projects
    pub async fn search(&self, filter: &PropertyFilter) -> Result<Vec<Property>> {
        let page = self
            .transport
            .post("/api/projects/list-properties")
            .json(&filter.to_request())?
            .execute_data::<PropertyPage>()
            .await?;
        Ok(page.properties)
    }

    pub async fn get(&self, id: &str) -> Result<Property> {
        self.transport
            .get(&format!("/api/projects/property/{}", id))
            .execute_data::<Property>()
            .await
    }

    /// Create a property owned by `project_id`
    pub async fn add_to_project(&self, project_id: &str, payload: &PropertyPayload) -> Result<Property> {
        let property = self
            .transport
            .post(&format!("/api/projects/{}/property", project_id))
            .json(payload)?
            .execute_data::<Property>()
            .await?;
        info!(project_id, property_id = %property.id, "property added to project");
        Ok(property)
    }

    pub async fn update(&self, id: &str, payload: &PropertyPayload) -> Result<Property> {
        let property = self
            .transport
            .put(&format!("/api/projects/property/{}", id))
            .json(payload)?
            .execute_data::<Property>()
            .await?;
        info!(property_id = id, "property updated");
        Ok(property)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.transport
            .delete(&format!("/api/projects/property/{}", id))
            .execute_empty()
            .await?;
        info!(property_id = id, "property deleted");
        Ok(())
    }

    /// List properties from `/api/properties`
    pub async fn list_standalone(&self) -> Result<Vec<Property>> {
        self.transport
            .get("/api/properties")
            .execute_data::<Vec<Property>>()
            .await
    }

    pub async fn create_standalone(&self, payload: &PropertyPayload) -> Result<Property> {
        let property = self
            .transport
            .post("/api/properties")
            .json(payload)?
            .execute_data::<Property>()
            .await?;
        info!(property_id = %property.id, "property created");
        Ok(property)
    }

    pub async fn delete_standalone(&self, id: &str) -> Result<()> {
        self.transport
            .delete(&format!("/api/properties/{}", id))
            .execute_empty()
            .await?;
        info!(property_id = id, "property deleted");
        Ok(())
    }
}
