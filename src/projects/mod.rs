//! Project CRUD

mod types;

use serde_json::Value;
use tracing::{info, warn};

use crate::error::Result;
use crate::transport::Transport;

pub use types::*;

/// Client for `/api/projects`
#[derive(Clone, Debug)]
pub struct ProjectsClient {
    transport: Transport,
}

impl ProjectsClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// List projects matching `query`; an empty query lists everything.
    ///
    /// A `data` field that is not an array counts as no projects.
    pub async fn list(&self, query: &str) -> Result<Vec<Project>> {
        let query = query.trim();
        let data = self
            .transport
            .get("/api/projects")
            .query_opt("query", (!query.is_empty()).then_some(query))
            .execute_data::<Value>()
            .await?;

        match data {
            Value::Array(_) => Ok(serde_json::from_value(data)?),
            other => {
                warn!(kind = ?other, "project list payload is not an array");
                Ok(Vec::new())
            }
        }
    }

    pub async fn get(&self, id: &str) -> Result<Project> {
        self.transport
            .get(&format!("/api/projects/{}", id))
            .execute_data::<Project>()
            .await
    }

    pub async fn create(&self, payload: &ProjectPayload) -> Result<Project> {
        let project = self
            .transport
            .post("/api/projects")
            .json(payload)?
            .execute_data::<Project>()
            .await?;
        info!(project_id = %project.id, "project created");
        Ok(project)
    }

    pub async fn update(&self, id: &str, payload: &ProjectPayload) -> Result<Project> {
        let project = self
            .transport
            .put(&format!("/api/projects/{}", id))
            .json(payload)?
            .execute_data::<Project>()
            .await?;
        info!(project_id = id, "project updated");
        Ok(project)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.transport
            .delete(&format!("/api/projects/{}", id))
            .execute_empty()
            .await?;
        info!(project_id = id, "project deleted");
        Ok(())
    }
}
