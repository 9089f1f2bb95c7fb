//! Dashboard statistics snapshot

use serde::{Deserialize, Serialize};

use crate::catalog::{Coded, PropertyStatus, Role};
use crate::error::Result;
use crate::transport::Transport;

/// Count and share of one bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Share {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub percentage: f64,
}

/// Row of the "latest properties" table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestProperty {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    pub status: Coded<PropertyStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub available: Share,
    #[serde(default)]
    pub reserved: Share,
    #[serde(default)]
    pub sold: Share,
    #[serde(default)]
    pub latest: Vec<LatestProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub buyers: Share,
    #[serde(default)]
    pub brokers: Share,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointmentStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub completed: Share,
}

/// Aggregates recomputed by the server on every fetch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub properties: PropertyStats,
    #[serde(default)]
    pub users: UserStats,
    #[serde(default)]
    pub appointments: AppointmentStats,
}

impl Statistics {
    /// Pie series of properties per status
    pub fn property_breakdown(&self) -> Vec<(PropertyStatus, Share)> {
        vec![
            (PropertyStatus::Available, self.properties.available),
            (PropertyStatus::Reserved, self.properties.reserved),
            (PropertyStatus::Sold, self.properties.sold),
        ]
    }

    /// Pie series of users per role
    pub fn user_breakdown(&self) -> Vec<(Role, Share)> {
        vec![
            (Role::Buyer, self.users.buyers),
            (Role::Broker, self.users.brokers),
        ]
    }
}

// Older deployments answer with the bare snapshot.
#[derive(Deserialize)]
#[serde(untagged)]
enum StatisticsBody {
    Wrapped { data: Statistics },
    Bare(Statistics),
}

/// Client for `/api/statistics`
#[derive(Clone, Debug)]
pub struct StatisticsClient {
    transport: Transport,
}

impl StatisticsClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn fetch(&self) -> Result<Statistics> {
        let body = self
            .transport
            .get("/api/statistics")
            .execute::<StatisticsBody>()
            .await?;
        Ok(match body {
            StatisticsBody::Wrapped { data } | StatisticsBody::Bare(data) => data,
        })
    }
}
