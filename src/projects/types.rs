use serde::{Deserialize, Serialize};

use crate::catalog::{Coded, ProjectFeature};
use crate::properties::Property;

/// A development and the properties listed under it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub developer: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default)]
    pub features: Vec<Coded<ProjectFeature>>,

    #[serde(default)]
    pub properties: Vec<Property>,
}

/// Body of project create and update calls
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    pub name: String,
    pub developer: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub features: Vec<Coded<ProjectFeature>>,
    pub image: Option<String>,
}
