//! Property records, write payloads and list filters

use serde::{Deserialize, Serialize};

use crate::catalog::{AreaRange, Coded, PriceRange, PropertyStatus, PropertyType};

/// Reference from a property to the project that owns it.
///
/// The server sends either the bare id or a populated summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectRef {
    Id(String),
    Summary {
        #[serde(rename = "_id", alias = "id")]
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl ProjectRef {
    pub fn id(&self) -> &str {
        match self {
            ProjectRef::Id(id) | ProjectRef::Summary { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(rename = "type")]
    pub property_type: Coded<PropertyType>,

    pub area_range: Coded<AreaRange>,

    pub price_range: Coded<PriceRange>,

    #[serde(default)]
    pub status: Coded<PropertyStatus>,

    #[serde(default)]
    pub bedrooms: Option<u32>,

    #[serde(default)]
    pub bathrooms: Option<u32>,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectRef>,
}

impl Property {
    /// First image, used as the card thumbnail
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Body of property create and update calls
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPayload {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub area_range: AreaRange,
    pub price_range: PriceRange,
    pub status: PropertyStatus,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub images: Vec<String>,
}

/// Search text and dropdown selections of the property list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFilter {
    pub search: String,
    pub property_type: Option<PropertyType>,
    pub area_range: Option<AreaRange>,
    pub price_range: Option<PriceRange>,
}

impl PropertyFilter {
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_string();
        self
    }

    pub fn with_type(mut self, value: PropertyType) -> Self {
        self.property_type = Some(value);
        self
    }

    pub fn with_area(mut self, value: AreaRange) -> Self {
        self.area_range = Some(value);
        self
    }

    pub fn with_price(mut self, value: PriceRange) -> Self {
        self.price_range = Some(value);
        self
    }

    /// True when neither search text nor any dropdown is set
    pub fn is_unfiltered(&self) -> bool {
        self.search.trim().is_empty()
            && self.property_type.is_none()
            && self.area_range.is_none()
            && self.price_range.is_none()
    }

    /// Request body of the search.
    ///
    /// The search text is trimmed first; text that is only whitespace is
    /// no search at all and sends neither `key` nor `all: false`.
    pub(crate) fn to_request(&self) -> PropertySearch {
        let key = self.search.trim();
        PropertySearch {
            all: self.is_unfiltered(),
            key: (!key.is_empty()).then(|| key.to_string()),
            property_type: self.property_type,
            area_range: self.area_range,
            price_range: self.price_range,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PropertySearch {
    pub all: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_range: Option<AreaRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PropertyPage {
    #[serde(default)]
    pub properties: Vec<Property>,
}
