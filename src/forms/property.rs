use tracing::{info, warn};

use super::validation;
use crate::catalog::{AreaRange, PriceRange, PropertyStatus, PropertyType};
use crate::error::{Error, Result, ValidationFailure};
use crate::notice::{Notice, Notifier};
use crate::properties::{PropertiesClient, Property, PropertyPayload};
use crate::storage::{ImageFile, StorageClient, UploadKind};

fn parse_count(label: &str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .map_err(|err| Error::general(format!("{} is not a valid count: {}", label, err)))
}

/// Add a property to a project, or edit an existing one
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyForm {
    id: Option<String>,
    project_id: Option<String>,
    pub title: String,
    pub description: String,
    pub property_type: Option<PropertyType>,
    pub area_range: Option<AreaRange>,
    pub price_range: Option<PriceRange>,
    pub status: PropertyStatus,
    /// Raw text of the bedroom count input
    pub bedrooms: String,
    pub bathrooms: String,
    images: Vec<ImageFile>,
    pub existing_images: Vec<String>,
}

impl PropertyForm {
    /// Empty form for a new property under `project_id`
    pub fn for_project(project_id: &str) -> Self {
        Self {
            project_id: Some(project_id.to_string()),
            ..Self::default()
        }
    }

    pub fn from_property(property: &Property) -> Self {
        Self {
            id: Some(property.id.clone()),
            project_id: property.project.as_ref().map(|p| p.id().to_string()),
            title: property.title.clone(),
            description: property.description.clone(),
            property_type: property.property_type.known(),
            area_range: property.area_range.known(),
            price_range: property.price_range.known(),
            status: property.status.known().unwrap_or_default(),
            bedrooms: property.bedrooms.map(|n| n.to_string()).unwrap_or_default(),
            bathrooms: property.bathrooms.map(|n| n.to_string()).unwrap_or_default(),
            images: Vec::new(),
            existing_images: property.images.clone(),
        }
    }

    pub async fn load(client: &PropertiesClient, id: &str) -> Result<Self> {
        let property = client.get(id).await?;
        Ok(Self::from_property(&property))
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn images(&self) -> &[ImageFile] {
        &self.images
    }

    /// Replace the picked images.
    ///
    /// The whole selection is refused if any file is not an image; the
    /// previous selection is kept in that case.
    pub fn set_images(&mut self, files: Vec<ImageFile>, notifier: &dyn Notifier) -> Result<()> {
        if let Some(bad) = files.iter().find(|file| !file.is_image()) {
            warn!(file = %bad.name, content_type = %bad.content_type, "rejected non-image selection");
            notifier.notify(Notice::error("Invalid file type", validation::IMAGES_ONLY));
            let mut failure = ValidationFailure::default();
            failure.invalid(validation::IMAGES_ONLY);
            return Err(Error::Validation(failure));
        }
        self.images = files;
        Ok(())
    }

    /// Data URLs of the picked images for preview thumbnails
    pub fn previews(&self) -> Vec<String> {
        self.images.iter().map(ImageFile::data_url).collect()
    }

    pub fn check(&self) -> Result<()> {
        let mut failure = ValidationFailure::default();
        validation::require(&mut failure, "Title", &self.title);
        validation::require(&mut failure, "Description", &self.description);
        validation::require_some(&mut failure, "Type", self.property_type.as_ref());
        validation::require_some(&mut failure, "Area", self.area_range.as_ref());
        validation::require_some(&mut failure, "Price", self.price_range.as_ref());
        validation::require(&mut failure, "Bedrooms", &self.bedrooms);
        validation::require(&mut failure, "Bathrooms", &self.bathrooms);
        if !self.is_edit() {
            validation::require_some(&mut failure, "Project", self.project_id.as_ref());
        }
        if self.images.is_empty() && self.existing_images.is_empty() {
            failure.missing("Images");
        }

        for (label, value) in [("Bedrooms", &self.bedrooms), ("Bathrooms", &self.bathrooms)] {
            if value.trim().is_empty() {
                continue;
            }
            if !validation::is_digits(value) {
                failure.invalid(format!("{} must be a whole number", label));
            } else if parse_count(label, value).is_err() {
                failure.invalid(format!("{} is too large", label));
            }
        }
        validation::finish(failure)
    }

    fn payload(&self, images: Vec<String>) -> Result<PropertyPayload> {
        let pick = |label: &str| Error::general(format!("{} not selected", label));
        Ok(PropertyPayload {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            property_type: self.property_type.ok_or_else(|| pick("type"))?,
            area_range: self.area_range.ok_or_else(|| pick("area"))?,
            price_range: self.price_range.ok_or_else(|| pick("price"))?,
            status: self.status,
            bedrooms: Some(parse_count("Bedrooms", &self.bedrooms)?),
            bathrooms: Some(parse_count("Bathrooms", &self.bathrooms)?),
            images,
        })
    }

    async fn write(&self, client: &PropertiesClient, uploaded: Vec<String>) -> Result<Property> {
        let mut images = self.existing_images.clone();
        images.extend(uploaded);
        let payload = self.payload(images)?;

        match (&self.id, &self.project_id) {
            (Some(id), _) => client.update(id, &payload).await,
            (None, Some(project_id)) => client.add_to_project(project_id, &payload).await,
            (None, None) => Err(Error::general("property has no project")),
        }
    }

    /// Upload new images, then create or update the property
    pub async fn submit(
        &self,
        client: &PropertiesClient,
        storage: &StorageClient,
        notifier: &dyn Notifier,
    ) -> Result<Property> {
        let fallback = if self.is_edit() {
            "Failed to update property"
        } else {
            "Failed to add property"
        };
        if let Err(err) = self.check() {
            notifier.notify(Notice::from_error(&err, fallback));
            return Err(err);
        }

        let outcome = if self.images.is_empty() {
            self.write(client, Vec::new()).await
        } else {
            storage
                .upload_then(&self.images, UploadKind::Property, |urls| self.write(client, urls))
                .await
        };

        match outcome {
            Ok(property) => {
                info!(id = %property.id, edit = self.is_edit(), "property saved");
                let text = if self.is_edit() {
                    "Property updated successfully!"
                } else {
                    "Property added successfully!"
                };
                notifier.notify(Notice::success("Success", text));
                Ok(property)
            }
            Err(err) => {
                notifier.notify(Notice::from_error(&err, fallback));
                Err(err)
            }
        }
    }
}
