use std::collections::BTreeSet;

use tracing::info;

use super::validation;
use crate::catalog::{Coded, ProjectFeature};
use crate::error::{Result, ValidationFailure};
use crate::notice::{Notice, Notifier};
use crate::projects::{Project, ProjectPayload, ProjectsClient};
use crate::storage::{ImageFile, StorageClient, UploadKind};

/// Create or edit a project.
///
/// An edit form is only built from a fetched record, so every field is
/// populated before it is shown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectForm {
    id: Option<String>,
    pub name: String,
    pub developer: String,
    pub description: String,
    pub location: String,
    pub features: BTreeSet<ProjectFeature>,
    /// Features on the record that are not in the catalog, sent back unchanged
    other_features: Vec<String>,
    /// A newly picked image, replacing `existing_image` on save
    pub image: Option<ImageFile>,
    pub existing_image: Option<String>,
}

impl ProjectForm {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn from_project(project: &Project) -> Self {
        Self {
            id: Some(project.id.clone()),
            name: project.name.clone(),
            developer: project.developer.clone(),
            description: project.description.clone(),
            location: project.location.clone().unwrap_or_default(),
            features: project.features.iter().filter_map(Coded::known).collect(),
            other_features: project
                .features
                .iter()
                .filter(|feature| feature.known().is_none())
                .map(|feature| feature.code().to_string())
                .collect(),
            image: None,
            existing_image: project.image.clone(),
        }
    }

    /// Fetch project `id` and prefill the form with it
    pub async fn load(client: &ProjectsClient, id: &str) -> Result<Self> {
        let project = client.get(id).await?;
        Ok(Self::from_project(&project))
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// Add `feature` if absent, remove it otherwise; returns whether it is now set
    pub fn toggle_feature(&mut self, feature: ProjectFeature) -> bool {
        if self.features.remove(&feature) {
            false
        } else {
            self.features.insert(feature);
            true
        }
    }

    pub fn has_feature(&self, feature: ProjectFeature) -> bool {
        self.features.contains(&feature)
    }

    pub fn check(&self) -> Result<()> {
        let mut failure = ValidationFailure::default();
        validation::require(&mut failure, "Name", &self.name);
        validation::require(&mut failure, "Developer", &self.developer);
        validation::require(&mut failure, "Description", &self.description);
        validation::require(&mut failure, "Location", &self.location);
        match (&self.image, &self.existing_image) {
            (Some(image), _) if !image.is_image() => failure.invalid(validation::IMAGES_ONLY),
            (None, None) => failure.missing("Image"),
            _ => {}
        }
        validation::finish(failure)
    }

    fn payload(&self, image: Option<String>) -> ProjectPayload {
        ProjectPayload {
            name: self.name.trim().to_string(),
            developer: self.developer.trim().to_string(),
            description: self.description.trim().to_string(),
            location: Some(self.location.trim().to_string()),
            features: self
                .features
                .iter()
                .copied()
                .map(Coded::Known)
                .chain(self.other_features.iter().cloned().map(Coded::Other))
                .collect(),
            image,
        }
    }

    async fn write(&self, client: &ProjectsClient, image: Option<String>) -> Result<Project> {
        let payload = self.payload(image);
        match &self.id {
            Some(id) => client.update(id, &payload).await,
            None => client.create(&payload).await,
        }
    }

    /// Save the project, uploading a newly picked image first
    pub async fn submit(
        &self,
        client: &ProjectsClient,
        storage: &StorageClient,
        notifier: &dyn Notifier,
    ) -> Result<Project> {
        let fallback = if self.is_edit() {
            "Failed to update project"
        } else {
            "Failed to create project"
        };
        if let Err(err) = self.check() {
            notifier.notify(Notice::from_error(&err, fallback));
            return Err(err);
        }

        let outcome = match &self.image {
            Some(image) => {
                storage
                    .upload_then(std::slice::from_ref(image), UploadKind::Project, |urls| {
                        self.write(client, urls.into_iter().next())
                    })
                    .await
            }
            None => self.write(client, self.existing_image.clone()).await,
        };

        match outcome {
            Ok(project) => {
                info!(id = %project.id, edit = self.is_edit(), "project saved");
                let text = if self.is_edit() {
                    "Project updated successfully!"
                } else {
                    "Project created successfully!"
                };
                notifier.notify(Notice::success("Success", text));
                Ok(project)
            }
            Err(err) => {
                notifier.notify(Notice::from_error(&err, fallback));
                Err(err)
            }
        }
    }
}
