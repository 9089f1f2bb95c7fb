//! Types for image uploads

use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What an upload is attached to; the server files it accordingly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    User,
    Project,
    Property,
}

impl UploadKind {
    pub fn code(self) -> &'static str {
        match self {
            UploadKind::User => "user",
            UploadKind::Project => "project",
            UploadKind::Property => "property",
        }
    }
}

/// A local file picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            content_type: content_type.to_string(),
            bytes,
        }
    }

    /// Read a file from disk, inferring its content type from the extension
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .ok_or_else(|| Error::upload(format!("not a file path: {}", path.display())))?;
        let content_type = content_type_for(path).to_string();
        Ok(Self {
            name,
            content_type,
            bytes,
        })
    }

    /// True for any `image/*` content type
    pub fn is_image(&self) -> bool {
        self.content_type
            .parse::<mime::Mime>()
            .map(|m| m.type_() == mime::IMAGE)
            .unwrap_or(false)
    }

    /// `data:` URL for showing a preview before upload
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, BASE64.encode(&self.bytes))
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UploadedUrls {
    #[serde(default)]
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DiscardRequest<'a> {
    pub urls: &'a [String],
}
