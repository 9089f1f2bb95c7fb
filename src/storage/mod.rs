//! Image uploads and the compensating discard for failed record writes

mod types;

use std::future::Future;

use reqwest::multipart::{Form, Part};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::fetch::{ensure_success, Envelope};
use crate::transport::Transport;

pub use types::*;

/// Client for `/api/upload`
#[derive(Clone, Debug)]
pub struct StorageClient {
    transport: Transport,
}

impl StorageClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Upload images and return their stored URLs, in the order given
    pub async fn upload(&self, files: &[ImageFile], kind: UploadKind) -> Result<Vec<String>> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let mut form = Form::new().text("type", kind.code());
        for file in files {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.name.clone())
                .mime_str(&file.content_type)?;
            form = form.part("files", part);
        }

        let mut request = self
            .transport
            .http()
            .post(self.transport.url("/api/upload"))
            .header("X-Client-Info", self.transport.client_info())
            .multipart(form);
        if let Some(token) = self.transport.token() {
            request = request.bearer_auth(token);
        }

        let response = ensure_success(request.send().await?).await?;
        let body = response.json::<Envelope<UploadedUrls>>().await?;

        if body.data.urls.len() != files.len() {
            return Err(Error::upload(format!(
                "expected {} URLs, server returned {}",
                files.len(),
                body.data.urls.len()
            )));
        }

        info!(count = files.len(), kind = kind.code(), "images uploaded");
        Ok(body.data.urls)
    }

    /// Delete previously uploaded images
    pub async fn discard(&self, urls: &[String]) -> Result<()> {
        if urls.is_empty() {
            return Ok(());
        }
        self.transport
            .delete("/api/upload")
            .json(&DiscardRequest { urls })?
            .execute_empty()
            .await?;
        info!(count = urls.len(), "uploaded images discarded");
        Ok(())
    }

    /// Upload `files`, then run `write` with the resulting URLs.
    ///
    /// If `write` fails the uploaded images are discarded before its error is
    /// returned. A failed discard is logged, not reported; the write error wins.
    pub async fn upload_then<T, F, Fut>(&self, files: &[ImageFile], kind: UploadKind, write: F) -> Result<T>
    where
        F: FnOnce(Vec<String>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let urls = self.upload(files, kind).await?;
        match write(urls.clone()).await {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(error = %err, count = urls.len(), "record write failed after upload");
                if let Err(cleanup) = self.discard(&urls).await {
                    warn!(error = %cleanup, ?urls, "could not discard orphaned uploads");
                }
                Err(err)
            }
        }
    }
}
