// SPDX-License-Identifier: MPL-2.0
//! Multipart submission of the two archives to the processing backend.

use crate::archive::ArchivePayload;
use crate::error::UploadError;
use reqwest::multipart::{Form, Part};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// MIME type attached to both file parts.
pub const ZIP_MIME: &str = "application/zip";

/// Upper bound on the buffer reserved up front from an announced `Content-Length`.
const MAX_BODY_PREALLOCATION: u64 = 64 * 1024 * 1024;

const USER_AGENT: &str = concat!("YearbookGallery/", env!("CARGO_PKG_VERSION"));

/// Multipart part names expected by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub portrait: String,
    pub candids: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            portrait: crate::config::DEFAULT_PORTRAIT_FIELD.to_string(),
            candids: crate::config::DEFAULT_CANDIDS_FIELD.to_string(),
        }
    }
}

/// Everything needed to perform one upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub endpoint: String,
    pub portrait: PathBuf,
    pub candid: PathBuf,
    pub fields: FieldNames,
    pub timeout: Duration,
}

async fn file_part(path: &Path) -> Result<Part, UploadError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| UploadError::ReadFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Part::bytes(bytes).file_name(file_name).mime_str(ZIP_MIME)?)
}

/// Posts both archives and collects the processed archive from the response.
///
/// `progress_callback` receives the fraction of the response body received,
/// and is only called when the server announces a `Content-Length`.
///
/// # Errors
///
/// Returns an [`UploadError`] when a file cannot be read, the request
/// fails, the server answers with a non-success status or the body stream
/// breaks off.
pub async fn submit(
    request: UploadRequest,
    mut progress_callback: impl FnMut(f32) + Send,
) -> Result<ArchivePayload, UploadError> {
    use futures_util::StreamExt;

    let form = Form::new()
        .part(request.fields.portrait.clone(), file_part(&request.portrait).await?)
        .part(request.fields.candids.clone(), file_part(&request.candid).await?);

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(request.timeout)
        .build()?;

    tracing::info!(endpoint = %request.endpoint, "uploading archives");

    let response = client.post(&request.endpoint).multipart(form).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(UploadError::Status(status.as_u16()));
    }

    let total_size = response.content_length().unwrap_or(0);
    let mut received: u64 = 0;
    let mut body =
        Vec::with_capacity(usize::try_from(total_size.min(MAX_BODY_PREALLOCATION)).unwrap_or(0));
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| UploadError::Body(e.to_string()))?;
        body.extend_from_slice(&chunk);
        received += chunk.len() as u64;

        if total_size > 0 {
            #[allow(clippy::cast_precision_loss)]
            let progress = (received as f32 / total_size as f32).min(1.0);
            progress_callback(progress);
        }
    }

    tracing::info!(bytes = body.len(), "processed archive received");
    Ok(ArchivePayload::from_bytes(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_field_names_match_backend() {
        let fields = FieldNames::default();
        assert_eq!(fields.portrait, "portrait_zip");
        assert_eq!(fields.candids, "candids_zip");
    }

    #[tokio::test]
    async fn missing_file_fails_before_any_request() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let request = UploadRequest {
            // Port 9 (discard) is never contacted: reading the file fails first.
            endpoint: "http://127.0.0.1:9/upload".into(),
            portrait: temp_dir.path().join("absent.zip"),
            candid: temp_dir.path().join("also-absent.zip"),
            fields: FieldNames::default(),
            timeout: Duration::from_secs(5),
        };

        let err = submit(request, |_| {}).await.unwrap_err();
        assert!(matches!(err, UploadError::ReadFile { .. }));
    }
}
