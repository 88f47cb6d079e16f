//! File endpoints of the user-management service.

use std::path::Path;

use apicheck_domain::{FilePart, RequestSpec};

use super::send;
use crate::assertable::AssertableResponse;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::HttpClient;

/// Form field the upload endpoint reads.
pub const UPLOAD_FIELD: &str = "file";
/// File name reported for every upload.
pub const UPLOAD_FILE_NAME: &str = "myFile";

/// Download and upload operations.
#[derive(Debug, Clone)]
pub struct FileService<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> FileService<C> {
    /// Creates the facade over a client bound to the service base URL.
    #[must_use]
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    /// Downloads the built-in base file.
    ///
    /// # Errors
    ///
    /// Returns an error if no response arrives.
    pub async fn download_base_image(&self) -> ApplicationResult<AssertableResponse> {
        send(&self.client, &RequestSpec::get("/api/files/download")).await
    }

    /// Downloads the most recently uploaded file.
    ///
    /// # Errors
    ///
    /// Returns an error if no response arrives.
    pub async fn download_last_file(&self) -> ApplicationResult<AssertableResponse> {
        send(&self.client, &RequestSpec::get("/api/files/downloadLastUploaded")).await
    }

    /// Uploads the content of a local file.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Io`] if the file cannot be read, or an
    /// error if no response arrives.
    pub async fn upload_file(&self, path: impl AsRef<Path>) -> ApplicationResult<AssertableResponse> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| ApplicationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.upload_bytes(bytes).await
    }

    /// Uploads raw bytes as a multipart form.
    ///
    /// # Errors
    ///
    /// Returns an error if no response arrives.
    pub async fn upload_bytes(&self, bytes: Vec<u8>) -> ApplicationResult<AssertableResponse> {
        tracing::debug!(size = bytes.len(), "uploading file");
        let request = RequestSpec::post("/api/files/upload")
            .with_multipart(FilePart::new(UPLOAD_FIELD, UPLOAD_FILE_NAME, bytes));
        send(&self.client, &request).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::testing::RecordingClient;
    use apicheck_domain::{HttpMethod, RequestBody, ResponseSpec};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write;

    fn service() -> FileService<RecordingClient> {
        FileService::new(RecordingClient::answering(ResponseSpec::json(200, &json!({}))))
    }

    #[tokio::test]
    async fn test_download_paths() {
        let service = service();
        service.download_base_image().await.unwrap();
        service.download_last_file().await.unwrap();

        let paths: Vec<_> = service.client.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/api/files/download", "/api/files/downloadLastUploaded"]);
    }

    #[tokio::test]
    async fn test_upload_file_reads_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3]).unwrap();

        let service = service();
        service.upload_file(file.path()).await.unwrap();

        let request = service.client.last();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "/api/files/upload");
        assert_eq!(
            request.body,
            RequestBody::Multipart(vec![FilePart::new(
                "file",
                "myFile",
                vec![0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3]
            )])
        );
    }

    #[tokio::test]
    async fn test_upload_missing_file() {
        let service = service();
        let err = service.upload_file("/nonexistent/threadqa.jpeg").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Io { .. }));
        assert!(service.client.requests().is_empty());
    }
}
