//! File download and upload scenarios.

use std::io::Write;

use apicheck_application::{ApplicationError, ApplicationResult};
use apicheck_domain::ComparisonOperator;
use apicheck_domain::conditions::{has_body_length, has_status_code};

use crate::fixtures::upload_payload;
use crate::harness::Suite;

const UPLOAD_SIZE: usize = 16 * 1024;

/// The base file has the size of the reference copy.
///
/// Without a configured reference file only a non-empty body is required.
pub async fn download_base_file(suite: &Suite) -> ApplicationResult<()> {
    let response = suite.files.download_base_image().await?;
    response.should(has_status_code(200))?;

    match suite.reference_file() {
        Some(path) => {
            let expected = tokio::fs::metadata(path)
                .await
                .map_err(|source| ApplicationError::Io {
                    path: path.to_path_buf(),
                    source,
                })?
                .len();
            let expected = usize::try_from(expected).unwrap_or(usize::MAX);
            response.should(has_body_length(ComparisonOperator::Equals, expected))?;
        }
        None => {
            tracing::warn!("no reference file configured; checking for a non-empty body only");
            response.should(has_body_length(ComparisonOperator::GreaterThan, 0))?;
        }
    }
    Ok(())
}

/// An uploaded file comes back whole from the last-uploaded endpoint.
pub async fn upload_then_download(suite: &Suite) -> ApplicationResult<()> {
    let payload = upload_payload(UPLOAD_SIZE);
    let file = write_temp_file(&payload)?;

    suite.files.upload_file(file.path()).await?.should(has_status_code(200))?;

    suite
        .files
        .download_last_file()
        .await?
        .should(has_status_code(200))?
        .should(has_body_length(ComparisonOperator::GreaterThan, 0))?
        .should(has_body_length(ComparisonOperator::Equals, payload.len()))?;
    Ok(())
}

fn write_temp_file(bytes: &[u8]) -> ApplicationResult<tempfile::NamedTempFile> {
    let io_error = |source| ApplicationError::Io {
        path: std::env::temp_dir(),
        source,
    };
    let mut file = tempfile::NamedTempFile::new().map_err(io_error)?;
    file.write_all(bytes).map_err(io_error)?;
    file.flush().map_err(io_error)?;
    Ok(file)
}
