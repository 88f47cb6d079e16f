//! File scenarios against the in-process stub.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use apicheck_application::ApplicationResult;
use apicheck_domain::conditions::has_status_code;
use apicheck_scenarios::StubbedSuite;
use apicheck_scenarios::stub::user_service::BASE_FILE;
use apicheck_scenarios::suites::files;

async fn stubbed() -> StubbedSuite {
    StubbedSuite::start().await.expect("Failed to start stubs")
}

#[tokio::test]
async fn test_download_base_file() -> ApplicationResult<()> {
    files::download_base_file(&*stubbed().await).await
}

#[tokio::test]
async fn test_upload_then_download() -> ApplicationResult<()> {
    files::upload_then_download(&*stubbed().await).await
}

#[tokio::test]
async fn test_base_file_bytes_are_intact() -> ApplicationResult<()> {
    let suite = stubbed().await;
    let response = suite.files.download_base_image().await?;
    response.should(has_status_code(200))?;
    assert_eq!(response.as_bytes(), BASE_FILE);
    assert_eq!(response.as_response().content_type(), Some("image/jpeg"));
    Ok(())
}

#[tokio::test]
async fn test_uploaded_bytes_round_trip() -> ApplicationResult<()> {
    let suite = stubbed().await;
    let payload = apicheck_scenarios::fixtures::upload_payload(3000);
    suite.files.upload_bytes(payload.clone()).await?.should(has_status_code(200))?;

    let response = suite.files.download_last_file().await?;
    assert_eq!(response.as_bytes(), payload.as_slice());
    Ok(())
}
