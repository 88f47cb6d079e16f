//! User-management scenarios against the in-process stub.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use apicheck_application::{ApplicationError, ApplicationResult};
use apicheck_scenarios::StubbedSuite;
use apicheck_scenarios::fixtures::admin_user;
use apicheck_scenarios::suites::users;

async fn stubbed() -> StubbedSuite {
    StubbedSuite::start().await.expect("Failed to start stubs")
}

#[tokio::test]
async fn test_register_new_user() -> ApplicationResult<()> {
    users::register_new_user(&*stubbed().await).await
}

#[tokio::test]
async fn test_register_existing_login() -> ApplicationResult<()> {
    users::register_existing_login(&*stubbed().await).await
}

#[tokio::test]
async fn test_register_without_password() -> ApplicationResult<()> {
    users::register_without_password(&*stubbed().await).await
}

#[tokio::test]
async fn test_admin_auth() -> ApplicationResult<()> {
    users::admin_auth(&*stubbed().await).await
}

#[tokio::test]
async fn test_new_user_auth() -> ApplicationResult<()> {
    users::new_user_auth(&*stubbed().await).await
}

#[tokio::test]
async fn test_wrong_credentials() -> ApplicationResult<()> {
    users::wrong_credentials(&*stubbed().await).await
}

#[tokio::test]
async fn test_user_info_with_token() -> ApplicationResult<()> {
    users::user_info_with_token(&*stubbed().await).await
}

#[tokio::test]
async fn test_user_info_with_invalid_token() -> ApplicationResult<()> {
    users::user_info_with_invalid_token(&*stubbed().await).await
}

#[tokio::test]
async fn test_user_info_without_token() -> ApplicationResult<()> {
    users::user_info_without_token(&*stubbed().await).await
}

#[tokio::test]
async fn test_change_password() -> ApplicationResult<()> {
    users::change_password(&*stubbed().await).await
}

#[tokio::test]
async fn test_change_admin_password() -> ApplicationResult<()> {
    users::change_admin_password(&*stubbed().await).await
}

#[tokio::test]
async fn test_delete_admin() -> ApplicationResult<()> {
    users::delete_admin(&*stubbed().await).await
}

#[tokio::test]
async fn test_delete_new_user() -> ApplicationResult<()> {
    users::delete_new_user(&*stubbed().await).await
}

#[tokio::test]
async fn test_list_users() -> ApplicationResult<()> {
    users::list_users(&*stubbed().await).await
}

#[tokio::test]
async fn test_failed_condition_reports_expected_and_actual() {
    use apicheck_domain::conditions::has_status_code;

    let suite = stubbed().await;
    let response = suite.users.auth(&admin_user()).await.unwrap();
    let err = response.should(has_status_code(401)).unwrap_err();

    match err {
        ApplicationError::ConditionFailed {
            description,
            actual,
            body,
            ..
        } => {
            assert_eq!(description, "status code 401");
            assert_eq!(actual, "200 OK");
            assert!(body.contains("token"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_deleted_user_cannot_log_in() -> ApplicationResult<()> {
    use apicheck_domain::conditions::has_status_code;

    let suite = stubbed().await;
    let user = apicheck_scenarios::fixtures::random_user();
    suite.users.register(&user).await?.should(has_status_code(201))?;
    let token = suite.users.auth(&user).await?.should(has_status_code(200))?.as_jwt()?;
    suite.users.delete_user(&token).await?.should(has_status_code(200))?;

    suite.users.auth(&user).await?.should(has_status_code(401))?;
    suite.users.get_user_info(&token).await?.should(has_status_code(401))?;
    Ok(())
}
