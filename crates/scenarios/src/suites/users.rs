//! User-management scenarios.

use apicheck_application::ApplicationResult;
use apicheck_domain::ComparisonOperator;
use apicheck_domain::conditions::{has_json_length, has_json_path, has_message, has_status_code};
use apicheck_domain::models::FullUser;

use super::ensure;
use crate::fixtures::{UPDATED_PASSWORD, admin_user, random_user, unknown_user};
use crate::harness::Suite;

/// A new user can register.
pub async fn register_new_user(suite: &Suite) -> ApplicationResult<()> {
    suite
        .users
        .register(&random_user())
        .await?
        .should(has_message("User created"))?
        .should(has_status_code(201))?;
    Ok(())
}

/// Registering the same login twice is refused.
pub async fn register_existing_login(suite: &Suite) -> ApplicationResult<()> {
    let user = random_user();
    suite.users.register(&user).await?.should(has_status_code(201))?;

    suite
        .users
        .register(&user)
        .await?
        .should(has_status_code(400))?
        .should(has_message("Login already exist"))?;
    Ok(())
}

/// Registration without a password is refused.
pub async fn register_without_password(suite: &Suite) -> ApplicationResult<()> {
    let user = FullUser {
        pass: None,
        ..random_user()
    };

    suite
        .users
        .register(&user)
        .await?
        .should(has_status_code(400))?
        .should(has_message("Missing login or password"))?;
    Ok(())
}

/// The administrator gets a token.
pub async fn admin_auth(suite: &Suite) -> ApplicationResult<()> {
    let token = suite.users.auth(&admin_user()).await?.should(has_status_code(200))?.as_jwt()?;
    tracing::debug!(token_len = token.len(), "admin authenticated");
    Ok(())
}

/// A freshly registered user gets a token.
pub async fn new_user_auth(suite: &Suite) -> ApplicationResult<()> {
    let user = random_user();
    suite
        .users
        .register(&user)
        .await?
        .should(has_status_code(201))?
        .should(has_message("User created"))?;

    suite
        .users
        .auth(&user)
        .await?
        .should(has_status_code(200))?
        .should(has_json_path("token"))?;
    Ok(())
}

/// Unknown credentials are rejected.
pub async fn wrong_credentials(suite: &Suite) -> ApplicationResult<()> {
    suite.users.auth(&unknown_user()).await?.should(has_status_code(401))?;
    Ok(())
}

/// A valid token reads the user record.
pub async fn user_info_with_token(suite: &Suite) -> ApplicationResult<()> {
    let token = suite.users.auth(&admin_user()).await?.should(has_status_code(200))?.as_jwt()?;

    let info = suite.users.get_user_info(&token).await?;
    let user: FullUser = info.should(has_status_code(200))?.as_type()?;
    ensure(user.login == "admin", "login 'admin'", &user.login, &info)
}

/// A malformed token is rejected.
pub async fn user_info_with_invalid_token(suite: &Suite) -> ApplicationResult<()> {
    suite.users.get_user_info("asfafa").await?.should(has_status_code(401))?;
    Ok(())
}

/// A request without a token is rejected.
pub async fn user_info_without_token(suite: &Suite) -> ApplicationResult<()> {
    suite.users.get_user_info_anonymous().await?.should(has_status_code(401))?;
    Ok(())
}

/// A user can change their password and log in with the new one.
pub async fn change_password(suite: &Suite) -> ApplicationResult<()> {
    let mut user = random_user();
    let old_password = user.pass.clone();
    suite
        .users
        .register(&user)
        .await?
        .should(has_status_code(201))?
        .should(has_message("User created"))?;
    let token = suite.users.auth(&user).await?.should(has_status_code(200))?.as_jwt()?;

    suite
        .users
        .update_pass(UPDATED_PASSWORD, &token)
        .await?
        .should(has_status_code(200))?
        .should(has_message("User password successfully changed"))?;

    user.pass = Some(UPDATED_PASSWORD.to_string());
    let token = suite.users.auth(&user).await?.should(has_status_code(200))?.as_jwt()?;

    let info = suite.users.get_user_info(&token).await?;
    let updated: FullUser = info.should(has_status_code(200))?.as_type()?;
    ensure(
        updated.pass != old_password,
        "a password different from the old one",
        &updated.pass,
        &info,
    )
}

/// Base users keep their password.
pub async fn change_admin_password(suite: &Suite) -> ApplicationResult<()> {
    let token = suite.users.auth(&admin_user()).await?.should(has_status_code(200))?.as_jwt()?;

    suite
        .users
        .update_pass("newPassUpdated", &token)
        .await?
        .should(has_status_code(400))?
        .should(has_message("Cant update base users"))?;
    Ok(())
}

/// Base users cannot be deleted.
pub async fn delete_admin(suite: &Suite) -> ApplicationResult<()> {
    let token = suite.users.auth(&admin_user()).await?.should(has_status_code(200))?.as_jwt()?;

    suite
        .users
        .delete_user(&token)
        .await?
        .should(has_status_code(400))?
        .should(has_message("Cant delete base users"))?;
    Ok(())
}

/// A registered user can delete themselves.
pub async fn delete_new_user(suite: &Suite) -> ApplicationResult<()> {
    let user = random_user();
    suite
        .users
        .register(&user)
        .await?
        .should(has_status_code(201))?
        .should(has_message("User created"))?;
    let token = suite.users.auth(&user).await?.should(has_status_code(200))?.as_jwt()?;

    suite
        .users
        .delete_user(&token)
        .await?
        .should(has_status_code(200))?
        .should(has_message("User successfully deleted"))?;
    Ok(())
}

/// The user list holds at least the base users.
pub async fn list_users(suite: &Suite) -> ApplicationResult<()> {
    let response = suite.users.get_all_users().await?;
    let logins: Vec<String> = response
        .should(has_status_code(200))?
        .should(has_json_length("", ComparisonOperator::GreaterThanOrEqual, 3))?
        .as_list()?;
    tracing::debug!(count = logins.len(), "users listed");
    Ok(())
}
