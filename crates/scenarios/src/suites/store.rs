//! Fake store scenarios.

use apicheck_application::{ApplicationResult, SortOrder};
use apicheck_domain::ComparisonOperator;
use apicheck_domain::conditions::{
    has_json_length, has_json_path, has_json_value, has_status_code, matches_json_pattern,
};
use apicheck_domain::models::StoreUser;

use super::ensure;
use crate::fixtures::{sample_store_user, store_credentials};
use crate::harness::Suite;

/// Limits the store honours.
pub const VALID_LIMITS: [usize; 2] = [1, 10];
/// Limits the store ignores.
pub const IGNORED_LIMITS: [usize; 2] = [0, 40];

/// The user list is available.
pub async fn list_users(suite: &Suite) -> ApplicationResult<()> {
    suite.store.get_users().await?.should(has_status_code(200))?;
    Ok(())
}

/// User 5 exists and has a `ddddd-dddd` zip code.
pub async fn single_user(suite: &Suite) -> ApplicationResult<()> {
    let response = suite.store.get_user(5).await?;
    let user: StoreUser = response
        .should(has_status_code(200))?
        .should(has_json_value("id", 5))?
        .should(matches_json_pattern("address.zipcode", r"^\d{5}-\d{4}$")?)?
        .as_type()?;
    tracing::debug!(username = %user.username, "store user fetched");
    Ok(())
}

/// `limit` returns exactly that many users.
pub async fn limited_users(suite: &Suite, limit: usize) -> ApplicationResult<()> {
    let users: Vec<StoreUser> = suite
        .store
        .get_users_limited(limit)
        .await?
        .should(has_status_code(200))?
        .should(has_json_length("", ComparisonOperator::Equals, limit))?
        .as_list()?;
    tracing::debug!(count = users.len(), limit, "limited users listed");
    Ok(())
}

/// An out-of-range `limit` does not cap the list at that value.
pub async fn ignored_limit(suite: &Suite, limit: usize) -> ApplicationResult<()> {
    suite
        .store
        .get_users_limited(limit)
        .await?
        .should(has_status_code(200))?
        .should(has_json_length("", ComparisonOperator::NotEquals, limit))?;
    Ok(())
}

/// `sort=desc` returns the ids of the plain list in reverse order.
pub async fn sorted_desc(suite: &Suite) -> ApplicationResult<()> {
    let sorted_response = suite.store.get_users_sorted(SortOrder::Desc).await?;
    let sorted: Vec<StoreUser> = sorted_response.should(has_status_code(200))?.as_list()?;
    let plain: Vec<StoreUser> = suite.store.get_users().await?.should(has_status_code(200))?.as_list()?;

    let sorted_ids: Vec<Option<u64>> = sorted.iter().map(|u| u.id).collect();
    let plain_ids: Vec<Option<u64>> = plain.iter().map(|u| u.id).collect();
    let mut expected = plain_ids.clone();
    expected.sort_by(|a, b| b.cmp(a));

    ensure(
        sorted_ids != plain_ids,
        "an order different from the plain list",
        &sorted_ids,
        &sorted_response,
    )?;
    ensure(
        sorted_ids == expected,
        &format!("ids in descending order {expected:?}"),
        &sorted_ids,
        &sorted_response,
    )
}

/// Creating a user returns its id.
pub async fn add_user(suite: &Suite) -> ApplicationResult<()> {
    suite
        .store
        .add_user(&sample_store_user())
        .await?
        .should(has_status_code(200))?
        .should(has_json_path("id"))?;
    Ok(())
}

/// Updating a user's password echoes the new password.
pub async fn update_user(suite: &Suite) -> ApplicationResult<()> {
    let mut user = sample_store_user();
    let old_password = user.password.clone();
    user.password = "OAKLEY576".to_string();

    let response = suite.store.update_user(11, &user).await?;
    let updated: StoreUser = response.should(has_status_code(200))?.as_type()?;
    ensure(
        updated.password != old_password,
        "a password different from the old one",
        &updated.password,
        &response,
    )
}

/// Deleting a user succeeds.
pub async fn delete_user(suite: &Suite) -> ApplicationResult<()> {
    suite.store.delete_user(7).await?.should(has_status_code(200))?;
    Ok(())
}

/// The demo account gets a token.
pub async fn login(suite: &Suite) -> ApplicationResult<()> {
    let token = suite
        .store
        .login(&store_credentials())
        .await?
        .should(has_status_code(200))?
        .as_jwt()?;
    tracing::debug!(token_len = token.len(), "store login succeeded");
    Ok(())
}
