//! The same scenarios against the remote services.
//!
//! Ignored by default; run with `cargo test -p apicheck-scenarios --test live -- --ignored`.
//! Endpoints come from `APICHECK_*` variables (see `SuiteConfig::from_env`).
#![allow(clippy::unwrap_used, clippy::expect_used)]

use apicheck_application::ApplicationResult;
use apicheck_scenarios::Suite;
use apicheck_scenarios::suites::{files, store, users};

fn live() -> Suite {
    Suite::live().expect("Invalid live configuration")
}

#[tokio::test]
#[ignore = "needs the remote user service"]
async fn live_user_service() -> ApplicationResult<()> {
    let suite = live();
    users::register_new_user(&suite).await?;
    users::register_existing_login(&suite).await?;
    users::register_without_password(&suite).await?;
    users::admin_auth(&suite).await?;
    users::new_user_auth(&suite).await?;
    users::wrong_credentials(&suite).await?;
    users::user_info_with_token(&suite).await?;
    users::user_info_with_invalid_token(&suite).await?;
    users::user_info_without_token(&suite).await?;
    users::change_password(&suite).await?;
    users::change_admin_password(&suite).await?;
    users::delete_admin(&suite).await?;
    users::delete_new_user(&suite).await?;
    users::list_users(&suite).await
}

#[tokio::test]
#[ignore = "needs the remote user service"]
async fn live_files() -> ApplicationResult<()> {
    let suite = live();
    files::download_base_file(&suite).await?;
    files::upload_then_download(&suite).await
}

#[tokio::test]
#[ignore = "needs network access to the fake store"]
async fn live_fake_store() -> ApplicationResult<()> {
    let suite = live();
    store::list_users(&suite).await?;
    store::single_user(&suite).await?;
    for limit in store::VALID_LIMITS {
        store::limited_users(&suite, limit).await?;
    }
    for limit in store::IGNORED_LIMITS {
        store::ignored_limit(&suite, limit).await?;
    }
    store::sorted_desc(&suite).await?;
    store::add_user(&suite).await?;
    store::update_user(&suite).await?;
    store::delete_user(&suite).await?;
    store::login(&suite).await
}
