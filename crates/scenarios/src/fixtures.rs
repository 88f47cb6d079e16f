//! Test data shared by the suites.

use apicheck_domain::models::{Address, AuthData, FullUser, Geolocation, Name, StoreUser};
use rand::Rng;

/// Password of every generated user.
pub const RANDOM_USER_PASSWORD: &str = "aisimem002";
/// Password set by the change-password scenario.
pub const UPDATED_PASSWORD: &str = "UpPAssBay";

/// A fresh user with a random login (`aisen<n>`, `n < 100000`).
#[must_use]
pub fn random_user() -> FullUser {
    let suffix: u32 = rand::rng().random_range(0..100_000);
    FullUser::builder()
        .login(format!("aisen{suffix}"))
        .pass(RANDOM_USER_PASSWORD)
        .build()
}

/// The built-in administrator.
#[must_use]
pub fn admin_user() -> FullUser {
    FullUser::builder().login("admin").pass("admin").build()
}

/// Credentials no service accepts.
#[must_use]
pub fn unknown_user() -> FullUser {
    FullUser::builder()
        .login("user.getLogin()")
        .pass("user.getPass()")
        .build()
}

/// A complete fake-store user without server fields.
#[must_use]
pub fn sample_store_user() -> StoreUser {
    StoreUser::builder()
        .username("aisen")
        .email("aisen@gmail.com")
        .password("Bars003")
        .phone("798856378")
        .name(Name::new("aisen", "yaVor"))
        .address(
            Address::builder()
                .city("Moscow")
                .street("Ul Pokrovka")
                .number(109)
                .zipcode("34566-7689")
                .geolocation(Geolocation::new("-35.2453", "81.8756"))
                .build(),
        )
        .build()
}

/// Credentials of a fake-store demo account.
#[must_use]
pub fn store_credentials() -> AuthData {
    AuthData::new("mor_2314", "83r5^_")
}

/// Deterministic binary payload for upload scenarios.
#[must_use]
pub fn upload_payload(len: usize) -> Vec<u8> {
    // JPEG start-of-image marker, then a repeating byte ramp.
    [0xFF, 0xD8, 0xFF, 0xE0]
        .into_iter()
        .chain((0..).map(|i: usize| u8::try_from(i % 251).unwrap_or_default()))
        .take(len)
        .collect()
}
