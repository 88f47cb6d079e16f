//! Value objects mirroring the JSON schemas of the services under test.

pub mod fake_store;
pub mod user_service;

pub use fake_store::{Address, AuthData, Geolocation, Name, StoreUser, TokenResponse};
pub use user_service::{FullUser, Info, InfoEnvelope, JwtAuthData, PasswordUpdate};
