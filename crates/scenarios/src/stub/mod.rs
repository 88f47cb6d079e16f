//! In-process stand-ins for the remote services.

pub mod fake_store;
pub mod user_service;

pub use fake_store::FakeStoreStub;
pub use user_service::UserServiceStub;
