//! Wiring of facades, transport and stubs for one scenario run.

use std::ops::Deref;
use std::path::{Path, PathBuf};

use apicheck_application::{
    ConfigError, FileService, HttpClientError, ServiceConfig, StoreService, SuiteConfig, UserService,
};
use apicheck_infrastructure::{ReqwestHttpClient, init_tracing};
use tempfile::TempDir;
use thiserror::Error;

use crate::stub::user_service::BASE_FILE;
use crate::stub::{FakeStoreStub, UserServiceStub};

/// Errors raised while preparing a run, before any scenario starts.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A stub or working directory could not be set up.
    #[error("harness I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A transport client could not be built.
    #[error("cannot build HTTP client: {0}")]
    Client(#[from] HttpClientError),
}

/// Facades for every service under test.
#[derive(Debug, Clone)]
pub struct Suite {
    /// User-management service.
    pub users: UserService<ReqwestHttpClient>,
    /// File endpoints of the user-management service.
    pub files: FileService<ReqwestHttpClient>,
    /// Fake store.
    pub store: StoreService<ReqwestHttpClient>,
    reference_file: Option<PathBuf>,
}

impl Suite {
    /// Builds the facades from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Client`] if a transport cannot be built.
    pub fn from_config(config: &SuiteConfig) -> Result<Self, HarnessError> {
        let user_client = ReqwestHttpClient::new(&config.user_service)?;
        let store_client = ReqwestHttpClient::new(&config.fake_store)?;
        Ok(Self {
            users: UserService::new(user_client.clone()),
            files: FileService::new(user_client),
            store: StoreService::new(store_client),
            reference_file: config.reference_file.clone(),
        })
    }

    /// Builds the facades for the remote services named by the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn live() -> Result<Self, HarnessError> {
        init_tracing();
        let config = SuiteConfig::from_env()?;
        tracing::info!(
            user_service = %config.user_service.base_url,
            fake_store = %config.fake_store.base_url,
            "running against live services"
        );
        Self::from_config(&config)
    }

    /// File the base download is compared against, if configured.
    #[must_use]
    pub fn reference_file(&self) -> Option<&Path> {
        self.reference_file.as_deref()
    }
}

/// A [`Suite`] bound to freshly started stubs. Dropping it stops them.
pub struct StubbedSuite {
    suite: Suite,
    _user_service: UserServiceStub,
    _fake_store: FakeStoreStub,
    _workdir: TempDir,
}

impl StubbedSuite {
    /// Starts both stubs and points a suite at them.
    ///
    /// The reference file is the stub's base file, written to a temporary
    /// directory that lives as long as the suite.
    ///
    /// # Errors
    ///
    /// Returns an error if a stub cannot bind or the temporary directory
    /// cannot be written.
    pub async fn start() -> Result<Self, HarnessError> {
        init_tracing();
        let user_service = UserServiceStub::start().await?;
        let fake_store = FakeStoreStub::start().await;

        let workdir = tempfile::tempdir()?;
        let reference_file = workdir.path().join("threadqa.jpeg");
        tokio::fs::write(&reference_file, BASE_FILE).await?;

        let config = SuiteConfig {
            user_service: ServiceConfig::parse(&user_service.base_url())?,
            fake_store: ServiceConfig::parse(&fake_store.base_url())?,
            reference_file: Some(reference_file),
        };
        let suite = Suite::from_config(&config)?;

        Ok(Self {
            suite,
            _user_service: user_service,
            _fake_store: fake_store,
            _workdir: workdir,
        })
    }
}

impl Deref for StubbedSuite {
    type Target = Suite;

    fn deref(&self) -> &Suite {
        &self.suite
    }
}
