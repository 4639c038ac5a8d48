//! Runner configuration

use checkout_masterpass::MasterpassConfig;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_FIXTURE: &str = "config/checkout.toml";
pub const DEFAULT_METHOD_ID: &str = "masterpass";
pub const DEFAULT_CONTAINER: &str = "masterpass-button";

/// Runner configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// TOML file holding the checkout state to serve
    pub fixture_path: PathBuf,

    /// Payment method the button is mounted for
    pub method_id: String,

    /// Id of the container element
    pub container: String,

    pub masterpass: MasterpassConfig,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional env vars:
    /// - `CHECKOUT_FIXTURE` (default: config/checkout.toml)
    /// - `PAYMENT_METHOD_ID` (default: masterpass)
    /// - `BUTTON_CONTAINER` (default: masterpass-button)
    /// - the `MASTERPASS_*` URL overrides
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let config = Self {
            fixture_path: env::var("CHECKOUT_FIXTURE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_FIXTURE)),
            method_id: env::var("PAYMENT_METHOD_ID")
                .unwrap_or_else(|_| DEFAULT_METHOD_ID.to_string()),
            container: env::var("BUTTON_CONTAINER")
                .unwrap_or_else(|_| DEFAULT_CONTAINER.to_string()),
            masterpass: MasterpassConfig::from_env()?,
        };

        if config.method_id.is_empty() {
            anyhow::bail!("PAYMENT_METHOD_ID must not be empty");
        }
        if config.container.is_empty() {
            anyhow::bail!("BUTTON_CONTAINER must not be empty");
        }

        Ok(config)
    }

    /// Builder: serve a different fixture
    pub fn with_fixture(mut self, path: impl Into<PathBuf>) -> Self {
        self.fixture_path = path.into();
        self
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            fixture_path: PathBuf::from(DEFAULT_FIXTURE),
            method_id: DEFAULT_METHOD_ID.to_string(),
            container: DEFAULT_CONTAINER.to_string(),
            masterpass: MasterpassConfig::default(),
        }
    }
}
