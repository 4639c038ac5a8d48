//! # Masterpass Configuration
//!
//! Script and asset URLs for the Masterpass integration. Defaults point at
//! Masterpass' public endpoints; each can be overridden from the environment.

use checkout_core::CheckoutError;
use std::env;

pub const SANDBOX_SCRIPT_URL: &str = "https://sandbox.masterpass.com/integration/merchant.js";
pub const LIVE_SCRIPT_URL: &str = "https://masterpass.com/integration/merchant.js";
pub const BUTTON_IMAGE_URL: &str =
    "https://static.masterpass.com/dyn/img/btn/global/mp_chk_btn_160x037px.svg";

/// Masterpass integration configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterpassConfig {
    /// Client script used when the payment method is in test mode
    pub sandbox_script_url: String,

    /// Client script used in production
    pub live_script_url: String,

    /// Image shown on the mounted button
    pub button_image_url: String,
}

impl MasterpassConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional env vars (defaults are Masterpass' public URLs):
    /// - `MASTERPASS_SANDBOX_SCRIPT_URL`
    /// - `MASTERPASS_LIVE_SCRIPT_URL`
    /// - `MASTERPASS_BUTTON_IMAGE_URL`
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let config = Self {
            sandbox_script_url: env_or("MASTERPASS_SANDBOX_SCRIPT_URL", SANDBOX_SCRIPT_URL),
            live_script_url: env_or("MASTERPASS_LIVE_SCRIPT_URL", LIVE_SCRIPT_URL),
            button_image_url: env_or("MASTERPASS_BUTTON_IMAGE_URL", BUTTON_IMAGE_URL),
        };
        config.validate()?;

        Ok(config)
    }

    /// Script URL for the given mode
    pub fn script_url(&self, test_mode: bool) -> &str {
        if test_mode {
            &self.sandbox_script_url
        } else {
            &self.live_script_url
        }
    }

    /// Builder: override both script URLs (for testing)
    pub fn with_script_urls(
        mut self,
        sandbox_script_url: impl Into<String>,
        live_script_url: impl Into<String>,
    ) -> Self {
        self.sandbox_script_url = sandbox_script_url.into();
        self.live_script_url = live_script_url.into();
        self
    }

    /// Builder: override the button image
    pub fn with_button_image_url(mut self, url: impl Into<String>) -> Self {
        self.button_image_url = url.into();
        self
    }

    /// All URLs must be https
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let urls = [
            ("MASTERPASS_SANDBOX_SCRIPT_URL", &self.sandbox_script_url),
            ("MASTERPASS_LIVE_SCRIPT_URL", &self.live_script_url),
            ("MASTERPASS_BUTTON_IMAGE_URL", &self.button_image_url),
        ];

        for (name, url) in urls {
            if !url.starts_with("https://") {
                return Err(CheckoutError::Configuration(format!(
                    "{} must be an https:// URL",
                    name
                )));
            }
        }

        Ok(())
    }
}

impl Default for MasterpassConfig {
    fn default() -> Self {
        Self {
            sandbox_script_url: SANDBOX_SCRIPT_URL.to_string(),
            live_script_url: LIVE_SCRIPT_URL.to_string(),
            button_image_url: BUTTON_IMAGE_URL.to_string(),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}
