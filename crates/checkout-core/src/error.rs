//! # Checkout Error Types
//!
//! Typed error handling for checkout buttons and checkout state selectors.
//! All button operations return `Result<T, CheckoutError>`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which piece of checkout data was unavailable or unusable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingDataKind {
    /// No checkout snapshot loaded, or the checkout has no cart
    MissingCheckout,
    /// Payment method absent or not configured for the provider
    MissingPaymentMethod,
}

impl fmt::Display for MissingDataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingDataKind::MissingCheckout => {
                f.write_str("Unable to proceed because checkout data is unavailable.")
            }
            MissingDataKind::MissingPaymentMethod => f.write_str(
                "Unable to proceed because payment method data is unavailable or not properly configured.",
            ),
        }
    }
}

/// Which component was used before it finished initializing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotInitializedKind {
    /// The checkout button has no wallet client yet
    CheckoutButtonNotInitialized,
    /// The wallet script loaded but exposed no client
    PaymentNotInitialized,
}

impl fmt::Display for NotInitializedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotInitializedKind::CheckoutButtonNotInitialized => f.write_str(
                "Unable to proceed because the checkout button has not been initialized.",
            ),
            NotInitializedKind::PaymentNotInitialized => f.write_str(
                "Unable to proceed because the payment step of checkout has not been initialized.",
            ),
        }
    }
}

/// Core error type for all checkout button operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Required options missing, or a method id was never provided
    #[error("{0}")]
    InvalidArgument(String),

    /// Checkout state not loaded yet, or loaded but unusable
    #[error("{0}")]
    MissingData(MissingDataKind),

    /// A lifecycle step ran before the component it needs was ready
    #[error("{0}")]
    NotInitialized(NotInitializedKind),

    /// The configured DOM container does not exist
    #[error("Need a container to place the button (#{container})")]
    ContainerNotFound { container: String },

    /// External script failed to load
    #[error("Failed to load script {url}: {message}")]
    ScriptLoad { url: String, message: String },

    /// Loading checkout state through the store failed
    #[error("Failed to load checkout: {0}")]
    Dispatch(String),

    /// DOM environment rejected an operation
    #[error("DOM operation failed: {0}")]
    Dom(String),

    /// Wallet client rejected a call
    #[error("Wallet error [{provider}]: {message}")]
    Wallet { provider: String, message: String },

    /// Configuration errors (invalid URLs, bad env values)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CheckoutError {
    /// `InvalidArgument` with the generic message used when a method id was never set
    pub fn invalid_arguments() -> Self {
        CheckoutError::InvalidArgument("Invalid arguments have been provided.".to_string())
    }

    /// Returns true if the caller may reasonably retry the failed call.
    ///
    /// Button strategies never retry on their own.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CheckoutError::ScriptLoad { .. } | CheckoutError::Dispatch(_)
        )
    }

    /// Stable tag for this error, suitable for surfacing across FFI boundaries
    pub fn error_type(&self) -> &'static str {
        match self {
            CheckoutError::InvalidArgument(_) => "invalid_argument",
            CheckoutError::MissingData(_) => "missing_data",
            CheckoutError::NotInitialized(_) => "not_initialized",
            CheckoutError::ContainerNotFound { .. } => "container_not_found",
            CheckoutError::ScriptLoad { .. } => "script_load",
            CheckoutError::Dispatch(_) => "dispatch",
            CheckoutError::Dom(_) => "dom",
            CheckoutError::Wallet { .. } => "wallet",
            CheckoutError::Configuration(_) => "configuration",
            CheckoutError::Serialization(_) => "serialization",
        }
    }
}

impl From<serde_json::Error> for CheckoutError {
    fn from(err: serde_json::Error) -> Self {
        CheckoutError::Serialization(err.to_string())
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// A load failure recorded on a checkout sub-state.
///
/// Unlike [`CheckoutError`] this is plain data, so it travels inside
/// serialized snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct LoadError {
    /// Error tag reported by whoever populated the state
    #[serde(rename = "type", default)]
    pub error_type: String,

    /// Human readable message
    pub message: String,
}

impl LoadError {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
        }
    }
}
