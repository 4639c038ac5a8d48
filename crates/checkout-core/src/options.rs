//! # Button Options
//!
//! Options passed to checkout button strategies. Field names follow the
//! camelCase shape JavaScript callers use.

use serde::{Deserialize, Serialize};

/// Masterpass-specific button options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterpassButtonInitializeOptions {
    /// Id of the element the button is mounted into
    pub container: String,
}

/// Options for `deinitialize`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutButtonOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_id: Option<String>,
}

impl CheckoutButtonOptions {
    pub fn new(method_id: impl Into<String>) -> Self {
        Self {
            method_id: Some(method_id.into()),
        }
    }
}

/// Options for `initialize`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutButtonInitializeOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masterpass: Option<MasterpassButtonInitializeOptions>,
}

impl CheckoutButtonInitializeOptions {
    /// Options for a Masterpass button mounted into `container`
    pub fn masterpass(method_id: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            method_id: Some(method_id.into()),
            masterpass: Some(MasterpassButtonInitializeOptions {
                container: container.into(),
            }),
        }
    }

    /// The matching options for `deinitialize`
    pub fn button_options(&self) -> CheckoutButtonOptions {
        CheckoutButtonOptions {
            method_id: self.method_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_from_js_shape() {
        let options: CheckoutButtonInitializeOptions = serde_json::from_str(
            r#"{ "methodId": "masterpass", "masterpass": { "container": "checkout-button" } }"#,
        )
        .unwrap();

        assert_eq!(
            options,
            CheckoutButtonInitializeOptions::masterpass("masterpass", "checkout-button")
        );
        assert_eq!(
            options.button_options(),
            CheckoutButtonOptions::new("masterpass")
        );
    }

    #[test]
    fn test_missing_blocks_are_none() {
        let options: CheckoutButtonInitializeOptions = serde_json::from_str("{}").unwrap();
        assert!(options.method_id.is_none());
        assert!(options.masterpass.is_none());
    }
}
