//! # Payment Method Types

use serde::{Deserialize, Serialize};

/// Provider-specific data a payment method needs before it can start a checkout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializationData {
    /// Wallet checkout identifier issued by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_id: Option<String>,

    #[serde(default)]
    pub allowed_card_types: Vec<String>,

    /// Fields other providers put here
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl InitializationData {
    /// The checkout id, treating an empty string as absent
    pub fn checkout_id(&self) -> Option<&str> {
        self.checkout_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Method-level configuration flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Use the provider's sandbox environment
    #[serde(default)]
    pub test_mode: bool,
}

/// A payment method available to the checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,

    #[serde(default)]
    pub method: String,

    #[serde(default)]
    pub supported_cards: Vec<String>,

    #[serde(default)]
    pub config: PaymentMethodConfig,

    #[serde(default)]
    pub initialization_data: InitializationData,
}

impl PaymentMethod {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            method: id.clone(),
            id,
            gateway: None,
            supported_cards: Vec::new(),
            config: PaymentMethodConfig::default(),
            initialization_data: InitializationData::default(),
        }
    }

    /// Builder: set provider checkout id and allowed card types
    pub fn with_checkout_id(
        mut self,
        checkout_id: impl Into<String>,
        allowed_card_types: Vec<String>,
    ) -> Self {
        self.initialization_data.checkout_id = Some(checkout_id.into());
        self.initialization_data.allowed_card_types = allowed_card_types;
        self
    }

    /// Builder: toggle sandbox mode
    pub fn with_test_mode(mut self, test_mode: bool) -> Self {
        self.config.test_mode = test_mode;
        self
    }
}
