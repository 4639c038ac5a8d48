//! # Masterpass Client
//!
//! The wallet client the Masterpass script exposes, and the payload its
//! `checkout` call takes.

use checkout_core::{Checkout, CheckoutError, CheckoutResult, MissingDataKind, PaymentMethod};
use serde::{Deserialize, Serialize};

/// Loaded Masterpass client
pub trait MasterpassClient {
    /// Open the Masterpass wallet for this payload
    fn checkout(&self, options: &MasterpassCheckoutOptions) -> CheckoutResult<()>;
}

/// Payload for [`MasterpassClient::checkout`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterpassCheckoutOptions {
    pub checkout_id: String,
    pub allowed_card_types: Vec<String>,
    /// Cart amount as a decimal string
    pub amount: String,
    /// ISO currency code
    pub currency: String,
    pub cart_id: String,
    /// Always true: the button never asks Masterpass for a shipping address
    pub suppress_shipping_address: bool,
}

impl MasterpassCheckoutOptions {
    /// Build the payload from a resolved payment method and checkout
    pub fn from_checkout(method: &PaymentMethod, checkout: &Checkout) -> CheckoutResult<Self> {
        let checkout_id = method
            .initialization_data
            .checkout_id()
            .ok_or(CheckoutError::MissingData(MissingDataKind::MissingPaymentMethod))?;

        Ok(Self {
            checkout_id: checkout_id.to_string(),
            allowed_card_types: method.initialization_data.allowed_card_types.clone(),
            amount: checkout.cart.amount_string(),
            currency: checkout.cart.currency.code.clone(),
            cart_id: checkout.cart.id.clone(),
            suppress_shipping_address: true,
        })
    }
}
