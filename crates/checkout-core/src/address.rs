//! # Address Types
//!
//! Billing and shipping addresses, plus the selectors other state views
//! read them through.

use crate::state::DataState;
use serde::{Deserialize, Serialize};

/// A postal address.
///
/// `Address::default()` is the empty placeholder used when no billing
/// address has been entered yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub state_or_province: String,
    pub state_or_province_code: String,
    pub country: String,
    pub country_code: String,
    pub postal_code: String,
    pub phone: String,
}

impl Address {
    /// True when nothing has been filled in
    pub fn is_empty(&self) -> bool {
        *self == Address::default()
    }
}

/// Read access to the current billing address
pub trait BillingAddressSelector {
    fn get_billing_address(&self) -> Option<Address>;
}

/// Read access to the current shipping address
pub trait ShippingAddressSelector {
    fn get_shipping_address(&self) -> Option<Address>;
}

/// Billing address slice of checkout state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillingAddressState(pub DataState<Address>);

impl BillingAddressState {
    pub fn with_address(address: Address) -> Self {
        Self(DataState::loaded(address))
    }
}

impl BillingAddressSelector for BillingAddressState {
    fn get_billing_address(&self) -> Option<Address> {
        self.0.data.clone()
    }
}

/// Shipping address slice of checkout state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShippingAddressState(pub DataState<Address>);

impl ShippingAddressState {
    pub fn with_address(address: Address) -> Self {
        Self(DataState::loaded(address))
    }
}

impl ShippingAddressSelector for ShippingAddressState {
    fn get_shipping_address(&self) -> Option<Address> {
        self.0.data.clone()
    }
}
