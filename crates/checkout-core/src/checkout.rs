//! # Checkout Types
//!
//! Checkout, cart and currency as read from checkout state.

use serde::{Deserialize, Serialize};

/// Currency of a cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    /// ISO 4217 code (e.g., "USD")
    pub code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,

    #[serde(default = "default_decimal_places")]
    pub decimal_places: u8,
}

fn default_decimal_places() -> u8 {
    2
}

impl Currency {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: None,
            symbol: None,
            decimal_places: default_decimal_places(),
        }
    }
}

/// Cart attached to a checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,

    /// Total cart amount in major units (e.g., 42.5)
    pub cart_amount: f64,

    pub currency: Currency,

    #[serde(default)]
    pub base_amount: f64,

    #[serde(default)]
    pub discount_amount: f64,

    #[serde(default)]
    pub is_tax_included: bool,
}

impl Cart {
    pub fn new(id: impl Into<String>, cart_amount: f64, currency: Currency) -> Self {
        Self {
            id: id.into(),
            cart_amount,
            currency,
            base_amount: cart_amount,
            discount_amount: 0.0,
            is_tax_included: false,
        }
    }

    /// Cart amount rendered the way wallet providers expect it ("42.5", "10")
    pub fn amount_string(&self) -> String {
        self.cart_amount.to_string()
    }
}

/// A checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    pub id: String,

    pub cart: Cart,

    #[serde(default)]
    pub grand_total: f64,

    #[serde(default)]
    pub customer_message: String,
}

impl Checkout {
    pub fn new(id: impl Into<String>, cart: Cart) -> Self {
        let grand_total = cart.cart_amount;
        Self {
            id: id.into(),
            cart,
            grand_total,
            customer_message: String::new(),
        }
    }
}
