//! # Checkout State
//!
//! Point-in-time snapshot of checkout state as produced by the checkout
//! store. Every slice follows the same `{ data, errors, statuses }` shape.

use crate::address::{BillingAddressState, ShippingAddressState};
use crate::checkout::Checkout;
use crate::error::LoadError;
use crate::payment::PaymentMethod;
use crate::quote::{Quote, QuoteSelector};
use serde::{Deserialize, Serialize};

/// Errors recorded on a slice of state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateErrors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_error: Option<LoadError>,
}

/// In-flight flags for a slice of state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateStatuses {
    #[serde(default)]
    pub is_loading: bool,
}

/// One independently updated slice of checkout state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataState<T> {
    /// Missing keys read as `None`
    pub data: Option<T>,

    #[serde(default)]
    pub errors: StateErrors,

    #[serde(default)]
    pub statuses: StateStatuses,
}

impl<T> Default for DataState<T> {
    fn default() -> Self {
        Self {
            data: None,
            errors: StateErrors::default(),
            statuses: StateStatuses::default(),
        }
    }
}

impl<T> DataState<T> {
    /// A slice that finished loading with `data`
    pub fn loaded(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    /// A slice with a request in flight
    pub fn loading() -> Self {
        Self {
            statuses: StateStatuses { is_loading: true },
            ..Self::default()
        }
    }

    /// A slice whose last load failed
    pub fn failed(error: LoadError) -> Self {
        Self {
            errors: StateErrors {
                load_error: Some(error),
            },
            ..Self::default()
        }
    }
}

/// Snapshot of the checkout store after a load
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSnapshot {
    #[serde(default)]
    pub checkout: DataState<Checkout>,

    #[serde(default)]
    pub payment_methods: DataState<Vec<PaymentMethod>>,

    #[serde(default)]
    pub quote: DataState<Quote>,

    #[serde(default)]
    pub billing_address: BillingAddressState,

    #[serde(default)]
    pub shipping_address: ShippingAddressState,
}

impl CheckoutSnapshot {
    /// Builder: set the loaded checkout
    pub fn with_checkout(mut self, checkout: Checkout) -> Self {
        self.checkout = DataState::loaded(checkout);
        self
    }

    /// Builder: add a payment method
    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_methods
            .data
            .get_or_insert_with(Vec::new)
            .push(method);
        self
    }

    /// Builder: set the loaded quote
    pub fn with_quote(mut self, quote: Quote) -> Self {
        self.quote = DataState::loaded(quote);
        self
    }

    pub fn get_checkout(&self) -> Option<&Checkout> {
        self.checkout.data.as_ref()
    }

    /// Look up a payment method by id
    pub fn get_payment_method(&self, method_id: &str) -> Option<&PaymentMethod> {
        self.payment_methods
            .data
            .as_deref()
            .and_then(|methods| methods.iter().find(|method| method.id == method_id))
    }

    /// Composite quote view over this snapshot's slices
    pub fn quote_selector(&self) -> QuoteSelector<'_> {
        QuoteSelector::new(&self.quote, &self.billing_address, &self.shipping_address)
    }
}
