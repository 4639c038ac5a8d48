//! # Quote Selector
//!
//! Composes the quote slice with whatever the billing and shipping address
//! selectors currently hold. Nothing is cached: each read goes back to the
//! underlying slices, so an address update is visible on the next call.

use crate::address::{Address, BillingAddressSelector, ShippingAddressSelector};
use crate::error::LoadError;
use crate::state::DataState;
use serde::{Deserialize, Serialize};

/// Quote data as stored in its own slice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(default)]
    pub order_comment: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_option: Option<String>,
}

/// Quote merged with the current addresses.
///
/// `billing_address` is always present once a quote exists; it falls back
/// to an empty [`Address`] when nothing has been entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalQuote {
    #[serde(flatten)]
    pub quote: Quote,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,

    pub billing_address: Address,
}

/// Read-only view over the quote slice and the address selectors
#[derive(Clone, Copy)]
pub struct QuoteSelector<'a> {
    quote: &'a DataState<Quote>,
    billing_address: &'a dyn BillingAddressSelector,
    shipping_address: &'a dyn ShippingAddressSelector,
}

impl<'a> QuoteSelector<'a> {
    pub fn new(
        quote: &'a DataState<Quote>,
        billing_address: &'a dyn BillingAddressSelector,
        shipping_address: &'a dyn ShippingAddressSelector,
    ) -> Self {
        Self {
            quote,
            billing_address,
            shipping_address,
        }
    }

    /// `None` while the quote slice has no data
    pub fn get_quote(&self) -> Option<InternalQuote> {
        let quote = self.quote.data.as_ref()?;

        Some(InternalQuote {
            quote: quote.clone(),
            shipping_address: self.shipping_address.get_shipping_address(),
            billing_address: self.billing_address.get_billing_address().unwrap_or_default(),
        })
    }

    /// Last load failure of the quote slice. Address errors are not reported here.
    pub fn get_load_error(&self) -> Option<&'a LoadError> {
        self.quote.errors.load_error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.quote.statuses.is_loading
    }
}
