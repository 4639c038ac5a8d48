//! Checkout store backed by a JavaScript callback.

use crate::js_error_message;
use async_trait::async_trait;
use checkout_core::{CheckoutError, CheckoutResult, CheckoutSnapshot, CheckoutStore};
use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// Wraps a JS function that loads the default checkout.
///
/// The function may return the checkout state directly or a promise of it;
/// the state uses the camelCase shape of [`CheckoutSnapshot`].
pub struct JsCheckoutStore {
    load_default_checkout: Function,
}

impl JsCheckoutStore {
    pub fn new(load_default_checkout: Function) -> Self {
        Self {
            load_default_checkout,
        }
    }
}

#[async_trait(?Send)]
impl CheckoutStore for JsCheckoutStore {
    async fn load_default_checkout(&self) -> CheckoutResult<CheckoutSnapshot> {
        let result = self
            .load_default_checkout
            .call0(&JsValue::NULL)
            .map_err(|e| CheckoutError::Dispatch(js_error_message(&e)))?;

        let state = JsFuture::from(Promise::resolve(&result))
            .await
            .map_err(|e| CheckoutError::Dispatch(js_error_message(&e)))?;

        serde_wasm_bindgen::from_value(state)
            .map_err(|e| CheckoutError::Serialization(e.to_string()))
    }
}
