//! The `window.masterpass` global installed by the Masterpass script.

use crate::js_error_message;
use checkout_core::{CheckoutError, CheckoutResult};
use checkout_masterpass::{MasterpassCheckoutOptions, MasterpassClient, MasterpassWindow};
use js_sys::{Function, Reflect};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const PROVIDER: &str = "masterpass";

/// Reads `masterpass` off the browser window
#[derive(Default)]
pub struct WindowMasterpass;

impl MasterpassWindow for WindowMasterpass {
    fn masterpass(&self) -> Option<Rc<dyn MasterpassClient>> {
        let window = web_sys::window()?;
        let global = Reflect::get(&window, &JsValue::from_str(PROVIDER)).ok()?;

        if global.is_undefined() || global.is_null() {
            return None;
        }

        Some(Rc::new(JsMasterpassClient { global }))
    }
}

/// Calls `masterpass.checkout(options)`
pub struct JsMasterpassClient {
    global: JsValue,
}

impl JsMasterpassClient {
    fn wallet_error(message: impl Into<String>) -> CheckoutError {
        CheckoutError::Wallet {
            provider: PROVIDER.to_string(),
            message: message.into(),
        }
    }
}

impl MasterpassClient for JsMasterpassClient {
    fn checkout(&self, options: &MasterpassCheckoutOptions) -> CheckoutResult<()> {
        let checkout = Reflect::get(&self.global, &JsValue::from_str("checkout"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or_else(|| Self::wallet_error("masterpass.checkout is not a function"))?;

        let args = serde_wasm_bindgen::to_value(options)
            .map_err(|e| CheckoutError::Serialization(e.to_string()))?;

        checkout
            .call1(&self.global, &args)
            .map(|_| ())
            .map_err(|e| Self::wallet_error(js_error_message(&e)))
    }
}
