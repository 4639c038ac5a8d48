//! # checkout-wasm
//!
//! WebAssembly bindings for the Masterpass checkout button.
//!
//! The page supplies a function that loads the default checkout; the
//! button handles the Masterpass script, mounting and teardown.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { MasterpassButton } from 'checkout-wasm';
//!
//! await init();
//!
//! const button = new MasterpassButton(() => store.loadDefaultCheckout());
//!
//! await button.initialize({
//!   methodId: 'masterpass',
//!   masterpass: { container: 'masterpass-button' },
//! });
//!
//! // later
//! await button.deinitialize({ methodId: 'masterpass' });
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web crates/checkout-wasm
//! ```

pub mod document;
pub mod masterpass;
pub mod script;
pub mod store;

pub use document::WebDocument;
pub use masterpass::{JsMasterpassClient, WindowMasterpass};
pub use script::WebScriptLoader;
pub use store::JsCheckoutStore;

use checkout_core::{
    CheckoutButtonInitializeOptions, CheckoutButtonOptions, CheckoutButtonStrategy, CheckoutError,
    CheckoutSnapshot,
};
use checkout_masterpass::{MasterpassButtonStrategy, MasterpassConfig, MasterpassScriptLoader};
use js_sys::{Function, Promise, Reflect};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

type WebMasterpassButton = MasterpassButtonStrategy<
    JsCheckoutStore,
    MasterpassScriptLoader<WebScriptLoader, WindowMasterpass>,
    Rc<WebDocument>,
>;

/// Best-effort message for a thrown JS value
pub(crate) fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

/// JS `Error` carrying the message and a `type` tag
fn to_js_error(err: CheckoutError) -> JsValue {
    let error = js_sys::Error::new(&err.to_string());
    let _ = Reflect::set(
        &error,
        &JsValue::from_str("type"),
        &JsValue::from_str(err.error_type()),
    );
    error.into()
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| to_js_error(CheckoutError::Serialization(e.to_string())))
}

/// Masterpass checkout button for the current page
#[wasm_bindgen]
pub struct MasterpassButton {
    inner: Rc<WebMasterpassButton>,
}

#[wasm_bindgen]
impl MasterpassButton {
    /// `load_default_checkout` returns the checkout state, or a promise of it
    #[wasm_bindgen(constructor)]
    pub fn new(load_default_checkout: Function) -> Result<MasterpassButton, JsValue> {
        let document = Rc::new(WebDocument::new().map_err(to_js_error)?);
        let config = MasterpassConfig::default();

        let loader = MasterpassScriptLoader::with_config(
            WebScriptLoader::new(document.document().clone()),
            WindowMasterpass,
            config.clone(),
        );
        let inner = MasterpassButtonStrategy::with_config(
            JsCheckoutStore::new(load_default_checkout),
            loader,
            document,
            config,
        );

        Ok(Self {
            inner: Rc::new(inner),
        })
    }

    /// Resolves once the button is mounted
    pub fn initialize(&self, options: JsValue) -> Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            let options: CheckoutButtonInitializeOptions = from_js(options)?;
            inner.initialize(&options).await.map_err(to_js_error)?;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Resolves once the button is removed
    pub fn deinitialize(&self, options: JsValue) -> Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            let options: CheckoutButtonOptions = if options.is_undefined() {
                CheckoutButtonOptions::default()
            } else {
                from_js(options)?
            };
            inner.deinitialize(&options).await.map_err(to_js_error)?;
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen(getter, js_name = isInitialized)]
    pub fn is_initialized(&self) -> bool {
        self.inner.is_initialized()
    }
}

/// Quote merged with the current addresses, or `undefined` without quote data
#[wasm_bindgen(js_name = getQuote)]
pub fn get_quote(state: JsValue) -> Result<JsValue, JsValue> {
    let snapshot: CheckoutSnapshot = from_js(state)?;

    match snapshot.quote_selector().get_quote() {
        Some(quote) => serde_wasm_bindgen::to_value(&quote)
            .map_err(|e| to_js_error(CheckoutError::Serialization(e.to_string()))),
        None => Ok(JsValue::UNDEFINED),
    }
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
