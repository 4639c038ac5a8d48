//! Script loading through `<script>` tags.

use crate::js_error_message;
use async_trait::async_trait;
use checkout_core::{CheckoutError, CheckoutResult, ScriptLoader};
use js_sys::Promise;
use std::cell::RefCell;
use std::collections::HashSet;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Document;

/// Appends a `<script>` to the document head and waits for it to load.
///
/// A URL that already loaded is not fetched again.
pub struct WebScriptLoader {
    document: Document,
    loaded: RefCell<HashSet<String>>,
}

impl WebScriptLoader {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            loaded: RefCell::new(HashSet::new()),
        }
    }

    fn script_error(url: &str, message: impl Into<String>) -> CheckoutError {
        CheckoutError::ScriptLoad {
            url: url.to_string(),
            message: message.into(),
        }
    }
}

#[async_trait(?Send)]
impl ScriptLoader for WebScriptLoader {
    async fn load_script(&self, url: &str) -> CheckoutResult<()> {
        if self.loaded.borrow().contains(url) {
            return Ok(());
        }

        let head = self
            .document
            .head()
            .ok_or_else(|| Self::script_error(url, "document has no head"))?;
        let script = self
            .document
            .create_element("script")
            .map_err(|e| Self::script_error(url, js_error_message(&e)))?;

        let loaded = Promise::new(&mut |resolve, reject| {
            let listening = script
                .add_event_listener_with_callback("load", &resolve)
                .and_then(|_| script.add_event_listener_with_callback("error", &reject));
            if let Err(err) = listening {
                let _ = reject.call1(&JsValue::NULL, &err);
            }
        });

        script
            .set_attribute("async", "true")
            .and_then(|_| script.set_attribute("src", url))
            .and_then(|_| head.append_child(&script))
            .map_err(|e| Self::script_error(url, js_error_message(&e)))?;

        JsFuture::from(loaded)
            .await
            .map_err(|_| Self::script_error(url, "script failed to load"))?;

        self.loaded.borrow_mut().insert(url.to_string());
        Ok(())
    }
}
