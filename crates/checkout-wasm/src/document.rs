//! [`DomEnvironment`] over the browser document.

use crate::js_error_message;
use checkout_core::{same_handler, CheckoutError, CheckoutResult, ClickHandler, DomEnvironment};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

/// A click handler as registered with the browser
struct RegisteredListener {
    element: Element,
    handler: ClickHandler,
    closure: Closure<dyn FnMut()>,
}

/// The page document.
///
/// Keeps every JS closure it registers, so removing a handler detaches
/// exactly the function that was added.
pub struct WebDocument {
    document: Document,
    listeners: RefCell<Vec<RegisteredListener>>,
}

impl WebDocument {
    /// Document of the current window
    pub fn new() -> CheckoutResult<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| CheckoutError::Dom("no document available".into()))?;

        Ok(Self::with_document(document))
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn position(&self, element: &Element, handler: &ClickHandler) -> Option<usize> {
        self.listeners
            .borrow()
            .iter()
            .position(|l| &l.element == element && same_handler(&l.handler, handler))
    }
}

fn dom_error(err: JsValue) -> CheckoutError {
    CheckoutError::Dom(js_error_message(&err))
}

impl DomEnvironment for WebDocument {
    type Element = Element;

    fn query_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn create_element(&self, tag: &str) -> CheckoutResult<Element> {
        self.document.create_element(tag).map_err(dom_error)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) -> CheckoutResult<()> {
        element.set_attribute(name, value).map_err(dom_error)
    }

    fn append_child(&self, parent: &Element, child: &Element) -> CheckoutResult<()> {
        parent.append_child(child).map(|_| ()).map_err(dom_error)
    }

    fn parent_of(&self, element: &Element) -> Option<Element> {
        element.parent_element()
    }

    fn remove_child(&self, parent: &Element, child: &Element) -> CheckoutResult<()> {
        parent.remove_child(child).map(|_| ()).map_err(dom_error)
    }

    fn add_click_listener(&self, element: &Element, handler: &ClickHandler) -> CheckoutResult<()> {
        if self.position(element, handler).is_some() {
            return Ok(());
        }

        let closure = {
            let handler = ClickHandler::clone(handler);
            Closure::<dyn FnMut()>::new(move || {
                // Nothing upstream of a DOM event to return the error to.
                if let Err(err) = handler() {
                    web_sys::console::error_1(&JsValue::from_str(&err.to_string()));
                }
            })
        };

        element
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(dom_error)?;

        self.listeners.borrow_mut().push(RegisteredListener {
            element: element.clone(),
            handler: ClickHandler::clone(handler),
            closure,
        });
        Ok(())
    }

    fn remove_click_listener(
        &self,
        element: &Element,
        handler: &ClickHandler,
    ) -> CheckoutResult<()> {
        let Some(index) = self.position(element, handler) else {
            return Ok(());
        };

        {
            let listeners = self.listeners.borrow();
            element
                .remove_event_listener_with_callback(
                    "click",
                    listeners[index].closure.as_ref().unchecked_ref(),
                )
                .map_err(dom_error)?;
        }

        // Only drop the closure once the browser no longer holds it
        self.listeners.borrow_mut().remove(index);
        Ok(())
    }
}
