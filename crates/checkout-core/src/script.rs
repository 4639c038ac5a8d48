//! # Script Loading
//!
//! Wallet providers ship their client as a script that has to be fetched
//! and executed before the button can do anything.

use crate::error::CheckoutResult;
use async_trait::async_trait;
use std::rc::Rc;

/// Loads an external script by URL
#[async_trait(?Send)]
pub trait ScriptLoader {
    /// Resolves once the script has loaded and executed.
    ///
    /// Fails with `CheckoutError::ScriptLoad` on network or script errors.
    async fn load_script(&self, url: &str) -> CheckoutResult<()>;
}

#[async_trait(?Send)]
impl<T: ScriptLoader + ?Sized> ScriptLoader for Rc<T> {
    async fn load_script(&self, url: &str) -> CheckoutResult<()> {
        (**self).load_script(url).await
    }
}
