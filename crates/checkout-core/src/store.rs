//! # Checkout Store
//!
//! The outer checkout store, seen from a button strategy: something that
//! can be asked to load the default checkout and hands back a snapshot.

use crate::error::CheckoutResult;
use crate::state::CheckoutSnapshot;
use async_trait::async_trait;
use std::rc::Rc;

#[async_trait(?Send)]
pub trait CheckoutStore {
    /// Dispatch a load of the default checkout and return the resulting state.
    ///
    /// Failures surface as `CheckoutError::Dispatch`.
    async fn load_default_checkout(&self) -> CheckoutResult<CheckoutSnapshot>;
}

#[async_trait(?Send)]
impl<T: CheckoutStore + ?Sized> CheckoutStore for Rc<T> {
    async fn load_default_checkout(&self) -> CheckoutResult<CheckoutSnapshot> {
        (**self).load_default_checkout().await
    }
}
