//! # checkout-core
//!
//! Core types and traits for wallet checkout buttons.
//!
//! This crate provides:
//! - `CheckoutButtonStrategy` trait and the `ButtonLifecycle` helper every strategy composes
//! - `CheckoutButtonRegistry` for routing buttons by payment method id
//! - `CheckoutSnapshot` and its `DataState` slices (checkout, payment methods, quote, addresses)
//! - `QuoteSelector` for the composite quote view
//! - `DomEnvironment`, `ScriptLoader` and `CheckoutStore` seams, plus the headless `MemoryDom`
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{CheckoutButtonInitializeOptions, CheckoutButtonStrategy};
//!
//! let options = CheckoutButtonInitializeOptions::masterpass("masterpass", "checkout-button");
//!
//! // Load checkout state, fetch the wallet script and mount the button
//! button.initialize(&options).await?;
//!
//! // Later, unmount it again
//! button.deinitialize(&options.button_options()).await?;
//! ```

pub mod address;
pub mod checkout;
pub mod dom;
pub mod error;
pub mod options;
pub mod payment;
pub mod quote;
pub mod script;
pub mod state;
pub mod store;
pub mod strategy;

// Re-exports for convenience
pub use address::{
    Address, BillingAddressSelector, BillingAddressState, ShippingAddressSelector,
    ShippingAddressState,
};
pub use checkout::{Cart, Checkout, Currency};
pub use dom::{same_handler, ClickHandler, DomEnvironment, MemoryDom, NodeId};
pub use error::{CheckoutError, CheckoutResult, LoadError, MissingDataKind, NotInitializedKind};
pub use options::{
    CheckoutButtonInitializeOptions, CheckoutButtonOptions, MasterpassButtonInitializeOptions,
};
pub use payment::{InitializationData, PaymentMethod, PaymentMethodConfig};
pub use quote::{InternalQuote, Quote, QuoteSelector};
pub use script::ScriptLoader;
pub use state::{CheckoutSnapshot, DataState, StateErrors, StateStatuses};
pub use store::CheckoutStore;
pub use strategy::{
    BoxedButtonStrategy, ButtonLifecycle, CheckoutButtonRegistry, CheckoutButtonStrategy,
    LifecyclePhase,
};
