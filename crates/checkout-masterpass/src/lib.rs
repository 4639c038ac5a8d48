//! # checkout-masterpass
//!
//! Masterpass checkout button for checkout-core.
//!
//! The button strategy loads the default checkout, fetches the Masterpass
//! client script (sandbox or live, depending on the payment method's test
//! mode), mounts an image button into a container and opens the Masterpass
//! wallet when it is clicked.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_core::{CheckoutButtonInitializeOptions, CheckoutButtonStrategy};
//! use checkout_masterpass::{MasterpassButtonStrategy, MasterpassScriptLoader};
//!
//! let loader = MasterpassScriptLoader::new(script_loader, window);
//! let button = MasterpassButtonStrategy::new(store, loader, document);
//!
//! let options = CheckoutButtonInitializeOptions::masterpass("masterpass", "masterpass-button");
//! button.initialize(&options).await?;
//!
//! // ... the shopper clicks the button, the wallet opens ...
//!
//! button.deinitialize(&options.button_options()).await?;
//! ```

pub mod accessor;
pub mod button;
pub mod client;
pub mod config;
pub mod loader;

// Re-exports
pub use accessor::{checkout_with_cart, masterpass_payment_method};
pub use button::MasterpassButtonStrategy;
pub use client::{MasterpassCheckoutOptions, MasterpassClient};
pub use config::MasterpassConfig;
pub use loader::{MasterpassLoader, MasterpassScriptLoader, MasterpassWindow};
