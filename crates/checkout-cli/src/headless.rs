//! # Headless Browser
//!
//! Stand-ins for the pieces a real page provides: the checkout store reads
//! a TOML fixture, scripts are "loaded" by logging their URL, and the
//! Masterpass wallet logs the payload it would have opened with.

use async_trait::async_trait;
use checkout_core::{CheckoutError, CheckoutResult, CheckoutSnapshot, CheckoutStore, ScriptLoader};
use checkout_masterpass::{MasterpassCheckoutOptions, MasterpassClient, MasterpassWindow};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info};

/// Checkout store serving a TOML fixture, re-read on every load
pub struct FixtureCheckoutStore {
    path: PathBuf,
}

impl FixtureCheckoutStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait(?Send)]
impl CheckoutStore for FixtureCheckoutStore {
    async fn load_default_checkout(&self) -> CheckoutResult<CheckoutSnapshot> {
        debug!("Loading checkout fixture {}", self.path.display());

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CheckoutError::Dispatch(format!("{}: {}", self.path.display(), e)))?;

        toml::from_str(&raw).map_err(|e| CheckoutError::Serialization(e.to_string()))
    }
}

/// Wallet that records payloads instead of opening a window
#[derive(Default)]
pub struct HeadlessWallet {
    opened: RefCell<Vec<MasterpassCheckoutOptions>>,
}

impl HeadlessWallet {
    pub fn opened(&self) -> Vec<MasterpassCheckoutOptions> {
        self.opened.borrow().clone()
    }
}

impl MasterpassClient for HeadlessWallet {
    fn checkout(&self, options: &MasterpassCheckoutOptions) -> CheckoutResult<()> {
        info!(payload = %serde_json::to_string(options)?, "Masterpass wallet opened");
        self.opened.borrow_mut().push(options.clone());
        Ok(())
    }
}

/// Script loader and window in one: the wallet global appears once any
/// script has been loaded.
#[derive(Default)]
pub struct HeadlessBrowser {
    scripts: RefCell<Vec<String>>,
    wallet: Rc<HeadlessWallet>,
}

impl HeadlessBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs loaded so far, in order
    pub fn scripts(&self) -> Vec<String> {
        self.scripts.borrow().clone()
    }

    pub fn wallet(&self) -> &HeadlessWallet {
        &self.wallet
    }
}

#[async_trait(?Send)]
impl ScriptLoader for HeadlessBrowser {
    async fn load_script(&self, url: &str) -> CheckoutResult<()> {
        info!("Loading script {}", url);
        self.scripts.borrow_mut().push(url.to_string());
        Ok(())
    }
}

impl MasterpassWindow for HeadlessBrowser {
    fn masterpass(&self) -> Option<Rc<dyn MasterpassClient>> {
        if self.scripts.borrow().is_empty() {
            return None;
        }
        Some(Rc::clone(&self.wallet) as Rc<dyn MasterpassClient>)
    }
}
