//! # Masterpass Loader
//!
//! Fetches the Masterpass client script for the right environment and
//! hands back the client it installs.

use crate::client::MasterpassClient;
use crate::config::MasterpassConfig;
use async_trait::async_trait;
use checkout_core::{CheckoutError, CheckoutResult, NotInitializedKind, ScriptLoader};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, instrument};

/// Produces a Masterpass client for sandbox or live use
#[async_trait(?Send)]
pub trait MasterpassLoader {
    async fn load(&self, test_mode: bool) -> CheckoutResult<Rc<dyn MasterpassClient>>;
}

#[async_trait(?Send)]
impl<T: MasterpassLoader + ?Sized> MasterpassLoader for Rc<T> {
    async fn load(&self, test_mode: bool) -> CheckoutResult<Rc<dyn MasterpassClient>> {
        (**self).load(test_mode).await
    }
}

/// Where the Masterpass script leaves its client once executed
pub trait MasterpassWindow {
    fn masterpass(&self) -> Option<Rc<dyn MasterpassClient>>;
}

impl<T: MasterpassWindow + ?Sized> MasterpassWindow for Rc<T> {
    fn masterpass(&self) -> Option<Rc<dyn MasterpassClient>> {
        (**self).masterpass()
    }
}

/// [`MasterpassLoader`] backed by a script loader and the global the script installs.
///
/// Clients are cached per script URL, so one loader can serve several buttons.
pub struct MasterpassScriptLoader<L, W> {
    script_loader: L,
    window: W,
    config: MasterpassConfig,
    clients: RefCell<HashMap<String, Rc<dyn MasterpassClient>>>,
}

impl<L, W> MasterpassScriptLoader<L, W>
where
    L: ScriptLoader,
    W: MasterpassWindow,
{
    pub fn new(script_loader: L, window: W) -> Self {
        Self::with_config(script_loader, window, MasterpassConfig::default())
    }

    pub fn with_config(script_loader: L, window: W, config: MasterpassConfig) -> Self {
        Self {
            script_loader,
            window,
            config,
            clients: RefCell::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &MasterpassConfig {
        &self.config
    }
}

#[async_trait(?Send)]
impl<L, W> MasterpassLoader for MasterpassScriptLoader<L, W>
where
    L: ScriptLoader,
    W: MasterpassWindow,
{
    #[instrument(skip(self))]
    async fn load(&self, test_mode: bool) -> CheckoutResult<Rc<dyn MasterpassClient>> {
        let url = self.config.script_url(test_mode).to_string();

        if let Some(client) = self.clients.borrow().get(&url) {
            debug!("Reusing Masterpass client from {}", url);
            return Ok(Rc::clone(client));
        }

        self.script_loader.load_script(&url).await?;

        let client = self
            .window
            .masterpass()
            .ok_or(CheckoutError::NotInitialized(NotInitializedKind::PaymentNotInitialized))?;

        debug!("Loaded Masterpass client from {}", url);
        self.clients.borrow_mut().insert(url, Rc::clone(&client));

        Ok(client)
    }
}
