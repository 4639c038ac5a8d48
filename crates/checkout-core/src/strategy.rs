//! # Checkout Button Strategy
//!
//! Strategy trait for wallet checkout buttons, the lifecycle helper every
//! strategy composes, and a registry that routes by payment method id.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │               CheckoutButtonStrategy (trait)                │
//! │  ├── initialize()    ── default: lifecycle().initialize()   │
//! │  ├── deinitialize()  ── default: lifecycle().deinitialize() │
//! │  └── lifecycle()     ── &ButtonLifecycle                    │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!          ┌─────────────────┼─────────────────┐
//!          │                 │                 │
//!  ┌───────┴───────┐ ┌───────┴───────┐ ┌───────┴───────┐
//!  │  Masterpass   │ │    PayPal     │ │   Amazon Pay  │
//!  │ButtonStrategy │ │   (future)    │ │   (future)    │
//!  └───────────────┘ └───────────────┘ └───────────────┘
//! ```
//!
//! Strategies do their own setup or teardown first and then call through to
//! the [`ButtonLifecycle`] they own, which flips the initialized flag.

use crate::error::{CheckoutError, CheckoutResult};
use crate::options::{CheckoutButtonInitializeOptions, CheckoutButtonOptions};
use async_trait::async_trait;
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

/// Where a button is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecyclePhase {
    #[default]
    Uninitialized,
    Initializing,
    Initialized,
    Deinitializing,
}

/// Initialized flag shared by all button strategies.
///
/// Plays the part of the strategy base class: `initialize` and
/// `deinitialize` are the hooks concrete strategies finish with.
#[derive(Debug, Default)]
pub struct ButtonLifecycle {
    phase: Cell<LifecyclePhase>,
}

impl ButtonLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.phase.get() == LifecyclePhase::Initialized
    }

    /// Mark setup as in flight
    pub fn begin_initialize(&self) {
        self.transition(LifecyclePhase::Initializing);
    }

    /// Mark teardown as in flight
    pub fn begin_deinitialize(&self) {
        self.transition(LifecyclePhase::Deinitializing);
    }

    /// Setup failed; nothing was kept
    pub fn abort_initialize(&self) {
        self.transition(LifecyclePhase::Uninitialized);
    }

    /// Teardown failed; the button is still mounted
    pub fn abort_deinitialize(&self) {
        self.transition(LifecyclePhase::Initialized);
    }

    /// Base initialization hook
    pub fn initialize(&self) -> CheckoutResult<()> {
        self.transition(LifecyclePhase::Initialized);
        Ok(())
    }

    /// Base deinitialization hook
    pub fn deinitialize(&self) -> CheckoutResult<()> {
        self.transition(LifecyclePhase::Uninitialized);
        Ok(())
    }

    fn transition(&self, to: LifecyclePhase) {
        let from = self.phase.replace(to);
        if from != to {
            debug!(?from, ?to, "Button lifecycle transition");
        }
    }
}

/// Core trait for wallet checkout buttons.
///
/// Futures are `!Send`: buttons live on the single UI thread and hold
/// `Rc`/`RefCell` state.
#[async_trait(?Send)]
pub trait CheckoutButtonStrategy {
    /// The lifecycle helper this strategy owns
    fn lifecycle(&self) -> &ButtonLifecycle;

    /// Load whatever the button needs and mount it
    async fn initialize(&self, _options: &CheckoutButtonInitializeOptions) -> CheckoutResult<()> {
        self.lifecycle().initialize()
    }

    /// Unmount the button and release what `initialize` acquired.
    ///
    /// Always safe to call, including on a button that was never initialized.
    async fn deinitialize(&self, _options: &CheckoutButtonOptions) -> CheckoutResult<()> {
        self.lifecycle().deinitialize()
    }

    fn is_initialized(&self) -> bool {
        self.lifecycle().is_initialized()
    }
}

/// Type alias for a shared button strategy (dynamic dispatch)
pub type BoxedButtonStrategy = Rc<dyn CheckoutButtonStrategy>;

/// Registry of button strategies keyed by payment method id
#[derive(Clone, Default)]
pub struct CheckoutButtonRegistry {
    strategies: HashMap<String, BoxedButtonStrategy>,
}

impl CheckoutButtonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strategy for a payment method
    pub fn register(&mut self, method_id: impl Into<String>, strategy: BoxedButtonStrategy) {
        self.strategies.insert(method_id.into(), strategy);
    }

    /// Register with builder pattern
    pub fn with_strategy(
        mut self,
        method_id: impl Into<String>,
        strategy: BoxedButtonStrategy,
    ) -> Self {
        self.register(method_id, strategy);
        self
    }

    pub fn get(&self, method_id: &str) -> Option<&BoxedButtonStrategy> {
        self.strategies.get(method_id)
    }

    pub fn has_method(&self, method_id: &str) -> bool {
        self.strategies.contains_key(method_id)
    }

    /// List all registered method ids
    pub fn method_ids(&self) -> Vec<&str> {
        self.strategies.keys().map(|s| s.as_str()).collect()
    }

    /// Initialize the strategy registered for `options.method_id`
    pub async fn initialize(&self, options: &CheckoutButtonInitializeOptions) -> CheckoutResult<()> {
        self.strategy_for(options.method_id.as_deref())?
            .initialize(options)
            .await
    }

    /// Deinitialize the strategy registered for `options.method_id`
    pub async fn deinitialize(&self, options: &CheckoutButtonOptions) -> CheckoutResult<()> {
        self.strategy_for(options.method_id.as_deref())?
            .deinitialize(options)
            .await
    }

    fn strategy_for(&self, method_id: Option<&str>) -> CheckoutResult<&BoxedButtonStrategy> {
        let method_id = method_id.ok_or_else(|| {
            CheckoutError::InvalidArgument(
                "Unable to proceed because \"options.methodId\" argument is not provided."
                    .to_string(),
            )
        })?;

        debug!(method_id, "Routing checkout button");
        self.get(method_id).ok_or_else(|| {
            CheckoutError::InvalidArgument(format!(
                "No checkout button is registered for payment method \"{}\".",
                method_id
            ))
        })
    }
}
