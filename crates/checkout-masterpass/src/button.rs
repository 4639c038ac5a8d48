//! # Masterpass Button Strategy
//!
//! Mounts a Masterpass "Buy with Masterpass" button and opens the wallet
//! when it is clicked.
//!
//! `initialize` runs strictly in order:
//!
//! 1. load the default checkout through the store
//! 2. resolve the payment method from that snapshot for its test-mode flag
//! 3. load the Masterpass client for that mode
//! 4. create the button inside the configured container and attach the
//!    click handler
//! 5. commit the button state and mark the lifecycle initialized
//!
//! A failure at any step leaves nothing behind. `deinitialize` undoes
//! step 4 and clears the committed state.

use crate::accessor::{checkout_with_cart, masterpass_payment_method};
use crate::client::{MasterpassCheckoutOptions, MasterpassClient};
use crate::config::MasterpassConfig;
use crate::loader::MasterpassLoader;
use async_trait::async_trait;
use checkout_core::{
    ButtonLifecycle, CheckoutButtonInitializeOptions, CheckoutButtonOptions,
    CheckoutButtonStrategy, CheckoutError, CheckoutResult, CheckoutSnapshot, CheckoutStore,
    ClickHandler, DomEnvironment, LifecyclePhase, MasterpassButtonInitializeOptions,
    NotInitializedKind, PaymentMethod,
};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, instrument};

/// Everything an initialized button holds. Replaced as a whole.
pub(crate) struct MasterpassButtonState<E> {
    pub(crate) method_id: Option<String>,
    pub(crate) checkout: Option<CheckoutSnapshot>,
    pub(crate) client: Option<Rc<dyn MasterpassClient>>,
    pub(crate) sign_in_button: Option<E>,
}

impl<E> Default for MasterpassButtonState<E> {
    fn default() -> Self {
        Self {
            method_id: None,
            checkout: None,
            client: None,
            sign_in_button: None,
        }
    }
}

impl<E> MasterpassButtonState<E> {
    pub(crate) fn payment_method(&self) -> CheckoutResult<&PaymentMethod> {
        masterpass_payment_method(self.method_id.as_deref(), self.checkout.as_ref())
    }

    pub(crate) fn client(&self) -> CheckoutResult<&Rc<dyn MasterpassClient>> {
        self.client.as_ref().ok_or(CheckoutError::NotInitialized(
            NotInitializedKind::CheckoutButtonNotInitialized,
        ))
    }

    pub(crate) fn checkout_payload(&self) -> CheckoutResult<MasterpassCheckoutOptions> {
        let method = self.payment_method()?;
        let checkout = checkout_with_cart(self.checkout.as_ref())?;

        MasterpassCheckoutOptions::from_checkout(method, checkout)
    }
}

/// Click handling for a shared state record.
///
/// The state borrow ends before the client runs, so the client may call
/// back into the button.
pub(crate) fn handle_wallet_button_click<E>(
    state: &RefCell<MasterpassButtonState<E>>,
) -> CheckoutResult<()> {
    let (client, payload) = {
        let state = state.borrow();
        let client = Rc::clone(state.client()?);
        (client, state.checkout_payload()?)
    };

    debug!(cart_id = %payload.cart_id, "Opening Masterpass wallet");
    client.checkout(&payload)
}

/// Masterpass checkout button.
///
/// Generic over the checkout store, the Masterpass loader and the DOM, so
/// the same lifecycle runs in the browser and against in-memory fakes.
pub struct MasterpassButtonStrategy<S, L, D: DomEnvironment> {
    store: S,
    masterpass_loader: L,
    dom: D,
    config: MasterpassConfig,
    lifecycle: ButtonLifecycle,
    state: Rc<RefCell<MasterpassButtonState<D::Element>>>,
    click_handler: ClickHandler,
}

impl<S, L, D> MasterpassButtonStrategy<S, L, D>
where
    S: CheckoutStore,
    L: MasterpassLoader,
    D: DomEnvironment,
    D::Element: 'static,
{
    /// Create a new Masterpass button strategy
    pub fn new(store: S, masterpass_loader: L, dom: D) -> Self {
        Self::with_config(store, masterpass_loader, dom, MasterpassConfig::default())
    }

    pub fn with_config(store: S, masterpass_loader: L, dom: D, config: MasterpassConfig) -> Self {
        let state = Rc::new(RefCell::new(MasterpassButtonState::default()));

        // Created once so add and remove see the same listener.
        let click_handler: ClickHandler = {
            let state = Rc::clone(&state);
            Rc::new(move || handle_wallet_button_click(&state))
        };

        Self {
            store,
            masterpass_loader,
            dom,
            config,
            lifecycle: ButtonLifecycle::new(),
            state,
            click_handler,
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.lifecycle.phase()
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// The mounted button, if any
    pub fn sign_in_button(&self) -> Option<D::Element> {
        self.state.borrow().sign_in_button.clone()
    }

    /// The listener attached to the mounted button
    pub fn click_handler(&self) -> &ClickHandler {
        &self.click_handler
    }

    async fn load_and_mount(
        &self,
        method_id: &str,
        options: &MasterpassButtonInitializeOptions,
    ) -> CheckoutResult<MasterpassButtonState<D::Element>> {
        let checkout = self.store.load_default_checkout().await?;

        let test_mode = masterpass_payment_method(Some(method_id), Some(&checkout))?
            .config
            .test_mode;
        debug!(test_mode, "Loading Masterpass client");

        let client = self.masterpass_loader.load(test_mode).await?;
        let sign_in_button = self.create_sign_in_button(&options.container)?;

        Ok(MasterpassButtonState {
            method_id: Some(method_id.to_string()),
            checkout: Some(checkout),
            client: Some(client),
            sign_in_button: Some(sign_in_button),
        })
    }

    fn create_sign_in_button(&self, container: &str) -> CheckoutResult<D::Element> {
        let button_container =
            self.dom
                .query_by_id(container)
                .ok_or_else(|| CheckoutError::ContainerNotFound {
                    container: container.to_string(),
                })?;

        let button = self.dom.create_element("input")?;
        self.dom.set_attribute(&button, "type", "image")?;
        self.dom
            .set_attribute(&button, "src", &self.config.button_image_url)?;
        self.dom.append_child(&button_container, &button)?;

        if let Err(err) = self.dom.add_click_listener(&button, &self.click_handler) {
            self.dom.remove_child(&button_container, &button)?;
            return Err(err);
        }

        Ok(button)
    }

    fn remove_sign_in_button(&self, button: &D::Element) -> CheckoutResult<()> {
        if let Some(parent) = self.dom.parent_of(button) {
            self.dom
                .remove_click_listener(button, &self.click_handler)?;

            if let Err(err) = self.dom.remove_child(&parent, button) {
                // Still mounted, so it keeps its listener.
                self.dom.add_click_listener(button, &self.click_handler)?;
                return Err(err);
            }
        }
        Ok(())
    }
}

/// Masterpass options and method id, or `InvalidArgument`
fn required_options(
    options: &CheckoutButtonInitializeOptions,
) -> CheckoutResult<(&MasterpassButtonInitializeOptions, &str)> {
    match (&options.masterpass, options.method_id.as_deref()) {
        (Some(masterpass), Some(method_id)) if !method_id.is_empty() => Ok((masterpass, method_id)),
        _ => Err(CheckoutError::InvalidArgument(
            "Unable to proceed because \"options.masterpass\" argument is not provided."
                .to_string(),
        )),
    }
}

#[async_trait(?Send)]
impl<S, L, D> CheckoutButtonStrategy for MasterpassButtonStrategy<S, L, D>
where
    S: CheckoutStore,
    L: MasterpassLoader,
    D: DomEnvironment,
    D::Element: 'static,
{
    fn lifecycle(&self) -> &ButtonLifecycle {
        &self.lifecycle
    }

    #[instrument(skip_all, fields(method_id = ?options.method_id))]
    async fn initialize(&self, options: &CheckoutButtonInitializeOptions) -> CheckoutResult<()> {
        let (masterpass_options, method_id) = required_options(options)?;

        if self.lifecycle.is_initialized() {
            debug!("Masterpass button already initialized");
            self.state.borrow_mut().method_id = Some(method_id.to_string());
            return self.lifecycle.initialize();
        }

        self.lifecycle.begin_initialize();

        match self.load_and_mount(method_id, masterpass_options).await {
            Ok(state) => {
                *self.state.borrow_mut() = state;
                info!(container = %masterpass_options.container, "Masterpass button mounted");
                self.lifecycle.initialize()
            }
            Err(err) => {
                self.lifecycle.abort_initialize();
                Err(err)
            }
        }
    }

    #[instrument(skip_all, fields(method_id = ?options.method_id))]
    async fn deinitialize(&self, options: &CheckoutButtonOptions) -> CheckoutResult<()> {
        match self.lifecycle.phase() {
            LifecyclePhase::Initialized => {}
            LifecyclePhase::Uninitialized => return self.lifecycle.deinitialize(),
            // Nothing is mounted yet, or teardown is already running
            phase => {
                debug!(?phase, "Masterpass button is mid-transition");
                return Ok(());
            }
        }

        self.lifecycle.begin_deinitialize();

        let sign_in_button = self.state.borrow().sign_in_button.clone();
        if let Some(button) = sign_in_button {
            if let Err(err) = self.remove_sign_in_button(&button) {
                self.lifecycle.abort_deinitialize();
                return Err(err);
            }
        }

        *self.state.borrow_mut() = MasterpassButtonState::default();
        debug!("Masterpass button removed");

        self.lifecycle.deinitialize()
    }
}
