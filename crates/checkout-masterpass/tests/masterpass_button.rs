//! Lifecycle tests for the Masterpass button against an in-memory DOM.

use async_trait::async_trait;
use checkout_core::{
    BoxedButtonStrategy, Cart, Checkout, CheckoutButtonInitializeOptions, CheckoutButtonOptions,
    CheckoutButtonRegistry, CheckoutButtonStrategy, CheckoutError, CheckoutResult,
    CheckoutSnapshot, CheckoutStore, ClickHandler, Currency, DomEnvironment, LifecyclePhase,
    MemoryDom, MissingDataKind, NotInitializedKind, NodeId, PaymentMethod,
};
use checkout_masterpass::config::BUTTON_IMAGE_URL;
use checkout_masterpass::{
    MasterpassButtonStrategy, MasterpassCheckoutOptions, MasterpassClient, MasterpassLoader,
};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use tokio::sync::oneshot;

const CONTAINER: &str = "masterpass-button";

// =============================================================================
// Fakes
// =============================================================================

/// Hands out queued snapshots; the last one is repeated
#[derive(Default)]
struct FakeStore {
    snapshots: RefCell<VecDeque<CheckoutSnapshot>>,
    loads: Cell<u32>,
    fail: Cell<bool>,
}

#[async_trait(?Send)]
impl CheckoutStore for FakeStore {
    async fn load_default_checkout(&self) -> CheckoutResult<CheckoutSnapshot> {
        self.loads.set(self.loads.get() + 1);
        if self.fail.get() {
            return Err(CheckoutError::Dispatch("503 Service Unavailable".into()));
        }

        let mut snapshots = self.snapshots.borrow_mut();
        let snapshot = if snapshots.len() > 1 {
            snapshots.pop_front()
        } else {
            snapshots.front().cloned()
        };
        snapshot.ok_or_else(|| CheckoutError::Dispatch("no checkout".into()))
    }
}

#[derive(Default)]
struct RecordingClient {
    payloads: RefCell<Vec<MasterpassCheckoutOptions>>,
}

impl MasterpassClient for RecordingClient {
    fn checkout(&self, options: &MasterpassCheckoutOptions) -> CheckoutResult<()> {
        self.payloads.borrow_mut().push(options.clone());
        Ok(())
    }
}

/// Records requested modes; can be held open with a gate
#[derive(Default)]
struct FakeLoader {
    client: Rc<RecordingClient>,
    modes: RefCell<Vec<bool>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    fail: Cell<bool>,
}

#[async_trait(?Send)]
impl MasterpassLoader for FakeLoader {
    async fn load(&self, test_mode: bool) -> CheckoutResult<Rc<dyn MasterpassClient>> {
        self.modes.borrow_mut().push(test_mode);

        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            gate.await.ok();
        }

        if self.fail.get() {
            return Err(CheckoutError::ScriptLoad {
                url: "https://sandbox.masterpass.com/integration/merchant.js".into(),
                message: "script error".into(),
            });
        }

        Ok(Rc::clone(&self.client) as Rc<dyn MasterpassClient>)
    }
}

/// In-memory DOM whose `remove_child` can be made to fail
#[derive(Default)]
struct FlakyDom {
    inner: MemoryDom,
    fail_removal: Cell<bool>,
}

impl DomEnvironment for FlakyDom {
    type Element = NodeId;

    fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.inner.query_by_id(id)
    }

    fn create_element(&self, tag: &str) -> CheckoutResult<NodeId> {
        self.inner.create_element(tag)
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) -> CheckoutResult<()> {
        self.inner.set_attribute(element, name, value)
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> CheckoutResult<()> {
        self.inner.append_child(parent, child)
    }

    fn parent_of(&self, element: &NodeId) -> Option<NodeId> {
        self.inner.parent_of(element)
    }

    fn remove_child(&self, parent: &NodeId, child: &NodeId) -> CheckoutResult<()> {
        if self.fail_removal.get() {
            return Err(CheckoutError::Dom("removeChild rejected".into()));
        }
        self.inner.remove_child(parent, child)
    }

    fn add_click_listener(&self, element: &NodeId, handler: &ClickHandler) -> CheckoutResult<()> {
        self.inner.add_click_listener(element, handler)
    }

    fn remove_click_listener(
        &self,
        element: &NodeId,
        handler: &ClickHandler,
    ) -> CheckoutResult<()> {
        self.inner.remove_click_listener(element, handler)
    }
}

type TestButton = MasterpassButtonStrategy<Rc<FakeStore>, Rc<FakeLoader>, Rc<MemoryDom>>;

struct Harness {
    store: Rc<FakeStore>,
    loader: Rc<FakeLoader>,
    dom: Rc<MemoryDom>,
    button: TestButton,
}

impl Harness {
    fn new(snapshots: Vec<CheckoutSnapshot>) -> Self {
        let store = Rc::new(FakeStore {
            snapshots: RefCell::new(snapshots.into()),
            ..FakeStore::default()
        });
        let loader = Rc::new(FakeLoader::default());
        let dom = Rc::new(MemoryDom::new());
        dom.add_container(CONTAINER);

        let button =
            MasterpassButtonStrategy::new(Rc::clone(&store), Rc::clone(&loader), Rc::clone(&dom));

        Self {
            store,
            loader,
            dom,
            button,
        }
    }

    fn inputs(&self) -> usize {
        self.dom.find_by_tag("input").len()
    }

    fn payloads(&self) -> Vec<MasterpassCheckoutOptions> {
        self.loader.client.payloads.borrow().clone()
    }
}

fn snapshot(checkout_id: &str, test_mode: bool) -> CheckoutSnapshot {
    CheckoutSnapshot::default()
        .with_checkout(Checkout::new(
            "chk1",
            Cart::new("cart1", 42.5, Currency::new("USD")),
        ))
        .with_payment_method(
            PaymentMethod::new("masterpass")
                .with_checkout_id(checkout_id, vec!["visa".into()])
                .with_test_mode(test_mode),
        )
}

fn options() -> CheckoutButtonInitializeOptions {
    CheckoutButtonInitializeOptions::masterpass("masterpass", CONTAINER)
}

fn deinit_options() -> CheckoutButtonOptions {
    CheckoutButtonOptions::new("masterpass")
}

// =============================================================================
// initialize
// =============================================================================

#[tokio::test]
async fn test_rejects_missing_options() {
    let h = Harness::new(vec![snapshot("c1", false)]);

    let without_block = CheckoutButtonInitializeOptions {
        method_id: Some("masterpass".into()),
        masterpass: None,
    };
    let without_method = CheckoutButtonInitializeOptions {
        method_id: None,
        ..options()
    };

    for bad in [without_block, without_method] {
        let err = h.button.initialize(&bad).await.unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidArgument(_)));
    }

    assert_eq!(h.store.loads.get(), 0);
    assert_eq!(h.inputs(), 0);
    assert!(!h.button.is_initialized());
}

#[tokio::test]
async fn test_initialize_mounts_button() {
    let h = Harness::new(vec![snapshot("c1", false)]);

    h.button.initialize(&options()).await.unwrap();

    assert!(h.button.is_initialized());
    assert_eq!(h.button.phase(), LifecyclePhase::Initialized);

    let container = h.dom.query_by_id(CONTAINER).unwrap();
    let button = h.button.sign_in_button().unwrap();
    assert_eq!(h.dom.children(container), vec![button]);
    assert_eq!(h.dom.tag_name(button).as_deref(), Some("input"));
    assert_eq!(h.dom.attribute(button, "type").as_deref(), Some("image"));
    assert_eq!(h.dom.attribute(button, "src").as_deref(), Some(BUTTON_IMAGE_URL));
    assert_eq!(h.dom.listener_count(button), 1);
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let h = Harness::new(vec![snapshot("c1", false)]);

    h.button.initialize(&options()).await.unwrap();
    h.button.initialize(&options()).await.unwrap();

    assert!(h.button.is_initialized());
    assert_eq!(h.store.loads.get(), 1);
    assert_eq!(h.loader.modes.borrow().len(), 1);
    assert_eq!(h.inputs(), 1);
}

#[tokio::test]
async fn test_loader_sees_test_mode_of_current_snapshot() {
    let h = Harness::new(vec![snapshot("c1", false), snapshot("c2", true)]);

    h.button.initialize(&options()).await.unwrap();
    h.button.deinitialize(&deinit_options()).await.unwrap();
    h.button.initialize(&options()).await.unwrap();

    assert_eq!(*h.loader.modes.borrow(), vec![false, true]);

    // The click uses the snapshot from the second initialize too
    h.dom.click(h.button.sign_in_button().unwrap()).unwrap();
    assert_eq!(h.payloads()[0].checkout_id, "c2");
}

#[tokio::test]
async fn test_reinitialize_switches_method_without_reloading() {
    let h = Harness::new(vec![snapshot("c1", false).with_payment_method(
        PaymentMethod::new("masterpass-alt").with_checkout_id("c2", vec!["amex".into()]),
    )]);

    h.button.initialize(&options()).await.unwrap();
    let alt = CheckoutButtonInitializeOptions::masterpass("masterpass-alt", CONTAINER);
    h.button.initialize(&alt).await.unwrap();

    assert_eq!(h.store.loads.get(), 1);
    assert_eq!(h.inputs(), 1);

    h.dom.click(h.button.sign_in_button().unwrap()).unwrap();
    let payloads = h.payloads();
    assert_eq!(payloads[0].checkout_id, "c2");
    assert_eq!(payloads[0].allowed_card_types, vec!["amex"]);
}

#[tokio::test]
async fn test_unconfigured_method_fails_before_loading_client() {
    let h = Harness::new(vec![snapshot("", true)]);

    let err = h.button.initialize(&options()).await.unwrap_err();

    assert!(matches!(
        err,
        CheckoutError::MissingData(MissingDataKind::MissingPaymentMethod)
    ));
    assert!(h.loader.modes.borrow().is_empty());
    assert_eq!(h.inputs(), 0);
    assert_eq!(h.button.phase(), LifecyclePhase::Uninitialized);
}

#[tokio::test]
async fn test_unknown_method_fails() {
    let h = Harness::new(vec![snapshot("c1", true)]);
    let options = CheckoutButtonInitializeOptions::masterpass("masterpass-2", CONTAINER);

    let err = h.button.initialize(&options).await.unwrap_err();
    assert!(matches!(
        err,
        CheckoutError::MissingData(MissingDataKind::MissingPaymentMethod)
    ));
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let h = Harness::new(vec![snapshot("c1", true)]);
    h.store.fail.set(true);

    let err = h.button.initialize(&options()).await.unwrap_err();

    assert!(matches!(err, CheckoutError::Dispatch(_)));
    assert_eq!(h.store.loads.get(), 1);
    assert!(h.loader.modes.borrow().is_empty());
    assert!(!h.button.is_initialized());
}

#[tokio::test]
async fn test_loader_failure_mounts_nothing() {
    let h = Harness::new(vec![snapshot("c1", true)]);
    h.loader.fail.set(true);

    let err = h.button.initialize(&options()).await.unwrap_err();

    assert!(matches!(err, CheckoutError::ScriptLoad { .. }));
    assert_eq!(h.inputs(), 0);
    assert!(h.button.sign_in_button().is_none());
    assert!(!h.button.is_initialized());
}

#[tokio::test]
async fn test_missing_container() {
    let h = Harness::new(vec![snapshot("c1", false)]);
    let options = CheckoutButtonInitializeOptions::masterpass("masterpass", "nowhere");

    let err = h.button.initialize(&options).await.unwrap_err();

    assert!(matches!(err, CheckoutError::ContainerNotFound { ref container } if container == "nowhere"));
    assert_eq!(h.inputs(), 0);
    assert!(!h.button.is_initialized());

    // Nothing was committed, so a click has no client to use
    let err = (h.button.click_handler())().unwrap_err();
    assert!(matches!(
        err,
        CheckoutError::NotInitialized(NotInitializedKind::CheckoutButtonNotInitialized)
    ));

    // A later initialize against an existing container succeeds
    h.dom.add_container("nowhere");
    h.button.initialize(&options).await.unwrap();
    assert_eq!(h.inputs(), 1);
}

// =============================================================================
// click
// =============================================================================

#[tokio::test]
async fn test_click_opens_wallet_with_payload() {
    let h = Harness::new(vec![snapshot("c1", false)]);
    h.button.initialize(&options()).await.unwrap();

    h.dom.click(h.button.sign_in_button().unwrap()).unwrap();

    assert_eq!(
        h.payloads(),
        vec![MasterpassCheckoutOptions {
            checkout_id: "c1".into(),
            allowed_card_types: vec!["visa".into()],
            amount: "42.5".into(),
            currency: "USD".into(),
            cart_id: "cart1".into(),
            suppress_shipping_address: true,
        }]
    );

    // The snapshot is not reloaded on click
    h.dom.click(h.button.sign_in_button().unwrap()).unwrap();
    assert_eq!(h.payloads().len(), 2);
    assert_eq!(h.store.loads.get(), 1);
}

#[tokio::test]
async fn test_click_after_deinitialize() {
    let h = Harness::new(vec![snapshot("c1", false)]);
    h.button.initialize(&options()).await.unwrap();
    h.button.deinitialize(&deinit_options()).await.unwrap();

    let err = (h.button.click_handler())().unwrap_err();
    assert!(matches!(
        err,
        CheckoutError::NotInitialized(NotInitializedKind::CheckoutButtonNotInitialized)
    ));
    assert!(h.payloads().is_empty());
}

// =============================================================================
// deinitialize
// =============================================================================

#[tokio::test]
async fn test_deinitialize_removes_button_and_listener() {
    let h = Harness::new(vec![snapshot("c1", false)]);
    h.button.initialize(&options()).await.unwrap();
    let button = h.button.sign_in_button().unwrap();

    h.button.deinitialize(&deinit_options()).await.unwrap();

    assert!(!h.button.is_initialized());
    assert_eq!(h.dom.parent_of(&button), None);
    assert_eq!(h.dom.listener_count(button), 0);
    assert!(h.button.sign_in_button().is_none());
    assert_eq!(h.inputs(), 0);

    // Second call is a no-op
    h.button.deinitialize(&deinit_options()).await.unwrap();
    assert_eq!(h.button.phase(), LifecyclePhase::Uninitialized);
}

#[tokio::test]
async fn test_failed_removal_keeps_button_wired() {
    let store = Rc::new(FakeStore {
        snapshots: RefCell::new(vec![snapshot("c1", false)].into()),
        ..FakeStore::default()
    });
    let loader = Rc::new(FakeLoader::default());
    let dom = Rc::new(FlakyDom::default());
    let container = dom.inner.add_container(CONTAINER);
    let button = MasterpassButtonStrategy::new(store, Rc::clone(&loader), Rc::clone(&dom));

    button.initialize(&options()).await.unwrap();
    let input = button.sign_in_button().unwrap();

    dom.fail_removal.set(true);
    let err = button.deinitialize(&deinit_options()).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Dom(_)));

    // Still mounted, still clickable, still initialized
    assert_eq!(dom.inner.children(container), vec![input]);
    assert_eq!(dom.inner.listener_count(input), 1);
    assert!(button.is_initialized());
    dom.inner.click(input).unwrap();
    assert_eq!(loader.client.payloads.borrow().len(), 1);

    dom.fail_removal.set(false);
    button.deinitialize(&deinit_options()).await.unwrap();
    assert!(dom.inner.children(container).is_empty());
    assert_eq!(dom.inner.listener_count(input), 0);
    assert!(!button.is_initialized());
}

#[tokio::test]
async fn test_deinitialize_without_initialize() {
    let h = Harness::new(vec![snapshot("c1", false)]);

    h.button.deinitialize(&deinit_options()).await.unwrap();
    h.button
        .deinitialize(&CheckoutButtonOptions::default())
        .await
        .unwrap();

    assert!(!h.button.is_initialized());
}

#[tokio::test]
async fn test_reinitialize_after_deinitialize_mounts_once() {
    let h = Harness::new(vec![snapshot("c1", false)]);

    for _ in 0..3 {
        h.button.initialize(&options()).await.unwrap();
        assert_eq!(h.inputs(), 1);
        h.button.deinitialize(&deinit_options()).await.unwrap();
        assert_eq!(h.inputs(), 0);
    }

    assert_eq!(h.store.loads.get(), 3);
}

#[tokio::test]
async fn test_deinitialize_during_pending_initialize() {
    let h = Harness::new(vec![snapshot("c1", true)]);
    let (release, gate) = oneshot::channel();
    *h.loader.gate.borrow_mut() = Some(gate);

    let options = options();
    let init = h.button.initialize(&options);
    let interleaved = async {
        tokio::task::yield_now().await;
        assert_eq!(h.button.phase(), LifecyclePhase::Initializing);

        // Nothing is mounted yet, so there is nothing to tear down
        h.button.deinitialize(&deinit_options()).await.unwrap();
        assert_eq!(h.inputs(), 0);
        assert_eq!(h.button.phase(), LifecyclePhase::Initializing);

        release.send(()).unwrap();
    };

    let (result, ()) = tokio::join!(init, interleaved);

    result.unwrap();
    assert!(h.button.is_initialized());
    assert_eq!(h.inputs(), 1);
}

// =============================================================================
// registry
// =============================================================================

#[tokio::test]
async fn test_registry_drives_masterpass_button() {
    let h = Harness::new(vec![snapshot("c1", false)]);
    let button = Rc::new(h.button);

    let registry = CheckoutButtonRegistry::new()
        .with_strategy("masterpass", Rc::clone(&button) as BoxedButtonStrategy);

    registry.initialize(&options()).await.unwrap();
    assert!(button.is_initialized());
    assert_eq!(h.dom.find_by_tag("input").len(), 1);

    registry.deinitialize(&deinit_options()).await.unwrap();
    assert!(!button.is_initialized());
    assert!(h.dom.find_by_tag("input").is_empty());
}
