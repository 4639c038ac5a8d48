//! # checkout-cli
//!
//! Runs the Masterpass button lifecycle outside a browser: mount into an
//! in-memory document, click once, print the quote view, unmount.

pub mod config;
pub mod headless;

use anyhow::Context;
use checkout_core::{
    BoxedButtonStrategy, CheckoutButtonInitializeOptions, CheckoutButtonRegistry, CheckoutStore,
    InternalQuote, MemoryDom,
};
use checkout_masterpass::{
    MasterpassButtonStrategy, MasterpassCheckoutOptions, MasterpassScriptLoader,
};
use config::CliConfig;
use headless::{FixtureCheckoutStore, HeadlessBrowser};
use std::rc::Rc;
use tracing::info;

/// What one run observed
#[derive(Debug)]
pub struct Session {
    /// Scripts the loader fetched
    pub scripts: Vec<String>,

    /// Payloads the wallet was opened with
    pub payloads: Vec<MasterpassCheckoutOptions>,

    /// Quote merged with the current addresses
    pub quote: Option<InternalQuote>,

    /// Inputs left in the document after teardown
    pub leftover_buttons: usize,
}

/// Mount, click, read the quote and unmount
pub async fn run(config: &CliConfig) -> anyhow::Result<Session> {
    let dom = Rc::new(MemoryDom::new());
    dom.add_container(&config.container);

    let browser = Rc::new(HeadlessBrowser::new());
    let store = Rc::new(FixtureCheckoutStore::new(&config.fixture_path));

    let loader = MasterpassScriptLoader::with_config(
        Rc::clone(&browser),
        Rc::clone(&browser),
        config.masterpass.clone(),
    );
    let button = Rc::new(MasterpassButtonStrategy::with_config(
        Rc::clone(&store),
        loader,
        Rc::clone(&dom),
        config.masterpass.clone(),
    ));

    let registry = CheckoutButtonRegistry::new()
        .with_strategy(config.method_id.clone(), button.clone() as BoxedButtonStrategy);

    let options = CheckoutButtonInitializeOptions::masterpass(&config.method_id, &config.container);
    registry.initialize(&options).await?;

    let sign_in_button = button
        .sign_in_button()
        .context("button was not mounted")?;
    info!("Clicking the Masterpass button");
    dom.click(sign_in_button)?;

    let snapshot = store.load_default_checkout().await?;
    let quote = snapshot.quote_selector().get_quote();

    registry.deinitialize(&options.button_options()).await?;

    Ok(Session {
        scripts: browser.scripts(),
        payloads: browser.wallet().opened(),
        quote,
        leftover_buttons: dom.find_by_tag("input").len(),
    })
}
