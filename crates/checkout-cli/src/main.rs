//! # wallet-button
//!
//! Headless run of the Masterpass checkout button.
//!
//! ## Usage
//!
//! ```bash
//! # Optional overrides
//! export CHECKOUT_FIXTURE=config/checkout.toml
//! export PAYMENT_METHOD_ID=masterpass
//! export RUST_LOG=checkout_masterpass=debug
//!
//! wallet-button
//! ```

use checkout_cli::{config::CliConfig, run};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = CliConfig::from_env()?;
    info!("Checkout fixture: {}", config.fixture_path.display());
    info!("Payment method: {}", config.method_id);

    let session = run(&config).await?;

    info!("Scripts loaded: {:?}", session.scripts);
    info!("Wallet opened {} time(s)", session.payloads.len());

    match &session.quote {
        Some(quote) => println!("{}", serde_json::to_string_pretty(quote)?),
        None => println!("No quote loaded"),
    }

    Ok(())
}
