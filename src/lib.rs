//! Catalog application library
//!
//! Domain modules for the product catalog service and the bootstrap that
//! wires them into the HTTP facade.

pub mod modules;

use anyhow::Context;
use catalog_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Re-export commonly used types
pub use modules::*;

/// Registry holding every catalog module
pub fn build_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// Run the catalog service until Ctrl-C.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry();
    let ctx = InitCtx {
        settings: &settings,
    };

    registry
        .init_all(&ctx)
        .await
        .context("module initialization failed")?;
    registry
        .start_all(&ctx)
        .await
        .context("module start failed")?;

    let served = catalog_http::start_server(&registry, &settings, shutdown_signal()).await;

    registry.stop_all().await.context("module shutdown failed")?;
    served
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => {
            tracing::error!(error = %err, "unable to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
