use std::sync::Arc;

use cotiza_core::config::AppConfig;
use cotiza_core::{Catalog, QuoteResolver};
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub resolver: Arc<QuoteResolver>,
}

/// Builds the runtime from an already loaded config. A missing or broken
/// catalog file never fails bootstrap; the service starts with an empty
/// catalog instead.
pub fn bootstrap_with_config(config: AppConfig) -> Application {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        catalog_path = %config.catalog.path.display(),
        "starting application bootstrap"
    );

    let catalog = Catalog::load_or_empty(&config.catalog.path);
    info!(
        event_name = "system.bootstrap.catalog_loaded",
        correlation_id = "bootstrap",
        products = catalog.len(),
        "catalog snapshot ready"
    );

    let resolver = Arc::new(QuoteResolver::new(Arc::new(catalog)));
    Application { config, resolver }
}
