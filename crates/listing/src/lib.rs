//! Движок списка проектов: фильтры, постраничная подгрузка и "показать всё"
//! поверх внешнего каталога.
pub mod catalog;
pub mod list;
pub mod shared;

use crate::catalog::ProjectCatalog;
use crate::list::ListingController;
use crate::shared::config::Config;
use std::sync::Arc;

/// Контроллер поверх REST-каталога по конфигурации
pub fn controller_from_config(
    config: &Config,
    bearer_token: Option<String>,
) -> Result<ListingController<Arc<dyn ProjectCatalog>>, catalog::CatalogError> {
    let http = catalog::HttpCatalog::new(&config.catalog.base_url, bearer_token)?;
    let catalog: Arc<dyn ProjectCatalog> = match config.fetch_timeout() {
        Some(limit) => Arc::new(catalog::TimeoutCatalog::new(http, limit)),
        None => Arc::new(http),
    };
    tracing::info!(
        "Listing controller for {} (page_size={})",
        config.catalog.base_url,
        config.listing.page_size
    );
    Ok(ListingController::new(catalog, config.listing_config()))
}
