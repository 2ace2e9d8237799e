pub mod http;
pub mod memory;
pub mod timeout;

use async_trait::async_trait;
use contracts::domain::a001_project::{ProjectListQuery, ProjectSummary};
use std::sync::Arc;
use thiserror::Error;

pub use http::HttpCatalog;
pub use memory::{CatalogEntry, InMemoryCatalog};
pub use timeout::TimeoutCatalog;

/// Ошибки получения страницы из каталога.
///
/// Все варианты считаются временными: движок их не повторяет, а
/// пользователь может повторить действие вручную.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to build request query: {0}")]
    Query(String),

    #[error("Catalog responded with status {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Catalog did not respond within {0} ms")]
    Timeout(u128),
}

/// Внешний каталог проектов (только чтение)
#[async_trait]
pub trait ProjectCatalog: Send + Sync {
    /// Одна страница проектов по запросу.
    ///
    /// Порядок элементов задаёт каталог; метаданных о общем количестве нет.
    async fn fetch_projects(
        &self,
        query: &ProjectListQuery,
    ) -> Result<Vec<ProjectSummary>, CatalogError>;
}

#[async_trait]
impl<C: ProjectCatalog + ?Sized> ProjectCatalog for Arc<C> {
    async fn fetch_projects(
        &self,
        query: &ProjectListQuery,
    ) -> Result<Vec<ProjectSummary>, CatalogError> {
        (**self).fetch_projects(query).await
    }
}
