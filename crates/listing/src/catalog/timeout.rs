use super::{CatalogError, ProjectCatalog};
use async_trait::async_trait;
use contracts::domain::a001_project::{ProjectListQuery, ProjectSummary};
use std::time::Duration;

/// Ограничение времени ответа каталога.
///
/// Движок сам тайм-аутов не ставит; истечение срока превращается в
/// обычную ошибку загрузки.
pub struct TimeoutCatalog<C> {
    inner: C,
    limit: Duration,
}

impl<C: ProjectCatalog> TimeoutCatalog<C> {
    pub fn new(inner: C, limit: Duration) -> Self {
        Self { inner, limit }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: ProjectCatalog> ProjectCatalog for TimeoutCatalog<C> {
    async fn fetch_projects(
        &self,
        query: &ProjectListQuery,
    ) -> Result<Vec<ProjectSummary>, CatalogError> {
        match tokio::time::timeout(self.limit, self.inner.fetch_projects(query)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("Catalog request timed out after {:?}", self.limit);
                Err(CatalogError::Timeout(self.limit.as_millis()))
            }
        }
    }
}
