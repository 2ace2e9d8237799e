use crate::catalog::CatalogError;
use contracts::domain::a001_project::RangeError;
use thiserror::Error;

/// Ошибки операций списка проектов
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ListingError {
    #[error("Another request is already in progress")]
    Busy,

    #[error(transparent)]
    InvalidRange(#[from] RangeError),

    #[error("Ошибка загрузки: {0}")]
    Fetch(#[from] CatalogError),
}
