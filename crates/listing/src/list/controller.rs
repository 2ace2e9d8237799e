use super::error::ListingError;
use super::state::ListingState;
use crate::catalog::ProjectCatalog;
use contracts::domain::a001_project::{
    AreaRange, FilterCriteria, PageRequest, PriceRange, ProjectStatus, ProjectSummary,
    PropertyType,
};
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

/// Когда смена фильтров запускает новую выборку
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Только по кнопке поиска
    Manual,
    /// Автоматически, после паузы в редактировании
    Debounced { delay: Duration },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingConfig {
    pub page_size: usize,
    /// Лимит запроса "показать всё"
    pub show_all_limit: usize,
    pub refresh: RefreshPolicy,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: 9,
            show_all_limit: 1000,
            refresh: RefreshPolicy::Manual,
        }
    }
}

/// Результат операции загрузки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Ответ применён к списку
    Applied { received: usize },
    /// Операция не требовалась (нечего догружать, ручной режим обновления)
    Skipped,
    /// Ответ устарел и отброшен: фильтры успели измениться
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadMode {
    Reset,
    Append,
    All,
}

struct Inner {
    filters: FilterCriteria,
    // criteria the displayed items were fetched with
    applied: FilterCriteria,
    state: ListingState,

    // generation of the last issued request
    generation: u64,
    // generation whose response is still awaited
    in_flight: Option<u64>,

    filter_revision: u64,
    last_error: Option<ListingError>,
}

impl Inner {
    fn release(&mut self, generation: u64) {
        if self.in_flight == Some(generation) {
            self.in_flight = None;
            self.state.loading = false;
        }
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Снимает флаг загрузки, если future операции был отменён до ответа
struct InFlightGuard<'a> {
    inner: &'a Mutex<Inner>,
    generation: u64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        lock(self.inner).release(self.generation);
    }
}

/// Контроллер списка проектов: единственная точка, которую вызывает
/// слой представления.
///
/// Одновременно выполняется не более одного запроса. Любая смена фильтров
/// делает текущий запрос устаревшим: его ответ будет отброшен, а флаг
/// загрузки снимается сразу. Мьютекс никогда не удерживается через `.await`.
pub struct ListingController<C> {
    catalog: C,
    config: ListingConfig,
    inner: Mutex<Inner>,
}

impl<C: ProjectCatalog> ListingController<C> {
    pub fn new(catalog: C, config: ListingConfig) -> Self {
        Self::with_filters(catalog, config, FilterCriteria::default())
    }

    pub fn with_filters(catalog: C, config: ListingConfig, filters: FilterCriteria) -> Self {
        Self {
            catalog,
            config,
            inner: Mutex::new(Inner {
                applied: filters.clone(),
                filters,
                state: ListingState::default(),
                generation: 0,
                in_flight: None,
                filter_revision: 0,
                last_error: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        lock(&self.inner)
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Новая выборка с нулевого смещения, список заменяется
    pub async fn search(&self) -> Result<LoadOutcome, ListingError> {
        self.run(LoadMode::Reset).await
    }

    /// Следующая страница в конец списка; без `has_more` ничего не делает
    pub async fn load_more(&self) -> Result<LoadOutcome, ListingError> {
        self.run(LoadMode::Append).await
    }

    /// Все подходящие проекты одним запросом, подгрузка после этого
    /// отключается до следующего `search`
    pub async fn show_all(&self) -> Result<LoadOutcome, ListingError> {
        self.run(LoadMode::All).await
    }

    async fn run(&self, mode: LoadMode) -> Result<LoadOutcome, ListingError> {
        let (generation, request) = {
            let mut inner = self.lock();

            if inner.in_flight.is_some() {
                debug!("{:?} rejected: request {:?} in flight", mode, inner.in_flight);
                return Err(ListingError::Busy);
            }
            if mode == LoadMode::Append && !inner.state.has_more {
                return Ok(LoadOutcome::Skipped);
            }

            let (limit, offset) = match mode {
                LoadMode::Reset => (self.config.page_size, 0),
                LoadMode::Append => (self.config.page_size, inner.state.offset),
                LoadMode::All => (self.config.show_all_limit, 0),
            };
            // load-more continues the displayed selection, not pending edits
            let filters = match mode {
                LoadMode::Append => inner.applied.clone(),
                LoadMode::Reset | LoadMode::All => inner.filters.clone(),
            };
            let request = PageRequest::new(filters, limit, offset);

            inner.generation += 1;
            let generation = inner.generation;
            inner.in_flight = Some(generation);
            inner.state.loading = true;
            inner.last_error = None;

            (generation, request)
        };

        let _guard = InFlightGuard {
            inner: &self.inner,
            generation,
        };

        debug!(
            "{:?} #{}: limit={} offset={}",
            mode, generation, request.limit, request.offset
        );
        let result = self.catalog.fetch_projects(&request.to_query()).await;

        let mut inner = self.lock();
        if inner.in_flight != Some(generation) {
            debug!("{:?} #{}: stale response discarded", mode, generation);
            return Ok(LoadOutcome::Superseded);
        }
        inner.release(generation);

        match result {
            Ok(items) => {
                let received = items.len();
                match mode {
                    LoadMode::Reset => inner.state.replace(items, request.limit),
                    LoadMode::Append => inner.state.append(items, request.limit),
                    LoadMode::All => inner.state.materialize_all(items),
                }
                if mode != LoadMode::Append {
                    inner.applied = request.filters;
                }
                debug!(
                    "{:?} #{}: received {}, showing {}, has_more={}",
                    mode,
                    generation,
                    received,
                    inner.state.items.len(),
                    inner.state.has_more
                );
                Ok(LoadOutcome::Applied { received })
            }
            Err(e) => {
                warn!("{:?} #{} failed: {}", mode, generation, e);
                let error = ListingError::Fetch(e);
                inner.last_error = Some(error.clone());
                Err(error)
            }
        }
    }

    /// Реакция на изменение фильтров согласно политике обновления.
    ///
    /// Ревизия фильтров фиксируется в момент вызова: если до истечения
    /// паузы фильтры снова изменятся, выборка не выполняется.
    pub fn on_filters_changed(
        &self,
    ) -> impl Future<Output = Result<LoadOutcome, ListingError>> + '_ {
        let revision = self.lock().filter_revision;
        let refresh = self.config.refresh;

        async move {
            match refresh {
                RefreshPolicy::Manual => Ok(LoadOutcome::Skipped),
                RefreshPolicy::Debounced { delay } => {
                    tokio::time::sleep(delay).await;
                    let current = self.lock().filter_revision;
                    if current != revision {
                        return Ok(LoadOutcome::Superseded);
                    }
                    self.search().await
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    /// Изменить фильтры; возвращает `true`, если критерии действительно
    /// поменялись
    pub fn update_filters(&self, edit: impl FnOnce(&mut FilterCriteria)) -> bool {
        let mut inner = self.lock();
        let before = inner.filters.clone();
        edit(&mut inner.filters);
        if inner.filters.is_equivalent(&before) {
            return false;
        }

        inner.filter_revision += 1;
        if let Some(generation) = inner.in_flight {
            debug!("request #{} superseded by filter change", generation);
            inner.release(generation);
        }
        true
    }

    pub fn set_search_term(&self, term: impl Into<String>) -> bool {
        let term = term.into();
        self.update_filters(|f| f.set_search_term(term))
    }

    pub fn set_type(&self, property_type: Option<PropertyType>) -> bool {
        self.update_filters(|f| f.set_type(property_type))
    }

    pub fn set_status(&self, status: Option<ProjectStatus>) -> bool {
        self.update_filters(|f| f.set_status(status))
    }

    /// Перевёрнутый диапазон отклоняется до построения запроса
    pub fn set_price_range(&self, min: u64, max: u64) -> Result<bool, ListingError> {
        let range = PriceRange::new(min, max)?;
        Ok(self.update_filters(|f| f.price_range = range))
    }

    pub fn set_area_range(&self, min: f64, max: f64) -> Result<bool, ListingError> {
        let range = AreaRange::new(min, max)?;
        Ok(self.update_filters(|f| f.area_range = range))
    }

    pub fn reset_filters(&self) -> bool {
        self.update_filters(FilterCriteria::reset)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn items(&self) -> Vec<ProjectSummary> {
        self.lock().state.items.clone()
    }

    pub fn has_more(&self) -> bool {
        self.lock().state.has_more
    }

    pub fn loading(&self) -> bool {
        self.lock().state.loading
    }

    pub fn offset(&self) -> usize {
        self.lock().state.offset
    }

    pub fn snapshot(&self) -> ListingState {
        self.lock().state.clone()
    }

    pub fn filters(&self) -> FilterCriteria {
        self.lock().filters.clone()
    }

    /// Последняя ошибка загрузки; сбрасывается при старте следующей операции
    pub fn last_error(&self) -> Option<ListingError> {
        self.lock().last_error.clone()
    }

    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }
}
