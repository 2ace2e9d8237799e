use super::{CatalogError, ProjectCatalog};
use async_trait::async_trait;
use chrono::Utc;
use contracts::domain::a001_project::{
    ProjectId, ProjectListQuery, ProjectStatus, ProjectSummary, PropertyType,
};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Запись каталога: карточка + поля, по которым каталог фильтрует
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub summary: ProjectSummary,
    pub property_type: PropertyType,
    pub description: String,
    pub price: u64,
    pub area: f64,
}

impl CatalogEntry {
    pub fn new(
        id: &str,
        name: &str,
        property_type: PropertyType,
        status: ProjectStatus,
        price: u64,
        area: f64,
    ) -> Self {
        Self {
            summary: ProjectSummary {
                id: ProjectId::new(id),
                slug: slugify(name),
                name: name.to_string(),
                price_label: price_label(price),
                area_label: format!("{} m²", area),
                status,
                location: String::new(),
                features: Vec::new(),
                created_at: Utc::now(),
            },
            property_type,
            description: String::new(),
            price,
            area,
        }
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.summary.location = location.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    fn matches(&self, query: &ProjectListQuery) -> bool {
        if let Some(q) = query.q.as_deref() {
            let q = q.to_lowercase();
            let hit = self.summary.name.to_lowercase().contains(&q)
                || self.description.to_lowercase().contains(&q)
                || self.summary.location.to_lowercase().contains(&q);
            if !hit {
                return false;
            }
        }
        if query.property_type.is_some_and(|t| t != self.property_type) {
            return false;
        }
        if query.status.is_some_and(|s| s != self.summary.status) {
            return false;
        }
        if query.min_price.is_some_and(|min| self.price < min)
            || query.max_price.is_some_and(|max| self.price > max)
        {
            return false;
        }
        if query.min_area.is_some_and(|min| self.area < min)
            || query.max_area.is_some_and(|max| self.area > max)
        {
            return false;
        }
        true
    }
}

/// Каталог в памяти с той же семантикой фильтров, что и REST API.
///
/// Сохраняет порядок добавления, запоминает обслуженные запросы и умеет
/// один раз отказать (`fail_next`).
#[derive(Default)]
pub struct InMemoryCatalog {
    entries: Mutex<Vec<CatalogEntry>>,
    served: Mutex<Vec<ProjectListQuery>>,
    fail_next: Mutex<Option<CatalogError>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Default::default()
        }
    }

    pub fn push(&self, entry: CatalogEntry) {
        lock(&self.entries).push(entry);
    }

    /// Следующий запрос завершится этой ошибкой
    pub fn fail_next(&self, error: CatalogError) {
        *lock(&self.fail_next) = Some(error);
    }

    /// Запросы в порядке поступления
    pub fn served_queries(&self) -> Vec<ProjectListQuery> {
        lock(&self.served).clone()
    }
}

#[async_trait]
impl ProjectCatalog for InMemoryCatalog {
    async fn fetch_projects(
        &self,
        query: &ProjectListQuery,
    ) -> Result<Vec<ProjectSummary>, CatalogError> {
        lock(&self.served).push(query.clone());

        if let Some(error) = lock(&self.fail_next).take() {
            return Err(error);
        }

        let items = lock(&self.entries)
            .iter()
            .filter(|e| e.matches(query))
            .skip(query.offset)
            .take(query.limit)
            .map(|e| e.summary.clone())
            .collect();

        Ok(items)
    }
}

fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// "2,5 tỷ" / "850 triệu"
fn price_label(price: u64) -> String {
    const BILLION: u64 = 1_000_000_000;
    const MILLION: u64 = 1_000_000;

    if price >= BILLION {
        let whole = price / BILLION;
        let tenth = (price % BILLION) / (BILLION / 10);
        if tenth == 0 {
            format!("{} tỷ", whole)
        } else {
            format!("{},{} tỷ", whole, tenth)
        }
    } else {
        format!("{} triệu", price / MILLION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_project::{FilterCriteria, PageRequest};

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            CatalogEntry::new(
                "1",
                "Sunrise Riverside",
                PropertyType::Apartment,
                ProjectStatus::Available,
                2_500_000_000,
                72.0,
            )
            .with_location("Quận 7"),
            CatalogEntry::new(
                "2",
                "Ocean Villa",
                PropertyType::Villa,
                ProjectStatus::Sold,
                25_000_000_000,
                320.0,
            )
            .with_description("biệt thự ven biển"),
            CatalogEntry::new(
                "3",
                "Green Plot",
                PropertyType::Land,
                ProjectStatus::ComingSoon,
                850_000_000,
                100.0,
            ),
        ])
    }

    #[tokio::test]
    async fn test_filters_by_text_type_and_bounds() {
        let catalog = catalog();

        let mut filters = FilterCriteria::default();
        filters.set_search_term("VEN BIỂN");
        let found = catalog
            .fetch_projects(&PageRequest::new(filters, 9, 0).to_query())
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Ocean Villa");

        let mut filters = FilterCriteria::default();
        filters.set_price_range(0, 3_000_000_000).unwrap();
        let found = catalog
            .fetch_projects(&PageRequest::new(filters, 9, 0).to_query())
            .await
            .unwrap();
        let ids: Vec<_> = found.iter().map(|p| p.id.value().to_string()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_offset_and_limit() {
        let catalog = catalog();
        let page = catalog
            .fetch_projects(&PageRequest::new(FilterCriteria::default(), 2, 1).to_query())
            .await
            .unwrap();
        let ids: Vec<_> = page.iter().map(|p| p.id.value().to_string()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[tokio::test]
    async fn test_fail_next_is_one_shot() {
        let catalog = catalog();
        catalog.fail_next(CatalogError::Status(503));
        let query = ProjectListQuery {
            limit: 9,
            ..Default::default()
        };

        assert_eq!(
            catalog.fetch_projects(&query).await,
            Err(CatalogError::Status(503))
        );
        assert_eq!(catalog.fetch_projects(&query).await.unwrap().len(), 3);
        assert_eq!(catalog.served_queries().len(), 2);
    }

    #[test]
    fn test_labels() {
        assert_eq!(price_label(2_500_000_000), "2,5 tỷ");
        assert_eq!(price_label(30_000_000_000), "30 tỷ");
        assert_eq!(price_label(850_000_000), "850 triệu");
        assert_eq!(slugify("Sunrise  Riverside!"), "sunrise-riverside");
    }
}
