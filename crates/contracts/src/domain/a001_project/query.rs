use super::aggregate::{ProjectStatus, PropertyType};
use super::filter::FilterCriteria;
use serde::{Deserialize, Serialize};

/// Параметры запроса `GET /api/projects`.
///
/// Отсутствующее поле означает "без ограничения по этому измерению".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_area: Option<f64>,

    pub limit: usize,
    pub offset: usize,
}

impl ProjectListQuery {
    /// Строка запроса без ведущего `?`
    pub fn to_query_string(&self) -> Result<String, serde_qs::Error> {
        serde_qs::to_string(self)
    }
}

/// Одна страница выборки: фильтры + курсор `(limit, offset)`
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub filters: FilterCriteria,
    pub limit: usize,
    pub offset: usize,
}

impl PageRequest {
    /// `limit` меньше единицы поднимается до 1
    pub fn new(filters: FilterCriteria, limit: usize, offset: usize) -> Self {
        Self {
            filters,
            limit: limit.max(1),
            offset,
        }
    }

    /// Преобразование в параметры каталога.
    ///
    /// "Все типы" и "все статусы" не передаются вовсе (не пустой строкой).
    /// Границы цены и площади передаются всегда, даже по умолчанию.
    pub fn to_query(&self) -> ProjectListQuery {
        let f = &self.filters;
        let term = f.search_term.trim();

        ProjectListQuery {
            q: if term.is_empty() {
                None
            } else {
                Some(term.to_string())
            },
            property_type: f.property_type,
            status: f.status,
            min_price: Some(f.price_range.min()),
            max_price: Some(f.price_range.max()),
            min_area: Some(f.area_range.min()),
            max_area: Some(f.area_range.max()),
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_type_and_status_are_omitted() {
        let query = PageRequest::new(FilterCriteria::default(), 9, 0).to_query();

        assert_eq!(query.q, None);
        assert_eq!(query.property_type, None);
        assert_eq!(query.status, None);
        assert_eq!(query.min_price, Some(0));
        assert_eq!(query.max_price, Some(30_000_000_000));
        assert_eq!(query.limit, 9);
        assert_eq!(query.offset, 0);

        let qs = query.to_query_string().unwrap();
        assert!(!qs.contains("type="));
        assert!(!qs.contains("status="));
        assert!(!qs.contains("q="));
        assert!(qs.contains("maxPrice=30000000000"));
    }

    #[test]
    fn test_selected_values_are_passed() {
        let mut filters = FilterCriteria::default();
        filters.set_search_term("  Vinhomes ");
        filters.set_type(Some(PropertyType::Apartment));
        filters.set_status(Some(ProjectStatus::ComingSoon));
        filters.set_price_range(0, 3_000_000_000).unwrap();

        let query = PageRequest::new(filters, 9, 18).to_query();
        assert_eq!(query.q.as_deref(), Some("Vinhomes"));

        let qs = query.to_query_string().unwrap();
        assert!(qs.contains("q=Vinhomes"));
        assert!(qs.contains("type=apartment"));
        assert!(qs.contains("status=coming-soon"));
        assert!(qs.contains("maxPrice=3000000000"));
        assert!(qs.contains("offset=18"));
    }

    #[test]
    fn test_zero_limit_is_clamped() {
        let request = PageRequest::new(FilterCriteria::default(), 0, 0);
        assert_eq!(request.limit, 1);
    }
}
