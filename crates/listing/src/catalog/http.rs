use super::{CatalogError, ProjectCatalog};
use async_trait::async_trait;
use contracts::domain::a001_project::{ProjectListQuery, ProjectSummary};
use serde::Deserialize;

const PROJECTS_PATH: &str = "/api/projects";

/// Ответ каталога: голый массив или конверт `{ "data": [...] }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProjectListResponse {
    Bare(Vec<ProjectSummary>),
    Wrapped { data: Vec<ProjectSummary> },
}

impl ProjectListResponse {
    fn into_items(self) -> Vec<ProjectSummary> {
        match self {
            ProjectListResponse::Bare(items) => items,
            ProjectListResponse::Wrapped { data } => data,
        }
    }
}

/// Клиент REST-каталога проектов
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpCatalog {
    /// `bearer_token` передаётся явно: клиент не обращается к
    /// глобальному состоянию авторизации
    pub fn new(base_url: &str, bearer_token: Option<String>) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| CatalogError::Network(format!("Ошибка создания HTTP клиента: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: bearer_token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Полный URL запроса страницы
    pub fn url_for(&self, query: &ProjectListQuery) -> Result<String, CatalogError> {
        let qs = query
            .to_query_string()
            .map_err(query_error)?;
        Ok(format!("{}{}?{}", self.base_url, PROJECTS_PATH, qs))
    }
}

#[async_trait]
impl ProjectCatalog for HttpCatalog {
    async fn fetch_projects(
        &self,
        query: &ProjectListQuery,
    ) -> Result<Vec<ProjectSummary>, CatalogError> {
        let url = self.url_for(query)?;
        tracing::debug!("GET {}", url);

        let mut request = self
            .client
            .get(&url)
            .header("Cache-Control", "no-cache");
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                CatalogError::Network(format!("Не удалось установить соединение: {}", e))
            } else {
                CatalogError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Catalog responded {} for {}", status, url);
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        parse_body(&body)
    }
}

fn query_error(e: serde_qs::Error) -> CatalogError {
    CatalogError::Query(e.to_string())
}

fn parse_body(body: &str) -> Result<Vec<ProjectSummary>, CatalogError> {
    serde_json::from_str::<ProjectListResponse>(body)
        .map(ProjectListResponse::into_items)
        .map_err(|e| CatalogError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_project::{FilterCriteria, PageRequest, PropertyType};

    const ITEM: &str = r#"{
        "id": "1", "slug": "an-phu", "name": "An Phú", "priceLabel": "5 tỷ",
        "areaLabel": "90 m²", "status": "available", "location": "Thủ Đức",
        "features": ["Hồ bơi"], "createdAt": "2023-11-20T10:00:00Z"
    }"#;

    #[test]
    fn test_url_contains_query() {
        let catalog = HttpCatalog::new("http://localhost:3000/", None).unwrap();
        let mut filters = FilterCriteria::default();
        filters.set_type(Some(PropertyType::Land));

        let url = catalog
            .url_for(&PageRequest::new(filters, 9, 9).to_query())
            .unwrap();

        assert!(url.starts_with("http://localhost:3000/api/projects?"));
        assert!(url.contains("type=land"));
        assert!(url.contains("limit=9"));
        assert!(url.contains("offset=9"));
    }

    #[test]
    fn test_parse_bare_and_wrapped_bodies() {
        let bare = format!("[{}]", ITEM);
        let wrapped = format!(r#"{{"data": [{}, {}]}}"#, ITEM, ITEM);

        assert_eq!(parse_body(&bare).unwrap().len(), 1);
        assert_eq!(parse_body(&wrapped).unwrap().len(), 2);
        assert_eq!(parse_body("[]").unwrap().len(), 0);
    }

    #[test]
    fn test_parse_garbage_is_decode_error() {
        assert!(matches!(
            parse_body("<html>502</html>"),
            Err(CatalogError::Decode(_))
        ));
    }

    #[test]
    fn test_query_encoding_failure_is_not_network_error() {
        let e = <serde_qs::Error as serde::ser::Error>::custom("unsupported value");
        assert!(matches!(query_error(e), CatalogError::Query(msg) if msg.contains("unsupported value")));
    }

    #[test]
    fn test_blank_token_is_dropped() {
        let catalog = HttpCatalog::new("http://localhost", Some("  ".into())).unwrap();
        assert!(catalog.bearer_token.is_none());
    }
}
