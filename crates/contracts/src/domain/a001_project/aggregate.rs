use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Тип объекта недвижимости
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    Apartment,
    Villa,
    Commercial,
    Land,
}

impl PropertyType {
    /// Код, который понимает каталог
    pub fn code(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::Villa => "villa",
            PropertyType::Commercial => "commercial",
            PropertyType::Land => "land",
        }
    }

    /// Название для витрины
    pub fn display_name(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Căn hộ",
            PropertyType::Villa => "Biệt thự",
            PropertyType::Commercial => "Thương mại",
            PropertyType::Land => "Đất nền",
        }
    }

    pub fn all() -> Vec<PropertyType> {
        vec![
            PropertyType::Apartment,
            PropertyType::Villa,
            PropertyType::Commercial,
            PropertyType::Land,
        ]
    }

    /// Парсинг из кода; "all" и неизвестные коды дают `None`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "apartment" => Some(PropertyType::Apartment),
            "villa" => Some(PropertyType::Villa),
            "commercial" => Some(PropertyType::Commercial),
            "land" => Some(PropertyType::Land),
            _ => None,
        }
    }
}

/// Статус продаж проекта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Available,
    Sold,
    ComingSoon,
}

impl ProjectStatus {
    pub fn code(&self) -> &'static str {
        match self {
            ProjectStatus::Available => "available",
            ProjectStatus::Sold => "sold",
            ProjectStatus::ComingSoon => "coming-soon",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectStatus::Available => "Đang mở bán",
            ProjectStatus::Sold => "Đã bán",
            ProjectStatus::ComingSoon => "Sắp mở bán",
        }
    }

    pub fn all() -> Vec<ProjectStatus> {
        vec![
            ProjectStatus::Available,
            ProjectStatus::Sold,
            ProjectStatus::ComingSoon,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "available" => Some(ProjectStatus::Available),
            "sold" => Some(ProjectStatus::Sold),
            "coming-soon" => Some(ProjectStatus::ComingSoon),
            _ => None,
        }
    }
}

// ============================================================================
// Summary DTO
// ============================================================================

/// Карточка проекта в том виде, в котором её отдаёт каталог.
///
/// Для движка списка это неизменяемое значение: он не сортирует и не
/// переписывает элементы, только хранит их в порядке ответа сервера.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub slug: String,
    pub name: String,
    pub price_label: String,
    pub area_label: String,
    pub status: ProjectStatus,
    pub location: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_roundtrip_through_from_code() {
        for t in PropertyType::all() {
            assert_eq!(PropertyType::from_code(t.code()), Some(t));
        }
        for s in ProjectStatus::all() {
            assert_eq!(ProjectStatus::from_code(s.code()), Some(s));
        }
        assert_eq!(PropertyType::from_code("all"), None);
        assert_eq!(ProjectStatus::from_code("all"), None);
    }

    #[test]
    fn test_summary_deserializes_camel_case() {
        let json = r#"{
            "id": "p-17",
            "slug": "sunrise-riverside",
            "name": "Sunrise Riverside",
            "priceLabel": "2,5 tỷ",
            "areaLabel": "72 m²",
            "status": "coming-soon",
            "location": "Quận 7, TP.HCM",
            "createdAt": "2024-03-01T08:00:00Z"
        }"#;

        let summary: ProjectSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.id.value(), "p-17");
        assert_eq!(summary.status, ProjectStatus::ComingSoon);
        assert!(summary.features.is_empty());
    }
}
