use super::aggregate::{ProjectStatus, PropertyType};
use std::fmt::Debug;
use thiserror::Error;

/// Верхняя граница цены по умолчанию, VND
pub const DEFAULT_MAX_PRICE: u64 = 30_000_000_000;

/// Верхняя граница площади по умолчанию, м²
pub const DEFAULT_MAX_AREA: f64 = 500.0;

/// Ошибки построения диапазона
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("Invalid range: min {min} is greater than max {max}")]
    Inverted { min: String, max: String },

    #[error("Invalid range bound: {0}")]
    InvalidBound(String),
}

/// Значение, которое может быть границей диапазона
pub trait RangeBound: Copy + PartialOrd + Debug {
    const ZERO: Self;

    /// Граница допустима сама по себе (не NaN, не отрицательная)
    fn is_valid_bound(&self) -> bool;
}

impl RangeBound for u64 {
    const ZERO: Self = 0;

    fn is_valid_bound(&self) -> bool {
        true
    }
}

impl RangeBound for f64 {
    const ZERO: Self = 0.0;

    fn is_valid_bound(&self) -> bool {
        self.is_finite() && *self >= 0.0
    }
}

/// Пара `[min, max]` с проверкой порядка при создании.
///
/// Слайдер с двумя ручками держит пару как одно значение; здесь пара
/// не может оказаться перевёрнутой, поэтому каталог никогда не получит
/// `min > max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange<T: RangeBound> {
    min: T,
    max: T,
}

impl<T: RangeBound> ValueRange<T> {
    pub fn new(min: T, max: T) -> Result<Self, RangeError> {
        if !min.is_valid_bound() {
            return Err(RangeError::InvalidBound(format!("{:?}", min)));
        }
        if !max.is_valid_bound() {
            return Err(RangeError::InvalidBound(format!("{:?}", max)));
        }
        if min > max {
            return Err(RangeError::Inverted {
                min: format!("{:?}", min),
                max: format!("{:?}", max),
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    /// Значение попадает в диапазон (границы включительно)
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

pub type PriceRange = ValueRange<u64>;
pub type AreaRange = ValueRange<f64>;

impl Default for ValueRange<u64> {
    fn default() -> Self {
        Self {
            min: u64::ZERO,
            max: DEFAULT_MAX_PRICE,
        }
    }
}

impl Default for ValueRange<f64> {
    fn default() -> Self {
        Self {
            min: f64::ZERO,
            max: DEFAULT_MAX_AREA,
        }
    }
}

/// Критерии фильтра страницы проектов
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterCriteria {
    // free-text, matched by the catalog
    pub search_term: String,

    // None = "all"
    pub property_type: Option<PropertyType>,
    pub status: Option<ProjectStatus>,

    pub price_range: PriceRange,
    pub area_range: AreaRange,
}

impl FilterCriteria {
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_type(&mut self, property_type: Option<PropertyType>) {
        self.property_type = property_type;
    }

    pub fn set_status(&mut self, status: Option<ProjectStatus>) {
        self.status = status;
    }

    /// Установить диапазон цены; перевёрнутая пара отклоняется и
    /// текущее значение не меняется
    pub fn set_price_range(&mut self, min: u64, max: u64) -> Result<(), RangeError> {
        self.price_range = PriceRange::new(min, max)?;
        Ok(())
    }

    pub fn set_area_range(&mut self, min: f64, max: f64) -> Result<(), RangeError> {
        self.area_range = AreaRange::new(min, max)?;
        Ok(())
    }

    /// Сбросить все поля к значениям по умолчанию
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Критерии дают один и тот же запрос к каталогу (поисковая строка
    /// сравнивается без крайних пробелов)
    pub fn is_equivalent(&self, other: &FilterCriteria) -> bool {
        self.search_term.trim() == other.search_term.trim()
            && self.property_type == other.property_type
            && self.status == other.status
            && self.price_range == other.price_range
            && self.area_range == other.area_range
    }

    pub fn is_default(&self) -> bool {
        self.active_count() == 0
    }

    /// Количество измерений, отличающихся от значений по умолчанию
    /// (для бейджа на панели фильтров)
    pub fn active_count(&self) -> usize {
        let mut count = 0;
        if !self.search_term.trim().is_empty() {
            count += 1;
        }
        if self.property_type.is_some() {
            count += 1;
        }
        if self.status.is_some() {
            count += 1;
        }
        if self.price_range != PriceRange::default() {
            count += 1;
        }
        if self.area_range != AreaRange::default() {
            count += 1;
        }
        count
    }
}
