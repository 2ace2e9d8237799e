//! Общие типы для обмена с каталогом проектов
pub mod domain;
