use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Фильтр по умолчанию, если `RUST_LOG` не задан
pub const DEFAULT_FILTER: &str = "info,listing=debug,reqwest=warn,hyper=warn";

/// Инициализация системы трассировки (tracing) для headless-хоста
///
/// Логи пишутся в:
/// - stdout (с цветами)
/// - `log_file`, если указан (без цветов)
///
/// Повторный вызов не считается ошибкой: уже установленный subscriber
/// остаётся на месте.
pub fn initialize(log_file: Option<&Path>) -> anyhow::Result<()> {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.into());

    let file_layer = match log_file {
        Some(path) => {
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Arc::new(file))
                    .with_ansi(false),
            )
        }
        None => None,
    };

    let result = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_level))
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .try_init();

    if result.is_err() {
        tracing::debug!("Tracing subscriber already initialized");
    }

    Ok(())
}
