use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub booking: BookingConfig,
}

// Настройки приложения
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
    pub static_dir: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("unknown log format '{}', expected pretty | json", other),
        }
    }
}

// Настройки базы данных
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
    pub acquire_timeout_secs: u64,
}

// Ограничения бронирования
#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// `None` - лимит на один запрос отключен (MAX_TICKETS_PER_BOOKING=0).
    pub max_tickets_per_booking: Option<u32>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Собирает конфигурацию из произвольного источника ключей.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                var("DB_USER", "concert_user"),
                var("DB_PASSWORD", "concert_pass"),
                var("DB_HOST", "database"),
                var("DB_PORT", "5432"),
                var("DB_NAME", "concert_db"),
            ),
        };

        let max_tickets: u32 = parse(&var("MAX_TICKETS_PER_BOOKING", "20"), "MAX_TICKETS_PER_BOOKING")?;

        Ok(Config {
            app: AppConfig {
                host: var("HOST", "0.0.0.0"),
                port: parse(&var("PORT", "3000"), "PORT")?,
                environment: var("ENVIRONMENT", "development"),
                rust_log: var("RUST_LOG", "concert_booking=debug,tower_http=debug"),
                log_format: parse(&var("LOG_FORMAT", "pretty"), "LOG_FORMAT")?,
                static_dir: var("STATIC_DIR", "public"),
            },
            database: DatabaseConfig {
                url: database_url,
                pool_size: parse(&var("DB_POOL_SIZE", "20"), "DB_POOL_SIZE")?,
                acquire_timeout_secs: parse(&var("DB_ACQUIRE_TIMEOUT_SECS", "5"), "DB_ACQUIRE_TIMEOUT_SECS")?,
            },
            booking: BookingConfig {
                max_tickets_per_booking: (max_tickets > 0).then_some(max_tickets),
            },
        })
    }
}

fn parse<T>(raw: &str, key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("{} has invalid value '{}'", key, raw))
}
