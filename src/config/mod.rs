use serde::Deserialize;
use std::env;
use thiserror::Error;

use crate::theme::Theme;

/// Локальный бэкенд для dev-сборки.
pub const LOCAL_API_BASE_URL: &str = "http://localhost:5000";
/// Задеплоенный бэкенд.
pub const PRODUCTION_API_BASE_URL: &str = "https://ticket-hub-server-sv0b.onrender.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
    pub admin: AdminConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    pub default_theme: Theme,
    pub session_ttl_minutes: u64,
}

// Удаленный REST API с событиями и бронированиями
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

// Учетка администратора (мок-логин, настоящей авторизации нет)
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let base_url = resolve_api_base_url(env::var("API_BASE_URL").ok().as_deref(), &environment);

        Ok(Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("PORT", "3000")?,
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "ticket_hub=debug,tower_http=debug".to_string()),
                default_theme: parse_var("DEFAULT_THEME", "light")?,
                session_ttl_minutes: parse_var("SESSION_TTL_MINUTES", "60")?,
                environment,
            },
            api: ApiConfig {
                base_url,
                timeout_seconds: parse_var("API_TIMEOUT_SECONDS", "10")?,
            },
            admin: AdminConfig {
                email: env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@tickethub.com".to_string()),
                password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
            },
        })
    }

    pub fn is_development(&self) -> bool {
        is_development(&self.app.environment)
    }
}

fn is_development(environment: &str) -> bool {
    matches!(
        environment.to_ascii_lowercase().as_str(),
        "development" | "dev" | "local"
    )
}

/// Явно заданный адрес важнее всего, дальше dev-сборка смотрит на локальный
/// бэкенд, иначе прод.
pub fn resolve_api_base_url(explicit: Option<&str>, environment: &str) -> String {
    match explicit.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => url.trim_end_matches('/').to_string(),
        None if is_development(environment) => LOCAL_API_BASE_URL.to_string(),
        None => PRODUCTION_API_BASE_URL.to_string(),
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}
