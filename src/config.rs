use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Адрес бэкенда клиники, без префикса API.
    pub backend_url: String,

    /// Префикс, под которым живут коллекции.
    pub api_prefix: String,

    /// Таймаут запроса в секундах. Если не задан, используется таймаут
    /// транспорта по умолчанию.
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8080".to_owned(),
            api_prefix: "/api/v1".to_owned(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Полный адрес API, к которому добавляются пути коллекций.
    pub fn api_url(&self) -> String {
        format!("{}{}", self.backend_url, self.api_prefix)
    }
}

/// Загружает конфигурацию.
pub fn load(path: PathBuf) -> Result<Config> {
    let mut cfg: Config = confy::load_path(path)?;

    normalize(&mut cfg)?;

    Ok(cfg)
}

pub fn normalize(cfg: &mut Config) -> Result<()> {
    // Чтобы пути коллекций склеивались без двойных слешей.
    cfg.backend_url = cfg.backend_url.trim().trim_end_matches('/').to_owned();

    let prefix = cfg.api_prefix.trim().trim_matches('/');
    cfg.api_prefix = if prefix.is_empty() {
        String::new()
    } else {
        format!("/{}", prefix)
    };

    reqwest::Url::parse(&cfg.backend_url).map_err(|e| Error::InvalidUrl {
        url: cfg.backend_url.clone(),
        reason: e.to_string(),
    })?;

    Ok(())
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("load config")]
    Load(#[from] confy::ConfyError),

    #[error("invalid backend url \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
