use std::time::Duration;

use log::debug;
use reqwest::{blocking::RequestBuilder, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use super::{Error, Result};
use crate::config::Config;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Клиент к REST API клиники.
///
/// Адрес бэкенда передаётся явно через конфиг, клиент дешево клонируется и
/// разделяется между всеми коллекциями.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    /// Создаёт новый инстанс клиента.
    pub fn new(cfg: &Config) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(10);

        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: cfg.api_url(),
        })
    }

    pub fn get<R: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<R> {
        let mut req = self.client.request(Method::GET, self.build_url(path));

        if !query.is_empty() {
            req = req.query(query);
        }

        let body = self.send(Method::GET, path, req)?;

        Ok(serde_json::from_str(&body)?)
    }

    pub fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, payload: &B) -> Result<R> {
        let req = self.client.request(Method::POST, self.build_url(path)).json(payload);

        let body = self.send(Method::POST, path, req)?;

        Ok(serde_json::from_str(&body)?)
    }

    pub fn put<B: Serialize, R: DeserializeOwned>(&self, path: &str, payload: &B) -> Result<R> {
        let req = self.client.request(Method::PUT, self.build_url(path)).json(payload);

        let body = self.send(Method::PUT, path, req)?;

        Ok(serde_json::from_str(&body)?)
    }

    /// Удаляет ресурс. Тело ответа нас не интересует.
    pub fn delete(&self, path: &str) -> Result<()> {
        let req = self.client.request(Method::DELETE, self.build_url(path));

        self.send(Method::DELETE, path, req)?;

        Ok(())
    }

    fn send(&self, http_method: Method, path: &str, req: RequestBuilder) -> Result<String> {
        debug!("Запрос в АПИ: {} {}", http_method, path);
        let resp = req.send()?;

        let status = resp.status();
        let body = resp.text()?;

        debug!("АПИ ответило {} на {}: {}", status, path, body);

        check_status(status, body)
    }

    fn build_url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url, path.trim_start_matches('/'))
}

/// Тело успешного ответа. Всё, что не 2xx, становится ошибкой с сообщением
/// сервера, если он его прислал.
fn check_status(status: StatusCode, body: String) -> Result<String> {
    if !status.is_success() {
        return Err(Error::from_response(status, &body));
    }

    Ok(body)
}
