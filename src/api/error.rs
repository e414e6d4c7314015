use reqwest::StatusCode;
use serde::Deserialize;

pub type Result<T> = std::result::Result<T, Error>;

/// Ошибка обращения к бэкенду клиники.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transport")]
    Transport(#[from] reqwest::Error),

    #[error("got {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("decode response")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Создаёт ошибку по ответу сервера с кодом не из 2xx.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        Self::Status {
            status,
            message: server_message(body),
        }
    }

    /// Текст, который сервер приложил к ошибке, если он есть.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .map(|m| m.trim().to_owned())
        .filter(|m| !m.is_empty())
}
