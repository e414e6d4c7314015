//! Уведомления, которые видит пользователь.

use crate::{adapter::ValidationError, api, collection::Action};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display(fmt = "{}", text)]
pub struct Notice {
    pub level: Level,
    pub text: String,
}

impl Notice {
    pub fn success(action: Action, name: &str) -> Self {
        let verb = match action {
            Action::Create => "added",
            Action::Update => "updated",
            Action::Delete => "deleted",
        };

        Self {
            level: Level::Success,
            text: format!("{} {} successfully!", capitalize(name), verb),
        }
    }

    pub fn fetch_failed(plural: &str) -> Self {
        Self::error(format!("There was an error fetching the {}.", plural))
    }

    /// Ошибка мутации. Если сервер объяснил причину, показываем её.
    pub fn mutation_failed(action: Action, name: &str, err: &api::Error) -> Self {
        let verb = match action {
            Action::Create => "saving",
            Action::Update => "updating",
            Action::Delete => "deleting",
        };

        let mut text = format!("There was an error {} the {}.", verb, name);
        if let Some(message) = err.server_message() {
            text.push(' ');
            text.push_str(message);
        }

        Self::error(text)
    }

    pub fn invalid(err: &ValidationError) -> Self {
        Self::error(err.to_string())
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
