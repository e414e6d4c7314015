//! Поля форм в терминале.
//!
//! Каждый запрос возвращает `None`, если пользователь нажал Esc. Это значит
//! что форму нужно закрыть.

use std::fmt::Display;

use chrono::{Local, NaiveDate, NaiveTime};
use inquire::{validator::Validation, Confirm, CustomType, DateSelect, Select, Text};

use crate::{
    adapter::datetime::{format_time, parse_time},
    display::Row,
    model::Id,
};

/// Результат выбора записи из списка.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Chosen(Id),

    /// Выбирать не из чего.
    Empty,

    Cancelled,
}

struct Choice {
    id: Id,
    label: String,
}

impl Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

pub fn text(title: &str, current: &str) -> anyhow::Result<Option<String>> {
    let value = Text::new(title).with_initial_value(current).prompt_skippable()?;

    Ok(value)
}

pub fn price(title: &str, current: f64) -> anyhow::Result<Option<f64>> {
    let value = CustomType::<f64>::new(title)
        .with_default(current)
        .with_error_message("Please type a valid number")
        .prompt_skippable()?;

    Ok(value)
}

pub fn date(title: &str, current: Option<NaiveDate>) -> anyhow::Result<Option<NaiveDate>> {
    let default = current.unwrap_or_else(|| Local::now().date_naive());

    let value = DateSelect::new(title).with_default(default).prompt_skippable()?;

    Ok(value)
}

/// Выбор одной из заранее известных дат.
pub fn date_of(title: &str, dates: Vec<NaiveDate>, current: Option<NaiveDate>) -> anyhow::Result<Option<NaiveDate>> {
    let cursor = current
        .and_then(|c| dates.iter().position(|d| *d == c))
        .unwrap_or_default();

    let value = Select::new(title, dates).with_starting_cursor(cursor).prompt_skippable()?;

    Ok(value)
}

pub fn time(title: &str, current: Option<NaiveTime>) -> anyhow::Result<Option<NaiveTime>> {
    let initial = current.map(format_time).unwrap_or_default();

    let value = Text::new(title)
        .with_initial_value(&initial)
        .with_placeholder("HH:MM")
        .with_validator(|s: &str| {
            if parse_time(s).is_err() {
                return Ok(Validation::Invalid("expected HH:MM".into()));
            };
            Ok(Validation::Valid)
        })
        .prompt_skippable()?;

    // Валидатор уже проверил формат.
    Ok(value.and_then(|v| parse_time(&v).ok()))
}

/// Выбор записи из списка по её подписи.
pub fn pick<E: Row>(title: &str, items: &[E], current: Option<Id>) -> anyhow::Result<Pick> {
    if items.is_empty() {
        return Ok(Pick::Empty);
    }

    let choices: Vec<Choice> = items
        .iter()
        .map(|e| Choice {
            id: e.id(),
            label: e.label(),
        })
        .collect();

    let cursor = current
        .and_then(|id| choices.iter().position(|c| c.id == id))
        .unwrap_or_default();

    let picked = Select::new(title, choices)
        .with_starting_cursor(cursor)
        .prompt_skippable()?;

    Ok(picked.map_or(Pick::Cancelled, |c| Pick::Chosen(c.id)))
}

/// Выбор одного из вариантов меню.
pub fn choose<T: Display>(title: &str, options: Vec<T>) -> anyhow::Result<Option<T>> {
    let value = Select::new(title, options).prompt_skippable()?;

    Ok(value)
}

pub fn confirm(title: &str) -> anyhow::Result<bool> {
    let value = Confirm::new(title).with_default(false).prompt_skippable()?;

    Ok(value.unwrap_or(false))
}
