use std::{convert::Infallible, fmt::Debug};

use chrono::NaiveDate;

use crate::{adapter::DATE_FORMAT, model::Id};

/// Критерий поиска по коллекции.
pub trait Search: Debug + Clone {
    /// Путь относительно коллекции. Пустая строка означает саму коллекцию.
    fn path(&self) -> &'static str;

    /// Параметры строки запроса.
    fn query(&self) -> Vec<(&'static str, String)>;
}

/// Для коллекций без поиска.
impl Search for Infallible {
    fn path(&self) -> &'static str {
        match *self {}
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        match *self {}
    }
}

/// Закрытый диапазон дат.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    fn push_query(&self, query: &mut Vec<(&'static str, String)>) {
        query.push(("startDate", self.start.format(DATE_FORMAT).to_string()));
        query.push(("endDate", self.end.format(DATE_FORMAT).to_string()));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerSearch {
    ByName(String),
}

impl Search for CustomerSearch {
    fn path(&self) -> &'static str {
        match self {
            Self::ByName(_) => "searchByName",
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::ByName(name) => vec![("name", name.trim().to_owned())],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkDaySearch {
    ByDoctor(Id),
}

impl Search for WorkDaySearch {
    fn path(&self) -> &'static str {
        ""
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::ByDoctor(id) => vec![("doctorId", id.to_string())],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentSearch {
    ByDoctor { id: Id, range: DateRange },
    ByAnimal { id: Id, range: DateRange },
}

impl Search for AppointmentSearch {
    fn path(&self) -> &'static str {
        match self {
            Self::ByDoctor { .. } => "searchByDoctorAndDateRange",
            Self::ByAnimal { .. } => "searchByAnimalAndDateRange",
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let (Self::ByDoctor { id, range } | Self::ByAnimal { id, range }) = self;

        let mut query = vec![("id", id.to_string())];
        range.push_query(&mut query);
        query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaccinationSearch {
    ByAnimal(Id),
    ByProtectionRange(DateRange),
}

impl Search for VaccinationSearch {
    fn path(&self) -> &'static str {
        match self {
            Self::ByAnimal(_) => "searchByAnimal",
            Self::ByProtectionRange(_) => "searchByVaccinationRange",
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::ByAnimal(id) => vec![("id", id.to_string())],
            Self::ByProtectionRange(range) => {
                let mut query = Vec::with_capacity(2);
                range.push_query(&mut query);
                query
            }
        }
    }
}
