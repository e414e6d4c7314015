//! Табличное представление коллекций.

use crate::{
    adapter::datetime::{format_date, format_time},
    model::{Animal, Appointment, Customer, Doctor, Entity, Report, Vaccination, WorkDay},
};

/// Заглушка для ячеек, которым нечего показать.
pub const NOT_AVAILABLE: &str = "N/A";

/// Строка таблицы.
pub trait Row: Entity {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;

    /// Короткая подпись записи для списков выбора.
    fn label(&self) -> String;
}

/// Рисует таблицу с выровненными колонками.
pub fn render<R: Row>(rows: &[R]) -> String {
    let cells: Vec<Vec<String>> = rows.iter().map(Row::cells).collect();

    let mut widths: Vec<usize> = R::HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, R::HEADERS.iter().copied(), &widths);
    let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, dashes.iter().map(String::as_str), &widths);
    for row in &cells {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }

    if rows.is_empty() {
        out.push_str(&format!("(no {})\n", R::PLURAL));
    }

    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();

    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}

fn date_cell(date: Option<chrono::NaiveDate>) -> String {
    date.map(format_date).unwrap_or_default()
}

impl Row for Customer {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Phone", "City", "Address", "Email"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.phone.clone(),
            self.city.clone(),
            self.address.clone(),
            self.email.clone(),
        ]
    }

    fn label(&self) -> String {
        format!("#{} {}", self.id, self.name)
    }
}

impl Row for Doctor {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Phone", "City", "Address", "Email"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.phone.clone(),
            self.city.clone(),
            self.address.clone(),
            self.email.clone(),
        ]
    }

    fn label(&self) -> String {
        format!("#{} {}", self.id, self.name)
    }
}

impl Row for WorkDay {
    const HEADERS: &'static [&'static str] = &["ID", "Doctor Name", "Work Date"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.doctor_name().to_owned(),
            date_cell(self.work_day),
        ]
    }

    fn label(&self) -> String {
        format!("#{} {} {}", self.id, date_cell(self.work_day), self.doctor_name())
    }
}

impl Row for Animal {
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "Name",
        "Breed",
        "Colour",
        "Date of Birth",
        "Gender",
        "Species",
        "Customer Name",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.breed.clone(),
            self.colour.clone(),
            date_cell(self.date_of_birth),
            self.gender.clone(),
            self.species.clone(),
            self.customer_name().to_owned(),
        ]
    }

    fn label(&self) -> String {
        format!("#{} {}", self.id, self.name)
    }
}

impl Row for Appointment {
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "Date",
        "Time",
        "Animal Name",
        "Customer Name",
        "Doctor Name",
    ];

    fn cells(&self) -> Vec<String> {
        let (date, time) = self.schedule().unzip();

        vec![
            self.id.to_string(),
            date_cell(date),
            time.map(format_time).unwrap_or_default(),
            self.animal_name().to_owned(),
            self.customer_name().to_owned(),
            self.doctor_name().to_owned(),
        ]
    }

    fn label(&self) -> String {
        let when = match self.schedule() {
            Some((date, time)) => format!("{} {}", format_date(date), format_time(time)),
            None => NOT_AVAILABLE.to_owned(),
        };

        format!("#{} {} {} / {}", self.id, when, self.animal_name(), self.doctor_name())
    }
}

impl Row for Vaccination {
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "Name",
        "Code",
        "Protection Start Date",
        "Protection Finish Date",
        "Animal Name",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.code.clone(),
            date_cell(self.protection_start_date),
            date_cell(self.protection_finish_date),
            or_not_available(self.animal_name()),
        ]
    }

    fn label(&self) -> String {
        format!("#{} {} ({})", self.id, self.name, self.animal_name())
    }
}

impl Row for Report {
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "Title",
        "Diagnosis",
        "Price",
        "Appointment Date",
        "Appointment Time",
        "Doctor Name",
        "Animal Name",
        "Customer Name",
    ];

    fn cells(&self) -> Vec<String> {
        let mut cells = vec![
            self.id.to_string(),
            self.title.clone(),
            self.diagnosis.clone(),
            self.price.to_string(),
        ];

        match &self.appointment {
            Some(appointment) => {
                let (date, time) = appointment.schedule().unzip();
                cells.extend([
                    date.map_or_else(|| NOT_AVAILABLE.to_owned(), format_date),
                    time.map_or_else(|| NOT_AVAILABLE.to_owned(), format_time),
                    or_not_available(appointment.doctor_label()),
                    or_not_available(appointment.animal_label()),
                    or_not_available(appointment.customer_label()),
                ]);
            }
            None => cells.extend(std::iter::repeat(NOT_AVAILABLE.to_owned()).take(5)),
        }

        cells
    }

    fn label(&self) -> String {
        format!("#{} {}", self.id, self.title)
    }
}

fn or_not_available(value: &str) -> String {
    if value.is_empty() {
        NOT_AVAILABLE.to_owned()
    } else {
        value.to_owned()
    }
}
