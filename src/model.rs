//! Сущности в том виде, в каком их отдаёт бэкенд клиники.

use std::{convert::Infallible, fmt::Debug};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

use crate::{
    adapter::{
        datetime, AnimalDraft, AppointmentDraft, CustomerDraft, Draft, DoctorDraft, ReportDraft,
        VaccinationDraft, WorkDayDraft,
    },
    api::{AppointmentSearch, CustomerSearch, Search, VaccinationSearch, WorkDaySearch},
    newtype,
};

newtype!(Id, i64, "i64");

/// Сущность, живущая в отдельной коллекции бэкенда.
pub trait Entity: DeserializeOwned + Clone + Debug {
    /// Черновик, через который сущность создаётся и редактируется.
    type Draft: Draft<Entity = Self>;

    /// Критерии поиска по коллекции.
    type Search: Search;

    /// Путь коллекции относительно префикса API.
    const RESOURCE: &'static str;

    /// Название одной записи для уведомлений.
    const NAME: &'static str;

    /// Название коллекции для уведомлений.
    const PLURAL: &'static str;

    fn id(&self) -> Id;
}

/// Тело запроса, которое получается из черновика сущности.
pub type Payload<E> = <<E as Entity>::Draft as Draft>::Payload;

/// Обёртка, в которой бэкенд отдаёт списки.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
}

/// Ссылка на другую сущность в теле запроса.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct Reference {
    pub id: Id,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Reference {
    pub fn new(id: Id) -> Self {
        Self { id, name: None }
    }
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Customer {
    pub id: Id,
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub phone: String,
    #[serde(deserialize_with = "text")]
    pub city: String,
    #[serde(deserialize_with = "text")]
    pub address: String,
    #[serde(deserialize_with = "text")]
    pub email: String,
}

impl Entity for Customer {
    type Draft = CustomerDraft;
    type Search = CustomerSearch;

    const RESOURCE: &'static str = "customers";
    const NAME: &'static str = "customer";
    const PLURAL: &'static str = "customers";

    fn id(&self) -> Id {
        self.id
    }
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Doctor {
    pub id: Id,
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub phone: String,
    #[serde(deserialize_with = "text")]
    pub city: String,
    #[serde(deserialize_with = "text")]
    pub address: String,
    #[serde(deserialize_with = "text")]
    pub email: String,
}

impl Entity for Doctor {
    type Draft = DoctorDraft;
    type Search = Infallible;

    const RESOURCE: &'static str = "doctors";
    const NAME: &'static str = "doctor";
    const PLURAL: &'static str = "doctors";

    fn id(&self) -> Id {
        self.id
    }
}

/// День, в который врач принимает.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkDay {
    pub id: Id,

    #[serde(deserialize_with = "datetime::calendar_date")]
    pub work_day: Option<NaiveDate>,

    pub doctor: Option<Doctor>,
}

impl Entity for WorkDay {
    type Draft = WorkDayDraft;
    type Search = WorkDaySearch;

    const RESOURCE: &'static str = "available-dates";
    const NAME: &'static str = "work day";
    const PLURAL: &'static str = "work days";

    fn id(&self) -> Id {
        self.id
    }
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Animal {
    pub id: Id,
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub breed: String,
    #[serde(deserialize_with = "text")]
    pub colour: String,

    #[serde(deserialize_with = "datetime::calendar_date")]
    pub date_of_birth: Option<NaiveDate>,

    #[serde(deserialize_with = "text")]
    pub gender: String,
    #[serde(deserialize_with = "text")]
    pub species: String,
    pub customer: Option<Customer>,
}

impl Entity for Animal {
    type Draft = AnimalDraft;
    type Search = Infallible;

    const RESOURCE: &'static str = "animals";
    const NAME: &'static str = "animal";
    const PLURAL: &'static str = "animals";

    fn id(&self) -> Id {
        self.id
    }
}

/// Животное без владельца, в таком виде оно приходит внутри вакцинации.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimalSummary {
    pub id: Id,
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub breed: String,
    #[serde(deserialize_with = "text")]
    pub colour: String,

    #[serde(deserialize_with = "datetime::calendar_date")]
    pub date_of_birth: Option<NaiveDate>,

    #[serde(deserialize_with = "text")]
    pub gender: String,
    #[serde(deserialize_with = "text")]
    pub species: String,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Appointment {
    pub id: Id,

    #[serde(deserialize_with = "datetime::instant")]
    pub appointment_date: Option<DateTime<Utc>>,

    pub animal: Option<Animal>,
    pub doctor: Option<Doctor>,
}

impl Entity for Appointment {
    type Draft = AppointmentDraft;
    type Search = AppointmentSearch;

    const RESOURCE: &'static str = "appointments";
    const NAME: &'static str = "appointment";
    const PLURAL: &'static str = "appointments";

    fn id(&self) -> Id {
        self.id
    }
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Vaccination {
    pub id: Id,
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub code: String,

    #[serde(deserialize_with = "datetime::calendar_date")]
    pub protection_start_date: Option<NaiveDate>,

    #[serde(deserialize_with = "datetime::calendar_date")]
    pub protection_finish_date: Option<NaiveDate>,

    pub animal: Option<AnimalSummary>,
}

impl Entity for Vaccination {
    type Draft = VaccinationDraft;
    type Search = VaccinationSearch;

    const RESOURCE: &'static str = "vaccinations";
    const NAME: &'static str = "vaccination";
    const PLURAL: &'static str = "vaccinations";

    fn id(&self) -> Id {
        self.id
    }
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Report {
    pub id: Id,
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub diagnosis: String,
    #[serde(deserialize_with = "amount")]
    pub price: f64,

    pub appointment: Option<ReportAppointment>,
}

/// Приём в том виде, в каком он приходит внутри отчёта.
///
/// Бэкенд отдаёт либо плоскую проекцию (`date`, `doctorName`, `animalName`,
/// `customerName`), либо полный приём с вложенными врачом и животным.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportAppointment {
    pub id: Id,

    #[serde(alias = "date", deserialize_with = "datetime::instant")]
    pub appointment_date: Option<DateTime<Utc>>,

    #[serde(deserialize_with = "text")]
    pub doctor_name: String,

    #[serde(deserialize_with = "text")]
    pub animal_name: String,

    #[serde(deserialize_with = "text")]
    pub customer_name: String,

    pub animal: Option<Animal>,
    pub doctor: Option<Doctor>,
}

impl Entity for Report {
    type Draft = ReportDraft;
    type Search = Infallible;

    const RESOURCE: &'static str = "reports";
    const NAME: &'static str = "report";
    const PLURAL: &'static str = "reports";

    fn id(&self) -> Id {
        self.id
    }
}

/// Строка, которую бэкенд может прислать как `null`.
fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn null_strings_read_as_blank() {
        let envelope: Envelope<Customer> = serde_json::from_value(json!({
            "content": [
                {"id": 1, "name": "Ann", "phone": null, "city": null, "address": "Main St 1", "email": null},
            ]
        }))
        .unwrap();

        let ann = &envelope.content[0];
        assert_eq!(ann.name, "Ann");
        assert_eq!(ann.phone, "");
        assert_eq!(ann.address, "Main St 1");
    }

    #[test]
    fn null_fields_in_nested_records() {
        let vaccination: Vaccination = serde_json::from_value(json!({
            "id": 2,
            "name": "Rabies",
            "code": null,
            "protectionStartDate": null,
            "animal": {"id": 4, "name": null, "species": "dog"},
        }))
        .unwrap();

        assert_eq!(vaccination.code, "");
        assert_eq!(vaccination.protection_start_date, None);
        assert_eq!(vaccination.animal.map(|a| a.name), Some(String::new()));

        let report: Report = serde_json::from_value(json!({
            "id": 1, "title": null, "diagnosis": "Healthy", "price": null, "appointment": null,
        }))
        .unwrap();

        assert_eq!(report.title, "");
        assert_eq!(report.price, 0.0);
        assert_eq!(report.appointment, None);
    }

    #[test]
    fn envelope_without_content_is_empty() {
        let envelope: Envelope<Doctor> = serde_json::from_value(json!({})).unwrap();

        assert!(envelope.content.is_empty());
    }

    #[test]
    fn report_appointment_accepts_flat_projection() {
        let report: Report = serde_json::from_value(json!({
            "id": 1,
            "appointment": {
                "id": 3,
                "date": "2024-06-01T14:30:00Z",
                "doctorName": "Dr. A",
                "animalName": "Rex",
                "customerName": "Ali",
            },
        }))
        .unwrap();

        let appointment = report.appointment.unwrap();
        assert_eq!(appointment.id, Id::new(3));
        assert!(appointment.appointment_date.is_some());
        assert_eq!(appointment.doctor_name, "Dr. A");
        assert_eq!(appointment.customer_name, "Ali");
    }

    #[test]
    fn report_appointment_accepts_nested_chain() {
        let report: Report = serde_json::from_value(json!({
            "id": 1,
            "appointment": {
                "id": 3,
                "appointmentDate": "2024-06-01T14:30:00Z",
                "doctor": {"id": 1, "name": "Dr. A"},
                "animal": {"id": 4, "name": "Rex", "customer": {"id": 2, "name": "Ali"}},
            },
        }))
        .unwrap();

        let appointment = report.appointment.unwrap();
        assert!(appointment.appointment_date.is_some());
        assert_eq!(appointment.doctor.map(|d| d.name), Some("Dr. A".to_owned()));
    }
}
