use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use super::{datetime, Draft, ValidationError};
use crate::model::{Appointment, Id, Reference, Report, ReportAppointment, WorkDay};

#[derive(Default, Debug, Clone, PartialEq)]
pub struct WorkDayDraft {
    pub id: Option<Id>,
    pub doctor_id: Option<Id>,
    pub work_date: Option<NaiveDate>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkDayPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub work_day: NaiveDate,
    pub doctor: Reference,
}

impl Draft for WorkDayDraft {
    type Entity = WorkDay;
    type Payload = WorkDayPayload;

    fn from_entity(entity: &WorkDay) -> Self {
        Self {
            id: Some(entity.id),
            doctor_id: entity.doctor_id(),
            work_date: entity.work_day,
        }
    }

    fn id(&self) -> Option<Id> {
        self.id
    }

    fn to_payload(&self) -> Result<WorkDayPayload, ValidationError> {
        let doctor = self.doctor_id.ok_or(ValidationError::Missing("a doctor"))?;
        let work_day = self.work_date.ok_or(ValidationError::Missing("a work date"))?;

        Ok(WorkDayPayload {
            id: self.id,
            work_day,
            doctor: Reference::new(doctor),
        })
    }
}

impl WorkDay {
    pub fn doctor_id(&self) -> Option<Id> {
        self.doctor.as_ref().map(|d| d.id)
    }

    pub fn doctor_name(&self) -> &str {
        self.doctor.as_ref().map_or("", |d| d.name.as_str())
    }
}

/// Черновик приёма. Момент приёма в форме разбит на дату и время.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct AppointmentDraft {
    pub id: Option<Id>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub animal_id: Option<Id>,
    pub doctor_id: Option<Id>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub appointment_date: DateTime<Utc>,
    pub doctor: Reference,
    pub animal: Reference,
}

impl AppointmentDraft {
    /// Дату можно выбрать только после выбора врача.
    pub fn can_pick_date(&self) -> bool {
        self.doctor_id.is_some()
    }

    /// Время можно ввести только после выбора даты.
    pub fn can_pick_time(&self) -> bool {
        self.date.is_some()
    }
}

impl Draft for AppointmentDraft {
    type Entity = Appointment;
    type Payload = AppointmentPayload;

    fn from_entity(entity: &Appointment) -> Self {
        let (date, time) = entity.schedule().unzip();

        Self {
            id: Some(entity.id),
            date,
            time,
            animal_id: entity.animal.as_ref().map(|a| a.id),
            doctor_id: entity.doctor.as_ref().map(|d| d.id),
        }
    }

    fn id(&self) -> Option<Id> {
        self.id
    }

    fn to_payload(&self) -> Result<AppointmentPayload, ValidationError> {
        let (Some(date), Some(time)) = (self.date, self.time) else {
            return Err(ValidationError::Missing("a date and time"));
        };
        let animal = self.animal_id.ok_or(ValidationError::Missing("an animal"))?;
        let doctor = self.doctor_id.ok_or(ValidationError::Missing("a doctor"))?;

        Ok(AppointmentPayload {
            id: self.id,
            appointment_date: datetime::join_instant(date, time),
            doctor: Reference::new(doctor),
            animal: Reference::new(animal),
        })
    }
}

impl Appointment {
    /// Дата и время приёма по UTC.
    pub fn schedule(&self) -> Option<(NaiveDate, NaiveTime)> {
        self.appointment_date.map(datetime::split_instant)
    }

    pub fn animal_name(&self) -> &str {
        self.animal.as_ref().map_or("", |a| a.name.as_str())
    }

    /// Имя владельца животного, которое записано на приём.
    pub fn customer_name(&self) -> &str {
        self.animal.as_ref().map_or("", |a| a.customer_name())
    }

    pub fn doctor_name(&self) -> &str {
        self.doctor.as_ref().map_or("", |d| d.name.as_str())
    }
}

impl ReportAppointment {
    pub fn schedule(&self) -> Option<(NaiveDate, NaiveTime)> {
        self.appointment_date.map(datetime::split_instant)
    }

    /// Имя врача из проекции, а если его там нет, то из вложенной записи.
    pub fn doctor_label(&self) -> &str {
        filled_or(&self.doctor_name, self.doctor.as_ref().map(|d| d.name.as_str()))
    }

    pub fn animal_label(&self) -> &str {
        filled_or(&self.animal_name, self.animal.as_ref().map(|a| a.name.as_str()))
    }

    pub fn customer_label(&self) -> &str {
        filled_or(&self.customer_name, self.animal.as_ref().map(|a| a.customer_name()))
    }
}

fn filled_or<'a>(flat: &'a str, nested: Option<&'a str>) -> &'a str {
    if flat.is_empty() {
        nested.unwrap_or_default()
    } else {
        flat
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct ReportDraft {
    pub id: Option<Id>,
    pub title: String,
    pub diagnosis: String,
    pub price: f64,
    pub appointment_id: Option<Id>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub title: String,
    pub diagnosis: String,
    pub price: f64,
    pub appointment_id: Id,
}

impl Draft for ReportDraft {
    type Entity = Report;
    type Payload = ReportPayload;

    fn from_entity(entity: &Report) -> Self {
        Self {
            id: Some(entity.id),
            title: entity.title.clone(),
            diagnosis: entity.diagnosis.clone(),
            price: entity.price,
            appointment_id: entity.appointment.as_ref().map(|a| a.id),
        }
    }

    fn id(&self) -> Option<Id> {
        self.id
    }

    fn to_payload(&self) -> Result<ReportPayload, ValidationError> {
        let appointment_id = self.appointment_id.ok_or(ValidationError::Missing("an appointment"))?;

        Ok(ReportPayload {
            id: self.id,
            title: self.title.trim().to_owned(),
            diagnosis: self.diagnosis.trim().to_owned(),
            price: self.price,
            appointment_id,
        })
    }
}
