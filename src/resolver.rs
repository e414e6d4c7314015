//! Зависимый выбор даты приёма.
//!
//! Выбор врача определяет, какие даты можно выбрать: это его рабочие дни.
//! Выбор даты открывает ввод времени.

use chrono::NaiveDate;
use log::debug;

use crate::{
    adapter::AppointmentDraft,
    api::{self, Resource, WorkDaySearch},
    model::{Id, WorkDay},
};

pub struct DateOptions<R: Resource<WorkDay>> {
    resource: R,
    doctor: Option<Id>,
    work_days: Vec<WorkDay>,
}

impl<R: Resource<WorkDay>> DateOptions<R> {
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            doctor: None,
            work_days: Vec::new(),
        }
    }

    pub fn doctor(&self) -> Option<Id> {
        self.doctor
    }

    /// Рабочие дни выбранного врача.
    pub fn work_days(&self) -> &[WorkDay] {
        &self.work_days
    }

    /// Даты, которые можно предложить для приёма.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.work_days.iter().filter_map(|d| d.work_day).collect()
    }

    pub fn offers(&self, date: NaiveDate) -> bool {
        self.work_days.iter().any(|d| d.work_day == Some(date))
    }

    /// Загружает рабочие дни врача. Прежние варианты сбрасываются до запроса,
    /// поэтому при ошибке вариантов нет совсем.
    pub fn load(&mut self, doctor: Option<Id>) -> api::Result<()> {
        self.doctor = doctor;
        self.work_days.clear();

        let Some(id) = doctor else {
            return Ok(());
        };

        let days = self.resource.search(&WorkDaySearch::ByDoctor(id))?;

        // Бэкенд фильтрует сам, но чужие дни в списке оказаться не должны.
        self.work_days = days.into_iter().filter(|d| d.doctor_id() == Some(id)).collect();
        debug!("У врача {} {} рабочих дней", id, self.work_days.len());

        Ok(())
    }

    /// Подгружает варианты для черновика, открытого на редактирование.
    pub fn load_for(&mut self, draft: &AppointmentDraft) -> api::Result<()> {
        self.load(draft.doctor_id)
    }

    /// Меняет врача в черновике. Дата, которой нет среди рабочих дней нового
    /// врача, сбрасывается вместе со временем.
    pub fn select_doctor(&mut self, draft: &mut AppointmentDraft, doctor: Option<Id>) -> api::Result<()> {
        draft.doctor_id = doctor;

        let result = self.load(doctor);

        if draft.date.is_some_and(|d| !self.offers(d)) {
            draft.date = None;
            draft.time = None;
        }

        result
    }

    /// Выбирает дату. Дата должна быть среди предложенных.
    pub fn select_date(&self, draft: &mut AppointmentDraft, date: Option<NaiveDate>) -> bool {
        match date {
            Some(d) if !self.offers(d) => false,
            _ => {
                if date.is_none() {
                    draft.time = None;
                }
                draft.date = date;
                true
            }
        }
    }
}
