//! Перевод сущностей бэкенда в редактируемые черновики и обратно.

mod animals;
mod contacts;
pub mod datetime;
mod visits;

use std::fmt::Debug;

use serde::Serialize;

use crate::model::{Entity, Id};

pub use animals::{AnimalDraft, AnimalPayload, VaccinationDraft, VaccinationPayload};
pub use contacts::{CustomerDraft, CustomerPayload, DoctorDraft, DoctorPayload};
pub use datetime::{DATE_FORMAT, TIME_FORMAT};
pub use visits::{AppointmentDraft, AppointmentPayload, ReportDraft, ReportPayload, WorkDayDraft, WorkDayPayload};

/// Черновик записи внутри формы создания или редактирования.
///
/// Черновик без идентификатора означает создание, с идентификатором -
/// обновление существующей записи.
pub trait Draft: Default + Clone + Debug + PartialEq {
    type Entity: Entity;

    /// Тело запроса на создание или обновление.
    type Payload: Serialize + Debug;

    /// Заполняет черновик из записи, которую пользователь выбрал для правки.
    fn from_entity(entity: &Self::Entity) -> Self;

    fn id(&self) -> Option<Id>;

    /// Собирает тело запроса. Здесь же проверяется наличие обязательных полей.
    fn to_payload(&self) -> Result<Self::Payload, ValidationError>;

    fn validate(&self) -> Result<(), ValidationError> {
        self.to_payload().map(|_| ())
    }
}

/// В черновике не заполнено обязательное поле.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select {0}.")]
    Missing(&'static str),
}
