use chrono::NaiveDate;
use serde::Serialize;

use super::{Draft, ValidationError};
use crate::model::{Animal, Id, Reference, Vaccination};

#[derive(Default, Debug, Clone, PartialEq)]
pub struct AnimalDraft {
    pub id: Option<Id>,
    pub name: String,
    pub breed: String,
    pub colour: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: String,
    pub species: String,
    pub customer_id: Option<Id>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnimalPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub name: String,
    pub breed: String,
    pub colour: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: String,
    pub species: String,
    pub customer: Reference,
}

impl Draft for AnimalDraft {
    type Entity = Animal;
    type Payload = AnimalPayload;

    fn from_entity(entity: &Animal) -> Self {
        Self {
            id: Some(entity.id),
            name: entity.name.clone(),
            breed: entity.breed.clone(),
            colour: entity.colour.clone(),
            date_of_birth: entity.date_of_birth,
            gender: entity.gender.clone(),
            species: entity.species.clone(),
            customer_id: entity.customer.as_ref().map(|c| c.id),
        }
    }

    fn id(&self) -> Option<Id> {
        self.id
    }

    fn to_payload(&self) -> Result<AnimalPayload, ValidationError> {
        let customer = self.customer_id.ok_or(ValidationError::Missing("a customer"))?;

        Ok(AnimalPayload {
            id: self.id,
            name: self.name.trim().to_owned(),
            breed: self.breed.trim().to_owned(),
            colour: self.colour.trim().to_owned(),
            date_of_birth: self.date_of_birth,
            gender: self.gender.trim().to_owned(),
            species: self.species.trim().to_owned(),
            customer: Reference::new(customer),
        })
    }
}

impl Animal {
    /// Имя владельца или пустая строка, если владелец не указан.
    pub fn customer_name(&self) -> &str {
        self.customer.as_ref().map_or("", |c| c.name.as_str())
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct VaccinationDraft {
    pub id: Option<Id>,
    pub name: String,
    pub code: String,
    pub protection_start_date: Option<NaiveDate>,
    pub protection_finish_date: Option<NaiveDate>,

    /// Привитое животное вместе с его именем для отображения в форме.
    pub animal: Option<Reference>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub name: String,
    pub code: String,
    pub protection_start_date: Option<NaiveDate>,
    pub protection_finish_date: Option<NaiveDate>,
    pub animal: Reference,
}

impl Draft for VaccinationDraft {
    type Entity = Vaccination;
    type Payload = VaccinationPayload;

    fn from_entity(entity: &Vaccination) -> Self {
        Self {
            id: Some(entity.id),
            name: entity.name.clone(),
            code: entity.code.clone(),
            protection_start_date: entity.protection_start_date,
            protection_finish_date: entity.protection_finish_date,
            animal: entity.animal.as_ref().map(|a| Reference {
                id: a.id,
                name: Some(a.name.clone()),
            }),
        }
    }

    fn id(&self) -> Option<Id> {
        self.id
    }

    fn to_payload(&self) -> Result<VaccinationPayload, ValidationError> {
        let animal = self.animal.clone().ok_or(ValidationError::Missing("an animal"))?;

        Ok(VaccinationPayload {
            id: self.id,
            name: self.name.trim().to_owned(),
            code: self.code.trim().to_owned(),
            protection_start_date: self.protection_start_date,
            protection_finish_date: self.protection_finish_date,
            animal,
        })
    }
}

impl Vaccination {
    pub fn animal_name(&self) -> &str {
        self.animal.as_ref().map_or("", |a| a.name.as_str())
    }
}
