use serde::Serialize;

use super::{Draft, ValidationError};
use crate::model::{Customer, Doctor, Id};

#[derive(Default, Debug, Clone, PartialEq)]
pub struct CustomerDraft {
    pub id: Option<Id>,
    pub name: String,
    pub phone: String,
    pub city: String,
    pub address: String,
    pub email: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub name: String,
    pub phone: String,
    pub city: String,
    pub address: String,
    pub email: String,
}

impl Draft for CustomerDraft {
    type Entity = Customer;
    type Payload = CustomerPayload;

    fn from_entity(entity: &Customer) -> Self {
        Self {
            id: Some(entity.id),
            name: entity.name.clone(),
            phone: entity.phone.clone(),
            city: entity.city.clone(),
            address: entity.address.clone(),
            email: entity.email.clone(),
        }
    }

    fn id(&self) -> Option<Id> {
        self.id
    }

    fn to_payload(&self) -> Result<CustomerPayload, ValidationError> {
        Ok(CustomerPayload {
            id: self.id,
            name: self.name.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            city: self.city.trim().to_owned(),
            address: self.address.trim().to_owned(),
            email: self.email.trim().to_owned(),
        })
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct DoctorDraft {
    pub id: Option<Id>,
    pub name: String,
    pub phone: String,
    pub city: String,
    pub address: String,
    pub email: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DoctorPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub name: String,
    pub phone: String,
    pub city: String,
    pub address: String,
    pub email: String,
}

impl Draft for DoctorDraft {
    type Entity = Doctor;
    type Payload = DoctorPayload;

    fn from_entity(entity: &Doctor) -> Self {
        Self {
            id: Some(entity.id),
            name: entity.name.clone(),
            phone: entity.phone.clone(),
            city: entity.city.clone(),
            address: entity.address.clone(),
            email: entity.email.clone(),
        }
    }

    fn id(&self) -> Option<Id> {
        self.id
    }

    fn to_payload(&self) -> Result<DoctorPayload, ValidationError> {
        Ok(DoctorPayload {
            id: self.id,
            name: self.name.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            city: self.city.trim().to_owned(),
            address: self.address.trim().to_owned(),
            email: self.email.trim().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn create_payload_has_no_id() {
        let draft = CustomerDraft {
            name: " Ayşe ".to_owned(),
            email: "ayse@example.com".to_owned(),
            ..CustomerDraft::default()
        };

        let payload = serde_json::to_value(draft.to_payload().unwrap()).unwrap();

        assert_eq!(
            payload,
            json!({
                "name": "Ayşe",
                "phone": "",
                "city": "",
                "address": "",
                "email": "ayse@example.com",
            })
        );
    }

    #[test]
    fn edit_keeps_id_in_payload() {
        let doctor = Doctor {
            id: Id::new(7),
            name: "Dr. A".to_owned(),
            ..Doctor::default()
        };

        let draft = DoctorDraft::from_entity(&doctor);
        assert_eq!(draft.id(), Some(Id::new(7)));

        let payload = serde_json::to_value(draft.to_payload().unwrap()).unwrap();
        assert_eq!(payload["id"], json!(7));
        assert_eq!(payload["name"], json!("Dr. A"));
    }
}
