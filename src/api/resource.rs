use std::marker::PhantomData;

use log::debug;

use super::{ApiClient, Result, Search};
use crate::model::{Entity, Envelope, Id, Payload};

/// Коллекция сущностей на стороне бэкенда.
pub trait Resource<E: Entity> {
    fn list(&self) -> Result<Vec<E>>;

    fn search(&self, criteria: &E::Search) -> Result<Vec<E>>;

    fn create(&self, payload: &Payload<E>) -> Result<E>;

    fn update(&self, id: Id, payload: &Payload<E>) -> Result<E>;

    fn delete(&self, id: Id) -> Result<()>;
}

impl<E: Entity, R: Resource<E> + ?Sized> Resource<E> for &R {
    fn list(&self) -> Result<Vec<E>> {
        (**self).list()
    }

    fn search(&self, criteria: &E::Search) -> Result<Vec<E>> {
        (**self).search(criteria)
    }

    fn create(&self, payload: &Payload<E>) -> Result<E> {
        (**self).create(payload)
    }

    fn update(&self, id: Id, payload: &Payload<E>) -> Result<E> {
        (**self).update(id, payload)
    }

    fn delete(&self, id: Id) -> Result<()> {
        (**self).delete(id)
    }
}

/// Коллекция, доступная по HTTP под `/<E::RESOURCE>`.
#[derive(Debug, Clone)]
pub struct HttpResource<E> {
    client: ApiClient,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> HttpResource<E> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }
}

/// Путь поиска по коллекции. Пустой подпуть означает саму коллекцию.
fn search_path(resource: &str, criteria: &impl Search) -> String {
    match criteria.path() {
        "" => resource.to_owned(),
        sub => format!("{}/{}", resource, sub),
    }
}

fn item_path(resource: &str, id: Id) -> String {
    format!("{}/{}", resource, id)
}

impl<E: Entity> Resource<E> for HttpResource<E> {
    fn list(&self) -> Result<Vec<E>> {
        let envelope: Envelope<E> = self.client.get(E::RESOURCE, &[])?;

        Ok(envelope.content)
    }

    fn search(&self, criteria: &E::Search) -> Result<Vec<E>> {
        let path = search_path(E::RESOURCE, criteria);

        debug!("Ищем {} по {:?}", E::PLURAL, criteria);
        let envelope: Envelope<E> = self.client.get(&path, &criteria.query())?;

        Ok(envelope.content)
    }

    fn create(&self, payload: &Payload<E>) -> Result<E> {
        self.client.post(E::RESOURCE, payload)
    }

    fn update(&self, id: Id, payload: &Payload<E>) -> Result<E> {
        self.client.put(&item_path(E::RESOURCE, id), payload)
    }

    fn delete(&self, id: Id) -> Result<()> {
        self.client.delete(&item_path(E::RESOURCE, id))
    }
}
