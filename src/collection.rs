//! Локальное состояние одной коллекции.
//!
//! Коллекция держит последний полученный с бэкенда список и после каждой
//! мутации перезапрашивает его. Перезапросы между собой не упорядочиваются:
//! побеждает тот, что завершился последним.

use log::{debug, info, warn};

use crate::{
    api::{self, Resource},
    model::{Entity, Id, Payload},
};

/// Действие над записью коллекции.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Action {
    #[display(fmt = "create")]
    Create,
    #[display(fmt = "update")]
    Update,
    #[display(fmt = "delete")]
    Delete,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Бэкенд не принял изменение, локальное состояние не тронуто.
    #[error("{action} request failed")]
    Mutation {
        action: Action,
        #[source]
        source: api::Error,
    },

    /// Изменение применено, но свежий список получить не удалось.
    #[error("{action} applied, refetch failed")]
    Refresh {
        action: Action,
        #[source]
        source: api::Error,
    },
}

pub struct Collection<E: Entity, R: Resource<E>> {
    resource: R,
    items: Vec<E>,
    loading: bool,
    filter: Option<E::Search>,
}

impl<E: Entity, R: Resource<E>> Collection<E, R> {
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            items: Vec::new(),
            loading: false,
            filter: None,
        }
    }

    /// Коллекция, которая с первого запроса ищет по критерию.
    pub fn with_filter(mut self, criteria: E::Search) -> Self {
        self.filter = Some(criteria);
        self
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn get(&self, id: Id) -> Option<&E> {
        self.items.iter().find(|e| e.id() == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Активный фильтр поиска.
    pub fn filter(&self) -> Option<&E::Search> {
        self.filter.as_ref()
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// Перезапрашивает список с учётом активного фильтра. При ошибке прежний
    /// список остаётся на месте.
    pub fn refresh(&mut self) -> api::Result<()> {
        self.loading = true;

        let result = match &self.filter {
            Some(criteria) => self.resource.search(criteria),
            None => self.resource.list(),
        };

        self.loading = false;

        match result {
            Ok(items) => {
                debug!("Получили {} записей из {}", items.len(), E::PLURAL);
                self.items = items;
                Ok(())
            }
            Err(e) => {
                warn!("Не удалось получить {}: {}", E::PLURAL, e);
                Err(e)
            }
        }
    }

    pub fn search(&mut self, criteria: E::Search) -> api::Result<()> {
        self.filter = Some(criteria);
        self.refresh()
    }

    pub fn clear_search(&mut self) -> api::Result<()> {
        self.filter = None;
        self.refresh()
    }

    /// Добавляет созданную запись в конец списка и сразу сверяется с бэкендом.
    pub fn apply_create(&mut self, entity: E) -> api::Result<()> {
        self.items.push(entity);
        self.refresh()
    }

    /// Заменяет запись с тем же идентификатором. Возвращает false, если такой
    /// записи нет.
    pub fn apply_update(&mut self, entity: E) -> bool {
        match self.items.iter_mut().find(|e| e.id() == entity.id()) {
            Some(slot) => {
                *slot = entity;
                true
            }
            None => false,
        }
    }

    pub fn apply_delete(&mut self, id: Id) -> bool {
        let before = self.items.len();
        self.items.retain(|e| e.id() != id);
        self.items.len() != before
    }

    /// Создаёт запись на бэкенде и сверяет список.
    pub fn create(&mut self, payload: &Payload<E>) -> Result<E, Error> {
        let entity = self.resource.create(payload).map_err(|source| Error::Mutation {
            action: Action::Create,
            source,
        })?;

        info!("Добавлена запись {} в {}", entity.id(), E::PLURAL);

        self.apply_create(entity.clone()).map_err(|source| Error::Refresh {
            action: Action::Create,
            source,
        })?;

        Ok(entity)
    }

    /// Обновляет запись на бэкенде и сверяет список.
    pub fn update(&mut self, id: Id, payload: &Payload<E>) -> Result<E, Error> {
        let entity = self.resource.update(id, payload).map_err(|source| Error::Mutation {
            action: Action::Update,
            source,
        })?;

        info!("Обновлена запись {} в {}", id, E::PLURAL);

        if !self.apply_update(entity.clone()) {
            warn!("Обновлённой записи {} нет в локальном списке {}", id, E::PLURAL);
        }

        self.refresh().map_err(|source| Error::Refresh {
            action: Action::Update,
            source,
        })?;

        Ok(entity)
    }

    /// Удаляет запись на бэкенде и сверяет список.
    pub fn delete(&mut self, id: Id) -> Result<(), Error> {
        self.resource.delete(id).map_err(|source| Error::Mutation {
            action: Action::Delete,
            source,
        })?;

        info!("Удалена запись {} из {}", id, E::PLURAL);
        self.apply_delete(id);

        self.refresh().map_err(|source| Error::Refresh {
            action: Action::Delete,
            source,
        })
    }
}
