//! Форма создания и редактирования записи.

use log::debug;

use crate::{
    adapter::{Draft, ValidationError},
    api::Resource,
    collection::{self, Action, Collection},
    model::{Entity, Id},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Closed,
    Creating,
    Editing(Id),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("form is not open")]
    Closed,

    #[error("form is already open")]
    AlreadyOpen,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Sync(#[from] collection::Error),
}

/// Состояние формы и черновик внутри неё.
#[derive(Debug, Clone)]
pub struct Form<E: Entity> {
    mode: Mode,
    draft: E::Draft,
}

impl<E: Entity> Default for Form<E> {
    fn default() -> Self {
        Self {
            mode: Mode::Closed,
            draft: E::Draft::default(),
        }
    }
}

impl<E: Entity> Form<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != Mode::Closed
    }

    pub fn draft(&self) -> &E::Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut E::Draft {
        &mut self.draft
    }

    pub fn open_for_create(&mut self) -> Result<(), Error> {
        if self.is_open() {
            return Err(Error::AlreadyOpen);
        }

        self.draft = E::Draft::default();
        self.mode = Mode::Creating;

        Ok(())
    }

    pub fn open_for_edit(&mut self, entity: &E) -> Result<(), Error> {
        if self.is_open() {
            return Err(Error::AlreadyOpen);
        }

        self.draft = E::Draft::from_entity(entity);
        self.mode = Mode::Editing(entity.id());

        Ok(())
    }

    pub fn close(&mut self) {
        self.draft = E::Draft::default();
        self.mode = Mode::Closed;
    }

    /// Отправляет черновик. Без идентификатора запись создаётся, с ним -
    /// обновляется.
    ///
    /// Если не заполнены обязательные поля или бэкенд отклонил запрос, форма
    /// остаётся открытой вместе с черновиком. Если изменение прошло, форма
    /// закрывается, даже когда не удалось перезапросить список.
    pub fn submit<R: Resource<E>>(&mut self, collection: &mut Collection<E, R>) -> Result<Action, Error> {
        if !self.is_open() {
            return Err(Error::Closed);
        }

        let payload = self.draft.to_payload()?;

        let (action, result) = match self.draft.id() {
            Some(id) => {
                debug!("Обновляем {} {}", E::NAME, id);
                (Action::Update, collection.update(id, &payload).map(|_| ()))
            }
            None => {
                debug!("Создаём {}", E::NAME);
                (Action::Create, collection.create(&payload).map(|_| ()))
            }
        };

        match result {
            Ok(()) => {
                self.close();
                Ok(action)
            }
            Err(e @ collection::Error::Refresh { .. }) => {
                self.close();
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }
}
