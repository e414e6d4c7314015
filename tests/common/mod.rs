#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use reqwest::StatusCode;
use vet_admin::{
    api::{self, Resource},
    model::{Entity, Id, Payload},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Search(String),
    Create,
    Update(Id),
    Delete(Id),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    List,
    Search,
    Create,
    Update,
    Delete,
}

type Matcher<E> = Box<dyn Fn(&E, &<E as Entity>::Search) -> bool>;

/// Коллекция в памяти вместо бэкенда. Записывает все обращения.
pub struct FakeResource<E: Entity> {
    store: RefCell<Vec<E>>,
    calls: RefCell<Vec<Call>>,
    failing: Cell<Option<Op>>,
    next_id: Cell<i64>,
    matcher: Option<Matcher<E>>,
}

impl<E: Entity> FakeResource<E> {
    pub fn new(items: Vec<E>) -> Self {
        let next_id = items.iter().map(|e| -> i64 { e.id().into() }).max().unwrap_or(0) + 1;

        Self {
            store: RefCell::new(items),
            calls: RefCell::new(Vec::new()),
            failing: Cell::new(None),
            next_id: Cell::new(next_id),
            matcher: None,
        }
    }

    /// Поиск по предикату. Без него поиск отдаёт всю коллекцию.
    pub fn with_matcher(mut self, matcher: impl Fn(&E, &E::Search) -> bool + 'static) -> Self {
        self.matcher = Some(Box::new(matcher));
        self
    }

    pub fn fail_on(&self, op: Op) {
        self.failing.set(Some(op));
    }

    pub fn heal(&self) {
        self.failing.set(None);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn forget_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn stored(&self) -> Vec<E> {
        self.store.borrow().clone()
    }

    fn enter(&self, call: Call, op: Op) -> api::Result<()> {
        self.calls.borrow_mut().push(call);

        if self.failing.get() == Some(op) {
            return Err(api::Error::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: Some("backend is down".to_owned()),
            });
        }

        Ok(())
    }

    /// Как бэкенд: сущность собирается из тела запроса и идентификатора.
    fn echo(payload: &Payload<E>, id: Id) -> api::Result<E> {
        let mut value = serde_json::to_value(payload)?;
        value["id"] = serde_json::json!(id);

        Ok(serde_json::from_value(value)?)
    }
}

impl<E: Entity> Resource<E> for FakeResource<E> {
    fn list(&self) -> api::Result<Vec<E>> {
        self.enter(Call::List, Op::List)?;

        Ok(self.stored())
    }

    fn search(&self, criteria: &E::Search) -> api::Result<Vec<E>> {
        self.enter(Call::Search(format!("{:?}", criteria)), Op::Search)?;

        let items = self.stored();
        Ok(match &self.matcher {
            Some(matches) => items.into_iter().filter(|e| matches(e, criteria)).collect(),
            None => items,
        })
    }

    fn create(&self, payload: &Payload<E>) -> api::Result<E> {
        self.enter(Call::Create, Op::Create)?;

        let id = Id::new(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);

        let entity = Self::echo(payload, id)?;
        self.store.borrow_mut().push(entity.clone());

        Ok(entity)
    }

    fn update(&self, id: Id, payload: &Payload<E>) -> api::Result<E> {
        self.enter(Call::Update(id), Op::Update)?;

        let entity = Self::echo(payload, id)?;

        let mut store = self.store.borrow_mut();
        let Some(slot) = store.iter_mut().find(|e| e.id() == id) else {
            return Err(api::Error::from_response(
                StatusCode::NOT_FOUND,
                r#"{"message":"not found"}"#,
            ));
        };
        *slot = entity.clone();

        Ok(entity)
    }

    fn delete(&self, id: Id) -> api::Result<()> {
        self.enter(Call::Delete(id), Op::Delete)?;

        self.store.borrow_mut().retain(|e| e.id() != id);

        Ok(())
    }
}
