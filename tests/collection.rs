mod common;

use common::{Call, FakeResource, Op};
use vet_admin::{
    adapter::{CustomerDraft, Draft},
    api::CustomerSearch,
    collection::{Action, Collection, Error},
    model::{Customer, Id},
};

fn customer(id: i64, name: &str) -> Customer {
    Customer {
        id: Id::new(id),
        name: name.to_owned(),
        city: "Springfield".to_owned(),
        ..Customer::default()
    }
}

fn names(items: &[Customer]) -> Vec<&str> {
    items.iter().map(|c| c.name.as_str()).collect()
}

fn payload(name: &str) -> vet_admin::adapter::CustomerPayload {
    CustomerDraft {
        name: name.to_owned(),
        ..CustomerDraft::default()
    }
    .to_payload()
    .unwrap()
}

#[test]
fn refresh_replaces_items() {
    let fake = FakeResource::new(vec![customer(1, "Ann"), customer(2, "Bob")]);
    let mut collection: Collection<Customer, _> = Collection::new(&fake);

    assert!(collection.items().is_empty());

    collection.refresh().unwrap();

    assert_eq!(names(collection.items()), ["Ann", "Bob"]);
    assert!(!collection.is_loading());
    assert_eq!(fake.calls(), [Call::List]);
}

#[test]
fn failed_refresh_keeps_previous_items() {
    let fake = FakeResource::new(vec![customer(1, "Ann")]);
    let mut collection: Collection<Customer, _> = Collection::new(&fake);
    collection.refresh().unwrap();

    fake.fail_on(Op::List);

    assert!(collection.refresh().is_err());
    assert_eq!(names(collection.items()), ["Ann"]);
    assert!(!collection.is_loading());
}

#[test]
fn create_appends_then_refetches() {
    let fake = FakeResource::new(vec![customer(1, "Ann")]);
    let mut collection: Collection<Customer, _> = Collection::new(&fake);
    collection.refresh().unwrap();
    fake.forget_calls();

    let created = collection.create(&payload("Cid")).unwrap();

    assert_eq!(created.id, Id::new(2));
    assert_eq!(names(collection.items()), ["Ann", "Cid"]);
    assert_eq!(fake.calls(), [Call::Create, Call::List]);
}

#[test]
fn update_replaces_in_place() {
    let fake = FakeResource::new(vec![customer(1, "Ann"), customer(2, "Bob")]);
    let mut collection: Collection<Customer, _> = Collection::new(&fake);
    collection.refresh().unwrap();
    fake.forget_calls();

    collection.update(Id::new(2), &payload("Robert")).unwrap();

    assert_eq!(names(collection.items()), ["Ann", "Robert"]);
    assert_eq!(fake.calls(), [Call::Update(Id::new(2)), Call::List]);
}

#[test]
fn delete_removes_then_refetches() {
    let fake = FakeResource::new(vec![customer(1, "Ann"), customer(2, "Bob")]);
    let mut collection: Collection<Customer, _> = Collection::new(&fake);
    collection.refresh().unwrap();
    fake.forget_calls();

    collection.delete(Id::new(1)).unwrap();

    assert_eq!(names(collection.items()), ["Bob"]);
    assert_eq!(fake.calls(), [Call::Delete(Id::new(1)), Call::List]);
}

#[test]
fn rejected_mutation_leaves_items_untouched() {
    let fake = FakeResource::new(vec![customer(1, "Ann")]);
    let mut collection: Collection<Customer, _> = Collection::new(&fake);
    collection.refresh().unwrap();
    fake.forget_calls();

    fake.fail_on(Op::Delete);

    let err = collection.delete(Id::new(1)).unwrap_err();

    assert!(matches!(err, Error::Mutation { action: Action::Delete, .. }));
    assert_eq!(names(collection.items()), ["Ann"]);
    // Без успешной мутации перезапроса нет.
    assert_eq!(fake.calls(), [Call::Delete(Id::new(1))]);
}

#[test]
fn applied_mutation_with_failed_refetch() {
    let fake = FakeResource::new(vec![customer(1, "Ann")]);
    let mut collection: Collection<Customer, _> = Collection::new(&fake);
    collection.refresh().unwrap();

    fake.fail_on(Op::List);

    let err = collection.create(&payload("Cid")).unwrap_err();

    assert!(matches!(err, Error::Refresh { action: Action::Create, .. }));
    assert_eq!(names(&fake.stored()), ["Ann", "Cid"]);
    // Локально запись уже добавлена.
    assert_eq!(names(collection.items()), ["Ann", "Cid"]);
}

#[test]
fn apply_helpers_report_misses() {
    let fake = FakeResource::<Customer>::new(Vec::new());
    let mut collection: Collection<Customer, _> = Collection::new(&fake);

    assert!(!collection.apply_update(customer(7, "Ghost")));
    assert!(!collection.apply_delete(Id::new(7)));
}

#[test]
fn search_then_show_all() {
    let fake = FakeResource::new(vec![customer(1, "Ann"), customer(2, "Bob")]).with_matcher(
        |c: &Customer, criteria: &CustomerSearch| match criteria {
            CustomerSearch::ByName(name) => c.name.contains(name.as_str()),
        },
    );
    let mut collection: Collection<Customer, _> = Collection::new(&fake);
    collection.refresh().unwrap();

    collection.search(CustomerSearch::ByName("Bo".to_owned())).unwrap();

    assert_eq!(names(collection.items()), ["Bob"]);
    assert!(collection.filter().is_some());

    // Перезапрос после мутации учитывает фильтр.
    collection.create(&payload("Bonnie")).unwrap();
    assert_eq!(names(collection.items()), ["Bob", "Bonnie"]);

    collection.clear_search().unwrap();

    assert_eq!(names(collection.items()), ["Ann", "Bob", "Bonnie"]);
    assert!(collection.filter().is_none());
}
