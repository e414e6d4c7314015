mod common;

use chrono::{NaiveDate, NaiveTime};
use common::{Call, FakeResource, Op};
use vet_admin::{
    adapter::AppointmentDraft,
    api::WorkDaySearch,
    model::{Doctor, Id, WorkDay},
    resolver::DateOptions,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn work_day(id: i64, doctor: i64, date: NaiveDate) -> WorkDay {
    WorkDay {
        id: Id::new(id),
        work_day: Some(date),
        doctor: Some(Doctor {
            id: Id::new(doctor),
            name: format!("Dr. {}", doctor),
            ..Doctor::default()
        }),
    }
}

fn schedule() -> Vec<WorkDay> {
    vec![
        work_day(1, 1, day(2024, 7, 10)),
        work_day(2, 2, day(2024, 7, 11)),
        work_day(3, 1, day(2024, 7, 12)),
    ]
}

#[test]
fn doctor_choice_offers_only_their_work_days() {
    // Бэкенд вернул всё подряд, лишние дни отсекаются на клиенте.
    let fake = FakeResource::new(schedule());
    let mut options = DateOptions::new(&fake);
    let mut draft = AppointmentDraft::default();

    assert!(!draft.can_pick_date());

    options.select_doctor(&mut draft, Some(Id::new(1))).unwrap();

    assert_eq!(draft.doctor_id, Some(Id::new(1)));
    assert!(draft.can_pick_date());
    assert_eq!(options.dates(), [day(2024, 7, 10), day(2024, 7, 12)]);
    assert_eq!(fake.calls(), [Call::Search(format!("{:?}", WorkDaySearch::ByDoctor(Id::new(1))))]);
}

#[test]
fn single_work_day_from_wire() {
    let days: Vec<WorkDay> = serde_json::from_value(serde_json::json!([
        {"id": 5, "doctor": {"id": 1, "name": "Dr. A"}, "workDay": "2024-07-10"}
    ]))
    .unwrap();
    let fake = FakeResource::new(days);
    let mut options = DateOptions::new(&fake);
    let mut draft = AppointmentDraft::default();

    options.select_doctor(&mut draft, Some(Id::new(1))).unwrap();

    assert_eq!(options.dates(), [day(2024, 7, 10)]);
    assert_eq!(options.work_days()[0].doctor_name(), "Dr. A");
}

#[test]
fn date_outside_work_days_is_refused() {
    let fake = FakeResource::new(schedule());
    let mut options = DateOptions::new(&fake);
    let mut draft = AppointmentDraft::default();
    options.select_doctor(&mut draft, Some(Id::new(1))).unwrap();

    assert!(!options.select_date(&mut draft, Some(day(2024, 7, 11))));
    assert_eq!(draft.date, None);
    assert!(!draft.can_pick_time());

    assert!(options.select_date(&mut draft, Some(day(2024, 7, 10))));
    assert_eq!(draft.date, Some(day(2024, 7, 10)));
    assert!(draft.can_pick_time());
}

#[test]
fn changing_doctor_drops_foreign_date_and_time() {
    let fake = FakeResource::new(schedule());
    let mut options = DateOptions::new(&fake);
    let mut draft = AppointmentDraft::default();

    options.select_doctor(&mut draft, Some(Id::new(1))).unwrap();
    options.select_date(&mut draft, Some(day(2024, 7, 10)));
    draft.time = NaiveTime::from_hms_opt(10, 0, 0);

    options.select_doctor(&mut draft, Some(Id::new(2))).unwrap();

    assert_eq!(options.dates(), [day(2024, 7, 11)]);
    assert_eq!(draft.date, None);
    assert_eq!(draft.time, None);
    assert!(!draft.can_pick_time());
}

#[test]
fn clearing_date_clears_time() {
    let fake = FakeResource::new(schedule());
    let mut options = DateOptions::new(&fake);
    let mut draft = AppointmentDraft::default();

    options.select_doctor(&mut draft, Some(Id::new(1))).unwrap();
    options.select_date(&mut draft, Some(day(2024, 7, 12)));
    draft.time = NaiveTime::from_hms_opt(16, 45, 0);

    assert!(options.select_date(&mut draft, None));

    assert_eq!(draft.date, None);
    assert_eq!(draft.time, None);
}

#[test]
fn no_doctor_means_no_options_and_no_request() {
    let fake = FakeResource::new(schedule());
    let mut options = DateOptions::new(&fake);
    let mut draft = AppointmentDraft::default();

    options.select_doctor(&mut draft, Some(Id::new(1))).unwrap();
    fake.forget_calls();

    options.select_doctor(&mut draft, None).unwrap();

    assert!(options.dates().is_empty());
    assert!(!draft.can_pick_date());
    assert!(fake.calls().is_empty());
}

#[test]
fn failed_load_leaves_no_options() {
    let fake = FakeResource::new(schedule());
    let mut options = DateOptions::new(&fake);
    let mut draft = AppointmentDraft::default();

    options.select_doctor(&mut draft, Some(Id::new(1))).unwrap();
    options.select_date(&mut draft, Some(day(2024, 7, 10)));

    fake.fail_on(Op::Search);

    assert!(options.select_doctor(&mut draft, Some(Id::new(2))).is_err());
    assert!(options.work_days().is_empty());
    assert_eq!(draft.doctor_id, Some(Id::new(2)));
    assert_eq!(draft.date, None);
}

#[test]
fn editing_loads_options_for_saved_doctor() {
    let fake = FakeResource::new(schedule());
    let mut options = DateOptions::new(&fake);
    let draft = AppointmentDraft {
        id: Some(Id::new(9)),
        date: Some(day(2024, 7, 12)),
        time: NaiveTime::from_hms_opt(11, 30, 0),
        animal_id: Some(Id::new(4)),
        doctor_id: Some(Id::new(1)),
    };

    options.load_for(&draft).unwrap();

    assert_eq!(options.doctor(), Some(Id::new(1)));
    assert!(options.offers(day(2024, 7, 12)));
    assert!(!options.offers(day(2024, 7, 11)));
}
