//! Поля форм и поиск для каждого экрана.

use log::debug;

use super::{
    notify,
    prompt::{self, Pick},
    screen::{self, Editor},
};
use crate::{
    adapter::{
        AnimalDraft, AppointmentDraft, CustomerDraft, DoctorDraft, ReportDraft, VaccinationDraft,
        WorkDayDraft,
    },
    api::{
        ApiClient, AppointmentSearch, CustomerSearch, DateRange, HttpResource, Resource,
        VaccinationSearch, WorkDaySearch,
    },
    collection::Collection,
    display::Row,
    model::{Animal, Appointment, Customer, Doctor, Entity, Id, Reference, Report, Vaccination, WorkDay},
    notice::Notice,
    resolver::DateOptions,
};

/// Справочник для выбора связанной записи.
type Lookup<E> = Collection<E, HttpResource<E>>;

fn lookup<E: Row>(client: &ApiClient) -> Lookup<E> {
    Collection::new(HttpResource::new(client.clone()))
}

/// Перезапрашивает справочник. При ошибке выбирать придётся из прежнего
/// списка.
fn reload<E: Row, R: Resource<E>>(lookup: &mut Collection<E, R>) {
    if lookup.refresh().is_err() {
        notify(&Notice::fetch_failed(E::PLURAL));
    }
}

/// Запрашивает текстовые поля по очереди.
fn edit_texts(fields: &mut [(&str, &mut String)]) -> anyhow::Result<bool> {
    for (title, value) in fields.iter_mut() {
        let Some(input) = prompt::text(*title, value.as_str())? else {
            return Ok(false);
        };
        **value = input;
    }

    Ok(true)
}

/// Выбор связанной записи. `None` значит, что ввод отменён.
fn pick_reference<E: Row>(title: &str, items: &[E], current: Option<Id>) -> anyhow::Result<Option<Option<Id>>> {
    match prompt::pick(title, items, current)? {
        Pick::Chosen(id) => Ok(Some(Some(id))),
        Pick::Empty => {
            notify(&Notice::error(format!("No {} available.", E::PLURAL)));
            Ok(Some(current))
        }
        Pick::Cancelled => Ok(None),
    }
}

fn pick_range(title: &str) -> anyhow::Result<Option<DateRange>> {
    let Some(start) = prompt::date(&format!("{}: from", title), None)? else {
        return Ok(None);
    };
    let Some(end) = prompt::date(&format!("{}: to", title), Some(start))? else {
        return Ok(None);
    };

    Ok(Some(DateRange::new(start, end)))
}

pub struct CustomerEditor;

impl Editor<Customer> for CustomerEditor {
    fn edit(&mut self, draft: &mut CustomerDraft) -> anyhow::Result<bool> {
        edit_texts(&mut [
            ("Name", &mut draft.name),
            ("Phone", &mut draft.phone),
            ("City", &mut draft.city),
            ("Address", &mut draft.address),
            ("Email", &mut draft.email),
        ])
    }

    fn searchable(&self) -> bool {
        true
    }

    fn search(&mut self) -> anyhow::Result<Option<CustomerSearch>> {
        let name = prompt::text("Customer name", "")?;

        Ok(name.map(CustomerSearch::ByName))
    }
}

pub struct DoctorEditor {
    client: ApiClient,
}

impl DoctorEditor {
    pub fn new(client: &ApiClient) -> Self {
        Self { client: client.clone() }
    }
}

impl Editor<Doctor> for DoctorEditor {
    fn edit(&mut self, draft: &mut DoctorDraft) -> anyhow::Result<bool> {
        edit_texts(&mut [
            ("Name", &mut draft.name),
            ("Phone", &mut draft.phone),
            ("City", &mut draft.city),
            ("Address", &mut draft.address),
            ("Email", &mut draft.email),
        ])
    }

    fn extra(&self) -> Option<&'static str> {
        Some("Work days")
    }

    /// Открывает рабочие дни одного врача.
    fn run_extra(&mut self, doctors: &[Doctor]) -> anyhow::Result<()> {
        let Pick::Chosen(id) = prompt::pick("Whose work days?", doctors, None)? else {
            return Ok(());
        };
        debug!("Открываем рабочие дни врача {}", id);

        let mut days = lookup::<WorkDay>(&self.client).with_filter(WorkDaySearch::ByDoctor(id));
        let mut editor = WorkDayEditor::new(&self.client);
        editor.preset = Some(id);

        screen::run(&mut days, &mut editor)
    }
}

pub struct WorkDayEditor {
    doctors: Lookup<Doctor>,

    /// Врач, который подставляется в новые рабочие дни.
    preset: Option<Id>,
}

impl WorkDayEditor {
    pub fn new(client: &ApiClient) -> Self {
        Self {
            doctors: lookup(client),
            preset: None,
        }
    }
}

impl Editor<WorkDay> for WorkDayEditor {
    fn prepare(&mut self) -> anyhow::Result<()> {
        reload(&mut self.doctors);
        Ok(())
    }

    fn opened(&mut self, draft: &mut WorkDayDraft) {
        if draft.id.is_none() && draft.doctor_id.is_none() {
            draft.doctor_id = self.preset;
        }
    }

    fn edit(&mut self, draft: &mut WorkDayDraft) -> anyhow::Result<bool> {
        let Some(doctor) = pick_reference("Doctor", self.doctors.items(), draft.doctor_id)? else {
            return Ok(false);
        };
        draft.doctor_id = doctor;

        let Some(date) = prompt::date("Work day", draft.work_date)? else {
            return Ok(false);
        };
        draft.work_date = Some(date);

        Ok(true)
    }

    fn searchable(&self) -> bool {
        true
    }

    fn search(&mut self) -> anyhow::Result<Option<WorkDaySearch>> {
        reload(&mut self.doctors);

        let Pick::Chosen(id) = prompt::pick("Doctor", self.doctors.items(), self.preset)? else {
            return Ok(None);
        };

        Ok(Some(WorkDaySearch::ByDoctor(id)))
    }
}

pub struct AnimalEditor {
    customers: Lookup<Customer>,
}

impl AnimalEditor {
    pub fn new(client: &ApiClient) -> Self {
        Self {
            customers: lookup(client),
        }
    }
}

impl Editor<Animal> for AnimalEditor {
    fn prepare(&mut self) -> anyhow::Result<()> {
        reload(&mut self.customers);
        Ok(())
    }

    fn edit(&mut self, draft: &mut AnimalDraft) -> anyhow::Result<bool> {
        let filled = edit_texts(&mut [
            ("Name", &mut draft.name),
            ("Breed", &mut draft.breed),
            ("Colour", &mut draft.colour),
            ("Gender", &mut draft.gender),
            ("Species", &mut draft.species),
        ])?;
        if !filled {
            return Ok(false);
        }

        let Some(born) = prompt::date("Date of birth", draft.date_of_birth)? else {
            return Ok(false);
        };
        draft.date_of_birth = Some(born);

        let Some(customer) = pick_reference("Owner", self.customers.items(), draft.customer_id)? else {
            return Ok(false);
        };
        draft.customer_id = customer;

        Ok(true)
    }
}

/// Форма приёма: врач, затем дата из его рабочих дней, затем время.
pub struct AppointmentEditor {
    doctors: Lookup<Doctor>,
    animals: Lookup<Animal>,
    dates: DateOptions<HttpResource<WorkDay>>,
}

impl AppointmentEditor {
    pub fn new(client: &ApiClient) -> Self {
        Self {
            doctors: lookup(client),
            animals: lookup(client),
            dates: DateOptions::new(HttpResource::new(client.clone())),
        }
    }

    fn pick_doctor(&mut self, draft: &mut AppointmentDraft) -> anyhow::Result<bool> {
        let Some(doctor) = pick_reference("Doctor", self.doctors.items(), draft.doctor_id)? else {
            return Ok(false);
        };

        if doctor != self.dates.doctor() && self.dates.select_doctor(draft, doctor).is_err() {
            notify(&Notice::fetch_failed(WorkDay::PLURAL));
        }

        Ok(true)
    }

    fn pick_date(&mut self, draft: &mut AppointmentDraft) -> anyhow::Result<bool> {
        if !draft.can_pick_date() {
            return Ok(true);
        }

        let offered = self.dates.dates();
        if offered.is_empty() {
            notify(&Notice::error("No work days available for the selected doctor."));
            return Ok(true);
        }

        let Some(date) = prompt::date_of("Date", offered, draft.date)? else {
            return Ok(false);
        };
        self.dates.select_date(draft, Some(date));

        Ok(true)
    }
}

impl Editor<Appointment> for AppointmentEditor {
    fn prepare(&mut self) -> anyhow::Result<()> {
        reload(&mut self.doctors);
        reload(&mut self.animals);
        Ok(())
    }

    fn opened(&mut self, draft: &mut AppointmentDraft) {
        if self.dates.load_for(draft).is_err() {
            notify(&Notice::fetch_failed(WorkDay::PLURAL));
        }
    }

    fn edit(&mut self, draft: &mut AppointmentDraft) -> anyhow::Result<bool> {
        if !self.pick_doctor(draft)? || !self.pick_date(draft)? {
            return Ok(false);
        }

        if draft.can_pick_time() {
            let Some(time) = prompt::time("Time", draft.time)? else {
                return Ok(false);
            };
            draft.time = Some(time);
        }

        let Some(animal) = pick_reference("Animal", self.animals.items(), draft.animal_id)? else {
            return Ok(false);
        };
        draft.animal_id = animal;

        Ok(true)
    }

    fn searchable(&self) -> bool {
        true
    }

    fn search(&mut self) -> anyhow::Result<Option<AppointmentSearch>> {
        let Some(by) = prompt::choose("Search appointments", vec!["By doctor", "By animal"])? else {
            return Ok(None);
        };

        let picked = if by == "By doctor" {
            reload(&mut self.doctors);
            prompt::pick("Doctor", self.doctors.items(), None)?
        } else {
            reload(&mut self.animals);
            prompt::pick("Animal", self.animals.items(), None)?
        };
        let Pick::Chosen(id) = picked else {
            return Ok(None);
        };

        let Some(range) = pick_range("Appointment date")? else {
            return Ok(None);
        };

        Ok(Some(if by == "By doctor" {
            AppointmentSearch::ByDoctor { id, range }
        } else {
            AppointmentSearch::ByAnimal { id, range }
        }))
    }
}

pub struct VaccinationEditor {
    animals: Lookup<Animal>,
}

impl VaccinationEditor {
    pub fn new(client: &ApiClient) -> Self {
        Self {
            animals: lookup(client),
        }
    }
}

impl Editor<Vaccination> for VaccinationEditor {
    fn prepare(&mut self) -> anyhow::Result<()> {
        reload(&mut self.animals);
        Ok(())
    }

    fn edit(&mut self, draft: &mut VaccinationDraft) -> anyhow::Result<bool> {
        if !edit_texts(&mut [("Name", &mut draft.name), ("Code", &mut draft.code)])? {
            return Ok(false);
        }

        let Some(start) = prompt::date("Protection start", draft.protection_start_date)? else {
            return Ok(false);
        };
        draft.protection_start_date = Some(start);

        let finish = draft.protection_finish_date.or(Some(start));
        let Some(finish) = prompt::date("Protection finish", finish)? else {
            return Ok(false);
        };
        draft.protection_finish_date = Some(finish);

        let current = draft.animal.as_ref().map(|a| a.id);
        let Some(animal) = pick_reference("Animal", self.animals.items(), current)? else {
            return Ok(false);
        };

        // Бэкенд ждёт имя животного рядом с идентификатором.
        draft.animal = animal.map(|id| Reference {
            id,
            name: self.animals.get(id).map(|a| a.name.clone()),
        });

        Ok(true)
    }

    fn searchable(&self) -> bool {
        true
    }

    fn search(&mut self) -> anyhow::Result<Option<VaccinationSearch>> {
        let options = vec!["By animal", "By protection range"];
        let Some(by) = prompt::choose("Search vaccinations", options)? else {
            return Ok(None);
        };

        if by == "By animal" {
            reload(&mut self.animals);
            let Pick::Chosen(id) = prompt::pick("Animal", self.animals.items(), None)? else {
                return Ok(None);
            };
            return Ok(Some(VaccinationSearch::ByAnimal(id)));
        }

        Ok(pick_range("Protection")?.map(VaccinationSearch::ByProtectionRange))
    }
}

pub struct ReportEditor {
    appointments: Lookup<Appointment>,
}

impl ReportEditor {
    pub fn new(client: &ApiClient) -> Self {
        Self {
            appointments: lookup(client),
        }
    }
}

impl Editor<Report> for ReportEditor {
    fn prepare(&mut self) -> anyhow::Result<()> {
        reload(&mut self.appointments);
        Ok(())
    }

    fn edit(&mut self, draft: &mut ReportDraft) -> anyhow::Result<bool> {
        if !edit_texts(&mut [("Title", &mut draft.title), ("Diagnosis", &mut draft.diagnosis)])? {
            return Ok(false);
        }

        let Some(price) = prompt::price("Price", draft.price)? else {
            return Ok(false);
        };
        draft.price = price;

        let Some(appointment) = pick_reference("Appointment", self.appointments.items(), draft.appointment_id)? else {
            return Ok(false);
        };
        draft.appointment_id = appointment;

        Ok(true)
    }
}
