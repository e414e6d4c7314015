mod editors;
mod prompt;
mod screen;

use anyhow::anyhow;
use enum_iterator::all;
use log::debug;

use crate::{
    api::{ApiClient, HttpResource},
    collection::Collection,
    display::{self, Row},
    model::{Animal, Appointment, Customer, Doctor, Entity, Report, Vaccination, WorkDay},
    notice::Notice,
};

/// Экраны админки.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    enum_iterator::Sequence,
    clap::ValueEnum,
)]
pub enum Screen {
    #[display(fmt = "Customers")]
    Customers,
    #[display(fmt = "Doctors")]
    Doctors,
    #[display(fmt = "Work days")]
    WorkDays,
    #[display(fmt = "Animals")]
    Animals,
    #[display(fmt = "Appointments")]
    Appointments,
    #[display(fmt = "Vaccinations")]
    Vaccinations,
    #[display(fmt = "Reports")]
    Reports,
}

/// Печатает таблицу экрана один раз.
pub fn list(screen: Screen, client: &ApiClient) -> anyhow::Result<()> {
    match screen {
        Screen::Customers => print_table::<Customer>(client),
        Screen::Doctors => print_table::<Doctor>(client),
        Screen::WorkDays => print_table::<WorkDay>(client),
        Screen::Animals => print_table::<Animal>(client),
        Screen::Appointments => print_table::<Appointment>(client),
        Screen::Vaccinations => print_table::<Vaccination>(client),
        Screen::Reports => print_table::<Report>(client),
    }
}

/// Открывает интерактивный экран. Без экрана показывает главное меню.
pub fn open(screen: Option<Screen>, client: &ApiClient) -> anyhow::Result<()> {
    match screen {
        Some(s) => run(s, client),
        None => home(client),
    }
}

fn home(client: &ApiClient) -> anyhow::Result<()> {
    loop {
        let screens: Vec<Screen> = all::<Screen>().collect();

        let Some(screen) = prompt::choose("Vet clinic", screens)? else {
            return Ok(());
        };

        run(screen, client)?;
    }
}

fn run(target: Screen, client: &ApiClient) -> anyhow::Result<()> {
    debug!("Открываем экран {}", target);

    match target {
        Screen::Customers => screen::run(&mut collection::<Customer>(client), &mut editors::CustomerEditor),
        Screen::Doctors => screen::run(
            &mut collection::<Doctor>(client),
            &mut editors::DoctorEditor::new(client),
        ),
        Screen::WorkDays => screen::run(
            &mut collection::<WorkDay>(client),
            &mut editors::WorkDayEditor::new(client),
        ),
        Screen::Animals => screen::run(
            &mut collection::<Animal>(client),
            &mut editors::AnimalEditor::new(client),
        ),
        Screen::Appointments => screen::run(
            &mut collection::<Appointment>(client),
            &mut editors::AppointmentEditor::new(client),
        ),
        Screen::Vaccinations => screen::run(
            &mut collection::<Vaccination>(client),
            &mut editors::VaccinationEditor::new(client),
        ),
        Screen::Reports => screen::run(
            &mut collection::<Report>(client),
            &mut editors::ReportEditor::new(client),
        ),
    }
}

fn collection<E: Entity>(client: &ApiClient) -> Collection<E, HttpResource<E>> {
    Collection::new(HttpResource::new(client.clone()))
}

fn print_table<E: Row>(client: &ApiClient) -> anyhow::Result<()> {
    let mut collection = collection::<E>(client);

    if let Err(e) = collection.refresh() {
        debug!("Ошибка при получении {}: {:?}", E::PLURAL, e);
        return Err(anyhow!(Notice::fetch_failed(E::PLURAL)));
    }

    print!("{}", display::render(collection.items()));

    Ok(())
}

/// Показывает уведомление пользователю.
fn notify(notice: &Notice) {
    if notice.is_error() {
        eprintln!("{}", notice);
    } else {
        println!("{}", notice);
    }
}
