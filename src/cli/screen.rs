//! Общий цикл экрана: таблица, меню и форма.

use log::debug;

use super::{
    notify,
    prompt::{self, Pick},
};
use crate::{
    api::Resource,
    collection::{self, Action, Collection},
    display::{self, Row},
    form::{self, Form},
    model::Entity,
    notice::{capitalize, Notice},
};

/// Поля формы и поиск конкретного экрана.
pub trait Editor<E: Row> {
    /// Подгружает справочники перед вводом.
    fn prepare(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Вызывается сразу после открытия формы.
    fn opened(&mut self, _draft: &mut E::Draft) {}

    /// Запрашивает поля черновика. Возвращает false, если пользователь
    /// отказался от ввода.
    fn edit(&mut self, draft: &mut E::Draft) -> anyhow::Result<bool>;

    fn searchable(&self) -> bool {
        false
    }

    fn search(&mut self) -> anyhow::Result<Option<E::Search>> {
        Ok(None)
    }

    /// Дополнительный пункт меню.
    fn extra(&self) -> Option<&'static str> {
        None
    }

    fn run_extra(&mut self, _items: &[E]) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
enum MenuItem {
    #[display(fmt = "Add")]
    Add,
    #[display(fmt = "Update")]
    Update,
    #[display(fmt = "Delete")]
    Delete,
    #[display(fmt = "Search")]
    Search,
    #[display(fmt = "Show all")]
    ShowAll,
    #[display(fmt = "{}", _0)]
    Extra(&'static str),
    #[display(fmt = "Refresh")]
    Refresh,
    #[display(fmt = "Back")]
    Back,
}

pub fn run<E, R, Ed>(collection: &mut Collection<E, R>, editor: &mut Ed) -> anyhow::Result<()>
where
    E: Row,
    R: Resource<E>,
    Ed: Editor<E>,
{
    println!("Loading...");
    refresh(collection);

    let mut form = Form::<E>::new();

    loop {
        print!("{}", display::render(collection.items()));

        let Some(item) = prompt::choose(&capitalize(E::PLURAL), menu(collection, editor))? else {
            return Ok(());
        };
        debug!("Пункт меню {:?} на экране {}", item, E::PLURAL);

        match item {
            MenuItem::Add => {
                form.open_for_create()?;
                editor.opened(form.draft_mut());
                fill_and_submit(collection, editor, &mut form)?;
            }
            MenuItem::Update => {
                let title = format!("Which {} to update?", E::NAME);
                if let Pick::Chosen(id) = prompt::pick(&title, collection.items(), None)? {
                    let Some(entity) = collection.get(id).cloned() else {
                        continue;
                    };
                    form.open_for_edit(&entity)?;
                    editor.opened(form.draft_mut());
                    fill_and_submit(collection, editor, &mut form)?;
                }
            }
            MenuItem::Delete => {
                let title = format!("Which {} to delete?", E::NAME);
                if let Pick::Chosen(id) = prompt::pick(&title, collection.items(), None)? {
                    if !prompt::confirm(&format!("Delete this {}?", E::NAME))? {
                        continue;
                    }
                    match collection.delete(id) {
                        Ok(()) => notify(&Notice::success(Action::Delete, E::NAME)),
                        Err(e) => report_sync::<E>(&e),
                    }
                }
            }
            MenuItem::Search => {
                if let Some(criteria) = editor.search()? {
                    if collection.search(criteria).is_err() {
                        notify(&Notice::fetch_failed(E::PLURAL));
                    }
                }
            }
            MenuItem::ShowAll => {
                if collection.clear_search().is_err() {
                    notify(&Notice::fetch_failed(E::PLURAL));
                }
            }
            MenuItem::Extra(_) => editor.run_extra(collection.items())?,
            MenuItem::Refresh => refresh(collection),
            MenuItem::Back => return Ok(()),
        }
    }
}

fn menu<E: Row, R: Resource<E>, Ed: Editor<E>>(collection: &Collection<E, R>, editor: &Ed) -> Vec<MenuItem> {
    let mut items = vec![MenuItem::Add];

    if !collection.items().is_empty() {
        items.push(MenuItem::Update);
        items.push(MenuItem::Delete);
    }

    if editor.searchable() {
        items.push(MenuItem::Search);
        if collection.filter().is_some() {
            items.push(MenuItem::ShowAll);
        }
    }

    if let Some(extra) = editor.extra() {
        items.push(MenuItem::Extra(extra));
    }

    items.push(MenuItem::Refresh);
    items.push(MenuItem::Back);

    items
}

fn refresh<E: Entity, R: Resource<E>>(collection: &mut Collection<E, R>) {
    if collection.refresh().is_err() {
        notify(&Notice::fetch_failed(E::PLURAL));
    }
}

/// Ввод и отправка формы. Пока бэкенд отклоняет черновик, пользователь
/// правит его заново; Esc закрывает форму.
fn fill_and_submit<E, R, Ed>(collection: &mut Collection<E, R>, editor: &mut Ed, form: &mut Form<E>) -> anyhow::Result<()>
where
    E: Row,
    R: Resource<E>,
    Ed: Editor<E>,
{
    editor.prepare()?;

    loop {
        if !editor.edit(form.draft_mut())? {
            form.close();
            return Ok(());
        }

        match form.submit(collection) {
            Ok(action) => {
                notify(&Notice::success(action, E::NAME));
                return Ok(());
            }
            Err(form::Error::Validation(e)) => notify(&Notice::invalid(&e)),
            Err(form::Error::Sync(e)) => {
                report_sync::<E>(&e);
                if !form.is_open() {
                    return Ok(());
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn report_sync<E: Entity>(err: &collection::Error) {
    debug!("Ошибка синхронизации {}: {:?}", E::PLURAL, err);

    match err {
        collection::Error::Mutation { action, source } => {
            notify(&Notice::mutation_failed(*action, E::NAME, source));
        }
        collection::Error::Refresh { action, .. } => {
            notify(&Notice::success(*action, E::NAME));
            notify(&Notice::fetch_failed(E::PLURAL));
        }
    }
}
