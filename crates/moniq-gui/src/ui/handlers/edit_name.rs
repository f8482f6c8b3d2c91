//! Name editor handlers

use iced::Task;

use crate::ui::app::MoniqApp;
use crate::ui::message::Message;
use crate::ui::state::Panel;

pub fn show_edit_name(app: &mut MoniqApp, name: String) -> Task<Message> {
    let screen = &mut app.screen;
    screen.edit_name.show(&name);
    screen.show_default_background(false, false);
    screen.set_primary(Panel::EditName);
    Task::none()
}

pub fn select_char(app: &mut MoniqApp, index: usize) -> Task<Message> {
    app.screen.edit_name.select_char(index);
    Task::none()
}

pub fn change_char(app: &mut MoniqApp, index: usize) -> Task<Message> {
    app.screen.edit_name.change_char(index);
    Task::none()
}
