//! Home screen and main list handlers

use iced::Task;
use moniq_core::protocol::{HomeScreen, ListItems, ListSelect};

use crate::ui::app::MoniqApp;
use crate::ui::message::Message;
use crate::ui::state::Panel;

/// List entry replaced by the GUI version string
pub const GUI_VERSION_ITEM: &str = "GUI_VER";

pub fn gui_version_text() -> String {
    format!("GUI: {}", env!("CARGO_PKG_VERSION"))
}

pub fn show_home_screen(app: &mut MoniqApp, home: HomeScreen) -> Task<Message> {
    let screen = &mut app.screen;
    screen.scope.set_mode(home.scope_mode);
    screen
        .status_bar
        .set_left_status(&home.preset_name, home.preset_modified);
    screen.value_bar.hide();
    screen.show_default_background(true, true);
    screen.clear_primary();
    screen.bottom_bar.hide();
    screen.msg_box.hide();
    screen.multi_status_bar.hide();
    Task::none()
}

/// Rebuild the main list; an empty list message is ignored
pub fn show_list_items(app: &mut MoniqApp, list: ListItems) -> Task<Message> {
    if list.items.is_empty() {
        return Task::none();
    }

    let screen = &mut app.screen;
    let main_list = &mut screen.main_list;
    main_list.clear();
    let mut version_row = None;
    for (i, item) in list.items.iter().enumerate() {
        if item.text == GUI_VERSION_ITEM {
            main_list.add_item(&gui_version_text(), true, false);
            version_row = Some(i);
        } else {
            let enabled = !list.process_enabled_state || item.enabled;
            main_list.add_item(&item.text, enabled, item.separator);
        }
    }

    if let Some(selected) = list.selected {
        let row = if selected < main_list.len() { selected } else { 0 };
        if version_row != Some(row) {
            main_list.select(row);
        }
    }

    screen.set_primary(Panel::MainList);
    screen.multi_status_bar.hide();
    screen.show_default_background(false, false);
    Task::none()
}

pub fn list_select_item(app: &mut MoniqApp, select: ListSelect) -> Task<Message> {
    if let Some(index) = select.selected {
        if !app.screen.main_list.select(index) {
            log::debug!("List select {} out of range", index);
        }
    }
    Task::none()
}
