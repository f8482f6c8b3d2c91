//! Enum and wavetable list handlers

use iced::Task;
use moniq_core::protocol::{EnumParam, ListSelect};

use crate::ui::app::MoniqApp;
use crate::ui::message::Message;
use crate::ui::state::Panel;

pub fn show_enum_param(app: &mut MoniqApp, param: EnumParam) -> Task<Message> {
    let screen = &mut app.screen;
    screen.status_bar.set_left_status(&param.name, false);

    let list = if param.wt_list {
        &mut screen.wt_list
    } else {
        &mut screen.enum_list
    };
    list.clear();
    for item in &param.items {
        list.add_item(item, true, false);
    }
    let row = param.selected.filter(|&i| i < param.items.len()).unwrap_or(0);
    list.select(row);
    screen.enum_items = param.items;

    screen.multi_status_bar.hide();
    screen.show_default_background(false, false);
    screen.value_bar.hide();

    if param.wt_list {
        screen.set_primary(Panel::WavetableList);
        load_wavetable(app, row);
        app.screen.scope.hide(true);
    } else {
        screen.wt_scope.unload();
        screen.wt_scope.hide();
        screen.set_primary(Panel::EnumList);
    }
    Task::none()
}

pub fn update_enum_param(app: &mut MoniqApp, select: ListSelect) -> Task<Message> {
    let Some(index) = select.selected else {
        return Task::none();
    };
    let screen = &mut app.screen;
    let list = if select.wt_list {
        &mut screen.wt_list
    } else {
        &mut screen.enum_list
    };
    if list.select(index) && select.wt_list {
        load_wavetable(app, index);
    }
    Task::none()
}

/// Start streaming the wavetable file at `row` of the list and show the viewer
fn load_wavetable(app: &mut MoniqApp, row: usize) {
    let screen = &mut app.screen;
    match screen.enum_items.get(row) {
        Some(name) => {
            let path = app.config.wavetable_dir.join(name);
            log::debug!("Loading wavetable {:?}", path);
            screen.wt_scope.load(&path);
        }
        None => {
            screen.wt_scope.unload();
            screen.wt_scope.show_zero_scope();
        }
    }
    screen.wt_scope.show();
}

/// Advance the wavetable viewer one wave
pub fn wavetable_tick(app: &mut MoniqApp) -> Task<Message> {
    app.screen.wt_scope.tick();
    Task::none()
}
