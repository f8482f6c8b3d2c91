//! Parameter display handlers
//!
//! A parameter with no related items is shown as a one-line value bar over
//! the background. With items it gets the side list and the large value.

use iced::Task;
use moniq_core::protocol::{ParamDisplay, ParamUpdate};
use moniq_core::scope::DisplayMode;

use crate::ui::app::MoniqApp;
use crate::ui::message::Message;
use crate::ui::state::{Panel, ScreenState};

pub fn show_param(app: &mut MoniqApp, param: ParamDisplay) -> Task<Message> {
    let screen = &mut app.screen;
    let standalone = param.items.is_empty() && !param.force_show_list;

    if standalone {
        screen.value_bar.show_value(&param.value);
        screen.params_list.clear();
        screen.multi_status_bar.hide();
        screen.clear_primary();
    } else {
        screen.status_bar.set_left_status(&param.value.name, false);
        screen
            .multi_status_bar
            .set_sound_names(&param.l1_sound, &param.l2_sound);
        screen.param_value.set_value(&param.value, true);
        screen.show_param_value = !param.items.is_empty();
        screen.orientation = param.orientation;
        rebuild_params_list(screen, &param);
        screen.set_primary(Panel::Param);
        screen.value_bar.hide();
    }

    if screen.background.is_visible() || screen.scope.display_mode() == DisplayMode::Foreground {
        screen.show_default_background(standalone, param.show_scope);
    }
    Task::none()
}

fn rebuild_params_list(screen: &mut ScreenState, param: &ParamDisplay) {
    let list = &mut screen.params_list;
    list.clear();
    for item in &param.items {
        list.add_item(&item.text, item.enabled, item.separator);
    }
    let row = param.selected.filter(|&i| i < list.len()).unwrap_or(0);
    list.select(row);
}

pub fn update_param(app: &mut MoniqApp, update: ParamUpdate) -> Task<Message> {
    let screen = &mut app.screen;

    if screen.params_list.is_empty() {
        screen.value_bar.show_value(&update.value);
        for panel in [Panel::Param, Panel::Envelope, Panel::Cutoff] {
            screen.hide_panel(panel);
        }
        if !screen.background.is_visible() && !screen.scope.is_visible() {
            screen.show_default_background(true, true);
        }
    } else {
        screen.param_value.set_value(&update.value, true);
        screen.orientation = update.orientation;
        if let Some(index) = update.selected {
            screen.params_list.select(index);
        }
        // The charts give way to the list they were drawn beside
        if matches!(screen.primary, Some(Panel::Envelope | Panel::Cutoff)) {
            screen.primary = Some(Panel::Param);
        }
    }
    Task::none()
}
