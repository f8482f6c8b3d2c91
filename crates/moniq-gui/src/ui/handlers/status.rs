//! Status bar, multi status bar and soft button handlers

use iced::Task;
use moniq_core::protocol::{Layer, LayerStatus, LeftStatus, SoftButtonsState, SoftButtonsText};

use crate::ui::app::MoniqApp;
use crate::ui::message::Message;

pub fn set_left_status(app: &mut MoniqApp, status: LeftStatus) -> Task<Message> {
    app.screen.status_bar.set_left_status(&status.text, status.modified);
    Task::none()
}

pub fn set_layer_status(app: &mut MoniqApp, layers: LayerStatus) -> Task<Message> {
    app.screen.status_bar.set_layer_status(layers);
    Task::none()
}

/// The status bar has no MIDI indicator
pub fn set_midi_status(_app: &mut MoniqApp, active: bool) -> Task<Message> {
    log::trace!("MIDI status {}", if active { "active" } else { "inactive" });
    Task::none()
}

pub fn set_tempo_status(app: &mut MoniqApp, tempo: String) -> Task<Message> {
    app.screen.status_bar.set_tempo(&tempo);
    Task::none()
}

pub fn select_layer_name(app: &mut MoniqApp, layer: Layer) -> Task<Message> {
    app.screen.multi_status_bar.select_layer(layer);
    Task::none()
}

pub fn set_soft_buttons_text(app: &mut MoniqApp, text: SoftButtonsText) -> Task<Message> {
    app.screen.bottom_bar.set_text(&text.button1, &text.button2);
    Task::none()
}

pub fn set_soft_buttons_state(app: &mut MoniqApp, state: SoftButtonsState) -> Task<Message> {
    app.screen.bottom_bar.set_state(state.button1, state.button2);
    Task::none()
}
