//! Popup and message box handlers

use std::time::Instant;

use iced::Task;
use moniq_core::protocol::{MsgBox, MsgPopup};

use crate::ui::app::MoniqApp;
use crate::ui::message::Message;

pub fn show_msg_box(app: &mut MoniqApp, msg: MsgBox) -> Task<Message> {
    app.screen.msg_box.apply(&msg);
    Task::none()
}

/// Show a popup; any earlier pending dismiss is replaced
pub fn show_msg_popup(app: &mut MoniqApp, popup: MsgPopup) -> Task<Message> {
    app.screen.popup.show(&popup.lines, Instant::now());
    Task::none()
}

/// Advance the busy indicator one frame
pub fn busy_tick(app: &mut MoniqApp) -> Task<Message> {
    app.screen.msg_box.tick_busy();
    Task::none()
}
