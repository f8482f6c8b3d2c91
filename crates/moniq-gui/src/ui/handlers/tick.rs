//! Tick message handler
//!
//! Handles the ~60fps render clock:
//! - Control messages queued by the IPC receiver, applied in arrival order
//! - Sound scope idle tracking and buffer read for this frame
//! - Popup auto-dismiss

use std::time::Instant;

use iced::Task;
use moniq_core::ControlMessage;

use crate::ui::app::MoniqApp;
use crate::ui::message::Message;

/// Handle the tick message (called ~60fps)
pub fn handle(app: &mut MoniqApp) -> Task<Message> {
    // Collect first to release the receiver borrow before dispatching
    let messages: Vec<ControlMessage> = app
        .control_rx
        .as_ref()
        .map(|rx| rx.try_iter().collect())
        .unwrap_or_default();

    let tasks: Vec<_> = messages
        .into_iter()
        .map(|msg| super::dispatch(app, msg))
        .collect();

    app.screen.scope.tick();
    app.screen.sync_scope();

    if app.screen.popup.expire(Instant::now()) {
        log::trace!("Popup dismissed");
    }

    Task::batch(tasks)
}
