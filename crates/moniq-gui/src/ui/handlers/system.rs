//! Boot warning, accent colour and screen capture handlers

use iced::Task;
use moniq_core::config::SystemColour;

use crate::ui::app::{MoniqApp, SCOPE_HEIGHT};
use crate::ui::message::Message;

/// Leave the start-up screen and start the scope render clock
pub fn clear_boot_warning(app: &mut MoniqApp) -> Task<Message> {
    log::info!("Boot warning cleared, starting sound scope");
    app.screen.boot_warning.set_visible(false);
    app.screen.scope.start(SCOPE_HEIGHT as u32);
    Task::none()
}

pub fn set_system_colour(app: &mut MoniqApp, hex: String) -> Task<Message> {
    let colour = SystemColour::parse_or_default(&hex);
    log::info!("System colour set to {}", colour.hex());
    app.screen.set_system_colour(colour);
    Task::none()
}

/// Reserve the next capture file if removable storage is mounted
pub fn screen_capture(app: &mut MoniqApp) -> Task<Message> {
    match app.capture.next_path() {
        Some(path) => log::info!("Screen capture: {:?}", path),
        None => log::info!(
            "Screen capture ignored, {:?} is not mounted",
            app.capture.dir()
        ),
    }
    Task::none()
}
