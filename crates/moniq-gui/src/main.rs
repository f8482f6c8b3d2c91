//! moniq display controller
//!
//! Entry point for the instrument's display. It:
//! 1. Loads the device config for the system colour
//! 2. Starts the control and sample queue receivers in background threads
//! 3. Launches the iced GUI, which applies queued control messages on its render tick
//!
//! Set `RUST_LOG=debug` for per-message logging.

mod config;
mod ui;

use std::cell::RefCell;

use anyhow::Context;
use iced::{Size, Task};

use moniq_core::config::load_device_config;
use moniq_core::ipc::{ControlReceiver, SampleReceiver, CONTROL_QUEUE};
use moniq_core::scope::SoundScope;
use moniq_core::ControlMessage;
use moniq_widgets::theme::{LCD_HEIGHT, LCD_WIDTH};

use config::GuiConfig;
use ui::{message::Message, MoniqApp};

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("moniq-gui {} starting up", env!("CARGO_PKG_VERSION"));

    let config = GuiConfig::from_env();
    let system_colour = load_device_config(&config.device_config_path).system_colour();
    let scope = SoundScope::new();

    // Receivers stop their threads when dropped, keep them until the GUI exits
    let (control_tx, control_rx) = flume::bounded::<ControlMessage>(CONTROL_QUEUE.max_messages);
    let (control_receiver, sample_receiver) = start_receivers(control_tx, scope.clone());
    if control_receiver.is_none() {
        log::warn!("Running without a control queue, the display will stay on the boot screen");
    }

    // Boot resources in cells so the boot closure can be Fn
    let boot_cell = RefCell::new(Some((config, system_colour, scope, control_rx)));

    let result = iced::application(
        move || {
            let app = match boot_cell.borrow_mut().take() {
                Some((config, colour, scope, rx)) => MoniqApp::new(config, colour, scope, Some(rx)),
                None => MoniqApp::new(GuiConfig::default(), Default::default(), SoundScope::new(), None),
            };
            (app, Task::none())
        },
        update,
        view,
    )
    .subscription(subscription)
    .theme(theme)
    .title("moniq")
    .window_size(Size::new(LCD_WIDTH, LCD_HEIGHT))
    .run();

    drop(control_receiver);
    drop(sample_receiver);
    log::info!("moniq-gui stopped");

    result
}

/// Open both queues; a queue that fails to open is logged and left out
fn start_receivers(
    control_tx: flume::Sender<ControlMessage>,
    scope: SoundScope,
) -> (Option<ControlReceiver>, Option<SampleReceiver>) {
    let control = ControlReceiver::spawn(control_tx)
        .context("Failed to start control queue receiver")
        .inspect_err(|e| log::error!("{:#}", e))
        .ok();
    let samples = SampleReceiver::spawn(scope)
        .context("Failed to start sample queue receiver")
        .inspect_err(|e| log::error!("{:#}", e))
        .ok();
    (control, samples)
}

/// Update function for iced
fn update(app: &mut MoniqApp, message: Message) -> Task<Message> {
    app.update(message)
}

/// View function for iced
fn view(app: &MoniqApp) -> iced::Element<'_, Message> {
    app.view()
}

/// Subscription function for iced
fn subscription(app: &MoniqApp) -> iced::Subscription<Message> {
    app.subscription()
}

/// Theme function for iced
fn theme(app: &MoniqApp) -> iced::Theme {
    app.theme()
}
