//! moniq-feed - stand-in for the sound engine
//!
//! Sends a home screen to the display and then streams Lissajous sample
//! frames at 60 Hz, so the GUI can be exercised on a desktop.
//!
//! Usage: `moniq-feed [osc|xy] [preset name]`

use anyhow::{Context, Result};
use moniq_core::ipc::{MessageQueue, QueueAccess, CONTROL_QUEUE, SAMPLE_QUEUE};
use moniq_core::protocol::{ControlMessage, HomeScreen, SampleFrame, ScopeMode, SAMPLE_FRAME_LEN};
use moniq_core::scope::SCOPE_REFRESH_INTERVAL;
use std::f32::consts::TAU;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut args = std::env::args().skip(1);
    let scope_mode = match args.next().as_deref() {
        Some("osc") => ScopeMode::Oscillator,
        Some("xy") | None => ScopeMode::Xy,
        Some(other) => anyhow::bail!("Unknown scope mode '{}', expected osc or xy", other),
    };
    let preset_name = args.next().unwrap_or_else(|| "INIT PRESET".to_string());

    let control = MessageQueue::open(CONTROL_QUEUE, QueueAccess::SendOnly)
        .context("Opening control queue")?;
    let samples = MessageQueue::open(SAMPLE_QUEUE, QueueAccess::SendOnly)
        .context("Opening sample queue")?;

    for msg in [
        ControlMessage::ClearBootWarning,
        ControlMessage::ShowHomeScreen(HomeScreen {
            scope_mode,
            preset_name,
            preset_modified: false,
        }),
    ] {
        control.send(&msg.encode()).with_context(|| format!("Sending {:?}", msg.kind()))?;
    }
    log::info!("Streaming {:?} frames, Ctrl-C to stop", scope_mode);

    let mut phase = 0.0f32;
    loop {
        let frame = lissajous_frame(phase);
        samples.send(bytemuck::bytes_of(&frame)).context("Sending sample frame")?;
        phase = (phase + 0.01) % 1.0;
        std::thread::sleep(SCOPE_REFRESH_INTERVAL);
    }
}

/// 3:2 Lissajous figure with a slowly drifting phase
fn lissajous_frame(phase: f32) -> SampleFrame {
    let mut frame = [0.0f32; SAMPLE_FRAME_LEN];
    for (i, pair) in frame.chunks_exact_mut(2).enumerate() {
        let t = i as f32 / (SAMPLE_FRAME_LEN / 2) as f32;
        pair[0] = 0.5 * (TAU * 3.0 * t).sin();
        pair[1] = 0.5 * (TAU * (2.0 * t + phase)).sin();
    }
    frame
}
