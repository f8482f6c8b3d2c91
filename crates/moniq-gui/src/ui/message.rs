//! Application messages for moniq-gui
//!
//! Control messages from the sound engine don't travel through iced; the
//! render tick drains them from the receiver channel in arrival order.

/// Messages that can be sent to the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Render clock (~60Hz): drain control messages, advance the scope, expire the popup
    Tick,
    /// Wavetable viewer frame timer, subscribed only while a wavetable is streaming
    WavetableTick,
    /// Busy indicator frame timer, subscribed only while the message box is busy
    BusyTick,
}
