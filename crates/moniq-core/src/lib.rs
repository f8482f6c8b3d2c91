//! Moniq Core - Protocol, IPC and scope state for the display controller

pub mod capture;
pub mod chart;
pub mod config;
pub mod ipc;
pub mod protocol;
pub mod scope;
pub mod text;

pub use chart::Point;
pub use protocol::ControlMessage;
