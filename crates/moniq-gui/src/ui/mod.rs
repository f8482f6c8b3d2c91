//! UI module for moniq-gui
//!
//! Built with iced. The sound engine talks to the display over two message
//! queues; worker threads decode them and the UI applies the results on its
//! own tick, so all screen state is mutated from one place.

pub mod app;
pub mod handlers;
pub mod message;
pub mod state;

pub use app::MoniqApp;
