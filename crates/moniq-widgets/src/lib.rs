//! iced rendering for the moniq display
//!
//! ## Architecture (iced 0.14 patterns)
//!
//! - **State structs**: Pure data per panel (`ListPanel`, `StatusBar`, `EditName`, ...)
//! - **View functions**: Take panel state, return `Element<Message>`
//! - **Canvas Programs**: Scope line strips, filled charts and the busy indicator
//!
//! Every panel draws in the accent colour held by its own [`Palette`] and is
//! re-themed through [`Themed::refresh_colour`].

pub mod canvas;
pub mod metrics;
pub mod panels;
pub mod theme;

pub use canvas::{busy_view, chart_view, scope_view, BusyCanvas, ChartCanvas, ScopeCanvas};
pub use metrics::MonospaceMetrics;
pub use theme::{Palette, Themed};
