//! Screen panels
//!
//! Each panel is a plain state struct implementing [`Themed`](crate::Themed)
//! plus a view function rendering it. Panels never read shared state; the
//! application feeds them decoded control messages.

mod background;
mod bottom_bar;
mod chart;
mod edit_name;
mod list;
mod modal;
mod status;
mod value;

pub use background::{backdrop_view, Backdrop, BackdropKind};
pub use bottom_bar::{bottom_bar_view, BottomBar, EMPTY_LABEL};
pub use chart::{chart_panel_view, ChartKind, ChartPanel};
pub use edit_name::{edit_name_view, CellStyle, EditName, ALPHABET, PICKER_SLOTS};
pub use list::{list_view, Fitting, ListPanel};
pub use modal::{message_box_view, popup_view, MessageBox, Popup, BUSY_FRAME_INTERVAL, POPUP_TIMEOUT};
pub use status::{multi_status_bar_view, status_bar_view, MultiStatusBar, StatusBar};
pub use value::{value_bar_view, value_panel_view, ParamValueBar, ValuePanel};
