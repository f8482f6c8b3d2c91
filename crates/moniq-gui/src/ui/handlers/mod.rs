//! Message handlers for MoniqApp
//!
//! Each handler module is responsible for a specific category of messages.
//! Handlers receive `&mut MoniqApp` and return `Task<Message>`.

pub mod charts;
pub mod edit_name;
pub mod enum_params;
pub mod modals;
pub mod navigation;
pub mod params;
pub mod status;
pub mod system;
pub mod tick;

use iced::Task;
use moniq_core::ControlMessage;

use crate::ui::app::MoniqApp;
use crate::ui::message::Message;

/// Apply one control message from the sound engine to the screen
pub fn dispatch(app: &mut MoniqApp, msg: ControlMessage) -> Task<Message> {
    log::debug!("Control message {:?}", msg.kind());
    match msg {
        ControlMessage::SetLeftStatus(s) => status::set_left_status(app, s),
        ControlMessage::SetLayerStatus(s) => status::set_layer_status(app, s),
        ControlMessage::SetMidiStatus { active } => status::set_midi_status(app, active),
        ControlMessage::SetTempoStatus(tempo) => status::set_tempo_status(app, tempo),
        ControlMessage::SelectLayerName(layer) => status::select_layer_name(app, layer),
        ControlMessage::SetSoftButtonsText(text) => status::set_soft_buttons_text(app, text),
        ControlMessage::SetSoftButtonsState(state) => status::set_soft_buttons_state(app, state),

        ControlMessage::ShowHomeScreen(home) => navigation::show_home_screen(app, home),
        ControlMessage::ShowListItems(list) => navigation::show_list_items(app, list),
        ControlMessage::ListSelectItem(select) => navigation::list_select_item(app, select),

        ControlMessage::ShowParam(param) => params::show_param(app, param),
        ControlMessage::UpdateParam(update) => params::update_param(app, update),
        ControlMessage::ShowEnumParam(param) => enum_params::show_enum_param(app, param),
        ControlMessage::UpdateEnumParam(select) => enum_params::update_enum_param(app, select),

        ControlMessage::ShowEnvelope(envelope) => charts::show_envelope(app, envelope),
        ControlMessage::UpdateEnvelope(update) => charts::update_envelope(app, update),
        ControlMessage::ShowCutoff(cutoff) => charts::show_cutoff(app, cutoff),
        ControlMessage::UpdateCutoff(update) => charts::update_cutoff(app, update),

        ControlMessage::ShowEditName(name) => edit_name::show_edit_name(app, name),
        ControlMessage::EditNameSelectChar(index) => edit_name::select_char(app, index),
        ControlMessage::EditNameChangeChar(index) => edit_name::change_char(app, index),

        ControlMessage::ShowMsgBox(msg) => modals::show_msg_box(app, msg),
        ControlMessage::ShowMsgPopup(popup) => modals::show_msg_popup(app, popup),

        ControlMessage::ClearBootWarning => system::clear_boot_warning(app),
        ControlMessage::SetSystemColour(hex) => system::set_system_colour(app, hex),
        ControlMessage::ScreenCapture => system::screen_capture(app),
    }
}
