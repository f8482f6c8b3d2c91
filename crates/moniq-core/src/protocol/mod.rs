//! Control protocol between the sound engine and the display
//!
//! [`ControlMessage`] is the decoded, owned form of one fixed-size queue
//! message. Decoding never panics: an unrecognised kind tag or a short buffer
//! is reported as a [`DecodeError`] and the caller drops the message.

pub mod wire;

use crate::chart::{Adsr, FilterCutoff};
use bytemuck::Zeroable;
use wire::*;

pub use wire::{
    DecodeError, SampleFrame, CONTROL_MSG_SIZE, EDIT_NAME_STR_LEN, LIST_MAX_ITEMS,
    SAMPLE_FRAME_LEN, SAMPLE_MSG_SIZE,
};

/// Wire kind tags
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    SetLeftStatus = 0,
    SetLayerStatus = 1,
    SetMidiStatus = 2,
    SetTempoStatus = 3,
    ShowHomeScreen = 4,
    ShowListItems = 5,
    ListSelectItem = 6,
    SelectLayerName = 7,
    SetSoftButtonsText = 8,
    SetSoftButtonsState = 9,
    ShowParam = 10,
    UpdateParam = 11,
    ShowEnumParam = 12,
    UpdateEnumParam = 13,
    ShowEditName = 14,
    EditNameSelectChar = 15,
    EditNameChangeChar = 16,
    ShowMsgBox = 17,
    ShowMsgPopup = 18,
    ClearBootWarning = 19,
    SetSystemColour = 20,
    ScreenCapture = 21,
    ShowEnvelope = 22,
    UpdateEnvelope = 23,
    ShowCutoff = 24,
    UpdateCutoff = 25,
}

impl MessageKind {
    pub const ALL: [MessageKind; 26] = [
        Self::SetLeftStatus,
        Self::SetLayerStatus,
        Self::SetMidiStatus,
        Self::SetTempoStatus,
        Self::ShowHomeScreen,
        Self::ShowListItems,
        Self::ListSelectItem,
        Self::SelectLayerName,
        Self::SetSoftButtonsText,
        Self::SetSoftButtonsState,
        Self::ShowParam,
        Self::UpdateParam,
        Self::ShowEnumParam,
        Self::UpdateEnumParam,
        Self::ShowEditName,
        Self::EditNameSelectChar,
        Self::EditNameChangeChar,
        Self::ShowMsgBox,
        Self::ShowMsgPopup,
        Self::ClearBootWarning,
        Self::SetSystemColour,
        Self::ScreenCapture,
        Self::ShowEnvelope,
        Self::UpdateEnvelope,
        Self::ShowCutoff,
        Self::UpdateCutoff,
    ];

    pub fn from_raw(tag: u32) -> Option<Self> {
        Self::ALL.get(tag as usize).copied()
    }
}

/// Scope display selected by the home screen
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeMode {
    #[default]
    Off = 0,
    Oscillator = 1,
    Xy = 2,
}

impl ScopeMode {
    /// Unknown values disable the scope
    pub fn from_raw(v: u32) -> Self {
        match v {
            1 => Self::Oscillator,
            2 => Self::Xy,
            _ => Self::Off,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layer {
    #[default]
    L1,
    L2,
}

impl Layer {
    fn from_raw(v: u32) -> Self {
        if v == 2 {
            Self::L2
        } else {
            Self::L1
        }
    }

    fn to_raw(self) -> u32 {
        match self {
            Self::L1 => 1,
            Self::L2 => 2,
        }
    }
}

/// Which side of the screen the list sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenOrientation {
    /// List on the left, value on the right
    #[default]
    LeftRight,
    RightLeft,
}

impl ScreenOrientation {
    fn from_raw(v: u32) -> Self {
        if v == 1 {
            Self::RightLeft
        } else {
            Self::LeftRight
        }
    }

    fn to_raw(self) -> u32 {
        match self {
            Self::LeftRight => 0,
            Self::RightLeft => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SoftButtonState {
    #[default]
    Unchanged,
    Unpressed,
    Pressed,
}

impl SoftButtonState {
    fn from_raw(v: i32) -> Self {
        match v {
            0 => Self::Unpressed,
            1 => Self::Pressed,
            _ => Self::Unchanged,
        }
    }

    fn to_raw(self) -> i32 {
        match self {
            Self::Unchanged => -1,
            Self::Unpressed => 0,
            Self::Pressed => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeftStatus {
    pub text: String,
    pub modified: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerStatus {
    pub active: Layer,
    pub twelve_voice: bool,
    pub l1_voices: u8,
    pub l2_voices: u8,
}

/// Voice count shown per layer
pub const MAX_LAYER_VOICES: u8 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HomeScreen {
    pub scope_mode: ScopeMode,
    pub preset_name: String,
    pub preset_modified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListItem {
    pub text: String,
    pub enabled: bool,
    pub separator: bool,
}

impl ListItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), enabled: true, separator: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListItems {
    pub items: Vec<ListItem>,
    pub selected: Option<usize>,
    pub process_enabled_state: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListSelect {
    pub selected: Option<usize>,
    pub wt_list: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SoftButtonsText {
    pub button1: String,
    pub button2: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SoftButtonsState {
    pub button1: SoftButtonState,
    pub button2: SoftButtonState,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParamValue {
    pub name: String,
    /// Text value; when non-empty it replaces the numeric value string
    pub display_string: String,
    pub value_string: String,
    /// Units tag, empty for none
    pub value_tag: String,
}

impl ParamValue {
    /// Value text as shown in the one-line value bar
    pub fn bar_text(&self) -> String {
        let value = if self.display_string.is_empty() {
            &self.value_string
        } else {
            &self.display_string
        };
        if self.value_tag.is_empty() {
            value.clone()
        } else {
            format!("{} {}", value, self.value_tag)
        }
    }

    /// Text values use the smaller font
    pub fn is_text(&self) -> bool {
        !self.display_string.is_empty()
    }

    /// Value text without the tag
    pub fn value_text(&self) -> &str {
        if self.is_text() {
            &self.display_string
        } else {
            &self.value_string
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParamDisplay {
    pub value: ParamValue,
    pub selected: Option<usize>,
    pub items: Vec<ListItem>,
    pub force_show_list: bool,
    pub show_scope: bool,
    pub orientation: ScreenOrientation,
    pub l1_sound: String,
    pub l2_sound: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParamUpdate {
    pub value: ParamValue,
    pub selected: Option<usize>,
    pub orientation: ScreenOrientation,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnumParam {
    pub name: String,
    pub items: Vec<String>,
    pub selected: Option<usize>,
    pub wt_list: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MsgBox {
    pub show: bool,
    pub lines: [String; 3],
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MsgPopup {
    pub lines: [String; 2],
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnvelopeDisplay {
    pub adsr: Adsr,
    pub param: ParamDisplay,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnvelopeUpdate {
    pub adsr: Adsr,
    pub param: ParamUpdate,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CutoffDisplay {
    pub cutoff: FilterCutoff,
    pub param: ParamDisplay,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CutoffUpdate {
    pub cutoff: FilterCutoff,
    pub param: ParamUpdate,
}

/// One decoded control message
#[derive(Debug, Clone, PartialEq)]
pub enum ControlMessage {
    SetLeftStatus(LeftStatus),
    SetLayerStatus(LayerStatus),
    SetMidiStatus { active: bool },
    SetTempoStatus(String),
    ShowHomeScreen(HomeScreen),
    ShowListItems(ListItems),
    ListSelectItem(ListSelect),
    SelectLayerName(Layer),
    SetSoftButtonsText(SoftButtonsText),
    SetSoftButtonsState(SoftButtonsState),
    ShowParam(ParamDisplay),
    UpdateParam(ParamUpdate),
    ShowEnumParam(EnumParam),
    UpdateEnumParam(ListSelect),
    ShowEditName(String),
    EditNameSelectChar(usize),
    EditNameChangeChar(usize),
    ShowMsgBox(MsgBox),
    ShowMsgPopup(MsgPopup),
    ClearBootWarning,
    SetSystemColour(String),
    ScreenCapture,
    ShowEnvelope(EnvelopeDisplay),
    UpdateEnvelope(EnvelopeUpdate),
    ShowCutoff(CutoffDisplay),
    UpdateCutoff(CutoffUpdate),
}

impl ControlMessage {
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::SetLeftStatus(_) => MessageKind::SetLeftStatus,
            Self::SetLayerStatus(_) => MessageKind::SetLayerStatus,
            Self::SetMidiStatus { .. } => MessageKind::SetMidiStatus,
            Self::SetTempoStatus(_) => MessageKind::SetTempoStatus,
            Self::ShowHomeScreen(_) => MessageKind::ShowHomeScreen,
            Self::ShowListItems(_) => MessageKind::ShowListItems,
            Self::ListSelectItem(_) => MessageKind::ListSelectItem,
            Self::SelectLayerName(_) => MessageKind::SelectLayerName,
            Self::SetSoftButtonsText(_) => MessageKind::SetSoftButtonsText,
            Self::SetSoftButtonsState(_) => MessageKind::SetSoftButtonsState,
            Self::ShowParam(_) => MessageKind::ShowParam,
            Self::UpdateParam(_) => MessageKind::UpdateParam,
            Self::ShowEnumParam(_) => MessageKind::ShowEnumParam,
            Self::UpdateEnumParam(_) => MessageKind::UpdateEnumParam,
            Self::ShowEditName(_) => MessageKind::ShowEditName,
            Self::EditNameSelectChar(_) => MessageKind::EditNameSelectChar,
            Self::EditNameChangeChar(_) => MessageKind::EditNameChangeChar,
            Self::ShowMsgBox(_) => MessageKind::ShowMsgBox,
            Self::ShowMsgPopup(_) => MessageKind::ShowMsgPopup,
            Self::ClearBootWarning => MessageKind::ClearBootWarning,
            Self::SetSystemColour(_) => MessageKind::SetSystemColour,
            Self::ScreenCapture => MessageKind::ScreenCapture,
            Self::ShowEnvelope(_) => MessageKind::ShowEnvelope,
            Self::UpdateEnvelope(_) => MessageKind::UpdateEnvelope,
            Self::ShowCutoff(_) => MessageKind::ShowCutoff,
            Self::UpdateCutoff(_) => MessageKind::UpdateCutoff,
        }
    }

    /// Decode one queue message
    pub fn decode(bytes: &[u8]) -> wire::Result<Self> {
        let tag = read_kind(bytes)?;
        let kind = MessageKind::from_raw(tag).ok_or(DecodeError::UnknownKind(tag))?;

        let msg = match kind {
            MessageKind::SetLeftStatus => {
                let raw: RawLeftStatus = read_payload(bytes)?;
                Self::SetLeftStatus(LeftStatus {
                    text: read_str(&raw.text),
                    modified: raw.modified != 0,
                })
            }
            MessageKind::SetLayerStatus => {
                let raw: RawLayerStatus = read_payload(bytes)?;
                Self::SetLayerStatus(LayerStatus {
                    active: Layer::from_raw(raw.active_layer),
                    twelve_voice: raw.twelve_voice != 0,
                    l1_voices: voices(raw.l1_num_voices),
                    l2_voices: voices(raw.l2_num_voices),
                })
            }
            MessageKind::SetMidiStatus => {
                let raw: RawMidiStatus = read_payload(bytes)?;
                Self::SetMidiStatus { active: raw.active != 0 }
            }
            MessageKind::SetTempoStatus => {
                let raw: RawTempoStatus = read_payload(bytes)?;
                Self::SetTempoStatus(read_str(&raw.tempo))
            }
            MessageKind::ShowHomeScreen => {
                let raw: RawHomeScreen = read_payload(bytes)?;
                Self::ShowHomeScreen(HomeScreen {
                    scope_mode: ScopeMode::from_raw(raw.scope_mode),
                    preset_name: read_str(&raw.preset_name),
                    preset_modified: raw.preset_modified != 0,
                })
            }
            MessageKind::ShowListItems => {
                let raw: RawListItems = read_payload(bytes)?;
                Self::ShowListItems(ListItems {
                    items: read_items(
                        raw.num_items,
                        &raw.list_items,
                        &raw.list_item_enabled,
                        &raw.list_item_separator,
                    ),
                    selected: read_index(raw.selected_item),
                    process_enabled_state: raw.process_enabled_state != 0,
                })
            }
            MessageKind::ListSelectItem | MessageKind::UpdateEnumParam => {
                let raw: RawListSelect = read_payload(bytes)?;
                let select = ListSelect {
                    selected: read_index(raw.selected_item),
                    wt_list: raw.wt_list != 0,
                };
                if kind == MessageKind::ListSelectItem {
                    Self::ListSelectItem(select)
                } else {
                    Self::UpdateEnumParam(select)
                }
            }
            MessageKind::SelectLayerName => {
                let raw: RawSelectLayer = read_payload(bytes)?;
                Self::SelectLayerName(Layer::from_raw(raw.layer))
            }
            MessageKind::SetSoftButtonsText => {
                let raw: RawSoftButtonsText = read_payload(bytes)?;
                Self::SetSoftButtonsText(SoftButtonsText {
                    button1: read_str(&raw.button1),
                    button2: read_str(&raw.button2),
                })
            }
            MessageKind::SetSoftButtonsState => {
                let raw: RawSoftButtonsState = read_payload(bytes)?;
                Self::SetSoftButtonsState(SoftButtonsState {
                    button1: SoftButtonState::from_raw(raw.button1),
                    button2: SoftButtonState::from_raw(raw.button2),
                })
            }
            MessageKind::ShowParam => Self::ShowParam(param_display(&read_payload(bytes)?)),
            MessageKind::UpdateParam => Self::UpdateParam(param_update(&read_payload(bytes)?)),
            MessageKind::ShowEnumParam => {
                let raw: RawEnumParam = read_payload(bytes)?;
                let count = (raw.num_items as usize).min(LIST_MAX_ITEMS);
                Self::ShowEnumParam(EnumParam {
                    name: read_str(&raw.name),
                    items: raw.list_items[..count].iter().map(|s| read_str(s)).collect(),
                    selected: read_index(raw.selected_item),
                    wt_list: raw.wt_list != 0,
                })
            }
            MessageKind::ShowEditName => {
                let raw: RawEditName = read_payload(bytes)?;
                Self::ShowEditName(read_str(&raw.name))
            }
            MessageKind::EditNameSelectChar => {
                let raw: RawCharIndex = read_payload(bytes)?;
                Self::EditNameSelectChar(raw.index as usize)
            }
            MessageKind::EditNameChangeChar => {
                let raw: RawCharIndex = read_payload(bytes)?;
                Self::EditNameChangeChar(raw.index as usize)
            }
            MessageKind::ShowMsgBox => {
                let raw: RawMsgBox = read_payload(bytes)?;
                Self::ShowMsgBox(MsgBox {
                    show: raw.show != 0,
                    lines: raw.lines.map(|l| read_str(&l)),
                    busy: raw.show_hourglass != 0,
                })
            }
            MessageKind::ShowMsgPopup => {
                let raw: RawMsgPopup = read_payload(bytes)?;
                Self::ShowMsgPopup(MsgPopup {
                    lines: [read_str(&raw.line_1), read_str(&raw.line_2)],
                })
            }
            MessageKind::ClearBootWarning => Self::ClearBootWarning,
            MessageKind::SetSystemColour => {
                let raw: RawSystemColour = read_payload(bytes)?;
                Self::SetSystemColour(read_str(&raw.colour))
            }
            MessageKind::ScreenCapture => Self::ScreenCapture,
            MessageKind::ShowEnvelope => {
                let raw: RawEnvelope = read_payload(bytes)?;
                Self::ShowEnvelope(EnvelopeDisplay {
                    adsr: adsr(&raw.adsr),
                    param: param_display(&raw.param),
                })
            }
            MessageKind::UpdateEnvelope => {
                let raw: RawEnvelopeUpdate = read_payload(bytes)?;
                Self::UpdateEnvelope(EnvelopeUpdate {
                    adsr: adsr(&raw.adsr),
                    param: param_update(&raw.param),
                })
            }
            MessageKind::ShowCutoff => {
                let raw: RawCutoff = read_payload(bytes)?;
                Self::ShowCutoff(CutoffDisplay {
                    cutoff: FilterCutoff { high_pass: raw.hp_cutoff, low_pass: raw.lp_cutoff },
                    param: param_display(&raw.param),
                })
            }
            MessageKind::UpdateCutoff => {
                let raw: RawCutoffUpdate = read_payload(bytes)?;
                Self::UpdateCutoff(CutoffUpdate {
                    cutoff: FilterCutoff { high_pass: raw.hp_cutoff, low_pass: raw.lp_cutoff },
                    param: param_update(&raw.param),
                })
            }
        };
        Ok(msg)
    }

    /// Encode to a full `CONTROL_MSG_SIZE` queue message
    pub fn encode(&self) -> Vec<u8> {
        let kind = self.kind() as u32;
        match self {
            Self::SetLeftStatus(s) => write_message(
                kind,
                &RawLeftStatus { modified: s.modified as u32, text: write_str(&s.text) },
            ),
            Self::SetLayerStatus(s) => write_message(
                kind,
                &RawLayerStatus {
                    active_layer: s.active.to_raw(),
                    twelve_voice: s.twelve_voice as u32,
                    l1_num_voices: u32::from(s.l1_voices),
                    l2_num_voices: u32::from(s.l2_voices),
                },
            ),
            Self::SetMidiStatus { active } => {
                write_message(kind, &RawMidiStatus { active: *active as u32 })
            }
            Self::SetTempoStatus(tempo) => {
                write_message(kind, &RawTempoStatus { tempo: write_str(tempo) })
            }
            Self::ShowHomeScreen(home) => write_message(
                kind,
                &RawHomeScreen {
                    scope_mode: home.scope_mode as u32,
                    preset_modified: home.preset_modified as u32,
                    preset_name: write_str(&home.preset_name),
                },
            ),
            Self::ShowListItems(list) => {
                let mut raw = RawListItems::zeroed();
                raw.selected_item = write_index(list.selected);
                raw.process_enabled_state = list.process_enabled_state as u32;
                raw.num_items = write_items(
                    &list.items,
                    &mut raw.list_items,
                    &mut raw.list_item_enabled,
                    &mut raw.list_item_separator,
                );
                write_message(kind, &raw)
            }
            Self::ListSelectItem(select) | Self::UpdateEnumParam(select) => write_message(
                kind,
                &RawListSelect {
                    selected_item: write_index(select.selected),
                    wt_list: select.wt_list as u32,
                },
            ),
            Self::SelectLayerName(layer) => {
                write_message(kind, &RawSelectLayer { layer: layer.to_raw() })
            }
            Self::SetSoftButtonsText(text) => write_message(
                kind,
                &RawSoftButtonsText {
                    button1: write_str(&text.button1),
                    button2: write_str(&text.button2),
                },
            ),
            Self::SetSoftButtonsState(state) => write_message(
                kind,
                &RawSoftButtonsState {
                    button1: state.button1.to_raw(),
                    button2: state.button2.to_raw(),
                },
            ),
            Self::ShowParam(param) => write_message(kind, &raw_param(param)),
            Self::UpdateParam(update) => write_message(kind, &raw_param_update(update)),
            Self::ShowEnumParam(param) => {
                let mut raw = RawEnumParam::zeroed();
                raw.selected_item = write_index(param.selected);
                raw.wt_list = param.wt_list as u32;
                raw.name = write_str(&param.name);
                let count = param.items.len().min(LIST_MAX_ITEMS);
                for (slot, item) in raw.list_items.iter_mut().zip(&param.items[..count]) {
                    *slot = write_str(item);
                }
                raw.num_items = count as u32;
                write_message(kind, &raw)
            }
            Self::ShowEditName(name) => write_message(kind, &RawEditName { name: write_str(name) }),
            Self::EditNameSelectChar(index) | Self::EditNameChangeChar(index) => {
                write_message(kind, &RawCharIndex { index: *index as u32 })
            }
            Self::ShowMsgBox(msg_box) => write_message(
                kind,
                &RawMsgBox {
                    show: msg_box.show as u32,
                    show_hourglass: msg_box.busy as u32,
                    lines: [
                        write_str(&msg_box.lines[0]),
                        write_str(&msg_box.lines[1]),
                        write_str(&msg_box.lines[2]),
                    ],
                },
            ),
            Self::ShowMsgPopup(popup) => write_message(
                kind,
                &RawMsgPopup {
                    line_1: write_str(&popup.lines[0]),
                    line_2: write_str(&popup.lines[1]),
                },
            ),
            Self::ClearBootWarning | Self::ScreenCapture => write_message(kind, &0u32),
            Self::SetSystemColour(colour) => {
                write_message(kind, &RawSystemColour { colour: write_str(colour) })
            }
            Self::ShowEnvelope(env) => write_message(
                kind,
                &RawEnvelope { adsr: raw_adsr(&env.adsr), param: raw_param(&env.param) },
            ),
            Self::UpdateEnvelope(env) => write_message(
                kind,
                &RawEnvelopeUpdate { adsr: raw_adsr(&env.adsr), param: raw_param_update(&env.param) },
            ),
            Self::ShowCutoff(cutoff) => write_message(
                kind,
                &RawCutoff {
                    hp_cutoff: cutoff.cutoff.high_pass,
                    lp_cutoff: cutoff.cutoff.low_pass,
                    param: raw_param(&cutoff.param),
                },
            ),
            Self::UpdateCutoff(cutoff) => write_message(
                kind,
                &RawCutoffUpdate {
                    hp_cutoff: cutoff.cutoff.high_pass,
                    lp_cutoff: cutoff.cutoff.low_pass,
                    param: raw_param_update(&cutoff.param),
                },
            ),
        }
    }
}

fn voices(raw: u32) -> u8 {
    raw.min(u32::from(MAX_LAYER_VOICES)) as u8
}

fn read_items(
    num_items: u32,
    strings: &ListStrings,
    enabled: &ListFlags,
    separator: &ListFlags,
) -> Vec<ListItem> {
    let count = (num_items as usize).min(LIST_MAX_ITEMS);
    (0..count)
        .map(|i| ListItem {
            text: read_str(&strings[i]),
            enabled: enabled[i] != 0,
            separator: separator[i] != 0,
        })
        .collect()
}

fn write_items(
    items: &[ListItem],
    strings: &mut ListStrings,
    enabled: &mut ListFlags,
    separator: &mut ListFlags,
) -> u32 {
    let count = items.len().min(LIST_MAX_ITEMS);
    for (i, item) in items[..count].iter().enumerate() {
        strings[i] = write_str(&item.text);
        enabled[i] = item.enabled as u8;
        separator[i] = item.separator as u8;
    }
    count as u32
}

fn param_value(raw: &RawParamValue) -> ParamValue {
    ParamValue {
        name: read_str(&raw.name),
        display_string: read_str(&raw.display_string),
        value_string: read_str(&raw.value_string),
        value_tag: read_str(&raw.value_tag),
    }
}

fn raw_param_value(value: &ParamValue) -> RawParamValue {
    RawParamValue {
        name: write_str(&value.name),
        display_string: write_str(&value.display_string),
        value_string: write_str(&value.value_string),
        value_tag: write_str(&value.value_tag),
    }
}

fn param_display(raw: &RawParam) -> ParamDisplay {
    ParamDisplay {
        value: param_value(&raw.value),
        selected: read_index(raw.selected_item),
        items: read_items(
            raw.num_items,
            &raw.list_items,
            &raw.list_item_enabled,
            &raw.list_item_separator,
        ),
        force_show_list: raw.force_show_list != 0,
        show_scope: raw.show_scope != 0,
        orientation: ScreenOrientation::from_raw(raw.screen_orientation),
        l1_sound: read_str(&raw.l1_sound),
        l2_sound: read_str(&raw.l2_sound),
    }
}

fn raw_param(param: &ParamDisplay) -> RawParam {
    let mut raw = RawParam::zeroed();
    raw.selected_item = write_index(param.selected);
    raw.force_show_list = param.force_show_list as u32;
    raw.show_scope = param.show_scope as u32;
    raw.screen_orientation = param.orientation.to_raw();
    raw.value = raw_param_value(&param.value);
    raw.l1_sound = write_str(&param.l1_sound);
    raw.l2_sound = write_str(&param.l2_sound);
    raw.num_items = write_items(
        &param.items,
        &mut raw.list_items,
        &mut raw.list_item_enabled,
        &mut raw.list_item_separator,
    );
    raw
}

fn param_update(raw: &RawParamUpdate) -> ParamUpdate {
    ParamUpdate {
        value: param_value(&raw.value),
        selected: read_index(raw.selected_item),
        orientation: ScreenOrientation::from_raw(raw.screen_orientation),
    }
}

fn raw_param_update(update: &ParamUpdate) -> RawParamUpdate {
    RawParamUpdate {
        selected_item: write_index(update.selected),
        screen_orientation: update.orientation.to_raw(),
        value: raw_param_value(&update.value),
    }
}

fn adsr(raw: &RawAdsr) -> Adsr {
    Adsr {
        attack: raw.attack,
        decay: raw.decay,
        sustain: raw.sustain,
        release: raw.release,
        level: raw.level,
    }
}

fn raw_adsr(adsr: &Adsr) -> RawAdsr {
    RawAdsr {
        attack: adsr.attack,
        decay: adsr.decay,
        sustain: adsr.sustain,
        release: adsr.release,
        level: adsr.level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param_with_items() -> ParamDisplay {
        ParamDisplay {
            value: ParamValue {
                name: "VCF CUTOFF".into(),
                display_string: String::new(),
                value_string: "64".into(),
                value_tag: "Hz".into(),
            },
            selected: Some(1),
            items: vec![
                ListItem::new("CUTOFF"),
                ListItem { text: "RESONANCE".into(), enabled: false, separator: true },
            ],
            orientation: ScreenOrientation::RightLeft,
            l1_sound: "PAD".into(),
            l2_sound: "BASS".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_every_message_is_full_size() {
        let msgs = [
            ControlMessage::ClearBootWarning,
            ControlMessage::SetTempoStatus("120 BPM".into()),
            ControlMessage::ShowParam(param_with_items()),
        ];
        for msg in msgs {
            assert_eq!(msg.encode().len(), CONTROL_MSG_SIZE);
        }
    }

    #[test]
    fn test_decode_list_items() {
        let msg = ControlMessage::ShowListItems(ListItems {
            items: vec![ListItem::new("A"), ListItem::new("B"), ListItem::new("C")],
            selected: Some(1),
            process_enabled_state: true,
        });
        let decoded = ControlMessage::decode(&msg.encode()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_decode_param_and_envelope() {
        let param = param_with_items();
        let msg = ControlMessage::ShowEnvelope(EnvelopeDisplay {
            adsr: Adsr { attack: 0.25, decay: 0.5, sustain: 0.75, release: 0.1, level: 1.0 },
            param: param.clone(),
        });
        match ControlMessage::decode(&msg.encode()).unwrap() {
            ControlMessage::ShowEnvelope(env) => {
                assert_eq!(env.adsr.sustain, 0.75);
                assert_eq!(env.param, param);
                assert!(!env.param.items[1].enabled);
                assert!(env.param.items[1].separator);
            }
            other => panic!("Unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        let mut bytes = ControlMessage::ScreenCapture.encode();
        bytes[..4].copy_from_slice(&999u32.to_ne_bytes());
        assert_eq!(ControlMessage::decode(&bytes), Err(DecodeError::UnknownKind(999)));
    }

    #[test]
    fn test_short_buffer_is_truncated() {
        let bytes = ControlMessage::ShowParam(param_with_items()).encode();
        assert!(matches!(
            ControlMessage::decode(&bytes[..64]),
            Err(DecodeError::Truncated { .. })
        ));
    }

    #[test]
    fn test_out_of_range_fields_are_clamped() {
        let mut raw = RawListItems::zeroed();
        raw.num_items = 5000;
        raw.selected_item = -7;
        let bytes = write_message(MessageKind::ShowListItems as u32, &raw);
        match ControlMessage::decode(&bytes).unwrap() {
            ControlMessage::ShowListItems(list) => {
                assert_eq!(list.items.len(), LIST_MAX_ITEMS);
                assert_eq!(list.selected, None);
            }
            other => panic!("Unexpected message {:?}", other),
        }

        let bytes = write_message(
            MessageKind::SetLayerStatus as u32,
            &RawLayerStatus { active_layer: 2, twelve_voice: 1, l1_num_voices: 9, l2_num_voices: 3 },
        );
        assert_eq!(
            ControlMessage::decode(&bytes).unwrap(),
            ControlMessage::SetLayerStatus(LayerStatus {
                active: Layer::L2,
                twelve_voice: true,
                l1_voices: MAX_LAYER_VOICES,
                l2_voices: 3,
            })
        );
    }

    #[test]
    fn test_enum_params_and_soft_buttons() {
        let msg = ControlMessage::ShowEnumParam(EnumParam {
            name: "WAVETABLE".into(),
            items: vec!["SAW.wav".into(), "SQUARE.wav".into()],
            selected: Some(1),
            wt_list: true,
        });
        assert_eq!(ControlMessage::decode(&msg.encode()).unwrap(), msg);

        let mut bytes = write_message(
            MessageKind::SetSoftButtonsState as u32,
            &RawSoftButtonsState { button1: 1, button2: 42 },
        );
        assert_eq!(
            ControlMessage::decode(&bytes).unwrap(),
            ControlMessage::SetSoftButtonsState(SoftButtonsState {
                button1: SoftButtonState::Pressed,
                button2: SoftButtonState::Unchanged,
            })
        );

        bytes = write_message(
            MessageKind::ShowHomeScreen as u32,
            &RawHomeScreen { scope_mode: 7, preset_modified: 1, preset_name: write_str("INIT") },
        );
        match ControlMessage::decode(&bytes).unwrap() {
            ControlMessage::ShowHomeScreen(home) => {
                assert_eq!(home.scope_mode, ScopeMode::Off);
                assert!(home.preset_modified);
                assert_eq!(home.preset_name, "INIT");
            }
            other => panic!("Unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_bar_text() {
        let mut value = param_with_items().value;
        assert_eq!(value.bar_text(), "64 Hz");
        value.display_string = "SAW".into();
        value.value_tag.clear();
        assert_eq!(value.bar_text(), "SAW");
        assert!(value.is_text());
        assert_eq!(value.value_text(), "SAW");
    }
}
