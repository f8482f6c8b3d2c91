//! Fixed-size wire layout of control messages
//!
//! Each message is `CONTROL_MSG_SIZE` bytes: a native-endian `u32` kind tag
//! followed by one of the payload structs below, zero padded to the size of the
//! largest. Every payload is `#[repr(C)]` with its 4-byte fields first and its
//! byte arrays last, so none of them carries padding.

use bytemuck::{Pod, Zeroable};
use std::mem::size_of;
use thiserror::Error;

/// Length of general-purpose strings (names, status text, value strings)
pub const STR_LEN: usize = 40;
/// Length of a soft button label
pub const SOFT_BUTTON_STR_LEN: usize = 20;
/// Length of one list entry
pub const LIST_ITEM_STR_LEN: usize = 40;
/// Maximum entries carried by a list message
pub const LIST_MAX_ITEMS: usize = 128;
/// Length of the editable preset name
pub const EDIT_NAME_STR_LEN: usize = 20;
/// Length of the hex colour string
pub const COLOUR_STR_LEN: usize = 8;

pub(crate) type ListStrings = [[u8; LIST_ITEM_STR_LEN]; LIST_MAX_ITEMS];
pub(crate) type ListFlags = [u8; LIST_MAX_ITEMS];

/// Errors decoding a control message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Unknown message kind {0}")]
    UnknownKind(u32),

    #[error("Message truncated: need {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, DecodeError>;

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawLeftStatus {
    pub modified: u32,
    pub text: [u8; STR_LEN],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawLayerStatus {
    pub active_layer: u32,
    pub twelve_voice: u32,
    pub l1_num_voices: u32,
    pub l2_num_voices: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawMidiStatus {
    pub active: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawTempoStatus {
    pub tempo: [u8; STR_LEN],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawHomeScreen {
    pub scope_mode: u32,
    pub preset_modified: u32,
    pub preset_name: [u8; STR_LEN],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawListItems {
    pub selected_item: i32,
    pub num_items: u32,
    pub process_enabled_state: u32,
    pub list_items: ListStrings,
    pub list_item_enabled: ListFlags,
    pub list_item_separator: ListFlags,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawListSelect {
    pub selected_item: i32,
    pub wt_list: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawSelectLayer {
    pub layer: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawSoftButtonsText {
    pub button1: [u8; SOFT_BUTTON_STR_LEN],
    pub button2: [u8; SOFT_BUTTON_STR_LEN],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawSoftButtonsState {
    pub button1: i32,
    pub button2: i32,
}

/// Name/value strings shared by the parameter messages
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawParamValue {
    pub name: [u8; STR_LEN],
    pub display_string: [u8; STR_LEN],
    pub value_string: [u8; STR_LEN],
    pub value_tag: [u8; STR_LEN],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawParam {
    pub selected_item: i32,
    pub num_items: u32,
    pub force_show_list: u32,
    pub show_scope: u32,
    pub screen_orientation: u32,
    pub value: RawParamValue,
    pub l1_sound: [u8; STR_LEN],
    pub l2_sound: [u8; STR_LEN],
    pub list_items: ListStrings,
    pub list_item_enabled: ListFlags,
    pub list_item_separator: ListFlags,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawParamUpdate {
    pub selected_item: i32,
    pub screen_orientation: u32,
    pub value: RawParamValue,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawEnumParam {
    pub selected_item: i32,
    pub num_items: u32,
    pub wt_list: u32,
    pub name: [u8; STR_LEN],
    pub list_items: ListStrings,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawEditName {
    pub name: [u8; EDIT_NAME_STR_LEN],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawCharIndex {
    pub index: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawMsgBox {
    pub show: u32,
    pub show_hourglass: u32,
    pub lines: [[u8; STR_LEN]; 3],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawMsgPopup {
    pub line_1: [u8; STR_LEN],
    pub line_2: [u8; STR_LEN],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawSystemColour {
    pub colour: [u8; COLOUR_STR_LEN],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawAdsr {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
    pub level: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawEnvelope {
    pub adsr: RawAdsr,
    pub param: RawParam,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawEnvelopeUpdate {
    pub adsr: RawAdsr,
    pub param: RawParamUpdate,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawCutoff {
    pub hp_cutoff: f32,
    pub lp_cutoff: f32,
    pub param: RawParam,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawCutoffUpdate {
    pub hp_cutoff: f32,
    pub lp_cutoff: f32,
    pub param: RawParamUpdate,
}

const fn max(a: usize, b: usize) -> usize {
    if a > b {
        a
    } else {
        b
    }
}

/// Size of the largest payload
pub const MAX_PAYLOAD_SIZE: usize = max(
    max(
        max(size_of::<RawListItems>(), size_of::<RawParam>()),
        max(size_of::<RawEnumParam>(), size_of::<RawEnvelope>()),
    ),
    size_of::<RawCutoff>(),
);

/// Size in bytes of every control message on the queue
pub const CONTROL_MSG_SIZE: usize = size_of::<u32>() + MAX_PAYLOAD_SIZE;

/// Interleaved stereo floats per sample frame
pub const SAMPLE_FRAME_LEN: usize = 256;

/// Size in bytes of one sample frame on the queue
pub const SAMPLE_MSG_SIZE: usize = SAMPLE_FRAME_LEN * size_of::<f32>();

/// One frame of interleaved L/R samples
pub type SampleFrame = [f32; SAMPLE_FRAME_LEN];

/// Read the kind tag at the start of a message
pub fn read_kind(bytes: &[u8]) -> Result<u32> {
    let tag = bytes.get(..size_of::<u32>()).ok_or(DecodeError::Truncated {
        expected: size_of::<u32>(),
        actual: bytes.len(),
    })?;
    Ok(bytemuck::pod_read_unaligned(tag))
}

/// Read a payload struct following the kind tag
pub fn read_payload<T: Pod>(bytes: &[u8]) -> Result<T> {
    let end = size_of::<u32>() + size_of::<T>();
    let payload = bytes
        .get(size_of::<u32>()..end)
        .ok_or(DecodeError::Truncated { expected: end, actual: bytes.len() })?;
    Ok(bytemuck::pod_read_unaligned(payload))
}

/// Build a full-size message from a kind tag and payload
pub fn write_message<T: Pod>(kind: u32, payload: &T) -> Vec<u8> {
    let mut buf = vec![0u8; CONTROL_MSG_SIZE];
    buf[..size_of::<u32>()].copy_from_slice(bytemuck::bytes_of(&kind));
    let payload = bytemuck::bytes_of(payload);
    buf[size_of::<u32>()..size_of::<u32>() + payload.len()].copy_from_slice(payload);
    buf
}

/// Decode a sample frame, `None` unless the buffer is exactly one frame
pub fn read_sample_frame(bytes: &[u8]) -> Option<SampleFrame> {
    (bytes.len() == SAMPLE_MSG_SIZE).then(|| bytemuck::pod_read_unaligned(bytes))
}

/// String from a NUL-terminated (or full) byte buffer
pub fn read_str(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

/// Copy a string into a fixed buffer, truncating at a char boundary
pub fn write_str<const N: usize>(s: &str) -> [u8; N] {
    let mut buf = [0u8; N];
    let mut end = s.len().min(N);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    buf[..end].copy_from_slice(&s.as_bytes()[..end]);
    buf
}

/// `-1` (or any negative value) means none
pub fn read_index(v: i32) -> Option<usize> {
    usize::try_from(v).ok()
}

pub fn write_index(v: Option<usize>) -> i32 {
    v.and_then(|i| i32::try_from(i).ok()).unwrap_or(-1)
}
