//! Preset name editor
//!
//! A row of name cells with a vertical character picker over the selected
//! cell. The picker shows a 7-character window of the alphabet centred on
//! the character currently chosen; only that window is rewritten when the
//! character changes.

use iced::widget::{column, container, row, text, Column};
use iced::{Background, Color, Element, Font, Length};
use moniq_core::protocol::EDIT_NAME_STR_LEN;

use crate::theme::{Palette, Themed, EDIT_NAME_FONT_SIZE};

/// Characters a name may contain, in picker order
pub const ALPHABET: [char; 38] = [
    ' ', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '-',
];

pub const PICKER_SLOTS: usize = 7;
const PICKER_CENTRE: usize = PICKER_SLOTS / 2;

const CELL_WIDTH: f32 = 40.0;
const CELL_HEIGHT: f32 = 44.0;

/// How a name cell is drawn relative to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Selected,
    Normal,
    Dimmed,
}

#[derive(Debug, Clone, Default)]
pub struct EditName {
    cells: [Option<char>; EDIT_NAME_STR_LEN],
    selected: Option<usize>,
    blanked: Option<usize>,
    picker: [Option<char>; PICKER_SLOTS],
    visible: bool,
    palette: Palette,
}

impl EditName {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `name`, selecting the cell after its last char on first show
    pub fn show(&mut self, name: &str) {
        let mut len = 0;
        for (cell, c) in self.cells.iter_mut().zip(name.chars()) {
            *cell = Some(c);
            len += 1;
        }
        for (i, cell) in self.cells.iter_mut().enumerate().skip(len) {
            // One trailing blank cell marks where the next char goes
            *cell = (i == len).then_some(' ');
        }

        if self.selected.is_none() {
            self.selected = Some(len.min(EDIT_NAME_STR_LEN - 1));
        }
        self.blanked = None;
        self.visible = true;
    }

    pub fn select_char(&mut self, index: usize) {
        self.selected = Some(index.min(EDIT_NAME_STR_LEN - 1));
    }

    /// Centre the picker on alphabet entry `index`
    pub fn change_char(&mut self, index: usize) {
        let index = if index >= ALPHABET.len() { 1 } else { index };
        self.blanked = self.selected;
        for (slot, entry) in self.picker.iter_mut().enumerate() {
            *entry = (index + slot)
                .checked_sub(PICKER_CENTRE)
                .and_then(|i| ALPHABET.get(i).copied());
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.selected = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn picker(&self) -> &[Option<char>; PICKER_SLOTS] {
        &self.picker
    }

    /// Character drawn in cell `i`, `None` when the cell is hidden
    pub fn cell(&self, i: usize) -> Option<char> {
        if self.blanked == Some(i) {
            return None;
        }
        self.cells.get(i).copied().flatten()
    }

    pub fn cell_style(&self, i: usize) -> CellStyle {
        match self.selected {
            Some(sel) if i == sel => CellStyle::Selected,
            Some(sel) if i > sel => CellStyle::Dimmed,
            _ => CellStyle::Normal,
        }
    }
}

impl Themed for EditName {
    fn refresh_colour(&mut self, palette: &Palette) {
        self.palette = *palette;
    }

    fn palette(&self) -> &Palette {
        &self.palette
    }
}

fn char_cell<'a, Message: 'a>(c: Option<char>, fg: Color, bg: Color) -> Element<'a, Message> {
    let label = c.map(String::from).unwrap_or_default();
    container(text(label).size(EDIT_NAME_FONT_SIZE).font(Font::MONOSPACE).color(fg))
        .center_x(Length::Fixed(CELL_WIDTH))
        .center_y(Length::Fixed(CELL_HEIGHT))
        .style(move |_| container::Style {
            background: Some(Background::Color(bg)),
            ..Default::default()
        })
        .into()
}

pub fn edit_name_view<'a, Message: 'a>(editor: &'a EditName) -> Element<'a, Message> {
    let palette = editor.palette;
    let blank = || char_cell(None, palette.accent, Color::TRANSPARENT);

    let columns = (0..EDIT_NAME_STR_LEN).map(|i| -> Element<'a, Message> {
        let (fg, bg) = match editor.cell_style(i) {
            CellStyle::Selected => (palette.background, palette.accent),
            CellStyle::Normal => (palette.accent, Color::TRANSPARENT),
            CellStyle::Dimmed => (palette.dimmed, Color::TRANSPARENT),
        };

        let picker_here = editor.selected == Some(i) && editor.blanked == Some(i);
        let slots: Vec<Element<'a, Message>> = (0..PICKER_SLOTS)
            .map(|slot| match (slot == PICKER_CENTRE, picker_here) {
                (true, true) => char_cell(editor.picker[slot], palette.background, palette.accent),
                (true, false) => char_cell(editor.cell(i), fg, bg),
                (false, true) => char_cell(editor.picker[slot], palette.dimmed, Color::TRANSPARENT),
                (false, false) => blank(),
            })
            .collect();
        Column::with_children(slots).into()
    });

    container(column![row(columns)].align_x(iced::Center))
        .width(Length::Fill)
        .height(Length::Fill)
        .center(Length::Fill)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_selects_after_name() {
        let mut editor = EditName::new();
        editor.show("BASS");
        assert!(editor.is_visible());
        assert_eq!(editor.selected(), Some(4));
        assert_eq!(editor.cell(0), Some('B'));
        assert_eq!(editor.cell(4), Some(' '));
        assert_eq!(editor.cell(5), None);
    }

    #[test]
    fn test_show_keeps_existing_selection() {
        let mut editor = EditName::new();
        editor.show("BASS");
        editor.select_char(1);
        editor.show("BOSS");
        assert_eq!(editor.selected(), Some(1));
    }

    #[test]
    fn test_full_length_name_selects_last_cell() {
        let mut editor = EditName::new();
        editor.show("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        assert_eq!(editor.selected(), Some(EDIT_NAME_STR_LEN - 1));
        assert_eq!(editor.cell(EDIT_NAME_STR_LEN - 1), Some('T'));
    }

    #[test]
    fn test_cell_styles_follow_selection() {
        let mut editor = EditName::new();
        editor.show("LEAD");
        editor.select_char(2);
        assert_eq!(editor.cell_style(1), CellStyle::Normal);
        assert_eq!(editor.cell_style(2), CellStyle::Selected);
        assert_eq!(editor.cell_style(3), CellStyle::Dimmed);
    }

    #[test]
    fn test_change_char_fills_picker_window() {
        let mut editor = EditName::new();
        editor.show("AB");
        editor.select_char(1);
        editor.change_char(2);
        assert_eq!(editor.picker(), &[None, Some(' '), Some('A'), Some('B'), Some('C'), Some('D'), Some('E')]);
        // Selected cell is covered by the picker
        assert_eq!(editor.cell(1), None);
        assert_eq!(editor.cell(0), Some('A'));
    }

    #[test]
    fn test_change_char_wraps_past_alphabet_end() {
        let mut editor = EditName::new();
        editor.show("");
        editor.change_char(37);
        assert_eq!(editor.picker()[3], Some('-'));
        assert_eq!(editor.picker()[4], None);
        editor.change_char(40);
        assert_eq!(editor.picker()[3], Some('A'));
    }

    #[test]
    fn test_hide_resets_selection() {
        let mut editor = EditName::new();
        editor.show("KEYS");
        editor.select_char(0);
        editor.hide();
        assert!(!editor.is_visible());
        assert_eq!(editor.selected(), None);
        editor.show("KEYS");
        assert_eq!(editor.selected(), Some(4));
    }
}
