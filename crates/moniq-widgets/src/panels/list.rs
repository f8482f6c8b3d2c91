//! Scrolling list panel
//!
//! Used for the main menu list, the parameter side list and the enum and
//! wavetable choosers. Entries are fitted to the list width when added, so
//! the stored text is exactly what is drawn.

use iced::widget::{column, container, text, Space};
use iced::{Background, Border, Color, Element, Font, Length, Padding};
use moniq_core::protocol::ListItem;
use moniq_core::text::{fit_keeping_suffix, fit_to_width};

use crate::metrics::MonospaceMetrics;
use crate::theme::{Palette, Themed, LIST_FONT_SIZE, LIST_ITEM_MARGIN, LIST_ROW_HEIGHT, LIST_VISIBLE_ROWS};

const SEPARATOR_HEIGHT: f32 = 3.0;

/// How overflowing entries are shortened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fitting {
    /// Drop trailing characters
    #[default]
    Truncate,
    /// Keep the 3-char file extension after the marker
    KeepSuffix,
}

#[derive(Debug, Clone)]
pub struct ListPanel {
    entries: Vec<ListItem>,
    selected: Option<usize>,
    width: f32,
    fitting: Fitting,
    metrics: MonospaceMetrics,
    palette: Palette,
}

impl ListPanel {
    pub fn new(width: f32) -> Self {
        Self {
            entries: Vec::new(),
            selected: None,
            width,
            fitting: Fitting::Truncate,
            metrics: MonospaceMetrics::for_size(LIST_FONT_SIZE),
            palette: Palette::default(),
        }
    }

    pub fn with_fitting(mut self, fitting: Fitting) -> Self {
        self.fitting = fitting;
        self
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.selected = None;
    }

    /// Append an entry, fitted to the list width
    pub fn add_item(&mut self, text: &str, enabled: bool, separator: bool) {
        let max_width = self.width - LIST_ITEM_MARGIN;
        let text = match self.fitting {
            Fitting::Truncate => fit_to_width(text, max_width, &self.metrics),
            Fitting::KeepSuffix => fit_keeping_suffix(text, max_width, &self.metrics),
        };
        self.entries.push(ListItem { text, enabled, separator });
    }

    /// Select `index` if it is in range; returns whether it was
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ListItem] {
        &self.entries
    }

    /// Row scrolled to the centre of the view for the current selection
    pub fn scroll_anchor(&self) -> usize {
        match self.selected {
            Some(i) if i < 4 => 0,
            Some(4) => 3,
            Some(i) => i,
            None => 0,
        }
    }

    /// First entry drawn
    pub fn first_visible(&self) -> usize {
        let max_first = self.entries.len().saturating_sub(LIST_VISIBLE_ROWS);
        self.scroll_anchor()
            .saturating_sub(LIST_VISIBLE_ROWS / 2 - 1)
            .min(max_first)
    }
}

impl Themed for ListPanel {
    fn refresh_colour(&mut self, palette: &Palette) {
        self.palette = *palette;
    }

    fn palette(&self) -> &Palette {
        &self.palette
    }
}

/// Colours for one row: (text, background)
fn row_colours(palette: &Palette, selected: bool, enabled: bool) -> (Color, Color) {
    match (selected, enabled) {
        (true, true) => (palette.background, palette.accent),
        (true, false) => (palette.dimmed, palette.accent),
        (false, true) => (palette.accent, Color::TRANSPARENT),
        (false, false) => (palette.dimmed, Color::TRANSPARENT),
    }
}

fn list_row<'a, Message: 'a>(item: &'a ListItem, selected: bool, palette: Palette) -> Element<'a, Message> {
    let (fg, bg) = row_colours(&palette, selected, item.enabled);
    let rule_colour = if selected { palette.background } else { palette.accent };

    let label = container(text(&item.text).size(LIST_FONT_SIZE).font(Font::MONOSPACE).color(fg))
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(Padding::new(0.0).left(20.0).right(10.0))
        .center_y(Length::Fill);

    let mut content = column![label];
    if item.separator {
        content = content.push(
            container(Space::new().width(Length::Fill).height(SEPARATOR_HEIGHT)).style(move |_| {
                container::Style {
                    background: Some(Background::Color(rule_colour)),
                    ..Default::default()
                }
            }),
        );
    }

    container(content)
        .width(Length::Fill)
        .height(Length::Fixed(LIST_ROW_HEIGHT))
        .style(move |_| container::Style {
            background: Some(Background::Color(bg)),
            border: Border {
                color: palette.accent,
                width: 0.0,
                radius: 0.0.into(),
            },
            ..Default::default()
        })
        .into()
}

/// Render the visible rows of a list
pub fn list_view<'a, Message: 'a>(list: &'a ListPanel) -> Element<'a, Message> {
    let first = list.first_visible();
    let rows = list
        .entries
        .iter()
        .enumerate()
        .skip(first)
        .take(LIST_VISIBLE_ROWS)
        .map(|(i, item)| list_row(item, list.selected == Some(i), list.palette));

    container(column(rows))
        .width(Length::Fixed(list.width))
        .height(Length::Fixed(LIST_ROW_HEIGHT * LIST_VISIBLE_ROWS as f32))
        .style(|_| container::Style {
            background: Some(Background::Color(Color::BLACK)),
            ..Default::default()
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(n: usize) -> ListPanel {
        let mut list = ListPanel::new(844.0);
        for i in 0..n {
            list.add_item(&format!("ITEM {}", i), true, false);
        }
        list
    }

    #[test]
    fn test_select_in_range_only() {
        let mut list = list_of(3);
        assert!(list.select(1));
        assert_eq!(list.selected(), Some(1));
        assert!(!list.select(3));
        assert_eq!(list.selected(), Some(1));
    }

    #[test]
    fn test_clear_resets_selection() {
        let mut list = list_of(3);
        list.select(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn test_scroll_anchor() {
        let mut list = list_of(20);
        for (selected, anchor) in [(0, 0), (3, 0), (4, 3), (5, 5), (12, 12)] {
            list.select(selected);
            assert_eq!(list.scroll_anchor(), anchor, "selected {}", selected);
        }
    }

    #[test]
    fn test_selection_stays_visible() {
        let mut list = list_of(20);
        for i in 0..20 {
            list.select(i);
            let first = list.first_visible();
            assert!((first..first + LIST_VISIBLE_ROWS).contains(&i), "selected {}", i);
        }
        list.select(19);
        assert_eq!(list.first_visible(), 14);
    }

    #[test]
    fn test_entries_fitted_to_width() {
        let mut list = ListPanel::new(210.0);
        // 180px after margins at 18px per char: 10 chars
        list.add_item("FILTER ENVELOPE AMOUNT", false, true);
        let entry = &list.entries()[0];
        assert_eq!(entry.text, "FILTER EN~");
        assert!(!entry.enabled);
        assert!(entry.separator);
    }

    #[test]
    fn test_wavetable_entries_keep_extension() {
        let mut list = ListPanel::new(210.0).with_fitting(Fitting::KeepSuffix);
        list.add_item("LONG_WAVETABLE_NAME.wav", true, false);
        assert_eq!(list.entries()[0].text, "LONG_W~wav");
    }

    #[test]
    fn test_row_colours() {
        let palette = Palette::default();
        assert_eq!(row_colours(&palette, true, true), (Color::BLACK, palette.accent));
        assert_eq!(row_colours(&palette, false, false).0, palette.dimmed);
    }
}
