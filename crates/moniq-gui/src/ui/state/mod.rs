//! Screen state for moniq-gui
//!
//! Every panel the display can show, plus the rules that keep them
//! consistent with each other. The primary content region holds at most one
//! panel, modelled as a single `Option<Panel>`.

use moniq_core::config::SystemColour;
use moniq_core::protocol::{ScopeMode, ScreenOrientation};
use moniq_core::scope::{DisplayMode, SoundScope, WtScope};
use moniq_core::Point;
use moniq_widgets::panels::{
    Backdrop, BackdropKind, BottomBar, ChartKind, ChartPanel, EditName, Fitting, ListPanel,
    MessageBox, MultiStatusBar, ParamValueBar, Popup, StatusBar, ValuePanel,
};
use moniq_widgets::theme::{LIST_WIDTH, PARAM_LIST_WIDTH, WT_LIST_WIDTH};
use moniq_widgets::{Palette, Themed};

/// Primary content panels, mutually exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    MainList,
    /// Parameter list with the large value beside it
    Param,
    EnumList,
    /// Wavetable file list with the wavetable viewer
    WavetableList,
    Envelope,
    Cutoff,
    EditName,
}

pub struct ScreenState {
    pub status_bar: StatusBar,
    pub multi_status_bar: MultiStatusBar,
    pub value_bar: ParamValueBar,
    pub bottom_bar: BottomBar,
    pub background: Backdrop,
    pub boot_warning: Backdrop,

    pub main_list: ListPanel,
    pub params_list: ListPanel,
    pub param_value: ValuePanel,
    /// Large value hidden when a list is forced with no items
    pub show_param_value: bool,
    pub orientation: ScreenOrientation,
    pub enum_list: ListPanel,
    pub wt_list: ListPanel,
    /// Unfitted enum entries, wavetable entries are file names
    pub enum_items: Vec<String>,
    pub envelope: ChartPanel,
    pub cutoff: ChartPanel,
    pub edit_name: EditName,
    pub popup: Popup,
    pub msg_box: MessageBox,

    pub primary: Option<Panel>,

    pub scope: SoundScope,
    /// Scope points read on the last render tick
    pub scope_points: Vec<Point>,
    pub wt_scope: WtScope,

    pub system_colour: SystemColour,
    pub palette: Palette,
}

impl ScreenState {
    pub fn new(scope: SoundScope, system_colour: SystemColour) -> Self {
        let mut state = Self {
            status_bar: StatusBar::default(),
            multi_status_bar: MultiStatusBar::default(),
            value_bar: ParamValueBar::default(),
            bottom_bar: BottomBar::default(),
            background: Backdrop::new(BackdropKind::Logo, false),
            boot_warning: Backdrop::new(BackdropKind::BootWarning, true),
            main_list: ListPanel::new(LIST_WIDTH),
            params_list: ListPanel::new(PARAM_LIST_WIDTH),
            param_value: ValuePanel::default(),
            show_param_value: true,
            orientation: ScreenOrientation::default(),
            enum_list: ListPanel::new(LIST_WIDTH),
            wt_list: ListPanel::new(WT_LIST_WIDTH).with_fitting(Fitting::KeepSuffix),
            enum_items: Vec::new(),
            envelope: ChartPanel::new(ChartKind::Envelope),
            cutoff: ChartPanel::new(ChartKind::Cutoff),
            edit_name: EditName::new(),
            popup: Popup::default(),
            msg_box: MessageBox::default(),
            primary: None,
            scope_points: scope.snapshot(),
            scope,
            wt_scope: WtScope::new(),
            palette: Palette::from_system_colour(&system_colour),
            system_colour,
        };
        state.refresh_colour();
        state
    }

    /// Every panel drawn in the accent colour; the scopes read `palette` directly
    fn themed_mut(&mut self) -> [&mut dyn Themed; 16] {
        [
            &mut self.status_bar,
            &mut self.multi_status_bar,
            &mut self.value_bar,
            &mut self.bottom_bar,
            &mut self.background,
            &mut self.boot_warning,
            &mut self.main_list,
            &mut self.params_list,
            &mut self.param_value,
            &mut self.enum_list,
            &mut self.wt_list,
            &mut self.envelope,
            &mut self.cutoff,
            &mut self.edit_name,
            &mut self.popup,
            &mut self.msg_box,
        ]
    }

    /// Change the accent colour and re-theme every panel
    pub fn set_system_colour(&mut self, colour: SystemColour) {
        self.palette = Palette::from_system_colour(&colour);
        self.system_colour = colour;
        self.refresh_colour();
    }

    fn refresh_colour(&mut self) {
        let palette = self.palette;
        for panel in self.themed_mut() {
            panel.refresh_colour(&palette);
        }
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.primary == Some(panel)
    }

    /// Hide `panel` if it is the primary one
    pub fn hide_panel(&mut self, panel: Panel) {
        if self.primary == Some(panel) {
            self.primary = None;
        }
    }

    /// Show the logo or the scope behind or instead of other content
    ///
    /// With `show` the scope (if enabled) replaces the logo in the
    /// foreground. Without, the logo is hidden and the scope (if enabled)
    /// runs in the background behind the panels.
    pub fn show_default_background(&mut self, show: bool, show_scope: bool) {
        let scope_on = show_scope && self.scope.mode() != ScopeMode::Off;

        if !scope_on {
            self.scope.clear();
            self.scope.hide(true);
        } else if show {
            self.scope.show_with(DisplayMode::Foreground);
        } else {
            self.scope.show_with(DisplayMode::Background);
        }
        self.background.set_visible(show && !scope_on);
    }

    /// Hide the enum and wavetable lists, stopping any wavetable stream
    pub fn hide_enum_panels(&mut self) {
        self.wt_scope.unload();
        self.wt_scope.hide();
        if matches!(self.primary, Some(Panel::EnumList | Panel::WavetableList)) {
            self.primary = None;
        }
    }

    /// Hide the parameter list and value
    pub fn hide_param_panel(&mut self) {
        self.hide_panel(Panel::Param);
    }

    pub fn is_enum_visible(&self) -> bool {
        matches!(self.primary, Some(Panel::EnumList | Panel::WavetableList))
    }

    /// Show `panel` as the primary content, leaving the enum lists if needed
    pub fn set_primary(&mut self, panel: Panel) {
        if self.is_enum_visible() && !matches!(panel, Panel::EnumList | Panel::WavetableList) {
            self.hide_enum_panels();
        }
        if panel != Panel::EditName {
            self.edit_name.hide();
        }
        self.primary = Some(panel);
    }

    /// Clear the primary content region
    pub fn clear_primary(&mut self) {
        if self.is_enum_visible() {
            self.hide_enum_panels();
        }
        self.edit_name.hide();
        self.primary = None;
    }

    pub fn chart_mut(&mut self, kind: ChartKind) -> &mut ChartPanel {
        match kind {
            ChartKind::Envelope => &mut self.envelope,
            ChartKind::Cutoff => &mut self.cutoff,
        }
    }

    /// Read the scope through its current buffer for this frame
    pub fn sync_scope(&mut self) {
        self.scope_points = self.scope.snapshot();
    }
}
