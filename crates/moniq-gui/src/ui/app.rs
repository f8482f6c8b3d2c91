//! Main application state and iced implementation

use iced::widget::{center, column, container, opaque, row, Space, Stack};
use iced::{time, Background, Color, Element, Length, Subscription, Task, Theme};
use moniq_core::capture::CaptureSequence;
use moniq_core::config::SystemColour;
use moniq_core::protocol::ScreenOrientation;
use moniq_core::scope::{SoundScope, SCOPE_REFRESH_INTERVAL, WT_REFRESH_INTERVAL};
use moniq_core::ControlMessage;
use moniq_widgets::panels::{
    backdrop_view, bottom_bar_view, chart_panel_view, edit_name_view, list_view, message_box_view,
    multi_status_bar_view, popup_view, status_bar_view, value_bar_view, value_panel_view,
    ChartPanel, BUSY_FRAME_INTERVAL,
};
use moniq_widgets::scope_view;
use moniq_widgets::theme::{MAIN_AREA_HEIGHT, STATUS_BAR_HEIGHT, VISIBLE_LCD_HEIGHT, VISIBLE_LCD_WIDTH};

use super::handlers;
use super::message::Message;
use super::state::{Panel, ScreenState};
use crate::config::GuiConfig;

/// Height of the sound scope drawn under the status bar
pub const SCOPE_HEIGHT: f32 = VISIBLE_LCD_HEIGHT - STATUS_BAR_HEIGHT;

pub struct MoniqApp {
    pub screen: ScreenState,
    pub config: GuiConfig,
    pub capture: CaptureSequence,
    /// Decoded control messages from the IPC receiver
    pub(crate) control_rx: Option<flume::Receiver<ControlMessage>>,
}

impl MoniqApp {
    pub fn new(
        config: GuiConfig,
        system_colour: SystemColour,
        scope: SoundScope,
        control_rx: Option<flume::Receiver<ControlMessage>>,
    ) -> Self {
        Self {
            screen: ScreenState::new(scope, system_colour),
            capture: CaptureSequence::new(config.capture_dir.clone()),
            config,
            control_rx,
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => handlers::tick::handle(self),
            Message::WavetableTick => handlers::enum_params::wavetable_tick(self),
            Message::BusyTick => handlers::modals::busy_tick(self),
        }
    }

    /// Render clock always; wavetable and busy timers only while needed
    pub fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![time::every(SCOPE_REFRESH_INTERVAL).map(|_| Message::Tick)];
        if self.screen.wt_scope.is_streaming() && self.screen.wt_scope.is_visible() {
            subscriptions.push(time::every(WT_REFRESH_INTERVAL).map(|_| Message::WavetableTick));
        }
        if self.screen.msg_box.is_busy() {
            subscriptions.push(time::every(BUSY_FRAME_INTERVAL).map(|_| Message::BusyTick));
        }
        Subscription::batch(subscriptions)
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn view(&self) -> Element<'_, Message> {
        let screen = &self.screen;

        let body: Element<'_, Message> = if screen.boot_warning.is_visible() {
            backdrop_view(&screen.boot_warning)
        } else {
            let mut main_area = column![];
            if screen.multi_status_bar.is_visible() {
                main_area = main_area.push(multi_status_bar_view(&screen.multi_status_bar));
            } else if screen.value_bar.is_visible() {
                main_area = main_area.push(value_bar_view(&screen.value_bar));
            }
            main_area = main_area.push(self.view_primary());

            let mut layers: Vec<Element<'_, Message>> = Vec::new();
            if screen.background.is_visible() {
                layers.push(backdrop_view(&screen.background));
            }
            if screen.scope.is_visible() {
                let colour = screen.palette.accent_alpha(screen.scope.alpha());
                layers.push(scope_view(&screen.scope_points, colour));
            }
            layers.push(main_area.height(Length::Fill).into());

            let mut content = column![
                status_bar_view(&screen.status_bar),
                Stack::with_children(layers)
                    .width(Length::Fill)
                    .height(Length::Fill),
            ];
            if screen.bottom_bar.is_visible() {
                content = content.push(bottom_bar_view(&screen.bottom_bar));
            }
            content.into()
        };

        let base: Element<'_, Message> = container(body)
            .width(Length::Fixed(VISIBLE_LCD_WIDTH))
            .height(Length::Fixed(VISIBLE_LCD_HEIGHT))
            .style(|_| container::Style {
                background: Some(Background::Color(Color::BLACK)),
                ..Default::default()
            })
            .into();

        // Message box above the popup above everything else
        let mut overlays: Vec<Element<'_, Message>> = vec![base];
        if screen.popup.is_visible() {
            overlays.push(center(opaque(popup_view(&screen.popup))).into());
        }
        if screen.msg_box.is_visible() {
            overlays.push(center(opaque(message_box_view(&screen.msg_box))).into());
        }
        if overlays.len() == 1 {
            overlays.remove(0)
        } else {
            Stack::with_children(overlays).into()
        }
    }

    /// The primary content region
    fn view_primary(&self) -> Element<'_, Message> {
        let screen = &self.screen;
        match screen.primary {
            None => Space::new().width(Length::Fill).height(Length::Fill).into(),
            Some(Panel::MainList) => list_view(&screen.main_list),
            Some(Panel::EnumList) => list_view(&screen.enum_list),
            Some(Panel::EditName) => edit_name_view(&screen.edit_name),
            Some(Panel::Param) => {
                let list = list_view(&screen.params_list);
                let value: Element<'_, Message> = if screen.show_param_value {
                    value_panel_view(&screen.param_value)
                } else {
                    Space::new().width(Length::Fill).into()
                };
                match screen.orientation {
                    ScreenOrientation::LeftRight => row![list, value].into(),
                    ScreenOrientation::RightLeft => row![value, list].into(),
                }
            }
            Some(Panel::WavetableList) => {
                let viewer: Element<'_, Message> = if screen.wt_scope.is_visible() {
                    scope_view(screen.wt_scope.points(), screen.palette.accent)
                } else {
                    Space::new().width(Length::Fill).into()
                };
                row![
                    list_view(&screen.wt_list),
                    container(viewer)
                        .width(Length::Fill)
                        .height(Length::Fixed(MAIN_AREA_HEIGHT))
                        .padding(16),
                ]
                .into()
            }
            Some(Panel::Envelope) => self.view_chart(&screen.envelope),
            Some(Panel::Cutoff) => self.view_chart(&screen.cutoff),
        }
    }

    fn view_chart<'a>(&'a self, chart: &'a ChartPanel) -> Element<'a, Message> {
        if chart.is_standalone() {
            return chart_panel_view(chart);
        }
        row![
            list_view(&self.screen.params_list),
            column![
                chart_panel_view(chart),
                value_panel_view(&self.screen.param_value),
            ]
            .width(Length::Fill),
        ]
        .into()
    }
}

