//! Envelope and filter cutoff chart handlers
//!
//! Both charts share the parameter layout: without related items the chart
//! fills the main area under the value bar, with items it sits beside the
//! parameter list above the value.

use iced::Task;
use moniq_core::protocol::{
    CutoffDisplay, CutoffUpdate, EnvelopeDisplay, EnvelopeUpdate, ParamDisplay, ParamUpdate,
    ParamValue,
};
use moniq_widgets::panels::ChartKind;

use crate::ui::app::MoniqApp;
use crate::ui::message::Message;
use crate::ui::state::{Panel, ScreenState};

fn panel_for(kind: ChartKind) -> Panel {
    match kind {
        ChartKind::Envelope => Panel::Envelope,
        ChartKind::Cutoff => Panel::Cutoff,
    }
}

/// Chart values are shown without their units tag
fn untagged(value: &ParamValue) -> ParamValue {
    ParamValue {
        value_tag: String::new(),
        ..value.clone()
    }
}

pub fn show_envelope(app: &mut MoniqApp, envelope: EnvelopeDisplay) -> Task<Message> {
    app.screen.envelope.set_envelope(&envelope.adsr);
    show_chart(&mut app.screen, ChartKind::Envelope, &envelope.param);
    Task::none()
}

pub fn show_cutoff(app: &mut MoniqApp, cutoff: CutoffDisplay) -> Task<Message> {
    app.screen.cutoff.set_cutoff(&cutoff.cutoff);
    show_chart(&mut app.screen, ChartKind::Cutoff, &cutoff.param);
    Task::none()
}

pub fn update_envelope(app: &mut MoniqApp, update: EnvelopeUpdate) -> Task<Message> {
    app.screen.envelope.set_envelope(&update.adsr);
    update_chart(&mut app.screen, ChartKind::Envelope, &update.param);
    Task::none()
}

pub fn update_cutoff(app: &mut MoniqApp, update: CutoffUpdate) -> Task<Message> {
    app.screen.cutoff.set_cutoff(&update.cutoff);
    update_chart(&mut app.screen, ChartKind::Cutoff, &update.param);
    Task::none()
}

fn show_chart(screen: &mut ScreenState, kind: ChartKind, param: &ParamDisplay) {
    if param.items.is_empty() {
        screen.value_bar.show_value(&untagged(&param.value));
        screen.params_list.clear();
        screen.chart_mut(kind).set_standalone(true);
        screen.show_default_background(false, false);
    } else {
        screen.status_bar.set_left_status(&param.value.name, false);
        screen.params_list.clear();
        for item in &param.items {
            screen.params_list.add_item(&item.text, true, false);
        }
        if let Some(index) = param.selected {
            screen.params_list.select(index);
        }
        screen.value_bar.hide();
        screen.param_value.set_value(&param.value, false);
        screen.show_param_value = true;
        screen.chart_mut(kind).set_standalone(false);
        screen.show_default_background(false, true);
    }

    screen.multi_status_bar.hide();
    screen.set_primary(panel_for(kind));
}

fn update_chart(screen: &mut ScreenState, kind: ChartKind, update: &ParamUpdate) {
    match update.selected.filter(|&i| i < screen.params_list.len()) {
        Some(index) => {
            screen.param_value.set_value(&update.value, false);
            screen.params_list.select(index);
            screen.chart_mut(kind).set_standalone(false);
        }
        None => {
            screen.value_bar.show_value(&untagged(&update.value));
            screen.chart_mut(kind).set_standalone(true);
            screen.show_default_background(false, false);
        }
    }
    screen.set_primary(panel_for(kind));
}
