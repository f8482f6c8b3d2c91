//! Canvas programs for the scope and chart panels
//!
//! Both draw series in normalized chart units, -1.0..=1.0 on each axis with
//! +y up, mapped onto the canvas bounds.

use iced::widget::canvas::{Frame, Geometry, Path, Program, Stroke};
use iced::widget::Canvas;
use iced::{mouse, Color, Element, Length, Rectangle, Size, Theme};
use moniq_core::chart::{Point, CHART_FLOOR};

/// Line width for scopes and charts
pub const LINE_WIDTH: f32 = 4.0;

/// Alpha of the area under a chart line
pub const CHART_FILL_ALPHA: f32 = 0.5;

/// Map a chart-space point to canvas pixels
pub fn to_canvas(p: Point, size: Size) -> iced::Point {
    iced::Point::new((p.x + 1.0) * 0.5 * size.width, (1.0 - p.y) * 0.5 * size.height)
}

fn polyline(points: &[Point], size: Size) -> Path {
    Path::new(|b| {
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            b.move_to(to_canvas(*first, size));
            for p in iter {
                b.line_to(to_canvas(*p, size));
            }
        }
    })
}

/// Line strip through the scope points
pub struct ScopeCanvas<'a> {
    pub points: &'a [Point],
    pub colour: Color,
}

impl<'a, Message> Program<Message> for ScopeCanvas<'a> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        if self.points.len() > 1 {
            frame.stroke(
                &polyline(self.points, bounds.size()),
                Stroke::default().with_color(self.colour).with_width(LINE_WIDTH),
            );
        }
        vec![frame.into_geometry()]
    }
}

/// Scope element filling its container
pub fn scope_view<'a, Message: 'a>(points: &'a [Point], colour: Color) -> Element<'a, Message> {
    Canvas::new(ScopeCanvas { points, colour })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Chart line with the area down to the chart floor filled
pub struct ChartCanvas<'a> {
    pub points: &'a [Point],
    pub colour: Color,
}

impl<'a, Message> Program<Message> for ChartCanvas<'a> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let size = bounds.size();

        if let (Some(first), Some(last)) = (self.points.first(), self.points.last()) {
            let area = Path::new(|b| {
                b.move_to(to_canvas(Point::new(first.x, CHART_FLOOR), size));
                for p in self.points {
                    b.line_to(to_canvas(*p, size));
                }
                b.line_to(to_canvas(Point::new(last.x, CHART_FLOOR), size));
                b.close();
            });
            frame.fill(&area, Color { a: CHART_FILL_ALPHA, ..self.colour });
            frame.stroke(
                &polyline(self.points, size),
                Stroke::default().with_color(self.colour).with_width(LINE_WIDTH),
            );
        }

        vec![frame.into_geometry()]
    }
}

pub fn chart_view<'a, Message: 'a>(
    points: &'a [Point],
    colour: Color,
    width: Length,
    height: Length,
) -> Element<'a, Message> {
    Canvas::new(ChartCanvas { points, colour })
        .width(width)
        .height(height)
        .into()
}

/// Frames in one busy-indicator cycle
pub const BUSY_FRAMES: usize = 12;

/// Busy indicator: a ring of dots with one bright dot advancing per frame
pub struct BusyCanvas {
    pub frame_index: usize,
    pub colour: Color,
    pub dimmed: Color,
}

impl<Message> Program<Message> for BusyCanvas {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let center = frame.center();
        let radius = bounds.width.min(bounds.height) * 0.4;
        let dot = radius * 0.18;

        for i in 0..BUSY_FRAMES {
            let angle = i as f32 / BUSY_FRAMES as f32 * std::f32::consts::TAU;
            let pos = iced::Point::new(center.x + radius * angle.sin(), center.y - radius * angle.cos());
            let colour = if i == self.frame_index % BUSY_FRAMES {
                self.colour
            } else {
                self.dimmed
            };
            frame.fill(&Path::circle(pos, dot), colour);
        }

        vec![frame.into_geometry()]
    }
}

pub fn busy_view<'a, Message: 'a>(frame_index: usize, colour: Color, dimmed: Color, size: f32) -> Element<'a, Message> {
    Canvas::new(BusyCanvas { frame_index, colour, dimmed })
        .width(Length::Fixed(size))
        .height(Length::Fixed(size))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_canvas_maps_corners() {
        let size = Size::new(400.0, 200.0);
        assert_eq!(to_canvas(Point::new(-1.0, 1.0), size), iced::Point::new(0.0, 0.0));
        assert_eq!(to_canvas(Point::new(1.0, -1.0), size), iced::Point::new(400.0, 200.0));
        assert_eq!(to_canvas(Point::ORIGIN, size), iced::Point::new(200.0, 100.0));
    }
}
