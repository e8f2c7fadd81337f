//! Slider widget: value mapped linearly to the pointer position along
//! the track, updated continuously while pressed and while dragging.

use egui::{pos2, vec2, Pos2, Rect, Stroke};

use crate::config::{SLIDER_DEFAULT_PRECISION, SLIDER_TRACK_INSET, WIDGET_MARGIN};
use crate::core::canvas::{CanvasServices, PointerEvent, PointerKind, ReplyToken};
use crate::core::surface::{Surface, TextAlign};
use crate::entities::{NodeBody, Value};

use super::{draw_label, value_style, Widget, WidgetCore, WidgetSeed};

pub struct SliderWidget {
    core: WidgetCore,
    minimum: f64,
    maximum: f64,
    precision: u32,
}

impl SliderWidget {
    pub fn new(seed: WidgetSeed) -> Self {
        let minimum = seed.options.min.unwrap_or(0.0);
        let maximum = seed.options.max.unwrap_or(1.0);
        let precision = seed.options.precision.unwrap_or(SLIDER_DEFAULT_PRECISION);
        Self {
            core: WidgetCore::new(seed),
            minimum,
            maximum,
            precision,
        }
    }

    pub fn build(seed: WidgetSeed) -> Box<dyn Widget> {
        Box::new(Self::new(seed))
    }

    fn number(&self) -> f64 {
        self.core
            .value
            .as_ref()
            .and_then(Value::as_number)
            .unwrap_or(self.minimum)
    }

    /// Pointer x -> value, clamped to the track.
    fn value_at(&self, x: f32, node_width: f32) -> f64 {
        let track = node_width - SLIDER_TRACK_INSET * 2.0;
        let normalized = ((x - SLIDER_TRACK_INSET) / track).clamp(0.0, 1.0) as f64;
        self.minimum + (self.maximum - self.minimum) * normalized
    }
}

impl Widget for SliderWidget {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn draw_content(
        &self,
        surface: &mut dyn Surface,
        _body: &NodeBody,
        widget_width: f32,
        y: f32,
        row_height: f32,
    ) {
        let draw_width = widget_width - WIDGET_MARGIN * 2.0;
        let track = Rect::from_min_size(pos2(WIDGET_MARGIN, y), vec2(draw_width, row_height));

        surface.fill_rect(track, self.core.background_color);

        // filled portion up to the current value
        let range = self.maximum - self.minimum;
        let normalized = if range != 0.0 {
            ((self.number() - self.minimum) / range) as f32
        } else {
            0.0
        };
        surface.fill_rect(
            Rect::from_min_size(
                pos2(WIDGET_MARGIN, y),
                vec2(normalized * draw_width, row_height),
            ),
            self.core.secondary_value_color,
        );

        surface.stroke_rect(track, Stroke::new(1.0, self.core.outline_color));

        draw_label(surface, &self.core, y, row_height);

        surface.text(
            pos2(draw_width - 20.0, y + row_height * 0.7),
            TextAlign::Right,
            &format!("{:.*}", self.precision as usize, self.number()),
            value_style(&self.core),
            self.core.value_color,
        );
    }

    fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        pos: Pos2,
        body: &mut NodeBody,
        _canvas: &mut dyn CanvasServices,
        _token: ReplyToken,
    ) {
        if matches!(event.kind, PointerKind::Down | PointerKind::Move) {
            let value = self.value_at(pos.x, body.size.x);
            self.change_value(Value::Number(value), body);
        }
    }
}
