//! String widget: displays the stringified value, edits through the
//! host's text prompt.

use egui::{pos2, Pos2, Vec2};

use crate::config::{NODE_WIDGET_HEIGHT, WIDGET_MARGIN, WIDGET_TEXT_PADDING};
use crate::core::canvas::{CanvasServices, PointerEvent, PointerKind, ReplyToken, TextMetrics};
use crate::core::surface::{Surface, TextAlign};
use crate::entities::{NodeBody, Value};

use super::{draw_frame, draw_label, value_style, Widget, WidgetCore, WidgetSeed};

pub struct StringWidget {
    core: WidgetCore,
}

impl StringWidget {
    pub fn new(seed: WidgetSeed) -> Self {
        Self {
            core: WidgetCore::new(seed),
        }
    }

    pub fn build(seed: WidgetSeed) -> Box<dyn Widget> {
        Box::new(Self::new(seed))
    }
}

impl Widget for StringWidget {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    /// Sized for the current display string, so committing a longer
    /// value grows the widget (and, with auto-resize, the node).
    fn measure(&self, metrics: &dyn TextMetrics) -> Vec2 {
        let width = metrics.text_width(&self.core.value_text())
            + metrics.text_width(&self.core.label)
            + WIDGET_TEXT_PADDING;
        Vec2::new(width, NODE_WIDGET_HEIGHT)
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

        draw_frame(surface, &self.core, widget_width, y, row_height);
        draw_label(surface, &self.core, y, row_height);

        surface.text(
            pos2(draw_width, y + row_height * 0.7),
            TextAlign::Right,
            &self.core.value_text(),
            value_style(&self.core),
            self.core.value_color,
        );
    }

    fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        _pos: Pos2,
        _body: &mut NodeBody,
        canvas: &mut dyn CanvasServices,
        token: ReplyToken,
    ) {
        if event.kind == PointerKind::Down {
            let current = self
                .core
                .value
                .clone()
                .unwrap_or_else(|| Value::Text(String::new()));
            canvas.prompt_value("Value", current, token);
        }
    }
}
