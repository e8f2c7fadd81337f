//! Bool widget: toggle with a status indicator and on/off labels.

use egui::{pos2, Pos2};

use crate::config::{BOOL_OFF_COLOR, BOOL_ON_COLOR, WIDGET_MARGIN};
use crate::core::canvas::{CanvasServices, PointerEvent, PointerKind, ReplyToken};
use crate::core::surface::{Surface, TextAlign};
use crate::entities::{NodeBody, Value};

use super::{draw_frame, draw_label, value_style, Widget, WidgetCore, WidgetSeed};

pub struct BoolWidget {
    core: WidgetCore,
    on_label: String,
    off_label: String,
}

impl BoolWidget {
    pub fn new(mut seed: WidgetSeed) -> Self {
        let on_label = seed.options.on_label.take().unwrap_or_else(|| "true".into());
        let off_label = seed
            .options
            .off_label
            .take()
            .unwrap_or_else(|| "false".into());
        Self {
            core: WidgetCore::new(seed),
            on_label,
            off_label,
        }
    }

    pub fn build(seed: WidgetSeed) -> Box<dyn Widget> {
        Box::new(Self::new(seed))
    }

    fn is_on(&self) -> bool {
        self.core.value.as_ref().is_some_and(Value::is_truthy)
    }
}

impl Widget for BoolWidget {
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
        let on = self.is_on();

        draw_frame(surface, &self.core, widget_width, y, row_height);

        // status indicator at the right end of the frame
        surface.circle(
            pos2(draw_width + 4.0, y + row_height * 0.5),
            row_height * 0.25,
            if on { BOOL_ON_COLOR } else { BOOL_OFF_COLOR },
        );

        draw_label(surface, &self.core, y, row_height);

        surface.text(
            pos2(draw_width - 20.0, y + row_height * 0.7),
            TextAlign::Right,
            if on { &self.on_label } else { &self.off_label },
            value_style(&self.core),
            if on {
                self.core.value_color
            } else {
                self.core.secondary_text_color
            },
        );
    }

    fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        _pos: Pos2,
        body: &mut NodeBody,
        _canvas: &mut dyn CanvasServices,
        _token: ReplyToken,
    ) {
        if event.kind == PointerKind::Down {
            let next = !self.is_on();
            self.change_value(Value::Bool(next), body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::canvas::testing::MockCanvas;
    use crate::widgets::{PropertyDecl, WidgetOptions};

    fn widget_and_body() -> (BoolWidget, NodeBody) {
        let mut body = NodeBody::new("gate");
        body.props.set("armed", Value::from(false));
        let widget = BoolWidget::new(WidgetSeed::for_property(
            PropertyDecl {
                name: "armed".into(),
                default_value: Value::from(false),
                type_tag: "BOOL".into(),
            },
            WidgetOptions::default(),
        ));
        (widget, body)
    }

    #[test]
    fn test_pointer_down_toggles() {
        let (mut widget, mut body) = widget_and_body();
        let mut canvas = MockCanvas::default();

        widget.on_pointer(
            &PointerEvent::down(),
            pos2(50.0, 10.0),
            &mut body,
            &mut canvas,
            ReplyToken::new(0),
        );
        assert_eq!(widget.core.value, Some(Value::Bool(true)));
        assert_eq!(body.props.get_bool("armed"), Some(true));

        widget.on_pointer(
            &PointerEvent::down(),
            pos2(50.0, 10.0),
            &mut body,
            &mut canvas,
            ReplyToken::new(0),
        );
        assert_eq!(body.props.get_bool("armed"), Some(false));
    }

    #[test]
    fn test_move_does_not_toggle() {
        let (mut widget, mut body) = widget_and_body();
        let mut canvas = MockCanvas::default();

        widget.on_pointer(
            &PointerEvent::drag(egui::vec2(3.0, 0.0)),
            pos2(50.0, 10.0),
            &mut body,
            &mut canvas,
            ReplyToken::new(0),
        );

        assert_eq!(widget.core.value, Some(Value::Bool(false)));
    }

    #[test]
    fn test_truthy_numeric_default_reads_as_on() {
        let widget = BoolWidget::new(WidgetSeed::for_property(
            PropertyDecl {
                name: "flag".into(),
                default_value: Value::from(3),
                type_tag: "BOOL".into(),
            },
            WidgetOptions::default(),
        ));
        assert!(widget.is_on());
    }
}
