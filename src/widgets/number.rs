//! Number widget: drag, stepper zones and a typed-value prompt, with
//! min/max clamping and optional odd/even parity constraints.
//!
//! Parity widgets count in whole steps: construction forces
//! `precision = 0, step = 1`, pulls a violating bound one unit inward
//! and bumps a violating initial value up by one before clamping. Every
//! later mutation re-applies the constraint, shifting by exactly one
//! unit in the direction of travel, so a committed value always sits
//! inside `[limit_minimum, limit_maximum]` on the right parity.

use egui::{pos2, Pos2};
use log::{debug, warn};

use crate::config::{CLICK_TIME_MS, WIDGET_MARGIN};
use crate::core::canvas::{CanvasServices, PointerEvent, PointerKind, ReplyToken};
use crate::core::surface::{Surface, TextAlign};
use crate::entities::{NodeBody, Value};

use super::{
    draw_frame, draw_label, draw_step_arrows, step_zone, value_style, Widget, WidgetCore,
    WidgetSeed,
};

pub struct NumberWidget {
    core: WidgetCore,
    precision: u32,
    step: f64,
    minimum: f64,
    maximum: f64,
    only_odd: bool,
    only_even: bool,
    limit_minimum: f64,
    limit_maximum: f64,
}

impl NumberWidget {
    pub fn new(seed: WidgetSeed) -> Self {
        let mut precision = seed.options.precision.unwrap_or(0);
        let mut step = seed
            .options
            .step
            .unwrap_or_else(|| 10f64.powi(-(precision as i32)));
        let minimum = seed.options.min.unwrap_or(f64::MIN);
        let maximum = seed.options.max.unwrap_or(f64::MAX);
        let only_odd = seed.options.only_odd;
        let mut only_even = seed.options.only_even;

        if only_odd && only_even {
            warn!("number widget: onlyOdd and onlyEven are mutually exclusive, keeping onlyOdd");
            only_even = false;
        }
        if only_odd || only_even {
            precision = 0;
            step = 1.0;
        }

        let mut widget = Self {
            core: WidgetCore::new(seed),
            precision,
            step,
            minimum,
            maximum,
            only_odd,
            only_even,
            limit_minimum: minimum,
            limit_maximum: maximum,
        };

        // pull violating bounds one unit inward
        if widget.violates_parity(minimum) {
            widget.limit_minimum = minimum + 1.0;
        }
        if widget.violates_parity(maximum) {
            widget.limit_maximum = maximum - 1.0;
        }

        // normalize the initial value: bump onto the parity, then clamp
        let mut value = widget.number();
        if widget.violates_parity(value) {
            value += 1.0;
        }
        widget.core.value = Some(Value::Number(widget.clamp(value)));

        widget
    }

    pub fn build(seed: WidgetSeed) -> Box<dyn Widget> {
        Box::new(Self::new(seed))
    }

    pub fn limits(&self) -> (f64, f64) {
        (self.limit_minimum, self.limit_maximum)
    }

    fn number(&self) -> f64 {
        self.core
            .value
            .as_ref()
            .and_then(Value::as_number)
            .unwrap_or(0.0)
    }

    fn violates_parity(&self, value: f64) -> bool {
        let even = value % 2.0 == 0.0;
        (self.only_odd && even) || (self.only_even && !even)
    }

    /// Clamp into the effective bounds; the upper bound wins when the
    /// bounds are inverted by misconfiguration.
    fn clamp(&self, value: f64) -> f64 {
        value.max(self.limit_minimum).min(self.limit_maximum)
    }

    /// Shift a parity-violating candidate one unit along the travel
    /// direction, then clamp.
    fn correct(&self, mut value: f64, direction: f64) -> f64 {
        if self.violates_parity(value) {
            if direction <= -1.0 {
                value -= 1.0;
            }
            if direction >= 1.0 {
                value += 1.0;
            }
        }
        self.clamp(value)
    }
}

impl Widget for NumberWidget {
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

        draw_frame(surface, &self.core, widget_width, y, row_height);
        if !self.core.read_only {
            draw_step_arrows(surface, &self.core, widget_width, y, row_height);
        }
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
        canvas: &mut dyn CanvasServices,
        token: ReplyToken,
    ) {
        match event.kind {
            PointerKind::Move => {
                let delta = event.delta.x as f64;
                let next = self.correct(self.number() + delta * self.step, delta);
                self.change_value(Value::Number(next), body);
            }
            PointerKind::Down => {
                let delta = step_zone(pos.x, body.size.x) as f64;
                let next = self.correct(self.number() + delta * self.step, delta);
                self.change_value(Value::Number(next), body);
            }
            PointerKind::Up => {
                let delta = step_zone(pos.x, body.size.x);
                if event.click_time_ms < CLICK_TIME_MS && delta == 0 {
                    canvas.prompt_value("Value", Value::Number(self.number()), token);
                }
            }
        }
    }

    /// Prompt completion: parse, parity-check (silent reject), clamp,
    /// commit.
    fn on_reply(&mut self, value: Value, body: &mut NodeBody) {
        let parsed = match &value {
            Value::Number(n) => Some(*n),
            Value::Text(text) => text.trim().parse::<f64>().ok(),
            Value::Bool(_) => None,
        };
        let Some(number) = parsed else {
            debug!("number prompt input {value:?} is not numeric, ignoring");
            return;
        };
        if self.violates_parity(number) {
            return;
        }
        self.change_value(Value::Number(self.clamp(number)), body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::canvas::testing::MockCanvas;
    use crate::widgets::{PropertyDecl, WidgetOptions};
    use egui::vec2;

    fn number_widget(default: f64, options: WidgetOptions) -> (NumberWidget, NodeBody) {
        let mut body = NodeBody::new("n");
        body.size = vec2(210.0, 100.0);
        body.props.set("count", Value::from(default));
        let widget = NumberWidget::new(WidgetSeed::for_property(
            PropertyDecl {
                name: "count".into(),
                default_value: Value::from(default),
                type_tag: "NUMBER".into(),
            },
            options,
        ));
        (widget, body)
    }

    fn odd_options(min: f64, max: f64) -> WidgetOptions {
        WidgetOptions {
            min: Some(min),
            max: Some(max),
            only_odd: true,
            ..WidgetOptions::default()
        }
    }

    fn in_bounds(widget: &NumberWidget) -> bool {
        let v = widget.number();
        let (lo, hi) = widget.limits();
        v >= lo && v <= hi && !widget.violates_parity(v)
    }

    #[test]
    fn test_construction_tightens_violating_bounds() {
        let (widget, _) = number_widget(3.0, odd_options(0.0, 10.0));
        // both bounds are even, pulled one unit inward
        assert_eq!(widget.limits(), (1.0, 9.0));
        assert_eq!(widget.number(), 3.0);
    }

    #[test]
    fn test_construction_bumps_violating_value() {
        let (widget, _) = number_widget(4.0, odd_options(0.0, 10.0));
        assert_eq!(widget.number(), 5.0);

        // bump happens before the clamp: 10 -> 11 -> clamped to 9
        let (widget, _) = number_widget(10.0, odd_options(0.0, 10.0));
        assert_eq!(widget.number(), 9.0);
        assert!(in_bounds(&widget));
    }

    #[test]
    fn test_default_step_follows_precision() {
        let (widget, _) = number_widget(
            0.0,
            WidgetOptions {
                precision: Some(2),
                ..WidgetOptions::default()
            },
        );
        assert_eq!(widget.step, 0.01);

        // parity forces whole steps regardless of precision
        let (widget, _) = number_widget(
            0.0,
            WidgetOptions {
                precision: Some(2),
                only_even: true,
                ..WidgetOptions::default()
            },
        );
        assert_eq!(widget.step, 1.0);
        assert_eq!(widget.precision, 0);
    }

    #[test]
    fn test_stepper_zones_respect_parity() {
        let (mut widget, mut body) = number_widget(3.0, odd_options(0.0, 10.0));
        let mut canvas = MockCanvas::default();

        // right zone: 3 + 1 = 4 is even, bumped up to 5
        widget.on_pointer(
            &PointerEvent::down(),
            pos2(205.0, 10.0),
            &mut body,
            &mut canvas,
            ReplyToken::new(0),
        );
        assert_eq!(widget.number(), 5.0);

        // left zone: 5 - 1 = 4 is even, bumped down to 3
        widget.on_pointer(
            &PointerEvent::down(),
            pos2(5.0, 10.0),
            &mut body,
            &mut canvas,
            ReplyToken::new(0),
        );
        assert_eq!(widget.number(), 3.0);
        assert_eq!(body.props.get_number("count"), Some(3.0));
    }

    #[test]
    fn test_middle_down_does_not_change_value() {
        let (mut widget, mut body) = number_widget(3.0, odd_options(0.0, 10.0));
        let mut canvas = MockCanvas::default();

        widget.on_pointer(
            &PointerEvent::down(),
            pos2(100.0, 10.0),
            &mut body,
            &mut canvas,
            ReplyToken::new(0),
        );

        assert_eq!(widget.number(), 3.0);
    }

    #[test]
    fn test_drag_applies_step_parity_and_clamp() {
        let (mut widget, mut body) = number_widget(3.0, odd_options(0.0, 10.0));
        let mut canvas = MockCanvas::default();

        // +4 lands on 7 (odd), no correction needed
        widget.on_pointer(
            &PointerEvent::drag(vec2(4.0, 0.0)),
            pos2(100.0, 10.0),
            &mut body,
            &mut canvas,
            ReplyToken::new(0),
        );
        assert_eq!(widget.number(), 7.0);

        // +3 lands on 10 (even), bumped along the drag to 11, clamped to 9
        widget.on_pointer(
            &PointerEvent::drag(vec2(3.0, 0.0)),
            pos2(100.0, 10.0),
            &mut body,
            &mut canvas,
            ReplyToken::new(0),
        );
        assert_eq!(widget.number(), 9.0);
        assert!(in_bounds(&widget));

        // large negative drag clamps to the tightened lower bound
        widget.on_pointer(
            &PointerEvent::drag(vec2(-100.0, 0.0)),
            pos2(100.0, 10.0),
            &mut body,
            &mut canvas,
            ReplyToken::new(0),
        );
        assert_eq!(widget.number(), 1.0);
        assert!(in_bounds(&widget));
    }

    #[test]
    fn test_short_middle_click_prompts() {
        let (mut widget, mut body) = number_widget(3.0, WidgetOptions::default());
        let mut canvas = MockCanvas::default();

        widget.on_pointer(
            &PointerEvent::up(100.0),
            pos2(100.0, 10.0),
            &mut body,
            &mut canvas,
            ReplyToken::new(0),
        );
        assert_eq!(canvas.prompts.len(), 1);
        assert_eq!(canvas.prompts[0].1, Value::Number(3.0));

        // a slow release or a zone release does not prompt
        widget.on_pointer(
            &PointerEvent::up(500.0),
            pos2(100.0, 10.0),
            &mut body,
            &mut canvas,
            ReplyToken::new(0),
        );
        widget.on_pointer(
            &PointerEvent::up(100.0),
            pos2(5.0, 10.0),
            &mut body,
            &mut canvas,
            ReplyToken::new(0),
        );
        assert_eq!(canvas.prompts.len(), 1);
    }

    #[test]
    fn test_prompt_reply_parses_clamps_and_commits() {
        let (mut widget, mut body) = number_widget(3.0, odd_options(0.0, 10.0));

        widget.on_reply(Value::from("7"), &mut body);
        assert_eq!(body.props.get_number("count"), Some(7.0));

        // out of range clamps to the tightened bound
        widget.on_reply(Value::from("99"), &mut body);
        assert_eq!(widget.number(), 9.0);
    }

    #[test]
    fn test_prompt_reply_rejects_parity_violation_and_garbage() {
        let (mut widget, mut body) = number_widget(3.0, odd_options(0.0, 10.0));

        widget.on_reply(Value::from("4"), &mut body);
        assert_eq!(widget.number(), 3.0);

        widget.on_reply(Value::from("abc"), &mut body);
        assert_eq!(widget.number(), 3.0);
        assert_eq!(body.props.get_number("count"), Some(3.0));
    }

    #[test]
    fn test_even_constraint_mirrors_odd() {
        let (widget, _) = number_widget(
            5.0,
            WidgetOptions {
                min: Some(1.0),
                max: Some(9.0),
                only_even: true,
                ..WidgetOptions::default()
            },
        );
        assert_eq!(widget.limits(), (2.0, 8.0));
        assert_eq!(widget.number(), 6.0);
        assert!(in_bounds(&widget));
    }

    #[test]
    fn test_unconstrained_bounds_default_to_extremes() {
        let (mut widget, mut body) = number_widget(0.0, WidgetOptions::default());
        let mut canvas = MockCanvas::default();

        widget.on_pointer(
            &PointerEvent::drag(vec2(-1000.0, 0.0)),
            pos2(100.0, 10.0),
            &mut body,
            &mut canvas,
            ReplyToken::new(0),
        );
        assert_eq!(widget.number(), -1000.0);
    }
}
