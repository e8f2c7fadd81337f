//! 2D drawing boundary between widgets and the host canvas.
//!
//! Widgets never touch the host painter directly; they issue primitives
//! through [`Surface`]. Coordinates are node-local (origin at the node's
//! top-left, below the title bar) - the host translates before handing
//! the surface over. This keeps the widget set renderer-agnostic: an
//! egui painter, a test recorder and an SVG exporter all fit behind the
//! same trait.

use egui::{Color32, Pos2, Rect, Stroke};

/// Horizontal anchoring for [`Surface::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Which host font a piece of text should use.
///
/// Hosts map these to concrete fonts; by convention the read-only value
/// style renders italic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// Widget and slot labels.
    Label,
    /// Editable widget values.
    Value,
    /// Values of read-only widgets.
    ValueReadOnly,
}

/// Drawing primitives a host canvas must provide.
pub trait Surface {
    /// Begin an isolated style scope. Every widget draw is wrapped in a
    /// `push_state`/`pop_state` pair so ambient painter state (clip,
    /// alpha, font) set by one widget never leaks into the next.
    fn push_state(&mut self);

    /// End the scope opened by the matching [`Surface::push_state`].
    fn pop_state(&mut self);

    /// Rounded rectangle, filled then outlined.
    fn round_rect(&mut self, rect: Rect, radius: f32, fill: Color32, stroke: Stroke);

    /// Axis-aligned filled rectangle.
    fn fill_rect(&mut self, rect: Rect, fill: Color32);

    /// Axis-aligned rectangle outline.
    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);

    /// Straight line segment.
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);

    /// Filled circle.
    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32);

    /// Filled triangle.
    fn triangle(&mut self, points: [Pos2; 3], fill: Color32);

    /// Single line of text. `pos` is the baseline start (or end, for
    /// right-aligned text).
    fn text(&mut self, pos: Pos2, align: TextAlign, text: &str, style: TextStyle, color: Color32);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// One recorded primitive, in call order.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum DrawCmd {
        PushState,
        PopState,
        RoundRect {
            rect: Rect,
            radius: f32,
            fill: Color32,
        },
        FillRect {
            rect: Rect,
            fill: Color32,
        },
        StrokeRect {
            rect: Rect,
        },
        Line {
            from: Pos2,
            to: Pos2,
        },
        Circle {
            center: Pos2,
            radius: f32,
            fill: Color32,
        },
        Triangle {
            points: [Pos2; 3],
        },
        Text {
            pos: Pos2,
            align: TextAlign,
            text: String,
            style: TextStyle,
            color: Color32,
        },
    }

    /// Surface that records every primitive for assertions.
    #[derive(Default)]
    pub(crate) struct RecordingSurface {
        pub commands: Vec<DrawCmd>,
    }

    impl Surface for RecordingSurface {
        fn push_state(&mut self) {
            self.commands.push(DrawCmd::PushState);
        }

        fn pop_state(&mut self) {
            self.commands.push(DrawCmd::PopState);
        }

        fn round_rect(&mut self, rect: Rect, radius: f32, fill: Color32, _stroke: Stroke) {
            self.commands.push(DrawCmd::RoundRect { rect, radius, fill });
        }

        fn fill_rect(&mut self, rect: Rect, fill: Color32) {
            self.commands.push(DrawCmd::FillRect { rect, fill });
        }

        fn stroke_rect(&mut self, rect: Rect, _stroke: Stroke) {
            self.commands.push(DrawCmd::StrokeRect { rect });
        }

        fn line(&mut self, from: Pos2, to: Pos2, _stroke: Stroke) {
            self.commands.push(DrawCmd::Line { from, to });
        }

        fn circle(&mut self, center: Pos2, radius: f32, fill: Color32) {
            self.commands.push(DrawCmd::Circle {
                center,
                radius,
                fill,
            });
        }

        fn triangle(&mut self, points: [Pos2; 3], fill: Color32) {
            self.commands.push(DrawCmd::Triangle { points });
        }

        fn text(
            &mut self,
            pos: Pos2,
            align: TextAlign,
            text: &str,
            style: TextStyle,
            color: Color32,
        ) {
            self.commands.push(DrawCmd::Text {
                pos,
                align,
                text: text.to_string(),
                style,
                color,
            });
        }
    }
}
