//! Host canvas services: text measurement, zoom, connector palette and
//! modal prompt/menu collaborators.
//!
//! Prompts and menus are modal from the user's point of view but the
//! widget never blocks on them: it hands the host a [`ReplyToken`] and
//! returns. When the user confirms, the host calls
//! [`Node::deliver_reply`](crate::entities::Node::deliver_reply) with the
//! same token and the chosen value, which re-enters the value-change
//! protocol as an ordinary event. There is no cancellation primitive; a
//! newer prompt from the same widget simply supersedes the older one.

use egui::{Color32, Vec2};

use crate::config::{LINK_OFF_COLOR, LINK_ON_COLOR, NODE_TEXT_SIZE, TEXT_WIDTH_FACTOR};
use crate::entities::Value;

/// Text measurement primitive.
pub trait TextMetrics {
    /// Width in canvas units of `text` rendered in the host's node font.
    fn text_width(&self, text: &str) -> f32;
}

/// Character-cell width estimate: glyph count x font size x average
/// aspect. Good enough for layout when no font pipeline is around
/// (headless hosts, tests); hosts with real font metrics should supply
/// their own [`TextMetrics`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTextMetrics;

impl TextMetrics for ApproxTextMetrics {
    fn text_width(&self, text: &str) -> f32 {
        NODE_TEXT_SIZE * text.chars().count() as f32 * TEXT_WIDTH_FACTOR
    }
}

/// Default connector dot colors, by side and link state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorColors {
    pub input_on: Color32,
    pub input_off: Color32,
    pub output_on: Color32,
    pub output_off: Color32,
}

impl Default for ConnectorColors {
    fn default() -> Self {
        Self {
            input_on: LINK_ON_COLOR,
            input_off: LINK_OFF_COLOR,
            output_on: LINK_ON_COLOR,
            output_off: LINK_OFF_COLOR,
        }
    }
}

/// Pointer event phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// Pointer event forwarded by the host to the widget under the cursor.
///
/// Positions travel separately (node-local); the event carries only the
/// per-frame drag delta and, on release, how long the button was held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Drag delta since the previous `Move`, in canvas units.
    pub delta: Vec2,
    /// Press duration in milliseconds; only meaningful on `Up`.
    pub click_time_ms: f32,
}

impl PointerEvent {
    pub fn down() -> Self {
        Self {
            kind: PointerKind::Down,
            delta: Vec2::ZERO,
            click_time_ms: 0.0,
        }
    }

    pub fn drag(delta: Vec2) -> Self {
        Self {
            kind: PointerKind::Move,
            delta,
            click_time_ms: 0.0,
        }
    }

    pub fn up(click_time_ms: f32) -> Self {
        Self {
            kind: PointerKind::Up,
            delta: Vec2::ZERO,
            click_time_ms,
        }
    }
}

/// Identifies the widget awaiting a prompt or menu completion.
///
/// Opaque to the host: it only carries the token from the service call
/// back into [`Node::deliver_reply`](crate::entities::Node::deliver_reply).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyToken {
    pub(crate) widget: usize,
}

impl ReplyToken {
    pub(crate) fn new(widget: usize) -> Self {
        Self { widget }
    }
}

/// Environment and modal services the host canvas provides.
pub trait CanvasServices {
    /// Text measurement used for node and widget sizing.
    fn metrics(&self) -> &dyn TextMetrics;

    /// Current viewport zoom. Below
    /// [`LOW_DETAIL_ZOOM`](crate::config::LOW_DETAIL_ZOOM) connector
    /// rendering degrades.
    fn zoom(&self) -> f32 {
        1.0
    }

    /// Connector dot palette.
    fn connector_colors(&self) -> ConnectorColors {
        ConnectorColors::default()
    }

    /// Open a modal value-entry prompt. The host completes it later via
    /// `Node::deliver_reply(token, value, ..)`.
    fn prompt_value(&mut self, label: &str, current: Value, token: ReplyToken);

    /// Show a choice menu. The host completes it later via
    /// `Node::deliver_reply(token, Value::Text(picked), ..)`.
    fn open_menu(&mut self, entries: Vec<String>, token: ReplyToken);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Canvas double that records prompt/menu requests.
    pub(crate) struct MockCanvas {
        pub metrics: ApproxTextMetrics,
        pub zoom: f32,
        pub prompts: Vec<(String, Value, ReplyToken)>,
        pub menus: Vec<(Vec<String>, ReplyToken)>,
    }

    impl Default for MockCanvas {
        fn default() -> Self {
            Self {
                metrics: ApproxTextMetrics,
                zoom: 1.0,
                prompts: Vec::new(),
                menus: Vec::new(),
            }
        }
    }

    impl CanvasServices for MockCanvas {
        fn metrics(&self) -> &dyn TextMetrics {
            &self.metrics
        }

        fn zoom(&self) -> f32 {
            self.zoom
        }

        fn prompt_value(&mut self, label: &str, current: Value, token: ReplyToken) {
            self.prompts.push((label.to_string(), current, token));
        }

        fn open_menu(&mut self, entries: Vec<String>, token: ReplyToken) {
            self.menus.push((entries, token));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_text_width() {
        let metrics = ApproxTextMetrics;
        assert_eq!(metrics.text_width(""), 0.0);
        assert_eq!(metrics.text_width("abc"), 3.0 * NODE_TEXT_SIZE * TEXT_WIDTH_FACTOR);
        // chars, not bytes
        assert_eq!(metrics.text_width("äöü"), metrics.text_width("abc"));
    }
}
