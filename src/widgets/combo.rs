//! Combo widget: stepped selection with a drop-down menu fallback.
//!
//! The left/right edge zones step the selection, clamped at the ends; a
//! click anywhere else opens the host's choice menu. Options come either
//! as a plain ordered list (the option string is the stored value) or as
//! an ordered mapping, where the *key* is stored and its mapped text is
//! what the user sees.

use egui::{pos2, Pos2, Vec2};
use indexmap::IndexMap;
use log::warn;

use crate::config::{NODE_WIDGET_HEIGHT, WIDGET_MARGIN, WIDGET_TEXT_PADDING};
use crate::core::canvas::{CanvasServices, PointerEvent, PointerKind, ReplyToken, TextMetrics};
use crate::core::surface::{Surface, TextAlign};
use crate::entities::{NodeBody, Value};

use super::{
    draw_frame, draw_label, draw_step_arrows, step_zone, value_style, Widget, WidgetCore,
    WidgetSeed,
};

/// Option set of a combo widget.
#[derive(Debug, Clone)]
pub enum ComboValues {
    /// Ordered option strings; the string itself is the stored value.
    List(Vec<String>),
    /// Ordered key -> display text; the key is the stored value.
    Map(IndexMap<String, String>),
}

impl Default for ComboValues {
    fn default() -> Self {
        ComboValues::List(Vec::new())
    }
}

impl ComboValues {
    pub fn len(&self) -> usize {
        match self {
            ComboValues::List(items) => items.len(),
            ComboValues::Map(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Display texts, in option order.
    pub fn labels(&self) -> Vec<String> {
        match self {
            ComboValues::List(items) => items.clone(),
            ComboValues::Map(map) => map.values().cloned().collect(),
        }
    }

    /// Position of a stored value among the options.
    fn index_of(&self, value: &Value) -> Option<usize> {
        let text = value.as_text()?;
        match self {
            ComboValues::List(items) => items.iter().position(|item| item == text),
            ComboValues::Map(map) => map.keys().position(|key| key == text),
        }
    }

    /// Stored value of the option at `index`.
    fn value_at(&self, index: usize) -> Option<Value> {
        match self {
            ComboValues::List(items) => items.get(index).map(|item| Value::from(item.clone())),
            ComboValues::Map(map) => map
                .get_index(index)
                .map(|(key, _)| Value::from(key.clone())),
        }
    }

    /// Text shown for a stored value; mappings fall back to the raw key
    /// when it is not in the map.
    fn display_for(&self, value: &Value) -> String {
        match self {
            ComboValues::List(_) => value.to_string(),
            ComboValues::Map(map) => value
                .as_text()
                .and_then(|key| map.get(key))
                .cloned()
                .unwrap_or_else(|| value.to_string()),
        }
    }

    /// Stored value for a picked display text (menu completion).
    fn value_for_label(&self, label: &str) -> Option<Value> {
        match self {
            ComboValues::List(items) => items
                .iter()
                .find(|item| item.as_str() == label)
                .map(|item| Value::from(item.clone())),
            ComboValues::Map(map) => map
                .iter()
                .find(|(_, text)| text.as_str() == label)
                .map(|(key, _)| Value::from(key.clone())),
        }
    }
}

pub struct ComboWidget {
    core: WidgetCore,
    values: ComboValues,
}

impl ComboWidget {
    pub fn new(mut seed: WidgetSeed) -> Self {
        let values = seed.options.values.take().unwrap_or_default();
        Self {
            core: WidgetCore::new(seed),
            values,
        }
    }

    pub fn build(seed: WidgetSeed) -> Box<dyn Widget> {
        Box::new(Self::new(seed))
    }

    pub fn values(&self) -> &ComboValues {
        &self.values
    }

    fn step(&mut self, delta: i64, body: &mut NodeBody) {
        if self.values.is_empty() {
            return;
        }
        let current = self
            .core
            .value
            .as_ref()
            .and_then(|value| self.values.index_of(value))
            .map(|index| index as i64)
            .unwrap_or(-1);
        let index = (current + delta).clamp(0, self.values.len() as i64 - 1) as usize;
        if let Some(next) = self.values.value_at(index) {
            self.change_value(next, body);
        }
    }
}

impl Widget for ComboWidget {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    /// Sized for the widest option so stepping never changes the width.
    fn measure(&self, metrics: &dyn TextMetrics) -> Vec2 {
        let widest = self
            .values
            .labels()
            .iter()
            .map(|label| metrics.text_width(label))
            .fold(0.0f32, f32::max);
        let width = widest + metrics.text_width(&self.core.label) + WIDGET_TEXT_PADDING;
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
        draw_step_arrows(surface, &self.core, widget_width, y, row_height);
        draw_label(surface, &self.core, y, row_height);

        let display = self
            .core
            .value
            .as_ref()
            .map(|value| self.values.display_for(value))
            .unwrap_or_default();
        surface.text(
            pos2(draw_width - 20.0, y + row_height * 0.7),
            TextAlign::Right,
            &display,
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
        if event.kind != PointerKind::Down {
            return;
        }
        let delta = step_zone(pos.x, body.size.x);
        if delta != 0 {
            self.step(delta as i64, body);
        } else {
            canvas.open_menu(self.values.labels(), token);
        }
    }

    /// Menu completion: map the picked display text back to its stored
    /// value before committing.
    fn on_reply(&mut self, value: Value, body: &mut NodeBody) {
        let Some(picked) = value.as_text() else {
            return;
        };
        match self.values.value_for_label(picked) {
            Some(resolved) => self.change_value(resolved, body),
            None => warn!("combo menu reply {picked:?} matches no option"),
        }
    }
}
