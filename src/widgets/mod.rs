//! Widget contract: shared state, construction options and the
//! value-change protocol.
//!
//! Every widget variant implements [`Widget`]; the trait's default
//! methods carry the behavior all variants share (draw guard, pointer
//! gating, the change protocol) while variants override the hooks
//! (`measure`, `draw_content`, `handle_pointer`, `on_reply`).
//!
//! # Value-change protocol
//!
//! [`Widget::change_value`] is the single mutation entry point, whether
//! the change comes from a pointer gesture, a prompt completion or a
//! status feed:
//!
//! 1. `validate_change` hook; default rejects a value equal to the
//!    current one (no redundant notifications)
//! 2. the configured change callback may veto
//! 3. commit to the widget
//! 4. propagate into the bound node property, if it exists
//! 5. queue a node resize when the widget asks for it
//! 6. mark the node dirty for redraw
//!
//! Validation and veto run strictly before the commit, so a rejection
//! leaves every piece of state untouched; propagation and resize run
//! strictly after, so observers always see the final value.

pub mod blank;
pub mod boolean;
pub mod collection;
pub mod combo;
pub mod number;
pub mod separator;
pub mod slider;
pub mod string;

pub use blank::BlankWidget;
pub use boolean::BoolWidget;
pub use collection::{widget_registry, WidgetRegistry};
pub use combo::{ComboValues, ComboWidget};
pub use number::NumberWidget;
pub use separator::SeparatorWidget;
pub use slider::SliderWidget;
pub use string::StringWidget;

use egui::{pos2, vec2, Color32, Pos2, Rect, Stroke, Vec2};

use crate::config::{
    NODE_WIDGET_HEIGHT, STEP_ZONE_WIDTH, WIDGET_BG_COLOR, WIDGET_MARGIN, WIDGET_OUTLINE_COLOR,
    WIDGET_SECONDARY_TEXT_COLOR, WIDGET_SECONDARY_VALUE_COLOR, WIDGET_TEXT_COLOR,
    WIDGET_TEXT_PADDING,
};
use crate::core::canvas::{CanvasServices, PointerEvent, ReplyToken, TextMetrics};
use crate::core::surface::{Surface, TextAlign, TextStyle};
use crate::entities::{NodeBody, Value};

/// Veto-capable change listener. Runs before the commit; returning
/// `false` aborts the change with no state mutation.
pub type ChangeCallback = Box<dyn FnMut(&Value, &mut NodeBody) -> bool>;

/// Constructor signature stored in the widget registry.
pub type WidgetCtor = fn(WidgetSeed) -> Box<dyn Widget>;

/// The node property a widget is being bound to.
#[derive(Debug, Clone)]
pub struct PropertyDecl {
    pub name: String,
    pub default_value: Value,
    pub type_tag: String,
}

/// Everything a widget constructor receives: the bound property (absent
/// for unbound/content widgets) plus caller options.
pub struct WidgetSeed {
    pub property: Option<PropertyDecl>,
    pub options: WidgetOptions,
}

impl WidgetSeed {
    /// Seed for an unbound widget with default options.
    pub fn bare() -> Self {
        Self {
            property: None,
            options: WidgetOptions::default(),
        }
    }

    pub fn with_options(options: WidgetOptions) -> Self {
        Self {
            property: None,
            options,
        }
    }

    pub fn for_property(property: PropertyDecl, options: WidgetOptions) -> Self {
        Self {
            property: Some(property),
            options,
        }
    }
}

/// Construction options. Families of widgets read different subsets;
/// unread fields are ignored.
#[derive(Default)]
pub struct WidgetOptions {
    /// Display label; defaults to the bound property name.
    pub label: Option<String>,
    /// Initial value; overrides the bound property's default.
    pub default_value: Option<Value>,
    /// Read-only widgets consume pointer events without reacting.
    pub read_only: bool,
    /// Reserved for hosts that grey out controls; not interpreted here.
    pub disabled: bool,
    /// Veto-capable change listener.
    pub callback: Option<ChangeCallback>,
    /// Skip the automatic hybrid input slot when declaring a property.
    pub suppress_input: bool,
    /// Fixed row position inside the node, bypassing widget stacking.
    pub y: Option<f32>,

    // Number family
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub precision: Option<u32>,
    pub only_odd: bool,
    pub only_even: bool,

    // Combo family
    pub values: Option<ComboValues>,

    // Bool family
    pub on_label: Option<String>,
    pub off_label: Option<String>,
}

/// State shared by every widget variant.
pub struct WidgetCore {
    pub label: String,
    pub value: Option<Value>,
    /// Bound node property name, if any.
    pub property: Option<String>,
    pub read_only: bool,
    pub disabled: bool,
    pub visible: bool,
    /// Recompute and apply the node size after each committed change.
    pub auto_update_node_size: bool,
    /// Last size reported by `compute_size`.
    pub size: Vec2,
    /// Row y stamped by the node's widget draw pass; hybrid slot anchors
    /// derive from it.
    pub last_y: f32,
    /// Fixed row position inside the node, bypassing widget stacking.
    pub y_override: Option<f32>,
    pub callback: Option<ChangeCallback>,

    pub outline_color: Color32,
    pub background_color: Color32,
    pub text_color: Color32,
    pub secondary_text_color: Color32,
    pub value_color: Color32,
    pub secondary_value_color: Color32,
}

impl WidgetCore {
    pub fn new(seed: WidgetSeed) -> Self {
        let WidgetSeed { property, options } = seed;

        let mut core = Self {
            label: String::new(),
            value: None,
            property: None,
            read_only: options.read_only,
            disabled: options.disabled,
            visible: true,
            auto_update_node_size: false,
            size: Vec2::ZERO,
            last_y: 0.0,
            y_override: options.y,
            callback: options.callback,
            outline_color: WIDGET_OUTLINE_COLOR,
            background_color: WIDGET_BG_COLOR,
            text_color: WIDGET_TEXT_COLOR,
            secondary_text_color: WIDGET_SECONDARY_TEXT_COLOR,
            value_color: WIDGET_TEXT_COLOR,
            secondary_value_color: WIDGET_SECONDARY_VALUE_COLOR,
        };

        if let Some(property) = property {
            core.value = Some(property.default_value);
            core.label = property.name.clone();
            core.property = Some(property.name);
        }

        if let Some(label) = options.label {
            core.label = label;
        }
        if let Some(default_value) = options.default_value {
            core.value = Some(default_value);
        }

        core
    }

    /// Current value stringified for display and measurement.
    pub fn value_text(&self) -> String {
        self.value
            .as_ref()
            .map(|value| value.to_string())
            .unwrap_or_default()
    }
}

/// Contract every widget implements.
pub trait Widget {
    fn core(&self) -> &WidgetCore;

    fn core_mut(&mut self) -> &mut WidgetCore;

    /// Variant size hook. Default: label width + value width + fixed
    /// padding, one row tall.
    fn measure(&self, metrics: &dyn TextMetrics) -> Vec2 {
        let core = self.core();
        let width =
            metrics.text_width(&core.label) + metrics.text_width(&core.value_text()) + WIDGET_TEXT_PADDING;
        vec2(width, NODE_WIDGET_HEIGHT)
    }

    /// Desired size, cached into the core so anchor lookups can reuse it.
    fn compute_size(&mut self, metrics: &dyn TextMetrics) -> Vec2 {
        let size = self.measure(metrics);
        self.core_mut().size = size;
        size
    }

    /// Draw wrapper: isolates surface state around the variant hook and
    /// skips hidden widgets entirely.
    fn draw(
        &self,
        surface: &mut dyn Surface,
        body: &NodeBody,
        widget_width: f32,
        y: f32,
        row_height: f32,
    ) {
        surface.push_state();
        if self.core().visible {
            self.draw_content(surface, body, widget_width, y, row_height);
        }
        surface.pop_state();
    }

    /// Variant draw hook. Decorative widgets with nothing to show keep
    /// the default no-op.
    fn draw_content(
        &self,
        _surface: &mut dyn Surface,
        _body: &NodeBody,
        _widget_width: f32,
        _y: f32,
        _row_height: f32,
    ) {
    }

    /// Pointer entry point. Hidden and read-only widgets consume the
    /// event without reacting; otherwise the variant hook runs. Always
    /// reports the event consumed so the host stops dispatching.
    fn on_pointer(
        &mut self,
        event: &PointerEvent,
        pos: Pos2,
        body: &mut NodeBody,
        canvas: &mut dyn CanvasServices,
        token: ReplyToken,
    ) -> bool {
        if !self.core().visible {
            return true;
        }
        if self.core().read_only {
            return true;
        }
        self.handle_pointer(event, pos, body, canvas, token);
        true
    }

    /// Variant pointer hook.
    fn handle_pointer(
        &mut self,
        _event: &PointerEvent,
        _pos: Pos2,
        _body: &mut NodeBody,
        _canvas: &mut dyn CanvasServices,
        _token: ReplyToken,
    ) {
    }

    /// Prompt/menu completion hook. Default commits the reply through
    /// the protocol; variants that need parsing or option resolution
    /// override.
    fn on_reply(&mut self, value: Value, body: &mut NodeBody) {
        self.change_value(value, body);
    }

    /// Change validation hook. Default is the redundancy check: a value
    /// equal to the current one is rejected so no notifications fire.
    fn validate_change(&self, value: &Value, _body: &NodeBody) -> bool {
        self.core().value.as_ref() != Some(value)
    }

    /// The single value-mutation entry point; see the module docs for
    /// the protocol steps and their ordering.
    fn change_value(&mut self, value: Value, body: &mut NodeBody) {
        if !self.validate_change(&value, body) {
            return;
        }

        if let Some(callback) = self.core_mut().callback.as_mut() {
            if !callback(&value, body) {
                return;
            }
        }

        let core = self.core_mut();
        core.value = Some(value.clone());
        let property = core.property.clone();
        let auto_resize = core.auto_update_node_size;

        if let Some(property) = property {
            if body.props.contains(&property) {
                body.props.set(property, value);
            }
        }

        if auto_resize {
            body.request_resize();
        }

        body.mark_dirty();
    }

    /// Toggle visibility without destroying state.
    fn hide(&mut self) {
        self.core_mut().visible = false;
    }

    fn show(&mut self) {
        self.core_mut().visible = true;
    }
}

// ---- shared draw helpers -------------------------------------------------

/// Rounded widget frame spanning the row.
pub(crate) fn draw_frame(
    surface: &mut dyn Surface,
    core: &WidgetCore,
    widget_width: f32,
    y: f32,
    h: f32,
) {
    let draw_width = widget_width - WIDGET_MARGIN * 2.0;
    surface.round_rect(
        Rect::from_min_size(pos2(WIDGET_MARGIN, y), vec2(draw_width, h)),
        h * 0.5,
        core.background_color,
        Stroke::new(1.0, core.outline_color),
    );
}

/// Left-aligned widget label, skipped when empty.
pub(crate) fn draw_label(surface: &mut dyn Surface, core: &WidgetCore, y: f32, h: f32) {
    if core.label.is_empty() {
        return;
    }
    surface.text(
        pos2(WIDGET_MARGIN * 2.0 + 5.0, y + h * 0.7),
        TextAlign::Left,
        &core.label,
        TextStyle::Label,
        core.secondary_text_color,
    );
}

/// The < and > stepper triangles at the row edges.
pub(crate) fn draw_step_arrows(
    surface: &mut dyn Surface,
    core: &WidgetCore,
    widget_width: f32,
    y: f32,
    h: f32,
) {
    surface.triangle(
        [
            pos2(WIDGET_MARGIN + 16.0, y + 5.0),
            pos2(WIDGET_MARGIN + 6.0, y + h * 0.5),
            pos2(WIDGET_MARGIN + 16.0, y + h - 5.0),
        ],
        core.text_color,
    );
    surface.triangle(
        [
            pos2(widget_width - WIDGET_MARGIN - 16.0, y + 5.0),
            pos2(widget_width - WIDGET_MARGIN - 6.0, y + h * 0.5),
            pos2(widget_width - WIDGET_MARGIN - 16.0, y + h - 5.0),
        ],
        core.text_color,
    );
}

/// Stepper hit test: -1 in the left zone, +1 in the right zone, 0 in
/// between.
pub(crate) fn step_zone(x: f32, widget_width: f32) -> i32 {
    if x < STEP_ZONE_WIDTH {
        -1
    } else if x > widget_width - STEP_ZONE_WIDTH {
        1
    } else {
        0
    }
}

/// Value font: italic convention for read-only widgets.
pub(crate) fn value_style(core: &WidgetCore) -> TextStyle {
    if core.read_only {
        TextStyle::ValueReadOnly
    } else {
        TextStyle::Value
    }
}
