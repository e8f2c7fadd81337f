//! Node shell: slots, properties, widgets and the declaration API.
//!
//! `NodeBody` is the layout-relevant data a host graph node carries;
//! `Node` pairs it with the owned widget sequence. The two live in
//! separate fields on purpose: pointer dispatch and the value-change
//! protocol borrow one widget mutably *and* the body mutably at the same
//! time, which the split makes legal without any interior mutability.
//!
//! Size and anchor computation live in [`layout`](super::layout).

use egui::{Pos2, Vec2};
use log::warn;
use uuid::Uuid;

use crate::config::NODE_COLLAPSED_WIDTH;
use crate::core::canvas::{CanvasServices, PointerEvent, ReplyToken, TextMetrics};
use crate::widgets::{widget_registry, PropertyDecl, Widget, WidgetOptions, WidgetSeed};

use super::props::Props;
use super::slots::{InputSlot, OutputSlot};
use super::value::Value;

use serde::{Deserialize, Serialize};

/// Which side of the node a slot lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSide {
    Input,
    Output,
}

/// One entry of an external status feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEntry {
    pub name: String,
    pub data: Value,
}

/// Status feed payload routed to content widgets by bound name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub content: Vec<StatusEntry>,
}

/// Ties a content widget to the feed entry it displays.
struct StatusBinding {
    content_name: String,
    widget: usize,
}

/// Layout-relevant node state, visible to widgets during dispatch.
pub struct NodeBody {
    pub title: String,
    pub pos: Pos2,
    pub size: Vec2,
    pub inputs: Vec<InputSlot>,
    pub outputs: Vec<OutputSlot>,
    pub props: Props,

    pub collapsed: bool,
    pub collapsed_width: f32,
    /// Distribute slots along the top/bottom edges instead of the sides.
    pub horizontal: bool,
    /// Render the widget stack above the connector rows.
    pub widgets_up: bool,
    /// Fixed start offset for the widget stack.
    pub widgets_start_y: Option<f32>,
    /// Constructor-level offset added to every connector row.
    pub slot_start_y: f32,
    pub min_height: Option<f32>,
    /// Fixed node size, bypassing computation entirely.
    pub fixed_size: Option<Vec2>,

    dirty: bool,
    resize_requested: bool,
}

impl NodeBody {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pos: Pos2::ZERO,
            size: Vec2::ZERO,
            inputs: Vec::new(),
            outputs: Vec::new(),
            props: Props::new(),
            collapsed: false,
            collapsed_width: NODE_COLLAPSED_WIDTH,
            horizontal: false,
            widgets_up: false,
            widgets_start_y: None,
            slot_start_y: 0.0,
            min_height: None,
            fixed_size: None,
            dirty: false,
            resize_requested: false,
        }
    }

    /// Flag the node's canvas region for redraw.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and clear the redraw flag; hosts poll this once per frame.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Ask the owning node to recompute and apply its size once the
    /// current dispatch finishes.
    pub fn request_resize(&mut self) {
        self.resize_requested = true;
    }

    pub(crate) fn take_resize_request(&mut self) -> bool {
        std::mem::replace(&mut self.resize_requested, false)
    }
}

/// A graph node with its widget sequence.
pub struct Node {
    pub body: NodeBody,
    pub(crate) widgets: Vec<Box<dyn Widget>>,
    status_bindings: Vec<StatusBinding>,
    custom_size: Option<Box<dyn Fn(&NodeBody, Vec2) -> Vec2>>,
}

impl Node {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            body: NodeBody::new(title),
            widgets: Vec::new(),
            status_bindings: Vec::new(),
            custom_size: None,
        }
    }

    // ---- declaration API -------------------------------------------------

    /// Append a plain input slot; returns its index.
    pub fn add_input(&mut self, name: impl Into<String>, type_tag: impl Into<String>) -> usize {
        self.body.inputs.push(InputSlot::new(name, type_tag));
        self.body.inputs.len() - 1
    }

    /// Append an output slot; returns its index.
    pub fn add_output(&mut self, name: impl Into<String>, type_tag: impl Into<String>) -> usize {
        self.body.outputs.push(OutputSlot::new(name, type_tag));
        self.body.outputs.len() - 1
    }

    /// Declare a property with a bound widget and, unless suppressed, a
    /// hybrid input slot. The widget constructor is resolved from the
    /// global registry by `type_tag`.
    pub fn add_property(
        &mut self,
        name: &str,
        default_value: impl Into<Value>,
        type_tag: &str,
        options: WidgetOptions,
    ) {
        let default_value = default_value.into();
        self.body.props.set(name, default_value.clone());

        let ctor = widget_registry()
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .resolve(type_tag);

        let suppress_input = options.suppress_input;
        let widget = ctor(WidgetSeed::for_property(
            PropertyDecl {
                name: name.to_string(),
                default_value,
                type_tag: type_tag.to_string(),
            },
            options,
        ));
        let widget_index = self.add_custom_widget(widget);

        if suppress_input {
            return;
        }

        let slot = self.add_input(name, type_tag);
        self.body.inputs[slot].widget_slot = Some(widget_index);
    }

    /// Declare a property with no widget and no slot.
    pub fn add_hidden_property(&mut self, name: &str, default_value: impl Into<Value>) {
        self.body.props.set(name, default_value.into());
    }

    /// Declare a read-only content widget fed by the status feed entry
    /// of the same name. No property, no slot.
    pub fn add_content(
        &mut self,
        name: &str,
        default_value: impl Into<Value>,
        type_tag: &str,
        mut options: WidgetOptions,
    ) {
        options.read_only = true;
        if options.label.is_none() {
            options.label = Some(name.to_string());
        }
        if options.default_value.is_none() {
            options.default_value = Some(default_value.into());
        }

        let ctor = widget_registry()
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .resolve(type_tag);
        let widget = ctor(WidgetSeed::with_options(options));
        let widget_index = self.add_custom_widget(widget);

        self.status_bindings.push(StatusBinding {
            content_name: name.to_string(),
            widget: widget_index,
        });
    }

    /// Add an unbound widget resolved from the global registry.
    pub fn add_visible_widget_by_type(&mut self, type_tag: &str, options: WidgetOptions) -> usize {
        let ctor = widget_registry()
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .resolve(type_tag);
        self.add_custom_widget(ctor(WidgetSeed::with_options(options)))
    }

    /// Append an already-constructed widget; returns its index.
    pub fn add_custom_widget(&mut self, widget: Box<dyn Widget>) -> usize {
        self.widgets.push(widget);
        self.widgets.len() - 1
    }

    /// Install a custom size contribution, merged into the computed size
    /// by component-wise maximum.
    pub fn set_custom_size(&mut self, f: impl Fn(&NodeBody, Vec2) -> Vec2 + 'static) {
        self.custom_size = Some(Box::new(f));
    }

    pub(crate) fn custom_size_hook(&self) -> Option<&(dyn Fn(&NodeBody, Vec2) -> Vec2)> {
        self.custom_size.as_deref()
    }

    // ---- widget access ---------------------------------------------------

    pub fn widgets(&self) -> &[Box<dyn Widget>] {
        &self.widgets
    }

    pub fn widget(&self, index: usize) -> Option<&dyn Widget> {
        self.widgets.get(index).map(|w| w.as_ref())
    }

    pub fn widget_mut(&mut self, index: usize) -> Option<&mut Box<dyn Widget>> {
        self.widgets.get_mut(index)
    }

    pub fn get_widget_by_label(&self, label: &str) -> Option<&dyn Widget> {
        self.widgets
            .iter()
            .find(|w| w.core().label == label)
            .map(|w| w.as_ref())
    }

    pub fn widget_index_by_label(&self, label: &str) -> Option<usize> {
        self.widgets.iter().position(|w| w.core().label == label)
    }

    // ---- links -----------------------------------------------------------

    /// Attach a link to an input slot. Panics on an out-of-range slot
    /// index: that is a caller bug, not a runtime condition.
    pub fn connect_input(&mut self, slot: usize, link: Uuid) {
        self.body.inputs[slot].link = Some(link);
        self.connections_changed(SlotSide::Input, slot);
        self.body.mark_dirty();
    }

    /// Detach the link of an input slot.
    pub fn disconnect_input(&mut self, slot: usize) {
        self.body.inputs[slot].link = None;
        self.connections_changed(SlotSide::Input, slot);
        self.body.mark_dirty();
    }

    /// Attach a link to an output slot.
    pub fn connect_output(&mut self, slot: usize, link: Uuid) {
        self.body.outputs[slot].links.push(link);
        self.body.mark_dirty();
    }

    /// Detach one link from an output slot.
    pub fn disconnect_output(&mut self, slot: usize, link: Uuid) {
        self.body.outputs[slot].links.retain(|l| *l != link);
        self.body.mark_dirty();
    }

    /// Connection-state callback: a hybrid slot gaining a link hides its
    /// widget (the link supplies the value), losing it shows the widget
    /// again. Non-hybrid slots and outputs are ignored.
    pub fn connections_changed(&mut self, side: SlotSide, slot: usize) {
        if side != SlotSide::Input {
            return;
        }
        let Some(input) = self.body.inputs.get(slot) else {
            return;
        };
        let Some(widget_slot) = input.widget_slot else {
            return;
        };
        let linked = input.has_link();
        if let Some(widget) = self.widgets.get_mut(widget_slot) {
            if linked {
                widget.hide();
            } else {
                widget.show();
            }
        }
    }

    // ---- dispatch --------------------------------------------------------

    /// Route a pointer event to the widget at `widget_index` (as found by
    /// [`Node::widget_at`]). Panics on an out-of-range index: that is a
    /// caller bug. Returns whether the event was consumed (always, per
    /// the widget contract).
    pub fn pointer_event(
        &mut self,
        widget_index: usize,
        event: &PointerEvent,
        pos: Pos2,
        canvas: &mut dyn CanvasServices,
    ) -> bool {
        let token = ReplyToken::new(widget_index);
        let handled = {
            let widget = &mut self.widgets[widget_index];
            widget.on_pointer(event, pos, &mut self.body, canvas, token)
        };
        self.flush_resize(canvas.metrics());
        handled
    }

    /// The visible widget whose drawn row contains `pos` (node-local).
    /// Meaningful only after a draw pass has stamped row positions.
    pub fn widget_at(&self, pos: Pos2) -> Option<usize> {
        self.widgets.iter().position(|w| {
            let core = w.core();
            core.visible && pos.y >= core.last_y && pos.y <= core.last_y + core.size.y
        })
    }

    /// Complete an outstanding prompt or menu. A token whose widget no
    /// longer resolves is dropped with a warning: the prompt was
    /// superseded or its widget removed, both steady-state.
    pub fn deliver_reply(&mut self, token: ReplyToken, value: Value, metrics: &dyn TextMetrics) {
        match self.widgets.get_mut(token.widget) {
            Some(widget) => widget.on_reply(value, &mut self.body),
            None => {
                warn!("dropping reply for missing widget {}", token.widget);
                return;
            }
        }
        self.flush_resize(metrics);
    }

    /// Route a status feed update: each bound content widget receives
    /// the value of the feed entry matching its name, through the
    /// value-change protocol (so unchanged values stay quiet).
    pub fn apply_status(&mut self, status: &StatusUpdate) {
        for binding in &self.status_bindings {
            let Some(entry) = status
                .content
                .iter()
                .find(|entry| entry.name == binding.content_name)
            else {
                continue;
            };
            if let Some(widget) = self.widgets.get_mut(binding.widget) {
                widget.change_value(entry.data.clone(), &mut self.body);
            }
        }
    }

    /// Apply a resize queued by the value-change protocol. Runs after
    /// the dispatch that committed the change, never during it.
    fn flush_resize(&mut self, metrics: &dyn TextMetrics) {
        if self.body.take_resize_request() {
            self.apply_size(metrics);
        }
    }

    /// Recompute the node size and store it on the body.
    pub fn apply_size(&mut self, metrics: &dyn TextMetrics) {
        let size = self.compute_size(metrics);
        self.body.size = size;
    }
}
