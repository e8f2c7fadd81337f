//! Node layout: bounding size, slot anchor points and the node-side
//! draw passes.
//!
//! The ordering contract matters: the widget pass stamps each widget's
//! row position (`WidgetCore::last_y`), and hybrid connector dots are
//! drawn *after* it so their anchors land on the rows actually rendered.
//! Anchor queries between frames reuse the stamped positions.

use egui::{pos2, vec2, Color32, Pos2, Rect, Vec2};

use crate::config::{
    LOW_DETAIL_ZOOM, NODE_BOTTOM_MARGIN, NODE_SLOT_HEIGHT, NODE_TEXT_COLOR, NODE_TITLE_HEIGHT,
    NODE_WIDGET_HEIGHT, NODE_WIDTH, SLOT_DOT_RADIUS, SLOT_LABEL_GAP, TITLE_PADDING, WIDGET_GAP,
    WIDGET_STACK_TRAILER,
};
use crate::core::canvas::{CanvasServices, TextMetrics};
use crate::core::surface::{Surface, TextAlign, TextStyle};
use crate::widgets::Widget;

use super::node::Node;

impl Node {
    /// Compute the node bounding size from slots, title and widgets.
    /// Does not apply it; see [`Node::apply_size`].
    pub fn compute_size(&mut self, metrics: &dyn TextMetrics) -> Vec2 {
        if let Some(fixed) = self.body.fixed_size {
            return fixed;
        }

        let body = &self.body;
        let rows = self.connector_rows();

        let input_width = body
            .inputs
            .iter()
            .map(|slot| metrics.text_width(slot.display_label()))
            .fold(0.0f32, f32::max);
        let output_width = body
            .outputs
            .iter()
            .map(|slot| metrics.text_width(slot.display_label()))
            .fold(0.0f32, f32::max);
        let title_width = metrics.text_width(&body.title);

        let mut width = (input_width + output_width + SLOT_LABEL_GAP)
            .max(title_width)
            .max(NODE_WIDTH);
        if !self.widgets.is_empty() {
            width = width.max(NODE_WIDTH * 1.5);
        }

        let mut height = body.slot_start_y + rows as f32 * NODE_SLOT_HEIGHT;

        let mut widgets_height = 0.0f32;
        let mut widgets_width = 0.0f32;
        if !self.widgets.is_empty() {
            for widget in &mut self.widgets {
                let size = widget.compute_size(metrics);
                widgets_height += size.y + WIDGET_GAP;
                widgets_width = widgets_width.max(size.x);
            }
            widgets_height += WIDGET_STACK_TRAILER;
        }

        let body = &self.body;
        if body.widgets_up {
            height = height.max(widgets_height);
        } else if let Some(start) = body.widgets_start_y {
            height = height.max(widgets_height + start);
        } else {
            height += widgets_height;
        }

        if let Some(min_height) = body.min_height {
            height = height.max(min_height);
        }
        height += NODE_BOTTOM_MARGIN;

        width = width.max(title_width + TITLE_PADDING).max(widgets_width);

        let mut size = vec2(width, height);
        if let Some(custom) = self.custom_size_hook() {
            size = size.max(custom(body, size));
        }
        size
    }

    /// Connector rows the node occupies: hybrid inputs ride on widget
    /// rows, so only plain inputs count against the outputs.
    pub(crate) fn connector_rows(&self) -> usize {
        let standard_inputs = self
            .body
            .inputs
            .iter()
            .filter(|slot| !slot.is_hybrid())
            .count();
        standard_inputs.max(self.body.outputs.len()).max(1)
    }

    /// Absolute anchor point of a slot's connector dot.
    pub fn connection_pos(&self, is_input: bool, slot_index: usize) -> Pos2 {
        let body = &self.body;

        // collapsed nodes pin all anchors to the collapsed box
        if body.collapsed {
            let w = body.collapsed_width;
            if body.horizontal {
                let y = if is_input {
                    body.pos.y - NODE_TITLE_HEIGHT
                } else {
                    body.pos.y
                };
                return pos2(body.pos.x + w * 0.5, y);
            }
            let x = if is_input { body.pos.x } else { body.pos.x + w };
            return pos2(x, body.pos.y - NODE_TITLE_HEIGHT * 0.5);
        }

        // hard-coded local offsets win over row layout
        if is_input {
            if let Some(p) = body.inputs.get(slot_index).and_then(|slot| slot.pos) {
                return body.pos + p.to_vec2();
            }
        } else if let Some(p) = body.outputs.get(slot_index).and_then(|slot| slot.pos) {
            return body.pos + p.to_vec2();
        }

        // horizontal nodes distribute slots along the top/bottom edge
        if body.horizontal {
            let count = if is_input {
                body.inputs.len()
            } else {
                body.outputs.len()
            }
            .max(1);
            let x = body.pos.x + (slot_index as f32 + 0.5) * (body.size.x / count as f32);
            let y = if is_input {
                body.pos.y - NODE_TITLE_HEIGHT
            } else {
                body.pos.y + body.size.y
            };
            return pos2(x, y);
        }

        // default vertical layout
        let offset = NODE_SLOT_HEIGHT * 0.5;
        if is_input {
            let x = body.pos.x + offset;

            // hybrid slots anchor at the center of their widget's row
            if let Some(widget_slot) = body.inputs.get(slot_index).and_then(|slot| slot.widget_slot)
            {
                if let Some(widget) = self.widgets.get(widget_slot) {
                    let core = widget.core();
                    return pos2(x, body.pos.y + core.last_y + core.size.y * 0.5);
                }
            }

            let row = self.connector_row(slot_index);
            pos2(
                x,
                body.pos.y + (row as f32 + 0.7) * NODE_SLOT_HEIGHT + body.slot_start_y,
            )
        } else {
            pos2(
                body.pos.x + body.size.x + 1.0 - offset,
                body.pos.y + (slot_index as f32 + 0.7) * NODE_SLOT_HEIGHT + body.slot_start_y,
            )
        }
    }

    /// Row index of a plain input: its position among non-hybrid inputs
    /// only. Hybrid slots earlier in declaration order do not consume a
    /// connector row.
    fn connector_row(&self, slot_index: usize) -> usize {
        self.body.inputs[..slot_index]
            .iter()
            .filter(|slot| !slot.is_hybrid())
            .count()
    }

    /// Shrink the collapsed box to the title, never past the node width.
    pub fn update_collapsed_width(&mut self, metrics: &dyn TextMetrics) {
        let title_width = metrics.text_width(&self.body.title) + NODE_TITLE_HEIGHT * 2.0;
        self.body.collapsed_width = title_width.min(self.body.size.x);
    }

    // ---- draw passes -----------------------------------------------------

    /// Full node-side draw sequence: plain input dots, output dots, the
    /// widget stack, then hybrid input dots on the stamped widget rows.
    /// The host has already drawn the node shape and translated the
    /// surface to node-local coordinates.
    pub fn draw_body(&mut self, surface: &mut dyn Surface, canvas: &dyn CanvasServices) {
        if self.body.collapsed {
            return;
        }
        self.draw_inputs(surface, canvas);
        self.draw_outputs(surface, canvas);
        self.draw_widgets(surface, canvas.metrics());
        self.draw_hybrid_inputs(surface, canvas);
    }

    /// Connector dots and labels for plain (non-hybrid) input slots.
    pub fn draw_inputs(&self, surface: &mut dyn Surface, canvas: &dyn CanvasServices) {
        let low_detail = canvas.zoom() < LOW_DETAIL_ZOOM;
        let colors = canvas.connector_colors();

        for (index, slot) in self.body.inputs.iter().enumerate() {
            if slot.is_hybrid() {
                continue;
            }
            let fill = if slot.has_link() {
                colors.input_on
            } else {
                colors.input_off
            };
            let pos = self.connection_pos(true, index) - self.body.pos.to_vec2();
            draw_slot_dot(surface, pos, fill, low_detail);

            if !low_detail && !slot.display_label().is_empty() {
                surface.text(
                    pos2(pos.x + 10.0, pos.y + 5.0),
                    TextAlign::Left,
                    slot.display_label(),
                    TextStyle::Label,
                    NODE_TEXT_COLOR,
                );
            }
        }
    }

    /// Connector dots and labels for output slots.
    pub fn draw_outputs(&self, surface: &mut dyn Surface, canvas: &dyn CanvasServices) {
        let low_detail = canvas.zoom() < LOW_DETAIL_ZOOM;
        let colors = canvas.connector_colors();

        for (index, slot) in self.body.outputs.iter().enumerate() {
            let fill = if slot.has_links() {
                colors.output_on
            } else {
                colors.output_off
            };
            let pos = self.connection_pos(false, index) - self.body.pos.to_vec2();
            draw_slot_dot(surface, pos, fill, low_detail);

            if !low_detail && !slot.display_label().is_empty() {
                surface.text(
                    pos2(pos.x - 10.0, pos.y + 5.0),
                    TextAlign::Right,
                    slot.display_label(),
                    TextStyle::Label,
                    NODE_TEXT_COLOR,
                );
            }
        }
    }

    /// Stack the widgets from the placement-mode start row, stamping
    /// each widget's `last_y` for the anchor and hit-test queries that
    /// follow.
    pub fn draw_widgets(&mut self, surface: &mut dyn Surface, metrics: &dyn TextMetrics) {
        if self.widgets.is_empty() {
            return;
        }
        let width = self.body.size.x;
        let mut y = self.widget_stack_top();

        for widget in &mut self.widgets {
            let size = widget.compute_size(metrics);
            let row_y = widget.core().y_override.unwrap_or(y);
            widget.core_mut().last_y = row_y;
            widget.draw(surface, &self.body, width, row_y, NODE_WIDGET_HEIGHT);
            y = row_y + size.y + WIDGET_GAP;
        }
    }

    /// Connector dots for hybrid input slots, positioned on their
    /// widgets' drawn rows. Labels appear only while linked (the widget
    /// itself shows the label otherwise).
    pub fn draw_hybrid_inputs(&self, surface: &mut dyn Surface, canvas: &dyn CanvasServices) {
        let low_detail = canvas.zoom() < LOW_DETAIL_ZOOM;
        let colors = canvas.connector_colors();

        for (index, slot) in self.body.inputs.iter().enumerate() {
            if !slot.is_hybrid() {
                continue;
            }
            let fill = if slot.has_link() {
                colors.input_on
            } else {
                colors.input_off
            };
            let pos = self.connection_pos(true, index) - self.body.pos.to_vec2();
            draw_slot_dot(surface, pos, fill, low_detail);

            if slot.has_link() && !low_detail && !slot.display_label().is_empty() {
                surface.text(
                    pos2(pos.x + 10.0, pos.y + 5.0),
                    TextAlign::Left,
                    slot.display_label(),
                    TextStyle::Label,
                    NODE_TEXT_COLOR,
                );
            }
        }
    }

    /// Start row of the widget stack for the current placement mode.
    fn widget_stack_top(&self) -> f32 {
        if self.body.horizontal || self.body.widgets_up {
            return 2.0;
        }
        if let Some(start) = self.body.widgets_start_y {
            return start;
        }
        self.body.slot_start_y + self.connector_rows() as f32 * NODE_SLOT_HEIGHT
    }
}

/// One connector dot; squares below the low-detail zoom threshold.
fn draw_slot_dot(surface: &mut dyn Surface, pos: Pos2, fill: Color32, low_detail: bool) {
    if low_detail {
        surface.fill_rect(
            Rect::from_min_size(pos2(pos.x - 4.0, pos.y - 4.0), vec2(8.0, 8.0)),
            fill,
        );
    } else {
        surface.circle(pos, SLOT_DOT_RADIUS, fill);
    }
}
