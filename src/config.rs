//! Layout metrics and palette shared by widgets and node layout.
//!
//! Avoid magic numbers in draw/layout code, enable IDE autocomplete.
//! Usage: `config::NODE_SLOT_HEIGHT`, `config::WIDGET_BG_COLOR`.

use egui::Color32;

// === Text ===

/// Base font size assumed by the character-cell width estimate.
pub const NODE_TEXT_SIZE: f32 = 14.0;
/// Average glyph width as a fraction of [`NODE_TEXT_SIZE`].
pub const TEXT_WIDTH_FACTOR: f32 = 0.6;

// === Node geometry ===

/// Minimum width of an expanded node.
pub const NODE_WIDTH: f32 = 140.0;
/// Fallback width of a collapsed node before a title measurement exists.
pub const NODE_COLLAPSED_WIDTH: f32 = 80.0;
/// Title bar height; collapsed anchors hang off it.
pub const NODE_TITLE_HEIGHT: f32 = 30.0;
/// Vertical pitch of one connector row.
pub const NODE_SLOT_HEIGHT: f32 = 20.0;
/// Extra width reserved around the node title.
pub const TITLE_PADDING: f32 = 40.0;
/// Gap between the input-label column and the output-label column.
pub const SLOT_LABEL_GAP: f32 = 10.0;
/// Margin added below everything when sizing a node.
pub const NODE_BOTTOM_MARGIN: f32 = 6.0;
/// Connector dot radius.
pub const SLOT_DOT_RADIUS: f32 = 4.0;

// === Widget geometry ===

/// Height of one widget row.
pub const NODE_WIDGET_HEIGHT: f32 = 20.0;
/// Horizontal padding added to label + value text when sizing a widget.
pub const WIDGET_TEXT_PADDING: f32 = 60.0;
/// Left/right inset of a widget body inside the node.
pub const WIDGET_MARGIN: f32 = 20.0;
/// Vertical gap between stacked widgets.
pub const WIDGET_GAP: f32 = 4.0;
/// Extra space below the last widget in the stack.
pub const WIDGET_STACK_TRAILER: f32 = 8.0;

// === Interaction ===

/// Width of the left/right stepper hit zones in Combo and Number widgets.
pub const STEP_ZONE_WIDTH: f32 = 40.0;
/// Slider track inset from each node edge.
pub const SLIDER_TRACK_INSET: f32 = 15.0;
/// Pointer-up faster than this counts as a click (opens the value prompt).
pub const CLICK_TIME_MS: f32 = 200.0;
/// Decimals shown by the slider readout unless configured otherwise.
pub const SLIDER_DEFAULT_PRECISION: u32 = 3;

// === Rendering ===

/// Canvas zoom below this renders low detail: square dots, no slot labels.
pub const LOW_DETAIL_ZOOM: f32 = 0.6;

// === Palette ===

/// Widget body fill.
pub const WIDGET_BG_COLOR: Color32 = Color32::from_rgb(0x22, 0x22, 0x22);
/// Widget outline and separator rule.
pub const WIDGET_OUTLINE_COLOR: Color32 = Color32::from_rgb(0x66, 0x66, 0x66);
/// Primary widget text (values, stepper arrows).
pub const WIDGET_TEXT_COLOR: Color32 = Color32::from_rgb(0xDD, 0xDD, 0xDD);
/// Secondary widget text (labels, inactive values).
pub const WIDGET_SECONDARY_TEXT_COLOR: Color32 = Color32::from_rgb(0x99, 0x99, 0x99);
/// Slider fill and other secondary value indicators.
pub const WIDGET_SECONDARY_VALUE_COLOR: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);
/// Slot label text.
pub const NODE_TEXT_COLOR: Color32 = Color32::from_rgb(0xAA, 0xAA, 0xAA);
/// Bool status indicator, on state.
pub const BOOL_ON_COLOR: Color32 = Color32::from_rgb(0x88, 0x99, 0xAA);
/// Bool status indicator, off state.
pub const BOOL_OFF_COLOR: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);
/// Connector dot with an active link.
pub const LINK_ON_COLOR: Color32 = Color32::from_rgb(0x77, 0xFF, 0x77);
/// Connector dot without a link.
pub const LINK_OFF_COLOR: Color32 = Color32::from_rgb(0x77, 0x77, 0x88);
