//! PLUGBOARD - per-property visual widgets for node-graph editors
//!
//! Small interactive controls (toggle, stepper, combo, slider, text field)
//! rendered inside graph nodes and bound to node properties. The crate
//! covers three things:
//!
//! - the widget contract: size, draw, pointer events, and a single
//!   value-change protocol shared by every variant
//! - the type-tag registry that resolves "the widget for type X", with a
//!   fallback default for unknown tags
//! - the node-side layout: hybrid input slots whose connector rides on a
//!   widget row, node bounding size, and per-slot anchor points
//!
//! The host editor stays external: it implements [`Surface`] (drawing
//! primitives) and [`CanvasServices`] (text measurement, zoom, connector
//! palette, modal prompts) and routes pointer events to the widget under
//! the cursor. Everything here is synchronous and single-threaded.

// Host-boundary contracts (surface, canvas services)
pub mod core;

// Crate modules
pub mod config;
pub mod entities;
pub mod widgets;

// Re-export commonly used types from core
pub use crate::core::canvas::{
    ApproxTextMetrics, CanvasServices, ConnectorColors, PointerEvent, PointerKind, ReplyToken,
    TextMetrics,
};
pub use crate::core::surface::{Surface, TextAlign, TextStyle};

// Re-export entities
pub use entities::{
    node_type_registry, InputSlot, Node, NodeBody, NodeFactory, NodeTypeRegistry, OutputSlot,
    Props, SlotSide, StatusEntry, StatusUpdate, Value,
};

// Re-export the widget contract and registry
pub use widgets::collection::{widget_registry, WidgetRegistry};
pub use widgets::{
    ChangeCallback, ComboValues, PropertyDecl, Widget, WidgetCore, WidgetCtor, WidgetOptions,
    WidgetSeed,
};
