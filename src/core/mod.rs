//! Host-boundary contracts.
//!
//! The node-graph editor that embeds this crate owns the window, the
//! viewport and the event loop; widgets and node layout talk to it only
//! through the traits here.

pub mod canvas;
pub mod surface;

pub use canvas::{
    ApproxTextMetrics, CanvasServices, ConnectorColors, PointerEvent, PointerKind, ReplyToken,
    TextMetrics,
};
pub use surface::{Surface, TextAlign, TextStyle};
