//! Connector slot descriptors for node inputs and outputs.

use egui::Pos2;
use uuid::Uuid;

/// Input connector. `widget_slot` marks the slot hybrid: its connector
/// rides on the row of the widget at that index in the node's widget
/// sequence instead of occupying a connector row of its own.
#[derive(Debug, Clone)]
pub struct InputSlot {
    pub name: String,
    pub type_tag: String,
    /// Display override; the slot name is used when absent.
    pub label: Option<String>,
    /// Active link, if connected.
    pub link: Option<Uuid>,
    /// Index into the node's widget sequence when hybrid.
    pub widget_slot: Option<usize>,
    /// Hard-coded node-local anchor, bypassing row layout.
    pub pos: Option<Pos2>,
}

impl InputSlot {
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
            label: None,
            link: None,
            widget_slot: None,
            pos: None,
        }
    }

    pub fn has_link(&self) -> bool {
        self.link.is_some()
    }

    pub fn is_hybrid(&self) -> bool {
        self.widget_slot.is_some()
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// Output connector. Outputs fan out, so they carry a link list; they
/// are never hybrid.
#[derive(Debug, Clone)]
pub struct OutputSlot {
    pub name: String,
    pub type_tag: String,
    pub label: Option<String>,
    pub links: Vec<Uuid>,
    /// Hard-coded node-local anchor, bypassing row layout.
    pub pos: Option<Pos2>,
}

impl OutputSlot {
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
            label: None,
            links: Vec::new(),
            pos: None,
        }
    }

    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}
