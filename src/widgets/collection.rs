//! Widget registry: type tag -> constructor, with a fallback default.
//!
//! Nodes never name widget types directly; they ask the registry for
//! "the widget for tag X". Unknown tags resolve to the default
//! constructor (a blank frame) with a logged warning, so a node built
//! against a missing extension still lays out and renders.

use std::collections::HashMap;
use std::sync::RwLock;

use log::warn;
use once_cell::sync::Lazy;

use super::{
    BlankWidget, BoolWidget, ComboWidget, NumberWidget, SeparatorWidget, SliderWidget,
    StringWidget, WidgetCtor,
};

/// Built-in type tags.
pub mod tags {
    pub const BOOL: &str = "BOOL";
    pub const NUMBER: &str = "NUMBER";
    pub const COMBO: &str = "COMBO";
    pub const SLIDER: &str = "SLIDER";
    pub const STRING: &str = "STRING";
    pub const SEPARATOR: &str = "SEPARATOR";
    pub const BLANK: &str = "BLANK";
}

pub struct WidgetRegistry {
    factory: HashMap<String, WidgetCtor>,
    type_list: Vec<String>,
    default_ctor: WidgetCtor,
}

impl WidgetRegistry {
    /// Empty registry around a default constructor.
    pub fn new(default_ctor: WidgetCtor) -> Self {
        Self {
            factory: HashMap::new(),
            type_list: Vec::new(),
            default_ctor,
        }
    }

    /// Registry preloaded with the built-in widget set, defaulting to
    /// the blank widget.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new(BlankWidget::build);
        registry.register(tags::BOOL, BoolWidget::build);
        registry.register(tags::NUMBER, NumberWidget::build);
        registry.register(tags::COMBO, ComboWidget::build);
        registry.register(tags::SLIDER, SliderWidget::build);
        registry.register(tags::STRING, StringWidget::build);
        registry.register(tags::SEPARATOR, SeparatorWidget::build);
        registry.register(tags::BLANK, BlankWidget::build);
        registry
    }

    /// Bind a constructor to a tag. Re-registering a tag replaces the
    /// previous binding; the last writer wins.
    pub fn register(&mut self, tag: impl Into<String>, ctor: WidgetCtor) {
        let tag = tag.into();
        if !self.type_list.contains(&tag) {
            self.type_list.push(tag.clone());
        }
        self.factory.insert(tag, ctor);
    }

    /// Constructor for a tag; unknown tags fall back to the default so
    /// callers always get something usable.
    pub fn resolve(&self, tag: &str) -> WidgetCtor {
        match self.factory.get(tag) {
            Some(ctor) => *ctor,
            None => {
                warn!("unknown widget type {tag:?}: using default");
                self.default_ctor
            }
        }
    }

    pub fn default_ctor(&self) -> WidgetCtor {
        self.default_ctor
    }

    pub fn set_default(&mut self, ctor: WidgetCtor) {
        self.default_ctor = ctor;
    }

    /// Registered tags, in first-registration order.
    pub fn registered_types(&self) -> &[String] {
        &self.type_list
    }
}

static REGISTRY: Lazy<RwLock<WidgetRegistry>> =
    Lazy::new(|| RwLock::new(WidgetRegistry::with_builtins()));

/// Process-wide registry, preloaded with the built-ins on first use.
/// Extensions register their widget types here at startup; nodes resolve
/// through it when declaring properties.
pub fn widget_registry() -> &'static RwLock<WidgetRegistry> {
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Widget, WidgetSeed};

    fn sentinel(seed: WidgetSeed) -> Box<dyn Widget> {
        let mut widget = BlankWidget::new(seed);
        widget.core_mut().label = "sentinel".into();
        Box::new(widget)
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = WidgetRegistry::new(BlankWidget::build);
        registry.register("X", BlankWidget::build);
        registry.register("X", sentinel);

        let widget = registry.resolve("X")(WidgetSeed::bare());
        assert_eq!(widget.core().label, "sentinel");
        // the tag list does not grow on replacement
        assert_eq!(registry.registered_types().to_vec(), vec!["X"]);
    }

    #[test]
    fn test_unknown_tag_falls_back_to_default() {
        let mut registry = WidgetRegistry::new(sentinel);
        registry.register(tags::BOOL, BoolWidget::build);

        let widget = registry.resolve("NO_SUCH_TYPE")(WidgetSeed::bare());
        assert_eq!(widget.core().label, "sentinel");
    }

    #[test]
    fn test_set_default_replaces_fallback() {
        let mut registry = WidgetRegistry::new(BlankWidget::build);
        registry.set_default(sentinel);

        let widget = registry.resolve("STILL_MISSING")(WidgetSeed::bare());
        assert_eq!(widget.core().label, "sentinel");
    }

    #[test]
    fn test_global_registry_has_builtins() {
        let registry = widget_registry().read().unwrap_or_else(|e| e.into_inner());
        for tag in [
            tags::BOOL,
            tags::NUMBER,
            tags::COMBO,
            tags::SLIDER,
            tags::STRING,
            tags::SEPARATOR,
            tags::BLANK,
        ] {
            assert!(registry.registered_types().iter().any(|t| t == tag));
        }
    }

    #[test]
    fn test_late_registration_through_global() {
        {
            let mut registry = widget_registry().write().unwrap_or_else(|e| e.into_inner());
            registry.register("TEST_LATE_TAG", sentinel);
        }
        let registry = widget_registry().read().unwrap_or_else(|e| e.into_inner());
        let widget = registry.resolve("TEST_LATE_TAG")(WidgetSeed::bare());
        assert_eq!(widget.core().label, "sentinel");
    }
}
