//! Blank widget: a rounded, empty frame.
//!
//! Pure decoration (a spacer that still reads as a control) and the
//! registry's fallback for unknown type tags, where rendering an inert
//! frame beats rendering nothing.

use crate::core::surface::Surface;
use crate::entities::NodeBody;

use super::{draw_frame, Widget, WidgetCore, WidgetSeed};

pub struct BlankWidget {
    core: WidgetCore,
}

impl BlankWidget {
    pub fn new(seed: WidgetSeed) -> Self {
        Self {
            core: WidgetCore::new(seed),
        }
    }

    pub fn build(seed: WidgetSeed) -> Box<dyn Widget> {
        Box::new(Self::new(seed))
    }
}

impl Widget for BlankWidget {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn draw_content(
        &self,
        surface: &mut dyn Surface,
        _body: &NodeBody,
        widget_width: f32,
        y: f32,
        row_height: f32,
    ) {
        draw_frame(surface, &self.core, widget_width, y, row_height);
    }
}
