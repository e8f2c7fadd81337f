//! Separator widget: a horizontal rule across the node body.

use egui::{pos2, Stroke};

use crate::config::WIDGET_MARGIN;
use crate::core::surface::Surface;
use crate::entities::NodeBody;

use super::{Widget, WidgetCore, WidgetSeed};

pub struct SeparatorWidget {
    core: WidgetCore,
}

impl SeparatorWidget {
    pub fn new(seed: WidgetSeed) -> Self {
        Self {
            core: WidgetCore::new(seed),
        }
    }

    pub fn build(seed: WidgetSeed) -> Box<dyn Widget> {
        Box::new(Self::new(seed))
    }
}

impl Widget for SeparatorWidget {
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
        let mid = y + row_height * 0.5;
        surface.line(
            pos2(WIDGET_MARGIN, mid),
            pos2(widget_width - WIDGET_MARGIN, mid),
            Stroke::new(1.0, self.core.outline_color),
        );
    }
}
