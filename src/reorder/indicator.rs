use egui::{Pos2, Rect, Vec2};

use crate::surface::Surface;

use super::options::DragOptions;
use super::types::{Destination, DestinationMode};
use super::DragController;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum IndicatorOrientation {
    /// A bar between two elements.
    #[default]
    Horizontal,

    /// A caret between two characters.
    Vertical,
}

/// The drop cursor. Derived from the current destination, never authoritative.
///
/// `rect` is relative to [`Surface::origin`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Indicator {
    pub visible: bool,
    pub rect: Rect,
    pub orientation: IndicatorOrientation,
}

impl Default for Indicator {
    fn default() -> Self {
        Self::hidden()
    }
}

impl Indicator {
    pub fn hidden() -> Self {
        Self {
            visible: false,
            rect: Rect::NOTHING,
            orientation: IndicatorOrientation::Horizontal,
        }
    }

    pub(super) fn for_destination(
        destination: &Destination,
        candidate: Rect,
        origin: Pos2,
        options: &DragOptions,
    ) -> Self {
        let thickness = options.indicator_thickness;
        let offset = origin.to_vec2();

        let horizontal = |top: f32| Self {
            visible: true,
            rect: Rect::from_min_size(
                Pos2::new(candidate.left(), top) - offset,
                Vec2::new(candidate.width(), thickness),
            ),
            orientation: IndicatorOrientation::Horizontal,
        };

        match (destination.mode, destination.range) {
            (DestinationMode::Before, _) => horizontal(candidate.top()),
            (DestinationMode::After, _) => horizontal(candidate.bottom() - thickness),
            (mode, Some(range)) => {
                let x = if mode == DestinationMode::InsideAfterChar {
                    range.rect.right()
                } else {
                    range.rect.left()
                };
                let overhang = options.indicator_overhang;
                Self {
                    visible: true,
                    rect: Rect::from_min_size(
                        Pos2::new(x, range.rect.top() - overhang) - offset,
                        Vec2::new(thickness, range.rect.height() + 2.0 * overhang),
                    ),
                    orientation: IndicatorOrientation::Vertical,
                }
            }
            (_, None) => Self::hidden(),
        }
    }

    /// The indicator rectangle in the coordinate space of the surface's elements.
    pub fn absolute_rect(&self, origin: Pos2) -> Rect {
        self.rect.translate(origin.to_vec2())
    }

    pub fn paint(&self, painter: &egui::Painter, origin: Pos2, visuals: &egui::Visuals) {
        if !self.visible {
            return;
        }
        painter.rect_filled(
            self.absolute_rect(origin),
            1.0,
            visuals.selection.stroke.color,
        );
    }
}

impl<S: Surface> DragController<S> {
    /// Paint the drop indicator, if visible and the surface origin is known.
    pub fn paint_indicator(&self, painter: &egui::Painter, visuals: &egui::Visuals) {
        let Some(origin) = self.surface.origin() else {
            return;
        };
        self.indicator.paint(painter, origin, visuals);
    }

    /// Paint the indicator above everything else in `ui`'s context and apply the
    /// pointer-shape hint while a drag is in progress.
    pub fn show(&self, ui: &egui::Ui) {
        if self.is_dragging() {
            ui.ctx().set_cursor_icon(self.cursor_icon);
        }
        let painter = ui.ctx().layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            ui.id().with("egui_reorder_indicator"),
        ));
        self.paint_indicator(&painter, ui.visuals());
    }
}
