//! Rubber-band creation of boxes and circles

use glam::DVec2;
use shared::Rgba;

use super::Tool;
use crate::state::{AppState, Notice, ShapeStyle};

/// Minimum rubber-band length in viewport pixels
pub const MIN_DRAG_PIXELS: f64 = 5.0;
/// Minimum side of a drawn box, world units
pub const MIN_BOX_SIDE: f64 = 10.0;
/// Minimum radius of a drawn circle, world units
pub const MIN_CIRCLE_RADIUS: f64 = 5.0;
/// HSV(210, 50%, 70%) with alpha 200
pub const CREATED_SHAPE_COLOR: Rgba = [89, 134, 179, 200];

impl AppState {
    pub(super) fn finish_shape(&mut self, start: DVec2, end: DVec2) {
        let camera = self.scene.camera;
        if camera.to_screen(start).distance(camera.to_screen(end)) < MIN_DRAG_PIXELS {
            self.notify(Notice::warning("Object too small to create."));
            return;
        }

        let center = (start + end) / 2.0;
        let style = ShapeStyle::default().with_color(CREATED_SHAPE_COLOR);
        let created = match self.interaction.tool {
            Tool::Box => {
                let size = (end - start).abs();
                if size.x < MIN_BOX_SIDE || size.y < MIN_BOX_SIDE {
                    self.notify(Notice::warning("Box is too small to be created."));
                    return;
                }
                self.scene.create_box(center, size.x, size.y, style)
            }
            Tool::Circle => {
                let radius = start.distance(end) / 2.0;
                if radius < MIN_CIRCLE_RADIUS {
                    self.notify(Notice::warning("Circle is too small to be created."));
                    return;
                }
                self.scene.create_circle(center, radius, style)
            }
            _ => return,
        };

        match created {
            Ok(id) => {
                self.selection.select(id);
                self.refresh_panel();
            }
            Err(e) => self.report(&e),
        }
    }
}
