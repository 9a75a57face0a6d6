use glam::DVec2;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;
/// Multiplicative zoom change per wheel notch
pub const ZOOM_STEP: f64 = 1.1;

/// Pan + zoom camera mapping world space (y up) to viewport pixels (y down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera2D {
    /// World-space translation applied before zooming
    pub offset: DVec2,
    pub zoom: f64,
    /// Height of the viewport in pixels, used to flip the y axis
    pub screen_height: f64,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            offset: DVec2::ZERO,
            zoom: 1.0,
            screen_height: 800.0,
        }
    }
}

impl Camera2D {
    pub fn new(screen_height: f64) -> Self {
        Self {
            screen_height,
            ..Self::default()
        }
    }

    /// World point to screen pixels. Degenerate zoom or non-finite results map to the origin.
    pub fn to_screen(&self, world: DVec2) -> DVec2 {
        if self.zoom == 0.0 {
            return DVec2::ZERO;
        }
        let x = (world.x + self.offset.x) * self.zoom;
        let y = self.screen_height - (world.y + self.offset.y) * self.zoom;
        if x.is_finite() && y.is_finite() {
            DVec2::new(x, y)
        } else {
            DVec2::ZERO
        }
    }

    /// Screen pixels to world point. Exact inverse of [`Camera2D::to_screen`].
    pub fn to_world(&self, screen: DVec2) -> DVec2 {
        if self.zoom == 0.0 {
            return DVec2::ZERO;
        }
        let x = screen.x / self.zoom - self.offset.x;
        let y = (self.screen_height - screen.y) / self.zoom - self.offset.y;
        if x.is_finite() && y.is_finite() {
            DVec2::new(x, y)
        } else {
            DVec2::ZERO
        }
    }

    /// Length in world units to pixels.
    pub fn scale(&self, world_length: f64) -> f64 {
        world_length * self.zoom
    }

    /// Zoom by `factor`, keeping the world point under `screen` fixed.
    pub fn zoom_at(&mut self, screen: DVec2, factor: f64) {
        let before = self.to_world(screen);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let after = self.to_world(screen);
        self.offset += after - before;
    }

    /// Zoom by whole wheel notches (positive zooms in).
    pub fn zoom_notches(&mut self, screen: DVec2, notches: i32) {
        if notches != 0 {
            self.zoom_at(screen, ZOOM_STEP.powi(notches));
        }
    }

    /// Pan by a pointer movement in screen pixels.
    pub fn pan(&mut self, screen_delta: DVec2) {
        if self.zoom == 0.0 {
            return;
        }
        self.offset += DVec2::new(screen_delta.x / self.zoom, -screen_delta.y / self.zoom);
    }

    /// Restore offset and zoom to defaults, keeping the viewport size.
    pub fn reset(&mut self) {
        self.offset = DVec2::ZERO;
        self.zoom = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_origin_maps_to_bottom_left() {
        let cam = Camera2D::new(600.0);
        assert_eq!(cam.to_screen(DVec2::ZERO), DVec2::new(0.0, 600.0));
        assert_eq!(cam.to_world(DVec2::new(0.0, 600.0)), DVec2::ZERO);
    }

    #[test]
    fn test_roundtrip_with_offset_and_zoom() {
        let cam = Camera2D {
            offset: DVec2::new(12.5, -40.0),
            zoom: 2.5,
            screen_height: 720.0,
        };
        let p = DVec2::new(33.0, 71.0);
        assert!(approx(cam.to_world(cam.to_screen(p)), p));
    }

    #[test]
    fn test_zero_zoom_is_guarded() {
        let cam = Camera2D {
            zoom: 0.0,
            ..Camera2D::default()
        };
        assert_eq!(cam.to_screen(DVec2::new(5.0, 5.0)), DVec2::ZERO);
        assert_eq!(cam.to_world(DVec2::new(5.0, 5.0)), DVec2::ZERO);
    }

    #[test]
    fn test_non_finite_result_is_replaced() {
        let cam = Camera2D::default();
        assert_eq!(cam.to_screen(DVec2::new(f64::INFINITY, 0.0)), DVec2::ZERO);
        assert_eq!(cam.to_screen(DVec2::new(f64::NAN, 1.0)), DVec2::ZERO);
    }

    #[test]
    fn test_double_zoom_keeps_cursor_point_fixed() {
        let mut cam = Camera2D::new(800.0);
        let p = DVec2::new(300.0, 250.0);
        let w = cam.to_world(p);
        cam.zoom_notches(p, 1);
        cam.zoom_notches(p, 1);
        assert!((cam.zoom - 1.21).abs() < 1e-9);
        assert!(approx(cam.to_world(p), w));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut cam = Camera2D::default();
        for _ in 0..100 {
            cam.zoom_notches(DVec2::new(10.0, 10.0), 1);
        }
        assert_eq!(cam.zoom, MAX_ZOOM);
        for _ in 0..200 {
            cam.zoom_notches(DVec2::new(10.0, 10.0), -1);
        }
        assert_eq!(cam.zoom, MIN_ZOOM);
    }

    #[test]
    fn test_pan_moves_world_with_pointer() {
        let mut cam = Camera2D::new(500.0);
        cam.zoom = 2.0;
        let w = DVec2::new(10.0, 10.0);
        let before = cam.to_screen(w);
        cam.pan(DVec2::new(40.0, -20.0));
        let after = cam.to_screen(w);
        assert!(approx(after - before, DVec2::new(40.0, -20.0)));
    }
}
