// Viewport state for the tree pane: pan offset + zoom scale, plus the
// bookkeeping needed while a drag is in progress.

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 2.0;
/// Fraction of the fit scale kept as visual margin around a freshly fitted tree.
pub const FIT_MARGIN: f64 = 0.9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Viewport {
    pub transform: Transform,
    pub panning: bool,
    pub last_x: f64,
    pub last_y: f64,
}

impl Viewport {
    pub fn begin_pan(&mut self, x: f64, y: f64) {
        self.panning = true;
        self.last_x = x;
        self.last_y = y;
    }

    pub fn pan_move(&mut self, x: f64, y: f64) {
        let dx = x - self.last_x;
        let dy = y - self.last_y;
        self.last_x = x;
        self.last_y = y;
        self.transform.x += dx;
        self.transform.y += dy;
    }

    pub fn end_pan(&mut self) {
        self.panning = false;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.transform.x += dx;
        self.transform.y += dy;
    }

    /// Zoom by `factor`, keeping the content point under (cx, cy) stationary.
    /// The resulting scale stays within [MIN_SCALE, MAX_SCALE].
    pub fn zoom_about(&mut self, cx: f64, cy: f64, factor: f64) {
        let old_scale = self.transform.scale;
        let new_scale = (old_scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let content_x = (cx - self.transform.x) / old_scale;
        let content_y = (cy - self.transform.y) / old_scale;
        self.transform.x = cx - content_x * new_scale;
        self.transform.y = cy - content_y * new_scale;
        self.transform.scale = new_scale;
    }
}

/// Transform that fits content of the given natural size into the container:
/// scale = min(fit_w, fit_h, 1) * FIT_MARGIN (never upscaled past 1 before the
/// margin), offsets chosen so the content midpoint lands on the container
/// midpoint. Degenerate content sizes fall back to the margin scale.
pub fn fit_transform(container_w: f64, container_h: f64, content_w: f64, content_h: f64) -> Transform {
    let scale = if content_w > 0.0 && content_h > 0.0 {
        ((container_w / content_w)
            .min(container_h / content_h)
            .min(1.0)
            * FIT_MARGIN)
            .clamp(MIN_SCALE, MAX_SCALE)
    } else {
        FIT_MARGIN
    };
    Transform {
        x: (container_w - content_w * scale) / 2.0,
        y: (container_h - content_h * scale) / 2.0,
        scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn fit_scales_down_and_centers() {
        let t = fit_transform(800.0, 600.0, 1000.0, 500.0);
        // min(0.8, 1.2, 1) = 0.8, applied at 90%
        assert!((t.scale - 0.72).abs() < EPS);
        assert!((t.x - 40.0).abs() < 1e-6);
        assert!((t.y - 120.0).abs() < 1e-6);
    }

    #[test]
    fn fit_never_upscales_past_the_margin() {
        let t = fit_transform(800.0, 600.0, 100.0, 100.0);
        assert!((t.scale - FIT_MARGIN).abs() < EPS);
    }

    #[test]
    fn fit_of_degenerate_content_stays_finite() {
        let t = fit_transform(800.0, 600.0, 0.0, 0.0);
        assert!((t.scale - FIT_MARGIN).abs() < EPS);
        assert!((t.x - 400.0).abs() < EPS);
        assert!((t.y - 300.0).abs() < EPS);
    }

    #[test]
    fn zoom_keeps_the_anchor_point_fixed() {
        let mut vp = Viewport::default();
        vp.zoom_about(100.0, 100.0, 2.0);
        assert!((vp.transform.scale - 2.0).abs() < EPS);
        // The content point that was under (100, 100) must still map there.
        let content_x = (100.0 - 0.0) / 1.0;
        assert!((content_x * vp.transform.scale + vp.transform.x - 100.0).abs() < EPS);
    }

    #[test]
    fn zoom_clamps_to_bounds() {
        let mut vp = Viewport::default();
        vp.zoom_about(0.0, 0.0, 100.0);
        assert!((vp.transform.scale - MAX_SCALE).abs() < EPS);
        vp.zoom_about(0.0, 0.0, 0.0001);
        assert!((vp.transform.scale - MIN_SCALE).abs() < EPS);
    }

    #[test]
    fn pan_accumulates_drag_deltas() {
        let mut vp = Viewport::default();
        vp.begin_pan(10.0, 10.0);
        assert!(vp.panning);
        vp.pan_move(25.0, 4.0);
        vp.pan_move(30.0, 0.0);
        vp.end_pan();
        assert!(!vp.panning);
        assert!((vp.transform.x - 20.0).abs() < EPS);
        assert!((vp.transform.y + 10.0).abs() < EPS);
    }
}
