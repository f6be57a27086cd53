// Touch gesture state for the tree pane: single-finger pan, two-finger pinch.
#[derive(Debug, Default, Clone)]
pub struct TouchState {
    pub single_active: bool,
    pub pinch: bool,
    pub start_dist: f64,
    pub start_scale: f64,
    pub content_cx: f64,
    pub content_cy: f64,
    pub last_x: f64,
    pub last_y: f64,
}
