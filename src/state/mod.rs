pub mod touch;
pub mod viewport;

pub use touch::TouchState;
pub use viewport::{MAX_SCALE, MIN_SCALE, Transform, Viewport, fit_transform};
