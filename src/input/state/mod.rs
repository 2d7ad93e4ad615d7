mod core;
mod mouse;
mod polygon;
mod render;
#[cfg(test)]
mod tests;

pub use core::{Commit, DrawingState, InputState, MAX_WIDTH, MIN_WIDTH, PolygonBuilder};
