use crate::draw::render_strands;

use super::{DrawingState, InputState};

impl InputState {
    /// Renders the in-progress freehand stroke, if any.
    ///
    /// Drag shapes and polygons are live scene objects and render with the
    /// scene; only brush strokes live outside it until pointer-up. Call this
    /// after rendering the scene.
    pub fn render_provisional(&self, ctx: &cairo::Context) {
        if let DrawingState::Brushing { profile, sink } = &self.state {
            render_strands(ctx, sink.inner().strands(), &profile.style);
        }
    }

    /// Returns true when there is something to draw on top of the scene.
    pub fn has_provisional(&self) -> bool {
        matches!(self.state, DrawingState::Brushing { .. })
    }
}
