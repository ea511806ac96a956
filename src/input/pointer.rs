use crate::foundation::core::{Vec2, Viewport};

/// Tracks normalized pointer position and the frame-to-frame delta used as a
/// velocity proxy.
///
/// One instance is constructed by the composition root and passed by
/// reference to consumers; there is no global state. The host forwards raw
/// pointer-move / touch-move events in viewport pixel coordinates and the
/// tracker normalizes them to `[-1, 1]` on both axes with y pointing up.
///
/// No smoothing is applied: `speed()` is a raw single-event delta and is
/// only meaningful as a coarse "is the pointer moving fast" signal.
#[derive(Clone, Debug)]
pub struct PointerTracker {
    position: Vec2,
    prev_position: Vec2,
    disposed: bool,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            prev_position: Vec2::ZERO,
            disposed: false,
        }
    }

    /// Handle a pointer-move event at pixel coordinates `(px, py)`.
    pub fn pointer_move(&mut self, px: f64, py: f64, viewport: &Viewport) {
        if self.disposed {
            return;
        }
        self.prev_position = self.position;
        self.position = normalize(px, py, viewport);
    }

    /// Handle a touch-move event. Only the first active touch point is used;
    /// an empty touch list is a no-op.
    pub fn touch_move(&mut self, touches: &[(f64, f64)], viewport: &Viewport) {
        if self.disposed {
            return;
        }
        let Some(&(px, py)) = touches.first() else {
            return;
        };
        self.prev_position = self.position;
        self.position = normalize(px, py, viewport);
    }

    /// Normalized pointer position in `[-1, 1]²`, y up.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Frame-to-frame pointer delta.
    ///
    /// Both components carry the x-axis delta; the effect only ever reads the
    /// horizontal component.
    pub fn speed(&self) -> Vec2 {
        let dx = self.position.x - self.prev_position.x;
        Vec2::new(dx, dx)
    }

    /// Stop accepting input events. Idempotent; a fresh tracker can be
    /// constructed at any time afterwards.
    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

fn normalize(px: f64, py: f64, viewport: &Viewport) -> Vec2 {
    if viewport.is_degenerate() {
        return Vec2::ZERO;
    }
    let x = (px / viewport.width) * 2.0 - 1.0;
    let y = -((py / viewport.height) * 2.0 - 1.0);
    Vec2::new(x, y)
}
