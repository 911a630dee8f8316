//! Viewport transitions and the camera framing handed to the renderer.

use serde::{Deserialize, Serialize};

use crate::viewport::{Rect, Viewport};

/// Default length of a viewport transition, in seconds.
pub const DEFAULT_TRANSITION_TIME: f32 = 0.2;

/// Blend from the previously framed rectangle to the current viewport.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionState {
    /// Padded rectangle that was on screen when the transition started.
    pub previous: Option<Rect>,
    pub current: Viewport,
    /// Wall-clock time of the switch, in seconds.
    pub started_at: f64,
}

impl TransitionState {
    /// First framing: nothing to blend from.
    pub fn new(current: Viewport, now: f64) -> Self {
        Self {
            previous: None,
            current,
            started_at: now,
        }
    }

    /// Restart towards `next`, beginning from whatever is framed at `now`.
    ///
    /// Retargeting mid-blend starts from the blended rectangle, so the camera never jumps.
    #[must_use]
    pub fn retarget(&self, next: Viewport, now: f64, transition_time: f32) -> Self {
        Self {
            previous: Some(self.blend(now, transition_time)),
            current: next,
            started_at: now,
        }
    }

    /// Progress of the transition at `now`; not clamped.
    #[inline]
    pub fn alpha(&self, now: f64, transition_time: f32) -> f32 {
        if transition_time <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / transition_time as f64) as f32
    }

    /// Still interpolating at `now`. Callers decide on this, not on `previous` being set.
    #[inline]
    pub fn is_blending(&self, now: f64, transition_time: f32) -> bool {
        self.previous.is_some() && self.alpha(now, transition_time) < 1.0
    }

    /// Padded rectangle to frame at `now`.
    pub fn blend(&self, now: f64, transition_time: f32) -> Rect {
        let target = self.current.padded();
        match self.previous {
            Some(previous) => {
                let alpha = self.alpha(now, transition_time);
                if alpha < 1.0 {
                    // Retargeting with a clock that stepped back can give a negative alpha.
                    previous.lerp(&target, alpha.max(0.0))
                } else {
                    target
                }
            }
            None => target,
        }
    }
}

/// Uniform scale and translation that fit a skeleton-space rectangle into the canvas.
///
/// Maps skeleton `(x, y)` to canvas `(self.x + x * scale, self.y - y * scale)`;
/// canvas y points down.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraFraming {
    pub scale: f32,
    pub x: f32,
    pub y: f32,
}

impl CameraFraming {
    /// Fit `rect` inside a `canvas_width` x `canvas_height` canvas, centered, preserving
    /// aspect ratio. `None` when either side is empty.
    pub fn fit(rect: Rect, canvas_width: f32, canvas_height: f32) -> Option<Self> {
        let visible = rect.width > 0.0 && rect.height > 0.0;
        if !(visible && canvas_width > 0.0 && canvas_height > 0.0) {
            return None;
        }
        let scale = (canvas_width / rect.width).min(canvas_height / rect.height);
        let (cx, cy) = rect.center();
        Some(Self {
            scale,
            x: canvas_width * 0.5 - cx * scale,
            y: canvas_height * 0.5 + cy * scale,
        })
    }

    #[inline]
    pub fn to_canvas(&self, x: f32, y: f32) -> (f32, f32) {
        (self.x + x * self.scale, self.y - y * self.scale)
    }

    #[inline]
    pub fn to_skeleton(&self, canvas_x: f32, canvas_y: f32) -> (f32, f32) {
        (
            (canvas_x - self.x) / self.scale,
            (self.y - canvas_y) / self.scale,
        )
    }
}
