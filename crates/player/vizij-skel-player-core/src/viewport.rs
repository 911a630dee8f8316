//! Viewport calculation: where the camera should look for a given animation.
//!
//! Bounds come from sampling the whole timeline, since a rig can swing far outside
//! its rest-pose box mid-cycle. User overrides and padding are merged on top.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::PlayerError;
use crate::runtime::{AnimationInfo, AnimationState, Skeleton};

/// Samples taken across an animation's duration when computing its bounds.
pub const DEFAULT_SAMPLE_STEPS: usize = 100;

/// Padding applied on every side when neither override sets one.
pub const DEFAULT_PAD: Pad = Pad::Percent(10.0);

/// Axis-aligned rectangle in skeleton space (y up, `y` is the bottom edge).
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Field-wise linear interpolation; `alpha = 0` is `self`, `alpha = 1` is `other`.
    #[inline]
    pub fn lerp(&self, other: &Rect, alpha: f32) -> Rect {
        Rect {
            x: self.x + (other.x - self.x) * alpha,
            y: self.y + (other.y - self.y) * alpha,
            width: self.width + (other.width - self.width) * alpha,
            height: self.height + (other.height - self.height) * alpha,
        }
    }
}

/// Padding amount: absolute skeleton units or a percentage of the padded dimension.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PadRepr", into = "PadRepr")]
pub enum Pad {
    Absolute(f32),
    Percent(f32),
}

impl Pad {
    /// Parse `"12.5%"` as a percentage or `"40"` as absolute units.
    pub fn parse(text: &str) -> Result<Self, PlayerError> {
        let text = text.trim();
        let (number, percent) = match text.strip_suffix('%') {
            Some(n) => (n.trim(), true),
            None => (text, false),
        };
        let value: f32 = number
            .parse()
            .map_err(|_| PlayerError::invalid_config(format!("pad '{text}' is not a number")))?;
        if !value.is_finite() {
            return Err(PlayerError::invalid_config(format!(
                "pad '{text}' must be finite"
            )));
        }
        Ok(if percent {
            Self::Percent(value)
        } else {
            Self::Absolute(value)
        })
    }

    /// Absolute pad for a side whose viewport dimension is `dimension`.
    #[inline]
    pub fn resolve(self, dimension: f32) -> f32 {
        match self {
            Self::Absolute(v) => v,
            Self::Percent(p) => dimension * p / 100.0,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum PadRepr {
    Number(f32),
    Text(String),
}

impl TryFrom<PadRepr> for Pad {
    type Error = String;

    fn try_from(repr: PadRepr) -> Result<Self, Self::Error> {
        match repr {
            PadRepr::Number(v) if v.is_finite() => Ok(Pad::Absolute(v)),
            PadRepr::Number(v) => Err(format!("pad {v} must be finite")),
            PadRepr::Text(s) => Pad::parse(&s).map_err(|e| e.to_string()),
        }
    }
}

impl From<Pad> for PadRepr {
    fn from(pad: Pad) -> Self {
        match pad {
            Pad::Absolute(v) => PadRepr::Number(v),
            Pad::Percent(p) => PadRepr::Text(format!("{p}%")),
        }
    }
}

/// Partial viewport supplied by the user, globally or for one animation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewportOverride {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub pad_left: Option<Pad>,
    pub pad_right: Option<Pad>,
    pub pad_top: Option<Pad>,
    pub pad_bottom: Option<Pad>,
}

impl ViewportOverride {
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn with_pads(mut self, pad: Pad) -> Self {
        self.pad_left = Some(pad);
        self.pad_right = Some(pad);
        self.pad_top = Some(pad);
        self.pad_bottom = Some(pad);
        self
    }

    /// Reject negative sizes and non-finite coordinates.
    pub fn validate(&self, scope: &str) -> Result<(), PlayerError> {
        for (field, value) in [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
        ] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(PlayerError::invalid_config(format!(
                        "{scope} viewport {field} must be finite"
                    )));
                }
            }
        }
        if self.width.is_some_and(|w| w < 0.0) || self.height.is_some_and(|h| h < 0.0) {
            return Err(PlayerError::invalid_config(format!(
                "{scope} viewport width and height must be non-negative"
            )));
        }
        Ok(())
    }
}

/// Resolved camera framing for one animation: a rectangle plus absolute pads.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub pad_left: f32,
    pub pad_right: f32,
    pub pad_top: f32,
    pub pad_bottom: f32,
}

impl Viewport {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// The rectangle grown by its pads; this is what the camera frames.
    #[inline]
    pub fn padded(&self) -> Rect {
        Rect {
            x: self.x - self.pad_left,
            y: self.y - self.pad_bottom,
            width: self.width + self.pad_left + self.pad_right,
            height: self.height + self.pad_top + self.pad_bottom,
        }
    }
}

/// Bounding box of every sampled pose of `animation`.
///
/// Leaves the skeleton in setup pose with `animation` as the only (looped) track,
/// advanced to its last sample. A zero-duration animation is sampled once.
pub fn compute_animation_viewport<S, A>(
    skeleton: &mut S,
    state: &mut A,
    animation: &AnimationInfo,
    sample_steps: usize,
) -> Rect
where
    S: Skeleton,
    A: AnimationState<Skeleton = S>,
{
    let (steps, step_time) = if animation.duration > 0.0 {
        let steps = sample_steps.max(1);
        (steps, animation.duration / steps as f32)
    } else {
        (1, 0.0)
    };

    skeleton.set_to_setup_pose();
    state.clear_tracks();
    state.set_animation(0, &animation.name, true);

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for i in 0..steps {
        if i > 0 {
            state.update(step_time);
        }
        state.apply(skeleton);
        skeleton.update_world_transform();

        let bounds = skeleton.bounds();
        if !bounds.is_finite() {
            warn!(animation = %animation.name, sample = i, "skipping invalid bounds sample");
            continue;
        }
        min_x = min_x.min(bounds.x);
        min_y = min_y.min(bounds.y);
        max_x = max_x.max(bounds.x + bounds.width);
        max_y = max_y.max(bounds.y + bounds.height);
    }

    if min_x > max_x || min_y > max_y {
        warn!(animation = %animation.name, "no valid bounds samples; using an empty viewport");
        return Rect::default();
    }
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// Merge overrides onto computed bounds.
///
/// Every rectangle field and every pad resolves on its own: the per-animation
/// override wins, then the global override, then the computed value (or
/// [`DEFAULT_PAD`]). Percent pads resolve against the final width or height.
pub fn resolve_viewport(
    computed: Rect,
    global: &ViewportOverride,
    animation: Option<&ViewportOverride>,
) -> Viewport {
    let field = |get: fn(&ViewportOverride) -> Option<f32>, fallback: f32| {
        animation.and_then(get).or_else(|| get(global)).unwrap_or(fallback)
    };
    let pad = |get: fn(&ViewportOverride) -> Option<Pad>| {
        animation
            .and_then(get)
            .or_else(|| get(global))
            .unwrap_or(DEFAULT_PAD)
    };

    let width = field(|o| o.width, computed.width).max(0.0);
    let height = field(|o| o.height, computed.height).max(0.0);

    Viewport {
        x: field(|o| o.x, computed.x),
        y: field(|o| o.y, computed.y),
        width,
        height,
        pad_left: pad(|o| o.pad_left).resolve(width),
        pad_right: pad(|o| o.pad_right).resolve(width),
        pad_top: pad(|o| o.pad_top).resolve(height),
        pad_bottom: pad(|o| o.pad_bottom).resolve(height),
    }
}
