//! Player configuration: the user-facing embed config and its resolved form.
//!
//! User configs are sparse (every field optional, camelCase JSON as embedded in a
//! page). [`resolve`] fills them from [`PlayerDefaults`] once, at setup, and checks
//! everything that can be checked before assets arrive. The result is immutable.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::PlayerError;
use crate::render::{Color, DebugLayers};
use crate::runtime::SkeletonFormat;
use crate::time::DEFAULT_MAX_DELTA;
use crate::transition::DEFAULT_TRANSITION_TIME;
use crate::viewport::{ViewportOverride, DEFAULT_SAMPLE_STEPS};

/// Embed configuration as written by the user.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerConfig {
    /// URL of the skeleton file (`.json` or `.skel`).
    pub skeleton: Option<String>,
    /// URL of the texture atlas.
    pub atlas: Option<String>,
    /// Overrides the format inferred from the skeleton URL.
    pub skeleton_format: Option<SkeletonFormat>,
    /// Animation played on load.
    pub animation: Option<String>,
    /// Animations the user may select; all when absent.
    pub animations: Option<Vec<String>>,
    pub skin: Option<String>,
    /// Skins the user may select; all when absent.
    pub skins: Option<Vec<String>>,
    /// Bones the user may drag with the pointer.
    pub control_bones: Option<Vec<String>>,
    pub viewport: ViewportSettings,
    /// Cross-fade between animations, in seconds.
    pub default_mix: Option<f32>,
    /// Initial playback speed multiplier.
    pub speed: Option<f32>,
    /// Largest frame delta used for stepping, in seconds.
    pub max_delta: Option<f32>,
    /// Samples per animation when computing viewport bounds.
    pub sample_steps: Option<usize>,
    pub debug: DebugLayers,
    /// `#rrggbb` or `#rrggbbaa`.
    pub background_color: Option<String>,
    /// Start playing once loaded.
    pub autoplay: Option<bool>,
}

impl PlayerConfig {
    pub fn from_json(json: &str) -> Result<Self, PlayerError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Viewport section of [`PlayerConfig`]: a global override plus per-animation ones.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewportSettings {
    #[serde(flatten)]
    pub global: ViewportOverride,
    /// Overrides keyed by animation name, in declaration order.
    pub animations: IndexMap<String, ViewportOverride>,
    /// Seconds to blend from one animation's framing to the next.
    pub transition_time: Option<f32>,
    /// Outline the framed viewport each frame.
    pub debug_render: Option<bool>,
}

/// Values used for anything the user left out.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerDefaults {
    pub transition_time: f32,
    pub default_mix: f32,
    pub speed: f32,
    pub max_delta: f32,
    pub sample_steps: usize,
    pub background_color: Color,
    pub autoplay: bool,
}

impl Default for PlayerDefaults {
    fn default() -> Self {
        Self {
            transition_time: DEFAULT_TRANSITION_TIME,
            default_mix: 0.25,
            speed: 1.0,
            max_delta: DEFAULT_MAX_DELTA,
            sample_steps: DEFAULT_SAMPLE_STEPS,
            background_color: Color::BLACK,
            autoplay: true,
        }
    }
}

/// Viewport settings with defaults applied.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedViewport {
    pub global: ViewportOverride,
    pub animations: IndexMap<String, ViewportOverride>,
    pub transition_time: f32,
    pub debug_render: bool,
}

/// Fully resolved configuration, consumed read-only after setup.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    pub skeleton_url: String,
    pub atlas_url: String,
    pub skeleton_format: SkeletonFormat,
    pub animation: Option<String>,
    pub animations: Option<Vec<String>>,
    pub skin: Option<String>,
    pub skins: Option<Vec<String>>,
    pub control_bones: Vec<String>,
    pub viewport: ResolvedViewport,
    pub default_mix: f32,
    pub speed: f32,
    pub max_delta: f32,
    pub sample_steps: usize,
    pub debug: DebugLayers,
    pub background_color: Color,
    pub autoplay: bool,
}

impl ResolvedConfig {
    /// Whether `name` may be selected as the active animation.
    pub fn is_animation_selectable(&self, name: &str) -> bool {
        self.animations
            .as_ref()
            .map_or(true, |list| list.iter().any(|a| a == name))
    }

    /// Whether `name` may be selected as the active skin.
    pub fn is_skin_selectable(&self, name: &str) -> bool {
        self.skins
            .as_ref()
            .map_or(true, |list| list.iter().any(|s| s == name))
    }

    /// Viewport override for `animation`, if one was configured.
    pub fn viewport_override(&self, animation: &str) -> Option<&ViewportOverride> {
        self.viewport.animations.get(animation)
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, PlayerError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(PlayerError::MissingConfig {
            field: field.to_string(),
        }),
    }
}

fn non_negative(value: f32, field: &str) -> Result<f32, PlayerError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PlayerError::invalid_config(format!(
            "{field} must be a non-negative number, got {value}"
        )))
    }
}

/// Fill `user` from `defaults` and validate it.
///
/// Fails on the first problem; these are all fatal to setup.
pub fn resolve(
    user: PlayerConfig,
    defaults: &PlayerDefaults,
) -> Result<ResolvedConfig, PlayerError> {
    let skeleton_url = required(user.skeleton, "skeleton")?;
    let atlas_url = required(user.atlas, "atlas")?;
    let skeleton_format = user
        .skeleton_format
        .unwrap_or_else(|| SkeletonFormat::from_url(&skeleton_url));

    for (field, list) in [("animations", &user.animations), ("skins", &user.skins)] {
        if list.as_ref().is_some_and(Vec::is_empty) {
            return Err(PlayerError::invalid_config(format!(
                "{field} must list at least one name when given"
            )));
        }
    }

    if let (Some(animation), Some(list)) = (&user.animation, &user.animations) {
        if !list.contains(animation) {
            return Err(PlayerError::AnimationNotSelectable {
                name: animation.clone(),
            });
        }
    }
    if let (Some(skin), Some(list)) = (&user.skin, &user.skins) {
        if !list.contains(skin) {
            return Err(PlayerError::SkinNotSelectable { name: skin.clone() });
        }
    }

    let speed = match user.speed {
        Some(speed) => crate::playback::PlaybackState::check_speed(speed)?,
        None => defaults.speed,
    };
    let max_delta = user.max_delta.unwrap_or(defaults.max_delta);
    if !(max_delta.is_finite() && max_delta > 0.0) {
        return Err(PlayerError::invalid_config(format!(
            "maxDelta must be positive, got {max_delta}"
        )));
    }
    let sample_steps = user.sample_steps.unwrap_or(defaults.sample_steps);
    if sample_steps == 0 {
        return Err(PlayerError::invalid_config("sampleSteps must be at least 1"));
    }
    let default_mix = non_negative(user.default_mix.unwrap_or(defaults.default_mix), "defaultMix")?;
    let transition_time = non_negative(
        user.viewport
            .transition_time
            .unwrap_or(defaults.transition_time),
        "viewport.transitionTime",
    )?;

    user.viewport.global.validate("global")?;
    for (name, o) in &user.viewport.animations {
        o.validate(name)?;
    }

    let background_color = match &user.background_color {
        Some(hex) => Color::from_hex(hex)?,
        None => defaults.background_color,
    };

    Ok(ResolvedConfig {
        skeleton_url,
        atlas_url,
        skeleton_format,
        animation: user.animation,
        animations: user.animations,
        skin: user.skin,
        skins: user.skins,
        control_bones: user.control_bones.unwrap_or_default(),
        viewport: ResolvedViewport {
            global: user.viewport.global,
            animations: user.viewport.animations,
            transition_time,
            debug_render: user.viewport.debug_render.unwrap_or(false),
        },
        default_mix,
        speed,
        max_delta,
        sample_steps,
        debug: user.debug,
        background_color,
        autoplay: user.autoplay.unwrap_or(defaults.autoplay),
    })
}
