//! Error types for the skeletal player

use serde::{Deserialize, Serialize};

/// Everything that can go wrong between reading a config and the first rendered frame.
///
/// Variants fall into three families (see [`PlayerError::category`]):
/// configuration problems found before any asset is fetched, references from the
/// configuration into the loaded skeleton that do not resolve, and load failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlayerError {
    /// A required configuration value was not provided
    #[error("Missing config: {field}")]
    MissingConfig { field: String },

    /// Configured animation is not part of the selectable animation list
    #[error("Animation '{name}' is not in the list of selectable animations")]
    AnimationNotSelectable { name: String },

    /// Configured skin is not part of the selectable skin list
    #[error("Skin '{name}' is not in the list of selectable skins")]
    SkinNotSelectable { name: String },

    /// A configuration value is present but unusable
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// Animation name does not exist in the skeleton data
    #[error("Animation not found in skeleton data: {name}")]
    AnimationNotFound { name: String },

    /// Skin name does not exist in the skeleton data
    #[error("Skin not found in skeleton data: {name}")]
    SkinNotFound { name: String },

    /// Control bone does not exist in the skeleton data
    #[error("Control bone not found in skeleton data: {name}")]
    ControlBoneNotFound { name: String },

    /// Viewport override keyed by an animation the skeleton does not have
    #[error("Viewport override references unknown animation: {name}")]
    ViewportAnimationNotFound { name: String },

    /// Fetching or parsing an asset failed
    #[error("Failed to load '{url}': {reason}")]
    Load { url: String, reason: String },

    /// Operation requires the player to have finished setup
    #[error("Player is not loaded")]
    NotLoaded,

    /// Playback speed must be a finite, positive multiplier
    #[error("Invalid playback speed: {speed}")]
    InvalidSpeed { speed: f32 },
}

impl PlayerError {
    /// Shorthand for [`PlayerError::InvalidConfig`].
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Fatal errors halt setup on the spot; asset-reference errors let the remaining
    /// checks run so every broken reference gets reported.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        !matches!(self.category(), "asset_reference")
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingConfig { .. }
            | Self::AnimationNotSelectable { .. }
            | Self::SkinNotSelectable { .. }
            | Self::InvalidConfig { .. } => "config",
            Self::AnimationNotFound { .. }
            | Self::SkinNotFound { .. }
            | Self::ControlBoneNotFound { .. }
            | Self::ViewportAnimationNotFound { .. } => "asset_reference",
            Self::Load { .. } => "load",
            Self::NotLoaded | Self::InvalidSpeed { .. } => "state",
        }
    }
}

impl From<serde_json::Error> for PlayerError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig {
            reason: err.to_string(),
        }
    }
}
