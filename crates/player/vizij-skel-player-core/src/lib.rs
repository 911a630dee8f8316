//! Vizij Skeletal Player Core (engine-agnostic)
//!
//! The framing and time-stepping half of an embeddable skeletal-animation player.
//! Rendering, posing and asset parsing belong to collaborators described by the
//! traits in [`runtime`] and [`render`]; this crate decides *when* the pose moves
//! and *where* the camera looks:
//!
//! - [`time::TimeKeeper`] turns wall-clock readings into a clamped frame delta.
//! - [`viewport`] samples an animation's bounds across its timeline and merges
//!   user overrides and padding into a [`viewport::Viewport`].
//! - [`transition::TransitionState`] blends the previous framing into the new one.
//! - [`playback::PlaybackState`] advances and wraps play time, and backs scrubbing.
//! - [`player::Player`] runs all of the above once per host tick.

pub mod config;
pub mod error;
pub mod player;
pub mod playback;
pub mod render;
pub mod runtime;
pub mod time;
pub mod transition;
pub mod viewport;

// Re-exports for hosts and adapters
pub use config::{resolve, PlayerConfig, PlayerDefaults, ResolvedConfig, ViewportSettings};
pub use error::PlayerError;
pub use playback::{PlaybackState, ScrubBar, TransportState};
pub use player::Player;
pub use render::{Color, DebugLayer, DebugLayers, NodeId, RenderEngine};
pub use runtime::{
    AnimationInfo, AnimationRuntime, AnimationState, AssetSource, Skeleton, SkeletonData,
    SkeletonFormat, TrackEntry,
};
pub use time::{Clock, SystemClock, TimeKeeper};
pub use transition::{CameraFraming, TransitionState};
pub use viewport::{
    compute_animation_viewport, resolve_viewport, Pad, Rect, Viewport, ViewportOverride,
};

/// Player result type
pub type Result<T> = core::result::Result<T, PlayerError>;
