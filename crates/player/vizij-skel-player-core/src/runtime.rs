//! Contracts for the skeletal-animation runtime and the asset download layer.
//!
//! The player never poses bones or parses atlases itself. Adapters wrap a concrete
//! runtime in these traits; the test fixtures crate ships a deterministic one.

use serde::{Deserialize, Serialize};

use crate::viewport::Rect;

/// Encoding of the skeleton file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkeletonFormat {
    Json,
    Binary,
}

impl SkeletonFormat {
    /// Guess the format from a skeleton URL: `.skel` files are binary.
    pub fn from_url(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        if path.to_ascii_lowercase().ends_with(".skel") {
            Self::Binary
        } else {
            Self::Json
        }
    }
}

/// Name and length of one animation in the skeleton data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationInfo {
    pub name: String,
    /// Seconds; 0 for a single-pose animation.
    pub duration: f32,
}

/// Playback slot state as reported by [`AnimationState::current`].
#[derive(Clone, Debug, PartialEq)]
pub struct TrackEntry {
    pub animation: AnimationInfo,
    pub looped: bool,
}

/// Immutable rig description produced by loading assets.
pub trait SkeletonData {
    fn find_animation(&self, name: &str) -> Option<AnimationInfo>;
    fn find_skin(&self, name: &str) -> bool;
    fn find_bone(&self, name: &str) -> bool;
    /// Animations in declaration order.
    fn animations(&self) -> Vec<AnimationInfo>;
    /// Skin names in declaration order.
    fn skins(&self) -> Vec<String>;
}

/// A posed instance of a rig.
pub trait Skeleton {
    fn set_to_setup_pose(&mut self);
    fn set_slots_to_setup_pose(&mut self);
    fn set_skin_by_name(&mut self, name: &str);
    fn update_world_transform(&mut self);
    /// Axis-aligned bounds of the current world pose, y up.
    fn bounds(&self) -> Rect;
    fn bone_world_position(&self, bone: &str) -> Option<(f32, f32)>;
    fn set_bone_world_position(&mut self, bone: &str, x: f32, y: f32);
}

/// Track-based animation mixer that poses a [`Skeleton`].
pub trait AnimationState {
    type Skeleton: Skeleton;

    fn set_animation(&mut self, track: usize, animation: &str, looped: bool);
    fn update(&mut self, delta: f32);
    fn apply(&mut self, skeleton: &mut Self::Skeleton);
    fn clear_tracks(&mut self);
    fn current(&self, track: usize) -> Option<TrackEntry>;
    /// Cross-fade duration used when one animation replaces another on a track.
    fn set_default_mix(&mut self, mix: f32);
}

/// Factory for skeleton data and its runtime instances.
pub trait AnimationRuntime {
    type Data: SkeletonData;
    type Skeleton: Skeleton;
    type State: AnimationState<Skeleton = Self::Skeleton>;
    type Error: std::fmt::Display;

    fn load_skeleton_data(
        &mut self,
        atlas: &[u8],
        skeleton: &[u8],
        format: SkeletonFormat,
    ) -> Result<Self::Data, Self::Error>;
    fn create_skeleton(&mut self, data: &Self::Data) -> Self::Skeleton;
    fn create_animation_state(&mut self, data: &Self::Data) -> Self::State;
}

/// Fetches raw asset bytes by URL.
///
/// Hosts with asynchronous fetch resolve both files first and hand the player an
/// in-memory source; the player only needs the bytes once.
pub trait AssetSource {
    type Error: std::fmt::Display;

    fn fetch(&mut self, url: &str) -> Result<Vec<u8>, Self::Error>;
}
