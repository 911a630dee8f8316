//! Deterministic stand-ins for the player's collaborators.
//!
//! The mock runtime reads the skeleton fixture JSON and poses a skeleton by
//! interpolating per-animation bounds keys, so framing tests know exactly which
//! rectangle every sample produces.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use vizij_skel_player::{
    AnimationInfo, AnimationRuntime, AnimationState, AssetSource, Clock, Color, DebugLayer,
    NodeId, Rect, RenderEngine, Skeleton, SkeletonData, SkeletonFormat, TrackEntry,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkeletonFixture {
    #[serde(default)]
    pub bones: Vec<BoneFixture>,
    #[serde(default)]
    pub skins: Vec<String>,
    pub setup_bounds: Rect,
    #[serde(default)]
    pub animations: Vec<AnimationFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoneFixture {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnimationFixture {
    pub name: String,
    pub duration: f32,
    /// Pose bounds keyed by time, ascending. Empty means the setup bounds throughout.
    #[serde(default)]
    pub bounds: Vec<BoundsKey>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BoundsKey {
    pub time: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundsKey {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl AnimationFixture {
    pub fn info(&self) -> AnimationInfo {
        AnimationInfo {
            name: self.name.clone(),
            duration: self.duration,
        }
    }

    /// Bounds of the pose at `time`, linearly interpolated between keys.
    pub fn bounds_at(&self, time: f32, setup: Rect) -> Rect {
        let (Some(first), Some(last)) = (self.bounds.first(), self.bounds.last()) else {
            return setup;
        };
        if time <= first.time {
            return first.rect();
        }
        if time >= last.time {
            return last.rect();
        }
        for pair in self.bounds.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if time >= a.time && time <= b.time {
                let span = b.time - a.time;
                let alpha = if span > 0.0 { (time - a.time) / span } else { 1.0 };
                return a.rect().lerp(&b.rect(), alpha);
            }
        }
        last.rect()
    }

    /// Local animation time for a track that has run `elapsed` seconds.
    pub fn local_time(&self, elapsed: f32, looped: bool) -> f32 {
        if self.duration <= 0.0 {
            0.0
        } else if looped {
            elapsed.rem_euclid(self.duration)
        } else {
            elapsed.min(self.duration)
        }
    }
}

impl SkeletonFixture {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse skeleton fixture")
    }

    pub fn animation(&self, name: &str) -> Option<&AnimationFixture> {
        self.animations.iter().find(|a| a.name == name)
    }

    pub fn bone(&self, name: &str) -> Option<&BoneFixture> {
        self.bones.iter().find(|b| b.name == name)
    }
}

#[derive(Debug, Clone)]
pub struct MockData {
    fixture: Rc<SkeletonFixture>,
    format: SkeletonFormat,
}

impl MockData {
    pub fn fixture(&self) -> &SkeletonFixture {
        &self.fixture
    }

    pub fn format(&self) -> SkeletonFormat {
        self.format
    }
}

impl SkeletonData for MockData {
    fn find_animation(&self, name: &str) -> Option<AnimationInfo> {
        self.fixture.animation(name).map(AnimationFixture::info)
    }

    fn find_skin(&self, name: &str) -> bool {
        self.fixture.skins.iter().any(|s| s == name)
    }

    fn find_bone(&self, name: &str) -> bool {
        self.fixture.bone(name).is_some()
    }

    fn animations(&self) -> Vec<AnimationInfo> {
        self.fixture.animations.iter().map(AnimationFixture::info).collect()
    }

    fn skins(&self) -> Vec<String> {
        self.fixture.skins.clone()
    }
}

/// Pose applied by the last [`MockState::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedPose {
    pub animation: String,
    pub time: f32,
}

#[derive(Debug)]
pub struct MockSkeleton {
    fixture: Rc<SkeletonFixture>,
    skin: Option<String>,
    pose_bounds: Rect,
    pose: Option<AppliedPose>,
    bone_overrides: HashMap<String, (f32, f32)>,
    slot_resets: usize,
    world_updates: usize,
    bounds_queries: Cell<usize>,
    invalid_samples: HashSet<usize>,
}

impl MockSkeleton {
    /// Make the `n`th call to `bounds` (zero-based) report a non-finite rectangle.
    pub fn with_invalid_samples(mut self, samples: impl IntoIterator<Item = usize>) -> Self {
        self.invalid_samples.extend(samples);
        self
    }

    pub fn skin(&self) -> Option<&str> {
        self.skin.as_deref()
    }

    pub fn pose(&self) -> Option<&AppliedPose> {
        self.pose.as_ref()
    }

    pub fn bounds_queries(&self) -> usize {
        self.bounds_queries.get()
    }

    pub fn slot_resets(&self) -> usize {
        self.slot_resets
    }

    pub fn world_updates(&self) -> usize {
        self.world_updates
    }
}

impl Skeleton for MockSkeleton {
    fn set_to_setup_pose(&mut self) {
        self.pose_bounds = self.fixture.setup_bounds;
        self.pose = None;
    }

    fn set_slots_to_setup_pose(&mut self) {
        self.slot_resets += 1;
    }

    fn set_skin_by_name(&mut self, name: &str) {
        self.skin = Some(name.to_string());
    }

    fn update_world_transform(&mut self) {
        self.world_updates += 1;
    }

    fn bounds(&self) -> Rect {
        let query = self.bounds_queries.get();
        self.bounds_queries.set(query + 1);
        if self.invalid_samples.contains(&query) {
            Rect::new(f32::NAN, 0.0, f32::INFINITY, 0.0)
        } else {
            self.pose_bounds
        }
    }

    fn bone_world_position(&self, bone: &str) -> Option<(f32, f32)> {
        if let Some(&pos) = self.bone_overrides.get(bone) {
            return Some(pos);
        }
        self.fixture.bone(bone).map(|b| (b.x, b.y))
    }

    fn set_bone_world_position(&mut self, bone: &str, x: f32, y: f32) {
        if self.fixture.bone(bone).is_some() {
            self.bone_overrides.insert(bone.to_string(), (x, y));
        }
    }
}

#[derive(Debug, Clone)]
struct MockTrack {
    animation: String,
    looped: bool,
    elapsed: f32,
}

#[derive(Debug)]
pub struct MockState {
    fixture: Rc<SkeletonFixture>,
    tracks: Vec<Option<MockTrack>>,
    default_mix: f32,
}

impl MockState {
    pub fn default_mix(&self) -> f32 {
        self.default_mix
    }

    /// Seconds track `track` has run, unwrapped.
    pub fn elapsed(&self, track: usize) -> Option<f32> {
        self.tracks.get(track)?.as_ref().map(|t| t.elapsed)
    }
}

impl AnimationState for MockState {
    type Skeleton = MockSkeleton;

    fn set_animation(&mut self, track: usize, animation: &str, looped: bool) {
        if self.fixture.animation(animation).is_none() {
            return;
        }
        if self.tracks.len() <= track {
            self.tracks.resize(track + 1, None);
        }
        self.tracks[track] = Some(MockTrack {
            animation: animation.to_string(),
            looped,
            elapsed: 0.0,
        });
    }

    fn update(&mut self, delta: f32) {
        for track in self.tracks.iter_mut().flatten() {
            track.elapsed += delta;
        }
    }

    fn apply(&mut self, skeleton: &mut MockSkeleton) {
        let Some(track) = self.tracks.first().and_then(Option::as_ref) else {
            return;
        };
        let Some(animation) = self.fixture.animation(&track.animation) else {
            return;
        };
        let time = animation.local_time(track.elapsed, track.looped);
        skeleton.pose_bounds = animation.bounds_at(time, self.fixture.setup_bounds);
        skeleton.pose = Some(AppliedPose {
            animation: animation.name.clone(),
            time,
        });
    }

    fn clear_tracks(&mut self) {
        self.tracks.clear();
    }

    fn current(&self, track: usize) -> Option<TrackEntry> {
        let entry = self.tracks.get(track)?.as_ref()?;
        let animation = self.fixture.animation(&entry.animation)?;
        Some(TrackEntry {
            animation: animation.info(),
            looped: entry.looped,
        })
    }

    fn set_default_mix(&mut self, mix: f32) {
        self.default_mix = mix;
    }
}

/// Runtime that parses skeleton fixtures; the atlas only has to be non-empty.
#[derive(Debug, Default)]
pub struct MockRuntime {
    loads: usize,
}

impl MockRuntime {
    pub fn loads(&self) -> usize {
        self.loads
    }
}

impl AnimationRuntime for MockRuntime {
    type Data = MockData;
    type Skeleton = MockSkeleton;
    type State = MockState;
    type Error = anyhow::Error;

    fn load_skeleton_data(
        &mut self,
        atlas: &[u8],
        skeleton: &[u8],
        format: SkeletonFormat,
    ) -> Result<MockData> {
        self.loads += 1;
        if atlas.is_empty() {
            bail!("atlas is empty");
        }
        if format == SkeletonFormat::Binary {
            bail!("binary skeletons are not supported by the mock runtime");
        }
        let text = std::str::from_utf8(skeleton).context("skeleton is not UTF-8")?;
        let fixture = SkeletonFixture::from_json(text)?;
        Ok(MockData {
            fixture: Rc::new(fixture),
            format,
        })
    }

    fn create_skeleton(&mut self, data: &MockData) -> MockSkeleton {
        MockSkeleton {
            fixture: Rc::clone(&data.fixture),
            skin: None,
            pose_bounds: data.fixture.setup_bounds,
            pose: None,
            bone_overrides: HashMap::new(),
            slot_resets: 0,
            world_updates: 0,
            bounds_queries: Cell::new(0),
            invalid_samples: HashSet::new(),
        }
    }

    fn create_animation_state(&mut self, data: &MockData) -> MockState {
        MockState {
            fixture: Rc::clone(&data.fixture),
            tracks: Vec::new(),
            default_mix: 0.0,
        }
    }
}

/// One call made on [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    CreateScene,
    CreateSkeletonNode(NodeId),
    AddToScene(NodeId),
    SetScale(NodeId, f32),
    SetPosition(NodeId, f32, f32),
    Background(Color),
    DebugLayer(NodeId, DebugLayer, bool),
    DebugRect(NodeId, Rect, Color),
    /// Skeleton drawn, with the pose it was drawn in.
    Draw(NodeId, Option<AppliedPose>),
}

/// Render engine that only records what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Vec<RenderCall>,
    next_node: u32,
}

impl RecordingRenderer {
    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn draws(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, RenderCall::Draw(..)))
            .count()
    }

    pub fn last_scale(&self) -> Option<f32> {
        self.calls.iter().rev().find_map(|c| match c {
            RenderCall::SetScale(_, s) => Some(*s),
            _ => None,
        })
    }

    pub fn last_position(&self) -> Option<(f32, f32)> {
        self.calls.iter().rev().find_map(|c| match c {
            RenderCall::SetPosition(_, x, y) => Some((*x, *y)),
            _ => None,
        })
    }

    /// Last enabled state pushed for `layer`.
    pub fn layer_enabled(&self, layer: DebugLayer) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            RenderCall::DebugLayer(_, l, enabled) if *l == layer => Some(*enabled),
            _ => None,
        })
    }

    pub fn debug_rects(&self) -> Vec<(Rect, Color)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RenderCall::DebugRect(_, rect, color) => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }
}

impl RenderEngine<MockSkeleton> for RecordingRenderer {
    fn create_scene(&mut self) {
        self.calls.push(RenderCall::CreateScene);
    }

    fn create_skeleton_node(&mut self) -> NodeId {
        self.next_node += 1;
        let node = NodeId(self.next_node);
        self.calls.push(RenderCall::CreateSkeletonNode(node));
        node
    }

    fn add_to_scene(&mut self, node: NodeId) {
        self.calls.push(RenderCall::AddToScene(node));
    }

    fn set_node_scale(&mut self, node: NodeId, scale: f32) {
        self.calls.push(RenderCall::SetScale(node, scale));
    }

    fn set_node_position(&mut self, node: NodeId, x: f32, y: f32) {
        self.calls.push(RenderCall::SetPosition(node, x, y));
    }

    fn set_background_color(&mut self, color: Color) {
        self.calls.push(RenderCall::Background(color));
    }

    fn set_debug_layer(&mut self, node: NodeId, layer: DebugLayer, enabled: bool) {
        self.calls.push(RenderCall::DebugLayer(node, layer, enabled));
    }

    fn draw_debug_rect(&mut self, node: NodeId, rect: Rect, color: Color) {
        self.calls.push(RenderCall::DebugRect(node, rect, color));
    }

    fn draw(&mut self, node: NodeId, skeleton: &MockSkeleton) {
        self.calls.push(RenderCall::Draw(node, skeleton.pose().cloned()));
    }
}

/// Asset source backed by an in-memory map of URL to bytes.
#[derive(Debug, Default, Clone)]
pub struct MemoryAssets {
    files: HashMap<String, Vec<u8>>,
    fetched: Rc<RefCell<Vec<String>>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(url, bytes);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(url.into(), bytes.into());
    }

    /// URLs requested so far, in order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }
}

impl AssetSource for MemoryAssets {
    type Error = anyhow::Error;

    fn fetch(&mut self, url: &str) -> Result<Vec<u8>> {
        self.fetched.borrow_mut().push(url.to_string());
        self.files
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("404 Not Found"))
    }
}

/// Clock the test moves by hand. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}
