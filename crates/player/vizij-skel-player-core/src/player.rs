//! Player: owns the runtime objects and per-tick state, and runs the frame loop.
//!
//! Lifecycle:
//! - `new` stores the user config; nothing is validated yet.
//! - `load` resolves the config, fetches and parses assets, checks every name the
//!   config refers to, builds the scene and fires exactly one of `on_ready` / `on_error`.
//! - `tick` is called by the host once per display refresh. It does nothing until
//!   setup succeeded, then runs time → playback → viewport blend → render, in that order.

use tracing::{debug, error, warn};

use crate::config::{resolve, PlayerConfig, PlayerDefaults, ResolvedConfig};
use crate::error::PlayerError;
use crate::playback::{PlaybackState, ScrubBar, TransportState};
use crate::render::{Color, DebugLayer, DebugLayers, NodeId, RenderEngine};
use crate::runtime::{
    AnimationInfo, AnimationRuntime, AnimationState, AssetSource, Skeleton, SkeletonData,
};
use crate::time::{Clock, TimeKeeper, DEFAULT_MAX_DELTA};
use crate::transition::{CameraFraming, TransitionState};
use crate::viewport::{compute_animation_viewport, resolve_viewport, Rect, Viewport};
use crate::Result;

/// Pick radius around a control bone, in canvas pixels.
pub const CONTROL_BONE_RADIUS: f32 = 20.0;

/// Runtime objects that exist once assets are loaded.
struct Loaded<R: AnimationRuntime> {
    data: R::Data,
    skeleton: R::Skeleton,
    state: R::State,
    node: NodeId,
}

/// Control bone currently held by the pointer.
#[derive(Debug, Clone, PartialEq)]
struct Drag {
    bone: String,
    /// Bone position minus pointer position at grab time, skeleton space.
    offset: (f32, f32),
    /// Where the bone is pinned, skeleton space.
    target: (f32, f32),
}

type ReadyCallback<R, E> = Box<dyn FnMut(&Player<R, E>)>;
type ErrorCallback<R, E> = Box<dyn FnMut(&Player<R, E>, &str)>;
type UpdateCallback<R, E> = Box<dyn FnMut(&Player<R, E>, f32)>;

/// Embeddable skeletal-animation player.
pub struct Player<R, E>
where
    R: AnimationRuntime,
    E: RenderEngine<R::Skeleton>,
{
    user_config: Option<PlayerConfig>,
    defaults: PlayerDefaults,
    config: Option<ResolvedConfig>,

    runtime: R,
    renderer: E,
    clock: Box<dyn Clock>,
    loaded: Option<Loaded<R>>,

    setup_ran: bool,
    ready: bool,
    disposed: bool,
    errors: Vec<PlayerError>,

    // Per-tick state
    time: TimeKeeper,
    playback: PlaybackState,
    scrub_bar: ScrubBar,
    transition: Option<TransitionState>,
    framing: Option<CameraFraming>,
    canvas: (f32, f32),
    debug: DebugLayers,
    debug_render: bool,
    drag: Option<Drag>,

    on_ready: Option<ReadyCallback<R, E>>,
    on_error: Option<ErrorCallback<R, E>>,
    on_update: Option<UpdateCallback<R, E>>,
}

fn current_duration<A: AnimationState>(state: &A) -> f32 {
    state.current(0).map_or(0.0, |t| t.animation.duration)
}

fn fetch<S: AssetSource>(source: &mut S, url: &str) -> Result<Vec<u8>> {
    source.fetch(url).map_err(|e| PlayerError::Load {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Every configured name that the skeleton data cannot resolve.
fn check_references<D: SkeletonData>(config: &ResolvedConfig, data: &D) -> Vec<PlayerError> {
    let mut problems: Vec<PlayerError> = Vec::new();
    let mut report = |err: PlayerError| {
        if !problems.contains(&err) {
            problems.push(err);
        }
    };

    let animations = config.animations.iter().flatten().chain(config.animation.iter());
    for name in animations {
        if data.find_animation(name).is_none() {
            report(PlayerError::AnimationNotFound { name: name.clone() });
        }
    }
    for name in config.skins.iter().flatten().chain(config.skin.iter()) {
        if !data.find_skin(name) {
            report(PlayerError::SkinNotFound { name: name.clone() });
        }
    }
    for name in &config.control_bones {
        if !data.find_bone(name) {
            report(PlayerError::ControlBoneNotFound { name: name.clone() });
        }
    }
    for name in config.viewport.animations.keys() {
        if data.find_animation(name).is_none() {
            report(PlayerError::ViewportAnimationNotFound { name: name.clone() });
        }
    }
    problems
}

impl<R, E> Player<R, E>
where
    R: AnimationRuntime,
    E: RenderEngine<R::Skeleton>,
{
    pub fn new(config: PlayerConfig, runtime: R, renderer: E, clock: impl Clock + 'static) -> Self {
        let now = clock.now();
        let defaults = PlayerDefaults::default();
        Self {
            user_config: Some(config),
            playback: PlaybackState::new(defaults.speed),
            defaults,
            config: None,
            runtime,
            renderer,
            clock: Box::new(clock),
            loaded: None,
            setup_ran: false,
            ready: false,
            disposed: false,
            errors: Vec::new(),
            time: TimeKeeper::new(now, DEFAULT_MAX_DELTA),
            scrub_bar: ScrubBar::default(),
            transition: None,
            framing: None,
            canvas: (0.0, 0.0),
            debug: DebugLayers::default(),
            debug_render: false,
            drag: None,
            on_ready: None,
            on_error: None,
            on_update: None,
        }
    }

    /// Replace the defaults used to fill the config at load time.
    pub fn with_defaults(mut self, defaults: PlayerDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Called once when setup succeeds.
    pub fn on_ready(mut self, f: impl FnMut(&Player<R, E>) + 'static) -> Self {
        self.on_ready = Some(Box::new(f));
        self
    }

    /// Called once when setup fails, with every collected message.
    pub fn on_error(mut self, f: impl FnMut(&Player<R, E>, &str) + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    /// Called every tick after playback advanced, with the clamped frame delta.
    pub fn on_update(mut self, f: impl FnMut(&Player<R, E>, f32) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Resolve config, load assets and build the scene. Runs once; later calls
    /// return the outcome of the first.
    pub fn load<S: AssetSource>(&mut self, source: &mut S) -> Result<()> {
        if self.setup_ran {
            return match self.errors.first() {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            };
        }
        self.setup_ran = true;

        match self.try_setup(source) {
            Ok(()) => {
                self.ready = true;
                debug!(
                    skeleton = %self.config.as_ref().map_or("", |c| c.skeleton_url.as_str()),
                    max_delta = self.time.max_delta(),
                    "player ready"
                );
                if let Some(mut cb) = self.on_ready.take() {
                    cb(&*self);
                    self.on_ready = Some(cb);
                }
                Ok(())
            }
            Err(errors) => {
                for err in &errors {
                    if err.is_fatal() {
                        error!(category = err.category(), "{err}");
                    } else {
                        warn!(category = err.category(), "{err}");
                    }
                }
                self.loaded = None;
                self.errors = errors;
                let first = self.errors[0].clone();
                let message = self.error_message().unwrap_or_default();
                if let Some(mut cb) = self.on_error.take() {
                    cb(&*self, &message);
                    self.on_error = Some(cb);
                }
                Err(first)
            }
        }
    }

    fn try_setup<S: AssetSource>(
        &mut self,
        source: &mut S,
    ) -> std::result::Result<(), Vec<PlayerError>> {
        let (config, data) = self.load_assets(source).map_err(|e| vec![e])?;
        let problems = check_references(&config, &data);
        if !problems.is_empty() {
            return Err(problems);
        }
        self.build(config, data).map_err(|e| vec![e])
    }

    fn load_assets<S: AssetSource>(&mut self, source: &mut S) -> Result<(ResolvedConfig, R::Data)> {
        let user = self.user_config.take().unwrap_or_default();
        let config = resolve(user, &self.defaults)?;

        let atlas = fetch(source, &config.atlas_url)?;
        let skeleton = fetch(source, &config.skeleton_url)?;
        let data = self
            .runtime
            .load_skeleton_data(&atlas, &skeleton, config.skeleton_format)
            .map_err(|e| PlayerError::Load {
                url: config.skeleton_url.clone(),
                reason: e.to_string(),
            })?;
        Ok((config, data))
    }

    fn build(&mut self, config: ResolvedConfig, data: R::Data) -> Result<()> {
        let mut skeleton = self.runtime.create_skeleton(&data);
        let mut state = self.runtime.create_animation_state(&data);
        state.set_default_mix(config.default_mix);

        self.renderer.create_scene();
        let node = self.renderer.create_skeleton_node();
        self.renderer.add_to_scene(node);
        self.renderer.set_background_color(config.background_color);

        if let Some(skin) = &config.skin {
            skeleton.set_skin_by_name(skin);
            skeleton.set_slots_to_setup_pose();
        }
        skeleton.set_to_setup_pose();
        skeleton.update_world_transform();

        self.playback = PlaybackState::new(config.speed);
        self.debug = config.debug;
        self.debug_render = config.viewport.debug_render;
        self.time = TimeKeeper::new(self.clock.now(), config.max_delta);
        let autoplay = config.autoplay;
        self.config = Some(config);
        self.loaded = Some(Loaded {
            data,
            skeleton,
            state,
            node,
        });

        match self.default_animation() {
            Some(name) => self.set_animation(&name)?,
            None => self.frame_setup_pose(),
        }
        if autoplay {
            self.play()?;
        }
        Ok(())
    }

    /// Configured animation, else the first selectable one, else the first in the data.
    fn default_animation(&self) -> Option<String> {
        let config = self.config.as_ref()?;
        config
            .animation
            .clone()
            .or_else(|| config.animations.as_ref().and_then(|l| l.first().cloned()))
            .or_else(|| {
                self.loaded
                    .as_ref()
                    .and_then(|l| l.data.animations().into_iter().next())
                    .map(|a| a.name)
            })
    }

    /// Skeletons without animations are framed around their setup pose.
    fn frame_setup_pose(&mut self) {
        let (Some(config), Some(loaded)) = (self.config.as_ref(), self.loaded.as_mut()) else {
            return;
        };
        loaded.skeleton.set_to_setup_pose();
        loaded.skeleton.update_world_transform();
        let bounds = loaded.skeleton.bounds();
        let computed = if bounds.is_finite() {
            bounds
        } else {
            Rect::default()
        };
        let viewport = resolve_viewport(computed, &config.viewport.global, None);
        self.transition = Some(TransitionState::new(viewport, self.clock.now()));
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.loaded.is_some() && !self.disposed {
            Ok(())
        } else {
            Err(PlayerError::NotLoaded)
        }
    }

    /// Recompute the framing for `info` and start a transition towards it.
    ///
    /// Sampling drives the animation state; callers restore the pose they need.
    fn retarget_viewport(&mut self, info: &AnimationInfo) -> Result<()> {
        let (Some(config), Some(loaded)) = (self.config.as_ref(), self.loaded.as_mut()) else {
            return Err(PlayerError::NotLoaded);
        };
        let computed = compute_animation_viewport(
            &mut loaded.skeleton,
            &mut loaded.state,
            info,
            config.sample_steps,
        );
        let viewport = resolve_viewport(
            computed,
            &config.viewport.global,
            config.viewport_override(&info.name),
        );
        let now = self.clock.now();
        let transition_time = config.viewport.transition_time;
        self.transition = Some(match &self.transition {
            Some(t) => t.retarget(viewport, now, transition_time),
            None => TransitionState::new(viewport, now),
        });
        debug!(animation = %info.name, ?viewport, "viewport retargeted");
        Ok(())
    }

    /// Switch the active animation, looping on track 0 from the start.
    pub fn set_animation(&mut self, name: &str) -> Result<()> {
        self.ensure_loaded()?;
        let info = self.find_animation(name)?;
        if !self.config.as_ref().is_some_and(|c| c.is_animation_selectable(name)) {
            return Err(PlayerError::AnimationNotSelectable {
                name: name.to_string(),
            });
        }

        self.retarget_viewport(&info)?;

        let loaded = self.loaded.as_mut().ok_or(PlayerError::NotLoaded)?;
        loaded.state.clear_tracks();
        loaded.skeleton.set_to_setup_pose();
        loaded.state.set_animation(0, name, true);
        loaded.state.update(0.0);
        loaded.state.apply(&mut loaded.skeleton);
        loaded.skeleton.update_world_transform();

        self.playback.play_time = 0.0;
        self.scrub_bar.set_value(0.0);
        debug!(animation = name, duration = info.duration, "animation set");
        Ok(())
    }

    /// Re-frame the camera for `animation` without switching to it.
    pub fn set_viewport(&mut self, animation: &str) -> Result<()> {
        self.ensure_loaded()?;
        let info = self.find_animation(animation)?;
        let active = self
            .loaded
            .as_ref()
            .and_then(|l| l.state.current(0))
            .map(|t| t.animation.name);

        self.retarget_viewport(&info)?;

        // Put the active animation back where playback left it.
        let play_time = self.playback.play_time;
        let loaded = self.loaded.as_mut().ok_or(PlayerError::NotLoaded)?;
        loaded.state.clear_tracks();
        loaded.skeleton.set_to_setup_pose();
        if let Some(name) = active {
            loaded.state.set_animation(0, &name, true);
            loaded.state.update(play_time);
            loaded.state.apply(&mut loaded.skeleton);
        }
        loaded.skeleton.update_world_transform();
        Ok(())
    }

    fn find_animation(&self, name: &str) -> Result<AnimationInfo> {
        self.loaded
            .as_ref()
            .and_then(|l| l.data.find_animation(name))
            .ok_or_else(|| PlayerError::AnimationNotFound {
                name: name.to_string(),
            })
    }

    /// Start advancing play time; activates the default animation if no track is set.
    pub fn play(&mut self) -> Result<()> {
        self.ensure_loaded()?;
        if self.playback.transport.can_resume() {
            self.playback.transport = TransportState::Playing;
            debug!(play_time = self.playback.play_time, "playback resumed");
        }
        let has_track = self
            .loaded
            .as_ref()
            .is_some_and(|l| l.state.current(0).is_some());
        if !has_track {
            if let Some(name) = self.default_animation() {
                self.set_animation(&name)?;
            }
        }
        Ok(())
    }

    /// Freeze play time. Rendering and viewport transitions continue.
    pub fn pause(&mut self) {
        if self.playback.transport.can_pause() {
            self.playback.transport = TransportState::Paused;
            debug!(play_time = self.playback.play_time, "playback paused");
        }
    }

    /// Jump to `fraction` of the active animation and pause, posing immediately.
    pub fn scrub(&mut self, fraction: f32) -> Result<()> {
        self.ensure_loaded()?;
        let loaded = self.loaded.as_mut().ok_or(PlayerError::NotLoaded)?;
        let duration = current_duration(&loaded.state);
        let (next, pose_delta) = self.playback.scrubbed(fraction, duration);
        self.playback = next;
        if loaded.state.current(0).is_some() {
            loaded.state.update(pose_delta);
            loaded.state.apply(&mut loaded.skeleton);
            loaded.skeleton.update_world_transform();
        }
        self.scrub_bar.set_value(next.fraction(duration));
        Ok(())
    }

    pub fn set_speed(&mut self, speed: f32) -> Result<()> {
        self.playback.speed = PlaybackState::check_speed(speed)?;
        Ok(())
    }

    /// Apply a skin and reset slots so its attachments show.
    pub fn set_skin(&mut self, name: &str) -> Result<()> {
        self.ensure_loaded()?;
        let selectable = self.config.as_ref().is_some_and(|c| c.is_skin_selectable(name));
        let loaded = self.loaded.as_mut().ok_or(PlayerError::NotLoaded)?;
        if !loaded.data.find_skin(name) {
            return Err(PlayerError::SkinNotFound {
                name: name.to_string(),
            });
        }
        if !selectable {
            return Err(PlayerError::SkinNotSelectable {
                name: name.to_string(),
            });
        }
        loaded.skeleton.set_skin_by_name(name);
        loaded.skeleton.set_slots_to_setup_pose();
        loaded.state.apply(&mut loaded.skeleton);
        loaded.skeleton.update_world_transform();
        debug!(skin = name, "skin set");
        Ok(())
    }

    pub fn set_debug_layer(&mut self, layer: DebugLayer, enabled: bool) {
        self.debug.set(layer, enabled);
        debug!(layer = layer.name(), enabled, "debug layer toggled");
    }

    /// Toggle the viewport outline.
    pub fn set_viewport_debug(&mut self, enabled: bool) {
        self.debug_render = enabled;
    }

    pub fn set_canvas_size(&mut self, width: f32, height: f32) {
        self.canvas = (width.max(0.0), height.max(0.0));
    }

    /// Run one frame. No-op before setup succeeded and after `dispose`.
    pub fn tick(&mut self) {
        if !self.ready || self.disposed {
            return;
        }
        let now = self.clock.now();
        self.time.update(now);
        let delta = self.time.delta();

        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        let duration = current_duration(&loaded.state);
        let (next, advance) = self.playback.step(delta, duration);
        self.playback = next;
        if next.transport.is_playing() {
            self.scrub_bar.set_value(next.fraction(duration));
            loaded.state.update(advance);
            loaded.state.apply(&mut loaded.skeleton);
        }
        if let Some(drag) = &self.drag {
            let (x, y) = drag.target;
            loaded.skeleton.set_bone_world_position(&drag.bone, x, y);
        }
        loaded.skeleton.update_world_transform();

        if let Some(mut cb) = self.on_update.take() {
            cb(&*self, delta);
            self.on_update = Some(cb);
        }
        self.render(now);
    }

    /// Frame the blended viewport and hand the pose to the renderer.
    fn render(&mut self, now: f64) {
        let (Some(loaded), Some(config)) = (self.loaded.as_ref(), self.config.as_ref()) else {
            return;
        };
        let node = loaded.node;

        let blended = self
            .transition
            .as_ref()
            .map(|t| (t.blend(now, config.viewport.transition_time), t.current));
        if let Some((rect, _)) = blended {
            if let Some(framing) = CameraFraming::fit(rect, self.canvas.0, self.canvas.1) {
                self.renderer.set_node_scale(node, framing.scale);
                self.renderer.set_node_position(node, framing.x, framing.y);
                self.framing = Some(framing);
            }
        }

        for layer in DebugLayer::ALL {
            self.renderer.set_debug_layer(node, layer, self.debug.is_enabled(layer));
        }
        self.renderer.draw(node, &loaded.skeleton);

        if self.debug_render {
            if let Some((rect, current)) = blended {
                self.renderer.draw_debug_rect(node, rect, Color::VIEWPORT_DEBUG);
                self.renderer.draw_debug_rect(node, current.rect(), Color::VIEWPORT_DEBUG_INNER);
            }
        }
    }

    /// Grab the nearest control bone under the pointer (canvas pixels).
    /// Returns whether a bone was grabbed.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        if !self.ready || self.disposed {
            return false;
        }
        let (Some(framing), Some(config), Some(loaded)) =
            (self.framing, self.config.as_ref(), self.loaded.as_ref())
        else {
            return false;
        };
        let (px, py) = framing.to_skeleton(x, y);
        let radius = CONTROL_BONE_RADIUS / framing.scale;

        let mut best: Option<(f32, &str, (f32, f32))> = None;
        for bone in &config.control_bones {
            let Some((bx, by)) = loaded.skeleton.bone_world_position(bone) else {
                continue;
            };
            let distance = (bx - px).hypot(by - py);
            if distance <= radius && best.map_or(true, |(d, _, _)| distance < d) {
                best = Some((distance, bone.as_str(), (bx, by)));
            }
        }

        match best {
            Some((_, bone, (bx, by))) => {
                let drag = Drag {
                    bone: bone.to_string(),
                    offset: (bx - px, by - py),
                    target: (bx, by),
                };
                debug!(bone = %drag.bone, "control bone grabbed");
                self.drag = Some(drag);
                true
            }
            None => false,
        }
    }

    /// Move the grabbed control bone with the pointer. Returns whether a bone moved.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let (Some(drag), Some(framing), Some(loaded)) =
            (self.drag.as_mut(), self.framing, self.loaded.as_mut())
        else {
            return false;
        };
        let (px, py) = framing.to_skeleton(x, y);
        drag.target = (px + drag.offset.0, py + drag.offset.1);
        loaded.skeleton.set_bone_world_position(&drag.bone, drag.target.0, drag.target.1);
        loaded.skeleton.update_world_transform();
        true
    }

    /// Release the grabbed control bone. Returns whether one was held.
    pub fn pointer_up(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Stop rendering; later ticks and commands are ignored.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.ready = false;
        self.drag = None;
    }

    // ---- accessors ----

    /// Setup succeeded and the player has not been disposed.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn config(&self) -> Option<&ResolvedConfig> {
        self.config.as_ref()
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn scrub_bar(&self) -> &ScrubBar {
        &self.scrub_bar
    }

    pub fn time(&self) -> &TimeKeeper {
        &self.time
    }

    pub fn transition(&self) -> Option<&TransitionState> {
        self.transition.as_ref()
    }

    /// Target viewport of the active transition.
    pub fn viewport(&self) -> Option<Viewport> {
        self.transition.as_ref().map(|t| t.current)
    }

    /// Framing applied by the last rendered tick.
    pub fn framing(&self) -> Option<CameraFraming> {
        self.framing
    }

    pub fn debug_layers(&self) -> &DebugLayers {
        &self.debug
    }

    pub fn current_animation(&self) -> Option<AnimationInfo> {
        self.loaded
            .as_ref()
            .and_then(|l| l.state.current(0))
            .map(|t| t.animation)
    }

    /// Name of the control bone being dragged.
    pub fn dragged_bone(&self) -> Option<&str> {
        self.drag.as_ref().map(|d| d.bone.as_str())
    }

    pub fn errors(&self) -> &[PlayerError] {
        &self.errors
    }

    /// Contents of the message area: every setup error, one per line.
    pub fn error_message(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        Some(
            self.errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    pub fn skeleton(&self) -> Option<&R::Skeleton> {
        self.loaded.as_ref().map(|l| &l.skeleton)
    }

    pub fn animation_state(&self) -> Option<&R::State> {
        self.loaded.as_ref().map(|l| &l.state)
    }

    pub fn skeleton_data(&self) -> Option<&R::Data> {
        self.loaded.as_ref().map(|l| &l.data)
    }

    pub fn renderer(&self) -> &E {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut E {
        &mut self.renderer
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConfig;
    use crate::viewport::ViewportOverride;

    struct Rig;

    impl SkeletonData for Rig {
        fn find_animation(&self, name: &str) -> Option<AnimationInfo> {
            (name == "walk").then(|| AnimationInfo {
                name: name.to_string(),
                duration: 1.0,
            })
        }
        fn find_skin(&self, name: &str) -> bool {
            name == "default"
        }
        fn find_bone(&self, name: &str) -> bool {
            name == "hand"
        }
        fn animations(&self) -> Vec<AnimationInfo> {
            self.find_animation("walk").into_iter().collect()
        }
        fn skins(&self) -> Vec<String> {
            vec!["default".into()]
        }
    }

    fn resolved(edit: impl FnOnce(&mut PlayerConfig)) -> ResolvedConfig {
        let mut config = PlayerConfig {
            skeleton: Some("rig.json".into()),
            atlas: Some("rig.atlas".into()),
            ..PlayerConfig::default()
        };
        edit(&mut config);
        resolve(config, &PlayerDefaults::default()).unwrap()
    }

    #[test]
    fn test_clean_config_has_no_problems() {
        let config = resolved(|c| {
            c.animation = Some("walk".into());
            c.skin = Some("default".into());
            c.control_bones = Some(vec!["hand".into()]);
        });
        assert!(check_references(&config, &Rig).is_empty());
    }

    #[test]
    fn test_every_problem_is_reported_once_in_order() {
        let config = resolved(|c| {
            c.animations = Some(vec!["walk".into(), "run".into()]);
            c.animation = Some("run".into());
            c.skins = Some(vec!["gold".into()]);
            c.skin = Some("gold".into());
            c.control_bones = Some(vec!["hand".into(), "foot".into()]);
            c.viewport
                .animations
                .insert("fly".into(), ViewportOverride::default());
        });
        assert_eq!(
            check_references(&config, &Rig),
            vec![
                PlayerError::AnimationNotFound { name: "run".into() },
                PlayerError::SkinNotFound {
                    name: "gold".into()
                },
                PlayerError::ControlBoneNotFound {
                    name: "foot".into()
                },
                PlayerError::ViewportAnimationNotFound { name: "fly".into() },
            ]
        );
    }
}
