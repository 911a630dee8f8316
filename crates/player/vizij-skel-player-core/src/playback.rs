//! Playback clock: transport state, play time stepping and the scrub bar mirror.

use serde::{Deserialize, Serialize};

use crate::error::PlayerError;

/// Transport state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportState {
    /// Play time is frozen; rendering and viewport transitions continue
    Paused,
    /// Play time advances every tick
    Playing,
}

impl TransportState {
    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    #[inline]
    pub fn can_pause(&self) -> bool {
        matches!(self, Self::Playing)
    }

    #[inline]
    pub fn can_resume(&self) -> bool {
        matches!(self, Self::Paused)
    }
}

/// Play head of the active animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Seconds into the active animation, within `[0, duration)`.
    pub play_time: f32,
    /// Multiplier applied to the frame delta; always finite and positive.
    pub speed: f32,
    pub transport: TransportState,
}

impl PlaybackState {
    pub fn new(speed: f32) -> Self {
        Self {
            play_time: 0.0,
            speed,
            transport: TransportState::Paused,
        }
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        !self.transport.is_playing()
    }

    /// Validate a speed multiplier.
    pub fn check_speed(speed: f32) -> Result<f32, PlayerError> {
        if speed.is_finite() && speed > 0.0 {
            Ok(speed)
        } else {
            Err(PlayerError::InvalidSpeed { speed })
        }
    }

    /// Advance by one frame of `delta` seconds against an animation of `duration` seconds.
    ///
    /// Returns the next state and how far the pose must advance (`delta * speed`);
    /// the advance is 0 while paused.
    #[must_use]
    pub fn step(self, delta: f32, duration: f32) -> (Self, f32) {
        if !self.transport.is_playing() {
            return (self, 0.0);
        }
        let advance = delta * self.speed;
        let mut play_time = self.play_time + advance;
        // A fast speed can lap the animation more than once per frame.
        if duration > 0.0 {
            play_time = play_time.rem_euclid(duration);
        }
        let play_time = play_time.clamp(0.0, duration.max(0.0));
        (Self { play_time, ..self }, advance)
    }

    /// Jump to `fraction` of `duration` and pause.
    ///
    /// Returns the next state and the pose delta from the old play time to the new one,
    /// which may be negative.
    #[must_use]
    pub fn scrubbed(self, fraction: f32, duration: f32) -> (Self, f32) {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let play_time = duration.max(0.0) * fraction;
        let next = Self {
            play_time,
            transport: TransportState::Paused,
            ..self
        };
        (next, play_time - self.play_time)
    }

    /// Position of the play head as a fraction of `duration`; 0 for a static pose.
    #[inline]
    pub fn fraction(&self, duration: f32) -> f32 {
        if duration > 0.0 {
            self.play_time / duration
        } else {
            0.0
        }
    }
}

/// Model of the timeline slider: playback writes it, user drags read it back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrubBar {
    value: f32,
}

impl ScrubBar {
    /// Displayed fraction in `[0, 1]`.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }
}
