#![allow(dead_code)]

use vizij_skel_player::{Player, PlayerConfig};
use vizij_test_fixtures::{skeletons, ManualClock, MemoryAssets, MockRuntime, RecordingRenderer};

pub type TestPlayer = Player<MockRuntime, RecordingRenderer>;

pub const CANVAS: f32 = 400.0;

/// Fixture config, adjusted by `edit`.
pub fn config(fixture: &str, edit: impl FnOnce(&mut PlayerConfig)) -> PlayerConfig {
    let mut config = skeletons::config(fixture).expect("fixture config");
    edit(&mut config);
    config
}

/// Unloaded player for `config`, with a manual clock at 0 and a 400x400 canvas.
pub fn player(config: PlayerConfig) -> (TestPlayer, ManualClock) {
    let clock = ManualClock::new(0.0);
    let mut player = Player::new(
        config,
        MockRuntime::default(),
        RecordingRenderer::default(),
        clock.clone(),
    );
    player.set_canvas_size(CANVAS, CANVAS);
    (player, clock)
}

pub fn assets(fixture: &str) -> MemoryAssets {
    skeletons::assets(fixture).expect("fixture assets")
}

/// Loaded player for `fixture`.
pub fn loaded(fixture: &str, edit: impl FnOnce(&mut PlayerConfig)) -> (TestPlayer, ManualClock) {
    let (mut player, clock) = player(config(fixture, edit));
    player.load(&mut assets(fixture)).expect("player loads");
    (player, clock)
}

/// Advance the clock by `dt` and tick, `frames` times.
pub fn run(player: &mut TestPlayer, clock: &ManualClock, frames: usize, dt: f64) {
    for _ in 0..frames {
        clock.advance(dt);
        player.tick();
    }
}
