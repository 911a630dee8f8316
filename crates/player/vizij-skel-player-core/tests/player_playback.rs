mod common;

use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use common::{assets, config, loaded, player, run};
use vizij_skel_player::{
    AnimationRuntime, AnimationState, PlayerError, Skeleton, SkeletonFormat, TransportState,
};
use vizij_test_fixtures::{skeletons, AppliedPose, MockRuntime};

#[test]
fn long_frames_are_clamped_to_max_delta() {
    let deltas = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&deltas);
    let (player, clock) = player(config("swing", |c| c.animation = Some("long".into())));
    let mut player = player.on_update(move |_, delta| seen.borrow_mut().push(delta));
    player.load(&mut assets("swing")).unwrap();

    // Tab was hidden for a full second
    clock.advance(1.0);
    player.tick();

    assert_eq!(*deltas.borrow(), vec![0.064]);
    assert_abs_diff_eq!(player.playback().play_time, 0.064, epsilon = 1e-6);
    assert_abs_diff_eq!(player.time().total_time(), 1.0, epsilon = 1e-9);
}

#[test]
fn max_delta_is_configurable() {
    let (mut player, clock) = loaded("swing", |c| {
        c.animation = Some("long".into());
        c.max_delta = Some(0.5);
    });
    clock.advance(2.0);
    player.tick();
    assert_abs_diff_eq!(player.playback().play_time, 0.5, epsilon = 1e-6);
}

#[test]
fn play_time_wraps_on_looping_animations() {
    let (mut player, clock) = loaded("swing", |_| {});
    run(&mut player, &clock, 30, 0.05);

    assert_abs_diff_eq!(player.playback().play_time, 0.5, epsilon = 1e-4);
    assert_abs_diff_eq!(player.scrub_bar().value(), 0.5, epsilon = 1e-4);
    let pose = player.skeleton().unwrap().pose().unwrap();
    assert_eq!(pose.animation, "swing");
    assert_abs_diff_eq!(pose.time, 0.5, epsilon = 1e-4);
}

#[test]
fn speed_scales_the_advance() {
    let (mut player, clock) = loaded("swing", |c| {
        c.animation = Some("long".into());
        c.speed = Some(2.0);
    });
    run(&mut player, &clock, 10, 0.05);
    assert_abs_diff_eq!(player.playback().play_time, 1.0, epsilon = 1e-4);

    player.set_speed(0.5).unwrap();
    run(&mut player, &clock, 10, 0.05);
    assert_abs_diff_eq!(player.playback().play_time, 1.25, epsilon = 1e-4);

    assert_eq!(
        player.set_speed(0.0),
        Err(PlayerError::InvalidSpeed { speed: 0.0 })
    );
    assert_eq!(player.playback().speed, 0.5);
}

#[test]
fn identical_clocks_produce_identical_frames() {
    let run_once = || {
        let (mut player, clock) = loaded("swing", |c| c.speed = Some(1.5));
        for dt in [0.016, 0.017, 0.2, 0.0, 0.033, 0.016] {
            clock.advance(dt);
            player.tick();
        }
        player.scrub(0.25).unwrap();
        player.play().unwrap();
        run(&mut player, &clock, 4, 0.016);
        (
            *player.playback(),
            player.renderer().calls().to_vec(),
            player.skeleton().unwrap().bounds(),
        )
    };
    assert_eq!(run_once(), run_once());
}

#[test]
fn pause_freezes_play_time_but_keeps_rendering() {
    let (mut player, clock) = loaded("swing", |c| c.animation = Some("long".into()));
    run(&mut player, &clock, 5, 0.02);
    let frozen = player.playback().play_time;

    player.pause();
    assert!(player.playback().transport.can_resume());
    run(&mut player, &clock, 5, 0.02);
    assert_eq!(player.playback().play_time, frozen);
    assert_eq!(player.renderer().draws(), 10);

    player.play().unwrap();
    run(&mut player, &clock, 1, 0.02);
    assert!(player.playback().play_time > frozen);
}

#[test]
fn scrub_poses_like_a_direct_update() {
    let (mut player, _clock) = loaded("swing", |c| {
        c.animation = Some("long".into());
        c.autoplay = Some(false);
    });
    player.scrub(0.5).unwrap();

    assert_eq!(player.playback().play_time, 2.0);
    assert_eq!(player.playback().transport, TransportState::Paused);
    assert_eq!(player.scrub_bar().value(), 0.5);
    assert_eq!(
        player.skeleton().unwrap().pose(),
        Some(&AppliedPose {
            animation: "long".into(),
            time: 2.0,
        })
    );

    // Same rig posed by hand: setup pose, then 2s of updates
    let mut runtime = MockRuntime::default();
    let data = runtime
        .load_skeleton_data(
            skeletons::atlas("swing").unwrap().as_bytes(),
            skeletons::json("swing").unwrap().as_bytes(),
            SkeletonFormat::Json,
        )
        .unwrap();
    let mut skeleton = runtime.create_skeleton(&data);
    let mut state = runtime.create_animation_state(&data);
    skeleton.set_to_setup_pose();
    state.set_animation(0, "long", true);
    state.update(2.0);
    state.apply(&mut skeleton);
    skeleton.update_world_transform();

    assert_eq!(player.skeleton().unwrap().bounds(), skeleton.bounds());
    assert_eq!(player.skeleton().unwrap().pose(), skeleton.pose());
}

#[test]
fn scrub_while_playing_pauses_and_moves_backwards() {
    let (mut player, clock) = loaded("swing", |c| c.animation = Some("long".into()));
    run(&mut player, &clock, 50, 0.06);
    assert!(player.playback().play_time > 2.5);

    player.scrub(0.25).unwrap();
    assert!(player.playback().is_paused());
    assert_abs_diff_eq!(player.playback().play_time, 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(
        player.skeleton().unwrap().pose().unwrap().time,
        1.0,
        epsilon = 1e-4
    );

    // Out-of-range fractions clamp
    player.scrub(3.0).unwrap();
    assert_eq!(player.playback().play_time, 4.0);
}

#[test]
fn zero_duration_animation_holds_a_static_pose() {
    let (mut player, clock) = loaded("swing", |c| c.animation = Some("idle".into()));
    run(&mut player, &clock, 20, 0.016);

    assert_eq!(player.playback().play_time, 0.0);
    assert_eq!(player.scrub_bar().value(), 0.0);
    assert_eq!(player.skeleton().unwrap().pose().unwrap().time, 0.0);
    assert!(player.playback().transport.is_playing());

    player.scrub(0.7).unwrap();
    assert_eq!(player.playback().play_time, 0.0);
}

#[test]
fn switching_animation_restarts_play_time() {
    let (mut player, clock) = loaded("swing", |c| c.animation = Some("long".into()));
    run(&mut player, &clock, 10, 0.05);

    player.set_animation("swing").unwrap();
    assert_eq!(player.playback().play_time, 0.0);
    assert_eq!(player.scrub_bar().value(), 0.0);
    assert_eq!(player.current_animation().unwrap().name, "swing");
    assert!(player.playback().transport.is_playing());
}

#[test]
fn animation_and_skin_selection_is_checked() {
    let (mut player, _clock) = loaded("swing", |c| {
        c.animations = Some(vec!["long".into(), "swing".into()]);
        c.skins = Some(vec!["default".into(), "red".into()]);
    });

    assert_eq!(
        player.set_animation("idle"),
        Err(PlayerError::AnimationNotSelectable {
            name: "idle".into()
        })
    );
    assert_eq!(
        player.set_animation("dance"),
        Err(PlayerError::AnimationNotFound {
            name: "dance".into()
        })
    );
    assert_eq!(player.current_animation().unwrap().name, "long");

    assert_eq!(
        player.set_skin("blue"),
        Err(PlayerError::SkinNotSelectable {
            name: "blue".into()
        })
    );
    assert_eq!(
        player.set_skin("green"),
        Err(PlayerError::SkinNotFound {
            name: "green".into()
        })
    );
    player.set_skin("red").unwrap();
    assert_eq!(player.skeleton().unwrap().skin(), Some("red"));
}
