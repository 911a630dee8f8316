mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{assets, config, loaded, player, run};
use indexmap::IndexMap;
use vizij_skel_player::{
    AnimationState, Color, NodeId, PlayerConfig, PlayerError, TransportState, ViewportOverride,
};
use vizij_test_fixtures::{ManualClock, MemoryAssets, RenderCall};

#[derive(Default)]
struct Calls {
    ready: usize,
    errors: Vec<String>,
}

type Observed = (common::TestPlayer, ManualClock, Rc<RefCell<Calls>>);

fn observed(config: PlayerConfig) -> Observed {
    let calls = Rc::new(RefCell::new(Calls::default()));
    let (player, clock) = player(config);
    let on_ready = Rc::clone(&calls);
    let on_error = Rc::clone(&calls);
    let player = player
        .on_ready(move |_| on_ready.borrow_mut().ready += 1)
        .on_error(move |_, message| on_error.borrow_mut().errors.push(message.to_string()));
    (player, clock, calls)
}

#[test]
fn ready_fires_once_and_builds_the_scene() {
    let (mut player, _clock, calls) = observed(config("swing", |_| {}));
    player.load(&mut assets("swing")).unwrap();

    assert!(player.is_ready());
    assert_eq!(calls.borrow().ready, 1);
    assert!(calls.borrow().errors.is_empty());
    assert_eq!(
        &player.renderer().calls()[..4],
        &[
            RenderCall::CreateScene,
            RenderCall::CreateSkeletonNode(NodeId(1)),
            RenderCall::AddToScene(NodeId(1)),
            RenderCall::Background(Color::BLACK),
        ]
    );

    // Repeated loads report the first outcome without running setup again
    player.load(&mut assets("swing")).unwrap();
    assert_eq!(calls.borrow().ready, 1);
    assert_eq!(player.runtime().loads(), 1);
}

#[test]
fn defaults_apply_on_load() {
    let (player, _clock) = loaded("swing", |_| {});
    let config = player.config().unwrap();
    assert_eq!(config.default_mix, 0.25);
    assert_eq!(config.viewport.transition_time, 0.2);
    assert_eq!(player.animation_state().unwrap().default_mix(), 0.25);
    assert_eq!(player.playback().transport, TransportState::Playing);
    // First animation in the data
    assert_eq!(player.current_animation().unwrap().name, "swing");
}

#[test]
fn default_animation_comes_from_the_selectable_list() {
    let (player, _clock) = loaded("swing", |c| {
        c.animations = Some(vec!["long".into(), "swing".into()]);
    });
    assert_eq!(player.current_animation().unwrap().name, "long");
}

#[test]
fn autoplay_off_leaves_the_player_paused() {
    let (mut player, clock) = loaded("swing", |c| c.autoplay = Some(false));
    assert!(player.playback().is_paused());
    run(&mut player, &clock, 5, 0.016);
    assert_eq!(player.playback().play_time, 0.0);
    // Paused players still render
    assert_eq!(player.renderer().draws(), 5);
}

#[test]
fn configured_skin_and_background_are_applied() {
    let (player, _clock) = loaded("swing", |c| {
        c.skin = Some("red".into());
        c.background_color = Some("#336699".into());
    });
    let skeleton = player.skeleton().unwrap();
    assert_eq!(skeleton.skin(), Some("red"));
    assert!(skeleton.slot_resets() >= 1);
    assert!(player
        .renderer()
        .calls()
        .iter()
        .any(|c| matches!(c, RenderCall::Background(color) if (color.b - 0.6).abs() < 1e-6)));
}

#[test]
fn missing_skeleton_url_reports_once() {
    let config = PlayerConfig {
        atlas: Some("skeletons/swing.atlas".into()),
        ..PlayerConfig::default()
    };
    let (mut player, clock, calls) = observed(config);

    let err = player.load(&mut assets("swing")).unwrap_err();
    assert_eq!(
        err,
        PlayerError::MissingConfig {
            field: "skeleton".into()
        }
    );
    assert!(!player.is_ready());
    assert_eq!(calls.borrow().ready, 0);
    assert_eq!(calls.borrow().errors.len(), 1);
    assert!(calls.borrow().errors[0].contains("skeleton"));

    // Nothing is fetched or drawn, and a retry does not report again
    assert_eq!(player.runtime().loads(), 0);
    run(&mut player, &clock, 3, 0.016);
    assert_eq!(player.renderer().draws(), 0);
    assert_eq!(player.load(&mut assets("swing")).unwrap_err(), err);
    assert_eq!(calls.borrow().errors.len(), 1);
}

#[test]
fn failed_fetch_names_the_url() {
    let (mut player, _clock, calls) = observed(config("swing", |_| {}));
    let mut source = MemoryAssets::new().with("skeletons/swing.json", "{}");

    let err = player.load(&mut source).unwrap_err();
    match err {
        PlayerError::Load { url, reason } => {
            assert_eq!(url, "skeletons/swing.atlas");
            assert!(reason.contains("404"));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(calls.borrow().errors.len(), 1);
    assert_eq!(calls.borrow().ready, 0);
}

#[test]
fn unparseable_skeleton_is_a_load_error() {
    let (mut player, _clock) = player(config("swing", |_| {}));
    let mut source = assets("swing").with("skeletons/swing.json", "not json");
    let err = player.load(&mut source).unwrap_err();
    assert_eq!(err.category(), "load");
    assert!(player.skeleton().is_none());
}

#[test]
fn unresolved_references_are_collected_into_one_report() {
    let mut overrides = IndexMap::new();
    overrides.insert("fly".to_string(), ViewportOverride::default());
    let config = config("swing", |c| {
        c.animation = Some("dance".into());
        c.skin = Some("green".into());
        c.control_bones = Some(vec!["target".into(), "ghost".into()]);
        c.viewport.animations = overrides;
    });
    let (mut player, _clock, calls) = observed(config);

    let err = player.load(&mut assets("swing")).unwrap_err();
    assert_eq!(
        err,
        PlayerError::AnimationNotFound {
            name: "dance".into()
        }
    );
    assert_eq!(
        player.errors(),
        &[
            PlayerError::AnimationNotFound {
                name: "dance".into()
            },
            PlayerError::SkinNotFound {
                name: "green".into()
            },
            PlayerError::ControlBoneNotFound {
                name: "ghost".into()
            },
            PlayerError::ViewportAnimationNotFound { name: "fly".into() },
        ]
    );
    let calls = calls.borrow();
    assert_eq!(calls.ready, 0);
    assert_eq!(calls.errors.len(), 1);
    assert_eq!(calls.errors[0].lines().count(), 4);
    assert_eq!(player.error_message().as_deref(), Some(calls.errors[0].as_str()));
    assert!(!player.is_ready());
}

#[test]
fn allow_list_entries_are_checked_against_the_data() {
    let (mut player, _clock) = player(config("swing", |c| {
        c.animations = Some(vec!["swing".into(), "nope".into(), "nope".into()]);
    }));
    player.load(&mut assets("swing")).unwrap_err();
    // Duplicates collapse
    assert_eq!(
        player.errors(),
        &[PlayerError::AnimationNotFound {
            name: "nope".into()
        }]
    );
}

#[test]
fn default_animation_outside_the_list_fails_before_fetching() {
    let (mut player, _clock) = player(config("swing", |c| {
        c.animation = Some("idle".into());
        c.animations = Some(vec!["swing".into()]);
    }));
    let mut source = assets("swing");
    let err = player.load(&mut source).unwrap_err();
    assert_eq!(
        err,
        PlayerError::AnimationNotSelectable {
            name: "idle".into()
        }
    );
    assert!(source.fetched().is_empty());
}

#[test]
fn empty_allow_list_fails_before_building_anything() {
    let (mut player, _clock, calls) = observed(config("swing", |c| {
        c.animations = Some(Vec::new());
    }));
    let mut source = assets("swing");

    let err = player.load(&mut source).unwrap_err();
    assert_eq!(err.category(), "config");
    assert!(source.fetched().is_empty());
    assert!(player.renderer().calls().is_empty());
    assert_eq!(calls.borrow().errors.len(), 1);
    assert!(!player.is_ready());
}

#[test]
fn operations_before_load_are_rejected() {
    let (mut player, _clock) = player(config("swing", |_| {}));
    assert_eq!(player.play(), Err(PlayerError::NotLoaded));
    assert_eq!(player.set_animation("swing"), Err(PlayerError::NotLoaded));
    assert_eq!(player.scrub(0.5), Err(PlayerError::NotLoaded));
    assert!(!player.pointer_down(200.0, 200.0));
}

#[test]
fn dispose_stops_rendering() {
    let (mut player, clock) = loaded("swing", |_| {});
    run(&mut player, &clock, 2, 0.016);
    assert_eq!(player.renderer().draws(), 2);

    player.dispose();
    run(&mut player, &clock, 2, 0.016);
    assert_eq!(player.renderer().draws(), 2);
    assert!(!player.is_ready());
    assert_eq!(player.set_animation("long"), Err(PlayerError::NotLoaded));
    assert!(player.animation_state().unwrap().current(0).is_some());
}
