//! End-to-end progression flow: spectrum completion through the epilogue.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use spectra::bridge::RainbowBridge;
use spectra::clock::SimClock;
use spectra::config::SimConfig;
use spectra::events::{
    AnswerDelivered, ProgressionChanged, QuestionSubmitted, SpectrumCompleted,
};
use spectra::guide::{
    guide_materialize_system, guide_reach_system, guide_spawn_system, Guide,
};
use spectra::oracle::oracle_answer_system;
use spectra::player::{Body, ControlLock, Player};
use spectra::progression::ProgressionState;

fn build_progression_app() -> (App, Entity) {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(SimClock {
        now_ms: 0.0,
        delta_secs: 0.1,
    });
    app.insert_resource(SimConfig::default());
    app.insert_resource(ControlLock::default());
    app.init_state::<ProgressionState>();
    app.add_message::<SpectrumCompleted>();
    app.add_message::<ProgressionChanged>();
    app.add_message::<QuestionSubmitted>();
    app.add_message::<AnswerDelivered>();
    app.add_systems(
        Update,
        (
            guide_spawn_system,
            guide_materialize_system,
            guide_reach_system,
            oracle_answer_system,
        )
            .chain(),
    );
    let player = app
        .world_mut()
        .spawn((
            Player,
            Body::default(),
            Transform::from_translation(Vec3::new(2000.0, 1500.0, 0.0)),
        ))
        .id();
    (app, player)
}

fn current_state(app: &App) -> ProgressionState {
    *app.world().resource::<State<ProgressionState>>().get()
}

fn set_now(app: &mut App, now_ms: f64) {
    app.world_mut().resource_mut::<SimClock>().now_ms = now_ms;
}

fn drain<M: Message>(app: &mut App) -> Vec<M> {
    app.world_mut().resource_mut::<Messages<M>>().drain().collect()
}

#[test]
fn spectrum_completion_spawns_the_guide_and_advances() {
    let (mut app, _player) = build_progression_app();
    assert_eq!(current_state(&app), ProgressionState::Exploring);

    app.world_mut()
        .resource_mut::<Messages<SpectrumCompleted>>()
        .write(SpectrumCompleted);
    app.update();
    app.update(); // state transition applies on the following frame

    assert_eq!(current_state(&app), ProgressionState::SpectrumComplete);
    let guides: Vec<Guide> = app
        .world_mut()
        .query::<&Guide>()
        .iter(app.world())
        .copied()
        .collect();
    assert_eq!(guides.len(), 1);
    assert_eq!(guides[0].materialize_at_ms, 1_000.0);
    assert_eq!(guides[0].ready_at_ms, 4_000.0);
}

#[test]
fn duplicate_completion_signals_are_ignored() {
    let (mut app, _player) = build_progression_app();
    app.world_mut()
        .resource_mut::<Messages<SpectrumCompleted>>()
        .write(SpectrumCompleted);
    app.update();
    app.update();

    app.world_mut()
        .resource_mut::<Messages<SpectrumCompleted>>()
        .write(SpectrumCompleted);
    app.update();
    app.update();

    let guide_count = app.world_mut().query::<&Guide>().iter(app.world()).count();
    assert_eq!(guide_count, 1, "a second signal must not spawn a second guide");
    assert_eq!(current_state(&app), ProgressionState::SpectrumComplete);
}

#[test]
fn full_flow_reaches_the_epilogue() {
    let (mut app, player) = build_progression_app();

    // Complete the spectrum.
    app.world_mut()
        .resource_mut::<Messages<SpectrumCompleted>>()
        .write(SpectrumCompleted);
    app.update();
    app.update();
    assert_eq!(current_state(&app), ProgressionState::SpectrumComplete);

    // Materialize deadline passes.
    set_now(&mut app, 1_000.0);
    app.update();
    app.update();
    assert_eq!(current_state(&app), ProgressionState::GuideVisible);

    // Walk onto the guide before it is ready: nothing happens.
    let guide_pos = app
        .world_mut()
        .query_filtered::<&Transform, With<Guide>>()
        .single(app.world())
        .unwrap()
        .translation;
    app.world_mut().get_mut::<Transform>(player).unwrap().translation = guide_pos;
    set_now(&mut app, 2_000.0);
    app.update();
    app.update();
    assert_eq!(current_state(&app), ProgressionState::GuideVisible);

    // Ready deadline passes while overlapping: reached, locked, stopped.
    app.world_mut().get_mut::<Body>(player).unwrap().velocity = Vec2::new(80.0, 0.0);
    set_now(&mut app, 4_000.0);
    app.update();
    app.update();
    assert_eq!(current_state(&app), ProgressionState::GuideReached);
    assert!(app.world().resource::<ControlLock>().0);
    assert_eq!(app.world().get::<Body>(player).unwrap().velocity, Vec2::ZERO);

    // An ordinary question advances to QuestionAsked and gets an answer.
    app.world_mut()
        .resource_mut::<Messages<QuestionSubmitted>>()
        .write(QuestionSubmitted {
            text: "what is the meaning of life?".into(),
        });
    app.update();
    let answers = drain::<AnswerDelivered>(&mut app);
    assert_eq!(answers.len(), 1);
    assert!(!answers[0].epilogue);
    app.update();
    assert_eq!(current_state(&app), ProgressionState::QuestionAsked);

    // The friendship question ends the session in the epilogue.
    app.world_mut()
        .resource_mut::<Messages<QuestionSubmitted>>()
        .write(QuestionSubmitted {
            text: "will you be my friend?".into(),
        });
    app.update();
    let answers = drain::<AnswerDelivered>(&mut app);
    assert_eq!(answers.len(), 1);
    assert!(answers[0].epilogue);
    app.update();
    assert_eq!(current_state(&app), ProgressionState::Epilogue);

    // The epilogue raises three bridges.
    let bridges = app
        .world_mut()
        .query::<&RainbowBridge>()
        .iter(app.world())
        .count();
    assert_eq!(bridges, 3);
}

#[test]
fn questions_before_the_guide_is_reached_are_dropped() {
    let (mut app, _player) = build_progression_app();
    app.world_mut()
        .resource_mut::<Messages<QuestionSubmitted>>()
        .write(QuestionSubmitted {
            text: "who are you?".into(),
        });
    app.update();

    assert!(drain::<AnswerDelivered>(&mut app).is_empty());
    assert_eq!(current_state(&app), ProgressionState::Exploring);
}
