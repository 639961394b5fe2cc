//! The guide: appears once the spectrum is complete, waits to be reached.
//!
//! Spectrum completion arms two clock deadlines.  The guide entity exists
//! from the moment of completion but only counts as visible once the
//! materialize deadline passes, and only accepts contact once the ready
//! deadline passes.  Contact hard-stops the player and hands control to
//! the question flow.

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::events::{ProgressionChanged, SpectrumCompleted};
use crate::player::{Body, ControlLock, Player};
use crate::progression::{try_advance, ProgressionState};
use bevy::prelude::*;
use rand::Rng;

#[derive(Component, Debug, Clone, Copy)]
pub struct Guide {
    /// Clock time the guide becomes visible.
    pub materialize_at_ms: f64,
    /// Clock time the guide starts accepting contact.
    pub ready_at_ms: f64,
}

/// Pick the guide's spot: near the player but clamped well inside the
/// world so it never materializes in a corner.
fn guide_position(player_pos: Vec2, config: &SimConfig) -> Vec2 {
    let mut rng = rand::thread_rng();
    let offset = Vec2::new(
        rng.gen_range(-config.guide_spawn_offset..config.guide_spawn_offset),
        rng.gen_range(-config.guide_spawn_offset..config.guide_spawn_offset),
    );
    let margin = config.guide_spawn_margin;
    (player_pos + offset).clamp(
        Vec2::splat(margin),
        Vec2::new(config.world_width - margin, config.world_height - margin),
    )
}

/// React to spectrum completion: spawn the guide and advance progression.
pub fn guide_spawn_system(
    mut commands: Commands,
    clock: Res<SimClock>,
    config: Res<SimConfig>,
    mut completions: MessageReader<SpectrumCompleted>,
    mut changed: MessageWriter<ProgressionChanged>,
    state: Res<State<ProgressionState>>,
    mut next: ResMut<NextState<ProgressionState>>,
    players: Query<&Transform, With<Player>>,
) {
    if completions.read().next().is_none() {
        return;
    }
    completions.clear();

    let Ok(transform) = players.single() else {
        return;
    };
    if !try_advance(
        *state.get(),
        ProgressionState::SpectrumComplete,
        &mut next,
        &mut changed,
    ) {
        return;
    }

    let pos = guide_position(transform.translation.truncate(), &config);
    commands.spawn((
        Guide {
            materialize_at_ms: clock.now_ms + config.guide_materialize_ms,
            ready_at_ms: clock.now_ms + config.guide_ready_ms,
        },
        Transform::from_translation(pos.extend(0.0)),
    ));
    println!("✓ Guide inbound at {pos}");
}

/// Flip to `GuideVisible` when the materialize deadline passes.
pub fn guide_materialize_system(
    clock: Res<SimClock>,
    mut changed: MessageWriter<ProgressionChanged>,
    state: Res<State<ProgressionState>>,
    mut next: ResMut<NextState<ProgressionState>>,
    guides: Query<&Guide>,
) {
    let Ok(guide) = guides.single() else {
        return;
    };
    if *state.get() == ProgressionState::SpectrumComplete && clock.reached(guide.materialize_at_ms)
    {
        try_advance(
            *state.get(),
            ProgressionState::GuideVisible,
            &mut next,
            &mut changed,
        );
    }
}

/// Detect contact with a ready guide: lock and stop the player, advance to
/// `GuideReached`.
pub fn guide_reach_system(
    clock: Res<SimClock>,
    config: Res<SimConfig>,
    mut lock: ResMut<ControlLock>,
    mut changed: MessageWriter<ProgressionChanged>,
    state: Res<State<ProgressionState>>,
    mut next: ResMut<NextState<ProgressionState>>,
    guides: Query<(&Guide, &Transform), Without<Player>>,
    mut players: Query<(&Transform, &mut Body), With<Player>>,
) {
    if *state.get() != ProgressionState::GuideVisible {
        return;
    }
    let Ok((guide, guide_transform)) = guides.single() else {
        return;
    };
    if !clock.reached(guide.ready_at_ms) {
        return;
    }
    let Ok((player_transform, mut body)) = players.single_mut() else {
        return;
    };

    let distance = player_transform
        .translation
        .truncate()
        .distance(guide_transform.translation.truncate());
    if distance >= config.guide_reach_radius {
        return;
    }

    body.velocity = Vec2::ZERO;
    lock.0 = true;
    try_advance(
        *state.get(),
        ProgressionState::GuideReached,
        &mut next,
        &mut changed,
    );
}
