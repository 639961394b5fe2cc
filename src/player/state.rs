//! Player components and resources.
//!
//! All ECS components and Bevy resources that describe player state live
//! here.  The systems that mutate this state are in the sibling module
//! [`super::control`].

use crate::constants::{PLAYER_DRAG, PLAYER_MAX_SPEED};
use bevy::prelude::*;

// ── Components ─────────────────────────────────────────────────────────────────

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Kinematic body: velocity plus the limits governing its integration.
///
/// Owned exclusively by the entity it represents: the player and each
/// drifting asteroid carry their own.  Position lives in `Transform` so the
/// presentation layer can look entities up by id without a physics engine
/// base class in between.
#[derive(Component, Debug, Clone)]
pub struct Body {
    pub velocity: Vec2,
    /// Hard speed cap applied after every integration step.
    pub max_speed: f32,
    /// Deceleration applied on ticks without input acceleration.
    pub drag: f32,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            max_speed: PLAYER_MAX_SPEED,
            drag: PLAYER_DRAG,
        }
    }
}

/// Acceleration resolved from input this tick; overwritten every frame by
/// the acceleration system and consumed by integration.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Acceleration(pub Vec2);

/// Timed status effects perturbing the movement controller.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct StatusEffects {
    /// Seconds of stun remaining; while > 0 the player ignores input.
    pub stun_remaining: f32,
    /// Halves `max_speed`; set and cleared by the solar flare.
    pub disoriented: bool,
}

impl StatusEffects {
    pub fn is_stunned(&self) -> bool {
        self.stun_remaining > 0.0
    }
}

// ── Resources ──────────────────────────────────────────────────────────────────

/// Presentation flags derived from the movement controller each tick.
///
/// `thrusting` means input produced a non-zero acceleration; `moving_fast`
/// means speed exceeds the configured fraction of max.  Effects triggering
/// only; no physics impact.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ThrustState {
    pub thrusting: bool,
    pub moving_fast: bool,
}

/// Hard input lock engaged by the guide-reached transition.
///
/// While set, acceleration is forced to zero and velocity is held at zero;
/// a deliberate hard stop, not a physics event.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ControlLock(pub bool);
