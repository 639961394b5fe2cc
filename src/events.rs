//! Core-to-presentation messages.
//!
//! The simulation core never draws, plays audio, or touches the network; it
//! reports everything the presentation layer might care about through these
//! buffered messages, written in a fixed per-tick order by the systems in
//! [`crate::simulation::SimulationPlugin`].  Presentation code subscribes
//! with `MessageReader<T>` and may lag a frame without losing anything.

use crate::progression::ProgressionState;
use crate::spectrum::StarColor;
use bevy::prelude::*;

/// A star was collected this tick.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct StarCollected {
    pub color: StarColor,
    pub position: Vec2,
}

/// A spectrum color just crossed its required count. Fires at most once per
/// color per session.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCompleted {
    pub color: StarColor,
}

/// Every spectrum color is complete. Fires exactly once per session.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct SpectrumCompleted;

/// The player was stunned (asteroid contact).
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct PlayerStunned {
    /// Stun length in seconds.
    pub duration: f32,
}

/// The player teleported through a portal pair.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct PortalTeleport {
    pub from: Vec2,
    pub to: Vec2,
}

/// The progression state machine advanced.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressionChanged {
    pub state: ProgressionState,
}

/// A question for the guide, submitted by the presentation layer once the
/// guide has been reached.
#[derive(Message, Debug, Clone)]
pub struct QuestionSubmitted {
    pub text: String,
}

/// The guide's answer, resolved by the scripted oracle.
#[derive(Message, Debug, Clone)]
pub struct AnswerDelivered {
    pub text: String,
    /// Set when the answer triggers the friendship epilogue.
    pub epilogue: bool,
}

/// Debug path: instantly fill every spectrum color to its required count.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct CheatCollectAll;
