//! The session progression state machine.
//!
//! Six states, strictly ordered.  Transitions are rank-monotonic and
//! one-shot: the machine only ever moves forward, and every advance is
//! announced once through [`ProgressionChanged`].

use crate::events::ProgressionChanged;
use bevy::prelude::*;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProgressionState {
    /// Free roaming; the spectrum is incomplete.
    #[default]
    Exploring,
    /// All seven colors collected; the guide is on its way.
    SpectrumComplete,
    /// The guide has materialized and is visible.
    GuideVisible,
    /// The player touched the guide; controls are locked.
    GuideReached,
    /// A question has been submitted and awaits its answer.
    QuestionAsked,
    /// The friendship answer landed; bridges are up.
    Epilogue,
}

impl ProgressionState {
    pub fn rank(self) -> u8 {
        match self {
            ProgressionState::Exploring => 0,
            ProgressionState::SpectrumComplete => 1,
            ProgressionState::GuideVisible => 2,
            ProgressionState::GuideReached => 3,
            ProgressionState::QuestionAsked => 4,
            ProgressionState::Epilogue => 5,
        }
    }
}

/// Advance to `target` if it outranks the current state.
///
/// Returns whether the advance was taken.  Rank checks make late or
/// duplicate triggers harmless: a stale signal can never move the machine
/// backwards or re-enter a state.
pub fn try_advance(
    current: ProgressionState,
    target: ProgressionState,
    next: &mut NextState<ProgressionState>,
    changed: &mut MessageWriter<ProgressionChanged>,
) -> bool {
    if target.rank() <= current.rank() {
        return false;
    }
    next.set(target);
    changed.write(ProgressionChanged { state: target });
    true
}
