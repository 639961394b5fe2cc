//! Normalized input snapshot and the systems that fill it.
//!
//! ## Pipeline (runs before the movement controller every `Update` frame)
//!
//! 1. [`keyboard_snapshot_system`]: translates WASD/arrow keys into the
//!    snapshot's keyboard axis; any keyboard activity clears the pointer
//!    target.
//! 2. [`cheat_sequence_system`]: watches typed letters for the collect-all
//!    cheat sequences.
//!
//! The **input abstraction layer** ([`InputSnapshot`]) makes the movement
//! logic fully testable: tests populate the resource directly and run only
//! the acceleration/integration systems.  It is also the seam for the
//! presentation collaborator: pointer-click world targets and virtual
//! joystick vectors are written into the snapshot from outside the core
//! (the core never needs a window or touch surface to exist).

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::events::CheatCollectAll;
use bevy::prelude::*;

/// One frame of normalized input, consumed by the movement controller.
///
/// Precedence is strict: keyboard beats joystick beats pointer target.
/// `keyboard_axis` and `joystick` are rebuilt every tick; `pointer_target`
/// persists until arrival or until keyboard input cancels it.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputSnapshot {
    /// Unit-ish axis from WASD/arrows; `None` when no key is down.
    pub keyboard_axis: Option<Vec2>,
    /// World-space move-to target from a pointer click/drag.
    pub pointer_target: Option<Vec2>,
    /// Virtual joystick direction scaled by drag magnitude (touch devices).
    pub joystick: Option<Vec2>,
}

/// Build the keyboard axis from WASD + arrow keys.
///
/// Mirrors the classic twin-pair layout: left/right on A/D or the arrow
/// keys, up/down on W/S or the arrows.  Y grows downward, matching world
/// coordinates.  Any active key clears the pointer target so click-to-move
/// never fights the keyboard.
///
/// `ButtonInput<KeyCode>` is optional: headless hosts that drive the
/// snapshot directly don't register it.
pub fn keyboard_snapshot_system(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut snapshot: ResMut<InputSnapshot>,
) {
    let Some(keys) = keys else {
        return;
    };

    let mut axis = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        axis.y += 1.0;
    }

    if axis != Vec2::ZERO {
        snapshot.keyboard_axis = Some(axis);
        snapshot.pointer_target = None;
    } else {
        snapshot.keyboard_axis = None;
    }
}

// ── Cheat sequences ───────────────────────────────────────────────────────────

/// Sequences that trigger the bulk collect-all path when typed.
pub const CHEAT_SEQUENCES: [&str; 2] = ["STARS", "STARKID"];

/// Rolling buffer of recently typed letters.
#[derive(Resource, Debug, Clone, Default)]
pub struct CheatBuffer {
    typed: String,
    /// Buffer clears once this deadline passes without a keypress.
    reset_at_ms: f64,
}

impl CheatBuffer {
    /// Push one letter and report whether any cheat sequence just completed.
    ///
    /// The buffer holds no more than the longest sequence and resets after
    /// `reset_ms` of inactivity (measured against `now_ms`).
    pub fn push(&mut self, letter: char, now_ms: f64, reset_ms: f64) -> bool {
        if now_ms >= self.reset_at_ms {
            self.typed.clear();
        }
        self.reset_at_ms = now_ms + reset_ms;

        self.typed.push(letter.to_ascii_uppercase());
        let max_len = CHEAT_SEQUENCES.iter().map(|s| s.len()).max().unwrap_or(0);
        while self.typed.len() > max_len {
            self.typed.remove(0);
        }

        let matched = CHEAT_SEQUENCES.iter().any(|seq| self.typed.ends_with(seq));
        if matched {
            self.typed.clear();
        }
        matched
    }
}

/// Map a letter key to its character; everything else is ignored.
fn key_letter(key: KeyCode) -> Option<char> {
    Some(match key {
        KeyCode::KeyA => 'A',
        KeyCode::KeyB => 'B',
        KeyCode::KeyC => 'C',
        KeyCode::KeyD => 'D',
        KeyCode::KeyE => 'E',
        KeyCode::KeyF => 'F',
        KeyCode::KeyG => 'G',
        KeyCode::KeyH => 'H',
        KeyCode::KeyI => 'I',
        KeyCode::KeyJ => 'J',
        KeyCode::KeyK => 'K',
        KeyCode::KeyL => 'L',
        KeyCode::KeyM => 'M',
        KeyCode::KeyN => 'N',
        KeyCode::KeyO => 'O',
        KeyCode::KeyP => 'P',
        KeyCode::KeyQ => 'Q',
        KeyCode::KeyR => 'R',
        KeyCode::KeyS => 'S',
        KeyCode::KeyT => 'T',
        KeyCode::KeyU => 'U',
        KeyCode::KeyV => 'V',
        KeyCode::KeyW => 'W',
        KeyCode::KeyX => 'X',
        KeyCode::KeyY => 'Y',
        KeyCode::KeyZ => 'Z',
        _ => return None,
    })
}

/// Watch typed letters for cheat sequences and emit [`CheatCollectAll`].
pub fn cheat_sequence_system(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    clock: Res<SimClock>,
    config: Res<SimConfig>,
    mut buffer: ResMut<CheatBuffer>,
    mut cheat_writer: MessageWriter<CheatCollectAll>,
) {
    let Some(keys) = keys else {
        return;
    };

    for key in keys.get_just_pressed() {
        let Some(letter) = key_letter(*key) else {
            continue;
        };
        if buffer.push(letter, clock.now_ms, config.cheat_reset_ms) {
            info!("[cheat] collect-all sequence entered");
            cheat_writer.write(CheatCollectAll);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_sequence_matches() {
        let mut buffer = CheatBuffer::default();
        let mut t = 0.0;
        for letter in "STAR".chars() {
            assert!(!buffer.push(letter, t, 2000.0));
            t += 100.0;
        }
        assert!(buffer.push('S', t, 2000.0));
    }

    #[test]
    fn sequence_survives_garbage_prefix() {
        let mut buffer = CheatBuffer::default();
        let mut fired = false;
        for (i, letter) in "XQSTARKID".chars().enumerate() {
            fired = buffer.push(letter, i as f64 * 50.0, 2000.0);
        }
        assert!(fired, "buffer should match on the trailing STARKID");
    }

    #[test]
    fn idle_gap_resets_the_buffer() {
        let mut buffer = CheatBuffer::default();
        for (i, letter) in "STAR".chars().enumerate() {
            buffer.push(letter, i as f64 * 100.0, 2000.0);
        }
        // 3 seconds of silence, then the final letter: no match.
        assert!(!buffer.push('S', 400.0 + 3000.0, 2000.0));
    }

    #[test]
    fn lowercase_letters_match_too() {
        let mut buffer = CheatBuffer::default();
        let mut fired = false;
        for (i, letter) in "stars".chars().enumerate() {
            fired = buffer.push(letter, i as f64 * 50.0, 2000.0);
        }
        assert!(fired);
    }
}
