//! Star colors, rarity classes, and the spectrum collection tracker.
//!
//! The spectrum is the set of seven required colors; gold is a bonus
//! collectible with no completion requirement.  [`SpectrumTracker`] owns the
//! exactly-once semantics for both per-color completion and full-spectrum
//! completion; callers never need their own latch.

use bevy::prelude::*;

/// The seven spectrum colors plus the gold bonus color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StarColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Indigo,
    Violet,
    /// Bonus collectible; never part of the spectrum.
    Gold,
}

impl StarColor {
    /// The spectrum colors in rainbow order, gold excluded.
    pub const SPECTRUM: [StarColor; 7] = [
        StarColor::Red,
        StarColor::Orange,
        StarColor::Yellow,
        StarColor::Green,
        StarColor::Blue,
        StarColor::Indigo,
        StarColor::Violet,
    ];

    /// Index into [`StarColor::SPECTRUM`]; `None` for gold.
    fn spectrum_index(self) -> Option<usize> {
        StarColor::SPECTRUM.iter().position(|&c| c == self)
    }
}

/// Spawn-density / placement-policy class assigned per color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rarity {
    /// Clustered placement: rewards casual wandering.
    Common,
    /// Scattered placement: uniform across the map.
    Uncommon,
    /// Edge-biased placement: rewards exploring the world's margins.
    Rare,
}

/// Static per-color configuration. Loaded once, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct StarColorConfig {
    pub color: StarColor,
    pub rarity: Rarity,
    /// Stars of this color placed at session start.
    pub spawn_count: u32,
    /// Display color, for the presentation layer.
    pub hex: u32,
    /// Collection-chime pitch in Hz, for the presentation layer.
    pub chime_hz: u32,
}

/// The spectrum color table. Spawn counts deliberately exceed
/// `required_per_color` severalfold so no single color gates on finding
/// every last star.
pub const STAR_COLORS: [StarColorConfig; 7] = [
    StarColorConfig { color: StarColor::Red, rarity: Rarity::Common, spawn_count: 47, hex: 0xff3333, chime_hz: 262 },
    StarColorConfig { color: StarColor::Orange, rarity: Rarity::Common, spawn_count: 47, hex: 0xff8833, chime_hz: 294 },
    StarColorConfig { color: StarColor::Yellow, rarity: Rarity::Common, spawn_count: 46, hex: 0xffdd33, chime_hz: 330 },
    StarColorConfig { color: StarColor::Green, rarity: Rarity::Uncommon, spawn_count: 45, hex: 0x33ff66, chime_hz: 349 },
    StarColorConfig { color: StarColor::Blue, rarity: Rarity::Uncommon, spawn_count: 43, hex: 0x3388ff, chime_hz: 392 },
    StarColorConfig { color: StarColor::Indigo, rarity: Rarity::Rare, spawn_count: 43, hex: 0x5533ff, chime_hz: 440 },
    StarColorConfig { color: StarColor::Violet, rarity: Rarity::Rare, spawn_count: 42, hex: 0xcc33ff, chime_hz: 494 },
];

/// Look up the static config for a spectrum color. Gold has no table entry.
pub fn star_config(color: StarColor) -> Option<&'static StarColorConfig> {
    color.spectrum_index().map(|idx| &STAR_COLORS[idx])
}

/// Outcome of recording one collected star.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectOutcome {
    /// Collected count for this color after the collection.
    pub count: u32,
    /// True exactly once, on the collection that crosses the threshold.
    pub just_completed: bool,
    /// True exactly once, on the collection that completes the last color.
    pub all_complete: bool,
}

/// Outcome of the bulk collect-all path.
#[derive(Debug, Clone)]
pub struct FillOutcome {
    /// Colors that crossed their threshold during the fill, in spectrum order.
    pub newly_completed: Vec<StarColor>,
    /// True if the spectrum-complete signal had already fired before the fill.
    pub was_already_complete: bool,
}

/// Per-color collected counts plus the one-shot completion latches.
#[derive(Resource, Debug, Clone, Default)]
pub struct SpectrumTracker {
    counts: [u32; 7],
    completed: [bool; 7],
    /// Gold stars collected; informational only.
    pub gold_collected: u32,
    all_complete_fired: bool,
}

impl SpectrumTracker {
    /// Record one collected star of `color`.
    ///
    /// `required` is the uniform per-color threshold from config.  Gold
    /// increments its own counter and never completes anything.
    pub fn record(&mut self, color: StarColor, required: u32) -> CollectOutcome {
        let Some(idx) = color.spectrum_index() else {
            self.gold_collected += 1;
            return CollectOutcome {
                count: self.gold_collected,
                just_completed: false,
                all_complete: false,
            };
        };

        self.counts[idx] += 1;
        let just_completed = self.counts[idx] >= required && !self.completed[idx];
        if just_completed {
            self.completed[idx] = true;
        }

        let all_complete =
            self.completed.iter().all(|&done| done) && !self.all_complete_fired;
        if all_complete {
            self.all_complete_fired = true;
        }

        CollectOutcome {
            count: self.counts[idx],
            just_completed,
            all_complete,
        }
    }

    /// Bulk collect-all path: raise every color to `required` at once.
    ///
    /// Keeps the same one-shot guarantees as [`record`](Self::record): colors
    /// already complete are not re-reported, and the spectrum-complete signal
    /// fires at most once per session regardless of which path crossed it.
    pub fn fill_all(&mut self, required: u32) -> FillOutcome {
        let was_already_complete = self.all_complete_fired;
        let mut newly_completed = Vec::new();

        for (idx, color) in StarColor::SPECTRUM.iter().enumerate() {
            if self.counts[idx] < required {
                self.counts[idx] = required;
            }
            if !self.completed[idx] {
                self.completed[idx] = true;
                newly_completed.push(*color);
            }
        }
        self.all_complete_fired = true;

        FillOutcome {
            newly_completed,
            was_already_complete,
        }
    }

    /// Collected count for a color (gold included).
    pub fn collected(&self, color: StarColor) -> u32 {
        match color.spectrum_index() {
            Some(idx) => self.counts[idx],
            None => self.gold_collected,
        }
    }

    /// True once the color has crossed its threshold.
    pub fn is_complete(&self, color: StarColor) -> bool {
        color
            .spectrum_index()
            .map(|idx| self.completed[idx])
            .unwrap_or(false)
    }

    /// Number of completed spectrum colors.
    pub fn completed_count(&self) -> usize {
        self.completed.iter().filter(|&&done| done).count()
    }

    /// True once the full spectrum has been completed.
    pub fn spectrum_complete(&self) -> bool {
        self.all_complete_fired
    }
}
