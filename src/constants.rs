//! Centralised simulation and gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! Runtime overrides come from `assets/sim.toml` via [`crate::config::SimConfig`].

// ── World Bounds ──────────────────────────────────────────────────────────────

/// Width of the playable world (world units).
pub const WORLD_WIDTH: f32 = 4000.0;

/// Height of the playable world (world units).
pub const WORLD_HEIGHT: f32 = 3000.0;

/// Margin kept clear between the world edge and any spawned star.
pub const SPAWN_MARGIN: f32 = 150.0;

// ── Player: Movement ──────────────────────────────────────────────────────────

/// Input-driven acceleration magnitude (u/s²).
///
/// Applies to every input source: keyboard axes, joystick direction, and the
/// pointer move-to-target heading all accelerate at this rate.
pub const PLAYER_ACCELERATION: f32 = 280.0;

/// Hard speed cap (u/s) enforced after every integration step.
///
/// Halved while the player is disoriented by a solar flare.
pub const PLAYER_MAX_SPEED: f32 = 220.0;

/// Deceleration (u/s²) applied on ticks with no input acceleration.
///
/// High enough that the player coasts to a stop within a couple of seconds,
/// low enough that releasing a key does not feel like braking.
pub const PLAYER_DRAG: f32 = 60.0;

/// Distance from the pointer target at which move-to-target is considered
/// arrived and the target is cleared.
pub const ARRIVE_RADIUS: f32 = 10.0;

/// Joystick drag magnitudes below this are treated as no input.
pub const JOYSTICK_DEAD_ZONE: f32 = 0.1;

/// Speeds above this fraction of `PLAYER_MAX_SPEED` set the "moving fast"
/// presentation flag. No physics impact.
pub const FAST_SPEED_FRACTION: f32 = 0.75;

/// Factor applied to `max_speed` while disoriented.
pub const DISORIENT_SPEED_FACTOR: f32 = 0.5;

// ── Planet ────────────────────────────────────────────────────────────────────

/// Physical (hard-surface) radius of the home planet.
pub const PLANET_RADIUS: f32 = 533.0;

/// Planet centre X; the planet sits on the horizontal midline.
pub const PLANET_CENTER_X: f32 = WORLD_WIDTH / 2.0;

/// Planet centre Y; most of the planet lies below the bottom world edge so
/// only its upper horizon is inside the playable area.
pub const PLANET_CENTER_Y: f32 = WORLD_HEIGHT + PLANET_RADIUS - 350.0;

/// Gravity strength (u/s² of velocity change) inside the full-strength zone.
pub const PLANET_GRAVITY: f32 = 60.0;

/// Gravity reaches this far above the planet surface.
pub const PLANET_GRAVITY_RANGE: f32 = 350.0;

/// Width of the outer band over which gravity fades linearly to zero.
///
/// Keeps the force continuous at the range boundary; without the fade the
/// well's edge reads as an invisible wall.
pub const PLANET_GRAVITY_FADE: f32 = 200.0;

/// Players spawn hovering this far above the planet's north pole.
pub const PLAYER_SPAWN_ALTITUDE: f32 = 40.0;

// ── Stars ─────────────────────────────────────────────────────────────────────

/// Stars of each spectrum color needed to complete that color.
pub const REQUIRED_PER_COLOR: u32 = 10;

/// Gold bonus stars scattered across the map. Pure collectible; no
/// completion requirement.
pub const GOLD_SPAWN_COUNT: u32 = 200;

/// Half-extent of the square spread around a cluster centre (clustered
/// placement policy).
pub const CLUSTER_SPREAD: f32 = 120.0;

/// Depth of the border band used by the edge-biased placement policy.
pub const EDGE_ZONE_DEPTH: f32 = 400.0;

/// Player-star distance at which a star counts as collected.
pub const STAR_COLLECT_RADIUS: f32 = 28.0;

/// Stars inside this radius are nudged toward the player each tick.
pub const MAGNET_RADIUS: f32 = 60.0;

/// Peak magnet nudge (u per tick) at zero distance; scales down linearly to
/// zero at `MAGNET_RADIUS`.
pub const MAGNET_STRENGTH: f32 = 1.5;

/// Stars closer than this are left alone by the magnet; the collection
/// overlap will get them on the same tick anyway.
pub const MAGNET_MIN_DIST: f32 = 5.0;

// ── Portals ───────────────────────────────────────────────────────────────────

/// Number of portal pairs generated per session.
pub const PORTAL_PAIRS: u32 = 4;

/// Overlap radius of each portal endpoint.
pub const PORTAL_RADIUS: f32 = 40.0;

/// Shared per-pair cooldown (ms). Shared, not per-endpoint, so a teleport
/// cannot immediately bounce the player back through the same pair.
pub const PORTAL_COOLDOWN_MS: f64 = 1500.0;

/// Margin kept between portal endpoints and the world edge.
pub const PORTAL_MARGIN: f32 = 250.0;

/// Minimum separation between the two endpoints of a pair.
pub const PORTAL_MIN_PAIR_DISTANCE: f32 = 800.0;

/// Attempts allowed to find any position outside the planet footprint.
pub const PORTAL_PLACEMENT_ATTEMPTS: u32 = 100;

/// Attempts allowed to satisfy the pair-separation constraint before
/// accepting the best-effort position.
pub const PORTAL_SEPARATION_ATTEMPTS: u32 = 30;

/// Extra clearance added to the planet radius when rejecting positions.
pub const PORTAL_PLANET_CLEARANCE: f32 = 100.0;

/// Player distance at which an endpoint is permanently revealed.
pub const PORTAL_REVEAL_RADIUS: f32 = 300.0;

/// Velocity is damped (not zeroed) by this factor on arrival.
pub const PORTAL_VELOCITY_DAMP: f32 = 0.3;

// ── Hazards: Asteroid Field ───────────────────────────────────────────────────

/// Half-extent of the square region an asteroid zone scatters over.
pub const ASTEROID_ZONE_SPREAD: f32 = 400.0;

/// Initial drift speed range (±u/s per axis).
pub const ASTEROID_DRIFT_SPEED: f32 = 20.0;

/// Restitution applied when a drifting asteroid reaches the world bounds.
pub const ASTEROID_BOUNCE: f32 = 0.8;

/// Speed (u/s) the player is ejected at along the separating normal on
/// contact. Deterministic knockback, not an elastic collision.
pub const ASTEROID_KNOCKBACK_SPEED: f32 = 200.0;

/// Stun applied on asteroid contact (seconds).
pub const ASTEROID_STUN_SECS: f32 = 0.5;

/// Collision radius of the player body for hazard overlap tests.
pub const PLAYER_BODY_RADIUS: f32 = 16.0;

// ── Hazards: Black Hole ───────────────────────────────────────────────────────

/// Pull is felt inside this radius.
pub const BLACK_HOLE_PULL_RADIUS: f32 = 200.0;

/// Pull strength (u/s²) at the centre; ramps linearly from zero at
/// `BLACK_HOLE_PULL_RADIUS`.
pub const BLACK_HOLE_PULL_STRENGTH: f32 = 150.0;

/// Distances below this are excluded from the pull calculation: the
/// singularity guard.
pub const BLACK_HOLE_MIN_DIST: f32 = 5.0;

// ── Hazards: Nebula Fog ───────────────────────────────────────────────────────

/// Radius of each fog bank's proximity test.
pub const FOG_RADIUS: f32 = 300.0;

// ── Hazards: Solar Flare ──────────────────────────────────────────────────────

/// Base interval between flares (ms).
pub const FLARE_INTERVAL_MS: f64 = 30_000.0;

/// Uniform jitter added to each scheduled flare (ms).
pub const FLARE_JITTER_MS: f64 = 10_000.0;

/// Duration of the warning phase before the flare fires (ms).
pub const FLARE_WARNING_MS: f64 = 3_500.0;

/// Duration of the disorienting active phase (ms).
pub const FLARE_ACTIVE_MS: f64 = 2_500.0;

// ── Rainbow Bridge ────────────────────────────────────────────────────────────

/// Speed (u/s) the ride force blends the player's velocity toward.
pub const BRIDGE_RIDE_SPEED: f32 = 180.0;

/// Bridge lifetime before it self-destroys (ms).
pub const BRIDGE_LIFETIME_MS: f64 = 18_000.0;

/// Arc height as a fraction of arc length.
pub const BRIDGE_ARC_HEIGHT_RATIO: f32 = 0.35;

/// Default arc length for spawned bridges.
pub const BRIDGE_ARC_LENGTH: f32 = 500.0;

/// Per-tick velocity retention while riding (the remainder comes from the
/// arc tangent direction).
pub const BRIDGE_BLEND_KEEP: f32 = 0.9;

/// Half-width of the band around the arc within which the ride force applies.
pub const BRIDGE_RIDE_HALF_WIDTH: f32 = 60.0;

/// Samples used when searching for the closest point on the arc.
pub const BRIDGE_PROGRESS_SAMPLES: u32 = 20;

// ── Guide ─────────────────────────────────────────────────────────────────────

/// Delay between spectrum completion and the guide materialising (ms).
pub const GUIDE_MATERIALIZE_MS: f64 = 1_000.0;

/// Delay between spectrum completion and the guide accepting contact (ms).
pub const GUIDE_READY_MS: f64 = 4_000.0;

/// The guide appears within this offset of the player (± per axis).
pub const GUIDE_SPAWN_OFFSET: f32 = 300.0;

/// The guide's spawn position is clamped this far inside the world bounds.
pub const GUIDE_SPAWN_MARGIN: f32 = 200.0;

/// Player-guide distance that triggers the guide-reached transition.
pub const GUIDE_REACH_RADIUS: f32 = 40.0;

// ── Cheats ────────────────────────────────────────────────────────────────────

/// The typed cheat buffer resets after this long without a keypress (ms).
pub const CHEAT_RESET_MS: f64 = 2_000.0;
