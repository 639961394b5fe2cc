//! Environmental hazards: asteroid fields, black holes, nebula fog, and
//! the solar flare cycle.
//!
//! Each hazard perturbs the player in exactly one deterministic way:
//! knockback, pull, a presentation flag, or disorientation.  None of them
//! end the run; there is no damage model.

pub mod asteroid_field;
pub mod black_hole;
pub mod nebula;
pub mod solar_flare;

pub use asteroid_field::{
    asteroid_contact_system, asteroid_drift_system, spawn_asteroid_fields, Asteroid,
};
pub use black_hole::{black_hole_pull_system, spawn_black_holes, BlackHole};
pub use nebula::{fog_probe_system, spawn_nebula_fogs, FogState, NebulaFog};
pub use solar_flare::{solar_flare_system, FlarePhase, FlareState};
