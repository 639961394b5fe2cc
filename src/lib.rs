//! Spectra: the simulation core of a 2D space exploration game.
//!
//! Everything here is headless.  The player flies a bounded world,
//! collects a spectrum of stars under magnet assistance, survives
//! asteroids, black holes, fog, and solar flares, rides portals and
//! rainbow bridges, and finally meets the guide for a scripted
//! question-and-answer that ends in the friendship epilogue.
//!
//! Presentation (rendering, audio, UI, networking) lives elsewhere and
//! talks to the core exclusively through the messages in [`events`] and a
//! handful of read-only resources.  Hosts add [`simulation::SimulationPlugin`]
//! plus Bevy's `MinimalPlugins` and `StatesPlugin`; tests typically wire
//! individual systems by hand instead.

pub mod bridge;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod guide;
pub mod hazards;
pub mod input;
pub mod oracle;
pub mod planet;
pub mod player;
pub mod portal;
pub mod progression;
pub mod simulation;
pub mod spectrum;
pub mod stars;
