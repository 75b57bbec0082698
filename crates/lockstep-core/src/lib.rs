//! Lockstep Core - master-timeline transport synchronization
//!
//! One master timeline drives any number of independently loaded audio
//! channels so they play, pause, and seek in lockstep. Each channel can
//! apply its own delay, volume, rate, loop, and mute on top of the master
//! transport. Actual audio decoding and output are delegated to an
//! external playback primitive behind the [`player::AudioPlayer`] trait.

pub mod config;
pub mod error;
pub mod player;
pub mod sync;
pub mod types;

pub use types::*;
