//! Common types and constants for lockstep
//!
//! The master timeline runs in logical seek units from 0 to
//! [`TIMELINE_END`]; channel-local positions run in the same units,
//! offset by each channel's delay.

/// Logical position at which master playback ends and auto-stops
pub const TIMELINE_END: f32 = 100.0;

/// Master seek advance per frame
///
/// At animation-frame rate (~60 Hz) a full 0-100 pass takes roughly
/// 100 seconds. Tunable via config; this is the default.
pub const SEEK_STEP: f32 = 0.015;

/// Valid channel volume range
pub const MIN_VOLUME: f32 = 0.0;
pub const MAX_VOLUME: f32 = 1.0;

/// Valid playback rate range
pub const MIN_RATE: f32 = 0.1;
pub const MAX_RATE: f32 = 3.0;

/// Default channel volume (deliberately quiet, matching the mixer's
/// conservative startup level)
pub const DEFAULT_VOLUME: f32 = 0.05;

/// Default playback rate (1.0 = normal speed)
pub const DEFAULT_RATE: f32 = 1.0;

/// Channel identifier (index into the mixer's channel list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(pub usize);

impl ChannelId {
    /// Get the channel number for display (1-based)
    pub fn display_number(&self) -> usize {
        self.0 + 1
    }

    /// Get the raw index
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Load state for a channel's audio primitive
///
/// A channel stays `Loading` until the primitive reports its duration;
/// playback-join logic is gated on `Loaded` so the controller never
/// starts an unready primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
}
