//! Audio playback primitive boundary
//!
//! Decoding and sample output live outside this crate. Each channel
//! controller exclusively owns one implementation of [`AudioPlayer`] and
//! is the sole caller of its mutating methods and sole consumer of its
//! events.
//!
//! # Event delivery
//!
//! Primitives report lifecycle changes through [`AudioPlayer::poll`]
//! rather than re-entrant callbacks. The mixer drains events at the start
//! of each frame, so an "ended" notification can never interrupt a
//! reconciliation already in flight on the same tick.

/// Lifecycle events reported by an audio playback primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerEvent {
    /// Decoding metadata became available; duration is now known
    Loaded { duration: f32 },
    /// Playback actually started
    Played,
    /// Playback reached the end of the track (loop off)
    Ended,
}

/// External audio playback primitive, one instance per channel
///
/// `pause()` halts output but keeps the playhead; `stop()` halts output
/// and resets the playhead to the start of the track.
pub trait AudioPlayer {
    /// Begin loading the given source; completion is reported via
    /// [`PlayerEvent::Loaded`]
    fn load(&mut self, source: &str);
    /// Start or resume playback
    fn play(&mut self);
    /// Halt playback, keeping the current position
    fn pause(&mut self);
    /// Halt playback and reset the position to the track start
    fn stop(&mut self);
    /// Move the playhead to the given position (track-local units)
    fn seek(&mut self, position: f32);
    /// Current playhead position (track-local units)
    fn position(&self) -> f32;
    /// Track duration, or `None` while still loading
    fn duration(&self) -> Option<f32>;
    /// Set output volume (0.0 - 1.0)
    fn set_volume(&mut self, volume: f32);
    /// Enable or disable looping at track end
    fn set_loop(&mut self, looping: bool);
    /// Mute or unmute output
    fn set_mute(&mut self, muted: bool);
    /// Set the playback rate (0.1 - 3.0, takes effect live)
    fn set_rate(&mut self, rate: f32);
    /// Take the next pending lifecycle event, if any
    fn poll(&mut self) -> Option<PlayerEvent>;
}
