//! Master transport: the single authoritative timeline
//!
//! Owns the master seek position and play flag and advances the position
//! on the cooperative frame loop. All channels read this state one-way;
//! nothing outside this struct mutates it.

use crate::types::{SEEK_STEP, TIMELINE_END};

use super::scheduler::{FrameHandle, FrameScheduler, FrameTask};

/// Read-only view of the master state, taken once per reconciliation
/// pass and handed to every channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MasterSnapshot {
    /// Current master seek position (logical units, 0 to TIMELINE_END)
    pub seek: f32,
    /// Whether the master transport is playing
    pub is_playing: bool,
    /// Whether the master seek slider is being dragged
    pub is_seeking: bool,
}

/// The master transport
///
/// The frame handle and `is_playing` move together: a tick is scheduled
/// iff the transport is playing. `advance` is the only path that stops
/// playback automatically (terminal auto-stop at [`TIMELINE_END`]).
pub struct MasterTransport {
    seek: f32,
    is_playing: bool,
    is_seeking: bool,
    /// Advance per frame (config-tunable, defaults to [`SEEK_STEP`])
    step: f32,
    /// Handle to the pending tick, present iff playing
    frame: Option<FrameHandle>,
}

impl MasterTransport {
    pub fn new() -> Self {
        Self::with_step(SEEK_STEP)
    }

    /// Create a transport with a custom per-frame step
    pub fn with_step(step: f32) -> Self {
        Self {
            seek: 0.0,
            is_playing: false,
            is_seeking: false,
            step,
            frame: None,
        }
    }

    /// Flip play/pause; schedules the tick on the rising edge and
    /// cancels it on the falling edge
    pub fn toggle_play(&mut self, scheduler: &mut FrameScheduler) {
        if self.is_playing {
            self.is_playing = false;
            self.cancel_frame(scheduler);
            log::debug!("master transport paused at seek {:.2}", self.seek);
        } else {
            self.is_playing = true;
            self.frame = Some(scheduler.schedule(FrameTask::AdvanceMaster));
            log::debug!("master transport playing from seek {:.2}", self.seek);
        }
    }

    /// Set the seek position directly (slider drag); never interprets
    /// play/pause
    pub fn set_seek(&mut self, value: f32) {
        self.seek = value.max(0.0);
    }

    /// Master slider drag started
    pub fn begin_seek_drag(&mut self) {
        self.is_seeking = true;
    }

    /// Master slider drag ended
    pub fn end_seek_drag(&mut self) {
        self.is_seeking = false;
    }

    /// One frame of advancement
    ///
    /// Reaching [`TIMELINE_END`] resets the seek to 0 and stops playback
    /// without rescheduling; otherwise the next tick is scheduled.
    pub fn advance(&mut self, scheduler: &mut FrameScheduler) {
        self.frame = None;
        if !self.is_playing {
            return;
        }

        let next = self.seek + self.step;
        if next >= TIMELINE_END {
            self.seek = 0.0;
            self.is_playing = false;
            log::debug!("master transport reached timeline end, auto-stopped");
        } else {
            self.seek = next;
            self.frame = Some(scheduler.schedule(FrameTask::AdvanceMaster));
        }
    }

    /// Cancel the pending tick (stop/unmount path)
    pub fn cancel_frame(&mut self, scheduler: &mut FrameScheduler) {
        if let Some(handle) = self.frame.take() {
            scheduler.cancel(&handle);
        }
    }

    /// Stop playback and cancel the pending tick (unmount path)
    pub fn halt(&mut self, scheduler: &mut FrameScheduler) {
        self.is_playing = false;
        self.cancel_frame(scheduler);
    }

    pub fn seek(&self) -> f32 {
        self.seek
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_seeking(&self) -> bool {
        self.is_seeking
    }

    /// Take the read-only view handed to channels
    pub fn snapshot(&self) -> MasterSnapshot {
        MasterSnapshot {
            seek: self.seek,
            is_playing: self.is_playing,
            is_seeking: self.is_seeking,
        }
    }
}

impl Default for MasterTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_schedules_and_cancels() {
        let mut sched = FrameScheduler::new();
        let mut transport = MasterTransport::new();

        transport.toggle_play(&mut sched);
        assert!(transport.is_playing());
        assert_eq!(sched.pending_len(), 1);

        transport.toggle_play(&mut sched);
        assert!(!transport.is_playing());
        assert_eq!(sched.pending_len(), 0);
    }

    #[test]
    fn test_advance_increments_and_reschedules() {
        let mut sched = FrameScheduler::new();
        let mut transport = MasterTransport::with_step(0.5);

        transport.toggle_play(&mut sched);
        sched.take_due();
        transport.advance(&mut sched);

        assert_eq!(transport.seek(), 0.5);
        assert!(transport.is_playing());
        assert_eq!(sched.pending_len(), 1);
    }

    #[test]
    fn test_auto_stop_at_timeline_end() {
        let mut sched = FrameScheduler::new();
        let mut transport = MasterTransport::with_step(1.0);

        transport.toggle_play(&mut sched);
        transport.set_seek(TIMELINE_END - 0.5);
        sched.take_due();
        transport.advance(&mut sched);

        // Terminal auto-stop: reset to 0, stopped, nothing scheduled
        assert_eq!(transport.seek(), 0.0);
        assert!(!transport.is_playing());
        assert_eq!(sched.pending_len(), 0);
    }

    #[test]
    fn test_set_seek_does_not_touch_play_state() {
        let mut sched = FrameScheduler::new();
        let mut transport = MasterTransport::new();

        transport.set_seek(42.0);
        assert_eq!(transport.seek(), 42.0);
        assert!(!transport.is_playing());

        transport.toggle_play(&mut sched);
        transport.set_seek(10.0);
        assert!(transport.is_playing());
    }

    #[test]
    fn test_seek_drag_flag() {
        let mut transport = MasterTransport::new();
        transport.begin_seek_drag();
        assert!(transport.snapshot().is_seeking);
        transport.end_seek_drag();
        assert!(!transport.snapshot().is_seeking);
    }

    #[test]
    fn test_advance_after_pause_is_inert() {
        let mut sched = FrameScheduler::new();
        let mut transport = MasterTransport::new();

        transport.toggle_play(&mut sched);
        transport.toggle_play(&mut sched);
        transport.advance(&mut sched);

        assert_eq!(transport.seek(), 0.0);
        assert_eq!(sched.pending_len(), 0);
    }
}
