//! Channel controller: one track, reconciled against the master
//!
//! Each controller exclusively owns its channel state and one handle to
//! the external audio primitive. It reads the master snapshot one-way
//! and never mutates it. Reconciliation runs whenever the master
//! snapshot or the channel's own delay/duration changed, with rules
//! evaluated in a fixed order: seek propagation, play/pause propagation,
//! then drag-end commit. A channel that must stop because its mapped
//! seek went negative is stopped in the same pass that clamped it.

use crate::player::{AudioPlayer, PlayerEvent};
use crate::types::{
    ChannelId, LoadState, DEFAULT_RATE, DEFAULT_VOLUME, MAX_RATE, MAX_VOLUME, MIN_RATE,
    MIN_VOLUME,
};

use super::delay::{clamp_to_track, local_seek_target};
use super::drag::DragGuard;
use super::scheduler::{FrameHandle, FrameScheduler};
use super::transport::MasterSnapshot;

/// Display surface for one channel
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSnapshot {
    pub id: ChannelId,
    pub source: String,
    pub load_state: LoadState,
    pub local_seek: f32,
    pub duration: Option<f32>,
    pub playing: bool,
    pub volume: f32,
    pub rate: f32,
    pub delay: f32,
    pub loop_enabled: bool,
    pub muted: bool,
}

/// One channel of the mixer
pub struct ChannelController {
    id: ChannelId,
    source: String,
    player: Box<dyn AudioPlayer>,
    local_seek: f32,
    /// Unknown until the primitive reports load completion
    duration: Option<f32>,
    playing: bool,
    loop_enabled: bool,
    muted: bool,
    volume: f32,
    rate: f32,
    /// Offset subtracted from the master seek to obtain this channel's
    /// local target
    delay: f32,
    /// Shared by the channel's seek slider and delay slider; both mutate
    /// the effective target, so both commit through the same release path
    drag: DragGuard,
    /// Master snapshot as of the last reconciliation, for dirty-checking
    /// and for detecting the master drag-release edge
    last_master: Option<MasterSnapshot>,
    /// Set when delay or duration changed since the last reconciliation
    dirty: bool,
    /// Channel-local frame handle; only ever canceled (see
    /// [`super::scheduler::FrameTask::ChannelEndWatch`])
    end_watch: Option<FrameHandle>,
}

impl ChannelController {
    /// Create a controller and start loading its source
    pub fn new(id: ChannelId, source: impl Into<String>, mut player: Box<dyn AudioPlayer>) -> Self {
        let source = source.into();
        player.load(&source);
        // Seed the primitive with the initial control values
        player.set_volume(DEFAULT_VOLUME);
        player.set_loop(false);
        player.set_mute(false);

        Self {
            id,
            source,
            player,
            local_seek: 0.0,
            duration: None,
            playing: false,
            loop_enabled: false,
            muted: false,
            volume: DEFAULT_VOLUME,
            rate: DEFAULT_RATE,
            delay: 0.0,
            drag: DragGuard::new(),
            last_master: None,
            dirty: false,
            end_watch: None,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Primitive events
    // ─────────────────────────────────────────────────────────────

    /// Drain pending primitive events (called once per frame, before
    /// any reconciliation, so an event can never interrupt one)
    pub fn poll_events(&mut self, scheduler: &mut FrameScheduler) {
        while let Some(event) = self.player.poll() {
            self.handle_event(event, scheduler);
        }
    }

    fn handle_event(&mut self, event: PlayerEvent, scheduler: &mut FrameScheduler) {
        match event {
            PlayerEvent::Loaded { duration } => self.on_loaded(duration),
            PlayerEvent::Played => {
                self.playing = true;
            }
            PlayerEvent::Ended => {
                self.playing = false;
                self.cancel_end_watch(scheduler);
            }
        }
    }

    /// Decoding metadata arrived; the channel is now loaded
    pub fn on_loaded(&mut self, duration: f32) {
        log::info!(
            "channel {} loaded ({}, duration {:.2})",
            self.id.display_number(),
            self.source,
            duration
        );
        self.duration = Some(duration);
        self.dirty = true;
    }

    // ─────────────────────────────────────────────────────────────
    // Local controls
    // ─────────────────────────────────────────────────────────────

    /// Local play/pause, independent of the master
    pub fn toggle_play(&mut self) {
        if self.playing {
            self.playing = false;
            self.player.pause();
        } else {
            self.playing = true;
            self.player.play();
        }
    }

    /// Stop local playback and reset the primitive's playhead
    pub fn stop(&mut self) {
        self.player.stop();
        self.playing = false;
    }

    /// Set volume; unchanged values issue no primitive call
    pub fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(MIN_VOLUME, MAX_VOLUME);
        if volume == self.volume {
            return;
        }
        self.volume = volume;
        self.player.set_volume(volume);
    }

    /// Set playback rate; forwarded to the primitive live
    pub fn set_rate(&mut self, rate: f32) {
        let rate = rate.clamp(MIN_RATE, MAX_RATE);
        if rate == self.rate {
            return;
        }
        self.rate = rate;
        self.player.set_rate(rate);
    }

    pub fn set_loop(&mut self, looping: bool) {
        if looping == self.loop_enabled {
            return;
        }
        self.loop_enabled = looping;
        self.player.set_loop(looping);
    }

    pub fn set_mute(&mut self, muted: bool) {
        if muted == self.muted {
            return;
        }
        self.muted = muted;
        self.player.set_mute(muted);
    }

    /// Update the delay; the re-seek flows through reconciliation since
    /// the delay changes the effective target
    pub fn set_delay(&mut self, delay: f32) {
        let delay = delay.max(0.0);
        if delay == self.delay {
            return;
        }
        self.delay = delay;
        self.dirty = true;
    }

    // ─────────────────────────────────────────────────────────────
    // Local drag lifecycle (seek slider and delay slider)
    // ─────────────────────────────────────────────────────────────

    pub fn begin_local_drag(&mut self) {
        self.drag.begin();
    }

    /// Seek slider moved while held; display-only until release
    pub fn local_seek_change(&mut self, value: f32) {
        self.local_seek = match self.duration {
            Some(duration) => clamp_to_track(value, duration),
            None => value.max(0.0),
        };
    }

    /// Release: commits exactly one stop+seek pair to the primitive
    pub fn end_local_drag(&mut self) {
        if self.drag.end() {
            self.commit_seek(self.local_seek);
        }
    }

    /// The authoritative stop+seek pair, shared by local drag release
    /// and master drag release
    fn commit_seek(&mut self, from_value: f32) {
        let target = local_seek_target(from_value, self.delay);
        let clamped = clamp_to_track(target, self.duration.unwrap_or(0.0));
        self.player.stop();
        self.player.seek(clamped);
        log::debug!(
            "channel {} committed seek {:.2} (raw target {:.2})",
            self.id.display_number(),
            clamped,
            target
        );
    }

    // ─────────────────────────────────────────────────────────────
    // Reconciliation against the master
    // ─────────────────────────────────────────────────────────────

    /// Re-run the reconciliation rules if any dependency changed
    pub fn reconcile(&mut self, master: &MasterSnapshot) {
        if !self.dirty && self.last_master == Some(*master) {
            return;
        }

        let target = local_seek_target(master.seek, self.delay);

        // Rule 1: seek propagation. Keeps the displayed position synced
        // to the master; the primitive is only commanded on drag release.
        if let Some(duration) = self.duration {
            if target >= duration {
                self.local_seek = duration;
            } else if target < 0.0 {
                self.local_seek = 0.0;
            } else if target != self.local_seek {
                self.local_seek = target;
            }
        }

        // Rule 2: play/pause propagation. Joining requires a known
        // duration and an in-range target; a channel whose entry is
        // still in the future must not audibly play.
        if let Some(duration) = self.duration {
            if master.is_playing && !self.playing && target >= 0.0 && target <= duration {
                self.playing = true;
                self.player.play();
            }
        }
        if !master.is_playing && self.playing {
            self.playing = false;
            self.player.pause();
        }
        if master.is_playing && self.playing && target < 0.0 {
            self.playing = false;
            self.player.pause();
        }

        // Rule 3: master drag-end commit, on the falling edge of the
        // master's seeking flag.
        let was_master_seeking = self.last_master.map(|m| m.is_seeking).unwrap_or(false);
        if was_master_seeking && !master.is_seeking {
            self.commit_seek(master.seek);
        }

        self.last_master = Some(*master);
        self.dirty = false;
    }

    /// Cancel the channel-local frame handle, if any (teardown and
    /// `Ended` both land here)
    pub fn cancel_end_watch(&mut self, scheduler: &mut FrameScheduler) {
        if let Some(handle) = self.end_watch.take() {
            scheduler.cancel(&handle);
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Read surface
    // ─────────────────────────────────────────────────────────────

    pub fn id(&self) -> ChannelId {
        self.id
    }

    pub fn is_loaded(&self) -> bool {
        self.duration.is_some()
    }

    pub fn duration(&self) -> Option<f32> {
        self.duration
    }

    pub fn local_seek(&self) -> f32 {
        self.local_seek
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn snapshot(&self) -> ChannelSnapshot {
        ChannelSnapshot {
            id: self.id,
            source: self.source.clone(),
            load_state: if self.duration.is_some() {
                LoadState::Loaded
            } else {
                LoadState::Loading
            },
            local_seek: self.local_seek,
            duration: self.duration,
            playing: self.playing,
            volume: self.volume,
            rate: self.rate,
            delay: self.delay,
            loop_enabled: self.loop_enabled,
            muted: self.muted,
        }
    }
}
