//! The mixer: master transport plus channel controllers
//!
//! Single-threaded and frame-driven. One call to [`Mixer::run_frame`]
//! per cooperative frame: drain primitive events, fire due frame tasks,
//! reconcile. Commands may arrive between frames through the lock-free
//! queue and are reconciled as they are applied, so a command's side
//! effects are visible in the same pass that produced them.

use crate::error::MixerError;
use crate::player::AudioPlayer;
use crate::types::ChannelId;

use super::channel::{ChannelController, ChannelSnapshot};
use super::command::{CommandReceiver, MixerCommand};
use super::scheduler::{FrameScheduler, FrameTask};
use super::transport::{MasterSnapshot, MasterTransport};

/// Display surface for the whole mixer
#[derive(Debug, Clone, PartialEq)]
pub struct MixerSnapshot {
    pub master: MasterSnapshot,
    pub channels: Vec<ChannelSnapshot>,
}

/// Master transport + channels + the frame loop driving them
pub struct Mixer {
    transport: MasterTransport,
    scheduler: FrameScheduler,
    channels: Vec<ChannelController>,
}

impl Mixer {
    pub fn new() -> Self {
        Self {
            transport: MasterTransport::new(),
            scheduler: FrameScheduler::new(),
            channels: Vec::new(),
        }
    }

    /// Create a mixer with a custom master step per frame
    pub fn with_seek_step(step: f32) -> Self {
        Self {
            transport: MasterTransport::with_step(step),
            scheduler: FrameScheduler::new(),
            channels: Vec::new(),
        }
    }

    /// Add a channel backed by the given audio primitive
    ///
    /// Loading starts immediately; the channel joins playback once its
    /// primitive reports a duration.
    pub fn add_channel(
        &mut self,
        source: impl Into<String>,
        player: Box<dyn AudioPlayer>,
    ) -> ChannelId {
        let id = ChannelId(self.channels.len());
        let source = source.into();
        log::info!("adding channel {} ({})", id.display_number(), source);
        self.channels.push(ChannelController::new(id, source, player));
        id
    }

    /// Drain every pending command from the queue
    ///
    /// Unknown channel references are logged and dropped; a stale input
    /// surface must never take the mixer down.
    pub fn process_commands(&mut self, rx: &mut CommandReceiver) {
        while let Ok(cmd) = rx.pop() {
            if let Err(e) = self.handle_command(cmd) {
                log::warn!("dropping command {:?}: {}", cmd, e);
            }
        }
    }

    /// Apply one command and reconcile
    pub fn handle_command(&mut self, cmd: MixerCommand) -> Result<(), MixerError> {
        match cmd {
            MixerCommand::TogglePlay => self.transport.toggle_play(&mut self.scheduler),
            MixerCommand::SetSeek(value) => self.transport.set_seek(value),
            MixerCommand::BeginSeekDrag => self.transport.begin_seek_drag(),
            MixerCommand::EndSeekDrag => self.transport.end_seek_drag(),
            MixerCommand::ChannelTogglePlay { channel } => {
                self.channel_mut(channel)?.toggle_play()
            }
            MixerCommand::ChannelStop { channel } => self.channel_mut(channel)?.stop(),
            MixerCommand::SetVolume { channel, volume } => {
                self.channel_mut(channel)?.set_volume(volume)
            }
            MixerCommand::SetRate { channel, rate } => self.channel_mut(channel)?.set_rate(rate),
            MixerCommand::SetLoop { channel, looping } => {
                self.channel_mut(channel)?.set_loop(looping)
            }
            MixerCommand::SetMute { channel, muted } => self.channel_mut(channel)?.set_mute(muted),
            MixerCommand::SetDelay { channel, delay } => {
                self.channel_mut(channel)?.set_delay(delay)
            }
            MixerCommand::BeginChannelDrag { channel } => {
                self.channel_mut(channel)?.begin_local_drag()
            }
            MixerCommand::ChannelSeekChange { channel, value } => {
                self.channel_mut(channel)?.local_seek_change(value)
            }
            MixerCommand::EndChannelDrag { channel } => {
                self.channel_mut(channel)?.end_local_drag()
            }
        }
        self.reconcile_all();
        Ok(())
    }

    /// One cooperative frame: primitive events, due tasks, reconcile
    pub fn run_frame(&mut self) {
        for channel in &mut self.channels {
            channel.poll_events(&mut self.scheduler);
        }

        for task in self.scheduler.take_due() {
            match task {
                FrameTask::AdvanceMaster => self.transport.advance(&mut self.scheduler),
                FrameTask::ChannelEndWatch(id) => {
                    // Extension point; nothing schedules this today
                    log::debug!("end watch fired for channel {}", id.display_number());
                }
            }
        }

        self.reconcile_all();
    }

    /// Reconcile every channel against the current master snapshot
    ///
    /// Channels skip the pass internally when none of their
    /// dependencies changed, so this is cheap to call after every
    /// mutation.
    fn reconcile_all(&mut self) {
        let snapshot = self.transport.snapshot();
        for channel in &mut self.channels {
            channel.reconcile(&snapshot);
        }
    }

    /// Display surface for the whole mixer
    pub fn snapshot(&self) -> MixerSnapshot {
        MixerSnapshot {
            master: self.transport.snapshot(),
            channels: self.channels.iter().map(|c| c.snapshot()).collect(),
        }
    }

    /// Cancel all scheduled work (unmount path)
    ///
    /// After shutdown no frame task can fire and mutate state behind a
    /// torn-down owner.
    pub fn shutdown(&mut self) {
        self.transport.halt(&mut self.scheduler);
        for channel in &mut self.channels {
            channel.cancel_end_watch(&mut self.scheduler);
        }
        self.scheduler.clear();
    }

    pub fn transport(&self) -> &MasterTransport {
        &self.transport
    }

    pub fn channel(&self, id: ChannelId) -> Option<&ChannelController> {
        self.channels.get(id.0)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    fn channel_mut(&mut self, index: usize) -> Result<&mut ChannelController, MixerError> {
        self.channels
            .get_mut(index)
            .ok_or(MixerError::UnknownChannel(index))
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}
