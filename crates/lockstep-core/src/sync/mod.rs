//! Transport synchronization: master timeline, channels, and the glue
//!
//! The [`Mixer`] ties everything together: it drains input commands from
//! a lock-free queue, fires due frame tasks (master advance), and
//! reconciles every channel against the master snapshot.

mod channel;
mod command;
mod delay;
mod drag;
mod mixer;
mod scheduler;
mod transport;

pub use channel::{ChannelController, ChannelSnapshot};
pub use command::{
    command_channel, send_command, CommandReceiver, CommandSender, MixerCommand,
    COMMAND_QUEUE_CAPACITY,
};
pub use delay::{clamp_to_track, local_seek_target};
pub use drag::DragGuard;
pub use mixer::{Mixer, MixerSnapshot};
pub use scheduler::{FrameHandle, FrameScheduler, FrameTask};
pub use transport::{MasterSnapshot, MasterTransport};
