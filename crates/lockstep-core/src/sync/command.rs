//! Lock-free command queue between the input surface and the mixer
//!
//! The UI (or any other input surface) pushes commands into an SPSC
//! ring buffer; the mixer drains them at frame boundaries. Push and pop
//! are wait-free, so a busy input surface can never stall the frame
//! loop and the frame loop never blocks an input handler.

/// Commands sent from the input surface to the mixer
///
/// Each variant is one atomic operation. Commands are processed in
/// arrival order at the start of a frame, and every command is followed
/// by a reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MixerCommand {
    // ─────────────────────────────────────────────────────────────
    // Master transport
    // ─────────────────────────────────────────────────────────────
    /// Toggle master play/stop
    TogglePlay,
    /// Set the master seek position (slider drag value)
    SetSeek(f32),
    /// Master seek slider pressed
    BeginSeekDrag,
    /// Master seek slider released (triggers per-channel commits)
    EndSeekDrag,

    // ─────────────────────────────────────────────────────────────
    // Per-channel controls
    // ─────────────────────────────────────────────────────────────
    /// Toggle local play/pause on a channel
    ChannelTogglePlay { channel: usize },
    /// Stop a channel and reset its primitive's playhead
    ChannelStop { channel: usize },
    /// Set channel volume (0.0 - 1.0)
    SetVolume { channel: usize, volume: f32 },
    /// Set channel playback rate (0.1 - 3.0)
    SetRate { channel: usize, rate: f32 },
    /// Enable/disable looping on a channel
    SetLoop { channel: usize, looping: bool },
    /// Mute/unmute a channel
    SetMute { channel: usize, muted: bool },
    /// Set the channel's delay against the master timeline
    SetDelay { channel: usize, delay: f32 },
    /// Channel seek or delay slider pressed
    BeginChannelDrag { channel: usize },
    /// Channel seek slider moved while held (display-only)
    ChannelSeekChange { channel: usize, value: f32 },
    /// Channel seek or delay slider released (commits stop+seek)
    EndChannelDrag { channel: usize },
}

/// Capacity of the command queue
///
/// A drag gesture emits one command per input event; 256 gives generous
/// headroom for a full frame of queued gestures across many channels.
pub const COMMAND_QUEUE_CAPACITY: usize = 256;

/// Producer half of the command queue, held by the input surface
pub type CommandSender = rtrb::Producer<MixerCommand>;

/// Consumer half of the command queue, drained by the mixer each frame
pub type CommandReceiver = rtrb::Consumer<MixerCommand>;

/// Create a new command channel (producer/consumer pair)
///
/// The producer side belongs to the input surface, the consumer side to
/// whoever drives [`super::Mixer::process_commands`].
pub fn command_channel() -> (CommandSender, CommandReceiver) {
    rtrb::RingBuffer::new(COMMAND_QUEUE_CAPACITY)
}

/// Enqueue a command for the next frame's dispatch
///
/// A full queue rejects the command instead of blocking; the caller
/// decides whether to log, retry next frame, or surface the error.
pub fn send_command(
    tx: &mut CommandSender,
    command: MixerCommand,
) -> Result<(), crate::error::MixerError> {
    tx.push(command)
        .map_err(|_| crate::error::MixerError::QueueFull)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_channel_roundtrip() {
        let (mut tx, mut rx) = command_channel();

        tx.push(MixerCommand::TogglePlay).unwrap();
        tx.push(MixerCommand::SetDelay {
            channel: 1,
            delay: 20.0,
        })
        .unwrap();

        assert!(matches!(rx.pop(), Ok(MixerCommand::TogglePlay)));
        assert!(matches!(
            rx.pop(),
            Ok(MixerCommand::SetDelay { channel: 1, .. })
        ));
        assert!(rx.pop().is_err());
    }

    #[test]
    fn test_full_queue_rejects_commands() {
        let (mut tx, mut rx) = command_channel();

        for _ in 0..COMMAND_QUEUE_CAPACITY {
            send_command(&mut tx, MixerCommand::TogglePlay).unwrap();
        }

        // One past capacity is rejected, not silently swallowed.
        assert_eq!(
            send_command(&mut tx, MixerCommand::TogglePlay),
            Err(crate::error::MixerError::QueueFull)
        );

        // Draining a slot makes the queue accept commands again, and
        // the rejected command was never enqueued.
        assert!(rx.pop().is_ok());
        send_command(&mut tx, MixerCommand::BeginSeekDrag).unwrap();
        let mut pending = 0;
        while rx.pop().is_ok() {
            pending += 1;
        }
        assert_eq!(pending, COMMAND_QUEUE_CAPACITY);
    }

    #[test]
    fn test_command_size() {
        // Commands travel through a ring buffer; keep them within a
        // couple of words so a full queue stays cache-friendly.
        let size = std::mem::size_of::<MixerCommand>();
        assert!(size <= 24, "MixerCommand is {} bytes, expected <= 24", size);
    }
}
