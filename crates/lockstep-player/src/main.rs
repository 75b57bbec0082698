//! Lockstep Player - headless demo shell for the transport mixer
//!
//! Wires the lockstep core to simulated audio primitives and drives the
//! cooperative frame loop from a short script: stagger channel delays,
//! start the master, drag the master slider near the end of the
//! timeline, and let the auto-stop fire. Status lines show the channels
//! joining and leaving in lockstep with the master.

mod sim;

use anyhow::Result;

use lockstep_core::config::{self, MixerConfig};
use lockstep_core::sync::{
    command_channel, send_command, CommandSender, Mixer, MixerCommand, MixerSnapshot,
};
use lockstep_core::LoadState;

use sim::{sim_player, SimHandle};

/// Frames between status printouts
const REPORT_INTERVAL: usize = 120;

fn main() -> Result<()> {
    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("lockstep-player starting up");

    let config_path = config::default_config_path();
    let mut config: MixerConfig = config::load_config(&config_path);
    if config.channels.is_empty() {
        log::info!("no channels configured, using the built-in demo setup");
        config = demo_config(config.seek_step);
    }

    println!("╔══════════════════════════════════════════════╗");
    println!("║              Lockstep Player                 ║");
    println!("║   master-timeline multi-track transport      ║");
    println!("╚══════════════════════════════════════════════╝");
    println!();

    let mut mixer = Mixer::with_seek_step(config.seek_step);
    let (mut tx, mut rx) = command_channel();

    // One simulated primitive per configured channel; durations and load
    // latencies are staggered so loads complete at different times.
    let mut sims: Vec<SimHandle> = Vec::new();
    for (i, channel) in config.channels.iter().enumerate() {
        let duration = 40.0 + 15.0 * i as f32;
        let (player, handle) = sim_player(duration, 2 + 3 * i as u32);
        let id = mixer.add_channel(channel.source.clone(), Box::new(player));
        sims.push(handle);

        send(&mut tx, MixerCommand::SetVolume {
            channel: id.index(),
            volume: channel.volume,
        });
        send(&mut tx, MixerCommand::SetRate {
            channel: id.index(),
            rate: channel.rate,
        });
        send(&mut tx, MixerCommand::SetLoop {
            channel: id.index(),
            looping: channel.loop_enabled,
        });
        send(&mut tx, MixerCommand::SetMute {
            channel: id.index(),
            muted: channel.muted,
        });
        send(&mut tx, MixerCommand::SetDelay {
            channel: id.index(),
            delay: channel.delay,
        });
    }

    send(&mut tx, MixerCommand::TogglePlay);

    // Scripted interaction: after ~600 frames, drag the master slider
    // close to the timeline end so the auto-stop fires soon after.
    let drag_frame = 600;
    let mut frame = 0usize;
    loop {
        if frame == drag_frame {
            send(&mut tx, MixerCommand::BeginSeekDrag);
            send(&mut tx, MixerCommand::SetSeek(96.0));
            send(&mut tx, MixerCommand::EndSeekDrag);
            println!("-- master slider dragged to 96.0 --");
        }

        mixer.process_commands(&mut rx);
        mixer.run_frame();
        for sim in &sims {
            sim.tick(config.seek_step);
        }

        if frame % REPORT_INTERVAL == 0 {
            print_status(&mixer.snapshot());
        }

        // The drag puts the master near the end; once the auto-stop has
        // fired the demo is over.
        if frame > drag_frame && !mixer.snapshot().master.is_playing {
            break;
        }
        frame += 1;
    }

    print_status(&mixer.snapshot());
    println!();
    println!("master auto-stopped at the timeline end after {} frames", frame);

    mixer.shutdown();
    log::info!("lockstep-player stopped");
    Ok(())
}

/// Push a command, logging instead of silently dropping it when the
/// queue is full
fn send(tx: &mut CommandSender, command: MixerCommand) {
    if let Err(e) = send_command(tx, command) {
        log::warn!("input command {:?} lost: {}", command, e);
    }
}

/// Built-in setup used when the config lists no channels
fn demo_config(seek_step: f32) -> MixerConfig {
    let mut config = MixerConfig {
        seek_step,
        channels: Vec::new(),
    };
    for (source, delay) in [("drums.ogg", 0.0), ("bass.ogg", 10.0), ("keys.ogg", 25.0)] {
        config.channels.push(config::ChannelConfig {
            source: source.to_string(),
            delay,
            ..Default::default()
        });
    }
    config
}

fn print_status(snapshot: &MixerSnapshot) {
    println!(
        "master {:6.2} [{}]",
        snapshot.master.seek,
        if snapshot.master.is_playing { "playing" } else { "stopped" }
    );
    for channel in &snapshot.channels {
        let duration = channel
            .duration
            .map(|d| format!("{:.2}", d))
            .unwrap_or_else(|| "?".to_string());
        println!(
            "  {:<12} {:>8} {:6.2} / {:<7} delay {:5.1} [{}]",
            channel.source,
            match channel.load_state {
                LoadState::Loaded => "loaded",
                LoadState::Loading => "loading",
            },
            channel.local_seek,
            duration,
            channel.delay,
            if channel.playing { "playing" } else { "stopped" }
        );
    }
}
