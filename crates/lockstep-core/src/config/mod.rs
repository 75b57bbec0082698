//! Configuration for the lockstep mixer
//!
//! YAML on disk, serde in memory. The config describes the *setup*
//! (channel list, per-channel initial controls, master frame step);
//! transport state itself is never persisted across sessions.

mod io;
mod paths;
mod settings;

pub use io::{load_config, save_config};
pub use paths::default_config_path;
pub use settings::{ChannelConfig, MixerConfig};
