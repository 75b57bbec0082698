//! Mixer configuration structures

use serde::{Deserialize, Serialize};

use crate::types::{DEFAULT_RATE, DEFAULT_VOLUME, SEEK_STEP};

/// Root configuration for the mixer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixerConfig {
    /// Master seek advance per frame
    pub seek_step: f32,
    /// Channels to create at startup, in order
    pub channels: Vec<ChannelConfig>,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            seek_step: SEEK_STEP,
            channels: Vec::new(),
        }
    }
}

/// Initial controls for one channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Source passed to the audio primitive's `load`
    pub source: String,
    /// Delay against the master timeline
    pub delay: f32,
    pub volume: f32,
    pub rate: f32,
    pub loop_enabled: bool,
    pub muted: bool,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            source: String::new(),
            delay: 0.0,
            volume: DEFAULT_VOLUME,
            rate: DEFAULT_RATE,
            loop_enabled: false,
            muted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_transport_constants() {
        let config = MixerConfig::default();
        assert_eq!(config.seek_step, SEEK_STEP);
        assert!(config.channels.is_empty());

        let channel = ChannelConfig::default();
        assert_eq!(channel.volume, DEFAULT_VOLUME);
        assert_eq!(channel.rate, DEFAULT_RATE);
        assert_eq!(channel.delay, 0.0);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "channels:\n  - source: bass.ogg\n    delay: 20\n";
        let config: MixerConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.seek_step, SEEK_STEP);
        assert_eq!(config.channels.len(), 1);
        assert_eq!(config.channels[0].source, "bass.ogg");
        assert_eq!(config.channels[0].delay, 20.0);
        assert_eq!(config.channels[0].volume, DEFAULT_VOLUME);
    }
}
