//! Generic YAML configuration I/O
//!
//! A missing or unparsable file falls back to defaults with a logged
//! warning; only writing can fail.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Load a configuration from a YAML file, falling back to defaults
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        log::info!("no config at {:?}, using defaults", path);
        return T::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<T>(&contents) {
            Ok(config) => {
                log::info!("loaded config from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("invalid config at {:?} ({}), using defaults", path, e);
                T::default()
            }
        },
        Err(e) => {
            log::warn!("unreadable config at {:?} ({}), using defaults", path, e);
            T::default()
        }
    }
}

/// Save a configuration to a YAML file, creating parent directories
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("failed to serialize config")?;
    std::fs::write(path, yaml).with_context(|| format!("failed to write config to {:?}", path))?;

    log::info!("saved config to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MixerConfig;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config: MixerConfig = load_config(Path::new("/nonexistent/lockstep/config.yaml"));
        assert_eq!(config, MixerConfig::default());
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let mut config = MixerConfig::default();
        config.seek_step = 0.03;
        config.channels.push(crate::config::ChannelConfig {
            source: "drums.ogg".to_string(),
            delay: 12.5,
            ..Default::default()
        });

        save_config(&config, &path).unwrap();
        let loaded: MixerConfig = load_config(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_yaml_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "seek_step: [not a number").unwrap();

        let config: MixerConfig = load_config(&path);
        assert_eq!(config, MixerConfig::default());
    }
}
