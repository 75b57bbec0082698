//! Standard configuration paths

use std::path::PathBuf;

/// Default config file location
///
/// Returns `~/.config/lockstep/config.yaml` (platform equivalent via
/// the OS config directory), falling back to the working directory.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lockstep")
        .join("config.yaml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_shape() {
        let path = default_config_path();
        assert!(path.ends_with("lockstep/config.yaml"));
    }
}
