use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use followup_engine::QueueTiming;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_PATH: &str = "./followup.ron";

/// User-facing configuration of the demo session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowupConfig {
    pub timing: QueueTiming,
    pub queue_enabled: bool,
    pub extension_enabled: bool,
    pub log_destination: LogDestination,
}

impl Default for FollowupConfig {
    fn default() -> Self {
        Self {
            timing: QueueTiming::default(),
            queue_enabled: true,
            extension_enabled: true,
            log_destination: LogDestination::default(),
        }
    }
}

/// Reads `path`. A missing file means defaults; anything else unreadable is an error.
pub fn load(path: &Path) -> anyhow::Result<FollowupConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(FollowupConfig::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("reading config from {}", path.display()))
        }
    };
    ron::from_str(&content).with_context(|| format!("parsing config from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("followup.ron");
        fs::write(&path, content).expect("write config");
        path
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load(&dir.path().join("absent.ron")).expect("load");
        assert_eq!(config, FollowupConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(
            &dir,
            "(queue_enabled: false, timing: (watch_interval_ms: 250), log_destination: Terminal)",
        );

        let config = load(&path).expect("load");
        assert!(!config.queue_enabled);
        assert!(config.extension_enabled);
        assert_eq!(config.log_destination, LogDestination::Terminal);
        assert_eq!(config.timing.watch_interval_ms, 250);
        assert_eq!(
            config.timing.confirm_timeout_ms,
            QueueTiming::default().confirm_timeout_ms
        );
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, "(queue_enabled: maybe)");

        let err = load(&path).expect_err("malformed config");
        assert!(format!("{err:#}").contains("parsing config"));
    }

    #[test]
    fn defaults_survive_a_round_trip() {
        let text = ron::ser::to_string_pretty(&FollowupConfig::default(), Default::default())
            .expect("serialize");
        let parsed: FollowupConfig = ron::from_str(&text).expect("parse");
        assert_eq!(parsed, FollowupConfig::default());
    }
}
