use anyhow::{Context, Result};
use clap::ValueEnum;
use herald_game::{HeraldConfig, MalformedInputPolicy, UnknownCommandPolicy};
use std::path::PathBuf;

/// Built-in content sets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// 5x5 room, no background, stops on unknown commands
    #[default]
    Demo,
    /// Classic 10x10 demo room with an animated background
    Classic,
}

impl Preset {
    pub fn config(&self) -> HeraldConfig {
        match self {
            Preset::Demo => HeraldConfig::default(),
            Preset::Classic => HeraldConfig::classic(),
        }
    }
}

/// Command line choices that shape the session configuration
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub config_file: Option<PathBuf>,
    pub preset: Preset,
    pub continue_on_unknown: bool,
    pub skip_malformed: bool,
}

impl LaunchOptions {
    /// Load the file or preset, then apply flag overrides
    pub fn resolve(&self) -> Result<HeraldConfig> {
        let mut config = match &self.config_file {
            Some(path) => HeraldConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => self.preset.config(),
        };

        if self.continue_on_unknown {
            config.session.unknown_command = UnknownCommandPolicy::Continue;
        }
        if self.skip_malformed {
            config.session.malformed_input = MalformedInputPolicy::Skip;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_options_use_demo_preset() {
        let config = LaunchOptions::default().resolve().unwrap();
        assert_eq!(config, HeraldConfig::default());
    }

    #[test]
    fn test_flags_override_preset() {
        let options = LaunchOptions {
            preset: Preset::Classic,
            skip_malformed: true,
            ..LaunchOptions::default()
        };
        let config = options.resolve().unwrap();

        assert_eq!(config.room.width, 10);
        assert_eq!(config.session.unknown_command, UnknownCommandPolicy::Continue);
        assert_eq!(config.session.malformed_input, MalformedInputPolicy::Skip);
    }

    #[test]
    fn test_config_file_wins_over_preset() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[background]\nanimation = 3\nframe_offset = 1").unwrap();

        let options = LaunchOptions {
            config_file: Some(temp_file.path().to_path_buf()),
            preset: Preset::Classic,
            continue_on_unknown: true,
            ..LaunchOptions::default()
        };
        let config = options.resolve().unwrap();

        assert_eq!(config.background.encode(), "3 1");
        assert_eq!(config.room.width, 5);
        assert_eq!(config.session.unknown_command, UnknownCommandPolicy::Continue);
    }

    #[test]
    fn test_missing_config_file() {
        let options = LaunchOptions {
            config_file: Some(PathBuf::from("/nonexistent/herald.toml")),
            ..LaunchOptions::default()
        };
        let err = options.resolve().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/herald.toml"));
    }
}
