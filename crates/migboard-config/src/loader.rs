//! Configuration loading from YAML files and environment overrides.

use crate::schema::Config;
use migboard_common::{MigboardError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable overriding `server.host`.
pub const ENV_HOST: &str = "MIGBOARD_HOST";
/// Environment variable overriding `server.port`.
pub const ENV_PORT: &str = "MIGBOARD_PORT";
/// Environment variable overriding `generator.seed`.
pub const ENV_SEED: &str = "MIGBOARD_SEED";
/// Environment variable overriding `video.output_dir`.
pub const ENV_VIDEO_DIR: &str = "MIGBOARD_VIDEO_DIR";
/// Environment variable overriding `video.ffmpeg_path`.
pub const ENV_FFMPEG: &str = "MIGBOARD_FFMPEG";

/// Loads configuration from a YAML file.
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this loader reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads configuration from file, falling back to defaults when the file
    /// does not exist.
    pub async fn load(&self) -> Result<Config> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                debug!(path = %self.path.display(), "Loaded configuration file");
                Self::parse(&contents)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    path = %self.path.display(),
                    "Configuration file not found, using defaults"
                );
                Ok(Config::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Loads configuration from file and applies process environment overrides.
    pub async fn load_with_env(&self) -> Result<Config> {
        let mut config = self.load().await?;
        apply_overrides(&mut config, |key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parses a YAML document into a configuration.
    pub fn parse(contents: &str) -> Result<Config> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(contents)
            .map_err(|e| MigboardError::Config(format!("invalid configuration: {e}")))
    }
}

/// Applies environment-style overrides read through `lookup`.
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup(ENV_HOST) {
        config.server.host = host;
    }

    if let Some(port) = lookup(ENV_PORT) {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|e| MigboardError::Config(format!("{ENV_PORT}: {e}")))?;
    }

    if let Some(seed) = lookup(ENV_SEED) {
        config.generator.seed = seed
            .trim()
            .parse()
            .map_err(|e| MigboardError::Config(format!("{ENV_SEED}: {e}")))?;
    }

    if let Some(dir) = lookup(ENV_VIDEO_DIR) {
        config.video.output_dir = Some(PathBuf::from(dir));
    }

    if let Some(ffmpeg) = lookup(ENV_FFMPEG) {
        config.video.ffmpeg_path = ffmpeg;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_empty_document_yields_defaults() {
        assert_eq!(ConfigLoader::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        let err = ConfigLoader::parse("server:\n  port: \"not a port\"\n").unwrap_err();
        assert!(matches!(err, MigboardError::Config(_)));
    }

    #[test]
    fn test_overrides_applied() {
        let vars: HashMap<&str, &str> = [
            (ENV_HOST, "0.0.0.0"),
            (ENV_PORT, "8080"),
            (ENV_SEED, "7"),
            (ENV_VIDEO_DIR, "/var/tmp/videos"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        apply_overrides(&mut config, |k| vars.get(k).map(ToString::to_string)).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.generator.seed, 7);
        assert_eq!(
            config.video.output_dir,
            Some(PathBuf::from("/var/tmp/videos"))
        );
        assert_eq!(config.video.ffmpeg_path, "ffmpeg");
    }

    #[test]
    fn test_bad_port_override_is_an_error() {
        let mut config = Config::default();
        let result = apply_overrides(&mut config, |k| {
            (k == ENV_PORT).then(|| "eighty".to_string())
        });
        assert!(result.is_err());
    }
}
