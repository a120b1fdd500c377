//! Video generation into the configured output directory.

use migboard_common::{MigboardError, Result};
use migboard_config::{ChartConfig, Config, VideoConfig};
use migboard_data::MigrationTable;
use migboard_graphs::{
    render_video, BarFrameRenderer, FfmpegEncoder, FrameRenderer, VideoEncoder, VideoSummary,
};
use std::path::PathBuf;
use std::sync::Arc;

/// File name prefix of generated videos.
pub const VIDEO_PREFIX: &str = "migration_";
/// File name suffix of generated videos.
pub const VIDEO_SUFFIX: &str = ".mp4";

/// A video written to the output directory.
#[derive(Debug, Clone)]
pub struct GeneratedVideo {
    /// Opaque file name used in the fetch URL.
    pub file_name: String,
    /// Render details.
    pub summary: VideoSummary,
}

/// Renders migration videos and serves them back by name.
pub struct VideoService {
    renderer: Arc<dyn FrameRenderer>,
    encoder: Arc<dyn VideoEncoder>,
    chart: ChartConfig,
    video: VideoConfig,
    output_dir: PathBuf,
}

impl VideoService {
    /// Creates a service using plotters frames and the configured ffmpeg.
    pub fn from_config(config: &Config) -> Self {
        Self::with_backends(
            config,
            Arc::new(BarFrameRenderer::from_config(&config.video)),
            Arc::new(FfmpegEncoder::new(config.video.ffmpeg_path.clone())),
        )
    }

    /// Creates a service with explicit rendering and encoding backends.
    pub fn with_backends(
        config: &Config,
        renderer: Arc<dyn FrameRenderer>,
        encoder: Arc<dyn VideoEncoder>,
    ) -> Self {
        Self {
            renderer,
            encoder,
            chart: config.chart.clone(),
            video: config.video.clone(),
            output_dir: config.video.resolved_output_dir(),
        }
    }

    /// Renders `table` into a new, uniquely named video file.
    ///
    /// Blocks for the duration of rendering and encoding.
    pub fn generate(&self, table: &MigrationTable) -> Result<GeneratedVideo> {
        if table.is_empty() {
            return Err(MigboardError::EmptyTable);
        }

        std::fs::create_dir_all(&self.output_dir)?;
        let (_file, path) = tempfile::Builder::new()
            .prefix(VIDEO_PREFIX)
            .suffix(VIDEO_SUFFIX)
            .tempfile_in(&self.output_dir)?
            .keep()
            .map_err(|e| MigboardError::Io(e.error))?;

        let rendered = render_video(
            table,
            self.renderer.as_ref(),
            self.encoder.as_ref(),
            &self.chart,
            &self.video,
            &path,
        );

        match rendered {
            Ok(summary) => {
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Ok(GeneratedVideo { file_name, summary })
            }
            Err(e) => {
                if let Err(cleanup) = std::fs::remove_file(&path) {
                    tracing::warn!(path = %path.display(), error = %cleanup, "Failed to remove partial video");
                }
                Err(e)
            }
        }
    }

    /// Resolves a file name from a fetch URL to a path inside the output
    /// directory, or `None` if the name could not have been generated here.
    pub fn resolve(&self, file_name: &str) -> Option<PathBuf> {
        is_video_name(file_name).then(|| self.output_dir.join(file_name))
    }
}

/// Whether `name` looks like a generated video file name.
pub fn is_video_name(name: &str) -> bool {
    name.len() > VIDEO_PREFIX.len() + VIDEO_SUFFIX.len()
        && name.starts_with(VIDEO_PREFIX)
        && name.ends_with(VIDEO_SUFFIX)
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        && !name.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_name_validation() {
        assert!(is_video_name("migration_a1B2c3.mp4"));

        assert!(!is_video_name("migration_.mp4"));
        assert!(!is_video_name("other_a1B2c3.mp4"));
        assert!(!is_video_name("migration_a1B2c3.avi"));
        assert!(!is_video_name("migration_../../etc/passwd.mp4"));
        assert!(!is_video_name("migration_a/b.mp4"));
        assert!(!is_video_name("migration_a..b.mp4"));
    }

    #[test]
    fn test_resolve_stays_in_output_dir() {
        let mut config = Config::default();
        config.video.output_dir = Some(PathBuf::from("/srv/videos"));
        let service = VideoService::from_config(&config);

        assert_eq!(
            service.resolve("migration_abc.mp4"),
            Some(PathBuf::from("/srv/videos/migration_abc.mp4"))
        );
        assert_eq!(service.resolve("../secret"), None);
    }

    #[test]
    fn test_generate_rejects_empty_table_without_creating_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.video.output_dir = Some(dir.path().to_path_buf());
        let service = VideoService::from_config(&config);

        let err = service.generate(&MigrationTable::default()).unwrap_err();
        assert!(matches!(err, MigboardError::EmptyTable));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
