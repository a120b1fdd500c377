//! Frame sequence assembly into an MP4 video.
//!
//! Frames are rendered into a private temporary directory that is removed
//! once the encoder has finished, whether it succeeded or not.

use crate::frame::{plan_frames, FrameRenderer};
use migboard_common::{MigboardError, Result};
use migboard_config::{ChartConfig, VideoConfig};
use migboard_data::MigrationTable;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// printf-style name pattern of frame files inside the work directory.
pub const FRAME_PATTERN: &str = "frame_%05d";

/// Ordered frame files sharing one directory and naming pattern.
#[derive(Debug, Clone)]
pub struct FrameSequence {
    dir: PathBuf,
    extension: String,
    paths: Vec<PathBuf>,
}

impl FrameSequence {
    /// Creates an empty sequence in `dir`.
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
            paths: Vec::new(),
        }
    }

    /// Reserves and returns the path of the next frame.
    pub fn next_path(&mut self) -> PathBuf {
        let path = self
            .dir
            .join(format!("frame_{:05}.{}", self.paths.len(), self.extension));
        self.paths.push(path.clone());
        path
    }

    /// Frame paths in order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether no frame was added.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// `ffmpeg`-style input pattern matching every frame.
    pub fn input_pattern(&self) -> PathBuf {
        self.dir.join(format!("{FRAME_PATTERN}.{}", self.extension))
    }
}

/// Trait for encoders that turn a frame sequence into a video file.
pub trait VideoEncoder: Send + Sync {
    /// Encodes `frames` at `fps` into `output`, overwriting it.
    fn encode(&self, frames: &FrameSequence, fps: u32, output: &Path) -> Result<()>;

    /// Check if this encoder is available on the system.
    fn is_available(&self) -> bool;

    /// Encoder name.
    fn name(&self) -> &str;
}

/// H.264 MP4 encoder backed by the `ffmpeg` binary.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    binary: String,
}

impl FfmpegEncoder {
    /// Creates an encoder invoking `binary`.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Arguments passed to ffmpeg for the given job.
    pub fn arguments(frames: &FrameSequence, fps: u32, output: &Path) -> Vec<String> {
        let fps = fps.to_string();
        vec![
            "-y".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-framerate".to_string(),
            fps.clone(),
            "-i".to_string(),
            frames.input_pattern().display().to_string(),
            "-c:v".to_string(),
            "libx264".to_string(),
            "-pix_fmt".to_string(),
            "yuv420p".to_string(),
            "-r".to_string(),
            fps,
            "-f".to_string(),
            "mp4".to_string(),
            output.display().to_string(),
        ]
    }
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl VideoEncoder for FfmpegEncoder {
    fn encode(&self, frames: &FrameSequence, fps: u32, output: &Path) -> Result<()> {
        let args = Self::arguments(frames, fps, output);
        debug!(binary = %self.binary, ?args, "Starting ffmpeg");

        let result = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| MigboardError::video(format!("Failed to start ffmpeg: {e}")))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(MigboardError::video(format!(
                "ffmpeg exited with {}: {}",
                result.status,
                stderr.trim()
            )));
        }
        Ok(())
    }

    fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn name(&self) -> &str {
        "ffmpeg"
    }
}

/// Outcome of a successful video render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSummary {
    /// Frames rendered, one per month.
    pub frames: usize,
    /// Written video file.
    pub output: PathBuf,
    /// Wall time spent rendering and encoding.
    pub elapsed: Duration,
}

/// Renders one frame per month of `table` and encodes them into `output`.
pub fn render_video(
    table: &MigrationTable,
    renderer: &dyn FrameRenderer,
    encoder: &dyn VideoEncoder,
    chart: &ChartConfig,
    video: &VideoConfig,
    output: &Path,
) -> Result<VideoSummary> {
    if table.is_empty() {
        return Err(MigboardError::EmptyTable);
    }

    if !encoder.is_available() {
        return Err(MigboardError::video(format!(
            "{} encoder is not available (binary '{}')",
            encoder.name(),
            video.ffmpeg_path
        )));
    }

    let started = Instant::now();
    let frames = plan_frames(table, chart);
    let workdir = tempfile::Builder::new()
        .prefix("migboard-frames-")
        .tempdir()?;

    let mut sequence = FrameSequence::new(workdir.path(), renderer.extension());
    for frame in &frames {
        let path = sequence.next_path();
        renderer.render_frame(frame, &path)?;
    }

    encoder.encode(&sequence, video.fps, output)?;
    workdir.close()?;

    let summary = VideoSummary {
        frames: sequence.len(),
        output: output.to_path_buf(),
        elapsed: started.elapsed(),
    };
    info!(
        frames = summary.frames,
        output = %summary.output.display(),
        elapsed_ms = summary.elapsed.as_millis(),
        encoder = encoder.name(),
        "Rendered migration video"
    );
    Ok(summary)
}
