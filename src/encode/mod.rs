pub mod ffmpeg;

use std::path::PathBuf;

use crate::foundation::error::{MotionError, MotionResult};

pub use ffmpeg::{FfmpegEncoder, ensure_parent_dir, is_ffmpeg_on_path};

/// One encode request: a directory of numbered PNG frames turned into a single video file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeJob {
    pub frames_dir: PathBuf,
    /// printf-style frame name, e.g. `frame_%06d.png`.
    pub pattern: String,
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    pub out_path: PathBuf,
}

impl EncodeJob {
    pub fn validate(&self) -> MotionResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MotionError::validation("encode width/height must be non-zero"));
        }
        if self.fps == 0 {
            return Err(MotionError::validation("encode fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(MotionError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if !self.pattern.contains('%') {
            return Err(MotionError::validation(format!(
                "frame pattern '{}' has no frame number placeholder",
                self.pattern
            )));
        }
        Ok(())
    }

    pub fn input_path(&self) -> PathBuf {
        self.frames_dir.join(&self.pattern)
    }
}

/// Turns a frame directory into a video. Called once per render, after every frame is on disk.
pub trait VideoEncoder: Send + Sync {
    fn encode(&self, job: &EncodeJob) -> MotionResult<()>;
}

#[cfg(test)]
#[path = "../../tests/unit/encode/mod.rs"]
mod tests;
