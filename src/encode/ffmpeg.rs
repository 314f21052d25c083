use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::{
    encode::{EncodeJob, VideoEncoder},
    foundation::error::{MotionError, MotionResult},
};

pub const DEFAULT_FFMPEG_BIN: &str = "ffmpeg";

pub fn is_ffmpeg_on_path() -> bool {
    probe_binary(Path::new(DEFAULT_FFMPEG_BIN))
}

fn probe_binary(bin: &Path) -> bool {
    Command::new(bin)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> MotionResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Encodes PNG sequences to H.264 MP4 through the system `ffmpeg` binary.
#[derive(Clone, Debug)]
pub struct FfmpegEncoder {
    bin: PathBuf,
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_FFMPEG_BIN)
    }
}

impl FfmpegEncoder {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    pub fn bin(&self) -> &Path {
        &self.bin
    }

    pub fn is_available(&self) -> bool {
        probe_binary(&self.bin)
    }

    pub fn args(job: &EncodeJob) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "-y",
            "-loglevel",
            "error",
            "-framerate",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        args.push(job.fps.to_string().into());
        args.push("-i".into());
        args.push(job.input_path().into_os_string());
        args.extend(
            ["-c:v", "libx264", "-pix_fmt", "yuv420p", "-movflags", "+faststart"]
                .into_iter()
                .map(OsString::from),
        );
        args.push(job.out_path.clone().into_os_string());
        args
    }
}

impl VideoEncoder for FfmpegEncoder {
    #[tracing::instrument(skip(self, job), fields(out = %job.out_path.display()))]
    fn encode(&self, job: &EncodeJob) -> MotionResult<()> {
        job.validate()?;
        ensure_parent_dir(&job.out_path)?;

        tracing::info!(bin = %self.bin.display(), fps = job.fps, "ffmpeg encode starting");
        let output = Command::new(&self.bin)
            .args(Self::args(job))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                MotionError::encode(format!(
                    "failed to spawn '{}' (is it installed and on PATH?): {e}",
                    self.bin.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MotionError::encode(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        tracing::info!("ffmpeg encode finished");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
