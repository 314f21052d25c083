//! Frame sequencing: render every frame of a composition to numbered PNGs, then hand the
//! directory to a [`VideoEncoder`] exactly once.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::{
    encode::{EncodeJob, VideoEncoder, ensure_parent_dir},
    foundation::{
        core::FrameIndex,
        error::{MotionError, MotionResult},
    },
    render::{FrameRGBA, compositor::FrameCompositor},
};

pub const FRAME_PATTERN: &str = "frame_%06d.png";

const FRAME_EPSILON: f64 = 1e-9;

/// `floor(duration * fps)`, tolerant of float noise such as `5.6 * 30 = 167.999...`.
pub fn frame_count(duration: f64, fps: u32) -> u64 {
    let n = duration * f64::from(fps);
    if !n.is_finite() || n <= 0.0 {
        return 0;
    }
    (n + FRAME_EPSILON).floor() as u64
}

pub fn frame_file_name(index: u64) -> String {
    format!("frame_{index:06}.png")
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderThreading {
    pub parallel: bool,
    pub threads: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequencerOpts {
    pub threading: RenderThreading,
    /// Frames per progress batch; also the unit of parallel fan-out.
    pub chunk_size: usize,
}

impl Default for SequencerOpts {
    fn default() -> Self {
        Self {
            threading: RenderThreading::default(),
            chunk_size: 32,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub frames_written: u64,
}

/// `<out_parent>/.frames_<out_stem>` for an output video path.
pub fn scratch_dir_for(out_path: &Path) -> PathBuf {
    let parent = out_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let stem = out_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    parent.join(format!(".frames_{stem}"))
}

/// Scratch frame directory. On drop its `frame_*.png` files are deleted and the directory is
/// removed if nothing else is left in it.
#[derive(Debug)]
pub struct ScratchDir(Option<PathBuf>);

impl ScratchDir {
    /// Creates (or reuses) `path`, deleting any `*.png` left over from an earlier run.
    pub fn create(path: PathBuf) -> MotionResult<Self> {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("failed to create scratch dir '{}'", path.display()))?;
        let guard = Self(Some(path));
        guard.clear_frames()?;
        Ok(guard)
    }

    pub fn path(&self) -> &Path {
        self.0.as_deref().unwrap_or_else(|| Path::new(""))
    }

    fn clear_frames(&self) -> MotionResult<()> {
        let dir = self.path();
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("failed to read scratch dir '{}'", dir.display()))?;
        for entry in entries {
            let path = entry
                .with_context(|| format!("failed to read scratch dir '{}'", dir.display()))?
                .path();
            if path.extension().is_some_and(|ext| ext == "png") {
                std::fs::remove_file(&path)
                    .with_context(|| format!("failed to remove stale frame '{}'", path.display()))?;
            }
        }
        Ok(())
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let Some(dir) = self.0.take() else {
            return;
        };
        if let Ok(entries) = std::fs::read_dir(&dir) {
            for path in entries.flatten().map(|e| e.path()) {
                if is_frame_file(&path) {
                    let _ = std::fs::remove_file(path);
                }
            }
        }
        if let Err(err) = std::fs::remove_dir(&dir) {
            tracing::warn!(dir = %dir.display(), error = %err, "scratch dir left in place");
        }
    }
}

fn is_frame_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("frame_") && n.ends_with(".png"))
}

pub fn write_png(path: &Path, frame: &FrameRGBA) -> MotionResult<()> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected {
        return Err(MotionError::validation(format!(
            "frame data is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let straight;
    let data = if frame.premultiplied && frame.data.chunks_exact(4).any(|px| px[3] != 255) {
        straight = unpremultiply(&frame.data);
        &straight
    } else {
        &frame.data
    };

    image::save_buffer_with_format(
        path,
        data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("failed to write png '{}'", path.display()))?;
    Ok(())
}

fn unpremultiply(src: &[u8]) -> Vec<u8> {
    let mut out = src.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

/// Renders all frames into `dir` (caller-owned, created if missing) without encoding.
#[tracing::instrument(skip(compositor, dir, opts), fields(dir = %dir.display()))]
pub fn render_frames_to_dir(
    compositor: &FrameCompositor,
    dir: &Path,
    opts: &SequencerOpts,
) -> MotionResult<RenderStats> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create frames dir '{}'", dir.display()))?;
    let composition = compositor.composition();
    let total = composition.frame_count();
    if total == 0 {
        return Err(MotionError::validation(
            "composition is shorter than a single frame",
        ));
    }
    write_frames(compositor, dir, total, opts)?;
    Ok(RenderStats {
        frames_total: total,
        frames_written: total,
    })
}

/// Renders the composition to `out_path` through `encoder`.
///
/// Frames go to a scratch dir next to the output that is removed on every exit path.
#[tracing::instrument(skip(compositor, out_path, encoder, opts), fields(out = %out_path.display()))]
pub fn render_to_video(
    compositor: &FrameCompositor,
    out_path: &Path,
    encoder: &dyn VideoEncoder,
    opts: &SequencerOpts,
) -> MotionResult<RenderStats> {
    let composition = compositor.composition();
    let canvas = composition.canvas();
    let total = composition.frame_count();
    if total == 0 {
        return Err(MotionError::validation(
            "composition is shorter than a single frame",
        ));
    }

    let job = EncodeJob {
        frames_dir: scratch_dir_for(out_path),
        pattern: FRAME_PATTERN.to_string(),
        fps: composition.fps(),
        width: canvas.width,
        height: canvas.height,
        out_path: out_path.to_path_buf(),
    };
    job.validate()?;

    ensure_parent_dir(out_path)?;
    let scratch = ScratchDir::create(job.frames_dir.clone())?;
    tracing::info!(frames = total, dir = %scratch.path().display(), "rendering frames");
    write_frames(compositor, scratch.path(), total, opts)?;
    encoder.encode(&job)?;

    Ok(RenderStats {
        frames_total: total,
        frames_written: total,
    })
}

fn write_frames(
    compositor: &FrameCompositor,
    dir: &Path,
    total: u64,
    opts: &SequencerOpts,
) -> MotionResult<()> {
    let fps = compositor.composition().fps();
    let chunk = normalized_chunk_size(opts.chunk_size);
    let write_one = |i: u64| -> MotionResult<()> {
        let frame = compositor.render_frame(FrameIndex(i).secs(fps))?;
        write_png(&dir.join(frame_file_name(i)), &frame)
    };

    let pool = if opts.threading.parallel {
        Some(build_thread_pool(opts.threading.threads)?)
    } else {
        None
    };

    let mut start = 0;
    while start < total {
        let end = (start + chunk).min(total);
        match &pool {
            Some(pool) => pool.install(|| (start..end).into_par_iter().try_for_each(write_one))?,
            None => (start..end).try_for_each(write_one)?,
        }
        tracing::debug!(start, end, total, "frames written");
        start = end;
    }
    Ok(())
}

pub fn build_thread_pool(threads: Option<usize>) -> MotionResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MotionError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| MotionError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

#[cfg(test)]
#[path = "../tests/unit/sequence.rs"]
mod tests;
