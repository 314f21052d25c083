use std::{path::PathBuf, sync::Arc};

use crate::{
    encode::{FfmpegEncoder, ffmpeg::DEFAULT_FFMPEG_BIN},
    foundation::error::{MotionError, MotionResult},
    render::text::{FontProvider, font_candidates, resolve_font},
    sequence::{RenderThreading, SequencerOpts},
};

pub use crate::render::overlay::FadeStyle;

pub const ENV_FONT: &str = "PROMPTMOTION_FONT";
pub const ENV_FFMPEG: &str = "PROMPTMOTION_FFMPEG";
pub const ENV_THREADS: &str = "PROMPTMOTION_THREADS";
pub const ENV_FADE: &str = "PROMPTMOTION_FADE";

/// Render-time knobs that are not part of a composition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Font file tried before the system candidates.
    pub font_path: Option<PathBuf>,
    pub ffmpeg_bin: PathBuf,
    pub fade_style: FadeStyle,
    pub threading: RenderThreading,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            ffmpeg_bin: PathBuf::from(DEFAULT_FFMPEG_BIN),
            fade_style: FadeStyle::default(),
            threading: RenderThreading::default(),
        }
    }
}

impl RenderConfig {
    pub fn from_env() -> MotionResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any variable source; unset or blank variables keep the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MotionResult<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();

        if let Some(path) = get(ENV_FONT) {
            cfg.font_path = Some(PathBuf::from(path));
        }
        if let Some(bin) = get(ENV_FFMPEG) {
            cfg.ffmpeg_bin = PathBuf::from(bin);
        }
        if let Some(fade) = get(ENV_FADE) {
            cfg.fade_style = fade.parse()?;
        }
        if let Some(threads) = get(ENV_THREADS) {
            let n = threads.trim().parse::<usize>().map_err(|_| {
                MotionError::validation(format!("{ENV_THREADS} must be a thread count, got '{threads}'"))
            })?;
            cfg = cfg.with_threads(n)?;
        }
        Ok(cfg)
    }

    /// `1` renders sequentially; larger counts fan frames out over a pool of that size.
    pub fn with_threads(mut self, threads: usize) -> MotionResult<Self> {
        if threads == 0 {
            return Err(MotionError::validation("thread count must be >= 1"));
        }
        self.threading = RenderThreading {
            parallel: threads > 1,
            threads: (threads > 1).then_some(threads),
        };
        Ok(self)
    }

    pub fn font_candidates(&self) -> Vec<PathBuf> {
        font_candidates(self.font_path.as_deref())
    }

    pub fn fonts(&self) -> Arc<dyn FontProvider> {
        resolve_font(&self.font_candidates())
    }

    pub fn encoder(&self) -> FfmpegEncoder {
        FfmpegEncoder::new(self.ffmpeg_bin.clone())
    }

    pub fn sequencer_opts(&self) -> SequencerOpts {
        SequencerOpts {
            threading: self.threading.clone(),
            ..SequencerOpts::default()
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
