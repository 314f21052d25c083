//! Deterministic prompt-to-motion-graphics rendering.
//!
//! A prompt is compiled into a data plan ([`AnimationPlan`] for titled text overlays, [`SceneSpec`]
//! for procedural environments), rendered frame by frame on the CPU by [`FrameCompositor`], and
//! sequenced into an MP4 through a [`VideoEncoder`].
#![forbid(unsafe_code)]

pub mod animation;
pub mod composition;
pub mod config;
pub mod encode;
pub mod foundation;
pub mod plan;
pub mod render;
pub mod scene;
pub mod sequence;

pub use animation::ease::Ease;
pub use composition::Composition;
pub use config::{FadeStyle, RenderConfig};
pub use encode::{EncodeJob, FfmpegEncoder, VideoEncoder, is_ffmpeg_on_path};
pub use foundation::core::{Canvas, FrameIndex, Point, Rect, Rgb8, Rgba8Premul};
pub use foundation::error::{MotionError, MotionResult};
pub use foundation::math::Rng64;
pub use plan::compiler::{PromptCompiler, compile_prompt};
pub use plan::model::{
    AnimationPlan, AnimationPlanBuilder, RevealKind, ShapeAnim, ShapeKind, ShapeLayer, TextLayer,
};
pub use render::FrameRGBA;
pub use render::compositor::FrameCompositor;
pub use render::layers::{Layer, LayerStack};
pub use render::text::{BuiltinFont, FontFace, FontProvider, resolve_font};
pub use scene::compiler::compile_scene;
pub use scene::spec::{SceneClip, SceneSpec, Theme, Weather};
pub use sequence::{
    RenderStats, RenderThreading, SequencerOpts, frame_count, render_frames_to_dir,
    render_to_video, write_png,
};
