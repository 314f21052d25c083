use crate::{
    animation::ease::Ease,
    foundation::core::{Canvas, Point, Rect, Rgb8},
    plan::model::{AnimationPlan, RevealKind, ShapeAnim, ShapeKind, ShapeLayer, TextLayer},
};

pub const DEFAULT_TITLE: &str = "Untitled animation";
pub const DEFAULT_SUBTITLE: &str = "Turning text into motion graphics…";

const TITLE_MAX_CHARS: usize = 70;
const WRAP_WIDTH: usize = 46;
const MAX_SUBTITLE_LINES: usize = 3;

// Layout coordinates are authored against this canvas and scaled to the target.
const REFERENCE: Canvas = Canvas {
    width: 1280,
    height: 720,
};

const BACKGROUND: Rgb8 = Rgb8::new(12, 12, 20);
const TITLE_COLOR: Rgb8 = Rgb8::new(245, 248, 255);
const SUBTITLE_COLOR: Rgb8 = Rgb8::new(220, 228, 245);
const ACCENT: Rgb8 = Rgb8::new(90, 170, 255);
const ACCENT_DIM: Rgb8 = Rgb8::new(70, 120, 200);

/// Heuristic prompt -> [`AnimationPlan`] compiler.
///
/// The first line of the prompt becomes the title; the rest is word-wrapped into at most three
/// subtitle lines. Every prompt (including the empty one) compiles.
#[derive(Clone, Copy, Debug)]
pub struct PromptCompiler {
    canvas: Canvas,
    fps: u32,
}

impl Default for PromptCompiler {
    fn default() -> Self {
        Self {
            canvas: REFERENCE,
            fps: 30,
        }
    }
}

impl PromptCompiler {
    /// Compiler for a custom canvas and frame rate. Invalid values fall back to the defaults.
    pub fn new(canvas: Canvas, fps: u32) -> Self {
        let canvas = if canvas.validate().is_ok() {
            canvas
        } else {
            REFERENCE
        };
        Self {
            canvas,
            fps: if fps == 0 { 30 } else { fps },
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    #[tracing::instrument(skip(self, prompt), fields(len = prompt.len()))]
    pub fn compile(&self, prompt: &str) -> AnimationPlan {
        let prompt = match prompt.trim() {
            "" => DEFAULT_TITLE,
            p => p,
        };

        let first_line = prompt.lines().next().unwrap_or_default().trim();
        let title_text: String = first_line.chars().take(TITLE_MAX_CHARS).collect();

        // `first_line` is trimmed, so locate it rather than slicing by its length.
        let rest = prompt
            .find(first_line)
            .map(|at| &prompt[at + first_line.len()..])
            .unwrap_or_default()
            .trim();
        let rest = if rest.is_empty() {
            DEFAULT_SUBTITLE
        } else {
            rest
        };

        let mut lines = wrap(rest, WRAP_WIDTH);
        lines.truncate(MAX_SUBTITLE_LINES);

        let sx = self.canvas.w() / REFERENCE.w();
        let sy = self.canvas.h() / REFERENCE.h();
        let at = |x: f64, y: f64| Point::new(x * sx, y * sy);
        let rect = |x: f64, y: f64, w: f64, h: f64| {
            Rect::from_origin_size((x * sx, y * sy), (w * sx, h * sy))
        };
        let size = |px: f64| (px * sy) as f32;

        let title = TextLayer {
            text: title_text,
            font_size: size(74.0),
            position: at(120.0, 160.0),
            color: TITLE_COLOR,
            reveal: RevealKind::SlideLeft,
            start: 0.18,
            duration: 1.05,
        };

        let subtitles = lines.iter().enumerate().map(|(i, line)| TextLayer {
            text: line.clone(),
            font_size: size(40.0),
            position: at(120.0, 320.0 + 58.0 * i as f64),
            color: SUBTITLE_COLOR,
            reveal: if i == 0 {
                RevealKind::Typewriter
            } else {
                RevealKind::Fade
            },
            start: 1.25 + 0.42 * i as f64,
            duration: 1.25,
        });

        let shapes = [
            ShapeLayer {
                kind: ShapeKind::Circle,
                bounds: rect(1030.0, 90.0, 110.0, 110.0),
                color: ACCENT,
                start: 0.25,
                duration: 1.1,
                anim: ShapeAnim::Fade,
                ease: Ease::InOutCubic,
            },
            ShapeLayer {
                kind: ShapeKind::Rect,
                bounds: rect(140.0, 520.0, 1000.0, 18.0),
                color: ACCENT,
                start: 0.75,
                duration: 1.35,
                anim: ShapeAnim::GrowW,
                ease: Ease::InOutCubic,
            },
            ShapeLayer {
                kind: ShapeKind::Rect,
                bounds: rect(140.0, 560.0, 720.0, 12.0),
                color: ACCENT_DIM,
                start: 1.05,
                duration: 1.25,
                anim: ShapeAnim::GrowW,
                ease: Ease::InOutCubic,
            },
        ];

        let duration = 5.0_f64.max(2.0 + lines.len() as f64 * 1.2);

        let builder = AnimationPlan::builder(self.canvas, self.fps, duration)
            .background(BACKGROUND)
            .title(title);
        let builder = subtitles.fold(builder, |b, layer| b.subtitle(layer));
        let builder = shapes.into_iter().fold(builder, |b, layer| b.shape(layer));

        builder.build_trusted()
    }
}

/// Compile `prompt` with the default 1280x720 @ 30 fps layout.
pub fn compile_prompt(prompt: &str) -> AnimationPlan {
    PromptCompiler::default().compile(prompt)
}

/// Greedy word wrap. Runs of whitespace collapse to a single space and words longer than
/// `width` are split across lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();

        if line_len > 0 && line_len + 1 + chars.len() <= width {
            line.push(' ');
            line.extend(chars.iter());
            line_len += 1 + chars.len();
            continue;
        }

        if chars.len() > width {
            // Fill what is left of the current line before breaking.
            if line_len > 0 && line_len + 1 < width {
                let take = width - line_len - 1;
                line.push(' ');
                line.extend(chars.drain(..take));
                line_len = width;
            }
            while chars.len() > width {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                }
                line.extend(chars.drain(..width));
                line_len = width;
            }
        }

        if chars.is_empty() {
            continue;
        }
        if line_len > 0 {
            lines.push(std::mem::take(&mut line));
        }
        line_len = chars.len();
        line.extend(chars);
    }

    if line_len > 0 {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/plan/compiler.rs"]
mod tests;
