use crate::{
    animation::ease::{ease_out_back, in_out_cubic, reveal_progress},
    foundation::{
        core::{Canvas, Rect, Rgb8},
        error::{MotionError, MotionResult},
        math::clamp01,
    },
    plan::model::{AnimationPlan, RevealKind, ShapeAnim, ShapeKind, ShapeLayer, TextLayer},
    render::{
        draw::{GlowShape, ShadowText},
        layers::LayerStack,
        text::FontProvider,
    },
};

/// How partially revealed text is faded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeStyle {
    /// Composite text and shadow with alpha.
    #[default]
    Alpha,
    /// Scale the fill color toward black and keep it opaque; the shadow stays at full strength.
    TintTowardBlack,
}

impl std::str::FromStr for FadeStyle {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alpha" => Ok(Self::Alpha),
            "tint" | "tint_toward_black" => Ok(Self::TintTowardBlack),
            other => Err(MotionError::validation(format!(
                "unknown fade style '{other}' (expected 'alpha' or 'tint')"
            ))),
        }
    }
}

const SLIDE_PX: f64 = 60.0;
const SAFE_MARGIN: f64 = 0.08;
const MIN_TITLE_PX: f32 = 14.0;

const SHAPE_CORNER: f64 = 18.0;
const SHAPE_GLOW: u32 = 20;
const SHAPE_GLOW_ALPHA: f64 = 90.0;

const UNDERLINE_GAP: f64 = 16.0;
const UNDERLINE_HEIGHT: f64 = 10.0;
const UNDERLINE_COLOR: Rgb8 = Rgb8::new(90, 170, 255);
const UNDERLINE_CORNER: f64 = 12.0;
const UNDERLINE_GLOW: u32 = 14;
const UNDERLINE_GLOW_ALPHA: u8 = 110;

/// Push every visible plan element at `t` in z-order: shapes, title and underline, subtitles.
pub(crate) fn push_plan_layers(
    plan: &AnimationPlan,
    t: f64,
    fonts: &dyn FontProvider,
    fade: FadeStyle,
    stack: &mut LayerStack,
) -> MotionResult<()> {
    let canvas = plan.canvas();
    for shape in plan.shapes() {
        push_shape(canvas, shape, t, stack)?;
    }

    let margin_x = (canvas.w() * SAFE_MARGIN).trunc();
    if let Some(title) = plan.title() {
        push_title(canvas, title, t, margin_x, fonts, fade, stack)?;
    }

    for layer in plan.subtitles() {
        let Some(p) = reveal_progress(t, layer.start, layer.duration) else {
            continue;
        };
        let x = layer.position.x.max(margin_x);
        push_text(layer, x, layer.font_size, p, fonts, fade, stack)?;
    }
    Ok(())
}

fn push_shape(canvas: Canvas, s: &ShapeLayer, t: f64, stack: &mut LayerStack) -> MotionResult<()> {
    let Some(raw) = reveal_progress(t, s.start, s.duration) else {
        return Ok(());
    };
    let p = s.ease.apply(raw);

    let b = s.bounds;
    let drift = (6.0 * ((t + b.x0 * 0.001) * 1.6).sin()).trunc();
    let (w, h) = (b.width(), b.height());

    let (bounds, glow_alpha) = match s.anim {
        ShapeAnim::Fade => (
            Rect::from_origin_size((b.x0, b.y0 + drift), (w, h)),
            (SHAPE_GLOW_ALPHA * clamp01(p)) as u8,
        ),
        ShapeAnim::GrowW => (
            Rect::from_origin_size((b.x0, b.y0 + drift), ((w * ease_out_back(p)).trunc(), h)),
            SHAPE_GLOW_ALPHA as u8,
        ),
        ShapeAnim::GrowH => (
            Rect::from_origin_size((b.x0, b.y0 + drift), (w, (h * ease_out_back(p)).trunc())),
            SHAPE_GLOW_ALPHA as u8,
        ),
        ShapeAnim::SlideUp => {
            let y = (b.y0 + (1.0 - in_out_cubic(p)) * SLIDE_PX).trunc() + drift;
            (
                Rect::from_origin_size((b.x0, y), (w, h)),
                SHAPE_GLOW_ALPHA as u8,
            )
        }
    };

    GlowShape {
        kind: s.kind,
        bounds,
        color: s.color,
        corner_radius: SHAPE_CORNER,
        glow: SHAPE_GLOW,
        glow_alpha,
    }
    .push(canvas, stack)
}

fn push_title(
    canvas: Canvas,
    title: &TextLayer,
    t: f64,
    margin_x: f64,
    fonts: &dyn FontProvider,
    fade: FadeStyle,
    stack: &mut LayerStack,
) -> MotionResult<()> {
    let Some(p) = reveal_progress(t, title.start, title.duration) else {
        return Ok(());
    };

    // Center inside the safe margin, shrinking once if the line is too wide.
    let max_width = canvas.w() - 2.0 * margin_x;
    let mut size = title.font_size;
    let mut extent = fonts.measure(&title.text, size);
    if extent.width > max_width {
        let scale = max_width / extent.width.max(1.0);
        size = ((f64::from(size) * scale).trunc() as f32).max(MIN_TITLE_PX);
        extent = fonts.measure(&title.text, size);
    }
    let tw = extent.width.round();
    let x = ((canvas.w() - tw) / 2.0).floor();

    push_text(title, x, size, p, fonts, fade, stack)?;

    let underline = Rect::from_origin_size(
        (x, title.position.y + extent.height.round() + UNDERLINE_GAP),
        ((tw * ease_out_back(p)).trunc(), UNDERLINE_HEIGHT),
    );
    GlowShape {
        kind: ShapeKind::Rect,
        bounds: underline,
        color: UNDERLINE_COLOR,
        corner_radius: UNDERLINE_CORNER,
        glow: UNDERLINE_GLOW,
        glow_alpha: UNDERLINE_GLOW_ALPHA,
    }
    .push(canvas, stack)
}

fn push_text(
    layer: &TextLayer,
    x: f64,
    size_px: f32,
    p: f64,
    fonts: &dyn FontProvider,
    fade: FadeStyle,
    stack: &mut LayerStack,
) -> MotionResult<()> {
    let y = layer.position.y.trunc() as i32;
    let (text, x, faded) = match layer.reveal {
        RevealKind::SlideLeft => (
            layer.text.as_str(),
            (x - (1.0 - in_out_cubic(p)) * SLIDE_PX).trunc(),
            true,
        ),
        RevealKind::Fade => (layer.text.as_str(), x, true),
        RevealKind::Typewriter => {
            let n = layer.text.chars().count();
            let shown = ((n as f64 * p) as usize).max(1);
            let end = layer
                .text
                .char_indices()
                .nth(shown)
                .map_or(layer.text.len(), |(i, _)| i);
            (&layer.text[..end], x, false)
        }
    };

    let alpha = (255.0 * p) as u8;
    let (color, opacity) = match (faded, fade) {
        (false, _) => (layer.color, 1.0),
        (true, FadeStyle::Alpha) => (layer.color, f32::from(alpha) / 255.0),
        (true, FadeStyle::TintTowardBlack) => (layer.color.scale(f64::from(alpha) / 255.0), 1.0),
    };

    ShadowText {
        text,
        size_px,
        x: x as i32,
        y,
        color,
        opacity,
    }
    .push(fonts, stack)
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
