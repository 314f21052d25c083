use crate::{
    animation::ease::Ease,
    foundation::core::{Canvas, Point, Rect, Rgb8},
    foundation::error::{MotionError, MotionResult},
};

/// How a text layer enters the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealKind {
    Fade,
    SlideLeft,
    Typewriter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rect,
    Circle,
}

/// How a shape layer enters the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeAnim {
    GrowW,
    GrowH,
    SlideUp,
    Fade,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextLayer {
    pub text: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Top-left of the line box.
    pub position: Point,
    pub color: Rgb8,
    pub reveal: RevealKind,
    /// Seconds from the start of the render.
    pub start: f64,
    /// Reveal duration in seconds, must be > 0.
    pub duration: f64,
}

/// Largest accepted text size in pixels.
pub const MAX_FONT_PX: f32 = 4096.0;

impl TextLayer {
    pub fn validate(&self) -> MotionResult<()> {
        validate_timing("text layer", self.start, self.duration)?;
        if !self.font_size.is_finite() || self.font_size <= 0.0 || self.font_size > MAX_FONT_PX {
            return Err(MotionError::validation(format!(
                "text layer font_size must be in (0, {MAX_FONT_PX}], got {}",
                self.font_size
            )));
        }
        if !self.position.x.is_finite() || !self.position.y.is_finite() {
            return Err(MotionError::validation(
                "text layer position must be finite",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeLayer {
    pub kind: ShapeKind,
    /// Unanimated geometry; the top-left corner is the growth anchor.
    pub bounds: Rect,
    pub color: Rgb8,
    pub start: f64,
    pub duration: f64,
    pub anim: ShapeAnim,
    pub ease: Ease,
}

impl ShapeLayer {
    pub fn validate(&self) -> MotionResult<()> {
        validate_timing("shape layer", self.start, self.duration)?;
        let b = self.bounds;
        if ![b.x0, b.y0, b.x1, b.y1].iter().all(|v| v.is_finite()) {
            return Err(MotionError::validation("shape layer bounds must be finite"));
        }
        Ok(())
    }
}

fn validate_timing(what: &str, start: f64, duration: f64) -> MotionResult<()> {
    if !start.is_finite() {
        return Err(MotionError::validation(format!(
            "{what} start must be finite"
        )));
    }
    if !duration.is_finite() || duration <= 0.0 {
        return Err(MotionError::validation(format!(
            "{what} duration must be finite and > 0"
        )));
    }
    Ok(())
}

/// Declarative text-overlay animation: title, subtitles and decorative shapes on a gradient.
///
/// Plans are immutable once built. Construction goes through [`AnimationPlanBuilder`] (or serde,
/// which routes through the same validation), so a plan in hand always has a positive duration
/// and frame rate.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "PlanFields")]
pub struct AnimationPlan {
    canvas: Canvas,
    fps: u32,
    duration: f64,
    background: Rgb8,
    title: Option<TextLayer>,
    subtitles: Vec<TextLayer>,
    shapes: Vec<ShapeLayer>,
}

impl AnimationPlan {
    pub fn builder(canvas: Canvas, fps: u32, duration: f64) -> AnimationPlanBuilder {
        AnimationPlanBuilder::new(canvas, fps, duration)
    }

    /// Parses and validates a plan previously written as JSON.
    pub fn from_json(json: &str) -> MotionResult<Self> {
        serde_json::from_str(json).map_err(|e| MotionError::serde(e.to_string()))
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Total duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn background(&self) -> Rgb8 {
        self.background
    }

    pub fn title(&self) -> Option<&TextLayer> {
        self.title.as_ref()
    }

    pub fn subtitles(&self) -> &[TextLayer] {
        &self.subtitles
    }

    pub fn shapes(&self) -> &[ShapeLayer] {
        &self.shapes
    }
}

#[derive(Clone, Debug)]
pub struct AnimationPlanBuilder {
    fields: PlanFields,
}

impl AnimationPlanBuilder {
    pub fn new(canvas: Canvas, fps: u32, duration: f64) -> Self {
        Self {
            fields: PlanFields {
                canvas,
                fps,
                duration,
                background: Rgb8::new(10, 10, 18),
                title: None,
                subtitles: Vec::new(),
                shapes: Vec::new(),
            },
        }
    }

    pub fn background(mut self, color: Rgb8) -> Self {
        self.fields.background = color;
        self
    }

    pub fn title(mut self, layer: TextLayer) -> Self {
        self.fields.title = Some(layer);
        self
    }

    pub fn subtitle(mut self, layer: TextLayer) -> Self {
        self.fields.subtitles.push(layer);
        self
    }

    pub fn shape(mut self, layer: ShapeLayer) -> Self {
        self.fields.shapes.push(layer);
        self
    }

    pub fn build(self) -> MotionResult<AnimationPlan> {
        AnimationPlan::try_from(self.fields)
    }

    /// Finish a plan whose canvas, fps and layer timings come from in-crate constants.
    pub(crate) fn build_trusted(self) -> AnimationPlan {
        let f = self.fields;
        debug_assert!(f.canvas.validate().is_ok() && f.fps > 0 && f.duration > 0.0);
        AnimationPlan {
            canvas: f.canvas,
            fps: f.fps,
            duration: f.duration,
            background: f.background,
            title: f.title,
            subtitles: f.subtitles,
            shapes: f.shapes,
        }
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
struct PlanFields {
    canvas: Canvas,
    fps: u32,
    duration: f64,
    background: Rgb8,
    #[serde(default)]
    title: Option<TextLayer>,
    #[serde(default)]
    subtitles: Vec<TextLayer>,
    #[serde(default)]
    shapes: Vec<ShapeLayer>,
}

impl TryFrom<PlanFields> for AnimationPlan {
    type Error = MotionError;

    fn try_from(f: PlanFields) -> MotionResult<Self> {
        f.canvas.validate()?;
        if f.fps == 0 {
            return Err(MotionError::validation("plan fps must be > 0"));
        }
        if !f.duration.is_finite() || f.duration <= 0.0 {
            return Err(MotionError::validation(
                "plan duration must be finite and > 0",
            ));
        }
        if let Some(title) = &f.title {
            title.validate()?;
        }
        for layer in &f.subtitles {
            layer.validate()?;
        }
        for layer in &f.shapes {
            layer.validate()?;
        }

        Ok(Self {
            canvas: f.canvas,
            fps: f.fps,
            duration: f.duration,
            background: f.background,
            title: f.title,
            subtitles: f.subtitles,
            shapes: f.shapes,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/model.rs"]
mod tests;
