use crate::foundation::{
    core::Canvas,
    error::{MotionError, MotionResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Sunrise,
    #[default]
    Day,
    Night,
    Rainy,
    Snowy,
    Beach,
    Forest,
    City,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Clear,
    Cloudy,
    Rain,
    Snow,
}

/// Procedural environment description.
///
/// The boolean toggles select which elements are drawn; `saturation` and `softness` are
/// multipliers (1.0 = neutral) over element chroma and over glow/vignette strength.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneSpec {
    pub theme: Theme,
    pub weather: Weather,
    pub clouds: bool,
    pub birds: bool,
    pub sun: bool,
    pub moon: bool,
    pub trees: bool,
    pub skyline: bool,
    pub ocean: bool,
    pub saturation: f64,
    pub softness: f64,
}

impl Default for SceneSpec {
    fn default() -> Self {
        Self {
            theme: Theme::Day,
            weather: Weather::Clear,
            clouds: true,
            birds: false,
            sun: true,
            moon: false,
            trees: false,
            skyline: false,
            ocean: false,
            saturation: 1.0,
            softness: 1.0,
        }
    }
}

impl SceneSpec {
    pub fn validate(&self) -> MotionResult<()> {
        for (name, v) in [("saturation", self.saturation), ("softness", self.softness)] {
            if !v.is_finite() || v < 0.0 {
                return Err(MotionError::validation(format!(
                    "scene {name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// A [`SceneSpec`] with the render timing it needs: canvas, frame rate and duration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "SceneClipFields")]
pub struct SceneClip {
    spec: SceneSpec,
    canvas: Canvas,
    fps: u32,
    duration: f64,
}

impl SceneClip {
    pub fn new(spec: SceneSpec, canvas: Canvas, fps: u32, duration: f64) -> MotionResult<Self> {
        Self::try_from(SceneClipFields {
            spec,
            canvas,
            fps,
            duration,
        })
    }

    /// 1280x720 at 30 fps for 6 seconds.
    pub fn with_defaults(spec: SceneSpec) -> MotionResult<Self> {
        Self::new(spec, Canvas::default(), 30, 6.0)
    }

    pub fn spec(&self) -> &SceneSpec {
        &self.spec
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
struct SceneClipFields {
    spec: SceneSpec,
    canvas: Canvas,
    fps: u32,
    duration: f64,
}

impl TryFrom<SceneClipFields> for SceneClip {
    type Error = MotionError;

    fn try_from(f: SceneClipFields) -> MotionResult<Self> {
        f.canvas.validate()?;
        f.spec.validate()?;
        if f.fps == 0 {
            return Err(MotionError::validation("scene fps must be > 0"));
        }
        if !f.duration.is_finite() || f.duration <= 0.0 {
            return Err(MotionError::validation(
                "scene duration must be finite and > 0",
            ));
        }
        Ok(Self {
            spec: f.spec,
            canvas: f.canvas,
            fps: f.fps,
            duration: f.duration,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/spec.rs"]
mod tests;
