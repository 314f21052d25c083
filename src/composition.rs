use crate::{
    foundation::{
        core::Canvas,
        error::{MotionError, MotionResult},
    },
    plan::model::AnimationPlan,
    scene::spec::SceneClip,
};

/// Everything one render consumes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Composition {
    /// Text overlay on its own gradient.
    Plan(AnimationPlan),
    /// Procedural environment.
    Scene(SceneClip),
    /// Overlay layers drawn over a scene backdrop. Build with [`Composition::layered`].
    Layered { scene: SceneClip, plan: AnimationPlan },
}

impl Composition {
    /// Overlay `plan` on `scene`. Canvas, fps and duration must agree.
    pub fn layered(scene: SceneClip, plan: AnimationPlan) -> MotionResult<Self> {
        let comp = Self::Layered { scene, plan };
        comp.validate()?;
        Ok(comp)
    }

    pub fn validate(&self) -> MotionResult<()> {
        if let Self::Layered { scene, plan } = self {
            if scene.canvas() != plan.canvas() {
                return Err(MotionError::validation(format!(
                    "layered canvas mismatch: scene {}x{} vs plan {}x{}",
                    scene.canvas().width,
                    scene.canvas().height,
                    plan.canvas().width,
                    plan.canvas().height
                )));
            }
            if scene.fps() != plan.fps() {
                return Err(MotionError::validation(format!(
                    "layered fps mismatch: scene {} vs plan {}",
                    scene.fps(),
                    plan.fps()
                )));
            }
            if (scene.duration() - plan.duration()).abs() > 1e-9 {
                return Err(MotionError::validation(format!(
                    "layered duration mismatch: scene {}s vs plan {}s",
                    scene.duration(),
                    plan.duration()
                )));
            }
        }
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        match self {
            Self::Plan(plan) => plan.canvas(),
            Self::Scene(clip) | Self::Layered { scene: clip, .. } => clip.canvas(),
        }
    }

    pub fn fps(&self) -> u32 {
        match self {
            Self::Plan(plan) => plan.fps(),
            Self::Scene(clip) | Self::Layered { scene: clip, .. } => clip.fps(),
        }
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        match self {
            Self::Plan(plan) => plan.duration(),
            Self::Scene(clip) | Self::Layered { scene: clip, .. } => clip.duration(),
        }
    }

    pub fn frame_count(&self) -> u64 {
        crate::sequence::frame_count(self.duration(), self.fps())
    }
}

#[cfg(test)]
#[path = "../tests/unit/composition.rs"]
mod tests;
