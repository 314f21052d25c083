use std::sync::Arc;

use crate::{
    composition::Composition,
    foundation::{
        core::{Canvas, Rgb8},
        error::{MotionError, MotionResult},
    },
    render::{
        FrameRGBA,
        background::{Vignette, vertical_gradient},
        environment::{clip_progress, push_scene_layers, sky_palette},
        layers::LayerStack,
        overlay::{FadeStyle, push_plan_layers},
        surface::Surface,
        text::FontProvider,
    },
    scene::spec::SceneClip,
};

const OVERLAY_VIGNETTE_STRENGTH: f64 = 0.7;
const OVERLAY_VIGNETTE_BLEND: f64 = 0.35;
const SCENE_VIGNETTE_BLEND: f64 = 0.18;

/// Pure `(composition, t) -> frame` renderer.
///
/// Everything that does not depend on time (the vignette mask) is computed once here; each frame
/// then only builds the gradient backdrop and the layer stack. Shareable across render threads.
pub struct FrameCompositor {
    composition: Composition,
    fonts: Arc<dyn FontProvider>,
    fade: FadeStyle,
    vignette: Vignette,
}

impl std::fmt::Debug for FrameCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameCompositor")
            .field("composition", &self.composition)
            .field("font", &self.fonts.family())
            .field("fade", &self.fade)
            .finish_non_exhaustive()
    }
}

impl FrameCompositor {
    #[tracing::instrument(skip(composition, fonts), fields(font = fonts.family()))]
    pub fn new(composition: Composition, fonts: Arc<dyn FontProvider>) -> MotionResult<Self> {
        composition.validate()?;
        let canvas = composition.canvas();
        canvas.validate()?;

        let vignette = match &composition {
            Composition::Plan(_) => {
                Vignette::rings(canvas, OVERLAY_VIGNETTE_STRENGTH, OVERLAY_VIGNETTE_BLEND)?
            }
            Composition::Scene(clip) | Composition::Layered { scene: clip, .. } => {
                Vignette::disc(canvas, SCENE_VIGNETTE_BLEND * clip.spec().softness)?
            }
        };

        Ok(Self {
            composition,
            fonts,
            fade: FadeStyle::default(),
            vignette,
        })
    }

    pub fn with_fade_style(mut self, fade: FadeStyle) -> Self {
        self.fade = fade;
        self
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn canvas(&self) -> Canvas {
        self.composition.canvas()
    }

    pub fn fade_style(&self) -> FadeStyle {
        self.fade
    }

    pub fn fonts(&self) -> &dyn FontProvider {
        self.fonts.as_ref()
    }

    /// Opaque gradient plus vignette under every layer.
    pub fn backdrop(&self, t: f64) -> MotionResult<Surface> {
        let canvas = self.canvas();
        let (top, bottom) = match &self.composition {
            Composition::Plan(plan) => {
                let top = plan.background();
                (top, top.darken(20, 25, 30))
            }
            Composition::Scene(clip) | Composition::Layered { scene: clip, .. } => {
                scene_sky(clip, t)
            }
        };
        let mut surface = vertical_gradient(canvas, top, bottom)?;
        self.vignette.apply(&mut surface);
        Ok(surface)
    }

    /// Ordered layers above the backdrop at `t`. Elements that have not started are absent.
    pub fn layers_at(&self, t: f64) -> MotionResult<LayerStack> {
        check_time(t)?;
        let mut stack = LayerStack::new();
        match &self.composition {
            Composition::Plan(plan) => {
                push_plan_layers(plan, t, self.fonts.as_ref(), self.fade, &mut stack)?;
            }
            Composition::Scene(clip) => push_scene_layers(clip, t, &mut stack)?,
            Composition::Layered { scene, plan } => {
                push_scene_layers(scene, t, &mut stack)?;
                push_plan_layers(plan, t, self.fonts.as_ref(), self.fade, &mut stack)?;
            }
        }
        Ok(stack)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub fn render_frame(&self, t: f64) -> MotionResult<FrameRGBA> {
        check_time(t)?;
        let mut surface = self.backdrop(t)?;
        self.layers_at(t)?.composite_onto(&mut surface);

        Ok(FrameRGBA {
            width: surface.width(),
            height: surface.height(),
            data: surface.into_data(),
            premultiplied: true,
        })
    }
}

fn scene_sky(clip: &SceneClip, t: f64) -> (Rgb8, Rgb8) {
    let (top, bottom) = sky_palette(clip.spec().theme, clip_progress(t, clip.duration()));
    let k = clip.spec().saturation;
    (top.saturate(k), bottom.saturate(k))
}

fn check_time(t: f64) -> MotionResult<()> {
    if !t.is_finite() {
        return Err(MotionError::validation("frame time must be finite"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
