//! Sprite builders shared by the overlay and environment passes.

use kurbo::{Ellipse, RoundedRect};

use crate::{
    foundation::{
        core::{Canvas, Rect, Rgb8},
        error::MotionResult,
    },
    plan::model::ShapeKind,
    render::{
        layers::{Layer, LayerStack},
        surface::{PixelRect, Sketch},
        text::FontProvider,
    },
};

/// Glow halo plus solid shape, pushed as two layers (halo below).
#[derive(Clone, Copy, Debug)]
pub(crate) struct GlowShape {
    pub kind: ShapeKind,
    pub bounds: Rect,
    pub color: Rgb8,
    pub corner_radius: f64,
    pub glow: u32,
    pub glow_alpha: u8,
}

impl GlowShape {
    pub(crate) fn push(&self, canvas: Canvas, stack: &mut LayerStack) -> MotionResult<()> {
        let b = self.bounds;
        if b.width() <= 0.0 || b.height() <= 0.0 {
            return Ok(());
        }

        if self.glow_alpha > 0 {
            let halo_pad = f64::from(self.glow) + 1.0;
            if let Some(region) = PixelRect::covering(b, halo_pad, canvas) {
                let mut sketch = Sketch::new(region)?;
                self.fill_into(&mut sketch, self.glow_alpha);
                let halo = sketch.finish()?.blurred(self.glow)?;
                stack.push(Layer::new(halo, region.x, region.y));
            }
        }

        if let Some(region) = PixelRect::covering(b, 1.0, canvas) {
            let mut sketch = Sketch::new(region)?;
            self.fill_into(&mut sketch, 255);
            stack.push(Layer::new(sketch.finish()?, region.x, region.y));
        }
        Ok(())
    }

    fn fill_into(&self, sketch: &mut Sketch, alpha: u8) {
        match self.kind {
            ShapeKind::Circle => sketch.fill(&Ellipse::from_rect(self.bounds), self.color, alpha),
            ShapeKind::Rect => {
                let b = self.bounds;
                let r = self
                    .corner_radius
                    .min(b.width() * 0.5)
                    .min(b.height() * 0.5)
                    .max(0.0);
                sketch.fill(&RoundedRect::from_rect(b, r), self.color, alpha);
            }
        }
    }
}

/// Paint `shapes` into one sprite, blur it, and push it with `opacity`.
///
/// Shapes are filled opaque first so overlaps merge into a single coverage instead of stacking
/// their alpha; `opacity` then applies uniformly.
pub(crate) fn push_union(
    canvas: Canvas,
    stack: &mut LayerStack,
    bounds: Rect,
    blur: u32,
    opacity: f32,
    paint: impl FnOnce(&mut Sketch),
) -> MotionResult<()> {
    let Some(region) = PixelRect::covering(bounds, f64::from(blur) + 1.0, canvas) else {
        return Ok(());
    };
    let mut sketch = Sketch::new(region)?;
    paint(&mut sketch);
    let sprite = sketch.finish()?.blurred(blur)?;
    stack.push(Layer::new(sprite, region.x, region.y).with_opacity(opacity));
    Ok(())
}

/// Paint into one sprite without merging coverage.
pub(crate) fn push_painted(
    canvas: Canvas,
    stack: &mut LayerStack,
    bounds: Rect,
    blur: u32,
    paint: impl FnOnce(&mut Sketch),
) -> MotionResult<()> {
    push_union(canvas, stack, bounds, blur, 1.0, paint)
}

pub(crate) const SHADOW_OFFSET: i32 = 2;
pub(crate) const SHADOW_BLUR: u32 = 6;
pub(crate) const SHADOW_ALPHA: u8 = 140;

/// One line of text with a blurred drop shadow.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ShadowText<'a> {
    pub text: &'a str,
    pub size_px: f32,
    pub x: i32,
    pub y: i32,
    pub color: Rgb8,
    /// Applied to both the shadow and the fill.
    pub opacity: f32,
}

impl ShadowText<'_> {
    pub(crate) fn push(&self, fonts: &dyn FontProvider, stack: &mut LayerStack) -> MotionResult<()> {
        let mask = fonts.rasterize(self.text, self.size_px)?;
        if mask.is_empty() {
            return Ok(());
        }

        let pad = SHADOW_BLUR;
        let shadow = mask
            .padded(pad)
            .tint(Rgb8::BLACK, SHADOW_ALPHA)?
            .blurred(SHADOW_BLUR)?;
        let offset = SHADOW_OFFSET - pad as i32;
        stack.push(
            Layer::new(shadow, self.x + offset, self.y + offset).with_opacity(self.opacity),
        );

        let fill = mask.tint(self.color, 255)?;
        stack.push(Layer::new(fill, self.x, self.y).with_opacity(self.opacity));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw.rs"]
mod tests;
