use crate::{
    foundation::{core::Canvas, core::Rgb8, error::MotionResult, math::mul_div255_u8},
    render::surface::Surface,
};

/// Opaque vertical two-stop gradient, one color per row.
pub fn vertical_gradient(canvas: Canvas, top: Rgb8, bottom: Rgb8) -> MotionResult<Surface> {
    let mut surface = Surface::new(canvas.width, canvas.height)?;
    let row_bytes = canvas.width as usize * 4;
    let denom = f64::from(canvas.height.saturating_sub(1).max(1));
    for (y, row) in surface.data_mut().chunks_exact_mut(row_bytes).enumerate() {
        let c = top.lerp(bottom, y as f64 / denom);
        let px = [c.r, c.g, c.b, 255];
        for dst in row.chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
    }
    Ok(surface)
}

// Masks are built at this fraction of the canvas size and upsampled.
const MASK_DOWNSCALE: u32 = 4;

/// Time-independent radial darkening, stored as a per-pixel keep factor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vignette {
    width: u32,
    height: u32,
    keep: Vec<u8>,
}

impl Vignette {
    /// Concentric rings whose darkness grows with the square of the distance from the center.
    pub fn rings(canvas: Canvas, strength: f64, blend: f64) -> MotionResult<Self> {
        const STEPS: f64 = 40.0;
        let max_r = canvas.w().hypot(canvas.h()) * 0.55;
        let (cx, cy) = (canvas.w() * 0.5, canvas.h() * 0.5);
        let mask = quarter_mask(canvas, |x, y| {
            let d = ((x - cx).hypot(y - cy) / max_r).min(1.0);
            let t = (d * (STEPS - 1.0)).round() / (STEPS - 1.0);
            (255.0 * t * t * strength).floor().clamp(0.0, 255.0) as u8
        })?;
        let mask = mask.blurred(40 / MASK_DOWNSCALE)?;
        Ok(Self::from_darkness(canvas, &mask, blend))
    }

    /// Soft disc: the center keeps the image and the outside darkens.
    pub fn disc(canvas: Canvas, blend: f64) -> MotionResult<Self> {
        let r = canvas.w().hypot(canvas.h()) * 0.55;
        let (cx, cy) = (canvas.w() * 0.5, canvas.h() * 0.5);
        let mask = quarter_mask(canvas, |x, y| {
            if (x - cx).hypot(y - cy) <= r { 0 } else { 255 }
        })?;
        let mask = mask.blurred(80 / MASK_DOWNSCALE)?;
        Ok(Self::from_darkness(canvas, &mask, blend))
    }

    fn from_darkness(canvas: Canvas, mask: &Surface, blend: f64) -> Self {
        let blend = blend.clamp(0.0, 1.0);
        let (w, h) = (canvas.width as usize, canvas.height as usize);
        let (mw, mh) = (mask.width() as usize, mask.height() as usize);
        let sx = mw as f64 / w as f64;
        let sy = mh as f64 / h as f64;
        let at = |x: usize, y: usize| f64::from(mask.data()[(y * mw + x) * 4 + 3]) / 255.0;

        let mut keep = Vec::with_capacity(w * h);
        for y in 0..h {
            let fy = ((y as f64 + 0.5) * sy - 0.5).clamp(0.0, (mh - 1) as f64);
            let y0 = fy.floor() as usize;
            let y1 = (y0 + 1).min(mh - 1);
            let ty = fy - y0 as f64;
            for x in 0..w {
                let fx = ((x as f64 + 0.5) * sx - 0.5).clamp(0.0, (mw - 1) as f64);
                let x0 = fx.floor() as usize;
                let x1 = (x0 + 1).min(mw - 1);
                let tx = fx - x0 as f64;
                let top = at(x0, y0) * (1.0 - tx) + at(x1, y0) * tx;
                let bottom = at(x0, y1) * (1.0 - tx) + at(x1, y1) * tx;
                let dark = top * (1.0 - ty) + bottom * ty;
                keep.push(((1.0 - blend * dark) * 255.0).round().clamp(0.0, 255.0) as u8);
            }
        }

        Self {
            width: canvas.width,
            height: canvas.height,
            keep,
        }
    }

    pub fn keep_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.keep
            .get((y as usize) * (self.width as usize) + x as usize)
            .copied()
    }

    /// Scale the color channels of an opaque backdrop in place.
    pub fn apply(&self, surface: &mut Surface) {
        if surface.width() != self.width || surface.height() != self.height {
            return;
        }
        for (px, &k) in surface.data_mut().chunks_exact_mut(4).zip(&self.keep) {
            if k == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = mul_div255_u8(u16::from(*c), u16::from(k));
            }
        }
    }
}

fn quarter_mask(canvas: Canvas, value: impl Fn(f64, f64) -> u8) -> MotionResult<Surface> {
    let mw = canvas.width.div_ceil(MASK_DOWNSCALE).max(1);
    let mh = canvas.height.div_ceil(MASK_DOWNSCALE).max(1);
    let sx = canvas.w() / f64::from(mw);
    let sy = canvas.h() / f64::from(mh);
    let mut mask = Surface::new(mw, mh)?;
    let row_bytes = mw as usize * 4;
    for (qy, row) in mask.data_mut().chunks_exact_mut(row_bytes).enumerate() {
        let y = (qy as f64 + 0.5) * sy;
        for (qx, px) in row.chunks_exact_mut(4).enumerate() {
            let v = value((qx as f64 + 0.5) * sx, y);
            px.copy_from_slice(&[v, v, v, v]);
        }
    }
    Ok(mask)
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
