//! Gaussian blur for glow halos, drop shadows and vignette masks.

use crate::{foundation::error::MotionResult, render::surface::Surface};

const Q16_ONE: u32 = 1 << 16;

/// Normalized Gaussian taps for a blur of `radius` pixels with sigma `radius / 2`.
///
/// Weights are Q16 and sum to exactly one, so flat regions come out unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlurKernel {
    weights: Vec<u32>,
}

impl BlurKernel {
    pub fn for_radius(radius: u32) -> Self {
        if radius == 0 {
            return Self {
                weights: vec![Q16_ONE],
            };
        }

        let sigma = f64::from(radius) * 0.5;
        let two_sigma_sq = 2.0 * sigma * sigma;
        let r = i64::from(radius);
        let raw: Vec<f64> = (-r..=r)
            .map(|i| (-((i * i) as f64) / two_sigma_sq).exp())
            .collect();
        let total: f64 = raw.iter().sum();

        let mut weights: Vec<u32> = raw
            .iter()
            .map(|w| ((w / total) * f64::from(Q16_ONE)).round() as u32)
            .collect();
        let assigned: i64 = weights.iter().map(|&w| i64::from(w)).sum();
        let center = &mut weights[radius as usize];
        *center = (i64::from(*center) + i64::from(Q16_ONE) - assigned).max(0) as u32;

        Self { weights }
    }

    pub fn radius(&self) -> usize {
        self.weights.len() / 2
    }

    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    /// Convolves one line of pixels, clamping reads at both ends.
    fn convolve(&self, line: &[[u8; 4]], out: &mut [[u8; 4]]) {
        let last = line.len() as isize - 1;
        let r = self.radius() as isize;
        for (i, px) in out.iter_mut().enumerate() {
            let mut acc = [0u64; 4];
            for (k, &w) in self.weights.iter().enumerate() {
                let src = line[(i as isize + k as isize - r).clamp(0, last) as usize];
                for (a, c) in acc.iter_mut().zip(src) {
                    *a += u64::from(w) * u64::from(c);
                }
            }
            *px = acc.map(|a| ((a + u64::from(Q16_ONE / 2)) >> 16).min(255) as u8);
        }
    }
}

/// Blurs a premultiplied surface horizontally then vertically.
pub fn blur(surface: &Surface, radius: u32) -> MotionResult<Surface> {
    if radius == 0 {
        return Ok(surface.clone());
    }
    let kernel = BlurKernel::for_radius(radius);
    let (w, h) = (surface.width() as usize, surface.height() as usize);

    let mut pixels: Vec<[u8; 4]> = surface
        .data()
        .chunks_exact(4)
        .map(|px| [px[0], px[1], px[2], px[3]])
        .collect();

    let mut out = vec![[0u8; 4]; w.max(h)];
    for row in pixels.chunks_exact_mut(w) {
        kernel.convolve(row, &mut out[..w]);
        row.copy_from_slice(&out[..w]);
    }

    let mut column = vec![[0u8; 4]; h];
    for x in 0..w {
        for (y, px) in column.iter_mut().enumerate() {
            *px = pixels[y * w + x];
        }
        kernel.convolve(&column, &mut out[..h]);
        for (y, px) in out[..h].iter().enumerate() {
            pixels[y * w + x] = *px;
        }
    }

    Surface::from_premul(
        surface.width(),
        surface.height(),
        pixels.into_iter().flatten().collect(),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
