use crate::foundation::error::{MotionError, MotionResult};

pub use kurbo::{Point, Rect};

/// Absolute 0-based frame index in render timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Timestamp of this frame in seconds at `fps`.
    pub fn secs(self, fps: u32) -> f64 {
        self.0 as f64 / f64::from(fps.max(1))
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> MotionResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    pub fn validate(&self) -> MotionResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MotionError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        // Sprites and rasterizer surfaces are addressed with u16 coordinates.
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(MotionError::validation(
                "canvas width/height must fit in u16",
            ));
        }
        Ok(())
    }

    pub fn w(&self) -> f64 {
        f64::from(self.width)
    }

    pub fn h(&self) -> f64 {
        f64::from(self.height)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Straight (opaque) RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Per-channel linear interpolation, truncating toward zero.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = crate::foundation::math::clamp01(t);
        let ch = |a: u8, b: u8| -> u8 {
            crate::foundation::math::lerp(f64::from(a), f64::from(b), t) as u8
        };
        Self::new(
            ch(self.r, other.r),
            ch(self.g, other.g),
            ch(self.b, other.b),
        )
    }

    /// Subtract per channel, saturating at zero.
    pub fn darken(self, dr: u8, dg: u8, db: u8) -> Self {
        Self::new(
            self.r.saturating_sub(dr),
            self.g.saturating_sub(dg),
            self.b.saturating_sub(db),
        )
    }

    /// Scale every channel by `k` (channel pre-multiplication toward black).
    pub fn scale(self, k: f64) -> Self {
        let k = crate::foundation::math::clamp01(k);
        Self::new(
            (f64::from(self.r) * k) as u8,
            (f64::from(self.g) * k) as u8,
            (f64::from(self.b) * k) as u8,
        )
    }

    /// Push chroma away from (or toward) the Rec.601 luma by `factor`.
    pub fn saturate(self, factor: f64) -> Self {
        if (factor - 1.0).abs() < f64::EPSILON {
            return self;
        }
        let (r, g, b) = (f64::from(self.r), f64::from(self.g), f64::from(self.b));
        let luma = 0.299 * r + 0.587 * g + 0.114 * b;
        let ch = |c: f64| -> u8 { (luma + (c - luma) * factor).round().clamp(0.0, 255.0) as u8 };
        Self::new(ch(r), ch(g), ch(b))
    }

    pub fn with_alpha(self, a: u8) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, a)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
