use crate::foundation::math::clamp01;

/// Configurable easing curve for a timed layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    #[default]
    InOutCubic,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = clamp01(t);
        match self {
            Self::Linear => t,
            Self::InOutCubic => in_out_cubic(t),
        }
    }
}

pub fn in_out_cubic(t: f64) -> f64 {
    let t = clamp01(t);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
    }
}

/// Overshooting ease used for shape growth and the title underline.
///
/// Not selectable per layer.
pub fn ease_out_back(t: f64) -> f64 {
    const C1: f64 = 1.70158;
    const C3: f64 = C1 + 1.0;
    let t = clamp01(t);
    1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
}

/// Normalized reveal progress of an element that starts at `start` and lasts `duration` seconds.
///
/// `None` means the element has not started yet and must not be drawn at all.
pub fn reveal_progress(t: f64, start: f64, duration: f64) -> Option<f64> {
    let p = clamp01((t - start) / duration.max(1e-6));
    (p > 0.0).then_some(p)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
