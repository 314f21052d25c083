use crate::{
    foundation::error::{MotionError, MotionResult},
    foundation::math::mul_div255_u8,
    render::surface::Surface,
};

pub type PremulRgba8 = [u8; 4];

/// Premultiplied source-over with an extra layer opacity.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> MotionResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(MotionError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Composite `sprite` over `dst` with its top-left corner at `(x, y)`.
///
/// Parts of the sprite that fall outside `dst` are clipped.
pub fn blit_over(dst: &mut Surface, sprite: &Surface, x: i32, y: i32, opacity: f32) {
    if opacity <= 0.0 {
        return;
    }
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (sw, sh) = (i64::from(sprite.width()), i64::from(sprite.height()));
    let (x, y) = (i64::from(x), i64::from(y));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(dw);
    let y1 = (y + sh).min(dh);
    if x1 <= x0 || y1 <= y0 {
        return;
    }

    let span = ((x1 - x0) * 4) as usize;
    let src = sprite.data();
    let dst_w = dst.width() as usize;
    let out = dst.data_mut();
    for row in y0..y1 {
        let d_start = ((row as usize) * dst_w + x0 as usize) * 4;
        let s_start = (((row - y) * sw + (x0 - x)) * 4) as usize;
        let d_row = &mut out[d_start..d_start + span];
        let s_row = &src[s_start..s_start + span];
        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            let px = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
            d.copy_from_slice(&px);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
