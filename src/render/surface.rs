use crate::foundation::{
    core::{Canvas, Rect, Rgb8},
    error::{MotionError, MotionResult},
};

/// Premultiplied RGBA8 pixel buffer, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Fully transparent surface.
    pub fn new(width: u32, height: u32) -> MotionResult<Self> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    pub fn filled(width: u32, height: u32, premul: [u8; 4]) -> MotionResult<Self> {
        let len = byte_len(width, height)?;
        let mut data = vec![0u8; len];
        if premul != [0, 0, 0, 0] {
            for px in data.chunks_exact_mut(4) {
                px.copy_from_slice(&premul);
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> MotionResult<Self> {
        if data.len() != byte_len(width, height)? {
            return Err(MotionError::render(
                "surface data length must equal width*height*4",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub fn is_transparent(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Gaussian blur with kernel radius `radius` and sigma `radius / 2`.
    pub fn blurred(&self, radius: u32) -> MotionResult<Self> {
        crate::render::blur::blur(self, radius)
    }
}

fn byte_len(width: u32, height: u32) -> MotionResult<usize> {
    if width == 0 || height == 0 {
        return Err(MotionError::render("surface dimensions must be non-zero"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| MotionError::render("surface buffer size overflow"))
}

/// Integer pixel rectangle in canvas space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn full(canvas: Canvas) -> Self {
        Self {
            x: 0,
            y: 0,
            width: canvas.width,
            height: canvas.height,
        }
    }

    /// Pixel cover of `bounds` grown by `pad` on every side and clipped to the canvas.
    ///
    /// Returns `None` when nothing of the grown rectangle lands on the canvas.
    pub fn covering(bounds: Rect, pad: f64, canvas: Canvas) -> Option<Self> {
        let b = bounds.abs().inflate(pad, pad);
        if ![b.x0, b.y0, b.x1, b.y1].iter().all(|v| v.is_finite()) {
            return None;
        }
        let x0 = b.x0.floor().max(0.0);
        let y0 = b.y0.floor().max(0.0);
        let x1 = b.x1.ceil().min(canvas.w());
        let y1 = b.y1.ceil().min(canvas.h());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self {
            x: x0 as i32,
            y: y0 as i32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }
}

/// Vector drawing into a sprite covering `region` of the canvas.
///
/// Geometry is given in canvas coordinates; the sketch translates it into sprite space.
pub(crate) struct Sketch {
    ctx: vello_cpu::RenderContext,
    region: PixelRect,
    width: u16,
    height: u16,
}

impl Sketch {
    pub(crate) fn new(region: PixelRect) -> MotionResult<Self> {
        let width: u16 = region
            .width
            .try_into()
            .map_err(|_| MotionError::render("sketch width exceeds u16"))?;
        let height: u16 = region
            .height
            .try_into()
            .map_err(|_| MotionError::render("sketch height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(MotionError::render("sketch dimensions must be non-zero"));
        }

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            -f64::from(region.x),
            -f64::from(region.y),
        )));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(Self {
            ctx,
            region,
            width,
            height,
        })
    }

    pub(crate) fn fill(&mut self, shape: &impl kurbo::Shape, color: Rgb8, alpha: u8) {
        if alpha == 0 {
            return;
        }
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, alpha,
        ));
        self.ctx.fill_path(&bezpath_to_cpu(&shape.to_path(0.1)));
    }

    pub(crate) fn stroke(&mut self, shape: &impl kurbo::Shape, width: f64, color: Rgb8, alpha: u8) {
        if alpha == 0 || width <= 0.0 {
            return;
        }
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, alpha,
        ));
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&bezpath_to_cpu(&shape.to_path(0.1)));
    }

    pub(crate) fn finish(mut self) -> MotionResult<Surface> {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        Surface::from_premul(
            self.region.width,
            self.region.height,
            pixmap.data_as_u8_slice().to_vec(),
        )
    }
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
