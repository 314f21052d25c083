use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use sha2::Digest;

use crate::foundation::{
    core::Rgb8,
    error::{MotionError, MotionResult},
};

/// Size of a single line of text in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

/// 8-bit coverage of a rendered line, sized to its line box.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
}

impl GlyphMask {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.coverage.iter().all(|&c| c == 0)
    }

    /// Copy of the mask with `pad` blank pixels on every side.
    pub fn padded(&self, pad: u32) -> Self {
        if pad == 0 {
            return self.clone();
        }
        let width = self.width + 2 * pad;
        let height = self.height + 2 * pad;
        let mut coverage = vec![0u8; (width as usize) * (height as usize)];
        for y in 0..self.height as usize {
            let src = &self.coverage[y * self.width as usize..(y + 1) * self.width as usize];
            let start = (y + pad as usize) * width as usize + pad as usize;
            coverage[start..start + self.width as usize].copy_from_slice(src);
        }
        Self {
            width,
            height,
            coverage,
        }
    }

    /// Fill the covered pixels with `color` at `alpha`, producing a premultiplied sprite.
    pub fn tint(&self, color: Rgb8, alpha: u8) -> MotionResult<crate::render::surface::Surface> {
        let mut data = Vec::with_capacity(self.coverage.len() * 4);
        for &c in &self.coverage {
            let a = crate::foundation::math::mul_div255_u8(u16::from(c), u16::from(alpha));
            data.extend_from_slice(&color.with_alpha(a).to_array());
        }
        crate::render::surface::Surface::from_premul(self.width, self.height, data)
    }
}

/// Measures and rasterizes single lines of text.
pub trait FontProvider: Send + Sync {
    fn family(&self) -> &str;

    fn measure(&self, text: &str, size_px: f32) -> TextExtent;

    fn rasterize(&self, text: &str, size_px: f32) -> MotionResult<GlyphMask>;

    /// Stable identity of the underlying font data, when there is any.
    fn fingerprint(&self) -> Option<String> {
        None
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct TextBrush;

/// TrueType/OpenType face shaped with parley and rasterized with vello_cpu.
pub struct FontFace {
    family: String,
    layout_blob: parley::fontique::Blob<u8>,
    font: vello_cpu::peniko::FontData,
    sha256: String,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("sha256", &self.sha256)
            .finish_non_exhaustive()
    }
}

impl FontFace {
    pub fn load(path: &Path) -> MotionResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> MotionResult<Self> {
        let sha256 = hex(&sha2::Sha256::digest(&bytes));
        let layout_blob = parley::fontique::Blob::from(bytes.clone());

        let mut font_ctx = parley::FontContext::default();
        let family = register_family(&mut font_ctx, &layout_blob)?;

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
        Ok(Self {
            family,
            layout_blob,
            font,
            sha256,
        })
    }

    fn layout(&self, text: &str, size_px: f32) -> MotionResult<parley::Layout<TextBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(MotionError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        // Parley contexts are cheap to build and not shareable across threads.
        let mut font_ctx = parley::FontContext::default();
        let family = register_family(&mut font_ctx, &self.layout_blob)?;
        let mut layout_ctx = parley::LayoutContext::<TextBrush>::new();

        let mut builder = layout_ctx.ranged_builder(&mut font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

fn register_family(
    font_ctx: &mut parley::FontContext,
    blob: &parley::fontique::Blob<u8>,
) -> MotionResult<String> {
    let families = font_ctx.collection.register_fonts(blob.clone(), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| MotionError::validation("no font families registered from font bytes"))?;
    Ok(font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| MotionError::validation("registered font family has no name"))?
        .to_string())
}

impl FontProvider for FontFace {
    fn family(&self) -> &str {
        &self.family
    }

    fn measure(&self, text: &str, size_px: f32) -> TextExtent {
        match self.layout(text, size_px) {
            Ok(layout) => TextExtent {
                width: f64::from(layout.width()),
                height: f64::from(layout.height()),
            },
            Err(_) => TextExtent::default(),
        }
    }

    fn rasterize(&self, text: &str, size_px: f32) -> MotionResult<GlyphMask> {
        let layout = self.layout(text, size_px)?;
        let width = layout.width().ceil() as u32;
        let height = layout.height().ceil() as u32;
        if text.is_empty() || width == 0 || height == 0 {
            return Ok(GlyphMask::default());
        }
        let w16: u16 = width
            .try_into()
            .map_err(|_| MotionError::render("text line width exceeds u16"))?;
        let h16: u16 = height
            .try_into()
            .map_err(|_| MotionError::render("text line height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(w16, h16);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        ctx.render_to_pixmap(&mut pixmap);

        let coverage = pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[3])
            .collect();
        Ok(GlyphMask {
            width,
            height,
            coverage,
        })
    }

    fn fingerprint(&self) -> Option<String> {
        Some(self.sha256.clone())
    }
}

/// Largest glyph mask either provider will allocate.
pub const MAX_MASK_PIXELS: u64 = 1 << 26;

fn check_mask_size(width: u32, height: u32) -> MotionResult<()> {
    let pixels = u64::from(width) * u64::from(height);
    if pixels > MAX_MASK_PIXELS {
        return Err(MotionError::render(format!(
            "text mask {width}x{height} exceeds {MAX_MASK_PIXELS} pixels"
        )));
    }
    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Built-in 5x7 bitmap face covering printable ASCII.
///
/// Cells are 6x10 units (one unit of spacing on the right, one row above and two below), scaled
/// by an integer factor chosen from the requested pixel size. Characters outside ASCII render as
/// `?`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinFont;

impl BuiltinFont {
    const CELL_W: u32 = 6;
    const CELL_H: u32 = 10;

    fn scale(size_px: f32) -> u32 {
        if !size_px.is_finite() {
            return 1;
        }
        ((size_px / Self::CELL_H as f32).round() as u32).max(1)
    }

    fn glyph(c: char) -> &'static [u8; 5] {
        let idx = match c {
            ' '..='~' => c as usize - ' ' as usize,
            _ => '?' as usize - ' ' as usize,
        };
        &FONT_5X7[idx]
    }
}

impl FontProvider for BuiltinFont {
    fn family(&self) -> &str {
        "builtin-5x7"
    }

    fn measure(&self, text: &str, size_px: f32) -> TextExtent {
        let s = f64::from(Self::scale(size_px));
        let n = text.chars().count() as f64;
        TextExtent {
            width: n * f64::from(Self::CELL_W) * s,
            height: f64::from(Self::CELL_H) * s,
        }
    }

    fn rasterize(&self, text: &str, size_px: f32) -> MotionResult<GlyphMask> {
        let s = Self::scale(size_px);
        let n = u32::try_from(text.chars().count())
            .map_err(|_| MotionError::render("text line is too long"))?;
        if n == 0 {
            return Ok(GlyphMask::default());
        }
        let overflow = || MotionError::render(format!("text mask overflows at {size_px}px"));
        let cell_w = Self::CELL_W.checked_mul(s).ok_or_else(overflow)?;
        let width = n.checked_mul(cell_w).ok_or_else(overflow)?;
        let height = Self::CELL_H.checked_mul(s).ok_or_else(overflow)?;
        check_mask_size(width, height)?;
        let mut coverage = vec![0u8; (width as usize) * (height as usize)];

        for (i, c) in text.chars().enumerate() {
            let cell_x = i as u32 * cell_w;
            for (col, bits) in Self::glyph(c).iter().enumerate() {
                for row in 0..7u32 {
                    if bits & (1 << row) == 0 {
                        continue;
                    }
                    let x0 = cell_x + col as u32 * s;
                    let y0 = (row + 1) * s;
                    for y in y0..y0 + s {
                        let start = (y * width + x0) as usize;
                        coverage[start..start + s as usize].fill(255);
                    }
                }
            }
        }

        Ok(GlyphMask {
            width,
            height,
            coverage,
        })
    }
}

/// Common system font locations, probed in order after any configured path.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\calibri.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

pub fn font_candidates(configured: Option<&Path>) -> Vec<PathBuf> {
    configured
        .map(Path::to_path_buf)
        .into_iter()
        .chain(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from))
        .collect()
}

/// First candidate that loads as a font, or [`BuiltinFont`] when none does.
#[tracing::instrument(skip(candidates), fields(n = candidates.len()))]
pub fn resolve_font(candidates: &[PathBuf]) -> Arc<dyn FontProvider> {
    for path in candidates {
        if !path.is_file() {
            continue;
        }
        match FontFace::load(path) {
            Ok(face) => {
                tracing::debug!(path = %path.display(), family = face.family(), "font resolved");
                return Arc::new(face);
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "font candidate failed to load");
            }
        }
    }
    tracing::warn!("no font candidate loaded, using the built-in bitmap font");
    Arc::new(BuiltinFont)
}

// Column-major, bit 0 is the top row.
#[rustfmt::skip]
const FONT_5X7: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // '!'
    [0x00, 0x07, 0x00, 0x07, 0x00], // '"'
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // '#'
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // '$'
    [0x23, 0x13, 0x08, 0x64, 0x62], // '%'
    [0x36, 0x49, 0x55, 0x22, 0x50], // '&'
    [0x00, 0x05, 0x03, 0x00, 0x00], // '\''
    [0x00, 0x1C, 0x22, 0x41, 0x00], // '('
    [0x00, 0x41, 0x22, 0x1C, 0x00], // ')'
    [0x14, 0x08, 0x3E, 0x08, 0x14], // '*'
    [0x08, 0x08, 0x3E, 0x08, 0x08], // '+'
    [0x00, 0x50, 0x30, 0x00, 0x00], // ','
    [0x08, 0x08, 0x08, 0x08, 0x08], // '-'
    [0x00, 0x60, 0x60, 0x00, 0x00], // '.'
    [0x20, 0x10, 0x08, 0x04, 0x02], // '/'
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // '0'
    [0x00, 0x42, 0x7F, 0x40, 0x00], // '1'
    [0x42, 0x61, 0x51, 0x49, 0x46], // '2'
    [0x21, 0x41, 0x45, 0x4B, 0x31], // '3'
    [0x18, 0x14, 0x12, 0x7F, 0x10], // '4'
    [0x27, 0x45, 0x45, 0x45, 0x39], // '5'
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // '6'
    [0x01, 0x71, 0x09, 0x05, 0x03], // '7'
    [0x36, 0x49, 0x49, 0x49, 0x36], // '8'
    [0x06, 0x49, 0x49, 0x29, 0x1E], // '9'
    [0x00, 0x36, 0x36, 0x00, 0x00], // ':'
    [0x00, 0x56, 0x36, 0x00, 0x00], // ';'
    [0x08, 0x14, 0x22, 0x41, 0x00], // '<'
    [0x14, 0x14, 0x14, 0x14, 0x14], // '='
    [0x00, 0x41, 0x22, 0x14, 0x08], // '>'
    [0x02, 0x01, 0x51, 0x09, 0x06], // '?'
    [0x32, 0x49, 0x79, 0x41, 0x3E], // '@'
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // 'A'
    [0x7F, 0x49, 0x49, 0x49, 0x36], // 'B'
    [0x3E, 0x41, 0x41, 0x41, 0x22], // 'C'
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // 'D'
    [0x7F, 0x49, 0x49, 0x49, 0x41], // 'E'
    [0x7F, 0x09, 0x09, 0x01, 0x01], // 'F'
    [0x3E, 0x41, 0x41, 0x51, 0x32], // 'G'
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // 'H'
    [0x00, 0x41, 0x7F, 0x41, 0x00], // 'I'
    [0x20, 0x40, 0x41, 0x3F, 0x01], // 'J'
    [0x7F, 0x08, 0x14, 0x22, 0x41], // 'K'
    [0x7F, 0x40, 0x40, 0x40, 0x40], // 'L'
    [0x7F, 0x02, 0x04, 0x02, 0x7F], // 'M'
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // 'N'
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // 'O'
    [0x7F, 0x09, 0x09, 0x09, 0x06], // 'P'
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // 'Q'
    [0x7F, 0x09, 0x19, 0x29, 0x46], // 'R'
    [0x46, 0x49, 0x49, 0x49, 0x31], // 'S'
    [0x01, 0x01, 0x7F, 0x01, 0x01], // 'T'
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // 'U'
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // 'V'
    [0x7F, 0x20, 0x18, 0x20, 0x7F], // 'W'
    [0x63, 0x14, 0x08, 0x14, 0x63], // 'X'
    [0x03, 0x04, 0x78, 0x04, 0x03], // 'Y'
    [0x61, 0x51, 0x49, 0x45, 0x43], // 'Z'
    [0x00, 0x7F, 0x41, 0x41, 0x00], // '['
    [0x02, 0x04, 0x08, 0x10, 0x20], // '\\'
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ']'
    [0x04, 0x02, 0x01, 0x02, 0x04], // '^'
    [0x40, 0x40, 0x40, 0x40, 0x40], // '_'
    [0x00, 0x01, 0x02, 0x04, 0x00], // '`'
    [0x20, 0x54, 0x54, 0x54, 0x78], // 'a'
    [0x7F, 0x48, 0x44, 0x44, 0x38], // 'b'
    [0x38, 0x44, 0x44, 0x44, 0x20], // 'c'
    [0x38, 0x44, 0x44, 0x48, 0x7F], // 'd'
    [0x38, 0x54, 0x54, 0x54, 0x18], // 'e'
    [0x08, 0x7E, 0x09, 0x01, 0x02], // 'f'
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // 'g'
    [0x7F, 0x08, 0x04, 0x04, 0x78], // 'h'
    [0x00, 0x44, 0x7D, 0x40, 0x00], // 'i'
    [0x20, 0x40, 0x44, 0x3D, 0x00], // 'j'
    [0x7F, 0x10, 0x28, 0x44, 0x00], // 'k'
    [0x00, 0x41, 0x7F, 0x40, 0x00], // 'l'
    [0x7C, 0x04, 0x18, 0x04, 0x78], // 'm'
    [0x7C, 0x08, 0x04, 0x04, 0x78], // 'n'
    [0x38, 0x44, 0x44, 0x44, 0x38], // 'o'
    [0x7C, 0x14, 0x14, 0x14, 0x08], // 'p'
    [0x08, 0x14, 0x14, 0x18, 0x7C], // 'q'
    [0x7C, 0x08, 0x04, 0x04, 0x08], // 'r'
    [0x48, 0x54, 0x54, 0x54, 0x20], // 's'
    [0x04, 0x3F, 0x44, 0x40, 0x20], // 't'
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // 'u'
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // 'v'
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // 'w'
    [0x44, 0x28, 0x10, 0x28, 0x44], // 'x'
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // 'y'
    [0x44, 0x64, 0x54, 0x4C, 0x44], // 'z'
    [0x00, 0x08, 0x36, 0x41, 0x00], // '{'
    [0x00, 0x00, 0x7F, 0x00, 0x00], // '|'
    [0x00, 0x41, 0x36, 0x08, 0x00], // '}'
    [0x08, 0x04, 0x08, 0x10, 0x08], // '~'
];

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
