pub mod background;
pub mod blur;
pub mod composite;
pub mod compositor;
pub(crate) mod draw;
pub mod environment;
pub mod layers;
pub mod overlay;
pub mod surface;
pub mod text;

/// One rendered frame: tightly packed RGBA8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    /// Compositor output is opaque, so premultiplied and straight bytes coincide.
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        self.data.get(i..i + 4).map(|px| [px[0], px[1], px[2], px[3]])
    }
}
