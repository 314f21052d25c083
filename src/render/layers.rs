use crate::render::{composite::blit_over, surface::Surface};

/// One sprite placed on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub sprite: Surface,
    /// Top-left corner in canvas pixels.
    pub x: i32,
    pub y: i32,
    pub opacity: f32,
}

impl Layer {
    pub fn new(sprite: Surface, x: i32, y: i32) -> Self {
        Self {
            sprite,
            x,
            y,
            opacity: 1.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

/// Ordered layers, bottom first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerStack {
    layers: Vec<Layer>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: Layer) {
        if layer.opacity > 0.0 {
            self.layers.push(layer);
        }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }

    /// Reduce the stack left to right onto `dst` with premultiplied source-over.
    pub fn composite_onto(&self, dst: &mut Surface) {
        for layer in &self.layers {
            blit_over(dst, &layer.sprite, layer.x, layer.y, layer.opacity);
        }
    }
}

impl<'a> IntoIterator for &'a LayerStack {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layers.rs"]
mod tests;
