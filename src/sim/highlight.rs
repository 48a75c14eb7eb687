//! Slice highlighting

use serde::{Deserialize, Serialize};

/// Swaps a slice's material color between its normal and highlighted colors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Highlighter {
    normal: [f32; 4],
    highlighted: [f32; 4],
    /// Color the slice is currently drawn with
    current: [f32; 4],
    lit: bool,
}

impl Highlighter {
    pub fn new(normal: [f32; 4], highlighted: [f32; 4]) -> Self {
        Self {
            normal,
            highlighted,
            current: normal,
            lit: false,
        }
    }

    pub fn highlight(&mut self) {
        self.current = self.highlighted;
        self.lit = true;
    }

    pub fn unhighlight(&mut self) {
        self.current = self.normal;
        self.lit = false;
    }

    /// Takes effect on the next highlight/unhighlight
    pub fn set_normal_color(&mut self, color: [f32; 4]) {
        self.normal = color;
    }

    /// Takes effect on the next highlight/unhighlight
    pub fn set_highlighted_color(&mut self, color: [f32; 4]) {
        self.highlighted = color;
    }

    /// Current material color
    pub fn color(&self) -> [f32; 4] {
        self.current
    }

    pub fn is_highlighted(&self) -> bool {
        self.lit
    }
}
