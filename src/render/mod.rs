//! Store state to shader uniform binding
//!
//! [`ShaderUniforms`] is the whole contract between the store and the
//! gradient shader. The GPU path uploads it to [`program::GradientProgram`];
//! the software path evaluates [`ShaderUniforms::shade`] per pixel.

pub mod program;
pub mod surface;

pub use surface::PreviewSurface;

use crate::store::State;

/// Inputs of one gradient pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderUniforms {
    /// vec3 per channel: `[x, y, saturation]`
    pub colors: [[f32; 3]; 3],
    pub flip: [bool; 3],
    pub alpha: f32,
}

impl ShaderUniforms {
    pub fn from_state(state: &State) -> Self {
        Self {
            colors: state.colors,
            flip: state.flip,
            alpha: state.alpha,
        }
    }

    /// `colors` laid out for a `vec3[3]` upload
    pub fn colors_flat(&self) -> [f32; 9] {
        let mut flat = [0.0; 9];
        for (slot, chunk) in self.colors.iter().zip(flat.chunks_exact_mut(3)) {
            chunk.copy_from_slice(slot);
        }
        flat
    }

    /// `flip` as GL bool uniforms
    pub fn flip_ints(&self) -> [i32; 3] {
        self.flip.map(i32::from)
    }

    /// Fragment color at `uv` (origin bottom-left, both axes 0..1).
    /// Mirrors `GRADIENT_FRAGMENT` exactly; output is not clamped.
    pub fn shade(&self, uv: [f32; 2]) -> [f32; 4] {
        let flipped = [(uv[1] - 1.0) * -1.0, (uv[0] - 1.0) * -1.0];
        let pick = |channel: usize| if self.flip[channel] { flipped } else { uv };

        let [red_uv, green_uv, blue_uv] = [pick(0), pick(1), pick(2)];
        let [red, green, blue] = self.colors;

        [
            red[2] * (red_uv[0] * red[0] + red_uv[1] * red[1]),
            // green reads the axes swapped
            green[2] * (green_uv[1] * green[0] + green_uv[0] * green[1]),
            blue[2] * (blue_uv[0] * blue[0] + blue_uv[1] * blue[1]),
            self.alpha,
        ]
    }
}

/// Evaluate the gradient into unmultiplied RGBA8, rows top to bottom
pub fn rasterize(uniforms: &ShaderUniforms, width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for row in 0..height {
        let v = 1.0 - (row as f32 + 0.5) / height as f32;
        for column in 0..width {
            let u = (column as f32 + 0.5) / width as f32;
            let color = uniforms.shade([u, v]);
            pixels.extend(color.iter().map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8));
        }
    }
    pixels
}
