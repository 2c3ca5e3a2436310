//! GLSL gradient program drawn through an egui paint callback
//!
//! The crate denies `unsafe`; only the three methods that issue raw GL calls
//! opt back in.

use anyhow::{anyhow, bail, Result};
use eframe::egui_glow;
use eframe::glow::{self, HasContext as _};
use tracing::{debug, info};

use super::ShaderUniforms;

/// Full-surface quad as a triangle strip, generated from `gl_VertexID`
const QUAD_VERTEX: &str = r#"
    const vec2 corners[4] = vec2[4](
        vec2(-1.0, -1.0),
        vec2(1.0, -1.0),
        vec2(-1.0, 1.0),
        vec2(1.0, 1.0)
    );
    out vec2 uv;
    void main() {
        vec2 corner = corners[gl_VertexID];
        uv = corner * 0.5 + 0.5;
        gl_Position = vec4(corner, 0.0, 1.0);
    }
"#;

/// Blend of three directional gradients, each optionally sampling flipped UVs
pub const GRADIENT_FRAGMENT: &str = r#"
    #ifdef GL_ES
    precision highp float;
    #endif
    in vec2 uv;
    uniform vec3 colors[3];
    uniform bool flip[3];
    uniform float alpha;
    out vec4 out_color;
    void main() {
        vec2 uvFlip = (uv.yx - 1.0) * -1.0;
        vec2 uvRed = flip[0] ? uvFlip : uv;
        vec2 uvGreen = flip[1] ? uvFlip : uv;
        vec2 uvBlue = flip[2] ? uvFlip : uv;
        out_color = vec4(
            colors[0].z * (uvRed.x * colors[0].x + uvRed.y * colors[0].y),
            colors[1].z * (uvGreen.y * colors[1].x + uvGreen.x * colors[1].y),
            colors[2].z * (uvBlue.x * colors[2].x + uvBlue.y * colors[2].y),
            alpha
        );
    }
"#;

pub struct GradientProgram {
    program: glow::Program,
    vertex_array: glow::VertexArray,
}

impl GradientProgram {
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context) -> Result<Self> {
        let shader_version = egui_glow::ShaderVersion::get(gl);
        if !shader_version.is_new_shader_interface() {
            bail!("GLSL {shader_version:?} lacks in/out shader interface");
        }

        // SAFETY: `gl` is the current context on the UI thread during app
        // creation. Every handle passed back to GL below was created by this
        // same context in this block, and each failure path deletes what it
        // created before returning.
        unsafe {
            let program = gl.create_program().map_err(|e| anyhow!("Cannot create program: {e}"))?;

            let sources = [
                (glow::VERTEX_SHADER, QUAD_VERTEX),
                (glow::FRAGMENT_SHADER, GRADIENT_FRAGMENT),
            ];

            let mut shaders = Vec::with_capacity(sources.len());
            for (kind, source) in sources {
                let shader = gl.create_shader(kind).map_err(|e| anyhow!("Cannot create shader: {e}"))?;
                gl.shader_source(
                    shader,
                    &format!("{}\n{}", shader_version.version_declaration(), source),
                );
                gl.compile_shader(shader);
                if !gl.get_shader_compile_status(shader) {
                    let log = gl.get_shader_info_log(shader);
                    gl.delete_shader(shader);
                    gl.delete_program(program);
                    bail!("Failed to compile gradient shader {kind:#x}: {log}");
                }
                gl.attach_shader(program, shader);
                shaders.push(shader);
            }

            gl.link_program(program);
            let linked = gl.get_program_link_status(program);
            let link_log = gl.get_program_info_log(program);

            for shader in shaders {
                gl.detach_shader(program, shader);
                gl.delete_shader(shader);
            }

            if !linked {
                gl.delete_program(program);
                bail!("Failed to link gradient program: {link_log}");
            }

            let vertex_array = match gl.create_vertex_array() {
                Ok(vertex_array) => vertex_array,
                Err(e) => {
                    gl.delete_program(program);
                    bail!("Cannot create vertex array: {e}");
                }
            };

            info!(version = ?shader_version, "Gradient program ready");
            Ok(Self {
                program,
                vertex_array,
            })
        }
    }

    #[allow(unsafe_code)]
    pub fn paint(&self, gl: &glow::Context, uniforms: &ShaderUniforms) {
        // SAFETY: only called from the egui_glow paint callback, on the GL
        // thread with the context that built `self`. The program and vertex
        // array stay alive until `destroy` runs in `on_exit`, after the last
        // frame. Uniform slices match the GLSL array lengths (3 vec3, 3 bool).
        unsafe {
            gl.use_program(Some(self.program));
            gl.uniform_3_f32_slice(
                gl.get_uniform_location(self.program, "colors").as_ref(),
                &uniforms.colors_flat(),
            );
            gl.uniform_1_i32_slice(
                gl.get_uniform_location(self.program, "flip").as_ref(),
                &uniforms.flip_ints(),
            );
            gl.uniform_1_f32(
                gl.get_uniform_location(self.program, "alpha").as_ref(),
                uniforms.alpha,
            );
            gl.bind_vertex_array(Some(self.vertex_array));
            gl.draw_arrays(glow::TRIANGLE_STRIP, 0, 4);
        }
    }

    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        debug!("Releasing gradient program");
        // SAFETY: called once from `on_exit` with the context that created
        // both handles; no paint callback runs afterwards.
        unsafe {
            gl.delete_program(self.program);
            gl.delete_vertex_array(self.vertex_array);
        }
    }
}
