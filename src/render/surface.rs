//! Fixed-size preview widget

use eframe::egui;
use eframe::egui_glow;
use eframe::glow;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, warn};

use super::program::GradientProgram;
use super::{rasterize, ShaderUniforms};
use crate::constants::surface::{HEIGHT, WIDTH};

enum Backend {
    Gpu(Arc<Mutex<GradientProgram>>),
    /// Software fallback; re-rasterized only when the uniforms change
    Cpu {
        texture: Option<egui::TextureHandle>,
        painted: Option<ShaderUniforms>,
    },
}

pub struct PreviewSurface {
    backend: Backend,
    uniforms: ShaderUniforms,
}

impl PreviewSurface {
    /// Prefer the GL program, fall back to software rendering without a GL context
    pub fn new(gl: Option<&Arc<glow::Context>>, uniforms: ShaderUniforms) -> Self {
        let backend = match gl.map(|gl| GradientProgram::new(gl)) {
            Some(Ok(program)) => Backend::Gpu(Arc::new(Mutex::new(program))),
            Some(Err(e)) => {
                error!(error = ?e, "Gradient program unavailable, using software preview");
                Backend::Cpu {
                    texture: None,
                    painted: None,
                }
            }
            None => {
                warn!("No GL context, using software preview");
                Backend::Cpu {
                    texture: None,
                    painted: None,
                }
            }
        };

        Self { backend, uniforms }
    }

    pub fn is_gpu(&self) -> bool {
        matches!(self.backend, Backend::Gpu(_))
    }

    pub fn set_uniforms(&mut self, uniforms: ShaderUniforms) {
        self.uniforms = uniforms;
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let size = egui::vec2(WIDTH as f32, HEIGHT as f32);
        let uniforms = self.uniforms;

        match &mut self.backend {
            Backend::Gpu(program) => {
                let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                let program = Arc::clone(program);
                let callback = egui::PaintCallback {
                    rect,
                    callback: Arc::new(egui_glow::CallbackFn::new(move |_info, painter| {
                        match program.lock() {
                            Ok(program) => program.paint(painter.gl(), &uniforms),
                            Err(_) => error!("Gradient program lock poisoned"),
                        }
                    })),
                };
                ui.painter().add(callback);
            }
            Backend::Cpu { texture, painted } => {
                if *painted != Some(uniforms) {
                    debug!("Rasterizing software preview");
                    let image = egui::ColorImage::from_rgba_unmultiplied(
                        [WIDTH as usize, HEIGHT as usize],
                        &rasterize(&uniforms, WIDTH, HEIGHT),
                    );
                    match texture.as_mut() {
                        Some(handle) => handle.set(image, egui::TextureOptions::LINEAR),
                        None => {
                            *texture = Some(ui.ctx().load_texture(
                                "gradient_preview",
                                image,
                                egui::TextureOptions::LINEAR,
                            ))
                        }
                    }
                    *painted = Some(uniforms);
                }

                if let Some(handle) = texture {
                    ui.add(egui::Image::new(egui::load::SizedTexture::new(handle.id(), size)));
                }
            }
        }
    }

    pub fn destroy(&self, gl: Option<&glow::Context>) {
        if let (Backend::Gpu(program), Some(gl)) = (&self.backend, gl) {
            if let Ok(program) = program.lock() {
                program.destroy(gl);
            }
        }
    }
}
