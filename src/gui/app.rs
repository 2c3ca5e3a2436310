//! Editor application implemented with egui/eframe

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use eframe::{egui, glow, CreationContext, NativeOptions};
use tracing::{error, info};

use super::components::control_panel::{self, PanelEvent};
use super::constants::*;
use crate::config::AppConfig;
use crate::persistence::{
    self, FileStore, KeyValueStore, PersistedSnapshot, PersistenceEvent, PersistenceWorker,
};
use crate::render::{PreviewSurface, ShaderUniforms};
use crate::store::{Store, Subscription};

struct StatusMessage {
    text: String,
    color: egui::Color32,
}

pub struct EditorApp {
    store: Store,
    /// Written by the store subscription, read once per frame by the preview
    uniforms: Rc<Cell<ShaderUniforms>>,
    subscription: Subscription,
    surface: PreviewSurface,
    persistence: PersistenceWorker,
    pending_io: usize,
    status_message: Option<StatusMessage>,
}

impl EditorApp {
    fn new(cc: &CreationContext<'_>, kv: Arc<dyn KeyValueStore>) -> Self {
        info!("Initializing gradient editor");
        Self::with_parts(cc.egui_ctx.clone(), cc.gl.as_ref(), kv)
    }

    fn with_parts(
        ctx: egui::Context,
        gl: Option<&Arc<glow::Context>>,
        kv: Arc<dyn KeyValueStore>,
    ) -> Self {
        let mut store = Store::new();
        let uniforms = Rc::new(Cell::new(ShaderUniforms::from_state(&store.state())));

        let sink = Rc::clone(&uniforms);
        let subscription = store.subscribe(move |state| {
            sink.set(ShaderUniforms::from_state(state));
            ctx.request_repaint();
        });

        let surface = PreviewSurface::new(gl, uniforms.get());
        info!(gpu = surface.is_gpu(), "Preview surface ready");
        let persistence = PersistenceWorker::new(kv);
        persistence.request_load();

        Self {
            store,
            uniforms,
            subscription,
            surface,
            persistence,
            pending_io: 1,
            status_message: None,
        }
    }

    fn handle_panel_event(&mut self, event: PanelEvent) {
        match event {
            PanelEvent::Dispatch(action) => self.store.dispatch(action),
            PanelEvent::Save => {
                let snapshot = PersistedSnapshot::from_state(&self.store.state());
                info!("Save requested from UI");
                self.persistence.request_save(snapshot);
                self.pending_io += 1;
            }
        }
    }

    fn process_persistence_events(&mut self) {
        while let Some(event) = self.persistence.poll() {
            self.pending_io = self.pending_io.saturating_sub(1);
            match event {
                PersistenceEvent::Loaded(Ok(Some(snapshot))) => {
                    persistence::restore(&mut self.store, &snapshot);
                }
                PersistenceEvent::Loaded(Ok(None)) => {
                    info!("Starting from default shader inputs");
                }
                PersistenceEvent::Loaded(Err(err)) => {
                    error!(error = ?err, "Failed to load saved shader inputs");
                }
                PersistenceEvent::Saved(Ok(())) => {
                    self.status_message = Some(StatusMessage {
                        text: "Saved".to_string(),
                        color: STATUS_OK,
                    });
                }
                PersistenceEvent::Saved(Err(err)) => {
                    error!(error = ?err, "Failed to save shader inputs");
                    self.status_message = Some(StatusMessage {
                        text: format!("Save failed: {err}"),
                        color: STATUS_ERROR,
                    });
                }
            }
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_persistence_events();
        self.surface.set_uniforms(self.uniforms.get());

        let state = self.store.state();
        let mut events = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(PADDING);
            ui.vertical_centered(|ui| self.surface.ui(ui));
            ui.add_space(SECTION_SPACING);

            events = control_panel::ui(ui, &state);

            if let Some(message) = &self.status_message {
                ui.add_space(ITEM_SPACING);
                ui.colored_label(message.color, &message.text);
            }
        });

        for event in events {
            self.handle_panel_event(event);
        }

        if self.pending_io > 0 {
            ctx.request_repaint_after(Duration::from_millis(PERSISTENCE_POLL_INTERVAL_MS));
        }
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        self.store.unsubscribe(self.subscription);
        self.surface.destroy(gl);
        info!("Editor exiting");
    }
}

pub fn run_gui(config: &AppConfig) -> Result<()> {
    let storage_dir = config.storage_dir();
    info!(path = %storage_dir.display(), "Using storage directory");
    let kv: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(storage_dir));

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width as f32, config.window_height as f32])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title(APP_NAME),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(EditorApp::new(cc, kv)))),
    )
    .map_err(|err| anyhow!("Failed to launch gradient editor: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::storage::RECORD_KEY;
    use crate::persistence::MemoryStore;
    use crate::store::{Action, Channel, State};
    use std::thread;

    fn settle(app: &mut EditorApp) {
        for _ in 0..500 {
            app.process_persistence_events();
            if app.pending_io == 0 {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("persistence never settled");
    }

    fn new_app(kv: Arc<dyn KeyValueStore>) -> EditorApp {
        EditorApp::with_parts(egui::Context::default(), None, kv)
    }

    #[test]
    fn test_startup_without_saved_inputs_keeps_defaults() {
        let mut app = new_app(Arc::new(MemoryStore::new()));
        settle(&mut app);

        assert_eq!(app.store.state(), State::default());
        assert_eq!(app.uniforms.get(), ShaderUniforms::from_state(&State::default()));
    }

    #[test]
    fn test_startup_restores_saved_inputs() {
        let kv = Arc::new(MemoryStore::new());
        let saved = PersistedSnapshot {
            colors: [[0.1, 0.2, 0.3], [0.4, 0.5, 0.6], [0.7, 0.8, 0.9]],
            flip: [false, false, true],
            alpha: 0.7,
        };
        persistence::save(kv.as_ref(), &saved).unwrap();

        let mut app = new_app(kv);
        settle(&mut app);

        assert_eq!(PersistedSnapshot::from_state(&app.store.state()), saved);
        assert_eq!(app.uniforms.get().colors, saved.colors);
        assert_eq!(app.uniforms.get().alpha, 0.7);
    }

    #[test]
    fn test_dispatch_refreshes_uniforms() {
        let mut app = new_app(Arc::new(MemoryStore::new()));
        settle(&mut app);

        app.handle_panel_event(PanelEvent::Dispatch(Action::UpdateFlip { channel: Channel::Blue }));

        assert_eq!(app.uniforms.get().flip, [true, false, true]);
    }

    #[test]
    fn test_save_writes_current_state() {
        let kv = Arc::new(MemoryStore::new());
        let mut app = new_app(kv.clone());
        settle(&mut app);

        app.handle_panel_event(PanelEvent::Dispatch(Action::UpdateAlpha { value: 0.95 }));
        app.handle_panel_event(PanelEvent::Dispatch(Action::UpdateSelectedColor {
            channel: Channel::Green,
        }));
        app.handle_panel_event(PanelEvent::Save);
        settle(&mut app);

        let text = kv.get(RECORD_KEY).unwrap().unwrap();
        let stored = persistence::parse_snapshot(&text).unwrap();
        assert_eq!(stored.alpha, 0.95);
        assert_eq!(stored.colors, State::default().colors);
        assert!(matches!(&app.status_message, Some(message) if message.text == "Saved"));
    }
}
