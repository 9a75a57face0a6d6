//! Main application module

mod keyboard;
mod styles;

use std::path::PathBuf;

use eframe::egui;

use crate::state::{AppState, EditorSettings, Notice, PanelMode};
use crate::ui::properties::PropertiesPanel;
use crate::ui::{messages, properties, status_bar, toolbar};
use crate::viewport::ViewportPanel;

/// Main application
pub struct MarblesApp {
    state: AppState,
    viewport: ViewportPanel,
    properties: PropertiesPanel,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
}

impl MarblesApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: EditorSettings,
        initial_scene: Option<PathBuf>,
    ) -> Self {
        let mut state = AppState::with_settings(settings);

        if let Some(path) = initial_scene {
            match state.open_initial_scene(&path) {
                Ok(()) => tracing::info!(
                    "Loaded scene from {} ({} bodies)",
                    path.display(),
                    state.scene.world.body_count()
                ),
                Err(e) => {
                    tracing::error!("Failed to open scene {}: {e}", path.display());
                    state.notify(Notice::error(format!(
                        "Could not open {}: {e}",
                        path.display()
                    )));
                }
            }
        }

        // Apply initial styles with font size from settings
        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);

        let last_font_size = state.settings.ui.font_size;

        Self {
            state,
            viewport: ViewportPanel::new(),
            properties: PropertiesPanel::default(),
            last_font_size,
        }
    }
}

impl eframe::App for MarblesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            self.state.settings.save();
        }

        let modal_open = messages::is_modal_open(&self.state);
        if !modal_open {
            keyboard::handle_keyboard(ctx, &mut self.state);
        }

        // ── Toolbar ───────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                ui.add_enabled_ui(!modal_open, |ui| toolbar::show(ui, &mut self.state));
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Right panel: Properties ──────────────────────────
        if self.state.panel != PanelMode::Hidden {
            egui::SidePanel::right("properties")
                .default_width(260.0)
                .width_range(200.0..=420.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    ui.add_enabled_ui(!modal_open, |ui| {
                        egui::ScrollArea::vertical()
                            .id_salt("props_scroll")
                            .show(ui, |ui| {
                                properties::show(ui, &mut self.state, &mut self.properties);
                            });
                    });
                });
        }

        // ── Modal notices and dialogs ────────────────────────
        messages::show(ctx, &mut self.state);

        // ── Central panel: simulation viewport ───────────────
        // Pointer input, the physics step and painting happen in that order inside
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state, !modal_open);
            });

        if self.state.scene.simulation_running {
            ctx.request_repaint();
        }
    }
}
