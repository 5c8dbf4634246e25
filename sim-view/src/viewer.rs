//! Interactive dot grid viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns a [`SimulationEngine`] and
//! implements [`eframe::App`] to tick it on a timer and draw its snapshot.

use dotgrid_core::{Config, Phase, RelocationPolicy, SimulationEngine, SimError, TickReport};
use eframe::App;
use glam::Vec2;
use tracing::{error, info};

/// Main application state for the interactive viewer.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions.
/// 2. If `running` is `true` and `step_interval` has passed, call [`Viewer::step_once`].
/// 3. Render the board, markers and cursor from [`SimulationEngine::snapshot`].
///
/// ### Fields
/// - `engine` - The simulation being shown.
/// - `cfg` - Editable configuration; applied to a fresh engine on reset.
///
/// - `running` - Whether the simulation is currently auto-advancing.
/// - `zoom` - Board units to screen pixels.
/// - `pan` - Screen-space pan offset in pixels.
///
/// - `last_report` - What the last tick changed (for highlighting).
/// - `halted` - Error that stopped the run, if any.
///
/// - `step_interval` - Seconds between automatic ticks.
/// - `last_step_time` - Time stamp of the last tick (egui time).
/// - `last_step_dt` - Actual time delta between the last two ticks.
pub struct Viewer {
    engine: SimulationEngine,
    cfg: Config,

    running: bool,
    zoom: f32,
    pan: egui::Vec2,

    last_report: Option<TickReport>,
    halted: Option<SimError>,

    step_interval: f64,
    last_step_time: f64,
    last_step_dt: f64,
}

impl Viewer {
    /// Creates a viewer around a new engine with a random starting cursor.
    ///
    /// ### Errors
    /// Returns [`SimError::InvalidConfig`] if `cfg` is unusable.
    pub fn new(cfg: Config) -> Result<Self, SimError> {
        let engine = SimulationEngine::with_random_cursor(cfg)?;
        Ok(Self {
            engine,
            cfg,
            running: false,
            zoom: 1.0,
            pan: egui::vec2(0.0, 0.0),
            last_report: None,
            halted: None,
            step_interval: 1.0,
            last_step_time: 0.0,
            last_step_dt: 0.0,
        })
    }

    /// Starts over with the edited config and a fresh seed.
    ///
    /// Keeps the camera, stops auto-running and clears any halt. If the
    /// edited config is invalid the current engine is kept.
    fn reset(&mut self) {
        let mut cfg = self.cfg;
        cfg.seed = rand::random();

        match SimulationEngine::with_random_cursor(cfg) {
            Ok(engine) => {
                info!(seed = cfg.seed, "simulation reset");
                self.engine = engine;
                self.cfg = cfg;
                self.last_report = None;
                self.halted = None;
            }
            Err(err) => {
                error!(%err, "reset rejected");
                self.halted = Some(err);
            }
        }
        self.running = false;
    }

    /// Advances the simulation by a single tick.
    ///
    /// A tick error means an engine invariant broke; the run is paused
    /// and the error is shown in the status bar.
    fn step_once(&mut self) {
        if self.halted.is_some() {
            return;
        }
        match self.engine.tick() {
            Ok(report) => self.last_report = Some(report),
            Err(err) => {
                error!(%err, "tick failed, pausing");
                self.halted = Some(err);
                self.running = false;
            }
        }
    }

    /// Converts a board position to screen space.
    ///
    /// The board origin sits at the top-left of `rect`, scaled by `zoom`
    /// and offset by `pan`. Board y grows downwards like screen y.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        egui::pos2(
            rect.min.x + p.x * self.zoom + self.pan.x,
            rect.min.y + p.y * self.zoom + self.pan.y,
        )
    }

    /// Inverse of [`Viewer::world_to_screen`].
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        Vec2::new(
            (p.x - rect.min.x - self.pan.x) / self.zoom,
            (p.y - rect.min.y - self.pan.y) / self.zoom,
        )
    }

    fn labeled_drag_i32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut i32,
        range: std::ops::RangeInclusive<i32>,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(1.0));
        });
    }

    fn labeled_drag_u32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut u32,
        range: std::ops::RangeInclusive<u32>,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(1.0));
        });
    }

    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(1.0));
        });
    }

    /// Builds the top panel UI (run controls, stepping, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                ui.add(
                    egui::DragValue::new(&mut self.step_interval)
                        .prefix("tick every ")
                        .suffix(" s")
                        .range(0.01..=5.0)
                        .speed(0.01),
                );

                if ui.button("Step").clicked() {
                    let now = ctx.input(|i| i.time);
                    if self.last_step_time > 0.0 {
                        self.last_step_dt = now - self.last_step_time;
                    }
                    self.step_once();
                    self.last_step_time = now;
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.1..=5.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (phase, day, marker count, cursor).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        let snap = self.engine.snapshot();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt last = {:.3} s", self.last_step_dt));
                ui.separator();
                ui.label(format!("cursor = ({}, {})", snap.cursor.x, snap.cursor.y));
                ui.label(format!("markers = {}", snap.markers.len()));
                ui.label(format!("day = {}", snap.day));
                ui.label(match snap.phase {
                    Phase::Growth => "phase = growth",
                    Phase::Prune => "phase = prune",
                });
                if let Some(err) = &self.halted {
                    ui.separator();
                    ui.colored_label(egui::Color32::RED, format!("halted: {err}"));
                }
            });
        });
    }

    /// Builds the right-hand configuration panel. Edits apply on reset.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");
                ui.label("Applied on reset.");

                ui.separator();
                ui.label("Board");
                Self::labeled_drag_i32(ui, "width:", &mut self.cfg.board_width, 50..=4000);
                Self::labeled_drag_i32(ui, "height:", &mut self.cfg.board_height, 50..=4000);
                Self::labeled_drag_i32(ui, "marker_size:", &mut self.cfg.marker_size, 1..=50);
                Self::labeled_drag_i32(ui, "step:", &mut self.cfg.step, 1..=50);
                Self::labeled_drag_i32(ui, "spawn_min:", &mut self.cfg.spawn_min, 0..=500);

                ui.separator();
                ui.label("Cycle");
                Self::labeled_drag_u32(ui, "cycle_period:", &mut self.cfg.cycle_period, 0..=1000);
                Self::labeled_drag_usize(
                    ui,
                    "prune_threshold:",
                    &mut self.cfg.prune_threshold,
                    0..=1000,
                );
                ui.checkbox(&mut self.cfg.reset_after_prune, "reset after prune");
                ui.checkbox(&mut self.cfg.bonus_spawn, "bonus spawn");

                ui.separator();
                ui.label("Relocation");
                ui.radio_value(
                    &mut self.cfg.relocation,
                    RelocationPolicy::ScalarAxis,
                    "scalar per axis",
                );
                ui.radio_value(
                    &mut self.cfg.relocation,
                    RelocationPolicy::ExactPair,
                    "exact pair",
                );

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = Config::default();
                }
            });
    }

    /// Builds the central panel where the board is drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Pan with drag.
            if response.dragged() {
                self.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                let world_before = self.screen_to_world(pointer_screen, rect);

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(0.1, 5.0);

                let screen_after = self.world_to_screen(world_before, rect);
                self.pan += pointer_screen - screen_after;
            }

            let cfg = self.engine.config();
            let snap = self.engine.snapshot();
            let size = cfg.marker_size as f32;
            let half = Vec2::splat(size * 0.5);
            let radius = (size * 0.5 * self.zoom).max(1.0);

            // Board outline.
            let board = egui::Rect::from_two_pos(
                self.world_to_screen(Vec2::ZERO, rect),
                self.world_to_screen(
                    Vec2::new(cfg.board_width as f32, cfg.board_height as f32),
                    rect,
                ),
            );
            painter.rect_stroke(
                board,
                0.0,
                egui::Stroke::new(1.0, egui::Color32::DARK_GRAY),
                egui::StrokeKind::Inside,
            );

            // Markers, highlighting the ones placed this tick.
            let placed = self.last_report.as_ref().map(|r| r.placed.as_slice()).unwrap_or(&[]);
            for m in &snap.markers {
                let p = self.world_to_screen(m.as_vec2() + half, rect);
                let color = if placed.contains(m) {
                    egui::Color32::LIGHT_GREEN
                } else {
                    egui::Color32::LIGHT_GRAY
                };
                painter.circle_filled(p, radius, color);
            }

            // Cursor outline.
            let c = self.world_to_screen(snap.cursor.as_vec2() + half, rect);
            painter.circle_stroke(c, radius, egui::Stroke::new(1.5, egui::Color32::LIGHT_BLUE));

            // Auto-run simulation if requested.
            if self.running {
                let now = ctx.input(|i| i.time);
                let elapsed = now - self.last_step_time;
                if elapsed >= self.step_interval {
                    if self.last_step_time > 0.0 {
                        self.last_step_dt = elapsed;
                    }
                    self.step_once();
                    self.last_step_time = now;
                }

                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
