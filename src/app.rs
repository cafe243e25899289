//! egui/eframe window: canvas, legend, save button and status line.

use egui::{Key, Pos2};

use crate::config::AppConfig;
use crate::session::{Session, SessionError};
use crate::store::PointHandle;
use crate::types::CanvasTransform;

mod ui;

/// Pick distance for starting a drag, in canvas points.
const POINT_HIT_RADIUS: f64 = 12.0;
/// Clicks this close to an axis line are ignored.
const AXIS_LINE_TOLERANCE: f32 = 1.5;
const LABEL_FONT_SIZE: f32 = 12.0;

#[derive(Debug, Clone, Copy)]
struct DragState {
    handle: PointHandle,
    /// Optimistic position in canvas coordinates; published on release.
    pos: Pos2,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StatusLine {
    Info(String),
    Error(String),
}

pub struct QuadmarkApp {
    config: AppConfig,
    session: Session,
    transform: CanvasTransform,
    drag: Option<DragState>,
    status: Option<StatusLine>,
}

impl QuadmarkApp {
    pub fn new(config: AppConfig, session: Session) -> Self {
        let size = f64::from(config.canvas_size());
        let status = Some(StatusLine::Info(format!(
            "Loaded {} points from {}",
            session.points().len(),
            session.table_path().display()
        )));
        Self {
            transform: CanvasTransform::for_canvas(size, size),
            config,
            session,
            drag: None,
            status,
        }
    }

    fn report(&mut self, err: &SessionError) {
        let text = if err.store_changed() {
            format!("{err} (change kept in memory; the next save rewrites the files)")
        } else {
            err.to_string()
        };
        self.status = Some(StatusLine::Error(text));
    }

    fn place_at(&mut self, device: Pos2) {
        let (x, y) = self
            .transform
            .to_math(f64::from(device.x), f64::from(device.y));
        match self.session.place_point(x, y) {
            Ok(added) => {
                self.status = Some(StatusLine::Info(format!(
                    "Added {} (id={}): ({x:.1}, {y:.1}); next: {}",
                    added.point.slot,
                    added.point.id,
                    self.session.store().next_slot()
                )));
            }
            Err(err) => self.report(&err),
        }
    }

    fn begin_drag(&mut self, device: Pos2) {
        let (x, y) = self
            .transform
            .to_math(f64::from(device.x), f64::from(device.y));
        let store = self.session.store();
        let Some(handle) = store.nearest(x, y, POINT_HIT_RADIUS) else {
            return;
        };
        if store.get(handle).is_some_and(|p| p.fixed) {
            self.status = Some(StatusLine::Info("Fixed points cannot be moved".to_string()));
            return;
        }
        self.drag = Some(DragState {
            handle,
            pos: device,
        });
    }

    fn finish_drag(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let (x, y) = self
            .transform
            .to_math(f64::from(drag.pos.x), f64::from(drag.pos.y));
        match self.session.move_point(drag.handle, x, y) {
            Ok(()) => {
                self.status = Some(StatusLine::Info(format!("Moved point to ({x:.1}, {y:.1})")));
            }
            Err(err) => self.report(&err),
        }
    }

    fn commit(&mut self) {
        match self.session.commit() {
            Ok(result) => {
                self.status = Some(StatusLine::Info(format!(
                    "Saved id={}; chart written to {}. Now entering id={}",
                    result.id,
                    self.session.chart_path().display(),
                    result.next_id
                )));
            }
            Err(err) => self.report(&err),
        }
    }
}

impl eframe::App for QuadmarkApp {
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        // Ctrl/Cmd + S: save (fix) the current id
        let ctx = ui.ctx().clone();
        if !ctx.wants_keyboard_input()
            && ctx.input(|i| i.key_pressed(Key::S) && i.modifiers.command)
        {
            self.commit();
        }

        egui::Panel::bottom("status").show_inside(ui, |ui| self.ui_status_bar(ui));
        egui::Panel::right("side")
            .resizable(false)
            .default_size(260.0)
            .show_inside(ui, |ui| self.ui_side(ui));
        egui::CentralPanel::default().show_inside(ui, |ui| self.ui_canvas(ui));
    }
}
