//! Quadrant canvas: axes, direction labels, points, and pointer handling.

use egui::{Align2, Color32, FontId, PointerButton, Pos2, Rect, Sense, Stroke, Vec2, pos2, vec2};

use super::super::{AXIS_LINE_TOLERANCE, LABEL_FONT_SIZE, QuadmarkApp};
use crate::util::f64_to_f32;

const AXIS_WIDTH: f32 = 2.0;
const ARROW_HEAD: f32 = 10.0;

fn arrow_head(painter: &egui::Painter, tip: Pos2, dir: Vec2, stroke: Stroke) {
    let back = -dir.normalized() * ARROW_HEAD;
    let side = vec2(-back.y, back.x) * 0.5;
    painter.line_segment([tip, tip + back + side], stroke);
    painter.line_segment([tip, tip + back - side], stroke);
}

fn paint_axes(painter: &egui::Painter, rect: Rect) {
    let stroke = Stroke::new(AXIS_WIDTH, Color32::BLACK);
    let c = rect.center();
    let left = pos2(rect.left(), c.y);
    let right = pos2(rect.right(), c.y);
    let top = pos2(c.x, rect.top());
    let bottom = pos2(c.x, rect.bottom());
    painter.line_segment([left, right], stroke);
    painter.line_segment([top, bottom], stroke);
    arrow_head(painter, right, Vec2::X, stroke);
    arrow_head(painter, left, -Vec2::X, stroke);
    arrow_head(painter, top, -Vec2::Y, stroke);
    arrow_head(painter, bottom, Vec2::Y, stroke);
}

impl QuadmarkApp {
    fn paint_labels(&self, painter: &egui::Painter, rect: Rect) {
        let labels = &self.config.labels;
        let c = rect.center();
        let font = FontId::proportional(LABEL_FONT_SIZE);
        for (text, pos) in [
            (&labels.pos_x, pos2(rect.right() - 20.0, c.y - 15.0)),
            (&labels.neg_x, pos2(rect.left() + 20.0, c.y - 15.0)),
            (&labels.pos_y, pos2(c.x + 20.0, rect.top() + 20.0)),
            (&labels.neg_y, pos2(c.x + 25.0, rect.bottom() - 20.0)),
        ] {
            painter.text(pos, Align2::CENTER_CENTER, text, font.clone(), Color32::BLACK);
        }
    }

    fn paint_points(&self, painter: &egui::Painter, origin: Pos2) {
        let outline = Stroke::new(1.0, Color32::BLACK);
        for (handle, point) in self.session.store().handles() {
            let local = match self.drag {
                Some(drag) if drag.handle == handle => drag.pos,
                _ => {
                    let (dx, dy) = self.transform.to_device(point.x, point.y);
                    pos2(f64_to_f32(dx), f64_to_f32(dy))
                }
            };
            let style = self.config.point_style(point.slot);
            painter.circle(
                origin + local.to_vec2(),
                style.radius(),
                self.config.point_color32(point.slot, point.fixed),
                outline,
            );
        }
    }

    fn on_axis_line(&self, local: Pos2) -> bool {
        let (cx, cy) = (
            f64_to_f32(self.transform.center_x),
            f64_to_f32(self.transform.center_y),
        );
        (local.x - cx).abs() <= AXIS_LINE_TOLERANCE || (local.y - cy).abs() <= AXIS_LINE_TOLERANCE
    }

    pub(crate) fn ui_canvas(&mut self, ui: &mut egui::Ui) {
        let size = self.config.canvas_size();
        let (response, painter) = ui.allocate_painter(vec2(size, size), Sense::click_and_drag());
        let rect = response.rect;
        let to_local = |pos: Pos2| {
            let local = pos - rect.min;
            pos2(local.x.clamp(0.0, size), local.y.clamp(0.0, size))
        };

        if response.clicked_by(PointerButton::Primary)
            && let Some(pos) = response.interact_pointer_pos()
        {
            let local = to_local(pos);
            if !self.on_axis_line(local) {
                self.place_at(local);
            }
        }

        // Hit test where the button went down, not where the drag threshold was crossed.
        if response.drag_started_by(PointerButton::Secondary)
            && let Some(pos) = ui.input(|i| i.pointer.press_origin())
        {
            self.begin_drag(to_local(pos));
        }
        if let Some(drag) = self.drag.as_mut()
            && let Some(pos) = response.interact_pointer_pos()
        {
            drag.pos = to_local(pos);
        }
        if response.drag_stopped_by(PointerButton::Secondary) {
            self.finish_drag();
        }

        painter.rect_filled(rect, 0.0, Color32::WHITE);
        paint_axes(&painter, rect);
        self.paint_labels(&painter, rect);
        self.paint_points(&painter, rect.min);
    }
}
