//! Legend, instructions and the save button.

use egui::{Button, Color32, RichText, Sense, vec2};

use super::super::QuadmarkApp;
use crate::types::Slot;

const SAVE_FILL: Color32 = Color32::from_rgb(0, 128, 0);

const INSTRUCTIONS: [&str; 3] = [
    "Step 1. Left click: add a point (1st: before, 2nd: after)",
    "Step 2. Right click + drag: move an unsaved point",
    "Step 3. Save: fix the current ID and dim its points",
];

impl QuadmarkApp {
    fn ui_legend(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for slot in Slot::ALL {
                let (rect, _) = ui.allocate_exact_size(vec2(14.0, 14.0), Sense::hover());
                ui.painter().circle_filled(
                    rect.center(),
                    6.0,
                    self.config.point_color32(slot, false),
                );
                ui.label(slot.label());
                ui.add_space(8.0);
            }
        });
    }

    pub(crate) fn ui_side(&mut self, ui: &mut egui::Ui) {
        ui.heading("Legend & controls");
        ui.separator();
        self.ui_legend(ui);
        ui.add_space(6.0);
        for line in INSTRUCTIONS {
            ui.label(line);
        }
        ui.separator();

        let store = self.session.store();
        ui.label(format!("Current ID: {}", store.current_id()));
        ui.label(format!("Next input: {}", store.next_slot()));
        ui.label(format!("State: {}", store.phase(store.current_id()).label()));
        ui.add_space(6.0);

        let label = RichText::new(format!("Save ( ID={} )", store.current_id()))
            .strong()
            .size(14.0)
            .color(Color32::WHITE);
        if ui
            .add(Button::new(label).fill(SAVE_FILL))
            .on_hover_text("Ctrl+S")
            .clicked()
        {
            self.commit();
        }

        ui.separator();
        ui.small(format!("Table: {}", self.session.table_path().display()));
        ui.small(format!("Chart: {}", self.session.chart_path().display()));
    }
}
