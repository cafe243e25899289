use chrono::{DateTime, Utc};
use egui::Color32;

use super::super::{QuadmarkApp, StatusLine};

impl QuadmarkApp {
    pub(crate) fn ui_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            match &self.status {
                Some(StatusLine::Info(text)) => {
                    ui.label(text);
                }
                Some(StatusLine::Error(text)) => {
                    ui.colored_label(Color32::from_rgb(200, 40, 40), text);
                }
                None => {}
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(saved) = self.session.last_saved() {
                    let stamp: DateTime<Utc> = saved.into();
                    ui.label(format!("Last write {} UTC", stamp.format("%H:%M:%S")));
                }
            });
        });
    }
}
