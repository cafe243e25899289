use std::fs;
use std::path::PathBuf;

use directories::{BaseDirs, ProjectDirs};
use egui::Color32;
use serde::Deserialize;
use tracing::warn;

use crate::render::{ChartSpec, SeriesStyle};
use crate::types::Slot;

const CONFIG_FILE_NAME: &str = "quadmark.toml";

/// Marker style for one slot. Unset colors fall back to the slot's default palette.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PointStyle {
    pub color: Option<[u8; 3]>,
    /// Color once the point is fixed.
    pub fixed_color: Option<[u8; 3]>,
    pub radius: f32,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            color: None,
            fixed_color: None,
            radius: 5.0,
        }
    }
}

impl PointStyle {
    pub const fn radius(&self) -> f32 {
        self.radius.max(1.0)
    }
}

const fn default_rgb(slot: Slot, fixed: bool) -> [u8; 3] {
    match (slot, fixed) {
        (Slot::Before, false) => [255, 0, 0],
        (Slot::Before, true) => [255, 153, 153],
        (Slot::After, false) => [0, 0, 255],
        (Slot::After, true) => [153, 153, 255],
    }
}

/// Direction labels drawn at the ends of the canvas axes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AxisLabels {
    pub pos_x: String,
    pub neg_x: String,
    pub pos_y: String,
    pub neg_y: String,
}

impl Default for AxisLabels {
    fn default() -> Self {
        Self {
            pos_x: "+X".to_string(),
            neg_x: "-X".to_string(),
            pos_y: "+Y".to_string(),
            neg_y: "-Y".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Chart title; the item name is used when empty.
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_title: "X".to_string(),
            y_title: "Y".to_string(),
            width: 640,
            height: 480,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Basename of the table and chart files.
    pub item_name: String,
    pub output_dir: PathBuf,
    pub canvas_size: f32,
    pub labels: AxisLabels,
    pub chart: ChartConfig,
    pub before: PointStyle,
    pub after: PointStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            item_name: "points".to_string(),
            output_dir: PathBuf::from("out"),
            canvas_size: 600.0,
            labels: AxisLabels::default(),
            chart: ChartConfig::default(),
            before: PointStyle::default(),
            after: PointStyle::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        for path in Self::candidate_paths() {
            if let Ok(contents) = fs::read_to_string(&path) {
                match Self::parse(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        warn!("Failed to parse config {}: {err}", path.display());
                    }
                }
            }
        }
        Self::default()
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(exe_path) = std::env::current_exe()
            && let Some(dir) = exe_path.parent()
        {
            paths.push(dir.join(CONFIG_FILE_NAME));
        }

        if let Some(proj_dirs) = ProjectDirs::from("dev", "Quadmark", "Quadmark") {
            paths.push(proj_dirs.config_dir().join(CONFIG_FILE_NAME));
        }

        if let Some(base_dirs) = BaseDirs::new() {
            paths.push(base_dirs.config_dir().join("quadmark").join(CONFIG_FILE_NAME));
        }

        paths
    }

    /// File stem shared by the table and the chart; falls back to `points` when blank.
    pub fn item_stem(&self) -> &str {
        let name = self.item_name.trim();
        if name.is_empty() { "points" } else { name }
    }

    pub fn table_path(&self) -> PathBuf {
        self.output_file("csv")
    }

    pub fn chart_path(&self) -> PathBuf {
        self.output_file("png")
    }

    fn output_file(&self, extension: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{extension}", self.item_stem()))
    }

    pub const fn canvas_size(&self) -> f32 {
        self.canvas_size.clamp(100.0, 4000.0)
    }

    pub const fn point_style(&self, slot: Slot) -> &PointStyle {
        match slot {
            Slot::Before => &self.before,
            Slot::After => &self.after,
        }
    }

    pub fn point_rgb(&self, slot: Slot, fixed: bool) -> [u8; 3] {
        let style = self.point_style(slot);
        let configured = if fixed { style.fixed_color } else { style.color };
        configured.unwrap_or(default_rgb(slot, fixed))
    }

    pub fn point_color32(&self, slot: Slot, fixed: bool) -> Color32 {
        let [r, g, b] = self.point_rgb(slot, fixed);
        Color32::from_rgb(r, g, b)
    }

    pub fn chart_spec(&self) -> ChartSpec {
        let series = |slot: Slot| SeriesStyle {
            color: self.point_rgb(slot, false),
            radius: self.point_style(slot).radius(),
        };
        let title = if self.chart.title.trim().is_empty() {
            self.item_stem().to_string()
        } else {
            self.chart.title.clone()
        };
        ChartSpec {
            title,
            x_title: self.chart.x_title.clone(),
            y_title: self.chart.y_title.clone(),
            width: self.chart.width.clamp(64, 8192),
            height: self.chart.height.clamp(64, 8192),
            before: series(Slot::Before),
            after: series(Slot::After),
        }
    }
}
