use maud::{Markup, html};

use super::{ChartLayout, ChartSpec};
use crate::types::{Point, Slot};

const FONT: &str = "DejaVu Sans, Arial, sans-serif";
const LEGEND_ROW: f64 = 18.0;

fn num(v: f64) -> String {
    format!("{v:.2}")
}

fn legend(spec: &ChartSpec, layout: &ChartLayout) -> Markup {
    let width = 84.0;
    let height = LEGEND_ROW.mul_add(2.0, 12.0);
    let left = layout.plot_right - width - 8.0;
    let top = layout.plot_top + 8.0;
    html! {
        g class="legend" {
            rect x=(num(left)) y=(num(top)) width=(num(width)) height=(num(height))
                rx="3" fill="white" fill-opacity="0.85" stroke="#b0b0b0" {}
            @for (slot, offset) in Slot::ALL.into_iter().zip([0.0, LEGEND_ROW]) {
                @let cy = top + 6.0 + LEGEND_ROW / 2.0 + offset;
                circle cx=(num(left + 14.0)) cy=(num(cy)) r="5" fill=(spec.series(slot).hex()) {}
                text x=(num(left + 26.0)) y=(num(cy + 4.0)) font-size="12" font-family=(FONT) {
                    (slot.label())
                }
            }
        }
    }
}

/// SVG document for the chart: guide lines through the origin, both series, legend and titles.
pub fn chart_svg(points: &[Point], spec: &ChartSpec, layout: &ChartLayout) -> String {
    let (ox, oy) = layout.origin();
    let mid_x = (layout.plot_left + layout.plot_right) / 2.0;
    let mid_y = (layout.plot_top + layout.plot_bottom) / 2.0;
    let y_title_x = layout.plot_left / 2.0;
    let markup = html! {
        svg xmlns="http://www.w3.org/2000/svg"
            width=(spec.width) height=(spec.height)
            viewBox=(format!("0 0 {} {}", spec.width, spec.height)) {
            rect x="0" y="0" width=(spec.width) height=(spec.height) fill="white" {}
            @if !spec.title.is_empty() {
                text x=(num(layout.width / 2.0)) y=(num(layout.plot_top / 2.0 + 6.0))
                    text-anchor="middle" font-size="16" font-family=(FONT) {
                    (spec.title)
                }
            }
            g stroke="black" stroke-width="1" {
                line x1=(num(layout.plot_left)) y1=(num(oy)) x2=(num(layout.plot_right)) y2=(num(oy)) {}
                line x1=(num(ox)) y1=(num(layout.plot_top)) x2=(num(ox)) y2=(num(layout.plot_bottom)) {}
            }
            @for slot in Slot::ALL {
                @let style = spec.series(slot);
                g class=(slot.label()) fill=(style.hex()) {
                    @for p in points.iter().filter(|p| p.slot == slot) {
                        @let (cx, cy) = layout.project(p.x, p.y);
                        circle cx=(num(cx)) cy=(num(cy)) r=(num(f64::from(style.radius))) {}
                    }
                }
            }
            (legend(spec, layout))
            text x=(num(mid_x)) y=(num(layout.height - 14.0))
                text-anchor="middle" font-size="13" font-family=(FONT) {
                (spec.x_title)
            }
            text x=(num(y_title_x)) y=(num(mid_y))
                transform=(format!("rotate(-90 {} {})", num(y_title_x), num(mid_y)))
                text-anchor="middle" font-size="13" font-family=(FONT) {
                (spec.y_title)
            }
        }
    };
    markup.into_string()
}
