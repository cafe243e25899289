use super::*;
use std::fs;

use crate::test_util::unique_temp_dir;
use crate::types::{Point, PointId, Slot};

fn spec() -> ChartSpec {
    ChartSpec {
        title: "points".to_string(),
        x_title: "X".to_string(),
        y_title: "Y".to_string(),
        width: 640,
        height: 480,
        before: SeriesStyle {
            color: [255, 0, 0],
            radius: 5.0,
        },
        after: SeriesStyle {
            color: [0, 0, 255],
            radius: 5.0,
        },
    }
}

fn sample_points() -> Vec<Point> {
    vec![
        Point::fixed(PointId(1), Slot::Before, -40.0, -30.0),
        Point::unfixed(PointId(2), Slot::After, 30.0, -20.0),
    ]
}

fn pixel_at(image: &image::RgbaImage, pos: (f64, f64)) -> [u8; 4] {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (x, y) = (pos.0.floor() as u32, pos.1.floor() as u32);
    image.get_pixel(x, y).0
}

fn assert_close(actual: [u8; 4], expected: [u8; 3]) {
    for (a, e) in actual.iter().zip(expected) {
        assert!(a.abs_diff(e) <= 2, "pixel {actual:?} != {expected:?}");
    }
    assert_eq!(actual[3], 255);
}

#[test]
fn layout_shares_scale_and_keeps_origin_visible() {
    let layout = ChartLayout::fit(&sample_points(), 640, 480);
    let (ox, oy) = layout.origin();
    assert!((layout.plot_left..=layout.plot_right).contains(&ox));
    assert!((layout.plot_top..=layout.plot_bottom).contains(&oy));

    let (ux, uy) = layout.project(1.0, 0.0);
    let (vx, vy) = layout.project(0.0, 1.0);
    assert!((ux - ox - layout.scale()).abs() < 1e-9);
    assert!((uy - oy).abs() < 1e-9);
    assert!((vx - ox).abs() < 1e-9);
    assert!((oy - vy - layout.scale()).abs() < 1e-9);

    for p in sample_points() {
        let (px, py) = layout.project(p.x, p.y);
        assert!((layout.plot_left..=layout.plot_right).contains(&px));
        assert!((layout.plot_top..=layout.plot_bottom).contains(&py));
    }
}

#[test]
fn empty_layout_centers_origin() {
    let layout = ChartLayout::fit(&[], 400, 400);
    let (ox, oy) = layout.origin();
    assert!((ox - f64::midpoint(layout.plot_left, layout.plot_right)).abs() < 1e-9);
    assert!((oy - f64::midpoint(layout.plot_top, layout.plot_bottom)).abs() < 1e-9);
    assert!(layout.scale() > 0.0);
}

#[test]
fn svg_has_one_marker_per_point_plus_legend() {
    let spec = spec();
    let points = sample_points();
    let layout = ChartLayout::fit(&points, spec.width, spec.height);
    let svg = chart_svg(&points, &spec, &layout);
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<circle").count(), points.len() + 2);
    assert!(svg.contains("#ff0000"));
    assert!(svg.contains("#0000ff"));
    assert!(svg.contains(">points</text>"));
    assert!(svg.contains(">before</text>"));
    assert!(svg.contains(">after</text>"));
}

#[test]
fn svg_escapes_titles() {
    let mut spec = spec();
    spec.title = "a < b & c".to_string();
    let layout = ChartLayout::fit(&[], spec.width, spec.height);
    let svg = chart_svg(&[], &spec, &layout);
    assert!(svg.contains("a &lt; b &amp; c"));
}

#[test]
fn export_writes_png_with_series_colors() {
    let dir = unique_temp_dir("png");
    let path = dir.join("points.png");
    let spec = spec();
    let points = sample_points();
    export_chart(&points, &spec, &path).expect("export");

    let image = image::open(&path).expect("decode").to_rgba8();
    assert_eq!(image.dimensions(), (640, 480));
    let layout = ChartLayout::fit(&points, spec.width, spec.height);
    assert_close(
        pixel_at(&image, layout.project(points[0].x, points[0].y)),
        [255, 0, 0],
    );
    assert_close(
        pixel_at(&image, layout.project(points[1].x, points[1].y)),
        [0, 0, 255],
    );
    assert_close(pixel_at(&image, (1.0, 1.0)), [255, 255, 255]);
}

#[test]
fn export_format_follows_extension() {
    let dir = unique_temp_dir("jpeg");
    let path = dir.join("points.jpg");
    export_chart(&sample_points(), &spec(), &path).expect("export");
    let format = image::ImageReader::open(&path)
        .expect("open")
        .with_guessed_format()
        .expect("guess")
        .format();
    assert_eq!(format, Some(image::ImageFormat::Jpeg));
}

#[test]
fn export_into_missing_directory_fails() {
    let dir = unique_temp_dir("missing");
    let path = dir.join("absent").join("points.png");
    let err = export_chart(&sample_points(), &spec(), &path).unwrap_err();
    assert!(matches!(err, ExportError::Io { .. }));
    assert!(!path.exists());
}
