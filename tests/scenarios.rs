//! End-to-end checks of the worked scenarios and cross-module properties.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use pixlab::canvas::{Canvas, COLOR_BACKGROUND, COLOR_GREEN};
use pixlab::clip::{
    cohen_sutherland, liang_barsky, liang_barsky_interval, sutherland_hodgman, ClipWindow,
    LineClip, Polygon, Segment,
};
use pixlab::math::{Axis, Matrix2D, Matrix3D, PixelCoord, Point2D, Point3D, Reflection3D};
use pixlab::raster::{rasterize_line, BresenhamLine, LineAlgorithm, MidpointCircle};
use pixlab::transform::{compose, PointSet, Transform, Transform2D};

const EPSILON: f64 = 1e-9;

fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
    Segment::new(Point2D::new(x1, y1), Point2D::new(x2, y2))
}

fn assert_within(window: &ClipWindow, p: Point2D) {
    assert!(
        p.x >= window.xmin() - EPSILON
            && p.x <= window.xmax() + EPSILON
            && p.y >= window.ymin() - EPSILON
            && p.y <= window.ymax() + EPSILON,
        "{p:?} lies outside {window:?}"
    );
}

#[test]
fn scenario_bresenham_shallow_line() {
    let pixels: Vec<_> = BresenhamLine::new(PixelCoord::new(0, 0), PixelCoord::new(5, 2))
        .map(|p| (p.x, p.y))
        .collect();
    assert_eq!(pixels, vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)]);
}

#[test]
fn scenario_cohen_sutherland_inside_segment() {
    let window = ClipWindow::new(50.0, 50.0, 400.0, 300.0).unwrap();
    let s = seg(100.0, 100.0, 300.0, 250.0);
    let LineClip::Accepted(clipped) = cohen_sutherland(s, &window) else {
        panic!("inside segment rejected");
    };
    assert!(clipped.is_unchanged());
    assert_eq!(clipped.segment, s);
}

#[test]
fn scenario_liang_barsky_crossing_segment() {
    let window = ClipWindow::new(50.0, 50.0, 400.0, 300.0).unwrap();
    let s = seg(20.0, 30.0, 450.0, 350.0);

    let (u1, u2) = liang_barsky_interval(s, &window).unwrap();
    assert!(0.0 < u1 && u1 < u2 && u2 < 1.0);

    let LineClip::Accepted(clipped) = liang_barsky(s, &window) else {
        panic!("crossing segment rejected");
    };
    assert!(!clipped.start_kept && !clipped.end_kept);
    // Enters through the left boundary, leaves through the top.
    assert_abs_diff_eq!(clipped.segment.p1.x, 50.0, epsilon = EPSILON);
    assert_abs_diff_eq!(clipped.segment.p2.y, 300.0, epsilon = EPSILON);
    assert_within(&window, clipped.segment.p1);
    assert_within(&window, clipped.segment.p2);
}

#[test]
fn scenario_sutherland_hodgman_quad() {
    let window = ClipWindow::new(100.0, 100.0, 400.0, 300.0).unwrap();
    let polygon = Polygon::new(vec![
        Point2D::new(50.0, 50.0),
        Point2D::new(200.0, 350.0),
        Point2D::new(450.0, 250.0),
        Point2D::new(350.0, 50.0),
    ]);
    let clipped = sutherland_hodgman(&polygon, &window);
    assert!(clipped.len() >= 3);
    for &v in clipped.vertices() {
        assert_within(&window, v);
    }
}

#[test]
fn scenario_translate_then_rotate() {
    let m = Matrix2D::translation(2.0, 0.0) * Matrix2D::rotation_degrees(90.0);
    // (1, 0) -> (3, 0) -> (0, 3)
    assert_relative_eq!(Point2D::new(1.0, 0.0) * m, Point2D::new(0.0, 3.0), epsilon = 1e-12);

    let t: Transform = m.into();
    let out = t
        .apply(&PointSet::Planar(vec![Point2D::new(1.0, 0.0)]))
        .unwrap();
    let PointSet::Planar(points) = out else {
        panic!("dimension changed");
    };
    assert_relative_eq!(points[0], Point2D::new(0.0, 3.0), epsilon = 1e-12);
}

#[test]
fn line_clippers_agree_on_a_grid() {
    let window = ClipWindow::new(50.0, 50.0, 400.0, 300.0).unwrap();
    let xs = [-20.0, 0.0, 50.0, 120.0, 250.0, 400.0, 430.0];
    let ys = [-10.0, 30.0, 50.0, 175.0, 300.0, 350.0];
    let points: Vec<Point2D> = xs
        .iter()
        .flat_map(|&x| ys.iter().map(move |&y| Point2D::new(x, y)))
        .collect();

    for &p1 in &points {
        for &p2 in &points {
            let s = Segment::new(p1, p2);
            let cs = cohen_sutherland(s, &window);
            let lb = liang_barsky(s, &window);
            match (cs.segment(), lb.segment()) {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    assert_abs_diff_eq!(a.p1, b.p1, epsilon = EPSILON);
                    assert_abs_diff_eq!(a.p2, b.p2, epsilon = EPSILON);
                    assert_within(&window, a.p1);
                    assert_within(&window, a.p2);
                }
                _ => panic!("clippers disagree on {s:?}: {cs:?} vs {lb:?}"),
            }
        }
    }
}

#[test]
fn parallel_and_degenerate_segments_never_divide_by_zero() {
    let window = ClipWindow::new(50.0, 50.0, 400.0, 300.0).unwrap();
    let cases = [
        seg(0.0, 100.0, 500.0, 100.0),
        seg(200.0, 0.0, 200.0, 400.0),
        seg(10.0, 0.0, 10.0, 400.0),
        seg(0.0, 320.0, 500.0, 320.0),
        seg(50.0, 0.0, 50.0, 400.0),
        seg(100.0, 100.0, 100.0, 100.0),
        seg(0.0, 0.0, 0.0, 0.0),
    ];
    for s in cases {
        for clip in [cohen_sutherland(s, &window), liang_barsky(s, &window)] {
            if let Some(c) = clip.segment() {
                assert!(c.p1.x.is_finite() && c.p1.y.is_finite(), "{s:?}");
                assert!(c.p2.x.is_finite() && c.p2.y.is_finite(), "{s:?}");
            }
        }
    }
}

#[test]
fn reversed_lines_produce_reversed_pixels() {
    let ends = [
        (Point2D::new(0.0, 0.0), Point2D::new(7.0, 3.0)),
        (Point2D::new(3.0, -9.0), Point2D::new(-4.0, 2.0)),
        (Point2D::new(-5.0, 5.0), Point2D::new(5.0, -5.0)),
        (Point2D::new(1.0, 1.0), Point2D::new(9.0, 5.0)),
        (Point2D::new(-4.9, -4.9), Point2D::new(2.1, 5.1)),
        (Point2D::new(0.1, 2.35), Point2D::new(7.6, -1.15)),
        (Point2D::new(82.5, 50.5), Point2D::new(400.5, 500.25)),
    ];
    for algorithm in [LineAlgorithm::Dda, LineAlgorithm::Bresenham] {
        for (a, b) in ends {
            let forward: Vec<_> = rasterize_line(algorithm, a, b).collect();
            let mut backward: Vec<_> = rasterize_line(algorithm, b, a).collect();
            backward.reverse();
            assert_eq!(forward, backward, "{algorithm} {a:?} -> {b:?}");
        }
    }
}

#[test]
fn circle_output_is_closed_under_octant_reflection() {
    let center = PixelCoord::new(40, -12);
    let pixels: std::collections::HashSet<_> = MidpointCircle::new(center, 17)
        .unwrap()
        .map(|p| (p.x - center.x, p.y - center.y))
        .collect();
    for &(x, y) in &pixels {
        for q in [(y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)] {
            assert!(pixels.contains(&q), "{q:?} missing");
        }
    }
}

#[test]
fn composition_is_associative() {
    let (a, b, c) = (
        Matrix2D::rotation(0.7),
        Matrix2D::shear(0.3, -0.2),
        Matrix2D::translation(5.0, -1.0),
    );
    assert_relative_eq!((a * b) * c, a * (b * c), epsilon = 1e-12);

    let (a, b, c) = (
        Matrix3D::rotation(Axis::Y, 1.1),
        Matrix3D::shear(Axis::Z, Axis::X, 0.5).unwrap(),
        Matrix3D::reflection(Reflection3D::ZX),
    );
    assert_relative_eq!((a * b) * c, a * (b * c), epsilon = 1e-12);
}

#[test]
fn mismatched_dimensions_are_rejected() {
    let planar: Transform = Matrix2D::identity().into();
    let spatial: Transform = Matrix3D::identity().into();
    assert!(compose(&[planar, spatial]).is_err());
    assert!(planar
        .apply(&PointSet::Spatial(vec![Point3D::new(1.0, 2.0, 3.0)]))
        .is_err());
}

#[test]
fn transform_clip_rasterize_pipeline() {
    // A unit square scaled and moved so it straddles the window's right edge.
    let mut t = Transform2D::new();
    t.scale(100.0, 100.0).rotate_degrees(15.0).translate(360.0, 150.0);
    let square: Polygon = t
        .apply(&[
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(0.0, 1.0),
        ])
        .into();

    let window = ClipWindow::new(50.0, 50.0, 400.0, 300.0).unwrap();
    let clipped = sutherland_hodgman(&square, &window);
    assert!(!clipped.is_empty());
    for &v in clipped.vertices() {
        assert_within(&window, v);
    }

    let mut canvas = Canvas::new(500, 400);
    canvas.draw_polygon(&clipped, LineAlgorithm::Bresenham, COLOR_GREEN);
    assert!(canvas.count_color(COLOR_GREEN) > 0);
    // Nothing right of the window boundary was drawn.
    for y in 0..400 {
        for x in 401..500 {
            assert_eq!(canvas.get_pixel(PixelCoord::new(x, y)), Some(COLOR_BACKGROUND));
        }
    }
}
