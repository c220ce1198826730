//! Demo scenes. Each one draws into a [`Canvas`] and knows nothing about
//! the window, so the same code backs the interactive loop and `--snapshot`.

use std::f64::consts::TAU;

use anyhow::Result;
use clap::ValueEnum;
use pixlab::canvas::{
    Canvas, COLOR_AXIS, COLOR_BLUE, COLOR_GREEN, COLOR_GRID, COLOR_MAGENTA, COLOR_RED,
    COLOR_WHITE, COLOR_YELLOW,
};
use pixlab::clip::{sutherland_hodgman, ClipWindow, LineClip, LineClipAlgorithm, Polygon, Segment};
use pixlab::math::{
    Axis, Matrix2D, Matrix3D, OrthoView, PixelCoord, Point2D, Point3D, Reflection2D,
};
use pixlab::raster::{rasterize_line, LineAlgorithm, MidpointCircle, MidpointEllipse, Polyline};
use pixlab::transform::{Transform2D, Transform3D};
use pixlab::window::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    Dda,
    Bresenham,
    Circle,
    Ellipse,
    LineGraph,
    PieChart,
    CohenSutherland,
    LiangBarsky,
    SutherlandHodgman,
    Transform2d,
    Composite,
    Pyramid,
}

impl SceneKind {
    const ALL: [SceneKind; 12] = [
        SceneKind::Dda,
        SceneKind::Bresenham,
        SceneKind::Circle,
        SceneKind::Ellipse,
        SceneKind::LineGraph,
        SceneKind::PieChart,
        SceneKind::CohenSutherland,
        SceneKind::LiangBarsky,
        SceneKind::SutherlandHodgman,
        SceneKind::Transform2d,
        SceneKind::Composite,
        SceneKind::Pyramid,
    ];

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    fn title(self) -> &'static str {
        match self {
            SceneKind::Dda => "DDA line",
            SceneKind::Bresenham => "Bresenham line",
            SceneKind::Circle => "Midpoint circle",
            SceneKind::Ellipse => "Midpoint ellipse",
            SceneKind::LineGraph => "Line graph",
            SceneKind::PieChart => "Pie chart",
            SceneKind::CohenSutherland => "Cohen-Sutherland clipping",
            SceneKind::LiangBarsky => "Liang-Barsky clipping",
            SceneKind::SutherlandHodgman => "Sutherland-Hodgman clipping",
            SceneKind::Transform2d => "2D transforms [0-6]",
            SceneKind::Composite => "Composite transform",
            SceneKind::Pyramid => "3D transforms [1-4, R, C]",
        }
    }
}

/// Single transforms bound to keys 0-6 in the 2D scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Preset2D {
    #[default]
    Identity,
    Translate,
    Rotate,
    Scale,
    ReflectX,
    ReflectY,
    Shear,
}

impl Preset2D {
    fn from_digit(digit: u8) -> Option<Self> {
        let preset = match digit {
            0 => Preset2D::Identity,
            1 => Preset2D::Translate,
            2 => Preset2D::Rotate,
            3 => Preset2D::Scale,
            4 => Preset2D::ReflectX,
            5 => Preset2D::ReflectY,
            6 => Preset2D::Shear,
            _ => return None,
        };
        Some(preset)
    }

    fn matrix(self) -> Matrix2D {
        match self {
            Preset2D::Identity => Matrix2D::identity(),
            Preset2D::Translate => Matrix2D::translation(0.2, 0.2),
            Preset2D::Rotate => Matrix2D::rotation_degrees(30.0),
            Preset2D::Scale => Matrix2D::uniform_scaling(1.2),
            Preset2D::ReflectX => Matrix2D::reflection(Reflection2D::XAxis),
            Preset2D::ReflectY => Matrix2D::reflection(Reflection2D::YAxis),
            Preset2D::Shear => Matrix2D::shear(0.3, 0.0),
        }
    }
}

/// Transforms bound to keys 1-4 in the pyramid scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Preset3D {
    Translate,
    RotateX,
    ShearXByY,
    Scale,
}

impl Preset3D {
    fn from_digit(digit: u8) -> Option<Self> {
        let preset = match digit {
            1 => Preset3D::Translate,
            2 => Preset3D::RotateX,
            3 => Preset3D::ShearXByY,
            4 => Preset3D::Scale,
            _ => return None,
        };
        Some(preset)
    }

    fn matrix(self) -> pixlab::Result<Matrix3D> {
        Ok(match self {
            Preset3D::Translate => Matrix3D::translation(4.0, 4.0, 0.0),
            Preset3D::RotateX => Matrix3D::rotation_degrees(Axis::X, 30.0),
            Preset3D::ShearXByY => Matrix3D::shear(Axis::X, Axis::Y, 0.8)?,
            Preset3D::Scale => Matrix3D::uniform_scaling(2.0),
        })
    }
}

fn next_view(view: OrthoView) -> OrthoView {
    match view {
        OrthoView::Front => OrthoView::Top,
        OrthoView::Top => OrthoView::Side,
        OrthoView::Side => OrthoView::Front,
    }
}

const DDA_START: Point2D = Point2D::new(100.0, 100.0);
const DDA_END: Point2D = Point2D::new(700.0, 500.0);
const BRESENHAM_START: PixelCoord = PixelCoord::new(82, 50);
const BRESENHAM_END: PixelCoord = PixelCoord::new(400, 500);
const CIRCLE_RADIUS: i32 = 200;
const ELLIPSE_RADII: (i32, i32) = (220, 150);

const GRAPH_VALUES: [f64; 11] = [30.0, 45.0, 45.0, 65.0, 60.0, 80.0, 70.0, 95.0, 75.0, 85.0, 40.0];
/// Value plotted at the top of the graph area.
const GRAPH_RANGE: f64 = 100.0;
const GRAPH_PADDING: f64 = 80.0;

const PIE_SLICES: [(f64, u32); 4] = [
    (30.0, COLOR_RED),
    (25.0, COLOR_GREEN),
    (15.0, COLOR_BLUE),
    (30.0, COLOR_YELLOW),
];
const PIE_RADIUS: i32 = 200;

const LINE_CLIP_WINDOW: [f64; 4] = [50.0, 50.0, 400.0, 300.0];
const COHEN_SUTHERLAND_LINES: [[f64; 4]; 3] = [
    [20.0, 30.0, 450.0, 350.0],
    [100.0, 100.0, 300.0, 250.0],
    [200.0, 50.0, 500.0, 100.0],
];
const LIANG_BARSKY_LINES: [[f64; 4]; 3] = [
    [20.0, 30.0, 450.0, 350.0],
    [100.0, 100.0, 300.0, 250.0],
    [0.0, 300.0, 350.0, 0.0],
];
const POLYGON_CLIP_WINDOW: [f64; 4] = [100.0, 100.0, 400.0, 300.0];
const CLIP_POLYGON: [(f64, f64); 4] = [(50.0, 50.0), (200.0, 350.0), (450.0, 250.0), (350.0, 50.0)];

const TRIANGLE: [(f64, f64); 3] = [(0.1, 0.1), (0.1, 0.5), (0.4, 0.2)];
const COMPOSITE_TRIANGLE: [(f64, f64); 3] = [(-0.8, -0.6), (-0.6, -0.6), (-0.7, -0.4)];

const PYRAMID_VERTICES: [(f64, f64, f64); 5] = [
    (0.0, 2.0, 0.0),
    (1.0, -1.0, 1.0),
    (1.0, -1.0, -1.0),
    (-1.0, -1.0, -1.0),
    (-1.0, -1.0, 1.0),
];
const PYRAMID_EDGES: [(usize, usize); 8] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (0, 4),
    (1, 2),
    (2, 3),
    (3, 4),
    (4, 1),
];
/// Screen pixels per world unit in the pyramid scene.
const PYRAMID_SCALE: f64 = 30.0;

/// Interactive state shared by every scene.
pub struct Demo {
    scene: SceneKind,
    revealed: usize,
    reveal_rate: usize,
    line_algorithm: LineAlgorithm,
    preset_2d: Preset2D,
    preset_3d: Option<Preset3D>,
    view: OrthoView,
}

impl Demo {
    pub fn new(scene: SceneKind, reveal_rate: usize) -> Self {
        Self {
            scene,
            revealed: 0,
            reveal_rate: reveal_rate.max(1),
            line_algorithm: LineAlgorithm::default(),
            preset_2d: Preset2D::default(),
            preset_3d: None,
            view: OrthoView::Front,
        }
    }

    pub fn title(&self) -> String {
        match self.scene {
            SceneKind::CohenSutherland | SceneKind::LiangBarsky | SceneKind::SutherlandHodgman => {
                format!("{} ({}, L to switch)", self.scene.title(), self.line_algorithm)
            }
            SceneKind::Pyramid => format!("{} ({:?} view)", self.scene.title(), self.view),
            _ => self.scene.title().to_string(),
        }
    }

    pub fn set_scene(&mut self, scene: SceneKind) {
        log::info!("scene: {}", scene.title());
        self.scene = scene;
        self.revealed = 0;
    }

    pub fn handle_key(&mut self, key: Key) -> Result<()> {
        match (key, self.scene) {
            (Key::Tab, _) => self.set_scene(self.scene.next()),
            (Key::Space, _) => self.revealed = 0,
            (Key::L, _) => {
                self.line_algorithm = match self.line_algorithm {
                    LineAlgorithm::Dda => LineAlgorithm::Bresenham,
                    LineAlgorithm::Bresenham => LineAlgorithm::Dda,
                };
                log::info!("line algorithm: {}", self.line_algorithm);
            }
            (Key::Digit(d), SceneKind::Transform2d) => {
                if let Some(preset) = Preset2D::from_digit(d) {
                    log::info!("2D preset: {preset:?}");
                    self.preset_2d = preset;
                }
            }
            (Key::Digit(d), SceneKind::Pyramid) => {
                if let Some(preset) = Preset3D::from_digit(d) {
                    // Validate before storing so render never fails on it.
                    preset.matrix()?;
                    log::info!("3D preset: {preset:?}");
                    self.preset_3d = Some(preset);
                }
            }
            (Key::R, SceneKind::Pyramid) => self.preset_3d = None,
            (Key::C, SceneKind::Pyramid) => {
                self.view = next_view(self.view);
                log::info!("view: {:?}", self.view);
            }
            _ => {}
        }
        Ok(())
    }

    /// Reveals the next batch of pixels.
    pub fn advance(&mut self) {
        self.revealed = self.revealed.saturating_add(self.reveal_rate);
    }

    pub fn reveal_all(&mut self) {
        self.revealed = usize::MAX;
    }

    pub fn render(&self, canvas: &mut Canvas) -> Result<()> {
        canvas.draw_grid(50, COLOR_GRID);
        match self.scene {
            SceneKind::Dda => self.render_dda(canvas),
            SceneKind::Bresenham => self.render_bresenham(canvas),
            SceneKind::Circle => self.render_circle(canvas)?,
            SceneKind::Ellipse => self.render_ellipse(canvas)?,
            SceneKind::LineGraph => self.render_line_graph(canvas),
            SceneKind::PieChart => self.render_pie_chart(canvas)?,
            SceneKind::CohenSutherland => self.render_line_clip(
                canvas,
                LineClipAlgorithm::CohenSutherland,
                &COHEN_SUTHERLAND_LINES,
            )?,
            SceneKind::LiangBarsky => {
                self.render_line_clip(canvas, LineClipAlgorithm::LiangBarsky, &LIANG_BARSKY_LINES)?
            }
            SceneKind::SutherlandHodgman => self.render_polygon_clip(canvas)?,
            SceneKind::Transform2d => self.render_transform_2d(canvas),
            SceneKind::Composite => self.render_composite(canvas),
            SceneKind::Pyramid => self.render_pyramid(canvas)?,
        }
        Ok(())
    }

    fn center(canvas: &Canvas) -> PixelCoord {
        PixelCoord::new(canvas.width() as i32 / 2, canvas.height() as i32 / 2)
    }

    fn render_dda(&self, canvas: &mut Canvas) {
        let line = rasterize_line(LineAlgorithm::Dda, DDA_START, DDA_END);
        canvas.plot_prefix(line, self.revealed, COLOR_WHITE);
    }

    fn render_bresenham(&self, canvas: &mut Canvas) {
        let line = rasterize_line(
            LineAlgorithm::Bresenham,
            BRESENHAM_START.into(),
            BRESENHAM_END.into(),
        );
        canvas.plot_prefix(line, self.revealed, COLOR_BLUE);
    }

    fn render_circle(&self, canvas: &mut Canvas) -> Result<()> {
        let center = Self::center(canvas);
        let fit = center.x.min(center.y) - 10;
        let circle = MidpointCircle::new(center, CIRCLE_RADIUS.min(fit).max(0))?;
        canvas.plot_prefix(circle, self.revealed, COLOR_YELLOW);
        Ok(())
    }

    fn render_ellipse(&self, canvas: &mut Canvas) -> Result<()> {
        let center = Self::center(canvas);
        canvas.draw_axes(center, COLOR_AXIS);
        let (rx, ry) = ELLIPSE_RADII;
        let ellipse = MidpointEllipse::new(center, rx, ry)?;
        canvas.plot_prefix(ellipse, self.revealed, COLOR_MAGENTA);
        Ok(())
    }

    /// Graph vertices spread evenly across the canvas inside the padding.
    fn graph_points(canvas: &Canvas) -> Vec<Point2D> {
        let (width, height) = (canvas.width() as f64, canvas.height() as f64);
        let x_step = (width - 2.0 * GRAPH_PADDING) / (GRAPH_VALUES.len() - 1) as f64;
        let plot_height = height - 2.0 * GRAPH_PADDING;
        GRAPH_VALUES
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                Point2D::new(
                    GRAPH_PADDING + i as f64 * x_step,
                    GRAPH_PADDING + value / GRAPH_RANGE * plot_height,
                )
            })
            .collect()
    }

    fn render_line_graph(&self, canvas: &mut Canvas) {
        let corner = Point2D::new(GRAPH_PADDING, GRAPH_PADDING);
        let x_end = Point2D::new(canvas.width() as f64 - GRAPH_PADDING, GRAPH_PADDING);
        let y_end = Point2D::new(GRAPH_PADDING, canvas.height() as f64 - GRAPH_PADDING);
        canvas.draw_segment(Segment::new(corner, x_end), LineAlgorithm::Bresenham, COLOR_AXIS);
        canvas.draw_segment(Segment::new(corner, y_end), LineAlgorithm::Bresenham, COLOR_AXIS);

        let graph = Polyline::new(LineAlgorithm::Dda, Self::graph_points(canvas));
        canvas.plot_prefix(graph, self.revealed, COLOR_RED);
    }

    /// Slice outlines in order: each slice's leading spoke, then its share
    /// of the rim counter-clockwise. The reveal budget runs across slices.
    fn render_pie_chart(&self, canvas: &mut Canvas) -> Result<()> {
        let center = Self::center(canvas);
        let radius = PIE_RADIUS.min(center.x.min(center.y) - 10).max(0);

        let mut rim: Vec<(f64, PixelCoord)> = MidpointCircle::new(center, radius)?
            .map(|p| {
                let (dx, dy) = ((p.x - center.x) as f64, (p.y - center.y) as f64);
                (dy.atan2(dx).rem_euclid(TAU), p)
            })
            .collect();
        rim.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        rim.dedup_by_key(|&mut (_, p)| p);

        let total: f64 = PIE_SLICES.iter().map(|&(value, _)| value).sum();
        let mut budget = self.revealed;
        let (mut start, mut cumulative) = (0.0_f64, 0.0_f64);
        for &(value, color) in &PIE_SLICES {
            cumulative += value;
            let end = cumulative / total * TAU;
            let edge = Point2D::new(
                center.x as f64 + radius as f64 * start.cos(),
                center.y as f64 + radius as f64 * start.sin(),
            );
            let spoke = rasterize_line(self.line_algorithm, center.into(), edge);
            let arc = rim
                .iter()
                .filter(|&&(angle, _)| angle >= start && angle < end)
                .map(|&(_, p)| p);
            budget -= canvas.plot_prefix(spoke.chain(arc), budget, color);
            start = end;
        }
        Ok(())
    }

    fn render_line_clip(
        &self,
        canvas: &mut Canvas,
        clipper: LineClipAlgorithm,
        lines: &[[f64; 4]],
    ) -> Result<()> {
        let [xmin, ymin, xmax, ymax] = LINE_CLIP_WINDOW;
        let window = ClipWindow::new(xmin, ymin, xmax, ymax)?;
        canvas.draw_window(&window, COLOR_WHITE);

        for &[x1, y1, x2, y2] in lines {
            let segment = Segment::new(Point2D::new(x1, y1), Point2D::new(x2, y2));
            match clipper.clip(segment, &window) {
                LineClip::Accepted(clipped) => {
                    if !clipped.is_unchanged() {
                        canvas.draw_dotted_segment(segment, self.line_algorithm, 4, COLOR_RED);
                    }
                    canvas.draw_segment(clipped.segment, self.line_algorithm, COLOR_GREEN);
                }
                LineClip::Rejected => {
                    canvas.draw_dotted_segment(segment, self.line_algorithm, 4, COLOR_RED)
                }
            }
        }
        Ok(())
    }

    fn render_polygon_clip(&self, canvas: &mut Canvas) -> Result<()> {
        let [xmin, ymin, xmax, ymax] = POLYGON_CLIP_WINDOW;
        let window = ClipWindow::new(xmin, ymin, xmax, ymax)?;
        canvas.draw_window(&window, COLOR_WHITE);

        let polygon: Polygon = CLIP_POLYGON.iter().map(|&p| Point2D::from(p)).collect();
        for (a, b) in polygon.edges() {
            canvas.draw_dotted_segment(Segment::new(a, b), self.line_algorithm, 4, COLOR_RED);
        }
        let clipped = sutherland_hodgman(&polygon, &window);
        canvas.draw_polygon(&clipped, self.line_algorithm, COLOR_GREEN);
        Ok(())
    }

    /// Maps the unit square `[-1, 1]^2` onto the canvas, centered.
    fn unit_to_screen(canvas: &Canvas) -> Matrix2D {
        let center = Self::center(canvas);
        let half = center.x.min(center.y) as f64;
        Matrix2D::uniform_scaling(half).then(Matrix2D::translation(center.x as f64, center.y as f64))
    }

    fn draw_unit_shape(
        &self,
        canvas: &mut Canvas,
        points: &[Point2D],
        to_screen: Matrix2D,
        color: u32,
    ) {
        let polygon = Polygon::new(to_screen.apply(points));
        canvas.draw_polygon(&polygon, self.line_algorithm, color);
    }

    fn render_transform_2d(&self, canvas: &mut Canvas) {
        let to_screen = Self::unit_to_screen(canvas);
        canvas.draw_axes(Self::center(canvas), COLOR_AXIS);

        let triangle: Vec<Point2D> = TRIANGLE.iter().map(|&p| Point2D::from(p)).collect();
        let moved = self.preset_2d.matrix().apply(&triangle);
        self.draw_unit_shape(canvas, &triangle, to_screen, COLOR_WHITE);
        self.draw_unit_shape(canvas, &moved, to_screen, COLOR_BLUE);
    }

    fn render_composite(&self, canvas: &mut Canvas) {
        let to_screen = Self::unit_to_screen(canvas);
        canvas.draw_axes(Self::center(canvas), COLOR_AXIS);

        let triangle: Vec<Point2D> = COMPOSITE_TRIANGLE.iter().map(|&p| Point2D::from(p)).collect();
        self.draw_unit_shape(canvas, &triangle, to_screen, COLOR_WHITE);

        // Each stage extends the previous composite by one step.
        let stages = [
            (Matrix2D::reflection(Reflection2D::XAxis), COLOR_BLUE),
            (Matrix2D::translation(1.2, 0.0), COLOR_GREEN),
            (Matrix2D::rotation_degrees(-45.0), COLOR_YELLOW),
            (Matrix2D::shear(0.4, 0.0), COLOR_RED),
        ];
        let mut chain = Transform2D::new();
        for (step, color) in stages {
            chain.then(step);
            let moved = chain.apply(&triangle);
            self.draw_unit_shape(canvas, &moved, to_screen, color);
        }
    }

    fn render_pyramid(&self, canvas: &mut Canvas) -> Result<()> {
        let center = Self::center(canvas);
        canvas.draw_axes(center, COLOR_AXIS);

        let vertices: Vec<Point3D> = PYRAMID_VERTICES.iter().map(|&p| Point3D::from(p)).collect();
        let to_screen = Matrix2D::uniform_scaling(PYRAMID_SCALE)
            .then(Matrix2D::translation(center.x as f64, center.y as f64));

        let mut reference = Transform3D::new();
        reference.project(self.view);
        self.draw_wireframe(canvas, &reference.apply(&vertices), to_screen, COLOR_AXIS);

        let mut model = Transform3D::new();
        if let Some(preset) = self.preset_3d {
            model.then(preset.matrix()?);
        }
        model.project(self.view);
        self.draw_wireframe(canvas, &model.apply(&vertices), to_screen, COLOR_YELLOW);
        Ok(())
    }

    fn draw_wireframe(&self, canvas: &mut Canvas, projected: &[Point3D], to_screen: Matrix2D, color: u32) {
        for &(a, b) in &PYRAMID_EDGES {
            let p1 = to_screen.transform_point(projected[a].project_xy());
            let p2 = to_screen.transform_point(projected[b].project_xy());
            canvas.draw_segment(Segment::new(p1, p2), self.line_algorithm, color);
        }
    }
}
