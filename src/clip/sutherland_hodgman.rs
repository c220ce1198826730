//! Sutherland-Hodgman polygon clipping against a [`ClipWindow`].

use super::{ClipEdge, ClipWindow};
use crate::math::Point2D;

/// A polygon as an ordered, implicitly closed list of vertices.
///
/// Vertex order defines the edges and the winding. Any number of vertices
/// is allowed, including none.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    vertices: Vec<Point2D>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point2D>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Point2D> {
        self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True once the polygon has been clipped away entirely.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Closed edge list: `(v0, v1), (v1, v2), .., (vn, v0)`.
    pub fn edges(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Clip this polygon against a single boundary of `window`.
    ///
    /// Each vertex is paired with its cyclic predecessor. An inside vertex
    /// is emitted after the entering intersection if the predecessor was
    /// outside; an outside vertex contributes only the leaving intersection.
    pub fn clip_against_edge(&self, edge: ClipEdge, window: &ClipWindow) -> Self {
        if self.vertices.is_empty() {
            return Self::default();
        }

        let n = self.vertices.len();
        let mut output = Vec::with_capacity(n + 2);

        for i in 0..n {
            let current = self.vertices[i];
            let previous = self.vertices[(i + n - 1) % n];

            let current_inside = edge.inside(window, current);
            let previous_inside = edge.inside(window, previous);

            if current_inside {
                if !previous_inside {
                    // Entering: the two vertices straddle the boundary, so
                    // the edge is not parallel to it.
                    output.extend(edge.intersection(window, previous, current));
                }
                output.push(current);
            } else if previous_inside {
                // Leaving
                output.extend(edge.intersection(window, previous, current));
            }
        }

        Self { vertices: output }
    }

    /// Translate every vertex. Mostly useful for building test shapes.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.vertices
                .iter()
                .map(|&p| p + Point2D::new(dx, dy))
                .collect(),
        )
    }
}

impl From<Vec<Point2D>> for Polygon {
    fn from(vertices: Vec<Point2D>) -> Self {
        Self::new(vertices)
    }
}

impl FromIterator<Point2D> for Polygon {
    fn from_iter<I: IntoIterator<Item = Point2D>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Clip `polygon` to `window`, half-plane by half-plane in the order
/// LEFT, RIGHT, BOTTOM, TOP.
///
/// Returns an empty polygon when nothing is inside. A polygon already
/// inside the window comes back with the identical vertex sequence.
pub fn sutherland_hodgman(polygon: &Polygon, window: &ClipWindow) -> Polygon {
    let mut result = polygon.clone();

    for edge in ClipEdge::ALL {
        if result.is_empty() {
            break;
        }
        result = result.clip_against_edge(edge, window);
        log::trace!("sutherland-hodgman: {} vertices after {edge:?}", result.len());
    }

    log::debug!(
        "sutherland-hodgman: {} vertices in, {} out",
        polygon.len(),
        result.len()
    );
    result
}
