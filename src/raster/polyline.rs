use std::iter::FusedIterator;

use super::{rasterize_line, LineAlgorithm, LinePixels};
use crate::math::{PixelCoord, Point2D};

/// Pixels of an open polyline, one segment after another.
///
/// A segment's first pixel is dropped when it repeats the last pixel of the
/// previous segment, so every joint is emitted once. A single vertex gives
/// one pixel and no vertices give none.
#[derive(Debug, Clone)]
pub struct Polyline {
    algorithm: LineAlgorithm,
    vertices: Vec<Point2D>,
    /// Index of the end vertex of the next segment to start.
    next_vertex: usize,
    current: Option<LinePixels>,
    last: Option<PixelCoord>,
}

impl Polyline {
    pub fn new(algorithm: LineAlgorithm, vertices: Vec<Point2D>) -> Self {
        log::debug!("{algorithm} polyline through {} vertices", vertices.len());
        let current = match vertices.as_slice() {
            [only] => Some(rasterize_line(algorithm, *only, *only)),
            _ => None,
        };
        Self {
            algorithm,
            vertices,
            next_vertex: 1,
            current,
            last: None,
        }
    }

    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    pub fn is_finished(&self) -> bool {
        self.current.is_none() && self.next_vertex >= self.vertices.len()
    }

    /// Starts the next segment. Returns false once every segment was walked.
    fn start_segment(&mut self) -> bool {
        let Some(&end) = self.vertices.get(self.next_vertex) else {
            return false;
        };
        let start = self.vertices[self.next_vertex - 1];
        self.next_vertex += 1;
        log::trace!(
            "polyline segment {}: ({}, {}) -> ({}, {})",
            self.next_vertex - 2,
            start.x,
            start.y,
            end.x,
            end.y
        );

        let mut line = rasterize_line(self.algorithm, start, end);
        if self.last.is_some() {
            let mut peek = line.clone();
            if peek.next() == self.last {
                line = peek;
            }
        }
        self.current = Some(line);
        true
    }
}

impl Iterator for Polyline {
    type Item = PixelCoord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pixel) = self.current.as_mut().and_then(Iterator::next) {
                self.last = Some(pixel);
                return Some(pixel);
            }
            self.current = None;
            if !self.start_segment() {
                return None;
            }
        }
    }
}

impl FusedIterator for Polyline {}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(list: &[(f64, f64)]) -> Vec<Point2D> {
        list.iter().map(|&p| Point2D::from(p)).collect()
    }

    #[test]
    fn test_joints_are_emitted_once() {
        let vertices = points(&[(0.0, 0.0), (5.0, 2.0), (9.0, 8.0), (12.0, 8.0)]);
        for algorithm in [LineAlgorithm::Dda, LineAlgorithm::Bresenham] {
            let pixels: Vec<_> = Polyline::new(algorithm, vertices.clone()).collect();
            // 6 + 7 + 4 pixels per segment, minus two shared joints.
            assert_eq!(pixels.len(), 15, "{algorithm}");
            for w in pixels.windows(2) {
                assert_ne!(w[0], w[1], "{algorithm} repeats {:?}", w[0]);
            }
            assert_eq!(pixels.first(), Some(&PixelCoord::new(0, 0)));
            assert_eq!(pixels.last(), Some(&PixelCoord::new(12, 8)));
            assert!(pixels.contains(&PixelCoord::new(5, 2)));
            assert!(pixels.contains(&PixelCoord::new(9, 8)));
        }
    }

    #[test]
    fn test_matches_concatenated_segments() {
        let vertices = points(&[(80.0, 212.0), (144.0, 278.0), (208.0, 278.0), (272.0, 366.0)]);
        let mut expected: Vec<PixelCoord> = Vec::new();
        for pair in vertices.windows(2) {
            let line = rasterize_line(LineAlgorithm::Dda, pair[0], pair[1]);
            let skip = usize::from(!expected.is_empty());
            expected.extend(line.skip(skip));
        }
        let pixels: Vec<_> = Polyline::new(LineAlgorithm::Dda, vertices).collect();
        assert_eq!(pixels, expected);
    }

    #[test]
    fn test_short_polylines() {
        assert_eq!(Polyline::new(LineAlgorithm::Dda, Vec::new()).count(), 0);

        let single: Vec<_> =
            Polyline::new(LineAlgorithm::Bresenham, points(&[(2.4, 3.6)])).collect();
        assert_eq!(single, vec![PixelCoord::new(2, 4)]);

        let segment = Polyline::new(LineAlgorithm::Bresenham, points(&[(0.0, 0.0), (3.0, 0.0)]));
        assert_eq!(segment.count(), 4);
    }

    #[test]
    fn test_prefix_is_stable() {
        let vertices = points(&[(0.0, 0.0), (4.0, 4.0), (8.0, 0.0)]);
        let mut line = Polyline::new(LineAlgorithm::Bresenham, vertices);
        let prefix: Vec<_> = line.by_ref().take(6).collect();
        assert_eq!(prefix.last(), Some(&PixelCoord::new(5, 3)));
        assert!(!line.is_finished());
        assert_eq!(line.count(), 3);
    }
}
