//! Incremental line generators.
//!
//! Both generators are explicit state machines: all of their state lives in
//! plain fields, they yield pixels on demand, and a consumer can stop at any
//! point and keep a correct prefix of the line.

use std::iter::FusedIterator;

use crate::math::{PixelCoord, Point2D};

/// Digital differential analyzer over real-valued endpoints.
///
/// Advances `max(|dx|, |dy|)` rounded steps and rounds each intermediate
/// point to the nearest pixel, halves away from zero. Every pixel is
/// computed from the lexicographically smaller endpoint as
/// `origin + delta * j / steps`, never from a running sum. Walking the line
/// the other way only changes the order of `j`, so both directions round
/// bit-identical values and a reversed line visits the same pixels.
#[derive(Debug, Clone)]
pub struct DdaLine {
    origin: Point2D,
    delta: Point2D,
    /// Walks from the far endpoint back to `origin`.
    reversed: bool,
    steps: u64,
    index: u64,
    finished: bool,
}

impl DdaLine {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        let reversed = (end.x, end.y) < (start.x, start.y);
        let (origin, target) = if reversed { (end, start) } else { (start, end) };
        let delta = target - origin;
        // Saturates for spans beyond u64; NaN gives a single pixel.
        let steps = delta.x.abs().max(delta.y.abs()).round() as u64;
        log::debug!(
            "dda line ({}, {}) -> ({}, {}): {} steps",
            start.x,
            start.y,
            end.x,
            end.y,
            steps
        );
        Self {
            origin,
            delta,
            reversed,
            steps,
            index: 0,
            finished: false,
        }
    }

    /// Number of steps between the endpoints. The line has `steps + 1` pixels.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Per-step increment `(dx / steps, dy / steps)` in walking order; zero
    /// for a single pixel.
    pub fn increment(&self) -> Point2D {
        if self.steps == 0 {
            return Point2D::ORIGIN;
        }
        let step = self.delta * (1.0 / self.steps as f64);
        if self.reversed {
            Point2D::ORIGIN - step
        } else {
            step
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn pixel_at(&self, i: u64) -> PixelCoord {
        if self.steps == 0 {
            return self.origin.round();
        }
        let j = if self.reversed { self.steps - i } else { i };
        let (n, j) = (self.steps as f64, j as f64);
        Point2D::new(
            self.origin.x + self.delta.x * j / n,
            self.origin.y + self.delta.y * j / n,
        )
        .round()
    }

    fn remaining(&self) -> u64 {
        if self.finished {
            0
        } else {
            (self.steps - self.index).saturating_add(1)
        }
    }
}

impl Iterator for DdaLine {
    type Item = PixelCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let pixel = self.pixel_at(self.index);
        if self.index == self.steps {
            self.finished = true;
        } else {
            self.index += 1;
        }
        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DdaLine {}
impl FusedIterator for DdaLine {}

/// Bresenham's integer line generator.
///
/// Iterates one pixel per step along the dominant axis and decides whether
/// to also step along the minor axis from an integer decision parameter.
/// When the ideal line passes exactly through a midpoint (`p == 0`) the
/// tie goes to the candidate nearer the endpoint with the larger dominant
/// coordinate, whichever way the line is walked. That keeps a reversed line
/// on the same pixels.
#[derive(Debug, Clone)]
pub struct BresenhamLine {
    x: i32,
    y: i32,
    dx: i64,
    dy: i64,
    sx: i32,
    sy: i32,
    p: i64,
    x_major: bool,
    remaining: u64,
    emitted: u64,
}

impl BresenhamLine {
    pub fn new(start: PixelCoord, end: PixelCoord) -> Self {
        let dx = (end.x as i64 - start.x as i64).abs();
        let dy = (end.y as i64 - start.y as i64).abs();
        let sx = if end.x >= start.x { 1 } else { -1 };
        let sy = if end.y >= start.y { 1 } else { -1 };
        let x_major = dx > dy;

        let p = if x_major { 2 * dy - dx } else { 2 * dx - dy };
        // At most 2^32 pixels for any pair of i32 endpoints.
        let remaining = dx.max(dy) as u64 + 1;

        log::debug!(
            "bresenham line ({}, {}) -> ({}, {}): {} pixels, {}-major",
            start.x,
            start.y,
            end.x,
            end.y,
            remaining,
            if x_major { "x" } else { "y" }
        );

        Self {
            x: start.x,
            y: start.y,
            dx,
            dy,
            sx,
            sy,
            p,
            x_major,
            remaining,
            emitted: 0,
        }
    }

    /// Builds a line from integer-valued real endpoints, rounding each one.
    pub fn from_points(start: Point2D, end: Point2D) -> Self {
        Self::new(start.round(), end.round())
    }

    /// Current decision parameter.
    pub fn decision(&self) -> i64 {
        self.p
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    fn steps_minor(&self) -> bool {
        let forward = if self.x_major { self.sx > 0 } else { self.sy > 0 };
        self.p > 0 || (self.p == 0 && forward)
    }

    fn advance(&mut self) {
        let over = self.steps_minor();
        if self.x_major {
            self.x += self.sx;
            if over {
                self.y += self.sy;
                self.p += 2 * (self.dy - self.dx);
            } else {
                self.p += 2 * self.dy;
            }
        } else {
            self.y += self.sy;
            if over {
                self.x += self.sx;
                self.p += 2 * (self.dx - self.dy);
            } else {
                self.p += 2 * self.dx;
            }
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = PixelCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let pixel = PixelCoord::new(self.x, self.y);
        log::trace!(
            "[{:03}] pixel=({:3},{:3})  p={:3}",
            self.emitted,
            pixel.x,
            pixel.y,
            self.p
        );
        self.remaining -= 1;
        self.emitted += 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BresenhamLine {}
impl FusedIterator for BresenhamLine {}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(list: &[(i32, i32)]) -> Vec<PixelCoord> {
        list.iter().map(|&p| PixelCoord::from(p)).collect()
    }

    #[test]
    fn test_bresenham_shallow_line() {
        let pixels: Vec<_> =
            BresenhamLine::new(PixelCoord::new(0, 0), PixelCoord::new(5, 2)).collect();
        assert_eq!(
            pixels,
            px(&[(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)])
        );
    }

    #[test]
    fn test_bresenham_steep_negative_line() {
        let pixels: Vec<_> =
            BresenhamLine::new(PixelCoord::new(0, 0), PixelCoord::new(-2, -5)).collect();
        assert_eq!(pixels.len(), 6);
        assert_eq!(pixels.first(), Some(&PixelCoord::new(0, 0)));
        assert_eq!(pixels.last(), Some(&PixelCoord::new(-2, -5)));
        for w in pixels.windows(2) {
            assert_eq!(w[1].y, w[0].y - 1);
        }
    }

    #[test]
    fn test_bresenham_single_pixel() {
        let pixels: Vec<_> =
            BresenhamLine::new(PixelCoord::new(3, 3), PixelCoord::new(3, 3)).collect();
        assert_eq!(pixels, px(&[(3, 3)]));
    }

    #[test]
    fn test_bresenham_count_and_monotonic() {
        let cases = [((82, 50), (400, 500)), ((10, 10), (-30, 2)), ((0, 0), (7, 7))];
        for (a, b) in cases {
            let line = BresenhamLine::new(a.into(), b.into());
            let n = line.len();
            let pixels: Vec<_> = line.collect();
            let dx = (b.0 - a.0).abs();
            let dy = (b.1 - a.1).abs();
            assert_eq!(n, pixels.len());
            assert_eq!(pixels.len() as i32, dx.max(dy) + 1);
            for w in pixels.windows(2) {
                if dx > dy {
                    assert_eq!(w[1].x - w[0].x, (b.0 - a.0).signum());
                } else {
                    assert_eq!(w[1].y - w[0].y, (b.1 - a.1).signum());
                }
            }
        }
    }

    #[test]
    fn test_bresenham_reverse_symmetry() {
        for x1 in -4..=4 {
            for y1 in -4..=4 {
                let a = PixelCoord::new(0, 0);
                let b = PixelCoord::new(x1, y1);
                let forward: Vec<_> = BresenhamLine::new(a, b).collect();
                let mut backward: Vec<_> = BresenhamLine::new(b, a).collect();
                backward.reverse();
                assert_eq!(forward, backward, "line to ({x1}, {y1})");
            }
        }
    }

    #[test]
    fn test_bresenham_tie_breaking() {
        // (0,0)-(2,1) passes exactly through (1, 0.5).
        let forward: Vec<_> =
            BresenhamLine::new(PixelCoord::new(0, 0), PixelCoord::new(2, 1)).collect();
        assert_eq!(forward, px(&[(0, 0), (1, 1), (2, 1)]));
    }

    #[test]
    fn test_bresenham_prefix_is_stable() {
        let mut line = BresenhamLine::new(PixelCoord::new(0, 0), PixelCoord::new(5, 2));
        let prefix: Vec<_> = line.by_ref().take(3).collect();
        assert_eq!(prefix, px(&[(0, 0), (1, 0), (2, 1)]));
        assert_eq!(line.len(), 3);
        assert!(!line.is_finished());
        assert_eq!(line.count(), 3);
    }

    #[test]
    fn test_dda_zero_length() {
        let pixels: Vec<_> = DdaLine::new(Point2D::new(2.4, 2.6), Point2D::new(2.4, 2.6)).collect();
        assert_eq!(pixels, px(&[(2, 3)]));
    }

    #[test]
    fn test_dda_matches_expected_pixels() {
        let line = DdaLine::new(Point2D::new(0.0, 0.0), Point2D::new(4.0, 2.0));
        assert_eq!(line.steps(), 4);
        assert_eq!(line.increment(), Point2D::new(1.0, 0.5));
        let pixels: Vec<_> = line.collect();
        assert_eq!(pixels, px(&[(0, 0), (1, 1), (2, 1), (3, 2), (4, 2)]));
    }

    #[test]
    fn test_dda_reverse_symmetry() {
        for x1 in -6..=6 {
            for y1 in -6..=6 {
                let a = Point2D::new(1.0, -2.0);
                let b = Point2D::new(x1 as f64, y1 as f64);
                let forward: Vec<_> = DdaLine::new(a, b).collect();
                let mut backward: Vec<_> = DdaLine::new(b, a).collect();
                backward.reverse();
                assert_eq!(forward, backward, "line to ({x1}, {y1})");
            }
        }
    }

    #[test]
    fn test_dda_reverse_symmetry_off_grid() {
        // Quarter-pixel grid offset by 0.1, so intermediate points land on
        // exact halves.
        let coords: Vec<f64> = (0..41).map(|k| -4.9 + 0.25 * k as f64).collect();
        let points: Vec<Point2D> = coords
            .iter()
            .step_by(3)
            .flat_map(|&x| coords.iter().step_by(2).map(move |&y| Point2D::new(x, y)))
            .collect();
        for &a in &points {
            for &b in &points {
                let forward: Vec<_> = DdaLine::new(a, b).collect();
                let mut backward: Vec<_> = DdaLine::new(b, a).collect();
                backward.reverse();
                assert_eq!(forward, backward, "{a:?} -> {b:?}");
            }
        }

        let a = Point2D::new(-4.9, -4.9);
        let b = Point2D::new(2.1, 5.1);
        let forward: Vec<_> = DdaLine::new(a, b).collect();
        let backward: Vec<_> = DdaLine::new(b, a).collect();
        assert_eq!(forward[3], backward[backward.len() - 4]);
    }

    #[test]
    fn test_dda_increment_follows_walk_direction() {
        let line = DdaLine::new(Point2D::new(4.0, 2.0), Point2D::new(0.0, 0.0));
        assert_eq!(line.increment(), Point2D::new(-1.0, -0.5));
        let pixels: Vec<_> = line.collect();
        assert_eq!(pixels.first(), Some(&PixelCoord::new(4, 2)));
        assert_eq!(pixels.last(), Some(&PixelCoord::new(0, 0)));
    }

    #[test]
    fn test_huge_lines_yield_a_prefix() {
        let mut dda = DdaLine::new(Point2D::new(0.0, 0.0), Point2D::new(5e9, 0.0));
        assert_eq!(dda.steps(), 5_000_000_000);
        let prefix: Vec<_> = dda.by_ref().take(3).collect();
        assert_eq!(prefix, px(&[(0, 0), (1, 0), (2, 0)]));
        assert!(!dda.is_finished());

        let far = DdaLine::new(Point2D::new(0.0, 0.0), Point2D::new(1e30, 0.0));
        assert_eq!(far.take(2).count(), 2);

        let mut bresenham =
            BresenhamLine::new(PixelCoord::new(i32::MIN, 0), PixelCoord::new(i32::MAX, 0));
        assert_eq!(bresenham.size_hint().0 as u64, 1 << 32);
        let prefix: Vec<_> = bresenham.by_ref().take(2).collect();
        assert_eq!(prefix, px(&[(i32::MIN, 0), (i32::MIN + 1, 0)]));

        let diagonal =
            BresenhamLine::new(PixelCoord::new(i32::MAX, i32::MAX), PixelCoord::new(i32::MIN, i32::MIN));
        assert_eq!(diagonal.take(2).last(), Some(PixelCoord::new(i32::MAX - 1, i32::MAX - 1)));
    }

    #[test]
    fn test_dda_monotonic_along_dominant_axis() {
        let pixels: Vec<_> = DdaLine::new(Point2D::new(100.0, 100.0), Point2D::new(900.0, 500.0)).collect();
        assert_eq!(pixels.len(), 801);
        for w in pixels.windows(2) {
            assert_eq!(w[1].x - w[0].x, 1);
            assert!(w[1].y >= w[0].y);
        }
        assert_eq!(pixels.last(), Some(&PixelCoord::new(900, 500)));
    }
}
