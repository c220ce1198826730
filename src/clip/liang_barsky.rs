use super::{ClipWindow, ClippedSegment, LineClip, Segment};

/// Parametric interval `[u1, u2]` of `segment` that lies inside `window`,
/// where `p(u) = p1 + u * (p2 - p1)`. `None` when nothing is inside.
pub fn liang_barsky_interval(segment: Segment, window: &ClipWindow) -> Option<(f64, f64)> {
    let Segment { p1, p2 } = segment;
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;

    let p = [-dx, dx, -dy, dy];
    let q = [
        p1.x - window.xmin(),
        window.xmax() - p1.x,
        p1.y - window.ymin(),
        window.ymax() - p1.y,
    ];

    let mut u1 = 0.0f64;
    let mut u2 = 1.0f64;

    for (&pk, &qk) in p.iter().zip(q.iter()) {
        if pk == 0.0 {
            // Parallel to this boundary: either wholly outside or irrelevant.
            if qk < 0.0 {
                log::trace!("liang-barsky: parallel and outside, rejected");
                return None;
            }
        } else {
            let u = qk / pk;
            if pk < 0.0 {
                u1 = u1.max(u);
            } else {
                u2 = u2.min(u);
            }
        }
    }

    if u1 > u2 {
        log::trace!("liang-barsky: empty interval [{u1}, {u2}], rejected");
        return None;
    }
    Some((u1, u2))
}

/// Liang-Barsky line clipping.
///
/// The accepted segment is the original evaluated at `u1` and `u2`; an
/// endpoint counts as kept when its parameter was not tightened.
pub fn liang_barsky(segment: Segment, window: &ClipWindow) -> LineClip {
    match liang_barsky_interval(segment, window) {
        Some((u1, u2)) => LineClip::Accepted(ClippedSegment {
            segment: Segment::new(
                segment.p1.lerp(segment.p2, u1),
                segment.p1.lerp(segment.p2, u2),
            ),
            start_kept: u1 == 0.0,
            end_kept: u2 == 1.0,
        }),
        None => LineClip::Rejected,
    }
}
