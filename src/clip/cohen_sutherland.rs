use super::{ClipEdge, ClipWindow, ClippedSegment, LineClip, Outcode, Segment};

/// Upper bound on endpoint relocations: each endpoint crosses at most two
/// boundaries before it is inside or the segment is rejected.
const MAX_CLIP_STEPS: usize = 4;

/// Boundary to clip against for an outside endpoint, TOP first, then
/// BOTTOM, RIGHT and LEFT.
fn priority_edge(code: Outcode) -> ClipEdge {
    if code.contains(Outcode::TOP) {
        ClipEdge::Top
    } else if code.contains(Outcode::BOTTOM) {
        ClipEdge::Bottom
    } else if code.contains(Outcode::RIGHT) {
        ClipEdge::Right
    } else {
        ClipEdge::Left
    }
}

/// Cohen-Sutherland line clipping.
///
/// Trivially accepts when both outcodes are zero, trivially rejects when
/// they share a bit, and otherwise moves one outside endpoint onto the
/// highest-priority boundary it violates and tries again.
pub fn cohen_sutherland(segment: Segment, window: &ClipWindow) -> LineClip {
    clip_with_limit(segment, window, MAX_CLIP_STEPS)
}

/// Cohen-Sutherland with at most `max_steps` endpoint relocations. A segment
/// that still straddles the window after the last one is rejected.
fn clip_with_limit(segment: Segment, window: &ClipWindow, max_steps: usize) -> LineClip {
    let Segment { mut p1, mut p2 } = segment;
    let mut code1 = window.outcode(p1);
    let mut code2 = window.outcode(p2);
    let mut start_kept = true;
    let mut end_kept = true;

    for step in 0..=max_steps {
        if code1.is_inside() && code2.is_inside() {
            return LineClip::Accepted(ClippedSegment {
                segment: Segment::new(p1, p2),
                start_kept,
                end_kept,
            });
        }
        if !(code1 & code2).is_inside() {
            log::trace!("cohen-sutherland: rejected, shared outcode {:#06b}", (code1 & code2).bits());
            return LineClip::Rejected;
        }
        if step == max_steps {
            break;
        }

        let clip_start = !code1.is_inside();
        let edge = priority_edge(if clip_start { code1 } else { code2 });

        // A shared outside bit would have been rejected above, so the
        // segment is never parallel to `edge` here.
        let Some(hit) = edge.intersection(window, p1, p2) else {
            log::trace!("cohen-sutherland: parallel to {edge:?}, rejected");
            return LineClip::Rejected;
        };
        log::trace!("cohen-sutherland: clipped against {edge:?} at ({}, {})", hit.x, hit.y);

        if clip_start {
            p1 = hit;
            code1 = window.outcode(p1);
            start_kept = false;
        } else {
            p2 = hit;
            code2 = window.outcode(p2);
            end_kept = false;
        }
    }

    log::warn!(
        "cohen-sutherland: ({}, {}) -> ({}, {}) still outside after {max_steps} relocations, rejected",
        p1.x,
        p1.y,
        p2.x,
        p2.y
    );
    LineClip::Rejected
}
