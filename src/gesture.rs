// Turns per-frame fingertip landmarks into pinch events.
//
// The thumb-index pair is the pointer: it produces a start/move/end stream.
// Thumb-middle, thumb-ring and thumb-pinky are command triggers (undo, redo,
// clear) and only count while the pointer pinch is open.

use crate::types::{Fingertip, LandmarkSample, Point};

/// Thumb-to-fingertip distance (normalized) below which a pair is engaged.
pub const PINCH_THRESHOLD: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryKind {
    Undo,
    Redo,
    Clear,
}

/// Evaluated in this order, so a frame with several pairs closed emits
/// undo before redo before clear.
const SECONDARY_PAIRS: [(Fingertip, SecondaryKind); 3] = [
    (Fingertip::Middle, SecondaryKind::Undo),
    (Fingertip::Ring, SecondaryKind::Redo),
    (Fingertip::Pinky, SecondaryKind::Clear),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    PinchStart(Point),
    PinchMove { from: Point, to: Point },
    PinchEnd,
    SecondaryTrigger(SecondaryKind),
}

pub struct GestureClassifier {
    threshold: f32,
    width: u32,
    height: u32,
    last_point: Option<Point>,
}

impl GestureClassifier {
    /// `width`/`height` are the canvas size used to scale pinch points.
    pub fn new(threshold: f32, width: u32, height: u32) -> Self {
        Self { threshold, width, height, last_point: None }
    }

    #[cfg(test)]
    pub fn last_point(&self) -> Option<Point> {
        self.last_point
    }

    fn engaged(&self, hand: &LandmarkSample, finger: Fingertip) -> bool {
        hand.thumb_distance(finger) < self.threshold
    }

    /// Canvas position of the pointer pinch: thumb/index midpoint, truncated.
    fn pinch_point(&self, hand: &LandmarkSample) -> Point {
        let mid = hand.tip(Fingertip::Thumb).midpoint(hand.tip(Fingertip::Index));
        Point::new(
            (mid.x * self.width as f32) as i32,
            (mid.y * self.height as f32) as i32,
        )
    }

    /// Classify one frame. `prev_pinching` is whether the pointer pinch was
    /// engaged on the previous frame; the second return value is the same flag
    /// for this frame.
    ///
    /// A frame with no hand is a fully open hand.
    pub fn classify(
        &mut self,
        sample: Option<&LandmarkSample>,
        prev_pinching: bool,
    ) -> (Vec<GestureEvent>, bool) {
        let mut events = Vec::new();

        let Some(hand) = sample else {
            if prev_pinching {
                events.push(GestureEvent::PinchEnd);
            }
            self.last_point = None;
            return (events, false);
        };

        if self.engaged(hand, Fingertip::Index) {
            let point = self.pinch_point(hand);
            match self.last_point {
                Some(from) if prev_pinching => {
                    events.push(GestureEvent::PinchMove { from, to: point })
                }
                _ => events.push(GestureEvent::PinchStart(point)),
            }
            self.last_point = Some(point);
            return (events, true);
        }

        if prev_pinching {
            events.push(GestureEvent::PinchEnd);
        }
        self.last_point = None;

        // Level-triggered: a held pair fires again on every frame.
        for (finger, kind) in SECONDARY_PAIRS {
            if self.engaged(hand, finger) {
                events.push(GestureEvent::SecondaryTrigger(kind));
            }
        }

        (events, false)
    }
}
