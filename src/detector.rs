// Hand landmark source. The painter only needs five fingertip positions per
// frame; anything that can produce them plugs in behind `HandDetector`.

use crate::types::{Fingertip, FrameBuffer, LandmarkSample, NormPoint};

pub trait HandDetector {
    /// Fingertips of at most one hand in `frame`, normalized to [0,1].
    fn detect(&mut self, frame: &FrameBuffer) -> Option<LandmarkSample>;
}

/// Pointer state for one frame, in normalized view coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub pos: NormPoint,
    /// Thumb closed onto the index finger.
    pub pinch: bool,
    /// Thumb closed onto one of the command fingers.
    pub held: Option<Fingertip>,
}

// Resting fingertip offsets from the index tip. Far enough apart that only
// the finger the thumb is placed on registers as engaged.
const THUMB_OPEN: (f32, f32) = (-0.12, 0.08);
const MIDDLE_REST: (f32, f32) = (0.0, -0.12);
const RING_REST: (f32, f32) = (0.09, -0.09);
const PINKY_REST: (f32, f32) = (0.16, -0.02);

/// Stand-in detector driven by the mouse and keyboard: the index tip follows
/// the pointer, and buttons/keys close the thumb onto a finger.
#[derive(Default)]
pub struct PointerHand {
    input: Option<PointerInput>,
}

impl PointerHand {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` means the pointer left the camera view: no hand this frame.
    pub fn set_input(&mut self, input: Option<PointerInput>) {
        self.input = input;
    }

    fn synthesize(input: PointerInput) -> LandmarkSample {
        let index = input.pos;
        let at = |(dx, dy): (f32, f32)| NormPoint::new(index.x + dx, index.y + dy);

        let thumb = if input.pinch {
            index
        } else {
            match input.held {
                Some(Fingertip::Middle) => at(MIDDLE_REST),
                Some(Fingertip::Ring) => at(RING_REST),
                Some(Fingertip::Pinky) => at(PINKY_REST),
                _ => at(THUMB_OPEN),
            }
        };

        LandmarkSample::new(thumb, index, at(MIDDLE_REST), at(RING_REST), at(PINKY_REST))
    }
}

impl HandDetector for PointerHand {
    fn detect(&mut self, _frame: &FrameBuffer) -> Option<LandmarkSample> {
        self.input.map(Self::synthesize)
    }
}
