// Per-frame orchestration: landmarks in, painted surface out.
//
// The controller owns the brush, the surface and the history outright; the
// window code only reads the surface back for compositing.

use log::{debug, info};

use crate::brush::{BrushColor, BrushEngine, BrushMode, BrushState};
use crate::gesture::{GestureClassifier, GestureEvent, SecondaryKind};
use crate::history::HistoryManager;
use crate::surface::DrawingSurface;
use crate::types::{LandmarkSample, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Drawing,
}

/// Discrete commands from the toolbar. Applied in any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    SelectColor([u8; 3]),
    SelectRainbow,
    SelectMode(BrushMode),
    ToggleEraser,
    SizeUp,
    SizeDown,
    Undo,
    Redo,
    Clear,
}

impl From<SecondaryKind> for UiCommand {
    fn from(kind: SecondaryKind) -> Self {
        match kind {
            SecondaryKind::Undo => UiCommand::Undo,
            SecondaryKind::Redo => UiCommand::Redo,
            SecondaryKind::Clear => UiCommand::Clear,
        }
    }
}

pub struct SessionSettings {
    pub pinch_threshold: f32,
    pub brush_size: u32,
    pub size_step: u32,
    pub rainbow_step: u16,
    pub eraser_color: [u8; 3],
    pub history_capacity: usize,
    pub spray_seed: Option<u64>,
}

pub struct SessionController {
    classifier: GestureClassifier,
    brush: BrushState,
    engine: BrushEngine,
    history: HistoryManager,
    surface: DrawingSurface,
    state: SessionState,
    last_point: Option<Point>,
    size_step: u32,
}

impl SessionController {
    pub fn new(width: u32, height: u32, settings: &SessionSettings) -> Self {
        Self {
            classifier: GestureClassifier::new(settings.pinch_threshold, width, height),
            brush: BrushState::new(
                settings.brush_size,
                settings.rainbow_step,
                settings.eraser_color,
            ),
            engine: BrushEngine::new(settings.spray_seed),
            history: HistoryManager::new(settings.history_capacity),
            surface: DrawingSurface::new(width, height),
            state: SessionState::Idle,
            last_point: None,
            size_step: settings.size_step,
        }
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn brush(&self) -> &BrushState {
        &self.brush
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn last_point(&self) -> Option<Point> {
        self.last_point
    }

    /// Run one frame: classify `sample` (None = no hand) and apply every
    /// resulting event in order. Returns the events for the caller's HUD/logs.
    pub fn tick(&mut self, sample: Option<&LandmarkSample>) -> Vec<GestureEvent> {
        let drawing = self.state == SessionState::Drawing;
        let (events, _pinching) = self.classifier.classify(sample, drawing);
        for &event in &events {
            self.handle_event(event);
        }
        events
    }

    pub fn handle_event(&mut self, event: GestureEvent) {
        match (self.state, event) {
            (SessionState::Idle, GestureEvent::PinchStart(at)) => {
                debug!("stroke start at ({}, {})", at.x, at.y);
                self.history.snapshot_before_change(&self.surface);
                self.paint_step(at, at);
                self.last_point = Some(at);
                self.state = SessionState::Drawing;
            }
            (SessionState::Drawing, GestureEvent::PinchMove { from, to }) => {
                let from = self.last_point.unwrap_or(from);
                self.paint_step(from, to);
                self.last_point = Some(to);
            }
            (SessionState::Drawing, GestureEvent::PinchEnd) => {
                debug!("stroke end");
                self.last_point = None;
                self.state = SessionState::Idle;
            }
            (SessionState::Idle, GestureEvent::SecondaryTrigger(kind)) => {
                self.apply(kind.into());
            }
            (state, event) => {
                debug!("ignoring {event:?} while {state:?}");
            }
        }
    }

    /// Dispatch a toolbar (or gesture-triggered) command.
    pub fn apply(&mut self, command: UiCommand) {
        debug!("command {command:?}");
        match command {
            UiCommand::SelectColor(rgb) => self.brush.set_color(BrushColor::Solid(rgb)),
            UiCommand::SelectRainbow => self.brush.set_color(BrushColor::Rainbow),
            UiCommand::SelectMode(mode) => self.brush.set_mode(mode),
            UiCommand::ToggleEraser => self.brush.set_eraser(!self.brush.eraser()),
            UiCommand::SizeUp => self.brush.grow(self.size_step),
            UiCommand::SizeDown => self.brush.shrink(self.size_step),
            UiCommand::Undo => {
                if !self.history.undo(&mut self.surface) {
                    debug!("nothing to undo");
                }
            }
            UiCommand::Redo => {
                if !self.history.redo(&mut self.surface) {
                    debug!("nothing to redo");
                }
            }
            UiCommand::Clear => {
                self.history.clear_and_snapshot(&mut self.surface);
                info!("canvas cleared ({} undo steps)", self.history.undo_len());
            }
        }
    }

    fn paint_step(&mut self, from: Point, to: Point) {
        let color = self.brush.next_color();
        self.engine.paint(
            &mut self.surface,
            self.brush.mode(),
            from,
            to,
            color,
            self.brush.size(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Fingertip, NormPoint, BLUE, RED, WEBCAM_HEIGHT, WEBCAM_WIDTH, WHITE};
    use crate::surface::TRANSPARENT;
    use image::Rgba;

    const OPAQUE_RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn settings() -> SessionSettings {
        SessionSettings {
            pinch_threshold: 0.05,
            brush_size: 10,
            size_step: 2,
            rainbow_step: 5,
            eraser_color: WHITE,
            history_capacity: 20,
            spray_seed: Some(42),
        }
    }

    fn session() -> SessionController {
        SessionController::new(WEBCAM_WIDTH, WEBCAM_HEIGHT, &settings())
    }

    /// Hand whose thumb and index meet at canvas pixel (x, y).
    fn pinch_at(x: f32, y: f32) -> LandmarkSample {
        let p = NormPoint::new(x / WEBCAM_WIDTH as f32, y / WEBCAM_HEIGHT as f32);
        let far = NormPoint::new(1.0, 1.0);
        LandmarkSample::new(p, p, far, far, far)
    }

    fn open_hand() -> LandmarkSample {
        let thumb = NormPoint::new(0.5, 0.5);
        let far = NormPoint::new(0.9, 0.9);
        LandmarkSample::new(thumb, far, far, far, far)
    }

    fn holding(finger: Fingertip) -> LandmarkSample {
        let thumb = NormPoint::new(0.5, 0.5);
        let far = NormPoint::new(0.9, 0.9);
        let tip = |f: Fingertip| if f == finger { thumb } else { far };
        LandmarkSample::new(
            thumb,
            far,
            tip(Fingertip::Middle),
            tip(Fingertip::Ring),
            tip(Fingertip::Pinky),
        )
    }

    /// One full stroke through the classifier.
    fn stroke(s: &mut SessionController, points: &[(f32, f32)]) {
        for &(x, y) in points {
            s.tick(Some(&pinch_at(x, y)));
        }
        s.tick(Some(&open_hand()));
    }

    #[test]
    fn pen_stroke_scenario() {
        let mut s = session();
        s.apply(UiCommand::SelectColor(RED));

        s.handle_event(GestureEvent::PinchStart(Point::new(100, 100)));
        assert_eq!(s.history().undo_len(), 1);
        assert_eq!(s.state(), SessionState::Drawing);

        s.handle_event(GestureEvent::PinchMove {
            from: Point::new(100, 100),
            to: Point::new(110, 100),
        });
        assert_eq!(s.last_point(), Some(Point::new(110, 100)));

        s.handle_event(GestureEvent::PinchEnd);
        assert_eq!(s.last_point(), None);
        assert_eq!(s.state(), SessionState::Idle);

        for x in 100..=110 {
            assert_eq!(s.surface().pixel(x, 100), Some(OPAQUE_RED));
        }
        assert_eq!(s.surface().pixel(105, 105), Some(OPAQUE_RED));
        assert_eq!(s.surface().pixel(105, 106), Some(TRANSPARENT));
        assert_eq!(s.surface().pixel(105, 95), Some(TRANSPARENT));

        // the one snapshot is the blank canvas from before the first paint
        s.apply(UiCommand::Undo);
        assert!(s.surface().is_blank());
    }

    #[test]
    fn one_snapshot_per_stroke() {
        let mut s = session();
        let path: Vec<(f32, f32)> = (0..30).map(|i| (50.0 + i as f32 * 4.0, 200.0)).collect();
        stroke(&mut s, &path);
        assert_eq!(s.history().undo_len(), 1);

        stroke(&mut s, &path[..3]);
        assert_eq!(s.history().undo_len(), 2);
        assert!(!s.surface().is_blank());
    }

    #[test]
    fn secondary_triggers_only_when_idle() {
        let mut s = session();
        s.handle_event(GestureEvent::PinchStart(Point::new(10, 10)));
        s.handle_event(GestureEvent::SecondaryTrigger(SecondaryKind::Clear));
        assert!(!s.surface().is_blank());
        assert_eq!(s.history().undo_len(), 1);

        s.handle_event(GestureEvent::PinchEnd);
        s.handle_event(GestureEvent::SecondaryTrigger(SecondaryKind::Clear));
        assert!(s.surface().is_blank());
        assert_eq!(s.history().undo_len(), 2);
    }

    #[test]
    fn gesture_undo_redo_roundtrip() {
        let mut s = session();
        stroke(&mut s, &[(100.0, 100.0), (140.0, 120.0)]);
        let drawn = s.surface().clone();

        s.tick(Some(&holding(Fingertip::Middle)));
        assert!(s.surface().is_blank());
        s.tick(Some(&holding(Fingertip::Ring)));
        assert_eq!(s.surface(), &drawn);
    }

    #[test]
    fn held_undo_repeats_each_frame() {
        let mut s = session();
        for y in [50.0, 100.0, 150.0] {
            stroke(&mut s, &[(60.0, y)]);
        }
        assert_eq!(s.history().undo_len(), 3);
        for _ in 0..5 {
            s.tick(Some(&holding(Fingertip::Middle)));
        }
        assert_eq!(s.history().undo_len(), 0);
        assert_eq!(s.history().redo_len(), 3);
        assert!(s.surface().is_blank());
    }

    #[test]
    fn clear_button_is_undoable() {
        let mut s = session();
        stroke(&mut s, &[(300.0, 300.0), (320.0, 330.0)]);
        let before = s.surface().clone();

        s.apply(UiCommand::Clear);
        assert!(s.surface().is_blank());
        s.apply(UiCommand::Undo);
        assert_eq!(s.surface(), &before);
    }

    #[test]
    fn losing_hand_ends_stroke() {
        let mut s = session();
        s.tick(Some(&pinch_at(10.0, 10.0)));
        assert_eq!(s.state(), SessionState::Drawing);
        let events = s.tick(None);
        assert_eq!(events, vec![GestureEvent::PinchEnd]);
        assert_eq!(s.state(), SessionState::Idle);
    }

    #[test]
    fn ui_commands_update_brush() {
        let mut s = session();
        s.apply(UiCommand::SelectMode(BrushMode::Square));
        s.apply(UiCommand::SizeUp);
        s.apply(UiCommand::ToggleEraser);
        assert_eq!(s.brush().mode(), BrushMode::Square);
        assert_eq!(s.brush().size(), 12);
        assert!(s.brush().eraser());

        s.apply(UiCommand::SelectColor(BLUE));
        assert!(!s.brush().eraser());
        assert_eq!(s.brush().color(), BrushColor::Solid(BLUE));

        for _ in 0..10 {
            s.apply(UiCommand::SizeDown);
        }
        assert_eq!(s.brush().size(), 1);
    }

    #[test]
    fn eraser_paints_background_color() {
        let mut s = session();
        s.apply(UiCommand::SelectMode(BrushMode::Circle));
        stroke(&mut s, &[(200.0, 200.0)]);
        s.apply(UiCommand::ToggleEraser);
        stroke(&mut s, &[(200.0, 200.0)]);
        assert_eq!(s.surface().pixel(200, 200), Some(Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn rainbow_advances_per_painted_frame() {
        let mut s = session();
        s.apply(UiCommand::SelectRainbow);
        stroke(&mut s, &[(10.0, 240.0), (20.0, 240.0), (30.0, 240.0)]);
        assert_eq!(s.brush().hue(), 15);

        // the last segment was painted at hue 10: still red-dominant, not pure red
        let tail = s.surface().pixel(35, 240).unwrap();
        assert_eq!(tail[3], 255);
        assert_eq!(tail[0], 255);
        assert_ne!(tail, OPAQUE_RED);
    }
}
