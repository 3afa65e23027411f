//! # hand_stroke
//!
//! Gesture classification and pen-stroke state machine for finger painting.
//!
//! A hand-landmark detector delivers 21 normalized keypoints per detected
//! hand, once per video frame.  This crate turns those frames — gated by an
//! activation key — into a stream of [`StrokeCommand`]s for a rendering
//! surface to consume:
//!
//! * **PenDown** — start a stroke (dot at the fingertip),
//! * **LineTo**  — continue the stroke from the previous point,
//! * **PenUp**   — end the stroke.
//!
//! ## Drawing gesture
//!
//! | Condition | Test |
//! |---|---|
//! | Index finger extended | `indexTip.y < indexPip.y` (smaller y = higher) |
//! | Middle finger folded  | `middleTip.y > middlePip.y` |
//! | Activation key held   | hard AND-gate; release pens up immediately |
//!
//! Classification is re-evaluated from raw coordinates every frame — there
//! is no hysteresis or smoothing, so jitter near a boundary flickers the
//! stroke.  Each detected hand slot tracks its own independent stroke.
//!
//! ## Quick start
//!
//! ```rust
//! use hand_stroke::{LandmarkSet, StrokeCommand, StrokeController};
//!
//! let mut ctl = StrokeController::new(640.0, 480.0);
//! let hand = LandmarkSet::pointing_at(0.5, 0.3);
//!
//! let out = ctl.process_frame(std::slice::from_ref(&hand), true);
//! assert!(matches!(out[0].command, StrokeCommand::PenDown(_)));
//!
//! // Key released between frames → immediate pen-up, no frame needed.
//! let out = ctl.key_released();
//! assert!(matches!(out[0].command, StrokeCommand::PenUp));
//! ```

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices — the detector's anatomical convention
// ════════════════════════════════════════════════════════════════════════════

/// Number of keypoints the detector reports per hand.
pub const LANDMARKS_PER_HAND: usize = 21;

/// Index-finger PIP joint (middle knuckle).
pub const INDEX_PIP: usize = 6;
/// Index-finger tip.
pub const INDEX_TIP: usize = 8;
/// Middle-finger PIP joint.
pub const MIDDLE_PIP: usize = 10;
/// Middle-finger tip.
pub const MIDDLE_TIP: usize = 12;

// ════════════════════════════════════════════════════════════════════════════
// Landmark / LandmarkSet
// ════════════════════════════════════════════════════════════════════════════

/// One normalized 3D keypoint from the hand-pose detector.
///
/// All components are in [0, 1] relative to the detector's input frame;
/// y grows downward, so a *smaller* y is *higher* on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }
}

/// The ordered keypoints of one detected hand.
///
/// A well-formed set has [`LANDMARKS_PER_HAND`] entries, but detectors can
/// deliver fewer; [`LandmarkSet::get`] returns `None` for missing indices
/// and the controller skips gesture evaluation for that hand and frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandmarkSet {
    points: Vec<Landmark>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Landmark>) -> Self {
        LandmarkSet { points }
    }

    /// Landmark at `idx`, or `None` if the set is too short.
    pub fn get(&self, idx: usize) -> Option<Landmark> {
        self.points.get(idx).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Synthetic full hand pointing with the index fingertip at `(x, y)`:
    /// index extended, middle folded.  Used by the simulator and tests.
    pub fn pointing_at(x: f32, y: f32) -> Self {
        let mut points = vec![Landmark::new(x, y + 0.25, 0.0); LANDMARKS_PER_HAND];
        points[INDEX_TIP] = Landmark::new(x, y, 0.0);
        points[INDEX_PIP] = Landmark::new(x, y + 0.08, 0.0);
        points[MIDDLE_PIP] = Landmark::new(x + 0.04, y + 0.10, 0.0);
        points[MIDDLE_TIP] = Landmark::new(x + 0.04, y + 0.18, 0.0);
        LandmarkSet { points }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandPose — classifier output
// ════════════════════════════════════════════════════════════════════════════

/// Result of classifying one hand's landmarks for a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandPose {
    /// `indexTip.y < indexPip.y` — fingertip above its middle knuckle.
    pub index_extended: bool,
    /// `middleTip.y > middlePip.y` — fingertip below its middle knuckle.
    /// False when the middle PIP landmark is missing.
    pub middle_folded: bool,
    /// The index fingertip, still in normalized coordinates.
    pub tip: Landmark,
}

/// Classify one hand.  Returns `None` when any of the required landmarks
/// (index tip, index PIP, middle tip) is missing — the caller must then
/// skip the hand for this frame without touching its draw state.
pub fn classify_hand(hand: &LandmarkSet) -> Option<HandPose> {
    let tip = hand.get(INDEX_TIP)?;
    let index_pip = hand.get(INDEX_PIP)?;
    let middle_tip = hand.get(MIDDLE_TIP)?;

    let index_extended = tip.y < index_pip.y;
    let middle_folded = hand
        .get(MIDDLE_PIP)
        .map_or(false, |middle_pip| middle_tip.y > middle_pip.y);

    Some(HandPose {
        index_extended,
        middle_folded,
        tip,
    })
}

// ════════════════════════════════════════════════════════════════════════════
// StrokePoint / StrokeCommand
// ════════════════════════════════════════════════════════════════════════════

/// A point in canvas pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StrokePoint {
    pub x: f32,
    pub y: f32,
}

impl StrokePoint {
    pub fn new(x: f32, y: f32) -> Self {
        StrokePoint { x, y }
    }
}

/// One stroke command for the rendering surface.
///
/// The visual contract: `PenDown` paints a filled circle of radius
/// `brush_size / 2`, `LineTo` a straight segment of width `brush_size`,
/// `PenUp` paints nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrokeCommand {
    PenDown(StrokePoint),
    LineTo { from: StrokePoint, to: StrokePoint },
    PenUp,
}

/// A stroke command tagged with the hand slot that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandStroke {
    pub hand: usize,
    pub command: StrokeCommand,
}

// ════════════════════════════════════════════════════════════════════════════
// DrawState — per-hand stroke state
// ════════════════════════════════════════════════════════════════════════════

/// The last stroke point only exists while drawing, so it lives inside the
/// `Drawing` variant; returning to `Idle` clears it by construction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum DrawState {
    #[default]
    Idle,
    Drawing(StrokePoint),
}

// ════════════════════════════════════════════════════════════════════════════
// StrokeController
// ════════════════════════════════════════════════════════════════════════════

/// Per-frame gesture evaluator and stroke state machine.
///
/// Feed it one call of [`process_frame`](StrokeController::process_frame)
/// per detector frame, in order.  Each hand slot keeps an independent
/// draw state; a frame with fewer hands than live slots pens the orphaned
/// slots up, and a key release pens everything up immediately via
/// [`key_released`](StrokeController::key_released).
#[derive(Debug)]
pub struct StrokeController {
    canvas_w: f32,
    canvas_h: f32,
    slots: Vec<DrawState>,
}

impl StrokeController {
    /// Controller for a canvas of the given pixel dimensions.
    pub fn new(canvas_w: f32, canvas_h: f32) -> Self {
        StrokeController {
            canvas_w,
            canvas_h,
            slots: Vec::new(),
        }
    }

    /// Evaluate one frame.
    ///
    /// `hands` holds zero or more landmark sets in the detector's slot
    /// order; `key_held` is the activation-key state read at the start of
    /// the evaluation.  Emits at most one command per hand slot.
    pub fn process_frame(&mut self, hands: &[LandmarkSet], key_held: bool) -> Vec<HandStroke> {
        if self.slots.len() < hands.len() {
            self.slots.resize(hands.len(), DrawState::Idle);
        }

        let mut out = Vec::new();
        for slot in 0..self.slots.len() {
            match hands.get(slot) {
                Some(hand) => match classify_hand(hand) {
                    // Required landmark missing: skip, no state change.
                    None => {}
                    Some(pose) => {
                        let should_draw = pose.index_extended && pose.middle_folded && key_held;
                        if should_draw {
                            let tip = self.scale(pose.tip);
                            let command = match self.slots[slot] {
                                DrawState::Idle => StrokeCommand::PenDown(tip),
                                DrawState::Drawing(last) => {
                                    StrokeCommand::LineTo { from: last, to: tip }
                                }
                            };
                            self.slots[slot] = DrawState::Drawing(tip);
                            out.push(HandStroke { hand: slot, command });
                        } else if let Some(up) = self.pen_up(slot) {
                            out.push(up);
                        }
                    }
                },
                // No hand in this slot this frame: treat as "no gesture".
                None => {
                    if let Some(up) = self.pen_up(slot) {
                        out.push(up);
                    }
                }
            }
        }
        out
    }

    /// Force every drawing slot to pen up.
    ///
    /// Called for a key-release event that arrives *between* frames, so the
    /// stroke ends without waiting for the next frame.  Idempotent: slots
    /// already idle emit nothing.
    pub fn key_released(&mut self) -> Vec<HandStroke> {
        (0..self.slots.len())
            .filter_map(|slot| self.pen_up(slot))
            .collect()
    }

    /// True if the given hand slot is mid-stroke.
    pub fn is_drawing(&self, hand: usize) -> bool {
        matches!(self.slots.get(hand), Some(DrawState::Drawing(_)))
    }

    /// True if any hand slot is mid-stroke.
    pub fn any_drawing(&self) -> bool {
        self.slots
            .iter()
            .any(|s| matches!(s, DrawState::Drawing(_)))
    }

    pub fn canvas_size(&self) -> (f32, f32) {
        (self.canvas_w, self.canvas_h)
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn pen_up(&mut self, slot: usize) -> Option<HandStroke> {
        match self.slots[slot] {
            DrawState::Drawing(_) => {
                self.slots[slot] = DrawState::Idle;
                Some(HandStroke {
                    hand: slot,
                    command: StrokeCommand::PenUp,
                })
            }
            DrawState::Idle => None,
        }
    }

    fn scale(&self, lm: Landmark) -> StrokePoint {
        StrokePoint::new(lm.x * self.canvas_w, lm.y * self.canvas_h)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn ctl() -> StrokeController {
        StrokeController::new(640.0, 480.0)
    }

    /// Hand with explicit y values for the four gesture landmarks,
    /// all at x = 0.5.
    fn hand_with(tip_y: f32, pip_y: f32, mid_tip_y: f32, mid_pip_y: f32) -> LandmarkSet {
        let mut points = vec![Landmark::new(0.5, 0.5, 0.0); LANDMARKS_PER_HAND];
        points[INDEX_TIP] = Landmark::new(0.5, tip_y, 0.0);
        points[INDEX_PIP] = Landmark::new(0.5, pip_y, 0.0);
        points[MIDDLE_TIP] = Landmark::new(0.5, mid_tip_y, 0.0);
        points[MIDDLE_PIP] = Landmark::new(0.5, mid_pip_y, 0.0);
        LandmarkSet::new(points)
    }

    fn qualifying() -> LandmarkSet {
        hand_with(0.3, 0.4, 0.6, 0.5)
    }

    // ── classifier ────────────────────────────────────────────────────────

    #[test]
    fn classify_pointing_hand() {
        let pose = classify_hand(&qualifying()).unwrap();
        assert!(pose.index_extended);
        assert!(pose.middle_folded);
        assert_eq!(pose.tip, Landmark::new(0.5, 0.3, 0.0));
    }

    #[test]
    fn classify_requires_core_landmarks() {
        // 9 points: has index PIP(6) and tip(8) but no middle tip(12).
        let short = LandmarkSet::new(vec![Landmark::default(); 9]);
        assert!(classify_hand(&short).is_none());
        assert!(classify_hand(&LandmarkSet::default()).is_none());
    }

    #[test]
    fn classify_truncated_at_middle_tip_skips() {
        // 12 points: index PIP/tip and middle PIP present, middle tip not.
        let mut points = vec![Landmark::new(0.5, 0.5, 0.0); 12];
        points[INDEX_TIP] = Landmark::new(0.5, 0.3, 0.0);
        points[INDEX_PIP] = Landmark::new(0.5, 0.4, 0.0);
        assert!(classify_hand(&LandmarkSet::new(points)).is_none());
    }

    #[test]
    fn classify_boundary_ties_do_not_qualify() {
        // tip.y == pip.y is not extended; middleTip.y == middlePip.y is
        // not folded.  Strict inequalities on both.
        let pose = classify_hand(&hand_with(0.4, 0.4, 0.5, 0.5)).unwrap();
        assert!(!pose.index_extended);
        assert!(!pose.middle_folded);
    }

    // ── never-draw property ───────────────────────────────────────────────

    #[test]
    fn index_not_extended_never_draws() {
        // indexTip.y >= indexPip.y → no PenDown/LineTo regardless of key.
        let folded = hand_with(0.5, 0.4, 0.6, 0.5);
        for key in [false, true] {
            let mut c = ctl();
            let out = c.process_frame(std::slice::from_ref(&folded), key);
            assert!(out.is_empty());
            assert!(!c.any_drawing());
        }
    }

    #[test]
    fn middle_not_folded_never_draws() {
        let open = hand_with(0.3, 0.4, 0.4, 0.5);
        let mut c = ctl();
        assert!(c.process_frame(std::slice::from_ref(&open), true).is_empty());
    }

    // ── worked example from the drawing contract ──────────────────────────

    #[test]
    fn pen_down_at_scaled_tip() {
        // 640×480 canvas, tip (0.5, 0.3), pip (0.5, 0.4), middle tip
        // (0.5, 0.6) over pip (0.5, 0.5), key held → PenDown at (320, 144).
        let mut c = ctl();
        let out = c.process_frame(std::slice::from_ref(&qualifying()), true);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].hand, 0);
        assert_eq!(
            out[0].command,
            StrokeCommand::PenDown(StrokePoint::new(320.0, 144.0))
        );
        assert!(c.is_drawing(0));
    }

    #[test]
    fn key_not_held_same_landmarks_no_command() {
        let mut c = ctl();
        let out = c.process_frame(std::slice::from_ref(&qualifying()), false);
        assert!(out.is_empty());
        assert!(!c.any_drawing());
    }

    // ── stroke continuation ───────────────────────────────────────────────

    #[test]
    fn second_qualifying_frame_is_line_to() {
        let mut c = ctl();
        c.process_frame(std::slice::from_ref(&qualifying()), true);
        let next = hand_with(0.31, 0.41, 0.61, 0.51);
        let out = c.process_frame(std::slice::from_ref(&next), true);
        assert_eq!(out.len(), 1);
        match out[0].command {
            StrokeCommand::LineTo { from, to } => {
                assert_eq!(from, StrokePoint::new(320.0, 144.0));
                assert!((to.y - 0.31 * 480.0).abs() < 1e-4);
            }
            other => panic!("expected LineTo, got {:?}", other),
        }
    }

    #[test]
    fn exactly_one_pen_down_per_stroke() {
        let mut c = ctl();
        let mut downs = 0;
        for _ in 0..10 {
            for hs in c.process_frame(std::slice::from_ref(&qualifying()), true) {
                if matches!(hs.command, StrokeCommand::PenDown(_)) {
                    downs += 1;
                }
            }
        }
        assert_eq!(downs, 1);
    }

    // ── pen-up paths ──────────────────────────────────────────────────────

    #[test]
    fn key_release_pens_up_without_a_frame() {
        let mut c = ctl();
        c.process_frame(std::slice::from_ref(&qualifying()), true);
        assert!(c.is_drawing(0));

        let out = c.key_released();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].command, StrokeCommand::PenUp);
        assert!(!c.any_drawing());
    }

    #[test]
    fn repeated_pen_up_is_noop() {
        let mut c = ctl();
        c.process_frame(std::slice::from_ref(&qualifying()), true);
        assert_eq!(c.key_released().len(), 1);
        assert!(c.key_released().is_empty());
        assert!(c.process_frame(&[], true).is_empty());
    }

    #[test]
    fn zero_hands_while_drawing_pens_up() {
        let mut c = ctl();
        c.process_frame(std::slice::from_ref(&qualifying()), true);
        let out = c.process_frame(&[], true);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].command, StrokeCommand::PenUp);
    }

    #[test]
    fn gesture_broken_while_drawing_pens_up() {
        let mut c = ctl();
        c.process_frame(std::slice::from_ref(&qualifying()), true);
        // Middle finger comes up: gesture no longer qualifies.
        let open = hand_with(0.3, 0.4, 0.4, 0.5);
        let out = c.process_frame(std::slice::from_ref(&open), true);
        assert_eq!(out[0].command, StrokeCommand::PenUp);
        // And a new qualifying frame starts a fresh stroke.
        let out = c.process_frame(std::slice::from_ref(&qualifying()), true);
        assert!(matches!(out[0].command, StrokeCommand::PenDown(_)));
    }

    #[test]
    fn missing_landmark_frame_changes_nothing() {
        let mut c = ctl();
        c.process_frame(std::slice::from_ref(&qualifying()), true);
        // Truncated set: skip the hand, keep the stroke alive.
        let short = LandmarkSet::new(vec![Landmark::default(); 5]);
        let out = c.process_frame(std::slice::from_ref(&short), true);
        assert!(out.is_empty());
        assert!(c.is_drawing(0));
    }

    // ── multi-hand ────────────────────────────────────────────────────────

    #[test]
    fn hands_track_independent_strokes() {
        let mut c = ctl();
        let left = LandmarkSet::pointing_at(0.2, 0.3);
        let right = LandmarkSet::pointing_at(0.8, 0.3);

        let out = c.process_frame(&[left.clone(), right.clone()], true);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|hs| matches!(hs.command, StrokeCommand::PenDown(_))));
        assert_eq!(out[0].hand, 0);
        assert_eq!(out[1].hand, 1);

        // Second hand disappears: only its slot pens up.
        let out = c.process_frame(std::slice::from_ref(&left), true);
        assert_eq!(out.len(), 2);
        assert!(matches!(out[0].command, StrokeCommand::LineTo { .. }));
        assert_eq!(out[1], HandStroke { hand: 1, command: StrokeCommand::PenUp });
        assert!(c.is_drawing(0));
        assert!(!c.is_drawing(1));
    }

    #[test]
    fn pointing_at_helper_qualifies() {
        let pose = classify_hand(&LandmarkSet::pointing_at(0.4, 0.2)).unwrap();
        assert!(pose.index_extended && pose.middle_folded);
        assert_eq!(pose.tip.x, 0.4);
        assert_eq!(pose.tip.y, 0.2);
    }
}
