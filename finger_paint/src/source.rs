//! Landmark frame sources — real hand-tracking hardware and mouse/keyboard
//! simulation.
//!
//! The public interface is [`Frame`] delivered over an `mpsc` channel, one
//! per processed video frame.  The consumer drains the channel in order, so
//! each frame's gesture evaluation runs to completion before the next one —
//! it never needs to know whether frames came from real hardware or the
//! simulator.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use hand_stroke::{Landmark, LandmarkSet, INDEX_PIP, INDEX_TIP, LANDMARKS_PER_HAND, MIDDLE_PIP, MIDDLE_TIP};

// ════════════════════════════════════════════════════════════════════════════
// Frame
// ════════════════════════════════════════════════════════════════════════════

/// One detector frame: zero or more hands, each a 21-point landmark set in
/// normalized [0, 1] coordinates.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub hands: Vec<LandmarkSet>,
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait — unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`Frame`]s over a channel.
pub trait LandmarkSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<Frame>);
}

// ════════════════════════════════════════════════════════════════════════════
// Spawn helper
// ════════════════════════════════════════════════════════════════════════════

/// Spawn a landmark source on its own thread and return the receiving end.
pub fn spawn_landmark_source<S: LandmarkSource>(source: S) -> Receiver<Frame> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// LeapLandmarkSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Landmark source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
/// Each tracked hand's digit joints are re-indexed into the detector's
/// 21-point convention (wrist, then four joints per finger, thumb first)
/// and normalized to [0, 1] over the interaction volume.
///
/// If the device cannot be opened the source reports once and stops — the
/// frame channel simply goes quiet, there is no retry.
#[cfg(feature = "leap")]
pub struct LeapLandmarkSource;

#[cfg(feature = "leap")]
impl LandmarkSource for LeapLandmarkSource {
    fn run(self: Box<Self>, tx: Sender<Frame>) {
        use leaprs::*;

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("[leap] Failed to create LeapC connection: {:?}", e);
                return;
            }
        };
        if let Err(e) = connection.open() {
            eprintln!("[leap] Failed to open LeapMotion device: {:?}", e);
            return;
        }

        loop {
            let msg = match connection.poll(100) {
                Ok(m) => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let hands = frame
                    .hands()
                    .map(|h| leap_hand_landmarks(&h))
                    .collect::<Vec<_>>();
                if tx.send(Frame { hands }).is_err() {
                    return;
                }
            }
        }
    }
}

/// Re-index one LeapC hand into the 21-point landmark convention.
#[cfg(feature = "leap")]
fn leap_hand_landmarks(hand: &leaprs::Hand) -> LandmarkSet {
    let mut points = vec![Landmark::default(); LANDMARKS_PER_HAND];

    // Slot 0 is the wrist; approximate it just below the palm centre.
    let palm = hand.palm().position();
    points[0] = normalize_mm(palm.x, palm.y - 60.0, palm.z);

    // Four joints per finger, thumb first: MCP, PIP, DIP, tip.
    let mut idx = 1;
    for digit in hand.digits() {
        let joints = [
            digit.proximal().prev_joint(),
            digit.proximal().next_joint(),
            digit.intermediate().next_joint(),
            digit.distal().next_joint(),
        ];
        for j in joints {
            if idx < LANDMARKS_PER_HAND {
                points[idx] = normalize_mm(j.x, j.y, j.z);
                idx += 1;
            }
        }
    }

    LandmarkSet::new(points)
}

/// Map LeapC millimetres to normalized detector coordinates.
///
/// Interaction volume ≈ x, z ∈ [-250, 250] mm, y ∈ [80, 480] mm above the
/// device.  Leap y grows upward but detector y grows downward, so y flips.
#[cfg(feature = "leap")]
fn normalize_mm(x: f32, y: f32, z: f32) -> Landmark {
    Landmark::new(
        ((x + 250.0) / 500.0).clamp(0.0, 1.0),
        (1.0 - (y - 80.0) / 400.0).clamp(0.0, 1.0),
        ((z + 250.0) / 500.0).clamp(0.0, 1.0),
    )
}

// ════════════════════════════════════════════════════════════════════════════
// SimLandmarkSource — mouse/keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Maximum number of hands the simulator will synthesize.
pub const MAX_SIM_HANDS: usize = 2;

/// Simulated hand pose, selected from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimPose {
    /// Index extended, middle folded — the drawing gesture.
    Pointing,
    /// All fingers extended — middle not folded, never draws.
    OpenHand,
    /// All fingers curled — index not extended, never draws.
    Fist,
}

/// Raw input event from the simulation window.
#[derive(Clone, Debug)]
pub enum SimInput {
    /// Normalized fingertip position.  Each pointer update also clocks out
    /// one frame, so the simulated frame rate follows the window loop.
    Pointer { x: f32, y: f32 },
    /// Change the simulated pose for all hands.
    Pose(SimPose),
    /// Number of simulated hands (0 to [`MAX_SIM_HANDS`]).
    HandCount(usize),
}

/// Landmark source driven by [`SimInput`] events from the window.
///
/// The visualizer sends `SimInput` here; this translator synthesizes full
/// 21-point landmark sets from them.  This decouples the window event loop
/// from the frame pipeline.
pub struct SimLandmarkSource {
    pub rx: Receiver<SimInput>,
}

impl LandmarkSource for SimLandmarkSource {
    fn run(self: Box<Self>, tx: Sender<Frame>) {
        let mut pose = SimPose::Pointing;
        let mut hand_count = 1usize;

        for input in self.rx {
            match input {
                SimInput::Pose(p) => pose = p,
                SimInput::HandCount(n) => hand_count = n.min(MAX_SIM_HANDS),
                SimInput::Pointer { x, y } => {
                    let mut hands = Vec::with_capacity(hand_count);
                    if hand_count >= 1 {
                        hands.push(synth_hand(x, y, pose));
                    }
                    if hand_count >= 2 {
                        // Second hand mirrors the first horizontally.
                        hands.push(synth_hand(1.0 - x, y, pose));
                    }
                    if tx.send(Frame { hands }).is_err() {
                        return;
                    }
                }
            }
        }
    }
}

/// Synthesize a full hand with the index fingertip at `(tip_x, tip_y)`.
pub fn synth_hand(tip_x: f32, tip_y: f32, pose: SimPose) -> LandmarkSet {
    match pose {
        SimPose::Pointing => LandmarkSet::pointing_at(tip_x, tip_y),
        SimPose::OpenHand => {
            let mut points =
                vec![Landmark::new(tip_x, tip_y + 0.25, 0.0); LANDMARKS_PER_HAND];
            points[INDEX_TIP] = Landmark::new(tip_x, tip_y, 0.0);
            points[INDEX_PIP] = Landmark::new(tip_x, tip_y + 0.08, 0.0);
            // Middle finger extended alongside the index.
            points[MIDDLE_TIP] = Landmark::new(tip_x + 0.04, tip_y + 0.01, 0.0);
            points[MIDDLE_PIP] = Landmark::new(tip_x + 0.04, tip_y + 0.09, 0.0);
            LandmarkSet::new(points)
        }
        SimPose::Fist => {
            let mut points =
                vec![Landmark::new(tip_x, tip_y + 0.25, 0.0); LANDMARKS_PER_HAND];
            // Index curled: tip below its PIP joint.
            points[INDEX_TIP] = Landmark::new(tip_x, tip_y + 0.16, 0.0);
            points[INDEX_PIP] = Landmark::new(tip_x, tip_y + 0.08, 0.0);
            points[MIDDLE_TIP] = Landmark::new(tip_x + 0.04, tip_y + 0.18, 0.0);
            points[MIDDLE_PIP] = Landmark::new(tip_x + 0.04, tip_y + 0.10, 0.0);
            LandmarkSet::new(points)
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_stroke::classify_hand;
    use std::time::Duration;

    #[test]
    fn pointing_hand_qualifies() {
        let pose = classify_hand(&synth_hand(0.5, 0.3, SimPose::Pointing)).unwrap();
        assert!(pose.index_extended);
        assert!(pose.middle_folded);
        assert_eq!(pose.tip.x, 0.5);
        assert_eq!(pose.tip.y, 0.3);
    }

    #[test]
    fn open_hand_middle_not_folded() {
        let pose = classify_hand(&synth_hand(0.5, 0.3, SimPose::OpenHand)).unwrap();
        assert!(pose.index_extended);
        assert!(!pose.middle_folded);
    }

    #[test]
    fn fist_index_not_extended() {
        let pose = classify_hand(&synth_hand(0.5, 0.3, SimPose::Fist)).unwrap();
        assert!(!pose.index_extended);
    }

    #[test]
    fn synth_hand_is_complete() {
        assert_eq!(synth_hand(0.1, 0.1, SimPose::Pointing).len(), LANDMARKS_PER_HAND);
        assert_eq!(synth_hand(0.1, 0.1, SimPose::OpenHand).len(), LANDMARKS_PER_HAND);
        assert_eq!(synth_hand(0.1, 0.1, SimPose::Fist).len(), LANDMARKS_PER_HAND);
    }

    #[test]
    fn sim_source_clocks_frames_on_pointer() {
        let (sim_tx, sim_rx) = mpsc::channel();
        let frame_rx = spawn_landmark_source(SimLandmarkSource { rx: sim_rx });

        sim_tx.send(SimInput::Pointer { x: 0.5, y: 0.5 }).unwrap();
        let frame = frame_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(frame.hands.len(), 1);

        sim_tx.send(SimInput::HandCount(2)).unwrap();
        sim_tx.send(SimInput::Pointer { x: 0.2, y: 0.5 }).unwrap();
        let frame = frame_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(frame.hands.len(), 2);
        // Mirrored second hand.
        let tip0 = frame.hands[0].get(INDEX_TIP).unwrap();
        let tip1 = frame.hands[1].get(INDEX_TIP).unwrap();
        assert!((tip0.x - 0.2).abs() < 1e-6);
        assert!((tip1.x - 0.8).abs() < 1e-6);

        sim_tx.send(SimInput::HandCount(0)).unwrap();
        sim_tx.send(SimInput::Pointer { x: 0.2, y: 0.5 }).unwrap();
        let frame = frame_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(frame.hands.is_empty());
    }

    #[test]
    fn sim_source_pose_applies_to_later_frames() {
        let (sim_tx, sim_rx) = mpsc::channel();
        let frame_rx = spawn_landmark_source(SimLandmarkSource { rx: sim_rx });

        sim_tx.send(SimInput::Pose(SimPose::Fist)).unwrap();
        sim_tx.send(SimInput::Pointer { x: 0.5, y: 0.5 }).unwrap();
        let frame = frame_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        let pose = classify_hand(&frame.hands[0]).unwrap();
        assert!(!pose.index_extended);
    }
}
