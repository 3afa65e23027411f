//! # finger_paint
//!
//! Hand-gesture finger painting: a hand-landmark stream drives index-finger
//! strokes onto a software canvas, gated by the Shift key.
//!
//! ## Drawing gesture
//!
//! | Condition | Meaning |
//! |---|---|
//! | Index finger extended | fingertip above its middle knuckle |
//! | Middle finger folded | fingertip below its middle knuckle |
//! | Shift held | hard gate; releasing it lifts the pen at once |
//!
//! All three must hold for a hand to paint.  Each detected hand draws its
//! own independent stroke.  The gesture core lives in the sibling
//! `hand_stroke` crate; this crate supplies the landmark sources, the paint
//! canvas, the window, and the run loop.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: the mouse cursor is the index
//!   fingertip and keyboard keys select the hand pose.
//! * `leap` — **Hardware mode**: polls a real LeapMotion controller via
//!   LeapC and converts its digit joints to the 21-point convention.
//!
//! ### Simulation controls
//!
//! | Input | Effect |
//! |---|---|
//! | Mouse | index fingertip position |
//! | `Shift` (hold) | activation key — draw while held |
//! | `E` (hold) | open hand — middle finger up, drawing stops |
//! | `F` (hold) | fist — index folded, drawing stops |
//! | `H` | cycle simulated hand count 1 → 2 → 0 |
//! | `1`–`8` | brush color |
//! | `-` / `=` | brush size |
//! | `C` | clear canvas |
//! | `Q` | quit |

pub mod app;
pub mod canvas;
pub mod source;
pub mod visualizer;
