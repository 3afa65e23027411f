//! Top-level application state.
//!
//! `AppState` owns the [`PaintCanvas`] and the [`StrokeController`], applies
//! stroke commands as frames arrive, and keeps the status line current.
//! `run()` wires the landmark source, the window and the state together.

use std::sync::mpsc::{self, TryRecvError};

use hand_stroke::{StrokeCommand, StrokeController, StrokePoint, INDEX_TIP};

use crate::canvas::{PaintCanvas, MAX_BRUSH, MIN_BRUSH, PALETTE};
use crate::source::{spawn_landmark_source, Frame};
use crate::visualizer::{Visualizer, CANVAS_H, CANVAS_W};

#[cfg(not(feature = "leap"))]
use crate::source::SimLandmarkSource;
#[cfg(feature = "leap")]
use crate::source::LeapLandmarkSource;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
pub struct AppConfig {
    pub canvas_w: usize,
    pub canvas_h: usize,
    pub brush_color: u32,
    pub brush_size: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            canvas_w: CANVAS_W,
            canvas_h: CANVAS_H,
            brush_color: PALETTE[0],
            brush_size: 5.0,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    canvas: PaintCanvas,
    controller: StrokeController,

    /// Activation-key state, read at the start of each frame evaluation.
    key_held: bool,

    /// Index fingertip of the first hand, canvas pixels, for the crosshair.
    cursor: Option<StrokePoint>,

    /// Count of strokes started this session.
    strokes: usize,

    pub status: String,
}

impl AppState {
    pub fn new(cfg: AppConfig) -> Self {
        AppState {
            canvas: PaintCanvas::new(cfg.canvas_w, cfg.canvas_h, cfg.brush_color, cfg.brush_size),
            controller: StrokeController::new(cfg.canvas_w as f32, cfg.canvas_h as f32),
            key_held: false,
            cursor: None,
            strokes: 0,
            status: "Ready! Hold SHIFT and point your index finger to paint.".to_string(),
        }
    }

    // ── activation key ────────────────────────────────────────────────────

    /// Update the activation-key state.
    ///
    /// A release edge pens up every active stroke immediately, without
    /// waiting for the next frame from the detector.
    pub fn set_key_held(&mut self, held: bool) {
        if self.key_held && !held {
            let ups = self.controller.key_released();
            for hs in &ups {
                self.canvas.apply(&hs.command);
            }
            if !ups.is_empty() {
                self.status = "Pen up (SHIFT released)".to_string();
            }
        }
        self.key_held = held;
    }

    pub fn key_held(&self) -> bool {
        self.key_held
    }

    // ── per-frame processing ──────────────────────────────────────────────

    /// Evaluate one detector frame and paint the resulting commands.
    pub fn process_frame(&mut self, frame: &Frame) {
        for hs in self.controller.process_frame(&frame.hands, self.key_held) {
            match hs.command {
                StrokeCommand::PenDown(p) => {
                    self.strokes += 1;
                    self.status =
                        format!("Stroke {} started at ({:.0}, {:.0})", self.strokes, p.x, p.y);
                }
                StrokeCommand::PenUp => {
                    self.status = "Pen up".to_string();
                }
                StrokeCommand::LineTo { .. } => {}
            }
            self.canvas.apply(&hs.command);
        }

        // The crosshair follows the first hand's index fingertip.
        let (cw, ch) = self.controller.canvas_size();
        self.cursor = frame
            .hands
            .first()
            .and_then(|h| h.get(INDEX_TIP))
            .map(|lm| StrokePoint::new(lm.x * cw, lm.y * ch));
    }

    // ── brush / canvas commands ───────────────────────────────────────────

    pub fn clear_canvas(&mut self) {
        self.canvas.clear();
        self.status = "Canvas cleared".to_string();
    }

    pub fn pick_color(&mut self, idx: usize) {
        if let Some(&color) = PALETTE.get(idx) {
            self.canvas.set_brush_color(color);
            self.status = format!("Color {}", idx + 1);
        }
    }

    pub fn adjust_brush(&mut self, delta: f32) {
        self.canvas.adjust_brush(delta);
        self.status = format!(
            "Brush size {:.0} ({:.0}-{:.0})",
            self.canvas.brush_size(),
            MIN_BRUSH,
            MAX_BRUSH
        );
    }

    // ── accessors for the render loop ─────────────────────────────────────

    pub fn canvas(&self) -> &PaintCanvas {
        &self.canvas
    }

    pub fn cursor(&self) -> Option<StrokePoint> {
        self.cursor
    }

    pub fn strokes_started(&self) -> usize {
        self.strokes
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Creates the landmark source (simulation by default, hardware with
/// `--features leap`), the window, and the app state, then drives the
/// input/frame/render loop at ~60 fps.  Frames are drained in order and
/// each is processed to completion before the next.
pub fn run(cfg: AppConfig) -> Result<(), String> {
    // ── sim input channel (unused wire in hardware mode) ─────────────────
    let (sim_tx, sim_rx) = mpsc::channel();

    #[cfg(feature = "leap")]
    let frame_rx = {
        let _ = sim_rx; // window pose keys are inert with real hardware
        spawn_landmark_source(LeapLandmarkSource)
    };
    #[cfg(not(feature = "leap"))]
    let frame_rx = spawn_landmark_source(SimLandmarkSource { rx: sim_rx });

    // ── window (owns the sim input sender) ───────────────────────────────
    let mut vis = Visualizer::new(sim_tx)?;

    // ── app state ────────────────────────────────────────────────────────
    let mut app = AppState::new(cfg);
    let mut tracking_lost = false;

    // ── main loop ────────────────────────────────────────────────────────
    while vis.is_open() {
        // 1. Poll window input.  The activation key is sampled here; a
        //    release edge pens up before any frame work happens.
        let input = vis.poll_input();
        if input.quit {
            break;
        }
        app.set_key_held(input.key_held);

        if input.clear {
            app.clear_canvas();
        }
        if let Some(idx) = input.color_pick {
            app.pick_color(idx);
        }
        if input.brush_delta != 0.0 {
            app.adjust_brush(input.brush_delta);
        }

        // 2. Drain landmark frames, strictly in order.
        loop {
            match frame_rx.try_recv() {
                Ok(frame) => app.process_frame(&frame),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // Detection pipeline died: frames stop, session stays up.
                    if !tracking_lost {
                        tracking_lost = true;
                        app.status = "Hand tracking stopped - restart to recover".to_string();
                    }
                    break;
                }
            }
        }

        // 3. Render.
        vis.render(app.canvas(), app.cursor(), &app.status, app.key_held());
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
