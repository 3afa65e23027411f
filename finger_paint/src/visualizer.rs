//! Software-rendered window using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                                             │
//! │   paint canvas (white)                      │
//! │   + fingertip crosshair                     │
//! │                                             │
//! ├─────────────────────────────────────────────┤
//! │ ▣ brush swatch   status line                │
//! │ key legend                                  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The window is also the input device: Shift is the activation key, the
//! mouse cursor stands in for the index fingertip, and pose/hand-count keys
//! feed the simulated landmark source.

use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use crate::canvas::PaintCanvas;
use crate::source::{SimInput, SimPose, MAX_SIM_HANDS};
use hand_stroke::StrokePoint;

use std::sync::mpsc::Sender;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const CANVAS_W: usize = 640;
pub const CANVAS_H: usize = 480;
const BAR_H: usize = 56;
pub const WIN_W: usize = CANVAS_W;
pub const WIN_H: usize = CANVAS_H + BAR_H;

const BAR_BG: u32 = 0xFF16213E;
const TEXT_COLOR: u32 = 0xFFEEEEEE;
const LEGEND_COLOR: u32 = 0xFF888888;
const KEY_ON_COLOR: u32 = 0xFF44DD66;
const CROSSHAIR_COLOR: u32 = 0xFF333333;

// ════════════════════════════════════════════════════════════════════════════
// InputEvents — one poll's worth of window input
// ════════════════════════════════════════════════════════════════════════════

/// What the run loop needs to know after each input poll.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputEvents {
    pub quit: bool,
    /// Activation key (Shift) state this poll; the run loop reads it at the
    /// start of each frame evaluation.
    pub key_held: bool,
    pub clear: bool,
    /// Palette index picked with keys 1–8.
    pub color_pick: Option<usize>,
    /// Brush size change from -/= keys.
    pub brush_delta: f32,
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf: Vec<u32>,
    sim_tx: Sender<SimInput>,
    sim_pose: SimPose,
    sim_hands: usize,
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>) -> Result<Self, String> {
        let mut window = Window::new(
            "Finger Paint — Hand Gesture Drawing",
            WIN_W,
            WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BAR_BG; WIN_W * WIN_H],
            sim_tx,
            sim_pose: SimPose::Pointing,
            sim_hands: 1,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Poll the window: collect run-loop commands and forward simulator
    /// input (pointer, pose, hand count) to the landmark source.
    pub fn poll_input(&mut self) -> InputEvents {
        let mut ev = InputEvents::default();
        if !self.window.is_open() {
            ev.quit = true;
            return ev;
        }

        let one_shot = |w: &Window, k: Key| w.is_key_pressed(k, KeyRepeat::No);

        if one_shot(&self.window, Key::Q) {
            ev.quit = true;
            return ev;
        }

        ev.key_held = self.window.is_key_down(Key::LeftShift)
            || self.window.is_key_down(Key::RightShift);

        ev.clear = one_shot(&self.window, Key::C);

        const COLOR_KEYS: [Key; 8] = [
            Key::Key1,
            Key::Key2,
            Key::Key3,
            Key::Key4,
            Key::Key5,
            Key::Key6,
            Key::Key7,
            Key::Key8,
        ];
        for (i, &k) in COLOR_KEYS.iter().enumerate() {
            if one_shot(&self.window, k) {
                ev.color_pick = Some(i);
            }
        }

        if self.window.is_key_pressed(Key::Minus, KeyRepeat::Yes) {
            ev.brush_delta -= 1.0;
        }
        if self.window.is_key_pressed(Key::Equal, KeyRepeat::Yes) {
            ev.brush_delta += 1.0;
        }

        // ── simulated hand pose / count ──────────────────────────────────
        let pose = if self.window.is_key_down(Key::F) {
            SimPose::Fist
        } else if self.window.is_key_down(Key::E) {
            SimPose::OpenHand
        } else {
            SimPose::Pointing
        };
        if pose != self.sim_pose {
            self.sim_pose = pose;
            let _ = self.sim_tx.send(SimInput::Pose(pose));
        }

        if one_shot(&self.window, Key::H) {
            self.sim_hands = (self.sim_hands + 1) % (MAX_SIM_HANDS + 1);
            let _ = self.sim_tx.send(SimInput::HandCount(self.sim_hands));
        }

        // ── pointer → fingertip; clocks out one simulated frame ──────────
        if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let x = (mx / CANVAS_W as f32).clamp(0.0, 1.0);
            let y = (my.min(CANVAS_H as f32 - 1.0) / CANVAS_H as f32).clamp(0.0, 1.0);
            let _ = self.sim_tx.send(SimInput::Pointer { x, y });
        }

        ev
    }

    /// Render one frame: canvas blit, crosshair, status bar.
    pub fn render(
        &mut self,
        canvas: &PaintCanvas,
        cursor: Option<StrokePoint>,
        status: &str,
        key_held: bool,
    ) {
        self.buf.fill(BAR_BG);

        // ── paint canvas ─────────────────────────────────────────────────
        let cw = canvas.width().min(CANVAS_W);
        let ch = canvas.height().min(CANVAS_H);
        let pixels = canvas.pixels();
        for row in 0..ch {
            let src = row * canvas.width();
            let dst = row * WIN_W;
            self.buf[dst..dst + cw].copy_from_slice(&pixels[src..src + cw]);
        }

        // ── fingertip crosshair ──────────────────────────────────────────
        if let Some(p) = cursor {
            self.draw_crosshair(p, canvas.brush_color());
        }

        // ── status bar ───────────────────────────────────────────────────
        let bar_y = CANVAS_H;
        self.draw_swatch(8, bar_y + 8, canvas);
        self.draw_label(status, 52, bar_y + 8, TEXT_COLOR);
        if key_held {
            self.draw_label("SHIFT", WIN_W - 30, bar_y + 8, KEY_ON_COLOR);
        }
        self.draw_label(
            "SHIFT=draw  E=open hand  F=fist  H=hands  1-8=color  -/==brush  C=clear  Q=quit",
            8,
            bar_y + BAR_H - 16,
            LEGEND_COLOR,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── crosshair at the index fingertip ──────────────────────────────────

    fn draw_crosshair(&mut self, p: StrokePoint, brush_color: u32) {
        let cx = p.x as isize;
        let cy = p.y as isize;
        for d in -8isize..=8 {
            self.set_pixel(cx + d, cy, CROSSHAIR_COLOR);
            self.set_pixel(cx, cy + d, CROSSHAIR_COLOR);
        }
        // Brush-colored dot in the middle.
        for dy in -1isize..=1 {
            for dx in -1isize..=1 {
                self.set_pixel(cx + dx, cy + dy, brush_color);
            }
        }
    }

    // ── brush swatch in the status bar ────────────────────────────────────

    fn draw_swatch(&mut self, x: usize, y: usize, canvas: &PaintCanvas) {
        const SWATCH: usize = 16;
        self.fill_rect(x, y, SWATCH, SWATCH, canvas.brush_color());
        // Size readout under the swatch.
        let size = format!("{:.0}", canvas.brush_size());
        self.draw_label(&size, x + 4, y + SWATCH + 4, TEXT_COLOR);
    }

    // ── primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(WIN_H) {
            for col in x..(x + w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn set_pixel(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < WIN_W && (y as usize) < WIN_H {
            self.buf[y as usize * WIN_W + x as usize] = color;
        }
    }

    /// Minimal bitmap font — 3×5 characters for the status bar.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.set_pixel((cx + col) as isize, (y + row) as isize, color);
                    }
                }
            }
            cx += 4; // 3 wide + 1 gap
            if cx + 4 > WIN_W {
                break;
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _ => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}
