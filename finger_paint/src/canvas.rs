//! The paint surface: an ARGB pixel buffer that consumes stroke commands.
//!
//! Visual contract: `PenDown` stamps a filled disc of radius half the brush
//! size, `LineTo` a straight segment of full brush width with round caps,
//! `PenUp` nothing.

use hand_stroke::{StrokeCommand, StrokePoint};

// ════════════════════════════════════════════════════════════════════════════
// Brush palette
// ════════════════════════════════════════════════════════════════════════════

/// Brush color swatches (ARGB).  Red is the startup default.
pub const PALETTE: [u32; 8] = [
    0xFFFF0000, // red
    0xFFFF8800, // orange
    0xFFFFD700, // yellow
    0xFF22AA44, // green
    0xFF00BBCC, // cyan
    0xFF2255EE, // blue
    0xFF9933CC, // purple
    0xFF111111, // black
];

pub const MIN_BRUSH: f32 = 1.0;
pub const MAX_BRUSH: f32 = 20.0;

/// Canvas background — white, like the original paper.
pub const CANVAS_BG: u32 = 0xFFFFFFFF;

// ════════════════════════════════════════════════════════════════════════════
// PaintCanvas
// ════════════════════════════════════════════════════════════════════════════

/// Software paint surface plus the current brush settings.
#[derive(Debug)]
pub struct PaintCanvas {
    w: usize,
    h: usize,
    buf: Vec<u32>,
    brush_color: u32,
    brush_size: f32,
}

impl PaintCanvas {
    pub fn new(w: usize, h: usize, brush_color: u32, brush_size: f32) -> Self {
        PaintCanvas {
            w,
            h,
            buf: vec![CANVAS_BG; w * h],
            brush_color,
            brush_size: brush_size.clamp(MIN_BRUSH, MAX_BRUSH),
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Row-major ARGB pixels, for blitting into the window buffer.
    pub fn pixels(&self) -> &[u32] {
        &self.buf
    }

    /// Pixel at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.w && y < self.h {
            Some(self.buf[y * self.w + x])
        } else {
            None
        }
    }

    pub fn brush_color(&self) -> u32 {
        self.brush_color
    }

    pub fn set_brush_color(&mut self, color: u32) {
        self.brush_color = color;
    }

    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    /// Grow or shrink the brush, clamped to [`MIN_BRUSH`]..=[`MAX_BRUSH`].
    pub fn adjust_brush(&mut self, delta: f32) {
        self.brush_size = (self.brush_size + delta).clamp(MIN_BRUSH, MAX_BRUSH);
    }

    /// Apply one stroke command with the current brush.
    pub fn apply(&mut self, cmd: &StrokeCommand) {
        match *cmd {
            StrokeCommand::PenDown(p) => self.stamp(p, self.brush_size / 2.0),
            StrokeCommand::LineTo { from, to } => self.segment(from, to),
            StrokeCommand::PenUp => {}
        }
    }

    /// Wipe the canvas back to the background color.
    pub fn clear(&mut self) {
        self.buf.fill(CANVAS_BG);
    }

    // ── internals ─────────────────────────────────────────────────────────

    /// Filled disc centred at `p`; a sub-pixel radius still paints the
    /// pixel under the centre.
    fn stamp(&mut self, p: StrokePoint, radius: f32) {
        let r = radius.max(0.5);
        let x0 = ((p.x - r).floor().max(0.0)) as usize;
        let y0 = ((p.y - r).floor().max(0.0)) as usize;
        let x1 = ((p.x + r).ceil().max(0.0) as usize).min(self.w);
        let y1 = ((p.y + r).ceil().max(0.0) as usize).min(self.h);

        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - p.x;
                let dy = y as f32 + 0.5 - p.y;
                if dx * dx + dy * dy <= r * r {
                    self.buf[y * self.w + x] = self.brush_color;
                }
            }
        }
    }

    /// Brush-width segment: discs stamped at ≤1 px spacing give round caps
    /// and an even core.
    fn segment(&mut self, from: StrokePoint, to: StrokePoint) {
        let r = self.brush_size / 2.0;
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let steps = (dx * dx + dy * dy).sqrt().ceil().max(1.0) as usize;

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp(
                StrokePoint::new(from.x + dx * t, from.y + dy * t),
                r,
            );
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> PaintCanvas {
        PaintCanvas::new(100, 100, PALETTE[0], 5.0)
    }

    #[test]
    fn starts_blank() {
        let c = canvas();
        assert!(c.pixels().iter().all(|&p| p == CANVAS_BG));
    }

    #[test]
    fn pen_down_paints_a_dot() {
        let mut c = canvas();
        c.apply(&StrokeCommand::PenDown(StrokePoint::new(50.0, 50.0)));
        assert_eq!(c.pixel(50, 50), Some(PALETTE[0]));
        // Radius is brush/2 = 2.5: five pixels across, not the whole canvas.
        assert_eq!(c.pixel(50, 46), Some(CANVAS_BG));
        assert_eq!(c.pixel(10, 10), Some(CANVAS_BG));
    }

    #[test]
    fn pen_up_paints_nothing() {
        let mut c = canvas();
        c.apply(&StrokeCommand::PenUp);
        assert!(c.pixels().iter().all(|&p| p == CANVAS_BG));
    }

    #[test]
    fn line_connects_endpoints() {
        let mut c = canvas();
        c.apply(&StrokeCommand::LineTo {
            from: StrokePoint::new(10.0, 50.0),
            to: StrokePoint::new(90.0, 50.0),
        });
        for x in [10usize, 30, 50, 70, 90] {
            assert_eq!(c.pixel(x, 50), Some(PALETTE[0]), "gap at x={}", x);
        }
        // Width ≈ brush size, so one row out is still paint, ten is not.
        assert_eq!(c.pixel(50, 51), Some(PALETTE[0]));
        assert_eq!(c.pixel(50, 60), Some(CANVAS_BG));
    }

    #[test]
    fn tiny_brush_still_marks() {
        let mut c = PaintCanvas::new(20, 20, PALETTE[7], MIN_BRUSH);
        c.apply(&StrokeCommand::PenDown(StrokePoint::new(10.5, 10.5)));
        assert_eq!(c.pixel(10, 10), Some(PALETTE[7]));
    }

    #[test]
    fn strokes_clip_at_edges() {
        let mut c = canvas();
        c.apply(&StrokeCommand::PenDown(StrokePoint::new(0.0, 0.0)));
        c.apply(&StrokeCommand::LineTo {
            from: StrokePoint::new(95.0, 95.0),
            to: StrokePoint::new(120.0, 120.0),
        });
        assert_eq!(c.pixel(0, 0), Some(PALETTE[0]));
        assert_eq!(c.pixel(99, 99), Some(PALETTE[0]));
    }

    #[test]
    fn clear_resets() {
        let mut c = canvas();
        c.apply(&StrokeCommand::PenDown(StrokePoint::new(50.0, 50.0)));
        c.clear();
        assert!(c.pixels().iter().all(|&p| p == CANVAS_BG));
    }

    #[test]
    fn brush_adjust_clamps() {
        let mut c = canvas();
        c.adjust_brush(100.0);
        assert_eq!(c.brush_size(), MAX_BRUSH);
        c.adjust_brush(-100.0);
        assert_eq!(c.brush_size(), MIN_BRUSH);
    }

    #[test]
    fn color_change_applies_to_new_strokes() {
        let mut c = canvas();
        c.set_brush_color(PALETTE[5]);
        c.apply(&StrokeCommand::PenDown(StrokePoint::new(20.0, 20.0)));
        assert_eq!(c.pixel(20, 20), Some(PALETTE[5]));
    }
}
