//! Demonstrates the stroke controller on a canned frame sequence.

use hand_stroke::{LandmarkSet, StrokeCommand, StrokeController};

fn show(label: &str, out: &[hand_stroke::HandStroke]) {
    if out.is_empty() {
        println!("   {}: (no command)", label);
        return;
    }
    for hs in out {
        let s = match hs.command {
            StrokeCommand::PenDown(p) => format!("PenDown ({:.0}, {:.0})", p.x, p.y),
            StrokeCommand::LineTo { from, to } => format!(
                "LineTo ({:.0}, {:.0}) -> ({:.0}, {:.0})",
                from.x, from.y, to.x, to.y
            ),
            StrokeCommand::PenUp => "PenUp".to_string(),
        };
        println!("   {}: hand {} {}", label, hs.hand, s);
    }
}

fn main() {
    println!("\n=== StrokeController Demo (640x480 canvas) ===\n");

    let mut ctl = StrokeController::new(640.0, 480.0);

    // ── 1. Qualifying pose, key held → stroke start ───────────────────────
    println!("1. Pointing hand sweeps left to right with Shift held");
    for i in 0..5 {
        let x = 0.2 + 0.1 * i as f32;
        let hand = LandmarkSet::pointing_at(x, 0.3);
        let out = ctl.process_frame(std::slice::from_ref(&hand), true);
        show(&format!("frame {}", i), &out);
    }
    println!();

    // ── 2. Key released mid-stroke → immediate pen-up ─────────────────────
    println!("2. Shift released between frames");
    show("release", &ctl.key_released());
    show("release again (no-op)", &ctl.key_released());
    println!();

    // ── 3. Key down but gesture broken → nothing ──────────────────────────
    println!("3. Pointing again, then the hand leaves the frame");
    let hand = LandmarkSet::pointing_at(0.5, 0.5);
    show("point", &ctl.process_frame(std::slice::from_ref(&hand), true));
    show("gone", &ctl.process_frame(&[], true));
    println!();

    // ── 4. Two hands draw independently ──────────────────────────────────
    println!("4. Two hands, independent strokes");
    let left = LandmarkSet::pointing_at(0.25, 0.4);
    let right = LandmarkSet::pointing_at(0.75, 0.4);
    show("both down", &ctl.process_frame(&[left, right], true));
    let left2 = LandmarkSet::pointing_at(0.3, 0.45);
    show("left moves, right gone", &ctl.process_frame(std::slice::from_ref(&left2), true));
    println!();
}
