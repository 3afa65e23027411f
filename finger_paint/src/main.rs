//! finger_paint — interactive entry point.

use finger_paint::app::{run, AppConfig};
use finger_paint::canvas::{MAX_BRUSH, MIN_BRUSH, PALETTE};
use std::io::{self, Write};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Finger Paint — Hand-Gesture Canvas Painting           ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Mouse/keyboard simulation  (use --features leap for hardware)");
    println!();

    let cfg = if std::env::args().any(|a| a == "--quick") {
        println!("  Quick-start: red brush, size 5\n");
        AppConfig::default()
    } else {
        configure_interactively()
    };

    println!();
    println!("  Opening paint window…  Hold SHIFT and point to draw.");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn configure_interactively() -> AppConfig {
    println!("  Brush color:");
    println!("    1.red  2.orange  3.yellow  4.green  5.cyan  6.blue  7.purple  8.black");
    let color_idx = read_line("  Choice (1-8, default 1): ")
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .filter(|&i| i < PALETTE.len())
        .unwrap_or(0);

    let brush_size = read_line(&format!(
        "  Brush size {:.0}-{:.0} (default 5): ",
        MIN_BRUSH, MAX_BRUSH
    ))
    .trim()
    .parse::<f32>()
    .unwrap_or(5.0)
    .clamp(MIN_BRUSH, MAX_BRUSH);

    AppConfig {
        brush_color: PALETTE[color_idx],
        brush_size,
        ..AppConfig::default()
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
