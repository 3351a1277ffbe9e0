//! pose_reveal: interactive entry point.

use std::path::PathBuf;

use pose_reveal::app::{run, InputMode};
use pose_reveal::config::SketchConfig;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Pose Reveal  ·  find the hidden cats                ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let args: Vec<String> = std::env::args().collect();

    let mut cfg = if args.iter().any(|a| a == "--left-hand") {
        println!("  Cursor: left wrist (both wrists must be visible)");
        SketchConfig::left_hand()
    } else {
        println!("  Cursor: nose");
        SketchConfig::default()
    };

    if let Some(dir) = args.iter().position(|a| a == "--assets").and_then(|i| args.get(i + 1)) {
        cfg.asset_dir = PathBuf::from(dir);
    }
    println!("  Assets: {}", cfg.asset_dir.display());

    let input = if args.iter().any(|a| a == "--feed") {
        println!("  Mode:   detector feed on stdin");
        InputMode::Feed
    } else {
        println!("  Mode:   mouse simulation");
        InputMode::Simulated
    };

    println!();
    println!("  Opening window…  Esc or Q quits.");
    println!();

    if let Err(e) = run(cfg, input) {
        error!("{}", e);
        std::process::exit(1);
    }
}
