//! Interactive demo for the pixlab geometry core.
//!
//! Usage:
//!   pixlab                              # open the DDA scene
//!   pixlab --scene pyramid              # start on the 3D scene
//!   pixlab --scene circle --snapshot circle.png
//!
//! Keys: Tab next scene, Space replay, L switch line algorithm, 0-6 2D
//! presets, 1-4 3D presets, R reset, C cycle view, Esc quit.

mod scene;

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use pixlab::canvas::{Canvas, COLOR_BACKGROUND};
use pixlab::logging::{init_logging, LoggingConfig};
use pixlab::window::{FrameLimiter, Window, WindowEvent, WINDOW_HEIGHT, WINDOW_WIDTH};
use scene::{Demo, SceneKind};

#[derive(Parser, Debug)]
#[command(name = "pixlab")]
#[command(about = "Rasterization, clipping and transform demos")]
struct DemoConfig {
    /// Window width in pixels
    #[arg(long, default_value_t = WINDOW_WIDTH)]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    height: u32,

    /// Scene shown at startup
    #[arg(long, value_enum, default_value_t = SceneKind::Dda)]
    scene: SceneKind,

    /// Pixels revealed per frame in the rasterization scenes
    #[arg(long, default_value_t = 4)]
    reveal_rate: usize,

    /// Render the starting scene to a PNG file and exit without opening a window
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,

    /// Log filter such as "debug" or "pixlab::clip=trace" (falls back to RUST_LOG)
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let config = DemoConfig::parse();

    init_logging(LoggingConfig {
        env_filter: config.log.clone(),
        ..LoggingConfig::default()
    });

    ensure!(
        config.width > 0 && config.height > 0,
        "window size must be non-zero, got {}x{}",
        config.width,
        config.height
    );

    let demo = Demo::new(config.scene, config.reveal_rate);

    match &config.snapshot {
        Some(path) => snapshot(demo, config.width, config.height, path),
        None => run(demo, config.width, config.height),
    }
}

/// Renders the fully revealed scene into a PNG.
fn snapshot(mut demo: Demo, width: u32, height: u32, path: &Path) -> Result<()> {
    let mut canvas = Canvas::new(width, height);
    demo.reveal_all();
    demo.render(&mut canvas)?;
    canvas
        .save_png(path)
        .with_context(|| format!("Failed to write snapshot to {}", path.display()))
}

fn run(mut demo: Demo, width: u32, height: u32) -> Result<()> {
    let mut window = Window::new(&demo.title(), width, height)
        .map_err(anyhow::Error::msg)
        .context("Failed to open window")?;
    let mut canvas = Canvas::new(window.width(), window.height());
    let mut limiter = FrameLimiter::new(&window);

    'running: loop {
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::Resize(w, h) => {
                    window.resize(w, h).map_err(anyhow::Error::msg)?;
                    canvas.resize(w, h);
                }
                WindowEvent::KeyDown(key) => {
                    demo.handle_key(key)?;
                    window.set_title(&demo.title()).map_err(anyhow::Error::msg)?;
                }
            }
        }

        demo.advance();

        canvas.clear(COLOR_BACKGROUND);
        demo.render(&mut canvas)?;
        window
            .present(canvas.as_bytes())
            .map_err(anyhow::Error::msg)?;

        limiter.wait_and_get_delta(&window);
    }

    log::info!("window closed");
    Ok(())
}
