use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use raylib::prelude::*;
use tracing_subscriber::EnvFilter;

mod engine;
mod showcase;
mod texture_loader;

use carousel::config::load_settings;
use carousel::constants::*;
use carousel::project::Deck;

use crate::engine::Engine;
use crate::showcase::engine::ShowcaseEngine;

/// Auto-advancing project showcase.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Settings file (defaults to ./carousel.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Project deck to show instead of the bundled one
    #[arg(long)]
    deck: Option<PathBuf>,

    /// Auto-advance interval in milliseconds
    #[arg(long)]
    period_ms: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(deck) = args.deck {
        settings.deck = Some(deck);
    }
    if let Some(period_ms) = args.period_ms {
        settings.period_ms = period_ms;
    }
    settings.validate().context("Invalid settings")?;

    let deck = match &settings.deck {
        Some(path) => Deck::load(path)?,
        None => Deck::builtin()?,
    };
    tracing::info!(projects = deck.projects.len(), period_ms = settings.period_ms, "Loaded project deck");

    let (mut rl, thread) = raylib::init()
        .size(settings.window_width, settings.window_height)
        .title("Our Projects")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(settings.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    // Escape closes the details overlay, not the window
    rl.set_exit_key(None);

    let mut engine = ShowcaseEngine::new(settings.period());
    engine.initialize(&mut rl, &thread, &deck)?;

    let mut framebuffer = rl
        .load_render_texture(&thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| anyhow::anyhow!("Failed to create render texture: {e}"))?;

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        let scale = Vector2::new(
            framebuffer.width() as f32 / rl.get_screen_width() as f32,
            framebuffer.height() as f32 / rl.get_screen_height() as f32,
        );
        engine.handle_input(&rl, scale);

        if !engine.render_frame(dt, &mut rl, &thread, &mut framebuffer) {
            break;
        }

        // Draw inverted copy of framebuffer to the window
        let mut d = rl.begin_drawing(&thread);
        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }

    engine.shutdown();
    Ok(())
}
