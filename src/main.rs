//! Terminal blockfall runner.
//!
//! Reads keys with crossterm, feeds the engine one `tick` per frame with the
//! measured elapsed time and renders its snapshot through the framebuffer
//! renderer.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event};
use log::{debug, info};

use blockfall::config::RunConfig;
use blockfall::core::{Engine, EngineEvent, GameSnapshot};
use blockfall::input::{command_for_key, should_quit};
use blockfall::term::{FrameBuffer, GameView, HudState, TerminalRenderer, Viewport};

/// How long the "GAME OVER" banner stays up after a reset
const GAME_OVER_BANNER_MS: u64 = 1500;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = RunConfig::from_env().with_args(&args)?;
    let seed = config.seed.unwrap_or_else(clock_seed);
    info!("starting: seed={} tick_ms={}", seed, config.tick_ms);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, seed, config.tick_ms);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, seed: u32, tick_ms: u32) -> Result<()> {
    let mut engine = Engine::new(seed);
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(tick_ms as u64);
    let mut last_tick = Instant::now();
    let mut banner_until: Option<Instant> = None;

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let hud = HudState {
            game_over_banner: banner_until.is_some_and(|t| Instant::now() < t),
        };
        engine.snapshot_into(&mut snap);
        view.render_into(&snap, hud, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        // Input until the next frame is due.
        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = command_for_key(key) {
                        engine.apply(command);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity.
        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            last_tick = Instant::now();
            let ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            engine.tick(ms);
        }

        for ev in engine.take_events() {
            debug!("{:?}", ev);
            if let EngineEvent::GameOver { .. } = ev {
                banner_until = Some(Instant::now() + Duration::from_millis(GAME_OVER_BANNER_MS));
            }
        }
    }
}
