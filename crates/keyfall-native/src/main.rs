use std::time::Duration;

use anyhow::Context;
use instant::Instant;

use keyfall::Visualizer;
use keyfall_core::demo::DemoComposer;
use keyfall_core::{ClockTime, HandFilter, ViewMode, VisualizerConfig};

const DISPLAY_HZ: f32 = 60.0;
const DEMO_LENGTH_SECS: f64 = 24.0;
const DEMO_SEED: u64 = 42;

/// Scripted transport: plays forward, seeks back once, switches view and
/// hand filter along the way.
struct Transport {
    position: f64,
    rate: f64,
    seek_done: bool,
}

impl Transport {
    fn advance(&mut self, dt: f64) -> f64 {
        self.position += dt * self.rate;
        if !self.seek_done && self.position >= 12.0 {
            self.seek_done = true;
            self.position = 4.0;
            log::info!("[transport] seek back to {:.2}s", self.position);
        }
        self.position
    }
}

#[derive(Default)]
struct SecondStats {
    frames: u32,
    max_visible: usize,
    max_active: usize,
    max_particles: usize,
    max_sparkles: usize,
    worst_tick: Duration,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let raw = DemoComposer::with_seed(DEMO_SEED).compose(DEMO_LENGTH_SECS);
    let mut vis = Visualizer::new(VisualizerConfig::default()).context("config")?;
    vis.load_score(&raw).context("demo score")?;

    let dt = 1.0 / DISPLAY_HZ;
    let mut transport = Transport {
        position: 0.0,
        rate: 1.0,
        seek_done: false,
    };
    let mut stats = SecondStats::default();
    let mut second = 0u32;
    let started = Instant::now();

    while transport.position < DEMO_LENGTH_SECS + 1.0 {
        let clock = ClockTime::new(transport.advance(f64::from(dt)))?;

        // UI script
        if clock.secs() >= 8.0 && vis.view_mode() == ViewMode::Fall && !transport.seek_done {
            vis.set_view_mode(ViewMode::Recede);
        }
        if transport.seek_done && clock.secs() >= 16.0 && vis.hand_filter() == HandFilter::Both {
            vis.set_hand_filter(HandFilter::Right);
            vis.set_view_mode(ViewMode::Fall);
        }

        let frame = vis.tick(clock, dt);
        stats.frames += 1;
        stats.max_visible = stats.max_visible.max(frame.notes.len());
        stats.max_active = stats.max_active.max(frame.active.len());
        stats.max_particles = stats.max_particles.max(frame.particles.len());
        stats.max_sparkles = stats.max_sparkles.max(frame.sparkles.len());
        let transitioning = !frame.input.enabled;
        stats.worst_tick = stats.worst_tick.max(vis.last_tick_cost());

        if stats.frames as f32 >= DISPLAY_HZ {
            log::info!(
                "[frame] second={} t={:.2}s view={:?} visible<={} active<={} particles<={} sparkles<={} camera_moving={} worst_tick={:?}",
                second,
                clock.secs(),
                vis.view_mode(),
                stats.max_visible,
                stats.max_active,
                stats.max_particles,
                stats.max_sparkles,
                transitioning,
                stats.worst_tick
            );
            stats = SecondStats::default();
            second += 1;
        }
    }

    log::info!(
        "[frame] done: {} simulated seconds in {:?}",
        second,
        started.elapsed()
    );
    Ok(())
}
