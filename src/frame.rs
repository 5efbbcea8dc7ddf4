use std::time::Duration;

use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;

use keyfall_core::{
    active_pitches_into, ActivePitches, CameraContext, CameraController, CameraPose, ClockStep,
    ClockTime, ConfigError, EffectInstance, HandFilter, InputPolicy, KeyboardLayout, Lane,
    NoteList, ParticlePool, Placement, RawNote, Score, ScoreError, SparklePool, ViewMode,
    ViewProjection, VisualizerConfig,
};

use crate::emit::{EmitStats, Emission};

/// Highlight state for one pressed key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyHighlight {
    pub pitch: u8,
    pub lane: Lane,
    pub color: [f32; 3],
    /// 0.5..1.0, louder notes glow brighter.
    pub intensity: f32,
}

/// Everything the renderer needs for one frame. Borrowed from the
/// [`Visualizer`]'s reusable buffers; valid until the next tick.
#[derive(Debug)]
pub struct FrameSnapshot<'a> {
    pub time: f64,
    pub step: ClockStep,
    pub view: ViewMode,
    pub notes: &'a [Placement],
    pub active: &'a ActivePitches,
    pub keys: &'a [KeyHighlight],
    pub particles: &'a [EffectInstance],
    pub sparkles: &'a [EffectInstance],
    pub camera: CameraPose,
    pub input: InputPolicy,
    pub emitted: EmitStats,
}

/// Per-tick driver: owns the cached note list, the effect pools and the
/// camera controller.
///
/// Typical usage:
/// - Construct with `Visualizer::new(config)`
/// - `load_score(&raw)` whenever a new score has been parsed
/// - Call `tick(clock, dt)` once per rendered frame with the transport's
///   current position and the frame delta
/// - Use `set_hand_filter` and `set_view_mode` from UI controls
///
/// Visible notes and active keys are recomputed from the clock alone every
/// tick. Only the pools and the camera carry state between ticks.
pub struct Visualizer {
    config: VisualizerConfig,
    layout: KeyboardLayout,
    score: Score,
    notes: NoteList,
    hand: HandFilter,
    projection: ViewProjection,
    particles: ParticlePool,
    sparkles: SparklePool,
    camera: CameraController,
    rng: StdRng,
    last_clock: Option<ClockTime>,
    last_tick_cost: Duration,

    visible: Vec<Placement>,
    active: ActivePitches,
    keys: Vec<KeyHighlight>,
    particle_out: Vec<EffectInstance>,
    sparkle_out: Vec<EffectInstance>,
}

impl Visualizer {
    pub fn new(config: VisualizerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let layout = KeyboardLayout::new(&config.layout);
        let projection = ViewProjection::new(ViewMode::default(), &config.motion);
        let particles = ParticlePool::particles(&config.effects);
        let sparkles = SparklePool::sparkles(&config.effects);
        let camera = CameraController::new(&config.camera);
        let rng = StdRng::seed_from_u64(config.seed);
        let particle_out = Vec::with_capacity(particles.capacity());
        let sparkle_out = Vec::with_capacity(sparkles.capacity());
        Ok(Self {
            config,
            layout,
            score: Score::default(),
            notes: NoteList::empty(),
            hand: HandFilter::default(),
            projection,
            particles,
            sparkles,
            camera,
            rng,
            last_clock: None,
            last_tick_cost: Duration::ZERO,
            visible: Vec::new(),
            active: ActivePitches::new(),
            keys: Vec::new(),
            particle_out,
            sparkle_out,
        })
    }

    /// Validate and cache a parsed score. On error the previous score stays
    /// loaded.
    pub fn load_score(&mut self, raw: &[RawNote]) -> Result<(), ScoreError> {
        let score = Score::from_raw(raw)?;
        let left = score
            .notes()
            .iter()
            .filter(|n| n.pitch < self.config.layout.hand_split_pitch)
            .count();
        log::info!(
            "[score] loaded {} notes over {:.2}s (left={}, right={})",
            score.len(),
            score.end_time(),
            left,
            score.len() - left
        );
        self.score = score;
        self.rederive();
        self.last_clock = None;
        self.particles.clear();
        self.sparkles.clear();
        Ok(())
    }

    pub fn clear_score(&mut self) {
        self.score = Score::default();
        self.rederive();
        self.last_clock = None;
    }

    pub fn set_hand_filter(&mut self, hand: HandFilter) {
        if hand != self.hand {
            self.hand = hand;
            self.rederive();
        }
    }

    pub fn set_view_mode(&mut self, view: ViewMode) {
        if view != self.projection.mode() {
            log::debug!("[frame] view mode -> {view:?}");
            self.projection = ViewProjection::new(view, &self.config.motion);
        }
    }

    fn rederive(&mut self) {
        self.notes = NoteList::derive(&self.score, self.hand, &self.layout);
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn layout(&self) -> &KeyboardLayout {
        &self.layout
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Shareable handle to the current note list.
    pub fn notes(&self) -> NoteList {
        self.notes.clone()
    }

    pub fn hand_filter(&self) -> HandFilter {
        self.hand
    }

    pub fn view_mode(&self) -> ViewMode {
        self.projection.mode()
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraController {
        &mut self.camera
    }

    pub fn particles(&self) -> &ParticlePool {
        &self.particles
    }

    pub fn sparkles(&self) -> &SparklePool {
        &self.sparkles
    }

    /// Wall time spent inside the last `tick`.
    pub fn last_tick_cost(&self) -> Duration {
        self.last_tick_cost
    }

    /// Run one frame at clock position `clock`; `dt` is the display frame
    /// delta in seconds and drives effect and camera motion.
    ///
    /// Order within a tick: seek handling, visible set, active set, spawn
    /// requests, pool advance, camera.
    pub fn tick(&mut self, clock: ClockTime, dt: f32) -> FrameSnapshot<'_> {
        let started = Instant::now();
        let t = clock.secs();
        let max_step = self.config.max_playback_step(dt);
        let step = ClockStep::classify(self.last_clock, clock, max_step);
        self.last_clock = Some(clock);

        if step.is_seek() && self.config.clear_effects_on_seek {
            log::debug!(
                "[effects] seek to {t:.3}s, flushing {} particles / {} sparkles",
                self.particles.len(),
                self.sparkles.len()
            );
            self.particles.clear();
            self.sparkles.clear();
        }

        self.projection.visible_into(&self.notes, t, &mut self.visible);
        active_pitches_into(t, &self.notes, &mut self.active);
        self.keys.clear();
        self.keys.extend(self.active.iter().map(|k| KeyHighlight {
            pitch: k.pitch,
            lane: k.lane,
            color: k.color,
            intensity: 0.5 + 0.5 * k.velocity,
        }));

        let emission = Emission {
            notes: &self.notes,
            active: &self.active,
            projection: &self.projection,
            effects: &self.config.effects,
        };
        let mut emitted = EmitStats::default();
        if let ClockStep::Advance { from } = step {
            emission.onset_bursts(
                from,
                t,
                &mut self.particles,
                &mut self.sparkles,
                &mut self.rng,
                &mut emitted,
            );
        }
        emission.sustain(
            dt,
            &mut self.particles,
            &mut self.sparkles,
            &mut self.rng,
            &mut emitted,
        );

        self.particles.advance(dt);
        self.sparkles.advance(dt);

        self.camera.set_context(CameraContext {
            has_data: !self.score.is_empty(),
            view: self.projection.mode(),
        });
        self.camera.update(dt);

        self.particle_out.clear();
        self.particles.instances_into(&mut self.particle_out);
        self.sparkle_out.clear();
        self.sparkles.instances_into(&mut self.sparkle_out);

        self.last_tick_cost = started.elapsed();

        FrameSnapshot {
            time: t,
            step,
            view: self.projection.mode(),
            notes: &self.visible,
            active: &self.active,
            keys: &self.keys,
            particles: &self.particle_out,
            sparkles: &self.sparkle_out,
            camera: self.camera.pose(),
            input: self.camera.input_policy(),
            emitted,
        }
    }
}
