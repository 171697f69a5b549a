//! Frame loop controller
//!
//! Owns the run lifecycle (Idle -> Running -> Over), clamps frame deltas,
//! routes simulation events to audio and persistence, and feeds the render
//! and HUD sinks. All platform collaborators come in as explicit trait
//! objects; the engine itself has no platform dependencies.

use crate::audio::music::MusicMode;
use crate::audio::{AudioSink, SoundCue};
use crate::consts::*;
use crate::input::InputSnapshot;
use crate::persistence::ScoreStore;
use crate::render::{HudFrame, HudSink, RenderSink, Snapshot};
use crate::sim::{self, GameEvent, GamePhase, GameState};

/// Everything the loop controller talks to outside the simulation
pub struct Collaborators<'a> {
    pub render: &'a mut dyn RenderSink,
    pub hud: &'a mut dyn HudSink,
    pub audio: &'a mut dyn AudioSink,
    pub store: &'a mut dyn ScoreStore,
}

/// The simulation loop controller
pub struct Engine {
    pub state: GameState,
    best: u32,
    /// Set by the first user gesture; music can only run after it
    audio_unlocked: bool,
    last_frame_ms: Option<f64>,
    last_hud_ms: f64,
    events: Vec<GameEvent>,
}

impl Engine {
    /// Create the engine, pulling the stored best score (zero when absent
    /// or malformed)
    pub fn new(seed: u64, store: &dyn ScoreStore) -> Self {
        let best = store.load().unwrap_or(0);
        log::info!("Engine ready, best score {best}");
        Self {
            state: GameState::new(seed),
            best,
            audio_unlocked: false,
            last_frame_ms: None,
            last_hud_ms: 0.0,
            events: Vec::new(),
        }
    }

    pub fn running(&self) -> bool {
        self.state.phase == GamePhase::Running
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Begin a run. No-op while one is already in progress.
    pub fn start(&mut self, c: &mut Collaborators) {
        if self.state.phase == GamePhase::Running {
            return;
        }
        self.state.reset();
        self.state.phase = GamePhase::Running;
        self.last_frame_ms = None;
        self.last_hud_ms = 0.0;
        self.audio_unlocked = true;
        c.audio.music(MusicMode::Action);
        log::info!("Run started");
    }

    /// Return to Idle from any phase, clearing all run-scoped state. Best
    /// score is retained. Calm music resumes if audio was ever unlocked.
    pub fn reset(&mut self, c: &mut Collaborators) {
        self.state.reset();
        self.last_frame_ms = None;
        self.last_hud_ms = 0.0;
        c.hud.update(&self.hud_frame());
        if self.audio_unlocked {
            c.audio.music(MusicMode::Calm);
        }
    }

    /// First user gesture: start the calm backdrop exactly once
    pub fn unlock_audio(&mut self, c: &mut Collaborators) {
        if !self.audio_unlocked {
            self.audio_unlocked = true;
            c.audio.music(MusicMode::Calm);
        }
    }

    /// Advance one frame. `timestamp_ms` must be monotonically increasing;
    /// the delta is clamped so a stalled tab cannot blow up the simulation.
    pub fn frame(&mut self, timestamp_ms: f64, input: &InputSnapshot, c: &mut Collaborators) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        let last = *self.last_frame_ms.get_or_insert(timestamp_ms);
        let dt = (((timestamp_ms - last) / 1000.0) as f32).min(MAX_FRAME_DT);
        self.last_frame_ms = Some(timestamp_ms);

        let mut events = std::mem::take(&mut self.events);
        events.clear();
        sim::tick(&mut self.state, input, dt, &mut events);

        for &event in &events {
            c.audio.cue(SoundCue::for_event(event));
            if event == GameEvent::RunEnded {
                c.audio.music(MusicMode::Calm);
                let score = self.state.display_score();
                if score > self.best {
                    self.best = score;
                    c.store.save(score);
                    log::info!("New best score: {score}");
                }
            }
        }
        self.events = events;

        // The step that ends the run still gets drawn; nothing advances
        // after it
        c.render.draw(&Snapshot {
            player: &self.state.player,
            hazards: &self.state.hazards,
            pickups: &self.state.pickups,
            pulses: &self.state.pulses,
            shield_active: self.state.shield > 0.0,
            flash: self.state.flash,
            arena_size: ARENA_SIZE,
        });

        // HUD updates ride wall time, not the sim delta
        if timestamp_ms - self.last_hud_ms > HUD_INTERVAL_MS {
            self.last_hud_ms = timestamp_ms;
            c.hud.update(&self.hud_frame());
        }
    }

    fn hud_frame(&self) -> HudFrame {
        HudFrame {
            score: self.state.display_score(),
            time: self.state.elapsed.floor() as u32,
            best: self.best,
            danger: sim::progression::danger(self.state.elapsed),
            status: match self.state.phase {
                GamePhase::Idle => "Warm-up",
                _ if self.state.shield > 0.0 => "Shielded",
                _ => "Survive",
            },
        }
    }
}
