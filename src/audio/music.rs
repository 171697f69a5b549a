//! Background music sequencers
//!
//! Two looping melodic lines - a calm one for menus and a driving one for
//! active runs. Stepping is pure (`Sequencer`); the wall-clock scheduling
//! lives behind a cancellable `IntervalTimer` so only one sequencer can
//! ever be running.

use super::{Synth, Tone, Waveform};

/// Calm melody (A3-centered), quarter notes at 78 BPM
const CALM_MELODY: [f32; 8] = [220.0, 246.9, 196.0, 246.9, 220.0, 196.0, 174.6, 196.0];
/// Action melody (C4-centered), eighth notes at 120 BPM
const ACTION_MELODY: [f32; 6] = [261.6, 293.7, 329.6, 392.0, 349.2, 293.7];
/// Bass note layered under the action melody every 4th step (C3)
const ACTION_BASS: Note = Note {
    freq: 130.8,
    secs: 0.1,
    volume: 0.03,
};

/// Background music mode. Only one runs at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicMode {
    Calm,
    Action,
}

impl MusicMode {
    /// Interval between sequencer steps, derived from tempo
    pub fn step_ms(self) -> f64 {
        match self {
            MusicMode::Calm => 60_000.0 / 78.0,
            MusicMode::Action => 60_000.0 / 120.0 / 2.0,
        }
    }

    fn melody(self) -> &'static [f32] {
        match self {
            MusicMode::Calm => &CALM_MELODY,
            MusicMode::Action => &ACTION_MELODY,
        }
    }

    fn note_secs(self) -> f32 {
        match self {
            MusicMode::Calm => 0.28,
            MusicMode::Action => 0.16,
        }
    }

    fn note_volume(self) -> f32 {
        match self {
            MusicMode::Calm => 0.03,
            MusicMode::Action => 0.04,
        }
    }
}

/// A single melodic note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub freq: f32,
    pub secs: f32,
    pub volume: f32,
}

/// Notes to trigger at one sequencer step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepNotes {
    pub melody: Note,
    pub bass: Option<Note>,
}

/// Steps through a mode's melody; the step counter starts at zero whenever
/// a mode is (re)started
#[derive(Debug, Clone)]
pub struct Sequencer {
    mode: MusicMode,
    step: u32,
}

impl Sequencer {
    pub fn new(mode: MusicMode) -> Self {
        Self { mode, step: 0 }
    }

    /// Notes for the current step; advances the counter
    pub fn tick(&mut self) -> StepNotes {
        let melody = self.mode.melody();
        let freq = melody[self.step as usize % melody.len()];
        let notes = StepNotes {
            melody: Note {
                freq,
                secs: self.mode.note_secs(),
                volume: self.mode.note_volume(),
            },
            bass: match self.mode {
                MusicMode::Action if self.step % 4 == 0 => Some(ACTION_BASS),
                _ => None,
            },
        };
        self.step += 1;
        notes
    }
}

/// Cancellable periodic timer. `start` replaces any previous schedule.
pub trait IntervalTimer {
    fn start(&mut self, period_ms: f64, tick: Box<dyn FnMut()>);
    fn stop(&mut self);
}

/// Owns the active sequencer and its timer. Starting the mode that is
/// already playing is a no-op; switching tears the old timer down first.
pub struct MusicDirector<T> {
    timer: T,
    mode: Option<MusicMode>,
}

impl<T: IntervalTimer> MusicDirector<T> {
    pub fn new(timer: T) -> Self {
        Self { timer, mode: None }
    }

    pub fn mode(&self) -> Option<MusicMode> {
        self.mode
    }

    /// Start a mode. The first note fires immediately; the rest ride the
    /// interval timer.
    pub fn play<S: Synth + Clone + 'static>(&mut self, mode: MusicMode, synth: &S, gain: f32) {
        if self.mode == Some(mode) {
            return;
        }
        self.stop();
        self.mode = Some(mode);

        let mut sequencer = Sequencer::new(mode);
        let synth = synth.clone();
        let mut fire = move || {
            let notes = sequencer.tick();
            play_note(&synth, notes.melody, gain);
            if let Some(bass) = notes.bass {
                play_note(&synth, bass, gain);
            }
        };
        fire();
        self.timer.start(mode.step_ms(), Box::new(fire));
    }

    /// Cancel the running sequencer, if any
    pub fn stop(&mut self) {
        self.timer.stop();
        self.mode = None;
    }
}

fn play_note<S: Synth>(synth: &S, note: Note, gain: f32) {
    if gain <= 0.0 {
        return;
    }
    synth.tone(Tone {
        freq: note.freq,
        secs: note.secs,
        volume: note.volume * gain,
        wave: Waveform::Sine,
    });
}
