//! Procedural audio
//!
//! No sound files: every effect is synthesized on demand from two
//! primitives - a plain oscillator tone and a filtered, fading noise
//! burst. Each primitive call is independent and self-terminating.

pub mod music;
#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

/// Biquad filter applied to a noise burst
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseFilter {
    Lowpass,
    Highpass,
    Bandpass,
}

/// One oscillator tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub secs: f32,
    pub volume: f32,
    pub wave: Waveform,
}

/// One filtered white-noise burst with a linear fade-out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Noise {
    pub secs: f32,
    pub volume: f32,
    pub filter: NoiseFilter,
    pub cutoff: f32,
}

/// Platform synthesis primitives
pub trait Synth {
    fn tone(&self, tone: Tone);
    fn noise(&self, noise: Noise);
}

/// A single primitive call within a cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CuePart {
    Tone(Tone),
    Noise(Noise),
}

/// The game's fixed sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Hazard bounced off the shield
    Hit,
    ShieldCollect,
    BoostCollect,
    GameOver,
}

impl SoundCue {
    /// Hardcoded composition of primitive calls for this cue
    pub fn parts(self) -> &'static [CuePart] {
        match self {
            SoundCue::Hit => &[CuePart::Tone(Tone {
                freq: 140.0,
                secs: 0.09,
                volume: 0.08,
                wave: Waveform::Triangle,
            })],
            SoundCue::ShieldCollect => &[
                CuePart::Noise(Noise {
                    secs: 0.18,
                    volume: 0.05,
                    filter: NoiseFilter::Lowpass,
                    cutoff: 1400.0,
                }),
                CuePart::Tone(Tone {
                    freq: 240.0,
                    secs: 0.18,
                    volume: 0.03,
                    wave: Waveform::Sine,
                }),
            ],
            SoundCue::BoostCollect => &[
                CuePart::Noise(Noise {
                    secs: 0.12,
                    volume: 0.03,
                    filter: NoiseFilter::Bandpass,
                    cutoff: 2600.0,
                }),
                CuePart::Tone(Tone {
                    freq: 640.0,
                    secs: 0.12,
                    volume: 0.025,
                    wave: Waveform::Sine,
                }),
            ],
            SoundCue::GameOver => &[CuePart::Tone(Tone {
                freq: 90.0,
                secs: 0.14,
                volume: 0.08,
                wave: Waveform::Triangle,
            })],
        }
    }

    /// Cue raised by a simulation event
    pub fn for_event(event: GameEvent) -> SoundCue {
        match event {
            GameEvent::ShieldCollected => SoundCue::ShieldCollect,
            GameEvent::BoostCollected => SoundCue::BoostCollect,
            GameEvent::ShieldedHit => SoundCue::Hit,
            GameEvent::RunEnded => SoundCue::GameOver,
        }
    }
}

/// Plays cues through a synth, scaled by the user's volume settings
pub struct AudioManager<S> {
    synth: S,
    sfx_gain: f32,
}

impl<S: Synth> AudioManager<S> {
    pub fn new(synth: S) -> Self {
        Self {
            synth,
            sfx_gain: 1.0,
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_gain = settings.sfx_gain();
    }

    /// Play a sound cue
    pub fn play(&self, cue: SoundCue) {
        if self.sfx_gain <= 0.0 {
            return;
        }
        for part in cue.parts() {
            match *part {
                CuePart::Tone(tone) => self.synth.tone(Tone {
                    volume: tone.volume * self.sfx_gain,
                    ..tone
                }),
                CuePart::Noise(noise) => self.synth.noise(Noise {
                    volume: noise.volume * self.sfx_gain,
                    ..noise
                }),
            }
        }
    }
}

/// What the loop controller asks of the audio subsystem
pub trait AudioSink {
    fn cue(&mut self, cue: SoundCue);
    fn music(&mut self, mode: music::MusicMode);
}
