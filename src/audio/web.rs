//! Web Audio backend
//!
//! Implements the synthesis primitives on an `AudioContext` and the
//! sequencer timer on `setInterval`. Browsers keep the context suspended
//! until a user gesture, so every call resumes it first.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AudioContext, AudioContextState, BiquadFilterType, OscillatorType};

use super::music::IntervalTimer;
use super::{Noise, NoiseFilter, Synth, Tone, Waveform};

/// Synthesis primitives on the Web Audio API
#[derive(Clone)]
pub struct WebSynth {
    ctx: Option<AudioContext>,
}

impl Default for WebSynth {
    fn default() -> Self {
        Self::new()
    }
}

impl WebSynth {
    pub fn new() -> Self {
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx }
    }

    fn context(&self) -> Option<&AudioContext> {
        let ctx = self.ctx.as_ref()?;
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
    }
}

impl Synth for WebSynth {
    fn tone(&self, tone: Tone) {
        let Some(ctx) = self.context() else { return };
        let Ok(osc) = ctx.create_oscillator() else {
            return;
        };
        let Ok(gain) = ctx.create_gain() else { return };

        osc.set_type(match tone.wave {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Triangle => OscillatorType::Triangle,
        });
        osc.frequency().set_value(tone.freq);
        gain.gain().set_value(tone.volume);
        if osc.connect_with_audio_node(&gain).is_err() {
            return;
        }
        if gain.connect_with_audio_node(&ctx.destination()).is_err() {
            return;
        }

        osc.start().ok();
        osc.stop_with_when(ctx.current_time() + tone.secs as f64).ok();
    }

    fn noise(&self, noise: Noise) {
        let Some(ctx) = self.context() else { return };
        let sample_rate = ctx.sample_rate();
        let length = (sample_rate * noise.secs) as u32;
        let Ok(buffer) = ctx.create_buffer(1, length.max(1), sample_rate) else {
            return;
        };

        // White noise with a linear fade-out over the burst
        let mut data = vec![0.0f32; length.max(1) as usize];
        let len = data.len() as f32;
        for (i, sample) in data.iter_mut().enumerate() {
            let fade = 1.0 - i as f32 / len;
            *sample = (js_sys::Math::random() as f32 * 2.0 - 1.0) * fade;
        }
        if buffer.copy_to_channel(&mut data, 0).is_err() {
            return;
        }

        let Ok(source) = ctx.create_buffer_source() else {
            return;
        };
        source.set_buffer(Some(&buffer));

        let Ok(filter) = ctx.create_biquad_filter() else {
            return;
        };
        filter.set_type(match noise.filter {
            NoiseFilter::Lowpass => BiquadFilterType::Lowpass,
            NoiseFilter::Highpass => BiquadFilterType::Highpass,
            NoiseFilter::Bandpass => BiquadFilterType::Bandpass,
        });
        filter.frequency().set_value(noise.cutoff);

        let Ok(gain) = ctx.create_gain() else { return };
        gain.gain().set_value(noise.volume);

        if source.connect_with_audio_node(&filter).is_err()
            || filter.connect_with_audio_node(&gain).is_err()
            || gain.connect_with_audio_node(&ctx.destination()).is_err()
        {
            return;
        }

        source.start().ok();
        source
            .stop_with_when(ctx.current_time() + noise.secs as f64)
            .ok();
    }
}

/// `setInterval`-backed sequencer timer
#[derive(Default)]
pub struct WebIntervalTimer {
    handle: Option<i32>,
    // Kept alive for as long as the interval runs
    closure: Option<Closure<dyn FnMut()>>,
}

impl WebIntervalTimer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IntervalTimer for WebIntervalTimer {
    fn start(&mut self, period_ms: f64, tick: Box<dyn FnMut()>) {
        self.stop();
        let closure = Closure::wrap(tick);
        let Some(window) = web_sys::window() else {
            return;
        };
        self.handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms as i32,
            )
            .ok();
        self.closure = Some(closure);
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
        self.closure = None;
    }
}
