//! Audio system using Web Audio API
//!
//! Procedurally generated cues - no sound files to preload. Every failure
//! here is swallowed: sound is never allowed to stall a frame.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::game::FeedbackSink;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_volume(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.ctx.is_some()
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    /// Play the cue for a simulation event
    pub fn play(&self, event: &GameEvent) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match *event {
            GameEvent::Splash {
                volume,
                frequency,
                duration,
            } => self.play_splash(ctx, volume, frequency, duration),
            GameEvent::OrbSpawned => self.play_orb_spawn(ctx),
            GameEvent::OrbCollected => self.play_orb_collect(ctx),
            GameEvent::OrbMissed => self.play_orb_miss(ctx),
            GameEvent::SessionEnded => self.play_session_end(ctx),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Water splash - downward sine blip; louder and longer for the super
    fn play_splash(&self, ctx: &AudioContext, volume: f32, frequency: f32, duration: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, frequency, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();
        let d = duration as f64;

        gain.gain()
            .set_value_at_time(self.volume * volume, t)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + d)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(frequency * 0.45, t + d)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + d + 0.05).ok();
    }

    /// Orb appears - soft rising chime
    fn play_orb_spawn(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 520.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(self.volume * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(880.0, t + 0.25)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.35).ok();
    }

    /// Orb caught - two-note arpeggio
    fn play_orb_collect(&self, ctx: &AudioContext) {
        let t = ctx.current_time();
        for (i, freq) in [660.0_f32, 990.0].iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Square) else {
                continue;
            };
            let start = t + i as f64 * 0.07;

            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain()
                .set_value_at_time(self.volume * 0.15, start)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.15)
                .ok();

            osc.start().ok();
            osc.stop_with_when(start + 0.2).ok();
        }
    }

    /// Orb hits the ground - dull thud
    fn play_orb_miss(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 140.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(self.volume * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.2)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.25).ok();
    }

    /// Time's up - descending sawtooth
    fn play_session_end(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 440.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(self.volume * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.8)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(110.0, t + 0.8)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.9).ok();
    }
}

impl FeedbackSink for AudioManager {
    fn cue(&mut self, event: &GameEvent) {
        self.play(event);
    }
}
