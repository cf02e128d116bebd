use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

const GAIN: f32 = 0.06;
const RAMP_FLOOR: f32 = 0.0001;
/// Extra time the oscillator runs after the ramp so it does not click.
const STOP_TAIL_SECS: f64 = 0.02;

/// Short sine tones for match and fail feedback.
#[derive(Debug)]
pub(crate) struct ToneSynth {
    ctx: AudioContext,
}

impl ToneSynth {
    /// `None` when the browser has no Web Audio.
    pub(crate) fn new() -> Option<Self> {
        match AudioContext::new() {
            Ok(ctx) => Some(Self { ctx }),
            Err(err) => {
                log::warn!("audio disabled: {:?}", err);
                None
            }
        }
    }

    pub(crate) fn play_match(&self) {
        self.play(880., 0.12);
        self.play(1320., 0.08);
    }

    pub(crate) fn play_fail(&self) {
        self.play(220., 0.12);
    }

    fn play(&self, frequency: f32, duration: f64) {
        if let Err(err) = self.tone(frequency, duration) {
            log::warn!("failed to play {}Hz tone: {:?}", frequency, err);
        }
    }

    fn tone(&self, frequency: f32, duration: f64) -> Result<(), JsValue> {
        let oscillator = self.ctx.create_oscillator()?;
        let gain = self.ctx.create_gain()?;
        oscillator.set_type(OscillatorType::Sine);
        oscillator.frequency().set_value(frequency);
        gain.gain().set_value(GAIN);
        oscillator.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&self.ctx.destination())?;

        let end = self.ctx.current_time() + duration;
        oscillator.start()?;
        gain.gain().exponential_ramp_to_value_at_time(RAMP_FLOOR, end)?;
        oscillator.stop_with_when(end + STOP_TAIL_SECS)?;
        Ok(())
    }
}
