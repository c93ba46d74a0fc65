//! ページめくり音（Web Audio API で合成）

use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioContextState, AudioScheduledSourceNode, BiquadFilterType};

const FLIP_DURATION_SEC: f64 = 0.3;
const FILTER_FREQUENCY_HZ: f32 = 1000.0;
const FILTER_Q: f32 = 0.5;
const PEAK_GAIN: f32 = 0.05;
const ATTACK_SEC: f64 = 0.05;
const VIBRATE_MS: u32 = 30;

pub fn sound_icon(enabled: bool) -> &'static str {
    if enabled {
        "🔊"
    } else {
        "🔇"
    }
}

#[derive(Default)]
pub struct SoundEngine {
    enabled: bool,
    context: Option<AudioContext>,
}

impl SoundEngine {
    pub fn new(enabled: bool) -> Self {
        let mut engine = Self::default();
        engine.set_enabled(enabled);
        engine
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// オンにする時は AudioContext を作成、停止中なら再開する
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            return;
        }
        match &self.context {
            None => match AudioContext::new() {
                Ok(ctx) => self.context = Some(ctx),
                Err(e) => log::warn!("[sound] Web Audio API 非対応: {:?}", e),
            },
            Some(ctx) if ctx.state() == AudioContextState::Suspended => {
                if let Err(e) = ctx.resume() {
                    log::warn!("[sound] AudioContext 再開失敗: {:?}", e);
                }
            }
            Some(_) => {}
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    /// めくり音を鳴らす（オフ、または音声が使えない時は何もしない）
    pub fn play_flip(&self) {
        if !self.enabled {
            return;
        }
        if let Some(ctx) = &self.context {
            if let Err(e) = play_noise_burst(ctx) {
                log::warn!("[sound] 再生失敗: {:?}", e);
            }
        }
        vibrate(VIBRATE_MS);
    }
}

/// 対応端末のみ振動させる（Safari等は navigator.vibrate が無い）
fn vibrate(duration_ms: u32) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let navigator = window.navigator();
    let supported = js_sys::Reflect::has(&navigator, &JsValue::from_str("vibrate")).unwrap_or(false);
    if supported {
        let _ = navigator.vibrate_with_duration(duration_ms);
    }
}

/// ホワイトノイズ → バンドパス → 減衰エンベロープ
fn play_noise_burst(ctx: &AudioContext) -> Result<(), JsValue> {
    let sample_rate = ctx.sample_rate();
    let length = (f64::from(sample_rate) * FLIP_DURATION_SEC) as u32;
    let buffer = ctx.create_buffer(1, length, sample_rate)?;
    let mut noise: Vec<f32> = (0..length)
        .map(|_| (js_sys::Math::random() * 2.0 - 1.0) as f32)
        .collect();
    buffer.copy_to_channel(&mut noise, 0)?;

    let source = ctx.create_buffer_source()?;
    source.set_buffer(Some(&buffer));

    let now = ctx.current_time();
    let filter = ctx.create_biquad_filter()?;
    filter.set_type(BiquadFilterType::Bandpass);
    filter.frequency().set_value_at_time(FILTER_FREQUENCY_HZ, now)?;
    filter.q().set_value_at_time(FILTER_Q, now)?;

    let gain = ctx.create_gain()?;
    let envelope = gain.gain();
    envelope.set_value_at_time(0.0, now)?;
    envelope.linear_ramp_to_value_at_time(PEAK_GAIN, now + ATTACK_SEC)?;
    envelope.exponential_ramp_to_value_at_time(0.001, now + FLIP_DURATION_SEC)?;

    source.connect_with_audio_node(&filter)?;
    filter.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;

    let scheduled: &AudioScheduledSourceNode = source.as_ref();
    scheduled.start_with_when(now)?;
    scheduled.stop_with_when(now + FLIP_DURATION_SEC)?;
    Ok(())
}
