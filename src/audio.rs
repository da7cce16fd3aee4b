use crate::constants::CHIME_NOISE_SEC;
use folio_core::chime::{noise_buffer, ChimePlan, Envelope, Ramp, Voice, NOISE_SEED};
use folio_core::loading::ChimeLatch;
use web_sys as web;

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

fn schedule(param: &web::AudioParam, env: &Envelope, t0: f64) {
    let at = t0 + env.at as f64;
    let res = match env.ramp {
        Ramp::Linear => param.linear_ramp_to_value_at_time(env.value, at),
        // Exponential ramps cannot reach zero.
        Ramp::Exponential => param.exponential_ramp_to_value_at_time(env.value.max(1e-4), at),
    };
    if let Err(e) = res {
        log::warn!("[audio] envelope at {:.2}s rejected: {:?}", at, e);
    }
}

fn play_voice(
    audio_ctx: &web::AudioContext,
    voice: &Voice,
    out: &web::GainNode,
    t0: f64,
) -> Result<(), ()> {
    let osc = web::OscillatorNode::new(audio_ctx).map_err(|e| {
        log::error!("OscillatorNode error: {:?}", e);
    })?;
    osc.set_type(web::OscillatorType::Sine);
    osc.frequency().set_value(voice.frequency);
    let gain = create_gain(audio_ctx, voice.initial_gain, "voice")?;
    let start = t0 + voice.start as f64;
    let _ = gain.gain().set_value_at_time(voice.initial_gain, start);
    for env in &voice.gain {
        schedule(&gain.gain(), env, t0);
    }
    let _ = osc.connect_with_audio_node(&gain);
    let _ = gain.connect_with_audio_node(out);
    let _ = osc.start_with_when(start);
    let _ = osc.stop_with_when(t0 + voice.stop as f64);
    Ok(())
}

fn play_noise(
    audio_ctx: &web::AudioContext,
    plan: &ChimePlan,
    out: &web::GainNode,
    t0: f64,
) -> Result<(), ()> {
    let sweep = &plan.noise;
    let sr = audio_ctx.sample_rate();
    let len = (sr * CHIME_NOISE_SEC.min(sweep.duration)) as u32;
    let buffer = audio_ctx.create_buffer(1, len.max(1), sr).map_err(|e| {
        log::error!("AudioBuffer error: {:?}", e);
    })?;
    let mut samples = noise_buffer(len.max(1) as usize, NOISE_SEED);
    let _ = buffer.copy_to_channel(&mut samples, 0);

    let src = audio_ctx.create_buffer_source().map_err(|e| {
        log::error!("AudioBufferSourceNode error: {:?}", e);
    })?;
    src.set_buffer(Some(&buffer));

    let filter = web::BiquadFilterNode::new(audio_ctx).map_err(|e| {
        log::error!("BiquadFilterNode error: {:?}", e);
    })?;
    filter.set_type(web::BiquadFilterType::Lowpass);
    let _ = filter.frequency().set_value_at_time(sweep.filter_start_hz, t0);
    schedule(&filter.frequency(), &sweep.filter, t0);

    let gain = create_gain(audio_ctx, sweep.initial_gain, "noise")?;
    let _ = gain.gain().set_value_at_time(sweep.initial_gain, t0);
    schedule(&gain.gain(), &sweep.gain, t0);

    let _ = src.connect_with_audio_node(&filter);
    let _ = filter.connect_with_audio_node(&gain);
    let _ = gain.connect_with_audio_node(out);
    let _ = src.start_with_when(t0);
    let _ = src.stop_with_when(t0 + sweep.duration as f64);
    Ok(())
}

/// Build and schedule every node of `plan`, starting now.
pub fn play_chime(audio_ctx: &web::AudioContext, plan: &ChimePlan) -> Result<(), ()> {
    let t0 = audio_ctx.current_time();
    let master = create_gain(audio_ctx, plan.master_gain, "chime master")?;
    let _ = master.gain().set_value_at_time(plan.master_gain, t0);
    schedule(&master.gain(), &plan.master, t0);
    let _ = master.connect_with_audio_node(&audio_ctx.destination());

    for voice in plan.pad.iter().chain(plan.chimes.iter()) {
        play_voice(audio_ctx, voice, &master, t0)?;
    }
    play_noise(audio_ctx, plan, &master, t0)?;
    log::info!("[audio] startup chime scheduled ({:.1}s)", plan.length());
    Ok(())
}

/// Audio context plus the latch that keeps the chime to a single play.
pub struct ChimePlayer {
    ctx: web::AudioContext,
    latch: ChimeLatch,
}

impl ChimePlayer {
    pub fn new() -> Option<Self> {
        match web::AudioContext::new() {
            Ok(ctx) => Some(Self {
                ctx,
                latch: ChimeLatch::default(),
            }),
            Err(e) => {
                log::warn!("[audio] AudioContext unavailable: {:?}", e);
                None
            }
        }
    }

    pub fn has_played(&self) -> bool {
        self.latch.has_fired()
    }

    /// Play on mount if the browser allows audio without a gesture.
    pub fn try_autoplay(&mut self) -> bool {
        if self.ctx.state() != web::AudioContextState::Running {
            log::info!("[audio] autoplay blocked; waiting for first interaction");
            return false;
        }
        self.play_once()
    }

    /// First click or keypress: resume the context and play if not yet done.
    pub fn unlock(&mut self) -> bool {
        let _ = self.ctx.resume();
        self.play_once()
    }

    fn play_once(&mut self) -> bool {
        if !self.latch.fire() {
            return false;
        }
        if play_chime(&self.ctx, &ChimePlan::startup()).is_err() {
            log::warn!("[audio] startup chime failed; continuing silently");
        }
        true
    }
}
