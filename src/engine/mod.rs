// Purpose: the owning engine, its configuration and the per-call scheduler.

pub mod message;
pub mod state;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::{
        curves::{voltage_to_sample, FULL_SCALE, OUT_CENTER_LEVEL_VOLTAGE},
        rate::StepRates,
    },
    error::CsgError,
    params::{
        ControlParameters, EnvelopeMode, ExternalVoltages, MixerMode, NoiseClock, VcoMode,
    },
    DEFAULT_SAMPLE_RATE, SUBSTEPS_PER_UPDATE,
};

use self::{message::ControlMessage, message::MessageReceiver, state::CircuitState};

#[cfg(feature = "rtrb")]
use self::message::ControlHandle;

/// Initial settings of the circuit the chip is wired into.
///
/// The output resistors seed the engine's parameter snapshot. A later
/// [`ControlMessage::Params`] replaces them along with everything else.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: u32,
    pub amplitude_res: f64, // ohms
    pub feedback_res: f64,  // ohms
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            amplitude_res: 100.0,
            feedback_res: 100.0,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), CsgError> {
        if self.sample_rate == 0 {
            return Err(CsgError::ZeroSampleRate);
        }
        check_resistance("amplitude", self.amplitude_res)?;
        check_resistance("feedback", self.feedback_res)?;
        Ok(())
    }
}

fn check_resistance(name: &'static str, value: f64) -> Result<(), CsgError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CsgError::InvalidResistance { name, value })
    }
}

/// One settled output of the chip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Signed sample, zero at the center level.
    pub value: f64,
    /// VCO capacitor voltage, the chip's secondary triangle output.
    pub vco_voltage: f64,
}

impl Sample {
    /// Primary value as 16-bit PCM, rounded and saturated.
    pub fn to_i16(self) -> i16 {
        self.value.round().clamp(-FULL_SCALE - 1.0, FULL_SCALE) as i16
    }
}

/// A complete emulated chip: parameters, circuit state and scheduler.
///
/// All methods are plain `&mut self` calls; the engine never locks. To drive it
/// from another thread, build it with [`CsgEngine::with_control`] and send
/// messages through the returned handle. Pending messages are applied at the
/// start of the next [`update`](CsgEngine::update).
pub struct CsgEngine {
    params: ControlParameters,
    state: CircuitState,
    sample_rate: u32,
    rx: Option<Box<dyn MessageReceiver + Send>>,
}

impl CsgEngine {
    /// Build an engine, replacing a zero sample rate with [`DEFAULT_SAMPLE_RATE`].
    pub fn new(config: EngineConfig) -> Self {
        let sample_rate = if config.sample_rate == 0 {
            tracing::warn!(sample_rate = DEFAULT_SAMPLE_RATE, "zero sample rate, using default");
            DEFAULT_SAMPLE_RATE
        } else {
            config.sample_rate
        };

        tracing::info!(
            sample_rate,
            amplitude_res = config.amplitude_res,
            feedback_res = config.feedback_res,
            "csg engine created"
        );

        Self {
            params: ControlParameters {
                amplitude_res: config.amplitude_res,
                feedback_res: config.feedback_res,
                ..ControlParameters::default()
            },
            state: CircuitState::new(),
            sample_rate,
            rx: None,
        }
    }

    pub fn try_new(config: EngineConfig) -> Result<Self, CsgError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Build an engine fed by any message queue.
    pub fn with_receiver<R>(config: EngineConfig, rx: R) -> Self
    where
        R: MessageReceiver + Send + 'static,
    {
        let mut engine = Self::new(config);
        engine.rx = Some(Box::new(rx));
        engine
    }

    /// Build an engine together with a lock-free control handle.
    #[cfg(feature = "rtrb")]
    pub fn with_control(config: EngineConfig, capacity: usize) -> (Self, ControlHandle) {
        let (tx, rx) = rtrb::RingBuffer::<ControlMessage>::new(capacity);
        (Self::with_receiver(config, rx), ControlHandle::new(tx))
    }

    /// Return the chip to power-on.
    ///
    /// Every capacitor and flip-flop is cleared, the VCO goes back to SLF
    /// control, external pin voltages are released and the output is enabled.
    /// Component values are kept.
    pub fn reset(&mut self) {
        tracing::debug!("csg engine reset");
        self.power_on();
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Ignored when zero.
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        if sample_rate == 0 {
            tracing::warn!("ignoring zero sample rate");
            return;
        }
        tracing::debug!(sample_rate, "sample rate changed");
        self.sample_rate = sample_rate;
    }

    pub fn params(&self) -> &ControlParameters {
        &self.params
    }

    pub fn state(&self) -> &CircuitState {
        &self.state
    }

    /// Replace every parameter at once.
    pub fn set_params(&mut self, params: ControlParameters) {
        self.params = params;
    }

    pub fn set_vco_params(&mut self, time_constant: f64, voltage: f64) {
        self.params.vco_res = time_constant;
        self.params.vco_voltage = voltage;
    }

    pub fn set_slf_params(&mut self, time_constant: f64, cap: f64) {
        self.params.slf_res = time_constant;
        self.params.slf_cap = cap;
    }

    pub fn set_noise_params(&mut self, clock_res: f64, filter_res: f64, filter_cap: f64) {
        self.params.noise_clock_res = clock_res;
        self.params.noise_filter_res = filter_res;
        self.params.noise_filter_cap = filter_cap;
    }

    pub fn set_decay_res(&mut self, res: f64) {
        self.params.decay_res = res;
    }

    pub fn set_attack_params(&mut self, res: f64, cap: f64) {
        self.params.attack_res = res;
        self.params.attack_decay_cap = cap;
    }

    pub fn set_pitch_voltage(&mut self, voltage: f64) {
        self.params.pitch_voltage = voltage;
    }

    /// Mixer enable lines: a = VCO, b = SLF, c = noise.
    pub fn set_mixer_params(&mut self, a: bool, b: bool, c: bool) {
        self.params.mixer = MixerMode::from_bits(a, b, c);
    }

    pub fn set_envelope_mode(&mut self, mode: EnvelopeMode) {
        self.params.envelope_mode = mode;
    }

    pub fn set_vco_mode(&mut self, mode: VcoMode) {
        self.params.vco_mode = mode;
    }

    pub fn set_one_shot_params(&mut self, res: f64, cap: f64) {
        self.params.one_shot_res = res;
        self.params.one_shot_cap = cap;
    }

    pub fn set_amplitude_res(&mut self, res: f64) {
        self.params.amplitude_res = res;
    }

    pub fn set_feedback_res(&mut self, res: f64) {
        self.params.feedback_res = res;
    }

    pub fn set_enable(&mut self, enabled: bool) {
        self.params.enabled = enabled;
    }

    pub fn set_external_voltages(&mut self, external: ExternalVoltages) {
        self.params.external = external;
    }

    pub fn set_noise_clock(&mut self, clock: NoiseClock) {
        self.params.noise_clock = clock;
    }

    /// Start the one-shot. Retriggering while it runs changes nothing.
    pub fn trigger(&mut self) {
        self.state.one_shot.trigger();
    }

    /// Level of the external noise clock; rising edges shift the register.
    ///
    /// Ignored while the noise clock is internal.
    pub fn noise_clock_edge(&mut self, level: bool) {
        if self.params.noise_clock == NoiseClock::External {
            self.state.noise.clock_edge(level);
        }
    }

    /// Settle the circuit and return one sample.
    ///
    /// The circuit always advances [`SUBSTEPS_PER_UPDATE`] sub-steps per call
    /// whatever `requested` is, so one call yields one sample.
    pub fn update(&mut self, _requested: usize) -> Sample {
        self.apply_messages();

        let rates = StepRates::compute(&self.params, self.sample_rate);
        let mut voltage = OUT_CENTER_LEVEL_VOLTAGE;
        for _ in 0..SUBSTEPS_PER_UPDATE {
            voltage = self.state.step(&self.params, &rates, self.sample_rate);
        }

        Sample {
            value: voltage_to_sample(voltage),
            vco_voltage: self.state.vco.voltage,
        }
    }

    fn power_on(&mut self) {
        self.state = CircuitState::new();
        self.params.vco_mode = VcoMode::Slf;
        self.params.external = ExternalVoltages::default();
        self.params.enabled = true;
    }

    // Runs on the audio thread, so no logging here
    fn apply_messages(&mut self) {
        let Some(mut rx) = self.rx.take() else {
            return;
        };

        while let Some(msg) = rx.pop() {
            match msg {
                ControlMessage::Params(params) => self.params = params,
                ControlMessage::Trigger => self.state.one_shot.trigger(),
                ControlMessage::SampleRate(sample_rate) => {
                    if sample_rate > 0 {
                        self.sample_rate = sample_rate;
                    }
                }
                ControlMessage::Reset => self.power_on(),
            }
        }
        self.rx = Some(rx);
    }
}

impl Default for CsgEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
