use crate::dsp::{
    envelope::{is_attacking, AttackDecay},
    mixer::{mix, output_voltage},
    noise::Noise,
    oscillator::{vco_ceiling, OneShot, Slf, Vco},
    rate::StepRates,
};
use crate::params::{ControlParameters, NoiseClock};

/// Everything the chip remembers between update calls.
///
/// Each stage is its own record and only sees its neighbours through the
/// arguments of [`CircuitState::step`], so the data flow between stages is
/// visible in one place.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CircuitState {
    pub one_shot: OneShot,
    pub slf: Slf,
    pub vco: Vco,
    pub noise: Noise,
    pub envelope: AttackDecay,
}

impl CircuitState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every stage by one sub-step and return the OUT pin voltage.
    ///
    /// Order matters: the VCO ceiling reads the SLF voltage written this
    /// sub-step, and the envelope reads the VCO and one-shot flags written
    /// this sub-step.
    pub fn step(&mut self, params: &ControlParameters, rates: &StepRates, sample_rate: u32) -> f64 {
        let external = &params.external;

        self.one_shot.step(rates.one_shot, external.one_shot);
        self.slf.step(rates.slf, external.slf);

        let ceiling = vco_ceiling(params.vco_mode, self.slf.voltage);
        self.vco.step(rates.vco, ceiling, external.vco);

        if params.noise_clock == NoiseClock::Internal {
            self.noise.clock(rates.noise_freq, sample_rate);
        }
        self.noise.filter(rates.noise_filter, external.noise_filter);

        let attacking = is_attacking(
            params.envelope_mode,
            self.vco.output,
            self.vco.alt_polarity,
            self.one_shot.running,
        );
        self.envelope
            .step(attacking, rates.attack_decay, external.attack_decay);

        let bit = mix(
            params.mixer,
            self.vco.output,
            self.slf.output,
            self.noise.filtered_bit,
        );
        output_voltage(
            params.enabled,
            self.vco.voltage,
            bit,
            self.envelope.voltage,
            rates.peak_voltage,
        )
    }
}
