//! Control values supplied by the host before each update.
//!
//! Resistances are in ohms, capacitances in farads and voltages in volts.
//! A value of `0.0` (or anything non-positive) means "no component
//! connected", which the rate computer turns into a sentinel rate rather than
//! an error.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::curves::{SUPPLY_VOLTAGE_MAX, SUPPLY_VOLTAGE_MIN};

/// Marker for a resistor or capacitor pin left unconnected.
pub const UNSET: f64 = 0.0;

/// Which signal drives the attack/decay capacitor.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvelopeMode {
    /// Attack while the VCO output is high.
    #[default]
    Vco,
    /// Attack while the one-shot is running.
    OneShot,
    /// Always attacking; there is no decay phase.
    MixerOnly,
    /// Attack on every other VCO cycle.
    VcoAltPolarity,
}

impl EnvelopeMode {
    /// Map the 2-bit selector. Anything out of range behaves as mixer-only.
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Vco,
            1 => Self::OneShot,
            3 => Self::VcoAltPolarity,
            _ => Self::MixerOnly,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Self::Vco => 0,
            Self::OneShot => 1,
            Self::MixerOnly => 2,
            Self::VcoAltPolarity => 3,
        }
    }
}

/// Where the VCO ceiling comes from.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VcoMode {
    /// Internal control: the ceiling follows the SLF capacitor.
    #[default]
    Slf,
    /// External control: the ceiling is the fixed offset alone.
    External,
}

/// How the noise shift register is clocked.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseClock {
    /// Clocked from the noise clock resistor.
    #[default]
    Internal,
    /// Clocked by the host through `noise_clock_edge`.
    External,
}

/// The 3-bit mixer selector, assembled from three enable lines.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MixerMode {
    #[default]
    Inhibit,
    Vco,
    Slf,
    VcoSlf,
    Noise,
    VcoNoise,
    SlfNoise,
    VcoSlfNoise,
}

impl MixerMode {
    /// Build from the enable lines: a = VCO (bit 0), b = SLF (bit 1), c = noise (bit 2).
    pub fn from_bits(a: bool, b: bool, c: bool) -> Self {
        Self::from_index(u8::from(a) | u8::from(b) << 1 | u8::from(c) << 2)
    }

    /// Only the low three bits are significant.
    pub fn from_index(index: u8) -> Self {
        match index & 0b111 {
            0 => Self::Inhibit,
            1 => Self::Vco,
            2 => Self::Slf,
            3 => Self::VcoSlf,
            4 => Self::Noise,
            5 => Self::VcoNoise,
            6 => Self::SlfNoise,
            _ => Self::VcoSlfNoise,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Self::Inhibit => 0,
            Self::Vco => 1,
            Self::Slf => 2,
            Self::VcoSlf => 3,
            Self::Noise => 4,
            Self::VcoNoise => 5,
            Self::SlfNoise => 6,
            Self::VcoSlfNoise => 7,
        }
    }
}

/// Voltages forced onto capacitor pins, bypassing the RC networks.
///
/// `None` leaves the pin to its internal network.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExternalVoltages {
    pub one_shot: Option<f64>,
    pub slf: Option<f64>,
    pub vco: Option<f64>,
    pub noise_filter: Option<f64>,
    pub attack_decay: Option<f64>,
}

/// Clamp an injected pin voltage to the supply rails.
#[inline]
pub(crate) fn pin_voltage(voltage: f64) -> f64 {
    if voltage.is_nan() {
        SUPPLY_VOLTAGE_MIN
    } else {
        voltage.clamp(SUPPLY_VOLTAGE_MIN, SUPPLY_VOLTAGE_MAX)
    }
}

/// Snapshot of every external control.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlParameters {
    // One-shot timer
    pub one_shot_res: f64,
    pub one_shot_cap: f64,

    // Super-low-frequency oscillator
    pub slf_res: f64, // time constant
    pub slf_cap: f64,

    // VCO
    pub vco_res: f64,     // time constant
    pub vco_voltage: f64, // duty-cycle reference
    pub pitch_voltage: f64,
    pub vco_mode: VcoMode,

    // Noise
    pub noise_clock_res: f64,
    pub noise_clock: NoiseClock,
    pub noise_filter_res: f64,
    pub noise_filter_cap: f64,

    // Attack/decay
    pub attack_res: f64,
    pub decay_res: f64,
    pub attack_decay_cap: f64,
    pub envelope_mode: EnvelopeMode,

    // Output stage
    pub mixer: MixerMode,
    pub amplitude_res: f64,
    pub feedback_res: f64,
    pub enabled: bool,

    pub external: ExternalVoltages,
}

impl Default for ControlParameters {
    fn default() -> Self {
        Self {
            one_shot_res: UNSET,
            one_shot_cap: UNSET,
            slf_res: UNSET,
            slf_cap: UNSET,
            vco_res: UNSET,
            vco_voltage: 0.0,
            pitch_voltage: 0.0,
            vco_mode: VcoMode::Slf,
            noise_clock_res: UNSET,
            noise_clock: NoiseClock::Internal,
            noise_filter_res: UNSET,
            noise_filter_cap: UNSET,
            attack_res: UNSET,
            decay_res: UNSET,
            attack_decay_cap: UNSET,
            envelope_mode: EnvelopeMode::Vco,
            mixer: MixerMode::Inhibit,
            amplitude_res: 100.0,
            feedback_res: 100.0,
            enabled: true,
            external: ExternalVoltages::default(),
        }
    }
}
