use crate::dsp::curves::{
    output_gain, OUT_CENTER_LEVEL_VOLTAGE, OUT_HIGH_CLIP_THRESHOLD, OUT_LOW_CLIP_THRESHOLD,
    VCO_CAP_VOLTAGE_MAX,
};
use crate::params::MixerMode;

/*
Mixer and Output Stage
======================

The mixer is pure logic. Three selector lines pick which square waves reach
the output and how they combine:

  | c b a | mode           | output bit                 |
  | ----- | -------------- | -------------------------- |
  | 0 0 0 | Inhibit        | 0                          |
  | 0 0 1 | Vco            | vco                        |
  | 0 1 0 | Slf            | slf                        |
  | 0 1 1 | VcoSlf         | vco AND slf                |
  | 1 0 0 | Noise          | noise                      |
  | 1 0 1 | VcoNoise       | vco AND noise              |
  | 1 1 0 | SlfNoise       | slf AND noise              |
  | 1 1 1 | VcoSlfNoise    | vco AND slf AND noise      |

The noise input is the filtered noise bit.

The output stage then turns (bit, envelope) into a voltage on the OUT pin.
A high bit swings above center, a low bit below, each by its own gain table,
and each direction is clipped by the output transistor:

    bit 1:  min(center + peak * pos_gain(env), 3.51)
    bit 0:  max(center + peak * neg_gain(env), 0.715)

When the chip is disabled, or the VCO capacitor has been pushed past its
normal ceiling, the pin sits at center.
*/

/// Combine the three square-wave bits according to the selector.
#[inline]
pub fn mix(mode: MixerMode, vco: bool, slf: bool, noise: bool) -> bool {
    match mode {
        MixerMode::Inhibit => false,
        MixerMode::Vco => vco,
        MixerMode::Slf => slf,
        MixerMode::VcoSlf => vco && slf,
        MixerMode::Noise => noise,
        MixerMode::VcoNoise => vco && noise,
        MixerMode::SlfNoise => slf && noise,
        MixerMode::VcoSlfNoise => vco && slf && noise,
    }
}

/// Voltage on the OUT pin for one sub-step.
#[inline]
pub fn output_voltage(
    enabled: bool,
    vco_voltage: f64,
    bit: bool,
    envelope_voltage: f64,
    peak_voltage: f64,
) -> f64 {
    if !enabled || vco_voltage > VCO_CAP_VOLTAGE_MAX {
        return OUT_CENTER_LEVEL_VOLTAGE;
    }

    let voltage = OUT_CENTER_LEVEL_VOLTAGE + peak_voltage * output_gain(bit, envelope_voltage);
    if bit {
        voltage.min(OUT_HIGH_CLIP_THRESHOLD)
    } else {
        voltage.max(OUT_LOW_CLIP_THRESHOLD)
    }
}
