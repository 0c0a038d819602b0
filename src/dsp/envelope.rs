use crate::dsp::curves::{AD_CAP_VOLTAGE_MAX, AD_CAP_VOLTAGE_MIN};
use crate::dsp::rate::Slope;
use crate::params::{pin_voltage, EnvelopeMode};

/*
Attack/Decay Envelope
=====================

Unlike a software ADSR, the chip's envelope has no stages of its own. It is a
single capacitor that charges (attack) through one resistor and discharges
(decay) through another. What decides the direction is another part of the
chip, picked by the envelope mode:

  | mode             | attacking while                         |
  | ---------------- | --------------------------------------- |
  | Vco              | VCO output high                         |
  | OneShot          | one-shot running                        |
  | MixerOnly        | always (no decay phase)                 |
  | VcoAltPolarity   | VCO output high AND alt-polarity set    |

The capacitor voltage (0 - 4.44 V) indexes the output gain table, so it is
the amplitude. A missing resistor and capacitor give a zero rate, which here
means "snap straight to the end" rather than "never move".
*/

/// Whether the capacitor should be charging this sub-step.
#[inline]
pub fn is_attacking(mode: EnvelopeMode, vco_output: bool, vco_alt: bool, one_shot_running: bool) -> bool {
    match mode {
        EnvelopeMode::Vco => vco_output,
        EnvelopeMode::OneShot => one_shot_running,
        EnvelopeMode::MixerOnly => true,
        EnvelopeMode::VcoAltPolarity => vco_output && vco_alt,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackDecay {
    pub voltage: f64,
}

impl AttackDecay {
    pub fn new() -> Self {
        Self {
            voltage: AD_CAP_VOLTAGE_MIN,
        }
    }

    pub fn step(&mut self, attacking: bool, slope: Slope, external: Option<f64>) {
        self.voltage = match external {
            Some(voltage) => pin_voltage(voltage),
            None if attacking => {
                if slope.charging > 0.0 {
                    (self.voltage + slope.charging).clamp(AD_CAP_VOLTAGE_MIN, AD_CAP_VOLTAGE_MAX)
                } else {
                    AD_CAP_VOLTAGE_MAX
                }
            }
            None => {
                if slope.discharging > 0.0 {
                    (self.voltage - slope.discharging).clamp(AD_CAP_VOLTAGE_MIN, AD_CAP_VOLTAGE_MAX)
                } else {
                    AD_CAP_VOLTAGE_MIN
                }
            }
        };
    }
}

impl Default for AttackDecay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_pick_the_right_source() {
        assert!(is_attacking(EnvelopeMode::Vco, true, false, false));
        assert!(!is_attacking(EnvelopeMode::Vco, false, true, true));
        assert!(is_attacking(EnvelopeMode::OneShot, false, false, true));
        assert!(!is_attacking(EnvelopeMode::OneShot, true, true, false));
        assert!(is_attacking(EnvelopeMode::MixerOnly, false, false, false));
        assert!(is_attacking(EnvelopeMode::VcoAltPolarity, true, true, false));
        assert!(!is_attacking(EnvelopeMode::VcoAltPolarity, true, false, false));
        assert!(!is_attacking(EnvelopeMode::VcoAltPolarity, false, true, false));
    }

    #[test]
    fn zero_rate_snaps_to_the_rail() {
        let mut env = AttackDecay::new();
        env.step(true, Slope::default(), None);
        assert_eq!(env.voltage, AD_CAP_VOLTAGE_MAX);
        env.step(false, Slope::default(), None);
        assert_eq!(env.voltage, AD_CAP_VOLTAGE_MIN);
    }

    #[test]
    fn ramps_stay_in_range() {
        let mut env = AttackDecay::new();
        let slope = Slope {
            charging: 0.3,
            discharging: 0.1,
        };
        for _ in 0..20 {
            env.step(true, slope, None);
            assert!(env.voltage <= AD_CAP_VOLTAGE_MAX);
        }
        assert_eq!(env.voltage, AD_CAP_VOLTAGE_MAX);

        env.step(false, slope, None);
        assert!((env.voltage - (AD_CAP_VOLTAGE_MAX - 0.1)).abs() < 1e-12);
        for _ in 0..100 {
            env.step(false, slope, None);
            assert!(env.voltage >= AD_CAP_VOLTAGE_MIN);
        }
        assert_eq!(env.voltage, AD_CAP_VOLTAGE_MIN);
    }

    #[test]
    fn sentinel_never_rate_barely_moves() {
        let mut env = AttackDecay::new();
        let slope = Slope {
            charging: 1e-30 / 48_000.0,
            discharging: 1e-30 / 48_000.0,
        };
        for _ in 0..1_000_000 {
            env.step(true, slope, None);
        }
        assert!(env.voltage < 1e-20);
    }
}
