use crate::dsp::curves::{
    center_to_peak_voltage, noise_gen_freq, AD_CAP_VOLTAGE_RANGE, NOISE_CAP_VOLTAGE_RANGE,
    ONE_SHOT_CAP_VOLTAGE_RANGE, VCO_CAP_VOLTAGE_RANGE, VCO_DUTY_CYCLE_50, VCO_MIN_DUTY_CYCLE,
};
use crate::params::ControlParameters;

/*
RC Charge Rates
===============

Every timing element on the chip is a capacitor charged or discharged
through a resistor. The chip flips state when the capacitor voltage crosses a
threshold, so the only thing the emulation needs per stage is how fast the
voltage moves: a rate in volts per second.

Vocabulary
----------

  rate        Volts per second the capacitor moves while charging or
              discharging. Fitted from bench measurements, so each stage has
              its own formula rather than a textbook exponential.

  step        Volts the capacitor moves in one internal sub-step:
              step = rate / sample_rate

  sentinel    A deliberately extreme rate standing in for a missing part:

                resistor  capacitor   rate
                   yes       yes      fitted formula
                   no        yes      1e-30  (no current, never moves)
                   yes       no       1e+30  (no capacitance, moves at once)
                   no        no       0


Fitted Formulas
---------------

Each formula is "range / time", with time fitted from (R, C, time) points:

  one-shot charge      time = 0.8024 RC + 0.002079
                        47k 0.33uF 11.84ms,  47k 1.0uF 36.2ms,
                        47k 1.5uF  52.1ms,   47k 2.0uF 76.4ms,
                       100k 0.33uF 24.4ms,  100k 1.0uF 75.2ms,
                       100k 1.5uF 108.5ms,  100k 2.0uF 158.4ms
  one-shot discharge   time = 854.7 C + 0.00001795
                        0.33uF 300us, 1.0uF 850us, 1.5uF 1300us, 2.0uF 1900us
  noise filter charge  time = 0.1571 RC + 0.00001430
  noise filter disch.  time = 0.1331 RC + 0.00001734
  attack / decay       time = R C

The SLF and VCO are driven by a single time-constant control rather than a
true RC pair, so their rate is 0.64 * 2 * VCO range / R.


VCO Duty Cycle
--------------

The pitch pin skews the VCO triangle. The duty cycle is

    duty = clamp(max(0.5 * pitch / vco_voltage, 0.18), 0, 1)

and the charge step is divided by (1 - duty) * 2 while the discharge step is
multiplied by it. At pitch = 5 V (or with no reference voltage) the duty is
exactly 50% and both directions run at the base rate.
*/

/// Rate for a capacitor with no charging current: it never transitions.
pub const RATE_NEVER: f64 = 1e-30;
/// Rate for a stage with no capacitance: it transitions immediately.
pub const RATE_INSTANT: f64 = 1e30;

/// Apply the missing-component policy around a fitted formula.
#[inline]
pub fn rc_rate(res: f64, cap: f64, fitted: impl FnOnce(f64, f64) -> f64) -> f64 {
    match (res > 0.0, cap > 0.0) {
        (true, true) => fitted(res, cap),
        (false, true) => RATE_NEVER,
        (true, false) => RATE_INSTANT,
        (false, false) => 0.0,
    }
}

pub fn one_shot_charging_rate(res: f64, cap: f64) -> f64 {
    rc_rate(res, cap, |r, c| {
        ONE_SHOT_CAP_VOLTAGE_RANGE / (0.8024 * r * c + 0.002079)
    })
}

pub fn one_shot_discharging_rate(res: f64, cap: f64) -> f64 {
    rc_rate(res, cap, |_, c| ONE_SHOT_CAP_VOLTAGE_RANGE / (854.7 * c + 0.00001795))
}

/// SLF rate; charge and discharge were measured within 10% and share a fit.
pub fn slf_rate(res: f64, cap: f64) -> f64 {
    rc_rate(res, cap, |r, _| 0.64 * 2.0 * VCO_CAP_VOLTAGE_RANGE / r)
}

/// Base VCO rate before the duty-cycle skew.
pub fn vco_rate(time_constant: f64) -> f64 {
    if time_constant > 0.0 {
        0.64 * 2.0 * VCO_CAP_VOLTAGE_RANGE / time_constant
    } else {
        0.0
    }
}

pub fn vco_duty_cycle(pitch_voltage: f64, vco_voltage: f64) -> f64 {
    if vco_voltage > 0.0 && pitch_voltage != VCO_DUTY_CYCLE_50 {
        (0.5 * (pitch_voltage / vco_voltage))
            .max(VCO_MIN_DUTY_CYCLE)
            .clamp(0.0, 1.0)
    } else {
        0.5
    }
}

pub fn noise_filter_charging_rate(res: f64, cap: f64) -> f64 {
    rc_rate(res, cap, |r, c| {
        NOISE_CAP_VOLTAGE_RANGE / (0.1571 * r * c + 0.00001430)
    })
}

pub fn noise_filter_discharging_rate(res: f64, cap: f64) -> f64 {
    rc_rate(res, cap, |r, c| {
        NOISE_CAP_VOLTAGE_RANGE / (0.1331 * r * c + 0.00001734)
    })
}

pub fn attack_rate(attack_res: f64, cap: f64) -> f64 {
    rc_rate(attack_res, cap, |r, c| AD_CAP_VOLTAGE_RANGE / (r * c))
}

pub fn decay_rate(decay_res: f64, cap: f64) -> f64 {
    rc_rate(decay_res, cap, |r, c| AD_CAP_VOLTAGE_RANGE / (r * c))
}

/// Per-sub-step voltage change in each direction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Slope {
    pub charging: f64,
    pub discharging: f64,
}

impl Slope {
    pub fn from_rates(charging: f64, discharging: f64, sample_rate: f64) -> Self {
        Self {
            charging: charging / sample_rate,
            discharging: discharging / sample_rate,
        }
    }
}

/// Everything the stepping code needs, derived once per update call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepRates {
    pub one_shot: Slope,
    pub slf: Slope,
    pub vco: Slope,
    pub noise_filter: Slope,
    pub attack_decay: Slope,
    /// Noise register clock in Hz (0 = stopped).
    pub noise_freq: u32,
    /// Center-to-peak output swing in volts.
    pub peak_voltage: f64,
}

impl StepRates {
    pub fn compute(params: &ControlParameters, sample_rate: u32) -> Self {
        let sr = f64::from(sample_rate.max(1));

        let one_shot = Slope::from_rates(
            one_shot_charging_rate(params.one_shot_res, params.one_shot_cap),
            one_shot_discharging_rate(params.one_shot_res, params.one_shot_cap),
            sr,
        );

        let slf_rate = slf_rate(params.slf_res, params.slf_cap);
        let slf = Slope::from_rates(slf_rate, slf_rate, sr);

        let vco = vco_slope(
            vco_rate(params.vco_res),
            vco_duty_cycle(params.pitch_voltage, params.vco_voltage),
            sr,
        );

        let noise_filter = Slope::from_rates(
            noise_filter_charging_rate(params.noise_filter_res, params.noise_filter_cap),
            noise_filter_discharging_rate(params.noise_filter_res, params.noise_filter_cap),
            sr,
        );

        let attack_decay = Slope::from_rates(
            attack_rate(params.attack_res, params.attack_decay_cap),
            decay_rate(params.decay_res, params.attack_decay_cap),
            sr,
        );

        Self {
            one_shot,
            slf,
            vco,
            noise_filter,
            attack_decay,
            noise_freq: noise_gen_freq(params.noise_clock_res),
            peak_voltage: center_to_peak_voltage(params.amplitude_res, params.feedback_res),
        }
    }
}

/// Skew the base VCO rate by the duty cycle.
fn vco_slope(base_rate: f64, duty: f64, sample_rate: f64) -> Slope {
    if base_rate <= 0.0 {
        return Slope::default();
    }

    let multiplier = (1.0 - duty) * 2.0;
    // A 100% duty cycle never discharges and charges at once
    let charging = if multiplier > 0.0 {
        base_rate / multiplier
    } else {
        RATE_INSTANT
    };

    Slope::from_rates(charging, base_rate * multiplier, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: u32 = 48_000;

    #[test]
    fn missing_resistor_never_moves() {
        assert_eq!(one_shot_charging_rate(0.0, 1e-6), RATE_NEVER);
        assert_eq!(noise_filter_charging_rate(0.0, 470e-12), RATE_NEVER);
        assert_eq!(attack_rate(0.0, 1e-6), RATE_NEVER);
        assert_eq!(decay_rate(0.0, 1e-6), RATE_NEVER);
    }

    #[test]
    fn missing_capacitor_moves_instantly() {
        assert_eq!(one_shot_charging_rate(47_000.0, 0.0), RATE_INSTANT);
        assert_eq!(one_shot_discharging_rate(47_000.0, 0.0), RATE_INSTANT);
        assert_eq!(noise_filter_discharging_rate(10_000.0, 0.0), RATE_INSTANT);
        assert_eq!(decay_rate(10_000.0, 0.0), RATE_INSTANT);
    }

    #[test]
    fn nothing_connected_is_zero() {
        assert_eq!(one_shot_charging_rate(0.0, 0.0), 0.0);
        assert_eq!(slf_rate(0.0, 0.0), 0.0);
        assert_eq!(vco_rate(0.0), 0.0);
        assert_eq!(attack_rate(0.0, 0.0), 0.0);
    }

    #[test]
    fn one_shot_charge_follows_bench_points() {
        // (R, C, seconds); the fit is loose at small RC
        let points = [
            (47e3, 0.33e-6, 0.01184),
            (47e3, 1.0e-6, 0.0362),
            (100e3, 1.0e-6, 0.0752),
            (100e3, 2.0e-6, 0.1584),
        ];
        for (r, c, t) in points {
            let predicted = ONE_SHOT_CAP_VOLTAGE_RANGE / one_shot_charging_rate(r, c);
            assert!(
                (predicted - t).abs() / t < 0.25,
                "R={r} C={c}: predicted {predicted}, measured {t}"
            );
        }

        let predicted = ONE_SHOT_CAP_VOLTAGE_RANGE / one_shot_charging_rate(100e3, 2.0e-6);
        assert!((predicted - 0.1584).abs() / 0.1584 < 0.05);
    }

    #[test]
    fn one_shot_discharge_follows_bench_points() {
        let points = [(1.0e-6, 850e-6), (2.0e-6, 1900e-6)];
        for (c, t) in points {
            let predicted = ONE_SHOT_CAP_VOLTAGE_RANGE / one_shot_discharging_rate(47e3, c);
            assert!((predicted - t).abs() / t < 0.1, "C={c}: {predicted} vs {t}");
        }
    }

    #[test]
    fn duty_cycle_rules() {
        assert_eq!(vco_duty_cycle(2.3, 0.0), 0.5);
        assert_eq!(vco_duty_cycle(VCO_DUTY_CYCLE_50, 2.3), 0.5);
        assert!((vco_duty_cycle(2.3, 2.3) - 0.5).abs() < 1e-12);
        assert_eq!(vco_duty_cycle(0.1, 2.3), VCO_MIN_DUTY_CYCLE);
        assert_eq!(vco_duty_cycle(4.55, 1.0), 1.0);
    }

    #[test]
    fn duty_skews_vco_slopes() {
        let symmetric = vco_slope(1.0, 0.5, 1.0);
        assert!((symmetric.charging - 1.0).abs() < 1e-12);
        assert!((symmetric.discharging - 1.0).abs() < 1e-12);

        let skewed = vco_slope(1.0, 0.75, 1.0);
        assert!((skewed.charging - 2.0).abs() < 1e-12);
        assert!((skewed.discharging - 0.5).abs() < 1e-12);

        let pinned = vco_slope(1.0, 1.0, 1.0);
        assert_eq!(pinned.charging, RATE_INSTANT);
        assert_eq!(pinned.discharging, 0.0);

        assert_eq!(vco_slope(0.0, 1.0, 1.0), Slope::default());
    }

    #[test]
    fn steps_scale_with_sample_rate() {
        let params = ControlParameters {
            attack_res: 100_000.0,
            decay_res: 200_000.0,
            attack_decay_cap: 1e-6,
            ..ControlParameters::default()
        };
        let at_48k = StepRates::compute(&params, SAMPLE_RATE);
        let at_96k = StepRates::compute(&params, SAMPLE_RATE * 2);

        let expected = AD_CAP_VOLTAGE_RANGE / 0.1 / f64::from(SAMPLE_RATE);
        assert!((at_48k.attack_decay.charging - expected).abs() < 1e-12);
        assert!((at_48k.attack_decay.charging / at_96k.attack_decay.charging - 2.0).abs() < 1e-9);
        assert!(at_48k.attack_decay.discharging < at_48k.attack_decay.charging);
    }

    #[test]
    fn zero_sample_rate_does_not_divide_by_zero() {
        let params = ControlParameters {
            vco_res: 1.0,
            ..ControlParameters::default()
        };
        let rates = StepRates::compute(&params, 0);
        assert!(rates.vco.charging.is_finite());
    }
}
