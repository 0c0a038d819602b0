//! Measured voltages and fitted response curves of the chip.

/*
Measured Curves
===============

Every number in this module was taken from a real chip on a bench and then
fitted, so none of it is derived from first principles. The stepping code
never reaches into these tables directly; it asks the lookup functions below,
which keeps the data isolated and testable on its own.

Vocabulary
----------

  center level   The OUT pin voltage when the amplitude is zero. Silence.

  peak gain      Volts from center to peak at full envelope. Set on the real
                 chip by the ratio of the feedback and amplitude resistors.

  gain table     Fraction of peak gain reached for a given attack/decay
                 capacitor voltage, one entry per 0.1 V. The positive table is
                 used while the mixer bit is high, the negative one while it
                 is low. The two are not mirror images.


Output Transfer
---------------

    OUT (V)
    3.51 ┤╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌  high clip
         │              ╱
    2.57 ┤─────────────●───────────  center (mixer bit picks the branch)
         │              ╲
    0.715┤╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌  low clip
         └───────────────────────→ envelope (V), 0.0 .. 4.4

    out = center + peak_gain * table[bit][floor(envelope * 10)]


Signed Samples
--------------

The clipped voltage is rescaled so the low clip lands on -full_scale and the
center lands on zero:

    sample = ((V - V_low) / (V_center - V_low) - 1) * full_scale
*/

/// One-shot capacitor voltage where charging starts.
pub const ONE_SHOT_CAP_VOLTAGE_MIN: f64 = 0.0;
/// One-shot capacitor voltage where the pulse ends.
pub const ONE_SHOT_CAP_VOLTAGE_MAX: f64 = 2.5;
pub const ONE_SHOT_CAP_VOLTAGE_RANGE: f64 = ONE_SHOT_CAP_VOLTAGE_MAX - ONE_SHOT_CAP_VOLTAGE_MIN;

/// Bottom peak of the SLF triangle.
pub const SLF_CAP_VOLTAGE_MIN: f64 = 0.33;
/// Top peak of the SLF triangle.
pub const SLF_CAP_VOLTAGE_MAX: f64 = 2.37;

/// Offset between the SLF voltage and the VCO ceiling.
pub const VCO_TO_SLF_VOLTAGE_DIFF: f64 = 0.35;
pub const VCO_CAP_VOLTAGE_MIN: f64 = SLF_CAP_VOLTAGE_MIN;
/// Anything above this means the VCO has saturated and the output is muted.
pub const VCO_CAP_VOLTAGE_MAX: f64 = SLF_CAP_VOLTAGE_MAX + VCO_TO_SLF_VOLTAGE_DIFF;
pub const VCO_CAP_VOLTAGE_RANGE: f64 = VCO_CAP_VOLTAGE_MAX - VCO_CAP_VOLTAGE_MIN;
/// Pitch voltage that yields an exact 50% duty cycle.
pub const VCO_DUTY_CYCLE_50: f64 = 5.0;
/// Smallest duty cycle the chip produces, as a fraction.
pub const VCO_MIN_DUTY_CYCLE: f64 = 0.18;

/// Smallest clock resistor that still produces noise.
pub const NOISE_MIN_CLOCK_RES: f64 = 10_000.0;
/// Largest clock resistor that still produces noise.
pub const NOISE_MAX_CLOCK_RES: f64 = 3_300_000.0;
pub const NOISE_CAP_VOLTAGE_MIN: f64 = 0.0;
pub const NOISE_CAP_VOLTAGE_MAX: f64 = 5.0;
pub const NOISE_CAP_VOLTAGE_RANGE: f64 = NOISE_CAP_VOLTAGE_MAX - NOISE_CAP_VOLTAGE_MIN;
/// Filter voltage at which the filtered noise bit drops to 0.
pub const NOISE_CAP_HIGH_THRESHOLD: f64 = 3.35;
/// Filter voltage at which the filtered noise bit rises to 1.
pub const NOISE_CAP_LOW_THRESHOLD: f64 = 0.74;

pub const AD_CAP_VOLTAGE_MIN: f64 = 0.0;
pub const AD_CAP_VOLTAGE_MAX: f64 = 4.44;
pub const AD_CAP_VOLTAGE_RANGE: f64 = AD_CAP_VOLTAGE_MAX - AD_CAP_VOLTAGE_MIN;

pub const OUT_CENTER_LEVEL_VOLTAGE: f64 = 2.57;
pub const OUT_HIGH_CLIP_THRESHOLD: f64 = 3.51;
pub const OUT_LOW_CLIP_THRESHOLD: f64 = 0.715;

/// Supply rails; externally driven pins are held inside these.
pub const SUPPLY_VOLTAGE_MIN: f64 = 0.0;
pub const SUPPLY_VOLTAGE_MAX: f64 = 5.0;

/// Magnitude of the signed sample at the low clip.
pub const FULL_SCALE: f64 = 32_767.0;

/// Number of 0.1 V steps in the gain tables.
pub const GAIN_TABLE_LEN: usize = 45;

/// Gain while the mixer bit is high, 0.0 - 4.4 V in 0.1 V steps.
static OUT_POS_GAIN: [f64; GAIN_TABLE_LEN] = [
    0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.01, // 0.0 - 0.9V
    0.03, 0.11, 0.15, 0.19, 0.21, 0.23, 0.26, 0.29, 0.31, 0.33, // 1.0 - 1.9V
    0.36, 0.38, 0.41, 0.43, 0.46, 0.49, 0.52, 0.54, 0.57, 0.60, // 2.0 - 2.9V
    0.62, 0.65, 0.68, 0.70, 0.73, 0.76, 0.80, 0.82, 0.84, 0.87, // 3.0 - 3.9V
    0.90, 0.93, 0.96, 0.98, 1.00, // 4.0 - 4.4V
];

/// Gain while the mixer bit is low, 0.0 - 4.4 V in 0.1 V steps.
static OUT_NEG_GAIN: [f64; GAIN_TABLE_LEN] = [
    0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, -0.01, // 0.0 - 0.9V
    -0.02, -0.09, -0.13, -0.15, -0.17, -0.19, -0.22, -0.24, -0.26, -0.28, // 1.0 - 1.9V
    -0.30, -0.32, -0.34, -0.37, -0.39, -0.41, -0.44, -0.46, -0.48, -0.51, // 2.0 - 2.9V
    -0.53, -0.56, -0.58, -0.60, -0.62, -0.65, -0.67, -0.69, -0.72, -0.74, // 3.0 - 3.9V
    -0.76, -0.78, -0.81, -0.84, -0.85, // 4.0 - 4.4V
];

/// Table index for an attack/decay voltage, clamped to the measured domain.
#[inline]
pub fn gain_index(envelope_voltage: f64) -> usize {
    let index = (envelope_voltage * 10.0).floor();
    if index.is_nan() || index <= 0.0 {
        0
    } else {
        (index as usize).min(GAIN_TABLE_LEN - 1)
    }
}

/// Gain fraction for the given mixer bit and envelope voltage.
#[inline]
pub fn output_gain(bit: bool, envelope_voltage: f64) -> f64 {
    let index = gain_index(envelope_voltage);
    if bit {
        OUT_POS_GAIN[index]
    } else {
        OUT_NEG_GAIN[index]
    }
}

/// Center-to-peak output swing in volts.
///
/// Fitted from (Ra, Rf, V) triples: (150k, 47k, 1.28), (200k, 47k, 0.96),
/// (47k, 22k, 1.8), (100k, 22k, 0.87), (150k, 22k, 0.6), (200k, 22k, 0.45),
/// (47k, 10k, 0.81), (100k, 10k, 0.4), (150k, 10k, 0.27).
pub fn center_to_peak_voltage(amplitude_res: f64, feedback_res: f64) -> f64 {
    if amplitude_res > 0.0 {
        3.818 * (feedback_res / amplitude_res) + 0.03
    } else {
        0.0
    }
}

/// Noise clock frequency in Hz for a clock resistor.
///
/// Inverse power law fitted from 23 points between 10k (97 493 Hz) and
/// 3.3M (487.59 Hz). Outside that range the generator stops.
pub fn noise_gen_freq(clock_res: f64) -> u32 {
    if (NOISE_MIN_CLOCK_RES..=NOISE_MAX_CLOCK_RES).contains(&clock_res) {
        (339_100_000.0 * clock_res.powf(-0.8849)) as u32
    } else {
        0
    }
}

/// Rescale an OUT voltage into the signed sample range.
#[inline]
pub fn voltage_to_sample(voltage: f64) -> f64 {
    ((voltage - OUT_LOW_CLIP_THRESHOLD) / (OUT_CENTER_LEVEL_VOLTAGE - OUT_LOW_CLIP_THRESHOLD) - 1.0)
        * FULL_SCALE
}
