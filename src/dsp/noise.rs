use crate::dsp::curves::{
    NOISE_CAP_HIGH_THRESHOLD, NOISE_CAP_LOW_THRESHOLD, NOISE_CAP_VOLTAGE_MAX,
    NOISE_CAP_VOLTAGE_MIN,
};
use crate::dsp::rate::Slope;
use crate::params::pin_voltage;

/*
Noise Source
============

The chip makes noise in two stages: a shift register produces a raw random
bit at a rate set by the clock resistor, then an RC filter with hysteresis
turns that into a cleaner, band-limited noise bit.

Vocabulary
----------

  register     31-bit shift register. Each clock shifts right by one and
               feeds a new bit in at the top (bit 30).

  tap          The new bit is bit 28 XOR bit 0.

  lock-up      An all-zero register would only ever produce zeros. The chip
               forces a 1 whenever bits 0-4 and 28 are all clear, so the
               register can never stall (it also starts from zero).

  counter      Rate limiter between the audio sample rate and the noise clock.
               Each sub-step it adds the sample rate until it exceeds the noise
               frequency, clocking one bit per addition, then subtracts the
               noise frequency. This is a discrete Bresenham-style divider.
               At most 256 bits are clocked per sub-step; past that the
               counter is reloaded so a tiny sample rate cannot spin.

  hysteresis   Two thresholds instead of one. The filtered bit goes to 0 only
               above 3.35 V and back to 1 only below 0.74 V, so the output
               cannot chatter while the capacitor hovers near a threshold.


Register Layout
---------------

    bit  30 29 28 27 ....... 4  3  2  1  0
         ↑      │                        │
         │      └────────── XOR ─────────┘
         └──── new bit ────────┘          → shifted out


Filter
------

    raw bit 1 ──→ charge    ─┐
    raw bit 0 ──→ discharge ─┴→ cap voltage ──→ [3.35 V ↓ 0 | 0.74 V ↑ 1] ──→ filtered bit
*/

/// Bits 0-4 and 28: if all are clear the next bit is forced to 1.
const LOCKUP_MASK: u32 = 0x1000_001f;
/// Register width.
pub const NOISE_REGISTER_BITS: u32 = 31;
const REGISTER_MASK: u32 = (1 << NOISE_REGISTER_BITS) - 1;
/// Counter value that counts as runaway and is pulled back.
pub const NOISE_COUNTER_LIMIT: u32 = 1_000_000;
/// Most register clocks a single sub-step may run.
pub const NOISE_MAX_BITS_PER_STEP: u32 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoiseRegister {
    bits: u32,
}

impl NoiseRegister {
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn from_seed(seed: u32) -> Self {
        Self {
            bits: seed & REGISTER_MASK,
        }
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Clock the register once and return the bit fed in.
    #[inline]
    pub fn next_bit(&mut self) -> bool {
        let mut out = ((self.bits >> 28) & 1) ^ (self.bits & 1);

        if self.bits & LOCKUP_MASK == 0 {
            out = 1;
        }

        self.bits = (self.bits >> 1) | (out << 30);
        out == 1
    }
}

/// Raw generator, rate limiter and hysteresis filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Noise {
    register: NoiseRegister,
    counter: u32,
    clock_level: bool,
    pub real_bit: bool,
    pub filter_voltage: f64,
    pub filtered_bit: bool,
}

impl Noise {
    pub fn new() -> Self {
        Self {
            register: NoiseRegister::new(),
            counter: 1,
            clock_level: false,
            real_bit: true,
            filter_voltage: NOISE_CAP_VOLTAGE_MIN,
            filtered_bit: false,
        }
    }

    pub fn register(&self) -> NoiseRegister {
        self.register
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Advance the internal clock by one sub-step.
    ///
    /// `frequency` of zero leaves the register untouched.
    pub fn clock(&mut self, frequency: u32, sample_rate: u32) {
        let sample_rate = sample_rate.max(1);

        let mut bits = 0;
        while self.counter <= frequency {
            if bits == NOISE_MAX_BITS_PER_STEP {
                self.counter = frequency.saturating_add(sample_rate).saturating_add(1);
                break;
            }
            self.counter = self.counter.saturating_add(sample_rate);
            self.real_bit = self.register.next_bit();
            bits += 1;
        }

        self.counter -= frequency;
        if self.counter >= NOISE_COUNTER_LIMIT {
            self.counter = frequency
                .saturating_add(sample_rate)
                .saturating_add(1);
        }
    }

    /// Host-driven clock: one bit per rising edge.
    pub fn clock_edge(&mut self, level: bool) {
        if level && !self.clock_level {
            self.real_bit = self.register.next_bit();
        }
        self.clock_level = level;
    }

    /// Move the filter capacitor and update the filtered bit.
    pub fn filter(&mut self, slope: Slope, external: Option<f64>) {
        self.filter_voltage = match external {
            Some(voltage) => pin_voltage(voltage),
            None if self.real_bit => (self.filter_voltage + slope.charging)
                .clamp(NOISE_CAP_VOLTAGE_MIN, NOISE_CAP_VOLTAGE_MAX),
            None => (self.filter_voltage - slope.discharging)
                .clamp(NOISE_CAP_VOLTAGE_MIN, NOISE_CAP_VOLTAGE_MAX),
        };

        if self.filter_voltage >= NOISE_CAP_HIGH_THRESHOLD {
            self.filtered_bit = false;
        } else if self.filter_voltage <= NOISE_CAP_LOW_THRESHOLD {
            self.filtered_bit = true;
        }
    }
}

impl Default for Noise {
    fn default() -> Self {
        Self::new()
    }
}
