use crate::dsp::curves::{
    ONE_SHOT_CAP_VOLTAGE_MAX, ONE_SHOT_CAP_VOLTAGE_MIN, SLF_CAP_VOLTAGE_MAX, SLF_CAP_VOLTAGE_MIN,
    VCO_CAP_VOLTAGE_MAX, VCO_CAP_VOLTAGE_MIN, VCO_TO_SLF_VOLTAGE_DIFF,
};
use crate::dsp::rate::Slope;
use crate::params::{pin_voltage, VcoMode};

/*
Relaxation Oscillators
======================

All three timers on the chip work the same way: a capacitor charges toward
an upper threshold, a flip-flop flips, the capacitor discharges toward a
lower threshold, the flip-flop flips back. The voltage is a triangle, the
flip-flop is a square.

    MAX ┤    ╱╲      ╱╲      ╱╲
        │   ╱  ╲    ╱  ╲    ╱  ╲
    MIN ┤──╱    ╲──╱    ╲──╱    ╲──
        │
    out ┤   ┌──┐    ┌──┐    ┌──┐
        └───┘  └────┘  └────┘  └───→ sub-steps
          charge discharge


One-Shot
--------

Not free-running. A trigger sets `running`, the capacitor charges to MAX,
`running` clears itself, and the capacitor bleeds back to MIN. Triggering
again while running only confirms `running`; it never restarts the ramp.

    trigger ──→ [running: charge] ──V ≥ MAX──→ [idle: discharge]


SLF (super-low frequency)
-------------------------

Free-running, always active. Output low while charging, high while
discharging. Usually a few Hz, used to sweep the VCO.


VCO
---

Same shape as the SLF, but the ceiling moves:

    VcoMode::Slf       ceiling = SLF voltage + 0.35 V
    VcoMode::External  ceiling = 0.35 V

The ceiling never leaves the VCO range, even when the SLF pin is driven
externally. A lower ceiling means a shorter ramp and a higher pitch, so the SLF triangle
sweeps the VCO pitch up and down. Every rising edge of the VCO output also
toggles `alt_polarity`, which one envelope mode uses to gate every other
cycle.


External Voltage
----------------

Each capacitor pin can be driven directly by the host. The RC update is then
skipped and the injected voltage (held within the supply rails) is used as-is,
but the threshold checks still run so the flip-flops keep following the pin.
Once the pin is released the next internal step pulls the capacitor back into
its own range.
*/

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OneShot {
    pub voltage: f64,
    pub running: bool,
}

impl OneShot {
    pub fn new() -> Self {
        Self {
            voltage: ONE_SHOT_CAP_VOLTAGE_MIN,
            running: false,
        }
    }

    /// Start (or confirm) a pulse.
    pub fn trigger(&mut self) {
        self.running = true;
    }

    pub fn step(&mut self, slope: Slope, external: Option<f64>) {
        self.voltage = match external {
            Some(voltage) => pin_voltage(voltage),
            None if self.running => (self.voltage + slope.charging)
                .clamp(ONE_SHOT_CAP_VOLTAGE_MIN, ONE_SHOT_CAP_VOLTAGE_MAX),
            None => (self.voltage - slope.discharging)
                .clamp(ONE_SHOT_CAP_VOLTAGE_MIN, ONE_SHOT_CAP_VOLTAGE_MAX),
        };

        // Auto-reset at the top
        if self.voltage >= ONE_SHOT_CAP_VOLTAGE_MAX {
            self.running = false;
        }
    }
}

impl Default for OneShot {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slf {
    pub voltage: f64,
    pub output: bool, // high while discharging
}

impl Slf {
    pub fn new() -> Self {
        Self {
            voltage: SLF_CAP_VOLTAGE_MIN,
            output: false,
        }
    }

    pub fn step(&mut self, slope: Slope, external: Option<f64>) {
        self.voltage = match external {
            Some(voltage) => pin_voltage(voltage),
            None if !self.output => {
                (self.voltage + slope.charging).clamp(SLF_CAP_VOLTAGE_MIN, SLF_CAP_VOLTAGE_MAX)
            }
            None => {
                (self.voltage - slope.discharging).clamp(SLF_CAP_VOLTAGE_MIN, SLF_CAP_VOLTAGE_MAX)
            }
        };

        if self.voltage >= SLF_CAP_VOLTAGE_MAX {
            self.output = true;
        } else if self.voltage <= SLF_CAP_VOLTAGE_MIN {
            self.output = false;
        }
    }
}

impl Default for Slf {
    fn default() -> Self {
        Self::new()
    }
}

/// Upper VCO threshold for the given control mode.
#[inline]
pub fn vco_ceiling(mode: VcoMode, slf_voltage: f64) -> f64 {
    let ceiling = match mode {
        VcoMode::Slf => slf_voltage + VCO_TO_SLF_VOLTAGE_DIFF,
        VcoMode::External => VCO_TO_SLF_VOLTAGE_DIFF,
    };
    ceiling.clamp(VCO_CAP_VOLTAGE_MIN, VCO_CAP_VOLTAGE_MAX)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vco {
    pub voltage: f64,
    pub output: bool,       // high while discharging
    pub alt_polarity: bool, // toggles on each rising edge of `output`
}

impl Vco {
    pub fn new() -> Self {
        Self {
            voltage: VCO_CAP_VOLTAGE_MIN,
            output: false,
            alt_polarity: false,
        }
    }

    pub fn step(&mut self, slope: Slope, ceiling: f64, external: Option<f64>) {
        self.voltage = match external {
            Some(voltage) => pin_voltage(voltage),
            None if !self.output => (self.voltage + slope.charging)
                .min(ceiling)
                .clamp(VCO_CAP_VOLTAGE_MIN, VCO_CAP_VOLTAGE_MAX),
            None => {
                (self.voltage - slope.discharging).clamp(VCO_CAP_VOLTAGE_MIN, VCO_CAP_VOLTAGE_MAX)
            }
        };

        if self.voltage >= ceiling {
            if !self.output {
                self.alt_polarity = !self.alt_polarity;
            }
            self.output = true;
        } else if self.voltage <= VCO_CAP_VOLTAGE_MIN {
            self.output = false;
        }
    }
}

impl Default for Vco {
    fn default() -> Self {
        Self::new()
    }
}
