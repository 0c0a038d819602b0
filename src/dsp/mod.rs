//! Circuit-level primitives of the sound generator.
//!
//! Each stage is a small `Copy` struct with a `step` method that advances it by
//! one internal sub-step. None of them allocate or log, so they are safe to
//! drive from an audio callback. Ordering and rate computation live in
//! [`crate::engine`].

/// Measured voltages, gain tables and fitted curves.
pub mod curves;
/// Attack/decay capacitor and envelope-mode dispatch.
pub mod envelope;
/// Mixer truth table and clipped output stage.
pub mod mixer;
/// Shift-register noise, clock divider and hysteresis filter.
pub mod noise;
/// One-shot, SLF and VCO relaxation oscillators.
pub mod oscillator;
/// RC charge/discharge rates and per-update step computation.
pub mod rate;

pub use envelope::AttackDecay;
pub use noise::{Noise, NoiseRegister};
pub use oscillator::{OneShot, Slf, Vco};
pub use rate::{Slope, StepRates};
