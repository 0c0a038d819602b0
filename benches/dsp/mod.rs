//! Benchmarks for single circuit stages.

mod noise;
mod oscillator;
mod rate;

pub use noise::bench_noise;
pub use oscillator::bench_oscillator;
pub use rate::bench_rates;
