//! Benchmarks for the per-update rate computation.

use std::hint::black_box;

use criterion::Criterion;
use csg_dsp::dsp::rate::StepRates;
use csg_dsp::io::units::{kohms, microfarads, picofarads};
use csg_dsp::ControlParameters;

pub fn bench_rates(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/rate");

    // Everything connected: every fitted formula plus powf for the noise clock
    let full = ControlParameters {
        one_shot_res: kohms(100.0),
        one_shot_cap: microfarads(1.0),
        slf_res: 1.0,
        slf_cap: microfarads(0.047),
        vco_res: 0.005,
        vco_voltage: 2.3,
        pitch_voltage: 3.0,
        noise_clock_res: kohms(100.0),
        noise_filter_res: kohms(10.0),
        noise_filter_cap: picofarads(470.0),
        attack_res: kohms(10.0),
        decay_res: kohms(100.0),
        attack_decay_cap: microfarads(1.0),
        ..ControlParameters::default()
    };
    group.bench_function("connected", |b| {
        b.iter(|| StepRates::compute(black_box(&full), black_box(48_000)))
    });

    // Nothing connected: sentinel branches only
    let empty = ControlParameters::default();
    group.bench_function("unset", |b| {
        b.iter(|| StepRates::compute(black_box(&empty), black_box(48_000)))
    });

    group.finish();
}
