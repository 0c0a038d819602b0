//! Benchmarks for the relaxation oscillators.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use csg_dsp::dsp::oscillator::{vco_ceiling, OneShot, Slf, Vco};
use csg_dsp::dsp::rate::Slope;
use csg_dsp::VcoMode;

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let slope = Slope {
        charging: 0.01,
        discharging: 0.02,
    };

    for &size in BLOCK_SIZES {
        // SLF alone - clamp plus two threshold compares
        let mut slf = Slf::new();
        group.bench_with_input(BenchmarkId::new("slf", size), &size, |b, &size| {
            b.iter(|| {
                for _ in 0..size {
                    slf.step(black_box(slope), None);
                }
            })
        });

        // SLF driving the VCO ceiling
        let mut slf = Slf::new();
        let mut vco = Vco::new();
        group.bench_with_input(BenchmarkId::new("slf_vco", size), &size, |b, &size| {
            b.iter(|| {
                for _ in 0..size {
                    slf.step(black_box(slope), None);
                    let ceiling = vco_ceiling(VcoMode::Slf, slf.voltage);
                    vco.step(black_box(slope), ceiling, None);
                }
            })
        });

        // One-shot, retriggered whenever it finishes
        let mut shot = OneShot::new();
        group.bench_with_input(BenchmarkId::new("one_shot", size), &size, |b, &size| {
            b.iter(|| {
                for _ in 0..size {
                    if !shot.running && shot.voltage == 0.0 {
                        shot.trigger();
                    }
                    shot.step(black_box(slope), None);
                }
            })
        });
    }

    group.finish();
}
