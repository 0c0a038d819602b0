//! Benchmarks for the noise source.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use csg_dsp::dsp::curves::noise_gen_freq;
use csg_dsp::dsp::noise::Noise;
use csg_dsp::dsp::rate::Slope;

use crate::BLOCK_SIZES;

pub fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/noise");
    let slope = Slope {
        charging: 0.2,
        discharging: 0.2,
    };

    for &size in BLOCK_SIZES {
        // Fastest clock: several register shifts per sub-step at 48kHz
        let fast = noise_gen_freq(10_000.0);
        let mut noise = Noise::new();
        group.bench_with_input(BenchmarkId::new("fast_clock", size), &size, |b, &size| {
            b.iter(|| {
                for _ in 0..size {
                    noise.clock(black_box(fast), 48_000);
                    noise.filter(black_box(slope), None);
                }
            })
        });

        // Slowest clock: mostly counter arithmetic
        let slow = noise_gen_freq(3_300_000.0);
        let mut noise = Noise::new();
        group.bench_with_input(BenchmarkId::new("slow_clock", size), &size, |b, &size| {
            b.iter(|| {
                for _ in 0..size {
                    noise.clock(black_box(slow), 48_000);
                    noise.filter(black_box(slope), None);
                }
            })
        });
    }

    group.finish();
}
