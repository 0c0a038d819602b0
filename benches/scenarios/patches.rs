//! Benchmarks for complete front-panel patches.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use csg_dsp::io::units::{kohms, microfarads, picofarads};
use csg_dsp::{CsgEngine, EngineConfig, EnvelopeMode};

use crate::BLOCK_SIZES;

fn engine() -> CsgEngine {
    let mut engine = CsgEngine::new(EngineConfig {
        sample_rate: 48_000,
        ..EngineConfig::default()
    });
    engine.set_vco_params(0.005, 2.3);
    engine.set_slf_params(1.0, microfarads(0.047));
    engine.set_noise_params(kohms(47.0), kohms(10.0), picofarads(470.0));
    engine.set_attack_params(kohms(10.0), microfarads(1.0));
    engine.set_decay_res(kohms(100.0));
    engine.set_one_shot_params(kohms(100.0), microfarads(1.0));
    engine
}

pub fn bench_patches(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/patches");

    for &size in BLOCK_SIZES {
        let mut out = vec![0.0f64; size];

        // === SIREN ===
        // SLF sweeping the VCO, gated by the VCO envelope
        let mut siren = engine();
        siren.set_mixer_params(true, false, false);
        siren.set_envelope_mode(EnvelopeMode::Vco);

        group.bench_with_input(BenchmarkId::new("siren", size), &size, |b, _| {
            b.iter(|| {
                for o in out.iter_mut() {
                    *o = siren.update(black_box(1)).value;
                }
            })
        });

        // === EXPLOSION ===
        // filtered noise through the one-shot envelope, retriggered per block
        let mut explosion = engine();
        explosion.set_mixer_params(false, false, true);
        explosion.set_envelope_mode(EnvelopeMode::OneShot);

        group.bench_with_input(BenchmarkId::new("explosion", size), &size, |b, _| {
            b.iter(|| {
                explosion.trigger();
                for o in out.iter_mut() {
                    *o = explosion.update(black_box(1)).value;
                }
            })
        });

        // === EVERYTHING ===
        // all three sources and-ed, alternate-polarity envelope
        let mut full = engine();
        full.set_mixer_params(true, true, true);
        full.set_envelope_mode(EnvelopeMode::VcoAltPolarity);

        group.bench_with_input(BenchmarkId::new("all_sources", size), &size, |b, _| {
            b.iter(|| {
                for o in out.iter_mut() {
                    *o = full.update(black_box(1)).value;
                }
            })
        });
    }

    group.finish();
}
