//! Whole-engine benchmarks.
//!
//! Each patch is a typical front-panel setting, rendered one `update` per
//! output frame the way a host audio callback drives it.

mod patches;

pub use patches::bench_patches;
