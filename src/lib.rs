pub mod dsp; // Circuit primitives: rates, curves, oscillators, noise, envelope, mixer
pub mod engine; // Owning engine and per-call update scheduler
pub mod error;
pub mod io; // Host-facing helpers (gate edges, component units)
pub mod params; // Control values supplied by the host

pub use engine::message::{ControlMessage, MessageReceiver};
pub use engine::{CsgEngine, EngineConfig, Sample};
#[cfg(feature = "rtrb")]
pub use engine::message::ControlHandle;
pub use error::CsgError;
pub use params::{ControlParameters, EnvelopeMode, ExternalVoltages, MixerMode, NoiseClock, VcoMode};

/// Internal sub-steps advanced by every call to [`CsgEngine::update`].
pub const SUBSTEPS_PER_UPDATE: usize = 6;

/// Sample rate used when no configuration is given.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
