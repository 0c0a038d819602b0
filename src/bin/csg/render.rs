//! `csg render` - drive the engine once per frame and write the result

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use color_eyre::eyre::{bail, Result as EyreResult, WrapErr};

use csg_dsp::{
    io::{
        gate::SchmittTrigger,
        units::{kohms, microfarads, picofarads},
    },
    CsgEngine, EngineConfig, EnvelopeMode, VcoMode,
};

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV path
    #[arg(long)]
    out: PathBuf,

    /// Length in seconds
    #[arg(long, default_value_t = 2.0)]
    seconds: f64,

    #[arg(long, default_value_t = 48_000)]
    sample_rate: u32,

    /// Signals reaching the output, comma separated
    #[arg(long, value_enum, value_delimiter = ',', default_value = "vco")]
    mixer: Vec<MixerInput>,

    #[arg(long, value_enum, default_value_t = EnvelopeArg::MixerOnly)]
    envelope: EnvelopeArg,

    #[arg(long, value_enum, default_value_t = VcoModeArg::Slf)]
    vco_mode: VcoModeArg,

    /// VCO time constant (seconds-scale control value)
    #[arg(long, default_value_t = 0.005)]
    vco_res: f64,

    /// SLF time constant
    #[arg(long, default_value_t = 1.0)]
    slf_res: f64,

    /// Noise clock resistor in ohms (10k - 3.3M)
    #[arg(long, default_value_t = 100_000.0)]
    noise_clock_res: f64,

    /// Fire the one-shot on the first frame
    #[arg(long)]
    trigger: bool,

    /// Period in seconds of a 5 V gate pulse train fed to the one-shot
    #[arg(long)]
    gate_period: Option<f64>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MixerInput {
    Vco,
    Slf,
    Noise,
}

#[derive(Clone, Copy, ValueEnum)]
enum EnvelopeArg {
    Vco,
    OneShot,
    MixerOnly,
    Alt,
}

impl From<EnvelopeArg> for EnvelopeMode {
    fn from(arg: EnvelopeArg) -> Self {
        match arg {
            EnvelopeArg::Vco => EnvelopeMode::Vco,
            EnvelopeArg::OneShot => EnvelopeMode::OneShot,
            EnvelopeArg::MixerOnly => EnvelopeMode::MixerOnly,
            EnvelopeArg::Alt => EnvelopeMode::VcoAltPolarity,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum VcoModeArg {
    Slf,
    External,
}

impl From<VcoModeArg> for VcoMode {
    fn from(arg: VcoModeArg) -> Self {
        match arg {
            VcoModeArg::Slf => VcoMode::Slf,
            VcoModeArg::External => VcoMode::External,
        }
    }
}

pub fn execute(args: RenderArgs) -> EyreResult<()> {
    if !(args.seconds.is_finite() && args.seconds > 0.0) {
        bail!("--seconds must be a positive number, got {}", args.seconds);
    }

    let config = EngineConfig {
        sample_rate: args.sample_rate,
        ..EngineConfig::default()
    };
    let mut engine = CsgEngine::try_new(config).wrap_err("invalid engine configuration")?;

    let (a, b, c) = (
        args.mixer.contains(&MixerInput::Vco),
        args.mixer.contains(&MixerInput::Slf),
        args.mixer.contains(&MixerInput::Noise),
    );

    engine.set_vco_params(args.vco_res, 2.3);
    engine.set_pitch_voltage(5.0);
    engine.set_vco_mode(args.vco_mode.into());
    engine.set_slf_params(args.slf_res, microfarads(0.047));
    engine.set_noise_params(args.noise_clock_res, kohms(10.0), picofarads(470.0));
    engine.set_attack_params(kohms(10.0), microfarads(1.0));
    engine.set_decay_res(kohms(100.0));
    engine.set_one_shot_params(kohms(100.0), microfarads(2.0));
    engine.set_mixer_params(a, b, c);
    engine.set_envelope_mode(args.envelope.into());

    if args.trigger {
        engine.trigger();
    }

    let gate_frames = match args.gate_period {
        Some(period) if period.is_finite() && period > 0.0 => {
            Some(((period * f64::from(args.sample_rate)).round() as u64).max(2))
        }
        Some(period) => bail!("--gate-period must be a positive number, got {period}"),
        None => None,
    };
    let mut gate = SchmittTrigger::default();

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: args.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&args.out, spec)
        .wrap_err_with(|| format!("failed to create {}", args.out.display()))?;

    let frames = (args.seconds * f64::from(args.sample_rate)).round() as u64;
    let mut peak: i16 = 0;
    let mut triggers = 0u64;
    for frame in 0..frames {
        if let Some(period) = gate_frames {
            // High for the first half of each period
            let voltage = if frame % period < period / 2 { 5.0 } else { 0.0 };
            if gate.process(voltage) {
                engine.trigger();
                triggers += 1;
            }
        }

        let sample = engine.update(1).to_i16();
        peak = peak.max(sample.saturating_abs());
        writer
            .write_sample(sample)
            .wrap_err("failed to write sample")?;
    }
    writer.finalize().wrap_err("failed to finalize WAV file")?;

    tracing::info!(
        frames,
        peak,
        triggers,
        mixer = ?engine.params().mixer,
        out = %args.out.display(),
        "render complete"
    );
    Ok(())
}
