//! csg - offline renderer for the complex sound generator
//!
//! Run with: cargo run --bin csg -- render --out tone.wav --mixer vco

mod render;

use clap::{Parser, Subcommand};

/// Render the emulated sound chip to WAV files
#[derive(Parser)]
#[command(name = "csg")]
#[command(about = "Offline renderer for the complex sound generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a mono 16-bit WAV file
    Render(render::RenderArgs),
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => render::execute(args),
    }
}
