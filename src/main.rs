//! homomorphic CLI: illumination correction for grayscale images.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use homomorphic_rust::io::{load_grayscale, save_grayscale};
use homomorphic_rust::{homomorphic_filter_u8_detailed, HomomorphicParams};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Parser)]
#[command(name = "homomorphic")]
#[command(
    about = "Apply a Butterworth homomorphic filter to an image (processed as grayscale)"
)]
#[command(version)]
struct Cli {
    /// Path to the input image.
    input: PathBuf,

    /// Path to write the filtered 8-bit grayscale image (format from extension).
    #[arg(short, long)]
    output: PathBuf,

    /// Butterworth cutoff radius in frequency bins.
    #[arg(long, default_value_t = HomomorphicParams::default().cutoff)]
    cutoff: f64,

    /// Butterworth order (roll-off steepness).
    #[arg(long, default_value_t = HomomorphicParams::default().order)]
    order: f64,

    /// Gain for low frequencies (illumination).
    #[arg(long, default_value_t = HomomorphicParams::default().gamma_low, allow_negative_numbers = true)]
    gamma_low: f64,

    /// Gain for high frequencies (reflectance detail).
    #[arg(long, default_value_t = HomomorphicParams::default().gamma_high, allow_negative_numbers = true)]
    gamma_high: f64,
}

impl Cli {
    fn to_params(&self) -> HomomorphicParams {
        HomomorphicParams::new(self.cutoff, self.order, self.gamma_low, self.gamma_high)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> CliResult<()> {
    let params = cli.to_params();
    // Fail before decoding anything
    params.validate()?;
    if params.is_emphasis_inverted() {
        tracing::warn!(
            "gamma_high ({}) < gamma_low ({}): detail will be suppressed, not boosted",
            params.gamma_high,
            params.gamma_low
        );
    }

    tracing::info!("Loading image: {}", cli.input.display());
    let image = load_grayscale(&cli.input).map_err(|e| -> CliError {
        format!("Failed to open image {}: {}", cli.input.display(), e).into()
    })?;
    let (h, w) = image.dim();
    tracing::info!("Image size: {}x{}", w, h);

    let start = Instant::now();
    let output = homomorphic_filter_u8_detailed(image.view(), &params)?;
    tracing::info!(
        "Filtered in {:.1} ms (cutoff={}, order={}, gamma_low={}, gamma_high={})",
        start.elapsed().as_secs_f64() * 1000.0,
        params.cutoff,
        params.order,
        params.gamma_low,
        params.gamma_high
    );
    if output.stretch.is_degenerate() {
        tracing::warn!("Filtered image has no dynamic range; writing a constant image");
    }

    save_grayscale(&cli.output, &output.image).map_err(|e| -> CliError {
        format!("Failed to write {}: {}", cli.output.display(), e).into()
    })?;
    tracing::info!("Wrote {}", cli.output.display());

    Ok(())
}
