use anyhow::Context;
use clap::Parser;
use deband::io::{ImageFormat, read_image, write_image};
use deband::{DebandOptions, RandomDither, deband_image};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "deband")]
#[command(about = "Remove colour banding from an RGB image")]
struct Cli {
    /// Input image (PNG, binary PPM or PGM)
    input: PathBuf,

    /// Output image; the format follows the extension (.png or .ppm)
    output: PathBuf,

    /// Largest RGB distance between regions that are blended, 0 to 30
    #[arg(long, alias = "color-dist", default_value_t = 5.0)]
    colour_dist: f32,

    /// Blend radius in pixels, 0 to 40, or -1 to pick from the width
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    spatial_dist: i32,

    /// Dither amplitude, 0 to 10
    #[arg(long, default_value_t = 1.0)]
    dither_strength: f32,

    /// Exponent smoothing kernel size, up to 9, or -1 to pick from the width
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    kernel_size: i32,

    /// Seed for reproducible dithering
    #[arg(long)]
    seed: Option<u64>,

    /// Log pipeline details
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "deband=debug" } else { "deband=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let options = DebandOptions::default()
        .with_colour_dist(cli.colour_dist)
        .with_spatial_dist(cli.spatial_dist)
        .with_dither_strength(cli.dither_strength)
        .with_kernel_size(cli.kernel_size);
    options.validate()?;

    let format = ImageFormat::from_path(&cli.output)?;
    let image = read_image(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let started = Instant::now();
    let out = match cli.seed {
        Some(seed) => deband_image(&image, &options, &mut RandomDither::from_seed(seed))?,
        None => deband_image(&image, &options, &mut RandomDither::from_os_rng())?,
    };
    tracing::info!(
        width = image.width(),
        height = image.height(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "debanded"
    );

    write_image(&out, &cli.output, format)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    Ok(())
}
