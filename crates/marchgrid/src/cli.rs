//! Command line surface and the generation run it drives.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use marchgrid_procedural::{
    GenerationConfig, GridBuilder, GridError, GridResult, GridSession, Interpolation, SeedSpec,
};

use crate::sinks::{AsciiSink, IndexSink};

/// Exit status for invalid configuration.
pub const EXIT_INVALID_CONFIG: u8 = 2;

/// Exit status for environment failures.
pub const EXIT_IO: u8 = 1;

/// Marching-squares occupancy grid generator.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// TOML configuration file, applied before the flags below
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Screen width in pixels
    #[arg(long)]
    pub width: Option<i64>,

    /// Screen height in pixels
    #[arg(long)]
    pub height: Option<i64>,

    /// Tileset scale factor (positive integer, default 3)
    #[arg(long)]
    pub scale: Option<String>,

    /// Noise index advance per cell (non-negative, default 1.0)
    #[arg(long)]
    pub step: Option<String>,

    /// Fill threshold (non-negative, default 0.5)
    #[arg(long)]
    pub threshold: Option<String>,

    /// Noise table size (positive integer, default width*height/cell size)
    #[arg(long)]
    pub period: Option<String>,

    /// Noise seed: a number or any phrase. Omit for a random seed
    #[arg(long)]
    pub seed: Option<String>,

    /// Noise interpolation
    #[arg(long, value_enum)]
    pub interpolation: Option<InterpolationArg>,

    /// Tile the cleaned grid instead of the raw one
    #[arg(long, default_value_t = false)]
    pub cleanup: bool,

    /// Render both the raw and the cleaned grid from one generation
    #[arg(long, default_value_t = false)]
    pub both: bool,

    /// What to print
    #[arg(long, value_enum, default_value_t = OutputFormat::Ascii)]
    pub output: OutputFormat,

    /// Print the noise table before the grid
    #[arg(long, default_value_t = false)]
    pub dump_noise: bool,
}

/// `--interpolation` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InterpolationArg {
    /// Linear blend
    Linear,
    /// Cosine blend
    Cosine,
}

impl From<InterpolationArg> for Interpolation {
    fn from(arg: InterpolationArg) -> Self {
        match arg {
            InterpolationArg::Linear => Self::Linear,
            InterpolationArg::Cosine => Self::Cosine,
        }
    }
}

/// `--output` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Contour glyphs
    Ascii,
    /// Tile index matrix
    Indices,
    /// Raw cells as `#` and `.`
    Cells,
}

/// Merges the config file and flags. Flags win.
pub fn build_config(args: &Args) -> GridResult<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => GenerationConfig::from_toml_file(path)?,
        None => GenerationConfig::default(),
    };

    if let Some(width) = args.width {
        config.screen_width = width;
    }
    if let Some(height) = args.height {
        config.screen_height = height;
    }
    if let Some(scale) = &args.scale {
        config.set_scale(scale)?;
    }
    if let Some(step) = &args.step {
        config.set_noise_step(step)?;
    }
    if let Some(threshold) = &args.threshold {
        config.set_threshold(threshold)?;
    }
    if let Some(period) = &args.period {
        config.set_period(period)?;
    }
    if let Some(seed) = &args.seed {
        config.seed = Some(SeedSpec::parse(seed));
    }
    if let Some(interpolation) = args.interpolation {
        config.interpolation = interpolation.into();
    }
    if args.cleanup {
        config.cleanup = true;
    }
    Ok(config)
}

/// Validates, generates and prints.
pub fn run(args: &Args) -> GridResult<()> {
    let plan = build_config(args)?.validate()?;
    tracing::info!(
        cell_size = plan.cell_size,
        period = plan.period,
        threshold = plan.threshold,
        step = plan.noise_step,
        "configuration accepted"
    );

    let mut session = GridSession::generate(&plan);
    tracing::info!(seed = %session.seed(), "reproduce with --seed {}", session.seed());

    if args.dump_noise {
        let builder = GridBuilder::from_plan(&plan).with_seed(session.seed());
        println!("{}", builder.noise_table());
    }

    if args.both {
        session.set_cleanup(false);
        println!("raw:");
        print!("{}", render(&session, args.output));
        session.set_cleanup(true);
        println!("cleaned:");
        print!("{}", render(&session, args.output));
    } else {
        print!("{}", render(&session, args.output));
    }
    Ok(())
}

fn render(session: &GridSession, format: OutputFormat) -> String {
    match format {
        OutputFormat::Ascii => {
            let mut sink = AsciiSink::default();
            session.render(&mut sink);
            sink.render()
        }
        OutputFormat::Indices => {
            let mut sink = IndexSink::default();
            session.render(&mut sink);
            sink.render()
        }
        OutputFormat::Cells => session.active().to_string(),
    }
}

/// Maps an error to the process exit status.
#[must_use]
pub fn exit_code(error: &GridError) -> u8 {
    if error.is_configuration() {
        EXIT_INVALID_CONFIG
    } else {
        EXIT_IO
    }
}
