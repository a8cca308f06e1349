use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Parse, convert and preview colour tables.
#[derive(Debug, Clone, Parser)]
#[clap(name = "colortab", version)]
pub struct CliArguments {
    /// The command to run
    #[command(subcommand)]
    pub command: Command,

    /// Sets the level of logging verbosity:
    /// -v = info, -vv = debug, -vvv = trace
    #[clap(short, long, action = ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Parse every colour table under the given paths and print a summary
    Check(CheckCommand),

    /// Rewrite a colour table (either syntax) in the legacy format
    Convert(ConvertCommand),

    /// Render a colour table preview to PNG or JSON draw instructions
    Preview(PreviewCommand),

    /// Sample a built-in palette into a colour table
    Preset(PresetCommand),
}

#[derive(Debug, Clone, Parser)]
pub struct CheckCommand {
    /// Files or directories to scan
    #[clap(required = true)]
    pub paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, Parser)]
pub struct ConvertCommand {
    /// Colour table to read
    pub input: PathBuf,

    /// Where to write the legacy table (stdout when omitted)
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Parser)]
pub struct PreviewCommand {
    /// Colour table to read
    pub input: PathBuf,

    /// PNG file to write
    #[clap(short, long, required_unless_present = "json")]
    pub output: Option<PathBuf>,

    /// Width of the preview strip in pixels
    #[clap(long)]
    pub width: Option<u32>,

    /// Print draw instructions as JSON instead of writing a PNG
    #[clap(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Parser)]
pub struct PresetCommand {
    /// Palette name (viridis, magma, plasma, inferno, turbo, cubehelix_default,
    /// rainbow, spectral, sinebow)
    pub name: String,

    /// Lowest breakpoint
    #[clap(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub min: f64,

    /// Highest breakpoint
    #[clap(long, default_value_t = 100.0, allow_negative_numbers = true)]
    pub max: f64,

    /// Number of breakpoints
    #[clap(long, default_value_t = 10)]
    pub bands: usize,

    /// Blend each band into the next instead of flat colours
    #[clap(long)]
    pub gradient: bool,

    /// Product label (defaults to the palette name)
    #[clap(long)]
    pub product: Option<String>,

    /// Units label
    #[clap(long, default_value = "")]
    pub units: String,

    /// Tick spacing hint
    #[clap(long)]
    pub step: Option<String>,

    /// Where to write the table (stdout when omitted)
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}
