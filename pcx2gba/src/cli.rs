use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use lib_gba::{DecodeOptions, EncoderOptions, OutputFormat, Settings};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Converts an 8-bpp PCX image into GBA source data", long_about = None)]
pub struct Args {
    /// 8-bpp PCX file to convert
    pub input: PathBuf,

    /// Output file. Defaults to the input path with a `.h` (or `.bin`) extension
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Prefix of the generated defines and arrays. Defaults to the input file name
    #[arg(short, long)]
    pub name: Option<String>,

    #[arg(short, long, value_enum, default_value_t = Format::Header)]
    pub format: Format,

    /// Also reject a wrong signature, a non-RLE encoding or several color planes
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Number of words on each line of the generated arrays
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
    pub words_per_line: u16,

    /// More log output, repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// C header with u16 arrays
    Header,
    /// bincode encoded asset
    Bin,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            decode: DecodeOptions {
                strict: self.strict,
            },
            encoder: EncoderOptions {
                words_per_line: usize::from(self.words_per_line),
                ..Default::default()
            },
            format: match self.format {
                Format::Header => OutputFormat::Header,
                Format::Bin => OutputFormat::Binary,
            },
            output: self.output.clone(),
            name: self.name.clone(),
        }
    }
}
