mod cli;

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use cli::Args;
use log::{debug, error};

fn report(err: &dyn Error) {
    eprintln!("ERROR: {}", err);
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    lib_gba::init_logging(args.log_level());
    debug!("Arguments: {:?}", args);

    match lib_gba::convert_file(&args.input, &args.settings()) {
        Ok(conversion) => {
            println!(
                "INPUT  FILE: {} ({}x{}x{}-bpp)",
                conversion.input.display(),
                conversion.width,
                conversion.height,
                conversion.bits_per_pixel
            );
            println!("OUTPUT FILE: {}", conversion.output.display());
            println!("Successfully created file {}", conversion.output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Conversion failed ({:?})", err.kind());
            report(&err);
            ExitCode::FAILURE
        }
    }
}
