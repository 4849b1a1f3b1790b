use std::{fs, path::PathBuf, process::ExitCode};

use clap::Parser;
use quill::run_source;

/// quill is a small dynamically-typed scripting language with console I/O,
/// functions, closures and file inclusion.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the script to interpret.
    script: PathBuf,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(),
                           clap::error::ErrorKind::DisplayHelp
                           | clap::error::ErrorKind::DisplayVersion) =>
        {
            print!("{e}");
            return ExitCode::SUCCESS;
        },
        Err(e) => {
            eprint!("{e}");
            return ExitCode::FAILURE;
        },
    };

    let script = match fs::read_to_string(&args.script) {
        Ok(script) => script,
        Err(_) => {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      args.script.display());
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = run_source(&script) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
