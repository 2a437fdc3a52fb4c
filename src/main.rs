use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::{error::ErrorKind, Parser};

use minibyte::write::assemble_file;

/// minibyte - wrap a hex byte listing into a minimal PE-shaped executable
#[derive(Debug, Parser)]
#[command(name = "minibyte", version, about, long_about = None)]
struct Cli {
    /// Text file holding hex byte pairs, e.g. "B8 2A 00 00 00 C3".
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Path of the executable image to create.
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    // Usage errors exit with 1 instead of clap's default 2
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    // Show minibyte info+ on stderr; --verbose enables debug; RUST_LOG overrides
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_module("minibyte", level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let layout = assemble_file(&cli.input, &cli.output)
        .with_context(|| format!("Compilation of '{}' failed", cli.input.display()))?;

    log::debug!(
        "image: {} code bytes, aligned size {:#x}, {} bytes total",
        layout.code_size,
        layout.aligned_size,
        layout.total_size
    );
    println!(
        "Compilation successful. Executable created: {}",
        cli.output.display()
    );
    Ok(())
}
