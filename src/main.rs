use clap::Parser;
use std::process::ExitCode;
use tagwipe::cli::commands::Cli;
use tagwipe::{sanitize_file, KeepPolicy, Logger, ScrubError};

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    // One output path implies one input file; batch runs are in-place only.
    if cli.output.is_some() && cli.inputs.len() > 1 {
        let err = ScrubError::Usage(
            "-o/--output is only valid with a single input file".to_string(),
        );
        eprintln!("error: {}", err);
        return ExitCode::from(err.exit_class());
    }

    let policy = if cli.keep.is_empty() {
        KeepPolicy::remove_all()
    } else {
        KeepPolicy::from_keys(&cli.keep)
    };

    let mut logger = match &cli.log_file {
        Some(path) => Logger::to_file(path),
        None => Logger::to_console(),
    };

    let mut failed = 0usize;
    let mut exit = 0u8;
    for input in &cli.inputs {
        let result = sanitize_file(input, cli.output.as_deref(), &policy);
        if !result.succeeded() {
            failed += 1;
        }
        exit = exit.max(result.exit_class);
        logger.record(&result);
    }

    logger.summarize(cli.inputs.len(), failed);

    ExitCode::from(exit)
}
