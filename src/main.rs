//! strand CLI entry point.

mod cli;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Command};
use strand::diagnostics::{print_diagnostic, summary_line};
use strand::pipeline::{GenerationResult, generate_with_diagnostics};
use strand::{BindingsFile, StrandDatabaseImpl};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Generate { bindings, output } => generate_file(&bindings, output.as_deref()),
        Command::Check { bindings } => check_file(&bindings),
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("STRAND_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(path: &Path) -> strand::Result<(BindingsFile, StrandDatabaseImpl, GenerationResult)> {
    let db = StrandDatabaseImpl::default();
    let file = db.load(path)?;
    let result = generate_with_diagnostics(&db, file);
    Ok((file, db, result))
}

fn generate_file(path: &Path, output: Option<&Path>) -> strand::Result<ExitCode> {
    let (file, db, result) = run(path)?;
    let display = path.display().to_string();
    for diag in &result.diagnostics {
        print_diagnostic(diag, file.text(&db), &display);
    }
    if result.output.configuration_failed {
        return Ok(ExitCode::FAILURE);
    }

    let text = result.output.compose();
    match output {
        Some(output) => std::fs::write(output, text)?,
        None => print!("{text}"),
    }
    Ok(ExitCode::SUCCESS)
}

fn check_file(path: &Path) -> strand::Result<ExitCode> {
    let (_, _, result) = run(path)?;
    for diag in &result.diagnostics {
        println!("{}", summary_line(diag));
    }
    let output = &result.output;
    println!("{} translated, {} skipped", output.translated, output.skipped);

    if output.configuration_failed || output.skipped > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
