use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::de::DeserializeOwned;

use crate::{run_exercise, Directive, ExerciseResult, SpreadsheetDocument};

#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// CLI arguments of the `sheetcheck` binary.
#[derive(Parser)]
#[command(about = "Check a spreadsheet submission against a solution.")]
pub struct Args {
    /// Student spreadsheet (JSON with `values`, `formulas` and `pivotTables`).
    student: PathBuf,

    /// Solution spreadsheet, same layout as the student file.
    solution: PathBuf,

    /// Checks to run: `[{"range": "A1", "sct": ["has_equal_pivot"]}]`.
    sct: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

pub fn run() -> Result<bool> {
    run_with_args(Args::parse())
}

/// Run the exercise described by `args` and print the result.
///
/// Returns whether the submission passed; the binary turns `false` into exit code 1.
pub fn run_with_args(args: Args) -> Result<bool> {
    let student: SpreadsheetDocument = read_json(&args.student)?;
    let solution: SpreadsheetDocument = read_json(&args.solution)?;
    let directives: Vec<Directive> = read_json(&args.sct)?;

    let result = run_exercise(&student, &solution, &directives)
        .context("exercise could not be checked")?;

    match write_result(&args.format, &result) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {}
        other => other.context("failed to write result")?,
    }
    Ok(result.success)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn write_result(format: &OutputFormat, result: &ExerciseResult) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match format {
        OutputFormat::Text => match &result.message {
            None => writeln!(handle, "Correct."),
            Some(message) => writeln!(handle, "{message}"),
        },
        OutputFormat::Json => {
            serde_json::to_writer(&mut handle, result)?;
            handle.write_all(b"\n")
        }
    }
}
