use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser};

use ts_annotate::config::DEFAULT_OUT_DIR;
use ts_annotate::tracing_config::init_tracing;
use ts_annotate::{run, ConvertConfig};

/// Adds TypeScript annotations to JavaScript sources.
#[derive(Debug, Parser)]
#[command(name = "ts-annotate", version)]
struct Cli {
    /// A source file (.js, .jsx, .ts, .tsx) or a directory to convert recursively.
    input: Option<PathBuf>,

    /// Name of the output directory created next to the input.
    #[arg(long = "out-dir", value_name = "NAME", default_value = DEFAULT_OUT_DIR)]
    out_dir: String,

    /// Additional directory or file name to leave out of a directory walk. Repeatable.
    #[arg(long = "skip", value_name = "SEGMENT")]
    skip: Vec<String>,

    /// Increase verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> ConvertConfig {
        ConvertConfig {
            out_dir_name: self.out_dir.clone(),
            ..ConvertConfig::default()
        }
        .with_skip_segments(self.skip.iter().cloned())
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let Some(input) = &cli.input else {
        eprintln!("{}", Cli::command().render_usage());
        return Ok(ExitCode::FAILURE);
    };

    init_tracing(cli.verbose);

    let summary = run(&cli.config(), input)
        .with_context(|| format!("converting `{}` failed", input.display()))?;

    println!(
        "{} converted, {} failed, {} skipped",
        summary.converted.len(),
        summary.failed.len(),
        summary.skipped.len()
    );

    Ok(ExitCode::SUCCESS)
}
