use crate::cli::conf::print_config_error;
use crate::cli::summary::render_run_summary;
use crate::conf::load_config;
use crate::pipeline::Pipeline;
use crate::stream::TsvSink;
use anyhow::{Context, Result};
use clap::Args;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to config directory
    #[arg(long, default_value = "config")]
    pub config: PathBuf,

    /// Access log to read, or "-" for stdin
    #[arg(long, short)]
    pub input: PathBuf,

    /// TSV file to write
    #[arg(long, short)]
    pub output: PathBuf,

    /// Append to an existing output instead of truncating it
    #[arg(long)]
    pub append: bool,
}

pub fn run(args: RunArgs) -> Result<()> {
    let validated = match load_config(&args.config) {
        Ok(validated) => validated,
        Err(err) => {
            print_config_error(err, false);
            std::process::exit(1);
        }
    };

    let pipeline = Pipeline::from_validated(&validated);
    let source = open_source(&args.input)?;

    let columns = pipeline.columns();
    let mut sink = if args.append {
        TsvSink::append(&args.output, columns)?
    } else {
        TsvSink::create(&args.output, columns)?
    };

    let summary = pipeline
        .run(source, &mut sink)
        .with_context(|| format!("run failed writing {}", args.output.display()))?;

    print!("{}", render_run_summary(&summary, &args.output));
    Ok(())
}

fn open_source(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }

    let file =
        File::open(path).with_context(|| format!("failed to open input {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}
