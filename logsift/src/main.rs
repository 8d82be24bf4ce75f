use clap::{Parser, Subcommand};
use logsift_core::cli;
use logsift_core::cli::conf::ConfigCmd;
use logsift_core::logging::{LogFormat, default_log_format, init_logging};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "logsift",
    version,
    about = "logsift: access-log extraction, enrichment and classification"
)]
struct Cli {
    /// Log output format: json or pretty (default depends on the terminal)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract, enrich and classify an access log into a TSV table
    Run(cli::RunArgs),

    /// Decompress rotated *.gz logs in a directory into one file
    Unite {
        /// Directory holding the archives
        #[arg(long)]
        dir: PathBuf,

        /// File to append the decompressed logs to
        #[arg(long, short)]
        output: PathBuf,
    },

    /// Filter a TSV table by column pattern and/or date range
    Filter(cli::FilterArgs),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_format.unwrap_or_else(default_log_format));

    match cli.command {
        Command::Run(args) => cli::run(args),
        Command::Unite { dir, output } => cli::unite(dir, output),
        Command::Filter(args) => cli::filter(args),
        Command::Config { cmd } => cli::conf::run(cmd),
    }
}
