use crate::filter::Table;
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// TSV table written by `logsift run`
    #[arg(long, short)]
    pub input: PathBuf,

    /// Where to write the filtered table, or "-" for stdout
    #[arg(long, short, default_value = "-")]
    pub output: PathBuf,

    /// Column to match against
    #[arg(long, requires = "pattern")]
    pub column: Option<String>,

    /// Case-insensitive regex for --column
    #[arg(long, requires = "column")]
    pub pattern: Option<String>,

    /// First date to keep (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last date to keep (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

pub fn filter(args: FilterArgs) -> Result<()> {
    let mut table = Table::read(&args.input)?;

    if let (Some(column), Some(pattern)) = (&args.column, &args.pattern) {
        table = table.filter_column(column, pattern)?;
    }

    if args.from.is_some() || args.to.is_some() {
        table = table.date_range(
            args.from.unwrap_or(NaiveDate::MIN),
            args.to.unwrap_or(NaiveDate::MAX),
        )?;
    }

    if args.output.as_os_str() == "-" {
        table.write(io::stdout().lock())?;
    } else {
        table.write_path(&args.output)?;
        eprintln!("✔ {} rows written to {}", table.len(), args.output.display());
    }

    Ok(())
}
