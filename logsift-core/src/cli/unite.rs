use crate::cli::summary::render_unite_summary;
use anyhow::Result;
use std::path::PathBuf;

pub fn unite(dir: PathBuf, output: PathBuf) -> Result<()> {
    let summary = crate::unite::unite(&dir, &output)?;
    print!("{}", render_unite_summary(&summary, &output));
    Ok(())
}
