use anyhow::{Context, Result, bail};
use rust_embed::RustEmbed;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(RustEmbed)]
#[folder = "config-templates/"]
pub struct ConfigTemplates;

pub fn init(path: PathBuf) -> Result<()> {
    // Refuse to overwrite an existing non-empty directory
    if path.exists() {
        if path.is_file() {
            bail!("{} exists and is not a directory", path.display());
        }

        let is_empty = fs::read_dir(&path)?.next().is_none();
        if !is_empty {
            bail!(
                "config directory '{}' already exists and is not empty",
                path.display()
            );
        }
    }

    let rules_dir = path.join("rules");
    fs::create_dir_all(&rules_dir)?;

    write_file(&path.join("logsift.hcl"), &template("logsift.hcl")?)?;
    write_file(&rules_dir.join("pages.hcl"), &template("rules/pages.hcl")?)?;

    println!("✔ Initialized logsift config in {}", path.display());
    println!("✔ Created:");
    println!("  - logsift.hcl");
    println!("  - rules/pages.hcl");
    println!();
    println!("Next steps:");
    println!("  logsift config check {}", path.display());
    println!(
        "  logsift run --config {} --input access.log --output requests.tsv",
        path.display()
    );

    Ok(())
}

/// Fetch an embedded config template as UTF-8 text
fn template(path: &str) -> Result<String> {
    let file = ConfigTemplates::get(path)
        .with_context(|| format!("missing embedded config template: {path}"))?;

    let s =
        std::str::from_utf8(file.data.as_ref()).context("config template is not valid UTF-8")?;

    Ok(s.to_owned())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    let mut f =
        fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    f.write_all(contents.trim_start().as_bytes())?;
    Ok(())
}
