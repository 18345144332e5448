use anyhow::Result;
use preserve_config::{Config, PROJECT_FILE};
use std::path::Path;

pub fn handle(force: bool) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    write_project_config(&current_dir, force)?;

    println!("✓ Created {}", PROJECT_FILE);
    println!("  Set transform.command, then run 'preserve run < input'");

    Ok(())
}

fn write_project_config(dir: &Path, force: bool) -> Result<()> {
    let path = dir.join(PROJECT_FILE);

    if path.exists() && !force {
        anyhow::bail!("{} already exists in {}", PROJECT_FILE, dir.display());
    }

    Config::default().save(&path)
}
