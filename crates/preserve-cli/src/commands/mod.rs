pub mod extract;
pub mod init;
pub mod run;

use anyhow::{Context, Result};
use preserve_config::Config;
use preserve_core::Vault;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::cli::SourceArgs;

/// Build a vault from the `--pattern` flag, falling back to the configured pattern
pub fn build_vault(source: &SourceArgs, config: &Config) -> Result<Vault> {
    let pattern = source.pattern.as_deref().unwrap_or(&config.pattern);
    Vault::from_pattern(pattern).with_context(|| format!("Invalid pattern {:?}", pattern))
}

/// Read the whole input from a file or stdin
pub async fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Write the result to a file or stdout
pub async fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => tokio::fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(content.as_bytes()).await?;
            stdout.flush().await?;
            Ok(())
        }
    }
}
