use anyhow::{Context, Result, bail};
use preserve_config::Config;
use preserve_core::MissPolicy;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use super::{build_vault, read_input, write_output};
use crate::cli::{MissArg, RunArgs};

pub async fn handle(args: RunArgs, config: &Config) -> Result<()> {
    let command = if args.command.is_empty() {
        config.transform.command.clone()
    } else {
        args.command.clone()
    };
    let Some((program, program_args)) = command.split_first() else {
        bail!("No transform command: pass one after `--` or set transform.command in preserve.toml");
    };

    let mut vault = build_vault(&args.source, config)?.with_miss_policy(miss_policy(&args, config));

    let input = read_input(args.source.input.as_deref()).await?;
    let extracted = vault.extract(&input);
    info!("Protected {} token(s) before running {}", vault.captures().len(), program);

    let transformed = run_transform(program, program_args, extracted).await?;

    let restored = if args.strict {
        vault.try_restore(&transformed)?
    } else {
        let restoration = vault.restore_report(&transformed);
        for miss in &restoration.misses {
            eprintln!(
                "  Warning: {} at byte {} has no captured token",
                miss.placeholder, miss.offset
            );
        }
        restoration.text
    };

    write_output(args.output.as_deref(), &restored).await
}

fn miss_policy(args: &RunArgs, config: &Config) -> MissPolicy {
    match (&args.marker, args.on_miss) {
        (Some(marker), _) => MissPolicy::Marker(marker.clone()),
        (None, Some(MissArg::Empty)) => MissPolicy::Empty,
        (None, Some(MissArg::Keep)) => MissPolicy::Keep,
        (None, None) => config.on_miss.clone(),
    }
}

/// Feed `input` to the command's stdin and collect its stdout.
async fn run_transform(program: &str, args: &[String], input: String) -> Result<String> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to start transform {:?}", program))?;

    let mut stdin = child.stdin.take().context("Transform stdin is not piped")?;
    // Write concurrently so a command that streams output cannot deadlock on a full pipe.
    let writer = tokio::spawn(async move {
        stdin.write_all(input.as_bytes()).await?;
        stdin.shutdown().await
    });

    let output = child
        .wait_with_output()
        .await
        .with_context(|| format!("Failed to wait for transform {:?}", program))?;

    if !output.status.success() {
        bail!(
            "Transform {:?} failed ({}): {}",
            program,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    // A successful command may stop reading early; the rest of its input is moot.
    match writer.await? {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
            debug!("Transform {:?} closed stdin before reading all input", program);
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to write input to transform {:?}", program));
        }
    }

    debug!("Transform {:?} produced {} byte(s)", program, output.stdout.len());
    String::from_utf8(output.stdout).context("Transform output is not valid UTF-8")
}
