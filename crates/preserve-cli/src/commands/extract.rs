use anyhow::Result;
use preserve_config::Config;
use preserve_core::CaptureMap;
use serde::Serialize;

use super::{build_vault, read_input, write_output};
use crate::cli::ExtractArgs;

#[derive(Serialize)]
struct ExtractOutput<'a> {
    text: &'a str,
    captures: &'a CaptureMap,
}

pub async fn handle(args: ExtractArgs, config: &Config) -> Result<()> {
    let mut vault = build_vault(&args.source, config)?;
    let input = read_input(args.source.input.as_deref()).await?;
    let text = vault.extract(&input);

    let rendered = render(&text, vault.captures(), args.json)?;
    write_output(None, &rendered).await
}

fn render(text: &str, captures: &CaptureMap, json: bool) -> Result<String> {
    if json {
        let mut rendered = serde_json::to_string_pretty(&ExtractOutput { text, captures })?;
        rendered.push('\n');
        Ok(rendered)
    } else {
        Ok(text.to_string())
    }
}
