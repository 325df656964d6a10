//! Command line inspection of selections.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;

use crate::app::render::{OutputFormat, RenderOptions, Renderer};
use crate::domain::model::Selection;
use crate::infra::codec::{InputFormat, decode_str};
use crate::infra::config::Config;

/// Decode a list, select an item, and print it with selection markers.
#[derive(Debug, Parser)]
#[command(name = "selectlist", author, version, about, long_about = None)]
pub struct Cli {
    /// Sequence document to read. Reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    /// Format of the input document. Defaults to the configured input format.
    #[arg(long, value_enum)]
    pub input_format: Option<InputFormat>,

    /// Output format. Defaults to the configured render format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Item to select, parsed as JSON or taken as a plain string.
    #[arg(long, value_name = "VALUE")]
    pub select: Option<String>,

    /// Drop items equal to VALUE after selecting. May be repeated.
    #[arg(long, value_name = "VALUE")]
    pub exclude: Vec<String>,
}

/// Run the command against stdin/stdout with the layered configuration.
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let input = read_input(cli.input.as_deref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli, &config, &input, &mut out)
}

/// Decode `input`, apply the requested operations, and write the rendering to `out`.
pub fn execute<W: Write>(cli: &Cli, config: &Config, input: &str, out: &mut W) -> Result<()> {
    let input_format = match cli.input_format {
        Some(format) => format,
        None => config
            .input
            .format
            .parse::<InputFormat>()
            .context("invalid input format in configuration")?,
    };

    let mut selection: Selection<Value> = decode_str(input, input_format)
        .with_context(|| format!("failed to decode {input_format} input"))?;
    tracing::debug!(items = selection.len(), format = %input_format, "decoded input");

    if let Some(raw) = &cli.select {
        selection = selection.select(&parse_value(raw));
        tracing::debug!(selected = selection.selected().is_some(), "applied select");
    }

    if !cli.exclude.is_empty() {
        let excluded: Vec<Value> = cli.exclude.iter().map(|raw| parse_value(raw)).collect();
        selection = selection.filter(|item| !excluded.contains(item));
        tracing::debug!(items = selection.len(), "applied exclusions");
    }

    let mut options = RenderOptions::from_config(config);
    if let Some(format) = cli.format {
        options.format = format;
    }

    let rendered = Renderer::new(options).render(&selection)?;
    out.write_all(rendered.as_bytes())
        .context("failed to write rendered selection")?;
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| {
        tracing::debug!(value = raw, "argument is not JSON; using it as a string");
        Value::String(raw.to_owned())
    })
}
