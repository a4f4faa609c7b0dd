use anyhow::{Context, Result};
use clap::Parser;
use jinpin::{try_unpin, unpin};

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Decode armored template fragments in rendered output.
///
/// Reads the output of a renderer that embedded jinpin fragments and writes it
/// back with every fragment restored to its template syntax.
#[derive(Parser, Debug)]
#[command(name = "jinpin")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Fail on the first malformed armored run instead of leaving it verbatim.
    #[arg(long)]
    strict: bool,

    /// Input file; reads stdin when omitted.
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let input = match &cli.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            input
        }
    };

    let decoded = if cli.strict {
        try_unpin(&input).map_err(|err| {
            let line = input[..err.offset()].matches('\n').count() + 1;
            anyhow::anyhow!("line {}: {}", line, err)
        })?
    } else {
        unpin(&input)
    };

    io::stdout()
        .write_all(decoded.as_bytes())
        .context("failed to write stdout")?;
    Ok(())
}
