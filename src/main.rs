use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;

use pretty_csv::cli::CliArgs;
use pretty_csv::{read_and_format, read_file_and_format, FormatOptions};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    pretty_csv::tracing::init();

    let mut options = FormatOptions::load();
    args.apply_to(&mut options);
    tracing::debug!(?options, "effective options");

    let table = match &args.path {
        Some(path) => read_file_and_format(path, &options)
            .with_context(|| format!("cannot format {}", path.display()))?,
        None => read_and_format(io::stdin().lock(), &options)
            .context("cannot format standard input")?,
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for line in table.lines() {
        out.write_all(line)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    if args.metadata {
        let json = serde_json::to_string_pretty(&table.metadata)?;
        eprintln!("{}", json);
    }

    Ok(())
}
