// Modplan CLI entry point

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use modplan_cli::{logging, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    let output = match modplan_cli::run(&cli) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("Failed to write to stdout")?;
    if !output.is_empty() && !output.ends_with('\n') {
        writeln!(stdout).context("Failed to write to stdout")?;
    }
    Ok(())
}
