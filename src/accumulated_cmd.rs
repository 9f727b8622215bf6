use anyhow::{Context, Result};
use tracing::info;

use nemfile_io::{output_csv, output_zip};
use nemfile_records::AccumulatedFile;

use crate::cli::AccumulatedArgs;
use crate::config;
use crate::table_input;

/// Run the `accumulated` subcommand: tabular CSV in, NEM13 file out.
pub fn run(args: AccumulatedArgs) -> Result<()> {
    let config = config::load(args.config.as_deref())?;

    let to_participant = args
        .to_participant
        .or(config.to_participant)
        .context("no recipient: use --to-participant or set to_participant in config")?;
    let from_participant = args.from_participant.or(config.from_participant);

    let rows = table_input::read_accumulated_rows(&args.input)
        .with_context(|| format!("failed to read register reads: {}", args.input.display()))?;

    let mut file = AccumulatedFile::new(&to_participant, from_participant.as_deref());
    for row in rows {
        file.add_reading(row);
    }

    let written = if args.zip {
        output_zip(&file, args.output.as_deref())?
    } else {
        output_csv(&file, args.output.as_deref())?
    };
    info!(path = %written.display(), "NEM13 file written");
    println!("{}", written.display());
    Ok(())
}
