use anyhow::{Context, Result};
use tracing::info;

use nemfile_io::{output_csv, output_zip};
use nemfile_records::IntervalFile;

use crate::cli::IntervalArgs;
use crate::config;
use crate::table_input;

/// Run the `interval` subcommand: tabular CSV in, NEM12 file out.
pub fn run(args: IntervalArgs) -> Result<()> {
    let config = config::load(args.config.as_deref())?;

    let nmi = args
        .nmi
        .or(config.nmi)
        .context("no NMI: use --nmi or set nmi in config")?;
    let to_participant = args
        .to_participant
        .or(config.to_participant)
        .context("no recipient: use --to-participant or set to_participant in config")?;
    let from_participant = args.from_participant.or(config.from_participant);
    let serial_number = args.serial_number.or(config.serial_number);

    let table = table_input::read_interval_table(&args.input)
        .with_context(|| format!("failed to read readings: {}", args.input.display()))?;

    let mut file = IntervalFile::new(&to_participant, from_participant.as_deref());
    file.add_table(&nmi, &table, &config.uoms, serial_number.as_deref())
        .context("failed to assemble NEM12 records")?;

    let written = if args.zip {
        output_zip(&file, args.output.as_deref())?
    } else {
        output_csv(&file, args.output.as_deref())?
    };
    info!(path = %written.display(), "NEM12 file written");
    println!("{}", written.display());
    Ok(())
}
