use anyhow::Context;
use clap::*;
use log::{debug, info};
use schic::libs::conserve::{self, Conservation, ConservedCell};
use schic::libs::error::ConserveError;
use schic::libs::matrix::Matrix;
use schic::libs::scan;
use std::io::Write;
use std::path::PathBuf;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("conserve")
        .about("Count, per cell location, the indicators set across files")
        .after_help(
            r###"
Reads 0/1 indicator matrices and counts, for every (row, column), the number of
files holding a 1 there. Locations never set are not reported.

Output:
  Row,Column,ConservedInFiles
  <row>,<column>,<count>
  ...
Rows and columns are 0-based. Records are sorted by count, descending; equal counts
keep the order in which the locations were first met (row-major, files in order).

Notes:
* A directory input expands to the files inside it matching --pattern, sorted by name.
* Cells must be integers; only 1 counts, any other integer is ignored.
* All matrices must share the size of the first one; a mismatch aborts the run.
* No input file at all is an error, unlike files with nothing in common.

Examples:
1. Report from the output of `schic binary`:
   schic conserve binary/ -o conserved_cells.csv

2. Only locations shared by at least 3 cells:
   schic conserve binary/ --min-count 3

"###,
        )
        .arg(
            Arg::new("infiles")
                .required(true)
                .num_args(1..)
                .index(1)
                .help("Input indicator files or directories"),
        )
        .arg(
            Arg::new("pattern")
                .long("pattern")
                .num_args(1)
                .default_value("binary_*.txt")
                .help("Glob for files inside directory inputs"),
        )
        .arg(
            Arg::new("min_count")
                .long("min-count")
                .num_args(1)
                .default_value("1")
                .value_parser(value_parser!(u32))
                .help("Report only locations set in at least this many files"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infiles: Vec<String> = args.get_many::<String>("infiles").unwrap().cloned().collect();
    let pattern = args.get_one::<String>("pattern").unwrap();
    let min_count = *args.get_one::<u32>("min_count").unwrap();
    let outfile = args.get_one::<String>("outfile").unwrap();

    let files = scan::find_files(&infiles, pattern)?;
    let cells = run(&files)?;
    save(&cells, outfile, min_count)
}

pub fn run(files: &[PathBuf]) -> anyhow::Result<Vec<ConservedCell>> {
    let mut conservation = Conservation::new();

    for infile in files {
        info!("Processing {}", infile.display());
        let matrix = Matrix::<i64>::from_path(&infile.to_string_lossy())?;
        conservation
            .add(&matrix)
            .with_context(|| format!("aggregating {}", infile.display()))?;
        let size = conservation.size().unwrap_or_default();
        debug!(
            "{} locations set within {}x{} after {}",
            conservation.len(),
            size,
            size,
            infile.display()
        );
    }

    match conservation.report() {
        Err(ConserveError::NoFilesProcessed) => {
            anyhow::bail!("No files found. Please check the inputs and --pattern")
        }
        result => Ok(result?),
    }
}

pub fn save(cells: &[ConservedCell], outfile: &str, min_count: u32) -> anyhow::Result<()> {
    let mut writer = schic::writer(outfile)?;
    conserve::write_report(&mut writer, cells, min_count)?;
    writer.flush()?;

    if outfile != "stdout" {
        info!("Conserved cell locations and counts saved to {}", outfile);
    }
    Ok(())
}
