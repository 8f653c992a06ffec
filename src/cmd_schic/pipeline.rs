use clap::*;
use log::{info, warn};
use schic::libs::scan;
use std::path::Path;

use super::{binary, bottom, conserve};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("pipeline")
        .about("bottom, binary and conserve in one run")
        .after_help(
            r###"
Runs the three stages back to back:

    <workdir>/bottom1p/bottom1p_<name>          schic bottom
    <workdir>/binary/binary_bottom1p_<name>     schic binary
    report                                      schic conserve

Only the files written by this run are passed on to the next stage. Files that fail
in the first two stages are reported and left out; the report is still written, and
the run then exits with an error. Inputs sharing a file name, e.g. from two
directories, are rejected before anything is written.

Examples:
1. Everything from a directory of distance matrices:
   schic pipeline dist/ -d work/ -o conserved_cells.csv

2. Bottom 2%, locations shared by at least 2 cells:
   schic pipeline dist/ -d work/ --percentile 2 --min-count 2

"###,
        )
        .arg(
            Arg::new("infiles")
                .required(true)
                .num_args(1..)
                .index(1)
                .help("Input distance matrix files or directories"),
        )
        .arg(
            Arg::new("workdir")
                .long("workdir")
                .short('d')
                .num_args(1)
                .required(true)
                .help("Directory for the intermediate matrices"),
        )
        .arg(
            Arg::new("percentile")
                .long("percentile")
                .short('p')
                .num_args(1)
                .default_value("1")
                .value_parser(value_parser!(f64))
                .help("Percentile of positive distances to keep, in [0, 100]"),
        )
        .arg(
            Arg::new("pattern")
                .long("pattern")
                .num_args(1)
                .default_value("*.txt")
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
    //----------------------------
    // Args
    //----------------------------
    let infiles: Vec<String> = args.get_many::<String>("infiles").unwrap().cloned().collect();
    let workdir = Path::new(args.get_one::<String>("workdir").unwrap());
    let pct = *args.get_one::<f64>("percentile").unwrap();
    let pattern = args.get_one::<String>("pattern").unwrap();
    let min_count = *args.get_one::<u32>("min_count").unwrap();
    let outfile = args.get_one::<String>("outfile").unwrap();

    bottom::check_percentile(pct)?;

    //----------------------------
    // Operating
    //----------------------------
    let files = scan::find_files(&infiles, pattern)?;
    info!("==> bottom: {} file(s)", files.len());
    let thresholded = bottom::run(&files, &workdir.join("bottom1p"), "bottom1p_", pct)?;

    info!("==> binary: {} file(s)", thresholded.written.len());
    let bindir = workdir.join("binary");
    let binaries = binary::run(&thresholded.written, Some(bindir.as_path()), "binary_")?;

    info!("==> conserve: {} file(s)", binaries.written.len());
    let cells = conserve::run(&binaries.written)?;
    conserve::save(&cells, outfile, min_count)?;

    let failed = thresholded.failed + binaries.failed;
    if failed > 0 {
        warn!("{} file(s) were left out of the report", failed);
    }
    thresholded.finish("bottom")?;
    binaries.finish("binary")?;

    Ok(())
}
