use clap::*;
use log::{error, info, warn};
use schic::libs::matrix::Matrix;
use schic::libs::scan;
use schic::libs::threshold::{self, Extraction};
use std::path::{Path, PathBuf};

use super::Summary;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("bottom")
        .about("Keep the bottom percentile of distances in each matrix")
        .after_help(
            r###"
For each distance matrix, computes the given percentile of its strictly positive
entries and zeroes every entry above it. Zero entries mean "not measured" and are
never counted.

Notes:
* Input: whitespace-delimited square matrices, one row per line. Gzipped files are supported.
* A directory input expands to the files inside it matching --pattern.
* Output: <outdir>/<prefix><input name>, values written with six decimals.
* Inputs sharing a file name, e.g. from two directories, are an error.
* Matrices without any positive entry are skipped.
* A file that cannot be read is reported and the remaining files are still processed.

Examples:
1. Bottom 1% of every *.txt in a directory:
   schic bottom dist/ -o bottom/

2. Bottom 5% of two files:
   schic bottom cell1.txt cell2.txt --percentile 5 -o bottom/

"###,
        )
        .arg(
            Arg::new("infiles")
                .required(true)
                .num_args(1..)
                .index(1)
                .help("Input matrix files or directories"),
        )
        .arg(
            Arg::new("outdir")
                .long("outdir")
                .short('o')
                .num_args(1)
                .required(true)
                .help("Output directory, created when missing"),
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
            Arg::new("prefix")
                .long("prefix")
                .num_args(1)
                .default_value("bottom1p_")
                .help("Prefix of output file names"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infiles: Vec<String> = args.get_many::<String>("infiles").unwrap().cloned().collect();
    let outdir = args.get_one::<String>("outdir").unwrap();
    let pct = *args.get_one::<f64>("percentile").unwrap();
    let pattern = args.get_one::<String>("pattern").unwrap();
    let prefix = args.get_one::<String>("prefix").unwrap();

    check_percentile(pct)?;

    //----------------------------
    // Operating
    //----------------------------
    let files = scan::find_files(&infiles, pattern)?;
    let summary = run(&files, Path::new(outdir), prefix, pct)?;
    summary.finish("bottom")
}

pub fn check_percentile(pct: f64) -> anyhow::Result<()> {
    if !(0.0..=100.0).contains(&pct) {
        anyhow::bail!("--percentile must be in [0, 100], got {}", pct);
    }
    Ok(())
}

pub fn run(files: &[PathBuf], outdir: &Path, prefix: &str, pct: f64) -> anyhow::Result<Summary> {
    let outfiles = scan::output_paths(files, Some(outdir), prefix)?;
    scan::ensure_dir(outdir)?;

    let mut summary = Summary::default();
    for (infile, outfile) in files.iter().zip(outfiles) {
        match process(infile, &outfile, pct) {
            Ok(Some(threshold)) => {
                info!(
                    "Saved bottom {}% matrix to {} (threshold {})",
                    pct,
                    outfile.display(),
                    threshold
                );
                summary.written.push(outfile);
            }
            Ok(None) => {
                warn!("No nonzero values found in {}. Skipping.", infile.display());
                summary.skipped += 1;
            }
            Err(err) => {
                error!("Failed on {}: {:#}", infile.display(), err);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Writes the thresholded matrix and returns the threshold, or `None` when skipped
fn process(infile: &Path, outfile: &Path, pct: f64) -> anyhow::Result<Option<f64>> {
    let matrix = Matrix::<f64>::from_path(&infile.to_string_lossy())?;

    match threshold::extract(&matrix, pct) {
        Extraction::Kept { matrix, threshold } => {
            matrix.to_path(&outfile.to_string_lossy())?;
            Ok(Some(threshold))
        }
        Extraction::Skip => Ok(None),
    }
}
