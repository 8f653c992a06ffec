use clap::*;
use log::{error, info};
use schic::libs::binary::binarize;
use schic::libs::matrix::Matrix;
use schic::libs::scan;
use std::path::{Path, PathBuf};

use super::Summary;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("binary")
        .about("Turn thresholded matrices into 0/1 indicators")
        .after_help(
            r###"
Every strictly positive entry becomes 1, everything else 0. All-zero matrices give
all-zero indicators; nothing is skipped.

Notes:
* A directory input expands to the files inside it matching --pattern.
* Output: <outdir>/<prefix><input name>, written as integers.
* Without --outdir, each output is written next to its input.
* Two inputs that would be written to the same output file are an error.

Examples:
1. Binarize the output of `schic bottom`:
   schic binary bottom/ -o binary/

2. In place:
   schic binary bottom/

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
                .help("Output directory, created when missing. Default: beside each input"),
        )
        .arg(
            Arg::new("pattern")
                .long("pattern")
                .num_args(1)
                .default_value("bottom1p_*.txt")
                .help("Glob for files inside directory inputs"),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .num_args(1)
                .default_value("binary_")
                .help("Prefix of output file names"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infiles: Vec<String> = args.get_many::<String>("infiles").unwrap().cloned().collect();
    let outdir = args.get_one::<String>("outdir").map(Path::new);
    let pattern = args.get_one::<String>("pattern").unwrap();
    let prefix = args.get_one::<String>("prefix").unwrap();

    let files = scan::find_files(&infiles, pattern)?;
    let summary = run(&files, outdir, prefix)?;
    summary.finish("binary")
}

pub fn run(files: &[PathBuf], outdir: Option<&Path>, prefix: &str) -> anyhow::Result<Summary> {
    let outfiles = scan::output_paths(files, outdir, prefix)?;
    if let Some(dir) = outdir {
        scan::ensure_dir(dir)?;
    }

    let mut summary = Summary::default();
    for (infile, outfile) in files.iter().zip(outfiles) {
        info!("Processing {}", infile.display());
        match process(infile, &outfile) {
            Ok(()) => {
                info!("Saved binary matrix to {}", outfile.display());
                summary.written.push(outfile);
            }
            Err(err) => {
                error!("Failed on {}: {:#}", infile.display(), err);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

fn process(infile: &Path, outfile: &Path) -> anyhow::Result<()> {
    let matrix = Matrix::<f64>::from_path(&infile.to_string_lossy())?;
    binarize(&matrix).to_path(&outfile.to_string_lossy())
}
