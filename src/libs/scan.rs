use anyhow::Context;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Expands inputs into matrix files.
///
/// A directory yields the files inside it matching `pattern`, sorted by name; any
/// other input is taken as a file path as is.
///
/// ```
/// let files = schic::libs::scan::find_files(&["tests/schic"], "cell[12].txt").unwrap();
/// assert_eq!(files.len(), 2);
/// assert!(files[0].ends_with("cell1.txt"));
/// ```
pub fn find_files<S: AsRef<str>>(inputs: &[S], pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = vec![];

    for input in inputs {
        let path = Path::new(input.as_ref());
        if !path.is_dir() {
            files.push(path.to_path_buf());
            continue;
        }

        // the directory part is literal, only `pattern` may hold wildcards
        let dir = path
            .to_str()
            .with_context(|| format!("non UTF-8 path {}", path.display()))?;
        let full = format!(
            "{}{}{}",
            glob::Pattern::escape(dir),
            std::path::MAIN_SEPARATOR,
            pattern
        );

        let mut found = vec![];
        for entry in glob::glob(&full).with_context(|| format!("invalid pattern {}", pattern))? {
            let entry = entry?;
            if entry.is_file() {
                found.push(entry);
            }
        }
        found.sort();
        files.extend(found);
    }

    Ok(files)
}

/// `outdir/<prefix><file name of infile>`
///
/// ```
/// use std::path::Path;
/// let out = schic::libs::scan::prefixed_path(Path::new("out"), "binary_", Path::new("in/bottom1p_c1.txt"));
/// assert_eq!(out, Path::new("out/binary_bottom1p_c1.txt"));
/// ```
pub fn prefixed_path(outdir: &Path, prefix: &str, infile: &Path) -> PathBuf {
    let name = infile
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    outdir.join(format!("{}{}", prefix, name))
}

/// Output path of every input, in order.
///
/// With `outdir`, outputs go there; otherwise each lands beside its input. Two inputs
/// mapping to the same output would overwrite each other, so that is an error naming
/// both.
///
/// ```
/// use std::path::{Path, PathBuf};
/// let files = vec![PathBuf::from("a/cell.txt"), PathBuf::from("b/cell.txt")];
/// assert!(schic::libs::scan::output_paths(&files, Some(Path::new("out")), "binary_").is_err());
/// assert!(schic::libs::scan::output_paths(&files, None, "binary_").is_ok());
/// ```
pub fn output_paths(
    files: &[PathBuf],
    outdir: Option<&Path>,
    prefix: &str,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut source_of: HashMap<PathBuf, &Path> = HashMap::new();
    let mut outfiles = Vec::with_capacity(files.len());

    for infile in files {
        let dir = match outdir {
            Some(dir) => dir,
            None => infile.parent().unwrap_or(Path::new(".")),
        };
        let outfile = prefixed_path(dir, prefix, infile);

        if let Some(first) = source_of.get(&outfile) {
            anyhow::bail!(
                "{} and {} would both be written to {}",
                first.display(),
                infile.display(),
                outfile.display()
            );
        }
        source_of.insert(outfile.clone(), infile);
        outfiles.push(outfile);
    }

    Ok(outfiles)
}

/// Creates `dir` and its parents when missing
pub fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("could not create {}", dir.display()))
}
