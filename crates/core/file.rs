use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use eyre::{eyre, Context, Result};
use glob::glob;
use log::{info, trace};

/// File extension given to every output file.
pub const BIB_EXT: &str = "bib";

/// Expands each glob pattern into the files it matches.
///
/// The paths are sorted and each path is returned once even if more than one pattern matches it.
pub fn expand_input_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        trace!("Expanding input pattern '{pattern}'");
        let matches = glob(pattern).wrap_err_with(|| format!("Invalid file pattern '{pattern}'"))?;

        let before = paths.len();
        for path in matches {
            let path = path
                .wrap_err("Cannot determine a file path - Do you have the correct permissions?")?;
            if path.is_file() {
                paths.push(path);
            }
        }

        if paths.len() == before {
            return Err(eyre!("No file found matching '{}'", pattern));
        }
    }

    paths.sort();
    paths.dedup();
    Ok(paths)
}

pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .wrap_err_with(|| format!("Cannot read contents of the '{}' file", path.display()))
}

/// Opens the output stream, standard output unless a file path is given.
///
/// The file path always gets the `.bib` extension. An existing file is only truncated when `force`
/// is set.
pub fn open_output(path: Option<&Path>, force: bool) -> Result<Box<dyn Write>> {
    if let Some(path) = path {
        let path_buf = path.with_extension(BIB_EXT);
        info!("Writing BibTeX to `{}`", path_buf.display());
        create_file_for_write(&path_buf, force)
            .map(|file| Box::new(BufWriter::new(file)) as Box<dyn Write>)
    } else {
        trace!("'output' option not used - writing BibTeX to stdout");
        Ok(Box::new(BufWriter::new(io::stdout())))
    }
}

#[inline]
fn create_file_for_write(path: &Path, force: bool) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    options.open(path).wrap_err_with(|| {
        if !force && path.exists() {
            format!(
                "The '{}' file already exists - use the --force option to overwrite it.",
                path.display()
            )
        } else {
            format!("Failed to create the '{}' file for writing.", path.display())
        }
    })
}

#[cfg(test)]
mod tests {

    use super::*;

    use assert_fs::{
        fixture::{FileTouch, FileWriteStr, PathChild},
        TempDir,
    };

    #[test]
    fn expand_patterns_sorted_and_deduplicated() {
        let dir = TempDir::new().expect("Cannot create temp directory for test");
        dir.child("b.json").touch().unwrap();
        dir.child("a.json").touch().unwrap();
        dir.child("notes.txt").touch().unwrap();

        let all = format!("{}/*.json", dir.path().display());
        let one = dir.child("a.json").path().display().to_string();
        let paths = expand_input_patterns(&[all, one]).unwrap();

        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(vec!["a.json", "b.json"], names);
    }

    #[test]
    #[should_panic(expected = "No file found matching")]
    fn pattern_without_matches() {
        let dir = TempDir::new().expect("Cannot create temp directory for test");
        let pattern = format!("{}/*.json", dir.path().display());

        expand_input_patterns(&[pattern]).unwrap();
    }

    #[test]
    #[should_panic(expected = "Invalid file pattern")]
    fn invalid_pattern() {
        expand_input_patterns(&["[".to_owned()]).unwrap();
    }

    #[test]
    fn output_file_gets_bib_extension() {
        let dir = TempDir::new().expect("Cannot create temp directory for test");
        let path = dir.child("refs.txt");

        let mut out = open_output(Some(path.path()), false).unwrap();
        out.write_all(b"@book{x\n}\n").unwrap();
        out.flush().unwrap();
        drop(out);

        let written = fs::read_to_string(dir.child("refs.bib").path()).unwrap();
        assert_eq!("@book{x\n}\n", written);
    }

    #[test]
    #[should_panic(expected = "already exists")]
    fn existing_output_needs_force() {
        let dir = TempDir::new().expect("Cannot create temp directory for test");
        dir.child("refs.bib").touch().unwrap();

        open_output(Some(dir.child("refs.bib").path()), false).unwrap();
    }

    #[test]
    fn force_truncates_existing_output() {
        let dir = TempDir::new().expect("Cannot create temp directory for test");
        let child = dir.child("refs.bib");
        child.write_str("old content that is longer").unwrap();

        let mut out = open_output(Some(child.path()), true).unwrap();
        out.write_all(b"new").unwrap();
        out.flush().unwrap();
        drop(out);

        assert_eq!("new", fs::read_to_string(child.path()).unwrap());
    }
}
