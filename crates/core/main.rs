#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::{path::PathBuf, process};

mod app;
mod file;

use app::Summary;

use bibtexer::Encoder;

use clap::Parser;
use eyre::{Result, WrapErr};
use log::{info, trace};

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        process::exit(2);
    }
}

fn try_main() -> Result<()> {
    let Cli {
        inputs,
        output,
        force,
        strict,
        verbosity,
        quiet,
    } = Cli::parse();

    setup_errlog(verbosity as usize, quiet)?;

    let paths = file::expand_input_patterns(&inputs)?;
    let mut encoder = Encoder::new(file::open_output(output.as_deref(), force)?);
    let mut summary = Summary::default();

    for path in &paths {
        trace!("Reading records from '{}'", path.display());
        let content = file::read_file_to_string(path)?;
        let records = app::parse_records(&content)
            .wrap_err_with(|| format!("Cannot read records from '{}'", path.display()))?;

        app::encode_records(&mut encoder, &records, strict, &mut summary)?;
    }

    encoder
        .flush()
        .wrap_err("Cannot write BibTeX to the output")?;

    info!(
        "{} entries written from {} file(s), {} record(s) skipped",
        summary.written,
        paths.len(),
        summary.skipped
    );
    Ok(())
}

fn setup_errlog(verbosity: usize, quiet: bool) -> Result<()> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 0 } else { verbosity + 1 };

    stderrlog::new().verbosity(verbosity).init()?;
    Ok(())
}

#[derive(Parser)]
#[clap(name = "bibtexer")]
#[clap(about = "Encode bibliographic records from JSON files as BibTeX entries")]
#[clap(version, author)]
struct Cli {
    /// Glob patterns of JSON files, each holding an array of records
    ///
    /// A record with an `entry_type` or `citation_key` member is an entry, the schema fields go in
    /// a `fields` object and any other fields in an `additional_fields` object.
    #[clap(required = true)]
    inputs: Vec<String>,

    /// The file to write the BibTeX to, stdout is used when not set
    ///
    /// The `.bib` extension is always used for the file.
    #[clap(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Overwrite the output file if it already exists
    #[clap(short, long)]
    force: bool,

    /// Stop at the first record that cannot be encoded instead of skipping it
    #[clap(short, long)]
    strict: bool,

    /// How chatty the program is when encoding
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences))]
    verbosity: u8,

    /// Only errors are printed to stderr.
    #[clap(short, long)]
    quiet: bool,
}
