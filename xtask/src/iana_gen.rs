// Licensed under the Apache-2.0 license

//! Generate BGP constants from the IANA capability, AFI and SAFI registries.

use anyhow::{bail, Context, Result};
use iana_registries_generator::{
    generate_all, RegistrySource, SourceFormatter, SyntaxOnly, FAMILIES,
};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::{DirSource, HttpSource};
use crate::format::Rustfmt;

#[derive(clap::Args, Debug)]
pub(crate) struct Args {
    /// File to write the generated constants to
    #[arg(short, long, env = "IANA_GEN_OUTPUT", default_value = "iana_consts.rs")]
    pub(crate) output: PathBuf,

    /// Per-registry HTTP timeout in seconds
    #[arg(long, env = "IANA_GEN_TIMEOUT_SECS", default_value_t = 10)]
    pub(crate) timeout_secs: u64,

    /// Read registries from saved XML files in this directory instead of fetching them
    #[arg(long, value_name = "DIR")]
    pub(crate) source_dir: Option<PathBuf>,

    /// Fail if the output file is not up to date instead of writing it
    #[arg(long)]
    pub(crate) check: bool,

    /// Only syntax-check the generated source instead of running rustfmt
    #[arg(long)]
    pub(crate) no_rustfmt: bool,

    /// Print the generated source instead of writing it
    #[arg(long, conflicts_with = "check")]
    pub(crate) stdout: bool,

    /// Log every skipped record
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

pub(crate) fn generate(args: &Args) -> Result<()> {
    let source: Box<dyn RegistrySource> = match &args.source_dir {
        Some(dir) => Box::new(DirSource::new(dir)),
        None => Box::new(HttpSource::new(Duration::from_secs(args.timeout_secs))?),
    };
    let formatter: Box<dyn SourceFormatter> = if args.no_rustfmt {
        Box::new(SyntaxOnly)
    } else {
        Box::new(Rustfmt::default())
    };

    let code = generate_all(FAMILIES, source.as_ref(), formatter.as_ref())?;
    emit(args, &code)
}

fn emit(args: &Args, code: &str) -> Result<()> {
    if args.stdout {
        print!("{code}");
    } else if args.check {
        check(&args.output, code)?;
        info!("{} is up to date", args.output.display());
    } else {
        fs::write(&args.output, code)
            .with_context(|| format!("error writing {}", args.output.display()))?;
        info!(
            "Output written to: {} ({} bytes)",
            args.output.display(),
            code.len()
        );
    }
    Ok(())
}

fn check(path: &Path, code: &str) -> Result<()> {
    let existing = fs::read_to_string(path)
        .with_context(|| format!("error reading {}", path.display()))?;
    if existing != code {
        bail!(
            "{} is out of date; run `cargo xtask iana-gen`",
            path.display()
        );
    }
    Ok(())
}
