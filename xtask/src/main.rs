// Licensed under the Apache-2.0 license

use clap::{Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;

mod fetch;
mod format;
mod iana_gen;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Xtask {
    #[command(subcommand)]
    xtask: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate BGP capability, AFI and SAFI constants from the IANA registries
    IanaGen(iana_gen::Args),
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = SimpleLogger::new().with_level(level).env().init() {
        eprintln!("failed to initialize logging: {e}");
    }
}

fn main() {
    let cli = Xtask::parse();
    let result = match &cli.xtask {
        Commands::IanaGen(args) => {
            init_logging(args.verbose);
            iana_gen::generate(args)
        }
    };
    if let Err(e) = result {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
