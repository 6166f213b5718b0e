//! Tetrad command-line application.
//!
//! This is the main entry point for the `tetrad` binary.

use std::{io, process};

use clap::Parser as _;
use tetrad_app::{AppError, cli::Args, commands};
use tetrad_catalog::{Catalog, FileStore};

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let store = FileStore::open(&args.config.data_dir)?;
    let mut catalog = Catalog::load(store);
    log::info!(
        "using catalog at {} ({} played, {} authored)",
        args.config.data_dir.display(),
        catalog.played().len(),
        catalog.authored().len()
    );

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    commands::run(&mut catalog, &args.config, args.command, &mut input, &mut out)
}
