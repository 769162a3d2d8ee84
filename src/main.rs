use std::fs;
use std::io;
use std::path::Path;
use std::process::exit;

use clap::Parser as CliParser;
use log::LevelFilter;

use semtab::cli::Cli;
use semtab::display::TableRenderer;
use semtab::error::Error;
use semtab::frontend::DeclScanner;
use semtab::sema::Session;

/// The main entry point for the application.
///
/// Parses command-line arguments and processes each input file.
fn main() {
    if !run() {
        exit(1);
    }
}

fn run() -> bool {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    let _ = logger.try_init();

    let mut ok = true;
    for path in &cli.input_files {
        if let Err(e) = process_file(path, !cli.no_color) {
            eprintln!("error: {}", e);
            ok = false;
        }
    }
    ok
}

/// Scans one file with a fresh session and renders its tables. A session is
/// never reused across files, so nothing leaks between runs.
fn process_file(path: &Path, color: bool) -> Result<(), Error> {
    let source = fs::read_to_string(path).map_err(|source| Error::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    let mut session = Session::new();
    DeclScanner::new(&mut session).scan(&source);

    let stdout = io::stdout();
    TableRenderer::new(color).render(&session, &mut stdout.lock())?;
    Ok(())
}
