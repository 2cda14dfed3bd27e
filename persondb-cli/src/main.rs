//! PersonDB command shell.
//!
//! Loads a database file, then reads commands from stdin until `EXIT` (which saves) or the end
//! of input (which does not).

mod command;
mod shell;

use std::{io, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use persondb::Options;
use tracing_subscriber::EnvFilter;

use crate::shell::Shell;

#[derive(Parser, Debug)]
#[command(name = "persondb", version, about = "Person database management system")]
struct Args {
    /// The database file, one record per line.
    #[arg(env = "PERSONDB_FILE", default_value = "database2025.txt")]
    file: PathBuf,

    /// Start with an empty database if the file does not exist.
    #[arg(long)]
    create: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    println!("PERSON DATABASE MANAGEMENT SYSTEM");
    println!("Database File: {}", args.file.display());
    println!("==========================================");

    let db = Options::new()
        .create_if_missing(args.create)
        .open(&args.file)
        .with_context(|| format!("cannot load database {}", args.file.display()))?;
    println!("SUCCESS: Loaded {} person records", db.load_report().accepted);

    let stdin = io::stdin();
    Shell::new(&db, io::stdout().lock()).run(stdin.lock())
}
