//! # memsoak CLI Entry Point
//!
//! Binary entry point for the memsoak storage soak tester.
//!
//! ## Usage
//!
//! ```bash
//! # Soak-test 8 GiB backed by a file on the device under test
//! memsoak /mnt/data/soak.bin 8
//!
//! # Show version
//! memsoak --version
//!
//! # Show help
//! memsoak --help
//! ```

use std::env;
use std::io;
use std::path::PathBuf;

use eyre::{bail, Result, WrapErr};
use memsoak::SoakRunner;

fn main() {
    if let Err(e) = run() {
        // Alternate form prints the whole context chain, ending in the
        // OS error text.
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut positional: Vec<String> = Vec::new();
    for arg in &args[1..] {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-v" => {
                println!("memsoak {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            opt if opt.starts_with('-') => {
                bail!("Unknown option: {}", opt);
            }
            _ => positional.push(arg.clone()),
        }
    }

    if positional.len() != 2 {
        print_usage();
        return Ok(());
    }

    let path = PathBuf::from(&positional[0]);
    let size_gib: u64 = positional[1]
        .parse()
        .wrap_err_with(|| format!("size must be a whole number of GiB, got '{}'", positional[1]))?;

    let stdout = io::stdout();
    let mut runner = SoakRunner::new(path, size_gib, stdout.lock());

    // Runs until externally terminated; returning here means the region
    // could not be constructed.
    runner.run()
}

fn print_usage() {
    println!("memsoak - storage soak tester for silent data corruption");
    println!();
    println!("Writes a deterministic pseudo-random pattern through a memory-mapped,");
    println!("immediately-unlinked backing file and verifies every word, forever.");
    println!();
    println!("USAGE:");
    println!("    memsoak <PATH> <SIZE_GIB>");
    println!();
    println!("ARGS:");
    println!("    <PATH>        Backing file path on the device under test");
    println!("                  (created, then unlinked before use)");
    println!("    <SIZE_GIB>    Region size in whole GiB, rounded down to a");
    println!("                  page-size multiple");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print help information");
    println!("    -v, --version    Print version information");
    println!();
    println!("EXAMPLES:");
    println!("    memsoak /mnt/data/soak.bin 8    Soak-test 8 GiB on /mnt/data");
}
