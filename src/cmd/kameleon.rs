use clap::Parser;
use std::fs::{self, File};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use kameleon::config::{self, Config};
use kameleon::engine;
use kameleon::key::{self, KeyError};
use kameleon::paths::{self, Direction};
use kameleon::progress::TermProgress;
use kameleon::utils;

/// Kameleon reversible file obscurer
///
/// XORs a file with a repeating mask derived from a hexadecimal key and
/// writes the result next to it. Inputs ending in .kam are decrypted back;
/// anything else is encrypted to <file>.kam. The same key restores the
/// original bytes.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Hexadecimal encoding key, 1-64 digits, case-insensitive
    #[arg(short, long)]
    key: Option<String>,

    /// File to encrypt or decrypt (.kam inputs are decrypted)
    #[arg(short, long)]
    file: PathBuf,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Overwrite an existing output file without asking
    #[arg(short = 'y', long)]
    yes: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = utils::init_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let config = match &args.config {
        Some(path) => match config::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("Failed to load config '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    // All validation failures are reported before exiting, like the file
    // checks below, so the user sees every problem at once.
    let mut error = false;

    let raw_key = args.key.clone().or_else(|| config.key.clone());
    let canonical = match raw_key.as_deref() {
        None | Some("") => {
            println!("The encoding key is void");
            error = true;
            None
        }
        Some(raw) => match key::canonicalize(raw) {
            Ok(canonical) if canonical.is_degenerate() => {
                println!("The encoding key is null");
                error = true;
                None
            }
            Ok(canonical) => Some(canonical),
            Err(KeyError::TooLong) => {
                println!("The encoding key exceeds 256 bits");
                error = true;
                None
            }
            Err(_) => {
                println!("The encoding key must be hexadecimal");
                error = true;
                None
            }
        },
    };

    let total = match fs::metadata(&args.file) {
        Err(_) => {
            println!("File not found : {}", args.file.display());
            error = true;
            0
        }
        Ok(meta) if meta.len() == 0 => {
            println!("The file is empty");
            error = true;
            0
        }
        Ok(meta) if meta.len() > config.max_file_size => {
            println!("The file exceeds {}MB", config.max_file_size / 1_000_000);
            error = true;
            0
        }
        Ok(meta) => meta.len(),
    };

    if error {
        std::process::exit(1);
    }
    let canonical = canonical.expect("validated above");
    let raw_key = raw_key.expect("validated above");

    let direction = paths::direction(&args.file);
    if direction == Direction::Encrypt {
        // shown so the user can record the exact mask in use
        println!("Encryption key : {}", canonical);
    }

    let out_path = paths::companion(&args.file);
    if out_path.exists() && !args.yes && !config.force {
        match confirm_overwrite(&out_path) {
            Ok(true) => {}
            Ok(false) => {
                println!("Exiting the program");
                return;
            }
            Err(e) => {
                tracing::error!("Failed to read confirmation: {}", e);
                std::process::exit(1);
            }
        }
    }

    let input = match File::open(&args.file) {
        Ok(file) => file,
        Err(e) => {
            tracing::error!("Failed to open '{}': {}", args.file.display(), e);
            println!("The file can't be read");
            std::process::exit(1);
        }
    };
    let output = match File::create(&out_path) {
        Ok(file) => file,
        Err(e) => {
            tracing::error!("Failed to create '{}': {}", out_path.display(), e);
            println!("Error - issue while opening the file");
            std::process::exit(1);
        }
    };

    let mut progress = TermProgress::stdout();
    match engine::run(input, output, &raw_key, total, &mut progress) {
        Ok(summary) => {
            tracing::debug!("{} bytes processed", summary.bytes);
            let out_name = out_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| out_path.display().to_string());
            match direction {
                Direction::Encrypt => println!("Data has been encrypted to {}", out_name),
                Direction::Decrypt => println!("Data has been decrypted to {}", out_name),
            }
        }
        Err(e) => {
            tracing::error!("{}", e);
            println!("\nError while encoding/decoding the file");
            std::process::exit(1);
        }
    }
}

/// Asks on stdin whether an existing output file may be overwritten
///
/// Loops until the answer is y or n; end of input counts as no.
fn confirm_overwrite(path: &Path) -> io::Result<bool> {
    println!(
        "The output file '{}' already exists.\nOverwrite it ? (Y/n)",
        path.display()
    );
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(false);
        }
        match line.trim().to_ascii_lowercase().as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => {}
        }
    }
}
