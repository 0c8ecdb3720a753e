//! # Schedulo CLI (`schedulo`)
//!
//! Command-line front end for the encrypted planner storage. It loads the
//! store into in-memory registries, changes them, and writes them back.
//!
//! ## Usage
//!
//! ```bash
//! schedulo --config ./config/schedulo.toml --password <pw> <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `schedulo status` | File size, IV and SHA-256 (no password needed) |
//! | `schedulo check` | Verify the password decrypts the store |
//! | `schedulo show` | Print the decrypted document as JSON |
//! | `schedulo summary` | Load the store and print registry counts |
//! | `schedulo seed` | Write the demonstration dataset |
//! | `schedulo import <file>` | Merge a JSON course file into the store |
//! | `schedulo mood <date>` | Record a mood report for a day |
//!
//! The password may also come from `SCHEDULO_PASSWORD`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use schedulo::config;
use schedulo::ingest::{self, JsonFileSource};
use schedulo::logging;
use schedulo::seed;
use schedulo::stats;
use schedulo::{EncryptedStore, StoreError};
use schedulo_core::category::Category;
use schedulo_core::mood::MoodReport;
use schedulo_core::Registries;

/// Schedulo CLI: encrypted local storage for a student planner.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. A missing file falls back to built-in defaults.
#[derive(Parser)]
#[command(
    name = "schedulo",
    about = "Schedulo: encrypted local storage for a student planner",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/schedulo.toml`.
    #[arg(long, global = true, default_value = "./config/schedulo.toml")]
    config: PathBuf,

    /// Storage password.
    #[arg(long, global = true, env = "SCHEDULO_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Show whether the storage file exists, with its size, IV and
    /// SHA-256 fingerprint. Needs no password.
    Status,

    /// Verify that the password decrypts the storage file.
    ///
    /// Exits non-zero when the file is missing or cannot be decrypted.
    Check,

    /// Print the decrypted storage document as pretty JSON.
    Show,

    /// Load the storage file and print counts per registry and semester.
    Summary,

    /// Write the demonstration dataset.
    Seed {
        /// Replace an existing storage file.
        #[arg(long)]
        force: bool,
    },

    /// Merge a JSON course file into the storage.
    ///
    /// The file holds `descriptions` (catalog entries) and `instances`
    /// (course sections keyed by semester name, e.g. "Fall 2024").
    Import {
        /// Path to the course file.
        file: PathBuf,
    },

    /// Add or replace the mood report for a day.
    Mood {
        /// Day of the report (YYYY-MM-DD).
        date: NaiveDate,

        /// Feeling scale, 0 to 10.
        #[arg(long)]
        scale: u8,

        /// What the feeling is about (academic, health, other, personal,
        /// social, spiritual, work).
        #[arg(long)]
        source: Category,

        /// Journal entry text.
        #[arg(long)]
        entry: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_or_minimal(&cli.config)?;
    logging::init(&cfg.logging)?;

    let store = EncryptedStore::new(&cfg.storage.path);

    match cli.command {
        Commands::Status => {
            stats::print_status(&store)?;
        }
        Commands::Check => {
            let password = require_password(cli.password.as_deref())?;
            match store.decrypt_document(password) {
                Ok(_) => println!("Password OK for {}", store.path().display()),
                Err(StoreError::NotFound(path)) => {
                    bail!("No storage file at {}", path.display())
                }
                Err(err) => return Err(err).context("Password check failed"),
            }
        }
        Commands::Show => {
            let password = require_password(cli.password.as_deref())?;
            let document = store
                .decrypt_document(password)
                .with_context(|| format!("Failed to decrypt {}", store.path().display()))?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        Commands::Summary => {
            let password = require_password(cli.password.as_deref())?;
            if !store.exists() {
                println!("No data yet at {}", store.path().display());
                return Ok(());
            }
            let registries = Registries::new();
            let report = store
                .try_read(&registries, password)
                .with_context(|| format!("Failed to load {}", store.path().display()))?;
            stats::print_summary(&registries, Some(&report));
        }
        Commands::Seed { force } => {
            let password = require_password(cli.password.as_deref())?;
            if store.exists() && !force {
                bail!(
                    "Storage already exists at {}; pass --force to replace it",
                    store.path().display()
                );
            }
            let registries = Registries::new();
            seed::seed(&registries)?;
            save(&store, &registries, password)?;
            println!("Seeded demonstration data into {}", store.path().display());
        }
        Commands::Import { file } => {
            let password = require_password(cli.password.as_deref())?;
            let registries = load_existing(&store, password)?;
            let source = JsonFileSource::new(&file);
            let result = ingest::ingest(&source, &registries)?;
            save(&store, &registries, password)?;
            println!(
                "Imported {} descriptions and {} course sections from {} ({} skipped)",
                result.descriptions,
                result.instances,
                file.display(),
                result.skipped
            );
        }
        Commands::Mood {
            date,
            scale,
            source,
            entry,
        } => {
            let password = require_password(cli.password.as_deref())?;
            let report = MoodReport::new(scale, source, entry)?;
            let registries = load_existing(&store, password)?;
            let replaced = registries.moods.has(date);
            registries.moods.add(date, report);
            save(&store, &registries, password)?;
            println!(
                "{} mood report for {}",
                if replaced { "Replaced" } else { "Recorded" },
                date
            );
        }
    }

    Ok(())
}

fn require_password(password: Option<&str>) -> Result<&str> {
    match password {
        Some(pw) if !pw.is_empty() => Ok(pw),
        _ => bail!("A password is required: pass --password or set SCHEDULO_PASSWORD"),
    }
}

/// Loads the store when it exists. A store that exists but cannot be read
/// is an error, so a wrong password never overwrites existing data.
fn load_existing(store: &EncryptedStore, password: &str) -> Result<Registries> {
    let registries = Registries::new();
    if store.exists() {
        store
            .try_read(&registries, password)
            .with_context(|| format!("Failed to load {}", store.path().display()))?;
    }
    Ok(registries)
}

fn save(store: &EncryptedStore, registries: &Registries, password: &str) -> Result<()> {
    store
        .try_write(registries, password)
        .with_context(|| format!("Failed to write {}", store.path().display()))
}
