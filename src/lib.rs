//! # Schedulo
//!
//! Encrypted local storage for a student planner: course catalog, course
//! sections, personal calendar, academic calendar dates and mood journal.
//!
//! The domain model and the JSON document layout live in
//! [`schedulo_core`]. This crate adds everything that touches the outside
//! world: the cipher, the storage file, configuration, logging and course
//! sources.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ CourseSource │──▶│  Registries  │◀─▶│ DocumentCodec│
//! │ (JSON file)  │   │ (in memory)  │   │  (JSON tree) │
//! └──────────────┘   └──────┬───────┘   └──────┬───────┘
//!                           │                  │
//!                           ▼                  ▼
//!                    ┌──────────────┐   ┌──────────────┐
//!                    │     CLI      │   │EncryptedStore│
//!                    │  (schedulo)  │   │ AES-256-CBC  │
//!                    └──────────────┘   └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! export SCHEDULO_PASSWORD=password
//! schedulo seed                     # write the demo dataset
//! schedulo summary                  # decrypt and count
//! schedulo status                   # size, IV and fingerprint
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`logging`] | Tracing subscriber setup |
//! | [`crypto`] | Key derivation and AES-256-CBC |
//! | [`storage`] | Encrypted store file |
//! | [`ingest`] | Course sources and ingest |
//! | [`seed`] | Demonstration dataset |
//! | [`stats`] | Status and summary output |

pub mod config;
pub mod crypto;
pub mod ingest;
pub mod logging;
pub mod seed;
pub mod stats;
pub mod storage;

pub use storage::{EncryptedStore, StoreError};
