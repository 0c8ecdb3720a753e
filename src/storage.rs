//! Encrypted on-disk storage for the registries.
//!
//! # File format
//!
//! ```text
//! [16 bytes IV][AES-256-CBC/PKCS#7 ciphertext of the UTF-8 JSON document]
//! ```
//!
//! The IV is random per write and stored in the clear. The key comes from
//! [`crypto::derive_key`], which carries a documented weakness.
//!
//! The store holds nothing but its path. Concurrent `write` calls, or a
//! `write` racing a `read`, on the same path are not serialized.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use schedulo_core::document::{self, DecodeReport};
use schedulo_core::Registries;
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::crypto::{self, CryptoError, IV_LEN};

#[derive(Debug, Error)]
pub enum StoreError {
    /// No file yet. A valid state, distinct from a failed read.
    #[error("no storage file at {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cipher initialization failed: {0}")]
    Cipher(String),

    #[error("storage file {} is shorter than its 16-byte IV header", .0.display())]
    ShortHeader(PathBuf),

    /// Bad padding or a payload that is not a JSON object. A wrong
    /// password and a corrupted file both end up here.
    #[error("storage could not be decrypted (wrong password or corrupted file)")]
    Undecipherable,

    #[error("failed to encode storage document: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<CryptoError> for StoreError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::Init(msg) => StoreError::Cipher(msg),
            CryptoError::Padding => StoreError::Undecipherable,
        }
    }
}

/// Facts about the storage file that need no password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreInfo {
    pub size: u64,
    pub iv_hex: String,
    pub sha256: String,
}

#[derive(Debug, Clone)]
pub struct EncryptedStore {
    path: PathBuf,
}

impl EncryptedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True once something has been written. "No data yet" is not an error.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Encrypts the registries to disk. Failures are logged and reported
    /// as `false`; see [`try_write`](Self::try_write) for the cause.
    pub fn write(&self, registries: &Registries, password: &str) -> bool {
        match self.try_write(registries, password) {
            Ok(()) => true,
            Err(err) => {
                error!(path = %self.path.display(), error = %err, "failed to write storage");
                false
            }
        }
    }

    /// Decrypts the file and loads it into the registries. Returns `false`
    /// without touching the registries when the file is missing, unreadable
    /// or cannot be decrypted.
    pub fn read(&self, registries: &Registries, password: &str) -> bool {
        match self.try_read(registries, password) {
            Ok(_) => true,
            Err(StoreError::NotFound(path)) => {
                debug!(path = %path.display(), "no storage file yet");
                false
            }
            Err(StoreError::Undecipherable) => {
                warn!(path = %self.path.display(), "storage could not be decrypted; wrong password or corrupted file");
                false
            }
            Err(err) => {
                error!(path = %self.path.display(), error = %err, "failed to read storage");
                false
            }
        }
    }

    pub fn try_write(&self, registries: &Registries, password: &str) -> Result<(), StoreError> {
        let start = Instant::now();
        let iv = crypto::generate_iv();
        let key = crypto::derive_key(password);

        let plaintext = document::encode(registries).to_bytes()?;
        let ciphertext = crypto::encrypt(&key, &iv, &plaintext)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io(e))?;
            }
        }
        let mut file = File::create(&self.path).map_err(|e| self.io(e))?;
        file.write_all(&iv).map_err(|e| self.io(e))?;
        file.write_all(&ciphertext).map_err(|e| self.io(e))?;
        file.flush().map_err(|e| self.io(e))?;

        info!(
            path = %self.path.display(),
            bytes = IV_LEN + ciphertext.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "wrote storage"
        );
        Ok(())
    }

    pub fn try_read(&self, registries: &Registries, password: &str) -> Result<DecodeReport, StoreError> {
        let start = Instant::now();
        let document = self.decrypt_document(password)?;
        let report =
            document::decode(&document, registries).map_err(|_| StoreError::Undecipherable)?;
        if report.skipped() > 0 {
            warn!(skipped = report.skipped(), "some stored elements could not be loaded");
        }
        info!(
            path = %self.path.display(),
            loaded = report.loaded(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "loaded storage"
        );
        Ok(report)
    }

    /// Decrypts and parses the document without loading it anywhere.
    pub fn decrypt_document(&self, password: &str) -> Result<Value, StoreError> {
        let bytes = self.read_bytes()?;
        if bytes.len() < IV_LEN {
            return Err(StoreError::ShortHeader(self.path.clone()));
        }
        let (iv, ciphertext) = bytes.split_at(IV_LEN);
        let key = crypto::derive_key(password);
        let plaintext = crypto::decrypt(&key, iv, ciphertext)?;

        match serde_json::from_slice::<Value>(&plaintext) {
            Ok(document) if document.is_object() => Ok(document),
            _ => Err(StoreError::Undecipherable),
        }
    }

    /// Size, IV and SHA-256 fingerprint of the file.
    pub fn inspect(&self) -> Result<StoreInfo, StoreError> {
        let bytes = self.read_bytes()?;
        if bytes.len() < IV_LEN {
            return Err(StoreError::ShortHeader(self.path.clone()));
        }
        Ok(StoreInfo {
            size: bytes.len() as u64,
            iv_hex: hex::encode(&bytes[..IV_LEN]),
            sha256: hex::encode(Sha256::digest(&bytes)),
        })
    }

    fn read_bytes(&self) -> Result<Vec<u8>, StoreError> {
        if !self.exists() {
            return Err(StoreError::NotFound(self.path.clone()));
        }
        fs::read(&self.path).map_err(|e| self.io(e))
    }

    fn io(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
