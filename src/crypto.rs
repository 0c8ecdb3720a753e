//! Key derivation and AES-256-CBC with PKCS#7 padding.
//!
//! # Key derivation weakness
//!
//! The key is the first 32 bytes of the password's UTF-8 encoding,
//! zero-padded when shorter. There is no salt, no iteration count and no
//! stretching, so the key is only as strong as the raw password and
//! passwords sharing a 32-byte prefix produce the same key. Existing
//! storage files depend on this exact derivation; replacing it with a real
//! KDF needs a versioned file format.
//!
//! CBC without a MAC gives no integrity protection. A wrong key is noticed
//! only because the padding or the decrypted JSON turns out invalid.

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

pub const KEY_LEN: usize = 32;
pub const IV_LEN: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("cipher initialization failed: {0}")]
    Init(String),

    #[error("ciphertext padding is invalid")]
    Padding,
}

/// Derives the storage key from a password (see the module docs).
pub fn derive_key(password: &str) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    let bytes = password.as_bytes();
    let n = bytes.len().min(KEY_LEN);
    key[..n].copy_from_slice(&bytes[..n]);
    key
}

/// A fresh random IV from the operating system RNG.
pub fn generate_iv() -> [u8; IV_LEN] {
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);
    iv
}

pub fn encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher =
        Aes256CbcEnc::new_from_slices(key, iv).map_err(|e| CryptoError::Init(e.to_string()))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypts and strips padding. A ciphertext that is not a whole number
/// of blocks is reported as [`CryptoError::Padding`].
pub fn decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher =
        Aes256CbcDec::new_from_slices(key, iv).map_err(|e| CryptoError::Init(e.to_string()))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::Padding)
}
