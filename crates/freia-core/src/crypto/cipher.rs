// ============================================
// File: crates/freia-core/src/crypto/cipher.rs
// ============================================
//! # Symmetric Encryption
//!
//! ## Creation Reason
//! Provides the encryption capability used by both protocol layers:
//! AES-256 in CBC mode with PKCS7 padding and a random IV per message.
//!
//! ## Main Functionality
//! - `CryptoProvider`: Trait for derive / encrypt / decrypt
//! - `Pbkdf2AesCrypto`: Production implementation (PBKDF2 + AES-256-CBC)
//! - `encrypt` / `decrypt`: Free functions over raw AES-256-CBC
//!
//! ## Blob Format
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │ IV (16 bytes)                  │ ← fresh per call  │
//! ├────────────────────────────────────────────────────┤
//! │ Ciphertext (n * 16 bytes)      │ ← PKCS7 padded    │
//! └────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Never reuse an IV: it is drawn from the thread RNG on every call
//! - Decryption returns an error rather than garbage when padding is bad
//!
//! ## Last Modified
//! v0.1.0 - Initial AES-256-CBC implementation

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;

use super::{kdf, SymmetricKey, BLOCK_SIZE, IV_SIZE, PBKDF2_ROUNDS};
use crate::error::{CoreError, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

// ============================================
// CryptoProvider Trait
// ============================================

/// Trait for the symmetric crypto capability used by the codec and the
/// connection manager.
///
/// # Purpose
/// Abstracts the primitives so that:
/// - Tests can use a cheap derivation or a failing cipher
/// - The cipher suite can be replaced without touching framing code
pub trait CryptoProvider: Send + Sync {
    /// Derives a key from a password.
    ///
    /// # Errors
    /// - `KeyDerivation`: If the password is empty
    fn derive_key(&self, password: &str) -> Result<SymmetricKey>;

    /// Encrypts `plaintext`, returning `iv || ciphertext`.
    ///
    /// # Errors
    /// - `Encryption`: If the underlying primitive fails
    fn encrypt(&self, plaintext: &[u8], key: &SymmetricKey) -> Result<Vec<u8>>;

    /// Decrypts an `iv || ciphertext` blob.
    ///
    /// # Errors
    /// - `Decryption`: If the blob is too short, misaligned or badly padded
    fn decrypt(&self, blob: &[u8], key: &SymmetricKey) -> Result<Vec<u8>>;
}

// ============================================
// Pbkdf2AesCrypto
// ============================================

/// Default implementation: PBKDF2-HMAC-SHA256 derivation and
/// AES-256-CBC encryption.
#[derive(Debug, Clone, Copy)]
pub struct Pbkdf2AesCrypto {
    rounds: u32,
}

impl Pbkdf2AesCrypto {
    /// Creates a provider using `PBKDF2_ROUNDS` iterations.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rounds: PBKDF2_ROUNDS,
        }
    }

    /// Creates a provider with a custom PBKDF2 iteration count.
    ///
    /// Keys derived with a different count are incompatible with peers
    /// using the default; intended for tests and benchmarks.
    #[must_use]
    pub const fn with_rounds(rounds: u32) -> Self {
        Self { rounds }
    }

    /// Returns the PBKDF2 iteration count.
    #[must_use]
    pub const fn rounds(&self) -> u32 {
        self.rounds
    }
}

impl Default for Pbkdf2AesCrypto {
    fn default() -> Self {
        Self::new()
    }
}

impl CryptoProvider for Pbkdf2AesCrypto {
    fn derive_key(&self, password: &str) -> Result<SymmetricKey> {
        kdf::derive_key(password, self.rounds)
    }

    fn encrypt(&self, plaintext: &[u8], key: &SymmetricKey) -> Result<Vec<u8>> {
        encrypt(plaintext, key)
    }

    fn decrypt(&self, blob: &[u8], key: &SymmetricKey) -> Result<Vec<u8>> {
        decrypt(blob, key)
    }
}

// ============================================
// AES-256-CBC
// ============================================

/// Encrypts `plaintext` under `key` with a fresh random IV.
///
/// # Returns
/// `iv (16 bytes) || ciphertext`, where the ciphertext length is the
/// plaintext length rounded up to the next full block.
///
/// # Errors
/// - `Encryption`: If the cipher cannot be initialised
pub fn encrypt(plaintext: &[u8], key: &SymmetricKey) -> Result<Vec<u8>> {
    let mut iv = [0u8; IV_SIZE];
    rand::thread_rng().fill_bytes(&mut iv);

    let cipher = Aes256CbcEnc::new_from_slices(key.as_bytes(), &iv)
        .map_err(|_| CoreError::encryption("invalid key or IV length"))?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut output = Vec::with_capacity(IV_SIZE + ciphertext.len());
    output.extend_from_slice(&iv);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypts an `iv || ciphertext` blob under `key`.
///
/// # Errors
/// - `Decryption`: If the blob is shorter than the IV, the ciphertext is
///   empty or not block aligned, or the padding is invalid
pub fn decrypt(blob: &[u8], key: &SymmetricKey) -> Result<Vec<u8>> {
    if blob.len() < IV_SIZE {
        return Err(CoreError::decryption(format!(
            "blob shorter than IV: {} < {}",
            blob.len(),
            IV_SIZE
        )));
    }

    let (iv, ciphertext) = blob.split_at(IV_SIZE);
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CoreError::decryption(format!(
            "ciphertext length {} is not a positive multiple of {}",
            ciphertext.len(),
            BLOCK_SIZE
        )));
    }

    let cipher = Aes256CbcDec::new_from_slices(key.as_bytes(), iv)
        .map_err(|_| CoreError::decryption("invalid key or IV length"))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CoreError::decryption("invalid padding"))
}

// ============================================
// Tests
// ============================================
