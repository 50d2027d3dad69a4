//! AES Block Primitive
//!
//! This module wraps the constant-time AES implementation of the `aes` crate
//! behind a single type that selects AES-128, AES-192 or AES-256 from the
//! length of the raw key bytes. The FF1 and FF3-1 engines only ever need
//! single-block ECB encryption; CBC-MAC chaining and counter-style expansion
//! are built from this primitive inside the engines themselves.
//!
//! # Features
//!
//! - `AesCipher::new` validates the key length (16, 24 or 32 bytes) and
//!   builds the matching cipher with its key schedule expanded once.
//! - `AesCipher::encrypt_block` encrypts a 16-byte block in place.
//!
//! # Note
//!
//! The cipher lives only for the duration of a single encrypt or decrypt
//! call; no key material is cached across calls.

use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};

use std::error::Error;

/// AES block size is fixed at 16 bytes.
pub const AES_BLOCK_SIZE: usize = 16;

/// AES key size constants for the three standard variations of AES.
pub const AES_128_KEY_SIZE: usize = 16;
pub const AES_192_KEY_SIZE: usize = 24;
pub const AES_256_KEY_SIZE: usize = 32;

/// An AES block cipher with the variant chosen by key length.
pub enum AesCipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl AesCipher {
    /// Build a cipher from raw key bytes.
    ///
    /// # Parameters
    ///
    /// * `key`: The raw key. Its length selects the variant: 16 bytes for
    ///          AES-128, 24 bytes for AES-192 and 32 bytes for AES-256.
    ///
    /// # Returns
    ///
    /// * `Ok(AesCipher)` - The cipher with its key schedule expanded.
    /// * `Err(Box<dyn Error>)` - If the key length is invalid.
    pub fn new(key: &[u8]) -> Result<Self, Box<dyn Error>> {
        match key.len() {
            AES_128_KEY_SIZE => Ok(AesCipher::Aes128(Aes128::new(GenericArray::from_slice(key)))),
            AES_192_KEY_SIZE => Ok(AesCipher::Aes192(Aes192::new(GenericArray::from_slice(key)))),
            AES_256_KEY_SIZE => Ok(AesCipher::Aes256(Aes256::new(GenericArray::from_slice(key)))),
            _ => Err(format!(
                "FPE KEY ERROR: Invalid key length. Expected 16, 24, or 32 bytes, got {} bytes",
                key.len(),
            )
            .into()),
        }
    }

    /// Encrypt a single 16-byte block in place.
    pub fn encrypt_block(&self, block: &mut [u8; AES_BLOCK_SIZE]) {
        let block = GenericArray::from_mut_slice(block);
        match self {
            AesCipher::Aes128(cipher) => cipher.encrypt_block(block),
            AesCipher::Aes192(cipher) => cipher.encrypt_block(block),
            AesCipher::Aes256(cipher) => cipher.encrypt_block(block),
        }
    }
}
