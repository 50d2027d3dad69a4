//! A Rust library for format-preserving encryption.
//!
//! This crate implements the FF1 and FF3-1 modes of NIST SP 800-38G and
//! SP 800-38G Rev. 1 over caller-supplied alphabets of arbitrary Unicode
//! characters. For a given key, tweak and alphabet, a plaintext string is
//! mapped to a ciphertext string of the same length over the same alphabet,
//! reversibly and bit-exactly interoperable with any conformant
//! implementation of the standards.

pub mod fpe;

pub use fpe::{ff1, ff3_1, Alphabet};
