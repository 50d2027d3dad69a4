//! FF1 Format-Preserving Encryption
//!
//! This module implements the FF1 mode of NIST SP 800-38G. FF1 is a ten
//! round Feistel network over a numeral string: the plaintext is split into
//! two halves and each round adds the output of an AES-based pseudorandom
//! function of one half (plus the tweak and the position of the round) onto
//! the other, modulo `radix^m`. The PRF is a CBC-MAC with zero IV over a
//! fixed prefix block and a per-round block, expanded in counter mode when
//! more output bytes are needed than one AES block provides.
//!
//! FF1 accepts a tweak of any length, including the empty tweak. The
//! accepted text length runs from the shortest length that gives a domain
//! of at least one million messages (never below two numerals) up to
//! 2^32 - 1 numerals, the largest length representable in the PRF input
//! encoding.
//!
//! # Example
//!
//! Encrypt and decrypt a digit string with the SP 800-38G sample key:
//!
//! ```
//! use fast_fpe::ff1;
//!
//! let key = "2b7e151628aed2a6abf7158809cf4f3c";
//! let ciphertext = ff1::encrypt(key, "", "0123456789", "0123456789")
//!     .expect("Encryption failed");
//! assert_eq!(ciphertext, "2433477484");
//!
//! let plaintext = ff1::decrypt(key, "", "0123456789", &ciphertext)
//!     .expect("Decryption failed");
//! assert_eq!(plaintext, "0123456789");
//! ```
//!
//! # Note
//!
//! All validation happens before any cryptographic work: key and tweak hex
//! decoding, key length, alphabet distinctness, text membership in the
//! alphabet, and the length bounds. Every failure is reported as a single
//! invalid-argument error with a human-readable cause.

use std::error::Error;

use num_bigint::BigInt;
use num_integer::Integer;

use super::aes::{AesCipher, AES_BLOCK_SIZE};
use super::alphabet::Alphabet;
use super::numeral::{be_bytes, num_bytes, num_radix, str_radix};

const ROUNDS: u8 = 10;

/// Largest accepted text length. The PRF input encodes the length as a
/// 4-byte big-endian integer, so longer strings cannot be represented.
const MAX_LEN: usize = u32::MAX as usize;

/// Encrypt a numeral string with FF1.
///
/// # Parameters
///
/// * `key_hex`: The AES key as a hex string decoding to 16, 24 or 32 bytes.
/// * `tweak_hex`: The tweak as a hex string of any length, possibly empty.
/// * `alphabet`: The ordered alphabet; at least two distinct characters.
/// * `plaintext`: The text to encrypt. Every character must be in the
///                alphabet and the length must be within the FF1 bounds.
///
/// # Returns
///
/// * `Ok(String)` - The ciphertext, same length and alphabet as the input.
/// * `Err(Box<dyn Error>)` - If any argument fails validation.
pub fn encrypt(
    key_hex: &str,
    tweak_hex: &str,
    alphabet: &str,
    plaintext: &str,
) -> Result<String, Box<dyn Error>> {
    let (cipher, tweak, alphabet, x) = prepare(key_hex, tweak_hex, alphabet, plaintext)?;
    let radix = alphabet.radix();
    let n = x.len();

    // Split into halves A = X[..u], B = X[u..] with u = floor(n / 2).
    let u = n / 2;
    let v = n - u;
    let (mut half_a, mut half_b) = {
        let (a, b) = x.split_at(u);
        (a.to_vec(), b.to_vec())
    };

    let round = RoundFn::new(&cipher, &tweak, radix, u, v, n);
    let modulus_u = BigInt::from(radix).pow(u as u32);
    let modulus_v = BigInt::from(radix).pow(v as u32);

    for i in 0..ROUNDS {
        let y = round.y(i, &half_b);
        let (m, modulus) = if i % 2 == 0 {
            (u, &modulus_u)
        } else {
            (v, &modulus_v)
        };
        let c = (num_radix(&half_a, radix) + y).mod_floor(modulus);
        half_a = half_b;
        half_b = str_radix(c, radix, m);
    }

    half_a.extend_from_slice(&half_b);
    Ok(alphabet.text(&half_a))
}

/// Decrypt a numeral string with FF1.
///
/// Runs the rounds in reverse order with the roles of the halves swapped
/// and the modular addition replaced by subtraction, as in FF1.Decrypt.
///
/// # Parameters
///
/// Same contracts as [`encrypt`], with `ciphertext` in place of the
/// plaintext.
pub fn decrypt(
    key_hex: &str,
    tweak_hex: &str,
    alphabet: &str,
    ciphertext: &str,
) -> Result<String, Box<dyn Error>> {
    let (cipher, tweak, alphabet, x) = prepare(key_hex, tweak_hex, alphabet, ciphertext)?;
    let radix = alphabet.radix();
    let n = x.len();

    let u = n / 2;
    let v = n - u;
    let (mut half_a, mut half_b) = {
        let (a, b) = x.split_at(u);
        (a.to_vec(), b.to_vec())
    };

    let round = RoundFn::new(&cipher, &tweak, radix, u, v, n);
    let modulus_u = BigInt::from(radix).pow(u as u32);
    let modulus_v = BigInt::from(radix).pow(v as u32);

    for i in (0..ROUNDS).rev() {
        let y = round.y(i, &half_a);
        let (m, modulus) = if i % 2 == 0 {
            (u, &modulus_u)
        } else {
            (v, &modulus_v)
        };
        let c = (num_radix(&half_b, radix) - y).mod_floor(modulus);
        half_b = half_a;
        half_a = str_radix(c, radix, m);
    }

    half_a.extend_from_slice(&half_b);
    Ok(alphabet.text(&half_a))
}

/// Validate all arguments and translate them into working form.
///
/// Order: key hex and length, tweak hex, alphabet, text membership, text
/// length bounds. Nothing cryptographic runs before this succeeds.
fn prepare(
    key_hex: &str,
    tweak_hex: &str,
    alphabet: &str,
    text: &str,
) -> Result<(AesCipher, Vec<u8>, Alphabet, Vec<u32>), Box<dyn Error>> {
    let key = hex::decode(key_hex).map_err(|_| "FPE KEY ERROR: Key is not a valid hex string")?;
    let cipher = AesCipher::new(&key)?;

    let tweak =
        hex::decode(tweak_hex).map_err(|_| "FPE FF1 ERROR: Tweak is not a valid hex string")?;
    if tweak.len() > MAX_LEN {
        return Err("FPE FF1 ERROR: Tweak is too long for the 4-byte length encoding".into());
    }

    let alphabet = Alphabet::new(alphabet)?;
    let numerals = alphabet.numerals(text)?;

    let minlen = min_len(alphabet.radix());
    if numerals.len() < minlen || numerals.len() > MAX_LEN {
        return Err(format!(
            "FPE FF1 ERROR: Text length must be between {} and {} for radix {}, got {}",
            minlen,
            MAX_LEN,
            alphabet.radix(),
            numerals.len(),
        )
        .into());
    }

    Ok((cipher, tweak, alphabet, numerals))
}

/// Smallest accepted text length: the shortest `m` with
/// `radix^m >= 1_000_000`, and never below 2.
fn min_len(radix: u32) -> usize {
    let mut len = 1;
    let mut pow = u64::from(radix);
    while pow < 1_000_000 {
        pow *= u64::from(radix);
        len += 1;
    }
    len.max(2)
}

/// The FF1 round function. Holds the per-call constants: the fixed prefix
/// block P, the constant head of Q (tweak plus zero fill to the block
/// boundary), and the PRF output geometry.
struct RoundFn<'a> {
    cipher: &'a AesCipher,
    prefix: [u8; AES_BLOCK_SIZE],
    q_head: Vec<u8>,
    radix: u32,
    b: usize,
    d: usize,
}

impl<'a> RoundFn<'a> {
    fn new(
        cipher: &'a AesCipher,
        tweak: &[u8],
        radix: u32,
        u: usize,
        v: usize,
        n: usize,
    ) -> RoundFn<'a> {
        // b = ceil(ceil(v * log2(radix)) / 8); d = 4 * ceil(b / 4) + 4.
        let bits = (v as f64 * f64::from(radix).log2()).ceil() as usize;
        let b = (bits + 7) / 8;
        let d = 4 * ((b + 3) / 4) + 4;
        let t = tweak.len();

        // P = [1, 2, 1] || radix (3 bytes) || [10] || [u mod 256] || n || t.
        let mut prefix = [0u8; AES_BLOCK_SIZE];
        prefix[0] = 0x01;
        prefix[1] = 0x02;
        prefix[2] = 0x01;
        prefix[3..6].copy_from_slice(&radix.to_be_bytes()[1..]);
        prefix[6] = 0x0a;
        prefix[7] = (u % 256) as u8;
        prefix[8..12].copy_from_slice(&(n as u32).to_be_bytes());
        prefix[12..16].copy_from_slice(&(t as u32).to_be_bytes());

        // Q starts with the tweak, zero-filled so that the whole of Q ends
        // on a block boundary: t + ((-t - b - 1) mod 16) + 1 + b bytes.
        let fill = (AES_BLOCK_SIZE - (t + b + 1) % AES_BLOCK_SIZE) % AES_BLOCK_SIZE;
        let mut q_head = tweak.to_vec();
        q_head.resize(t + fill, 0);

        RoundFn {
            cipher,
            prefix,
            q_head,
            radix,
            b,
            d,
        }
    }

    /// The round value y for round `i`, derived from the numeral half that
    /// is not being modified this round.
    fn y(&self, i: u8, half: &[u32]) -> BigInt {
        // R = CBC-MAC(P || Q) with Q = tweak || fill || i || NUM(half).
        let mut data =
            Vec::with_capacity(AES_BLOCK_SIZE + self.q_head.len() + 1 + self.b);
        data.extend_from_slice(&self.prefix);
        data.extend_from_slice(&self.q_head);
        data.push(i);
        data.extend_from_slice(&be_bytes(&num_radix(half, self.radix), self.b));

        let r = prf(self.cipher, &data);
        let s = expand_s(self.cipher, &r, self.d);
        num_bytes(&s)
    }
}

/// CBC-MAC over block-aligned data: zero IV, XOR each block into the
/// running state and encrypt; the final state is the MAC.
fn prf(cipher: &AesCipher, data: &[u8]) -> [u8; AES_BLOCK_SIZE] {
    let mut y = [0u8; AES_BLOCK_SIZE];
    for block in data.chunks(AES_BLOCK_SIZE) {
        for (y_byte, data_byte) in y.iter_mut().zip(block) {
            *y_byte ^= data_byte;
        }
        cipher.encrypt_block(&mut y);
    }
    y
}

/// Expand R to `d` bytes: S = R || AES(R xor <1>) || AES(R xor <2>) || ...,
/// truncated to `d`, with <j> the 16-byte big-endian counter.
fn expand_s(cipher: &AesCipher, r: &[u8; AES_BLOCK_SIZE], d: usize) -> Vec<u8> {
    let mut s = r.to_vec();
    let mut j: u128 = 1;
    while s.len() < d {
        let mut block = j.to_be_bytes();
        for (block_byte, r_byte) in block.iter_mut().zip(r.iter()) {
            *block_byte ^= r_byte;
        }
        cipher.encrypt_block(&mut block);
        s.extend_from_slice(&block);
        j += 1;
    }
    s.truncate(d);
    s
}
