//! Numeral String Arithmetic
//!
//! Conversions between numeral strings, big integers and byte strings as
//! defined by SP 800-38G: `NUM_radix` interprets numerals most significant
//! first, `STR_radix` produces the fixed-length representation of an
//! integer, and `NUM_2` interprets a byte string as a big-endian integer.
//! FF1's per-round values can reach thousands of bits for long inputs, so
//! everything is done on arbitrary-precision integers.

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

/// NUM_radix(X): the number a numeral string represents, with numerals in
/// decreasing order of significance.
pub fn num_radix(numerals: &[u32], radix: u32) -> BigInt {
    let mut x = BigInt::zero();
    for &numeral in numerals {
        x = x * radix + numeral;
    }
    x
}

/// STR_radix^m(x): the representation of a non-negative `x < radix^m` as a
/// string of `m` numerals, most significant first.
pub fn str_radix(mut x: BigInt, radix: u32, m: usize) -> Vec<u32> {
    let radix = BigInt::from(radix);
    let mut numerals = vec![0u32; m];
    for slot in numerals.iter_mut().rev() {
        let (quotient, remainder) = x.div_rem(&radix);
        *slot = remainder.to_u32().expect("numeral below radix");
        x = quotient;
    }
    numerals
}

/// NUM_2(S): a byte string interpreted as a big-endian integer.
pub fn num_bytes(bytes: &[u8]) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, bytes)
}

/// The big-endian encoding of a non-negative integer in exactly `width`
/// bytes. Values wider than `width` bytes keep their low-order bytes, i.e.
/// the value is reduced mod 2^(8 * width).
pub fn be_bytes(x: &BigInt, width: usize) -> Vec<u8> {
    let (_, bytes) = x.to_bytes_be();
    let mut out = vec![0u8; width];
    if bytes.len() >= width {
        out.copy_from_slice(&bytes[bytes.len() - width..]);
    } else {
        out[width - bytes.len()..].copy_from_slice(&bytes);
    }
    out
}
