//! Alphabet Handling
//!
//! An [`Alphabet`] is an ordered sequence of distinct Unicode scalar values.
//! It defines the radix of the format-preserving encryption (the number of
//! characters) and translates between text and numeral strings, where a
//! numeral is a character's position in the alphabet.
//!
//! "Character" here always means a Unicode scalar value, not a UTF-8 code
//! unit and not a grapheme cluster: a base letter followed by a combining
//! mark counts as two distinct alphabet entries.
//!
//! # Example
//!
//! ```
//! use fast_fpe::Alphabet;
//!
//! let alphabet = Alphabet::new("0123456789abcdef").expect("valid alphabet");
//! assert_eq!(alphabet.radix(), 16);
//! assert_eq!(alphabet.numerals("c0de").unwrap(), vec![12, 0, 13, 14]);
//! assert_eq!(alphabet.text(&[12, 0, 13, 14]), "c0de");
//! ```

use std::collections::HashMap;
use std::error::Error;

/// An ordered alphabet of distinct Unicode scalar values.
pub struct Alphabet {
    symbols: Vec<char>,
    positions: HashMap<char, u32>,
}

impl Alphabet {
    /// Build an alphabet from a string, one entry per Unicode scalar in
    /// order of appearance.
    ///
    /// # Parameters
    ///
    /// * `alphabet`: The characters of the alphabet. Must contain at least
    ///               two entries with no repeats.
    ///
    /// # Returns
    ///
    /// * `Ok(Alphabet)` - The validated alphabet.
    /// * `Err(Box<dyn Error>)` - If a character repeats or fewer than two
    ///    characters are given.
    pub fn new(alphabet: &str) -> Result<Self, Box<dyn Error>> {
        let symbols: Vec<char> = alphabet.chars().collect();
        let mut positions = HashMap::with_capacity(symbols.len());

        for (i, &symbol) in symbols.iter().enumerate() {
            if positions.insert(symbol, i as u32).is_some() {
                return Err(format!(
                    "FPE ALPHABET ERROR: Duplicate character {:?} in alphabet",
                    symbol,
                )
                .into());
            }
        }

        if symbols.len() < 2 {
            return Err(format!(
                "FPE ALPHABET ERROR: Alphabet must have at least 2 characters, got {}",
                symbols.len(),
            )
            .into());
        }

        Ok(Alphabet { symbols, positions })
    }

    /// The number of characters in the alphabet.
    pub fn radix(&self) -> u32 {
        self.symbols.len() as u32
    }

    /// Translate text into a numeral string over this alphabet.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<u32>)` - One numeral in `[0, radix)` per scalar of `text`.
    /// * `Err(Box<dyn Error>)` - If any scalar is not in the alphabet.
    pub fn numerals(&self, text: &str) -> Result<Vec<u32>, Box<dyn Error>> {
        text.chars()
            .map(|symbol| {
                self.positions.get(&symbol).copied().ok_or_else(|| {
                    format!(
                        "FPE ALPHABET ERROR: Character {:?} is not in the alphabet",
                        symbol,
                    )
                    .into()
                })
            })
            .collect()
    }

    /// Translate a numeral string back into text.
    ///
    /// Every numeral must be in `[0, radix)`; the engines only produce
    /// numerals reduced mod `radix^m`, so this is total for them.
    pub fn text(&self, numerals: &[u32]) -> String {
        numerals
            .iter()
            .map(|&numeral| self.symbols[numeral as usize])
            .collect()
    }
}
