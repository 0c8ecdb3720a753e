//! Compact, fixed-size course description identifiers.
//!
//! A [`CompactCourseId`] is three `u16` words: the catalog's academic
//! start year, the packed course prefix, and the course code. Equality,
//! hashing and ordering are plain integer comparisons, which keeps
//! cross-references between registries cheap.
//!
//! # Prefix packing
//!
//! Each prefix letter is an alphabet index (see [`crate::alphabet`]) that
//! fits in 5 bits. Three letters take the low 15 bits of the word, first
//! letter highest; bit 15 is always zero:
//!
//! ```text
//! 0 CCCCC SSSSS EEEEE      "CSE" -> 0 00010 10010 00100 = 2628
//! ```

use std::fmt;

use crate::alphabet;
use crate::error::ValidationError;

/// Bits used per packed letter.
const LETTER_BITS: u16 = 5;
const LETTER_MASK: u16 = 0x1F;
const PREFIX_LEN: usize = 3;

/// Packs a three letter, already upper-case prefix into a `u16`.
///
/// Normalization (trimming, upper-casing) is the caller's job; any other
/// input is rejected.
pub fn pack(prefix: &str) -> Result<u16, ValidationError> {
    let letters: Vec<char> = prefix.chars().collect();
    if letters.len() != PREFIX_LEN {
        return Err(ValidationError::InvalidPrefix(prefix.to_string()));
    }

    let mut packed = 0u16;
    for (i, &letter) in letters.iter().enumerate() {
        let index = alphabet::index_of(letter)?;
        packed |= index << ((PREFIX_LEN - 1 - i) as u16 * LETTER_BITS);
    }
    Ok(packed)
}

/// Unpacks a prefix word back into its three letters.
///
/// Exact left inverse of [`pack`] for every valid prefix.
pub fn unpack(code: u16) -> Result<String, ValidationError> {
    (0..PREFIX_LEN as u16)
        .rev()
        .map(|i| alphabet::letter_of((code >> (i * LETTER_BITS)) & LETTER_MASK))
        .collect()
}

/// Identifier of a course description within one catalog year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompactCourseId {
    start_year: u16,
    prefix_code: u16,
    course_code: u16,
}

impl CompactCourseId {
    /// Builds an identifier from its unpacked parts.
    pub fn new(start_year: u16, prefix: &str, course_code: u16) -> Result<Self, ValidationError> {
        Ok(Self {
            start_year,
            prefix_code: pack(prefix)?,
            course_code,
        })
    }

    /// Start year of the catalog's academic year.
    pub fn start_year(&self) -> u16 {
        self.start_year
    }

    /// The packed prefix word.
    pub fn prefix_code(&self) -> u16 {
        self.prefix_code
    }

    /// The course code, e.g. the 1002 of "CSE 1002".
    pub fn course_code(&self) -> u16 {
        self.course_code
    }

    /// The prefix letters.
    pub fn prefix(&self) -> String {
        // prefix_code only ever comes from pack(), so every slot is a valid index
        unpack(self.prefix_code).unwrap_or_else(|_| {
            std::iter::repeat(alphabet::UNKNOWN_LETTER)
                .take(PREFIX_LEN)
                .collect()
        })
    }
}

impl fmt::Display for CompactCourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}-{})",
            self.prefix(),
            self.course_code,
            self.start_year,
            self.start_year.saturating_add(1)
        )
    }
}
