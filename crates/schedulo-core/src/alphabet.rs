//! Bidirectional mapping between upper-case ASCII letters and their
//! 0-based alphabet index (`'A'` = 0 … `'Z'` = 25).
//!
//! Five bits hold any index, which is what lets
//! [`CompactCourseId`](crate::course_id::CompactCourseId) pack a three
//! letter prefix into a `u16`.

use crate::error::ValidationError;

/// Index returned when a letter passes the range check but is somehow
/// missing from the table. Unpacks to [`UNKNOWN_LETTER`].
pub const ERROR_INDEX: u16 = 26;

/// Letter produced for [`ERROR_INDEX`].
pub const UNKNOWN_LETTER: char = '?';

const ALPHABET: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Returns the alphabet index of `letter`.
///
/// Anything outside `'A'..='Z'` is rejected. [`ERROR_INDEX`] is only
/// returned if the table lookup fails for a letter that passed the check.
pub fn index_of(letter: char) -> Result<u16, ValidationError> {
    if !letter.is_ascii_uppercase() {
        return Err(ValidationError::InvalidLetter(letter));
    }
    Ok(ALPHABET
        .iter()
        .position(|&c| c == letter)
        .map_or(ERROR_INDEX, |i| i as u16))
}

/// Returns the letter at `index`, or [`UNKNOWN_LETTER`] for [`ERROR_INDEX`].
pub fn letter_of(index: u16) -> Result<char, ValidationError> {
    if index == ERROR_INDEX {
        return Ok(UNKNOWN_LETTER);
    }
    ALPHABET
        .get(usize::from(index))
        .copied()
        .ok_or(ValidationError::InvalidLetterIndex(index))
}
