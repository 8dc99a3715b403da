//! Cell label codec
//!
//! Labels are a row made of letters followed by a 1-based column number:
//! `A1`, `B12`, `AA3`. Rows use bijective base-26 so that `Z` (25) is
//! followed by `AA` (26), `AB` (27), ... `AZ`, `BA`, ... `ZZ`, `AAA`.

use std::fmt;

use crate::error::{Error, Result};
use crate::types::TankSize;

/// A 0-based (row, column) cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

impl Position {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parse a label such as `B3` or `aa12`
    pub fn decode(label: &str) -> Result<Position> {
        let text = label.trim();
        let letters_end = text
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(text.len());
        if letters_end == 0 {
            return Err(Error::invalid_position(label));
        }

        let (letters, digits) = text.split_at(letters_end);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_position(label));
        }

        let row = decode_row(letters).ok_or_else(|| Error::invalid_position(label))?;
        let number: u32 = digits.parse().map_err(|_| Error::invalid_position(label))?;
        if number == 0 {
            return Err(Error::invalid_position(label));
        }

        Ok(Position::new(row, number - 1))
    }

    /// The label for this cell
    pub fn encode(&self) -> String {
        format!("{}{}", row_label(self.row), u64::from(self.col) + 1)
    }

    /// The cell immediately to the right
    pub fn right(&self) -> Position {
        Position::new(self.row, self.col.saturating_add(1))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Decode a label into `(row, col)`
pub fn decode(label: &str) -> Result<(u32, u32)> {
    Position::decode(label).map(|p| (p.row, p.col))
}

/// Encode `(row, col)` as a label
pub fn encode(row: u32, col: u32) -> String {
    Position::new(row, col).encode()
}

/// Letters for a 0-based row index: 0 → `A`, 25 → `Z`, 26 → `AA`
pub fn row_label(row: u32) -> String {
    let mut n = u64::from(row) + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push(char::from(b'A' + rem));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn decode_row(letters: &str) -> Option<u32> {
    let mut n: u64 = 0;
    for b in letters.bytes() {
        let digit = u64::from(b.to_ascii_uppercase().checked_sub(b'A')?) + 1;
        if digit > 26 {
            return None;
        }
        n = n.checked_mul(26)?.checked_add(digit)?;
        if n > u64::from(u32::MAX) + 1 {
            return None;
        }
    }
    u32::try_from(n - 1).ok()
}

/// The first segment of a stored position (`B3` of `B3-B4`)
pub fn primary_label(position: &str) -> &str {
    position.split('-').next().unwrap_or(position).trim()
}

/// Whether a stored position carries a display range
pub fn is_range(position: &str) -> bool {
    position.contains('-')
}

/// Display form of a tank position: `B3` becomes `B3-B4` for large tanks.
///
/// Labels that do not decode are returned unchanged.
pub fn format_range(label: &str, size: TankSize) -> String {
    if !size.is_large() {
        return label.to_string();
    }
    match Position::decode(label) {
        Ok(pos) => format!("{}-{}", pos.encode(), pos.right().encode()),
        Err(_) => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_single_letter_rows() {
        for row in 0..26 {
            for col in [0, 1, 4, 11, 98] {
                assert_eq!(decode(&encode(row, col)).unwrap(), (row, col));
            }
        }
    }

    #[test]
    fn test_multi_letter_rows() {
        assert_eq!(encode(26, 0), "AA1");
        assert_eq!(decode("AA1").unwrap(), (26, 0));
        assert_eq!(encode(27, 11), "AB12");
        assert_eq!(decode("AZ1").unwrap(), (51, 0));
        assert_eq!(decode("BA1").unwrap(), (52, 0));
        assert_eq!(row_label(701), "ZZ");
        assert_eq!(row_label(702), "AAA");
        assert_eq!(decode("AAA3").unwrap(), (702, 2));
    }

    #[test]
    fn test_decode_accepts_lower_case() {
        assert_eq!(Position::decode("b3").unwrap(), Position::new(1, 2));
    }

    #[test]
    fn test_decode_rejects_malformed_labels() {
        for label in ["", "1A", "A", "A0", "A-1", "AB", "A1x", "#3", " 3", "A1.5", "A99999999999"] {
            let err = Position::decode(label).unwrap_err();
            assert!(
                matches!(err, Error::InvalidPositionFormat { .. }),
                "{label:?} should be invalid"
            );
        }
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range("B3", TankSize::Large), "B3-B4");
        assert_eq!(format_range("B3", TankSize::Regular), "B3");
        assert_eq!(format_range("B3", TankSize::Small), "B3");
        assert_eq!(format_range("AA9", TankSize::Large), "AA9-AA10");
        assert_eq!(format_range("??", TankSize::Large), "??");
    }

    #[test]
    fn test_primary_label() {
        assert_eq!(primary_label("A2-A3"), "A2");
        assert_eq!(primary_label("C7"), "C7");
        assert!(is_range("A2-A3"));
        assert!(!is_range("A2"));
    }
}
