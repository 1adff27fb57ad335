//! Spreadsheet-style cell addressing: column letters and 1-based rows

use crate::error::{ExtractError, ExtractResult};
use std::fmt;

/// Convert column letters to a 0-based column index (A→0, Z→25, AA→26).
///
/// Letters are case-insensitive and surrounding whitespace is ignored.
pub fn column_index(letters: &str) -> ExtractResult<usize> {
    let trimmed = letters.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::InvalidColumn(letters.to_string()));
    }

    let mut index: usize = 0;
    for ch in trimmed.chars() {
        let upper = ch.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return Err(ExtractError::InvalidColumn(letters.to_string()));
        }
        let digit = (upper as u8 - b'A' + 1) as usize;
        index = index
            .checked_mul(26)
            .and_then(|i| i.checked_add(digit))
            .ok_or_else(|| ExtractError::InvalidColumn(letters.to_string()))?;
    }

    Ok(index - 1)
}

/// Convert a 0-based column index to letters (0→A, 25→Z, 26→AA)
pub fn column_letters(index: usize) -> String {
    let mut result = String::new();
    let mut num = index;

    loop {
        let remainder = num % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if num < 26 {
            break;
        }
        num = num / 26 - 1;
    }

    result
}

/// A resolved, 0-based grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Resolve column letters and a 1-based row number.
    ///
    /// Returns `Ok(None)` for row 0, which has no grid position.
    pub fn resolve(letters: &str, row_number: usize) -> ExtractResult<Option<Self>> {
        let col = column_index(letters)?;
        Ok(row_number.checked_sub(1).map(|row| Self { row, col }))
    }

    /// Parse an A1-style address such as `C10`
    pub fn parse(address: &str) -> ExtractResult<Self> {
        let invalid = || ExtractError::InvalidCellAddress(address.to_string());
        let trimmed = address.trim();
        let split = trimmed
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (letters, digits) = trimmed.split_at(split);
        if letters.is_empty() {
            return Err(invalid());
        }
        let col = column_index(letters)?;
        let row_number: usize = digits.parse().map_err(|_| invalid())?;
        let row = row_number.checked_sub(1).ok_or_else(invalid)?;
        Ok(Self { row, col })
    }

    /// 1-based row number
    pub fn row_number(&self) -> usize {
        self.row + 1
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), self.row_number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letters_in_order() {
        for (i, ch) in ('A'..='Z').enumerate() {
            assert_eq!(column_index(&ch.to_string()).unwrap(), i);
        }
    }

    #[test]
    fn test_multi_letter_columns() {
        assert_eq!(column_index("AA").unwrap(), 26);
        assert_eq!(column_index("AB").unwrap(), 27);
        assert_eq!(column_index("AZ").unwrap(), 51);
        assert_eq!(column_index("BA").unwrap(), 52);
        assert_eq!(column_index("AAA").unwrap(), 702);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(column_index("j").unwrap(), column_index("J").unwrap());
        assert_eq!(column_index("aA").unwrap(), 26);
        assert_eq!(column_index(" s ").unwrap(), 18);
    }

    #[test]
    fn test_invalid_columns() {
        for bad in ["", "  ", "A1", "-", "Ç", "J N", "$A"] {
            assert!(
                matches!(column_index(bad), Err(ExtractError::InvalidColumn(_))),
                "expected InvalidColumn for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_overflowing_column_is_invalid() {
        let huge = "Z".repeat(64);
        assert!(matches!(
            column_index(&huge),
            Err(ExtractError::InvalidColumn(_))
        ));
    }

    #[test]
    fn test_column_letters_inverse() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(702), "AAA");
        for i in [0, 9, 13, 18, 26, 51, 700] {
            assert_eq!(column_index(&column_letters(i)).unwrap(), i);
        }
    }

    #[test]
    fn test_resolve_row_numbers() {
        assert_eq!(CellRef::resolve("J", 13).unwrap(), Some(CellRef::new(12, 9)));
        assert_eq!(CellRef::resolve("A", 1).unwrap(), Some(CellRef::new(0, 0)));
        assert_eq!(CellRef::resolve("A", 0).unwrap(), None);
        assert!(CellRef::resolve("1", 5).is_err());
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(CellRef::parse("C5").unwrap(), CellRef::new(4, 2));
        assert_eq!(CellRef::parse("c10").unwrap(), CellRef::new(9, 2));
        assert_eq!(CellRef::parse("AA121").unwrap().to_string(), "AA121");
        for bad in ["", "C", "5", "C0", "C5X", "C-5"] {
            assert!(CellRef::parse(bad).is_err(), "expected error for {:?}", bad);
        }
    }
}
