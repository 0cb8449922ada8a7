//! A1-style cell references

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell position on a sheet
///
/// Rows and columns are 0-based; the A1 form is 1-based with column letters
/// `A..XFD`. A `$` marker in the input is accepted and dropped, since a binding
/// region only needs the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellAddress {
    /// 0-based row
    pub row: u32,
    /// 0-based column (A=0)
    pub col: u16,
}

impl CellAddress {
    /// Create an address from 0-based coordinates
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parse an A1 reference
    ///
    /// # Examples
    /// ```
    /// use sheetbind_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("C7").unwrap();
    /// assert_eq!((addr.row, addr.col), (6, 2));
    ///
    /// assert_eq!(CellAddress::parse("$B$2").unwrap(), CellAddress::new(1, 1));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let text = s.trim();
        let invalid = |why: &str| Error::InvalidAddress(format!("{} in '{}'", why, text));

        let rest = text.strip_prefix('$').unwrap_or(text);
        let split = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let (letters, digits) = rest.split_at(split);
        if letters.is_empty() {
            return Err(invalid("no column letters"));
        }
        let digits = digits.strip_prefix('$').unwrap_or(digits);
        if digits.is_empty() {
            return Err(invalid("no row number"));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("invalid row number"));
        }

        let col = column_index(letters)?;
        let number: u32 = digits
            .parse()
            .map_err(|_| invalid("invalid row number"))?;
        if number == 0 {
            return Err(invalid("row number must be >= 1"));
        }
        if number > MAX_ROWS {
            return Err(Error::RowOutOfBounds(number - 1, MAX_ROWS - 1));
        }
        Ok(Self::new(number - 1, col))
    }

    /// Format as an A1 reference
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", column_letters(self.col), self.row + 1)
    }
}

/// Column letters for a 0-based column (0 = A, 26 = AA)
pub fn column_letters(col: u16) -> String {
    let mut letters = Vec::new();
    let mut n = u32::from(col) + 1;
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.iter().rev().map(|&b| char::from(b)).collect()
}

/// 0-based column for column letters, case-insensitive
pub fn column_index(letters: &str) -> Result<u16> {
    if letters.is_empty() {
        return Err(Error::InvalidAddress("empty column letters".into()));
    }
    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidAddress(format!("invalid column letter '{}'", c)));
        }
        col = col * 26 + u32::from(c.to_ascii_uppercase() as u8 - b'A') + 1;
        if col > u32::from(MAX_COLS) {
            return Err(Error::ColumnOutOfBounds(col - 1, MAX_COLS - 1));
        }
    }
    Ok((col - 1) as u16)
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
