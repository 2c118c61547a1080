//! Column letters of A1-style cell references

use once_cell::sync::Lazy;
use regex::Regex;

static NON_COLUMN_LETTERS: Lazy<Regex> = Lazy::new(|| Regex::new("[^A-Z]").expect("Hardcode regex pattern"));

/// Strips everything but `A`-`Z` from a cell reference ("AB12" -> "AB").
///
/// Lower-case letters are stripped as well, so "ab12" yields an empty string.
pub fn column_letters(reference: &str) -> String {
    NON_COLUMN_LETTERS.replace_all(reference, "").into_owned()
}

/// Converts a 0-based column index to letters (0 -> "A", 26 -> "AA").
pub fn index_to_col(col: usize) -> String {
    let mut letters = Vec::new();
    let mut col = col + 1;
    while col > 0 {
        col -= 1;
        letters.push(b'A' + (col % 26) as u8);
        col /= 26;
    }
    letters.iter().rev().map(|letter| *letter as char).collect()
}

/// Builds an A1-style reference from 0-based (row, col).
pub fn index_to_reference(row: usize, col: usize) -> String {
    format!("{}{}", index_to_col(col), row + 1)
}
