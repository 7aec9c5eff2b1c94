//! Text format of the frequency side table.
//!
//! ```text
//! c=1
//! b=2
//! a=4
//! 1
//! ```
//!
//! Every entry is one symbol character, `=`, the decimal count and a
//! newline, in frequency table order. The file ends with the padding of the
//! payload as a single digit, without a trailing newline. Since the symbol
//! always occupies exactly one character, `=` and newline symbols need no
//! escaping.

use std::error;
use std::fmt;
use std::io;
use std::str::Chars;
use warn::Warn;

use super::Frequency;
use super::FrequencyTable;
use super::Warning;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Error {
    /// The input ended without a padding digit.
    MissingPadding,
    /// The padding character is not a digit in `0..8`.
    InvalidPadding(char),
    /// The symbol on `line` is not followed by `=`.
    MissingSeparator { line: usize },
    /// The count on `line` is empty, not decimal or too large.
    InvalidCount { line: usize },
    /// The entry on `line` is not terminated by a newline.
    UnterminatedLine { line: usize },
    /// The entries do not form a valid frequency table.
    Table(super::Error),
}

impl From<super::Error> for Error {
    fn from(err: super::Error) -> Error {
        Error::Table(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::Error::*;
        match *self {
            MissingPadding => write!(f, "missing padding digit"),
            InvalidPadding(c) => write!(f, "invalid padding {:?}", c),
            MissingSeparator { line } => write!(f, "line {}: expected '='", line),
            InvalidCount { line } => write!(f, "line {}: invalid count", line),
            UnterminatedLine { line } => write!(f, "line {}: expected newline", line),
            Table(ref e) => fmt::Display::fmt(e, f),
        }
    }
}

impl error::Error for Error {}

/// Frequency table together with the padding of the payload it belongs to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SideTable {
    pub frequencies: FrequencyTable<char>,
    pub padding: u8,
}

impl SideTable {
    pub fn new(frequencies: FrequencyTable<char>, padding: u8) -> SideTable {
        assert!(padding < 8);
        SideTable {
            frequencies,
            padding,
        }
    }
    pub fn parse<W>(warn: &mut W, input: &str) -> Result<SideTable, Error>
    where
        W: Warn<Warning>,
    {
        let mut chars = input.chars();
        let mut entries = Vec::new();
        let mut line = 1;
        loop {
            let rest = chars.as_str();
            let mut rest_chars = rest.chars();
            let symbol = rest_chars.next().ok_or(Error::MissingPadding)?;
            if rest_chars.next().is_none() {
                let padding = parse_padding(symbol)?;
                let table = FrequencyTable::from_entries(entries)?;
                if !table.is_sorted() {
                    warn.warn(Warning::UnsortedFrequencies);
                }
                return Ok(SideTable::new(table, padding));
            }
            chars.next();
            if chars.next() != Some('=') {
                return Err(Error::MissingSeparator { line });
            }
            let count = parse_count(&mut chars, line)?;
            entries.push(Frequency { symbol, count });
            line += 1;
        }
    }
    pub fn write<T: io::Write>(&self, mut writer: T) -> io::Result<()> {
        write!(writer, "{}", self)
    }
}

fn parse_padding(c: char) -> Result<u8, Error> {
    match c.to_digit(10) {
        Some(d) if d < 8 => Ok(d as u8),
        _ => Err(Error::InvalidPadding(c)),
    }
}

/// Reads decimal digits up to and including the terminating newline.
fn parse_count(chars: &mut Chars, line: usize) -> Result<u64, Error> {
    let mut count: u64 = 0;
    let mut num_digits = 0;
    loop {
        let c = chars.next().ok_or(Error::UnterminatedLine { line })?;
        if c == '\n' {
            break;
        }
        let digit = c.to_digit(10).ok_or(Error::InvalidCount { line })?;
        count = count
            .checked_mul(10)
            .and_then(|c| c.checked_add(digit as u64))
            .ok_or(Error::InvalidCount { line })?;
        num_digits += 1;
    }
    if num_digits == 0 {
        return Err(Error::InvalidCount { line });
    }
    Ok(count)
}

impl fmt::Display for SideTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for entry in &self.frequencies {
            writeln!(f, "{}={}", entry.symbol, entry.count)?;
        }
        write!(f, "{}", self.padding)
    }
}

#[cfg(test)]
mod test {
    use super::Error;
    use super::SideTable;
    use crate::Frequency;
    use crate::FrequencyTable;
    use crate::Warning;
    use warn::Panic;

    fn table(entries: &[(char, u64)]) -> FrequencyTable<char> {
        let entries = entries
            .iter()
            .map(|&(symbol, count)| Frequency { symbol, count })
            .collect();
        FrequencyTable::from_entries(entries).unwrap()
    }

    fn assert_roundtrip(text: &str, entries: &[(char, u64)], padding: u8) {
        let side = SideTable::parse(&mut Panic, text).unwrap();
        assert_eq!(side, SideTable::new(table(entries), padding));
        assert_eq!(side.to_string(), text);
    }

    fn assert_err(text: &str, err: Error) {
        assert_eq!(SideTable::parse(&mut Panic, text), Err(err));
    }

    #[test] fn simple() { assert_roundtrip("c=1\nb=2\na=4\n1", &[('c', 1), ('b', 2), ('a', 4)], 1) }
    #[test] fn empty() { assert_roundtrip("0", &[], 0) }
    #[test] fn newline_symbol() { assert_roundtrip("\n=3\nx=12\n7", &[('\n', 3), ('x', 12)], 7) }
    #[test] fn separator_symbol() { assert_roundtrip("==1\n1=2\n0", &[('=', 1), ('1', 2)], 0) }
    #[test] fn unicode_symbol() { assert_roundtrip("ä=5\n€=9\n3", &[('ä', 5), ('€', 9)], 3) }

    #[test] fn e_nothing() { assert_err("", Error::MissingPadding) }
    #[test] fn e_no_padding() { assert_err("a=1\n", Error::MissingPadding) }
    #[test] fn e_padding_8() { assert_err("a=1\n8", Error::InvalidPadding('8')) }
    #[test] fn e_padding_letter() { assert_err("a=1\nx", Error::InvalidPadding('x')) }
    #[test] fn e_separator() { assert_err("a=1\nb:2\n0", Error::MissingSeparator { line: 2 }) }
    #[test] fn e_count_empty() { assert_err("a=\n0", Error::InvalidCount { line: 1 }) }
    #[test] fn e_count_letter() { assert_err("a=1x\n0", Error::InvalidCount { line: 1 }) }
    #[test] fn e_count_huge() { assert_err("a=99999999999999999999\n0", Error::InvalidCount { line: 1 }) }
    #[test] fn e_unterminated() { assert_err("a=12", Error::UnterminatedLine { line: 1 }) }
    #[test] fn e_zero() { assert_err("a=0\n0", Error::Table(crate::Error::ZeroCount { index: 0 })) }
    #[test] fn e_duplicate() { assert_err("a=1\na=1\n0", Error::Table(crate::Error::DuplicateSymbol { index: 1 })) }

    #[test]
    fn unsorted() {
        let mut warnings = vec![];
        let side = SideTable::parse(&mut warnings, "a=4\nb=2\n0").unwrap();
        assert_eq!(side.frequencies, table(&[('a', 4), ('b', 2)]));
        assert_eq!(warnings, [Warning::UnsortedFrequencies]);
    }

    #[test]
    fn write() {
        let mut buf = Vec::new();
        SideTable::new(table(&[('a', 1)]), 5).write(&mut buf).unwrap();
        assert_eq!(buf, b"a=1\n5");
    }

    quickcheck! {
        fn roundtrip(input: String, padding: u8) -> bool {
            let side = SideTable::new(FrequencyTable::count(input.chars()), padding % 8);
            SideTable::parse(&mut Panic, &side.to_string()) == Ok(side)
        }
    }
}
