#[cfg(test)]
#[macro_use]
extern crate quickcheck;

#[macro_use]
extern crate log;

pub use self::code::Code;
pub use self::code::CodeTable;
pub use self::encode::Payload;
pub use self::format::SideTable;
pub use self::frequency::Frequency;
pub use self::frequency::FrequencyTable;
pub use self::tree::Node;
pub use self::tree::NodeIdx;
pub use self::tree::Tree;

use std::error;
use std::fmt;
use std::hash::Hash;
use warn::Warn;

mod bits;
pub mod code;
mod decode;
mod encode;
pub mod format;
pub mod frequency;
pub mod tree;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Error {
    /// The frequency table has no entries, there is no tree to build.
    EmptyAlphabet,
    /// The symbol at `position` in the input has no code.
    UnknownSymbol { position: usize },
    /// The bitstream ended in the middle of a code.
    TruncatedStream,
    /// Padding is not in `0..8`, or is non-zero for an empty payload.
    InvalidPadding(u8),
    /// The frequency table entry at `index` repeats an earlier symbol.
    DuplicateSymbol { index: usize },
    /// The frequency table entry at `index` has a count of zero.
    ZeroCount { index: usize },
    /// The sum of all counts does not fit into a `u64`.
    CountOverflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::Error::*;
        match *self {
            EmptyAlphabet => write!(f, "frequency table is empty"),
            UnknownSymbol { position } => {
                write!(f, "symbol at position {} has no code", position)
            }
            TruncatedStream => write!(f, "bitstream ends in the middle of a symbol"),
            InvalidPadding(p) => write!(f, "invalid padding {}", p),
            DuplicateSymbol { index } => {
                write!(f, "frequency table entry {} repeats a symbol", index)
            }
            ZeroCount { index } => write!(f, "frequency table entry {} has count 0", index),
            CountOverflow => write!(f, "total symbol count overflows"),
        }
    }
}

impl error::Error for Error {}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Warning {
    /// Filler bits at the end of the last byte were not all zero.
    NonZeroPadding,
    /// A tree of a single leaf only has the code `0`, but a `1` bit was read.
    NonZeroCode,
    /// A parsed frequency table is not in ascending count order.
    UnsortedFrequencies,
}

/// Compresses a symbol sequence.
///
/// Returns the frequency table needed for decompression along with the
/// packed bitstream. Empty input yields an empty table and an empty payload.
pub fn compress<S, I>(symbols: I) -> Result<(FrequencyTable<S>, Payload), Error>
where
    S: Copy + Eq + Hash,
    I: IntoIterator<Item = S>,
{
    let symbols: Vec<S> = symbols.into_iter().collect();
    let frequencies = FrequencyTable::count(symbols.iter().cloned());
    if frequencies.is_empty() {
        return Ok((frequencies, Payload::empty()));
    }
    let tree = Tree::from_frequencies(&frequencies)?;
    let payload = CodeTable::from_tree(&tree).encode(symbols)?;
    Ok((frequencies, payload))
}

/// Reverses [`compress`].
pub fn decompress<S, W>(
    warn: &mut W,
    frequencies: &FrequencyTable<S>,
    payload: &Payload,
) -> Result<Vec<S>, Error>
where
    S: Copy + Eq + Hash,
    W: Warn<Warning>,
{
    if frequencies.is_empty() {
        if !payload.bytes.is_empty() {
            return Err(Error::TruncatedStream);
        }
        if payload.padding != 0 {
            return Err(Error::InvalidPadding(payload.padding));
        }
        return Ok(Vec::new());
    }
    let tree = Tree::from_frequencies(frequencies)?;
    tree.decode(warn, &payload.bytes, payload.padding)
}
