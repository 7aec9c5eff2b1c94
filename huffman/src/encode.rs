use std::hash::Hash;

use super::bits::BitWriter;
use super::CodeTable;
use super::Error;

/// Packed bitstream.
///
/// The low `padding` bits of the last byte are zero filler, not code bits.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Payload {
    pub bytes: Vec<u8>,
    pub padding: u8,
}

impl Payload {
    pub fn empty() -> Payload {
        Default::default()
    }
    /// Number of code bits in the payload.
    pub fn bit_len(&self) -> u64 {
        (self.bytes.len() as u64 * 8).saturating_sub(self.padding as u64)
    }
}

impl<S: Copy + Eq + Hash> CodeTable<S> {
    /// Concatenates the codes of `symbols`, packing them into bytes most
    /// significant bit first.
    pub fn encode<I>(&self, symbols: I) -> Result<Payload, Error>
    where
        I: IntoIterator<Item = S>,
    {
        let symbols = symbols.into_iter();
        let mut writer = BitWriter::with_capacity(symbols.size_hint().0 / 2);
        let mut num_symbols = 0;
        for (position, symbol) in symbols.enumerate() {
            let code = self.get(symbol).ok_or(Error::UnknownSymbol { position })?;
            writer.push_bits(code.bits(), code.len());
            num_symbols += 1;
        }
        let (bytes, padding) = writer.finish();
        debug!(
            "encoded {} symbols into {} bytes, padding={}",
            num_symbols,
            bytes.len(),
            padding,
        );
        Ok(Payload { bytes, padding })
    }
}
